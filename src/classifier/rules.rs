//! The weighted voting table.
//!
//! Each rule is a predicate over the snapshot, a target category set and
//! an integer weight. A triggered rule adds its weight to every target's
//! accumulator; an untriggered rule is still recorded so the presenter
//! can show the full audit trail.

use serde::Serialize;

use super::category::OsCategory;
use super::score::ScoreTable;
use crate::signals::SignalSnapshot;

use super::category::OsCategory::{Android, Ios, Ipados, Linux, Macos, Windows};

/// Screens at least this wide on their short side (CSS pixels) are
/// treated as tablets on the Apple mobile path.
pub const TABLET_MIN_SHORT_SIDE_CSS: f64 = 600.0;

/// Renderer keywords that indicate a mobile GPU.
const MOBILE_GPU_KEYWORDS: [&str; 4] = ["adreno", "mali", "powervr", "maleoon"];

/// Evaluation record of one rule for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vote {
    pub rule: &'static str,
    pub detail: String,
    pub triggered: bool,
    pub weight: u32,
    pub targets: Vec<OsCategory>,
}

struct Tally {
    scores: ScoreTable,
    votes: Vec<Vote>,
}

impl Tally {
    fn new() -> Self {
        Self {
            scores: ScoreTable::new(),
            votes: Vec::new(),
        }
    }

    fn vote(
        &mut self,
        triggered: bool,
        targets: &[OsCategory],
        weight: u32,
        rule: &'static str,
        detail: String,
    ) {
        if triggered {
            for &target in targets {
                self.scores.add(target, weight);
            }
        }
        self.votes.push(Vote {
            rule,
            detail,
            triggered,
            weight,
            targets: targets.to_vec(),
        });
    }
}

/// Run every rule against the snapshot, in order.
pub fn evaluate_rules(snapshot: &SignalSnapshot) -> (ScoreTable, Vec<Vote>) {
    let mut tally = Tally::new();
    let touch = snapshot.is_touch_primary();

    // Input device class: exactly one of the pair fires.
    tally.vote(
        touch,
        &[Android, Ios, Ipados],
        2,
        "touch or coarse-pointer input",
        format!(
            "maxTouchPoints={}, coarse={}, hover={}",
            snapshot.touch_points, snapshot.pointer_coarse, snapshot.hover
        ),
    );
    tally.vote(
        !touch,
        &[Macos, Windows, Linux],
        2,
        "fine-pointer input",
        format!(
            "fine={}, hover={}",
            snapshot.pointer_fine, snapshot.hover
        ),
    );

    // Apple signals.
    let webkit_mobile_css = snapshot.webkit_touch_callout || snapshot.webkit_overflow_scrolling;
    tally.vote(
        webkit_mobile_css,
        &[Ios, Ipados],
        5,
        "WebKit mobile CSS features",
        format!(
            "touch-callout={}, overflow-scrolling={}",
            snapshot.webkit_touch_callout, snapshot.webkit_overflow_scrolling
        ),
    );
    tally.vote(
        snapshot.apple_pay.is_present(),
        &[Ios, Ipados, Macos],
        4,
        "Apple Pay session API",
        "available across Safari on iOS, iPadOS and macOS".into(),
    );
    tally.vote(
        snapshot.safari_push.is_present(),
        &[Macos],
        4,
        "Safari push object",
        "vendor push object only exists in macOS Safari".into(),
    );
    tally.vote(
        snapshot.motion_permission_shape.is_present(),
        &[Ios, Ipados],
        6,
        "motion permission request shape",
        "DeviceMotionEvent.requestPermission only exists in iOS/iPadOS Safari".into(),
    );
    tally.vote(
        snapshot.standalone.is_some(),
        &[Ios, Ipados],
        2,
        "standalone display-mode field",
        match snapshot.standalone {
            Some(value) => format!("field present, value={value}"),
            None => "field absent".into(),
        },
    );

    // Android signals.
    let nfc = &snapshot.nfc;
    let mut nfc_detail = match nfc.kind {
        Some(kind) => format!("api={}", kind.label()),
        None => "no NFC surface found".into(),
    };
    if nfc.can_scan {
        nfc_detail.push_str(", reader constructed");
    }
    if let Some(error) = &nfc.error {
        nfc_detail.push_str(&format!(", error: {error}"));
    }
    if !snapshot.secure_context {
        nfc_detail.push_str(" (insecure context may hide the API)");
    }
    tally.vote(nfc.has_api(), &[Android], 4, "Web NFC support", nfc_detail);
    tally.vote(
        snapshot.related_apps.is_present(),
        &[Android],
        3,
        "installed related apps query",
        "WebAPK surface, mostly Android Chrome".into(),
    );

    // Desktop Chromium signals.
    tally.vote(
        snapshot.serial.is_present(),
        &[Windows, Macos, Linux],
        4,
        "Web Serial",
        "enabled on desktop Chromium only".into(),
    );
    tally.vote(
        snapshot.hid.is_present(),
        &[Windows, Macos, Linux],
        2,
        "Web HID",
        "mostly desktop browsers".into(),
    );
    tally.vote(
        snapshot.usb.is_present(),
        &[Windows, Macos, Linux],
        1,
        "Web USB",
        "desktop and some Android; weak evidence".into(),
    );

    // Screen-size split, only on the Apple mobile path.
    let apple_mobile_path =
        (webkit_mobile_css || snapshot.motion_permission_shape.is_present()) && touch;
    let short_side = snapshot.short_side_css;
    let size_detail = if apple_mobile_path {
        format!("short side ~{short_side:.0} CSS px")
    } else {
        "not on the Apple mobile path".into()
    };
    tally.vote(
        apple_mobile_path && short_side >= TABLET_MIN_SHORT_SIDE_CSS,
        &[Ipados],
        5,
        "tablet-size screen on the Apple mobile path",
        size_detail.clone(),
    );
    tally.vote(
        apple_mobile_path && short_side < TABLET_MIN_SHORT_SIDE_CSS,
        &[Ios],
        5,
        "phone-size screen on the Apple mobile path",
        size_detail,
    );

    // Graphics stack. The sub-rules are independent; several may fire
    // from one probe result.
    match &snapshot.webgl {
        Some(info) => {
            let detail = format!("vendor=\"{}\", renderer=\"{}\"", info.vendor, info.renderer);
            tally.vote(
                info.any_contains("apple"),
                &[Macos, Ios, Ipados],
                6,
                "WebGL renderer mentions Apple",
                detail.clone(),
            );
            tally.vote(
                info.renderer_contains("direct3d") || info.renderer_contains("d3d"),
                &[Windows],
                6,
                "WebGL backed by Direct3D",
                detail.clone(),
            );
            tally.vote(
                info.any_contains("mesa")
                    || info.renderer_contains("x.org")
                    || info.renderer_contains("llvmpipe"),
                &[Linux],
                5,
                "WebGL mentions Mesa, X.Org or llvmpipe",
                detail.clone(),
            );
            tally.vote(
                info.any_contains("x11") || info.any_contains("wayland"),
                &[Linux],
                4,
                "WebGL mentions X11 or Wayland",
                detail.clone(),
            );
            tally.vote(
                touch
                    && MOBILE_GPU_KEYWORDS
                        .iter()
                        .any(|kw| info.renderer_contains(kw)),
                &[Android],
                4,
                "mobile GPU in a touch environment",
                detail.clone(),
            );
            tally.vote(
                info.renderer_contains("angle") && info.renderer_contains("metal"),
                &[Macos],
                4,
                "ANGLE over Metal",
                detail,
            );
        }
        None => {
            tally.vote(
                false,
                &[],
                0,
                "WebGL renderer info",
                "context unavailable or blocked".into(),
            );
        }
    }

    (tally.scores, tally.votes)
}
