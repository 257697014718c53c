//! Snapshot assembly.
//!
//! Every probe is independently fault-tolerant: a host surface that
//! fails is logged and recorded as its inert default, and collection
//! continues. Nothing here can abort a run.

use anyhow::Result;
use chrono::Utc;

use super::host::{CssFeature, HostSurfaces, MediaQuery, PlatformApi};
use super::probe::{Capability, NfcProbe};
use super::snapshot::SignalSnapshot;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_warn;

fn probe_or<T>(field: &str, fallback: T, probe: impl FnOnce() -> Result<T>) -> T {
    match probe() {
        Ok(value) => value,
        Err(err) => {
            log_warn!("probe {field} failed, recording default: {err:#}");
            fallback
        }
    }
}

/// Build one snapshot from the host's capability surfaces. Async only
/// because of the NFC probe; every other probe is synchronous.
pub async fn collect_snapshot(host: &dyn HostSurfaces) -> SignalSnapshot {
    let touch_points = probe_or("maxTouchPoints", 0, || host.max_touch_points());
    let touch_events = probe_or("touchEvents", false, || host.touch_events());
    let pointer_coarse = probe_or(MediaQuery::PointerCoarse.label(), false, || {
        host.media_matches(MediaQuery::PointerCoarse)
    });
    let pointer_fine = probe_or(MediaQuery::PointerFine.label(), false, || {
        host.media_matches(MediaQuery::PointerFine)
    });
    let hover = probe_or(MediaQuery::Hover.label(), false, || {
        host.media_matches(MediaQuery::Hover)
    });

    let webkit_touch_callout = probe_or(CssFeature::TouchCallout.label(), false, || {
        host.css_supports(CssFeature::TouchCallout)
    });
    let webkit_overflow_scrolling = probe_or(CssFeature::OverflowScrolling.label(), false, || {
        host.css_supports(CssFeature::OverflowScrolling)
    });

    let named_api = |api: PlatformApi| probe_or(api.label(), Capability::Absent, || host.api(api));
    let apple_pay = named_api(PlatformApi::ApplePay);
    let safari_push = named_api(PlatformApi::SafariPush);
    let motion_permission_shape = named_api(PlatformApi::MotionPermission);
    let related_apps = named_api(PlatformApi::RelatedApps);
    let serial = named_api(PlatformApi::Serial);
    let hid = named_api(PlatformApi::Hid);
    let usb = named_api(PlatformApi::Usb);

    let standalone = probe_or("standalone", None, || host.standalone());

    // The one suspension point of a run.
    let nfc = match host.probe_nfc().await {
        Ok(probe) => probe,
        Err(err) => {
            log_warn!("NFC probe failed, recording no surface: {err:#}");
            NfcProbe::default()
        }
    };

    let (screen_width, screen_height) = probe_or("screen", (0.0, 0.0), || host.screen_size());
    let reported_dpr = probe_or("devicePixelRatio", 1.0, || host.device_pixel_ratio());
    let device_pixel_ratio = if reported_dpr > 0.0 { reported_dpr } else { 1.0 };
    let short_side_css = screen_width.min(screen_height) / device_pixel_ratio;

    let webgl = probe_or("webgl", None, || host.webgl_info());

    let user_agent = probe_or("userAgent", String::new(), || host.user_agent());
    let platform = probe_or("platform", String::new(), || host.platform());
    let secure_context = probe_or("secureContext", false, || host.secure_context());

    SignalSnapshot {
        touch_points,
        touch_events,
        pointer_coarse,
        pointer_fine,
        hover,
        webkit_touch_callout,
        webkit_overflow_scrolling,
        apple_pay,
        safari_push,
        motion_permission_shape,
        standalone,
        nfc,
        related_apps,
        serial,
        hid,
        usb,
        short_side_css,
        device_pixel_ratio,
        webgl,
        user_agent,
        platform,
        secure_context,
        captured_at: Utc::now(),
    }
}
