//! Pure classification over a signal snapshot.
//!
//! `classify` never fails and keeps no state: the same snapshot always
//! produces the same result, audit trail included.

pub mod category;
pub mod confidence;
pub mod rules;
pub mod score;
pub mod tiebreak;

pub use category::OsCategory;
pub use rules::Vote;
pub use score::ScoreTable;
pub use tiebreak::TieBreak;

use serde::Serialize;

use crate::signals::SignalSnapshot;

/// Outcome of one classification run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub scores: ScoreTable,
    pub top_category: OsCategory,
    /// 0-100 display value, table-driven; not a probability.
    pub confidence: u8,
    pub top_score: u32,
    /// Margin over the runner-up, before any tie-break.
    pub gap: u32,
    pub votes: Vec<Vote>,
    /// Present only when the score-based winner was not unique.
    pub tie_break: Option<TieBreak>,
}

/// Turn a snapshot into a result: run the rule table, rank the scores,
/// break ties via the User-Agent, and attach a confidence value.
pub fn classify(snapshot: &SignalSnapshot) -> ClassificationResult {
    let (scores, votes) = rules::evaluate_rules(snapshot);

    let ranked = scores.ranked();
    let (mut top_category, top_score) = ranked[0];
    let second_score = ranked[1].1;
    let gap = top_score - second_score;

    let tied: Vec<OsCategory> = ranked
        .iter()
        .take_while(|(_, score)| *score == top_score)
        .map(|(category, _)| *category)
        .collect();

    // The tie-break may move the label, never the scores: confidence is
    // computed from the raw ranking either way. When it resolves
    // nothing, the first tied category in canonical order stands.
    let tie_break = if tied.len() > 1 {
        let outcome = tiebreak::break_tie(&tied, &snapshot.user_agent, &snapshot.platform);
        if let Some(winner) = outcome.winner {
            top_category = winner;
        }
        Some(outcome)
    } else {
        None
    };

    ClassificationResult {
        scores,
        top_category,
        confidence: confidence::confidence_for(top_score, gap),
        top_score,
        gap,
        votes,
        tie_break,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{Capability, NfcApiKind, NfcProbe, WebGlInfo};
    use super::OsCategory::{Android, Ios, Ipados, Linux, Macos, Windows};

    #[test]
    fn test_classify_is_idempotent() {
        let snapshot = SignalSnapshot {
            touch_points: 5,
            touch_events: true,
            webkit_touch_callout: true,
            short_side_css: 390.0,
            user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)".into(),
            ..Default::default()
        };
        assert_eq!(classify(&snapshot), classify(&snapshot));
    }

    #[test]
    fn test_apple_phone_scenario() {
        let snapshot = SignalSnapshot {
            touch_points: 5,
            touch_events: true,
            webkit_touch_callout: true,
            motion_permission_shape: Capability::Present,
            short_side_css: 375.0,
            ..Default::default()
        };
        let result = classify(&snapshot);
        // ios/ipados: 2 (touch) + 5 (css) + 6 (motion) = 13, phone split
        // adds 5 to ios only.
        assert_eq!(result.scores.get(Ios), 18);
        assert_eq!(result.scores.get(Ipados), 13);
        assert_eq!(result.top_category, Ios);
        assert_eq!(result.top_score, 18);
        assert_eq!(result.gap, 5);
        assert_eq!(result.confidence, 92);
        assert!(result.tie_break.is_none());
    }

    #[test]
    fn test_android_phone_scenario() {
        let snapshot = SignalSnapshot {
            touch_points: 5,
            touch_events: true,
            nfc: NfcProbe {
                kind: Some(NfcApiKind::NdefReader),
                can_scan: true,
                error: None,
            },
            webgl: Some(WebGlInfo {
                vendor: "Qualcomm".into(),
                renderer: "Adreno 640".into(),
            }),
            ..Default::default()
        };
        let result = classify(&snapshot);
        // android: 2 (touch) + 4 (nfc) + 4 (mobile gpu) = 10;
        // ios/ipados keep the 2 from the touch rule.
        assert_eq!(result.scores.get(Android), 10);
        assert_eq!(result.scores.get(Ios), 2);
        assert_eq!(result.top_category, Android);
        assert_eq!(result.gap, 8);
        assert_eq!(result.confidence, 92);
    }

    #[test]
    fn test_desktop_tie_resolved_by_windows_ua() {
        let snapshot = SignalSnapshot {
            pointer_fine: true,
            hover: true,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/126.0".into(),
            ..Default::default()
        };
        let result = classify(&snapshot);
        for category in [Macos, Windows, Linux] {
            assert_eq!(result.scores.get(category), 2);
        }
        assert_eq!(result.top_category, Windows);
        assert_eq!(result.top_score, 2);
        assert_eq!(result.gap, 0);
        assert_eq!(result.confidence, 45);
        let tie = result.tie_break.expect("three-way tie must be recorded");
        assert_eq!(tie.candidates, vec![Macos, Windows, Linux]);
        assert_eq!(tie.winner, Some(Windows));
    }

    #[test]
    fn test_unresolved_tie_keeps_canonical_order_winner() {
        let snapshot = SignalSnapshot {
            pointer_fine: true,
            hover: true,
            ..Default::default()
        };
        let result = classify(&snapshot);
        // No UA at all: the desktop trio stays tied and the first tied
        // category in canonical order wins.
        assert_eq!(result.top_category, Macos);
        assert_eq!(result.confidence, 45);
        let tie = result.tie_break.expect("tie must be recorded");
        assert_eq!(tie.winner, None);
    }

    #[test]
    fn test_all_absent_snapshot() {
        let result = classify(&SignalSnapshot::default());
        // The input-class pair always fires one branch; everything else
        // stays untriggered.
        for category in [Android, Ios, Ipados] {
            assert_eq!(result.scores.get(category), 0);
        }
        for category in [Macos, Windows, Linux] {
            assert_eq!(result.scores.get(category), 2);
        }
        let triggered: Vec<&Vote> = result.votes.iter().filter(|v| v.triggered).collect();
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].rule, "fine-pointer input");
        assert_eq!(result.confidence, 45);
    }

    #[test]
    fn test_scores_never_exceed_summed_rule_weights() {
        // Upper bounds: the sum of the weights of every rule that
        // targets the category.
        let bounds = [
            (Android, 2 + 4 + 3 + 4),
            (Ios, 2 + 5 + 4 + 6 + 2 + 5 + 6),
            (Ipados, 2 + 5 + 4 + 6 + 2 + 5 + 6),
            (Macos, 2 + 4 + 4 + 4 + 2 + 1 + 6 + 4),
            (Windows, 2 + 4 + 2 + 1 + 6),
            (Linux, 2 + 4 + 2 + 1 + 5 + 4),
        ];
        let saturated = SignalSnapshot {
            touch_points: 5,
            touch_events: true,
            pointer_coarse: true,
            pointer_fine: true,
            hover: false,
            webkit_touch_callout: true,
            webkit_overflow_scrolling: true,
            apple_pay: Capability::Present,
            safari_push: Capability::Present,
            motion_permission_shape: Capability::Present,
            standalone: Some(true),
            nfc: NfcProbe {
                kind: Some(NfcApiKind::NdefReader),
                can_scan: true,
                error: None,
            },
            related_apps: Capability::Present,
            serial: Capability::Present,
            hid: Capability::Present,
            usb: Capability::Present,
            short_side_css: 800.0,
            webgl: Some(WebGlInfo {
                vendor: "apple mesa x11 wayland".into(),
                renderer: "apple direct3d mesa x.org llvmpipe adreno angle metal".into(),
            }),
            secure_context: true,
            ..Default::default()
        };
        let result = classify(&saturated);
        for (category, bound) in bounds {
            assert!(
                result.scores.get(category) <= bound,
                "{category} exceeded its summed rule weights: {} > {bound}",
                result.scores.get(category)
            );
        }
    }
}
