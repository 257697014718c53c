//! Signal snapshot data model.
//!
//! One `SignalSnapshot` is built per detection run and passed around by
//! value; neither the collector nor the classifier keeps state between
//! runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::probe::{Capability, NfcProbe};

/// WebGL vendor/renderer strings as reported by the host, unmasked when
/// the debug extension was available.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebGlInfo {
    pub vendor: String,
    pub renderer: String,
}

impl WebGlInfo {
    /// Case-insensitive search across both strings.
    pub fn any_contains(&self, needle: &str) -> bool {
        self.vendor.to_lowercase().contains(needle) || self.renderer_contains(needle)
    }

    /// Case-insensitive search in the renderer string only.
    pub fn renderer_contains(&self, needle: &str) -> bool {
        self.renderer.to_lowercase().contains(needle)
    }
}

/// Everything one classification run knows about the host, captured once.
/// A probe that failed or was unsupported leaves its field at the inert
/// default; no field records a fatal error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSnapshot {
    // Pointer / touch
    pub touch_points: u32,
    pub touch_events: bool,
    pub pointer_coarse: bool,
    pub pointer_fine: bool,
    pub hover: bool,

    // Apple surfaces
    pub webkit_touch_callout: bool,
    pub webkit_overflow_scrolling: bool,
    pub apple_pay: Capability,
    pub safari_push: Capability,
    pub motion_permission_shape: Capability,
    pub standalone: Option<bool>,

    // Android surfaces
    pub nfc: NfcProbe,
    pub related_apps: Capability,

    // Desktop Chromium surfaces
    pub serial: Capability,
    pub hid: Capability,
    pub usb: Capability,

    // Display geometry
    pub short_side_css: f64,
    pub device_pixel_ratio: f64,

    // Graphics stack
    pub webgl: Option<WebGlInfo>,

    // Identity strings and context
    pub user_agent: String,
    pub platform: String,
    pub secure_context: bool,

    pub captured_at: DateTime<Utc>,
}

impl SignalSnapshot {
    /// Touch-first environment: real touch support, or a coarse pointer
    /// without hover capability.
    pub fn is_touch_primary(&self) -> bool {
        let has_real_touch = self.touch_points > 0 && self.touch_events;
        let primary_touch = self.pointer_coarse && !self.hover;
        has_real_touch || primary_touch
    }
}

impl Default for SignalSnapshot {
    fn default() -> Self {
        Self {
            touch_points: 0,
            touch_events: false,
            pointer_coarse: false,
            pointer_fine: false,
            hover: false,
            webkit_touch_callout: false,
            webkit_overflow_scrolling: false,
            apple_pay: Capability::Absent,
            safari_push: Capability::Absent,
            motion_permission_shape: Capability::Absent,
            standalone: None,
            nfc: NfcProbe::default(),
            related_apps: Capability::Absent,
            serial: Capability::Absent,
            hid: Capability::Absent,
            usb: Capability::Absent,
            short_side_css: 0.0,
            device_pixel_ratio: 1.0,
            webgl: None,
            user_agent: String::new(),
            platform: String::new(),
            secure_context: false,
            captured_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_primary_from_real_touch() {
        let snapshot = SignalSnapshot {
            touch_points: 5,
            touch_events: true,
            ..Default::default()
        };
        assert!(snapshot.is_touch_primary());
    }

    #[test]
    fn test_touch_points_alone_are_not_enough() {
        // Some desktop browsers report touch points without touch events.
        let snapshot = SignalSnapshot {
            touch_points: 10,
            touch_events: false,
            pointer_fine: true,
            hover: true,
            ..Default::default()
        };
        assert!(!snapshot.is_touch_primary());
    }

    #[test]
    fn test_coarse_pointer_without_hover_is_touch_primary() {
        let snapshot = SignalSnapshot {
            pointer_coarse: true,
            hover: false,
            ..Default::default()
        };
        assert!(snapshot.is_touch_primary());
    }

    #[test]
    fn test_coarse_pointer_with_hover_is_not() {
        let snapshot = SignalSnapshot {
            pointer_coarse: true,
            hover: true,
            ..Default::default()
        };
        assert!(!snapshot.is_touch_primary());
    }

    #[test]
    fn test_webgl_matching_is_case_insensitive() {
        let info = WebGlInfo {
            vendor: "Google Inc. (Apple)".into(),
            renderer: "ANGLE (Apple, ANGLE Metal Renderer: Apple M2)".into(),
        };
        assert!(info.any_contains("apple"));
        assert!(info.renderer_contains("metal"));
        assert!(!info.renderer_contains("direct3d"));
    }
}
