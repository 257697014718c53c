//! The host's capability-query surface.
//!
//! The collector never talks to a browser directly; it probes through
//! `HostSurfaces`, and any implementation may fail any probe at any
//! time. `CapabilityReport` is the standard implementation: a bag of
//! optional fields captured by a page-side script and shipped as JSON,
//! where a missing field behaves like a probe that threw.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::probe::{Capability, NfcApiKind, NfcProbe};
use super::snapshot::WebGlInfo;

/// Media queries the collector evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaQuery {
    PointerCoarse,
    PointerFine,
    Hover,
}

impl MediaQuery {
    pub fn label(self) -> &'static str {
        match self {
            MediaQuery::PointerCoarse => "(pointer:coarse)",
            MediaQuery::PointerFine => "(pointer:fine)",
            MediaQuery::Hover => "(hover:hover)",
        }
    }
}

/// Vendor CSS features probed on the Apple mobile path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssFeature {
    TouchCallout,
    OverflowScrolling,
}

impl CssFeature {
    pub fn label(self) -> &'static str {
        match self {
            CssFeature::TouchCallout => "-webkit-touch-callout",
            CssFeature::OverflowScrolling => "-webkit-overflow-scrolling",
        }
    }
}

/// Named platform APIs whose mere presence is evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformApi {
    ApplePay,
    SafariPush,
    MotionPermission,
    RelatedApps,
    Serial,
    Hid,
    Usb,
}

impl PlatformApi {
    pub fn label(self) -> &'static str {
        match self {
            PlatformApi::ApplePay => "ApplePaySession",
            PlatformApi::SafariPush => "safari.pushNotification",
            PlatformApi::MotionPermission => "DeviceMotionEvent.requestPermission",
            PlatformApi::RelatedApps => "getInstalledRelatedApps",
            PlatformApi::Serial => "navigator.serial",
            PlatformApi::Hid => "navigator.hid",
            PlatformApi::Usb => "navigator.usb",
        }
    }
}

/// Black-box capability-query surface of the host environment.
///
/// Only the NFC probe is async: testing the standard reader surface may
/// involve an instantiation attempt the host has to await.
#[async_trait]
pub trait HostSurfaces: Send + Sync {
    fn max_touch_points(&self) -> Result<u32>;
    fn touch_events(&self) -> Result<bool>;
    fn media_matches(&self, query: MediaQuery) -> Result<bool>;
    fn css_supports(&self, feature: CssFeature) -> Result<bool>;
    fn api(&self, api: PlatformApi) -> Result<Capability>;
    /// `Ok(None)` means the field genuinely does not exist on this host.
    fn standalone(&self) -> Result<Option<bool>>;
    async fn probe_nfc(&self) -> Result<NfcProbe>;
    fn screen_size(&self) -> Result<(f64, f64)>;
    fn device_pixel_ratio(&self) -> Result<f64>;
    /// `Ok(None)` means no WebGL context could be created.
    fn webgl_info(&self) -> Result<Option<WebGlInfo>>;
    fn user_agent(&self) -> Result<String>;
    fn platform(&self) -> Result<String>;
    fn secure_context(&self) -> Result<bool>;
}

/// Capability values captured on the page and shipped as JSON.
///
/// Absence of `standalone`, `nfcApi` and `webgl` is meaningful (the
/// surface does not exist); absence of anything else means the page
/// script failed to capture the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CapabilityReport {
    pub max_touch_points: Option<u32>,
    pub touch_events: Option<bool>,
    pub pointer_coarse: Option<bool>,
    pub pointer_fine: Option<bool>,
    pub hover: Option<bool>,
    pub webkit_touch_callout: Option<bool>,
    pub webkit_overflow_scrolling: Option<bool>,
    pub apple_pay: Option<bool>,
    pub safari_push: Option<bool>,
    pub motion_permission: Option<bool>,
    pub related_apps: Option<bool>,
    pub serial: Option<bool>,
    pub hid: Option<bool>,
    pub usb: Option<bool>,
    pub standalone: Option<bool>,
    pub nfc_api: Option<NfcApiKind>,
    pub nfc_can_scan: Option<bool>,
    pub nfc_error: Option<String>,
    pub screen_width: Option<f64>,
    pub screen_height: Option<f64>,
    pub device_pixel_ratio: Option<f64>,
    pub webgl: Option<WebGlInfo>,
    pub user_agent: Option<String>,
    pub platform: Option<String>,
    pub secure_context: Option<bool>,
}

fn captured<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| anyhow!("field {field} missing from capability report"))
}

#[async_trait]
impl HostSurfaces for CapabilityReport {
    fn max_touch_points(&self) -> Result<u32> {
        captured(self.max_touch_points, "maxTouchPoints")
    }

    fn touch_events(&self) -> Result<bool> {
        captured(self.touch_events, "touchEvents")
    }

    fn media_matches(&self, query: MediaQuery) -> Result<bool> {
        let value = match query {
            MediaQuery::PointerCoarse => self.pointer_coarse,
            MediaQuery::PointerFine => self.pointer_fine,
            MediaQuery::Hover => self.hover,
        };
        captured(value, query.label())
    }

    fn css_supports(&self, feature: CssFeature) -> Result<bool> {
        let value = match feature {
            CssFeature::TouchCallout => self.webkit_touch_callout,
            CssFeature::OverflowScrolling => self.webkit_overflow_scrolling,
        };
        captured(value, feature.label())
    }

    fn api(&self, api: PlatformApi) -> Result<Capability> {
        let value = match api {
            PlatformApi::ApplePay => self.apple_pay,
            PlatformApi::SafariPush => self.safari_push,
            PlatformApi::MotionPermission => self.motion_permission,
            PlatformApi::RelatedApps => self.related_apps,
            PlatformApi::Serial => self.serial,
            PlatformApi::Hid => self.hid,
            PlatformApi::Usb => self.usb,
        };
        Ok(Capability::from_presence(captured(value, api.label())?))
    }

    fn standalone(&self) -> Result<Option<bool>> {
        Ok(self.standalone)
    }

    async fn probe_nfc(&self) -> Result<NfcProbe> {
        Ok(NfcProbe {
            kind: self.nfc_api,
            can_scan: self.nfc_can_scan.unwrap_or(false),
            error: self.nfc_error.clone(),
        })
    }

    fn screen_size(&self) -> Result<(f64, f64)> {
        Ok((
            captured(self.screen_width, "screenWidth")?,
            captured(self.screen_height, "screenHeight")?,
        ))
    }

    fn device_pixel_ratio(&self) -> Result<f64> {
        captured(self.device_pixel_ratio, "devicePixelRatio")
    }

    fn webgl_info(&self) -> Result<Option<WebGlInfo>> {
        Ok(self.webgl.clone())
    }

    fn user_agent(&self) -> Result<String> {
        captured(self.user_agent.clone(), "userAgent")
    }

    fn platform(&self) -> Result<String> {
        captured(self.platform.clone(), "platform")
    }

    fn secure_context(&self) -> Result<bool> {
        captured(self.secure_context, "secureContext")
    }
}
