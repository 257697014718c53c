use serde::{Deserialize, Serialize};

/// Outcome of probing one capability surface.
///
/// `Degraded` covers a surface that exists but failed when exercised
/// (e.g. an NFC reader constructor that throws). Existence is still
/// evidence, so both `Present` and `Degraded` count as present for the
/// voting rules; only `Absent` does not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Present,
    Degraded(String),
    #[default]
    Absent,
}

impl Capability {
    pub fn is_present(&self) -> bool {
        !matches!(self, Capability::Absent)
    }

    /// Collapse a boolean presence probe into the tri-state.
    pub fn from_presence(present: bool) -> Self {
        if present {
            Capability::Present
        } else {
            Capability::Absent
        }
    }
}

/// Which NFC surface a host exposes. `NdefReader` is the standard API;
/// the other two are legacy vendor shapes that cannot be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NfcApiKind {
    NdefReader,
    NavigatorNfc,
    WindowNfc,
}

impl NfcApiKind {
    pub fn label(self) -> &'static str {
        match self {
            NfcApiKind::NdefReader => "NDEFReader",
            NfcApiKind::NavigatorNfc => "navigator.nfc",
            NfcApiKind::WindowNfc => "window.NFC",
        }
    }
}

/// Result of the NFC capability probe. The reader instantiation attempt
/// only applies to the standard surface; its failure is recorded here,
/// never thrown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NfcProbe {
    pub kind: Option<NfcApiKind>,
    pub can_scan: bool,
    pub error: Option<String>,
}

impl NfcProbe {
    pub fn has_api(&self) -> bool {
        self.kind.is_some()
    }
}
