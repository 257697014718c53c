pub mod collector;
pub mod host;
pub mod probe;
pub mod snapshot;

pub use collector::collect_snapshot;
pub use host::{CapabilityReport, CssFeature, HostSurfaces, MediaQuery, PlatformApi};
pub use probe::{Capability, NfcApiKind, NfcProbe};
pub use snapshot::{SignalSnapshot, WebGlInfo};
