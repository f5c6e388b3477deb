//! Adapter-level capability declaration.
//!
//! The capability block is declared exactly once, when the host asks the
//! display stack to initialize the adapter.  It tells the stack how many
//! monitors the adapter can expose and carries the diagnostic identity the
//! OS surfaces in telemetry.  None of it changes for the lifetime of the
//! driver load.

use serde::{Deserialize, Serialize};

/// Number of EDID-less monitors this driver build exposes.
pub const MONITOR_COUNT: u32 = 1;

/// How the endpoint handles gamma requests: it does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GammaSupport {
    None,
}

/// Physical transport the endpoint claims to sit behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransmissionType {
    /// Wired, but no specific connector standard.
    WiredOther,
}

/// Hardware/firmware version marker reported in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointVersion {
    pub major: u16,
    pub minor: u16,
    pub build: u16,
}

impl EndpointVersion {
    /// The only version this driver has ever shipped.
    pub const V1: Self = Self {
        major: 1,
        minor: 0,
        build: 0,
    };
}

/// Diagnostic identity strings and markers surfaced to OS telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDiagnostics {
    pub friendly_name: String,
    pub manufacturer: String,
    pub model: String,
    pub gamma_support: GammaSupport,
    pub transmission: TransmissionType,
    pub firmware: EndpointVersion,
    pub hardware: EndpointVersion,
}

impl EndpointDiagnostics {
    /// Diagnostics with the given identity strings and the fixed markers the
    /// driver always reports: no gamma, wired-other transport, version 1.
    pub fn new(friendly_name: &str, manufacturer: &str, model: &str) -> Self {
        Self {
            friendly_name: friendly_name.to_string(),
            manufacturer: manufacturer.to_string(),
            model: model.to_string(),
            gamma_support: GammaSupport::None,
            transmission: TransmissionType::WiredOther,
            firmware: EndpointVersion::V1,
            hardware: EndpointVersion::V1,
        }
    }
}

/// Full capability block declared when adapter init is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterCaps {
    /// Upper bound on monitors the adapter will ever attach.
    pub max_monitors: u32,
    pub diagnostics: EndpointDiagnostics,
}

impl AdapterCaps {
    /// Capabilities of this driver build: a fixed number of EDID-less
    /// monitors behind one adapter.
    pub fn with_diagnostics(diagnostics: EndpointDiagnostics) -> Self {
        Self {
            max_monitors: MONITOR_COUNT,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_carry_the_fixed_monitor_count() {
        let caps = AdapterCaps::with_diagnostics(EndpointDiagnostics::new(
            "Virtual Monitor",
            "Example Corp",
            "Virtual Monitor",
        ));
        assert_eq!(caps.max_monitors, MONITOR_COUNT);
    }

    #[test]
    fn test_diagnostics_report_version_one_markers() {
        let diag = EndpointDiagnostics::new("a", "b", "c");
        assert_eq!(diag.firmware, EndpointVersion::V1);
        assert_eq!(diag.hardware, EndpointVersion::V1);
        assert_eq!(diag.gamma_support, GammaSupport::None);
        assert_eq!(diag.transmission, TransmissionType::WiredOther);
    }
}
