//! Monitor descriptors handed to the display stack at attach time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::handles::ConnectorIndex;

/// Connector technology the monitor claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputTechnology {
    DisplayPortEmbedded,
}

/// Description of one monitor to create.
///
/// The virtual monitor is EDID-less: no description blob is attached, and
/// the stack learns the mode list through the default-mode query instead of
/// parsing a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorDescriptor {
    pub connector: ConnectorIndex,
    pub technology: OutputTechnology,
    /// Raw EDID/DisplayID blob.  `None` means mode queries are authoritative.
    pub description: Option<Vec<u8>>,
    /// Container id grouping the monitor with its adapter.  The monitor is
    /// permanently attached, so a freshly generated id per creation is fine.
    pub container_id: Uuid,
}

impl MonitorDescriptor {
    /// EDID-less descriptor for `connector` with a fresh container id.
    pub fn edid_less(connector: ConnectorIndex) -> Self {
        Self {
            connector,
            technology: OutputTechnology::DisplayPortEmbedded,
            description: None,
            container_id: Uuid::new_v4(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edid_less_descriptor_attaches_no_blob() {
        let desc = MonitorDescriptor::edid_less(ConnectorIndex(0));
        assert!(desc.description.is_none());
        assert_eq!(desc.technology, OutputTechnology::DisplayPortEmbedded);
    }

    #[test]
    fn test_each_descriptor_gets_a_distinct_container_id() {
        let a = MonitorDescriptor::edid_less(ConnectorIndex(0));
        let b = MonitorDescriptor::edid_less(ConnectorIndex(0));
        assert_ne!(a.container_id, b.container_id);
    }
}
