//! Two-phase mode enumeration.
//!
//! The display stack sizes its reply buffer with a capacity-0 probe, then
//! queries again with a buffer big enough for the reported count.  Both query
//! shapes always report the full cross-product count; only the number of
//! modes actually written varies with capacity.
//!
//! Ordering is fixed and deterministic: flat index `i * RATE_COUNT + j`
//! corresponds to `(RESOLUTIONS[i], REFRESH_RATES[j])`, so the resolution
//! varies slower than the refresh rate.  There is no caching; every call
//! regenerates from the const tables.

use tracing::trace;

use crate::modes::catalog::{Resolution, MODE_COUNT, RATE_COUNT, REFRESH_RATES, RESOLUTIONS};
use crate::modes::signal::{MonitorMode, TargetMode};

/// Reply to a default-description mode query.
#[derive(Debug, Clone)]
pub struct DefaultModeReply {
    /// Number of modes the catalog offers.  Constant across queries.
    pub required: usize,
    /// Written modes: `min(capacity, required)` entries, empty for a probe.
    pub modes: Vec<MonitorMode>,
    /// Index of the preferred mode, reported only when modes were written.
    /// Always 0: the first resolution at the first refresh rate.
    pub preferred_index: Option<usize>,
}

/// Reply to a target mode query.  Target queries carry no preferred index.
#[derive(Debug, Clone)]
pub struct TargetModeReply {
    /// Number of modes the catalog offers.  Constant across queries.
    pub required: usize,
    /// Written modes; empty until the capacity covers the resolution table.
    pub modes: Vec<TargetMode>,
}

/// The (resolution, rate) pair behind flat catalog index `index`.
///
/// # Panics
///
/// Panics if `index >= MODE_COUNT`; indices come from the fixed ordering and
/// are never caller-supplied data.
pub fn catalog_entry(index: usize) -> (Resolution, u32) {
    assert!(index < MODE_COUNT, "mode index {index} out of range");
    (RESOLUTIONS[index / RATE_COUNT], REFRESH_RATES[index % RATE_COUNT])
}

/// Enumerates the monitor's default-description modes.
///
/// A `capacity` of 0 is the sizing probe: only the required count comes back.
/// Any larger capacity gets `min(capacity, required)` modes plus the
/// preferred index.
pub fn default_modes(capacity: usize) -> DefaultModeReply {
    let written = capacity.min(MODE_COUNT);
    let modes: Vec<MonitorMode> = (0..written)
        .map(|index| {
            let (resolution, rate) = catalog_entry(index);
            MonitorMode::new(resolution, rate)
        })
        .collect();
    trace!(capacity, written, required = MODE_COUNT, "default mode query");
    DefaultModeReply {
        required: MODE_COUNT,
        preferred_index: if written > 0 { Some(0) } else { None },
        modes,
    }
}

/// Enumerates the display target's modes.
///
/// Target queries only fill the buffer once its capacity covers at least the
/// resolution table; anything smaller gets the required count alone.
pub fn target_modes(capacity: usize) -> TargetModeReply {
    let written = if capacity >= RESOLUTIONS.len() {
        capacity.min(MODE_COUNT)
    } else {
        0
    };
    let modes: Vec<TargetMode> = (0..written)
        .map(|index| {
            let (resolution, rate) = catalog_entry(index);
            TargetMode::new(resolution, rate)
        })
        .collect();
    trace!(capacity, written, required = MODE_COUNT, "target mode query");
    TargetModeReply {
        required: MODE_COUNT,
        modes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_returns_count_without_modes() {
        let reply = default_modes(0);
        assert_eq!(reply.required, 90);
        assert!(reply.modes.is_empty());
        assert_eq!(reply.preferred_index, None);
    }

    #[test]
    fn test_full_capacity_fills_every_mode() {
        let reply = default_modes(90);
        assert_eq!(reply.modes.len(), 90);
        assert_eq!(reply.preferred_index, Some(0));
    }

    #[test]
    fn test_oversized_capacity_is_clamped_to_required() {
        let reply = default_modes(4096);
        assert_eq!(reply.modes.len(), 90);
        assert_eq!(reply.required, 90);
    }

    #[test]
    fn test_partial_capacity_writes_a_prefix() {
        let reply = default_modes(7);
        assert_eq!(reply.required, 90);
        assert_eq!(reply.modes.len(), 7);
        // The preferred mode sits at index 0, inside any non-empty prefix.
        assert_eq!(reply.preferred_index, Some(0));
    }

    #[test]
    fn test_flat_ordering_varies_rate_fastest() {
        let reply = default_modes(90);
        for (i, resolution) in RESOLUTIONS.iter().enumerate() {
            for (j, rate) in REFRESH_RATES.iter().enumerate() {
                let mode = &reply.modes[i * RATE_COUNT + j];
                assert_eq!(mode.signal.active, *resolution);
                assert_eq!(mode.signal.vsync_hz, *rate);
            }
        }
    }

    #[test]
    fn test_target_query_requires_resolution_table_capacity() {
        assert!(target_modes(17).modes.is_empty());
        assert_eq!(target_modes(17).required, 90);
        assert_eq!(target_modes(18).modes.len(), 18);
        assert_eq!(target_modes(90).modes.len(), 90);
    }

    #[test]
    fn test_queries_are_deterministic_across_calls() {
        let first = default_modes(90);
        let second = default_modes(90);
        assert_eq!(first.modes, second.modes);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_catalog_entry_rejects_out_of_range_index() {
        let _ = catalog_entry(90);
    }
}
