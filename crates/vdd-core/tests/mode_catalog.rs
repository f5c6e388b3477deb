//! Integration tests for the mode catalog through the public API.
//!
//! These tests pin down the externally observable contract of the two mode
//! queries: the invariant count, the flat ordering, the derived timing
//! fields, and the two-phase capacity behavior of each query shape.

use vdd_core::{
    default_modes, target_modes, Resolution, MODE_COUNT, RATE_COUNT, REFRESH_RATES, RESOLUTIONS,
};

#[test]
fn test_required_count_is_ninety_for_every_capacity() {
    for capacity in [0usize, 1, 17, 18, 89, 90, 91, 500] {
        assert_eq!(default_modes(capacity).required, 90);
        assert_eq!(target_modes(capacity).required, 90);
    }
}

#[test]
fn test_flat_index_maps_to_resolution_and_rate() {
    let reply = default_modes(MODE_COUNT);
    for i in 0..RESOLUTIONS.len() {
        for j in 0..RATE_COUNT {
            let mode = &reply.modes[i * RATE_COUNT + j];
            assert_eq!(mode.signal.active, RESOLUTIONS[i]);
            assert_eq!(mode.signal.vsync_hz, REFRESH_RATES[j]);
            assert_eq!(
                mode.signal.pixel_rate,
                REFRESH_RATES[j] as u64 * RESOLUTIONS[i].pixel_count()
            );
        }
    }
}

#[test]
fn test_preferred_mode_is_first_resolution_at_first_rate() {
    let reply = default_modes(MODE_COUNT);
    let preferred = &reply.modes[reply.preferred_index.expect("preferred index")];
    assert_eq!(preferred.signal.active, Resolution::new(3840, 2160));
    assert_eq!(preferred.signal.vsync_hz, 60);
}

#[test]
fn test_first_mode_pixel_rate_matches_4k_at_60hz() {
    // 60 x 3840 x 2160 = 497,664,000 pixels per second.
    let reply = default_modes(MODE_COUNT);
    assert_eq!(reply.modes[0].signal.pixel_rate, 497_664_000u64);
}

#[test]
fn test_probe_then_fill_is_the_expected_two_phase_flow() {
    // Phase 1: size the buffer.
    let probe = default_modes(0);
    assert!(probe.modes.is_empty());
    assert_eq!(probe.preferred_index, None);

    // Phase 2: query again with the reported capacity.
    let filled = default_modes(probe.required);
    assert_eq!(filled.modes.len(), probe.required);
    assert_eq!(filled.preferred_index, Some(0));
}

#[test]
fn test_target_query_gates_on_resolution_table_size() {
    // Below the resolution-table size nothing is written.
    for capacity in [1usize, 5, 17] {
        assert!(target_modes(capacity).modes.is_empty());
    }
    // At or above it, writes are clamped to the full catalog.
    assert_eq!(target_modes(18).modes.len(), 18);
    assert_eq!(target_modes(90).modes.len(), 90);
    assert_eq!(target_modes(1000).modes.len(), 90);
}

#[test]
fn test_target_modes_share_ordering_with_default_modes() {
    let defaults = default_modes(MODE_COUNT);
    let targets = target_modes(MODE_COUNT);
    for (default, target) in defaults.modes.iter().zip(targets.modes.iter()) {
        assert_eq!(default.signal.active, target.signal.active);
        assert_eq!(default.signal.vsync_hz, target.signal.vsync_hz);
    }
}
