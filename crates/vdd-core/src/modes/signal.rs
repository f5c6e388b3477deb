//! Signal-timing records derived from one (resolution, refresh rate) pair.
//!
//! The display stack consumes modes as video-signal descriptions, not as bare
//! resolution pairs.  Every field here is computed; modes are generated fresh
//! on each query and never persisted.

use serde::{Deserialize, Serialize};

use crate::modes::catalog::Resolution;

/// Scan ordering of the generated signal.  The virtual monitor only ever
/// produces progressive frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanLineOrdering {
    Progressive,
}

/// Who originated a default-description mode.
///
/// All modes in this driver come from the driver's own tables; the variant
/// exists because the reply format distinguishes driver-generated modes from
/// ones parsed out of a monitor descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeOrigin {
    Driver,
}

/// Video-standard marker for signals that match no broadcast standard.
pub const VIDEO_STANDARD_OTHER: u32 = 255;

/// Timing block shared by monitor-description and target modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSignalInfo {
    /// Active raster size.
    pub active: Resolution,
    /// Total raster size; equal to the active size, the virtual signal has
    /// no blanking interval.
    pub total: Resolution,
    /// Vertical sync frequency in Hz: the refresh rate itself.
    pub vsync_hz: u32,
    /// Horizontal sync frequency in Hz: one line per active row per refresh.
    pub hsync_hz: u32,
    /// Pixels clocked per second: rate x width x height.
    pub pixel_rate: u64,
    /// vSync frequency divider: 0 on monitor-description modes, 1 on target
    /// modes, matching how the two reply shapes are filled.
    pub vsync_divider: u32,
    /// Always [`VIDEO_STANDARD_OTHER`].
    pub video_standard: u32,
    pub scan_ordering: ScanLineOrdering,
}

impl VideoSignalInfo {
    fn new(resolution: Resolution, rate_hz: u32, vsync_divider: u32) -> Self {
        Self {
            active: resolution,
            total: resolution,
            vsync_hz: rate_hz,
            hsync_hz: rate_hz * resolution.height,
            pixel_rate: rate_hz as u64 * resolution.pixel_count(),
            vsync_divider,
            video_standard: VIDEO_STANDARD_OTHER,
            scan_ordering: ScanLineOrdering::Progressive,
        }
    }
}

/// One mode advertised in the monitor's default description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorMode {
    pub origin: ModeOrigin,
    pub signal: VideoSignalInfo,
}

impl MonitorMode {
    pub fn new(resolution: Resolution, rate_hz: u32) -> Self {
        Self {
            origin: ModeOrigin::Driver,
            signal: VideoSignalInfo::new(resolution, rate_hz, 0),
        }
    }
}

/// One mode advertised for the display target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMode {
    pub signal: VideoSignalInfo,
}

impl TargetMode {
    pub fn new(resolution: Resolution, rate_hz: u32) -> Self {
        Self {
            signal: VideoSignalInfo::new(resolution, rate_hz, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_timing_is_derived_from_resolution_and_rate() {
        let mode = MonitorMode::new(Resolution::new(1920, 1080), 144);
        assert_eq!(mode.signal.vsync_hz, 144);
        assert_eq!(mode.signal.hsync_hz, 144 * 1080);
        assert_eq!(mode.signal.pixel_rate, 144u64 * 1920 * 1080);
        assert_eq!(mode.signal.scan_ordering, ScanLineOrdering::Progressive);
        assert_eq!(mode.signal.video_standard, VIDEO_STANDARD_OTHER);
    }

    #[test]
    fn test_total_size_equals_active_size() {
        let mode = TargetMode::new(Resolution::new(2560, 1440), 75);
        assert_eq!(mode.signal.total, mode.signal.active);
    }

    #[test]
    fn test_divider_differs_between_monitor_and_target_modes() {
        let res = Resolution::new(1280, 720);
        assert_eq!(MonitorMode::new(res, 60).signal.vsync_divider, 0);
        assert_eq!(TargetMode::new(res, 60).signal.vsync_divider, 1);
    }

    #[test]
    fn test_pixel_rate_does_not_overflow_at_the_top_mode() {
        // 240 Hz at 3840x2160 is the largest product the catalog can produce.
        let mode = TargetMode::new(Resolution::new(3840, 2160), 240);
        assert_eq!(mode.signal.pixel_rate, 1_990_656_000u64);
    }

    #[test]
    fn test_monitor_modes_are_driver_originated() {
        let mode = MonitorMode::new(Resolution::new(800, 600), 60);
        assert_eq!(mode.origin, ModeOrigin::Driver);
    }
}
