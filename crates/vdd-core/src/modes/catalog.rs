//! Compiled-in resolution and refresh-rate tables.
//!
//! These two tables define the entire addressable mode space of the virtual
//! monitor: every advertised mode pairs one resolution with one refresh rate.
//! Both tables are plain `const` data: immutable, process-wide, readable from
//! any thread without synchronization.  Nothing at runtime (config file,
//! display-stack request, hot plug) can change them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pixel dimensions of one advertised resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    /// Horizontal active pixels.
    pub width: u32,
    /// Vertical active pixels.
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Active pixels per frame, widened for pixel-rate arithmetic.
    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Every resolution the virtual monitor advertises, largest first.
///
/// The first entry doubles as the resolution of the preferred default mode.
pub const RESOLUTIONS: [Resolution; 18] = [
    Resolution::new(3840, 2160),
    Resolution::new(3440, 1440),
    Resolution::new(2560, 1440),
    Resolution::new(2560, 1080),
    Resolution::new(2048, 1152),
    Resolution::new(1920, 1200),
    Resolution::new(1920, 1080),
    Resolution::new(1680, 1050),
    Resolution::new(1600, 900),
    Resolution::new(1536, 864),
    Resolution::new(1440, 900),
    Resolution::new(1366, 768),
    Resolution::new(1280, 1024),
    Resolution::new(1280, 800),
    Resolution::new(1280, 720),
    Resolution::new(1024, 768),
    Resolution::new(800, 600),
    Resolution::new(640, 360),
];

/// Vertical refresh rates offered at every resolution, in hertz.
pub const REFRESH_RATES: [u32; 5] = [60, 75, 120, 144, 240];

/// Number of refresh-rate entries; the stride of the flat mode ordering.
pub const RATE_COUNT: usize = REFRESH_RATES.len();

/// Number of advertised modes: the full resolution x rate cross product.
pub const MODE_COUNT: usize = RESOLUTIONS.len() * REFRESH_RATES.len();
