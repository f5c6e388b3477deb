//! The advertised mode space and the queries that enumerate it.
//!
//! # How mode negotiation works (for beginners)
//!
//! A monitor with a physical cable carries an EDID blob describing the modes
//! it supports.  The virtual monitor has no EDID; instead the display stack
//! asks the driver directly, in two shapes:
//!
//! - **Default-description modes** describe what the *monitor* can display.
//!   The reply includes a preferred mode the OS should pick by default.
//! - **Target modes** describe what the *display target* (the signal path)
//!   can carry.  No preferred index here.
//!
//! Both queries are two-phase: the stack first probes with capacity 0 to
//! learn how many modes exist, sizes its buffer, then queries again with the
//! real capacity.  The count is always the full cross product of the
//! resolution table and the refresh-rate table: 18 x 5 = 90.
//!
//! # Sub-modules
//!
//! - **`catalog`** - the two compiled-in tables and the `Resolution` type.
//! - **`signal`**  - timing records computed from one (resolution, rate) pair.
//! - **`query`**   - the two-phase enumeration functions.

pub mod catalog;
pub mod query;
pub mod signal;
