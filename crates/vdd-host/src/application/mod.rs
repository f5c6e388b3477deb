//! Application layer: the lifecycle logic of the virtual display.
//!
//! Use cases here orchestrate the domain types from `vdd-core` against the
//! infrastructure traits; they contain no OS calls of their own and depend
//! on abstractions (the display stack, the render-device binder) rather
//! than concrete implementations, so every path is unit-testable with the
//! in-process stack and a scripted binder.
//!
//! # Sub-modules
//!
//! - **`adapter`** - drives the adapter from power-on through monitor
//!   attachment and routes inbound stack calls to the right monitor.  This
//!   is the state machine the display stack talks to.
//!
//! - **`monitor`** - per-monitor swap-chain ownership: at most one live
//!   worker, torn down and joined before any successor starts.

pub mod adapter;
pub mod monitor;
