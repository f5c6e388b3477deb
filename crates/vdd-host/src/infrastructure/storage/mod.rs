//! Persistence infrastructure for the host binary.

pub mod config;
