//! Infrastructure layer: everything that touches a boundary.
//!
//! The application layer sees these concerns through traits; the concrete
//! shapes here talk to the display stack, the GPU runtime, the thread
//! scheduler, and the file system.
//!
//! # Sub-modules
//!
//! - **`display`** - the display-stack boundary: outbound adapter/monitor
//!   calls and the swap-chain surface objects the compositor hands over.
//!
//! - **`gpu`** - render-device binding: resolving a GPU by identity and
//!   constructing a composition-capable device for one assignment.
//!
//! - **`worker`** - the swap-chain worker thread and the signal primitive
//!   used to stop it.
//!
//! - **`storage`** - TOML configuration for the host binary.

pub mod display;
pub mod gpu;
pub mod storage;
pub mod worker;
