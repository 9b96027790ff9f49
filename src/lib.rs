//! Bubble shooter resolution (workspace facade crate).
//!
//! Re-exports the member crates under `bubble_shooter::{core,adapter,types}`
//! while the implementation lives in dedicated crates under `crates/`.

pub use bubble_shooter_adapter as adapter;
pub use bubble_shooter_core as core;
pub use bubble_shooter_types as types;
