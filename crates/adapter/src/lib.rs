//! Adapter module - probe access to the resolution core via a JSON line protocol
//!
//! External tools (AI agents, level editors, replay checkers) can ask the core
//! the same two questions the game loop asks, without linking Rust code.
//!
//! # Protocol Overview
//!
//! One JSON object per line in each direction; every request gets exactly one
//! reply carrying the request's `seq`.
//!
//! ## Client → Server
//!
//! - **collide**: moving bubble position plus a grid snapshot
//! - **checkState**: attached cell, its color, and a grid snapshot
//! - **ping**: liveness check
//!
//! ## Server → Client
//!
//! - **collision**: `collided` flag and the attach cell
//! - **state**: per-cell classification, cluster size, removal and fall lists
//! - **pong**
//! - **error**: code (`invalid_json`, `invalid_grid`, `unknown_type`) and message
//!
//! Grids travel as `grid[y][x]`, each entry a color or `null`.
//!
//! # Environment Variables
//!
//! - `BUBBLE_AI_HOST`: Bind address (default: "127.0.0.1")
//! - `BUBBLE_AI_PORT`: Port number (default: 7788)
//! - `BUBBLE_MIN_DISTANCE`: Default squared collision radius (default: 784)
//! - `BUBBLE_AI_STDIO`: Set to "1" or "true" to serve stdin/stdout instead of TCP
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"collide","seq":1,"x":40,"y":20,"grid":[[null,1,null],[null,null,null]]}
//! Server -> Client: {"type":"collision","seq":1,"ts":1700000000000,"collided":true,"attach":{"x":2,"y":1}}
//! Client -> Server: {"type":"checkState","seq":2,"cell":{"x":2,"y":1},"color":1,"grid":[[null,1,null],[null,null,1]]}
//! Server -> Client: {"type":"state","seq":2,"ts":1700000000001,"cluster_size":2,"poppable":false,...}
//! ```
//!
//! # Testing
//!
//! ```bash
//! BUBBLE_AI_STDIO=1 cargo run
//! {"type":"ping","seq":1}
//! ```

pub mod protocol;
pub mod server;

pub use bubble_shooter_core as core;
pub use bubble_shooter_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use server::*;
