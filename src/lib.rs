//! Tile Link (workspace facade crate).
//!
//! Re-exports the workspace crates as `tile_link::{core,adapter,engine,types}` so
//! integration tests, benches and the binary share one import path.

pub use tile_link_adapter as adapter;
pub use tile_link_core as core;
pub use tile_link_engine as engine;
pub use tile_link_types as types;
