//! Tetris Lite (workspace facade crate).
//!
//! Re-exports the workspace crates as `tetris_lite::{core,input,runtime,term,types}`
//! so the binary, integration tests and benches share one import path.

pub use tetris_lite_core as core;
pub use tetris_lite_input as input;
pub use tetris_lite_runtime as runtime;
pub use tetris_lite_term as term;
pub use tetris_lite_types as types;
