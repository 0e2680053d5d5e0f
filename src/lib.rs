//! Gridlight (workspace facade crate).
//!
//! This package keeps the `gridlight::{core,engine,render,term,types}` public
//! API stable while the implementation lives in dedicated crates under
//! `crates/`.

pub use gridlight_core as core;
pub use gridlight_engine as engine;
pub use gridlight_render as render;
pub use gridlight_term as term;
pub use gridlight_types as types;
