//! Reload Trigger Module
//!
//! Accepts "declarations changed" requests and recomputes the order once
//! per request, strictly one after another.

pub mod handler;
pub mod payloads;

pub use handler::ReloadHandler;
pub use payloads::*;
