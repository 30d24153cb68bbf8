//! Ports module for declarative ordering
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::OrderResolverApi;
pub use outbound::{DeclarationSource, PriorityRegistry};
