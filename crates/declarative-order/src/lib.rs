//! # Declarative Execution Order
//!
//! Resolves `RunAfter` / `RunBefore` / `RunFirst` / `RunLast` declarations
//! into concrete integer priorities using Kahn's topological sort.
//!
//! ## Architecture
//!
//! - **Domain**: Value objects (ItemId, Constraint, DeclarationSet), the
//!   dependency graph, order results and errors
//! - **Algorithms**: Graph building with marker checks, Kahn's sort,
//!   step-spaced priority assignment
//! - **Ports**: Inbound (OrderResolverApi) and Outbound (DeclarationSource,
//!   PriorityRegistry)
//! - **Application**: Service orchestration
//! - **Adapters**: Static and JSON manifest sources, in-memory and JSON file
//!   registries
//! - **Trigger**: Reload handler that recomputes once per change notification
//!
//! ## Example
//!
//! ```
//! use declarative_order::{DeclarationSet, ItemId, OrderResolverApi, OrderResolverService};
//!
//! let declarations = DeclarationSet::new()
//!     .run_after("Game.Player", ["Game.Input"])
//!     .run_last("Game.Camera");
//!
//! let result = OrderResolverService::new().resolve(&declarations).unwrap();
//! assert_eq!(result.priority_of(&ItemId::from("Game.Input")), Some(10));
//! assert_eq!(result.priority_of(&ItemId::from("Game.Player")), Some(20));
//! assert_eq!(result.priority_of(&ItemId::from("Game.Camera")), Some(30));
//! ```

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod trigger;

pub use application::service::OrderResolverService;
pub use config::OrderingConfig;
pub use domain::entities::*;
pub use domain::errors::{OrderingError, OrderingWarning, RegistryError, SourceError};
pub use domain::value_objects::*;
pub use ports::inbound::OrderResolverApi;
pub use ports::outbound::{DeclarationSource, PriorityRegistry};
pub use trigger::{ReloadHandler, ReloadRequest, ReloadResponse};
