//! # Declarative Order Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs       # Manifest -> resolver -> registry, end to end
//!     ├── properties.rs  # Ordering properties over fixed and generated graphs
//!     └── reload.rs      # Reload trigger over real files
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p order-tests
//! cargo test -p order-tests integration::properties::
//!
//! # Benchmarks
//! cargo bench -p order-tests
//! ```

pub mod fixtures;
pub mod integration;
