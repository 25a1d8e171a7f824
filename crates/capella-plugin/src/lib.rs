//! Capella plugin contract
//!
//! This crate describes the boundary between the provider and the host
//! that drives it: attribute schemas, the per-resource state map, the
//! diagnostics returned on failure, and the `ResourceHandler` trait each
//! resource type implements.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          host (terraform / capella CLI)          │
//! └─────────────────┬───────────────────────────────┘
//!                   │ configure / create / read / delete
//! ┌─────────────────▼───────────────────────────────┐
//! │                 capella-plugin                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  Provider<M>  ──►  ConfiguredProvider<M>  │   │
//! │  │  trait ResourceHandler<M> { ... }         │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │    Schema    │  │ ResourceData │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────────┐
//! │  capella-provider │
//! └───────────────────┘
//! ```

pub mod diagnostics;
pub mod provider;
pub mod schema;
pub mod state;

// Re-exports
pub use diagnostics::{DiagResult, Diagnostic, Diagnostics, Severity};
pub use provider::{ConfiguredProvider, Provider, ProviderSchema, ResourceHandler};
pub use schema::{Attribute, AttributeType, Schema};
pub use state::ResourceData;
