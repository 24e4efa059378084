//! Query composition.
//!
//! Multi-hop reads built from the one-hop primitives of `StorageBackend`.
//! Every function here takes the backend and an open transaction; opening,
//! committing, and error mapping belong to `crate::service`.

pub mod schema;
pub mod fields;
pub mod resolver;
pub mod normalize;
pub mod components;
pub mod volume;

pub use fields::FieldSelector;
pub use resolver::Resolution;
pub use normalize::Classification;
pub use components::ComponentAggregate;
