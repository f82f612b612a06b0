//! Shoe catalog client.
//!
//! Keeps an in-memory shoe collection consistent with a remote `/shoes` REST resource.
//! Changes are confirmed by the remote before they are applied locally.

pub mod config;
pub mod errors;
pub mod models;
pub mod remote;
pub mod search;
pub mod store;
pub mod validation;

pub use config::{Config, LogFormat};
pub use errors::{
    CatalogError, ConfigError, FieldError, FieldIssue, TransportError, ValidationError,
};
pub use models::{ShoeDraft, ShoeInput, ShoeRecord};
pub use remote::{CatalogRemote, RemoteCatalogClient};
pub use search::filter;
pub use store::{CatalogStore, SharedCatalog};
pub use validation::validate;

#[cfg(test)]
mod test_utils;
