//! Remote catalog access.
//!
//! `CatalogRemote` is the seam `CatalogStore` talks through; `RemoteCatalogClient` is the
//! HTTP implementation against a `/shoes` REST resource.

mod client;

pub use client::*;

use std::future::Future;

use crate::errors::TransportError;
use crate::models::{ShoeInput, ShoeRecord};

/// CRUD calls against the remote shoe store.
///
/// Implementations make exactly one remote call per method, never retry, and report
/// every failure as a `TransportError`.
pub trait CatalogRemote: Send + Sync {
    /// `GET /shoes`
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<ShoeRecord>, TransportError>> + Send;

    /// `GET /shoes/{id}`. `Ok(None)` when the remote reports the id as not found.
    fn fetch_one(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<ShoeRecord>, TransportError>> + Send;

    /// `POST /shoes`. Returns the created record with its assigned id.
    fn create(
        &self,
        input: &ShoeInput,
    ) -> impl Future<Output = Result<ShoeRecord, TransportError>> + Send;

    /// `PUT /shoes/{id}` with a full replacement of the mutable fields.
    fn update(
        &self,
        id: &str,
        input: &ShoeInput,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// `DELETE /shoes/{id}`
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), TransportError>> + Send;
}
