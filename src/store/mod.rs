//! Catalog store: the session's in-memory shoe collection.
//!
//! Every mutation issues exactly one remote call and touches the collection only after that
//! call succeeds. There is no optimistic insert and no rollback path, because nothing is
//! applied before confirmation. Between full loads the local copy is treated as authoritative.

mod shared;

pub use shared::*;

use std::collections::HashSet;

use crate::errors::{CatalogError, Result, TransportError};
use crate::models::{ShoeDraft, ShoeRecord};
use crate::remote::CatalogRemote;
use crate::search;
use crate::validation::validate;

/// Owns the shoe collection and mediates all changes through a `CatalogRemote`.
///
/// Mutating methods take `&mut self`, so at most one operation is in flight per store.
#[derive(Debug)]
pub struct CatalogStore<R> {
    remote: R,
    shoes: Vec<ShoeRecord>,
}

impl<R: CatalogRemote> CatalogStore<R> {
    /// Create an empty store. Call `load` to populate it.
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            shoes: Vec::new(),
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Replace the collection with the remote's full list.
    ///
    /// On failure the previous collection is kept and no retry is attempted. A list that
    /// repeats an id is rejected as malformed.
    pub async fn load(&mut self) -> Result<()> {
        let shoes = self
            .remote
            .fetch_all()
            .await
            .and_then(|shoes| {
                if let Some(id) = repeated_id(&shoes) {
                    return Err(TransportError::Malformed(format!(
                        "catalog lists id {} more than once",
                        id
                    )));
                }
                Ok(shoes)
            })
            .map_err(|e| {
                tracing::warn!("Failed to load catalog: {}", e);
                CatalogError::RemoteRead(e)
            })?;

        tracing::info!("Catalog loaded with {} shoes", shoes.len());
        self.shoes = shoes;
        Ok(())
    }

    /// Validate `draft`, create it remotely, then append the created record.
    pub async fn add(&mut self, draft: &ShoeDraft) -> Result<ShoeRecord> {
        let input = validate(draft)?;

        let record = self.remote.create(&input).await.map_err(|e| {
            tracing::warn!("Failed to create shoe {:?}: {}", input.name, e);
            CatalogError::RemoteWrite(e)
        })?;

        if self.position(&record.id).is_some() {
            tracing::warn!("Remote assigned duplicate id {}", record.id);
            return Err(CatalogError::RemoteWrite(TransportError::Malformed(
                format!("created record reuses id {}", record.id),
            )));
        }

        tracing::info!("Added shoe {} ({})", record.id, record.name);
        self.shoes.push(record.clone());
        Ok(record)
    }

    /// Replace the mutable fields of an existing record.
    ///
    /// An unknown id fails with `NotFound` before any remote call.
    pub async fn update(&mut self, id: &str, patch: &ShoeDraft) -> Result<ShoeRecord> {
        if self.position(id).is_none() {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        let input = validate(patch)?;

        self.remote.update(id, &input).await.map_err(|e| {
            tracing::warn!("Failed to update shoe {}: {}", id, e);
            CatalogError::RemoteWrite(e)
        })?;

        // Looked up again after the await; the store is borrowed mutably throughout, so the
        // record is still present.
        let record = self
            .shoes
            .iter_mut()
            .find(|shoe| shoe.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        record.apply(input);

        tracing::info!("Updated shoe {}", id);
        Ok(record.clone())
    }

    /// Delete a record remotely, then drop it from the collection. Returns the removed record.
    pub async fn remove(&mut self, id: &str) -> Result<ShoeRecord> {
        if self.position(id).is_none() {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        self.remote.delete(id).await.map_err(|e| {
            tracing::warn!("Failed to delete shoe {}: {}", id, e);
            CatalogError::RemoteWrite(e)
        })?;

        let index = self
            .position(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        let removed = self.shoes.remove(index);

        tracing::info!("Removed shoe {}", id);
        Ok(removed)
    }

    /// Fetch one record from the remote for a detail view.
    ///
    /// A fresh copy replaces the held record with the same id in place; ids not held locally
    /// are returned without being inserted.
    pub async fn fetch_detail(&mut self, id: &str) -> Result<ShoeRecord> {
        let fetched = self.remote.fetch_one(id).await.map_err(|e| {
            tracing::warn!("Failed to fetch shoe {}: {}", id, e);
            CatalogError::RemoteRead(e)
        })?;

        let record = fetched.ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        if let Some(held) = self.shoes.iter_mut().find(|shoe| shoe.id == record.id) {
            *held = record.clone();
        }
        Ok(record)
    }

    /// The collection in insertion order.
    pub fn list(&self) -> &[ShoeRecord] {
        &self.shoes
    }

    pub fn find(&self, id: &str) -> Option<&ShoeRecord> {
        self.shoes.iter().find(|shoe| shoe.id == id)
    }

    /// Filtered view for rendering; see [`search::filter`].
    pub fn search(&self, query: &str) -> Vec<&ShoeRecord> {
        search::filter(&self.shoes, query)
    }

    pub fn len(&self) -> usize {
        self.shoes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shoes.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.shoes.iter().position(|shoe| shoe.id == id)
    }
}

fn repeated_id(shoes: &[ShoeRecord]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(shoes.len());
    shoes
        .iter()
        .map(|shoe| shoe.id.as_str())
        .find(|id| !seen.insert(*id))
}
