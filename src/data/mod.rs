//! Species and type data: where it comes from and how it is loaded.

pub mod client;
pub mod loader;
pub mod retry;
pub mod roster;

pub use client::PokeApiClient;
pub use loader::{
    chart_or_neutral, load_catalog, load_roster, load_species, load_species_by_id,
    load_type_chart, CatalogEntry,
};
pub use retry::{with_retry, RetryPolicy};
pub use roster::{available_for_encounter, find_species, pick_encounter};

use crate::errors::DataResult;
use async_trait::async_trait;
use schema::{NamedApiResourceList, SpeciesRecord, TypeRelationsRecord};

/// Read-only access to species and type data.
///
/// Implemented over HTTP by [`PokeApiClient`]; tests substitute an in-memory
/// source.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// The first `limit` species as name/url pairs.
    async fn fetch_roster(&self, limit: u32) -> DataResult<NamedApiResourceList>;

    async fn fetch_species(&self, id: u32) -> DataResult<SpeciesRecord>;

    /// Species detail from a roster entry's url.
    async fn fetch_species_by_url(&self, url: &str) -> DataResult<SpeciesRecord>;

    async fn fetch_type_list(&self) -> DataResult<NamedApiResourceList>;

    async fn fetch_type_relations(&self, name: &str) -> DataResult<TypeRelationsRecord>;
}
