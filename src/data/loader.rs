use crate::data::retry::{with_retry, RetryPolicy};
use crate::data::DataSource;
use crate::errors::LoadError;
use crate::type_chart::TypeChart;
use crate::unlocked::UnlockedSet;
use schema::{capitalize, NamedApiResource, PokemonType, SpeciesRecord};
use std::sync::Arc;
use tokio::task::JoinSet;

/// One catalog slot: the species detail, or just its name when the detail
/// couldn't be fetched.
#[derive(Debug, Clone)]
pub enum CatalogEntry {
    Loaded(SpeciesRecord),
    Placeholder { name: String },
}

impl CatalogEntry {
    pub fn display_name(&self) -> String {
        match self {
            CatalogEntry::Loaded(record) => record.display_name(),
            CatalogEntry::Placeholder { name } => capitalize(name),
        }
    }

    pub fn id(&self) -> Option<u32> {
        match self {
            CatalogEntry::Loaded(record) => Some(record.id),
            CatalogEntry::Placeholder { .. } => None,
        }
    }

    pub fn is_unlocked(&self, unlocked: &UnlockedSet) -> bool {
        self.id().is_some_and(|id| unlocked.contains(id))
    }
}

/// The first `limit` species, retried with backoff.
pub async fn load_roster(
    source: &dyn DataSource,
    limit: u32,
    policy: &RetryPolicy,
) -> Result<Vec<NamedApiResource>, LoadError> {
    let list = with_retry("species roster", policy, || source.fetch_roster(limit)).await?;
    tracing::info!(count = list.results.len(), "loaded roster");
    Ok(list.results)
}

/// One species' detail from its roster url, retried with backoff.
pub async fn load_species(
    source: &dyn DataSource,
    entry: &NamedApiResource,
    policy: &RetryPolicy,
) -> Result<SpeciesRecord, LoadError> {
    let what = format!("species {}", entry.name);
    with_retry(&what, policy, || source.fetch_species_by_url(&entry.url)).await
}

/// One species' detail by national dex id, retried with backoff.
pub async fn load_species_by_id(
    source: &dyn DataSource,
    id: u32,
    policy: &RetryPolicy,
) -> Result<SpeciesRecord, LoadError> {
    let what = format!("species #{}", id);
    with_retry(&what, policy, || source.fetch_species(id)).await
}

/// Build the type chart.
///
/// The type list is retried and its failure is returned; see
/// [`chart_or_neutral`] for the fallback. Per-type relation
/// fetches run concurrently; a failed one is logged and its type is left out
/// of the chart, so it counts as neutral.
pub async fn load_type_chart(
    source: Arc<dyn DataSource>,
    policy: &RetryPolicy,
) -> Result<TypeChart, LoadError> {
    let list = with_retry("type list", policy, || source.fetch_type_list()).await?;

    let mut tasks = JoinSet::new();
    for entry in list.results {
        if PokemonType::from_api_name(&entry.name) == PokemonType::Typeless {
            tracing::debug!(name = %entry.name, "skipping unmodelled type");
            continue;
        }
        let source = Arc::clone(&source);
        tasks.spawn(async move {
            let result = source.fetch_type_relations(&entry.name).await;
            (entry.name, result)
        });
    }

    let mut chart = TypeChart::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(record))) => {
                chart.insert_record(&record);
            }
            Ok((name, Err(err))) => {
                tracing::warn!(name = %name, error = %err, "type relations unavailable, treating as neutral");
            }
            Err(err) => {
                tracing::warn!(error = %err, "type relations task failed");
            }
        }
    }

    tracing::info!(types = chart.len(), "loaded type chart");
    Ok(chart)
}

/// The loaded chart, or an empty one when the type source was unreachable.
/// Every lookup against the empty chart is neutral.
pub fn chart_or_neutral(loaded: Result<TypeChart, LoadError>) -> TypeChart {
    loaded.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "type data unavailable, every matchup is neutral");
        TypeChart::default()
    })
}

/// Detail for every roster entry, in roster order. Failures become placeholders.
pub async fn load_catalog(
    source: &dyn DataSource,
    roster: &[NamedApiResource],
    policy: &RetryPolicy,
) -> Vec<CatalogEntry> {
    let mut entries = Vec::with_capacity(roster.len());
    for entry in roster {
        match load_species(source, entry, policy).await {
            Ok(record) => entries.push(CatalogEntry::Loaded(record)),
            Err(err) => {
                tracing::warn!(name = %entry.name, error = %err, "using placeholder entry");
                entries.push(CatalogEntry::Placeholder {
                    name: entry.name.clone(),
                });
            }
        }
    }
    let placeholders = entries
        .iter()
        .filter(|e| matches!(e, CatalogEntry::Placeholder { .. }))
        .count();
    tracing::info!(entries = entries.len(), placeholders, "loaded catalog");
    entries
}
