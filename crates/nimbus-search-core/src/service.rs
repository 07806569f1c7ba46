//! Capability and collaborator traits for addon-backed search.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::InvokeError;
use crate::model::{Episode, FindMatch, MovieDetails, SearchPayload, Show, ShowDetails, Torrent};

/// Capability: free-text search.
///
/// Searchers advertise capabilities by implementing these traits; callers
/// pick the trait object they need at construction time instead of probing
/// at runtime.
#[async_trait]
pub trait TextSearcher: Send + Sync {
    /// Run a free-text search. A searcher that cannot complete contributes
    /// an empty list; it never raises.
    async fn search_links(&self, query: &str) -> Vec<Torrent>;
}

/// Capability: movie search.
#[async_trait]
pub trait MovieSearcher: Send + Sync {
    async fn search_movie_links(&self, movie: &MovieDetails) -> Vec<Torrent>;
}

/// Capability: episode search.
#[async_trait]
pub trait EpisodeSearcher: Send + Sync {
    async fn search_episode_links(&self, show: &Show, episode: &Episode) -> Vec<Torrent>;
}

/// Side-channel used to hand a search request to an addon.
///
/// Dispatch is fire-and-forget: a successful return only means the request
/// left this process. Whether the addon acts on it is observed solely
/// through the callback address embedded in the payload.
#[async_trait]
pub trait AddonInvoker: Send + Sync {
    /// Hand `payload` to the addon identified by `addon_id`.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError`] when the request could not be handed over at
    /// all; callers treat this the same as an addon that stays silent.
    async fn invoke(&self, addon_id: &str, payload: &SearchPayload) -> Result<(), InvokeError>;
}

/// Namespace an external show identifier lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalIdNamespace {
    /// Numeric episode-catalog identifier.
    TvdbId,
    /// Industry identifier (IMDb style).
    ImdbId,
}

impl ExternalIdNamespace {
    /// Wire name of the namespace, as understood by metadata backends.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExternalIdNamespace::TvdbId => "tvdb_id",
            ExternalIdNamespace::ImdbId => "imdb_id",
        }
    }
}

/// Best-effort metadata lookups used to enrich episode queries.
///
/// Implementations report absence (empty list, `None`) for anything they
/// cannot resolve; callers degrade rather than abort.
#[async_trait]
pub trait MetadataService: Send + Sync {
    /// Cross-reference an external id, returning candidate records.
    async fn find_show(&self, external_id: &str, namespace: ExternalIdNamespace)
    -> Vec<FindMatch>;

    /// Fetch the full record for a candidate in the given language.
    async fn show_details(&self, id: u64, language: &str) -> Option<ShowDetails>;
}

/// Live view of the operator-tunable search settings.
///
/// The call protocol reads these once per call, so a change is observed by
/// the next search without rebuilding any searcher.
pub trait SearchSettings: Send + Sync {
    /// Whether the operator-supplied timeout should replace the default.
    fn custom_timeout_enabled(&self) -> bool;

    /// The operator-supplied timeout; only meaningful when enabled.
    fn custom_timeout(&self) -> Duration;
}
