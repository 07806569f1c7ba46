//! The addon call protocol: one synchronous-looking search against an
//! asynchronous, loosely-trusted worker.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nimbus_search_core::{
    AddonInvoker, Episode, EpisodeSearcher, MetadataService, MovieDetails, MovieSearcher,
    SearchPayload, SearchQuery, SearchSettings, Show, TextSearcher, Torrent,
};
use tracing::{debug, info, warn};

use crate::callbacks::CallbackRegistry;
use crate::{filter, query};

/// Timeout applied when no operator override is enabled.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// One addon-backed searcher.
///
/// A searcher is cheap to construct; callers build one per addon id they
/// discovered and hold it behind whichever capability trait they need. All
/// searchers share the same registry and collaborators.
pub struct AddonSearcher {
    addon_id: String,
    callback_base: String,
    registry: Arc<CallbackRegistry>,
    invoker: Arc<dyn AddonInvoker>,
    metadata: Arc<dyn MetadataService>,
    settings: Arc<dyn SearchSettings>,
}

impl AddonSearcher {
    #[must_use]
    pub fn new(
        addon_id: impl Into<String>,
        callback_base: impl Into<String>,
        registry: Arc<CallbackRegistry>,
        invoker: Arc<dyn AddonInvoker>,
        metadata: Arc<dyn MetadataService>,
        settings: Arc<dyn SearchSettings>,
    ) -> Self {
        Self {
            addon_id: addon_id.into(),
            callback_base: callback_base.into(),
            registry,
            invoker,
            metadata,
            settings,
        }
    }

    /// Perform one request/response round trip against the addon.
    ///
    /// The callback entry registered here is consumed exactly once: by the
    /// delivery that races the timer, or by the timeout path removing it.
    /// Neither a dispatch failure, a silent addon, nor an undecodable
    /// payload surfaces as an error; all of them yield an empty result set.
    async fn call(&self, method: &str, search_object: SearchQuery) -> Vec<Torrent> {
        let (cid, receiver) = self.registry.register();
        let callback_url = format!(
            "{}/callbacks/{cid}",
            self.callback_base.trim_end_matches('/')
        );
        let payload = SearchPayload {
            method: method.to_string(),
            callback_url,
            search_object,
        };

        if let Err(err) = self.invoker.invoke(&self.addon_id, &payload).await {
            // the addon may still answer through the callback; if it does
            // not, the timeout below settles the call
            warn!(addon_id = %self.addon_id, error = %err, "addon dispatch failed");
        }

        let timeout = self.search_timeout();
        tokio::select! {
            () = tokio::time::sleep(timeout) => {
                self.registry.remove(cid);
                info!(
                    addon_id = %self.addon_id,
                    timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    "addon was too slow, ignoring"
                );
                Vec::new()
            }
            payload = receiver => self.decode_results(payload.ok()),
        }
    }

    /// Resolve the timeout for this call. Read per call so an operator
    /// change takes effect on the next search.
    fn search_timeout(&self) -> Duration {
        if self.settings.custom_timeout_enabled() {
            self.settings.custom_timeout()
        } else {
            DEFAULT_SEARCH_TIMEOUT
        }
    }

    fn decode_results(&self, payload: Option<Vec<u8>>) -> Vec<Torrent> {
        let Some(bytes) = payload else {
            return Vec::new();
        };
        match serde_json::from_slice(&bytes) {
            Ok(torrents) => torrents,
            Err(err) => {
                debug!(
                    addon_id = %self.addon_id,
                    error = %err,
                    "discarding undecodable addon payload"
                );
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl TextSearcher for AddonSearcher {
    async fn search_links(&self, query: &str) -> Vec<Torrent> {
        self.call("search", SearchQuery::Text(query.to_string()))
            .await
    }
}

#[async_trait]
impl MovieSearcher for AddonSearcher {
    async fn search_movie_links(&self, movie: &MovieDetails) -> Vec<Torrent> {
        let object = query::movie_search_object(movie);
        self.call("search_movie", SearchQuery::Movie(object)).await
    }
}

#[async_trait]
impl EpisodeSearcher for AddonSearcher {
    async fn search_episode_links(&self, show: &Show, episode: &Episode) -> Vec<Torrent> {
        let object = query::episode_search_object(show, episode, self.metadata.as_ref()).await;
        let torrents = self
            .call("search_episode", SearchQuery::Episode(object.clone()))
            .await;
        filter::filter_episode_results(&object, torrents)
    }
}
