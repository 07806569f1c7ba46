//! Engine-agnostic search interfaces and DTOs.
//!
//! This crate defines the vocabulary shared between the addon provider
//! adapter and its callers: the search objects shipped to addons, the torrent
//! records shipped back, the capability traits a searcher may implement, and
//! the collaborator traits (invocation, metadata, settings) the adapter
//! consumes. No I/O happens here.

pub mod error;
pub mod model;
pub mod service;
pub mod settings;

pub use error::InvokeError;
pub use model::{
    AlternativeTitle, Episode, EpisodeSearchObject, FindMatch, Genre, MovieDetails,
    MovieSearchObject, SearchPayload, SearchQuery, Show, ShowDetails, Torrent,
};
pub use service::{
    AddonInvoker, EpisodeSearcher, ExternalIdNamespace, MetadataService, MovieSearcher,
    SearchSettings, TextSearcher,
};
pub use settings::{InMemorySettings, TimeoutOverride};
