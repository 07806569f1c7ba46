//! Wire shapes and upstream metadata records for addon searches.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Search request variants an addon can be asked to service.
///
/// Serialization is untagged so the addon receives the bare search object:
/// a plain string for free-text searches, an object otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SearchQuery {
    /// Free-text query, passed through verbatim.
    Text(String),
    /// Movie lookup built from release metadata.
    Movie(MovieSearchObject),
    /// Episode lookup built from series metadata.
    Episode(EpisodeSearchObject),
}

/// Movie-shaped search object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieSearchObject {
    pub imdb_id: String,
    /// Normalized primary title (original title when available).
    pub title: String,
    /// Release year, `0` when the release date was absent or malformed.
    pub year: u32,
    /// Normalized alternative titles keyed by lowercased ISO 3166-1 code.
    pub titles: HashMap<String, String>,
}

/// Episode-shaped search object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EpisodeSearchObject {
    pub imdb_id: String,
    pub tvdb_id: u32,
    /// Normalized series title.
    pub title: String,
    pub season: u32,
    pub episode: u32,
    /// Running episode count across seasons; `0` means "not applicable".
    /// Only populated for shows the absolute-numbering heuristic accepts.
    pub absolute_number: u32,
}

/// Envelope dispatched to an addon for one search request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    /// Addon-side method name (`search`, `search_movie`, `search_episode`).
    pub method: String,
    /// Address the addon posts its result array to, correlation id included.
    pub callback_url: String,
    pub search_object: SearchQuery,
}

/// A single result item reported back by an addon.
///
/// Only the display name participates in relevance filtering; every other
/// field the addon sends is preserved untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Torrent {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Movie release metadata, as obtained from the movie catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieDetails {
    pub imdb_id: String,
    /// Localized display title.
    pub title: String,
    /// Title in the original language; may be empty.
    pub original_title: String,
    /// `YYYY-MM-DD` release date; may be empty or malformed upstream.
    pub release_date: String,
    pub alternative_titles: Vec<AlternativeTitle>,
}

/// Localized alternative title for a movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlternativeTitle {
    /// ISO 3166-1 country code, upstream casing.
    pub iso_3166_1: String,
    pub title: String,
}

/// Series record from the episode catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Show {
    /// Numeric catalog identifier.
    pub tvdb_id: u32,
    /// Industry identifier (IMDb style).
    pub imdb_id: String,
    pub series_name: String,
}

/// Episode record from the episode catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Episode {
    pub season_number: u32,
    pub episode_number: u32,
    pub absolute_number: u32,
}

/// Candidate returned when cross-referencing a show by external id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FindMatch {
    /// Identifier of the richer metadata record.
    pub id: u64,
}

/// Richer show record resolved through the metadata service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ShowDetails {
    pub name: String,
    /// ISO 3166-1 codes for the countries of origin.
    pub origin_country: Vec<String>,
    pub genres: Vec<Genre>,
}

/// Genre tag attached to a show record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub name: String,
}
