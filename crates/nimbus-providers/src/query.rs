//! Search object construction from upstream metadata.

use nimbus_search_core::{
    Episode, EpisodeSearchObject, ExternalIdNamespace, MetadataService, MovieDetails,
    MovieSearchObject, Show, ShowDetails,
};
use tracing::debug;

use crate::title::normalize_title;

/// Build a movie-shaped search object.
///
/// The year is the leading component of the release date; anything
/// unparsable degrades to `0` rather than aborting the build. The original
/// title is preferred, falling back to the display title when absent, and
/// every title is normalized.
#[must_use]
pub fn movie_search_object(movie: &MovieDetails) -> MovieSearchObject {
    let year = movie
        .release_date
        .split('-')
        .next()
        .and_then(|component| component.parse().ok())
        .unwrap_or(0);
    let title = if movie.original_title.is_empty() {
        &movie.title
    } else {
        &movie.original_title
    };

    let mut object = MovieSearchObject {
        imdb_id: movie.imdb_id.clone(),
        title: normalize_title(title),
        year,
        titles: std::collections::HashMap::new(),
    };
    for alternative in &movie.alternative_titles {
        object.titles.insert(
            alternative.iso_3166_1.to_lowercase(),
            normalize_title(&alternative.title),
        );
    }
    object
}

/// Build an episode-shaped search object, enriching it through the metadata
/// service when possible.
///
/// The show's catalog id is cross-referenced against the richer metadata
/// catalog; the first candidate wins. When the richer record resolves, its
/// name replaces the series title and the absolute-numbering heuristic is
/// consulted. Every lookup failure leaves the query on plain season/episode
/// numbering with absolute number `0`.
pub async fn episode_search_object(
    show: &Show,
    episode: &Episode,
    metadata: &dyn MetadataService,
) -> EpisodeSearchObject {
    let mut series_name = show.series_name.clone();
    let mut absolute_number = 0;

    let candidates = metadata
        .find_show(&show.tvdb_id.to_string(), ExternalIdNamespace::TvdbId)
        .await;
    if let Some(candidate) = candidates.first() {
        match metadata.show_details(candidate.id, "en").await {
            Some(details) => {
                if !details.name.is_empty() {
                    series_name = details.name.clone();
                }
                if is_absolute_numbered(&details) {
                    absolute_number = episode.absolute_number;
                }
            }
            None => {
                debug!(
                    tvdb_id = show.tvdb_id,
                    candidate = candidate.id,
                    "show details unavailable, keeping catalog series name"
                );
            }
        }
    } else {
        debug!(
            tvdb_id = show.tvdb_id,
            "no cross-reference candidates for show"
        );
    }

    EpisodeSearchObject {
        imdb_id: show.imdb_id.clone(),
        tvdb_id: show.tvdb_id,
        title: normalize_title(&series_name),
        season: episode.season_number,
        episode: episode.episode_number,
        absolute_number,
    }
}

/// Anime released in Japan tends to use a single running episode count
/// instead of season/episode pairs. Only shows originating in Japan and
/// tagged as animation are treated that way.
fn is_absolute_numbered(details: &ShowDetails) -> bool {
    let from_japan = details.origin_country.iter().any(|country| country == "JP");
    let animation = details.genres.iter().any(|genre| genre.name == "Animation");
    from_japan && animation
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nimbus_search_core::{AlternativeTitle, FindMatch, Genre};

    fn movie(release_date: &str, title: &str, original_title: &str) -> MovieDetails {
        MovieDetails {
            imdb_id: "tt0133093".to_string(),
            title: title.to_string(),
            original_title: original_title.to_string(),
            release_date: release_date.to_string(),
            alternative_titles: vec![AlternativeTitle {
                iso_3166_1: "FR".to_string(),
                title: "Matrix: Le Film".to_string(),
            }],
        }
    }

    #[test]
    fn extracts_year_from_release_date() {
        let object = movie_search_object(&movie("1999-05-01", "The Matrix", ""));
        assert_eq!(object.year, 1999);
    }

    #[test]
    fn malformed_release_date_degrades_to_zero() {
        for date in ["", "unknown", "soon-tm"] {
            let object = movie_search_object(&movie(date, "The Matrix", ""));
            assert_eq!(object.year, 0, "date {date:?} must not abort the build");
        }
    }

    #[test]
    fn prefers_original_title() {
        let object = movie_search_object(&movie("1999-05-01", "Die Matrix", "The Matrix"));
        assert_eq!(object.title, "the matrix");

        let fallback = movie_search_object(&movie("1999-05-01", "Die Matrix", ""));
        assert_eq!(fallback.title, "die matrix");
    }

    #[test]
    fn alternative_titles_are_keyed_by_lowercased_locale() {
        let object = movie_search_object(&movie("1999-05-01", "The Matrix", ""));
        assert_eq!(
            object.titles.get("fr").map(String::as_str),
            Some("matrix le film")
        );
        assert!(!object.titles.contains_key("FR"));
    }

    struct StubMetadata {
        candidates: Vec<FindMatch>,
        details: Option<ShowDetails>,
    }

    impl StubMetadata {
        fn absent() -> Self {
            Self {
                candidates: Vec::new(),
                details: None,
            }
        }

        fn with_details(details: ShowDetails) -> Self {
            Self {
                candidates: vec![FindMatch { id: 1 }, FindMatch { id: 2 }],
                details: Some(details),
            }
        }
    }

    #[async_trait]
    impl MetadataService for StubMetadata {
        async fn find_show(
            &self,
            _external_id: &str,
            _namespace: ExternalIdNamespace,
        ) -> Vec<FindMatch> {
            self.candidates.clone()
        }

        async fn show_details(&self, id: u64, language: &str) -> Option<ShowDetails> {
            assert_eq!(id, 1, "first candidate wins");
            assert_eq!(language, "en");
            self.details.clone()
        }
    }

    fn show() -> Show {
        Show {
            tvdb_id: 81797,
            imdb_id: "tt0388629".to_string(),
            series_name: "One Piece (1999)".to_string(),
        }
    }

    fn episode() -> Episode {
        Episode {
            season_number: 19,
            episode_number: 12,
            absolute_number: 790,
        }
    }

    fn details(name: &str, country: &str, genre: &str) -> ShowDetails {
        ShowDetails {
            name: name.to_string(),
            origin_country: vec![country.to_string()],
            genres: vec![Genre {
                name: genre.to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn japanese_animation_carries_absolute_number() {
        let metadata = StubMetadata::with_details(details("One Piece", "JP", "Animation"));
        let object = episode_search_object(&show(), &episode(), &metadata).await;
        assert_eq!(object.absolute_number, 790);
        assert_eq!(object.title, "one piece");
    }

    #[tokio::test]
    async fn non_japanese_shows_never_get_absolute_numbers() {
        let metadata = StubMetadata::with_details(details("One Piece", "US", "Animation"));
        let object = episode_search_object(&show(), &episode(), &metadata).await;
        assert_eq!(object.absolute_number, 0);
    }

    #[tokio::test]
    async fn japanese_non_animation_never_gets_absolute_numbers() {
        let metadata = StubMetadata::with_details(details("One Piece", "JP", "Drama"));
        let object = episode_search_object(&show(), &episode(), &metadata).await;
        assert_eq!(object.absolute_number, 0);
    }

    #[tokio::test]
    async fn lookup_failure_degrades_to_catalog_name() {
        let metadata = StubMetadata::absent();
        let object = episode_search_object(&show(), &episode(), &metadata).await;
        assert_eq!(object.title, "one piece 1999");
        assert_eq!(object.absolute_number, 0);
        assert_eq!(object.season, 19);
        assert_eq!(object.episode, 12);
    }

    #[tokio::test]
    async fn empty_details_name_keeps_catalog_name() {
        let metadata = StubMetadata::with_details(details("", "JP", "Animation"));
        let object = episode_search_object(&show(), &episode(), &metadata).await;
        assert_eq!(object.title, "one piece 1999");
        assert_eq!(object.absolute_number, 790);
    }
}
