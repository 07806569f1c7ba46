//! Relevance filtering for episode search results.

use nimbus_search_core::{EpisodeSearchObject, Torrent};
use regex::Regex;
use tracing::info;

/// Discard results whose display name does not reference the requested
/// episode. Matching is case-insensitive against the display name only;
/// every other field passes through untouched.
///
/// Absolute-numbered queries match the zero-padded absolute number anywhere
/// in the name; otherwise either a `SxxEyy` or a `NxEyy` token is required.
#[must_use]
pub fn filter_episode_results(
    query: &EpisodeSearchObject,
    torrents: Vec<Torrent>,
) -> Vec<Torrent> {
    let pattern = if query.absolute_number > 0 {
        format!("{:02}", query.absolute_number)
    } else {
        format!(
            "(s{:02}e{:02}|{}x{:02})",
            query.season, query.episode, query.season, query.episode
        )
    };
    let matcher = Regex::new(&pattern).expect("episode pattern regex");

    let total = torrents.len();
    let kept: Vec<Torrent> = torrents
        .into_iter()
        .filter(|torrent| matcher.is_match(&torrent.name.to_lowercase()))
        .collect();
    if kept.len() < total {
        info!(discarded = total - kept.len(), "filtered irrelevant results");
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torrent(name: &str) -> Torrent {
        Torrent {
            name: name.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    fn episode_query(season: u32, episode: u32, absolute_number: u32) -> EpisodeSearchObject {
        EpisodeSearchObject {
            season,
            episode,
            absolute_number,
            ..EpisodeSearchObject::default()
        }
    }

    #[test]
    fn keeps_both_token_styles() {
        let results = vec![
            torrent("Show.S01E02.x264"),
            torrent("Show S1x02"),
            torrent("Show.S01E03.x264"),
        ];
        let kept = filter_episode_results(&episode_query(1, 2, 0), results);
        let names: Vec<&str> = kept.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Show.S01E02.x264", "Show S1x02"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let kept = filter_episode_results(
            &episode_query(2, 5, 0),
            vec![torrent("SHOW.s02E05.WEB"), torrent("SHOW.s03E05.WEB")],
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "SHOW.s02E05.WEB");
    }

    #[test]
    fn absolute_number_matches_anywhere_in_name() {
        let kept = filter_episode_results(
            &episode_query(1, 13, 13),
            vec![torrent("Show - 13"), torrent("Show - 14")],
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Show - 13");
    }

    #[test]
    fn absolute_number_is_zero_padded() {
        let kept = filter_episode_results(
            &episode_query(1, 7, 7),
            vec![torrent("Show - 07 [720p]"), torrent("Show - 17 [720p]")],
        );
        // 17 contains no "07"; only the padded absolute number matches
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Show - 07 [720p]");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(filter_episode_results(&episode_query(1, 1, 0), Vec::new()).is_empty());
    }
}
