//! Near-miss ranking for "did you mean".
//!
//! Pure Levenshtein scoring over a candidate population, intentionally
//! bounded: distance at most 3 and at most five results, which keeps the
//! cost linear in catalogue size per probe and the output short enough to
//! read.

use strsim::levenshtein;

use crate::Suggestion;

pub const DEFAULT_MAX_DISTANCE: usize = 3;
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Rank `population` members by edit distance to `probe`.
///
/// Candidates farther than `max_distance` are dropped; the survivors are
/// sorted by distance, ties broken lexicographically, deduplicated, and cut
/// to `max_results`. Scores map distance 0 to 1.0 and `max_distance` to just
/// above 0, as `1 - d / (max_distance + 1)`.
pub fn suggest<'a, I>(
    probe: &str,
    population: I,
    max_distance: usize,
    max_results: usize,
) -> Vec<Suggestion>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ranked: Vec<(usize, &str)> = population
        .into_iter()
        .map(|candidate| (levenshtein(probe, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();

    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    ranked.dedup_by(|a, b| a.1 == b.1);
    ranked.truncate(max_results);

    ranked
        .into_iter()
        .map(|(distance, candidate)| Suggestion {
            candidate: candidate.to_string(),
            score: 1.0 - distance as f64 / (max_distance as f64 + 1.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(results: &[Suggestion]) -> Vec<&str> {
        results.iter().map(|s| s.candidate.as_str()).collect()
    }

    #[test]
    fn ranks_by_distance_then_lexicographically() {
        let population = ["server", "serve", "swarm", "survey"];
        let results = suggest("serv", population, DEFAULT_MAX_DISTANCE, DEFAULT_MAX_RESULTS);
        // serve is distance 1, server 2, survey 3; swarm is distance 3 too
        // and sorts before survey.
        assert_eq!(candidates(&results), vec!["serve", "server", "survey", "swarm"]);

        let distances: Vec<f64> = results.iter().map(|s| s.score).collect();
        for pair in distances.windows(2) {
            assert!(pair[0] >= pair[1], "scores must be non-increasing: {distances:?}");
        }
    }

    #[test]
    fn distance_bound_filters() {
        let results = suggest("server", ["completely-different"], DEFAULT_MAX_DISTANCE, DEFAULT_MAX_RESULTS);
        assert!(results.is_empty());
    }

    #[test]
    fn result_count_is_bounded() {
        let population = ["aa", "ab", "ac", "ad", "ae", "af", "ag"];
        let results = suggest("a", population, DEFAULT_MAX_DISTANCE, DEFAULT_MAX_RESULTS);
        assert_eq!(results.len(), DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn no_duplicate_candidates() {
        let population = ["server", "server", "serve"];
        let results = suggest("serv", population, DEFAULT_MAX_DISTANCE, DEFAULT_MAX_RESULTS);
        assert_eq!(candidates(&results), vec!["serve", "server"]);
    }

    #[test]
    fn typo_of_a_main_command_ranks_it_first() {
        let results = suggest("serv", ["server", "disk", "switch"], DEFAULT_MAX_DISTANCE, DEFAULT_MAX_RESULTS);
        assert_eq!(results[0].candidate, "server");
    }

    #[test]
    fn exact_match_scores_one() {
        let results = suggest("disk", ["disk"], DEFAULT_MAX_DISTANCE, DEFAULT_MAX_RESULTS);
        assert_eq!(results[0].score, 1.0);
    }

    #[test]
    fn score_follows_the_distance_formula() {
        let results = suggest("serv", ["server"], DEFAULT_MAX_DISTANCE, DEFAULT_MAX_RESULTS);
        // levenshtein("serv", "server") == 2, so 1 - 2/4.
        assert_eq!(results[0].score, 0.5);
    }
}
