use tracing::{debug, warn};

use super::engine::{FuzzyScorer, ScoreError, ScoredHousehold};
use crate::dataset::Household;

/// A household left out of the ranking because it could not be scored.
#[derive(Debug, Clone)]
pub struct Excluded {
    pub household: Household,
    pub error: ScoreError,
}

/// Scored households in descending crisp order, plus the ones that were dropped.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    pub ranked: Vec<ScoredHousehold>,
    pub excluded: Vec<Excluded>,
}

impl Ranking {
    /// The first `n` entries, or all of them when fewer exist.
    pub fn top(&self, n: usize) -> &[ScoredHousehold] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<(usize, &ScoredHousehold)> {
        self.ranked
            .iter()
            .enumerate()
            .find(|(_, s)| s.household.id == id)
    }
}

/// Sort by crisp value, highest first. Equal scores keep their input order.
pub fn sort_by_crisp_value(scored: &mut [ScoredHousehold]) {
    scored.sort_by(|a, b| b.crisp_value.total_cmp(&a.crisp_value));
}

/// Score every household and rank the results.
///
/// Households whose inference is degenerate are excluded with a warning
/// rather than aborting the run.
pub fn rank_households(households: &[Household], scorer: &FuzzyScorer) -> Ranking {
    let mut ranking = Ranking::default();

    for household in households {
        match scorer.score(household) {
            Ok(scored) => {
                debug!(
                    id = %household.id,
                    crisp = scored.crisp_value,
                    "scored household"
                );
                ranking.ranked.push(scored);
            }
            Err(error) => {
                warn!(id = %household.id, %error, "excluding household from ranking");
                ranking.excluded.push(Excluded {
                    household: household.clone(),
                    error,
                });
            }
        }
    }

    sort_by_crisp_value(&mut ranking.ranked);
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(scored: &[ScoredHousehold]) -> Vec<&str> {
        scored.iter().map(|s| s.household.id.as_str()).collect()
    }

    #[test]
    fn test_ranks_descending() {
        let households = vec![
            Household::new("rejected", 2_000.0, 1_000.0),
            Household::new("accepted", 300.0, 5_000.0),
            Household::new("considered", 1_800.0, 80_000.0),
        ];
        let ranking = rank_households(&households, &FuzzyScorer::STANDARD);
        assert_eq!(ids(&ranking.ranked), vec!["accepted", "considered", "rejected"]);
        assert!(ranking.excluded.is_empty());
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let households = vec![
            Household::new("B", 300.0, 5_000.0),
            Household::new("low", 2_000.0, 1_000.0),
            Household::new("A", 250.0, 2_000.0),
            Household::new("C", 100.0, 0.0),
        ];
        let ranking = rank_households(&households, &FuzzyScorer::STANDARD);
        assert_eq!(ids(&ranking.ranked), vec!["B", "A", "C", "low"]);
    }

    #[test]
    fn test_degenerate_households_are_excluded() {
        let households = vec![
            Household::new("ok", 300.0, 5_000.0),
            Household::new("nan", f64::NAN, 5_000.0),
        ];
        let ranking = rank_households(&households, &FuzzyScorer::STANDARD);
        assert_eq!(ids(&ranking.ranked), vec!["ok"]);
        assert_eq!(ranking.excluded.len(), 1);
        assert_eq!(ranking.excluded[0].household.id, "nan");
    }

    #[test]
    fn test_top_is_clamped_to_available() {
        let households: Vec<_> = (0..5)
            .map(|i| Household::new(format!("H{}", i), 500.0 + 100.0 * i as f64, 20_000.0))
            .collect();
        let ranking = rank_households(&households, &FuzzyScorer::STANDARD);
        assert_eq!(ranking.top(3).len(), 3);
        assert_eq!(ranking.top(20).len(), 5);
        assert_eq!(ranking.top(0).len(), 0);
    }

    #[test]
    fn test_find_returns_rank_position() {
        let households = vec![
            Household::new("second", 1_800.0, 80_000.0),
            Household::new("first", 300.0, 5_000.0),
        ];
        let ranking = rank_households(&households, &FuzzyScorer::STANDARD);
        let (pos, found) = ranking.find("second").unwrap();
        assert_eq!(pos, 1);
        assert_eq!(found.crisp_value, 70.0);
        assert!(ranking.find("missing").is_none());
    }

    #[test]
    fn test_empty_input() {
        let ranking = rank_households(&[], &FuzzyScorer::STANDARD);
        assert!(ranking.is_empty());
        assert_eq!(ranking.len(), 0);
        assert!(ranking.top(20).is_empty());
    }
}
