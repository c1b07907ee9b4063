use serde::Serialize;
use thiserror::Error;

use super::membership::{FuzzySet, MembershipFunctions, MembershipVector};
use super::rules::{Category, CategoryStrengths, DefuzzWeights, RuleBase};
use crate::dataset::Household;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("no rule fired ({strengths}); crisp value is undefined")]
    DegenerateInference { strengths: CategoryStrengths },
}

/// One rule's contribution, kept for `explain` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleFiring {
    pub income: FuzzySet,
    pub debt: FuzzySet,
    pub category: Category,
    pub strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub income: MembershipVector,
    pub debt: MembershipVector,
    pub firings: Vec<RuleFiring>,
    pub strengths: CategoryStrengths,
    /// `None` when no rule fired
    pub crisp_value: Option<f64>,
}

/// A household together with its crisp score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredHousehold {
    #[serde(flatten)]
    pub household: Household,
    pub crisp_value: f64,
    pub strengths: CategoryStrengths,
}

impl ScoredHousehold {
    pub fn category(&self) -> Category {
        self.strengths.dominant()
    }
}

/// Fuzzify, infer and defuzzify with a fixed set of membership functions,
/// rules and weights. Holds no per-household state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyScorer {
    pub functions: MembershipFunctions,
    pub rules: RuleBase,
    pub weights: DefuzzWeights,
}

impl FuzzyScorer {
    pub const STANDARD: FuzzyScorer = FuzzyScorer {
        functions: MembershipFunctions::STANDARD,
        rules: RuleBase::STANDARD,
        weights: DefuzzWeights::STANDARD,
    };

    /// Income and debt memberships, each in (Low, Middle, High) order.
    pub fn fuzzify(&self, household: &Household) -> (MembershipVector, MembershipVector) {
        (
            self.functions.income.fuzzify(household.income),
            self.functions.debt.fuzzify(household.debt),
        )
    }

    pub fn infer(&self, income: &MembershipVector, debt: &MembershipVector) -> CategoryStrengths {
        self.rules.infer(income, debt)
    }

    /// Weighted average of the category weights by strength.
    pub fn defuzzify(&self, strengths: &CategoryStrengths) -> Result<f64, ScoreError> {
        let total = strengths.total();
        if total.is_nan() || total == 0.0 {
            return Err(ScoreError::DegenerateInference {
                strengths: *strengths,
            });
        }

        let weighted: f64 = Category::ALL
            .iter()
            .map(|&c| strengths.get(c) * self.weights.get(c))
            .sum();
        Ok(weighted / total)
    }

    pub fn score(&self, household: &Household) -> Result<ScoredHousehold, ScoreError> {
        let (income, debt) = self.fuzzify(household);
        let strengths = self.infer(&income, &debt);
        let crisp_value = self.defuzzify(&strengths)?;

        Ok(ScoredHousehold {
            household: household.clone(),
            crisp_value,
            strengths,
        })
    }

    /// Same pipeline as [`FuzzyScorer::score`], keeping every intermediate value.
    pub fn explain(&self, household: &Household) -> ScoreBreakdown {
        let (income, debt) = self.fuzzify(household);
        let firings = self
            .rules
            .rules
            .iter()
            .map(|rule| RuleFiring {
                income: rule.income,
                debt: rule.debt,
                category: rule.category,
                strength: rule.fire(&income, &debt),
            })
            .collect();
        let strengths = self.infer(&income, &debt);
        let crisp_value = self.defuzzify(&strengths).ok();

        ScoreBreakdown {
            income,
            debt,
            firings,
            strengths,
            crisp_value,
        }
    }
}

impl Default for FuzzyScorer {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Score a household with the standard rule base.
pub fn calculate_score(household: &Household) -> Result<ScoredHousehold, ScoreError> {
    FuzzyScorer::STANDARD.score(household)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn household(income: f64, debt: f64) -> Household {
        Household::new("T1", income, debt)
    }

    #[test]
    fn test_pure_low_income_low_debt_scores_100() {
        let h = household(300.0, 5_000.0);
        let (income, debt) = FuzzyScorer::STANDARD.fuzzify(&h);
        assert_eq!(income, MembershipVector::new(1.0, 0.0, 0.0));
        assert_eq!(debt, MembershipVector::new(1.0, 0.0, 0.0));

        let result = calculate_score(&h).unwrap();
        assert_eq!(result.strengths, CategoryStrengths::new(1.0, 0.0, 0.0));
        assert_eq!(result.crisp_value, 100.0);
        assert_eq!(result.category(), Category::Accepted);
    }

    #[test]
    fn test_pure_high_income_high_debt_scores_70() {
        let h = household(1_800.0, 80_000.0);
        let result = calculate_score(&h).unwrap();
        assert_eq!(result.strengths, CategoryStrengths::new(0.0, 1.0, 0.0));
        assert_eq!(result.crisp_value, 70.0);
    }

    #[test]
    fn test_pure_high_income_low_debt_scores_50() {
        let result = calculate_score(&household(2_000.0, 1_000.0)).unwrap();
        assert_eq!(result.strengths, CategoryStrengths::new(0.0, 0.0, 1.0));
        assert_eq!(result.crisp_value, 50.0);
    }

    #[test]
    fn test_low_ramp_boundaries_blend_categories() {
        // 500 is still on the Middle ramp (0.2) and 15000 on the debt Middle ramp (1/6)
        let result = calculate_score(&household(500.0, 15_000.0)).unwrap();
        let s = result.strengths;
        assert_eq!(s.accepted, 1.0);
        assert!((s.considered - 1.0 / 6.0).abs() < 1e-12);
        assert!((s.rejected - 0.2).abs() < 1e-12);

        let expected = (100.0 + 70.0 / 6.0 + 50.0 * 0.2) / (1.0 + 1.0 / 6.0 + 0.2);
        assert!((result.crisp_value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_just_above_high_thresholds() {
        let result = calculate_score(&household(1_650.01, 70_000.01)).unwrap();
        let s = result.strengths;
        assert_eq!(s.accepted, 0.0);
        assert_eq!(s.considered, 1.0);
        // High income with the tail of Middle debt
        assert!((s.rejected - (1.0 - 20_000.01 / 25_000.0)).abs() < 1e-9);
        assert!(result.crisp_value < 70.0 && result.crisp_value > 50.0);
    }

    #[test]
    fn test_scoring_is_repeatable() {
        let h = household(1_234.5, 41_234.0);
        let first = calculate_score(&h).unwrap();
        let second = calculate_score(&h).unwrap();
        assert_eq!(
            first.crisp_value.to_bits(),
            second.crisp_value.to_bits()
        );
    }

    #[test]
    fn test_defuzzify_zero_strengths_is_degenerate() {
        let zero = CategoryStrengths::default();
        let err = FuzzyScorer::STANDARD.defuzzify(&zero).unwrap_err();
        assert_eq!(err, ScoreError::DegenerateInference { strengths: zero });
        assert!(err.to_string().contains("undefined"));
    }

    #[test]
    fn test_nan_amounts_are_degenerate() {
        let result = calculate_score(&household(f64::NAN, f64::NAN));
        assert!(matches!(
            result,
            Err(ScoreError::DegenerateInference { .. })
        ));
    }

    #[test]
    fn test_defuzzify_weighted_average() {
        let s = CategoryStrengths::new(0.5, 0.5, 0.0);
        let crisp = FuzzyScorer::STANDARD.defuzzify(&s).unwrap();
        assert_eq!(crisp, 85.0);
    }

    fn within_weights(crisp: f64) -> bool {
        (50.0 - 1e-9..=100.0 + 1e-9).contains(&crisp)
    }

    #[test]
    fn test_crisp_value_stays_within_weights() {
        let mut income = 0.0;
        while income <= 2_500.0 {
            let mut debt = 0.0;
            while debt <= 100_000.0 {
                let result = calculate_score(&household(income, debt)).unwrap();
                assert!(
                    within_weights(result.crisp_value),
                    "income={income} debt={debt} crisp={}",
                    result.crisp_value
                );
                debt += 2_500.0;
            }
            income += 50.0;
        }
    }

    #[test]
    fn test_partial_rejected_rounds_near_lowest_weight() {
        // Only Rejected fires, at 2/3; (r * 50) / r lands one ulp under 50
        let result = calculate_score(&household(1_800.0, 30_000.0)).unwrap();
        assert_eq!(result.strengths.accepted, 0.0);
        assert_eq!(result.strengths.considered, 0.0);
        assert!(result.strengths.rejected > 0.0 && result.strengths.rejected < 1.0);
        assert!(within_weights(result.crisp_value));
        assert!((result.crisp_value - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_explain_lists_all_rule_firings() {
        let breakdown = FuzzyScorer::STANDARD.explain(&household(1_000.0, 45_000.0));
        assert_eq!(breakdown.firings.len(), 9);
        assert_eq!(breakdown.income, MembershipVector::new(0.0, 1.0, 0.0));
        assert_eq!(breakdown.debt, MembershipVector::new(0.0, 1.0, 0.0));

        let fired: Vec<_> = breakdown
            .firings
            .iter()
            .filter(|f| f.strength > 0.0)
            .collect();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].category, Category::Considered);
        assert_eq!(breakdown.crisp_value, Some(70.0));
    }

    #[test]
    fn test_explain_degenerate_has_no_crisp_value() {
        let breakdown = FuzzyScorer::STANDARD.explain(&household(f64::NAN, 1_000.0));
        assert_eq!(breakdown.strengths.total(), 0.0);
        assert!(breakdown.crisp_value.is_none());
    }
}
