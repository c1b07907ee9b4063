pub mod engine;
pub mod membership;
pub mod ranking;
pub mod rules;
pub mod validation;

pub use engine::{
    calculate_score, FuzzyScorer, RuleFiring, ScoreBreakdown, ScoreError, ScoredHousehold,
};
pub use membership::{FuzzySet, MembershipFunctions, MembershipVector, Shape, Variable, VariableTerms};
pub use ranking::{rank_households, sort_by_crisp_value, Excluded, Ranking};
pub use rules::{Category, CategoryStrengths, DefuzzWeights, Rule, RuleBase};
pub use validation::validate_scorer;
