use super::engine::FuzzyScorer;
use super::membership::{FuzzySet, Shape, Variable, VariableTerms};
use super::rules::Category;

/// Validate the scorer's breakpoints, rule table and weights at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scorer(scorer: &FuzzyScorer) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for variable in [Variable::Income, Variable::Debt] {
        validate_terms(variable, scorer.functions.terms(variable), &mut errors);
    }

    // Every income/debt combination must be handled by exactly one rule
    for income in FuzzySet::ALL {
        for debt in FuzzySet::ALL {
            let count = scorer
                .rules
                .rules
                .iter()
                .filter(|r| r.income == income && r.debt == debt)
                .count();
            if count != 1 {
                errors.push(format!(
                    "rules.{}/{}: expected exactly one rule, found {}",
                    income.name(),
                    debt.name(),
                    count
                ));
            }
        }
    }

    for category in Category::ALL {
        let weight = scorer.weights.get(category);
        if !(0.0..=100.0).contains(&weight) {
            errors.push(format!(
                "weights.{}: {} is outside 0-100",
                category.name(),
                weight
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_terms(variable: Variable, terms: &VariableTerms, errors: &mut Vec<String>) {
    for set in FuzzySet::ALL {
        let points = terms.shape(set).breakpoints();
        if points.iter().any(|p| !p.is_finite()) {
            errors.push(format!(
                "{}.{}: breakpoints must be finite",
                variable.name(),
                set.name()
            ));
            continue;
        }
        if points.windows(2).any(|w| w[0] >= w[1]) {
            errors.push(format!(
                "{}.{}: breakpoints must strictly increase, got {:?}",
                variable.name(),
                set.name(),
                points
            ));
        }
    }

    if !matches!(terms.low, Shape::Falling { .. }) {
        errors.push(format!("{}.Low: must be a falling shape", variable.name()));
    }
    if !matches!(terms.middle, Shape::Plateau { .. }) {
        errors.push(format!("{}.Middle: must be a plateau shape", variable.name()));
    }
    if !matches!(terms.high, Shape::Rising { .. }) {
        errors.push(format!("{}.High: must be a rising shape", variable.name()));
    }

    // Neighbouring sets must overlap, otherwise some inputs fire no rule
    if let (
        Shape::Falling { zero: low_zero, .. },
        Shape::Plateau {
            rise_start,
            fall_end,
            ..
        },
        Shape::Rising {
            zero: high_zero, ..
        },
    ) = (terms.low, terms.middle, terms.high)
    {
        if low_zero <= rise_start {
            errors.push(format!(
                "{}: Low ends at {} before Middle starts at {}",
                variable.name(),
                low_zero,
                rise_start
            ));
        }
        if fall_end <= high_zero {
            errors.push(format!(
                "{}: Middle ends at {} before High starts at {}",
                variable.name(),
                fall_end,
                high_zero
            ));
        }
    }
}
