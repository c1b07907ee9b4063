use serde::Serialize;
use std::fmt;

use super::membership::{FuzzySet, MembershipVector};

/// Output categories of the inference step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Accepted,
    Considered,
    Rejected,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Accepted, Category::Considered, Category::Rejected];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Accepted => "Accepted",
            Category::Considered => "Considered",
            Category::Rejected => "Rejected",
        }
    }
}

/// One rule: IF income is `income` AND debt is `debt` THEN `category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub income: FuzzySet,
    pub debt: FuzzySet,
    pub category: Category,
}

impl Rule {
    const fn new(income: FuzzySet, debt: FuzzySet, category: Category) -> Self {
        Self {
            income,
            debt,
            category,
        }
    }

    /// Firing strength: fuzzy AND (min) of the two antecedents.
    pub fn fire(&self, income: &MembershipVector, debt: &MembershipVector) -> f64 {
        income.get(self.income).min(debt.get(self.debt))
    }
}

/// Fixed rule base. Each category aggregates its rules with fuzzy OR (max).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleBase {
    pub rules: [Rule; 9],
}

impl RuleBase {
    pub const STANDARD: RuleBase = RuleBase {
        rules: [
            // Low income leans accepted at every debt level
            Rule::new(FuzzySet::Low, FuzzySet::High, Category::Accepted),
            Rule::new(FuzzySet::Low, FuzzySet::Middle, Category::Accepted),
            Rule::new(FuzzySet::Low, FuzzySet::Low, Category::Accepted),
            Rule::new(FuzzySet::Middle, FuzzySet::Middle, Category::Considered),
            Rule::new(FuzzySet::Middle, FuzzySet::High, Category::Considered),
            Rule::new(FuzzySet::High, FuzzySet::High, Category::Considered),
            Rule::new(FuzzySet::High, FuzzySet::Low, Category::Rejected),
            Rule::new(FuzzySet::High, FuzzySet::Middle, Category::Rejected),
            Rule::new(FuzzySet::Middle, FuzzySet::Low, Category::Rejected),
        ],
    };

    /// Combine income and debt memberships into category strengths.
    pub fn infer(&self, income: &MembershipVector, debt: &MembershipVector) -> CategoryStrengths {
        let mut strengths = CategoryStrengths::default();
        for rule in &self.rules {
            let strength = rule.fire(income, debt);
            let slot = strengths.get_mut(rule.category);
            *slot = slot.max(strength);
        }
        strengths
    }

    pub fn rules_for(&self, category: Category) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.category == category)
    }
}

impl Default for RuleBase {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Aggregated strength of each output category. Not normalised.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CategoryStrengths {
    pub accepted: f64,
    pub considered: f64,
    pub rejected: f64,
}

impl CategoryStrengths {
    pub fn new(accepted: f64, considered: f64, rejected: f64) -> Self {
        Self {
            accepted,
            considered,
            rejected,
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Accepted => self.accepted,
            Category::Considered => self.considered,
            Category::Rejected => self.rejected,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut f64 {
        match category {
            Category::Accepted => &mut self.accepted,
            Category::Considered => &mut self.considered,
            Category::Rejected => &mut self.rejected,
        }
    }

    pub fn total(&self) -> f64 {
        self.accepted + self.considered + self.rejected
    }

    /// Strongest category. Ties go to the earlier of Accepted, Considered, Rejected.
    pub fn dominant(&self) -> Category {
        let mut best = Category::Accepted;
        for category in Category::ALL {
            if self.get(category) > self.get(best) {
                best = category;
            }
        }
        best
    }
}

impl fmt::Display for CategoryStrengths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "accepted={}, considered={}, rejected={}",
            self.accepted, self.considered, self.rejected
        )
    }
}

/// Crisp score assigned to a category that fires at full strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefuzzWeights {
    pub accepted: f64,
    pub considered: f64,
    pub rejected: f64,
}

impl DefuzzWeights {
    pub const STANDARD: DefuzzWeights = DefuzzWeights {
        accepted: 100.0,
        considered: 70.0,
        rejected: 50.0,
    };

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Accepted => self.accepted,
            Category::Considered => self.considered,
            Category::Rejected => self.rejected,
        }
    }
}

impl Default for DefuzzWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}
