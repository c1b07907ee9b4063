use serde::Serialize;

/// Input variable a membership function is defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Income,
    Debt,
}

impl Variable {
    pub fn name(&self) -> &'static str {
        match self {
            Variable::Income => "Income",
            Variable::Debt => "Debt",
        }
    }
}

/// The three linguistic terms every input variable is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FuzzySet {
    Low,
    Middle,
    High,
}

impl FuzzySet {
    pub const ALL: [FuzzySet; 3] = [FuzzySet::Low, FuzzySet::Middle, FuzzySet::High];

    pub fn name(&self) -> &'static str {
        match self {
            FuzzySet::Low => "Low",
            FuzzySet::Middle => "Middle",
            FuzzySet::High => "High",
        }
    }
}

/// Piecewise-linear membership shape.
///
/// Breakpoints are named after the degree they pin: `full` is the last (or
/// first) input with membership 1, `zero` the last (or first) with membership 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// 1 up to `full`, ramps down to 0 at `zero`.
    Falling { full: f64, zero: f64 },
    /// 0 up to `zero`, ramps up to 1 at `full`.
    Rising { zero: f64, full: f64 },
    /// Trapezoid: rises over `[rise_start, rise_end]`, holds 1 on
    /// `(rise_end, fall_start]`, falls over `(fall_start, fall_end]`.
    Plateau {
        rise_start: f64,
        rise_end: f64,
        fall_start: f64,
        fall_end: f64,
    },
}

impl Shape {
    /// Degree of membership of `x`, always within `[0, 1]`.
    pub fn evaluate(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }

        let degree = match *self {
            Shape::Falling { full, zero } => {
                if x <= full {
                    1.0
                } else if x > zero {
                    0.0
                } else {
                    1.0 - (x - full) / (zero - full)
                }
            }
            Shape::Rising { zero, full } => {
                if x <= zero {
                    0.0
                } else if x > full {
                    1.0
                } else {
                    (x - zero) / (full - zero)
                }
            }
            Shape::Plateau {
                rise_start,
                rise_end,
                fall_start,
                fall_end,
            } => {
                if x > rise_end && x <= fall_start {
                    1.0
                } else if x < rise_start || x > fall_end {
                    0.0
                } else if x <= rise_end {
                    (x - rise_start) / (rise_end - rise_start)
                } else {
                    1.0 - (x - fall_start) / (fall_end - fall_start)
                }
            }
        };

        degree.clamp(0.0, 1.0)
    }

    /// Breakpoints in the order they appear on the input axis.
    pub fn breakpoints(&self) -> Vec<f64> {
        match *self {
            Shape::Falling { full, zero } => vec![full, zero],
            Shape::Rising { zero, full } => vec![zero, full],
            Shape::Plateau {
                rise_start,
                rise_end,
                fall_start,
                fall_end,
            } => vec![rise_start, rise_end, fall_start, fall_end],
        }
    }
}

/// Low/Middle/High shapes for a single variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableTerms {
    pub low: Shape,
    pub middle: Shape,
    pub high: Shape,
}

impl VariableTerms {
    pub fn shape(&self, set: FuzzySet) -> &Shape {
        match set {
            FuzzySet::Low => &self.low,
            FuzzySet::Middle => &self.middle,
            FuzzySet::High => &self.high,
        }
    }

    pub fn fuzzify(&self, x: f64) -> MembershipVector {
        MembershipVector {
            low: self.low.evaluate(x),
            middle: self.middle.evaluate(x),
            high: self.high.evaluate(x),
        }
    }
}

/// The six membership functions used by the scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MembershipFunctions {
    pub income: VariableTerms,
    pub debt: VariableTerms,
}

impl MembershipFunctions {
    /// Breakpoints for income and debt in full currency units.
    pub const STANDARD: MembershipFunctions = MembershipFunctions {
        income: VariableTerms {
            low: Shape::Falling {
                full: 500.0,
                zero: 1000.0,
            },
            middle: Shape::Plateau {
                rise_start: 400.0,
                rise_end: 900.0,
                fall_start: 1200.0,
                fall_end: 1750.0,
            },
            high: Shape::Rising {
                zero: 1100.0,
                full: 1650.0,
            },
        },
        debt: VariableTerms {
            low: Shape::Falling {
                full: 15_000.0,
                zero: 35_000.0,
            },
            middle: Shape::Plateau {
                rise_start: 10_000.0,
                rise_end: 40_000.0,
                fall_start: 50_000.0,
                fall_end: 75_000.0,
            },
            high: Shape::Rising {
                zero: 45_000.0,
                full: 70_000.0,
            },
        },
    };

    pub fn terms(&self, variable: Variable) -> &VariableTerms {
        match variable {
            Variable::Income => &self.income,
            Variable::Debt => &self.debt,
        }
    }

    pub fn evaluate(&self, variable: Variable, set: FuzzySet, x: f64) -> f64 {
        self.terms(variable).shape(set).evaluate(x)
    }

    pub fn income_low(&self, income: f64) -> f64 {
        self.income.low.evaluate(income)
    }

    pub fn income_middle(&self, income: f64) -> f64 {
        self.income.middle.evaluate(income)
    }

    pub fn income_high(&self, income: f64) -> f64 {
        self.income.high.evaluate(income)
    }

    pub fn debt_low(&self, debt: f64) -> f64 {
        self.debt.low.evaluate(debt)
    }

    pub fn debt_middle(&self, debt: f64) -> f64 {
        self.debt.middle.evaluate(debt)
    }

    pub fn debt_high(&self, debt: f64) -> f64 {
        self.debt.high.evaluate(debt)
    }
}

impl Default for MembershipFunctions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Degrees of membership in (Low, Middle, High) for one variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MembershipVector {
    pub low: f64,
    pub middle: f64,
    pub high: f64,
}

impl MembershipVector {
    pub fn new(low: f64, middle: f64, high: f64) -> Self {
        Self { low, middle, high }
    }

    pub fn get(&self, set: FuzzySet) -> f64 {
        match set {
            FuzzySet::Low => self.low,
            FuzzySet::Middle => self.middle,
            FuzzySet::High => self.high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F: MembershipFunctions = MembershipFunctions::STANDARD;

    fn all_functions() -> Vec<(Variable, FuzzySet)> {
        [Variable::Income, Variable::Debt]
            .into_iter()
            .flat_map(|v| FuzzySet::ALL.into_iter().map(move |s| (v, s)))
            .collect()
    }

    #[test]
    fn test_outputs_stay_in_unit_interval() {
        let probes = [
            f64::MIN,
            -1e12,
            -1.0,
            0.0,
            399.999,
            400.0,
            900.0,
            1099.5,
            1750.0,
            9_999.0,
            45_000.0,
            57_500.0,
            75_000.0,
            1e12,
            f64::MAX,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ];
        for (variable, set) in all_functions() {
            for x in probes {
                let m = F.evaluate(variable, set, x);
                assert!(
                    (0.0..=1.0).contains(&m),
                    "{} {} at {} gave {}",
                    variable.name(),
                    set.name(),
                    x,
                    m
                );
            }
            // Dense sweep across both domains
            let mut x = -5_000.0;
            while x <= 120_000.0 {
                let m = F.evaluate(variable, set, x);
                assert!((0.0..=1.0).contains(&m));
                x += 37.5;
            }
        }
    }

    #[test]
    fn test_nan_has_no_membership() {
        for (variable, set) in all_functions() {
            assert_eq!(F.evaluate(variable, set, f64::NAN), 0.0);
        }
    }

    #[test]
    fn test_income_low_breakpoints() {
        assert_eq!(F.income_low(500.0), 1.0);
        assert_eq!(F.income_low(1000.0), 0.0);
        assert_eq!(F.income_low(750.0), 0.5);
        assert_eq!(F.income_low(-20.0), 1.0);
        assert_eq!(F.income_low(1000.5), 0.0);
    }

    #[test]
    fn test_income_middle_breakpoints() {
        assert_eq!(F.income_middle(400.0), 0.0);
        assert_eq!(F.income_middle(650.0), 0.5);
        assert_eq!(F.income_middle(900.0), 1.0);
        assert_eq!(F.income_middle(1000.0), 1.0);
        assert_eq!(F.income_middle(1200.0), 1.0);
        assert_eq!(F.income_middle(1475.0), 0.5);
        assert_eq!(F.income_middle(1750.0), 0.0);
        assert_eq!(F.income_middle(399.0), 0.0);
        assert_eq!(F.income_middle(1751.0), 0.0);
    }

    #[test]
    fn test_income_high_breakpoints() {
        assert_eq!(F.income_high(1100.0), 0.0);
        assert_eq!(F.income_high(1375.0), 0.5);
        assert_eq!(F.income_high(1650.0), 1.0);
        assert_eq!(F.income_high(5000.0), 1.0);
    }

    #[test]
    fn test_debt_breakpoints() {
        assert_eq!(F.debt_low(15_000.0), 1.0);
        assert_eq!(F.debt_low(25_000.0), 0.5);
        assert_eq!(F.debt_low(35_000.0), 0.0);

        assert_eq!(F.debt_middle(10_000.0), 0.0);
        assert_eq!(F.debt_middle(25_000.0), 0.5);
        assert_eq!(F.debt_middle(40_000.0), 1.0);
        assert_eq!(F.debt_middle(50_000.0), 1.0);
        assert_eq!(F.debt_middle(62_500.0), 0.5);
        assert_eq!(F.debt_middle(75_000.0), 0.0);

        assert_eq!(F.debt_high(45_000.0), 0.0);
        assert_eq!(F.debt_high(57_500.0), 0.5);
        assert_eq!(F.debt_high(70_000.0), 1.0);
    }

    #[test]
    fn test_fuzzify_orders_low_middle_high() {
        let v = F.income.fuzzify(1150.0);
        assert_eq!(v.low, 0.0);
        assert_eq!(v.middle, 1.0);
        assert!((v.high - 50.0 / 550.0).abs() < 1e-12);
        assert_eq!(v.get(FuzzySet::High), v.high);
    }

    #[test]
    fn test_breakpoints_are_listed_in_axis_order() {
        assert_eq!(
            F.income.middle.breakpoints(),
            vec![400.0, 900.0, 1200.0, 1750.0]
        );
        assert_eq!(F.debt.high.breakpoints(), vec![45_000.0, 70_000.0]);
    }
}
