use serde::Serialize;

/// A household read from the input table. Amounts are in full currency units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Household {
    pub id: String,
    pub income: f64,
    pub debt: f64,
}

impl Household {
    pub fn new(id: impl Into<String>, income: f64, debt: f64) -> Self {
        Self {
            id: id.into(),
            income,
            debt,
        }
    }
}
