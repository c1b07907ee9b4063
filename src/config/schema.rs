use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Run configuration.
///
/// Only controls where results go and how many are kept. The membership
/// breakpoints, rules and weights are fixed.
///
/// Example YAML:
/// ```yaml
/// input: households.csv
/// top_n: 20
/// output: ranked.csv
/// charts:
///   enabled: true
///   dir: charts
///   scatter_size: 1080
///   curve_size: 480
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Household CSV to read when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// Number of top-ranked households written to the output file
    pub top_n: usize,

    /// Ranked CSV output path
    pub output: PathBuf,

    pub charts: ChartConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            top_n: 20,
            output: PathBuf::from("ranked.csv"),
            charts: ChartConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub enabled: bool,
    pub dir: PathBuf,
    /// Width and height of the score chart in pixels
    pub scatter_size: u32,
    /// Width and height of each membership chart in pixels
    pub curve_size: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from("charts"),
            scatter_size: 1080,
            curve_size: 480,
        }
    }
}
