pub mod curves;
pub mod scatter;

pub use curves::{curve_points, plot_domain, render_membership_svg};
pub use scatter::{bubbles, render_scatter_svg, Bubble};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::scoring::{MembershipFunctions, ScoredHousehold, Variable};

pub const SCATTER_FILE: &str = "scores.svg";
pub const INCOME_CURVES_FILE: &str = "income_membership.svg";
pub const DEBT_CURVES_FILE: &str = "debt_membership.svg";

/// Pixel sizes for the rendered charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSizes {
    pub scatter: u32,
    pub curves: u32,
}

/// Write an SVG document to `path` atomically.
pub fn save_svg(path: &Path, svg: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(svg.as_bytes())
        .with_context(|| format!("Failed to write chart {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save chart {}", path.display()))?;
    debug!(path = %path.display(), "saved chart");
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create chart directory {}", dir.display()))
}

/// Render both membership-curve charts into `dir`.
pub fn render_curve_charts(
    dir: &Path,
    functions: &MembershipFunctions,
    size: u32,
) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;

    let mut written = Vec::new();
    for (variable, file_name) in [
        (Variable::Income, INCOME_CURVES_FILE),
        (Variable::Debt, DEBT_CURVES_FILE),
    ] {
        let path = dir.join(file_name);
        let svg = render_membership_svg(functions, variable, size)
            .with_context(|| format!("Failed to render {} membership chart", variable.name()))?;
        save_svg(&path, &svg)?;
        written.push(path);
    }
    Ok(written)
}

/// Render the score scatter chart and both membership-curve charts into `dir`.
pub fn render_all(
    dir: &Path,
    ranked: &[ScoredHousehold],
    functions: &MembershipFunctions,
    sizes: ChartSizes,
) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;

    let scatter_path = dir.join(SCATTER_FILE);
    let svg = render_scatter_svg(ranked, sizes.scatter).context("Failed to render score chart")?;
    save_svg(&scatter_path, &svg)?;

    let mut written = vec![scatter_path];
    written.extend(render_curve_charts(dir, functions, sizes.curves)?);
    Ok(written)
}
