use anyhow::Result;
use plotters::prelude::*;

use crate::scoring::ScoredHousehold;

pub const MIN_BUBBLE_RADIUS: f64 = 3.0;
pub const MAX_BUBBLE_RADIUS: f64 = 20.0;

/// A household placed on the (income, debt) plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub income: f64,
    pub debt: f64,
    pub crisp_value: f64,
    pub radius: f64,
    pub color: (u8, u8, u8),
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |acc, v| match acc {
            None => Some(Bounds { min: v, max: v }),
            Some(b) => Some(Bounds {
                min: b.min.min(v),
                max: b.max.max(v),
            }),
        })
    }

    /// Position of `v` within the bounds, 0.5 when the range is empty
    fn normalize(&self, v: f64) -> f64 {
        if self.max > self.min {
            (v - self.min) / (self.max - self.min)
        } else {
            0.5
        }
    }

    fn padded(&self, fallback: (f64, f64)) -> (f64, f64) {
        if self.max > self.min {
            let pad = (self.max - self.min) * 0.05;
            ((self.min - pad).max(0.0), self.max + pad)
        } else if self.max > 0.0 {
            (0.0, self.max * 1.1)
        } else {
            fallback
        }
    }
}

fn channel(base: f64, span: f64, t: f64) -> u8 {
    (base + span * t).round().clamp(0.0, 255.0) as u8
}

/// Bubbles for every household, smallest score first so large bubbles are drawn under small ones.
///
/// Radius grows linearly with the crisp value across the observed score
/// range. Colour channels are offset by the normalised coordinates.
pub fn bubbles(ranked: &[ScoredHousehold]) -> Vec<Bubble> {
    let (Some(xs), Some(ys), Some(zs)) = (
        Bounds::of(ranked.iter().map(|s| s.household.income)),
        Bounds::of(ranked.iter().map(|s| s.household.debt)),
        Bounds::of(ranked.iter().map(|s| s.crisp_value)),
    ) else {
        return Vec::new();
    };

    let mut bubbles: Vec<Bubble> = ranked
        .iter()
        .map(|s| {
            let nx = xs.normalize(s.household.income);
            let ny = ys.normalize(s.household.debt);
            let nz = zs.normalize(s.crisp_value);
            Bubble {
                income: s.household.income,
                debt: s.household.debt,
                crisp_value: s.crisp_value,
                radius: MIN_BUBBLE_RADIUS + nz * (MAX_BUBBLE_RADIUS - MIN_BUBBLE_RADIUS),
                color: (
                    channel(190.0, 65.0, nx),
                    channel(128.0, 127.0, ny),
                    channel(0.0, 255.0, nz),
                ),
            }
        })
        .collect();

    bubbles.sort_by(|a, b| a.crisp_value.total_cmp(&b.crisp_value));
    bubbles
}

/// Render the score bubble chart as an SVG document.
pub fn render_scatter_svg(ranked: &[ScoredHousehold], size: u32) -> Result<String> {
    let points = bubbles(ranked);
    let x_range = Bounds::of(points.iter().map(|b| b.income))
        .map(|b| b.padded((0.0, 2000.0)))
        .unwrap_or((0.0, 2000.0));
    let y_range = Bounds::of(points.iter().map(|b| b.debt))
        .map(|b| b.padded((0.0, 100_000.0)))
        .unwrap_or((0.0, 100_000.0));

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (size, size)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Fuzzy Logic BLT Forecast", ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

        chart
            .configure_mesh()
            .x_desc("Income")
            .y_desc("Debt")
            .x_label_formatter(&|v: &f64| format!("{:.0}", v))
            .y_label_formatter(&|v: &f64| format!("{:.0}", v))
            .draw()?;

        chart
            .draw_series(points.iter().map(|b| {
                let (r, g, bl) = b.color;
                Circle::new(
                    (b.income, b.debt),
                    b.radius,
                    RGBColor(r, g, bl).mix(0.85).filled(),
                )
            }))?
            .label("The bigger the circle, the bigger the value")
            .legend(|(x, y)| Circle::new((x, y), 6, RGBColor(190, 128, 128).filled()));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
    }

    Ok(svg)
}
