use anyhow::Result;
use plotters::prelude::*;
use std::ops::Range;

use crate::scoring::{FuzzySet, MembershipFunctions, Shape, Variable};

pub const CURVE_SAMPLES: usize = 400;

/// Input range shown on the x axis for each variable.
pub fn plot_domain(variable: Variable) -> Range<f64> {
    match variable {
        Variable::Income => 0.0..2000.0,
        Variable::Debt => 0.0..100_000.0,
    }
}

fn set_color(set: FuzzySet) -> RGBColor {
    match set {
        FuzzySet::Low => RED,
        FuzzySet::Middle => GREEN,
        FuzzySet::High => BLUE,
    }
}

/// `samples` evenly spaced (x, membership) points over `domain`, both ends included.
pub fn curve_points(shape: &Shape, domain: Range<f64>, samples: usize) -> Vec<(f64, f64)> {
    if samples < 2 {
        return vec![(domain.start, shape.evaluate(domain.start))];
    }
    let step = (domain.end - domain.start) / (samples - 1) as f64;
    (0..samples)
        .map(|i| {
            let x = domain.start + step * i as f64;
            (x, shape.evaluate(x))
        })
        .collect()
}

/// Render Low/Middle/High membership curves for one variable as an SVG document.
pub fn render_membership_svg(
    functions: &MembershipFunctions,
    variable: Variable,
    size: u32,
) -> Result<String> {
    let domain = plot_domain(variable);
    let terms = functions.terms(variable);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (size, size)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} Membership Functions", variable.name()),
                ("sans-serif", 22),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(domain.clone(), 0.0..1.0)?;

        chart
            .configure_mesh()
            .x_desc(variable.name())
            .y_desc("Fuzz")
            .x_label_formatter(&|v: &f64| format!("{:.0}", v))
            .draw()?;

        for set in FuzzySet::ALL {
            let color = set_color(set);
            let points = curve_points(terms.shape(set), domain.clone(), CURVE_SAMPLES);
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))?
                .label(set.name())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
    }

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    const F: MembershipFunctions = MembershipFunctions::STANDARD;

    #[test]
    fn test_curve_covers_domain_ends() {
        let points = curve_points(&F.income.low, plot_domain(Variable::Income), 5);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], (0.0, 1.0));
        assert_eq!(points[2], (1000.0, 0.0));
        assert_eq!(points[4], (2000.0, 0.0));
    }

    #[test]
    fn test_curve_values_match_membership() {
        let shape = &F.debt.middle;
        for (x, y) in curve_points(shape, plot_domain(Variable::Debt), CURVE_SAMPLES) {
            assert_eq!(y, shape.evaluate(x));
            assert!((0.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn test_single_sample() {
        let points = curve_points(&F.income.high, 0.0..2000.0, 1);
        assert_eq!(points, vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_render_income_curves() {
        let svg = render_membership_svg(&F, Variable::Income, 320).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Income Membership Functions"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_render_debt_curves() {
        let svg = render_membership_svg(&F, Variable::Debt, 320).unwrap();
        assert!(svg.contains("Debt Membership Functions"));
    }
}
