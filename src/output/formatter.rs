use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::dataset::Household;
use crate::scoring::{Category, MembershipVector, ScoreBreakdown, ScoredHousehold};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Crisp value with two decimals for display
pub fn format_score(crisp_value: f64) -> String {
    format!("{:.2}", crisp_value)
}

/// Whole currency units, as in the exported CSV
pub fn format_amount(amount: f64) -> String {
    format!("{:.0}", amount)
}

fn paint_category(category: Category, text: &str, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match category {
        Category::Accepted => text.green().to_string(),
        Category::Considered => text.yellow().to_string(),
        Category::Rejected => text.red().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate an identifier to fit available width, accounting for Unicode
fn truncate_id(id: &str, max_width: usize) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= max_width {
        id.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format ranked households as a table: index, score, id, income, debt, category.
/// Index column is 1-based and right-aligned with a trailing dot.
pub fn format_ranked_table(ranked: &[ScoredHousehold], use_colors: bool) -> String {
    if ranked.is_empty() {
        return "No households to rank.".to_string();
    }

    let score_width = 6;
    let amount_width = 8;
    let separator = "  ";
    // "Considered" is the longest category label
    let category_width = 10;
    let fixed_width = 4 + score_width + amount_width * 2 + category_width + separator.len() * 5;

    let id_width = ranked
        .iter()
        .map(|s| s.household.id.chars().count())
        .max()
        .unwrap_or(0);
    let id_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 8 => id_width.min(width - fixed_width),
        Some(_) => id_width.min(8),
        None => id_width,
    };

    ranked
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>3}.", idx + 1);
            let score_str = format!(
                "{:>width$}",
                format_score(scored.crisp_value),
                width = score_width
            );
            let id = format!(
                "{:<width$}",
                truncate_id(&scored.household.id, id_width),
                width = id_width
            );
            let income = format!(
                "{:>width$}",
                format_amount(scored.household.income),
                width = amount_width
            );
            let debt = format!(
                "{:>width$}",
                format_amount(scored.household.debt),
                width = amount_width
            );
            let category = scored.category();

            let (index_str, score_str) = if use_colors {
                (index_str.dimmed().to_string(), score_str.bold().to_string())
            } else {
                (index_str, score_str)
            };

            [
                index_str,
                score_str,
                id,
                income,
                debt,
                paint_category(category, category.name(), use_colors),
            ]
            .join(separator)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked households as tab-separated values for scripting
/// Columns: rank, id, income, debt, crisp (no headers, no colors)
pub fn format_tsv(ranked: &[ScoredHousehold]) -> String {
    ranked
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            format!(
                "{}\t{}\t{}\t{}\t{:.6}",
                idx + 1,
                scored.household.id,
                format_amount(scored.household.income),
                format_amount(scored.household.debt),
                scored.crisp_value
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked households as a pretty-printed JSON array
pub fn format_json(ranked: &[ScoredHousehold]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(ranked)
}

fn format_memberships(label: &str, amount: f64, m: &MembershipVector) -> String {
    format!(
        "  {:<7} {:>10}  low {:.4}  middle {:.4}  high {:.4}",
        label,
        format_amount(amount),
        m.low,
        m.middle,
        m.high
    )
}

/// Multi-line breakdown of how one household was scored (for `explain`)
pub fn format_breakdown(
    household: &Household,
    breakdown: &ScoreBreakdown,
    rank: Option<usize>,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();

    let title = format!("Household {}", household.id);
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });
    lines.push(format_memberships("Income", household.income, &breakdown.income));
    lines.push(format_memberships("Debt", household.debt, &breakdown.debt));

    lines.push("  Rules:".to_string());
    for firing in &breakdown.firings {
        let rule = format!(
            "    {:<6} income, {:<6} debt -> {:<10} {:.4}",
            firing.income.name(),
            firing.debt.name(),
            firing.category.name(),
            firing.strength
        );
        if use_colors && firing.strength == 0.0 {
            lines.push(rule.dimmed().to_string());
        } else {
            lines.push(rule);
        }
    }

    let s = &breakdown.strengths;
    lines.push(format!(
        "  Strengths: accepted {:.4}  considered {:.4}  rejected {:.4}",
        s.accepted, s.considered, s.rejected
    ));

    match breakdown.crisp_value {
        Some(crisp) => {
            let category = s.dominant();
            lines.push(format!(
                "  Crisp: {:.6} ({})",
                crisp,
                paint_category(category, category.name(), use_colors)
            ));
        }
        None => lines.push("  Crisp: undefined (no rule fired)".to_string()),
    }

    if let Some(rank) = rank {
        lines.push(format!("  Rank: {}", rank));
    }

    lines.join("\n")
}
