use crate::domain::model::{BuildResult, Recommendation};

/// Formats a whole-unit price with thousands separators, e.g. `₱55,500`.
pub fn format_price(symbol: &str, amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", symbol, grouped)
}

pub fn render_build(symbol: &str, build: &BuildResult) -> String {
    let label_width = build
        .components
        .iter()
        .map(|item| item.slot_label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(build.components.len() + 6);
    for item in &build.components {
        lines.push(format!(
            "{:<width$}  {}  {}",
            item.slot_label,
            format_price(symbol, item.price),
            item.model,
            width = label_width
        ));
        if !item.reason.is_empty() {
            lines.push(format!("{:<width$}  {}", "", item.reason, width = label_width));
        }
    }
    lines.push(String::new());
    lines.push(format!("Total Cost: {}", format_price(symbol, build.total_cost)));
    lines.push(format!("Expected Performance: {}", build.performance));
    lines.push(format!("Notes: {}", build.notes));
    lines.join("\n")
}

pub fn render_recommendation(symbol: &str, recommendation: &Recommendation) -> String {
    format!(
        "Recommended PC Build ({})\n\n{}",
        recommendation.source,
        render_build(symbol, &recommendation.build)
    )
}
