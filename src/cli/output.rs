use colored::Colorize;
use std::fmt;

use pocketbook_domain::{
    parse_hex_color, BalanceSummary, CategoryCatalog, CategorySummary, MonthlySummary,
    TransactionKind,
};

use crate::app::HistoryEntry;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Success => text.bright_green().to_string(),
        MessageKind::Info => text,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn section(message: impl fmt::Display) {
    print(MessageKind::Section, message);
}

/// Colored block in the category's own color, or a plain bullet when the color is unreadable.
fn swatch(rgb: Option<(u8, u8, u8)>) -> String {
    match rgb {
        Some((r, g, b)) => "■".truecolor(r, g, b).to_string(),
        None => "•".to_string(),
    }
}

fn kind_label(kind: TransactionKind) -> String {
    match kind {
        TransactionKind::Income => "income".green().to_string(),
        TransactionKind::Expense => "expense".red().to_string(),
    }
}

pub fn history_lines(entries: &[HistoryEntry], catalog: &CategoryCatalog) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let record = &entry.record;
            let category = catalog
                .get(&record.category)
                .map(|found| format!("{} {}", swatch(found.rgb()), found.name))
                .unwrap_or_else(|| record.category.clone());
            format!(
                "{}  {:<24} {:>16}  {:<8} {}",
                entry.date_formatted,
                record.name,
                entry.amount_formatted,
                kind_label(record.kind),
                category
            )
        })
        .collect()
}

fn category_line(summary: &CategorySummary) -> String {
    format!(
        "{} {:<12} {:>16} {:>5}",
        swatch(parse_hex_color(&summary.color)),
        summary.name,
        summary.total_formatted,
        summary.percentage
    )
}

pub fn summary_lines(summary: &MonthlySummary) -> Vec<String> {
    if summary.is_empty() {
        return vec![format!("No expenses recorded for {}.", summary.month.label())];
    }
    let mut lines: Vec<String> = summary.categories.iter().map(category_line).collect();
    lines.push(format!("Total spent: {}", summary.total_formatted.bold()));
    lines
}

pub fn balance_lines(balance: &BalanceSummary) -> Vec<String> {
    let last = |date: Option<chrono::DateTime<chrono::Utc>>| match date {
        Some(date) => format!("last on {}", date.format("%Y-%m-%d")),
        None => "none recorded".to_string(),
    };
    let total = if balance.total < 0.0 {
        balance.total_formatted.red().to_string()
    } else {
        balance.total_formatted.green().to_string()
    };
    vec![
        format!(
            "Income:  {:>16}  ({})",
            balance.income_formatted,
            last(balance.last_income)
        ),
        format!(
            "Expense: {:>16}  ({})",
            balance.expense_formatted,
            last(balance.last_expense)
        ),
        format!("Total:   {:>16}", total),
    ]
}

pub fn catalog_lines(catalog: &CategoryCatalog) -> Vec<String> {
    catalog
        .iter()
        .map(|entry| format!("{} {:<12} {}", swatch(entry.rgb()), entry.key, entry.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocketbook_domain::YearMonth;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn empty_summary_names_the_month() {
        plain();
        let summary = MonthlySummary {
            month: YearMonth::new(2024, 3).unwrap(),
            categories: Vec::new(),
            total: 0.0,
            total_formatted: "$0.00".into(),
        };
        assert_eq!(
            summary_lines(&summary),
            vec!["No expenses recorded for March, 2024.".to_string()]
        );
    }

    #[test]
    fn catalog_lines_follow_catalog_order() {
        plain();
        let lines = catalog_lines(CategoryCatalog::standard());
        assert_eq!(lines.len(), 7);
        assert!(lines[0].contains("purchases"));
        assert!(lines[6].contains("Studies"));
    }

    #[test]
    fn unreadable_colors_fall_back_to_a_bullet() {
        plain();
        let catalog = CategoryCatalog::new(vec![
            pocketbook_domain::CategoryCatalogEntry::new("rent", "Rent", "slate"),
            pocketbook_domain::CategoryCatalogEntry::new("gym", "Gym", "#00AA55"),
        ])
        .unwrap();
        let lines = catalog_lines(&catalog);
        assert!(lines[0].starts_with("• "));
        assert!(lines[1].starts_with("■ "));
    }
}
