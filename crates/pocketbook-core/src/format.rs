/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

/// Locale-aware number conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub symbol_position: SymbolPosition,
    pub symbol_spacing: bool,
}

impl LocaleConfig {
    /// Conventions for a BCP 47 tag such as `pt-BR`. Unknown tags use `en-US` conventions.
    pub fn for_tag(tag: &str) -> Self {
        let normalized = tag.trim().replace('_', "-");
        let (decimal, grouping, position, spacing) = match normalized.to_ascii_lowercase().as_str()
        {
            "pt-br" => (',', '.', SymbolPosition::Prefix, true),
            "de-de" | "es-es" | "it-it" => (',', '.', SymbolPosition::Suffix, true),
            "fr-fr" => (',', ' ', SymbolPosition::Suffix, true),
            _ => ('.', ',', SymbolPosition::Prefix, false),
        };
        Self {
            language_tag: normalized,
            decimal_separator: decimal,
            grouping_separator: grouping,
            symbol_position: position,
            symbol_spacing: spacing,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("en-US")
    }
}

/// Renders amounts in one currency using one locale's conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCurrencyFormatter {
    locale: LocaleConfig,
    symbol: String,
    precision: u8,
}

impl LocaleCurrencyFormatter {
    pub fn new(locale_tag: &str, currency_code: &str) -> Self {
        Self::with_locale(LocaleConfig::for_tag(locale_tag), currency_code)
    }

    pub fn with_locale(locale: LocaleConfig, currency_code: &str) -> Self {
        let code = currency_code.trim().to_uppercase();
        Self {
            locale,
            symbol: symbol_for(&code),
            precision: minor_units_for(&code),
        }
    }
}

impl Default for LocaleCurrencyFormatter {
    fn default() -> Self {
        Self::new("en-US", "USD")
    }
}

impl CurrencyFormatter for LocaleCurrencyFormatter {
    fn format_amount(&self, amount: f64) -> String {
        let body = format_number(&self.locale, amount.abs(), self.precision);
        let negative = amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0');
        let spacer = if self.locale.symbol_spacing { " " } else { "" };
        let formatted = match self.locale.symbol_position {
            SymbolPosition::Prefix => format!("{}{}{}", self.symbol, spacer, body),
            SymbolPosition::Suffix => format!("{}{}{}", body, spacer, self.symbol),
        };
        if negative {
            format!("-{formatted}")
        } else {
            formatted
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "BRL" => "R$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Formats a non-negative value with the locale's separators, rounded to `precision` digits.
pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    match body.split_once('.') {
        Some((int_part, fraction)) => format!(
            "{}{}{}",
            group_digits(int_part, locale.grouping_separator),
            locale.decimal_separator,
            fraction
        ),
        None => group_digits(&body, locale.grouping_separator),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_us_dollars() {
        let formatter = LocaleCurrencyFormatter::default();
        assert_eq!(formatter.format_amount(1234.5), "$1,234.50");
        assert_eq!(formatter.format_amount(-500.0), "-$500.00");
        assert_eq!(formatter.format_amount(0.0), "$0.00");
        assert_eq!(formatter.format_amount(1_000_000.99), "$1,000,000.99");
    }

    #[test]
    fn formats_brazilian_reais() {
        let formatter = LocaleCurrencyFormatter::new("pt_BR", "brl");
        assert_eq!(formatter.format_amount(1234.5), "R$ 1.234,50");
        assert_eq!(formatter.format_amount(150.0), "R$ 150,00");
    }

    #[test]
    fn formats_suffix_locales_and_zero_precision_currencies() {
        let euros = LocaleCurrencyFormatter::new("fr-FR", "EUR");
        assert_eq!(euros.format_amount(1234.5), "1 234,50 €");
        let yen = LocaleCurrencyFormatter::new("en-US", "JPY");
        assert_eq!(yen.format_amount(1234.4), "¥1,234");
    }

    #[test]
    fn tiny_negative_amounts_do_not_render_a_sign() {
        let formatter = LocaleCurrencyFormatter::default();
        assert_eq!(formatter.format_amount(-0.001), "$0.00");
    }
}
