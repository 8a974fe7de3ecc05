//! Display and formatting utilities
//!
//! Locale-aware helpers consumed by the presentation layer. The
//! engines never format anything themselves.

use crate::types::Locale;
use rust_decimal::prelude::*;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format a TRY price for display
///
/// `tr` uses dot thousands and comma decimals (`₺74.999,00`), `en`
/// the inverse (`₺74,999.00`). Two decimal places, half-up.
pub fn format_price(price: f64, locale: Locale) -> String {
    let rounded = Decimal::from_f64(price)
        .unwrap_or_default()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let cents = (rounded.abs() * Decimal::from(100)).to_i64().unwrap_or(0);
    let sign = if rounded.is_sign_negative() && cents > 0 {
        "-"
    } else {
        ""
    };

    let (thousands_sep, decimal_sep) = match locale {
        Locale::Tr => ('.', ','),
        Locale::En => (',', '.'),
    };
    let whole = group_thousands(cents / 100, thousands_sep);
    format!("{sign}\u{20ba}{whole}{decimal_sep}{:02}", cents % 100)
}

fn group_thousands(n: i64, sep: char) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

/// Discount percentage of `current` relative to `original`, rounded
/// half-up; 0 when there is no discount
pub fn discount_percent(original_price: f64, current_price: f64) -> u32 {
    if original_price <= current_price || original_price <= 0.0 {
        return 0;
    }
    let original = Decimal::from_f64(original_price).unwrap_or_default();
    let current = Decimal::from_f64(current_price).unwrap_or_default();
    ((original - current) / original * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Build a URL-safe slug, folding Turkish characters to ASCII
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_dash = true; // suppress leading dash
    for c in text.chars() {
        let folded = match c {
            'ğ' | 'Ğ' => 'g',
            'ü' | 'Ü' => 'u',
            'ş' | 'Ş' => 's',
            'ı' | 'İ' => 'i',
            'ö' | 'Ö' => 'o',
            'ç' | 'Ç' => 'c',
            other => other,
        };
        let folded = folded.to_ascii_lowercase();
        if folded.is_ascii_alphanumeric() {
            slug.push(folded);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Truncate to `max_len` characters, appending `...` when shortened
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{}...", cut.trim_end())
}

/// Locale-prefixed product detail URL
pub fn product_url(slug: &str, locale: Locale) -> String {
    format!("/{locale}/product/{slug}")
}

/// Locale-prefixed category listing URL
pub fn category_url(slug: &str, locale: Locale) -> String {
    format!("/{locale}/category/{slug}")
}
