//! Locale-aware number formatting for display columns.

use num_format::{Locale, ToFormattedString};

/// Text shown in place of a missing number.
pub const NOT_AVAILABLE: &str = "N/A";

/// Fraction digits kept for real values (matches the browser default of `toLocaleString`).
const MAX_FRACTION_DIGITS: usize = 3;

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().replace('-', "_").as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Group an integer count, e.g. `67000000` -> `67,000,000` for `en`.
pub fn format_count(value: Option<u64>, locale_tag: &str) -> String {
    match value {
        Some(v) => {
            let (locale, _) = map_locale(locale_tag);
            v.to_formatted_string(locale)
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Group a real value keeping up to three fraction digits, trailing zeros trimmed.
///
/// `551695.0` -> `551,695`, `0.44` -> `0.44`, `1234.5678` -> `1,234.568` (for `en`).
pub fn format_real(value: Option<f64>, locale_tag: &str) -> String {
    let v = match value {
        Some(v) if v.is_finite() => v,
        _ => return NOT_AVAILABLE.to_string(),
    };
    let (locale, decimal) = map_locale(locale_tag);

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if v < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    match int_part.parse::<u64>() {
        Ok(n) => out.push_str(&n.to_formatted_string(locale)),
        Err(_) => out.push_str(int_part),
    }
    if !frac.is_empty() {
        out.push(decimal);
        out.push_str(frac);
    }
    out
}
