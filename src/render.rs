//! Plain-text table rendering for terminals.

use crate::models::{ViewCountry, ViewOptions};

const POP_COL: usize = 15;
const AREA_COL: usize = 14;
const REGION_COL: usize = 10;
const MIN_NAME_COL: usize = 12;

/// Truncate to at most `max_chars` characters, ending with a single ellipsis if cut.
pub fn truncate_to_width(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// `Found N countries` followed by one row per country.
///
/// `width` is the total line width to fit into; the name column absorbs the slack.
pub fn render_table(countries: &[ViewCountry], width: usize) -> String {
    let fixed = POP_COL + AREA_COL + REGION_COL + 3;
    let name_col = width.saturating_sub(fixed).max(MIN_NAME_COL);

    let mut out = String::new();
    out.push_str(&format!("Found {} countries\n", countries.len()));
    if countries.is_empty() {
        return out;
    }
    out.push_str(&format!(
        "{:<name_col$} {:>POP_COL$} {:>AREA_COL$} {:<REGION_COL$}\n",
        "Name", "Population", "Area (km²)", "Region"
    ));
    for c in countries {
        out.push_str(&format!(
            "{:<name_col$} {:>POP_COL$} {:>AREA_COL$} {:<REGION_COL$}\n",
            truncate_to_width(c.name(), name_col),
            c.display_population,
            c.display_area,
            truncate_to_width(&c.country.region, REGION_COL),
        ));
    }
    out
}

/// One-line summary of the active controls (region, status filters, sort, search).
pub fn describe_options(options: &ViewOptions) -> String {
    let mut parts = vec![
        format!("region: {}", options.region),
        format!("sort by: {}", options.sort_key),
    ];
    if options.show_un_member_only {
        parts.push("UN members only".into());
    }
    if options.show_independent_only {
        parts.push("independent only".into());
    }
    if !options.search_text.is_empty() {
        parts.push(format!("search: \"{}\"", options.search_text));
    }
    parts.join(" | ")
}
