//! The country list pipeline: fetch a region, then shape it for display.
//!
//! Stage order is fixed: attach display fields, filter by independence, filter by
//! UN membership, sort by the chosen key, filter by search text. Every stage takes
//! ownership of the list and hands back a subset or a reordering; records
//! themselves are never modified.

use crate::api::DataSource;
use crate::error::FetchError;
use crate::format::{format_count, format_real};
use crate::models::{RawCountry, SortKey, ViewCountry, ViewOptions};
use std::cmp::Ordering;

/// Locale used for display fields when the caller does not pick one.
pub const DEFAULT_LOCALE: &str = "en";

/// Fetch the dataset for `options.region` and shape it.
///
/// ### Errors
/// Any failure of the data source. Nothing is retried.
pub fn build_view(
    source: &dyn DataSource,
    options: &ViewOptions,
    locale_tag: &str,
) -> Result<Vec<ViewCountry>, FetchError> {
    let raw = source.fetch_region(options.region).inspect_err(|e| {
        log::error!("{} ({} view)", e, options.region);
    })?;
    Ok(shape(raw, options, locale_tag))
}

/// Pure part of the pipeline; deterministic for a given input.
pub fn shape(raw: Vec<RawCountry>, options: &ViewOptions, locale_tag: &str) -> Vec<ViewCountry> {
    let total = raw.len();
    let mut list = attach_display(raw, locale_tag);
    if options.show_independent_only {
        list = filter_independent(list);
    }
    if options.show_un_member_only {
        list = filter_un_member(list);
    }
    sort_by_key(&mut list, options.sort_key);
    if !options.search_text.is_empty() {
        list = filter_search(list, &options.search_text);
    }
    log::debug!(
        "shaped {} of {} countries (sort={}, search={:?})",
        list.len(),
        total,
        options.sort_key,
        options.search_text
    );
    list
}

/// Format population and area once per fetch.
pub fn attach_display(raw: Vec<RawCountry>, locale_tag: &str) -> Vec<ViewCountry> {
    raw.into_iter()
        .map(|country| ViewCountry {
            display_population: format_count(country.population, locale_tag),
            display_area: format_real(country.area, locale_tag),
            country,
        })
        .collect()
}

pub fn filter_independent(mut list: Vec<ViewCountry>) -> Vec<ViewCountry> {
    list.retain(|c| c.country.is_independent());
    list
}

pub fn filter_un_member(mut list: Vec<ViewCountry>) -> Vec<ViewCountry> {
    list.retain(|c| c.country.un_member);
    list
}

/// Stable sort, descending by the numeric value; missing values go last.
pub fn sort_by_key(list: &mut [ViewCountry], key: SortKey) {
    match key {
        SortKey::Population => {
            list.sort_by(|a, b| desc_missing_last(a.country.population, b.country.population, u64::cmp))
        }
        SortKey::Area => {
            list.sort_by(|a, b| desc_missing_last(a.country.area, b.country.area, f64::total_cmp))
        }
    }
}

fn desc_missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&b, &a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Keep countries whose common name contains `text`, ignoring case.
pub fn filter_search(mut list: Vec<ViewCountry>, text: &str) -> Vec<ViewCountry> {
    let needle = text.to_lowercase();
    list.retain(|c| c.name().to_lowercase().contains(&needle));
    list
}
