use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Coarse geographic grouping used as the fetch scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    All,
    Americas,
    Antarctic,
    Africa,
    Asia,
    Europe,
    Oceania,
}

impl Region {
    /// Every selectable region, in display order.
    pub const ALL: [Region; 7] = [
        Region::All,
        Region::Americas,
        Region::Antarctic,
        Region::Africa,
        Region::Asia,
        Region::Europe,
        Region::Oceania,
    ];

    /// Path segment appended to the API base URL.
    ///
    /// Region names are case-insensitive upstream; `Antarctic` keeps its capital.
    pub fn to_path(&self) -> &'static str {
        match self {
            Region::All => "all",
            Region::Americas => "region/americas",
            Region::Antarctic => "region/Antarctic",
            Region::Africa => "region/africa",
            Region::Asia => "region/asia",
            Region::Europe => "region/europe",
            Region::Oceania => "region/oceania",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::All => "All Regions",
            Region::Americas => "Americas",
            Region::Antarctic => "Antarctic",
            Region::Africa => "Africa",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a region or sort key name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl FromStr for Region {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "all regions" | "world" => Ok(Region::All),
            "americas" => Ok(Region::Americas),
            "antarctic" | "antarctica" => Ok(Region::Antarctic),
            "africa" => Ok(Region::Africa),
            "asia" => Ok(Region::Asia),
            "europe" => Ok(Region::Europe),
            "oceania" => Ok(Region::Oceania),
            _ => Err(ParseOptionError {
                kind: "region",
                value: s.to_string(),
                expected: "all, americas, antarctic, africa, asia, europe, oceania",
            }),
        }
    }
}

/// Numeric field used to order the list (always descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Population,
    Area,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Population => f.write_str("Population"),
            SortKey::Area => f.write_str("Area"),
        }
    }
}

impl FromStr for SortKey {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "population" | "pop" => Ok(SortKey::Population),
            "area" => Ok(SortKey::Area),
            _ => Err(ParseOptionError {
                kind: "sort key",
                value: s.to_string(),
                expected: "population, area",
            }),
        }
    }
}

/// Everything that decides which countries are visible and in what order.
///
/// Treated as an immutable value: the `with_*` helpers return a modified copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewOptions {
    pub region: Region,
    pub show_independent_only: bool,
    pub show_un_member_only: bool,
    pub sort_key: SortKey,
    pub search_text: String,
}

impl ViewOptions {
    pub fn with_region(&self, region: Region) -> Self {
        Self { region, ..self.clone() }
    }

    pub fn with_independent_only(&self, on: bool) -> Self {
        Self { show_independent_only: on, ..self.clone() }
    }

    pub fn with_un_member_only(&self, on: bool) -> Self {
        Self { show_un_member_only: on, ..self.clone() }
    }

    pub fn with_sort_key(&self, sort_key: SortKey) -> Self {
        Self { sort_key, ..self.clone() }
    }

    pub fn with_search(&self, text: impl Into<String>) -> Self {
        Self { search_text: text.into(), ..self.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub png: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// One country record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCountry {
    pub name: CountryName,
    /// Some records encode population as a float; accept any non-negative number.
    #[serde(default, deserialize_with = "de_opt_u64_from_number")]
    pub population: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_area")]
    pub area: Option<f64>,
    /// Absent for a few disputed territories; treated as not independent.
    #[serde(default)]
    pub independent: Option<bool>,
    #[serde(default)]
    pub un_member: bool,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub ccn3: Option<String>,
    #[serde(default)]
    pub cca3: Option<String>,
}

impl RawCountry {
    pub fn is_independent(&self) -> bool {
        self.independent.unwrap_or(false)
    }

    /// Stable identity: `ccn3`, falling back to `cca3`, then the common name.
    pub fn key(&self) -> &str {
        self.ccn3
            .as_deref()
            .or(self.cca3.as_deref())
            .unwrap_or(&self.name.common)
    }
}

/// Serde helper: parse an optional non-negative integer from any JSON number.
fn de_opt_u64_from_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct OptU64Visitor;

    impl<'de> Visitor<'de> for OptU64Visitor {
        type Value = Option<u64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a non-negative number or null")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("negative population"));
            }
            Ok(Some(v as u64))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if !v.is_finite() || v < 0.0 {
                return Err(E::custom("population must be a finite non-negative number"));
            }
            Ok(Some(v.trunc() as u64))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(OptU64Visitor)
}

/// Serde helper: optional area in km², rejecting negative or non-finite values.
fn de_opt_area<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    match Option::<f64>::deserialize(deserializer)? {
        Some(v) if !v.is_finite() || v < 0.0 => Err(D::Error::custom(format!(
            "negative or non-finite area: {}",
            v
        ))),
        other => Ok(other),
    }
}

/// A country ready for display: the raw record plus formatted numbers.
///
/// The display strings are derived once per fetch and never used for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCountry {
    #[serde(flatten)]
    pub country: RawCountry,
    pub display_population: String,
    pub display_area: String,
}

impl ViewCountry {
    pub fn key(&self) -> &str {
        self.country.key()
    }

    pub fn name(&self) -> &str {
        &self.country.name.common
    }
}
