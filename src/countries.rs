//! Analysis of countries API payloads.
//!
//! The assertion steps delegate here so the count and language checks can be
//! exercised against canned payloads without touching the network. Functions
//! take the parsed JSON body as-is and return descriptive [`Error`] values on
//! mismatch; they never panic on absent optional properties.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::config::CountryCounts;
use crate::error::{Error, Result};

/// South Africa's eleven official languages plus South African Sign Language,
/// keyed by ISO 639 code.
pub const EXPECTED_LANGUAGES: [(&str, &str); 12] = [
    ("afr", "Afrikaans"),
    ("eng", "English"),
    ("nbl", "South Ndebele"),
    ("nso", "Northern Sotho"),
    ("sot", "Southern Sotho"),
    ("ssw", "Swati"),
    ("tsn", "Tswana"),
    ("tso", "Tsonga"),
    ("ven", "Venda"),
    ("xho", "Xhosa"),
    ("zul", "Zulu"),
    ("sfs", "South African Sign Language"),
];

/// Counts derived from the all-countries payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountrySummary {
    /// Entities in the payload, including territories and dependencies.
    pub total: usize,
    /// Entities flagged `unMember: true`.
    pub un_members: usize,
    /// Entities flagged `independent: true`.
    pub independent: usize,
}

fn as_country_array(data: &Value) -> Result<&Vec<Value>> {
    data.as_array().ok_or_else(|| {
        Error::assertion("countries payload", "a JSON array", value_kind(data))
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a JSON array",
        Value::Object(_) => "a JSON object",
    }
}

fn flag_is_true(country: &Value, flag: &str) -> bool {
    country.get(flag).and_then(Value::as_bool).unwrap_or(false)
}

/// Tally the payload into a [`CountrySummary`].
///
/// # Errors
///
/// Returns an assertion error when the payload is not an array.
pub fn summarize(data: &Value) -> Result<CountrySummary> {
    let countries = as_country_array(data)?;
    Ok(CountrySummary {
        total: countries.len(),
        un_members: countries.iter().filter(|c| flag_is_true(c, "unMember")).count(),
        independent: countries
            .iter()
            .filter(|c| flag_is_true(c, "independent"))
            .count(),
    })
}

/// Check the summary against the configured thresholds.
///
/// The API returns more entities than the official sovereign-state count, so
/// the total is required to exceed it while the UN-member and independent
/// counts must each meet their minimum.
///
/// # Errors
///
/// Returns an [`Error::Assertion`] carrying the violated bound and the
/// observed value.
pub fn check_counts(summary: CountrySummary, expected: CountryCounts) -> Result<()> {
    if summary.un_members < expected.min_un_members {
        return Err(Error::assertion(
            "UN member count",
            format!(">= {}", expected.min_un_members),
            summary.un_members,
        ));
    }
    if summary.independent < expected.min_independent {
        return Err(Error::assertion(
            "independent country count",
            format!(">= {}", expected.min_independent),
            summary.independent,
        ));
    }
    if summary.total <= expected.sovereign_states {
        return Err(Error::assertion(
            "total entity count",
            format!("> {}", expected.sovereign_states),
            summary.total,
        ));
    }
    Ok(())
}

/// Extract the `languages` map of the payload's country record.
///
/// Alpha-code lookups answer with a single-element array; a bare object is
/// accepted for robustness against API revisions.
///
/// # Errors
///
/// Returns an assertion error when no country record or `languages` property
/// is present.
pub fn languages_of(data: &Value) -> Result<BTreeMap<String, String>> {
    let record = match data {
        Value::Array(items) => items
            .first()
            .ok_or_else(|| Error::assertion("country lookup", "one country record", "an empty array"))?,
        other => other,
    };
    let languages = record
        .get("languages")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            Error::assertion("country record", "a `languages` object", "no such property")
        })?;
    Ok(languages
        .iter()
        .map(|(code, name)| {
            (
                code.clone(),
                name.as_str().unwrap_or_default().to_owned(),
            )
        })
        .collect())
}

/// Expected language codes found in the payload, in table order.
#[must_use]
pub fn found_languages(languages: &BTreeMap<String, String>) -> Vec<&'static str> {
    EXPECTED_LANGUAGES
        .iter()
        .filter(|(code, _)| languages.contains_key(*code))
        .map(|(code, _)| *code)
        .collect()
}

/// Whether South African Sign Language is recognised in the language map.
///
/// SASL may appear under its own `sfs` code or under a descriptive name, so
/// both are checked.
#[must_use]
pub fn has_sasl(languages: &BTreeMap<String, String>) -> bool {
    languages.contains_key("sfs")
        || languages.values().any(|name| {
            let name = name.to_lowercase();
            name.contains("sign") && name.contains("south africa")
        })
}

/// Count entities per continent, sorted by continent name.
#[must_use]
pub fn continent_counts(data: &Value) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    let Some(countries) = data.as_array() else {
        return counts;
    };
    for country in countries {
        let Some(continents) = country.get("continents").and_then(Value::as_array) else {
            continue;
        };
        for continent in continents.iter().filter_map(Value::as_str) {
            *counts.entry(continent.to_owned()).or_insert(0) += 1;
        }
    }
    counts
}

/// Common names of up to `limit` non-UN-member entities in the payload.
#[must_use]
pub fn non_un_member_examples(data: &Value, limit: usize) -> Vec<String> {
    let Some(countries) = data.as_array() else {
        return Vec::new();
    };
    countries
        .iter()
        .filter(|c| !flag_is_true(c, "unMember"))
        .filter_map(|c| c.pointer("/name/common").and_then(Value::as_str))
        .take(limit)
        .map(str::to_owned)
        .collect()
}
