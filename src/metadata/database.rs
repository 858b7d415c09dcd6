// Copyright (C) 2017 1aim GmbH
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::consts;
use crate::error::MetadataError;
use crate::metadata::descriptor::{Descriptor, NA_PATTERN};
use crate::metadata::document::{RawDescriptor, RawDocument, RawNumberFormat, RawTerritory};
use crate::metadata::format::Format;
use crate::metadata::metadata::{Descriptors, Metadata};
use dashmap::DashMap;
use fnv::FnvHashMap;
use regex::Regex;
use std::sync::Arc;

/// A regex guaranteed to never match anything, used whenever the source
/// document is missing a pattern, or carries one that fails to compile.
const NEVER_MATCH: &str = r"[^\s\S]";

const METADATA_XML: &str = include_str!("../../assets/metadata.xml");

lazy_static! {
    /// The process-wide, lazily-compiled metadata database, built from the
    /// bundled document.
    pub static ref DEFAULT: Database =
        Database::from_document(METADATA_XML).expect("bundled metadata document must parse");
}

/// The key a territory is addressed by: its region code, or, for
/// non-geographical entities (which all share the literal id "001"), its
/// country calling code, so several such entities can coexist.
fn territory_key(territory: &RawTerritory) -> String {
    if territory.id == consts::REGION_CODE_FOR_NON_GEO_ENTITY {
        territory.country_code.to_string()
    } else {
        territory.id.clone()
    }
}

/// Region (or non-geographical calling-code) keys sharing a country calling
/// code, main country first.
fn by_code(document: &RawDocument) -> FnvHashMap<u16, Vec<String>> {
    let mut map: FnvHashMap<u16, Vec<String>> = FnvHashMap::default();

    for territory in &document.territories.territory {
        let key = territory_key(territory);
        let list = map.entry(territory.country_code).or_insert_with(Vec::new);

        if territory.main_country_for_code {
            list.insert(0, key);
        } else {
            list.push(key);
        }
    }

    map
}

/// A lazily-compiled view of region metadata, built from a metadata
/// document's raw bytes — the "thin adapter" of §1, which this crate treats
/// as an opaque external input.
///
/// Parsing the document happens once, at construction. Compiling a
/// territory's regexes is comparatively expensive, so that step is deferred
/// further still, to the first time that specific territory is asked for;
/// the result is memoized for the life of the `Database`.
pub struct Database {
    document: RawDocument,
    by_code: FnvHashMap<u16, Vec<String>>,
    cache: DashMap<String, Arc<Metadata>>,
}

impl Database {
    /// Parse a metadata document's raw text and build a `Database` from it.
    ///
    /// No regexes are compiled yet; that happens lazily per region in
    /// [`Database::by_id`]. Returns [`MetadataError::Malformed`] if the
    /// document does not have the `phoneNumberMetadata.territories.territory[]`
    /// shape described in §4.11.
    pub fn from_document(xml: &str) -> Result<Self, MetadataError> {
        let document: RawDocument = quick_xml::de::from_str(xml)?;
        let by_code = by_code(&document);

        Ok(Database {
            document,
            by_code,
            cache: DashMap::new(),
        })
    }

    /// Metadata for a 2-letter region code, or, for a non-geographical
    /// entity, its country calling code as a string (e.g. `"800"`).
    pub fn by_id(&self, id: &str) -> Option<Arc<Metadata>> {
        if let Some(existing) = self.cache.get(id) {
            return Some(existing.clone());
        }

        let territory = self
            .document
            .territories
            .territory
            .iter()
            .find(|t| territory_key(t) == id)?;

        Some(
            self.cache
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(compile(territory)))
                .clone(),
        )
    }

    /// All metadata entries sharing a country calling code, main region
    /// first.
    pub fn by_code(&self, code: &u16) -> Option<Vec<Arc<Metadata>>> {
        let ids = self.by_code.get(code)?;
        let compiled: Vec<_> = ids.iter().filter_map(|id| self.by_id(id)).collect();

        if compiled.is_empty() {
            None
        } else {
            Some(compiled)
        }
    }

    /// The region (or non-geo) keys sharing a country calling code.
    pub fn region(&self, code: &u16) -> Option<Vec<&str>> {
        self.by_code
            .get(code)
            .map(|ids| ids.iter().map(String::as_str).collect())
    }
}

fn compile_regex(pattern: Option<&str>) -> Regex {
    match pattern {
        Some(p) if p != NA_PATTERN && !p.is_empty() && !p.contains("|)") => {
            Regex::new(p).unwrap_or_else(|_| Regex::new(NEVER_MATCH).unwrap())
        }
        _ => Regex::new(NEVER_MATCH).unwrap(),
    }
}

/// Like [`compile_regex`], but anchors the pattern so matching behaves like
/// Java's `Matcher.matches()` rather than `regex::Regex`'s leftmost-first
/// `find()`. Without this, an alternation of unequal-length branches (e.g.
/// `\d{7}|\d{10}`) matches only its first, shorter branch, so a full 10-digit
/// number would otherwise report a 7-digit partial match.
fn compile_full_regex(pattern: Option<&str>) -> Regex {
    match pattern {
        Some(p) if p != NA_PATTERN && !p.is_empty() && !p.contains("|)") => {
            Regex::new(&format!("^(?:{})$", p)).unwrap_or_else(|_| Regex::new(NEVER_MATCH).unwrap())
        }
        _ => Regex::new(NEVER_MATCH).unwrap(),
    }
}

fn compile_descriptor(raw: &RawDescriptor) -> Descriptor {
    let national_number = compile_full_regex(raw.national_number_pattern.as_deref());
    let possible_number = compile_full_regex(
        raw.possible_number_pattern
            .as_deref()
            .or(raw.national_number_pattern.as_deref()),
    );

    Descriptor {
        national_number,
        possible_number,
        example: raw.example_number.clone(),
    }
}

fn compile_format(
    raw: &RawNumberFormat,
    territory: &RawTerritory,
    international: bool,
) -> Option<Format> {
    if international && raw.intl_format.as_deref() == Some(NA_PATTERN) {
        return None;
    }

    let pattern = Regex::new(&raw.pattern).ok()?;

    let format = if international {
        raw.intl_format.clone().unwrap_or_else(|| raw.format.clone())
    } else {
        raw.format.clone()
    };

    let leading_digits = raw
        .leading_digits
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect();

    let national_prefix = raw
        .national_prefix_formatting_rule
        .clone()
        .or_else(|| territory.national_prefix_formatting_rule.clone());

    let domestic_carrier = raw
        .carrier_code_formatting_rule
        .clone()
        .or_else(|| territory.carrier_code_formatting_rule.clone());

    Some(Format {
        pattern,
        format,
        leading_digits,
        national_prefix,
        national_prefix_optional: raw.national_prefix_optional_when_formatting,
        domestic_carrier,
    })
}

fn compile(territory: &RawTerritory) -> Metadata {
    let descriptors = Descriptors {
        general: compile_descriptor(&territory.general_desc),
        fixed_line: territory.fixed_line.as_ref().map(compile_descriptor),
        mobile: territory.mobile.as_ref().map(compile_descriptor),
        toll_free: territory.toll_free.as_ref().map(compile_descriptor),
        premium_rate: territory.premium_rate.as_ref().map(compile_descriptor),
        shared_cost: territory.shared_cost.as_ref().map(compile_descriptor),
        personal_number: territory.personal_number.as_ref().map(compile_descriptor),
        voip: territory.voip.as_ref().map(compile_descriptor),
        pager: territory.pager.as_ref().map(compile_descriptor),
        uan: territory.uan.as_ref().map(compile_descriptor),
        emergency: territory.emergency.as_ref().map(compile_descriptor),
        voicemail: territory.voicemail.as_ref().map(compile_descriptor),
        short_code: territory.short_code.as_ref().map(compile_descriptor),
        standard_rate: territory.standard_rate.as_ref().map(compile_descriptor),
        carrier: territory.carrier.as_ref().map(compile_descriptor),
        no_international: territory.no_international.as_ref().map(compile_descriptor),
    };

    let same_mobile_and_fixed_line_pattern = match (&territory.fixed_line, &territory.mobile) {
        (Some(fixed), Some(mobile)) => {
            fixed.national_number_pattern.is_some()
                && fixed.national_number_pattern == mobile.national_number_pattern
        }
        _ => false,
    };

    let formats: Vec<Format> = territory
        .available_formats
        .as_ref()
        .map(|formats| {
            formats
                .number_format
                .iter()
                .filter_map(|nf| compile_format(nf, territory, false))
                .collect()
        })
        .unwrap_or_default();

    let has_intl_formats = territory
        .available_formats
        .as_ref()
        .map(|formats| {
            formats
                .number_format
                .iter()
                .any(|nf| nf.intl_format.is_some())
        })
        .unwrap_or(false);

    let international_formats: Vec<Format> = if has_intl_formats {
        territory
            .available_formats
            .as_ref()
            .map(|formats| {
                formats
                    .number_format
                    .iter()
                    .filter_map(|nf| compile_format(nf, territory, true))
                    .collect()
            })
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    Metadata {
        descriptors,
        id: territory.id.clone(),
        country_code: territory.country_code,

        international_prefix: territory
            .international_prefix
            .as_deref()
            .map(|p| compile_regex(Some(p))),
        preferred_international_prefix: territory.preferred_international_prefix.clone(),
        national_prefix: territory.national_prefix.clone(),
        preferred_extension_prefix: territory.preferred_extn_prefix.clone(),
        national_prefix_for_parsing: territory
            .national_prefix_for_parsing
            .as_deref()
            .map(|p| compile_regex(Some(p))),
        national_prefix_transform_rule: territory.national_prefix_transform_rule.clone(),

        formats,
        international_formats,
        main_country_for_code: territory.main_country_for_code,
        leading_digits: territory
            .leading_digits
            .as_deref()
            .map(|p| compile_regex(Some(p))),
        mobile_number_portable: territory.mobile_number_portable_region,

        leading_zero_possible: territory.leading_zero_possible,
        same_mobile_and_fixed_line_pattern,
    }
}

#[cfg(test)]
mod test {
    use super::DEFAULT;

    #[test]
    fn compiles_lazily_and_memoizes() {
        let us = DEFAULT.by_id("US").unwrap();
        assert_eq!(us.country_code(), 1);
        assert!(us.descriptors().general().is_match("6502530000"));

        let us_again = DEFAULT.by_id("US").unwrap();
        assert!(std::sync::Arc::ptr_eq(&us, &us_again));
    }

    #[test]
    fn shares_calling_code_across_regions() {
        let regions = DEFAULT.by_code(&1).unwrap();
        assert!(regions.len() >= 3);
    }

    #[test]
    fn disambiguates_non_geo_entities_by_calling_code() {
        let toll_free = DEFAULT.by_id("800").unwrap();
        assert_eq!(toll_free.country_code(), 800);

        let premium = DEFAULT.by_id("979").unwrap();
        assert_eq!(premium.country_code(), 979);
    }

    #[test]
    fn unknown_region_is_absent() {
        assert!(DEFAULT.by_id("ZZ").is_none());
    }

    #[test]
    fn from_document_rejects_malformed_xml() {
        assert!(matches!(
            super::Database::from_document("<not-a-metadata-document/>"),
            Err(crate::error::MetadataError::Malformed(_))
        ));
    }

    #[test]
    fn from_document_rebuilds_an_equivalent_database() {
        let xml = include_str!("../../assets/metadata.xml");
        let db = super::Database::from_document(xml).unwrap();

        let us = db.by_id("US").unwrap();
        assert_eq!(us.country_code(), 1);
        assert_eq!(db.by_code(&1).unwrap().len(), DEFAULT.by_code(&1).unwrap().len());
    }
}
