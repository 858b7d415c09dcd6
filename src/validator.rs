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

use std::sync::Arc;

use crate::consts;
use crate::metadata::{Database, Descriptor, Metadata, DATABASE};
use crate::parser;
use crate::phone_number::{PhoneNumber, Type};

/// Check if the provided string is a viable phone number, per the MIN/FULL
/// grammar of the textual viability check: two bare digits, or three or more
/// digits (optionally led by a plus sign, optionally trailed by an
/// extension).
pub fn is_viable<S: AsRef<str>>(string: S) -> bool {
    let string = string.as_ref();

    if string.len() < consts::MIN_LENGTH_FOR_NSN {
        return false;
    }

    parser::valid::phone_number(string).is_ok()
}

/// Alias for [`is_viable`] under its public-API name.
pub fn is_viable_phone_number<S: AsRef<str>>(string: S) -> bool {
    is_viable(string)
}

/// Check if the phone number is valid, using the process-wide database.
pub fn is_valid_number(number: &PhoneNumber) -> bool {
    is_valid_number_with(&DATABASE, number)
}

/// Check if the phone number is valid with the given `Database`.
pub fn is_valid_number_with(database: &Database, number: &PhoneNumber) -> bool {
    let national = get_national_significant_number(number);
    let meta = try_opt!(false; resolve(database, number.country().code(), &national));

    get_number_type(&meta, &national) != Type::Unknown
}

/// Check if the phone number is valid for the given region, using the
/// process-wide database.
///
/// Per the source's "any non-null region is accepted" quirk, `region` is not
/// validated against a fixed enumeration: an unrecognized string simply
/// fails to match any metadata entry and the function returns `false`.
pub fn is_valid_number_for_region(number: &PhoneNumber, region: &str) -> bool {
    is_valid_number_for_region_with(&DATABASE, number, region)
}

/// Like [`is_valid_number_for_region`], but against an explicit `Database`.
pub fn is_valid_number_for_region_with(
    database: &Database,
    number: &PhoneNumber,
    region: &str,
) -> bool {
    let national = get_national_significant_number(number);

    let meta = try_opt!(false; database
        .by_code(&number.country().code())
        .and_then(|candidates| candidates.into_iter().find(|m| m.id() == region)));

    get_number_type(&meta, &national) != Type::Unknown
}

/// The region a phone number belongs to, or `None` if it cannot be
/// determined (e.g. the calling code is unassigned).
///
/// When several regions share a calling code, the first whose
/// `leading_digits` matches the national number wins; failing that, the
/// first region whose classification of the number is not
/// [`Type::Unknown`] wins.
pub fn get_region_code_for_number(number: &PhoneNumber) -> Option<String> {
    get_region_code_for_number_with(&DATABASE, number)
}

/// Like [`get_region_code_for_number`], but against an explicit `Database`.
pub fn get_region_code_for_number_with(database: &Database, number: &PhoneNumber) -> Option<String> {
    let national = get_national_significant_number(number);

    resolve(database, number.country().code(), &national).map(|meta| meta.id().to_owned())
}

/// The main region for a country calling code, or `"ZZ"` if the calling code
/// is unassigned.
pub fn get_region_code_for_country_code(code: u16) -> String {
    get_region_code_for_country_code_with(&DATABASE, code)
}

/// Like [`get_region_code_for_country_code`], but against an explicit
/// `Database`.
pub fn get_region_code_for_country_code_with(database: &Database, code: u16) -> String {
    database
        .region(&code)
        .and_then(|ids| ids.first().copied())
        .and_then(|id| database.by_id(id))
        .map(|meta| meta.id().to_owned())
        .unwrap_or_else(|| consts::UNKNOWN_REGION.to_owned())
}

/// The national significant number, with any Italian-style leading zeros
/// re-attached as text.
pub fn get_national_significant_number(number: &PhoneNumber) -> String {
    number.national().to_string()
}

/// The national dialing-prefix for a region, or `None` if it has none.
///
/// When `strip_non_digits` is set, a transform rule such as `03[12]` is
/// reduced to its literal digits; callers that only want something dialable
/// (rather than a regex fragment) should set this.
pub fn get_ndd_prefix_for_region(region: &str, strip_non_digits: bool) -> Option<String> {
    get_ndd_prefix_for_region_with(&DATABASE, region, strip_non_digits)
}

/// Like [`get_ndd_prefix_for_region`], but against an explicit `Database`.
pub fn get_ndd_prefix_for_region_with(
    database: &Database,
    region: &str,
    strip_non_digits: bool,
) -> Option<String> {
    let meta = database.by_id(region)?;
    let prefix = meta.national_prefix()?;

    if strip_non_digits {
        Some(prefix.chars().filter(|c| c.is_ascii_digit()).collect())
    } else {
        Some(prefix.to_owned())
    }
}

/// Whether a region allows a meaningful leading zero in its national
/// significant number (the "Italian leading zero" convention), looked up by
/// country calling code.
pub fn is_leading_zero_possible(code: u16) -> bool {
    is_leading_zero_possible_with(&DATABASE, code)
}

/// Like [`is_leading_zero_possible`], but against an explicit `Database`.
pub fn is_leading_zero_possible_with(database: &Database, code: u16) -> bool {
    database
        .region(&code)
        .and_then(|ids| ids.first().copied())
        .and_then(|id| database.by_id(id))
        .map(|meta| meta.leading_zero_possible())
        .unwrap_or(false)
}

/// Whether `region` belongs to the North American Numbering Plan.
pub fn is_nanpa_country(region: &str) -> bool {
    is_nanpa_country_with(&DATABASE, region)
}

/// Like [`is_nanpa_country`], but against an explicit `Database`.
pub fn is_nanpa_country_with(database: &Database, region: &str) -> bool {
    database
        .by_id(region)
        .map(|meta| meta.country_code() == consts::NANPA_COUNTRY_CODE as u16)
        .unwrap_or(false)
}

/// Find the metadata entry a national number resolves to among the regions
/// sharing a calling code: the sole entry when there is only one, else the
/// first whose `leading_digits` matches, else the first that classifies the
/// number as anything but [`Type::Unknown`].
pub(crate) fn resolve(database: &Database, code: u16, national: &str) -> Option<Arc<Metadata>> {
    let ids = database.region(&code)?;

    if ids.len() == 1 {
        return database.by_id(ids[0]);
    }

    for id in ids {
        let meta = database.by_id(id)?;

        if let Some(pattern) = meta.leading_digits() {
            if pattern.find(national).map(|m| m.start() == 0).unwrap_or(false) {
                return Some(meta);
            }
        } else if get_number_type(&meta, national) != Type::Unknown {
            return Some(meta);
        }
    }

    None
}

/// Classify a national significant number against a region's metadata.
///
/// Per §4.9: the descriptors are tried in declaration order
/// (premium-rate, toll-free, shared-cost, VoIP, personal-number, pager,
/// UAN, voicemail), then fixed-line/mobile, with
/// `same_mobile_and_fixed_line_pattern` (or an overlapping match) collapsing
/// to [`Type::FixedLineOrMobile`].
pub fn get_number_type(meta: &Metadata, value: &str) -> Type {
    if !meta.descriptors().general().is_match(value) {
        return Type::Unknown;
    }

    let matches = |desc: Option<&Descriptor>| desc.map(|d| d.is_match(value)).unwrap_or(false);

    if matches(meta.descriptors().premium_rate()) {
        return Type::PremiumRate;
    }

    if matches(meta.descriptors().toll_free()) {
        return Type::TollFree;
    }

    if matches(meta.descriptors().shared_cost()) {
        return Type::SharedCost;
    }

    if matches(meta.descriptors().voip()) {
        return Type::Voip;
    }

    if matches(meta.descriptors().personal_number()) {
        return Type::PersonalNumber;
    }

    if matches(meta.descriptors().pager()) {
        return Type::Pager;
    }

    if matches(meta.descriptors().uan()) {
        return Type::Uan;
    }

    if matches(meta.descriptors().voicemail()) {
        return Type::Voicemail;
    }

    if matches(meta.descriptors().fixed_line()) {
        if meta.same_mobile_and_fixed_line_pattern() || matches(meta.descriptors().mobile()) {
            return Type::FixedLineOrMobile;
        }

        return Type::FixedLine;
    }

    if matches(meta.descriptors().mobile()) {
        return Type::Mobile;
    }

    Type::Unknown
}
