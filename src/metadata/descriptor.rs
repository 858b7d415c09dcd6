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

use regex::Regex;

/// A missing descriptor type or pattern collapses to this sentinel, which
/// matches nothing.
pub(crate) const NA_PATTERN: &str = "NA";

#[derive(Clone, Debug)]
pub struct Descriptor {
    /// The national_number_pattern is the pattern that a valid national
    /// significant number would match. This specifies information such as its
    /// total length and leading digits.
    pub(crate) national_number: Regex,

    /// The possible_number_pattern represents what a potentially valid phone
    /// number for this region may be written as. This is a superset of the
    /// national_number_pattern above and includes numbers that have the area
    /// code omitted. Typically the only restrictions here are in the number
    /// of digits.
    pub(crate) possible_number: Regex,

    /// An example national significant number for the specific type. It
    /// should not contain any formatting information.
    pub(crate) example: Option<String>,
}

impl Descriptor {
    /// The regex matched against a national significant number.
    pub fn national_number_pattern(&self) -> &Regex {
        &self.national_number
    }

    /// The regex matched against a potentially-valid national significant
    /// number (area code may be omitted).
    pub fn possible_number_pattern(&self) -> &Regex {
        &self.possible_number
    }

    /// An example national significant number for this type, if any.
    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    /// Whether `value` is a full match against both the national-number and
    /// possible-number patterns. A descriptor only matches when the whole
    /// string satisfies both patterns, not merely a prefix or substring.
    ///
    /// Both patterns are compiled pre-anchored (`^(?:...)$`), so a plain
    /// `is_match` here is a true whole-string match — an unanchored
    /// `find()` would instead report the leftmost-first branch of an
    /// alternation like `\d{7}|\d{10}`, matching only its first 7 digits.
    pub fn is_match(&self, value: &str) -> bool {
        self.national_number.is_match(value) && self.possible_number.is_match(value)
    }
}

#[cfg(test)]
mod test {
    use super::Descriptor;
    use regex::Regex;

    #[test]
    fn full_match_required() {
        let desc = Descriptor {
            national_number: Regex::new(r"^(?:\d{10})$").unwrap(),
            possible_number: Regex::new(r"^(?:\d{10})$").unwrap(),
            example: None,
        };

        assert!(desc.is_match("6502530000"));
        assert!(!desc.is_match("65025300001"));
        assert!(!desc.is_match("x6502530000"));
    }

    /// `regex`'s leftmost-first alternation would otherwise stop at the
    /// shorter `\d{7}` branch and report a 7-digit partial match for a
    /// 10-digit number; the anchored form requires the whole string to
    /// satisfy one branch or the other.
    #[test]
    fn full_match_rejects_shorter_alternation_branch() {
        let desc = Descriptor {
            national_number: Regex::new(r"^(?:\d{7}|\d{10})$").unwrap(),
            possible_number: Regex::new(r"^(?:\d{7}|\d{10})$").unwrap(),
            example: None,
        };

        assert!(desc.is_match("6502530000"));
        assert!(desc.is_match("2530000"));
        assert!(!desc.is_match("650253000"));
    }
}
