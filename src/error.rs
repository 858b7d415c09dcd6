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

use thiserror::Error;

/// Errors raised while turning free-form text into a [`crate::PhoneNumber`].
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The input was empty, or failed the viability check outright (fewer
    /// than 2-3 digits once punctuation is stripped).
    #[error("not a number")]
    NotANumber,

    /// The raw input exceeded `MAX_INPUT_STRING_LENGTH`, or the national
    /// significant number exceeded `MAX_LENGTH_FOR_NSN` after parsing.
    #[error("the number is too long")]
    TooLong,

    /// The national significant number, after any country code has been
    /// stripped, had fewer digits than `MIN_LENGTH_FOR_NSN`.
    #[error("the number is too short after the country code")]
    TooShortNsn,

    /// The string started with an international dialing prefix, but after
    /// stripping it had fewer digits remaining than any valid number could
    /// have.
    #[error("the number is too short after IDD")]
    TooShortAfterIdd,

    /// No default region was supplied and the input carries no recognizable
    /// country calling code, or a `+`-prefixed number's leading 1-3 digits
    /// are not a known calling code.
    #[error("invalid country code")]
    InvalidCountryCode,
}

/// Errors raised while loading or looking up region metadata.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The underlying document failed to deserialize.
    #[error("malformed metadata document")]
    Malformed(#[from] quick_xml::de::DeError),

    /// A region code has no corresponding entry in the metadata document.
    ///
    /// Distinct from the preserved "`_isValidRegionCode` accepts any
    /// non-null region" quirk: callers are never refused for passing an
    /// unrecognized region string up front, they simply get this error back
    /// from the one place that actually needs the document entry to exist.
    #[error("unknown region: {0}")]
    UnknownRegion(String),
}
