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

use crate::carrier::Carrier;
use crate::config::ParseConfig;
use crate::consts;
use crate::country;
use crate::error;
use crate::extension::Extension;
use crate::metadata::{Database, DATABASE};
use crate::national_number::NationalNumber;
use crate::phone_number::PhoneNumber;

use nom::{branch::alt, IResult};

#[macro_use]
pub mod helper;
pub mod natural;
pub mod rfc3966;
pub mod valid;

/// Parse a phone number, assuming `default_region` when the text carries no
/// explicit country calling code.
pub fn parse<S: AsRef<str>>(
    default_region: Option<country::Id>,
    string: S,
) -> Result<PhoneNumber, error::ParseError> {
    parse_with(&DATABASE, default_region, string)
}

/// Like [`parse`], but against an explicit `Database`.
pub fn parse_with<S: AsRef<str>>(
    database: &Database,
    default_region: Option<country::Id>,
    string: S,
) -> Result<PhoneNumber, error::ParseError> {
    parse_with_config(
        database,
        ParseConfig {
            default_region,
            ..Default::default()
        },
        string,
    )
}

/// Parse a phone number, keeping the raw input string, country code source
/// and preferred domestic carrier code alongside it.
pub fn parse_and_keep_raw_input<S: AsRef<str>>(
    default_region: Option<country::Id>,
    string: S,
) -> Result<PhoneNumber, error::ParseError> {
    parse_with_config(
        &DATABASE,
        ParseConfig {
            default_region,
            keep_raw_input: true,
            ..Default::default()
        },
        string,
    )
}

/// Parse a phone number against an explicit `Database` and [`ParseConfig`].
pub fn parse_with_config<S: AsRef<str>>(
    database: &Database,
    config: ParseConfig,
    string: S,
) -> Result<PhoneNumber, error::ParseError> {
    let raw = string.as_ref();

    if raw.chars().count() > consts::MAX_INPUT_STRING_LENGTH {
        return Err(error::ParseError::TooLong);
    }

    fn phone_number(i: &str) -> IResult<&str, helper::Number> {
        parse! { i => alt((rfc3966::phone_number, natural::phone_number)) }
    }

    // Try to parse the number as RFC3966 or natural language.
    let (_, extracted) = phone_number(raw).or(Err(error::ParseError::NotANumber))?;

    // A `default_region` with no metadata entry either fails outright
    // (`check_region`) or is treated as if none had been given.
    let default_region = match config.default_region {
        Some(region) if database.by_id(region.as_ref()).is_some() => Some(region),
        Some(_) if config.check_region => return Err(error::ParseError::InvalidCountryCode),
        _ => None,
    };

    // Normalize the number and extract the country code. A single recovery
    // path exists: if extraction fails because the calling code is invalid
    // but the text still starts with a plus-character sequence, strip it and
    // retry extraction exactly once.
    let mut number = match helper::country_code(database, default_region, extracted.clone()) {
        Ok(number) => number,

        Err(error::ParseError::InvalidCountryCode) => {
            let plus_len = helper::ignore_plus(&extracted.national)
                .map(|(_, s)| s.len())
                .unwrap_or(0);

            if plus_len == 0 {
                return Err(error::ParseError::InvalidCountryCode);
            }

            let mut retry = extracted;
            retry.national = helper::trim(retry.national, plus_len);
            helper::country_code(database, default_region, retry)?
        }

        Err(err) => return Err(err),
    };

    // Strip the national prefix (and extract the carrier code) using the
    // default region's metadata, mirroring how the text would actually have
    // been dialled domestically.
    if let Some(meta) = default_region.and_then(|c| database.by_id(c.as_ref())) {
        number = helper::national_number(&meta, number);
    }

    if number.national.len() < consts::MIN_LENGTH_FOR_NSN {
        return Err(error::ParseError::TooShortNsn);
    }

    if number.national.len() > consts::MAX_LENGTH_FOR_NSN {
        return Err(error::ParseError::TooLong);
    }

    let code = number
        .prefix
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|_| error::ParseError::InvalidCountryCode)?
        .unwrap_or(0);

    Ok(PhoneNumber {
        code: country::Code {
            value: code,
            source: number.country,
        },

        national: NationalNumber::new(&number.national),

        extension: number.extension.map(|s| Extension(s.into_owned())),

        carrier: if config.keep_raw_input {
            number.carrier.map(|s| Carrier(s.into_owned()))
        } else {
            None
        },

        raw_input: if config.keep_raw_input {
            Some(raw.to_owned())
        } else {
            None
        },
    })
}

#[cfg(test)]
mod test {
    use crate::country;
    use crate::national_number::NationalNumber;
    use crate::parser;
    use crate::phone_number::PhoneNumber;

    #[test]
    fn parse() {
        let mut number = PhoneNumber {
            code: country::Code {
                value: 64,
                source: country::Source::Default,
            },

            national: NationalNumber::new("33316005"),

            extension: None,
            carrier: None,
            raw_input: None,
        };

        number.code.source = country::Source::Default;
        assert_eq!(
            number,
            parser::parse(Some(country::NZ), "033316005").unwrap()
        );
        assert_eq!(
            number,
            parser::parse(Some(country::NZ), "33316005").unwrap()
        );
        assert_eq!(
            number,
            parser::parse(Some(country::NZ), "03-331 6005").unwrap()
        );
        assert_eq!(
            number,
            parser::parse(Some(country::NZ), "03 331 6005").unwrap()
        );

        number.code.source = country::Source::Plus;
        assert_eq!(
            number,
            parser::parse(Some(country::NZ), "tel:03-331-6005;phone-context=+64").unwrap()
        );
        // FIXME: What the fuck is this.
        // assert_eq!(number, parser::parse(Some(country::NZ), "tel:331-6005;phone-context=+64-3").unwrap());
        // assert_eq!(number, parser::parse(Some(country::NZ), "tel:331-6005;phone-context=+64-3").unwrap());
        assert_eq!(
            number,
            parser::parse(Some(country::NZ), "tel:03-331-6005;phone-context=+64;a=%A1").unwrap()
        );
        assert_eq!(
            number,
            parser::parse(
                Some(country::NZ),
                "tel:03-331-6005;isub=12345;phone-context=+64"
            )
            .unwrap()
        );
        assert_eq!(
            number,
            parser::parse(Some(country::NZ), "tel:+64-3-331-6005;isub=12345").unwrap()
        );
        assert_eq!(
            number,
            parser::parse(Some(country::NZ), "03-331-6005;phone-context=+64").unwrap()
        );

        number.code.source = country::Source::Idd;
        assert_eq!(
            number,
            parser::parse(Some(country::NZ), "0064 3 331 6005").unwrap()
        );
        assert_eq!(
            number,
            parser::parse(Some(country::US), "01164 3 331 6005").unwrap()
        );

        number.code.source = country::Source::Plus;
        assert_eq!(
            number,
            parser::parse(Some(country::US), "+64 3 331 6005").unwrap()
        );

        assert_eq!(
            number,
            parser::parse(Some(country::US), "+01164 3 331 6005").unwrap()
        );
        assert_eq!(
            number,
            parser::parse(Some(country::NZ), "+0064 3 331 6005").unwrap()
        );
        assert_eq!(
            number,
            parser::parse(Some(country::NZ), "+ 00 64 3 331 6005").unwrap()
        );

        let number = PhoneNumber {
            code: country::Code {
                value: 64,
                source: country::Source::Number,
            },

            national: NationalNumber::new("64123456"),

            extension: None,
            carrier: None,
            raw_input: None,
        };

        assert_eq!(
            number,
            parser::parse(Some(country::NZ), "64(0)64123456").unwrap()
        );

        assert_eq!(
            PhoneNumber {
                code: country::Code {
                    value: 49,
                    source: country::Source::Default,
                },

                national: NationalNumber::new("30123456"),

                extension: None,
                carrier: None,
                raw_input: None,
            },
            parser::parse(Some(country::DE), "301/23456").unwrap()
        );

        assert_eq!(
            PhoneNumber {
                code: country::Code {
                    value: 81,
                    source: country::Source::Plus,
                },

                national: NationalNumber::new("2345"),

                extension: None,
                carrier: None,
                raw_input: None,
            },
            parser::parse(Some(country::JP), "+81 *2345").unwrap()
        );

        assert_eq!(
            PhoneNumber {
                code: country::Code {
                    value: 64,
                    source: country::Source::Default,
                },

                national: NationalNumber::new("12"),

                extension: None,
                carrier: None,
                raw_input: None,
            },
            parser::parse(Some(country::NZ), "12").unwrap()
        );

        // The shipped metadata does not model a carrier-code capture group for
        // BR, so only the national prefix "0" is stripped here.
        assert_eq!(
            PhoneNumber {
                code: country::Code {
                    value: 55,
                    source: country::Source::Default,
                },

                national: NationalNumber::new("123121286979"),

                extension: None,
                carrier: None,
                raw_input: None,
            },
            parser::parse(Some(country::BR), "012 3121286979").unwrap()
        );
    }

    #[test]
    fn issue_43() {
        let res = parser::parse(None, " 2 22#:");
        assert!(res.is_err());
    }

    #[test]
    fn advisory_1() {
        let res = parser::parse(None, ".;phone-context=");
        assert!(res.is_err(), "{res:?}");
    }

    #[test]
    fn keeps_raw_input_when_asked() {
        let number = parser::parse_and_keep_raw_input(Some(country::NZ), "03-331 6005").unwrap();
        assert_eq!(Some("03-331 6005"), number.raw_input());

        let number = parser::parse(Some(country::NZ), "03-331 6005").unwrap();
        assert_eq!(None, number.raw_input());
    }

    #[test]
    fn too_long_input_string_is_rejected() {
        let digits: String = std::iter::repeat('1').take(260).collect();
        assert!(matches!(
            parser::parse(None, digits),
            Err(crate::error::ParseError::TooLong)
        ));
    }

    #[test]
    fn check_region_rejects_unknown_default_region() {
        use crate::config::ParseConfig;
        use crate::metadata::DATABASE;

        // FR has no metadata entry in the bundled fixture.
        let lenient = parser::parse_with_config(
            &DATABASE,
            ParseConfig {
                default_region: Some(country::FR),
                ..Default::default()
            },
            "123456",
        );
        assert!(lenient.is_err(), "no plus and no usable default region");

        let strict = parser::parse_with_config(
            &DATABASE,
            ParseConfig {
                default_region: Some(country::FR),
                check_region: true,
                ..Default::default()
            },
            "+64 3 331 6005",
        );
        assert_eq!(
            Err(crate::error::ParseError::InvalidCountryCode),
            strict.map(|_| ())
        );
    }

    #[test]
    fn retries_once_after_unrecognized_plus_prefix() {
        // "999" is not an assigned calling code. The retry strips the plus
        // and re-resolves the digits as a plain national number in the
        // default region, instead of failing outright.
        let number = parser::parse(Some(country::NZ), "+999 3316005").unwrap();

        assert_eq!(country::Source::Default, number.code().source());
        assert_eq!(64, number.code().value());
    }
}
