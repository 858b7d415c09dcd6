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

use crate::{
    consts,
    metadata::{Database, Format, Metadata, DATABASE},
    phone_number::PhoneNumber,
};
use std::{borrow::Cow, fmt};

/// Formatting modes for phone number.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Mode {
    /// E.164 formatting, no spaces, no decorations.
    E164,

    /// International formatting, contains country code and country dependent
    /// formatting.
    International,

    /// National formatting, no country code and country dependent formatting.
    National,

    /// RFC3966 formatting, see the RFC.
    Rfc3966,
}

/// A formatter for a `PhoneNumber`.
#[derive(Copy, Clone, Debug)]
pub struct Formatter<'n, 'd, 'f> {
    number: &'n PhoneNumber,
    database: Option<&'d Database>,
    mode: Mode,
    format: Option<&'f Format>,
}

impl<'n, 'd, 'f> Formatter<'n, 'd, 'f> {
    /// Define a metadata database to use for formatting.
    pub fn database<'a>(self, database: &'a Database) -> Formatter<'n, 'a, 'f> {
        Formatter {
            number: self.number,
            database: Some(database),
            mode: self.mode,
            format: self.format,
        }
    }

    /// Define the formatting mode.
    pub fn mode(mut self, mode: Mode) -> Formatter<'n, 'd, 'f> {
        self.mode = mode;
        self
    }

    /// Define a custom `Format` to use for formatting.
    pub fn with<'a>(self, format: &'a Format) -> Formatter<'n, 'd, 'a> {
        Formatter {
            number: self.number,
            database: self.database,
            mode: self.mode,
            format: Some(format),
        }
    }
}

/// Create a new `Formatter` for the given phone number.
pub fn format<'n>(number: &'n PhoneNumber) -> Formatter<'n, 'static, 'static> {
    Formatter {
        number: number,
        database: None,
        mode: Mode::E164,
        format: None,
    }
}

/// Create a new `Formatter` for the given phone number using the given
/// metadata database.
pub fn format_with<'d, 'n>(
    database: &'d Database,
    number: &'n PhoneNumber,
) -> Formatter<'n, 'd, 'static> {
    Formatter {
        number: number,
        database: Some(database),
        mode: Mode::E164,
        format: None,
    }
}

impl<'n, 'd, 'f> fmt::Display for Formatter<'n, 'd, 'f> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let db = self.database.unwrap_or(&*DATABASE);
        let national = self.number.national().to_string();

        if self.number.country().code() == 0 {
            if let Some(raw) = self.number.raw_input() {
                return write!(f, "{}", raw);
            }
        }

        // E.164 needs only the calling code, not region metadata.
        if self.mode == Mode::E164 {
            return write!(f, "+{}{}", self.number.country().code(), national);
        }

        let meta = match db
            .by_code(&self.number.country().code())
            .map(|m| m.into_iter().next().unwrap())
        {
            Some(meta) => meta,
            // Unassigned country calling code: fall back to the bare NSN.
            None => return write!(f, "{}", national),
        };

        let formatter = self.format.or_else(|| {
            formatter(
                &national,
                if meta.international_formats().is_empty() || self.mode == Mode::National {
                    meta.formats()
                } else {
                    meta.international_formats()
                },
            )
        });

        match self.mode {
            Mode::E164 => unreachable!("handled above"),

            // Space separated formatting with national specific rules.
            Mode::International => {
                write!(f, "+{} ", self.number.country().code())?;
                write!(f, "{}", international_body(self.number, &meta, formatter, &national))?;
            }

            Mode::National => {
                if let Some(formatter) = formatter {
                    let carrier = self
                        .number
                        .carrier()
                        .and_then(|c| formatter.domestic_carrier().map(|f| (c, f)));

                    if let Some((carrier, format)) = carrier {
                        write!(
                            f,
                            "{}",
                            replace(&national, &meta, formatter, Some(format), Some(carrier))
                        )?;
                    } else if let Some(prefix) = formatter.national_prefix() {
                        write!(
                            f,
                            "{}",
                            replace(&national, &meta, formatter, Some(prefix), None)
                        )?;
                    } else {
                        write!(f, "{}", replace(&national, &meta, formatter, None, None))?;
                    }
                } else {
                    write!(f, "{}", national)?;
                }

                write!(f, "{}", formatted_extension(self.number, &meta, false))?;
            }

            Mode::Rfc3966 => {
                write!(f, "tel:+{}-", self.number.country().code())?;

                if let Some(formatter) = formatter {
                    write!(
                        f,
                        "{}",
                        consts::SEPARATOR_PATTERN
                            .replace_all(&replace(&national, &meta, formatter, None, None), "-")
                    )?;
                } else {
                    write!(f, "{}", national)?;
                }

                write!(f, "{}", formatted_extension(self.number, &meta, true))?;
            }
        }

        Ok(())
    }
}

/// The NSN plus extension, formatted the way [`Mode::International`] does,
/// but without the leading `"+cc "` — shared with
/// [`format_out_of_country`].
fn international_body(
    number: &PhoneNumber,
    meta: &Metadata,
    formatter: Option<&Format>,
    national: &str,
) -> String {
    let mut out = if let Some(formatter) = formatter {
        replace(national, meta, formatter, None, None)
    } else {
        national.to_owned()
    };

    out.push_str(&formatted_extension(number, meta, false));
    out
}

/// `maybe_get_formatted_extension`: empty if there is none, `;ext=...` for
/// RFC 3966, else the region's preferred extension prefix (or `" ext. "`).
fn formatted_extension(number: &PhoneNumber, meta: &Metadata, rfc3966: bool) -> String {
    match number.extension() {
        Some(ext) if rfc3966 => format!(";ext={}", ext),
        Some(ext) => format!("{}{}", meta.preferred_extension_prefix().unwrap_or(" ext. "), ext),
        None => String::new(),
    }
}

/// Format `number` the way it would need to be dialed from `from_region`.
///
/// Falls back to [`Mode::International`] when `from_region` is not a known
/// region, or when `from_region`'s international-dialing prefix cannot be
/// determined as a literal digit string.
pub fn format_out_of_country(number: &PhoneNumber, from_region: &str) -> String {
    format_out_of_country_with(&DATABASE, number, from_region)
}

/// Like [`format_out_of_country`], but against an explicit `Database`.
pub fn format_out_of_country_with(database: &Database, number: &PhoneNumber, from_region: &str) -> String {
    let from_meta = match database.by_id(from_region) {
        Some(meta) => meta,
        None => return format_with(database, number).mode(Mode::International).to_string(),
    };

    let to_code = number.country().code();

    if to_code == consts::NANPA_COUNTRY_CODE as u16
        && from_meta.country_code() == consts::NANPA_COUNTRY_CODE as u16
    {
        return format!(
            "1 {}",
            format_with(database, number).mode(Mode::National).to_string()
        );
    }

    if to_code == from_meta.country_code() {
        return format_with(database, number).mode(Mode::National).to_string();
    }

    let meta = match database.by_code(&to_code).map(|m| m.into_iter().next().unwrap()) {
        Some(meta) => meta,
        None => return number.national().to_string(),
    };

    let national = number.national().to_string();
    let formatter = formatter(
        &national,
        if meta.international_formats().is_empty() {
            meta.formats()
        } else {
            meta.international_formats()
        },
    );
    let body = international_body(number, &meta, formatter, &national);

    match dialing_prefix(&from_meta) {
        Some(prefix) => format!("{} {} {}", prefix, to_code, body),
        None => format_with(database, number).mode(Mode::International).to_string(),
    }
}

/// The literal digit string a region's international-dialing prefix
/// represents, when it has a single unambiguous one; `None` when several
/// prefixes are possible and no `preferred_international_prefix` is given
/// either.
fn dialing_prefix(meta: &Metadata) -> Option<String> {
    if let Some(pattern) = meta.international_prefix().map(|re| re.as_str()) {
        if consts::UNIQUE_INTERNATIONAL_PREFIX
            .find(pattern)
            .map(|m| m.start() == 0 && m.end() == pattern.len())
            .unwrap_or(false)
        {
            return Some(pattern.to_owned());
        }
    }

    meta.preferred_international_prefix().map(str::to_owned)
}

fn formatter<'a>(number: &str, formats: &'a [Format]) -> Option<&'a Format> {
    for format in formats {
        let leading = format.leading_digits();

        if leading.is_empty()
            || leading
                .last()
                .unwrap()
                .find(&number)
                .map(|m| m.start() == 0)
                .unwrap_or(false)
        {
            if format
                .pattern()
                .find(&number)
                .map(|m| m.start() == 0 && m.end() == number.len())
                .unwrap_or(false)
            {
                return Some(format);
            }
        }
    }

    None
}

fn replace(
    national: &str,
    meta: &Metadata,
    formatter: &Format,
    transform: Option<&str>,
    carrier: Option<&str>,
) -> String {
    formatter
        .pattern()
        .replace(
            national,
            &*if let Some(transform) = transform {
                let first = consts::FIRST_GROUP
                    .captures(&formatter.format())
                    .unwrap()
                    .get(1)
                    .unwrap()
                    .as_str();
                let format = transform.replace(*consts::NP, meta.national_prefix().unwrap_or(""));
                let format = format.replace(*consts::FG, &*format!("${}", first));
                let format = format.replace(*consts::CC, carrier.unwrap_or(""));

                consts::FIRST_GROUP.replace(formatter.format(), &*format)
            } else {
                Cow::Borrowed(formatter.format())
            },
        )
        .into()
}

#[cfg(test)]
mod test {
    use crate::country;
    use crate::formatter::Mode;
    use crate::parser;

    #[test]
    fn us() {
        assert_eq!(
            "(650) 253-0000",
            parser::parse(Some(country::US), "+1 6502530000")
                .unwrap()
                .format()
                .mode(Mode::National)
                .to_string()
        );

        assert_eq!(
            "+1 650-253-0000",
            parser::parse(Some(country::US), "+1 6502530000")
                .unwrap()
                .format()
                .mode(Mode::International)
                .to_string()
        );

        assert_eq!(
            "(800) 253-0000",
            parser::parse(Some(country::US), "+1 8002530000")
                .unwrap()
                .format()
                .mode(Mode::National)
                .to_string()
        );

        assert_eq!(
            "+1 800-253-0000",
            parser::parse(Some(country::US), "+1 8002530000")
                .unwrap()
                .format()
                .mode(Mode::International)
                .to_string()
        );

        assert_eq!(
            "(900) 253-0000",
            parser::parse(Some(country::US), "+1 9002530000")
                .unwrap()
                .format()
                .mode(Mode::National)
                .to_string()
        );

        assert_eq!(
            "+1 900-253-0000",
            parser::parse(Some(country::US), "+1 9002530000")
                .unwrap()
                .format()
                .mode(Mode::International)
                .to_string()
        );

        assert_eq!(
            "tel:+1-900-253-0000",
            parser::parse(Some(country::US), "+1 9002530000")
                .unwrap()
                .format()
                .mode(Mode::Rfc3966)
                .to_string()
        );
    }

    #[test]
    fn gb() {
        assert_eq!(
            "020 7031 3000",
            parser::parse(Some(country::GB), "+44 2070313000")
                .unwrap()
                .format()
                .mode(Mode::National)
                .to_string()
        );

        assert_eq!(
            "+44 20 7031 3000",
            parser::parse(Some(country::GB), "+44 2070313000")
                .unwrap()
                .format()
                .mode(Mode::International)
                .to_string()
        );

        assert_eq!(
            "020 7031 3000",
            parser::parse(Some(country::GB), "+44 2070313000")
                .unwrap()
                .format()
                .mode(Mode::National)
                .to_string()
        );

        assert_eq!(
            "07912 345678",
            parser::parse(Some(country::GB), "+44 7912345678")
                .unwrap()
                .format()
                .mode(Mode::National)
                .to_string()
        );

        assert_eq!(
            "+44 7912 345678",
            parser::parse(Some(country::GB), "+44 7912345678")
                .unwrap()
                .format()
                .mode(Mode::International)
                .to_string()
        );
    }

    #[test]
    fn out_of_country() {
        use crate::formatter;

        let us_number = parser::parse(Some(country::US), "+1 6502530000").unwrap();

        assert_eq!(
            "1 650-253-0000",
            formatter::format_out_of_country(&us_number, "CA")
        );

        let gb_number = parser::parse(Some(country::GB), "+44 2070313000").unwrap();

        assert_eq!(
            "011 44 20 7031 3000",
            formatter::format_out_of_country(&gb_number, "US")
        );

        assert_eq!(
            "(650) 253-0000",
            formatter::format_out_of_country(&us_number, "US")
        );
    }
}
