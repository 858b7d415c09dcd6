#[macro_use]
extern crate lazy_static;

/// Return `$default` from the enclosing function if `$option` is `None`,
/// otherwise bind its inner value.
macro_rules! try_opt {
    ($default:expr; $option:expr) => {
        match $option {
            Some(value) => value,
            None => return $default,
        }
    };
}

pub mod error;
pub use error::{MetadataError, ParseError};

pub mod config;
pub use config::ParseConfig;

pub mod metadata;
pub use metadata::Metadata;

mod national_number;
pub use national_number::NationalNumber;

pub mod country;

mod extension;
pub use extension::Extension;

mod carrier;
pub use carrier::Carrier;

mod phone_number;
pub use phone_number::{PhoneNumber, Type};

pub mod parser;
pub use parser::{parse, parse_and_keep_raw_input, parse_with, parse_with_config};

pub mod validator;
pub use validator::{
    get_national_significant_number, get_ndd_prefix_for_region, get_region_code_for_country_code,
    get_region_code_for_number, is_leading_zero_possible, is_nanpa_country, is_valid_number,
    is_valid_number_for_region, is_valid_number_with, is_viable, is_viable_phone_number,
};

pub mod formatter;
pub use formatter::{format_out_of_country, format_out_of_country_with, Mode};

pub mod consts;
