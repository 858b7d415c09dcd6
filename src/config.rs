use crate::country;

/// Configuration controlling how `parse_with_config` interprets its input.
///
/// Grouped into an explicit struct rather than threaded as loose parameters,
/// since parsing has grown more knobs than a two-argument function can carry
/// cleanly.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct ParseConfig {
    /// The region to assume when the input carries no explicit country
    /// calling code (no leading `+`, no IDD, no `phone-context`).
    pub default_region: Option<country::Id>,

    /// Keep the original, unnormalized input string and the preferred
    /// domestic carrier code alongside the parsed number.
    pub keep_raw_input: bool,

    /// Whether a `default_region` that has no corresponding metadata entry
    /// is itself a hard parse failure, rather than silently behaving as if
    /// no default region had been given.
    pub check_region: bool,
}

impl ParseConfig {
    /// Shorthand for the common case of parsing with a default region and
    /// no other customization.
    pub fn with_default_region(region: country::Id) -> Self {
        ParseConfig {
            default_region: Some(region),
            ..Default::default()
        }
    }
}
