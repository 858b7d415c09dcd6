use std::fmt;

/// The national significant number.
///
/// The authoritative representation is the digit string itself, not the
/// integer: extraction keeps appending/stripping characters on a string
/// buffer right up until the final step, where it is parsed into `value`.
/// Code that needs the digits (leading zeros and all) should go through
/// [`NationalNumber::to_string`] rather than reformatting `value`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NationalNumber {
    value: u64,

    /// In some countries, the national (significant) number starts with one
    /// or more "0"s without this being a national prefix or trunk code of
    /// some kind. For example, the leading zero in the national
    /// (significant) number of an Italian phone number indicates the number
    /// is a fixed-line number. There have been plans to migrate fixed-line
    /// numbers to start with the digit two since December 2000, but it has
    /// not happened yet. See http://en.wikipedia.org/wiki/%2B39 for more
    /// details.
    ///
    /// This can be safely left at `None` for most countries. Some limited
    /// number of countries behave like Italy - for these cases, if the
    /// leading zero(s) of a number would be retained even when dialling
    /// internationally, this carries the count of leading zeros.
    zeros: Option<u32>,
}

impl NationalNumber {
    /// Builds a national number from its digit string, deciding
    /// `italian_leading_zero`/`number_of_leading_zeros` per the rule in
    /// §4.8: a leading zero is recorded only when the string's length is
    /// greater than 1 and it starts with `0`; the count stops one digit
    /// short of the string's length so an all-zero NSN still keeps one `0`
    /// in the integer value.
    pub fn new(digits: &str) -> Self {
        let value = digits.parse().unwrap_or(0);
        let zeros = if digits.len() > 1 && digits.starts_with('0') {
            let count = digits
                .chars()
                .take(digits.len() - 1)
                .take_while(|&c| c == '0')
                .count() as u32;
            Some(count.max(1))
        } else {
            None
        };

        NationalNumber { value, zeros }
    }

    /// The bare integer value, without any leading zeros.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Whether the textual NSN begins with a leading zero that must be
    /// preserved (the "Italian leading zero" convention).
    pub fn is_italian_leading_zero(&self) -> bool {
        self.zeros.is_some()
    }

    /// The number of leading zeros to prepend when rendering this number as
    /// text, or 0 when `is_italian_leading_zero()` is false.
    pub fn number_of_leading_zeros(&self) -> u32 {
        self.zeros.unwrap_or(0)
    }
}

impl fmt::Display for NationalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(zeros) = self.zeros {
            for _ in 0..zeros {
                write!(f, "0")?;
            }
        }

        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod test {
    use super::NationalNumber;

    #[test]
    fn plain() {
        let n = NationalNumber::new("6502530000");
        assert_eq!(n.value(), 6502530000);
        assert!(!n.is_italian_leading_zero());
        assert_eq!(n.to_string(), "6502530000");
    }

    #[test]
    fn single_leading_zero() {
        let n = NationalNumber::new("0690123456");
        assert!(n.is_italian_leading_zero());
        assert_eq!(n.number_of_leading_zeros(), 1);
        assert_eq!(n.to_string(), "0690123456");
    }

    #[test]
    fn multiple_leading_zeros() {
        let n = NationalNumber::new("00123");
        assert!(n.is_italian_leading_zero());
        assert_eq!(n.number_of_leading_zeros(), 2);
        assert_eq!(n.to_string(), "00123");
    }

    #[test]
    fn all_zeros_keeps_one_in_value() {
        let n = NationalNumber::new("000");
        assert_eq!(n.value(), 0);
        assert_eq!(n.number_of_leading_zeros(), 2);
        assert_eq!(n.to_string(), "000");
    }
}
