//! Color command parsing and encoding
//!
//! A command line carries exactly [`FIELD_COUNT`] comma-separated integers
//! for red, green and blue. Values are kept as received: range checking is
//! not the parser's job, the compositor clamps after brightness scaling.

use core::fmt::Write;
use core::num::IntErrorKind;
use core::str::FromStr;

use heapless::String;

use crate::line::MAX_LINE_LEN;

/// Number of comma-separated fields in a command
pub const FIELD_COUNT: usize = 3;

/// Reasons a line is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line does not split into exactly three fields
    WrongFieldCount,
    /// A field is empty or not a base-10 integer
    NotAnInteger,
}

/// A validated `R,G,B` command with raw, unscaled channel values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorCommand {
    pub red: i64,
    pub green: i64,
    pub blue: i64,
}

impl ColorCommand {
    /// Create a command from raw channel values
    pub const fn new(red: i64, green: i64, blue: i64) -> Self {
        Self { red, green, blue }
    }

    /// Parse a trimmed, terminator-free line
    ///
    /// Whitespace anywhere inside a field is ignored, so `"12, 34 ,56"` and
    /// `"1 2,34,56"` are accepted. Integers too large for `i64` saturate
    /// rather than fail; they end up clamped to full brightness anyway.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        if line.split(',').count() != FIELD_COUNT {
            return Err(ParseError::WrongFieldCount);
        }

        let mut fields = [0i64; FIELD_COUNT];
        for (slot, token) in fields.iter_mut().zip(line.split(',')) {
            *slot = parse_field(token)?;
        }

        let [red, green, blue] = fields;
        Ok(Self { red, green, blue })
    }

    /// Parse a line given as raw bytes
    ///
    /// Bytes that are not UTF-8 cannot form an integer, so they are
    /// reported as [`ParseError::NotAnInteger`] (after the field count is
    /// checked, matching [`ColorCommand::parse`]).
    pub fn parse_bytes(line: &[u8]) -> Result<Self, ParseError> {
        match core::str::from_utf8(line) {
            Ok(text) => Self::parse(text),
            Err(_) => {
                let fields = line.split(|&b| b == b',').count();
                if fields != FIELD_COUNT {
                    Err(ParseError::WrongFieldCount)
                } else {
                    Err(ParseError::NotAnInteger)
                }
            }
        }
    }

    /// Render the command as a wire line, terminator included
    pub fn encode_line(&self) -> String<MAX_LINE_LEN> {
        let mut out = String::new();
        // Three i64 values plus separators fit in MAX_LINE_LEN
        let _ = writeln!(out, "{},{},{}", self.red, self.green, self.blue);
        out
    }

    /// Derive a command from a CSS color string
    ///
    /// Takes the first three runs of decimal digits, which covers both
    /// `rgb(r, g, b)` and `rgba(r, g, b, a)` as reported by a browser's
    /// computed style. Anything with fewer than three numbers maps to black.
    pub fn from_css_color(css: &str) -> Self {
        let mut values = [0i64; FIELD_COUNT];
        let mut found = 0;

        for run in css
            .split(|c: char| !c.is_ascii_digit())
            .filter(|run| !run.is_empty())
            .take(FIELD_COUNT)
        {
            values[found] = saturating_parse(run).unwrap_or(0);
            found += 1;
        }

        if found < FIELD_COUNT {
            return Self::default();
        }

        let [red, green, blue] = values;
        Self { red, green, blue }
    }
}

impl FromStr for ColorCommand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse one field, ignoring any whitespace inside it
fn parse_field(token: &str) -> Result<i64, ParseError> {
    let mut compact: String<MAX_LINE_LEN> = String::new();
    for c in token.chars().filter(|c| !c.is_whitespace()) {
        compact.push(c).map_err(|_| ParseError::NotAnInteger)?;
    }

    saturating_parse(&compact).ok_or(ParseError::NotAnInteger)
}

/// Parse a base-10 integer, saturating at the `i64` bounds on overflow
fn saturating_parse(digits: &str) -> Option<i64> {
    match digits.parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_plain() {
        assert_eq!(
            ColorCommand::parse("255,0,0"),
            Ok(ColorCommand::new(255, 0, 0))
        );
    }

    #[test]
    fn test_parse_with_spaces() {
        assert_eq!(
            ColorCommand::parse("12, 34 , 56"),
            Ok(ColorCommand::new(12, 34, 56))
        );
        assert_eq!(
            ColorCommand::parse("1 2,3\t4,5 6"),
            Ok(ColorCommand::new(12, 34, 56))
        );
    }

    #[test]
    fn test_parse_signed_values_kept_raw() {
        assert_eq!(
            ColorCommand::parse("-5,+7,300"),
            Ok(ColorCommand::new(-5, 7, 300))
        );
    }

    #[test]
    fn test_parse_huge_value_saturates() {
        assert_eq!(
            ColorCommand::parse("999999999999,0,0"),
            Ok(ColorCommand::new(999_999_999_999, 0, 0))
        );
        assert_eq!(
            ColorCommand::parse("99999999999999999999999,0,-99999999999999999999999"),
            Ok(ColorCommand::new(i64::MAX, 0, i64::MIN))
        );
    }

    #[test]
    fn test_wrong_field_count() {
        assert_eq!(ColorCommand::parse(""), Err(ParseError::WrongFieldCount));
        assert_eq!(ColorCommand::parse("1,2"), Err(ParseError::WrongFieldCount));
        assert_eq!(
            ColorCommand::parse("1,2,3,4"),
            Err(ParseError::WrongFieldCount)
        );
        assert_eq!(
            ColorCommand::parse("1,2,3,"),
            Err(ParseError::WrongFieldCount)
        );
    }

    #[test]
    fn test_not_an_integer() {
        assert_eq!(
            ColorCommand::parse("12,ab,0"),
            Err(ParseError::NotAnInteger)
        );
        assert_eq!(ColorCommand::parse("1,,3"), Err(ParseError::NotAnInteger));
        assert_eq!(
            ColorCommand::parse("1.5,2,3"),
            Err(ParseError::NotAnInteger)
        );
    }

    #[test]
    fn test_parse_bytes_non_utf8() {
        assert_eq!(
            ColorCommand::parse_bytes(&[0xFF, b',', b'1', b',', b'2']),
            Err(ParseError::NotAnInteger)
        );
        assert_eq!(
            ColorCommand::parse_bytes(&[0xFF, b',', b'1']),
            Err(ParseError::WrongFieldCount)
        );
        assert_eq!(
            ColorCommand::parse_bytes(b"4,5,6"),
            Ok(ColorCommand::new(4, 5, 6))
        );
    }

    #[test]
    fn test_from_str() {
        let cmd: ColorCommand = "7,8,9".parse().unwrap();
        assert_eq!(cmd, ColorCommand::new(7, 8, 9));
    }

    #[test]
    fn test_encode_line() {
        let cmd = ColorCommand::new(255, 128, 0);
        assert_eq!(cmd.encode_line().as_str(), "255,128,0\n");

        let extreme = ColorCommand::new(i64::MIN, i64::MIN, i64::MIN);
        assert!(extreme.encode_line().ends_with('\n'));
    }

    #[test]
    fn test_from_css_color() {
        assert_eq!(
            ColorCommand::from_css_color("rgb(12, 34, 56)"),
            ColorCommand::new(12, 34, 56)
        );
        assert_eq!(
            ColorCommand::from_css_color("rgba(1, 2, 3, 0.5)"),
            ColorCommand::new(1, 2, 3)
        );
        assert_eq!(
            ColorCommand::from_css_color("transparent"),
            ColorCommand::new(0, 0, 0)
        );
        assert_eq!(ColorCommand::from_css_color(""), ColorCommand::default());
    }

    proptest! {
        #[test]
        fn prop_encoded_line_parses_back(r in 0i64..=255, g in 0i64..=255, b in 0i64..=255) {
            let cmd = ColorCommand::new(r, g, b);
            let line = cmd.encode_line();
            prop_assert_eq!(ColorCommand::parse(line.trim_end()), Ok(cmd));
        }

        #[test]
        fn prop_field_count_other_than_three_rejected(count in 0usize..8) {
            prop_assume!(count != FIELD_COUNT);
            let fields: std::vec::Vec<&str> = std::iter::repeat("1").take(count).collect();
            let line = fields.join(",");
            prop_assert_eq!(ColorCommand::parse(&line), Err(ParseError::WrongFieldCount));
        }
    }
}
