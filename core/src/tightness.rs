//! Leak report decoding
//!
//! `make_watertight` and `check_watertight` print how many surfaces and
//! volumes are still leaky as percentages. This module pulls those numbers
//! out of the free text without knowing which tool wrote it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// An integer or decimal number immediately followed by `%`.
///
/// ASCII digits only, so that every match parses as `f64`.
static PERCENTAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+\.[0-9]+|[0-9]+)%").expect("percentage pattern is valid")
});

/// A decoded percentage: integral when the fractional part is exactly zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percentage {
    Int(u64),
    Float(f64),
}

impl Percentage {
    fn from_f64(value: f64) -> Self {
        if value.fract() == 0.0 && value < u64::MAX as f64 {
            Percentage::Int(value as u64)
        } else {
            Percentage::Float(value)
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Percentage::Int(v) => v as f64,
            Percentage::Float(v) => v,
        }
    }

    pub fn is_zero(self) -> bool {
        self.value() == 0.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percentage::Int(v) => write!(f, "{}%", v),
            Percentage::Float(v) => write!(f, "{}%", v),
        }
    }
}

/// Extract every percentage from a tool report, in order of appearance.
///
/// Returns `None` when nothing could be decoded: either no percentage was
/// found or a match failed to parse. `None` means "unknown", never "no
/// leaks"; an empty list is never returned.
pub fn decode_tightness_checks(text: &str) -> Option<Vec<Percentage>> {
    let mut percentages = Vec::new();
    for captures in PERCENTAGE.captures_iter(text) {
        let value: f64 = captures[1].parse().ok()?;
        percentages.push(Percentage::from_f64(value));
    }

    if percentages.is_empty() {
        None
    } else {
        Some(percentages)
    }
}

/// Overall reading of a leak report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TightnessVerdict {
    /// Every reported percentage is zero
    Watertight,
    /// At least one non-zero percentage
    Leaky,
    /// The report could not be decoded
    Unknown,
}

impl TightnessVerdict {
    pub fn from_percentages(percentages: Option<&[Percentage]>) -> Self {
        match percentages {
            None => TightnessVerdict::Unknown,
            Some(values) if values.iter().all(|p| p.is_zero()) => TightnessVerdict::Watertight,
            Some(_) => TightnessVerdict::Leaky,
        }
    }

    /// Decode `report` and classify it.
    pub fn of_report(report: &str) -> Self {
        Self::from_percentages(decode_tightness_checks(report).as_deref())
    }
}

impl fmt::Display for TightnessVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TightnessVerdict::Watertight => "watertight",
            TightnessVerdict::Leaky => "leaky",
            TightnessVerdict::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAKY_REPORT: &str = "\
        number of leaky surfaces: 3/512 (0.5859%)
        number of leaky volumes: 2/8 (25%)";

    const TIGHT_REPORT: &str = "\
        leaky surfaces: 0/512 (0.0%)
        leaky volumes: 0/8 (0%)";

    #[test]
    fn test_mixed_int_and_float() {
        let decoded = decode_tightness_checks("0.0% 12.5% 100%").unwrap();
        assert_eq!(
            decoded,
            vec![Percentage::Int(0), Percentage::Float(12.5), Percentage::Int(100)]
        );
    }

    #[test]
    fn test_no_percentages_is_unknown() {
        assert_eq!(decode_tightness_checks(""), None);
        assert_eq!(decode_tightness_checks("all good, 12 volumes"), None);
        assert_eq!(decode_tightness_checks("percent sign alone: %"), None);
    }

    #[test]
    fn test_order_is_preserved() {
        let decoded = decode_tightness_checks("b 7% a 3% c 5.25%").unwrap();
        let values: Vec<f64> = decoded.iter().map(|p| p.value()).collect();
        assert_eq!(values, vec![7.0, 3.0, 5.25]);
    }

    #[test]
    fn test_trailing_dot_not_part_of_number() {
        // "5.%" is not a decimal, and "5." is not followed by '%'
        assert_eq!(decode_tightness_checks("5.%"), None);
        assert_eq!(
            decode_tightness_checks("x1.50%").unwrap(),
            vec![Percentage::Float(1.5)]
        );
    }

    #[test]
    fn test_non_ascii_digits_are_not_numbers() {
        // ARABIC-INDIC DIGIT THREE
        let decoded = decode_tightness_checks("leaky volumes: 0% note \u{0663}%").unwrap();
        assert_eq!(decoded, vec![Percentage::Int(0)]);
        assert_eq!(decode_tightness_checks("\u{0663}%"), None);
    }

    #[test]
    fn test_integers_beyond_u64_stay_float() {
        let decoded = decode_tightness_checks("18446744073709551616%").unwrap();
        assert_eq!(decoded, vec![Percentage::Float(18446744073709551616.0)]);
        assert_eq!(
            decode_tightness_checks("18446744073709549568%").unwrap(),
            vec![Percentage::Int(18446744073709549568)]
        );
    }

    #[test]
    fn test_verdicts() {
        assert_eq!(TightnessVerdict::of_report(LEAKY_REPORT), TightnessVerdict::Leaky);
        assert_eq!(TightnessVerdict::of_report(TIGHT_REPORT), TightnessVerdict::Watertight);
        assert_eq!(TightnessVerdict::of_report("no numbers"), TightnessVerdict::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(Percentage::Int(25).to_string(), "25%");
        assert_eq!(Percentage::Float(0.5859).to_string(), "0.5859%");
        assert_eq!(TightnessVerdict::Leaky.to_string(), "leaky");
    }
}
