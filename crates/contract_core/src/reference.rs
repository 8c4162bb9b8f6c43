use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, Timelike};
use rand::Rng;

/// Display-only contract code in the form `YYMMDD-HHMM-RRRR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractReference(String);

impl ContractReference {
    /// Inclusive range of the random suffix.
    pub const SUFFIX_RANGE: RangeInclusive<u16> = 1000..=9999;

    /// Builds a reference from a timestamp and a suffix; the suffix is clamped
    /// into [`Self::SUFFIX_RANGE`] so the code stays fixed-width.
    pub fn from_parts<T>(now: &T, suffix: u16) -> Self
    where
        T: Datelike + Timelike,
    {
        let suffix = suffix.clamp(*Self::SUFFIX_RANGE.start(), *Self::SUFFIX_RANGE.end());
        Self(format!(
            "{:02}{:02}{:02}-{:02}{:02}-{}",
            now.year().rem_euclid(100),
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            suffix
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Draws the random suffix from `rng`. Two references generated in the same
/// minute collide with probability 1/9000.
pub fn generate_reference<T, R>(now: &T, rng: &mut R) -> ContractReference
where
    T: Datelike + Timelike,
    R: Rng + ?Sized,
{
    let suffix = rng.random_range(ContractReference::SUFFIX_RANGE);
    ContractReference::from_parts(now, suffix)
}

/// Long-form South African English date, e.g. `7 March 2026`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{format_long_date, ContractReference};

    #[test]
    fn reference_is_zero_padded() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(
            ContractReference::from_parts(&now, 4321).as_str(),
            "250307-0905-4321"
        );
    }

    #[test]
    fn suffix_is_clamped_to_four_digits() {
        let now = NaiveDate::from_ymd_opt(2031, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        assert_eq!(
            ContractReference::from_parts(&now, 7).as_str(),
            "311231-2359-1000"
        );
        assert_eq!(
            ContractReference::from_parts(&now, u16::MAX).as_str(),
            "311231-2359-9999"
        );
    }

    #[test]
    fn long_date_has_no_leading_zero() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_long_date(date), "7 March 2026");
    }
}
