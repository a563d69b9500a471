//! Market tenors such as `3M`, `5Y`, `1W` and `2D`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::error::DateError;
use super::time::Date;

/// Unit of a [`Tenor`] after normalisation.
///
/// Weeks are stored as days and years as months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TenorUnit {
    /// Calendar days.
    Days,
    /// Calendar months.
    Months,
}

/// A length of time quoted in market convention.
///
/// Tenors order by approximate length, so `12M` and `1Y` compare equal
/// and `1W` sorts before `1M`.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{Date, Tenor};
///
/// let t: Tenor = "5Y".parse().unwrap();
/// assert_eq!(t.to_string(), "5Y");
///
/// let start = Date::from_ymd(2013, 6, 20).unwrap();
/// assert_eq!(t.add_to(start).unwrap(), Date::from_ymd(2018, 6, 20).unwrap());
///
/// assert!("1W".parse::<Tenor>().unwrap() < "1M".parse::<Tenor>().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tenor {
    amount: i32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor of `n` days.
    pub fn days(n: i32) -> Self {
        Self {
            amount: n,
            unit: TenorUnit::Days,
        }
    }

    /// Creates a tenor of `n` weeks, stored as days.
    pub fn weeks(n: i32) -> Self {
        Self::days(7 * n)
    }

    /// Creates a tenor of `n` months.
    pub fn months(n: i32) -> Self {
        Self {
            amount: n,
            unit: TenorUnit::Months,
        }
    }

    /// Creates a tenor of `n` years, stored as months.
    pub fn years(n: i32) -> Self {
        Self::months(12 * n)
    }

    /// Returns the amount in units of [`Tenor::unit`].
    #[inline]
    pub fn amount(&self) -> i32 {
        self.amount
    }

    /// Returns the normalised unit.
    #[inline]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Approximate length in days, used for ordering.
    fn approx_days(&self) -> f64 {
        match self.unit {
            TenorUnit::Days => self.amount as f64,
            TenorUnit::Months => self.amount as f64 * 365.25 / 12.0,
        }
    }

    /// Approximate length in years (months / 12, days / 365).
    pub fn year_fraction(&self) -> f64 {
        match self.unit {
            TenorUnit::Days => self.amount as f64 / 365.0,
            TenorUnit::Months => self.amount as f64 / 12.0,
        }
    }

    /// Adds this tenor to `date` without business-day adjustment.
    pub fn add_to(&self, date: Date) -> Result<Date, DateError> {
        match self.unit {
            TenorUnit::Days => Ok(date.add_days(self.amount as i64)),
            TenorUnit::Months => date.add_months(self.amount),
        }
    }

    /// Returns this tenor scaled by `k`, e.g. the `i`-th roll of a schedule.
    pub fn times(&self, k: i32) -> Self {
        Self {
            amount: self.amount * k,
            unit: self.unit,
        }
    }
}

impl PartialOrd for Tenor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tenor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.approx_days()
            .total_cmp(&other.approx_days())
            .then(self.unit.cmp(&other.unit))
            .then(self.amount.cmp(&other.amount))
    }
}

impl FromStr for Tenor {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || DateError::ParseError(format!("invalid tenor: {}", s));
        // unit is the last char, which need not be one byte wide
        let (idx, unit) = s.char_indices().next_back().ok_or_else(bad)?;
        let n: i32 = s[..idx].parse().map_err(|_| bad())?;
        match unit.to_ascii_uppercase() {
            'D' => Ok(Tenor::days(n)),
            'W' => Ok(Tenor::weeks(n)),
            'M' => Ok(Tenor::months(n)),
            'Y' => Ok(Tenor::years(n)),
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            TenorUnit::Months if self.amount != 0 && self.amount % 12 == 0 => {
                write!(f, "{}Y", self.amount / 12)
            }
            TenorUnit::Months => write!(f, "{}M", self.amount),
            TenorUnit::Days if self.amount != 0 && self.amount % 7 == 0 => {
                write!(f, "{}W", self.amount / 7)
            }
            TenorUnit::Days => write!(f, "{}D", self.amount),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Tenor;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Tenor {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Tenor {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalises_units() {
        assert_eq!("1Y".parse::<Tenor>().unwrap(), Tenor::months(12));
        assert_eq!("2W".parse::<Tenor>().unwrap(), Tenor::days(14));
        assert_eq!("3m".parse::<Tenor>().unwrap(), Tenor::months(3));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Tenor>().is_err());
        assert!("Y".parse::<Tenor>().is_err());
        assert!("3X".parse::<Tenor>().is_err());
        assert!("ab".parse::<Tenor>().is_err());
    }

    #[test]
    fn test_parse_rejects_multibyte_units() {
        for input in ["5€", "é", "3Ｙ", "€"] {
            assert!(
                matches!(input.parse::<Tenor>(), Err(DateError::ParseError(_))),
                "{} should not parse",
                input
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Tenor::months(24).to_string(), "2Y");
        assert_eq!(Tenor::months(18).to_string(), "18M");
        assert_eq!(Tenor::days(14).to_string(), "2W");
        assert_eq!(Tenor::days(2).to_string(), "2D");
    }

    #[test]
    fn test_ordering_by_length() {
        let mut tenors: Vec<Tenor> = ["10Y", "1M", "2D", "6M", "1W", "1Y"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        tenors.sort();
        let rendered: Vec<String> = tenors.iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, vec!["2D", "1W", "1M", "6M", "1Y", "10Y"]);
    }

    #[test]
    fn test_add_to_date() {
        let d = Date::from_ymd(2013, 6, 20).unwrap();
        assert_eq!(
            Tenor::months(3).add_to(d).unwrap(),
            Date::from_ymd(2013, 9, 20).unwrap()
        );
        assert_eq!(
            Tenor::days(-1).add_to(d).unwrap(),
            Date::from_ymd(2013, 6, 19).unwrap()
        );
    }
}
