//! Payment frequency enumeration.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::Tenor;

/// Payment frequency for scheduled instruments.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::Frequency;
///
/// let freq = Frequency::Quarterly;
/// assert_eq!(freq.periods_per_year(), 4);
/// assert_eq!(freq.months_between_payments(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frequency {
    /// Annual payments (once per year).
    Annual,
    /// Semi-annual payments (twice per year).
    SemiAnnual,
    /// Quarterly payments (four times per year).
    Quarterly,
    /// Monthly payments (twelve times per year).
    Monthly,
}

impl Frequency {
    /// Returns the number of payment periods per year.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_models::schedules::Frequency;
    ///
    /// assert_eq!(Frequency::Annual.periods_per_year(), 1);
    /// assert_eq!(Frequency::Monthly.periods_per_year(), 12);
    /// ```
    #[inline]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the number of months between payment dates.
    #[inline]
    pub fn months_between_payments(&self) -> u32 {
        12 / self.periods_per_year()
    }

    /// The payment interval as a tenor.
    ///
    /// ```
    /// use pricer_models::schedules::Frequency;
    /// use pricer_core::types::Tenor;
    ///
    /// assert_eq!(Frequency::SemiAnnual.tenor(), Tenor::months(6));
    /// ```
    #[inline]
    pub fn tenor(&self) -> Tenor {
        Tenor::months(self.months_between_payments() as i32)
    }

    /// Frequency whose interval is `tenor`, if there is one.
    ///
    /// ```
    /// use pricer_models::schedules::Frequency;
    /// use pricer_core::types::Tenor;
    ///
    /// assert_eq!(Frequency::from_tenor(Tenor::years(1)), Some(Frequency::Annual));
    /// assert_eq!(Frequency::from_tenor(Tenor::weeks(1)), None);
    /// ```
    pub fn from_tenor(tenor: Tenor) -> Option<Self> {
        [
            Frequency::Annual,
            Frequency::SemiAnnual,
            Frequency::Quarterly,
            Frequency::Monthly,
        ]
        .into_iter()
        .find(|f| f.tenor() == tenor)
    }

    /// Returns the standard name for this frequency.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Frequency {
    type Err = String;

    /// Parses frequency from string (case-insensitive).
    ///
    /// Supported formats:
    /// - Annual: "annual", "1y", "12m", "yearly"
    /// - SemiAnnual: "semi-annual", "semiannual", "6m"
    /// - Quarterly: "quarterly", "3m"
    /// - Monthly: "monthly", "1m"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "annual" | "1y" | "yearly" | "12m" => Ok(Frequency::Annual),
            "semiannual" | "6m" => Ok(Frequency::SemiAnnual),
            "quarterly" | "3m" => Ok(Frequency::Quarterly),
            "monthly" | "1m" => Ok(Frequency::Monthly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_between_payments() {
        assert_eq!(Frequency::Annual.months_between_payments(), 12);
        assert_eq!(Frequency::SemiAnnual.months_between_payments(), 6);
        assert_eq!(Frequency::Quarterly.months_between_payments(), 3);
        assert_eq!(Frequency::Monthly.months_between_payments(), 1);
    }

    #[test]
    fn test_tenor_round_trip() {
        for f in [
            Frequency::Annual,
            Frequency::SemiAnnual,
            Frequency::Quarterly,
            Frequency::Monthly,
        ] {
            assert_eq!(Frequency::from_tenor(f.tenor()), Some(f));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Frequency::Annual), "Annual");
        assert_eq!(format!("{}", Frequency::SemiAnnual), "Semi-Annual");
    }

    #[test]
    fn test_from_str_valid() {
        assert_eq!("Annual".parse::<Frequency>().unwrap(), Frequency::Annual);
        assert_eq!("1Y".parse::<Frequency>().unwrap(), Frequency::Annual);
        assert_eq!("semi-annual".parse::<Frequency>().unwrap(), Frequency::SemiAnnual);
        assert_eq!("6m".parse::<Frequency>().unwrap(), Frequency::SemiAnnual);
        assert_eq!("quarterly".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert_eq!("1m".parse::<Frequency>().unwrap(), Frequency::Monthly);
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("weekly".parse::<Frequency>().is_err());
        assert!("2y".parse::<Frequency>().is_err());
    }
}
