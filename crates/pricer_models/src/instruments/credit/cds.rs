//! Credit default swap under ISDA standard-model conventions.
//!
//! # Structure
//!
//! A CDS consists of:
//! - **Protection leg**: pays `(1 - R)` of the notional on default before maturity
//! - **Premium leg**: pays the running coupon on the fee schedule until
//!   default or maturity, plus the accrued coupon at default
//!
//! # Example
//!
//! ```
//! use pricer_core::types::Date;
//! use pricer_models::instruments::credit::IsdaCdsDefinition;
//!
//! let cds = IsdaCdsDefinition::builder(
//!     Date::from_ymd(2013, 3, 20).unwrap(),
//!     Date::from_ymd(2018, 6, 20).unwrap(),
//! )
//! .notional(1.0e7)
//! .coupon(0.01)
//! .recovery_rate(0.4)
//! .build()
//! .unwrap();
//!
//! let coupons = cds.coupons().unwrap();
//! assert_eq!(coupons.len(), 21);
//! // protection includes the maturity date
//! assert_eq!(coupons[20].accrual_end, Date::from_ymd(2018, 6, 21).unwrap());
//! ```

use pricer_core::types::{
    BusinessDayConvention, Currency, Date, DayCountConvention, HolidayCalendar, PricingError,
};
use std::fmt;

use crate::schedules::{DateGeneration, Frequency, ScheduleBuilder};

/// One fee period of a CDS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdsCoupon {
    /// Accrual start.
    pub accrual_start: Date,
    /// Accrual end; one day past maturity on the last coupon when protection
    /// starts at the beginning of the day.
    pub accrual_end: Date,
    /// Payment date.
    pub payment_date: Date,
    /// Accrual year fraction in the contract day count.
    pub year_fraction: f64,
}

/// Contract terms of a CDS priced with the ISDA standard model.
///
/// The coupon is a running spread in decimal (100bp = 0.01); the notional
/// is the protection amount. Buyer-of-protection sign convention: the
/// upfront is protection minus premium.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsdaCdsDefinition {
    currency: Currency,
    notional: f64,
    coupon: f64,
    recovery_rate: f64,
    start_date: Date,
    maturity: Date,
    coupon_frequency: Frequency,
    day_count: DayCountConvention,
    business_day_convention: BusinessDayConvention,
    calendar: HolidayCalendar,
    accrual_on_default: bool,
    pay_on_default: bool,
    protect_start: bool,
}

impl IsdaCdsDefinition {
    /// Builder with the standard conventions: quarterly ACT/360 fees,
    /// Following on a Monday-to-Friday calendar, accrual paid on default,
    /// protection paid on default and starting at the beginning of the day.
    pub fn builder(start_date: Date, maturity: Date) -> IsdaCdsDefinitionBuilder {
        IsdaCdsDefinitionBuilder {
            definition: IsdaCdsDefinition {
                currency: Currency::USD,
                notional: 1.0,
                coupon: 0.01,
                recovery_rate: 0.4,
                start_date,
                maturity,
                coupon_frequency: Frequency::Quarterly,
                day_count: DayCountConvention::Actual360,
                business_day_convention: BusinessDayConvention::Following,
                calendar: HolidayCalendar::new("MondayToFriday", []),
                accrual_on_default: true,
                pay_on_default: true,
                protect_start: true,
            },
        }
    }

    /// Start date used when a contract does not state one: twenty years
    /// before maturity, rolled Following, which is before any pricing date
    /// of interest.
    pub fn default_start_date(
        maturity: Date,
        calendar: &HolidayCalendar,
    ) -> Result<Date, PricingError> {
        let start = maturity.add_years(-20)?;
        Ok(BusinessDayConvention::Following.adjust(start, calendar))
    }

    /// Currency of the contract.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Protection notional.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Running coupon (decimal).
    #[inline]
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// Recovery rate assumed on default.
    #[inline]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Accrual and protection start date.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Scheduled maturity (unadjusted).
    #[inline]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Fee payment frequency.
    #[inline]
    pub fn coupon_frequency(&self) -> Frequency {
        self.coupon_frequency
    }

    /// Fee accrual day count.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Business-day convention of the fee dates.
    #[inline]
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        self.business_day_convention
    }

    /// Holiday calendar of the fee dates.
    #[inline]
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Whether the accrued coupon is paid on default.
    #[inline]
    pub fn accrual_on_default(&self) -> bool {
        self.accrual_on_default
    }

    /// Whether protection pays at default (otherwise at maturity).
    #[inline]
    pub fn pay_on_default(&self) -> bool {
        self.pay_on_default
    }

    /// Whether protection starts at the beginning of the start day.
    #[inline]
    pub fn protect_start(&self) -> bool {
        self.protect_start
    }

    /// Same contract with another running coupon.
    pub fn with_coupon(&self, coupon: f64) -> Self {
        Self {
            coupon,
            ..self.clone()
        }
    }

    /// Same contract with another maturity.
    pub fn with_maturity(&self, maturity: Date) -> Self {
        Self {
            maturity,
            ..self.clone()
        }
    }

    /// Fee periods, rolled backward from maturity so any stub is at the
    /// front.
    ///
    /// Accrual dates are business-day adjusted except the final accrual
    /// end, which is the unadjusted maturity (plus one day with
    /// `protect_start`). The final payment is on the adjusted maturity.
    pub fn coupons(&self) -> Result<Vec<CdsCoupon>, PricingError> {
        let schedule = ScheduleBuilder::new()
            .start(self.start_date)
            .end(self.maturity)
            .frequency(self.coupon_frequency)
            .day_count(self.day_count)
            .business_day_convention(self.business_day_convention)
            .calendar(self.calendar.clone())
            .generation(DateGeneration::Backward)
            .build()?;

        let last = schedule.len() - 1;
        let coupons = schedule
            .iter()
            .enumerate()
            .map(|(i, period)| {
                let accrual_end = if i == last {
                    if self.protect_start {
                        self.maturity.add_days(1)
                    } else {
                        self.maturity
                    }
                } else {
                    period.end()
                };
                CdsCoupon {
                    accrual_start: period.start(),
                    accrual_end,
                    payment_date: period.payment(),
                    year_fraction: self.day_count.year_fraction(period.start(), accrual_end),
                }
            })
            .collect();
        Ok(coupons)
    }
}

impl fmt::Display for IsdaCdsDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CDS {} {} {}bp R={} {} to {}",
            self.currency,
            self.notional,
            self.coupon * 1.0e4,
            self.recovery_rate,
            self.start_date,
            self.maturity
        )
    }
}

/// Builder for [`IsdaCdsDefinition`].
#[derive(Debug, Clone)]
pub struct IsdaCdsDefinitionBuilder {
    definition: IsdaCdsDefinition,
}

impl IsdaCdsDefinitionBuilder {
    /// Sets the currency.
    pub fn currency(mut self, currency: Currency) -> Self {
        self.definition.currency = currency;
        self
    }

    /// Sets the protection notional.
    pub fn notional(mut self, notional: f64) -> Self {
        self.definition.notional = notional;
        self
    }

    /// Sets the running coupon (decimal).
    pub fn coupon(mut self, coupon: f64) -> Self {
        self.definition.coupon = coupon;
        self
    }

    /// Sets the recovery rate.
    pub fn recovery_rate(mut self, recovery_rate: f64) -> Self {
        self.definition.recovery_rate = recovery_rate;
        self
    }

    /// Sets the fee frequency.
    pub fn coupon_frequency(mut self, frequency: Frequency) -> Self {
        self.definition.coupon_frequency = frequency;
        self
    }

    /// Sets the fee day count.
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.definition.day_count = day_count;
        self
    }

    /// Sets the business-day convention of the fee dates.
    pub fn business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.definition.business_day_convention = convention;
        self
    }

    /// Sets the holiday calendar.
    pub fn calendar(mut self, calendar: HolidayCalendar) -> Self {
        self.definition.calendar = calendar;
        self
    }

    /// Pay the accrued coupon on default.
    pub fn accrual_on_default(mut self, flag: bool) -> Self {
        self.definition.accrual_on_default = flag;
        self
    }

    /// Pay protection at default rather than at maturity.
    pub fn pay_on_default(mut self, flag: bool) -> Self {
        self.definition.pay_on_default = flag;
        self
    }

    /// Protection from the beginning of the start day.
    pub fn protect_start(mut self, flag: bool) -> Self {
        self.definition.protect_start = flag;
        self
    }

    /// Builds the definition.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the start is not before maturity, the
    /// notional is not positive, the coupon is negative or the recovery
    /// rate lies outside `[0, 1)`.
    pub fn build(self) -> Result<IsdaCdsDefinition, PricingError> {
        let d = self.definition;
        if d.start_date >= d.maturity {
            return Err(PricingError::InvalidArgument(format!(
                "CDS start {} must precede maturity {}",
                d.start_date, d.maturity
            )));
        }
        if !(d.notional.is_finite() && d.notional > 0.0) {
            return Err(PricingError::InvalidArgument(format!(
                "CDS notional must be positive, got {}",
                d.notional
            )));
        }
        if !(d.coupon.is_finite() && d.coupon >= 0.0) {
            return Err(PricingError::InvalidArgument(format!(
                "CDS coupon must be non-negative, got {}",
                d.coupon
            )));
        }
        if !(0.0..1.0).contains(&d.recovery_rate) {
            return Err(PricingError::InvalidArgument(format!(
                "recovery rate must lie in [0, 1), got {}",
                d.recovery_rate
            )));
        }
        Ok(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn cds() -> IsdaCdsDefinition {
        IsdaCdsDefinition::builder(date(2013, 3, 20), date(2018, 6, 20))
            .build()
            .unwrap()
    }

    #[test]
    fn test_quarterly_schedule_rolls_backward() {
        let coupons = cds().coupons().unwrap();
        assert_eq!(coupons.first().unwrap().accrual_start, date(2013, 3, 20));
        // 2013-09-20 is a Friday, 2014-09-20 a Saturday
        assert_eq!(coupons[1].accrual_end, date(2013, 9, 20));
        assert_eq!(coupons[5].accrual_end, date(2014, 9, 22));
        assert_eq!(coupons[6].accrual_start, date(2014, 9, 22));
        for w in coupons.windows(2) {
            assert_eq!(w[0].accrual_end, w[1].accrual_start);
        }
    }

    #[test]
    fn test_last_coupon_without_protect_start() {
        let cds = IsdaCdsDefinition::builder(date(2013, 3, 20), date(2018, 6, 20))
            .protect_start(false)
            .build()
            .unwrap();
        let coupons = cds.coupons().unwrap();
        let last = coupons.last().unwrap();
        assert_eq!(last.accrual_end, date(2018, 6, 20));
        assert_eq!(last.payment_date, date(2018, 6, 20));
        assert!((last.year_fraction - 92.0 / 360.0).abs() < 1e-15);
    }

    #[test]
    fn test_default_start_date() {
        // 1998-06-20 is a Saturday
        let start = IsdaCdsDefinition::default_start_date(
            date(2018, 6, 20),
            &HolidayCalendar::new("MondayToFriday", []),
        )
        .unwrap();
        assert_eq!(start, date(1998, 6, 22));
    }

    #[test]
    fn test_validation() {
        let b = || IsdaCdsDefinition::builder(date(2013, 3, 20), date(2018, 6, 20));
        assert!(b().recovery_rate(1.0).build().is_err());
        assert!(b().notional(0.0).build().is_err());
        assert!(b().coupon(-0.01).build().is_err());
        assert!(IsdaCdsDefinition::builder(date(2018, 6, 20), date(2018, 6, 20))
            .build()
            .is_err());
    }

    #[test]
    fn test_with_coupon_keeps_terms() {
        let base = cds();
        let other = base.with_coupon(0.05);
        assert_eq!(other.coupon(), 0.05);
        assert_eq!(other.maturity(), base.maturity());
        assert_eq!(other.with_coupon(base.coupon()), base);
    }
}
