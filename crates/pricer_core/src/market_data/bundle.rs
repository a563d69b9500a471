//! Read-only market data bundle passed to pricing methods.

use std::collections::BTreeMap;

use super::curves::CurveEnum;
use super::error::MarketDataError;
use super::surfaces::SwaptionVolatility;
use crate::types::Currency;

/// Named curves, the currency → discount curve map and an optional
/// swaption volatility surface.
///
/// A bundle is immutable once built. Pricers look curves up by the names
/// stored on the instrument, so the same bundle can serve any number of
/// trades and threads.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::CurveEnum;
/// use pricer_core::market_data::surfaces::FlatSwaptionVolatility;
/// use pricer_core::market_data::MarketBundle;
/// use pricer_core::types::Currency;
///
/// let bundle = MarketBundle::builder()
///     .curve("USD-OIS", CurveEnum::flat(0.02))
///     .curve("USD-LIBOR3M", CurveEnum::flat(0.025))
///     .discount_curve(Currency::USD, "USD-OIS")
///     .swaption_volatility(FlatSwaptionVolatility::new(0.2))
///     .build()
///     .unwrap();
///
/// assert_eq!(bundle.discount_curve_name(Currency::USD).unwrap(), "USD-OIS");
/// assert!(bundle.curve("USD-LIBOR3M").is_ok());
/// assert!(bundle.curve("EUR-OIS").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketBundle {
    curves: BTreeMap<String, CurveEnum>,
    discount_curves: BTreeMap<Currency, String>,
    swaption_volatility: Option<SwaptionVolatility>,
}

impl MarketBundle {
    /// Start building a bundle.
    pub fn builder() -> MarketBundleBuilder {
        MarketBundleBuilder::default()
    }

    /// Curve stored under `name`.
    pub fn curve(&self, name: &str) -> Result<&CurveEnum, MarketDataError> {
        self.curves
            .get(name)
            .ok_or_else(|| MarketDataError::CurveNotFound(name.to_string()))
    }

    /// Name of the discount curve for `currency`.
    pub fn discount_curve_name(&self, currency: Currency) -> Result<&str, MarketDataError> {
        self.discount_curves
            .get(&currency)
            .map(String::as_str)
            .ok_or_else(|| {
                MarketDataError::CurveNotFound(format!("no discount curve for {}", currency))
            })
    }

    /// Discount curve for `currency`.
    pub fn discount_curve(&self, currency: Currency) -> Result<&CurveEnum, MarketDataError> {
        self.curve(self.discount_curve_name(currency)?)
    }

    /// Swaption volatility surface, if the bundle carries one.
    pub fn swaption_volatility(&self) -> Option<&SwaptionVolatility> {
        self.swaption_volatility.as_ref()
    }

    /// Names of all stored curves.
    pub fn curve_names(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }
}

/// Builder for [`MarketBundle`].
#[derive(Debug, Clone, Default)]
pub struct MarketBundleBuilder {
    curves: BTreeMap<String, CurveEnum>,
    discount_curves: BTreeMap<Currency, String>,
    swaption_volatility: Option<SwaptionVolatility>,
}

impl MarketBundleBuilder {
    /// Store `curve` under `name`, replacing any previous curve of that name.
    pub fn curve(mut self, name: impl Into<String>, curve: impl Into<CurveEnum>) -> Self {
        self.curves.insert(name.into(), curve.into());
        self
    }

    /// Use the curve named `name` to discount `currency` cash flows.
    pub fn discount_curve(mut self, currency: Currency, name: impl Into<String>) -> Self {
        self.discount_curves.insert(currency, name.into());
        self
    }

    /// Attach a swaption volatility surface.
    pub fn swaption_volatility(mut self, surface: impl Into<SwaptionVolatility>) -> Self {
        self.swaption_volatility = Some(surface.into());
        self
    }

    /// Finish the bundle.
    ///
    /// # Errors
    ///
    /// `CurveNotFound` if a discount mapping names a curve that was not added.
    pub fn build(self) -> Result<MarketBundle, MarketDataError> {
        if let Some(missing) = self
            .discount_curves
            .values()
            .find(|name| !self.curves.contains_key(name.as_str()))
        {
            return Err(MarketDataError::CurveNotFound(missing.clone()));
        }
        Ok(MarketBundle {
            curves: self.curves,
            discount_curves: self.discount_curves,
            swaption_volatility: self.swaption_volatility,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::curves::YieldCurve;

    #[test]
    fn test_dangling_discount_mapping_rejected() {
        let result = MarketBundle::builder()
            .discount_curve(Currency::EUR, "EUR-ESTR")
            .build();
        assert_eq!(
            result,
            Err(MarketDataError::CurveNotFound("EUR-ESTR".to_string()))
        );
    }

    #[test]
    fn test_discount_curve_lookup() {
        let bundle = MarketBundle::builder()
            .curve("EUR-ESTR", CurveEnum::flat(0.03))
            .discount_curve(Currency::EUR, "EUR-ESTR")
            .build()
            .unwrap();
        let df = bundle
            .discount_curve(Currency::EUR)
            .unwrap()
            .discount_factor(1.0)
            .unwrap();
        assert!((df - (-0.03f64).exp()).abs() < 1e-15);
        assert!(bundle.discount_curve(Currency::USD).is_err());
        assert!(bundle.swaption_volatility().is_none());
    }

    #[test]
    fn test_bundle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarketBundle>();
    }
}
