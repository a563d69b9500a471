//! First-order sensitivities of present values to market data.
//!
//! Curve sensitivities are keyed by curve name and hold `(time, value)`
//! pairs: the derivative of the present value with respect to the
//! continuously compounded zero rate at `time`. Volatility sensitivities
//! are keyed by surface coordinates `(expiry, tenor)`.
//!
//! Both are additive and can be scaled, so sensitivities of a portfolio
//! are the sum of the trade sensitivities.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Zero-rate sensitivities grouped by curve name.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::CurveSensitivityBuilder;
///
/// let sens = CurveSensitivityBuilder::new()
///     .add("USD-DSC", 2.0, 10.0)
///     .add("USD-DSC", 1.0, -3.0)
///     .add("USD-DSC", 2.0, 5.0)
///     .build();
///
/// assert_eq!(sens.curve("USD-DSC").unwrap(), &[(1.0, -3.0), (2.0, 15.0)]);
/// assert_eq!(sens.total("USD-DSC"), 12.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveSensitivity {
    sensitivities: BTreeMap<String, Vec<(f64, f64)>>,
}

impl CurveSensitivity {
    /// Empty sensitivity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sensitivity to a single curve.
    pub fn of(curve: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        let mut sensitivities = BTreeMap::new();
        sensitivities.insert(curve.into(), points);
        Self { sensitivities }.cleaned()
    }

    /// Points for `curve`, if any.
    pub fn curve(&self, curve: &str) -> Option<&[(f64, f64)]> {
        self.sensitivities.get(curve).map(Vec::as_slice)
    }

    /// Iterate over `(curve name, points)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(f64, f64)])> {
        self.sensitivities
            .iter()
            .map(|(name, points)| (name.as_str(), points.as_slice()))
    }

    /// Names of the curves with sensitivities.
    pub fn curve_names(&self) -> impl Iterator<Item = &str> {
        self.sensitivities.keys().map(String::as_str)
    }

    /// Returns true if no curve carries any point.
    pub fn is_empty(&self) -> bool {
        self.sensitivities.values().all(Vec::is_empty)
    }

    /// Sum of the values for `curve`; the parallel-shift sensitivity.
    pub fn total(&self, curve: &str) -> f64 {
        self.curve(curve)
            .map(|points| points.iter().map(|(_, v)| v).sum())
            .unwrap_or(0.0)
    }

    /// Sum of two sensitivities.
    pub fn plus(&self, other: &CurveSensitivity) -> CurveSensitivity {
        let mut out = self.sensitivities.clone();
        for (name, points) in &other.sensitivities {
            out.entry(name.clone())
                .or_default()
                .extend(points.iter().copied());
        }
        CurveSensitivity { sensitivities: out }.cleaned()
    }

    /// Sensitivity scaled by `factor`.
    pub fn multiplied_by(&self, factor: f64) -> CurveSensitivity {
        let sensitivities = self
            .sensitivities
            .iter()
            .map(|(name, points)| {
                let scaled = points.iter().map(|&(t, v)| (t, v * factor)).collect();
                (name.clone(), scaled)
            })
            .collect();
        CurveSensitivity { sensitivities }
    }

    /// Points sorted by time with equal times merged.
    pub fn cleaned(&self) -> CurveSensitivity {
        let sensitivities = self
            .sensitivities
            .iter()
            .map(|(name, points)| {
                let mut sorted = points.clone();
                sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
                let mut merged: Vec<(f64, f64)> = Vec::with_capacity(sorted.len());
                for (t, v) in sorted {
                    match merged.last_mut() {
                        Some(last) if last.0 == t => last.1 += v,
                        _ => merged.push((t, v)),
                    }
                }
                (name.clone(), merged)
            })
            .collect();
        CurveSensitivity { sensitivities }
    }
}

/// Incremental constructor for [`CurveSensitivity`].
#[derive(Debug, Clone, Default)]
pub struct CurveSensitivityBuilder {
    sensitivities: BTreeMap<String, Vec<(f64, f64)>>,
}

impl CurveSensitivityBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the sensitivity `value` at `time` on `curve`.
    pub fn add(mut self, curve: &str, time: f64, value: f64) -> Self {
        self.push(curve, time, value);
        self
    }

    /// In-place variant of [`add`](Self::add), for loops.
    pub fn push(&mut self, curve: &str, time: f64, value: f64) {
        self.sensitivities
            .entry(curve.to_string())
            .or_default()
            .push((time, value));
    }

    /// Adds every point of `other`, scaled by `factor`.
    pub fn add_scaled(mut self, other: &CurveSensitivity, factor: f64) -> Self {
        for (name, points) in other.iter() {
            for &(t, v) in points {
                self.push(name, t, v * factor);
            }
        }
        self
    }

    /// Finishes the sensitivity, sorting and merging points.
    pub fn build(self) -> CurveSensitivity {
        CurveSensitivity {
            sensitivities: self.sensitivities,
        }
        .cleaned()
    }
}

/// Coordinates of a swaption volatility surface.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfacePoint {
    /// Option expiry in years.
    pub expiry: f64,
    /// Underlying swap tenor in years.
    pub tenor: f64,
}

impl SurfacePoint {
    /// Point `(expiry, tenor)`.
    pub fn new(expiry: f64, tenor: f64) -> Self {
        Self { expiry, tenor }
    }
}

impl PartialEq for SurfacePoint {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SurfacePoint {}

impl PartialOrd for SurfacePoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SurfacePoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.expiry
            .total_cmp(&other.expiry)
            .then(self.tenor.total_cmp(&other.tenor))
    }
}

/// Black-volatility sensitivities keyed by surface point.
///
/// ```
/// use pricer_core::market_data::{SurfacePoint, VolatilitySensitivity};
///
/// let vega = VolatilitySensitivity::of(SurfacePoint::new(1.0, 5.0), 120.0);
/// let both = vega.plus(&vega.multiplied_by(-0.5));
/// assert_eq!(both.get(SurfacePoint::new(1.0, 5.0)), Some(60.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolatilitySensitivity {
    sensitivities: BTreeMap<SurfacePoint, f64>,
}

impl VolatilitySensitivity {
    /// Empty sensitivity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sensitivity `value` at a single point.
    pub fn of(point: SurfacePoint, value: f64) -> Self {
        let mut sensitivities = BTreeMap::new();
        sensitivities.insert(point, value);
        Self { sensitivities }
    }

    /// Value at `point`, if present.
    pub fn get(&self, point: SurfacePoint) -> Option<f64> {
        self.sensitivities.get(&point).copied()
    }

    /// Iterate over `(point, value)` in expiry then tenor order.
    pub fn iter(&self) -> impl Iterator<Item = (SurfacePoint, f64)> + '_ {
        self.sensitivities.iter().map(|(p, v)| (*p, *v))
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.sensitivities.values().sum()
    }

    /// Sum of two sensitivities; values at equal points are added.
    pub fn plus(&self, other: &VolatilitySensitivity) -> VolatilitySensitivity {
        let mut out = self.sensitivities.clone();
        for (p, v) in &other.sensitivities {
            *out.entry(*p).or_insert(0.0) += v;
        }
        VolatilitySensitivity { sensitivities: out }
    }

    /// Sensitivity scaled by `factor`.
    pub fn multiplied_by(&self, factor: f64) -> VolatilitySensitivity {
        VolatilitySensitivity {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|(p, v)| (*p, v * factor))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_merges_equal_times() {
        let s = CurveSensitivityBuilder::new()
            .add("A", 1.0, 1.0)
            .add("A", 1.0, 2.0)
            .add("B", 0.5, -1.0)
            .build();
        assert_eq!(s.curve("A").unwrap(), &[(1.0, 3.0)]);
        assert_eq!(s.curve_names().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_plus_is_additive_across_curves() {
        let a = CurveSensitivity::of("A", vec![(1.0, 1.0)]);
        let b = CurveSensitivity::of("B", vec![(2.0, 4.0)]);
        let c = a.plus(&b).plus(&a);
        assert_eq!(c.total("A"), 2.0);
        assert_eq!(c.total("B"), 4.0);
        assert_eq!(c.total("missing"), 0.0);
    }

    #[test]
    fn test_multiplied_by_negates() {
        let a = CurveSensitivity::of("A", vec![(1.0, 1.5), (3.0, -2.0)]);
        let neg = a.multiplied_by(-1.0);
        assert_eq!(neg.curve("A").unwrap(), &[(1.0, -1.5), (3.0, 2.0)]);
        assert!(a.plus(&neg).curve("A").unwrap().iter().all(|(_, v)| *v == 0.0));
    }

    #[test]
    fn test_add_scaled() {
        let a = CurveSensitivity::of("A", vec![(1.0, 2.0)]);
        let s = CurveSensitivityBuilder::new().add_scaled(&a, 3.0).build();
        assert_eq!(s.total("A"), 6.0);
    }

    #[test]
    fn test_empty() {
        assert!(CurveSensitivity::new().is_empty());
        assert!(!CurveSensitivity::of("A", vec![(1.0, 0.0)]).is_empty());
    }

    #[test]
    fn test_surface_point_ordering() {
        let mut points = vec![
            SurfacePoint::new(2.0, 1.0),
            SurfacePoint::new(1.0, 10.0),
            SurfacePoint::new(1.0, 5.0),
        ];
        points.sort();
        assert_eq!(points[0], SurfacePoint::new(1.0, 5.0));
        assert_eq!(points[2], SurfacePoint::new(2.0, 1.0));
    }

    #[test]
    fn test_volatility_sensitivity_total() {
        let v = VolatilitySensitivity::of(SurfacePoint::new(1.0, 5.0), 10.0)
            .plus(&VolatilitySensitivity::of(SurfacePoint::new(2.0, 5.0), 5.0));
        assert_eq!(v.total(), 15.0);
        assert_eq!(v.iter().count(), 2);
    }
}
