//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Combines bisection, secant and inverse quadratic interpolation. The
/// bracket is maintained on every step, so convergence is guaranteed for
/// continuous functions once a sign change has been found.
///
/// Iteration stops when either `|f(b)| < tolerance` or the bracket has
/// shrunk below `tolerance` (plus a machine-epsilon term relative to `b`).
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // x³ - x - 2 = 0 on [1, 2]
/// let root = solver.find_root(|x: f64| x * x * x - x - 2.0, 1.0, 2.0).unwrap();
/// assert!((root - 1.5213797068045676).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Find a root of `f` in the bracket `[a, b]`.
    ///
    /// # Errors
    ///
    /// * `SolverError::NoBracket` - `f(a)` and `f(b)` have the same sign
    /// * `SolverError::MaxIterationsExceeded` - iteration cap reached
    pub fn find_root<F>(&self, mut f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: FnMut(T) -> T,
    {
        self.try_find_root(|x| Ok::<T, SolverError>(f(x)), a, b)
    }

    /// Find a root of a fallible function in the bracket `[a, b]`.
    ///
    /// Errors raised by `f` are propagated unchanged; solver failures are
    /// converted into `E` through `From<SolverError>`.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::BrentSolver;
    /// use pricer_core::types::SolverError;
    ///
    /// let solver = BrentSolver::<f64>::with_defaults();
    /// let root = solver
    ///     .try_find_root(|x| Ok::<f64, SolverError>(x.exp() - 2.0), 0.0, 1.0)
    ///     .unwrap();
    /// assert!((root - 2.0f64.ln()).abs() < 1e-9);
    /// ```
    pub fn try_find_root<F, E>(&self, mut f: F, a: T, b: T) -> Result<T, E>
    where
        F: FnMut(T) -> Result<T, E>,
        E: From<SolverError>,
    {
        let two = T::from(2.0).unwrap();
        let three = T::from(3.0).unwrap();
        let half = T::from(0.5).unwrap();
        let tol = self.config.tolerance;

        let mut a = a;
        let mut b = b;
        let mut fa = f(a)?;
        let mut fb = f(b)?;

        if fa == T::zero() {
            return Ok(a);
        }
        if fb == T::zero() {
            return Ok(b);
        }
        if fa.signum() == fb.signum() {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            }
            .into());
        }

        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        for _ in 0..self.config.max_iterations {
            // Keep the root between b and c.
            if fb.signum() == fc.signum() {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            // b is always the best estimate.
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol1 = two * T::epsilon() * b.abs() + half * tol;
            let xm = half * (c - b);
            if xm.abs() <= tol1 || fb.abs() < tol {
                return Ok(b);
            }

            if e.abs() >= tol1 && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    (two * xm * s, T::one() - s)
                } else {
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * xm * q * (q - r) - (b - a) * (r - T::one())),
                        (q - T::one()) * (r - T::one()) * (s - T::one()),
                    )
                };
                if p > T::zero() {
                    q = -q;
                }
                p = p.abs();
                let min1 = three * xm * q - (tol1 * q).abs();
                let min2 = (e * q).abs();
                if two * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = xm;
                    e = d;
                }
            } else {
                d = xm;
                e = d;
            }

            a = b;
            fa = fb;
            b = if d.abs() > tol1 {
                b + d
            } else if xm > T::zero() {
                b + tol1
            } else {
                b - tol1
            };
            fb = f(b)?;
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        }
        .into())
    }
}

/// Widens `[lo, hi]` by doubling `hi` until `f` changes sign.
///
/// Used when only a lower bound of the root is known, such as a hazard
/// rate or a discount factor exponent.
///
/// # Errors
///
/// `SolverError::NoBracket` when no sign change is found within
/// `max_expansions` doublings.
pub fn expand_bracket_upward<T, F, E>(
    mut f: F,
    lo: T,
    hi: T,
    max_expansions: usize,
) -> Result<(T, T), E>
where
    T: Float,
    F: FnMut(T) -> Result<T, E>,
    E: From<SolverError>,
{
    let two = T::from(2.0).unwrap();
    let flo = f(lo)?;
    let mut hi = hi;
    for _ in 0..=max_expansions {
        let fhi = f(hi)?;
        if flo.signum() != fhi.signum() || fhi == T::zero() {
            return Ok((lo, hi));
        }
        hi = lo + two * (hi - lo);
    }
    Err(SolverError::NoBracket {
        a: lo.to_f64().unwrap_or(f64::NAN),
        b: hi.to_f64().unwrap_or(f64::NAN),
    }
    .into())
}
