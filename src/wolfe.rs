//! Inexact line search satisfying the approximate Wolfe conditions.
//!
//! The bracketing and secant steps follow the `secant2` method of
//! _Hager & Zhang'06_, slightly modified to avoid some corner cases where the
//! plain method fails: a secant step that leaves the bracket or would
//! climb out of a local minimum is replaced by bisection.

use crate::lin::Lin;
use crate::line::{constant, to_f64, Evaluations, LineMin, LineSearch, LineSearchError,
                  LineStart, LineWork};
use crate::objective::Objective;
use log::trace;
use num_traits::Float;

/// Parameters of the approximate Wolfe line search.
#[derive(Debug, Clone)]
pub struct Wolfe<S: Float> {
    /// `delta` for Wolfe condition
    pub delta: S,
    /// `sigma` for Wolfe condition
    pub sigma: S,
    /// `epsilon` for approximate Wolfe condition (to allow for value function to increase
    /// because of rounding of errors when close to the minimum)
    pub epsilon: S,
    /// Bisection coefficient when secant fails; allowed values in `(0, 1)`
    pub theta: S,
    /// Extension factor for finding the initial bracketing interval; `> 1`
    pub rho: S,
    /// Largest initial trial step
    pub alpha_max: S,
    /// Maximum number of secant iterations
    pub max_iter: usize,
    /// Maximum number of bisections when updating a bracket
    pub update_max_iter: usize,
    /// Maximum number of initial bracketing expansions
    pub bracket_max_iter: usize,
}

impl<S: Float> Default for Wolfe<S> {
    // Defaults for `secant2` method given in [HZ'06]
    fn default() -> Self {
        Wolfe {
            delta: constant(0.1),
            sigma: constant(0.9),
            epsilon: constant(1e-6),
            theta: constant(0.5),
            rho: constant(5.),
            alpha_max: S::one(),
            max_iter: 32,
            update_max_iter: 32,
            bracket_max_iter: 16,
        }
    }
}

/// `ϕ` sampled at `t`.
#[derive(Debug, Clone, Copy)]
pub struct Sample<S> {
    pub t: S,
    pub value: S,
    pub slope: S,
}

impl<S: Float> Sample<S> {
    pub fn new(t: S, (value, slope): (S, S)) -> Self {
        Sample { t, value, slope }
    }
}

impl<S: Float> Wolfe<S> {
    pub fn new() -> Self {
        Default::default()
    }

    /// First trial step from the decrease achieved in the previous iteration:
    /// `min(alpha_max, 2.02 (ϕ(0) - fold) / ϕ'(0))`.
    pub fn initial_step(&self, start: &LineStart<S>) -> S {
        let c = constant::<S>(2.02) * (start.value - start.fold) / start.slope;
        if c > S::zero() && c.is_finite() {
            c.min(self.alpha_max)
        } else {
            self.alpha_max
        }
    }

    /// Find a point satisfying the approximate Wolfe conditions.
    ///
    ///   - `phi` should be the function `|t| (ϕ(t), ϕ'(t))`.
    ///   - `c` specifies the initial search interval `(0, c)`.
    ///   - `origin` is `ϕ` at `t = 0`, which must have `ϕ'(0) < 0`.
    pub fn find_wolfe<Func>(&self,
                            c: S,
                            mut phi: Func,
                            origin: Sample<S>) -> Result<Sample<S>, LineSearchError>
        where Func: FnMut(S) -> (S, S) {
        if !(origin.slope < S::zero()) {
            return Err(LineSearchError::NotDescent);
        }
        debug_assert!(c > S::zero());

        let mut f = |t: S| {
            let s = Sample::new(t, phi(t));
            trace!("ϕ({:e}) = {:e}, ϕ' = {:e}", to_f64(s.t), to_f64(s.value), to_f64(s.slope));
            if s.value.is_finite() {
                Ok(s)
            } else {
                Err(LineSearchError::NonFinite(to_f64(t)))
            }
        };

        let f0_eps = origin.value + self.epsilon;
        let first = f(c)?;
        let (mut a, mut b) = self.bracket(origin, first, &mut f, f0_eps)?;

        for _ in 0..self.max_iter {
            // here we handle the case when b gets stuck at a local minimum of ϕ with
            // ϕ(b) > ϕ(0) + ε
            let ctheta = a.t + self.theta * (b.t - a.t);
            let mut ct = secant(&a, &b);
            if !ct.is_finite() || (ct > ctheta && b.value + (ct - b.t) * b.slope > f0_eps) {
                ct = ctheta;
            }

            let c = f(ct)?;
            if self.wolfe(&c, f0_eps, origin.slope) {
                return Ok(c);
            }

            let ct = if c.slope >= S::zero() {
                let t = secant(&b, &c);
                b = c;
                t
            } else if c.value <= f0_eps {
                let t = secant(&a, &c);
                a = c;
                t
            } else {
                let ab = self.update(a, c, &mut f, f0_eps)?;
                a = ab.0;
                b = ab.1;
                continue;
            };

            // a second secant outside of the bracket is replaced by bisection
            let ct = if ct.is_finite() && a.t < ct && ct < b.t {
                ct
            } else {
                a.t + self.theta * (b.t - a.t)
            };

            let c = f(ct)?;
            if self.wolfe(&c, f0_eps, origin.slope) {
                return Ok(c);
            }

            if c.slope >= S::zero() {
                b = c;
            } else if c.value <= f0_eps {
                a = c;
            } else {
                let ab = self.update(a, c, &mut f, f0_eps)?;
                a = ab.0;
                b = ab.1;
            }
        }
        Err(LineSearchError::MaxIterReached(self.max_iter))
    }

    // U3a--b bracket update loop in [HZ'06]: bisect `[a, b]` until the right
    // end has nonnegative slope.
    //
    // - `f0_eps` is `ϕ(0) + ε`
    fn update<Func>(&self,
                    mut a: Sample<S>,
                    mut b: Sample<S>,
                    f: &mut Func,
                    f0_eps: S) -> Result<(Sample<S>, Sample<S>), LineSearchError>
        where Func: FnMut(S) -> Result<Sample<S>, LineSearchError> {
        debug_assert!(a.t < b.t);
        debug_assert!(a.value <= f0_eps && f0_eps < b.value);

        for _ in 0..self.update_max_iter {
            let c = f(a.t + self.theta * (b.t - a.t))?;

            if c.slope >= S::zero() {
                return Ok((a, c));
            } else if c.value <= f0_eps {
                a = c;
            } else {
                b = c;
            }
        }

        Err(LineSearchError::UpdateBracketMaxIterReached(self.update_max_iter))
    }

    // Initial bracketing: `bracket(c)` method in [HZ'06]
    fn bracket<Func>(&self,
                     origin: Sample<S>,
                     mut b: Sample<S>,
                     f: &mut Func,
                     f0_eps: S) -> Result<(Sample<S>, Sample<S>), LineSearchError>
        where Func: FnMut(S) -> Result<Sample<S>, LineSearchError> {
        let mut a = origin;

        for _ in 0..self.bracket_max_iter {
            if b.slope >= S::zero() {
                return Ok((a, b));
            } else if b.value > f0_eps {
                return self.update(origin, b, f, f0_eps);
            } else {
                a = b;
                b = f(self.rho * b.t)?;
            }
        }

        Err(LineSearchError::InitBracketMaxIterReached(self.bracket_max_iter))
    }

    // ϕ(c) ≤ ϕ(0) + ε && σϕ'(0) ≤ ϕ'(c) ≤ (2δ - 1)ϕ'(0)
    fn wolfe(&self, c: &Sample<S>, f0_eps: S, fd0: S) -> bool {
        c.value <= f0_eps
            && self.sigma * fd0 <= c.slope
            && c.slope <= (self.delta + self.delta - S::one()) * fd0
    }
}

impl<S: Float> LineSearch<S> for Wolfe<S> {
    fn search<V, O>(&self,
                    obj: &O,
                    x: &mut V,
                    dir: &V,
                    start: LineStart<S>,
                    work: &mut LineWork<V>) -> Result<LineMin<S>, LineSearchError>
        where V: Lin<F = S> + Clone,
              O: Objective<V> {
        let mut evaluations = Evaluations::default();
        let c = self.initial_step(&start);

        let accepted = {
            let phi = |t| {
                evaluations.value += 1;
                evaluations.gradient += 1;
                work.point.clone_from(x);
                work.point.ray_to(dir, t);
                let v = obj.value(&work.point);
                obj.gradient(&work.point, &mut work.grad);
                (v, work.grad.dot(dir))
            };
            self.find_wolfe(c, phi, Sample { t: S::zero(), value: start.value, slope: start.slope })?
        };

        x.ray_to(dir, accepted.t);
        Ok(LineMin {
            step: accepted.t,
            value: accepted.value,
            evaluations,
        })
    }
}

fn secant<S: Float>(a: &Sample<S>, b: &Sample<S>) -> S {
    (a.t * b.slope - b.t * a.slope) / (b.slope - a.slope)
}
