//! Line minimization along a search direction.
//!
//! A line search minimizes `ϕ(t) = f(x + t u)` for a point `x` and a direction
//! `u`, and moves `x` to the point it found. The two strategies are
//! `Wolfe` (inexact, approximate Wolfe conditions, uses gradients) and `Brent`
//! (bracketing followed by Brent's method, derivative-free).

use crate::lin::Lin;
use crate::objective::Objective;
use num_traits::Float;
use std::ops::AddAssign;
use thiserror::Error;

/// Which line search the optimizer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMethod {
    /// `Wolfe`: approximate Wolfe conditions, `secant2` scheme
    Wolfe,
    /// `Brent`: bracketing and Brent's parabolic interpolation
    Brent,
}

impl Default for LineMethod {
    fn default() -> Self {
        LineMethod::Wolfe
    }
}

/// Number of function and gradient evaluations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluations {
    pub value: usize,
    pub gradient: usize,
}

impl AddAssign for Evaluations {
    fn add_assign(&mut self, other: Self) {
        self.value += other.value;
        self.gradient += other.gradient;
    }
}

/// What is known about `ϕ` at `t = 0` when a line search starts.
#[derive(Debug, Clone, Copy)]
pub struct LineStart<S> {
    /// `ϕ(0) = f(x)`
    pub value: S,
    /// `ϕ'(0) = ∇f(x)·u`
    pub slope: S,
    /// Function value of the previous iterate, used to guess the first step
    pub fold: S,
}

/// Result of a line minimization.
#[derive(Debug, Clone, Copy)]
pub struct LineMin<S> {
    /// Step `t` taken along the direction
    pub step: S,
    /// `ϕ(t)`
    pub value: S,
    /// Evaluations spent by this search
    pub evaluations: Evaluations,
}

/// Buffers for trial points, owned by the caller so that a search does not
/// allocate.
#[derive(Debug, Clone)]
pub struct LineWork<V> {
    pub point: V,
    pub grad: V,
}

impl<V: Lin> LineWork<V> {
    pub fn new(dim: usize) -> Self {
        LineWork {
            point: V::zeros(dim),
            grad: V::zeros(dim),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LineSearchError {
    #[error("search direction is not a descent direction")]
    NotDescent,
    #[error("line search failed to converge after {0} iterations")]
    MaxIterReached(usize),
    #[error("initial bracketing failed after {0} expansions")]
    InitBracketMaxIterReached(usize),
    #[error("bracket update failed after {0} bisections")]
    UpdateBracketMaxIterReached(usize),
    #[error("no minimum bracketed after {0} expansions")]
    BracketMaxIterReached(usize),
    #[error("Brent's method failed to converge after {0} iterations")]
    BrentMaxIterReached(usize),
    #[error("function value is not finite at step {0}")]
    NonFinite(f64),
}

/// A strategy for minimizing the objective along a ray.
pub trait LineSearch<S: Float> {
    /// Minimize `t ↦ obj(x + t dir)` and move `x` to the minimizer.
    ///
    /// `work` is scratch space of the dimension of `x`.
    fn search<V, O>(&self,
                    obj: &O,
                    x: &mut V,
                    dir: &V,
                    start: LineStart<S>,
                    work: &mut LineWork<V>) -> Result<LineMin<S>, LineSearchError>
        where V: Lin<F = S> + Clone,
              O: Objective<V>;
}

pub(crate) fn to_f64<S: Float>(s: S) -> f64 {
    s.to_f64().unwrap_or(std::f64::NAN)
}

pub(crate) fn constant<S: Float>(c: f64) -> S {
    S::from(c).unwrap_or_else(S::nan)
}
