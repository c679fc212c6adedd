//! Nonlinear conjugate gradient minimization with Fletcher-Reeves or
//! Polak-Ribiere direction updates.
//!
//! References:
//!
//! - Press WH, Teukolsky SA, Vetterling WT, Flannery BP (2007) Numerical Recipes:
//!   The Art of Scientific Computing. Third Edition. Section 10.8.

use crate::brent::Brent;
use crate::deriv::central5;
use crate::history::History;
use crate::lin::Lin;
use crate::line::{constant, to_f64, Evaluations, LineMethod, LineSearch, LineSearchError,
                  LineStart, LineWork};
use crate::objective::{FnObjective, Objective};
use crate::wolfe::Wolfe;
use log::{debug, warn};
use num_traits::{Float, One, Zero};
use thiserror::Error;

/// Formula for the conjugate direction scaling factor `γ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CgUpdate {
    /// `γ = g₁·g₁ / g₀·g₀`
    FletcherReeves,
    /// `γ = max(0, (g₁ - g₀)·g₁) / g₀·g₀`
    PolakRibiere,
}

impl Default for CgUpdate {
    fn default() -> Self {
        CgUpdate::PolakRibiere
    }
}

/// Finite difference check of the gradient function.
#[derive(Debug, Clone, Copy)]
pub struct GradientCheck<S> {
    /// Step of the central difference
    pub step: S,
    /// Largest allowed absolute difference per component
    pub tol: S,
}

impl<S: Float> Default for GradientCheck<S> {
    fn default() -> Self {
        GradientCheck {
            step: constant(1e-3),
            tol: constant(1e-12),
        }
    }
}

/// Why a minimization stopped successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The gradient at the start of the iteration vanished
    ZeroGradient,
    /// Relative change of the function value below `ftol`
    FunctionTolerance,
    /// Scaled gradient below `gtol`
    GradientTolerance,
}

/// Result of a successful minimization.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum<S> {
    /// Smallest function value found; the argument was left in `x`
    pub value: S,
    pub termination: Termination,
    /// Iteration (indexed from 0) in which the run stopped
    pub iterations: usize,
}

/// Information about a performed line minimization.
#[derive(Debug, Clone)]
pub struct Iteration<S> {
    /// Iteration number (indexed from 0)
    pub k: usize,
    /// Function value after the line minimization
    pub value: S,
    /// Step along the search direction
    pub step: S,
    /// Evaluations spent by the line minimization
    pub evaluations: Evaluations,
}

/// Counters of the last run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub evaluations: Evaluations,
    pub iterations: usize,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConjGradError {
    #[error("failed to converge after {iterations} iterations")]
    NotConverged { iterations: usize },
    #[error("gradient function is incorrect: component {index} differs from finite difference by {diff:e}")]
    IncorrectGradient { index: usize, diff: f64 },
    #[error("point has dimension {found}, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("line minimization failed in iteration {iteration}")]
    LineSearch {
        iteration: usize,
        #[source]
        source: LineSearchError,
    },
}

/// Minimizer of a function of `dim` variables by the nonlinear conjugate
/// gradient method.
///
/// The working vectors are allocated once, in the constructor, and reused by
/// every call to `minimize`.
pub struct ConjGrad<V: Lin, O> {
    /// Maximum number of iterations
    pub max_iter: usize,
    /// Tolerance on the relative change of `f(x)`
    pub ftol: V::F,
    /// Tolerance on the scaled gradient
    pub gtol: V::F,
    /// Guards against division by zero when `f(x)` or the gradient vanishes
    pub tiny: V::F,
    pub update: CgUpdate,
    pub line_method: LineMethod,
    /// Parameters of the line search used with `LineMethod::Wolfe`
    pub wolfe: Wolfe<V::F>,
    /// Parameters of the line search used with `LineMethod::Brent`
    pub brent: Brent<V::F>,
    /// Compare the gradient with finite differences after every line minimization
    pub check_gradient: bool,
    pub gradient_check: GradientCheck<V::F>,
    /// Keep a `History` of the run
    pub record_history: bool,

    dim: usize,
    objective: O,
    stats: Stats,
    history: Option<History<V>>,

    // search direction
    u: V,
    // negative gradient of the previous iterate
    g: V,
    // previous search direction
    h: V,
    tmp: V,
    work: LineWork<V>,
}

impl<V, Func, Grad> ConjGrad<V, FnObjective<Func, Grad>>
    where V: Lin + Clone,
          Func: Fn(&V) -> V::F,
          Grad: Fn(&V, &mut V) {
    /// Minimizer of `f` with gradient `g`, both functions of `dim` variables.
    ///
    /// `g(x, grad)` writes the gradient at `x` into `grad`.
    ///
    /// # Panics
    ///
    /// If `dim` is zero.
    pub fn new(dim: usize, f: Func, g: Grad) -> Self {
        ConjGrad::with_objective(dim, FnObjective::new(f, g))
    }
}

impl<V, O> ConjGrad<V, O>
    where V: Lin + Clone,
          O: Objective<V> {
    /// # Panics
    ///
    /// If `dim` is zero.
    pub fn with_objective(dim: usize, objective: O) -> Self {
        assert!(dim > 0, "dimension must be positive");
        ConjGrad {
            max_iter: 200,
            ftol: constant(1e-8),
            gtol: constant(1e-8),
            tiny: constant(1e-18),
            update: CgUpdate::default(),
            line_method: LineMethod::default(),
            wolfe: Wolfe::default(),
            brent: Brent::default(),
            check_gradient: false,
            gradient_check: GradientCheck::default(),
            record_history: false,
            dim,
            objective,
            stats: Stats::default(),
            history: None,
            u: V::zeros(dim),
            g: V::zeros(dim),
            h: V::zeros(dim),
            tmp: V::zeros(dim),
            work: LineWork::new(dim),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Evaluation counters and iteration count of the last run.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// History of the last run, if `record_history` was set.
    pub fn history(&self) -> Option<&History<V>> {
        self.history.as_ref()
    }

    /// Minimize the objective starting from `x`.
    ///
    /// On success `x` holds the minimizer and the returned `Minimum` the
    /// function value there.
    pub fn minimize(&mut self, x: &mut V) -> Result<Minimum<V::F>, ConjGradError> {
        self.minimize_with_trace(x, |_, _| {})
    }

    /// The same as `minimize`, but calls `callback` after every line
    /// minimization with the new point and information about the iteration.
    pub fn minimize_with_trace<Callback>(&mut self,
                                         x: &mut V,
                                         mut callback: Callback) -> Result<Minimum<V::F>, ConjGradError>
        where Callback: FnMut(&V, &Iteration<V::F>) {
        if x.dim() != self.dim {
            return Err(ConjGradError::DimensionMismatch { expected: self.dim, found: x.dim() });
        }

        let one = V::F::one();
        let two = one + one;

        // u = g = h = -∇f(x)
        let mut fx = self.objective.value(x);
        self.objective.gradient(x, &mut self.u);
        self.u.scale(-one);
        self.g.clone_from(&self.u);
        self.h.clone_from(&self.u);
        self.stats = Stats {
            evaluations: Evaluations { value: 1, gradient: 1 },
            iterations: 0,
        };
        let mut fmin = fx;

        self.history = if self.record_history {
            Some(History::new(fx, x, self.max_iter.min(1024)))
        } else {
            None
        };

        // stand-in for the previous function value, only seeds the first step
        // of the Wolfe line search
        let mut fold = fx + self.u.norm() / two;

        for k in 0..self.max_iter {
            self.stats.iterations = k;

            // previous gradient is exactly zero
            let deno = self.g.dot(&self.g);
            if deno.abs() < self.tiny {
                return Ok(self.finish(fmin, Termination::ZeroGradient));
            }

            // ϕ'(0) = ∇f(x)·u = -g·u
            let mut slope = -self.g.dot(&self.u);
            if self.line_method == LineMethod::Wolfe && !(slope < V::F::zero()) {
                warn!("iteration {}: not a descent direction, restarting along -∇f", k);
                self.u.clone_from(&self.g);
                self.h.clone_from(&self.g);
                slope = -deno;
            }

            let start = LineStart { value: fx, slope, fold };
            let line = match self.line_method {
                LineMethod::Wolfe => self.wolfe.search(&self.objective, x, &self.u, start, &mut self.work),
                LineMethod::Brent => self.brent.search(&self.objective, x, &self.u, start, &mut self.work),
            };
            let line = line.map_err(|source| {
                warn!("iteration {}: line minimization failed: {}", k, source);
                ConjGradError::LineSearch { iteration: k, source }
            })?;
            self.stats.evaluations += line.evaluations;
            fmin = line.value;
            fold = fx;

            debug!("iteration {}: f = {:e}, step = {:e}, evaluations = {:?}",
                   k, to_f64(fmin), to_f64(line.step), line.evaluations);

            if let Some(hist) = self.history.as_mut() {
                self.tmp.clone_from(&self.u);
                self.tmp.scale(line.step);
                hist.append(fmin, x, &self.tmp);
            }
            callback(x, &Iteration {
                k,
                value: fmin,
                step: line.step,
                evaluations: line.evaluations,
            });

            // converged on f
            if two * (fmin - fx).abs() <= self.ftol * (fmin.abs() + fx.abs() + self.tiny) {
                return Ok(self.finish(fmin, Termination::FunctionTolerance));
            }

            // u = ∇f(x) at the new point
            fx = fmin;
            self.objective.gradient(x, &mut self.u);
            self.stats.evaluations.gradient += 1;

            if self.check_gradient {
                self.compare_gradient(x)?;
            }

            // converged on the scaled gradient
            let coef = fx.max(one);
            let test = (0..self.dim).fold(V::F::zero(), |test, j| {
                test.max(self.u.component(j).abs() * x.component(j).abs().max(one) / coef)
            });
            if test < self.gtol {
                return Ok(self.finish(fmin, Termination::GradientTolerance));
            }

            // now u = ∇f₁ and g = -∇f₀
            let nume = match self.update {
                CgUpdate::FletcherReeves => self.u.dot(&self.u),
                CgUpdate::PolakRibiere => {
                    self.tmp.clone_from(&self.u);
                    self.tmp.add_mut(&self.g);
                    self.tmp.dot(&self.u).max(V::F::zero())
                }
            };
            let gamma = nume / deno;

            // g = -∇f₁, u = h = g + γ h
            self.g.clone_from(&self.u);
            self.g.scale(-one);
            self.u.clone_from(&self.g);
            self.u.ray_to(&self.h, gamma);
            self.h.clone_from(&self.u);
        }

        self.stats.iterations = self.max_iter;
        warn!("failed to converge after {} iterations", self.max_iter);
        Err(ConjGradError::NotConverged { iterations: self.max_iter })
    }

    /// Compare the gradient function at `x` with central finite differences
    /// of the objective, using the `gradient_check` settings.
    pub fn verify_gradient(&mut self, x: &V) -> Result<(), ConjGradError> {
        if x.dim() != self.dim {
            return Err(ConjGradError::DimensionMismatch { expected: self.dim, found: x.dim() });
        }
        self.objective.gradient(x, &mut self.u);
        self.stats.evaluations.gradient += 1;
        self.compare_gradient(x)
    }

    // Checks `self.u` against finite differences at `x`; uses `self.tmp`.
    fn compare_gradient(&mut self, x: &V) -> Result<(), ConjGradError> {
        let GradientCheck { step, tol } = self.gradient_check;
        for k in 0..self.dim {
            let mut n = 0;
            let dfdxk = {
                let objective = &self.objective;
                let tmp = &mut self.tmp;
                central5(|xk| {
                    n += 1;
                    tmp.clone_from(x);
                    *tmp.component_mut(k) = xk;
                    objective.value(tmp)
                }, x.component(k), step)
            };
            self.stats.evaluations.value += n;

            let diff = (self.u.component(k) - dfdxk).abs();
            if !(diff <= tol) {
                warn!("gradient component {} differs from finite difference by {:e}", k, to_f64(diff));
                return Err(ConjGradError::IncorrectGradient { index: k, diff: to_f64(diff) });
            }
        }
        Ok(())
    }

    fn finish(&self, value: V::F, termination: Termination) -> Minimum<V::F> {
        debug!("converged ({:?}) after {} iterations: f = {:e}, {:?}",
               termination, self.stats.iterations, to_f64(value), self.stats.evaluations);
        Minimum {
            value,
            termination,
            iterations: self.stats.iterations,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lin::Rn;
    use ndarray::{array, Array1};

    type Problem = FnObjective<Box<dyn Fn(&Rn<f64>) -> f64>, Box<dyn Fn(&Rn<f64>, &mut Rn<f64>)>>;

    fn problem<F, G>(f: F, g: G) -> Problem
        where F: Fn(&Rn<f64>) -> f64 + 'static,
              G: Fn(&Rn<f64>, &mut Rn<f64>) + 'static {
        let f: Box<dyn Fn(&Rn<f64>) -> f64> = Box::new(f);
        let g: Box<dyn Fn(&Rn<f64>, &mut Rn<f64>)> = Box::new(g);
        FnObjective::new(f, g)
    }

    fn optimizer(dim: usize, obj: Problem) -> ConjGrad<Rn<f64>, Problem> {
        ConjGrad::with_objective(dim, obj)
    }

    // f(x) = (x - 3)² + c (y + 1)²
    fn bowl(c: f64) -> Problem {
        problem(
            move |x: &Rn<f64>| (x[0] - 3.).powi(2) + c * (x[1] + 1.).powi(2),
            move |x: &Rn<f64>, g: &mut Rn<f64>| {
                g[0] = 2. * (x[0] - 3.);
                g[1] = 2. * c * (x[1] + 1.);
            },
        )
    }

    const A: [[f64; 4]; 4] = [
        [4., 1., 0., 0.],
        [1., 3., 1., 0.],
        [0., 1., 2., 0.5],
        [0., 0., 0.5, 1.],
    ];
    const X_STAR: [f64; 4] = [1., -1., 0.5, 2.];

    fn mat_vec(x: &Rn<f64>) -> Vec<f64> {
        A.iter()
            .map(|row| row.iter().zip(x.iter()).map(|(a, x)| a * x).sum::<f64>())
            .collect()
    }

    // f(x) = ½ xᵀAx - bᵀx + shift, with b = A x*
    fn spd_quadratic(shift: f64) -> Problem {
        let b = mat_vec(&Rn::new(X_STAR.to_vec()));
        let b2 = b.clone();
        problem(
            move |x: &Rn<f64>| {
                let ax = mat_vec(x);
                0.5 * x.iter().zip(&ax).map(|(x, a)| x * a).sum::<f64>()
                    - x.iter().zip(&b).map(|(x, b)| x * b).sum::<f64>()
                    + shift
            },
            move |x: &Rn<f64>, g: &mut Rn<f64>| {
                for (i, a) in mat_vec(x).into_iter().enumerate() {
                    g[i] = a - b2[i];
                }
            },
        )
    }

    fn rosenbrock() -> Problem {
        problem(
            |x: &Rn<f64>| (1. - x[0]).powi(2) + 100. * (x[1] - x[0] * x[0]).powi(2),
            |x: &Rn<f64>, g: &mut Rn<f64>| {
                g[0] = -2. * (1. - x[0]) - 400. * x[0] * (x[1] - x[0] * x[0]);
                g[1] = 200. * (x[1] - x[0] * x[0]);
            },
        )
    }

    fn close(x: &Rn<f64>, y: &[f64], tol: f64) -> bool {
        x.iter().zip(y).all(|(a, b)| (a - b).abs() < tol)
    }

    #[test]
    fn defaults() {
        let cg = optimizer(2, bowl(1.));
        assert_eq!(cg.max_iter, 200);
        assert_eq!(cg.ftol, 1e-8);
        assert_eq!(cg.gtol, 1e-8);
        assert_eq!(cg.tiny, 1e-18);
        assert_eq!(cg.update, CgUpdate::PolakRibiere);
        assert_eq!(cg.line_method, LineMethod::Wolfe);
        assert!(!cg.check_gradient);
        assert!(!cg.record_history);
        assert_eq!(cg.dim(), 2);
    }

    #[test]
    fn shifted_bowl_fletcher_reeves() {
        let mut cg = optimizer(2, bowl(1.));
        cg.update = CgUpdate::FletcherReeves;
        cg.ftol = 1e-10;
        cg.gtol = 1e-10;
        cg.max_iter = 50;

        let mut x = Rn::new(vec![0., 0.]);
        let min = cg.minimize(&mut x).unwrap();

        assert!(close(&x, &[3., -1.], 1e-8));
        assert!(min.value.abs() < 1e-14);
        assert!(min.iterations <= 1);
    }

    #[test]
    fn spd_quadratic_all_variants() {
        for &update in &[CgUpdate::FletcherReeves, CgUpdate::PolakRibiere] {
            for &line_method in &[LineMethod::Wolfe, LineMethod::Brent] {
                let mut cg = optimizer(4, spd_quadratic(0.));
                cg.update = update;
                cg.line_method = line_method;
                cg.ftol = 1e-14;
                cg.gtol = 1e-10;

                let mut x = Rn::new(vec![0.; 4]);
                let min = cg.minimize(&mut x).unwrap();

                assert!(close(&x, &X_STAR, 1e-6), "{:?} {:?}: {:?}", update, line_method, x);
                assert!((min.value + 4.75).abs() < 1e-10);
                // one conjugate step per dimension, Brent stops on f one step later
                assert!(min.iterations <= 4, "{:?} {:?}: {:?}", update, line_method, min);
            }
        }
    }

    #[test]
    fn values_do_not_increase() {
        let mut cg = optimizer(4, spd_quadratic(0.));
        cg.record_history = true;
        let mut x = Rn::new(vec![5., -3., 2., 0.]);
        cg.minimize(&mut x).unwrap();
        let values = cg.history().unwrap().values();
        assert!(values.windows(2).all(|w| w[1] <= w[0]), "{:?}", values);

        let mut cg = optimizer(2, rosenbrock());
        cg.line_method = LineMethod::Brent;
        cg.max_iter = 1000;
        let mut values = vec![];
        let mut x = Rn::new(vec![-1.2, 1.]);
        cg.minimize_with_trace(&mut x, |_, it| values.push(it.value)).unwrap();
        assert!(values.windows(2).all(|w| w[1] <= w[0]), "{:?}", values);
    }

    #[test]
    fn additive_constant() {
        let mut minimizers = vec![];
        for &shift in &[0., 1.] {
            let mut cg = optimizer(4, spd_quadratic(shift));
            cg.ftol = 1e-14;
            cg.gtol = 1e-10;
            let mut x = Rn::new(vec![0.; 4]);
            let min = cg.minimize(&mut x).unwrap();
            assert!((min.value - shift + 4.75).abs() < 1e-10);
            minimizers.push(x);
        }
        assert!(minimizers[0].dist(&minimizers[1]) < 1e-6);
        assert!(close(&minimizers[1], &X_STAR, 1e-6));
    }

    #[test]
    fn infinite_gradient_tolerance() {
        let mut cg = optimizer(2, bowl(10.));
        cg.gtol = std::f64::INFINITY;
        cg.ftol = 0.;

        let mut x = Rn::new(vec![0., 0.]);
        let min = cg.minimize(&mut x).unwrap();

        assert_eq!(min.termination, Termination::GradientTolerance);
        assert_eq!(min.iterations, 0);
        assert_eq!(cg.stats().iterations, 0);
    }

    #[test]
    fn wrong_gradient_detected() {
        let mut cg = ConjGrad::new(
            2,
            |x: &Rn<f64>| (x[0] - 3.).powi(2) + 10. * (x[1] + 1.).powi(2),
            // twice the true gradient
            |x: &Rn<f64>, g: &mut Rn<f64>| {
                g[0] = 4. * (x[0] - 3.);
                g[1] = 40. * (x[1] + 1.);
            },
        );
        cg.check_gradient = true;

        let mut x = Rn::new(vec![0., 0.]);
        let err = cg.minimize(&mut x).unwrap_err();

        match err {
            ConjGradError::IncorrectGradient { index: 0, diff } => assert!(diff > 1.),
            _ => panic!("unexpected error: {:?}", err),
        }
        assert_eq!(cg.stats().iterations, 0);
    }

    #[test]
    fn correct_gradient_passes_check() {
        let mut cg = optimizer(2, bowl(10.));
        cg.check_gradient = true;
        cg.gradient_check.tol = 1e-8;

        let mut x = Rn::new(vec![0., 0.]);
        let min = cg.minimize(&mut x).unwrap();

        assert!(close(&x, &[3., -1.], 1e-6));
        assert!(min.value < 1e-10);
        // four objective evaluations per component and check
        assert!(cg.stats().evaluations.value >= 1 + 8);
    }

    #[test]
    fn verify_gradient_standalone() {
        let mut cg = optimizer(2, rosenbrock());
        cg.gradient_check.tol = 1e-6;
        assert_eq!(cg.verify_gradient(&Rn::new(vec![-1.2, 1.])), Ok(()));

        let mut cg = ConjGrad::new(
            2,
            |x: &Rn<f64>| x[0] * x[1],
            |x: &Rn<f64>, g: &mut Rn<f64>| {
                g[0] = x[1];
                g[1] = x[1];
            },
        );
        match cg.verify_gradient(&Rn::new(vec![1., 2.])) {
            Err(ConjGradError::IncorrectGradient { index: 1, .. }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn zero_gradient_at_start() {
        let mut cg = optimizer(2, bowl(1.));
        let mut x = Rn::new(vec![3., -1.]);
        let min = cg.minimize(&mut x).unwrap();

        assert_eq!(min.termination, Termination::ZeroGradient);
        assert_eq!(min.value, 0.);
        assert_eq!(min.iterations, 0);
        assert_eq!(x, Rn::new(vec![3., -1.]));
        assert_eq!(cg.stats().evaluations, Evaluations { value: 1, gradient: 1 });
    }

    #[test]
    fn not_converged() {
        let mut cg = optimizer(2, rosenbrock());
        cg.max_iter = 1;
        let mut x = Rn::new(vec![-1.2, 1.]);

        assert_eq!(cg.minimize(&mut x), Err(ConjGradError::NotConverged { iterations: 1 }));
        assert_eq!(cg.stats().iterations, 1);
    }

    #[test]
    fn dimension_mismatch() {
        let mut cg = optimizer(2, bowl(1.));
        let mut x = Rn::new(vec![0.; 3]);

        assert_eq!(cg.minimize(&mut x).unwrap_err(),
                   ConjGradError::DimensionMismatch { expected: 2, found: 3 });
        assert_eq!(x, Rn::new(vec![0.; 3]));
    }

    #[test]
    #[should_panic]
    fn zero_dimension() {
        optimizer(0, bowl(1.));
    }

    #[test]
    fn rosenbrock_both_line_searches() {
        for &line_method in &[LineMethod::Wolfe, LineMethod::Brent] {
            let mut cg = optimizer(2, rosenbrock());
            cg.line_method = line_method;
            cg.max_iter = 2000;
            let mut x = Rn::new(vec![-1.2, 1.]);

            let min = cg.minimize(&mut x).unwrap();

            assert!(close(&x, &[1., 1.], 1e-4), "{:?}: {:?} {:?}", line_method, x, min);
            let stats = cg.stats();
            match line_method {
                LineMethod::Wolfe => assert!(stats.evaluations.gradient > stats.iterations),
                LineMethod::Brent => assert!(stats.evaluations.value > stats.evaluations.gradient),
            }
        }
    }

    #[test]
    fn history_adds_up() {
        let mut cg = optimizer(4, spd_quadratic(0.));
        cg.record_history = true;
        let mut x = Rn::new(vec![1., 1., 1., 1.]);
        let min = cg.minimize(&mut x).unwrap();

        let hist = cg.history().unwrap();
        assert_eq!(hist.len(), min.iterations + 1);
        let mut y = hist.initial_point.clone();
        for r in &hist.records {
            y.add_mut(&r.step);
        }
        assert!(y.dist(&x) < 1e-12);
        assert_eq!(hist.records.last().map(|r| r.value), Some(min.value));

        cg.record_history = false;
        let mut x = Rn::new(vec![1., 1., 1., 1.]);
        cg.minimize(&mut x).unwrap();
        assert!(cg.history().is_none());
    }

    #[test]
    fn counters_reset_between_runs() {
        let mut cg = optimizer(4, spd_quadratic(0.));
        let mut x = Rn::new(vec![2., 0., 0., 1.]);
        cg.minimize(&mut x).unwrap();
        let first = cg.stats();

        let mut x = Rn::new(vec![2., 0., 0., 1.]);
        cg.minimize(&mut x).unwrap();
        assert_eq!(cg.stats(), first);
    }

    #[test]
    fn ndarray_vectors() {
        let mut cg = ConjGrad::new(
            3,
            |x: &Array1<f64>| x.iter().enumerate().map(|(i, v)| (i as f64 + 1.) * (v - 1.).powi(2)).sum::<f64>(),
            |x: &Array1<f64>, g: &mut Array1<f64>| {
                for i in 0..3 {
                    g[i] = 2. * (i as f64 + 1.) * (x[i] - 1.);
                }
            },
        );
        let mut x = array![0., 0., 0.];
        cg.minimize(&mut x).unwrap();
        assert!(x.iter().all(|v| (v - 1.).abs() < 1e-6), "{:?}", x);
    }

    #[test]
    fn scalar() {
        let mut cg = ConjGrad::new(1, |x: &f64| x * x, |x: &f64, g: &mut f64| *g = 2. * x);
        let mut x = 1.;
        let min = cg.minimize(&mut x).unwrap();
        assert!(x.abs() < 1e-12);
        assert!(min.value < 1e-20);
    }
}
