//! Minimization of smooth functions of several variables by the nonlinear
//! conjugate gradient method of Fletcher-Reeves and Polak-Ribiere.
//!
//! ```rust
//! use conjgrad_min::{CgUpdate, ConjGrad, Rn};
//!
//! let mut cg = ConjGrad::new(
//!     2,
//!     |x: &Rn<f64>| (x[0] - 3.).powi(2) + (x[1] + 1.).powi(2),
//!     |x: &Rn<f64>, g: &mut Rn<f64>| {
//!         g[0] = 2. * (x[0] - 3.);
//!         g[1] = 2. * (x[1] + 1.);
//!     },
//! );
//! cg.update = CgUpdate::FletcherReeves;
//!
//! let mut x = Rn::new(vec![0., 0.]);
//! let min = cg.minimize(&mut x).unwrap();
//!
//! assert!((x[0] - 3.).abs() < 1e-8 && (x[1] + 1.).abs() < 1e-8);
//! assert!(min.value < 1e-12);
//! ```

pub mod brent;
pub mod conjgrad;
pub mod deriv;
pub mod history;
pub mod lin;
pub mod line;
pub mod objective;
pub mod wolfe;

pub use brent::Brent;
pub use conjgrad::{CgUpdate, ConjGrad, ConjGradError, GradientCheck, Iteration, Minimum, Stats,
                   Termination};
pub use history::{History, Record};
pub use lin::{Lin, Rn};
pub use line::{Evaluations, LineMethod, LineSearch, LineSearchError};
pub use objective::{FnObjective, Objective};
pub use wolfe::Wolfe;
