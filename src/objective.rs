//! Scalar objective functions with an analytic gradient.

use crate::lin::Lin;

/// A differentiable scalar function on a linear space.
///
/// Both methods must be pure, and `gradient` must be the derivative of
/// `value`. `ConjGrad::check_gradient` can enforce the latter.
pub trait Objective<V: Lin> {
    /// Function value `f(x)`.
    fn value(&self, x: &V) -> V::F;

    /// Gradient `∇f(x)`, written into `grad` (which has the dimension of `x`).
    fn gradient(&self, x: &V, grad: &mut V);
}

/// An `Objective` made of two closures: the function and its gradient.
#[derive(Clone)]
pub struct FnObjective<Func, Grad> {
    f: Func,
    g: Grad,
}

impl<Func, Grad> FnObjective<Func, Grad> {
    pub fn new(f: Func, g: Grad) -> Self {
        FnObjective { f, g }
    }
}

impl<V, Func, Grad> Objective<V> for FnObjective<Func, Grad>
where
    V: Lin,
    Func: Fn(&V) -> V::F,
    Grad: Fn(&V, &mut V),
{
    fn value(&self, x: &V) -> V::F {
        (self.f)(x)
    }

    fn gradient(&self, x: &V, grad: &mut V) {
        (self.g)(x, grad)
    }
}

impl<'a, V: Lin, O: Objective<V>> Objective<V> for &'a O {
    fn value(&self, x: &V) -> V::F {
        (**self).value(x)
    }

    fn gradient(&self, x: &V, grad: &mut V) {
        (**self).gradient(x, grad)
    }
}
