//! Numerical differentiation.

use num_traits::Float;

/// Derivative of `f` at `x` by the 5-point central difference with step `h`.
///
/// The stencil `x ± h/2, x ± h` combines two central differences so that the
/// `O(h²)` error terms cancel; the result is exact (up to rounding) for
/// polynomials of degree at most 4.
pub fn central5<S, Func>(mut f: Func, x: S, h: S) -> S
where
    S: Float,
    Func: FnMut(S) -> S,
{
    let two = S::one() + S::one();
    let three = two + S::one();
    let six = three + three;
    let half = h / two;

    let fp1 = f(x + h);
    let fm1 = f(x - h);
    let fph = f(x + half);
    let fmh = f(x - half);

    let r3 = fp1 - fm1;
    let r5 = (two + two) / three * (fph - fmh) - r3 / six;
    r5 / h
}
