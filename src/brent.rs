//! Derivative-free line minimization: golden-section bracketing followed by
//! Brent's parabolic interpolation method.

use crate::lin::Lin;
use crate::line::{constant, to_f64, Evaluations, LineMin, LineSearch, LineSearchError,
                  LineStart, LineWork};
use crate::objective::Objective;
use log::trace;
use num_traits::Float;

/// Parameters of the bracketing and Brent's method.
#[derive(Debug, Clone)]
pub struct Brent<S: Float> {
    /// Fractional precision of the minimizing step
    pub tol: S,
    /// Maximum number of Brent iterations
    pub max_iter: usize,
    /// Maximum magnification of a parabolic step while bracketing
    pub glimit: S,
    /// Maximum number of bracket expansions
    pub bracket_max_iter: usize,
}

impl<S: Float> Default for Brent<S> {
    fn default() -> Self {
        Brent {
            tol: constant(3e-8),
            max_iter: 100,
            glimit: constant(100.),
            bracket_max_iter: 50,
        }
    }
}

/// Three steps `a, b, c` with `b` between `a` and `c` and `ϕ(b)` below
/// `ϕ(a)` and `ϕ(c)`.
#[derive(Debug, Clone, Copy)]
pub struct Bracket<S> {
    pub a: S,
    pub b: S,
    pub c: S,
    pub fa: S,
    pub fb: S,
    pub fc: S,
}

impl<S: Float> Brent<S> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Bracket a minimum of `f` by walking downhill from `a` and `b`.
    ///
    /// `fa` is `f(a)` if already known.
    pub fn bracket<Func>(&self,
                         a: S,
                         b: S,
                         fa: Option<S>,
                         mut f: Func) -> Result<Bracket<S>, LineSearchError>
        where Func: FnMut(S) -> S {
        let gold: S = constant(1.618034);
        let tiny: S = constant(1e-20);
        let two = S::one() + S::one();

        let mut f = |t: S| {
            let v = f(t);
            trace!("ϕ({:e}) = {:e}", to_f64(t), to_f64(v));
            if v.is_finite() {
                Ok(v)
            } else {
                Err(LineSearchError::NonFinite(to_f64(t)))
            }
        };

        let (mut ax, mut bx) = (a, b);
        let mut fa = match fa {
            Some(v) => v,
            None => f(ax)?,
        };
        let mut fb = f(bx)?;
        if fb > fa {
            std::mem::swap(&mut ax, &mut bx);
            std::mem::swap(&mut fa, &mut fb);
        }
        let mut cx = bx + gold * (bx - ax);
        let mut fc = f(cx)?;

        let mut n = 0;
        while fb > fc {
            if n == self.bracket_max_iter {
                return Err(LineSearchError::BracketMaxIterReached(n));
            }
            n += 1;

            // parabolic extrapolation from a, b, c
            let r = (bx - ax) * (fb - fc);
            let q = (bx - cx) * (fb - fa);
            let qr = q - r;
            let denom = two * if qr >= S::zero() { qr.abs().max(tiny) } else { -qr.abs().max(tiny) };
            let mut u = bx - ((bx - cx) * q - (bx - ax) * r) / denom;
            let ulim = bx + self.glimit * (cx - bx);
            let mut fu;

            if (bx - u) * (u - cx) > S::zero() {
                // parabolic u between b and c
                fu = f(u)?;
                if fu < fc {
                    return Ok(Bracket { a: bx, b: u, c: cx, fa: fb, fb: fu, fc });
                } else if fu > fb {
                    return Ok(Bracket { a: ax, b: bx, c: u, fa, fb, fc: fu });
                }
                u = cx + gold * (cx - bx);
                fu = f(u)?;
            } else if (cx - u) * (u - ulim) > S::zero() {
                // parabolic u between c and its limit
                fu = f(u)?;
                if fu < fc {
                    let next = u + gold * (u - cx);
                    bx = cx;
                    cx = u;
                    u = next;
                    fb = fc;
                    fc = fu;
                    fu = f(u)?;
                }
            } else if (u - ulim) * (ulim - cx) >= S::zero() {
                u = ulim;
                fu = f(u)?;
            } else {
                u = cx + gold * (cx - bx);
                fu = f(u)?;
            }

            ax = bx;
            bx = cx;
            cx = u;
            fa = fb;
            fb = fc;
            fc = fu;
        }

        Ok(Bracket { a: ax, b: bx, c: cx, fa, fb, fc })
    }

    /// Minimize `f` inside a bracket, returning `(t_min, f(t_min))`.
    pub fn minimize<Func>(&self,
                          bracket: &Bracket<S>,
                          mut f: Func) -> Result<(S, S), LineSearchError>
        where Func: FnMut(S) -> S {
        let cgold: S = constant(0.3819660);
        let zeps = S::epsilon() * constant(1e-3);
        let half: S = constant(0.5);
        let two = S::one() + S::one();

        let mut a = bracket.a.min(bracket.c);
        let mut b = bracket.a.max(bracket.c);
        let (mut x, mut w, mut v) = (bracket.b, bracket.b, bracket.b);
        let (mut fx, mut fw, mut fv) = (bracket.fb, bracket.fb, bracket.fb);
        let mut d = S::zero();
        let mut e = S::zero();

        for _ in 0..self.max_iter {
            let xm = half * (a + b);
            let tol1 = self.tol * x.abs() + zeps;
            let tol2 = two * tol1;
            if (x - xm).abs() <= tol2 - half * (b - a) {
                return Ok((x, fx));
            }

            let golden = if e.abs() > tol1 {
                // trial parabolic fit through x, v, w
                let r = (x - w) * (fx - fv);
                let mut q = (x - v) * (fx - fw);
                let mut p = (x - v) * q - (x - w) * r;
                q = two * (q - r);
                if q > S::zero() {
                    p = -p;
                }
                q = q.abs();
                let etemp = e;
                e = d;
                if p.abs() >= (half * q * etemp).abs() || p <= q * (a - x) || p >= q * (b - x) {
                    true
                } else {
                    d = p / q;
                    let u = x + d;
                    if u - a < tol2 || b - u < tol2 {
                        d = sign(tol1, xm - x);
                    }
                    false
                }
            } else {
                true
            };
            if golden {
                e = if x >= xm { a - x } else { b - x };
                d = cgold * e;
            }

            let u = if d.abs() >= tol1 { x + d } else { x + sign(tol1, d) };
            let fu = f(u);
            trace!("ϕ({:e}) = {:e}", to_f64(u), to_f64(fu));

            if fu <= fx {
                if u >= x {
                    a = x;
                } else {
                    b = x;
                }
                v = w;
                w = x;
                x = u;
                fv = fw;
                fw = fx;
                fx = fu;
            } else {
                if u < x {
                    a = u;
                } else {
                    b = u;
                }
                if fu <= fw || w == x {
                    v = w;
                    w = u;
                    fv = fw;
                    fw = fu;
                } else if fu <= fv || v == x || v == w {
                    v = u;
                    fv = fu;
                }
            }
        }

        Err(LineSearchError::BrentMaxIterReached(self.max_iter))
    }
}

impl<S: Float> LineSearch<S> for Brent<S> {
    fn search<V, O>(&self,
                    obj: &O,
                    x: &mut V,
                    dir: &V,
                    start: LineStart<S>,
                    work: &mut LineWork<V>) -> Result<LineMin<S>, LineSearchError>
        where V: Lin<F = S> + Clone,
              O: Objective<V> {
        let mut evaluations = Evaluations::default();

        let (step, value) = {
            let mut phi = |t| {
                evaluations.value += 1;
                work.point.clone_from(x);
                work.point.ray_to(dir, t);
                obj.value(&work.point)
            };
            let bracket = self.bracket(S::zero(), S::one(), Some(start.value), &mut phi)?;
            self.minimize(&bracket, &mut phi)?
        };

        x.ray_to(dir, step);
        Ok(LineMin { step, value, evaluations })
    }
}

fn sign<S: Float>(a: S, b: S) -> S {
    if b >= S::zero() { a.abs() } else { -a.abs() }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lin::Rn;
    use crate::objective::FnObjective;

    #[test]
    fn bracket_quadratic() {
        let s: Brent<f64> = Default::default();
        let br = s.bracket(0., 1., None, |t: f64| (t - 5.).powi(2)).unwrap();

        let (lo, hi) = (br.a.min(br.c), br.a.max(br.c));
        assert!(lo < br.b && br.b < hi);
        assert!(br.fb <= br.fa && br.fb <= br.fc);
        assert!(lo <= 5. && 5. <= hi);
    }

    #[test]
    fn bracket_wrong_way() {
        let s: Brent<f64> = Default::default();
        let br = s.bracket(0., 1., None, |t: f64| (t + 2.).powi(2)).unwrap();

        assert!(br.a.min(br.c) <= -2. && -2. <= br.a.max(br.c));
    }

    #[test]
    fn bracket_unbounded() {
        let s: Brent<f64> = Default::default();
        let r = s.bracket(0., 1., None, |t: f64| -t);

        match r {
            Err(LineSearchError::BracketMaxIterReached(50))
            | Err(LineSearchError::NonFinite(_)) => (),
            _ => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn minimize_cosine() {
        let s: Brent<f64> = Default::default();
        let f = |t: f64| t.cos();
        let br = s.bracket(2., 3., None, f).unwrap();
        let (t, v) = s.minimize(&br, f).unwrap();

        assert!((t - std::f64::consts::PI).abs() < 1e-6);
        assert!((v + 1.).abs() < 1e-12);
    }

    #[test]
    fn minimize_quartic() {
        let s: Brent<f64> = Default::default();
        let f = |t: f64| (t - 1.).powi(4) + 0.5 * (t - 1.).powi(2);
        let br = s.bracket(0., 0.1, None, f).unwrap();
        let (t, _) = s.minimize(&br, f).unwrap();

        assert!((t - 1.).abs() < 1e-6);
    }

    #[test]
    fn search_counts_values_only() {
        let s: Brent<f64> = Default::default();
        let obj = FnObjective::new(
            |x: &Rn<f64>| (x[0] - 1.).powi(2) + 4. * x[1].powi(2),
            |_: &Rn<f64>, _: &mut Rn<f64>| panic!("gradient not needed"),
        );
        let mut x = Rn::new(vec![0., 1.]);
        let dir = Rn::new(vec![1., -1.]);
        let start = LineStart { value: 5., slope: -10., fold: 6. };
        let mut work = LineWork::new(2);

        let r = s.search(&obj, &mut x, &dir, start, &mut work).unwrap();

        // ϕ(t) = (t - 1)² + 4 (1 - t)², minimum at t = 1
        assert!((r.step - 1.).abs() < 1e-6);
        assert!(r.value < 1e-10);
        assert!((x[0] - 1.).abs() < 1e-6 && x[1].abs() < 1e-6);
        assert_eq!(r.evaluations.gradient, 0);
        assert!(r.evaluations.value > 2);
    }
}
