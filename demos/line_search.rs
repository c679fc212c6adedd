extern crate conjgrad_min;

use conjgrad_min::wolfe::Sample;
use conjgrad_min::{Brent, Wolfe};

fn wolfe_with_tracking<Func>(m: &Wolfe<f64>, c: f64, f: &Func)
where
    Func: Fn(f64) -> (f64, f64),
{
    let mut ev = vec![];

    let r;
    {
        let mut g = |x| {
            ev.push(x);
            f(x)
        };
        let origin = Sample::new(0., g(0.));
        r = m.find_wolfe(c, &mut g, origin);
    }

    println!("Found point {:?}", r);
    println!("Function evaluations: {:?}", ev);
}

fn brent_with_tracking<Func>(m: &Brent<f64>, f: &Func)
where
    Func: Fn(f64) -> f64,
{
    let mut ev = vec![];

    let r;
    {
        let mut g = |x| {
            ev.push(x);
            f(x)
        };
        r = m.bracket(0., 1., None, &mut g).and_then(|br| m.minimize(&br, &mut g));
    }

    println!("Found point {:?}", r);
    println!("Function evaluations: {:?}", ev);
}

fn main() {
    let m = Wolfe::new();
    // bad initial range guess
    let f = |x: f64| (x * (x - 1.), 2. * x - 1.);
    println!("f(x) = x (x - 1)");
    wolfe_with_tracking(&m, 0.001, &f);
    brent_with_tracking(&Brent::new(), &|x| f(x).0);

    // plain secant2 gets stuck at the local minimum at 1.02
    let f = |x: f64| {
        (
            0.25 * x.powi(4) - 0.7066666 * x.powi(3) + 0.611 * x * x - 0.102 * x,
            (x - 0.1) * (x - 1.) * (x - 1.02),
        )
    };
    println!("f'(x) = (x - 0.1) (x - 1) (x - 1.02)");
    wolfe_with_tracking(&m, 1.025, &f);
    brent_with_tracking(&Brent::new(), &|x| f(x).0);
}
