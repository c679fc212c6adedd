extern crate conjgrad_min;

use conjgrad_min::{CgUpdate, ConjGrad, LineMethod, Rn};
use std::cell::RefCell;

fn quad2d(x: &Rn<f64>) -> f64 {
    x[0].powi(2) + 10. * x[1].powi(2)
}

fn quad2d_grad(x: &Rn<f64>, grad: &mut Rn<f64>) {
    grad[0] = 2. * x[0];
    grad[1] = 20. * x[1];
}

fn main() {
    let ev = RefCell::new(vec![]);
    let mut m = ConjGrad::new(1, |x: &f64| { ev.borrow_mut().push(*x); x * x },
                              |x: &f64, grad: &mut f64| *grad = 2. * x);
    let mut x = 1f64;
    let r = m.minimize(&mut x);

    println!("f(x) = x^2");
    println!("\tCG result: {:?}, x = {}", r, x);
    println!("\tEvaluations: x = {:?}", ev.borrow());

    println!("f(x) = x1^2 + 10 x2^2");
    for &update in &[CgUpdate::FletcherReeves, CgUpdate::PolakRibiere] {
        for &line_method in &[LineMethod::Wolfe, LineMethod::Brent] {
            let mut m = ConjGrad::new(2, quad2d, quad2d_grad);
            m.update = update;
            m.line_method = line_method;

            let mut x = Rn::new(vec![1., 1.]);
            let r = m.minimize_with_trace(&mut x, |x, info| {
                println!("\t\t{:?}, {:?}", x, info);
            });

            println!("\t{:?} / {:?}: {:?}, x = {:?}", update, line_method, r, x);
            println!("\t{:?}", m.stats());
        }
    }
}
