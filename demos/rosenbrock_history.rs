//! Convergence of the conjugate gradient variants on the Rosenbrock function.
extern crate conjgrad_min;
extern crate gnuplot;

use conjgrad_min::{CgUpdate, ConjGrad, LineMethod, Rn};
use gnuplot::{AxesCommon, Caption, Figure};

fn rosenbrock(x: &Rn<f64>) -> f64 {
    (1. - x[0]).powi(2) + 100. * (x[1] - x[0] * x[0]).powi(2)
}

fn rosenbrock_grad(x: &Rn<f64>, g: &mut Rn<f64>) {
    g[0] = -2. * (1. - x[0]) - 400. * x[0] * (x[1] - x[0] * x[0]);
    g[1] = 200. * (x[1] - x[0] * x[0]);
}

fn main() {
    let mut fg = Figure::new();
    let mut path = Figure::new();
    {
        let axes = fg.axes2d();
        axes.set_y_log(Some(10.)).set_x_label("iteration", &[]).set_y_label("f", &[]);
        let trail = path.axes2d();
        trail.set_x_label("x", &[]).set_y_label("y", &[]);

        for &(update, line_method, name) in &[
            (CgUpdate::FletcherReeves, LineMethod::Wolfe, "FR / Wolfe"),
            (CgUpdate::PolakRibiere, LineMethod::Wolfe, "PR / Wolfe"),
            (CgUpdate::FletcherReeves, LineMethod::Brent, "FR / Brent"),
            (CgUpdate::PolakRibiere, LineMethod::Brent, "PR / Brent"),
        ] {
            let mut m = ConjGrad::new(2, rosenbrock, rosenbrock_grad);
            m.update = update;
            m.line_method = line_method;
            m.max_iter = 5000;
            m.record_history = true;

            let mut x = Rn::new(vec![-1.2, 1.]);
            match m.minimize(&mut x) {
                Ok(min) => println!("{}: {:?} at {:?}, {:?}", name, min, x, m.stats()),
                Err(e) => println!("{}: error: {}", name, e),
            }

            if let Some(hist) = m.history() {
                // shifted to keep the log scale finite at the minimum
                let values: Vec<f64> = hist.values().iter().map(|v| v + 1e-16).collect();
                axes.lines(0..values.len(), values, &[Caption(name)]);
                let points: Vec<&Rn<f64>> = Some(&hist.initial_point)
                    .into_iter()
                    .chain(hist.records.iter().map(|r| &r.point))
                    .collect();
                trail.lines(points.iter().map(|p| p[0]), points.iter().map(|p| p[1]),
                            &[Caption(name)]);
            }
        }
    }
    for figure in &mut [fg, path] {
        if let Err(e) = figure.show() {
            println!("gnuplot: {}", e);
        }
    }
}
