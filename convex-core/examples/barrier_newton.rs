//! Barrier method example built from convex-core pieces.
//!
//! Solves:
//!   minimize    x1 + 2 x2
//!   subject to  x1 + x2 = 1
//!               x1, x2 > 0
//!
//! Optimal solution: x1 = 1, x2 = 0, objective = 1.0

use std::sync::Arc;

use nalgebra::{DMatrix, DVector};
use convex_core::{
    ConvexResult, DenseKktSolver, DifferentiableFunction, KktSettings, KktSolver,
    LogBarrierFunction, QuadraticFunction, SharedFunction,
};

fn main() {
    println!("convex-core - Barrier Method Example");
    println!("====================================");
    println!();

    match run() {
        Ok(x) => {
            println!("\n=== Solution ===");
            println!("x1 = {:.6}", x[0]);
            println!("x2 = {:.6}", x[1]);
            println!("Objective value: {:.6}", x[0] + 2.0 * x[1]);
            println!(
                "\nConstraint verification: x1 + x2 = {:.6} (should be 1.0)",
                x[0] + x[1]
            );
        }
        Err(e) => {
            eprintln!("Barrier method failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> ConvexResult<DVector<f64>> {
    // Objective and the two bounds -xᵢ < 0
    let f0: SharedFunction = Arc::new(QuadraticFunction::linear(&DVector::from_vec(vec![1.0, 2.0]), 0.0)?);
    let bounds: Vec<SharedFunction> = vec![
        Arc::new(QuadraticFunction::linear(&DVector::from_vec(vec![-1.0, 0.0]), 0.0)?),
        Arc::new(QuadraticFunction::linear(&DVector::from_vec(vec![0.0, -1.0]), 0.0)?),
    ];
    let a = DMatrix::from_row_slice(1, 2, &[1.0, 1.0]);
    let at = a.transpose();
    let r = DVector::zeros(1);

    let solver = DenseKktSolver::new(KktSettings::default());
    let mut phi = LogBarrierFunction::new(1.0, f0, bounds)?;
    let mut x = DVector::from_vec(vec![0.5, 0.5]);

    println!("{:>10} {:>8} {:>12} {:>12} {:>12}", "t", "newton", "x1", "x2", "gap");
    while phi.duality_gap_bound() > 1e-6 {
        let mut newton_iters = 0;
        loop {
            let g = phi.gradient(&x);
            let sol = solver.solve(&phi.hessian(&x), &a, &at, &g, &r)?;
            if sol.lambda_squared / 2.0 <= 1e-10 || newton_iters >= 50 {
                break;
            }

            // Backtracking line search; the barrier is +inf outside the domain
            let fx = phi.value(&x);
            let slope = g.dot(&sol.v);
            let mut s = 1.0;
            while phi.value(&(&x + &sol.v * s)) > fx + 0.25 * s * slope && s > 1e-10 {
                s *= 0.5;
            }
            x.axpy(s, &sol.v, 1.0);
            newton_iters += 1;
        }

        println!(
            "{:>10.1e} {:>8} {:>12.6e} {:>12.6e} {:>12.3e}",
            phi.weight(),
            newton_iters,
            x[0],
            x[1],
            phi.duality_gap_bound()
        );
        phi = phi.with_weight(phi.weight() * 10.0)?;
    }

    Ok(x)
}
