pub mod error;
pub mod output;
pub mod problem;
pub mod solver;
pub mod system;

pub use error::{Result, RiemannError};
pub use solver::{solve, Solution, SolverKind, SpeedEstimate, Wave};
pub use system::{Eigensystem, HyperbolicSystem, Side};

#[allow(clippy::upper_case_acronyms)]
pub type FLOAT = f64;

pub fn add<const F: usize>(a: [FLOAT; F], b: [FLOAT; F]) -> [FLOAT; F] {
    let mut res = a;
    for f in 0..F {
        res[f] += b[f];
    }
    res
}

pub fn sub<const F: usize>(a: [FLOAT; F], b: [FLOAT; F]) -> [FLOAT; F] {
    let mut res = a;
    for f in 0..F {
        res[f] -= b[f];
    }
    res
}

pub fn scale<const F: usize>(k: FLOAT, a: [FLOAT; F]) -> [FLOAT; F] {
    a.map(|v| k * v)
}

/// `a + k * b`
pub fn axpy<const F: usize>(a: [FLOAT; F], k: FLOAT, b: [FLOAT; F]) -> [FLOAT; F] {
    let mut res = a;
    for f in 0..F {
        res[f] += k * b[f];
    }
    res
}
