//! Hyperbolic conservation laws `q_t + f(q)_x = 0` in one space dimension.
//!
//! A system provides its physical flux, its characteristic speeds and a Roe
//! linearization: a matrix `Â(q_l, q_r)` with real eigenvalues and a complete
//! set of eigenvectors such that `Â(q, q) = f'(q)` and
//! `Â (q_r - q_l) = f(q_r) - f(q_l)`.

pub mod acoustics;
pub mod advection;
pub mod burgers;
pub mod euler;
pub mod shallow_water;
pub mod traffic;

use std::fmt;

use nalgebra::SMatrix;

use crate::{
    error::{Result, RiemannError},
    FLOAT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Intermediate,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
            Side::Intermediate => write!(f, "intermediate"),
        }
    }
}

/// Eigen decomposition of a linearized flux Jacobian.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigensystem<const F: usize> {
    /// Sorted ascending, `speeds[p]` belongs to column `p` of `vectors`.
    pub speeds: [FLOAT; F],
    pub vectors: SMatrix<FLOAT, F, F>,
}

impl<const F: usize> Eigensystem<F> {
    /// Builds the eigenvector matrix from right eigenvectors given field by field.
    pub fn from_columns(speeds: [FLOAT; F], columns: [[FLOAT; F]; F]) -> Self {
        Self {
            speeds,
            vectors: SMatrix::from_fn(|i, j| columns[j][i]),
        }
    }

    pub fn column(&self, p: usize) -> [FLOAT; F] {
        let mut r = [0.0; F];
        for (i, ri) in r.iter_mut().enumerate() {
            *ri = self.vectors[(i, p)];
        }
        r
    }

    /// Wave strengths `α = R⁻¹ Δq`, `None` when the eigenvectors are not a basis.
    pub fn strengths(&self, dq: [FLOAT; F]) -> Option<[FLOAT; F]> {
        let inv = self.vectors.clone().try_inverse()?;
        let mut alpha = [0.0; F];
        for (i, a) in alpha.iter_mut().enumerate() {
            for (j, d) in dq.iter().enumerate() {
                *a += inv[(i, j)] * d;
            }
        }
        if alpha.iter().all(|a| a.is_finite()) {
            Some(alpha)
        } else {
            None
        }
    }
}

/// Star states on both sides of a contact discontinuity, used by HLLC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact<const F: usize> {
    pub speed: FLOAT,
    pub left: [FLOAT; F],
    pub right: [FLOAT; F],
}

pub trait HyperbolicSystem<const F: usize> {
    fn name(&self) -> &'static str;

    fn fields(&self) -> [&'static str; F];

    /// Physical admissibility of a state whose components are all finite.
    fn admissible(&self, q: [FLOAT; F], side: Side) -> Result<()>;

    fn flux(&self, q: [FLOAT; F]) -> [FLOAT; F];

    /// Characteristic speeds at `q`, sorted ascending.
    fn eigenvalues(&self, q: [FLOAT; F]) -> Result<[FLOAT; F]>;

    fn linearize(&self, ql: [FLOAT; F], qr: [FLOAT; F]) -> Result<Eigensystem<F>>;

    /// Whether [`HyperbolicSystem::contact`] is implemented.
    fn has_contact(&self) -> bool {
        false
    }

    /// Contact speed and star states for outer speeds `sl < sr`.
    fn contact(
        &self,
        _ql: [FLOAT; F],
        _qr: [FLOAT; F],
        _sl: FLOAT,
        _sr: FLOAT,
    ) -> Result<Contact<F>> {
        Err(RiemannError::Unsupported {
            solver: "hllc".to_string(),
            system: self.name(),
        })
    }

    fn validate(&self, q: [FLOAT; F], side: Side) -> Result<()> {
        let fields = self.fields();
        for f in 0..F {
            if !q[f].is_finite() {
                return Err(RiemannError::NonFinite {
                    side,
                    field: fields[f],
                    value: q[f],
                });
            }
        }
        self.admissible(q, side)
    }
}

pub(crate) fn positive(name: &'static str, value: FLOAT) -> Result<FLOAT> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RiemannError::InvalidParameter {
            name,
            value,
            reason: "must be positive and finite",
        })
    }
}

pub(crate) fn inadmissible(
    side: Side,
    field: &'static str,
    value: FLOAT,
    reason: &'static str,
) -> RiemannError {
    RiemannError::Inadmissible {
        side,
        field,
        value,
        reason,
    }
}
