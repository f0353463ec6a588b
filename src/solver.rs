//! Approximate Riemann solvers.
//!
//! Every solver returns the same wave decomposition: a list of jumps moving
//! at constant speeds, together with the left- and right-going fluctuations
//! `A⁻Δq` and `A⁺Δq` whose sum is `f(q_r) - f(q_l)`.

pub mod flux_jump;
pub mod hll;
pub mod hllc;
pub mod roe;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    add, axpy,
    error::{Result, RiemannError},
    system::{HyperbolicSystem, Side},
    FLOAT,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave<const F: usize> {
    pub jump: [FLOAT; F],
    pub speed: FLOAT,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solution<const F: usize> {
    pub left: [FLOAT; F],
    pub right: [FLOAT; F],
    /// Ordered by non-decreasing speed.
    pub waves: Vec<Wave<F>>,
    pub amdq: [FLOAT; F],
    pub apdq: [FLOAT; F],
}

impl<const F: usize> Solution<F> {
    /// Solution without any wave, for identical states.
    pub fn trivial(q: [FLOAT; F]) -> Self {
        Self {
            left: q,
            right: q,
            waves: vec![],
            amdq: [0.0; F],
            apdq: [0.0; F],
        }
    }

    /// Plain upwind splitting of the waves into fluctuations.
    pub fn from_waves(left: [FLOAT; F], right: [FLOAT; F], waves: Vec<Wave<F>>) -> Self {
        let mut amdq = [0.0; F];
        let mut apdq = [0.0; F];
        for w in &waves {
            amdq = axpy(amdq, w.speed.min(0.0), w.jump);
            apdq = axpy(apdq, w.speed.max(0.0), w.jump);
        }
        Self {
            left,
            right,
            waves,
            amdq,
            apdq,
        }
    }

    /// `q_l`, every intermediate state, then `q_r`.
    pub fn states(&self) -> Vec<[FLOAT; F]> {
        let mut states = Vec::with_capacity(self.waves.len() + 1);
        let mut q = self.left;
        states.push(q);
        for w in &self.waves {
            q = add(q, w.jump);
            states.push(q);
        }
        if let Some(last) = states.last_mut() {
            *last = self.right;
        }
        states
    }

    /// Value of the self-similar solution at `x / t = xi`.
    ///
    /// On a wave the state to its left is returned.
    pub fn sample(&self, xi: FLOAT) -> [FLOAT; F] {
        if self.waves.iter().all(|w| w.speed < xi) {
            return self.right;
        }
        self.waves
            .iter()
            .take_while(|w| w.speed < xi)
            .fold(self.left, |q, w| add(q, w.jump))
    }

    /// Godunov flux `f(q_l) + A⁻Δq` at `x = 0`.
    pub fn interface_flux<S: HyperbolicSystem<F> + ?Sized>(&self, system: &S) -> [FLOAT; F] {
        add(system.flux(self.left), self.amdq)
    }

    pub fn total_jump(&self) -> [FLOAT; F] {
        self.waves.iter().fold([0.0; F], |acc, w| add(acc, w.jump))
    }

    pub fn total_fluctuation(&self) -> [FLOAT; F] {
        add(self.amdq, self.apdq)
    }

    pub fn max_speed(&self) -> FLOAT {
        self.waves.iter().fold(0.0, |m, w| m.max(w.speed.abs()))
    }
}

/// Outer wave speed estimates for the two-wave solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedEstimate {
    /// Extreme characteristic speeds of the two states.
    Davis,
    /// Characteristic speeds combined with the Roe speeds (HLLE).
    Einfeldt,
    /// Symmetric fan `±max |λ|` (local Lax-Friedrichs).
    Rusanov,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    Roe,
    RoeFix,
    Hll,
    Hlle,
    Rusanov,
    Hllc,
    FluxJump,
}

impl SolverKind {
    pub const ALL: [SolverKind; 7] = [
        SolverKind::Roe,
        SolverKind::RoeFix,
        SolverKind::Hll,
        SolverKind::Hlle,
        SolverKind::Rusanov,
        SolverKind::Hllc,
        SolverKind::FluxJump,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SolverKind::Roe => "roe",
            SolverKind::RoeFix => "roe-fix",
            SolverKind::Hll => "hll",
            SolverKind::Hlle => "hlle",
            SolverKind::Rusanov => "rusanov",
            SolverKind::Hllc => "hllc",
            SolverKind::FluxJump => "flux-jump",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SolverKind::Roe => "Roe linearization",
            SolverKind::RoeFix => "Roe linearization with Harten-Hyman entropy fix",
            SolverKind::Hll => "HLL with Davis speed estimates",
            SolverKind::Hlle => "HLL with Einfeldt speed estimates",
            SolverKind::Rusanov => "local Lax-Friedrichs",
            SolverKind::Hllc => "HLLC with a contact wave",
            SolverKind::FluxJump => "stationary jump and Roe waves for a speed limit jump",
        }
    }

    /// Whether `solve` can use this solver for `system`.
    pub fn supports<S: HyperbolicSystem<F> + ?Sized, const F: usize>(&self, system: &S) -> bool {
        match self {
            SolverKind::Hllc => system.has_contact(),
            SolverKind::FluxJump => false,
            _ => true,
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Solves the Riemann problem `(q_l, q_r)` for `system` with the chosen solver.
pub fn solve<S: HyperbolicSystem<F> + ?Sized, const F: usize>(
    system: &S,
    kind: SolverKind,
    ql: [FLOAT; F],
    qr: [FLOAT; F],
) -> Result<Solution<F>> {
    system.validate(ql, Side::Left)?;
    system.validate(qr, Side::Right)?;
    tracing::trace!(system = system.name(), solver = %kind, ?ql, ?qr, "solving");
    match kind {
        SolverKind::Roe => roe::solve(system, ql, qr, false),
        SolverKind::RoeFix => roe::solve(system, ql, qr, true),
        SolverKind::Hll => hll::solve(system, ql, qr, SpeedEstimate::Davis),
        SolverKind::Hlle => hll::solve(system, ql, qr, SpeedEstimate::Einfeldt),
        SolverKind::Rusanov => hll::solve(system, ql, qr, SpeedEstimate::Rusanov),
        SolverKind::Hllc => hllc::solve(system, ql, qr),
        SolverKind::FluxJump => Err(RiemannError::Unsupported {
            solver: kind.to_string(),
            system: system.name(),
        }),
    }
}
