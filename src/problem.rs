//! Riemann problem descriptions, read from TOML or picked from presets.

use std::{fs, path::Path};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, RiemannError},
    solver::{flux_jump, solve, Solution, SolverKind},
    system::{
        acoustics::Acoustics,
        advection::Advection,
        burgers::Burgers,
        euler::Euler,
        shallow_water::ShallowWater,
        traffic::{Traffic, VariableTraffic},
        HyperbolicSystem,
    },
    FLOAT,
};

pub const DEFAULT_POINTS: usize = 201;
pub const MAX_POINTS: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SystemConfig {
    Advection {
        velocity: FLOAT,
    },
    Burgers,
    Traffic {
        #[serde(default = "one")]
        speed_limit: FLOAT,
    },
    /// Traffic whose speed limit jumps at `x = 0`.
    VariableTraffic {
        #[serde(default = "one")]
        speed_limit_left: FLOAT,
        #[serde(default = "one")]
        speed_limit_right: FLOAT,
    },
    Acoustics {
        #[serde(default = "one")]
        bulk_modulus: FLOAT,
        #[serde(default = "one")]
        density: FLOAT,
    },
    ShallowWater {
        #[serde(default = "one")]
        gravity: FLOAT,
    },
    Euler {
        #[serde(default = "default_gamma")]
        gamma: FLOAT,
    },
}

fn one() -> FLOAT {
    1.0
}

fn default_gamma() -> FLOAT {
    1.4
}

impl SystemConfig {
    pub const NAMES: [&'static str; 7] = [
        "advection",
        "burgers",
        "traffic",
        "variable-traffic",
        "acoustics",
        "shallow-water",
        "euler",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SystemConfig::Advection { .. } => "advection",
            SystemConfig::Burgers => "burgers",
            SystemConfig::Traffic { .. } => "traffic",
            SystemConfig::VariableTraffic { .. } => "variable-traffic",
            SystemConfig::Acoustics { .. } => "acoustics",
            SystemConfig::ShallowWater { .. } => "shallow-water",
            SystemConfig::Euler { .. } => "euler",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct States {
    pub left: Vec<FLOAT>,
    pub right: Vec<FLOAT>,
}

/// Range of `x/t` over which the approximate solution is sampled.
///
/// A missing bound is derived from the fastest wave of all solvers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sampling {
    pub xi_min: Option<FLOAT>,
    pub xi_max: Option<FLOAT>,
    pub points: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiemannProblem {
    pub system: SystemConfig,
    pub states: States,
    /// Empty means every solver available for the system.
    #[serde(default)]
    pub solvers: Vec<SolverKind>,
    #[serde(default)]
    pub sampling: Sampling,
}

impl RiemannProblem {
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            RiemannError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&contents)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Sod,
    DamBreak,
    DryDamBreak,
    TransonicBurgers,
    TrafficJam,
    SpeedLimitDrop,
    AcousticPulse,
    AdvectionStep,
}

impl Preset {
    pub fn problem(self) -> RiemannProblem {
        let (system, left, right) = match self {
            Preset::Sod => (
                SystemConfig::Euler { gamma: 1.4 },
                vec![1.0, 0.0, 2.5],
                vec![0.125, 0.0, 0.25],
            ),
            Preset::DamBreak => (
                SystemConfig::ShallowWater { gravity: 1.0 },
                vec![3.0, 0.0],
                vec![1.0, 0.0],
            ),
            Preset::DryDamBreak => (
                SystemConfig::ShallowWater { gravity: 1.0 },
                vec![1.0, 0.0],
                vec![0.0, 0.0],
            ),
            Preset::TransonicBurgers => (SystemConfig::Burgers, vec![-1.0], vec![2.0]),
            Preset::TrafficJam => (
                SystemConfig::Traffic { speed_limit: 1.0 },
                vec![0.9],
                vec![0.2],
            ),
            Preset::SpeedLimitDrop => (
                SystemConfig::VariableTraffic {
                    speed_limit_left: 1.0,
                    speed_limit_right: 0.5,
                },
                vec![0.3],
                vec![0.8],
            ),
            Preset::AcousticPulse => (
                SystemConfig::Acoustics {
                    bulk_modulus: 4.0,
                    density: 1.0,
                },
                vec![1.0, 0.0],
                vec![0.0, 0.0],
            ),
            Preset::AdvectionStep => (
                SystemConfig::Advection { velocity: 1.0 },
                vec![1.0],
                vec![0.0],
            ),
        };
        RiemannProblem {
            system,
            states: States { left, right },
            solvers: vec![],
            sampling: Sampling::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveReport {
    pub speed: FLOAT,
    pub jump: Vec<FLOAT>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverReport {
    pub solver: SolverKind,
    pub waves: Vec<WaveReport>,
    pub flux: Vec<FLOAT>,
    pub amdq: Vec<FLOAT>,
    pub apdq: Vec<FLOAT>,
    /// `(xi, q(xi))` pairs.
    pub samples: Vec<(FLOAT, Vec<FLOAT>)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub system: &'static str,
    pub fields: Vec<&'static str>,
    pub left: Vec<FLOAT>,
    pub right: Vec<FLOAT>,
    pub solvers: Vec<SolverReport>,
}

/// Solves `problem` with each requested solver and samples the results.
pub fn run(problem: &RiemannProblem) -> Result<Report> {
    match problem.system {
        SystemConfig::Advection { velocity } => report(&Advection::new(velocity)?, problem),
        SystemConfig::Burgers => report(&Burgers, problem),
        SystemConfig::Traffic { speed_limit } => report(&Traffic::new(speed_limit)?, problem),
        SystemConfig::VariableTraffic {
            speed_limit_left,
            speed_limit_right,
        } => flux_jump_report(
            &VariableTraffic::new(speed_limit_left, speed_limit_right)?,
            problem,
        ),
        SystemConfig::Acoustics {
            bulk_modulus,
            density,
        } => report(&Acoustics::new(bulk_modulus, density)?, problem),
        SystemConfig::ShallowWater { gravity } => report(&ShallowWater::new(gravity)?, problem),
        SystemConfig::Euler { gamma } => report(&Euler::new(gamma)?, problem),
    }
}

fn state<const F: usize>(system: &'static str, q: &[FLOAT]) -> Result<[FLOAT; F]> {
    q.try_into().map_err(|_| RiemannError::DimensionMismatch {
        system,
        expected: F,
        found: q.len(),
    })
}

/// A solution together with its interface flux.
type Solved<const F: usize> = (SolverKind, Solution<F>, [FLOAT; F]);

fn report<S: HyperbolicSystem<F>, const F: usize>(
    system: &S,
    problem: &RiemannProblem,
) -> Result<Report> {
    let ql = state::<F>(system.name(), &problem.states.left)?;
    let qr = state::<F>(system.name(), &problem.states.right)?;
    let kinds: Vec<SolverKind> = if problem.solvers.is_empty() {
        SolverKind::ALL
            .into_iter()
            .filter(|k| k.supports(system))
            .collect()
    } else {
        problem.solvers.clone()
    };

    let mut solutions = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let s = solve(system, kind, ql, qr)?;
        let flux = s.interface_flux(system);
        solutions.push((kind, s, flux));
    }
    assemble(
        system.name(),
        system.fields().to_vec(),
        solutions,
        &problem.sampling,
    )
}

fn flux_jump_report(system: &VariableTraffic, problem: &RiemannProblem) -> Result<Report> {
    let ql = state::<1>(system.name(), &problem.states.left)?;
    let qr = state::<1>(system.name(), &problem.states.right)?;
    if let Some(kind) = problem.solvers.iter().find(|k| **k != SolverKind::FluxJump) {
        return Err(RiemannError::Unsupported {
            solver: kind.to_string(),
            system: system.name(),
        });
    }
    let s = flux_jump::solve(system, ql, qr)?;
    let flux = system.interface_flux(&s);
    assemble(
        system.name(),
        system.fields().to_vec(),
        vec![(SolverKind::FluxJump, s, flux)],
        &problem.sampling,
    )
}

/// Sample points `(xi_min, dxi, points)`, defaulting to a range that holds every wave.
fn sample_points(sampling: &Sampling, max_speed: FLOAT) -> Result<(FLOAT, FLOAT, usize)> {
    let reach = if max_speed > 0.0 { 1.25 * max_speed } else { 1.0 };
    let xi_min = sampling.xi_min.unwrap_or(-reach);
    let xi_max = sampling.xi_max.unwrap_or(reach);
    let points = sampling.points.unwrap_or(DEFAULT_POINTS);
    if !(xi_min.is_finite() && xi_max.is_finite()) {
        return Err(RiemannError::Config(format!(
            "sampling range [{xi_min}, {xi_max}] must be finite"
        )));
    }
    if !(xi_min < xi_max) {
        return Err(RiemannError::Config(format!(
            "empty sampling range [{xi_min}, {xi_max}]"
        )));
    }
    if !(2..=MAX_POINTS).contains(&points) {
        return Err(RiemannError::Config(format!(
            "between 2 and {MAX_POINTS} sample points are needed, got {points}"
        )));
    }
    Ok((xi_min, (xi_max - xi_min) / (points - 1) as FLOAT, points))
}

fn assemble<const F: usize>(
    system: &'static str,
    fields: Vec<&'static str>,
    solutions: Vec<Solved<F>>,
    sampling: &Sampling,
) -> Result<Report> {
    let (left, right) = match solutions.first() {
        Some((_, s, _)) => (s.left.to_vec(), s.right.to_vec()),
        None => {
            return Err(RiemannError::Config(
                "no solver applies to this problem".to_string(),
            ))
        }
    };
    let max_speed = solutions
        .iter()
        .fold(0.0, |m: FLOAT, (_, s, _)| m.max(s.max_speed()));
    let (xi_min, dxi, points) = sample_points(sampling, max_speed)?;

    let solvers = solutions
        .into_iter()
        .map(|(kind, s, flux)| {
            tracing::info!(
                system,
                solver = %kind,
                waves = s.waves.len(),
                max_speed = s.max_speed(),
                "solved"
            );
            SolverReport {
                solver: kind,
                waves: s
                    .waves
                    .iter()
                    .map(|w| WaveReport {
                        speed: w.speed,
                        jump: w.jump.to_vec(),
                    })
                    .collect(),
                flux: flux.to_vec(),
                amdq: s.amdq.to_vec(),
                apdq: s.apdq.to_vec(),
                samples: (0..points)
                    .map(|i| {
                        let xi = xi_min + i as FLOAT * dxi;
                        (xi, s.sample(xi).to_vec())
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(Report {
        system,
        fields,
        left,
        right,
        solvers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_problem_file() {
        let problem = RiemannProblem::from_toml(
            r#"
            solvers = ["roe-fix", "hllc"]

            [system]
            kind = "euler"
            gamma = 1.4

            [states]
            left = [1.0, 0.0, 2.5]
            right = [0.125, 0.0, 0.25]

            [sampling]
            xi_min = -2.0
            xi_max = 2.0
            points = 5
            "#,
        )
        .unwrap();
        assert_eq!(problem.system, SystemConfig::Euler { gamma: 1.4 });
        assert_eq!(problem.solvers, vec![SolverKind::RoeFix, SolverKind::Hllc]);
        let report = run(&problem).unwrap();
        assert_eq!(report.solvers.len(), 2);
        assert_eq!(report.solvers[0].samples.len(), 5);
        assert_eq!(report.solvers[0].samples[0].1, vec![1.0, 0.0, 2.5]);
        assert_eq!(report.solvers[0].samples[4].1, vec![0.125, 0.0, 0.25]);
    }

    #[test]
    fn defaults_fill_in_parameters() {
        let problem = RiemannProblem::from_toml(
            r#"
            [system]
            kind = "shallow-water"
            [states]
            left = [2.0, 0.0]
            right = [1.0, 0.0]
            "#,
        )
        .unwrap();
        assert_eq!(problem.system, SystemConfig::ShallowWater { gravity: 1.0 });
        let report = run(&problem).unwrap();
        // hllc is not offered without a contact wave
        assert_eq!(report.solvers.len(), 5);
        assert_eq!(report.solvers[0].samples.len(), DEFAULT_POINTS);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RiemannProblem::from_toml(
            r#"
            [system]
            kind = "burgers"
            [states]
            left = [1.0]
            right = [0.0]
            middle = [0.5]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, RiemannError::Config(_)));
    }

    #[test]
    fn state_length_must_match_the_system() {
        let mut problem = Preset::Sod.problem();
        problem.states.right = vec![1.0, 0.0];
        let err = run(&problem).unwrap_err();
        assert_eq!(
            err,
            RiemannError::DimensionMismatch {
                system: "euler",
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn every_preset_runs() {
        for preset in Preset::value_variants() {
            let report = run(&preset.problem()).unwrap();
            assert!(!report.solvers.is_empty(), "{preset:?}");
        }
    }

    #[test]
    fn empty_sampling_range_is_an_error() {
        let mut problem = Preset::AdvectionStep.problem();
        problem.sampling.xi_min = Some(1.0);
        problem.sampling.xi_max = Some(1.0);
        assert!(run(&problem).is_err());
    }

    #[test]
    fn infinite_sampling_bounds_are_rejected() {
        let problem = RiemannProblem::from_toml(
            r#"
            [system]
            kind = "burgers"
            [states]
            left = [1.0]
            right = [0.0]
            [sampling]
            xi_min = -inf
            xi_max = 1.0
            points = 3
            "#,
        )
        .unwrap();
        assert_eq!(problem.sampling.xi_min, Some(FLOAT::NEG_INFINITY));
        assert!(matches!(run(&problem), Err(RiemannError::Config(_))));

        let mut problem = Preset::AdvectionStep.problem();
        problem.sampling.xi_max = Some(FLOAT::INFINITY);
        assert!(matches!(run(&problem), Err(RiemannError::Config(_))));
        problem.sampling.xi_max = Some(FLOAT::NAN);
        assert!(matches!(run(&problem), Err(RiemannError::Config(_))));
    }

    #[test]
    fn sample_count_is_bounded() {
        let mut problem = Preset::AdvectionStep.problem();
        problem.solvers = vec![SolverKind::Roe];
        problem.sampling.points = Some(usize::MAX);
        assert!(matches!(run(&problem), Err(RiemannError::Config(_))));
        problem.sampling.points = Some(1);
        assert!(matches!(run(&problem), Err(RiemannError::Config(_))));
        problem.sampling.points = Some(MAX_POINTS);
        assert!(run(&problem).is_ok());
    }

    #[test]
    fn speed_limit_jump_is_solved_across_the_interface() {
        let problem = RiemannProblem::from_toml(
            r#"
            [system]
            kind = "variable-traffic"
            speed_limit_left = 1.0
            speed_limit_right = 0.5
            [states]
            left = [0.3]
            right = [0.8]
            [sampling]
            points = 5
            "#,
        )
        .unwrap();
        assert_eq!(problem.system, Preset::SpeedLimitDrop.problem().system);
        let report = run(&problem).unwrap();
        assert_eq!(report.system, "variable-traffic");
        assert_eq!(report.solvers.len(), 1);
        let s = &report.solvers[0];
        assert_eq!(s.solver, SolverKind::FluxJump);
        // The slower road lets through only its own flux.
        assert!((s.flux[0] - 0.08).abs() < 1e-12);
        assert_eq!(s.samples[4].1, vec![0.8]);
    }

    #[test]
    fn speed_limit_jump_refuses_other_solvers() {
        let mut problem = Preset::SpeedLimitDrop.problem();
        problem.solvers = vec![SolverKind::Hlle];
        assert!(matches!(
            run(&problem),
            Err(RiemannError::Unsupported { .. })
        ));
    }
}
