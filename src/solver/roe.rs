//! Linearized Riemann solver based on a Roe matrix.
//!
//! The jump `q_r - q_l` is projected onto the eigenvectors of the linearized
//! Jacobian, `Δq = Σ α_p r_p`, and each projection travels at the matching
//! Roe speed. Without correction the solution of a transonic rarefaction is an
//! entropy-violating expansion shock, so the optional Harten-Hyman fix splits
//! the fluctuation of such a wave between both sides.

use crate::{
    add, axpy,
    error::{Result, RiemannError},
    scale, sub,
    system::HyperbolicSystem,
    FLOAT,
};

use super::{Solution, Wave};

pub fn solve<S: HyperbolicSystem<F> + ?Sized, const F: usize>(
    system: &S,
    ql: [FLOAT; F],
    qr: [FLOAT; F],
    entropy_fix: bool,
) -> Result<Solution<F>> {
    let dq = sub(qr, ql);
    if dq.iter().all(|d| *d == 0.0) {
        return Ok(Solution::trivial(ql));
    }
    let eig = system.linearize(ql, qr)?;
    let alpha = eig
        .strengths(dq)
        .ok_or(RiemannError::SingularEigenvectors {
            system: system.name(),
        })?;

    let mut waves = Vec::with_capacity(F);
    let mut fields = Vec::with_capacity(F);
    for p in 0..F {
        if alpha[p] != 0.0 {
            waves.push(Wave {
                jump: scale(alpha[p], eig.column(p)),
                speed: eig.speeds[p],
            });
            fields.push(p);
        }
    }

    if !entropy_fix {
        return Ok(Solution::from_waves(ql, qr, waves));
    }
    Ok(harten_hyman(system, ql, qr, waves, &fields))
}

fn harten_hyman<S: HyperbolicSystem<F> + ?Sized, const F: usize>(
    system: &S,
    ql: [FLOAT; F],
    qr: [FLOAT; F],
    waves: Vec<Wave<F>>,
    fields: &[usize],
) -> Solution<F> {
    let mut amdq = [0.0; F];
    let mut apdq = [0.0; F];
    let mut q = ql;
    for (w, &p) in waves.iter().zip(fields) {
        let qn = add(q, w.jump);
        match side_speeds(system, p, q, qn) {
            Some((l, r)) if l < 0.0 && 0.0 < r => {
                let beta = (r - w.speed) / (r - l);
                tracing::debug!(
                    field = p,
                    lambda_l = l,
                    lambda_r = r,
                    beta,
                    "entropy fix for transonic rarefaction"
                );
                amdq = axpy(amdq, beta * l, w.jump);
                apdq = axpy(apdq, (1.0 - beta) * r, w.jump);
            }
            _ => {
                amdq = axpy(amdq, w.speed.min(0.0), w.jump);
                apdq = axpy(apdq, w.speed.max(0.0), w.jump);
            }
        }
        q = qn;
    }
    Solution {
        left: ql,
        right: qr,
        waves,
        amdq,
        apdq,
    }
}

/// Speeds of field `p` just before and just after its wave.
fn side_speeds<S: HyperbolicSystem<F> + ?Sized, const F: usize>(
    system: &S,
    p: usize,
    before: [FLOAT; F],
    after: [FLOAT; F],
) -> Option<(FLOAT, FLOAT)> {
    match (system.eigenvalues(before), system.eigenvalues(after)) {
        (Ok(lb), Ok(la)) => Some((lb[p], la[p])),
        (Err(e), _) | (_, Err(e)) => {
            tracing::debug!(field = p, %e, "no entropy fix across a non-physical state");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{
        acoustics::Acoustics, burgers::Burgers, euler::Euler, shallow_water::ShallowWater,
        traffic::Traffic,
    };

    #[test]
    fn burgers_shock_is_a_single_wave() {
        let s = solve(&Burgers, [2.0], [0.0], false).unwrap();
        assert_eq!(s.waves.len(), 1);
        assert_eq!(s.waves[0].speed, 1.0);
        assert_eq!(s.apdq, [-2.0]);
        assert_eq!(s.amdq, [0.0]);
    }

    #[test]
    fn transonic_rarefaction_is_split_by_the_fix() {
        // Without the fix the Roe speed 0 makes the expansion shock stationary.
        let plain = solve(&Burgers, [-1.0], [1.0], false).unwrap();
        assert_eq!(plain.amdq, [0.0]);
        assert_eq!(plain.interface_flux(&Burgers), [0.5]);

        let fixed = solve(&Burgers, [-1.0], [1.0], true).unwrap();
        // beta = 1/2: A⁻Δq = 1/2 * (-1) * 2 = -1, flux f(q_l) - 1 = -0.5
        assert!((fixed.amdq[0] + 1.0).abs() < 1e-14);
        assert!((fixed.apdq[0] - 1.0).abs() < 1e-14);
        assert!((fixed.interface_flux(&Burgers)[0] + 0.5).abs() < 1e-14);
        assert!(fixed.total_fluctuation()[0].abs() < 1e-14);
    }

    #[test]
    fn queue_discharge_is_split_by_the_fix() {
        // Jam at 0.9 released into light traffic at 0.2.
        let road = Traffic::new(1.0).unwrap();
        let (ql, qr) = ([0.9], [0.2]);

        let plain = solve(&road, ql, qr, false).unwrap();
        assert_eq!(plain.waves.len(), 1);
        assert!((plain.waves[0].speed + 0.1).abs() < 1e-14);
        assert!((plain.amdq[0] - 0.07).abs() < 1e-14);
        assert_eq!(plain.apdq, [0.0]);

        // lambda_l = -0.8, lambda_r = 0.6, beta = (0.6 + 0.1) / 1.4 = 1/2
        let fixed = solve(&road, ql, qr, true).unwrap();
        assert!((fixed.amdq[0] - 0.28).abs() < 1e-12);
        assert!((fixed.apdq[0] + 0.21).abs() < 1e-12);
        assert!((fixed.interface_flux(&road)[0] - 0.37).abs() < 1e-12);
        let df = road.flux(qr)[0] - road.flux(ql)[0];
        assert!((fixed.total_fluctuation()[0] - df).abs() < 1e-12);
    }

    #[test]
    fn fix_is_skipped_across_a_negative_depth() {
        // Two strong rarefactions: the Roe middle state has h = -4.
        let swe = ShallowWater::new(1.0).unwrap();
        let (ql, qr) = ([1.0, -5.0], [1.0, 5.0]);
        let fixed = solve(&swe, ql, qr, true).unwrap();
        let middle = fixed.states()[1];
        assert!((middle[0] + 4.0).abs() < 1e-12);
        assert!(swe.eigenvalues(middle).is_err());

        let plain = solve(&swe, ql, qr, false).unwrap();
        assert_eq!(fixed.amdq, plain.amdq);
        assert_eq!(fixed.apdq, plain.apdq);

        let df = sub(swe.flux(qr), swe.flux(ql));
        let total = fixed.total_fluctuation();
        for f in 0..2 {
            assert!((total[f] - df[f]).abs() < 1e-12);
        }
    }

    #[test]
    fn acoustics_waves_are_exact() {
        let a = Acoustics::new(1.0, 1.0).unwrap();
        let s = solve(&a, [1.0, 0.0], [0.0, 0.0], false).unwrap();
        assert_eq!(s.waves.len(), 2);
        let mid = s.sample(0.0);
        assert!((mid[0] - 0.5).abs() < 1e-14);
        assert!((mid[1] - 0.5).abs() < 1e-14);
    }

    #[test]
    fn sod_waves_are_ordered_and_conservative() {
        let gas = Euler::new(1.4).unwrap();
        let (ql, qr) = ([1.0, 0.0, 2.5], [0.125, 0.0, 0.25]);
        let s = solve(&gas, ql, qr, true).unwrap();
        assert_eq!(s.waves.len(), 3);
        assert!(s.waves.windows(2).all(|w| w[0].speed <= w[1].speed));
        let df = sub(gas.flux(qr), gas.flux(ql));
        let total = s.total_fluctuation();
        for i in 0..3 {
            assert!((total[i] - df[i]).abs() < 1e-12);
        }
    }
}
