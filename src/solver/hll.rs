//! Two-wave solvers of Harten, Lax and van Leer.
//!
//! The fan is bounded by estimated speeds `s_1 < s_2` and the single middle
//! state is the one that makes the decomposition conservative:
//! `s_1 (q_m - q_l) + s_2 (q_r - q_m) = f(q_r) - f(q_l)`.

use crate::{error::Result, sub, system::HyperbolicSystem, FLOAT};

use super::{Solution, SpeedEstimate, Wave};

/// Outer speeds `(s_1, s_2)` of the wave fan.
pub fn speeds<S: HyperbolicSystem<F> + ?Sized, const F: usize>(
    system: &S,
    ql: [FLOAT; F],
    qr: [FLOAT; F],
    estimate: SpeedEstimate,
) -> Result<(FLOAT, FLOAT)> {
    let ll = system.eigenvalues(ql)?;
    let lr = system.eigenvalues(qr)?;
    let davis = (ll[0].min(lr[0]), ll[F - 1].max(lr[F - 1]));
    let speeds = match estimate {
        SpeedEstimate::Davis => davis,
        SpeedEstimate::Einfeldt => match system.linearize(ql, qr) {
            Ok(eig) => (
                ll[0].min(eig.speeds[0]),
                lr[F - 1].max(eig.speeds[F - 1]),
            ),
            Err(e) => {
                tracing::debug!(%e, "no Roe average, falling back to Davis speeds");
                davis
            }
        },
        SpeedEstimate::Rusanov => {
            let s = ll
                .iter()
                .chain(lr.iter())
                .fold(0.0, |m: FLOAT, l| m.max(l.abs()));
            (-s, s)
        }
    };
    Ok(speeds)
}

pub fn solve<S: HyperbolicSystem<F> + ?Sized, const F: usize>(
    system: &S,
    ql: [FLOAT; F],
    qr: [FLOAT; F],
    estimate: SpeedEstimate,
) -> Result<Solution<F>> {
    let dq = sub(qr, ql);
    if dq.iter().all(|d| *d == 0.0) {
        return Ok(Solution::trivial(ql));
    }
    let (s1, s2) = speeds(system, ql, qr, estimate)?;
    if s2 - s1 <= 0.0 {
        tracing::debug!(s1, s2, "degenerate fan, using a single wave");
        return Ok(Solution::from_waves(
            ql,
            qr,
            vec![Wave {
                jump: dq,
                speed: 0.5 * (s1 + s2),
            }],
        ));
    }
    let qm = middle_state(system, ql, qr, s1, s2);
    let waves = [(sub(qm, ql), s1), (sub(qr, qm), s2)]
        .into_iter()
        .filter(|(jump, _)| jump.iter().any(|j| *j != 0.0))
        .map(|(jump, speed)| Wave { jump, speed })
        .collect();
    Ok(Solution::from_waves(ql, qr, waves))
}

pub fn middle_state<S: HyperbolicSystem<F> + ?Sized, const F: usize>(
    system: &S,
    ql: [FLOAT; F],
    qr: [FLOAT; F],
    s1: FLOAT,
    s2: FLOAT,
) -> [FLOAT; F] {
    let fl = system.flux(ql);
    let fr = system.flux(qr);
    let mut qm = [0.0; F];
    for f in 0..F {
        qm[f] = (fr[f] - fl[f] - s2 * qr[f] + s1 * ql[f]) / (s1 - s2);
    }
    qm
}

/// HLL flux written directly in terms of the outer speeds.
pub fn flux<S: HyperbolicSystem<F> + ?Sized, const F: usize>(
    system: &S,
    ql: [FLOAT; F],
    qr: [FLOAT; F],
    s1: FLOAT,
    s2: FLOAT,
) -> [FLOAT; F] {
    if s1 >= 0.0 {
        return system.flux(ql);
    }
    if s2 <= 0.0 {
        return system.flux(qr);
    }
    let fl = system.flux(ql);
    let fr = system.flux(qr);
    let mut res = [0.0; F];
    for f in 0..F {
        res[f] = (s2 * fl[f] - s1 * fr[f] + s1 * s2 * (qr[f] - ql[f])) / (s2 - s1);
    }
    res
}
