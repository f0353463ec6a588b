//! Traffic across a jump in the speed limit at `x = 0`.
//!
//! The flux changes across the interface, so the fan holds a stationary jump
//! at `x = 0` besides the moving waves. The flux through the interface is the
//! smaller of what the left road can send and what the right road can take,
//! `F = min(D_l(q_l), S_r(q_r))`. The interface states `q_a` (left road) and
//! `q_b` (right road) both carry `F`, and the moving waves `q_l → q_a` and
//! `q_b → q_r` travel at the Roe speed of their own road. Rarefactions are
//! therefore represented as single discontinuities.

use crate::{
    error::Result,
    system::{
        inadmissible,
        traffic::{Traffic, VariableTraffic},
        HyperbolicSystem, Side,
    },
    FLOAT,
};

use super::{Solution, Wave};

pub fn solve(system: &VariableTraffic, ql: [FLOAT; 1], qr: [FLOAT; 1]) -> Result<Solution<1>> {
    system.validate(ql, qr)?;
    let (left, right) = (system.left, system.right);
    let ([q_l], [q_r]) = (ql, qr);
    let f_l = left.flux(ql)[0];
    let f_r = right.flux(qr)[0];

    let interface = left.demand(q_l).min(right.supply(q_r));
    let q_a = if interface == f_l {
        q_l
    } else {
        interface_density(&left, interface, true)?
    };
    let q_b = if interface == f_r {
        q_r
    } else {
        interface_density(&right, interface, false)?
    };
    tracing::trace!(q_a, q_b, flux = interface, "interface states");

    let waves = [
        (q_a - q_l, roe_speed(&left, q_l, q_a)),
        (q_b - q_a, 0.0),
        (q_r - q_b, roe_speed(&right, q_b, q_r)),
    ]
    .into_iter()
    .filter(|(jump, _)| *jump != 0.0)
    .map(|(jump, speed)| Wave {
        jump: [jump],
        speed,
    })
    .collect();

    Ok(Solution {
        left: ql,
        right: qr,
        waves,
        amdq: [interface - f_l],
        apdq: [f_r - interface],
    })
}

fn roe_speed(road: &Traffic, a: FLOAT, b: FLOAT) -> FLOAT {
    road.speed_limit * (1.0 - a - b)
}

fn interface_density(road: &Traffic, flux: FLOAT, congested: bool) -> Result<FLOAT> {
    road.density(flux, congested)
        .ok_or_else(|| inadmissible(Side::Intermediate, "flux", flux, "exceeds the road capacity"))
}
