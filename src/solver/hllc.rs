//! HLL with the contact restored: three waves `s_l < s_* < s_r`.

use crate::{
    error::{Result, RiemannError},
    sub,
    system::HyperbolicSystem,
    FLOAT,
};

use super::{hll, Solution, SolverKind, SpeedEstimate, Wave};

pub fn solve<S: HyperbolicSystem<F> + ?Sized, const F: usize>(
    system: &S,
    ql: [FLOAT; F],
    qr: [FLOAT; F],
) -> Result<Solution<F>> {
    if !system.has_contact() {
        return Err(RiemannError::Unsupported {
            solver: SolverKind::Hllc.to_string(),
            system: system.name(),
        });
    }
    let (sl, sr) = hll::speeds(system, ql, qr, SpeedEstimate::Einfeldt)?;
    if ql == qr || sr - sl <= 0.0 {
        return hll::solve(system, ql, qr, SpeedEstimate::Einfeldt);
    }
    let contact = system.contact(ql, qr, sl, sr)?;
    tracing::trace!(sl, s = contact.speed, sr, "hllc fan");
    let waves = vec![
        Wave {
            jump: sub(contact.left, ql),
            speed: sl,
        },
        Wave {
            jump: sub(contact.right, contact.left),
            speed: contact.speed,
        },
        Wave {
            jump: sub(qr, contact.right),
            speed: sr,
        },
    ];
    Ok(Solution::from_waves(ql, qr, waves))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::euler::{Euler, Primitive};

    #[test]
    fn isolated_contact_is_resolved_exactly() {
        let gas = Euler::new(1.4).unwrap();
        let ql = gas.conserved(Primitive {
            density: 1.0,
            velocity: 0.3,
            pressure: 1.0,
        });
        let qr = gas.conserved(Primitive {
            density: 0.2,
            velocity: 0.3,
            pressure: 1.0,
        });
        let s = solve(&gas, ql, qr).unwrap();
        assert!((s.waves[1].speed - 0.3).abs() < 1e-12);
        // All the jump sits on the contact.
        for f in 0..3 {
            assert!(s.waves[0].jump[f].abs() < 1e-12);
            assert!(s.waves[2].jump[f].abs() < 1e-12);
        }
        let flux = s.interface_flux(&gas);
        let exact = gas.flux(ql);
        for f in 0..3 {
            assert!((flux[f] - exact[f]).abs() < 1e-12);
        }
    }

    #[test]
    fn sod_is_conservative() {
        let gas = Euler::new(1.4).unwrap();
        let (ql, qr) = ([1.0, 0.0, 2.5], [0.125, 0.0, 0.25]);
        let s = solve(&gas, ql, qr).unwrap();
        let df = sub(gas.flux(qr), gas.flux(ql));
        let total = s.total_fluctuation();
        for f in 0..3 {
            assert!((total[f] - df[f]).abs() < 1e-12);
        }
    }
}
