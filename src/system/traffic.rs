use crate::{add, error::Result, solver::Solution, FLOAT};

use super::{inadmissible, positive, Eigensystem, HyperbolicSystem, Side};

/// Slack allowed when a flux computed in floating point exceeds the capacity.
const CAPACITY_TOLERANCE: FLOAT = 1e-12;

/// LWR traffic flow: density `q ∈ [0, 1]`, flux `v q (1 - q)` for speed limit `v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Traffic {
    pub speed_limit: FLOAT,
}

impl Traffic {
    pub fn new(speed_limit: FLOAT) -> Result<Self> {
        Ok(Self {
            speed_limit: positive("speed_limit", speed_limit)?,
        })
    }

    /// Largest flux `v / 4`, reached at density `1/2`.
    pub fn capacity(&self) -> FLOAT {
        0.25 * self.speed_limit
    }

    /// Density carrying `flux`, on the congested (`q ≥ 1/2`) or free-flow branch.
    pub fn density(&self, flux: FLOAT, congested: bool) -> Option<FLOAT> {
        let d = 1.0 - flux / self.capacity();
        if !(d >= -CAPACITY_TOLERANCE) {
            return None;
        }
        let r = d.max(0.0).sqrt();
        Some(if congested { 0.5 * (1.0 + r) } else { 0.5 * (1.0 - r) })
    }

    /// Largest flux the road can send downstream from density `q`.
    pub fn demand(&self, q: FLOAT) -> FLOAT {
        if q >= 0.5 {
            self.capacity()
        } else {
            self.flux([q])[0]
        }
    }

    /// Largest flux the road can take in upstream of density `q`.
    pub fn supply(&self, q: FLOAT) -> FLOAT {
        if q <= 0.5 {
            self.capacity()
        } else {
            self.flux([q])[0]
        }
    }
}

/// LWR traffic whose speed limit jumps from `left` to `right` at `x = 0`.
///
/// The flux depends on the side of the interface, so this is not a
/// [`HyperbolicSystem`]; it is solved by [`crate::solver::flux_jump`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableTraffic {
    pub left: Traffic,
    pub right: Traffic,
}

impl VariableTraffic {
    pub fn new(speed_limit_left: FLOAT, speed_limit_right: FLOAT) -> Result<Self> {
        Ok(Self {
            left: Traffic::new(speed_limit_left)?,
            right: Traffic::new(speed_limit_right)?,
        })
    }

    pub fn name(&self) -> &'static str {
        "variable-traffic"
    }

    pub fn fields(&self) -> [&'static str; 1] {
        self.left.fields()
    }

    pub fn validate(&self, ql: [FLOAT; 1], qr: [FLOAT; 1]) -> Result<()> {
        self.left.validate(ql, Side::Left)?;
        self.right.validate(qr, Side::Right)
    }

    /// `f_l(q_l) + A⁻Δq`, the flux through the interface.
    pub fn interface_flux(&self, s: &Solution<1>) -> [FLOAT; 1] {
        add(self.left.flux(s.left), s.amdq)
    }
}

impl HyperbolicSystem<1> for Traffic {
    fn name(&self) -> &'static str {
        "traffic"
    }

    fn fields(&self) -> [&'static str; 1] {
        ["density"]
    }

    fn admissible(&self, [q]: [FLOAT; 1], side: Side) -> Result<()> {
        if (0.0..=1.0).contains(&q) {
            Ok(())
        } else {
            Err(inadmissible(side, "density", q, "must lie in [0, 1]"))
        }
    }

    fn flux(&self, [q]: [FLOAT; 1]) -> [FLOAT; 1] {
        [self.speed_limit * q * (1.0 - q)]
    }

    fn eigenvalues(&self, [q]: [FLOAT; 1]) -> Result<[FLOAT; 1]> {
        Ok([self.speed_limit * (1.0 - 2.0 * q)])
    }

    fn linearize(&self, [ql]: [FLOAT; 1], [qr]: [FLOAT; 1]) -> Result<Eigensystem<1>> {
        Ok(Eigensystem::from_columns(
            [self.speed_limit * (1.0 - ql - qr)],
            [[1.0]],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_outside_unit_interval_is_rejected() {
        let t = Traffic::new(1.0).unwrap();
        assert!(t.validate([1.2], Side::Left).is_err());
        assert!(t.validate([0.0], Side::Right).is_ok());
        assert!(Traffic::new(0.0).is_err());
    }

    #[test]
    fn roe_speed_satisfies_rankine_hugoniot() {
        let t = Traffic::new(2.0).unwrap();
        let (ql, qr) = (0.2, 0.9);
        let s = t.linearize([ql], [qr]).unwrap().speeds[0];
        let rh = (t.flux([qr])[0] - t.flux([ql])[0]) / (qr - ql);
        assert!((s - rh).abs() < 1e-14);
    }

    #[test]
    fn densities_on_both_branches_carry_the_flux() {
        let t = Traffic::new(2.0).unwrap();
        let f = t.flux([0.3])[0];
        let free = t.density(f, false).unwrap();
        let jammed = t.density(f, true).unwrap();
        assert!((free - 0.3).abs() < 1e-14);
        assert!((jammed - 0.7).abs() < 1e-14);
        assert_eq!(t.density(t.capacity(), true), Some(0.5));
        assert_eq!(t.density(0.6, false), None);
    }

    #[test]
    fn demand_and_supply_saturate_at_capacity() {
        let t = Traffic::new(1.0).unwrap();
        assert_eq!(t.demand(0.8), 0.25);
        assert!((t.demand(0.2) - 0.16).abs() < 1e-15);
        assert_eq!(t.supply(0.2), 0.25);
        assert!((t.supply(0.8) - 0.16).abs() < 1e-15);
    }

    #[test]
    fn each_side_is_validated_on_its_own_road() {
        let road = VariableTraffic::new(1.0, 0.5).unwrap();
        assert!(road.validate([0.3], [0.8]).is_ok());
        assert!(matches!(
            road.validate([0.3], [1.5]),
            Err(crate::RiemannError::Inadmissible {
                side: Side::Right,
                ..
            })
        ));
        assert!(VariableTraffic::new(1.0, -1.0).is_err());
    }
}
