use crate::{error::Result, FLOAT};

use super::{Eigensystem, HyperbolicSystem, Side};

/// Inviscid Burgers' equation `q_t + (q²/2)_x = 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Burgers;

impl HyperbolicSystem<1> for Burgers {
    fn name(&self) -> &'static str {
        "burgers"
    }

    fn fields(&self) -> [&'static str; 1] {
        ["q"]
    }

    fn admissible(&self, _q: [FLOAT; 1], _side: Side) -> Result<()> {
        Ok(())
    }

    fn flux(&self, [q]: [FLOAT; 1]) -> [FLOAT; 1] {
        [0.5 * q * q]
    }

    fn eigenvalues(&self, [q]: [FLOAT; 1]) -> Result<[FLOAT; 1]> {
        Ok([q])
    }

    fn linearize(&self, [ql]: [FLOAT; 1], [qr]: [FLOAT; 1]) -> Result<Eigensystem<1>> {
        Ok(Eigensystem::from_columns([0.5 * (ql + qr)], [[1.0]]))
    }
}
