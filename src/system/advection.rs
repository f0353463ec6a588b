use crate::{error::Result, FLOAT};

use super::{Eigensystem, HyperbolicSystem, Side};

/// Scalar advection `q_t + u q_x = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advection {
    pub velocity: FLOAT,
}

impl Advection {
    pub fn new(velocity: FLOAT) -> Result<Self> {
        if !velocity.is_finite() {
            return Err(crate::RiemannError::InvalidParameter {
                name: "velocity",
                value: velocity,
                reason: "must be finite",
            });
        }
        Ok(Self { velocity })
    }
}

impl HyperbolicSystem<1> for Advection {
    fn name(&self) -> &'static str {
        "advection"
    }

    fn fields(&self) -> [&'static str; 1] {
        ["q"]
    }

    fn admissible(&self, _q: [FLOAT; 1], _side: Side) -> Result<()> {
        Ok(())
    }

    fn flux(&self, [q]: [FLOAT; 1]) -> [FLOAT; 1] {
        [self.velocity * q]
    }

    fn eigenvalues(&self, _q: [FLOAT; 1]) -> Result<[FLOAT; 1]> {
        Ok([self.velocity])
    }

    fn linearize(&self, _ql: [FLOAT; 1], _qr: [FLOAT; 1]) -> Result<Eigensystem<1>> {
        Ok(Eigensystem::from_columns([self.velocity], [[1.0]]))
    }
}
