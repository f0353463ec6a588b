use crate::{error::Result, FLOAT};

use super::{positive, Eigensystem, HyperbolicSystem, Side};

/// Linear acoustics in pressure/velocity form:
/// `p_t + K u_x = 0`, `u_t + p_x / ρ = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acoustics {
    pub bulk_modulus: FLOAT,
    pub density: FLOAT,
}

impl Acoustics {
    pub fn new(bulk_modulus: FLOAT, density: FLOAT) -> Result<Self> {
        Ok(Self {
            bulk_modulus: positive("bulk_modulus", bulk_modulus)?,
            density: positive("density", density)?,
        })
    }

    pub fn sound_speed(&self) -> FLOAT {
        (self.bulk_modulus / self.density).sqrt()
    }

    pub fn impedance(&self) -> FLOAT {
        self.density * self.sound_speed()
    }
}

impl HyperbolicSystem<2> for Acoustics {
    fn name(&self) -> &'static str {
        "acoustics"
    }

    fn fields(&self) -> [&'static str; 2] {
        ["pressure", "velocity"]
    }

    fn admissible(&self, _q: [FLOAT; 2], _side: Side) -> Result<()> {
        Ok(())
    }

    fn flux(&self, [p, u]: [FLOAT; 2]) -> [FLOAT; 2] {
        [self.bulk_modulus * u, p / self.density]
    }

    fn eigenvalues(&self, _q: [FLOAT; 2]) -> Result<[FLOAT; 2]> {
        let c = self.sound_speed();
        Ok([-c, c])
    }

    fn linearize(&self, _ql: [FLOAT; 2], _qr: [FLOAT; 2]) -> Result<Eigensystem<2>> {
        let c = self.sound_speed();
        let z = self.impedance();
        Ok(Eigensystem::from_columns([-c, c], [[-z, 1.0], [z, 1.0]]))
    }
}
