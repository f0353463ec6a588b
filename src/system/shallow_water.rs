//! Shallow water equations for depth `h` and discharge `hu`.

use crate::{error::Result, FLOAT};

use super::{inadmissible, positive, Eigensystem, HyperbolicSystem, Side};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShallowWater {
    pub gravity: FLOAT,
}

impl ShallowWater {
    pub fn new(gravity: FLOAT) -> Result<Self> {
        Ok(Self {
            gravity: positive("gravity", gravity)?,
        })
    }

    /// Velocity, zero on a dry state.
    pub fn velocity(&self, [h, hu]: [FLOAT; 2]) -> FLOAT {
        if h > 0.0 {
            hu / h
        } else {
            0.0
        }
    }

    pub fn celerity(&self, h: FLOAT) -> FLOAT {
        (self.gravity * h.max(0.0)).sqrt()
    }
}

impl HyperbolicSystem<2> for ShallowWater {
    fn name(&self) -> &'static str {
        "shallow-water"
    }

    fn fields(&self) -> [&'static str; 2] {
        ["depth", "discharge"]
    }

    fn admissible(&self, [h, hu]: [FLOAT; 2], side: Side) -> Result<()> {
        if h < 0.0 {
            return Err(inadmissible(side, "depth", h, "must not be negative"));
        }
        if h == 0.0 && hu != 0.0 {
            return Err(inadmissible(
                side,
                "discharge",
                hu,
                "must vanish on a dry state",
            ));
        }
        Ok(())
    }

    fn flux(&self, q: [FLOAT; 2]) -> [FLOAT; 2] {
        let [h, hu] = q;
        let u = self.velocity(q);
        [hu, hu * u + 0.5 * self.gravity * h * h]
    }

    fn eigenvalues(&self, q: [FLOAT; 2]) -> Result<[FLOAT; 2]> {
        self.admissible(q, Side::Intermediate)?;
        let u = self.velocity(q);
        let c = self.celerity(q[0]);
        Ok([u - c, u + c])
    }

    fn linearize(&self, ql: [FLOAT; 2], qr: [FLOAT; 2]) -> Result<Eigensystem<2>> {
        let sl = ql[0].max(0.0).sqrt();
        let sr = qr[0].max(0.0).sqrt();
        let (u, c) = if sl + sr > 0.0 {
            let h = 0.5 * (ql[0] + qr[0]);
            let u = (sl * self.velocity(ql) + sr * self.velocity(qr)) / (sl + sr);
            (u, self.celerity(h))
        } else {
            (0.0, 0.0)
        };
        Ok(Eigensystem::from_columns(
            [u - c, u + c],
            [[1.0, u - c], [1.0, u + c]],
        ))
    }
}
