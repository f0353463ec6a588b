//! Compressible Euler equations for a polytropic ideal gas.
//!
//! Conserved variables are density `ρ`, momentum `ρu` and total energy `E`,
//! with `p = (γ - 1)(E - ρu²/2)`.

use crate::{error::Result, FLOAT};

use super::{inadmissible, Contact, Eigensystem, HyperbolicSystem, Side};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Euler {
    pub gamma: FLOAT,
}

/// Primitive variables `(ρ, u, p)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub density: FLOAT,
    pub velocity: FLOAT,
    pub pressure: FLOAT,
}

impl Euler {
    pub fn new(gamma: FLOAT) -> Result<Self> {
        if !(gamma.is_finite() && gamma > 1.0) {
            return Err(crate::RiemannError::InvalidParameter {
                name: "gamma",
                value: gamma,
                reason: "must be greater than 1",
            });
        }
        Ok(Self { gamma })
    }

    pub fn pressure(&self, [rho, mom, e]: [FLOAT; 3]) -> FLOAT {
        (self.gamma - 1.0) * (e - 0.5 * mom * mom / rho)
    }

    pub fn primitive(&self, q: [FLOAT; 3], side: Side) -> Result<Primitive> {
        let [rho, mom, _] = q;
        if rho <= 0.0 {
            return Err(inadmissible(side, "density", rho, "must be positive"));
        }
        let p = self.pressure(q);
        if p.is_nan() || p <= 0.0 {
            return Err(inadmissible(side, "pressure", p, "must be positive"));
        }
        Ok(Primitive {
            density: rho,
            velocity: mom / rho,
            pressure: p,
        })
    }

    pub fn conserved(&self, w: Primitive) -> [FLOAT; 3] {
        let Primitive {
            density: rho,
            velocity: u,
            pressure: p,
        } = w;
        [rho, rho * u, p / (self.gamma - 1.0) + 0.5 * rho * u * u]
    }

    pub fn sound_speed(&self, w: &Primitive) -> FLOAT {
        (self.gamma * w.pressure / w.density).sqrt()
    }

    fn enthalpy(&self, q: [FLOAT; 3], w: &Primitive) -> FLOAT {
        (q[2] + w.pressure) / w.density
    }
}

impl HyperbolicSystem<3> for Euler {
    fn name(&self) -> &'static str {
        "euler"
    }

    fn fields(&self) -> [&'static str; 3] {
        ["density", "momentum", "energy"]
    }

    fn admissible(&self, q: [FLOAT; 3], side: Side) -> Result<()> {
        self.primitive(q, side).map(|_| ())
    }

    fn flux(&self, q: [FLOAT; 3]) -> [FLOAT; 3] {
        let [rho, mom, e] = q;
        let u = mom / rho;
        let p = self.pressure(q);
        [mom, mom * u + p, (e + p) * u]
    }

    fn eigenvalues(&self, q: [FLOAT; 3]) -> Result<[FLOAT; 3]> {
        let w = self.primitive(q, Side::Intermediate)?;
        let c = self.sound_speed(&w);
        Ok([w.velocity - c, w.velocity, w.velocity + c])
    }

    fn linearize(&self, ql: [FLOAT; 3], qr: [FLOAT; 3]) -> Result<Eigensystem<3>> {
        let wl = self.primitive(ql, Side::Left)?;
        let wr = self.primitive(qr, Side::Right)?;
        let rl = wl.density.sqrt();
        let rr = wr.density.sqrt();
        let u = (rl * wl.velocity + rr * wr.velocity) / (rl + rr);
        let h = (rl * self.enthalpy(ql, &wl) + rr * self.enthalpy(qr, &wr)) / (rl + rr);
        let c2 = (self.gamma - 1.0) * (h - 0.5 * u * u);
        if c2 <= 0.0 {
            return Err(inadmissible(
                Side::Intermediate,
                "sound speed squared",
                c2,
                "Roe average must be positive",
            ));
        }
        let c = c2.sqrt();
        Ok(Eigensystem::from_columns(
            [u - c, u, u + c],
            [
                [1.0, u - c, h - u * c],
                [1.0, u, 0.5 * u * u],
                [1.0, u + c, h + u * c],
            ],
        ))
    }

    fn has_contact(&self) -> bool {
        true
    }

    fn contact(
        &self,
        ql: [FLOAT; 3],
        qr: [FLOAT; 3],
        sl: FLOAT,
        sr: FLOAT,
    ) -> Result<Contact<3>> {
        let wl = self.primitive(ql, Side::Left)?;
        let wr = self.primitive(qr, Side::Right)?;
        let ml = wl.density * (sl - wl.velocity);
        let mr = wr.density * (sr - wr.velocity);
        let s = (wr.pressure - wl.pressure + ml * wl.velocity - mr * wr.velocity) / (ml - mr);
        if !(sl < s && s < sr) {
            return Err(inadmissible(
                Side::Intermediate,
                "contact speed",
                s,
                "must lie strictly inside the wave fan",
            ));
        }
        let star = |q: [FLOAT; 3], w: &Primitive, sk: FLOAT| {
            let k = w.density * (sk - w.velocity) / (sk - s);
            let e = q[2] / w.density
                + (s - w.velocity) * (s + w.pressure / (w.density * (sk - w.velocity)));
            [k, k * s, k * e]
        };
        Ok(Contact {
            speed: s,
            left: star(ql, &wl, sl),
            right: star(qr, &wr, sr),
        })
    }
}
