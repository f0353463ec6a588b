use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{problem::Report, FLOAT};

fn join(vs: &[FLOAT]) -> String {
    vs.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plain-text report: `#` header lines, then one `xi q...` row per sample and
/// a blank line after each solver.
pub fn write_table<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    writeln!(out, "# system {}", report.system)?;
    writeln!(out, "# left {}", join(&report.left))?;
    writeln!(out, "# right {}", join(&report.right))?;
    for s in &report.solvers {
        writeln!(out)?;
        writeln!(out, "# solver {}", s.solver)?;
        for (p, w) in s.waves.iter().enumerate() {
            writeln!(out, "# wave {} speed {} jump {}", p, w.speed, join(&w.jump))?;
        }
        writeln!(out, "# flux {}", join(&s.flux))?;
        writeln!(out, "# amdq {}", join(&s.amdq))?;
        writeln!(out, "# apdq {}", join(&s.apdq))?;
        let mut start = "# xi".to_string();
        for f in &report.fields {
            start = format!("{} {}", start, f);
        }
        writeln!(out, "{}", start)?;
        for (xi, q) in &s.samples {
            writeln!(out, "{} {}", xi, join(q))?;
        }
    }
    Ok(())
}

/// Samples as little-endian `f64`: for each solver, for each sample, `xi`
/// followed by the state components.
pub fn write_raw<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    for s in &report.solvers {
        for (xi, q) in &s.samples {
            out.write_f64::<LittleEndian>(*xi)?;
            for v in q {
                out.write_f64::<LittleEndian>(*v)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use byteorder::ReadBytesExt;

    use super::*;
    use crate::{
        problem::{run, Preset},
        solver::SolverKind,
    };

    fn report() -> Report {
        let mut problem = Preset::AdvectionStep.problem();
        problem.solvers = vec![SolverKind::Roe];
        problem.sampling.xi_min = Some(-1.0);
        problem.sampling.xi_max = Some(3.0);
        problem.sampling.points = Some(3);
        run(&problem).unwrap()
    }

    #[test]
    fn table_has_header_and_rows() {
        let mut buf = Vec::new();
        write_table(&report(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# system advection");
        assert!(lines.contains(&"# solver roe"));
        assert!(lines.contains(&"# wave 0 speed 1 jump -1"));
        assert!(lines.contains(&"# xi q"));
        assert_eq!(&lines[lines.len() - 3..], &["-1 1", "1 1", "3 0"]);
    }

    #[test]
    fn raw_output_is_little_endian() {
        let mut buf = Vec::new();
        write_raw(&report(), &mut buf).unwrap();
        assert_eq!(buf.len(), 3 * 2 * 8);
        let mut rdr = &buf[..];
        assert_eq!(rdr.read_f64::<LittleEndian>().unwrap(), -1.0);
        assert_eq!(rdr.read_f64::<LittleEndian>().unwrap(), 1.0);
    }
}
