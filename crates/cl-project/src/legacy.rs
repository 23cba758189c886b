//! Import of the plain-text loop description.
//!
//! A legacy directory holds:
//! - `main.txt`: one `<file> <class>` pair per line, in loop order
//! - one parameter file per element, `<name> <value>` per line, values positional
//! - `default_parameters.txt`: `m_dot_in` [kg/s], `p_in` [bar], `T_in` [°C], optional `x_in`
//!
//! Classes: `classPipes` (L, d, k), `classExchanger` (Qdot), `classTankC` (x, T, V, ts),
//! `classTankS` (x, T, V, ts, Qdot).

use crate::schema::{
    ElementDef, ElementKindDef, FluidDef, InletDef, Project, SCHEMA_VERSION, SimulationDef,
};
use crate::{ProjectError, ProjectResult};
use cl_core::units::{bar, celsius};
use std::collections::HashMap;
use std::path::Path;

pub const MAIN_FILE: &str = "main.txt";
pub const DEFAULTS_FILE: &str = "default_parameters.txt";

pub fn load_legacy_dir(dir: &Path) -> ProjectResult<Project> {
    let main = read(dir, MAIN_FILE)?;
    let mut elements = Vec::new();
    for (lineno, line) in non_blank_lines(&main) {
        let (file, class) = split_pair(line).ok_or_else(|| ProjectError::Legacy {
            file: MAIN_FILE.to_string(),
            what: format!("line {}: expected '<file> <class>'", lineno),
        })?;
        let values = read_values(dir, file)?;
        let kind = element_kind(class, file, &values)?;
        let id = file.strip_suffix(".txt").unwrap_or(file).to_string();
        elements.push(ElementDef {
            name: id.clone(),
            id,
            kind,
        });
    }

    let inlet = read_defaults(dir)?;
    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("legacy")
        .to_string();

    Ok(Project {
        version: SCHEMA_VERSION,
        name,
        fluid: FluidDef::default(),
        inlet,
        simulation: SimulationDef::default(),
        elements,
        schedules: vec![],
    })
}

fn read(dir: &Path, file: &str) -> ProjectResult<String> {
    std::fs::read_to_string(dir.join(file)).map_err(|e| ProjectError::Legacy {
        file: file.to_string(),
        what: e.to_string(),
    })
}

fn non_blank_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
}

fn split_pair(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Some((a, b)),
        _ => None,
    }
}

/// Parse `<name> <value>` lines into `(name, value)` in file order.
fn read_named_values(dir: &Path, file: &str) -> ProjectResult<Vec<(String, f64)>> {
    let content = read(dir, file)?;
    let mut values = Vec::new();
    for (lineno, line) in non_blank_lines(&content) {
        let bad = |what: &str| ProjectError::Legacy {
            file: file.to_string(),
            what: format!("line {}: {}", lineno, what),
        };
        let (name, raw) = split_pair(line).ok_or_else(|| bad("expected '<name> <value>'"))?;
        let value: f64 = raw
            .parse()
            .map_err(|_| bad(&format!("'{}' is not a number", raw)))?;
        values.push((name.to_string(), value));
    }
    Ok(values)
}

fn read_values(dir: &Path, file: &str) -> ProjectResult<Vec<f64>> {
    Ok(read_named_values(dir, file)?
        .into_iter()
        .map(|(_, v)| v)
        .collect())
}

fn element_kind(class: &str, file: &str, v: &[f64]) -> ProjectResult<ElementKindDef> {
    let expect = |n: usize| -> ProjectResult<()> {
        if v.len() == n {
            Ok(())
        } else {
            Err(ProjectError::Legacy {
                file: file.to_string(),
                what: format!("{} takes {} parameters, found {}", class, n, v.len()),
            })
        }
    };
    match class {
        "classPipes" => {
            expect(3)?;
            Ok(ElementKindDef::Pipe {
                length_m: v[0],
                diameter_m: v[1],
                roughness_m: v[2],
            })
        }
        "classExchanger" => {
            expect(1)?;
            Ok(ElementKindDef::Exchanger { duty_w: v[0] })
        }
        "classTankC" => {
            expect(4)?;
            Ok(ElementKindDef::TankCentral {
                quality: v[0],
                temperature_k: v[1],
                volume_m3: v[2],
                time_step_s: v[3],
            })
        }
        "classTankS" => {
            expect(5)?;
            Ok(ElementKindDef::TankSubstation {
                quality: v[0],
                temperature_k: v[1],
                volume_m3: v[2],
                time_step_s: v[3],
                duty_w: v[4],
                mass_flow_out_kg_s: None,
            })
        }
        other => Err(ProjectError::Legacy {
            file: MAIN_FILE.to_string(),
            what: format!("unknown class '{}'", other),
        }),
    }
}

fn read_defaults(dir: &Path) -> ProjectResult<InletDef> {
    let values: HashMap<String, f64> = read_named_values(dir, DEFAULTS_FILE)?
        .into_iter()
        .collect();
    let get = |key: &str| {
        values.get(key).copied().ok_or_else(|| ProjectError::Legacy {
            file: DEFAULTS_FILE.to_string(),
            what: format!("missing '{}'", key),
        })
    };
    Ok(InletDef {
        mass_flow_kg_s: get("m_dot_in")?,
        pressure_pa: bar(get("p_in")?).value,
        temperature_k: celsius(get("T_in")?).value,
        quality: values.get("x_in").copied(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_pair_requires_two_tokens() {
        assert_eq!(split_pair("pipe_1.txt classPipes"), Some(("pipe_1.txt", "classPipes")));
        assert_eq!(split_pair("  a \t b "), Some(("a", "b")));
        assert_eq!(split_pair("lonely"), None);
        assert_eq!(split_pair("a b c"), None);
    }

    #[test]
    fn parameter_counts_enforced() {
        assert!(element_kind("classPipes", "p.txt", &[1.0, 0.02]).is_err());
        assert!(element_kind("classTankS", "t.txt", &[0.5, 280.0, 0.1, 1.0]).is_err());
        assert!(element_kind("classValve", "v.txt", &[]).is_err());
        let hx = element_kind("classExchanger", "hx.txt", &[500.0]).unwrap();
        assert_eq!(hx, ElementKindDef::Exchanger { duty_w: 500.0 });
    }
}
