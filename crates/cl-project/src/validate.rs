//! Project validation logic.

use crate::schema::{
    ElementDef, ElementKindDef, Project, SCHEMA_VERSION, ScheduleDef, ScheduleTargetDef,
};
use std::collections::HashMap;

/// Quality sentinel for "single-phase, regime not stated".
const QUALITY_SENTINEL: f64 = -1.0;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid topology: {reason}")]
    Topology { reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > SCHEMA_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_inlet(project)?;

    if project.elements.is_empty() {
        return Err(ValidationError::Topology {
            reason: "project has no elements".to_string(),
        });
    }

    let mut kinds = HashMap::new();
    for element in &project.elements {
        if kinds.insert(element.id.as_str(), &element.kind).is_some() {
            return Err(ValidationError::DuplicateId {
                id: element.id.clone(),
                context: "elements".to_string(),
            });
        }
        validate_element(element)?;
    }

    validate_topology(&project.elements)?;

    for schedule in &project.schedules {
        validate_schedule(schedule, &kinds)?;
    }

    Ok(())
}

fn validate_inlet(project: &Project) -> Result<(), ValidationError> {
    let inlet = &project.inlet;
    validate_non_negative_finite("mass_flow_kg_s", inlet.mass_flow_kg_s, "inlet")?;
    validate_positive_finite("pressure_pa", inlet.pressure_pa, "inlet")?;
    validate_positive_finite("temperature_k", inlet.temperature_k, "inlet")?;
    if let Some(q) = inlet.quality
        && q != QUALITY_SENTINEL
        && !(q.is_finite() && (0.0..=1.0).contains(&q))
    {
        return Err(ValidationError::InvalidValue {
            field: "inlet quality".to_string(),
            value: q.to_string(),
            reason: "must be in [0, 1] or -1".to_string(),
        });
    }
    Ok(())
}

fn validate_element(element: &ElementDef) -> Result<(), ValidationError> {
    let name = &element.name;
    match &element.kind {
        ElementKindDef::Pipe {
            length_m,
            diameter_m,
            roughness_m,
        } => {
            validate_positive_finite("length_m", *length_m, name)?;
            validate_positive_finite("diameter_m", *diameter_m, name)?;
            validate_non_negative_finite("roughness_m", *roughness_m, name)?;
        }
        ElementKindDef::Exchanger { duty_w } => {
            validate_finite("duty_w", *duty_w, name)?;
        }
        ElementKindDef::TankCentral {
            quality,
            temperature_k,
            volume_m3,
            time_step_s,
        } => {
            validate_tank(*quality, *temperature_k, *volume_m3, *time_step_s, name)?;
        }
        ElementKindDef::TankSubstation {
            quality,
            temperature_k,
            volume_m3,
            time_step_s,
            duty_w,
            mass_flow_out_kg_s,
        } => {
            validate_tank(*quality, *temperature_k, *volume_m3, *time_step_s, name)?;
            validate_finite("duty_w", *duty_w, name)?;
            if let Some(out) = mass_flow_out_kg_s {
                validate_non_negative_finite("mass_flow_out_kg_s", *out, name)?;
            }
        }
    }
    Ok(())
}

fn validate_tank(
    quality: f64,
    temperature_k: f64,
    volume_m3: f64,
    time_step_s: f64,
    name: &str,
) -> Result<(), ValidationError> {
    if !quality.is_finite() || !(0.0..=1.0).contains(&quality) {
        return Err(ValidationError::InvalidValue {
            field: format!("element '{}' quality", name),
            value: quality.to_string(),
            reason: "must be in [0, 1]".to_string(),
        });
    }
    validate_positive_finite("temperature_k", temperature_k, name)?;
    validate_positive_finite("volume_m3", volume_m3, name)?;
    validate_positive_finite("time_step_s", time_step_s, name)
}

/// A central tank needs exactly one pipe and one substation to compute its outflow.
fn validate_topology(elements: &[ElementDef]) -> Result<(), ValidationError> {
    let count = |pred: fn(&ElementKindDef) -> bool| {
        elements.iter().filter(|e| pred(&e.kind)).count()
    };
    let centrals = count(|k| matches!(k, ElementKindDef::TankCentral { .. }));
    if centrals == 0 {
        return Ok(());
    }
    let pipes = count(|k| matches!(k, ElementKindDef::Pipe { .. }));
    let substations = count(|k| matches!(k, ElementKindDef::TankSubstation { .. }));
    for (label, n) in [("Pipe", pipes), ("TankSubstation", substations)] {
        if n != 1 {
            return Err(ValidationError::Topology {
                reason: format!(
                    "a TankCentral requires exactly one {} but the project has {}",
                    label, n
                ),
            });
        }
    }
    Ok(())
}

fn validate_schedule(
    schedule: &ScheduleDef,
    kinds: &HashMap<&str, &ElementKindDef>,
) -> Result<(), ValidationError> {
    let context = format!("schedule for '{}'", schedule.element_id);
    let kind = kinds
        .get(schedule.element_id.as_str())
        .ok_or_else(|| ValidationError::MissingReference {
            id: schedule.element_id.clone(),
            context: "schedule element_id".to_string(),
        })?;

    let accepted = match schedule.target {
        ScheduleTargetDef::Duty => matches!(
            kind,
            ElementKindDef::Exchanger { .. } | ElementKindDef::TankSubstation { .. }
        ),
        ScheduleTargetDef::Outflow => matches!(kind, ElementKindDef::TankSubstation { .. }),
    };
    if !accepted {
        return Err(ValidationError::InvalidValue {
            field: format!("{} target", context),
            value: format!("{:?}", schedule.target).to_lowercase(),
            reason: format!("not applicable to a {}", kind.label()),
        });
    }

    if schedule.values.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("{} values", context),
            value: "[]".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    for (i, v) in schedule.values.iter().enumerate() {
        let field = format!("values[{}]", i);
        match schedule.target {
            ScheduleTargetDef::Duty => validate_finite(&field, *v, &context)?,
            ScheduleTargetDef::Outflow => validate_non_negative_finite(&field, *v, &context)?,
        }
    }
    Ok(())
}

fn validate_finite(field: &str, value: f64, owner: &str) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: format!("'{}' {}", owner, field),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}

fn validate_positive_finite(field: &str, value: f64, owner: &str) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("'{}' {}", owner, field),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

fn validate_non_negative_finite(
    field: &str,
    value: f64,
    owner: &str,
) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("'{}' {}", owner, field),
            value: value.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn pipe(id: &str) -> ElementDef {
        ElementDef {
            id: id.to_string(),
            name: id.to_string(),
            kind: ElementKindDef::Pipe {
                length_m: 5.0,
                diameter_m: 0.02,
                roughness_m: 1e-5,
            },
        }
    }

    fn exchanger(id: &str) -> ElementDef {
        ElementDef {
            id: id.to_string(),
            name: id.to_string(),
            kind: ElementKindDef::Exchanger { duty_w: 0.0 },
        }
    }

    fn central(id: &str) -> ElementDef {
        ElementDef {
            id: id.to_string(),
            name: id.to_string(),
            kind: ElementKindDef::TankCentral {
                quality: 0.5,
                temperature_k: 282.0,
                volume_m3: 0.1,
                time_step_s: 0.1,
            },
        }
    }

    fn substation(id: &str) -> ElementDef {
        ElementDef {
            id: id.to_string(),
            name: id.to_string(),
            kind: ElementKindDef::TankSubstation {
                quality: 0.5,
                temperature_k: 280.0,
                volume_m3: 0.1,
                time_step_s: 0.1,
                duty_w: 0.0,
                mass_flow_out_kg_s: None,
            },
        }
    }

    fn project(elements: Vec<ElementDef>) -> Project {
        Project {
            version: SCHEMA_VERSION,
            name: "test".to_string(),
            fluid: FluidDef::default(),
            inlet: InletDef {
                mass_flow_kg_s: 0.1,
                pressure_pa: 5e6,
                temperature_k: 280.0,
                quality: None,
            },
            simulation: SimulationDef::default(),
            elements,
            schedules: vec![],
        }
    }

    #[test]
    fn full_loop_is_valid() {
        let p = project(vec![central("tc"), pipe("p1"), exchanger("hx"), substation("ts")]);
        validate_project(&p).unwrap();
    }

    #[test]
    fn duplicate_ids_rejected() {
        let p = project(vec![pipe("a"), exchanger("a")]);
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn empty_roster_rejected() {
        assert!(matches!(
            validate_project(&project(vec![])),
            Err(ValidationError::Topology { .. })
        ));
    }

    #[test]
    fn central_needs_single_pipe_and_substation() {
        let missing = project(vec![central("tc"), pipe("p1")]);
        let err = validate_project(&missing).unwrap_err();
        assert!(err.to_string().contains("TankSubstation"));

        let two_pipes = project(vec![central("tc"), pipe("p1"), pipe("p2"), substation("ts")]);
        let err = validate_project(&two_pipes).unwrap_err();
        assert!(err.to_string().contains("exactly one Pipe"));

        // Without a central tank, any number of pipes is fine.
        validate_project(&project(vec![pipe("p1"), pipe("p2")])).unwrap();
    }

    #[test]
    fn bad_geometry_and_quality_rejected() {
        let mut p = project(vec![pipe("p1")]);
        if let ElementKindDef::Pipe { diameter_m, .. } = &mut p.elements[0].kind {
            *diameter_m = 0.0;
        }
        assert!(validate_project(&p).is_err());

        let mut p = project(vec![substation("ts")]);
        if let ElementKindDef::TankSubstation { quality, .. } = &mut p.elements[0].kind {
            *quality = 1.2;
        }
        assert!(validate_project(&p).is_err());

        let mut p = project(vec![pipe("p1")]);
        p.inlet.quality = Some(-0.5);
        assert!(validate_project(&p).is_err());
        p.inlet.quality = Some(-1.0);
        validate_project(&p).unwrap();
    }

    #[test]
    fn schedules_checked_against_element_kind() {
        let mut p = project(vec![pipe("p1"), exchanger("hx"), substation("ts")]);
        p.schedules.push(ScheduleDef {
            element_id: "hx".to_string(),
            target: ScheduleTargetDef::Duty,
            values: vec![100.0, 200.0],
        });
        p.schedules.push(ScheduleDef {
            element_id: "ts".to_string(),
            target: ScheduleTargetDef::Outflow,
            values: vec![0.5],
        });
        validate_project(&p).unwrap();

        p.schedules.push(ScheduleDef {
            element_id: "hx".to_string(),
            target: ScheduleTargetDef::Outflow,
            values: vec![0.5],
        });
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::InvalidValue { .. })
        ));

        p.schedules.pop();
        p.schedules.push(ScheduleDef {
            element_id: "nope".to_string(),
            target: ScheduleTargetDef::Duty,
            values: vec![1.0],
        });
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn version_checked() {
        let mut p = project(vec![pipe("p1")]);
        p.version = SCHEMA_VERSION + 1;
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }
}
