//! Compilation of a validated project into a runnable network.

use crate::error::{AppError, AppResult};
use cl_components::{Exchanger, FlowState, Pipe};
use cl_core::ElementId;
use cl_core::units::{k, kgps, m, m3, pa, s, w};
use cl_fluids::{CoolPropModel, PropertyProvider, Refrigerant, SaturationSurrogate};
use cl_project::schema::{
    BackendDef, ElementDef, ElementKindDef, FluidDef, OnFailureDef, Project, ScheduleTargetDef,
};
use cl_sim::{
    Element, FailurePolicy, Network, Schedule, ScheduleTarget, SimOptions, TankCentral,
    TankSubstation,
};
use tracing::debug;

/// Everything `run_sim` needs, plus the project ids of the roster.
pub struct CompiledRun {
    pub fluid: Box<dyn PropertyProvider>,
    pub network: Network,
    /// Project element id per roster position
    pub element_ids: Vec<String>,
    pub inlet: FlowState,
    pub options: SimOptions,
    pub schedules: Vec<Schedule>,
}

impl CompiledRun {
    pub fn element_id(&self, id: ElementId) -> Option<&str> {
        self.element_ids.get(id.index()).map(String::as_str)
    }
}

pub fn build_fluid_model(def: &FluidDef) -> AppResult<Box<dyn PropertyProvider>> {
    let refrigerant: Refrigerant = def.refrigerant.parse()?;
    match def.backend {
        BackendDef::CoolProp => Ok(Box::new(CoolPropModel::new(refrigerant)?)),
        BackendDef::Surrogate => {
            if refrigerant != Refrigerant::R744 {
                return Err(AppError::Compile(format!(
                    "surrogate backend is calibrated for R744 only, not {}",
                    refrigerant
                )));
            }
            Ok(Box::new(SaturationSurrogate::r744()))
        }
    }
}

fn build_element(fluid: &dyn PropertyProvider, def: &ElementDef) -> AppResult<Element> {
    let name = def.name.clone();
    let element = match &def.kind {
        ElementKindDef::Pipe {
            length_m,
            diameter_m,
            roughness_m,
        } => Pipe::new(name, m(*length_m), m(*diameter_m), m(*roughness_m))?.into(),
        ElementKindDef::Exchanger { duty_w } => Exchanger::new(name, w(*duty_w))?.into(),
        ElementKindDef::TankCentral {
            quality,
            temperature_k,
            volume_m3,
            time_step_s,
        } => TankCentral::new(
            fluid,
            name,
            *quality,
            k(*temperature_k),
            m3(*volume_m3),
            s(*time_step_s),
        )?
        .into(),
        ElementKindDef::TankSubstation {
            quality,
            temperature_k,
            volume_m3,
            time_step_s,
            duty_w,
            mass_flow_out_kg_s,
        } => {
            let mut tank = TankSubstation::new(
                fluid,
                name,
                *quality,
                k(*temperature_k),
                m3(*volume_m3),
                s(*time_step_s),
                w(*duty_w),
            )?;
            if let Some(out) = mass_flow_out_kg_s {
                tank.set_mass_flow_out(kgps(*out))?;
            }
            tank.into()
        }
    };
    Ok(element)
}

/// Build the fluid backend, the element roster and the run options of `project`.
///
/// The project is expected to be validated; wiring problems the schema cannot
/// express still surface here as configuration errors.
pub fn compile_project(project: &Project) -> AppResult<CompiledRun> {
    let fluid = build_fluid_model(&project.fluid)?;

    let elements = project
        .elements
        .iter()
        .map(|def| build_element(fluid.as_ref(), def))
        .collect::<AppResult<Vec<_>>>()?;
    let network = Network::new(elements)?;
    let element_ids: Vec<String> = project.elements.iter().map(|e| e.id.clone()).collect();

    let schedules = project
        .schedules
        .iter()
        .map(|def| {
            let index = element_ids
                .iter()
                .position(|id| *id == def.element_id)
                .ok_or_else(|| {
                    AppError::Compile(format!(
                        "schedule refers to unknown element '{}'",
                        def.element_id
                    ))
                })?;
            let id = ElementId::from_index(index)
                .ok_or_else(|| AppError::Compile("element index overflow".to_string()))?;
            let target = match def.target {
                ScheduleTargetDef::Duty => ScheduleTarget::Duty,
                ScheduleTargetDef::Outflow => ScheduleTarget::Outflow,
            };
            Ok(Schedule::new(id, target, def.values.clone())?)
        })
        .collect::<AppResult<Vec<_>>>()?;

    let i = &project.inlet;
    let quality = match i.quality {
        Some(q) => q,
        None => fluid.quality(k(i.temperature_k), pa(i.pressure_pa))?,
    };
    let inlet = FlowState::from_si(i.mass_flow_kg_s, i.pressure_pa, i.temperature_k, quality);
    debug!(quality, backend = fluid.name(), "inlet resolved");

    let options = SimOptions {
        steps: project.simulation.steps,
        on_failure: match project.simulation.on_failure {
            OnFailureDef::Halt => FailurePolicy::Halt,
            OnFailureDef::Skip => FailurePolicy::SkipStep,
        },
    };

    Ok(CompiledRun {
        fluid,
        network,
        element_ids,
        inlet,
        options,
        schedules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cl_core::FailureKind;
    use cl_project::schema::*;

    fn surrogate_project(elements: Vec<ElementDef>) -> Project {
        Project {
            version: SCHEMA_VERSION,
            name: "t".to_string(),
            fluid: FluidDef {
                refrigerant: "CO2".to_string(),
                backend: BackendDef::Surrogate,
            },
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

    fn hx(id: &str) -> ElementDef {
        ElementDef {
            id: id.to_string(),
            name: format!("{} name", id),
            kind: ElementKindDef::Exchanger { duty_w: 10.0 },
        }
    }

    #[test]
    fn unspecified_quality_resolves_to_sentinel() {
        let run = compile_project(&surrogate_project(vec![hx("a")])).unwrap();
        // 5 MPa is above the 280 K saturation pressure: subcooled liquid.
        assert_eq!(run.inlet.quality, -1.0);
        assert_eq!(run.options.steps, 50);
        assert_eq!(run.element_ids, vec!["a".to_string()]);
        assert_eq!(run.network.len(), 1);
    }

    #[test]
    fn schedules_resolve_to_roster_ids() {
        let mut p = surrogate_project(vec![hx("a"), hx("b")]);
        p.schedules.push(ScheduleDef {
            element_id: "b".to_string(),
            target: ScheduleTargetDef::Duty,
            values: vec![1.0],
        });
        p.simulation.on_failure = OnFailureDef::Skip;
        let run = compile_project(&p).unwrap();
        assert_eq!(run.schedules.len(), 1);
        assert_eq!(run.element_id(run.schedules[0].element), Some("b"));
        assert_eq!(run.options.on_failure, FailurePolicy::SkipStep);
    }

    #[test]
    fn surrogate_rejects_other_refrigerants() {
        let mut p = surrogate_project(vec![hx("a")]);
        p.fluid.refrigerant = "R290".to_string();
        let err = compile_project(&p).err().unwrap();
        assert_eq!(err.kind(), FailureKind::Configuration);

        p.fluid.refrigerant = "unobtainium".to_string();
        assert!(compile_project(&p).is_err());
    }
}
