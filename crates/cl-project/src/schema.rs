//! Project schema definitions.

use serde::{Deserialize, Serialize};

/// Schema version written by this crate.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub fluid: FluidDef,
    pub inlet: InletDef,
    #[serde(default)]
    pub simulation: SimulationDef,
    /// Loop order: the outlet of each element feeds the next one, the last feeds the first.
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    #[serde(default)]
    pub schedules: Vec<ScheduleDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FluidDef {
    /// Refrigerant key, e.g. `R744` or `CO2`
    #[serde(default = "default_refrigerant")]
    pub refrigerant: String,
    #[serde(default)]
    pub backend: BackendDef,
}

impl Default for FluidDef {
    fn default() -> Self {
        Self {
            refrigerant: default_refrigerant(),
            backend: BackendDef::default(),
        }
    }
}

fn default_refrigerant() -> String {
    "R744".to_string()
}

/// Property backend selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendDef {
    #[default]
    CoolProp,
    /// Analytic saturation model, R744 only
    Surrogate,
}

/// Flow entering the first element on step 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InletDef {
    pub mass_flow_kg_s: f64,
    pub pressure_pa: f64,
    pub temperature_k: f64,
    /// Omitted: taken from the property backend at `(T, P)`, which yields the
    /// single-phase sentinel outside the dome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationDef {
    #[serde(default = "default_steps")]
    pub steps: usize,
    #[serde(default)]
    pub on_failure: OnFailureDef,
}

impl Default for SimulationDef {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            on_failure: OnFailureDef::default(),
        }
    }
}

fn default_steps() -> usize {
    50
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OnFailureDef {
    #[default]
    Halt,
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementDef {
    pub id: String,
    pub name: String,
    pub kind: ElementKindDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ElementKindDef {
    Pipe {
        length_m: f64,
        diameter_m: f64,
        roughness_m: f64,
    },
    Exchanger {
        duty_w: f64,
    },
    TankCentral {
        quality: f64,
        temperature_k: f64,
        volume_m3: f64,
        time_step_s: f64,
    },
    TankSubstation {
        quality: f64,
        temperature_k: f64,
        volume_m3: f64,
        time_step_s: f64,
        #[serde(default)]
        duty_w: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mass_flow_out_kg_s: Option<f64>,
    },
}

impl ElementKindDef {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pipe { .. } => "Pipe",
            Self::Exchanger { .. } => "Exchanger",
            Self::TankCentral { .. } => "TankCentral",
            Self::TankSubstation { .. } => "TankSubstation",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleDef {
    pub element_id: String,
    pub target: ScheduleTargetDef,
    /// One value per step; the last one holds afterwards
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleTargetDef {
    /// Exchanger or substation heat duty [W]
    Duty,
    /// Substation outflow [kg/s]
    Outflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_fills_defaults() {
        let yaml = r#"
version: 1
name: minimal
inlet:
  mass_flow_kg_s: 0.1
  pressure_pa: 5.0e6
  temperature_k: 280.0
elements:
  - id: p1
    name: Pipe 1
    kind:
      type: Pipe
      length_m: 5.0
      diameter_m: 0.02
      roughness_m: 1.0e-5
"#;
        let project: Project = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(project.fluid.refrigerant, "R744");
        assert_eq!(project.fluid.backend, BackendDef::CoolProp);
        assert_eq!(project.simulation.steps, 50);
        assert_eq!(project.simulation.on_failure, OnFailureDef::Halt);
        assert_eq!(project.inlet.quality, None);
        assert!(project.schedules.is_empty());
        assert_eq!(project.elements[0].kind.label(), "Pipe");
    }

    #[test]
    fn enums_use_lowercase_tags() {
        let yaml = r#"
element_id: ts
target: outflow
values: [0.5, 0.4]
"#;
        let schedule: ScheduleDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schedule.target, ScheduleTargetDef::Outflow);

        let sim: SimulationDef = serde_yaml::from_str("on_failure: skip").unwrap();
        assert_eq!(sim.on_failure, OnFailureDef::Skip);
        assert_eq!(sim.steps, 50);

        let fluid: FluidDef = serde_yaml::from_str("backend: surrogate").unwrap();
        assert_eq!(fluid.backend, BackendDef::Surrogate);
    }
}
