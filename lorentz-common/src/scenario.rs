use std::fmt;
use std::str::FromStr;
use crate::vecmath::Vec3;

/// Constant electric and magnetic fields for one simulation run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FieldConfig {
    pub e: Vec3, // V/m
    pub b: Vec3, // T
}

/// The predefined field setups.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Scenario {
    UniformB,
    CombinedEB,
    CrossedEB,
}

impl Scenario {
    /// Every scenario, in the order the engine runs them by default.
    pub const ALL: [Scenario; 3] = [Scenario::UniformB, Scenario::CombinedEB, Scenario::CrossedEB];

    /// Name used on the command line, in config files and in the report.
    pub fn name(self) -> &'static str {
        match self {
            Scenario::UniformB => "uniformB",
            Scenario::CombinedEB => "combinedEB",
            Scenario::CrossedEB => "crossedEB",
        }
    }

    /// Fixed number shown in the `Simulation N:` header.
    pub fn number(self) -> u32 {
        match self {
            Scenario::UniformB => 1,
            Scenario::CombinedEB => 2,
            Scenario::CrossedEB => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Scenario::UniformB => "Uniform Magnetic Field",
            Scenario::CombinedEB => "Combined Electric and Magnetic Fields",
            Scenario::CrossedEB => "Crossed Electric and Magnetic Fields",
        }
    }

    /// Field vectors for this scenario. B is 1 T along z in all three.
    pub fn fields(self) -> FieldConfig {
        let b = Vec3::new(0.0, 0.0, 1.0);
        let e = match self {
            Scenario::UniformB => Vec3::zero(),
            Scenario::CombinedEB => Vec3::new(1e5, 0.0, 0.0),
            Scenario::CrossedEB => Vec3::new(0.0, 1e5, 0.0),
        };
        FieldConfig { e, b }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scenario name outside the known set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScenario(pub String);

impl fmt::Display for UnknownScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scenario '{}'", self.0)
    }
}

impl std::error::Error for UnknownScenario {}

impl FromStr for Scenario {
    type Err = UnknownScenario;

    /// Exact, case-sensitive match on the scenario name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| UnknownScenario(s.to_string()))
    }
}
