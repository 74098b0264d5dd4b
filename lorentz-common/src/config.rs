use serde::{Deserialize, Serialize};
use anyhow::Result;
use crate::sim_params::SimParams;
use crate::scenario::Scenario;
use crate::vecmath::Vec3;
use std::path::Path;

/// Upper bound on `timing.steps`. Each step stores one 24-byte position, so
/// this caps a run's trajectory at about 240 MB.
pub const MAX_STEPS: usize = 10_000_000;

// Properties of the simulated particle (an electron-like charge and mass by default)
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    pub charge: f64,
    pub mass: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig { charge: 1.6e-19, mass: 9.11e-31 }
    }
}

// Configuration for timing
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub dt: f64,
    pub steps: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig { dt: 1e-9, steps: 1000 }
    }
}

// Initial conditions shared by every scenario
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InitialConditions {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Default for InitialConditions {
    fn default() -> Self {
        InitialConditions {
            position: Vec3::zero(),
            velocity: Vec3::new(1e5, 0.0, 0.0),
        }
    }
}

// Configuration for the printed report
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub sample_interval: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig { sample_interval: 50 }
    }
}

/// Which scenarios to run, in order. Names stay raw strings here: an unknown
/// name is reported by the engine, not rejected while parsing the file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub scenarios: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            scenarios: Scenario::ALL.iter().map(|s| s.name().to_string()).collect(),
        }
    }
}

// Main simulation configuration structure. Every section is optional; the
// defaults describe an electron entering a 1 T field at 1e5 m/s.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub particle: ParticleConfig,
    pub timing: TimingConfig,
    pub initial_conditions: InitialConditions,
    pub output: OutputConfig,
    pub run: RunConfig,
}

impl SimulationConfig {
    /// Loads the simulation configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        let config = Self::from_toml_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Invalid config '{}': {}", path_ref.display(), e))?;

        Ok(config)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that make the run meaningless. dt is only required to be
    /// finite: the integrator trusts the step size it is given.
    pub fn validate(&self) -> Result<()> {
        let mass = self.particle.mass;
        if !mass.is_finite() || mass == 0.0 {
            anyhow::bail!("particle.mass must be finite and nonzero, got {}.", mass);
        }
        if !self.particle.charge.is_finite() {
            anyhow::bail!("particle.charge must be finite.");
        }
        if !self.timing.dt.is_finite() {
            anyhow::bail!("timing.dt must be finite.");
        }
        if self.timing.steps > MAX_STEPS {
            anyhow::bail!("timing.steps must be at most {}, got {}.", MAX_STEPS, self.timing.steps);
        }
        if self.output.sample_interval == 0 {
            anyhow::bail!("output.sample_interval must be greater than 0.");
        }
        if !self.initial_conditions.position.is_finite() || !self.initial_conditions.velocity.is_finite() {
            anyhow::bail!("initial_conditions must be finite.");
        }
        Ok(())
    }

    /// Converts the configuration into simulation parameters used at runtime.
    pub fn get_sim_params(&self) -> SimParams {
        SimParams {
            charge: self.particle.charge,
            mass: self.particle.mass,
            inv_mass: 1.0 / self.particle.mass,
            dt: self.timing.dt,
            steps: self.timing.steps,
            initial_position: self.initial_conditions.position,
            initial_velocity: self.initial_conditions.velocity,
            sample_interval: self.output.sample_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_an_electron() {
        let params = SimulationConfig::default().get_sim_params();
        assert_eq!(params.charge, 1.6e-19);
        assert_eq!(params.mass, 9.11e-31);
        assert_eq!(params.inv_mass, 1.0 / 9.11e-31);
        assert_eq!(params.dt, 1e-9);
        assert_eq!(params.steps, 1000);
        assert_eq!(params.sample_interval, 50);
        assert_eq!(params.initial_position, Vec3::zero());
        assert_eq!(params.initial_velocity, Vec3::new(1e5, 0.0, 0.0));
        assert_eq!(SimParams::default(), params);
    }

    #[test]
    fn default_run_lists_all_scenarios_in_order() {
        let config = SimulationConfig::default();
        assert_eq!(config.run.scenarios, vec!["uniformB", "combinedEB", "crossedEB"]);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        let config = SimulationConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [timing]
            steps = 200

            [initial_conditions]
            velocity = [0.0, 2.5e4, 0.0]

            [run]
            scenarios = ["crossedEB", "bogus"]
            "#,
        )
        .expect("partial config parses");

        assert_eq!(config.timing.steps, 200);
        assert_eq!(config.timing.dt, 1e-9);
        assert_eq!(config.initial_conditions.velocity, Vec3::new(0.0, 2.5e4, 0.0));
        assert_eq!(config.initial_conditions.position, Vec3::zero());
        assert_eq!(config.particle, ParticleConfig::default());
        assert_eq!(config.run.scenarios, vec!["crossedEB", "bogus"]);
    }

    #[test]
    fn rejects_zero_mass() {
        let err = SimulationConfig::from_toml_str("[particle]\nmass = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("mass"), "unexpected error: {err}");
    }

    #[test]
    fn rejects_oversized_steps() {
        let err = SimulationConfig::from_toml_str("[timing]\nsteps = 9223372036854775807\n").unwrap_err();
        assert!(err.to_string().contains("timing.steps"), "unexpected error: {err}");

        let just_over = format!("[timing]\nsteps = {}\n", MAX_STEPS + 1);
        assert!(SimulationConfig::from_toml_str(&just_over).is_err());

        let at_limit = format!("[timing]\nsteps = {}\n", MAX_STEPS);
        let config = SimulationConfig::from_toml_str(&at_limit).expect("limit itself is allowed");
        assert_eq!(config.timing.steps, MAX_STEPS);
    }

    #[test]
    fn rejects_zero_sample_interval() {
        let err = SimulationConfig::from_toml_str("[output]\nsample_interval = 0\n").unwrap_err();
        assert!(err.to_string().contains("sample_interval"), "unexpected error: {err}");
    }

    #[test]
    fn accepts_large_dt() {
        let config = SimulationConfig::from_toml_str("[timing]\ndt = 1.0\n").expect("large dt is allowed");
        assert_eq!(config.get_sim_params().dt, 1.0);
    }

    #[test]
    fn rejects_malformed_vectors() {
        assert!(SimulationConfig::from_toml_str("[initial_conditions]\nposition = [1.0, 2.0]\n").is_err());
    }

    #[test]
    fn sample_config_matches_defaults() {
        let sample = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml"));
        let config = SimulationConfig::from_toml_str(sample).expect("sample config parses");
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SimulationConfig::load("definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.toml"));
    }
}
