pub mod config;
pub mod scenario;
pub mod sim_params;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use config::{MAX_STEPS, SimulationConfig, ParticleConfig, TimingConfig, InitialConditions, OutputConfig, RunConfig};
pub use scenario::{FieldConfig, Scenario, UnknownScenario};
pub use sim_params::SimParams;
pub use vecmath::Vec3;
