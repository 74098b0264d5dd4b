use crate::vecmath::Vec3;

/// Simulation parameters derived from the configuration, read by every integration step.
#[derive(Debug, Clone, PartialEq)]
pub struct SimParams {
    // Particle
    pub charge: f64, // Coulombs
    pub mass: f64, // kg
    pub inv_mass: f64, // 1 / mass, applied as a scale factor to the force

    // Time
    pub dt: f64, // seconds per step
    pub steps: usize, // Number of integration steps per run

    // Initial state
    pub initial_position: Vec3,
    pub initial_velocity: Vec3,

    // Output
    pub sample_interval: usize, // Print every Nth trajectory point
}

impl Default for SimParams {
    fn default() -> Self {
        crate::config::SimulationConfig::default().get_sim_params()
    }
}
