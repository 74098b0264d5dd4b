use crate::integrator::{rk4_step, State};
use crate::physics::{cyclotron_frequency, RK4_ROTATION_STABILITY_LIMIT};
use lorentz_common::{FieldConfig, Scenario, SimParams, Vec3};
use log::{debug, info, trace, warn};
use std::time::Instant;

/// Manages the state and execution of one charged-particle run.
pub struct ParticleSimulation<'a> {
    /// Which field setup this run uses.
    scenario: Scenario,
    /// Constant E and B for the whole run.
    fields: FieldConfig,
    /// Runtime parameters shared by all runs.
    params: &'a SimParams,
    /// The particle's current position and velocity.
    state: State,
    /// The number of integration steps taken so far.
    current_time_step: usize,
    /// Positions after every step, starting with the initial position.
    trajectory: Vec<Vec3>,
}

impl<'a> ParticleSimulation<'a> {
    /// Creates a run at the initial state with the trajectory seeded by the initial position.
    pub fn new(scenario: Scenario, params: &'a SimParams) -> Self {
        let state = State::initial(params);
        // Length is known upfront: the initial point plus one per step.
        let mut trajectory = Vec::with_capacity(params.steps + 1);
        trajectory.push(state.r);

        Self {
            scenario,
            fields: scenario.fields(),
            params,
            state,
            current_time_step: 0,
            trajectory,
        }
    }

    /// Advances the particle by one time step (`dt`) and records the new position.
    pub fn step(&mut self) {
        self.state = rk4_step(self.state, &self.fields, self.params, self.params.dt);
        self.trajectory.push(self.state.r);
        self.current_time_step += 1;
        trace!(
            "{} step {}: r = {:?}, v = {:?}",
            self.scenario, self.current_time_step, self.state.r, self.state.v
        );
    }

    /// Runs the remaining steps up to `params.steps`.
    pub fn run(&mut self) {
        let omega_dt = cyclotron_frequency(self.fields.b, self.params) * self.params.dt;
        info!(
            "Running {} for {} steps (omega*dt = {:.3e} rad).",
            self.scenario, self.params.steps, omega_dt
        );
        if omega_dt > RK4_ROTATION_STABILITY_LIMIT {
            warn!(
                "{}: omega*dt = {:.3e} exceeds the RK4 stability limit {:.3}; the trajectory may diverge.",
                self.scenario, omega_dt, RK4_ROTATION_STABILITY_LIMIT
            );
        }

        let start_time = Instant::now();
        while self.current_time_step < self.params.steps {
            self.step();
        }

        info!(
            "{} finished {} steps in {:.3} ms.",
            self.scenario,
            self.current_time_step,
            start_time.elapsed().as_secs_f64() * 1000.0
        );
        debug!("{} final position: {:?}", self.scenario, self.state.r);

        if let Some(first_bad) = self.trajectory.iter().position(|r| !r.is_finite()) {
            warn!(
                "{}: position became non-finite at step {} of {}.",
                self.scenario, first_bad, self.params.steps
            );
        }
    }

    /// Trajectory points at indices 0, k, 2k, ... where k is the sample interval.
    pub fn sampled_positions(&self) -> impl Iterator<Item = (usize, Vec3)> + '_ {
        self.trajectory
            .iter()
            .copied()
            .enumerate()
            .step_by(self.params.sample_interval.max(1))
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn current_time_step(&self) -> usize {
        self.current_time_step
    }

    pub fn trajectory(&self) -> &[Vec3] {
        &self.trajectory
    }
}
