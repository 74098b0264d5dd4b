//! Fixed-step classical RK4 for a charged particle in constant fields
//!
//! The system integrated is
//!   dv/dt = F(v) / m
//!   dr/dt = v
//! Because dr/dt is the velocity itself, each stage's position derivative is
//! the stage velocity sample, and only the velocity stages need a force evaluation.

use lorentz_common::{FieldConfig, SimParams, Vec3};
use crate::physics::acceleration;

/// Position and velocity of the particle at one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct State {
    pub r: Vec3, // position (m)
    pub v: Vec3, // velocity (m/s)
}

impl State {
    pub fn new(r: Vec3, v: Vec3) -> Self {
        State { r, v }
    }

    /// Initial state taken from the run parameters.
    pub fn initial(params: &SimParams) -> Self {
        State::new(params.initial_position, params.initial_velocity)
    }
}

/// Advance `state` by one step of size `dt` with four force evaluations.
///
/// No stability check is made: a `dt` that is large relative to the cyclotron
/// period is integrated as given and may diverge to non-finite values.
pub fn rk4_step(state: State, fields: &FieldConfig, params: &SimParams, dt: f64) -> State {
    let State { r, v } = state;
    let half_dt = dt / 2.0;

    // k1 at v
    let k1_v = acceleration(v, fields, params);
    let k1_r = v;

    // k2 at v + k1_v dt/2
    let v2 = v.add(k1_v.scale(half_dt));
    let k2_v = acceleration(v2, fields, params);
    let k2_r = v2;

    // k3 at v + k2_v dt/2
    let v3 = v.add(k2_v.scale(half_dt));
    let k3_v = acceleration(v3, fields, params);
    let k3_r = v3;

    // k4 at v + k3_v dt
    let v4 = v.add(k3_v.scale(dt));
    let k4_v = acceleration(v4, fields, params);
    let k4_r = v4;

    // 1:2:2:1 weights, summed left to right
    let sixth_dt = dt / 6.0;
    let r_new = r.add(weighted_sum(k1_r, k2_r, k3_r, k4_r).scale(sixth_dt));
    let v_new = v.add(weighted_sum(k1_v, k2_v, k3_v, k4_v).scale(sixth_dt));

    State::new(r_new, v_new)
}

/// k1 + 2 k2 + 2 k3 + k4, accumulated in that order.
#[inline]
fn weighted_sum(k1: Vec3, k2: Vec3, k3: Vec3, k4: Vec3) -> Vec3 {
    k1.add(k2.scale(2.0)).add(k3.scale(2.0)).add(k4)
}
