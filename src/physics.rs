use lorentz_common::{FieldConfig, SimParams, Vec3};

/// Largest `ω·dt` for which classical RK4 stays bounded on pure rotation (2√2).
pub const RK4_ROTATION_STABILITY_LIMIT: f64 = 2.0 * std::f64::consts::SQRT_2;

/// Lorentz force F = q (E + v × B).
///
/// This is a force, not an acceleration: see [`acceleration`].
#[inline]
pub fn lorentz_force(velocity: Vec3, e_field: Vec3, b_field: Vec3, charge: f64) -> Vec3 {
    e_field.add(velocity.cross(b_field)).scale(charge)
}

/// Acceleration of the configured particle moving at `velocity` through `fields`.
#[inline]
pub fn acceleration(velocity: Vec3, fields: &FieldConfig, params: &SimParams) -> Vec3 {
    lorentz_force(velocity, fields.e, fields.b, params.charge).scale(params.inv_mass)
}

/// Cyclotron angular frequency |q|·|B| / m in rad/s.
pub fn cyclotron_frequency(b_field: Vec3, params: &SimParams) -> f64 {
    (params.charge * b_field.length() / params.mass).abs()
}
