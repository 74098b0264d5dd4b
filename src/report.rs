//! Console report for a batch of runs.
//!
//! Everything is rendered into a `String` first so the caller writes the
//! whole report in one go, in the order the scenarios were requested.

use crate::simulation::ParticleSimulation;
use lorentz_common::{Scenario, SimParams, UnknownScenario, Vec3};
use log::{debug, warn};
use std::fmt::Write;

/// Diagnostic printed in place of a trajectory for an unknown scenario name.
pub const INVALID_SCENARIO: &str = "Invalid scenario";

const SMALLEST_SUBNORMAL: f64 = 4.9406564584124654e-324;

/// Formats `value` in scientific notation with two decimals: `1.23e+04`, `-5.00e-03`.
///
/// Rounds half-up on the shortest decimal representation of `value`, and
/// writes non-finite values as `NaN`, `Infinity` and `-Infinity`.
pub fn format_sci(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // Shortest round-trip digits, e.g. "1.2345e5", "0e0"
    let shortest = if value.abs() == SMALLEST_SUBNORMAL {
        // The one double whose conventional decimal form is not the shortest one
        "4.9e-324".to_string()
    } else {
        format!("{:e}", value.abs())
    };
    let (mantissa, exponent) = shortest.split_once('e').unwrap_or((shortest.as_str(), "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);

    let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).map(|b| b - b'0').collect();
    let mut kept = [0u8; 3];
    for (slot, digit) in kept.iter_mut().zip(digits.iter()) {
        *slot = *digit;
    }

    if digits.get(3).is_some_and(|&d| d >= 5) {
        let mut carry = true;
        for slot in kept.iter_mut().rev() {
            if !carry {
                break;
            }
            *slot += 1;
            carry = *slot == 10;
            if carry {
                *slot = 0;
            }
        }
        if carry {
            // 9.995 -> 1.00e+1
            kept = [1, 0, 0];
            exponent += 1;
        }
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let exponent_sign = if exponent < 0 { '-' } else { '+' };
    format!(
        "{}{}.{}{}e{}{:02}",
        sign,
        kept[0],
        kept[1],
        kept[2],
        exponent_sign,
        exponent.unsigned_abs()
    )
}

/// Formats a position as `(x, y, z)`.
pub fn format_position(position: Vec3) -> String {
    format!(
        "({}, {}, {})",
        format_sci(position.x),
        format_sci(position.y),
        format_sci(position.z)
    )
}

/// Renders the `Trajectory for <name>:` block of a finished run.
pub fn render_trajectory(sim: &ParticleSimulation<'_>) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Trajectory for {}:", sim.scenario());
    for (index, position) in sim.sampled_positions() {
        let _ = writeln!(out, "Step {}: {}", index, format_position(position));
    }
    out
}

/// Runs `scenario` to completion and renders its trajectory block.
pub fn run_scenario(scenario: Scenario, params: &SimParams) -> String {
    let mut sim = ParticleSimulation::new(scenario, params);
    sim.run();
    debug!(
        "{}: {} positions recorded over {} steps, final velocity {:?}",
        scenario,
        sim.trajectory().len(),
        sim.current_time_step(),
        sim.state().v
    );
    render_trajectory(&sim)
}

fn invalid_scenario(err: &UnknownScenario) -> String {
    warn!("Skipping run: {}.", err);
    format!("{}\n", INVALID_SCENARIO)
}

/// Runs one scenario by name and renders its trajectory block, or the
/// invalid-scenario diagnostic when the name is not recognized.
pub fn simulate(name: &str, params: &SimParams) -> String {
    match name.parse::<Scenario>() {
        Ok(scenario) => run_scenario(scenario, params),
        Err(e) => invalid_scenario(&e),
    }
}

/// Renders the full report for `names`, in order.
///
/// Known scenarios get a `Simulation N: <Title>` header; every entry after the
/// first is separated from the previous one by a blank line.
pub fn render_run<S: AsRef<str>>(names: &[S], params: &SimParams) -> String {
    let mut out = String::new();
    for (idx, name) in names.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        match name.as_ref().parse::<Scenario>() {
            Ok(scenario) => {
                let _ = writeln!(out, "Simulation {}: {}", scenario.number(), scenario.title());
                out.push_str(&run_scenario(scenario, params));
            }
            Err(e) => out.push_str(&invalid_scenario(&e)),
        }
    }
    out
}
