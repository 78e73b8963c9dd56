//! # Normal-Depth Solver
//!
//! Inverts Manning's equation: finds the depth at which a section carries
//! a target discharge, by bisection over the flow depth.
//!
//! ## Algorithm Overview
//!
//! 1. Bracket the depth: `[0, available height]` for closed sections,
//!    `[0, 0]` for open ones; a collapsed bracket expands geometrically
//!    (x10) until it straddles the root.
//! 2. Evaluate the discharge at the candidate depth; tighten the bracket
//!    toward the side containing the target and step to its midpoint.
//! 3. Stop once the discharge error drops below the absolute precision or
//!    the precision relative to the target, whichever triggers first.
//!
//! A closed section can run out of height before converging: the flow has
//! gone under pressure and the uniform open-channel model no longer
//! applies. That is reported as a `log::warn!`, not an error, and the
//! available height is returned as the best open-channel depth.

use serde::{Deserialize, Serialize};

use crate::errors::{ChannelError, ChannelResult};
use crate::hydraulics::discharge::compute_discharge;
use crate::sections::Section;

/// Default absolute convergence threshold on the discharge error
pub const DEFAULT_PRECISION: f64 = 1e-6;

/// Default convergence threshold relative to the target discharge
pub const DEFAULT_RELATIVE_PRECISION: f64 = 1e-10;

/// Default iteration budget before the search gives up
pub const DEFAULT_MAX_ITERATIONS: usize = 200;

/// Convergence controls for the normal-depth search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Absolute threshold on `|computed − target|`
    pub precision: f64,

    /// Threshold on the error as a fraction of the target discharge
    pub relative_precision: f64,

    /// Hard cap on bisection passes; exceeding it fails with
    /// `DidNotConverge` instead of looping forever on inputs with no
    /// root (e.g. a flat channel asked for a positive discharge)
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            relative_precision: DEFAULT_RELATIVE_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverSettings {
    /// Reject negative thresholds.
    pub fn validate(&self) -> ChannelResult<()> {
        if self.precision < 0.0 {
            return Err(ChannelError::InvalidPrecision {
                value: self.precision,
            });
        }
        if self.relative_precision < 0.0 {
            return Err(ChannelError::InvalidPrecision {
                value: self.relative_precision,
            });
        }
        Ok(())
    }
}

/// Solve for the normal depth with default [`SolverSettings`].
///
/// See [`compute_normal_depth_with`].
pub fn compute_normal_depth(
    section: &mut Section,
    bottom_slope: f64,
    manning_roughness_coefficient: f64,
    discharge: f64,
) -> ChannelResult<f64> {
    compute_normal_depth_with(
        section,
        bottom_slope,
        manning_roughness_coefficient,
        discharge,
        SolverSettings::default(),
    )
}

/// Solve for the depth at which the section carries `discharge`.
///
/// The search mutates the section's flow depth at every candidate and
/// leaves it at the last attempted value, which is not necessarily the
/// returned root. Callers wanting the section consistent with the result
/// re-set the depth afterwards ([`Flow`](crate::flow::Flow) does).
///
/// # Example
///
/// ```rust
/// use channel_core::hydraulics::{compute_discharge, compute_normal_depth};
/// use channel_core::sections::{Section, TrapezoidalSection};
///
/// let mut section = Section::Trapezoidal(
///     TrapezoidalSection::new(1.0, 1.0, 1.0).unwrap().with_flow_depth(1.0).unwrap(),
/// );
/// let discharge = compute_discharge(&section, 0.003, 0.03).unwrap();
/// let depth = compute_normal_depth(&mut section, 0.003, 0.03, discharge).unwrap();
/// assert!((depth - 1.0).abs() < 1e-5);
/// ```
pub fn compute_normal_depth_with(
    section: &mut Section,
    bottom_slope: f64,
    manning_roughness_coefficient: f64,
    discharge: f64,
    settings: SolverSettings,
) -> ChannelResult<f64> {
    settings.validate()?;
    if discharge < 0.0 {
        return Err(ChannelError::InvalidDischarge { value: discharge });
    }

    let ceiling = section.max_flow_depth();

    let mut min_y: f64 = 0.0;
    let mut max_y: f64 = ceiling.unwrap_or(0.0);
    let mut y: f64 = 0.0;
    // Seeded above both thresholds so the loop always runs at least once.
    let mut error: f64 = 2.0 * settings.precision.max(settings.relative_precision * discharge);
    let mut iterations: usize = 0;

    while error > settings.precision && error > settings.relative_precision * discharge {
        section.set_flow_depth(y)?;
        let computed = compute_discharge(section, bottom_slope, manning_roughness_coefficient)?;

        if max_y - min_y == 0.0 {
            max_y = (max_y + 1.0) * 10.0;
        }

        if computed > discharge {
            max_y = y;
            y -= 0.5 * (max_y - min_y);
        } else if computed < discharge {
            min_y = y;
            y += 0.5 * (max_y - min_y);
        } else {
            return Ok(y);
        }
        error = (computed - discharge).abs();

        if let Some(available_height) = ceiling {
            if y >= available_height {
                log::warn!(
                    "this is not open channel flow: the flow is under pressure \
                     (target discharge {} exceeds the section's open-channel capacity)",
                    discharge
                );
                return Ok(available_height);
            }
        }

        iterations += 1;
        if iterations >= settings.max_iterations {
            return Err(ChannelError::DidNotConverge { iterations });
        }
    }

    Ok(y)
}
