//! # Discharge
//!
//! Manning's formula for steady, uniform open-channel flow:
//!
//! ```text
//! Q = (1/n) · R^(2/3) · A · S^(1/2)
//! ```
//!
//! with `n` the Manning roughness coefficient, `R` the hydraulic radius,
//! `A` the wetted area, and `S` the channel bottom slope.

use crate::errors::{ChannelError, ChannelResult};
use crate::sections::Section;

/// Compute the uniform-flow discharge of a section at its current depth.
///
/// Pure function: the section is only read. Fails with `InvalidRoughness`
/// when `n ≤ 0` and propagates `UndefinedFlowDepth` when the section's
/// depth was never set. The caller guarantees `bottom_slope ≥ 0`
/// ([`Flow`](crate::flow::Flow) validates it at construction).
///
/// # Example
///
/// ```rust
/// use channel_core::hydraulics::compute_discharge;
/// use channel_core::sections::{RectangularSection, Section};
///
/// let section = Section::Rectangular(
///     RectangularSection::new(4.0).unwrap().with_flow_depth(3.0).unwrap(),
/// );
/// let discharge = compute_discharge(&section, 0.001, 0.013).unwrap();
/// assert!((discharge - 32.962898).abs() < 1e-5);
/// ```
pub fn compute_discharge(
    section: &Section,
    bottom_slope: f64,
    manning_roughness_coefficient: f64,
) -> ChannelResult<f64> {
    if manning_roughness_coefficient <= 0.0 {
        return Err(ChannelError::InvalidRoughness {
            value: manning_roughness_coefficient,
        });
    }
    let hydraulic_radius = section.hydraulic_radius()?;
    let area = section.area()?;
    Ok(hydraulic_radius.powf(2.0 / 3.0) * area * bottom_slope.sqrt() / manning_roughness_coefficient)
}
