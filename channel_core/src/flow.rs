//! # Flow
//!
//! Orchestrates one cross-section together with the hydraulic parameters
//! of Manning's equation, keeping depth and discharge mutually consistent:
//! exactly one of them drives at any time and the other is re-derived
//! after every mutation (last write wins).
//!
//! ## Example
//!
//! ```rust
//! use channel_core::flow::Flow;
//! use channel_core::sections::{RectangularSection, Section};
//!
//! let section = Section::Rectangular(
//!     RectangularSection::new(4.0).unwrap().with_flow_depth(3.0).unwrap(),
//! );
//! let mut flow = Flow::new(section, 0.001, 0.013, None).unwrap();
//!
//! // Depth drove construction; discharge was derived from it.
//! assert!((flow.discharge().unwrap() - 32.962898).abs() < 1e-5);
//!
//! // Now let discharge drive: the normal depth is solved and pushed
//! // back into the section.
//! flow.set_discharge(20.0).unwrap();
//! assert!(flow.normal_depth().unwrap() < 3.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ChannelError, ChannelResult};
use crate::hydraulics::{compute_discharge, compute_normal_depth};
use crate::sections::Section;

/// Steady uniform flow in a single channel cross-section.
///
/// Owns the section exclusively; replacing it re-resolves the
/// depth/discharge pair the same way construction does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flow {
    section: Section,
    bottom_slope: f64,
    manning_roughness_coefficient: f64,
    discharge: Option<f64>,
    normal_depth: Option<f64>,
}

impl Flow {
    /// Build a flow from a section, slope, roughness, and optionally a
    /// discharge.
    ///
    /// At least one of the section's flow depth and `discharge` must be
    /// present, otherwise the flow is unresolvable (`UndefinedFlow`).
    /// When both are given the discharge drives and the section's depth
    /// is overwritten with the solved normal depth.
    pub fn new(
        section: Section,
        bottom_slope: f64,
        manning_roughness_coefficient: f64,
        discharge: Option<f64>,
    ) -> ChannelResult<Self> {
        validate_bottom_slope(bottom_slope)?;
        validate_roughness(manning_roughness_coefficient)?;
        if let Some(value) = discharge {
            validate_discharge(value)?;
        }

        let mut flow = Self {
            section,
            bottom_slope,
            manning_roughness_coefficient,
            discharge,
            normal_depth: None,
        };
        flow.resolve_section()?;
        Ok(flow)
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    /// Replace the section and re-resolve depth/discharge per the
    /// construction rule.
    pub fn set_section(&mut self, section: Section) -> ChannelResult<()> {
        self.section = section;
        self.resolve_section()
    }

    pub fn bottom_slope(&self) -> f64 {
        self.bottom_slope
    }

    /// Change the channel slope; the discharge keeps driving and the
    /// normal depth is re-derived.
    pub fn set_bottom_slope(&mut self, bottom_slope: f64) -> ChannelResult<()> {
        validate_bottom_slope(bottom_slope)?;
        self.bottom_slope = bottom_slope;
        self.normal_depth = None;
        self.recompute_missing()
    }

    pub fn manning_roughness_coefficient(&self) -> f64 {
        self.manning_roughness_coefficient
    }

    /// Change the roughness; the discharge keeps driving and the normal
    /// depth is re-derived.
    pub fn set_manning_roughness_coefficient(&mut self, value: f64) -> ChannelResult<()> {
        validate_roughness(value)?;
        self.manning_roughness_coefficient = value;
        self.normal_depth = None;
        self.recompute_missing()
    }

    /// Discharge through the section. `Some` after any successful
    /// construction or mutation.
    pub fn discharge(&self) -> Option<f64> {
        self.discharge
    }

    /// Let the discharge drive: solve for the normal depth and push it
    /// into the section.
    pub fn set_discharge(&mut self, discharge: f64) -> ChannelResult<()> {
        validate_discharge(discharge)?;
        self.discharge = Some(discharge);
        self.normal_depth = None;
        self.recompute_missing()
    }

    /// Normal flow depth, synchronized with the section's flow depth.
    /// `Some` after any successful construction or mutation.
    pub fn normal_depth(&self) -> Option<f64> {
        self.normal_depth
    }

    /// Let the depth drive: push it into the section (which validates
    /// it) and re-derive the discharge.
    pub fn set_normal_depth(&mut self, normal_depth: f64) -> ChannelResult<()> {
        // Section validation runs first so a rejected depth leaves the
        // flow untouched.
        self.section.set_flow_depth(normal_depth)?;
        self.normal_depth = Some(normal_depth);
        self.discharge = None;
        self.recompute_missing()
    }

    /// Construction rule: seed the normal depth from the section if it
    /// has one; without it a missing discharge is unresolvable.
    fn resolve_section(&mut self) -> ChannelResult<()> {
        match self.section.flow_depth() {
            Ok(depth) => self.normal_depth = Some(depth),
            Err(ChannelError::UndefinedFlowDepth) => {
                if self.discharge.is_none() {
                    return Err(ChannelError::UndefinedFlow);
                }
                self.normal_depth = None;
            }
            Err(other) => return Err(other),
        }
        self.recompute_missing()
    }

    /// Derive whichever of discharge/normal depth is currently unset from
    /// the other.
    fn recompute_missing(&mut self) -> ChannelResult<()> {
        match self.discharge {
            None => {
                if self.normal_depth.is_none() {
                    return Err(ChannelError::UndefinedFlow);
                }
                self.discharge = Some(compute_discharge(
                    &self.section,
                    self.bottom_slope,
                    self.manning_roughness_coefficient,
                )?);
            }
            Some(discharge) => {
                let normal_depth = compute_normal_depth(
                    &mut self.section,
                    self.bottom_slope,
                    self.manning_roughness_coefficient,
                    discharge,
                )?;
                self.normal_depth = Some(normal_depth);
                // The solver leaves the section at its last candidate;
                // pin it to the solved depth.
                self.section.set_flow_depth(normal_depth)?;
            }
        }
        Ok(())
    }
}

fn validate_bottom_slope(bottom_slope: f64) -> ChannelResult<()> {
    if bottom_slope < 0.0 {
        return Err(ChannelError::InvalidChannelSlope {
            value: bottom_slope,
        });
    }
    Ok(())
}

fn validate_roughness(value: f64) -> ChannelResult<()> {
    if value <= 0.0 {
        return Err(ChannelError::InvalidRoughness { value });
    }
    Ok(())
}

fn validate_discharge(value: f64) -> ChannelResult<()> {
    if value < 0.0 {
        return Err(ChannelError::InvalidDischarge { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::{CircularSection, RectangularSection, TrapezoidalSection};
    use approx::assert_relative_eq;

    fn rectangular_at_depth() -> Section {
        Section::Rectangular(
            RectangularSection::new(4.0)
                .unwrap()
                .with_flow_depth(3.0)
                .unwrap(),
        )
    }

    fn trapezoidal_without_depth() -> Section {
        Section::Trapezoidal(TrapezoidalSection::new(1.0, 1.0, 1.0).unwrap())
    }

    #[test]
    fn test_depth_drives_construction() {
        let flow = Flow::new(rectangular_at_depth(), 0.001, 0.013, None).unwrap();

        assert_eq!(flow.normal_depth(), Some(3.0));
        assert_relative_eq!(flow.discharge().unwrap(), 32.962898, epsilon = 1e-5);
    }

    #[test]
    fn test_discharge_drives_construction() {
        let flow = Flow::new(trapezoidal_without_depth(), 0.003, 0.03, Some(2.368513)).unwrap();

        let depth = flow.normal_depth().unwrap();
        assert_relative_eq!(depth, 1.0, epsilon = 1e-4);
        assert_relative_eq!(flow.section().flow_depth().unwrap(), depth);
    }

    #[test]
    fn test_discharge_wins_over_section_depth() {
        // Both given: the solver overwrites the seeded depth.
        let section = Section::Trapezoidal(
            TrapezoidalSection::new(1.0, 1.0, 1.0)
                .unwrap()
                .with_flow_depth(5.0)
                .unwrap(),
        );
        let flow = Flow::new(section, 0.003, 0.03, Some(2.368513)).unwrap();
        assert_relative_eq!(flow.normal_depth().unwrap(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_unresolvable_flow_rejected() {
        let error = Flow::new(trapezoidal_without_depth(), 0.003, 0.03, None).unwrap_err();
        assert_eq!(error, ChannelError::UndefinedFlow);
    }

    #[test]
    fn test_construction_validation() {
        let error = Flow::new(rectangular_at_depth(), -0.001, 0.013, None).unwrap_err();
        assert_eq!(error, ChannelError::InvalidChannelSlope { value: -0.001 });

        let error = Flow::new(rectangular_at_depth(), 0.001, 0.0, None).unwrap_err();
        assert_eq!(error, ChannelError::InvalidRoughness { value: 0.0 });

        let error = Flow::new(rectangular_at_depth(), 0.001, 0.013, Some(-1.0)).unwrap_err();
        assert_eq!(error, ChannelError::InvalidDischarge { value: -1.0 });
    }

    #[test]
    fn test_set_discharge_rederives_depth() {
        let mut flow = Flow::new(rectangular_at_depth(), 0.001, 0.013, None).unwrap();
        flow.set_discharge(32.962898).unwrap();

        assert_relative_eq!(flow.normal_depth().unwrap(), 3.0, epsilon = 1e-4);
        assert_relative_eq!(
            flow.section().flow_depth().unwrap(),
            flow.normal_depth().unwrap()
        );
    }

    #[test]
    fn test_set_normal_depth_rederives_discharge() {
        let mut flow = Flow::new(rectangular_at_depth(), 0.001, 0.013, None).unwrap();
        flow.set_normal_depth(1.5).unwrap();

        assert_eq!(flow.section().flow_depth().unwrap(), 1.5);
        // Shallower flow carries less.
        assert!(flow.discharge().unwrap() < 32.962898);
    }

    #[test]
    fn test_set_bottom_slope_keeps_discharge_driving() {
        let mut flow = Flow::new(rectangular_at_depth(), 0.001, 0.013, None).unwrap();
        let discharge = flow.discharge().unwrap();

        flow.set_bottom_slope(0.004).unwrap();

        // Same discharge on a steeper channel needs less depth.
        assert_relative_eq!(flow.discharge().unwrap(), discharge);
        assert!(flow.normal_depth().unwrap() < 3.0);
    }

    #[test]
    fn test_set_roughness_keeps_discharge_driving() {
        let mut flow = Flow::new(rectangular_at_depth(), 0.001, 0.013, None).unwrap();
        let discharge = flow.discharge().unwrap();

        flow.set_manning_roughness_coefficient(0.026).unwrap();

        // Rougher channel needs more depth for the same discharge.
        assert_relative_eq!(flow.discharge().unwrap(), discharge);
        assert!(flow.normal_depth().unwrap() > 3.0);
    }

    #[test]
    fn test_setter_validation() {
        let mut flow = Flow::new(rectangular_at_depth(), 0.001, 0.013, None).unwrap();

        assert!(flow.set_bottom_slope(-0.1).is_err());
        assert!(flow.set_manning_roughness_coefficient(-0.013).is_err());
        assert!(flow.set_discharge(-5.0).is_err());
        assert!(flow.set_normal_depth(-1.0).is_err());

        // Rejected writes left the flow untouched.
        assert_eq!(flow.bottom_slope(), 0.001);
        assert_eq!(flow.manning_roughness_coefficient(), 0.013);
        assert_eq!(flow.normal_depth(), Some(3.0));
    }

    #[test]
    fn test_set_section_keeps_discharge_driving() {
        let mut flow = Flow::new(rectangular_at_depth(), 0.001, 0.013, None).unwrap();
        let discharge = flow.discharge().unwrap();

        // Same discharge over a wider channel runs shallower.
        let wider = Section::Rectangular(RectangularSection::new(8.0).unwrap());
        flow.set_section(wider).unwrap();

        assert_relative_eq!(flow.discharge().unwrap(), discharge);
        assert!(flow.normal_depth().unwrap() < 3.0);
        assert_relative_eq!(
            flow.section().flow_depth().unwrap(),
            flow.normal_depth().unwrap()
        );
    }

    #[test]
    fn test_set_section_to_overloaded_pipe_clamps_to_available_height() {
        let mut flow = Flow::new(rectangular_at_depth(), 0.003, 0.03, None).unwrap();

        // The rectangle's discharge keeps driving (construction rule);
        // a unit pipe cannot carry it as open-channel flow, so the solver
        // clamps to the pipe's available height.
        let pipe = Section::Circular(
            CircularSection::new(1.0)
                .unwrap()
                .with_flow_depth(1.0)
                .unwrap(),
        );
        flow.set_section(pipe).unwrap();

        assert_eq!(flow.normal_depth(), Some(2.0));
        assert_eq!(flow.section().flow_depth().unwrap(), 2.0);
    }

    #[test]
    fn test_round_trip_through_flow() {
        let flow = Flow::new(rectangular_at_depth(), 0.001, 0.013, None).unwrap();
        let discharge = flow.discharge().unwrap();

        let fresh = Section::Rectangular(RectangularSection::new(4.0).unwrap());
        let solved = Flow::new(fresh, 0.001, 0.013, Some(discharge)).unwrap();

        assert_relative_eq!(solved.normal_depth().unwrap(), 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let flow = Flow::new(rectangular_at_depth(), 0.001, 0.013, None).unwrap();
        let json = serde_json::to_string_pretty(&flow).unwrap();
        assert!(json.contains("bottom_slope"));
        assert!(json.contains("discharge"));

        let roundtrip: Flow = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.normal_depth(), flow.normal_depth());
        assert_eq!(roundtrip.discharge(), flow.discharge());
    }
}
