//! # Circular Section
//!
//! Partially-full circular pipe. Geometry is driven by the central angle
//! subtended by the water-surface chord:
//!
//! ```text
//! θ = 2·arccos((r − d) / r)
//! ```
//!
//! so an empty pipe has θ = 0 and a full pipe θ = 2π. Unlike the open
//! shapes, a pipe bounds the flow depth: `d ≤ 2r`, and setting anything
//! beyond that fails with `UnavailableHeight`.

use std::fmt;

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use super::{hydraulic_radius_of, Centroid, GeometryCache};
use crate::errors::{ChannelError, ChannelResult};

/// Circular (pipe) cross-section.
///
/// ## JSON Example
///
/// ```json
/// { "radius": 1.5, "flow_depth": 2.5 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircularSection {
    /// Pipe radius
    radius: f64,

    /// Current flow depth; `None` until explicitly set
    flow_depth: Option<f64>,

    #[serde(skip)]
    cache: GeometryCache,

    /// Central angle memo; invalidated together with the geometry cache
    #[serde(skip)]
    central_angle: OnceCell<f64>,
}

impl CircularSection {
    /// Create a section with the flow depth left undefined.
    pub fn new(radius: f64) -> ChannelResult<Self> {
        validate_radius(radius)?;
        Ok(Self {
            radius,
            flow_depth: None,
            cache: GeometryCache::default(),
            central_angle: OnceCell::new(),
        })
    }

    /// Attach an initial flow depth, consuming the builder.
    pub fn with_flow_depth(mut self, flow_depth: f64) -> ChannelResult<Self> {
        self.set_flow_depth(flow_depth)?;
        Ok(self)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Change the radius. Fails if an already-set flow depth would no
    /// longer fit under the new ceiling.
    pub fn set_radius(&mut self, radius: f64) -> ChannelResult<()> {
        validate_radius(radius)?;
        if let Some(depth) = self.flow_depth {
            if depth > 2.0 * radius {
                return Err(ChannelError::unavailable_height(depth, 2.0 * radius));
            }
        }
        self.radius = radius;
        self.invalidate();
        Ok(())
    }

    /// Maximum depth the pipe can hold: its diameter.
    pub fn available_height(&self) -> f64 {
        2.0 * self.radius
    }

    /// Current flow depth, or `UndefinedFlowDepth` if never set.
    pub fn flow_depth(&self) -> ChannelResult<f64> {
        self.flow_depth.ok_or(ChannelError::UndefinedFlowDepth)
    }

    pub fn set_flow_depth(&mut self, flow_depth: f64) -> ChannelResult<()> {
        if flow_depth < 0.0 {
            return Err(ChannelError::invalid_property(
                "flow_depth",
                flow_depth,
                "\"flow_depth\" cannot be negative",
            ));
        }
        if flow_depth > self.available_height() {
            return Err(ChannelError::unavailable_height(
                flow_depth,
                self.available_height(),
            ));
        }
        self.flow_depth = Some(flow_depth);
        self.invalidate();
        Ok(())
    }

    fn invalidate(&mut self) {
        self.cache.invalidate();
        self.central_angle = OnceCell::new();
    }

    /// Central angle θ subtended by the water-surface chord; 0 for a
    /// zero-radius pipe.
    pub fn central_angle(&self) -> ChannelResult<f64> {
        self.central_angle
            .get_or_try_init(|| {
                let depth = self.flow_depth()?;
                if self.radius == 0.0 {
                    return Ok(0.0);
                }
                Ok(2.0 * ((self.radius - depth) / self.radius).acos())
            })
            .copied()
    }

    /// Wetted area `r²·(θ − sin θ)/2`.
    pub fn area(&self) -> ChannelResult<f64> {
        self.cache
            .area
            .get_or_try_init(|| {
                let theta = self.central_angle()?;
                Ok(0.5 * self.radius.powi(2) * (theta - theta.sin()))
            })
            .copied()
    }

    /// Wetted perimeter: the arc length `θ·r`.
    pub fn perimeter(&self) -> ChannelResult<f64> {
        self.cache
            .perimeter
            .get_or_try_init(|| Ok(self.central_angle()? * self.radius))
            .copied()
    }

    pub fn hydraulic_radius(&self) -> ChannelResult<f64> {
        self.cache
            .hydraulic_radius
            .get_or_try_init(|| Ok(hydraulic_radius_of(self.area()?, self.perimeter()?)))
            .copied()
    }

    /// Centroid of the circular segment. The horizontal coordinate is the
    /// pipe's axis of symmetry; the vertical one follows the segment
    /// centroid formula `d − r + (4/3)·r·sin³(θ/2)/(θ − sin θ)`, taken as
    /// 0 for a dry segment.
    pub fn centroid(&self) -> ChannelResult<Centroid> {
        self.cache
            .centroid
            .get_or_try_init(|| {
                let depth = self.flow_depth()?;
                let theta = self.central_angle()?;
                let segment = theta - theta.sin();
                let y = if segment == 0.0 {
                    0.0
                } else {
                    depth - self.radius
                        + 4.0 / 3.0 * self.radius * (theta / 2.0).sin().powi(3) / segment
                };
                Ok(Centroid { x: self.radius, y })
            })
            .copied()
    }
}

fn validate_radius(radius: f64) -> ChannelResult<()> {
    if radius < 0.0 {
        return Err(ChannelError::invalid_property(
            "radius",
            radius,
            "\"radius\" cannot be negative",
        ));
    }
    Ok(())
}

impl fmt::Display for CircularSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flow_depth {
            Some(depth) => write!(
                f,
                "CircularSection(radius: {}, flow_depth: {})",
                self.radius, depth
            ),
            None => write!(f, "CircularSection(radius: {})", self.radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn section(radius: f64, flow_depth: f64) -> CircularSection {
        CircularSection::new(radius)
            .unwrap()
            .with_flow_depth(flow_depth)
            .unwrap()
    }

    #[test]
    fn test_geometry_cases() {
        // ((radius, depth), (area, perimeter, hydraulic_radius, (cx, cy)))
        let cases = [
            ((0.0, 0.0), (0.0, 0.0, 0.0, (0.0, 0.0))),
            ((4.1, 2.9), (16.707437, 10.444872, 1.599582, (4.1, 1.204416))),
            ((9.4, 9.6), (142.555280, 29.931001, 4.762797, (9.4, 4.081629))),
            ((1.5, 2.5), (6.294213, 6.901572, 0.911997, (1.5, 1.148024))),
            ((1.0, 2.0), (3.141593, 6.283185, 0.5, (1.0, 1.0))),
        ];

        for ((r, d), (area, perimeter, hydraulic_radius, (cx, cy))) in cases {
            let section = section(r, d);
            assert_relative_eq!(section.area().unwrap(), area, epsilon = 1e-5);
            assert_relative_eq!(section.perimeter().unwrap(), perimeter, epsilon = 1e-5);
            assert_relative_eq!(
                section.hydraulic_radius().unwrap(),
                hydraulic_radius,
                epsilon = 1e-5
            );
            let centroid = section.centroid().unwrap();
            assert_relative_eq!(centroid.x, cx, epsilon = 1e-5);
            assert_relative_eq!(centroid.y, cy, epsilon = 1e-5);
            assert_eq!(section.flow_depth().unwrap(), d);
        }
    }

    #[test]
    fn test_full_pipe_centroid_is_the_center() {
        let section = section(1.0, 2.0);
        let centroid = section.centroid().unwrap();
        assert_relative_eq!(centroid.x, 1.0);
        assert_relative_eq!(centroid.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_depth_beyond_available_height_rejected() {
        for (r, d) in [(1.0, 3.0), (0.0, 0.0000001), (1.0, 2.0000001)] {
            let error = CircularSection::new(r)
                .unwrap()
                .with_flow_depth(d)
                .unwrap_err();
            match error {
                ChannelError::UnavailableHeight {
                    flow_depth,
                    available_height,
                } => {
                    assert_eq!(flow_depth, d);
                    assert_eq!(available_height, 2.0 * r);
                }
                other => panic!("expected UnavailableHeight, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_negative_values_rejected() {
        assert_eq!(
            CircularSection::new(-0.000001).unwrap_err().error_code(),
            "INVALID_PROPERTY"
        );
        assert_eq!(
            CircularSection::new(0.0)
                .unwrap()
                .with_flow_depth(-0.000001)
                .unwrap_err()
                .error_code(),
            "INVALID_PROPERTY"
        );
    }

    #[test]
    fn test_undefined_flow_depth() {
        for r in [0.0, 1.0, 10000000000000.0] {
            let section = CircularSection::new(r).unwrap();
            assert_eq!(section.area(), Err(ChannelError::UndefinedFlowDepth));
            assert_eq!(section.central_angle(), Err(ChannelError::UndefinedFlowDepth));
        }
    }

    #[test]
    fn test_shrinking_radius_below_depth_rejected() {
        let mut section = section(2.0, 3.0);
        let error = section.set_radius(1.0).unwrap_err();
        assert_eq!(error.error_code(), "UNAVAILABLE_HEIGHT");
        assert_eq!(section.radius(), 2.0);

        section.set_radius(1.5).unwrap();
        assert_eq!(section.available_height(), 3.0);
    }

    #[test]
    fn test_set_flow_depth_invalidates_central_angle() {
        let mut section = section(1.0, 1.0);
        assert_relative_eq!(section.central_angle().unwrap(), std::f64::consts::PI, epsilon = 1e-12);

        section.set_flow_depth(2.0).unwrap();
        assert_relative_eq!(
            section.central_angle().unwrap(),
            2.0 * std::f64::consts::PI,
            epsilon = 1e-12
        );
        assert_relative_eq!(section.hydraulic_radius().unwrap(), 0.5);
    }
}
