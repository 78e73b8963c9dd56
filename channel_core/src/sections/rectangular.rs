//! # Rectangular Section
//!
//! Vertical-walled channel of constant width. The simplest shape: a
//! trapezoid with both side slopes at zero, kept as its own variant so the
//! common case stays cheap and obvious.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{hydraulic_radius_of, Centroid, GeometryCache};
use crate::errors::{ChannelError, ChannelResult};

/// Rectangular channel cross-section.
///
/// ## JSON Example
///
/// ```json
/// { "base_width": 4.0, "flow_depth": 3.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectangularSection {
    /// Channel bottom width
    base_width: f64,

    /// Current flow depth; `None` until explicitly set
    flow_depth: Option<f64>,

    #[serde(skip)]
    cache: GeometryCache,
}

impl RectangularSection {
    /// Create a section with the flow depth left undefined.
    pub fn new(base_width: f64) -> ChannelResult<Self> {
        validate_base_width(base_width)?;
        Ok(Self {
            base_width,
            flow_depth: None,
            cache: GeometryCache::default(),
        })
    }

    /// Attach an initial flow depth, consuming the builder.
    pub fn with_flow_depth(mut self, flow_depth: f64) -> ChannelResult<Self> {
        self.set_flow_depth(flow_depth)?;
        Ok(self)
    }

    pub fn base_width(&self) -> f64 {
        self.base_width
    }

    pub fn set_base_width(&mut self, base_width: f64) -> ChannelResult<()> {
        validate_base_width(base_width)?;
        self.base_width = base_width;
        self.cache.invalidate();
        Ok(())
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
        self.flow_depth = Some(flow_depth);
        self.cache.invalidate();
        Ok(())
    }

    /// Wetted area `b·d`.
    pub fn area(&self) -> ChannelResult<f64> {
        self.cache
            .area
            .get_or_try_init(|| Ok(self.base_width * self.flow_depth()?))
            .copied()
    }

    /// Wetted perimeter `b + 2d`.
    pub fn perimeter(&self) -> ChannelResult<f64> {
        self.cache
            .perimeter
            .get_or_try_init(|| Ok(self.base_width + 2.0 * self.flow_depth()?))
            .copied()
    }

    pub fn hydraulic_radius(&self) -> ChannelResult<f64> {
        self.cache
            .hydraulic_radius
            .get_or_try_init(|| Ok(hydraulic_radius_of(self.area()?, self.perimeter()?)))
            .copied()
    }

    /// Centroid at `(b/2, d/2)`.
    pub fn centroid(&self) -> ChannelResult<Centroid> {
        self.cache
            .centroid
            .get_or_try_init(|| {
                let depth = self.flow_depth()?;
                Ok(Centroid {
                    x: self.base_width / 2.0,
                    y: depth / 2.0,
                })
            })
            .copied()
    }
}

fn validate_base_width(base_width: f64) -> ChannelResult<()> {
    if base_width < 0.0 {
        return Err(ChannelError::invalid_property(
            "base_width",
            base_width,
            "\"base_width\" cannot be negative",
        ));
    }
    Ok(())
}

impl fmt::Display for RectangularSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flow_depth {
            Some(depth) => write!(
                f,
                "RectangularSection(base_width: {}, flow_depth: {})",
                self.base_width, depth
            ),
            None => write!(f, "RectangularSection(base_width: {})", self.base_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(base_width: f64, flow_depth: f64) -> RectangularSection {
        RectangularSection::new(base_width)
            .unwrap()
            .with_flow_depth(flow_depth)
            .unwrap()
    }

    #[test]
    fn test_geometry_reference_case() {
        let section = section(4.0, 3.0);

        assert_eq!(section.area().unwrap(), 12.0);
        assert_eq!(section.perimeter().unwrap(), 10.0);
        assert_eq!(section.hydraulic_radius().unwrap(), 1.2);
        assert_eq!(section.centroid().unwrap(), Centroid { x: 2.0, y: 1.5 });
        assert_eq!(section.flow_depth().unwrap(), 3.0);
    }

    #[test]
    fn test_zero_depth_zero_area() {
        let section = section(4.0, 0.0);

        assert_eq!(section.area().unwrap(), 0.0);
        // Perimeter is the dry bed width; hydraulic radius still collapses to 0.
        assert_eq!(section.perimeter().unwrap(), 4.0);
        assert_eq!(section.hydraulic_radius().unwrap(), 0.0);
    }

    #[test]
    fn test_zero_width_zero_depth() {
        let section = section(0.0, 0.0);

        assert_eq!(section.area().unwrap(), 0.0);
        assert_eq!(section.perimeter().unwrap(), 0.0);
        assert_eq!(section.hydraulic_radius().unwrap(), 0.0);
    }

    #[test]
    fn test_negative_base_width_rejected() {
        let error = RectangularSection::new(-0.000001).unwrap_err();
        match error {
            ChannelError::InvalidProperty { property, value, .. } => {
                assert_eq!(property, "base_width");
                assert_eq!(value, -0.000001);
            }
            other => panic!("expected InvalidProperty, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_flow_depth_rejected() {
        let error = RectangularSection::new(4.0)
            .unwrap()
            .with_flow_depth(-1.0)
            .unwrap_err();
        assert_eq!(error.error_code(), "INVALID_PROPERTY");
    }

    #[test]
    fn test_setters_invalidate_cache() {
        let mut section = section(4.0, 3.0);
        assert_eq!(section.area().unwrap(), 12.0);

        section.set_flow_depth(2.0).unwrap();
        assert_eq!(section.area().unwrap(), 8.0);
        assert_eq!(section.perimeter().unwrap(), 8.0);

        section.set_base_width(6.0).unwrap();
        assert_eq!(section.area().unwrap(), 12.0);
        assert_eq!(section.centroid().unwrap(), Centroid { x: 3.0, y: 1.0 });
    }

    #[test]
    fn test_rejected_set_keeps_previous_state() {
        let mut section = section(4.0, 3.0);
        assert!(section.set_base_width(-2.0).is_err());
        assert_eq!(section.base_width(), 4.0);
        assert_eq!(section.area().unwrap(), 12.0);
    }
}
