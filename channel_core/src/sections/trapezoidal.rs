//! # Trapezoidal Section
//!
//! Channel with a flat bottom and two independently sloped banks. Side
//! slopes are expressed as horizontal run per unit depth, so a slope of 2
//! means the bank retreats two units sideways for every unit of depth.
//!
//! The wetted area decomposes into a rectangle over the base plus one
//! triangle per bank; the centroid is the area-weighted combination of the
//! three sub-shapes, measured from the leftmost wetted point (the top-left
//! corner of the water surface).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{hydraulic_radius_of, Centroid, GeometryCache};
use crate::errors::{ChannelError, ChannelResult};

/// Trapezoidal channel cross-section.
///
/// ## JSON Example
///
/// ```json
/// { "base_width": 4.0, "side_slope_1": 1.0, "side_slope_2": 2.0, "flow_depth": 2.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrapezoidalSection {
    /// Channel bottom width
    base_width: f64,

    /// Left bank slope (horizontal run per unit depth)
    side_slope_1: f64,

    /// Right bank slope (horizontal run per unit depth)
    side_slope_2: f64,

    /// Current flow depth; `None` until explicitly set
    flow_depth: Option<f64>,

    #[serde(skip)]
    cache: GeometryCache,
}

impl TrapezoidalSection {
    /// Create a section with the flow depth left undefined.
    pub fn new(base_width: f64, side_slope_1: f64, side_slope_2: f64) -> ChannelResult<Self> {
        validate_base_width(base_width)?;
        validate_side_slope("side_slope_1", side_slope_1)?;
        validate_side_slope("side_slope_2", side_slope_2)?;
        Ok(Self {
            base_width,
            side_slope_1,
            side_slope_2,
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

    pub fn side_slope_1(&self) -> f64 {
        self.side_slope_1
    }

    pub fn set_side_slope_1(&mut self, side_slope: f64) -> ChannelResult<()> {
        validate_side_slope("side_slope_1", side_slope)?;
        self.side_slope_1 = side_slope;
        self.cache.invalidate();
        Ok(())
    }

    pub fn side_slope_2(&self) -> f64 {
        self.side_slope_2
    }

    pub fn set_side_slope_2(&mut self, side_slope: f64) -> ChannelResult<()> {
        validate_side_slope("side_slope_2", side_slope)?;
        self.side_slope_2 = side_slope;
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

    /// Wetted area `(b + d·(s1 + s2)/2)·d`.
    pub fn area(&self) -> ChannelResult<f64> {
        self.cache
            .area
            .get_or_try_init(|| {
                let depth = self.flow_depth()?;
                Ok((self.base_width + 0.5 * depth * (self.side_slope_1 + self.side_slope_2)) * depth)
            })
            .copied()
    }

    /// Wetted perimeter `b + d·(√(1+s1²) + √(1+s2²))`.
    pub fn perimeter(&self) -> ChannelResult<f64> {
        self.cache
            .perimeter
            .get_or_try_init(|| {
                let depth = self.flow_depth()?;
                let banks = (1.0 + self.side_slope_1.powi(2)).sqrt()
                    + (1.0 + self.side_slope_2.powi(2)).sqrt();
                Ok(self.base_width + depth * banks)
            })
            .copied()
    }

    pub fn hydraulic_radius(&self) -> ChannelResult<f64> {
        self.cache
            .hydraulic_radius
            .get_or_try_init(|| Ok(hydraulic_radius_of(self.area()?, self.perimeter()?)))
            .copied()
    }

    /// Area-weighted centroid of the left triangle, base rectangle, and
    /// right triangle; `(0, 0)` when the wetted area is zero.
    pub fn centroid(&self) -> ChannelResult<Centroid> {
        self.cache
            .centroid
            .get_or_try_init(|| {
                let depth = self.flow_depth()?;
                let area = self.area()?;
                if area == 0.0 {
                    return Ok(Centroid { x: 0.0, y: 0.0 });
                }

                let rectangle_area = self.base_width * depth;
                let left_triangle_area = 0.5 * self.side_slope_1 * depth.powi(2);
                let right_triangle_area = 0.5 * self.side_slope_2 * depth.powi(2);

                // Offsets from the top-left corner of the water surface.
                let left_triangle_x = 2.0 / 3.0 * self.side_slope_1 * depth;
                let rectangle_x = self.side_slope_1 * depth + 0.5 * self.base_width;
                let right_triangle_x =
                    self.side_slope_1 * depth + self.base_width + self.side_slope_2 * depth / 3.0;

                let x = (left_triangle_area * left_triangle_x
                    + rectangle_area * rectangle_x
                    + right_triangle_area * right_triangle_x)
                    / area;

                let surface_width =
                    self.base_width + depth * (self.side_slope_1 + self.side_slope_2);
                let y = depth * (2.0 * self.base_width + surface_width)
                    / (3.0 * (self.base_width + surface_width));

                Ok(Centroid { x, y })
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

fn validate_side_slope(property: &str, side_slope: f64) -> ChannelResult<()> {
    if side_slope < 0.0 {
        return Err(ChannelError::invalid_property(
            property,
            side_slope,
            "side slopes cannot be negative",
        ));
    }
    Ok(())
}

impl fmt::Display for TrapezoidalSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TrapezoidalSection(base_width: {}, side_slope_1: {}, side_slope_2: {}",
            self.base_width, self.side_slope_1, self.side_slope_2
        )?;
        if let Some(depth) = self.flow_depth {
            write!(f, ", flow_depth: {}", depth)?;
        }
        write!(f, ")")
    }
}
