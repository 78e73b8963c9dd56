//! # Cross Sections
//!
//! Channel cross-section shapes and their wetted geometry. Each shape owns
//! its dimensions plus the current flow depth, and serves the derived
//! quantities Manning's equation needs: wetted area, wetted perimeter,
//! hydraulic radius, and the centroid of the wetted area.
//!
//! Derived quantities are computed lazily and memoized; every mutating
//! setter invalidates the memo before the next read. Reading any of them
//! before the flow depth has been set fails with
//! [`ChannelError::UndefinedFlowDepth`](crate::errors::ChannelError).
//!
//! ## Example
//!
//! ```rust
//! use channel_core::sections::{RectangularSection, Section};
//!
//! let section = Section::Rectangular(
//!     RectangularSection::new(4.0).unwrap().with_flow_depth(3.0).unwrap(),
//! );
//! assert_eq!(section.area().unwrap(), 12.0);
//! assert_eq!(section.hydraulic_radius().unwrap(), 1.2);
//! ```

pub mod circular;
pub mod rectangular;
pub mod trapezoidal;

pub use circular::CircularSection;
pub use rectangular::RectangularSection;
pub use trapezoidal::TrapezoidalSection;

use std::fmt;

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::errors::ChannelResult;

/// Centroid of the wetted cross-section area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    /// Horizontal offset from the section's leftmost wetted point
    pub x: f64,
    /// Depth of the centroid below the free surface
    pub y: f64,
}

/// Memoized derived geometry for one section instance.
///
/// Each field is computed at most once between mutations. Not serialized:
/// a deserialized section starts with a cold cache.
#[derive(Debug, Clone, Default)]
pub(crate) struct GeometryCache {
    pub(crate) area: OnceCell<f64>,
    pub(crate) perimeter: OnceCell<f64>,
    pub(crate) hydraulic_radius: OnceCell<f64>,
    pub(crate) centroid: OnceCell<Centroid>,
}

impl GeometryCache {
    /// Drop every memoized value. Every mutating setter calls this.
    pub(crate) fn invalidate(&mut self) {
        *self = GeometryCache::default();
    }
}

/// Quotient of area and wetted perimeter; 0 when the perimeter is 0.
///
/// Shared by all shapes so the zero-perimeter rule lives in one place.
pub(crate) fn hydraulic_radius_of(area: f64, perimeter: f64) -> f64 {
    if perimeter == 0.0 {
        0.0
    } else {
        area / perimeter
    }
}

/// A channel cross-section shape.
///
/// Closed set of variants; geometric operations dispatch to the concrete
/// shape. Construct the inner shape first, then wrap it:
///
/// ```rust
/// use channel_core::sections::{Section, TrapezoidalSection};
///
/// let section = Section::Trapezoidal(
///     TrapezoidalSection::new(4.0, 1.0, 2.0).unwrap().with_flow_depth(2.0).unwrap(),
/// );
/// assert_eq!(section.area().unwrap(), 14.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum Section {
    Rectangular(RectangularSection),
    Trapezoidal(TrapezoidalSection),
    Circular(CircularSection),
}

impl Section {
    /// Current flow depth, or `UndefinedFlowDepth` if never set.
    pub fn flow_depth(&self) -> ChannelResult<f64> {
        match self {
            Section::Rectangular(section) => section.flow_depth(),
            Section::Trapezoidal(section) => section.flow_depth(),
            Section::Circular(section) => section.flow_depth(),
        }
    }

    /// Set the flow depth, validating it against the shape.
    pub fn set_flow_depth(&mut self, flow_depth: f64) -> ChannelResult<()> {
        match self {
            Section::Rectangular(section) => section.set_flow_depth(flow_depth),
            Section::Trapezoidal(section) => section.set_flow_depth(flow_depth),
            Section::Circular(section) => section.set_flow_depth(flow_depth),
        }
    }

    /// Wetted cross-section area.
    pub fn area(&self) -> ChannelResult<f64> {
        match self {
            Section::Rectangular(section) => section.area(),
            Section::Trapezoidal(section) => section.area(),
            Section::Circular(section) => section.area(),
        }
    }

    /// Wetted perimeter.
    pub fn perimeter(&self) -> ChannelResult<f64> {
        match self {
            Section::Rectangular(section) => section.perimeter(),
            Section::Trapezoidal(section) => section.perimeter(),
            Section::Circular(section) => section.perimeter(),
        }
    }

    /// Hydraulic radius (area over wetted perimeter; 0 for a dry section).
    pub fn hydraulic_radius(&self) -> ChannelResult<f64> {
        match self {
            Section::Rectangular(section) => section.hydraulic_radius(),
            Section::Trapezoidal(section) => section.hydraulic_radius(),
            Section::Circular(section) => section.hydraulic_radius(),
        }
    }

    /// Centroid of the wetted area.
    pub fn centroid(&self) -> ChannelResult<Centroid> {
        match self {
            Section::Rectangular(section) => section.centroid(),
            Section::Trapezoidal(section) => section.centroid(),
            Section::Circular(section) => section.centroid(),
        }
    }

    /// Maximum depth the shape can hold: `Some(2r)` for a circular pipe,
    /// `None` for shapes open at the top.
    pub fn max_flow_depth(&self) -> Option<f64> {
        match self {
            Section::Rectangular(_) | Section::Trapezoidal(_) => None,
            Section::Circular(section) => Some(section.available_height()),
        }
    }
}

impl From<RectangularSection> for Section {
    fn from(section: RectangularSection) -> Self {
        Section::Rectangular(section)
    }
}

impl From<TrapezoidalSection> for Section {
    fn from(section: TrapezoidalSection) -> Self {
        Section::Trapezoidal(section)
    }
}

impl From<CircularSection> for Section {
    fn from(section: CircularSection) -> Self {
        Section::Circular(section)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Rectangular(section) => section.fmt(f),
            Section::Trapezoidal(section) => section.fmt(f),
            Section::Circular(section) => section.fmt(f),
        }
    }
}
