//! # channel_core - Open-Channel Hydraulics Calculation Engine
//!
//! `channel_core` models steady, uniform flow in open channels: it pairs
//! cross-section geometry (rectangular, trapezoidal, and circular shapes
//! with cached wetted properties) with Manning's equation, and inverts
//! that equation with a bisection solver to find the normal depth for a
//! target discharge. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Fail-fast validation**: every setter rejects bad values at the
//!   point of assignment with a structured error
//! - **JSON-First**: all public types implement Serialize/Deserialize
//! - **Rich Errors**: one error variant per validation condition, not
//!   just strings
//! - **Single-threaded**: sections memoize geometry internally; wrap a
//!   [`Flow`] in a mutex if a concurrent host needs to share one
//!
//! ## Quick Start
//!
//! ```rust
//! use channel_core::flow::Flow;
//! use channel_core::sections::{Section, TrapezoidalSection};
//!
//! // A trapezoidal channel, 2 m wide at the base, banks at 1:1,
//! // carrying 5 m³/s on a 0.3% slope with n = 0.03.
//! let section = Section::Trapezoidal(TrapezoidalSection::new(2.0, 1.0, 1.0).unwrap());
//! let flow = Flow::new(section, 0.003, 0.03, Some(5.0)).unwrap();
//!
//! let depth = flow.normal_depth().unwrap();
//! assert!(depth > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`sections`] - Cross-section shapes and wetted geometry
//! - [`hydraulics`] - Manning discharge and the normal-depth solver
//! - [`flow`] - Orchestrator keeping depth and discharge consistent
//! - [`errors`] - Structured error types

pub mod errors;
pub mod flow;
pub mod hydraulics;
pub mod sections;

// Re-export commonly used types at crate root for convenience
pub use errors::{ChannelError, ChannelResult};
pub use flow::Flow;
pub use hydraulics::{compute_discharge, compute_normal_depth, compute_normal_depth_with, SolverSettings};
pub use sections::{Centroid, CircularSection, RectangularSection, Section, TrapezoidalSection};
