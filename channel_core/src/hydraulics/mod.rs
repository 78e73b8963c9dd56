//! # Hydraulics
//!
//! Manning's equation and its inverse: [`compute_discharge`] maps a
//! section at a known depth to the uniform-flow discharge, and
//! [`compute_normal_depth`] searches for the depth that produces a target
//! discharge. Together they form the round-trip contract
//! `compute_normal_depth(Q(d)) ≈ d`.

pub mod discharge;
pub mod normal_depth;

pub use discharge::compute_discharge;
pub use normal_depth::{compute_normal_depth, compute_normal_depth_with, SolverSettings};
