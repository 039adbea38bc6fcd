//! Pressure-coefficient comparison plots for a CFD meshing study.
//!
//! Reads the Fluent `.xy` Cp exports of three mesh variants plus the airfoil
//! outline, normalises the chordwise coordinate to x/c and writes one PNG per
//! study case.

pub mod color;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod render;
pub mod sample;
