//! Procedural terrain generation library
//!
//! Noise heightfields, droplet erosion, river tracing and the tensor field,
//! plus the mesh data a renderer needs. Re-exports modules for use by
//! binaries and tools.

pub mod config;
pub mod erosion;
pub mod export;
pub mod heightmap;
pub mod mesh;
pub mod rivers;
pub mod seeds;
pub mod tensor_field;
pub mod terrain;
pub mod tilemap;
pub mod world;
