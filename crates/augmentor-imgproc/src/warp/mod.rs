//! Geometric image transformations using affine, perspective and mesh warps.
//!
//! This module provides functions for applying 2D transformations to images:
//!
//! - Affine transformations (rotation, translation, scaling, shearing)
//! - Perspective transformations (homographies)
//! - Piecewise mesh warps over a grid of cells
//! - Rotation matrix generation and affine transform inversion
//!
//! All coefficient vectors map destination pixel coordinates to source
//! pixel coordinates, so the warp functions sample the source directly
//! without inverting the given transform.

mod affine;
mod mesh;
mod perspective;

pub use affine::{get_rotation_matrix2d, invert_affine_transform, warp_affine};
pub use mesh::{warp_mesh, MeshCell};
pub use perspective::warp_perspective;
