#![deny(missing_docs)]
//! Parametrized geometric image transforms for dataset augmentation.
//!
//! This crate derives the geometry of augmentation transforms: perspective
//! skew coefficients from corner correspondences, the largest same-aspect
//! crop surviving a rotation, shear matrices with their blank-wedge crops,
//! and tear-free piecewise warp meshes with randomized vertex displacement.
//! The pixel resampling itself is delegated to `augmentor_imgproc`.
//!
//! All transforms are pure with respect to their input image and draw
//! randomness only from the RNG handle passed per call, so they are safe to
//! run concurrently across images as long as each invocation gets its own
//! (or a thread-confined) RNG.
//!
//! # Example
//!
//! ```
//! use augmentor_image::{Image, ImageSize};
//! use augmentor_transforms::distort::DistortParams;
//! use augmentor_transforms::Transform;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let src = Image::<f32, 1>::from_size_val(
//!     ImageSize { width: 100, height: 100 },
//!     0.5,
//! ).unwrap();
//! let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
//!
//! let transform = Transform::Distort(DistortParams {
//!     grid_width: 4,
//!     grid_height: 4,
//!     magnitude: 3,
//! });
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! transform.apply(&src, &mut dst, &mut rng).unwrap();
//! ```

/// localized elastic grid distortion.
pub mod distort;

/// Error types for the transform engine.
pub mod error;

/// Points, quadrilaterals and rectangles in image space.
pub mod geometry;

/// Projective coefficient solver.
pub mod projective;

/// rotation with fill-crop.
pub mod rotate;

/// affine shear with blank-wedge removal.
pub mod shear;

/// perspective skew.
pub mod skew;

/// The transform sum type and its dispatch.
pub mod transform;

/// zoom with centre crop-back.
pub mod zoom;

pub use crate::error::TransformError;
pub use crate::transform::Transform;
