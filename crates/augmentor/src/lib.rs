#![deny(missing_docs)]
//! Geometric image augmentation transforms in Rust.
//!
//! This meta crate re-exports the augmentor workspace members:
//!
//! - [`image`] - the image container types
//! - [`imgproc`] - the resampling primitives (warps, crop, resize, rotate)
//! - [`transforms`] - the geometric transform engine (skew, rotation with
//!   fill-crop, shear, elastic grid distortion, zoom)

#[doc(inline)]
pub use augmentor_image as image;

#[doc(inline)]
pub use augmentor_imgproc as imgproc;

#[doc(inline)]
pub use augmentor_transforms as transforms;
