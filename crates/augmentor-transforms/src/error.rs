use augmentor_image::ImageError;

/// An error type for the transform engine.
///
/// All errors are reported synchronously at the point of invocation and
/// are recoverable at the caller's level, typically by skipping the
/// operation or redrawing its random parameters.
#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    /// The requested output area is empty.
    #[error("Requested output dimensions {0}x{1} are empty")]
    InvalidDimensions(usize, usize),

    /// The projective system built from the corner correspondences is
    /// singular or too ill-conditioned to solve reliably.
    #[error("Degenerate corner correspondences (reciprocal condition number {0:.3e})")]
    SingularTransform(f64),

    /// The rotation angle lies outside the supported open interval
    /// (-90, 90) degrees and is not an exact multiple of 90.
    #[error("Rotation angle {0} degrees is out of range")]
    InvalidRotationAngle(f32),

    /// A transform parameter is outside its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from the underlying image container or resampling primitive.
    #[error(transparent)]
    Image(#[from] ImageError),
}
