/// An error type for the image module.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when a crop region does not lie within the source image.
    #[error("Crop region ({0}, {1}, {2}, {3}) is out of bounds")]
    InvalidCropRegion(usize, usize, usize, usize),

    /// Error when casting the pixel data to a different type.
    #[error("Failed to cast image data")]
    CastError,
}
