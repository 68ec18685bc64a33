//! Uploaded image entities.

pub mod category;
pub mod model;

pub use category::ImageCategory;
pub use model::UploadedImage;
