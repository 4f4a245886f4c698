mod loader;
mod resize;

pub use loader::load_encoded_image;
pub use resize::{JPEG_QUALITY, MAX_EDGE, prepare_for_generation};
