pub mod error;
pub mod formats;
pub mod fs;

pub use error::{StudioError, StudioResult};
pub use formats::detect_mime;
pub use fs::{EXPORT_FILE_NAME, write_export};
