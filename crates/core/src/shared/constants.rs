pub const FACE_DETECTED_MESSAGE: &str = "Face detected successfully";
pub const NO_FACE_MESSAGE: &str = "No face detected in the image";

/// Upper bound on reported confidence, even for frames that are all skin.
pub const MAX_CONFIDENCE: f64 = 0.9;

/// Worker threads used when checking several frames at once.
pub const DEFAULT_WORKERS: usize = 4;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

pub const SETTINGS_DIR_NAME: &str = "presence-check";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
