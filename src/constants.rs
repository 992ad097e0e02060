pub const DEFAULT_JPEG_QUALITY: u8 = 80;
pub const MIN_JPEG_QUALITY: u8 = 1;
pub const MAX_JPEG_QUALITY: u8 = 95;

/// Files at or under this size are skipped (CLI default, in KiB).
pub const DEFAULT_MIN_SIZE_KIB: u64 = 600;

pub const OXIPNG_PRESET: u8 = 4;
pub const LIBDEFLATER_LEVEL: u8 = 12;

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
