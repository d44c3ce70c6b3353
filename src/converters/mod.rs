pub mod content_export;
pub mod geometry;
pub mod markdown;
