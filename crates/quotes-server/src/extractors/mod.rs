//! Request extractors

pub mod json;
pub mod path;

pub use json::AllowListedJson;
pub use path::IdPath;
