mod manifest;
mod patterns;

pub use manifest::ManifestIndex;
pub use patterns::{PatternLibrary, ReferenceCategory, ReferenceMatchers};
