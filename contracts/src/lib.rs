//! Contract interface descriptors: compiled artifacts loaded from disk plus
//! ABI-only descriptors for the contracts the scripts know about.

pub mod artifact;
pub mod interfaces;

pub use artifact::{Artifact, ArtifactError, ArtifactStore};
pub use interfaces::builtin_interfaces;
