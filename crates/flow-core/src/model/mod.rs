//! Modelos neutrales (Artifact, ExecutionContext).

pub mod artifact;
pub mod context;

pub use artifact::Artifact;
pub use context::ExecutionContext;
