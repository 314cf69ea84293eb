use crate::config::ConfigError;
use crate::prune::PruneError;
use crate::relocate::RelocateError;
use crate::walker::WalkError;

/// Errors that abort a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The configuration failed validation
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The tree could not be traversed
    #[error("Traversal error: {0}")]
    Walk(#[from] WalkError),

    /// Moving converted files failed
    #[error("Relocation error: {0}")]
    Relocate(#[from] RelocateError),

    /// Removing empty directories failed
    #[error("Prune error: {0}")]
    Prune(#[from] PruneError),
}
