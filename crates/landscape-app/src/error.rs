//! Stage-tagged generation errors.

use std::fmt;

use landscape_terrain::TerrainError;

/// A step of the generation pipeline, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Grid construction and terrain mesh creation.
    Grid,
    /// k-means region classification.
    Classify,
    /// Height synthesis and vertex upload.
    Heights,
    /// Biome and prop material registration.
    Materials,
    /// Per-face material assignment.
    Surface,
    /// Tree placement.
    Trees,
    /// Rock placement.
    Rocks,
    /// Water plane, camera, and sun.
    Dressing,
}

impl Stage {
    /// Every stage in execution order.
    pub const ALL: [Stage; 8] = [
        Stage::Grid,
        Stage::Classify,
        Stage::Heights,
        Stage::Materials,
        Stage::Surface,
        Stage::Trees,
        Stage::Rocks,
        Stage::Dressing,
    ];

    /// Lowercase stage name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Grid => "grid",
            Stage::Classify => "classify",
            Stage::Heights => "heights",
            Stage::Materials => "materials",
            Stage::Surface => "surface",
            Stage::Trees => "trees",
            Stage::Rocks => "rocks",
            Stage::Dressing => "dressing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failed run: which stage failed and why. Nothing is retried.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("{stage} stage failed: {source}")]
pub struct GenerationError {
    /// Where the run stopped.
    pub stage: Stage,
    /// Underlying cause.
    pub source: TerrainError,
}

impl GenerationError {
    /// Whether the failure comes from bad parameters rather than the backend.
    pub fn is_configuration(&self) -> bool {
        self.source.is_configuration()
    }
}

/// Tags a stage result with the [`Stage`] it belongs to.
pub trait InStage<T> {
    /// Converts the error side into a [`GenerationError`] for `stage`.
    fn in_stage(self, stage: Stage) -> Result<T, GenerationError>;
}

impl<T, E: Into<TerrainError>> InStage<T> for Result<T, E> {
    fn in_stage(self, stage: Stage) -> Result<T, GenerationError> {
        self.map_err(|err| GenerationError {
            stage,
            source: err.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landscape_terrain::{ConfigurationError, PropPass};

    #[test]
    fn test_stage_names_are_unique() {
        let mut names: Vec<_> = Stage::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Stage::ALL.len());
    }

    #[test]
    fn test_message_names_the_stage() {
        let err: Result<(), _> = Err(TerrainError::EmptySelection {
            pass: PropPass::Rocks,
        });
        let err = err.in_stage(Stage::Rocks).unwrap_err();
        assert_eq!(
            err.to_string(),
            "rocks stage failed: rock pass has no eligible vertices"
        );
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_in_stage_converts_sub_errors() {
        let err: Result<(), ConfigurationError> = Err(ConfigurationError::ZeroClusters);
        let err = err.in_stage(Stage::Classify).unwrap_err();
        assert_eq!(err.stage, Stage::Classify);
        assert!(err.is_configuration());
    }
}
