pub mod artifacts;
pub mod candidates;
pub mod engine;
pub mod graph;
pub mod profile;
pub mod scorer;
pub mod sequencer;
pub mod similarity;
pub mod skill_gap;

pub use artifacts::Artifacts;
pub use engine::{ArtifactStatus, RecommendationEngine, DEFAULT_SIMILAR_COUNT};
pub use graph::{DependencyGraph, TopoOrder};
pub use sequencer::{PathSequencer, MAX_PATH_LENGTH};
pub use similarity::SimilarityIndex;
