use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{CourseId, NodeLinkGraph, SkillGapAnalytics, UserSkillProfile},
    repository::CourseRepository,
};

use super::{
    artifacts::Artifacts,
    candidates::CandidateSelector,
    graph::DependencyGraph,
    scorer::Scorer,
    sequencer::PathSequencer,
    similarity::SimilarityIndex,
    skill_gap::SkillGapAnalyzer,
};

/// Number of similar courses returned by default
pub const DEFAULT_SIMILAR_COUNT: usize = 10;

/// Which artifacts the engine is running with
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArtifactStatus {
    pub similarity_loaded: bool,
    pub dependency_graph_loaded: bool,
    pub loaded_at: DateTime<Utc>,
}

/// Recommendation engine
///
/// Built once at startup from the loaded artifacts and shared between requests.
/// Holds no per-user state: every call recomputes the user's gap from the
/// profile it is given.
pub struct RecommendationEngine {
    similarity: Option<SimilarityIndex>,
    dependency_graph: Option<DependencyGraph>,
    loaded_at: DateTime<Utc>,
    catalog: Arc<dyn CourseRepository>,
}

impl RecommendationEngine {
    pub fn new(artifacts: Artifacts, catalog: Arc<dyn CourseRepository>) -> Self {
        Self {
            similarity: artifacts.similarity,
            dependency_graph: artifacts.dependency_graph,
            loaded_at: artifacts.loaded_at,
            catalog,
        }
    }

    pub fn status(&self) -> ArtifactStatus {
        ArtifactStatus {
            similarity_loaded: self.similarity.is_some(),
            dependency_graph_loaded: self.dependency_graph.is_some(),
            loaded_at: self.loaded_at,
        }
    }

    /// Up to `k` courses most similar to `course_id`. Empty when the course is
    /// unknown or no similarity matrix is loaded.
    pub fn item_similarity(&self, course_id: CourseId, k: usize) -> Vec<CourseId> {
        match &self.similarity {
            Some(index) => index.get_similar(course_id, k),
            None => Vec::new(),
        }
    }

    /// Ordered learning path for a user, at most 20 course ids.
    ///
    /// Fails only when the user has no target skills. An empty path is a valid
    /// answer: nothing left to learn, no course covers the gap, or no
    /// prerequisite graph is loaded.
    pub async fn personalized_path(&self, profile: &UserSkillProfile) -> AppResult<Vec<CourseId>> {
        let target = SkillGapAnalyzer::require_targets(profile)?;

        let Some(graph) = &self.dependency_graph else {
            tracing::debug!(user_id = %profile.user_id, "No dependency graph loaded");
            return Ok(Vec::new());
        };

        let completed = self
            .catalog
            .fetch_courses_by_ids(&profile.completed_course_ids())
            .await?;
        let known = SkillGapAnalyzer::known_skills(profile, &completed);
        let gap = SkillGapAnalyzer::gap(target, &known);
        if gap.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = CandidateSelector::new(self.catalog.clone())
            .select(&gap)
            .await?;
        let scored = Scorer::new(&known, &gap, profile.learning_style).score_all(&candidates);
        if scored.is_empty() {
            return Ok(Vec::new());
        }

        let path = PathSequencer::new(graph).sequence(scored);

        tracing::info!(
            user_id = %profile.user_id,
            gap_size = gap.len(),
            candidates = candidates.len(),
            path_length = path.candidates.len(),
            strategy = ?path.strategy,
            "Personalized path built"
        );

        Ok(path.candidates.into_iter().map(|c| c.course_id).collect())
    }

    /// How much of the user's target set is already covered
    pub async fn skill_gap(&self, profile: &UserSkillProfile) -> AppResult<SkillGapAnalytics> {
        let completed = self
            .catalog
            .fetch_courses_by_ids(&profile.completed_course_ids())
            .await?;
        let known = SkillGapAnalyzer::known_skills(profile, &completed);
        let gap = SkillGapAnalyzer::gap(&profile.target_skill_ids, &known);
        let gap_skills = self.catalog.fetch_skills_by_ids(&gap).await?;

        Ok(SkillGapAnalyzer::analytics(
            &profile.target_skill_ids,
            &known,
            &gap_skills,
        ))
    }

    /// Prerequisite graph as nodes and links, empty when none is loaded
    pub fn dependency_graph_export(&self) -> NodeLinkGraph {
        self.dependency_graph
            .as_ref()
            .map(DependencyGraph::to_node_link)
            .unwrap_or_default()
    }
}
