use serde::{Deserialize, Serialize};

mod course;
mod skill;
mod user;

pub use course::{Course, CourseFormat, CourseId, Difficulty};
pub use skill::{normalize_skill_name, Skill, SkillId};
pub use user::{LearningStyle, ProgressStatus, SurveySubmission, UserId, UserSkillProfile};

/// Scoring record for one candidate course within a single request
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub course_id: CourseId,
    pub score: f64,
    pub difficulty: Difficulty,
    pub format: CourseFormat,
    /// Mean position of the course's skills in the prerequisite order.
    /// `f64::INFINITY` until ranked, or when a skill has no position.
    pub topo_rank: f64,
    /// Normalized names of the skills the course teaches
    pub skill_names: Vec<String>,
}

/// Summary of how far a user is from their target skills
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillGapAnalytics {
    pub total_target_skills: usize,
    pub known_skills: usize,
    pub gap_skills: usize,
    pub known_skills_percentage: f64,
    pub gap_skills_percentage: f64,
    pub gap_skill_names: Vec<String>,
}

// ============================================================================
// Node-link graph payload
// ============================================================================

/// Skill prerequisite graph as nodes and directed links.
///
/// This is both the on-disk format of the dependency graph artifact and the
/// payload served for visualization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NodeLinkGraph {
    pub nodes: Vec<GraphNode>,
    #[serde(default, alias = "edges")]
    pub links: Vec<GraphLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphNode {
    pub id: String,
}

/// Edge from a prerequisite skill to the skill that depends on it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}
