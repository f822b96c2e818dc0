use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use super::{CourseFormat, CourseId, SkillId};

pub type UserId = Uuid;

/// Preferred way of learning, collected by the skill survey
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LearningStyle {
    Visual,
    #[serde(rename = "read/write", alias = "read-write")]
    ReadWrite,
    Kinesthetic,
}

impl LearningStyle {
    /// Whether a course format suits this learning style
    pub fn matches(self, format: CourseFormat) -> bool {
        matches!(
            (self, format),
            (LearningStyle::Visual, CourseFormat::VideoHeavy)
                | (LearningStyle::ReadWrite, CourseFormat::TextHeavy)
                | (LearningStyle::Kinesthetic, CourseFormat::ProjectBased)
        )
    }
}

/// Progress of a user through one course
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// Skill state of a user as seen by the recommendation engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UserSkillProfile {
    pub user_id: UserId,
    pub email: String,
    /// Skills the user declared as known
    pub known_skill_ids: BTreeSet<SkillId>,
    /// Skills the user wants to learn
    pub target_skill_ids: BTreeSet<SkillId>,
    pub learning_style: Option<LearningStyle>,
    /// Per-course progress
    pub progress: BTreeMap<CourseId, ProgressStatus>,
}

impl UserSkillProfile {
    /// Creates a profile with no skills or progress
    pub fn new(email: String) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            email,
            ..Default::default()
        }
    }

    /// Courses the user has marked completed
    pub fn completed_course_ids(&self) -> Vec<CourseId> {
        self.progress
            .iter()
            .filter(|(_, status)| **status == ProgressStatus::Completed)
            .map(|(id, _)| *id)
            .collect()
    }
}

/// Answers of the skill survey
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SurveySubmission {
    pub known_skill_ids: Vec<SkillId>,
    pub target_skill_ids: Vec<SkillId>,
    pub learning_style: Option<LearningStyle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_matches() {
        assert!(LearningStyle::Visual.matches(CourseFormat::VideoHeavy));
        assert!(LearningStyle::ReadWrite.matches(CourseFormat::TextHeavy));
        assert!(LearningStyle::Kinesthetic.matches(CourseFormat::ProjectBased));
        assert!(!LearningStyle::Visual.matches(CourseFormat::TextHeavy));
        assert!(!LearningStyle::Kinesthetic.matches(CourseFormat::Mixed));
    }

    #[test]
    fn test_learning_style_serde() {
        let style: LearningStyle = serde_json::from_str("\"read/write\"").unwrap();
        assert_eq!(style, LearningStyle::ReadWrite);

        let json = serde_json::to_string(&LearningStyle::Kinesthetic).unwrap();
        assert_eq!(json, "\"kinesthetic\"");
    }

    #[test]
    fn test_completed_course_ids() {
        let mut profile = UserSkillProfile::new("learner@example.com".to_string());
        profile.progress.insert(3, ProgressStatus::Completed);
        profile.progress.insert(1, ProgressStatus::InProgress);
        profile.progress.insert(2, ProgressStatus::Completed);

        assert_eq!(profile.completed_course_ids(), vec![2, 3]);
    }

    #[test]
    fn test_progress_status_serialization() {
        let json = serde_json::to_string(&ProgressStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
