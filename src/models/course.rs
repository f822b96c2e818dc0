use serde::{Deserialize, Serialize};

use super::{Skill, SkillId};

pub type CourseId = u64;

/// Difficulty tier of a course
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Mixed,
    Advanced,
}

impl Difficulty {
    /// Bonus added to a candidate score, favouring approachable courses
    pub fn score_bonus(self) -> f64 {
        match self {
            Difficulty::Beginner => 5.0,
            Difficulty::Intermediate => 2.0,
            Difficulty::Mixed | Difficulty::Advanced => 0.0,
        }
    }

    /// Position in the static ordering used when prerequisites cannot be ranked
    pub fn fallback_order(self) -> u8 {
        match self {
            Difficulty::Beginner => 0,
            Difficulty::Intermediate => 1,
            Difficulty::Mixed => 2,
            Difficulty::Advanced => 3,
        }
    }
}

/// How a course delivers its material
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CourseFormat {
    VideoHeavy,
    TextHeavy,
    ProjectBased,
    #[default]
    Mixed,
}

/// A course in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    #[serde(default)]
    pub university: Option<String>,
    pub difficulty: Difficulty,
    pub rating: f64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub format: CourseFormat,
    /// Skills taught by this course
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl Course {
    pub fn skill_ids(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.skills.iter().map(|s| s.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_bonus() {
        assert_eq!(Difficulty::Beginner.score_bonus(), 5.0);
        assert_eq!(Difficulty::Intermediate.score_bonus(), 2.0);
        assert_eq!(Difficulty::Mixed.score_bonus(), 0.0);
        assert_eq!(Difficulty::Advanced.score_bonus(), 0.0);
    }

    #[test]
    fn test_fallback_order_is_increasing() {
        let tiers = [
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Mixed,
            Difficulty::Advanced,
        ];
        let orders: Vec<u8> = tiers.iter().map(|d| d.fallback_order()).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_format_serialization() {
        let json = serde_json::to_string(&CourseFormat::ProjectBased).unwrap();
        assert_eq!(json, "\"project-based\"");

        let parsed: CourseFormat = serde_json::from_str("\"video-heavy\"").unwrap();
        assert_eq!(parsed, CourseFormat::VideoHeavy);
    }

    #[test]
    fn test_course_defaults_from_minimal_json() {
        let course: Course = serde_json::from_str(
            r#"{"id": 4, "name": "Intro to SQL", "difficulty": "beginner", "rating": 4.5}"#,
        )
        .unwrap();
        assert_eq!(course.format, CourseFormat::Mixed);
        assert!(course.skills.is_empty());
        assert!(course.university.is_none());
    }
}
