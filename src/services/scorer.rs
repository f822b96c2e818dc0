use std::collections::BTreeSet;

use crate::models::{normalize_skill_name, CandidateScore, Course, LearningStyle, SkillId};

/// Points per gap skill a course teaches
const GAP_SKILL_WEIGHT: f64 = 10.0;
/// Bonus when the course format suits the learner's style
const STYLE_MATCH_BONUS: f64 = 15.0;

/// Scores candidate courses against a user's known skills and gap
pub struct Scorer<'a> {
    known: &'a BTreeSet<SkillId>,
    gap: &'a BTreeSet<SkillId>,
    learning_style: Option<LearningStyle>,
}

impl<'a> Scorer<'a> {
    pub fn new(
        known: &'a BTreeSet<SkillId>,
        gap: &'a BTreeSet<SkillId>,
        learning_style: Option<LearningStyle>,
    ) -> Self {
        Self {
            known,
            gap,
            learning_style,
        }
    }

    /// Whether the user already knows everything the course teaches
    pub fn is_fully_known(&self, course: &Course) -> bool {
        course.skill_ids().all(|id| self.known.contains(&id))
    }

    /// Score for a single course:
    /// `10 * |skills ∩ gap| + difficulty bonus + rating + style bonus`
    pub fn score(&self, course: &Course) -> f64 {
        let gap_hits = course.skill_ids().filter(|id| self.gap.contains(id)).count();

        let style_bonus = match self.learning_style {
            Some(style) if style.matches(course.format) => STYLE_MATCH_BONUS,
            _ => 0.0,
        };

        GAP_SKILL_WEIGHT * gap_hits as f64
            + course.difficulty.score_bonus()
            + course.rating
            + style_bonus
    }

    /// Scores candidates in input order, dropping fully known courses
    pub fn score_all(&self, candidates: &[Course]) -> Vec<CandidateScore> {
        candidates
            .iter()
            .filter(|course| !self.is_fully_known(course))
            .map(|course| CandidateScore {
                course_id: course.id,
                score: self.score(course),
                difficulty: course.difficulty,
                format: course.format,
                topo_rank: f64::INFINITY,
                skill_names: course
                    .skills
                    .iter()
                    .map(|s| normalize_skill_name(&s.name))
                    .collect(),
            })
            .collect()
    }
}
