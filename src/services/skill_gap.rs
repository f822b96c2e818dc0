use std::collections::BTreeSet;

use crate::{
    error::{AppError, AppResult},
    models::{Course, Skill, SkillGapAnalytics, SkillId, UserSkillProfile},
};

/// Derives a user's effective skills and what is left to learn
pub struct SkillGapAnalyzer;

impl SkillGapAnalyzer {
    /// Declared skills plus every skill taught by a completed course
    pub fn known_skills(profile: &UserSkillProfile, completed: &[Course]) -> BTreeSet<SkillId> {
        let mut known = profile.known_skill_ids.clone();
        known.extend(completed.iter().flat_map(|c| c.skill_ids()));
        known
    }

    /// `target - known`
    pub fn gap(target: &BTreeSet<SkillId>, known: &BTreeSet<SkillId>) -> BTreeSet<SkillId> {
        target.difference(known).copied().collect()
    }

    /// Fails with `EmptyTargetSkills` when the user never chose any targets
    pub fn require_targets(profile: &UserSkillProfile) -> AppResult<&BTreeSet<SkillId>> {
        if profile.target_skill_ids.is_empty() {
            return Err(AppError::EmptyTargetSkills);
        }
        Ok(&profile.target_skill_ids)
    }

    /// Summary of target coverage. `gap_skills` must be the resolved skills of
    /// `gap(target, known)`.
    pub fn analytics(
        target: &BTreeSet<SkillId>,
        known: &BTreeSet<SkillId>,
        gap_skills: &[Skill],
    ) -> SkillGapAnalytics {
        let total = target.len();
        let known_count = target.intersection(known).count();
        let gap_count = total - known_count;

        let percentage = |part: usize| {
            if total == 0 {
                0.0
            } else {
                (part as f64 / total as f64 * 10_000.0).round() / 100.0
            }
        };

        let mut gap_skill_names: Vec<String> =
            gap_skills.iter().map(|s| s.name.clone()).collect();
        gap_skill_names.sort();

        SkillGapAnalytics {
            total_target_skills: total,
            known_skills: known_count,
            gap_skills: gap_count,
            known_skills_percentage: percentage(known_count),
            gap_skills_percentage: percentage(gap_count),
            gap_skill_names,
        }
    }
}
