use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Course, SkillId},
    repository::CourseRepository,
};

/// Finds courses that teach at least one missing skill
pub struct CandidateSelector {
    catalog: Arc<dyn CourseRepository>,
}

impl CandidateSelector {
    pub fn new(catalog: Arc<dyn CourseRepository>) -> Self {
        Self { catalog }
    }

    /// Candidates in ascending course id order, each course at most once.
    /// An empty gap selects nothing.
    pub async fn select(&self, gap: &BTreeSet<SkillId>) -> AppResult<Vec<Course>> {
        if gap.is_empty() {
            return Ok(Vec::new());
        }

        let mut courses = self.catalog.fetch_courses_by_skills(gap).await?;
        courses.retain(|c| c.skill_ids().any(|id| gap.contains(&id)));
        courses.sort_by_key(|c| c.id);
        courses.dedup_by_key(|c| c.id);

        tracing::debug!(
            gap_size = gap.len(),
            candidates = courses.len(),
            "Selected candidate courses"
        );

        Ok(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseFormat, Difficulty, Skill};
    use crate::repository::MockCourseRepository;

    fn course(id: u64, skill_ids: &[SkillId]) -> Course {
        Course {
            id,
            name: format!("Course {}", id),
            university: None,
            difficulty: Difficulty::Beginner,
            rating: 4.0,
            url: None,
            description: None,
            format: CourseFormat::Mixed,
            skills: skill_ids
                .iter()
                .map(|s| Skill {
                    id: *s,
                    name: format!("skill-{}", s),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_empty_gap_skips_repository() {
        let mut repo = MockCourseRepository::new();
        repo.expect_fetch_courses_by_skills().never();

        let selector = CandidateSelector::new(Arc::new(repo));
        let candidates = selector.select(&BTreeSet::new()).await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_candidates_deduplicated_and_ordered() {
        let mut repo = MockCourseRepository::new();
        repo.expect_fetch_courses_by_skills()
            .times(1)
            .returning(|_| Ok(vec![course(3, &[2]), course(1, &[1, 2]), course(3, &[2])]));

        let selector = CandidateSelector::new(Arc::new(repo));
        let gap: BTreeSet<SkillId> = [2].into_iter().collect();
        let ids: Vec<u64> = selector
            .select(&gap)
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_courses_outside_gap_are_dropped() {
        let mut repo = MockCourseRepository::new();
        repo.expect_fetch_courses_by_skills()
            .returning(|_| Ok(vec![course(1, &[5]), course(2, &[6])]));

        let selector = CandidateSelector::new(Arc::new(repo));
        let gap: BTreeSet<SkillId> = [6].into_iter().collect();
        let candidates = selector.select(&gap).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, 2);
    }
}
