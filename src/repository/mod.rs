use std::collections::BTreeSet;

use crate::{
    error::AppResult,
    models::{
        Course, CourseId, LearningStyle, ProgressStatus, Skill, SkillId, UserId, UserSkillProfile,
    },
};

pub mod memory;

pub use memory::{Catalog, InMemoryStore};

/// Read access to courses and skills, consumed by the recommendation engine
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CourseRepository: Send + Sync {
    /// Page through courses, optionally filtered by a case-insensitive name substring
    async fn list_courses(&self, search: &str, skip: usize, limit: usize)
        -> AppResult<Vec<Course>>;

    async fn get_course(&self, course_id: CourseId) -> AppResult<Option<Course>>;

    /// Fetch courses by id. Unknown ids are skipped; result is in ascending id order.
    async fn fetch_courses_by_ids(&self, course_ids: &[CourseId]) -> AppResult<Vec<Course>>;

    /// Fetch every course teaching at least one of the given skills, ascending by id
    async fn fetch_courses_by_skills(
        &self,
        skill_ids: &BTreeSet<SkillId>,
    ) -> AppResult<Vec<Course>>;

    /// All skills, sorted by name
    async fn list_skills(&self) -> AppResult<Vec<Skill>>;

    /// Fetch skills by id. Unknown ids are skipped.
    async fn fetch_skills_by_ids(&self, skill_ids: &BTreeSet<SkillId>) -> AppResult<Vec<Skill>>;
}

/// Access to user skill state
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Registers a user. Emails are unique.
    async fn create_user(&self, email: String) -> AppResult<UserSkillProfile>;

    async fn get_user(&self, user_id: UserId) -> AppResult<Option<UserSkillProfile>>;

    /// Replaces the user's declared skills and learning style
    async fn update_skills(
        &self,
        user_id: UserId,
        known_skill_ids: BTreeSet<SkillId>,
        target_skill_ids: BTreeSet<SkillId>,
        learning_style: Option<LearningStyle>,
    ) -> AppResult<()>;

    async fn set_progress(
        &self,
        user_id: UserId,
        course_id: CourseId,
        status: ProgressStatus,
    ) -> AppResult<()>;
}
