use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult, ArtifactError},
    models::{
        Course, CourseFormat, CourseId, Difficulty, LearningStyle, ProgressStatus, Skill, SkillId,
        UserId, UserSkillProfile,
    },
};

use super::{CourseRepository, UserRepository};

/// Catalog seed file layout
#[derive(Debug, Deserialize)]
struct CatalogSeed {
    skills: Vec<Skill>,
    courses: Vec<SeedCourse>,
}

#[derive(Debug, Deserialize)]
struct SeedCourse {
    id: CourseId,
    name: String,
    #[serde(default)]
    university: Option<String>,
    difficulty: Difficulty,
    rating: f64,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    format: CourseFormat,
    #[serde(default)]
    skill_ids: Vec<SkillId>,
}

/// Immutable course and skill catalog
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    courses: BTreeMap<CourseId, Course>,
    skills: BTreeMap<SkillId, Skill>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate skill names
    pub fn new(skills: Vec<Skill>, courses: Vec<Course>) -> Result<Self, ArtifactError> {
        let mut names = BTreeSet::new();
        for skill in &skills {
            if !names.insert(skill.name.as_str()) {
                return Err(ArtifactError::Invalid(format!(
                    "duplicate skill name '{}'",
                    skill.name
                )));
            }
        }

        Ok(Self {
            skills: skills.into_iter().map(|s| (s.id, s)).collect(),
            courses: courses.into_iter().map(|c| (c.id, c)).collect(),
        })
    }

    /// Loads a catalog seed file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ArtifactError::Missing(path.display().to_string()));
        }

        let raw = std::fs::read_to_string(path)?;
        let seed: CatalogSeed = serde_json::from_str(&raw)?;
        Self::from_seed(seed)
    }

    fn from_seed(seed: CatalogSeed) -> Result<Self, ArtifactError> {
        let skills_by_id: HashMap<SkillId, &Skill> =
            seed.skills.iter().map(|s| (s.id, s)).collect();

        let mut courses = Vec::with_capacity(seed.courses.len());
        for course in seed.courses {
            let mut skills = Vec::with_capacity(course.skill_ids.len());
            for skill_id in course.skill_ids {
                let skill = skills_by_id.get(&skill_id).ok_or_else(|| {
                    ArtifactError::Invalid(format!(
                        "course {} references unknown skill {}",
                        course.id, skill_id
                    ))
                })?;
                if !skills.iter().any(|s: &Skill| s.id == skill_id) {
                    skills.push((*skill).clone());
                }
            }

            courses.push(Course {
                id: course.id,
                name: course.name,
                university: course.university,
                difficulty: course.difficulty,
                rating: course.rating,
                url: course.url,
                description: course.description,
                format: course.format,
                skills,
            });
        }

        Self::new(seed.skills, courses)
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

/// In-process implementation of the course and user repositories
pub struct InMemoryStore {
    catalog: Catalog,
    users: RwLock<HashMap<UserId, UserSkillProfile>>,
}

impl InMemoryStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            users: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl CourseRepository for InMemoryStore {
    async fn list_courses(
        &self,
        search: &str,
        skip: usize,
        limit: usize,
    ) -> AppResult<Vec<Course>> {
        let needle = search.trim().to_lowercase();
        Ok(self
            .catalog
            .courses
            .values()
            .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_course(&self, course_id: CourseId) -> AppResult<Option<Course>> {
        Ok(self.catalog.courses.get(&course_id).cloned())
    }

    async fn fetch_courses_by_ids(&self, course_ids: &[CourseId]) -> AppResult<Vec<Course>> {
        let wanted: BTreeSet<CourseId> = course_ids.iter().copied().collect();
        Ok(wanted
            .iter()
            .filter_map(|id| self.catalog.courses.get(id))
            .cloned()
            .collect())
    }

    async fn fetch_courses_by_skills(
        &self,
        skill_ids: &BTreeSet<SkillId>,
    ) -> AppResult<Vec<Course>> {
        if skill_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .catalog
            .courses
            .values()
            .filter(|c| c.skill_ids().any(|id| skill_ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn list_skills(&self) -> AppResult<Vec<Skill>> {
        let mut skills: Vec<Skill> = self.catalog.skills.values().cloned().collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(skills)
    }

    async fn fetch_skills_by_ids(&self, skill_ids: &BTreeSet<SkillId>) -> AppResult<Vec<Skill>> {
        Ok(skill_ids
            .iter()
            .filter_map(|id| self.catalog.skills.get(id))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, email: String) -> AppResult<UserSkillProfile> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::InvalidInput("Email must not be empty".to_string()));
        }

        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(AppError::InvalidInput("Email already registered".to_string()));
        }

        let profile = UserSkillProfile::new(email);
        users.insert(profile.user_id, profile.clone());
        tracing::info!(user_id = %profile.user_id, "User registered");
        Ok(profile)
    }

    async fn get_user(&self, user_id: UserId) -> AppResult<Option<UserSkillProfile>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn update_skills(
        &self,
        user_id: UserId,
        known_skill_ids: BTreeSet<SkillId>,
        target_skill_ids: BTreeSet<SkillId>,
        learning_style: Option<LearningStyle>,
    ) -> AppResult<()> {
        let mut users = self.users.write().await;
        let profile = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        profile.known_skill_ids = known_skill_ids;
        profile.target_skill_ids = target_skill_ids;
        profile.learning_style = learning_style;
        Ok(())
    }

    async fn set_progress(
        &self,
        user_id: UserId,
        course_id: CourseId,
        status: ProgressStatus,
    ) -> AppResult<()> {
        let mut users = self.users.write().await;
        let profile = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        profile.progress.insert(course_id, status);
        Ok(())
    }
}
