use std::collections::BTreeSet;

use crate::{
    error::{AppError, AppResult},
    models::{CourseId, ProgressStatus, SkillId, SurveySubmission, UserId},
    repository::{CourseRepository, UserRepository},
};

/// Replaces a user's known and target skills with the survey answers.
///
/// Every skill id is validated before anything is written, so a rejected
/// survey leaves the profile untouched.
pub async fn submit_survey(
    catalog: &dyn CourseRepository,
    users: &dyn UserRepository,
    user_id: UserId,
    survey: SurveySubmission,
) -> AppResult<()> {
    let known: BTreeSet<SkillId> = survey.known_skill_ids.into_iter().collect();
    let target: BTreeSet<SkillId> = survey.target_skill_ids.into_iter().collect();

    let requested: BTreeSet<SkillId> = known.union(&target).copied().collect();
    let found = catalog.fetch_skills_by_ids(&requested).await?;
    if found.len() != requested.len() {
        return Err(AppError::NotFound(
            "One or more skill IDs not found.".to_string(),
        ));
    }

    users
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    tracing::info!(
        user_id = %user_id,
        known = known.len(),
        target = target.len(),
        "Survey submitted"
    );

    users
        .update_skills(user_id, known, target, survey.learning_style)
        .await
}

/// Records the user's status on a course
pub async fn update_progress(
    catalog: &dyn CourseRepository,
    users: &dyn UserRepository,
    user_id: UserId,
    course_id: CourseId,
    status: ProgressStatus,
) -> AppResult<()> {
    if catalog.get_course(course_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Course {} not found", course_id)));
    }

    users.set_progress(user_id, course_id, status).await?;
    tracing::info!(user_id = %user_id, course_id, status = ?status, "Progress updated");
    Ok(())
}
