use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{
        Course, CourseFormat, CourseId, Difficulty, NodeLinkGraph, ProgressStatus, Skill,
        SkillGapAnalytics, SurveySubmission, UserId, UserSkillProfile,
    },
    repository::CourseRepository,
    services::{profile, ArtifactStatus, DEFAULT_SIMILAR_COUNT},
};

use super::AppState;

const DEFAULT_PAGE_SIZE: usize = 20;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CourseQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_page_size")]
    pub limit: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Course without its skill list
#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: CourseId,
    pub name: String,
    pub university: Option<String>,
    pub difficulty: Difficulty,
    pub rating: f64,
    pub format: CourseFormat,
    pub url: Option<String>,
    pub description: Option<String>,
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            name: course.name.clone(),
            university: course.university.clone(),
            difficulty: course.difficulty,
            rating: course.rating,
            format: course.format,
            url: course.url.clone(),
            description: course.description.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub artifacts: ArtifactStatus,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub course_id: CourseId,
    pub status: ProgressStatus,
}

// Handlers

/// Health check with artifact availability
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        artifacts: state.engine.status(),
    })
}

/// List courses, optionally filtered by name
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> AppResult<Json<Vec<CourseResponse>>> {
    let courses = state
        .catalog
        .list_courses(&query.search, query.skip, query.limit)
        .await?;
    Ok(Json(courses.iter().map(CourseResponse::from).collect()))
}

/// Course details including skills
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
) -> AppResult<Json<Course>> {
    state
        .catalog
        .get_course(course_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Course {} not found", course_id)))
}

/// Courses most similar in content to the given one
pub async fn content_based_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(course_id): Path<CourseId>,
) -> AppResult<Json<Vec<CourseResponse>>> {
    let ids = state.engine.item_similarity(course_id, DEFAULT_SIMILAR_COUNT);

    tracing::info!(
        request_id = %request_id,
        course_id,
        similar = ids.len(),
        "Content-based recommendations"
    );

    let courses = courses_in_order(state.catalog.as_ref(), &ids).await?;
    Ok(Json(courses.iter().map(CourseResponse::from).collect()))
}

/// Skill prerequisite graph for visualization
pub async fn dependency_graph(State(state): State<AppState>) -> Json<NodeLinkGraph> {
    Json(state.engine.dependency_graph_export())
}

/// All skills, for the survey form
pub async fn list_skills(State(state): State<AppState>) -> AppResult<Json<Vec<Skill>>> {
    Ok(Json(state.catalog.list_skills().await?))
}

/// Register a user
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserSkillProfile>)> {
    let user = state.users.create_user(request.email).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// User profile with skills and progress
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<UserSkillProfile>> {
    Ok(Json(load_user(&state, user_id).await?))
}

/// Replace the user's known/target skills and learning style
pub async fn submit_survey(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(survey): Json<SurveySubmission>,
) -> AppResult<StatusCode> {
    profile::submit_survey(
        state.catalog.as_ref(),
        state.users.as_ref(),
        user_id,
        survey,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Record progress on a course
pub async fn update_progress(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(request): Json<ProgressRequest>,
) -> AppResult<StatusCode> {
    profile::update_progress(
        state.catalog.as_ref(),
        state.users.as_ref(),
        user_id,
        request.course_id,
        request.status,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Known versus missing target skills
pub async fn skill_gap(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<SkillGapAnalytics>> {
    let user = load_user(&state, user_id).await?;
    Ok(Json(state.engine.skill_gap(&user).await?))
}

/// Prerequisite-ordered learning path for the user
pub async fn personalized_path(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<Vec<CourseResponse>>> {
    let user = load_user(&state, user_id).await?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        targets = user.target_skill_ids.len(),
        "Processing personalized path request"
    );

    let ids = state.engine.personalized_path(&user).await?;
    let courses = courses_in_order(state.catalog.as_ref(), &ids).await?;

    tracing::info!(
        request_id = %request_id,
        path_length = courses.len(),
        "Personalized path completed"
    );

    Ok(Json(courses.iter().map(CourseResponse::from).collect()))
}

async fn load_user(state: &AppState, user_id: UserId) -> AppResult<UserSkillProfile> {
    state
        .users
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
}

/// Fetches courses and returns them in the order of `ids`, skipping unknown ids
async fn courses_in_order(
    catalog: &dyn CourseRepository,
    ids: &[CourseId],
) -> AppResult<Vec<Course>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut by_id: HashMap<CourseId, Course> = catalog
        .fetch_courses_by_ids(ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}
