use std::path::Path as FsPath;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::routing::{delete, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

const COURSE_NOT_FOUND: &str = "Curso não encontrado";
const LINK_NOT_FOUND: &str = "Associação não encontrada";
const SUBJECT_NAME_REQUIRED: &str = "O nome da disciplina é obrigatório";

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// API routes, with every other path served from `static_dir`.
pub fn router(state: AppState, static_dir: impl AsRef<FsPath>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cursos", get(list_courses).post(create_course))
        .route("/cursos/{id}", delete(delete_course))
        .route("/cursos/{id}/disciplinas", post(add_subject))
        .route("/cursos/{id}/disciplinas/{subject_id}", delete(remove_subject))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = repository::list_courses(&state.db).await?;
    Ok(Json(courses))
}

async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<NewCourseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedCourse>), AppError> {
    let Json(req) = payload?;
    let course = repository::create_course(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn delete_course(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let changes = repository::delete_course(&state.db, id).await?;
    if changes == 0 {
        return Err(AppError::NotFound(COURSE_NOT_FOUND.to_string()));
    }
    Ok(Json(MessageResponse {
        message: "Curso deletado com sucesso",
    }))
}

async fn add_subject(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<NewSubjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Path(course_id) = id?;
    let Json(req) = payload?;
    let name = req
        .name()
        .ok_or_else(|| AppError::BadRequest(SUBJECT_NAME_REQUIRED.to_string()))?;

    let subject = repository::find_or_create_subject(&state.db, name).await?;
    repository::link_subject_to_course(&state.db, course_id, subject.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Disciplina adicionada com sucesso",
        }),
    ))
}

async fn remove_subject(
    State(state): State<AppState>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path((course_id, subject_id)) = ids?;
    let changes =
        repository::unlink_subject_from_course(&state.db, course_id, subject_id).await?;
    if changes == 0 {
        return Err(AppError::NotFound(LINK_NOT_FOUND.to_string()));
    }
    Ok(Json(MessageResponse {
        message: "Disciplina removida com sucesso",
    }))
}
