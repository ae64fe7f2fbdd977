use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::middleware;
use axum::routing::{patch, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde_json::{Value, json};

use crate::auth::require_api_key;
use crate::error::AppError;
use crate::models::Course;
use crate::state::AppState;
use crate::validation;

pub fn router(state: AppState) -> Router {
    // Mutating routes sit behind the API-key gate; reads are open.
    let protected = Router::new()
        .route("/courses", post(create_course))
        .route("/courses/{id}", patch(update_course).delete(delete_course))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/", get(documentation))
        .route("/courses", get(list_courses))
        .route("/courses/{id}", get(get_course))
        .merge(protected)
        .with_state(state)
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state.repo.list().await?;
    Ok(Json(courses))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Course>, AppError> {
    let course = state.repo.find(id).await?.ok_or(AppError::NotFound(id))?;
    Ok(Json(course))
}

async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(body) = payload.map_err(|_| AppError::MalformedBody)?;
    let new = validation::new_course_from_json(&body)?;

    let course = state.repo.insert(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Course created successfully",
            "course": course,
        })),
    ))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    // Unknown id wins over a bad body.
    state.repo.find(id).await?.ok_or(AppError::NotFound(id))?;

    let Json(body) = payload.map_err(|_| AppError::MalformedBody)?;
    let patch = validation::course_patch_from_json(&body)?;

    let course = state.repo.update(id, patch).await?;
    Ok(Json(json!({
        "message": "Course updated successfully",
        "course": course,
    })))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Landing page: a JSON description of the API surface.
async fn documentation() -> Json<Value> {
    Json(json!({
        "API Title": "Course Management API",
        "Description": "A RESTful API for managing course data, including creation, retrieval, updates, and deletion of course records.",
        "Authentication": "POST, PATCH and DELETE require the X-API-KEY header.",
        "Endpoints": [
            {
                "Endpoint": "List All Courses",
                "Method": "GET",
                "URL": "/courses",
            },
            {
                "Endpoint": "Retrieve Course by ID",
                "Method": "GET",
                "URL": "/courses/{id}",
            },
            {
                "Endpoint": "Create a New Course",
                "Method": "POST",
                "URL": "/courses",
                "Parameters": {
                    "course_code": "String - Unique course code (required)",
                    "title": "String - Course title (required)",
                    "instructor": "String - Instructor name (required)",
                    "units": "Float - Number of units (required)",
                    "description": "String - Optional course description",
                    "prerequisite": "String - Optional prerequisite information",
                },
            },
            {
                "Endpoint": "Update Course",
                "Method": "PATCH",
                "URL": "/courses/{id}",
                "Parameters": "Any subset of the create parameters.",
            },
            {
                "Endpoint": "Delete Course",
                "Method": "DELETE",
                "URL": "/courses/{id}",
            },
        ],
        "Response Format": {
            "id": "Unique course ID",
            "course_code": "Course code (string)",
            "title": "Course title (string)",
            "instructor": "Instructor name (string)",
            "units": "Number of units (float)",
            "description": "Course description (string)",
            "prerequisite": "Course prerequisite (string)",
        },
    }))
}
