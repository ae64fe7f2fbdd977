use std::sync::Arc;

use crate::db::repository::CourseRepository;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn CourseRepository>,
    pub api_key: String,
}
