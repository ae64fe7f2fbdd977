use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{Course, CoursePatch, NewCourse};

/// Persistence seam for course rows. Handlers only see this trait, so tests
/// can stand up an isolated store per instance.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Course>, AppError>;
    async fn find(&self, id: i64) -> Result<Option<Course>, AppError>;
    async fn insert(&self, new: NewCourse) -> Result<Course, AppError>;
    async fn update(&self, id: i64, patch: CoursePatch) -> Result<Course, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

pub struct SqliteCourseRepository {
    pool: SqlitePool,
}

impl SqliteCourseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// UNIQUE violations on `course_code` become the user-facing conflict;
/// everything else stays a raw database error.
fn map_constraint(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicateCourseCode,
        _ => AppError::Database(e),
    }
}

#[async_trait]
impl CourseRepository for SqliteCourseRepository {
    async fn list(&self) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT id, course_code, title, instructor, units, description, prerequisite FROM courses"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }

    async fn find(&self, id: i64) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, course_code, title, instructor, units, description, prerequisite FROM courses WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    async fn insert(&self, new: NewCourse) -> Result<Course, AppError> {
        let result = sqlx::query(
            "INSERT INTO courses (course_code, title, instructor, units, description, prerequisite) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.course_code)
        .bind(&new.title)
        .bind(&new.instructor)
        .bind(new.units)
        .bind(&new.description)
        .bind(&new.prerequisite)
        .execute(&self.pool)
        .await
        .map_err(map_constraint)?;

        let id = result.last_insert_rowid();
        self.find(id)
            .await?
            .ok_or(AppError::Database(sqlx::Error::RowNotFound))
    }

    async fn update(&self, id: i64, patch: CoursePatch) -> Result<Course, AppError> {
        let mut current = self.find(id).await?.ok_or(AppError::NotFound(id))?;

        if let Some(course_code) = patch.course_code {
            current.course_code = course_code;
        }
        if let Some(title) = patch.title {
            current.title = title;
        }
        if let Some(instructor) = patch.instructor {
            current.instructor = instructor;
        }
        if let Some(units) = patch.units {
            current.units = units;
        }
        if let Some(description) = patch.description {
            current.description = description;
        }
        if let Some(prerequisite) = patch.prerequisite {
            current.prerequisite = prerequisite;
        }

        // One statement, so a constraint violation applies nothing.
        sqlx::query(
            "UPDATE courses \
             SET course_code = ?, title = ?, instructor = ?, units = ?, \
                 description = ?, prerequisite = ? \
             WHERE id = ?",
        )
        .bind(&current.course_code)
        .bind(&current.title)
        .bind(&current.instructor)
        .bind(current.units)
        .bind(&current.description)
        .bind(&current.prerequisite)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_constraint)?;

        Ok(current)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            Ok(())
        } else {
            Err(AppError::NotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewCourse;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        // Single connection: every pooled connection would otherwise get its
        // own private in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    fn sample_course(code: &str) -> NewCourse {
        NewCourse {
            course_code: Some(code.to_string()),
            title: Some("Introduction to Computer Science".to_string()),
            instructor: Some("Dr. Smith".to_string()),
            units: 3.0,
            description: Some("Basic programming and algorithms.".to_string()),
            prerequisite: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_course() {
        let repo = SqliteCourseRepository::new(setup_test_db().await);

        let course = repo
            .insert(sample_course("CS101"))
            .await
            .expect("Failed to insert course");
        assert_eq!(course.course_code, "CS101");
        assert_eq!(course.units, 3.0);
        assert_eq!(course.prerequisite, None);

        let found = repo
            .find(course.id)
            .await
            .expect("Failed to query course")
            .expect("Course not found");
        assert_eq!(found.title, "Introduction to Computer Science");

        let all = repo.list().await.expect("Failed to list courses");
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_course_code_is_a_conflict() {
        let repo = SqliteCourseRepository::new(setup_test_db().await);

        repo.insert(sample_course("CS101"))
            .await
            .expect("Failed to insert course");

        let err = repo
            .insert(sample_course("CS101"))
            .await
            .expect_err("Duplicate code must be rejected");
        assert!(matches!(err, AppError::DuplicateCourseCode));

        let all = repo.list().await.expect("Failed to list courses");
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_partial_update_leaves_other_fields() {
        let repo = SqliteCourseRepository::new(setup_test_db().await);
        let course = repo
            .insert(sample_course("CS101"))
            .await
            .expect("Failed to insert course");

        let patch = CoursePatch {
            title: Some("Intro to Computing".to_string()),
            ..Default::default()
        };
        let updated = repo
            .update(course.id, patch)
            .await
            .expect("Failed to update course");

        assert_eq!(updated.title, "Intro to Computing");
        assert_eq!(updated.course_code, "CS101");
        assert_eq!(updated.instructor, "Dr. Smith");
        assert_eq!(updated.units, 3.0);
    }

    #[tokio::test]
    async fn test_update_can_null_a_description() {
        let repo = SqliteCourseRepository::new(setup_test_db().await);
        let course = repo
            .insert(sample_course("CS101"))
            .await
            .expect("Failed to insert course");
        assert!(course.description.is_some());

        let patch = CoursePatch {
            description: Some(None),
            ..Default::default()
        };
        let updated = repo
            .update(course.id, patch)
            .await
            .expect("Failed to update course");
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn test_update_to_taken_code_is_a_conflict() {
        let repo = SqliteCourseRepository::new(setup_test_db().await);
        repo.insert(sample_course("CS101"))
            .await
            .expect("Failed to insert course");
        let second = repo
            .insert(sample_course("CS102"))
            .await
            .expect("Failed to insert course");

        let patch = CoursePatch {
            course_code: Some("CS101".to_string()),
            ..Default::default()
        };
        let err = repo
            .update(second.id, patch)
            .await
            .expect_err("Duplicate code must be rejected");
        assert!(matches!(err, AppError::DuplicateCourseCode));

        // Nothing was applied.
        let unchanged = repo
            .find(second.id)
            .await
            .expect("Failed to query course")
            .expect("Course not found");
        assert_eq!(unchanged.course_code, "CS102");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let repo = SqliteCourseRepository::new(setup_test_db().await);
        let err = repo
            .update(99999, CoursePatch::default())
            .await
            .expect_err("Unknown id must be rejected");
        assert!(matches!(err, AppError::NotFound(99999)));
    }

    #[tokio::test]
    async fn test_delete_is_permanent_and_single_shot() {
        let repo = SqliteCourseRepository::new(setup_test_db().await);
        let course = repo
            .insert(sample_course("CS101"))
            .await
            .expect("Failed to insert course");

        repo.delete(course.id).await.expect("Failed to delete course");
        assert!(repo
            .find(course.id)
            .await
            .expect("Failed to query course")
            .is_none());

        let err = repo
            .delete(course.id)
            .await
            .expect_err("Second delete must fail");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = SqliteCourseRepository::new(setup_test_db().await);
        let first = repo
            .insert(sample_course("CS101"))
            .await
            .expect("Failed to insert course");
        repo.delete(first.id).await.expect("Failed to delete course");

        let second = repo
            .insert(sample_course("CS102"))
            .await
            .expect("Failed to insert course");
        assert!(second.id > first.id);
    }
}
