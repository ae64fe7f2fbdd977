pub mod course;

pub use course::{Course, CoursePatch, NewCourse, NO_DESCRIPTION, NO_REQUIREMENTS};
