pub mod course;
pub mod subject;

pub use course::{Course, CreatedCourse, NewCourseRequest};
pub use subject::{NewSubjectRequest, Subject, SubjectId};
