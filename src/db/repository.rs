use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreError;
use crate::models::{Course, CreatedCourse, NewCourseRequest, Subject, SubjectId};

pub async fn create_course(
    db: &SqlitePool,
    req: NewCourseRequest,
) -> Result<CreatedCourse, StoreError> {
    let id = sqlx::query(
        r#"
        INSERT INTO cursos (nome, carga_horaria, data_inicio)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(req.name)
    .bind(req.workload_hours)
    .bind(req.start_date)
    .execute(db)
    .await?
    .last_insert_rowid();

    debug!("created course {}", id);
    Ok(CreatedCourse { id })
}

/// All courses with their subjects attached.
///
/// One query for the courses, then one per course for its subjects.
pub async fn list_courses(db: &SqlitePool) -> Result<Vec<Course>, StoreError> {
    let mut courses = sqlx::query_as::<_, Course>(
        r#"
        SELECT
            id,
            nome AS name,
            carga_horaria AS workload_hours,
            data_inicio AS start_date
        FROM cursos
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    for course in &mut courses {
        course.subjects = list_course_subjects(db, course.id).await?;
    }

    Ok(courses)
}

pub async fn list_course_subjects(
    db: &SqlitePool,
    course_id: i64,
) -> Result<Vec<Subject>, StoreError> {
    let subjects = sqlx::query_as::<_, Subject>(
        r#"
        SELECT d.id, d.nome AS name
        FROM disciplinas d
        JOIN curso_disciplinas cd ON d.id = cd.disciplina_id
        WHERE cd.curso_id = ?1
        "#,
    )
    .bind(course_id)
    .fetch_all(db)
    .await?;

    Ok(subjects)
}

/// Returns the number of rows removed (0 or 1). Links go with the course.
pub async fn delete_course(db: &SqlitePool, id: i64) -> Result<u64, StoreError> {
    let changes = sqlx::query("DELETE FROM cursos WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    debug!("deleted course {} ({} rows)", id, changes);
    Ok(changes)
}

pub async fn find_subject_by_name(
    db: &SqlitePool,
    name: &str,
) -> Result<Option<SubjectId>, StoreError> {
    let subject = sqlx::query_as::<_, SubjectId>("SELECT id FROM disciplinas WHERE nome = ?1")
        .bind(name)
        .fetch_optional(db)
        .await?;

    Ok(subject)
}

/// Looks a subject up by exact name, inserting it when absent.
///
/// When two callers race on a new name the loser's insert hits the `UNIQUE`
/// constraint; it then reads back the winner's row, so both get the same id.
pub async fn find_or_create_subject(db: &SqlitePool, name: &str) -> Result<SubjectId, StoreError> {
    if let Some(existing) = find_subject_by_name(db, name).await? {
        return Ok(existing);
    }

    let inserted = sqlx::query("INSERT INTO disciplinas (nome) VALUES (?1)")
        .bind(name)
        .execute(db)
        .await
        .map_err(StoreError::from);

    match inserted {
        Ok(result) => {
            let id = result.last_insert_rowid();
            debug!("created subject {} ({:?})", id, name);
            Ok(SubjectId { id })
        }
        Err(e) if e.is_unique_violation() => {
            debug!("subject {:?} inserted concurrently, reading it back", name);
            find_subject_by_name(db, name)
                .await?
                .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
        }
        Err(e) => Err(e),
    }
}

/// Fails with a primary-key violation if the pair is already linked.
pub async fn link_subject_to_course(
    db: &SqlitePool,
    course_id: i64,
    subject_id: i64,
) -> Result<u64, StoreError> {
    let changes = sqlx::query(
        "INSERT INTO curso_disciplinas (curso_id, disciplina_id) VALUES (?1, ?2)",
    )
    .bind(course_id)
    .bind(subject_id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(changes)
}

pub async fn unlink_subject_from_course(
    db: &SqlitePool,
    course_id: i64,
    subject_id: i64,
) -> Result<u64, StoreError> {
    let changes = sqlx::query(
        "DELETE FROM curso_disciplinas WHERE curso_id = ?1 AND disciplina_id = ?2",
    )
    .bind(course_id)
    .bind(subject_id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(changes)
}
