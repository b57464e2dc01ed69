use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Subject {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Body of `POST /cursos/{id}/disciplinas`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSubjectRequest {
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
}

impl NewSubjectRequest {
    /// The subject name, or `None` when it is absent or empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRow)]
pub struct SubjectId {
    pub id: i64,
}
