use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use sqlx::FromRow;

use super::Subject;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Course {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "carga_horaria")]
    pub workload_hours: Option<i64>,
    #[serde(rename = "data_inicio")]
    pub start_date: Option<String>,
    #[serde(rename = "disciplinas")]
    #[sqlx(skip)]
    pub subjects: Vec<Subject>,
}

/// Body of `POST /cursos`.
///
/// Every field is optional here; a missing `nome` is left for the
/// `NOT NULL` constraint to reject. A `cargaHoraria` that is not a whole
/// number (or a string holding one) and a `dataInicio` that is not a string
/// fail to deserialize, which the API answers with 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCourseRequest {
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "cargaHoraria", default, deserialize_with = "workload_hours")]
    pub workload_hours: Option<i64>,
    #[serde(rename = "dataInicio", default)]
    pub start_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreatedCourse {
    pub id: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWorkload {
    Hours(i64),
    Text(String),
}

/// Browser forms post numbers as strings, so `"40"` and `40` are the same
/// workload and `""` means none.
fn workload_hours<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawWorkload>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawWorkload::Hours(hours)) => Ok(Some(hours)),
        Some(RawWorkload::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<i64>().map(Some).map_err(|_| {
                D::Error::custom(format!("cargaHoraria must be an integer, got {:?}", text))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> Result<NewCourseRequest, serde_json::Error> {
        serde_json::from_value(body)
    }

    #[test]
    fn workload_accepts_numbers_and_numeric_strings() {
        let req = parse(json!({"nome": "Engenharia", "cargaHoraria": 40})).unwrap();
        assert_eq!(req.workload_hours, Some(40));

        let req = parse(json!({"nome": "Engenharia", "cargaHoraria": " 60 "})).unwrap();
        assert_eq!(req.workload_hours, Some(60));
    }

    #[test]
    fn workload_blank_or_missing_is_none() {
        assert_eq!(parse(json!({"cargaHoraria": ""})).unwrap().workload_hours, None);
        assert_eq!(parse(json!({"cargaHoraria": null})).unwrap().workload_hours, None);
        assert_eq!(parse(json!({})).unwrap().workload_hours, None);
    }

    #[test]
    fn workload_rejects_non_integers() {
        assert!(parse(json!({"cargaHoraria": "quarenta"})).is_err());
        assert!(parse(json!({"cargaHoraria": 40.5})).is_err());
    }

    #[test]
    fn start_date_is_kept_verbatim() {
        let req = parse(json!({"dataInicio": "01/02/2024"})).unwrap();
        assert_eq!(req.start_date.as_deref(), Some("01/02/2024"));
    }

    #[test]
    fn course_serializes_with_column_names() {
        let course = Course {
            id: 1,
            name: "Engenharia".to_string(),
            workload_hours: Some(40),
            start_date: None,
            subjects: vec![],
        };
        assert_eq!(
            serde_json::to_value(&course).unwrap(),
            json!({
                "id": 1,
                "nome": "Engenharia",
                "carga_horaria": 40,
                "data_inicio": null,
                "disciplinas": []
            })
        );
    }
}
