use crate::{
    data::{
        StudentStore,
        student::{Student, StudentForm},
    },
    error::{
        InvalidBodySnafu, InvalidStudentIdSnafu, MissingStudentSnafu, RegistryResult,
        StudentAction,
    },
    state::RegistryState,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use snafu::{OptionExt, ResultExt};

#[derive(Serialize, Debug)]
pub struct StudentResponse {
    pub message: &'static str,
    pub student: Student,
}

/// Reads the leading `[+-]digits` of a path id, ignoring anything after them,
/// so `12abc` is 12 and `1.5` is 1. Only an id with no leading digits at all is invalid.
pub fn parse_student_id(original: &str, action: StudentAction) -> RegistryResult<i32> {
    let trimmed = original.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let end = trimmed[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed.len(), |digits| sign_len + digits);

    trimmed[..end]
        .parse::<i32>()
        .context(InvalidStudentIdSnafu { original, action })
}

fn body(form: Result<Json<StudentForm>, JsonRejection>) -> RegistryResult<StudentForm> {
    let Json(form) = form.context(InvalidBodySnafu)?;
    Ok(form)
}

pub async fn post_student(
    State(state): State<RegistryState>,
    form: Result<Json<StudentForm>, JsonRejection>,
) -> RegistryResult<(StatusCode, Json<StudentResponse>)> {
    let form = body(form)?;
    let student = state.insert_into_database(form).await?;
    info!(?student, "New student registered");

    Ok((
        StatusCode::CREATED,
        Json(StudentResponse {
            message: "Student registered successfully",
            student,
        }),
    ))
}

pub async fn get_students(State(state): State<RegistryState>) -> RegistryResult<Json<Vec<Student>>> {
    Ok(Json(state.get_all().await?))
}

pub async fn put_student(
    State(state): State<RegistryState>,
    Path(id): Path<String>,
    form: Result<Json<StudentForm>, JsonRejection>,
) -> RegistryResult<Json<StudentResponse>> {
    let id = parse_student_id(&id, StudentAction::Update)?;
    let form = body(form)?;
    debug!(id, ?form, "Attempting update");

    let student = state
        .update_in_database(id, form)
        .await?
        .context(MissingStudentSnafu {
            id,
            action: StudentAction::Update,
        })?;
    info!(?student, "Student updated");

    Ok(Json(StudentResponse {
        message: "Student updated successfully",
        student,
    }))
}

pub async fn delete_student(
    State(state): State<RegistryState>,
    Path(id): Path<String>,
) -> RegistryResult<StatusCode> {
    let id = parse_student_id(&id, StudentAction::Delete)?;

    if !state.remove_from_database(id).await? {
        return MissingStudentSnafu {
            id,
            action: StudentAction::Delete,
        }
        .fail();
    }
    info!(id, "Student deleted");

    Ok(StatusCode::NO_CONTENT)
}
