use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use snafu::Snafu;
use std::{fmt, num::ParseIntError};

pub type RegistryResult<T> = Result<T, RegistryError>;

/// What a request was trying to do to the `students` table when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentAction {
    Register,
    Fetch,
    Update,
    Delete,
}

impl StudentAction {
    const fn id_suffix(self) -> &'static str {
        match self {
            Self::Delete => " for deletion",
            Self::Register | Self::Fetch | Self::Update => "",
        }
    }

    const fn not_found_suffix(self) -> &'static str {
        match self {
            Self::Delete => ".",
            Self::Register | Self::Fetch | Self::Update => "",
        }
    }
}

impl fmt::Display for StudentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Register => "registering student",
            Self::Fetch => "fetching students",
            Self::Update => "updating student",
            Self::Delete => "deleting student",
        })
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RegistryError {
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error {}", action))]
    MakeQuery {
        source: sqlx::Error,
        action: StudentAction,
    },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse database port"))]
    ParsePort { source: ParseIntError },
    #[snafu(display("Unable to parse `DATABASE_URL`"))]
    ParseDatabaseUrl { source: sqlx::Error },
    #[snafu(display("Unable to listen on {}", address))]
    BindListener {
        source: std::io::Error,
        address: String,
    },
    #[snafu(display("Error serving app"))]
    Serve { source: std::io::Error },
    #[snafu(display("Invalid student ID provided{}.", action.id_suffix()))]
    InvalidStudentId {
        source: ParseIntError,
        original: String,
        action: StudentAction,
    },
    #[snafu(display("Student not found{}", action.not_found_suffix()))]
    MissingStudent { id: i32, action: StudentAction },
    #[snafu(display("Invalid request body"))]
    InvalidBody {
        source: axum::extract::rejection::JsonRejection,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// The message the database itself gave, falling back to the driver's description.
fn raw_message(source: &sqlx::Error) -> String {
    source
        .as_database_error()
        .map_or_else(|| source.to_string(), |db| db.message().to_string())
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        let (status_code, error) = match &self {
            Self::GetDatabaseConnection { source }
            | Self::MakeQuery { source, .. }
            | Self::ParseDatabaseUrl { source } => (ISE, Some(raw_message(source))),
            Self::BadEnvVar { source, .. } => (ISE, Some(source.to_string())),
            Self::ParsePort { source } => (ISE, Some(source.to_string())),
            Self::BindListener { source, .. } | Self::Serve { source } => {
                (ISE, Some(source.to_string()))
            }
            Self::InvalidStudentId { .. } => (BI, None),
            Self::InvalidBody { source } => (BI, Some(source.body_text())),
            Self::MissingStudent { .. } => (NF, None),
        };

        error!(?self, "Error!");

        let body = ErrorBody {
            message: self.to_string(),
            error,
        };
        (status_code, Json(body)).into_response()
    }
}
