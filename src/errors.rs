use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UsageError {
    #[error("Malformed term '{0}': expected a URI or a PREFIX:LOCAL identifier")]
    MalformedTerm(String),

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Query template error: {0}")]
    TemplateRender(String),

    #[error("SPARQL query against '{service}' failed: {cause}")]
    RemoteQuery { service: String, cause: String },
}

impl ResponseError for UsageError {
    fn error_response(&self) -> HttpResponse {
        let status_code = match self {
            UsageError::MalformedTerm(_) => StatusCode::BAD_REQUEST,
            UsageError::UnknownService(_) => StatusCode::BAD_REQUEST,
            UsageError::TemplateRender(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UsageError::RemoteQuery { .. } => StatusCode::BAD_GATEWAY,
        };

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

pub type UsageResult<T> = Result<T, UsageError>;
