use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every failed response: `{ "ok": false, "error": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

#[derive(Debug)]
pub struct ServiceError {
    pub code: u16,
    pub err: anyhow::Error,
    exposed: bool,
}

impl ServiceError {
    /// Message sent to the caller. Errors that never got an explicit code are
    /// reported generically, their detail only goes to the log.
    pub fn public_message(&self) -> String {
        if self.exposed {
            self.err.to_string()
        } else {
            "Server error".to_string()
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "ServiceError({}): {}", self.code, self.err)
    }
}

impl actix_web::error::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        if !self.exposed {
            log::error!("Unexpected failure: {:?}", self.err);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.public_message()))
    }
}

impl<E: Into<anyhow::Error>> From<E> for ServiceError {
    fn from(err: E) -> ServiceError {
        ServiceError {
            code: 500,
            err: err.into(),
            exposed: false,
        }
    }
}

pub trait AddCode {
    fn code(self, code: u16) -> ServiceError;
}

impl AddCode for anyhow::Error {
    fn code(self, code: u16) -> ServiceError {
        ServiceError {
            code,
            err: self,
            exposed: true,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
