use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    DecodeError(String),

    #[error("Database Error: {0}")]
    DatabaseError(#[from] DbError),
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection Error: {0}")]
    ConnectionError(String),

    #[error("Query Error: {0}")]
    QueryBuilderError(String),

    #[error("Insertion Error: {0}")]
    InsertionError(String),

    #[error("Updation Error: {0}")]
    UpdationError(String),
}

// Error bodies stay plain text while success bodies are JSON. The original
// behaves the same way.
impl ResponseError for CustomError {
    fn error_response(&self) -> HttpResponse {
        match self {
            CustomError::NotFound(_) => HttpResponse::NotFound().body(self.to_string()),
            CustomError::DecodeError(_) => HttpResponse::BadRequest().body(self.to_string()),
            CustomError::DatabaseError(err) => match err {
                DbError::ConnectionError(_) => {
                    HttpResponse::InternalServerError().body(self.to_string())
                }
                DbError::QueryBuilderError(_) => {
                    HttpResponse::InternalServerError().body(self.to_string())
                }
                DbError::InsertionError(_) => {
                    HttpResponse::InternalServerError().body(self.to_string())
                }
                DbError::UpdationError(_) => {
                    HttpResponse::InternalServerError().body(self.to_string())
                }
            },
        }
    }
}
