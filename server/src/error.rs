use ntex::http::StatusCode;
use ntex::web::{HttpResponse, WebResponseError};
use thiserror::Error;

/// Structural failures while decoding cube geometry and colour streams.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Malformed stream: {0}")]
    MalformedStream(String),

    #[error("Invalid orientation {0}, expected 0-23")]
    InvalidOrientation(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Failures reported by the catalog collaborators. Passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// The local catalog store failed.
    #[error("Database error: {0}")]
    Database(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl WebResponseError for AppError {
    fn error_response(&self, _: &ntex::web::HttpRequest) -> HttpResponse {
        let (status, message) = match self {
            AppError::Codec(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Query(QueryError::InvalidQuery(_)) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Query(QueryError::Catalog(e)) | AppError::Catalog(e) => match e {
                CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
                CatalogError::Unavailable(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "Catalog unavailable".to_string())
                }
                CatalogError::Database(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
                }
            },
        };
        HttpResponse::build(status).json(&serde_json::json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntex::web::test::TestRequest;

    fn status(err: AppError) -> StatusCode {
        let req = TestRequest::default().to_http_request();
        err.error_response(&req).status()
    }

    #[test]
    fn test_bad_request_errors() {
        assert_eq!(
            status(QueryError::InvalidQuery("page".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(CodecError::MalformedStream("short".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(CodecError::InvalidOrientation(24).into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_catalog_errors() {
        assert_eq!(
            status(CatalogError::NotFound("Robot 1".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(CatalogError::Unavailable("offline".into()).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status(CatalogError::Database("no such table".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_catalog_errors_inside_query() {
        let err = AppError::Query(QueryError::Catalog(CatalogError::Unavailable("offline".into())));
        assert_eq!(status(err), StatusCode::SERVICE_UNAVAILABLE);

        let err = AppError::Query(QueryError::Catalog(CatalogError::NotFound("part".into())));
        assert_eq!(status(err), StatusCode::NOT_FOUND);
    }
}
