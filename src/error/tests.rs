//! Unit tests for error handling

use super::*;
use axum::body::to_bytes;
use std::io;

async fn response_parts(error: ManagerError) -> (StatusCode, Option<HeaderValue>, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let auth = response.headers().get(WWW_AUTHENTICATE).cloned();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, auth, serde_json::from_slice(&bytes).unwrap())
}

fn unique_violation() -> rusqlite::Error {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE t (name TEXT UNIQUE); INSERT INTO t VALUES ('a');")
        .unwrap();
    conn.execute("INSERT INTO t VALUES ('a')", []).unwrap_err()
}

#[cfg(test)]
mod manager_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = ManagerError::from(json_error);

        match error {
            ManagerError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = ManagerError::from(io_error);

        match error {
            ManagerError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_anyhow_conversion_is_internal() {
        let error = ManagerError::from(anyhow::anyhow!("boom"));
        match error {
            ManagerError::Internal { message } => assert_eq!(message, "boom"),
            _ => panic!("Expected Internal error variant"),
        }
    }

    #[test]
    fn test_constraint_detection() {
        assert!(is_constraint_violation(&unique_violation()));
        assert!(!is_constraint_violation(&rusqlite::Error::QueryReturnedNoRows));
    }

    #[test]
    fn test_field_shorthand() {
        match ManagerError::field("name", "bad") {
            ManagerError::Validation(errors) => {
                assert_eq!(errors.get("name"), Some(&["bad".to_string()][..]));
            }
            _ => panic!("Expected Validation error variant"),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ManagerError::field("x", "y").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ManagerError::InvalidSuperuser { flag: "is_staff" }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ManagerError::Database(unique_violation()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ManagerError::NotFound {
                resource: "team",
                id: 1
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ManagerError::NotAuthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ManagerError::PermissionDenied.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ManagerError::Database(rusqlite::Error::QueryReturnedNoRows).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_superuser_message() {
        let error = ManagerError::InvalidSuperuser {
            flag: "is_superuser",
        };
        assert_eq!(error.to_string(), "Superuser must have is_superuser=true.");
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;

    #[tokio::test]
    async fn test_validation_body_is_field_map() {
        let mut errors = ValidationErrors::default();
        errors.add("name", "first");
        errors.add("name", "second");
        let (status, _, body) = response_parts(ManagerError::Validation(errors)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "name": ["first", "second"] }));
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, _, body) = response_parts(ManagerError::NotFound {
            resource: "player",
            id: 3,
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Not found." }));
    }

    #[tokio::test]
    async fn test_invalid_path_reads_as_not_found() {
        let (status, _, body) = response_parts(ManagerError::InvalidPath {
            message: "Cannot parse `abc` to a `i64`".into(),
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Not found." }));
    }

    #[tokio::test]
    async fn test_unauthorized_sets_challenge() {
        let (status, auth, body) = response_parts(ManagerError::NotAuthenticated).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(auth, Some(HeaderValue::from_static(AUTH_REALM)));
        assert_eq!(
            body["detail"],
            "Authentication credentials were not provided."
        );

        let (_, auth, _) = response_parts(ManagerError::PermissionDenied).await;
        assert_eq!(auth, None);
    }

    #[tokio::test]
    async fn test_internal_errors_are_hidden() {
        let (status, _, body) = response_parts(ManagerError::Internal {
            message: "secret path /etc/shadow".into(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "A server error occurred." }));
    }
}
