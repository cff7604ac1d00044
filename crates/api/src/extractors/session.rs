//! Session identity extractors.
//!
//! Identity arrives on each request via the `X-User-Id` and `X-User-Role`
//! headers, set by the trusted gateway in front of this service. Handlers
//! receive it as an explicit argument rather than reading ambient state.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::{SessionUser, UserRole};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// The caller's identity for this request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

impl CurrentUser {
    pub fn user_id(&self) -> Uuid {
        self.0.user_id
    }
}

fn session_from_parts(parts: &Parts) -> Result<SessionUser, ApiError> {
    let user_id = parts
        .headers
        .get("X-User-Id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Id header".to_string()))?
        .parse::<Uuid>()
        .map_err(|_| ApiError::Unauthorized("Invalid X-User-Id header".to_string()))?;

    let role = parts
        .headers
        .get("X-User-Role")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Role header".to_string()))?
        .parse::<UserRole>()
        .map_err(|_| ApiError::Unauthorized("Invalid X-User-Role header".to_string()))?;

    Ok(SessionUser { user_id, role })
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_from_parts(parts).map(CurrentUser)
    }
}

/// Identity extractor that additionally requires the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub SessionUser);

impl AdminUser {
    pub fn user_id(&self) -> Uuid {
        self.0.user_id
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts)?;
        if !session.is_admin() {
            return Err(ApiError::Forbidden(
                "Admin role required".to_string(),
            ));
        }
        Ok(AdminUser(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_session_from_valid_headers() {
        let id = Uuid::new_v4();
        let parts = parts_with_headers(&[
            ("X-User-Id", &id.to_string()),
            ("X-User-Role", "student"),
        ]);

        let session = session_from_parts(&parts).expect("valid session");
        assert_eq!(session.user_id, id);
        assert_eq!(session.role, UserRole::Student);
    }

    #[test]
    fn test_session_missing_id_header() {
        let parts = parts_with_headers(&[("X-User-Role", "student")]);
        let err = session_from_parts(&parts).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_session_malformed_id() {
        let parts = parts_with_headers(&[
            ("X-User-Id", "not-a-uuid"),
            ("X-User-Role", "student"),
        ]);
        let err = session_from_parts(&parts).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_session_unknown_role() {
        let parts = parts_with_headers(&[
            ("X-User-Id", &Uuid::new_v4().to_string()),
            ("X-User-Role", "teacher"),
        ]);
        let err = session_from_parts(&parts).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_admin_check() {
        let admin = SessionUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Admin,
        };
        assert!(admin.is_admin());

        let student = SessionUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Student,
        };
        assert!(!student.is_admin());
    }
}
