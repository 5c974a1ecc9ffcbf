//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. Viewers keep read access everywhere; running
//! jobs and uploading datasets needs at least the analyst role.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use toursight_core::error::CoreError;
use toursight_core::roles::{ROLE_ADMIN, ROLE_ANALYST};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires `analyst` or `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn run_job(RequireAnalyst(user): RequireAnalyst) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAnalyst(pub AuthUser);

impl FromRequestParts<AppState> for RequireAnalyst {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_ANALYST {
            return Err(AppError::Core(CoreError::Forbidden(
                "Analyst role required".into(),
            )));
        }
        Ok(RequireAnalyst(user))
    }
}
