//! The acting user for a request.
//!
//! Authentication happens upstream (reverse proxy or auth gateway), which
//! forwards the verified user ID in [`USER_HEADER`]. Handlers take a
//! [`CurrentUser`] argument and pass its ID explicitly into core calls.
//! The ID must name a stored user; anything else is rejected before the
//! handler runs.

use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use rj_core::error::AppError;
use rj_core::users::require_user;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::AppState;

pub const USER_HEADER: &str = "X-User-Id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let id = id_from_headers(req);
        let data = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let id = id?;
            let data = data.ok_or_else(|| {
                AppError::Storage(anyhow::anyhow!("AppState is not registered on the app"))
            })?;
            let user = require_user(data.repo(), id).await?;
            Ok(CurrentUser(user.id))
        })
    }
}

fn id_from_headers(req: &HttpRequest) -> Result<Uuid, ApiError> {
    let raw = req
        .headers()
        .get(USER_HEADER)
        .ok_or_else(|| AppError::Unauthorized(format!("missing {USER_HEADER} header")))?;

    raw.to_str()
        .ok()
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .ok_or_else(|| AppError::Unauthorized(format!("malformed {USER_HEADER} header")).into())
}
