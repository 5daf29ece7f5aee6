//! Access guards for admin, catalog and scheduled-job routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Token of the `Authorization: Bearer` header, `None` when absent or malformed.
async fn bearer(parts: &mut Parts) -> Option<String> {
    AuthBearer::from_request_parts(parts, &())
        .await
        .ok()
        .map(|AuthBearer(token)| token)
        .filter(|token| !token.trim().is_empty())
}

/// Requires the bearer access token of an allowlisted admin.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <access token>
/// ```
///
/// The resolved [`crate::infrastructure::identity::AuthUser`] is stored in the request
/// extensions for the handler.
///
/// # Errors
///
/// Returns `401 Unauthorized` when the header is missing, the token is rejected by the
/// identity provider, or the email is not on the allowlist.
pub async fn admin_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    let user = st.auth_service.authenticate_admin(&token).await?;
    parts.extensions.insert(user);
    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

/// Guard of the catalog rebuild: `X-Admin-Key` header or `?key=` equal to the admin
/// secret, otherwise an admin bearer token.
///
/// # Errors
///
/// Returns `403 Forbidden` when neither credential is valid.
pub async fn admin_key_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_key = req
        .headers()
        .get("x-admin-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let query_key = req.uri().query().and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(k, _)| k == "key")
            .map(|(_, v)| v.into_owned())
    });

    if header_key
        .or(query_key)
        .is_some_and(|key| st.auth_service.is_admin_key(&key))
    {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();
    let Some(token) = bearer(&mut parts).await else {
        return Err(AppError::forbidden(
            "Forbidden: Admin only. Provide x-admin-key header or Bearer token.",
            json!({}),
        ));
    };

    st.auth_service
        .authenticate_admin(&token)
        .await
        .map_err(|_| AppError::forbidden("Forbidden: Admin only", json!({})))?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Requires `Authorization: Bearer <CRON_SECRET>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` when the secret is missing or wrong.
pub async fn cron_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let token = bearer(&mut parts).await;

    st.auth_service.authenticate_cron(token.as_deref())?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}
