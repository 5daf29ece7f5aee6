//! Handler for the admin dashboard API.

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::Method,
};
use serde_json::json;

use crate::api::dto::admin::{AdminBody, AdminQuery, AdminResponse};
use crate::api::dto::non_blank;
use crate::application::services::admin_service::AdminAction;
use crate::error::AppError;
use crate::infrastructure::identity::AuthUser;
use crate::state::AppState;

/// Dispatches one admin action.
///
/// # Endpoint
///
/// `GET|POST|PATCH /api/admin-api?action=<action>`
///
/// `action`, `userId` and `flagId` may also come from a JSON body. Requires the bearer
/// token of an allowlisted admin (see [`crate::api::middleware::auth::admin_layer`]).
///
/// # Actions
///
/// - `stats` - document, user and flag counters
/// - `live-feed` - newest documents since `since` (default 24 hours)
/// - `users` - activity summary, or one user's documents, sessions and flags
/// - `flags` - unresolved activity flags
/// - `resolve-flag` - `PATCH` only; marks `flagId` resolved
/// - `all-profiles` - every profile, newest first
/// - `url_clicks` - visitor click summary
///
/// # Errors
///
/// - 400 for an unknown action or a missing `flagId`
/// - 404 when the flag to resolve does not exist
pub async fn admin_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthUser>,
    method: Method,
    Query(query): Query<AdminQuery>,
    body: Option<Json<AdminBody>>,
) -> Result<Json<AdminResponse>, AppError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let action: AdminAction = non_blank(query.action.or(body.action))
        .unwrap_or_default()
        .parse()?;
    let admin_service = &state.admin_service;

    let response = match action {
        AdminAction::Stats => AdminResponse::Stats(admin_service.stats().await?),
        AdminAction::LiveFeed => AdminResponse::LiveFeed {
            docs: admin_service.live_feed(query.since).await?,
        },
        AdminAction::Users => match non_blank(query.user_id.or(body.user_id)) {
            Some(user_id) => AdminResponse::UserDetail(admin_service.user_detail(&user_id).await?),
            None => AdminResponse::Users {
                users: admin_service.users().await?,
            },
        },
        AdminAction::Flags => AdminResponse::Flags {
            flags: admin_service.unresolved_flags().await?,
        },
        AdminAction::ResolveFlag if method == Method::PATCH => {
            let flag_id = non_blank(body.flag_id).ok_or_else(|| {
                AppError::bad_request("Missing flagId", json!({ "field": "flagId" }))
            })?;
            let resolved_by = admin.email.as_deref().unwrap_or(admin.id.as_str());
            AdminResponse::ResolvedFlag {
                flag: admin_service.resolve_flag(&flag_id, resolved_by).await?,
            }
        }
        AdminAction::ResolveFlag => {
            return Err(AppError::bad_request(
                "Unknown action: resolve-flag",
                json!({ "action": "resolve-flag", "method": method.as_str() }),
            ));
        }
        AdminAction::AllProfiles => AdminResponse::Profiles {
            profiles: admin_service.all_profiles().await?,
        },
        AdminAction::UrlClicks => AdminResponse::Clicks {
            clicks: admin_service.url_clicks().await?,
        },
    };

    Ok(Json(response))
}
