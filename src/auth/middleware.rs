use actix_web::error::{ErrorForbidden, ErrorUnauthorized};
use actix_web::{web, Error, HttpRequest};

use super::jwt::validate_token;
use super::model::Claims;
use crate::db::AppState;
use crate::models::User;

/// Extract token from Authorization header
fn extract_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(str::to_string))
}

/// Validate token from HttpRequest and return claims
pub fn validate_request_token(req: &HttpRequest) -> Result<Claims, Error> {
    let token =
        extract_token(req).ok_or_else(|| ErrorUnauthorized("Missing authorization token"))?;

    let claims = validate_token(&token).map_err(|e| {
        log::warn!("Token validation failed: {:?}", e);
        ErrorUnauthorized("Invalid or expired token")
    })?;

    if claims.token_type != "access" {
        return Err(ErrorUnauthorized("Invalid token type"));
    }

    Ok(claims)
}

/// Resolve the authenticated account behind the request. The token may
/// outlive the in-memory store, so a valid token for a vanished user is
/// still a 401.
pub fn current_user(req: &HttpRequest, state: &web::Data<AppState>) -> Result<User, Error> {
    let claims = validate_request_token(req)?;
    let user_id: i32 = claims
        .sub
        .parse()
        .map_err(|_| ErrorUnauthorized("Invalid token subject"))?;
    state
        .get_user(user_id)
        .ok_or_else(|| ErrorUnauthorized("Unknown account"))
}

/// Like [`current_user`] but rejects non-admin accounts with 403.
pub fn require_admin(req: &HttpRequest, state: &web::Data<AppState>) -> Result<User, Error> {
    let user = current_user(req, state)?;
    if user.role != "admin" {
        return Err(ErrorForbidden("Admin access required"));
    }
    Ok(user)
}
