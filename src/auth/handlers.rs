use actix_web::{web, HttpRequest, HttpResponse, Responder};
use bcrypt::{hash, verify, DEFAULT_COST};

use super::jwt::{
    generate_access_token, generate_refresh_token, get_access_token_expiry, validate_token,
};
use super::middleware::current_user;
use super::model::{LoginRequest, RefreshRequest, RegisterRequest, TokenResponse};
use crate::db::user::NewUser;
use crate::db::AppState;
use crate::models::{User, UserInfo};
use crate::validation::{validate_id_number, validate_required, ValidationErrors};

fn token_pair(user: &User) -> Result<TokenResponse, jsonwebtoken::errors::Error> {
    let user_id = user.id.to_string();
    let access_token = generate_access_token(&user_id, &user.username, &user.role)?;
    let refresh_token = generate_refresh_token(&user_id, &user.username, &user.role)?;
    Ok(TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: get_access_token_expiry(),
        user: UserInfo::from(user.clone()),
    })
}

/// Login endpoint
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> impl Responder {
    let user = match state.get_user_by_username(&body.username) {
        Some(user) => user,
        None => {
            return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
                "Unauthorized",
                "Invalid username or password",
            ));
        }
    };

    let password_valid = verify(&body.password, &user.password).unwrap_or(false);
    if !password_valid {
        return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
            "Unauthorized",
            "Invalid username or password",
        ));
    }

    match token_pair(&user) {
        Ok(tokens) => HttpResponse::Ok().json(tokens),
        Err(e) => {
            log::error!("Failed to generate tokens: {:?}", e);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to generate token"))
        }
    }
}

/// Driver registration. New accounts start in `pending` status and stay
/// there until an admin activates them.
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Driver registered", body = TokenResponse),
        (status = 400, description = "Missing required fields or duplicate username")
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> impl Responder {
    let mut errors = ValidationErrors::new();
    validate_required(&body.username, "username", "Username", &mut errors);
    validate_required(&body.password, "password", "Password", &mut errors);
    validate_required(&body.full_name, "fullName", "Full name", &mut errors);
    if let Some(id_number) = body.id_number.as_deref().filter(|v| !v.trim().is_empty()) {
        validate_id_number(id_number, "idNumber", &mut errors);
    }
    if let Err(message) = errors.into_result() {
        return HttpResponse::BadRequest()
            .json(crate::ErrorResponse::bad_request(&message));
    }

    if state.get_user_by_username(&body.username).is_some() {
        return HttpResponse::BadRequest()
            .json(crate::ErrorResponse::bad_request("Username already exists"));
    }

    let password_hash = match hash(&body.password, DEFAULT_COST) {
        Ok(h) => h,
        Err(e) => {
            log::error!("Failed to hash password: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to create user"));
        }
    };

    let user = state.create_user(NewUser {
        username: body.username.clone(),
        password: password_hash,
        role: "driver".to_string(),
        full_name: Some(body.full_name.clone()),
        id_number: body.id_number.clone(),
        license_number: body.license_number.clone(),
    });
    log::info!(
        "Registered driver {} (id {}), awaiting approval",
        user.username,
        user.id
    );

    match token_pair(&user) {
        Ok(tokens) => HttpResponse::Created().json(tokens),
        Err(e) => {
            log::error!("Failed to generate tokens: {:?}", e);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to generate token"))
        }
    }
}

/// Refresh access token
#[utoipa::path(
    post,
    path = "/api/refresh",
    tag = "Authentication",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token refreshed", body = TokenResponse),
        (status = 401, description = "Invalid refresh token")
    )
)]
pub async fn refresh_token(
    state: web::Data<AppState>,
    body: web::Json<RefreshRequest>,
) -> impl Responder {
    let claims = match validate_token(&body.refresh_token) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Invalid refresh token: {:?}", e);
            return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
                "Unauthorized",
                "Invalid or expired refresh token",
            ));
        }
    };

    if claims.token_type != "refresh" {
        return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
            "Unauthorized",
            "Invalid token type",
        ));
    }

    let user = match claims.sub.parse::<i32>().ok().and_then(|id| state.get_user(id)) {
        Some(user) => user,
        None => {
            return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
                "Unauthorized",
                "Session expired. Please login again.",
            ));
        }
    };

    let user_id = user.id.to_string();
    let access_token = match generate_access_token(&user_id, &user.username, &user.role) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Failed to generate access token: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to generate token"));
        }
    };

    HttpResponse::Ok().json(TokenResponse {
        access_token,
        refresh_token: body.refresh_token.clone(),
        token_type: "Bearer".to_string(),
        expires_in: get_access_token_expiry(),
        user: UserInfo::from(user),
    })
}

/// Current account behind the bearer token
#[utoipa::path(
    get,
    path = "/api/user",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = UserInfo),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    match current_user(&req, &state) {
        Ok(user) => HttpResponse::Ok().json(UserInfo::from(user)),
        Err(e) => e.error_response(),
    }
}

/// Configure auth routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/register", web::post().to(register))
        .route("/refresh", web::post().to(refresh_token))
        .route("/user", web::get().to(get_current_user));
}
