use crate::{
    auth::jwt::generate_access_token,
    config::Config,
    error::AppError,
    models::{LoginReqDto, LoginResponse, SignupReqDto},
    service::LeaveService,
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{debug, info, instrument};

/// Employee signup
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupReqDto,
    responses(
        (status = 201, description = "Employee registered", body = Object, example = json!({
            "message": "ABC registered successfully"
        })),
        (status = 400, description = "Username length or password invalid"),
        (status = 409, description = "Username already exists")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_signup", skip(service, user), fields(username = %user.username))]
pub async fn signup(
    user: web::Json<SignupReqDto>,
    service: web::Data<LeaveService>,
) -> Result<HttpResponse, AppError> {
    info!("Signup request received");

    service.register(&user.username, &user.password).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": format!("{} registered successfully", user.username.trim())
    })))
}

/// Employee login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 401, description = "Password mismatch"),
        (status = 404, description = "Unknown username")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(service, config, user), fields(username = %user.username))]
pub async fn login(
    user: web::Json<LoginReqDto>,
    service: web::Data<LeaveService>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    if user.username.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty username or password");
        return Err(AppError::Validation(
            "username and password are required".to_string(),
        ));
    }

    let balance = service.authenticate(&user.username, &user.password).await?;
    let username = user.username.trim().to_string();

    debug!("Generating access token");
    let access_token =
        generate_access_token(&username, &config.jwt_secret, config.access_token_ttl)?;

    info!("Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token,
        username,
        total_leave: balance.total_leave,
        used_leave: balance.used_leave,
        remaining_leave: balance.remaining_leave,
    }))
}
