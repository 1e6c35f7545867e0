use crate::auth::auth::AuthUser;
use crate::auth::jwt::verify_token;
use crate::config::Config;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use serde_json::json;

pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    let header_value = match req.headers().get("Authorization") {
        Some(h) => match h.to_str() {
            Ok(v) => v,
            Err(_) => {
                let resp = HttpResponse::Unauthorized().json(json!({
                    "error": "UNAUTHORIZED",
                    "message": "Invalid Authorization header encoding"
                }));
                return Ok(req.into_response(resp.map_into_boxed_body()));
            }
        },
        None => {
            let resp = HttpResponse::Unauthorized().json(json!({
                "error": "UNAUTHORIZED",
                "message": "Missing Authorization header"
            }));
            return Ok(req.into_response(resp.map_into_boxed_body()));
        }
    };

    let token = match header_value.strip_prefix("Bearer ") {
        Some(t) => t,
        None => {
            let resp = HttpResponse::Unauthorized().json(json!({
                "error": "UNAUTHORIZED",
                "message": "Authorization header must start with Bearer"
            }));
            return Ok(req.into_response(resp.map_into_boxed_body()));
        }
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(e) => {
            tracing::info!(error = %e, "Rejected bearer token");
            let resp = HttpResponse::Unauthorized().json(json!({
                "error": "UNAUTHORIZED",
                "message": "Invalid or expired token"
            }));
            return Ok(req.into_response(resp.map_into_boxed_body()));
        }
    };

    req.extensions_mut().insert(AuthUser {
        username: claims.sub,
    });

    next.call(req).await
}
