use crate::{
    auth::auth::AuthUser, error::AppError, model::leave_request::LeaveRequest, models::CreateLeave,
    service::LeaveService,
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::instrument;

/* =========================
Submit leave request
========================= */
/// Swagger doc for create_leave endpoint
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted successfully",
         body = Object,
         example = json!({
            "message": "Leave request submitted",
            "request_id": 1,
            "days": 5.0,
            "status": "PENDING"
         })
        ),
        (status = 400, description = "Invalid dates, invalid range or insufficient balance"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
#[instrument(name = "create_leave", skip(service, payload), fields(username = %auth.username))]
pub async fn create_leave(
    auth: AuthUser,
    service: web::Data<LeaveService>,
    payload: web::Json<CreateLeave>,
) -> Result<HttpResponse, AppError> {
    let submitted = service
        .submit_request(
            &auth.username,
            &payload.start_date,
            &payload.end_date,
            payload.leave_type,
        )
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave request submitted",
        "request_id": submitted.request_id,
        "days": submitted.days,
        "status": "PENDING"
    })))
}

/* =========================
Preview chargeable days
========================= */
/// Computes what a request would cost without submitting it
#[utoipa::path(
    post,
    path = "/api/leave/preview",
    request_body = CreateLeave,
    responses(
        (status = 200, description = "Chargeable days", body = Object, example = json!({
            "days": 4.0
        })),
        (status = 400, description = "Invalid dates or range"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn preview_leave(
    _auth: AuthUser,
    service: web::Data<LeaveService>,
    payload: web::Json<CreateLeave>,
) -> Result<HttpResponse, AppError> {
    let days = service.preview_days(&payload.start_date, &payload.end_date, payload.leave_type)?;

    Ok(HttpResponse::Ok().json(json!({ "days": days })))
}

/// Leave history of the calling employee, newest first
#[utoipa::path(
    get,
    path = "/api/leave",
    responses(
        (status = 200, description = "Leave history", body = [LeaveRequest]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_history(
    auth: AuthUser,
    service: web::Data<LeaveService>,
) -> Result<HttpResponse, AppError> {
    let history: Vec<LeaveRequest> = service.get_history(&auth.username).await?;

    Ok(HttpResponse::Ok().json(history))
}
