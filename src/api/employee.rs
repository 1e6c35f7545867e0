use crate::{auth::auth::AuthUser, error::AppError, model::employee::Balance, service::LeaveService};
use actix_web::{HttpResponse, web};

/// Current leave balance of the calling employee
#[utoipa::path(
    get,
    path = "/api/me/balance",
    responses(
        (status = 200, description = "Leave balance", body = Balance),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee no longer exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
pub async fn get_balance(
    auth: AuthUser,
    service: web::Data<LeaveService>,
) -> Result<HttpResponse, AppError> {
    let balance: Balance = service.get_balance(&auth.username).await?;

    Ok(HttpResponse::Ok().json(balance))
}
