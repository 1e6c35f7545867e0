use crate::model::employee::Balance;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};
use crate::models::{CreateLeave, LoginReqDto, LoginResponse, SignupReqDto};
use crate::service::SubmittedLeave;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Tracker API",
        version = "1.0.0",
        description = r#"
## Paid time off (PTO) tracker

Employees sign up, log in, request leave and follow their balance.

### Key Features
- **Leave calculation**: weekdays only, morning/afternoon half days cost 0.5
- **Balance ledger**: a request is refused when it exceeds the remaining balance
- **History**: every request is kept, newest first

### Security
Leave and balance endpoints require a **JWT Bearer** token from `/auth/login`.
"#,
    ),
    paths(
        crate::auth::handlers::signup,
        crate::auth::handlers::login,

        crate::api::leave_request::create_leave,
        crate::api::leave_request::preview_leave,
        crate::api::leave_request::leave_history,

        crate::api::employee::get_balance
    ),
    components(
        schemas(
            SignupReqDto,
            LoginReqDto,
            LoginResponse,
            CreateLeave,
            LeaveRequest,
            LeaveType,
            LeaveStatus,
            SubmittedLeave,
            Balance
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Signup and login"),
        (name = "Leave", description = "Leave requests and history"),
        (name = "Employee", description = "Employee balance"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Prefix the protected handlers are annotated with.
const ANNOTATED_PREFIX: &str = "/api";

/// Builds the document with protected paths moved under `api_prefix`, the
/// scope `routes::configure` actually mounts them at.
pub fn openapi_for_prefix(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    let api_prefix = api_prefix.trim_end_matches('/');

    if api_prefix != ANNOTATED_PREFIX {
        let paths = std::mem::take(&mut openapi.paths.paths);
        for (path, item) in paths {
            let path = match path.strip_prefix(ANNOTATED_PREFIX) {
                Some(rest) => format!("{}{}", api_prefix, rest),
                None => path,
            };
            openapi.paths.paths.insert(path, item);
        }
    }

    openapi
}
