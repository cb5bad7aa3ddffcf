use crate::auth::claims::{AuthUser, Role};
use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

type GuardRejection = (StatusCode, Json<ApiResponse<Empty>>);

/// Authenticates the request and stores the `AuthUser` in its extensions for handlers.
async fn extract_and_insert_authuser(
    mut req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), GuardRejection> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|(_, msg)| (StatusCode::UNAUTHORIZED, Json(ApiResponse::error(msg))))?;

    req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Roles considered "higher or equal" in privilege to `role`.
///
/// Hierarchy (high -> low): Admin > Tutor > Student. Allowing a role implicitly
/// allows every role above it.
fn roles_higher_or_equal(role: Role) -> &'static [Role] {
    match role {
        Role::Admin => &[Role::Admin],
        Role::Tutor => &[Role::Admin, Role::Tutor],
        Role::Student => &[Role::Admin, Role::Tutor, Role::Student],
    }
}

/// Base guard: authenticates, then requires the token role to be one of `allowed`.
async fn allow_role_base(
    req: Request<Body>,
    next: Next,
    allowed: &[Role],
    failure_msg: &str,
) -> Result<Response, GuardRejection> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if allowed.contains(&user.0.role) {
        Ok(next.run(req).await)
    } else {
        Err((StatusCode::FORBIDDEN, Json(ApiResponse::error(failure_msg))))
    }
}

/// Admin-only guard.
pub async fn allow_admin(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_role_base(
        req,
        next,
        roles_higher_or_equal(Role::Admin),
        "Admin access required",
    )
    .await
}

/// Guard for Student and higher (Student, Tutor, Admin).
pub async fn allow_student(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_role_base(
        req,
        next,
        roles_higher_or_equal(Role::Student),
        "Student (or higher) access required",
    )
    .await
}
