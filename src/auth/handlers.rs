use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    Form, Json,
};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{IdentityResponse, PublicUser, RegisterRequest, TokenRequest, TokenResponse},
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

/// POST /api/ — register a new user.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("User Already Exists".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.username, &payload.email, &hash).await?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(PublicUser {
            username: user.username,
            email: user.email,
        }),
    ))
}

/// Look up a user by username and check the password. Unknown username and
/// wrong password are indistinguishable to the caller.
pub async fn authenticate(
    db: &PgPool,
    username: &str,
    password: &str,
) -> anyhow::Result<Option<User>> {
    let Some(user) = User::find_by_username(db, username).await? else {
        return Ok(None);
    };
    if verify_password(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// POST /auth/token — exchange a username/password form for an access token.
#[instrument(skip(state, form))]
pub async fn login_for_token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Some(user) = authenticate(&state.db, &form.username, &form.password).await? else {
        warn!(username = %form.username, "failed login");
        return Err(ApiError::Unauthorized("Could not validate user".into()));
    };

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&user.username, user.id)?;

    info!(user_id = user.id, username = %user.username, "access token issued");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".into(),
    }))
}

/// GET / — return the authenticated caller's claims.
#[instrument(skip_all)]
pub async fn current_user(AuthUser(claims): AuthUser) -> Json<IdentityResponse> {
    Json(IdentityResponse {
        username: claims.sub,
        id: claims.id,
    })
}
