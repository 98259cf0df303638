use crate::{
    auth::Session,
    dto::auth::{LoginRequest, LoginResponse},
    error::{AppError, AppResult},
    state::AppState,
};

pub async fn login(state: &AppState, email: &str, password: &str) -> AppResult<Session> {
    let request = LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    };

    let LoginResponse {
        access_token, role, ..
    } = state.api.login(&request).await?;

    if access_token.is_empty() {
        return Err(AppError::UnexpectedResponse("login response has no token".into()));
    }

    let session = Session::new(access_token, role);
    state.tokens.save(session.clone());
    tracing::info!(role = %role, "logged in");

    Ok(session)
}

pub fn logout(state: &AppState) {
    state.tokens.clear();
    tracing::info!("logged out");
}

pub fn current_session(state: &AppState) -> AppResult<Session> {
    state.tokens.load().ok_or(AppError::Unauthenticated)
}
