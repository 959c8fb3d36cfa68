//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Logout Handler
///
/// Ends the session of the bearer token.
#[endpoint(
    tags("auth"),
    summary = "Log Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Signed out"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let token = depot.bearer_token_or_401()?;

    state
        .app
        .auth
        .logout(&token.0)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
