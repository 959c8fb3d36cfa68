//! Auth middleware.
//!
//! Requests without an `Authorization` header act as the guest identity. A
//! header that is malformed or carries an unknown token is rejected.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::debug;

use storefront_app::auth::Identity;

use crate::{
    auth::errors::into_status_error,
    extensions::*,
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let token = match extract_bearer_token(req) {
        Ok(None) => {
            depot.insert_identity(Identity::Guest, None);
            ctrl.call_next(req, depot, res).await;

            return;
        }
        Ok(Some(token)) => token.to_string(),
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let user = match state.app.auth.authenticate_bearer(&token).await {
        Ok(user) => user,
        Err(error) => {
            debug!("rejected bearer token: {error}");

            res.render(into_status_error(error));

            return;
        }
    };

    depot.insert_identity(Identity::from(&user), Some(BearerToken(token)));

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Result<Option<&str>, StatusError> {
    let Some(value) = req.headers().get(AUTHORIZATION) else {
        return Ok(None);
    };

    let invalid = || StatusError::unauthorized().brief("Invalid Authorization header");

    let value = value.to_str().map_err(|_ignored| invalid())?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next().ok_or_else(invalid)?;
    let token = parts.next().ok_or_else(invalid)?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(invalid());
    }

    Ok(Some(token))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::auth::AuthServiceError;

    use crate::test_helpers::{Mocks, TEST_TOKEN, expect_session};

    use super::*;

    #[salvo::handler]
    async fn echo_identity(depot: &mut Depot, res: &mut Response) {
        let identity = depot.identity_or_500().ok().map_or_else(
            || "missing".to_string(),
            |identity| match identity {
                Identity::Guest => "guest".to_string(),
                Identity::User(id) => id.to_string(),
            },
        );

        res.render(identity);
    }

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::new().get(echo_identity))
    }

    #[tokio::test]
    async fn test_missing_authorization_header_is_a_guest() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.auth.expect_authenticate_bearer().never();

        let mut res = TestClient::get("http://example.com")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "guest");

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_token_returns_401() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_injects_the_user_identity() -> TestResult {
        let mut mocks = Mocks::new();

        expect_session(&mut mocks.auth);

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, format!("Bearer {TEST_TOKEN}"), true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "123");

        Ok(())
    }
}
