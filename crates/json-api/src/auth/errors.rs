//! Auth Errors

use salvo::http::StatusError;

use storefront_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid session token"),
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::AlreadyExists => {
            StatusError::conflict().brief("An account with this email already exists")
        }
        AuthServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Name, email and password are required")
        }
    }
}
