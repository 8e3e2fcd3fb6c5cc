//! Sign-in and sign-out.

use pidgen_core::models::auth::{LoginRequest, UserInfo};
use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::routes;
use crate::session::Session;

impl ApiClient {
    /// `POST /Auth/login`. On success the session is stored and every later
    /// request carries its bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Invalid(
                "Username and password are required".to_string(),
            ));
        }

        let body = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let info: UserInfo = self.send_json(Method::POST, routes::LOGIN, &body).await?;
        let session = Session::new(info);
        self.set_session(Some(session.clone()))?;

        tracing::info!(
            username = session.username().unwrap_or(&body.username),
            role = %session.role(),
            "Signed in"
        );
        Ok(session)
    }

    /// Forget the session locally. There is no server-side logout endpoint.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.set_session(None)?;
        tracing::info!("Signed out");
        Ok(())
    }
}
