//! Authentication and user management

use super::client::ApiClient;
use crate::sdk::errors::{Result, SDKError};
use crate::sdk::types::{InitAdminResponse, LoginRequest, NewUser, TokenResponse, User};
use reqwest::Method;
use tracing::{debug, info, warn};

impl ApiClient {
    /// Log in and keep the returned token in the session
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(SDKError::Validation(
                "Ingrese correo y contraseña".to_string(),
            ));
        }

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: TokenResponse = self.post_json(&["auth", "login"], &request).await?;
        self.session.set_token(response.access_token)?;

        info!("Logged in as {} ({:?})", response.user.email, response.user.role);
        Ok(response.user)
    }

    /// Forget the session token, in memory and on disk
    pub fn logout(&self) {
        self.session.clear_token();
        info!("Logged out");
    }

    /// Currently authenticated user
    pub async fn me(&self) -> Result<User> {
        self.get_json(&["auth", "me"]).await
    }

    /// Resume a persisted session.
    ///
    /// Returns `None` when no token was stored or the stored one was
    /// rejected; a rejected token is cleared.
    pub async fn bootstrap(&self) -> Result<Option<User>> {
        if !self.session.restore()? {
            debug!("No persisted session");
            return Ok(None);
        }

        match self.me().await {
            Ok(user) => {
                info!("Resumed session for {}", user.email);
                Ok(Some(user))
            }
            Err(e) if e.is_auth_error() => {
                warn!("Persisted session rejected, clearing it: {}", e);
                self.session.clear_token();
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Create a user (staff only)
    pub async fn register_user(&self, user: &NewUser) -> Result<User> {
        if user.email.trim().is_empty() || user.name.trim().is_empty() || user.password.is_empty() {
            return Err(SDKError::Validation(
                "Complete nombre, correo y contraseña".to_string(),
            ));
        }
        self.post_json(&["auth", "register"], user).await
    }

    /// Create the default administrator if it does not exist yet
    pub async fn init_admin(&self) -> Result<InitAdminResponse> {
        let url = self.endpoint(&["init", "admin"])?;
        self.send(self.request(Method::POST, url)).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.get_json(&["users"]).await
    }

    /// Enable or disable a user account
    pub async fn set_user_active(&self, user_id: &str, active: bool) -> Result<()> {
        let url = self.endpoint(&["users", user_id, "toggle-status"])?;
        self.execute(
            self.request(Method::PUT, url)
                .json(&serde_json::json!({ "is_active": active })),
        )
        .await?;
        debug!("User {} active={}", user_id, active);
        Ok(())
    }
}
