use serde::Deserialize;
use std::sync::Arc;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, SessionStatusDto, SessionTokenDto};
use crate::features::auth::models::{Role, Session};
use crate::features::auth::services::SessionTokenService;
use crate::modules::sheet::{actions, SheetClient, SheetClientExt};
use crate::shared::cells::deserialize_text;

/// Sheets hands back numeric-looking passwords as numbers
#[derive(Debug, Default, Deserialize)]
struct RemotePassword {
    #[serde(default, deserialize_with = "deserialize_text")]
    password: String,
}

/// Checks role passwords and turns sessions into tokens
pub struct AuthService {
    sheet: Arc<dyn SheetClient>,
    tokens: Arc<SessionTokenService>,
    admin_password: String,
    mart_owner_password: String,
    management_password_fallback: Option<String>,
}

impl AuthService {
    pub fn new(
        sheet: Arc<dyn SheetClient>,
        tokens: Arc<SessionTokenService>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            sheet,
            tokens,
            admin_password: config.admin_password.clone(),
            mart_owner_password: config.mart_owner_password.clone(),
            management_password_fallback: config.management_password_fallback.clone(),
        }
    }

    /// Adds `dto.role` to the caller's current session, if any.
    pub async fn login(
        &self,
        dto: LoginRequestDto,
        current: Option<Session>,
    ) -> Result<SessionTokenDto> {
        let expected = match dto.role {
            Role::Admin => self.admin_password.clone(),
            Role::MartOwner => self.mart_owner_password.clone(),
            Role::Management => self.management_password().await?,
        };

        if expected.is_empty() || dto.password != expected {
            tracing::info!("Rejected {} login", dto.role.as_str());
            return Err(AppError::Unauthorized(format!(
                "Invalid {} password.",
                dto.role.label()
            )));
        }

        let mut session = current.unwrap_or_default();
        session.grant(dto.role);
        tracing::info!("{} logged in", dto.role.as_str());

        self.token_for(&session)
    }

    pub fn logout(&self, role: Role, current: Option<Session>) -> Result<SessionTokenDto> {
        let mut session = current.unwrap_or_default();
        session.revoke(role);
        tracing::info!("{} logged out", role.as_str());

        self.token_for(&session)
    }

    pub fn status(&self, current: Option<&Session>) -> SessionStatusDto {
        current
            .map(SessionStatusDto::from)
            .unwrap_or_else(|| SessionStatusDto::from(&Session::default()))
    }

    /// The management password stored remotely, or the configured fallback
    /// when none has been set (or the store cannot be reached).
    async fn management_password(&self) -> Result<String> {
        let remote = self
            .sheet
            .fetch_as::<RemotePassword>(actions::GET_MANAGEMENT_PASSWORD, &[])
            .await;

        match remote {
            Ok(RemotePassword { password }) if !password.is_empty() => Ok(password),
            Ok(_) => Ok(self.management_password_fallback.clone().unwrap_or_default()),
            Err(e) => match &self.management_password_fallback {
                Some(fallback) => {
                    tracing::warn!("Using fallback management password: {}", e);
                    Ok(fallback.clone())
                }
                None => Err(e.into()),
            },
        }
    }

    /// A session with no roles left still gets a (flag-less) token.
    fn token_for(&self, session: &Session) -> Result<SessionTokenDto> {
        let issued = self.tokens.issue(session)?;
        Ok(SessionTokenDto {
            token: issued.token,
            expires_at: issued.expires_at,
            session: SessionStatusDto::from(session),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::MockSheetClient;
    use serde_json::json;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    fn config(fallback: Option<&str>) -> SessionConfig {
        SessionConfig {
            secret: "test-secret".to_string(),
            ttl: Duration::from_secs(3600),
            admin_password: "admin-pass".to_string(),
            mart_owner_password: "mart-pass".to_string(),
            management_password_fallback: fallback.map(str::to_string),
        }
    }

    fn service(sheet: MockSheetClient, fallback: Option<&str>) -> AuthService {
        let config = config(fallback);
        let tokens = Arc::new(SessionTokenService::new(&config));
        AuthService::new(Arc::new(sheet), tokens, &config)
    }

    fn login(role: Role, password: &str) -> LoginRequestDto {
        LoginRequestDto {
            role,
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_admin_login() {
        let auth = service(MockSheetClient::new(), None);

        let ok = assert_ok!(auth.login(login(Role::Admin, "admin-pass"), None).await);
        assert!(!ok.token.is_empty());
        assert!(ok.session.is_admin_logged_in);
        assert!(!ok.session.is_management_logged_in);

        let err = assert_err!(auth.login(login(Role::Admin, "nope"), None).await);
        assert_eq!(err.to_string(), "Unauthorized: Invalid admin password.");
    }

    #[tokio::test]
    async fn test_management_uses_remote_password() {
        let sheet = MockSheetClient::new().respond(
            actions::GET_MANAGEMENT_PASSWORD,
            json!({ "Password": "from-sheet" }),
        );
        let auth = service(sheet, Some("fallback"));

        assert_ok!(auth.login(login(Role::Management, "from-sheet"), None).await);
        let err = assert_err!(auth.login(login(Role::Management, "fallback"), None).await);
        assert_eq!(err.to_string(), "Unauthorized: Invalid management password.");
    }

    #[tokio::test]
    async fn test_management_falls_back_when_unset() {
        let sheet =
            MockSheetClient::new().respond(actions::GET_MANAGEMENT_PASSWORD, json!({ "password": "" }));
        let auth = service(sheet, Some("fallback"));

        assert_ok!(auth.login(login(Role::Management, "fallback"), None).await);
    }

    #[tokio::test]
    async fn test_management_without_any_password_rejects() {
        let sheet =
            MockSheetClient::new().respond(actions::GET_MANAGEMENT_PASSWORD, json!({}));
        let auth = service(sheet, None);

        assert_err!(auth.login(login(Role::Management, ""), None).await);
    }

    #[tokio::test]
    async fn test_login_accumulates_roles_and_logout_drops_them() {
        let auth = service(MockSheetClient::new(), None);

        let current = Session::new(vec![Role::Admin]);
        let both = auth
            .login(login(Role::MartOwner, "mart-pass"), Some(current.clone()))
            .await
            .unwrap();
        assert!(both.session.is_admin_logged_in);
        assert!(both.session.is_mart_owner_logged_in);

        let out = auth.logout(Role::Admin, Some(current)).unwrap();
        assert!(!out.session.is_admin_logged_in);

        let left = auth.tokens.validate(&out.token).unwrap();
        assert!(left.roles.is_empty());
    }

    #[tokio::test]
    async fn test_management_password_stored_as_number() {
        let sheet = MockSheetClient::new()
            .respond(actions::GET_MANAGEMENT_PASSWORD, json!({ "Password": 4321 }));
        let auth = service(sheet, Some("fallback"));

        let ok = assert_ok!(auth.login(login(Role::Management, "4321"), None).await);
        assert!(ok.session.is_management_logged_in);
        assert_err!(auth.login(login(Role::Management, "fallback"), None).await);
    }

    #[test]
    fn test_status_without_session() {
        let auth = service(MockSheetClient::new(), None);
        let status = auth.status(None);
        assert!(!status.is_admin_logged_in);
        assert!(!status.is_management_logged_in);
        assert!(!status.is_mart_owner_logged_in);
    }
}
