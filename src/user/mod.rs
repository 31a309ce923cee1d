use serde_json::Value;

use crate::shared::api_client::ApiClient;
use crate::shared::error::RequestError;
use crate::shared::session::SessionContext;

pub struct UserService {
  client: ApiClient,
}

impl UserService {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }

  pub async fn profile(&self, token: &str) -> Result<Value, RequestError> {
    self.client.get("buscar usuário", "/user", Some(token)).await
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
  Unknown,
  Authenticated,
  Unauthenticated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserSessionState {
  pub user: Option<Value>,
  pub is_loading: bool,
  pub error: Option<String>,
}

impl UserSessionState {
  pub fn status(&self) -> AuthStatus {
    match (self.is_loading, &self.user) {
      (true, _) => AuthStatus::Unknown,
      (false, Some(_)) => AuthStatus::Authenticated,
      (false, None) => AuthStatus::Unauthenticated,
    }
  }
}

/// Who is signed in, as far as the API is concerned. Starts out loading until
/// the first `check_session`.
pub struct UserSession {
  state: UserSessionState,
}

impl Default for UserSession {
  fn default() -> Self {
    Self::new()
  }
}

impl UserSession {
  pub fn new() -> Self {
    Self {
      state: UserSessionState {
        user: None,
        is_loading: true,
        error: None,
      },
    }
  }

  pub fn state(&self) -> &UserSessionState {
    &self.state
  }

  pub async fn check_session(
    &mut self,
    session: &SessionContext,
    users: &UserService,
  ) -> &UserSessionState {
    self.state.is_loading = true;

    let Some(token) = session.token() else {
      self.state = UserSessionState {
        user: None,
        is_loading: false,
        error: None,
      };
      return &self.state;
    };

    self.state = match users.profile(&token).await {
      Ok(user) => UserSessionState {
        user: Some(user),
        is_loading: false,
        error: None,
      },
      Err(_) => UserSessionState {
        user: None,
        is_loading: false,
        error: Some(String::from("Erro ao buscar usuário")),
      },
    };
    &self.state
  }
}

#[cfg(test)]
mod tests {
  use actix_web::{web, HttpRequest, HttpResponse};
  use serde_json::json;

  use super::*;
  use crate::helpers::tests::spawn_api;
  use crate::shared::session::TokenScope;

  const VALID_TOKEN: &str = "valid-token";

  async fn profile_api() -> String {
    spawn_api(|config| {
      config.route(
        "/api/user",
        web::get().to(|request: HttpRequest| async move {
          let authorized = request
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            == Some("Bearer valid-token");
          if authorized {
            HttpResponse::Ok().json(json!({ "id": 1, "username": "ana" }))
          } else {
            HttpResponse::Unauthorized().finish()
          }
        }),
      );
    })
    .await
  }

  #[test]
  fn test_initial_state_is_unknown() {
    let hook = UserSession::new();
    assert_eq!(hook.state().status(), AuthStatus::Unknown);
  }

  #[actix_web::test]
  async fn test_no_token_skips_network() {
    // Port 9 refuses connections; any request would surface as an error.
    let users = UserService::new(ApiClient::new("http://127.0.0.1:9/api"));
    let session = SessionContext::in_memory();
    let mut hook = UserSession::new();

    let state = hook.check_session(&session, &users).await;

    assert!(!state.is_loading);
    assert_eq!(state.user, None);
    assert_eq!(state.error, None);
    assert_eq!(state.status(), AuthStatus::Unauthenticated);
  }

  #[actix_web::test]
  async fn test_valid_token_loads_user() {
    let users = UserService::new(ApiClient::new(profile_api().await));
    let session = SessionContext::in_memory();
    session.store_token(TokenScope::Local, VALID_TOKEN).unwrap();
    let mut hook = UserSession::new();

    let state = hook.check_session(&session, &users).await;

    assert_eq!(state.user, Some(json!({ "id": 1, "username": "ana" })));
    assert_eq!(state.error, None);
    assert_eq!(state.status(), AuthStatus::Authenticated);
  }

  #[actix_web::test]
  async fn test_expired_token_sets_error() {
    let users = UserService::new(ApiClient::new(profile_api().await));
    let session = SessionContext::in_memory();
    session.store_token(TokenScope::Session, "expired").unwrap();
    let mut hook = UserSession::new();

    let state = hook.check_session(&session, &users).await;

    assert!(!state.is_loading);
    assert_eq!(state.user, None);
    assert!(state.error.is_some());
    assert_eq!(state.status(), AuthStatus::Unauthenticated);
  }

  #[actix_web::test]
  async fn test_recheck_after_logout() {
    let users = UserService::new(ApiClient::new(profile_api().await));
    let session = SessionContext::in_memory();
    session.store_token(TokenScope::Local, VALID_TOKEN).unwrap();
    let mut hook = UserSession::new();
    hook.check_session(&session, &users).await;
    assert_eq!(hook.state().status(), AuthStatus::Authenticated);

    session.clear().unwrap();
    hook.check_session(&session, &users).await;

    assert_eq!(hook.state().status(), AuthStatus::Unauthenticated);
    assert_eq!(hook.state().error, None);
  }
}
