use dto::login_dto::LoginDto;
use rto::login_rto::LoginRto;
use validator::Validate;

use crate::shared::api_client::ApiClient;
use crate::shared::error::DashboardError;
use crate::shared::session::{SessionContext, TokenScope};

pub mod dto;
pub mod rto;

pub struct AuthService {
  client: ApiClient,
}

impl AuthService {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }

  /// Exchanges credentials for a bearer token and keeps it in the long-lived
  /// scope of `session`.
  pub async fn login(
    &self,
    session: &SessionContext,
    dto: LoginDto,
  ) -> Result<LoginRto, DashboardError> {
    // Perform validation
    dto.validate()?;

    let rto: LoginRto = self.client.post("login", "/login", &dto).await?;
    session.store_token(TokenScope::Local, &rto.token)?;
    tracing::info!(username = %dto.username, "login succeeded");
    Ok(rto)
  }

  pub fn logout(&self, session: &SessionContext) -> Result<(), DashboardError> {
    session.clear().inspect_err(|error| {
      tracing::error!(%error, "Erro ao fazer logout");
    })?;
    Ok(())
  }
}
