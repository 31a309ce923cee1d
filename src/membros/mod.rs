pub mod dto;
pub mod form;
pub mod list;
pub mod model;
pub mod rto;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use model::membro::Membro;
use rto::count_membros_rto::CountMembrosRto;
use rto::list_membros_rto::ListMembrosRto;

use crate::shared::api_client::ApiClient;
use crate::shared::error::RequestError;
use crate::shared::rto::created_rto::CreatedRto;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MembroService: Send + Sync {
  async fn list(&self) -> Result<ListMembrosRto, RequestError>;
  async fn create(&self, membro: Membro) -> Result<CreatedRto, RequestError>;
  async fn count(&self) -> Result<CountMembrosRto, RequestError>;
}

pub struct HttpMembroService {
  client: ApiClient,
}

impl HttpMembroService {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl MembroService for HttpMembroService {
  async fn list(&self) -> Result<ListMembrosRto, RequestError> {
    self.client.get("listar membros", "/membros", None).await
  }

  async fn create(&self, membro: Membro) -> Result<CreatedRto, RequestError> {
    self.client.post("criar membro", "/membros", &membro).await
  }

  async fn count(&self) -> Result<CountMembrosRto, RequestError> {
    self
      .client
      .get("contar membros", "/membros/contagem", None)
      .await
  }
}
