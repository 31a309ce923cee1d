use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedRto {
  #[serde(rename = "mensagem", default)]
  pub message: String,
  pub id: i64,
}
