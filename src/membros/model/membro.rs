use serde::{Deserialize, Serialize};

use crate::shared::role::Role;

/// A member as the API sends and receives it. Absent optional fields are left
/// out of the payload entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membro {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  pub nome: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub telefone: Option<String>,
  pub cargo: Role,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub endereco: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub celula_id: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lider_id: Option<i64>,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_deserialize_with_nulls() {
    let membro: Membro = serde_json::from_value(json!({
      "id": 7,
      "nome": "Carlos Lima",
      "email": null,
      "telefone": "11 99999-0000",
      "cargo": "Líder",
      "celula_id": 2
    }))
    .unwrap();

    assert_eq!(membro.id, Some(7));
    assert_eq!(membro.email, None);
    assert_eq!(membro.cargo, Role::Leader);
    assert_eq!(membro.celula_id, Some(2));
    assert_eq!(membro.lider_id, None);
  }
}
