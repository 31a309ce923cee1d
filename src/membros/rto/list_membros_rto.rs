use serde::{Deserialize, Serialize};

use crate::membros::model::membro::Membro;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListMembrosRto {
  pub membros: Vec<Membro>,
}
