use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shared::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountMembrosRto {
  #[serde(rename = "total_membros")]
  pub total_records: u64,
  /// Keyed by the role label the server reports.
  #[serde(rename = "cargos", default)]
  pub role_breakdown: BTreeMap<String, u64>,
}

impl CountMembrosRto {
  pub fn count_for(&self, role: Role) -> u64 {
    self.role_breakdown.get(role.label()).copied().unwrap_or(0)
  }
}
