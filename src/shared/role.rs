use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub enum Role {
  #[serde(rename = "Pastor")]
  Pastor,
  #[serde(rename = "Supervisor")]
  Supervisor,
  #[serde(rename = "Líder")]
  Leader,
  #[serde(rename = "Membro")]
  Member,
}

impl Role {
  pub const ALL: [Role; 4] =
    [Role::Pastor, Role::Supervisor, Role::Leader, Role::Member];

  /// Label used on the wire and in the role picker.
  pub fn label(&self) -> &'static str {
    match self {
      Role::Pastor => "Pastor",
      Role::Supervisor => "Supervisor",
      Role::Leader => "Líder",
      Role::Member => "Membro",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.label())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
  type Err = UnknownRole;

  // Accepts the wire label as well as the English variant name, in any case.
  fn from_str(value: &str) -> Result<Self, Self::Err> {
    let value = value.trim();
    let wanted = value.to_lowercase();
    Role::ALL
      .into_iter()
      .find(|role| {
        role.label().to_lowercase() == wanted
          || format!("{:?}", role).to_lowercase() == wanted
      })
      .ok_or_else(|| UnknownRole(value.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_role_wire_labels() {
    assert_eq!(serde_json::to_string(&Role::Leader).unwrap(), "\"Líder\"");
    assert_eq!(serde_json::to_string(&Role::Member).unwrap(), "\"Membro\"");
    let role: Role = serde_json::from_str("\"Supervisor\"").unwrap();
    assert_eq!(role, Role::Supervisor);
  }

  #[test]
  fn test_role_from_str() {
    assert_eq!("Membro".parse::<Role>(), Ok(Role::Member));
    assert_eq!("member".parse::<Role>(), Ok(Role::Member));
    assert_eq!("Líder".parse::<Role>(), Ok(Role::Leader));
    assert_eq!("LÍDER".parse::<Role>(), Ok(Role::Leader));
    assert_eq!("líder".parse::<Role>(), Ok(Role::Leader));
    assert_eq!(" pastor ".parse::<Role>(), Ok(Role::Pastor));
    assert_eq!(
      "Bispo".parse::<Role>(),
      Err(UnknownRole(String::from("Bispo")))
    );
  }
}
