use serde::Serialize;
use validator_derive::Validate;

#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginDto {
  #[validate(length(min = 1, message = "Usuário obrigatório"))]
  pub username: String,
  #[validate(length(min = 1, message = "Senha obrigatória"))]
  pub password: String,
}
