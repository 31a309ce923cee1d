use validator::Validate as _;
use validator_derive::Validate;

use crate::membros::model::membro::Membro;
use crate::shared::error::{collect_validation_errors, ValidationError};
use crate::shared::role::Role;

/// Numeric id as typed into a form: either free text or an actual number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdInput {
  Text(String),
  Number(i64),
}

impl Default for IdInput {
  fn default() -> Self {
    IdInput::Text(String::new())
  }
}

impl From<&str> for IdInput {
  fn from(value: &str) -> Self {
    IdInput::Text(value.to_string())
  }
}

impl From<String> for IdInput {
  fn from(value: String) -> Self {
    IdInput::Text(value)
  }
}

impl From<i64> for IdInput {
  fn from(value: i64) -> Self {
    IdInput::Number(value)
  }
}

impl IdInput {
  /// Empty text means "not provided"; anything else must be an integer.
  fn normalize(&self, field: &str) -> Result<Option<i64>, ValidationError> {
    match self {
      IdInput::Number(number) => Ok(Some(*number)),
      IdInput::Text(text) if text.trim().is_empty() => Ok(None),
      IdInput::Text(text) => text
        .trim()
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ValidationError::new(field, "O ID deve ser numérico")),
    }
  }
}

/// Raw state of the "new member" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembroFormValues {
  pub nome: String,
  pub email: String,
  pub telefone: String,
  pub cargo: String,
  pub endereco: String,
  pub celula_id: IdInput,
  pub lider_id: IdInput,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateMembroDto {
  #[validate(length(min = 3, message = "O nome deve ter pelo menos 3 caracteres"))]
  pub nome: String,
  #[validate(email(message = "E-mail inválido"))]
  pub email: Option<String>,
  pub telefone: Option<String>,
  #[validate(required(message = "Selecione um cargo"))]
  pub cargo: Option<Role>,
  pub endereco: Option<String>,
  pub celula_id: Option<i64>,
  pub lider_id: Option<i64>,
}

fn optional_text(value: &str) -> Option<String> {
  Some(value.to_string()).filter(|value| !value.trim().is_empty())
}

impl CreateMembroDto {
  /// Normalizes and validates raw form values. All failing fields are
  /// reported together, one message each.
  pub fn parse(
    values: &MembroFormValues,
  ) -> Result<CreateMembroDto, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let cargo = match values.cargo.trim() {
      "" => None,
      label => match label.parse::<Role>() {
        Ok(role) => Some(role),
        Err(_) => {
          errors.push(ValidationError::new("cargo", "Cargo inválido"));
          None
        }
      },
    };
    let celula_id = values
      .celula_id
      .normalize("celula_id")
      .unwrap_or_else(|error| {
        errors.push(error);
        None
      });
    let lider_id = values
      .lider_id
      .normalize("lider_id")
      .unwrap_or_else(|error| {
        errors.push(error);
        None
      });

    let dto = CreateMembroDto {
      nome: values.nome.clone(),
      email: optional_text(&values.email),
      telefone: optional_text(&values.telefone),
      cargo,
      endereco: optional_text(&values.endereco),
      celula_id,
      lider_id,
    };

    if let Err(validation_errors) = dto.validate() {
      for error in collect_validation_errors(&validation_errors) {
        if !errors.iter().any(|known| known.field == error.field) {
          errors.push(error);
        }
      }
    }

    if errors.is_empty() {
      Ok(dto)
    } else {
      errors.sort_by(|a, b| a.field.cmp(&b.field));
      Err(errors)
    }
  }
}

impl From<CreateMembroDto> for Membro {
  fn from(dto: CreateMembroDto) -> Self {
    Self {
      id: None,
      nome: dto.nome,
      email: dto.email,
      telefone: dto.telefone,
      // `parse` only hands out DTOs whose role passed `required`.
      cargo: dto.cargo.unwrap_or(Role::Member),
      endereco: dto.endereco,
      celula_id: dto.celula_id,
      lider_id: dto.lider_id,
    }
  }
}
