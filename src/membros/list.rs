use std::sync::Arc;

use super::model::membro::Membro;
use super::MembroService;

pub const LOAD_ERROR_MESSAGE: &str = "Erro ao carregar membros";

/// Contiguous window `[page * rows_per_page, page * rows_per_page +
/// rows_per_page)` clamped to the slice. Out-of-range pages are empty.
pub fn paginate<T>(rows: &[T], page: usize, rows_per_page: usize) -> &[T] {
  let start = page.saturating_mul(rows_per_page).min(rows.len());
  let end = start.saturating_add(rows_per_page).min(rows.len());
  &rows[start..end]
}

pub struct MembroList {
  service: Arc<dyn MembroService>,
  membros: Vec<Membro>,
  is_loading: bool,
  error: Option<String>,
  page: usize,
  rows_per_page: usize,
}

impl MembroList {
  pub fn new(service: Arc<dyn MembroService>, rows_per_page: usize) -> Self {
    Self {
      service,
      membros: Vec::new(),
      is_loading: true,
      error: None,
      page: 0,
      rows_per_page,
    }
  }

  /// Fetches the full member set and replaces whatever was held before. On
  /// failure the previous set stays and `error` is set.
  pub async fn load(&mut self) {
    self.is_loading = true;
    match self.service.list().await {
      Ok(rto) => {
        self.membros = rto.membros;
        self.error = None;
      }
      Err(_) => {
        self.error = Some(LOAD_ERROR_MESSAGE.to_string());
      }
    }
    self.is_loading = false;
  }

  pub async fn reload(&mut self) {
    tracing::debug!("reloading membros");
    self.load().await
  }

  pub fn rows(&self) -> &[Membro] {
    paginate(&self.membros, self.page, self.rows_per_page)
  }

  pub fn set_page(&mut self, page: usize) {
    self.page = page;
  }

  pub fn page(&self) -> usize {
    self.page
  }

  pub fn rows_per_page(&self) -> usize {
    self.rows_per_page
  }

  pub fn total(&self) -> usize {
    self.membros.len()
  }

  pub fn is_loading(&self) -> bool {
    self.is_loading
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }
}
