//! The "new member" dialog as an explicit state machine.
//!
//! ```text
//! Closed --open--> Idle --submit--> Validating --ok--> Submitting
//!                   ^                   |                 |    |
//!                   +----field errors---+                 |    |
//!                   +-------------submission error--------+    |
//!                                        SuccessDisplay <------+
//!                                              |
//!                                  (close_delay elapses)
//!                                              v
//!                                           Closed
//! ```
//!
//! The host hears about outcomes through a [`FormEvent`] channel:
//! `MembroAdded` is sent before `submit` returns, `Closed` once the dialog
//! shuts. The delayed close runs on the actix local executor and is aborted
//! when the form is cancelled or dropped.

use std::{
  cell::RefCell,
  collections::BTreeMap,
  rc::Rc,
  sync::Arc,
  time::Duration,
};

use actix_web::rt::{spawn, task::JoinHandle, time::sleep};

use super::dto::create_membro_dto::{CreateMembroDto, MembroFormValues};
use super::model::membro::Membro;
use super::MembroService;
use crate::shared::error::DashboardError;
use crate::shared::rto::created_rto::CreatedRto;

pub const SUCCESS_MESSAGE: &str = "Membro cadastrado com sucesso!";
pub const SUBMISSION_ERROR_MESSAGE: &str =
  "Erro ao cadastrar membro. Verifique os dados e tente novamente.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
  Idle,
  Validating,
  Submitting,
  SuccessDisplay,
  #[default]
  Closed,
}

impl FormState {
  fn name(&self) -> &'static str {
    match self {
      FormState::Idle => "idle",
      FormState::Validating => "validating",
      FormState::Submitting => "submitting",
      FormState::SuccessDisplay => "showing success",
      FormState::Closed => "closed",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
  MembroAdded { id: i64 },
  Closed,
}

#[derive(Debug, Default)]
struct FormInner {
  state: FormState,
  values: MembroFormValues,
  field_errors: BTreeMap<String, String>,
  submission_error: Option<String>,
  success_message: Option<String>,
  // Bumped on every submit and cancel; a create result only lands if its
  // attempt is still the current one.
  attempt: u64,
}

pub struct CreateMembroForm {
  inner: Rc<RefCell<FormInner>>,
  service: Arc<dyn MembroService>,
  events: flume::Sender<FormEvent>,
  close_delay: Duration,
  close_task: RefCell<Option<JoinHandle<()>>>,
}

impl CreateMembroForm {
  pub fn new(
    service: Arc<dyn MembroService>,
    close_delay: Duration,
    events: flume::Sender<FormEvent>,
  ) -> Self {
    Self {
      inner: Rc::new(RefCell::new(FormInner::default())),
      service,
      events,
      close_delay,
      close_task: RefCell::new(None),
    }
  }

  pub fn state(&self) -> FormState {
    self.inner.borrow().state
  }

  pub fn values(&self) -> MembroFormValues {
    self.inner.borrow().values.clone()
  }

  pub fn field_errors(&self) -> BTreeMap<String, String> {
    self.inner.borrow().field_errors.clone()
  }

  pub fn field_error(&self, field: &str) -> Option<String> {
    self.inner.borrow().field_errors.get(field).cloned()
  }

  pub fn submission_error(&self) -> Option<String> {
    self.inner.borrow().submission_error.clone()
  }

  pub fn success_message(&self) -> Option<String> {
    self.inner.borrow().success_message.clone()
  }

  /// Shows the dialog. Values typed before a cancel are kept.
  pub fn open(&self) {
    let mut inner = self.inner.borrow_mut();
    if inner.state == FormState::Closed {
      inner.state = FormState::Idle;
      inner.field_errors.clear();
      inner.submission_error = None;
      inner.success_message = None;
    }
  }

  pub fn update_values(
    &self,
    edit: impl FnOnce(&mut MembroFormValues),
  ) -> Result<(), DashboardError> {
    let mut inner = self.inner.borrow_mut();
    if inner.state != FormState::Idle {
      return Err(DashboardError::InvalidState(inner.state.name()));
    }
    edit(&mut inner.values);
    Ok(())
  }

  pub async fn submit(&self) -> Result<CreatedRto, DashboardError> {
    let (membro, attempt) = self.validate()?;

    let result = self.service.create(membro).await;
    let still_open = {
      let inner = self.inner.borrow();
      inner.attempt == attempt && inner.state == FormState::Submitting
    };

    match result {
      Ok(created) => {
        {
          let mut inner = self.inner.borrow_mut();
          if still_open {
            inner.values = MembroFormValues::default();
            inner.state = FormState::SuccessDisplay;
            inner.success_message = Some(if created.message.trim().is_empty() {
              SUCCESS_MESSAGE.to_string()
            } else {
              created.message.clone()
            });
          }
        }
        tracing::info!(id = created.id, "membro cadastrado");
        self.emit(FormEvent::MembroAdded { id: created.id });
        if still_open {
          self.schedule_close();
        }
        Ok(created)
      }
      Err(error) => {
        if still_open {
          let mut inner = self.inner.borrow_mut();
          inner.state = FormState::Idle;
          inner.submission_error = Some(SUBMISSION_ERROR_MESSAGE.to_string());
        }
        Err(error.into())
      }
    }
  }

  // Idle -> Validating -> {Idle | Submitting}, all without leaving the borrow.
  fn validate(&self) -> Result<(Membro, u64), DashboardError> {
    let mut inner = self.inner.borrow_mut();
    if inner.state != FormState::Idle {
      return Err(DashboardError::InvalidState(inner.state.name()));
    }
    inner.attempt += 1;
    inner.state = FormState::Validating;
    inner.field_errors.clear();
    inner.submission_error = None;

    match CreateMembroDto::parse(&inner.values) {
      Ok(dto) => {
        inner.state = FormState::Submitting;
        Ok((Membro::from(dto), inner.attempt))
      }
      Err(errors) => {
        inner.field_errors = errors
          .iter()
          .map(|error| (error.field.clone(), error.message.clone()))
          .collect();
        inner.state = FormState::Idle;
        Err(DashboardError::Validation(errors))
      }
    }
  }

  fn schedule_close(&self) {
    let inner = Rc::downgrade(&self.inner);
    let events = self.events.clone();
    let delay = self.close_delay;
    let task = spawn(async move {
      sleep(delay).await;
      if let Some(inner) = inner.upgrade() {
        close_after_success(&inner, &events);
      }
    });
    if let Some(previous) = self.close_task.replace(Some(task)) {
      previous.abort();
    }
  }

  /// SuccessDisplay -> Closed. Normally driven by the delayed task; returns
  /// false when the form was not showing a success notice.
  pub fn finish_success_display(&self) -> bool {
    self.abort_close_task();
    close_after_success(&self.inner, &self.events)
  }

  /// Closes the dialog without submitting.
  pub fn cancel(&self) {
    self.abort_close_task();
    {
      let mut inner = self.inner.borrow_mut();
      if inner.state == FormState::Closed {
        return;
      }
      inner.attempt += 1;
      inner.state = FormState::Closed;
      inner.field_errors.clear();
      inner.submission_error = None;
      inner.success_message = None;
    }
    self.emit(FormEvent::Closed);
  }

  /// Stops the pending close, if any. Called on drop.
  pub fn teardown(&self) {
    self.abort_close_task();
  }

  fn abort_close_task(&self) {
    if let Some(task) = self.close_task.borrow_mut().take() {
      task.abort();
    }
  }

  fn emit(&self, event: FormEvent) {
    send_event(&self.events, event);
  }
}

impl Drop for CreateMembroForm {
  fn drop(&mut self) {
    self.teardown();
  }
}

fn close_after_success(
  inner: &RefCell<FormInner>,
  events: &flume::Sender<FormEvent>,
) -> bool {
  {
    let mut inner = inner.borrow_mut();
    if inner.state != FormState::SuccessDisplay {
      return false;
    }
    inner.state = FormState::Closed;
    inner.success_message = None;
  }
  send_event(events, FormEvent::Closed);
  true
}

fn send_event(events: &flume::Sender<FormEvent>, event: FormEvent) {
  if events.send(event).is_err() {
    tracing::debug!("form event dropped, nobody is listening");
  }
}
