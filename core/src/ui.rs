// pricetag/src/ui.rs

//! The screen-facing side of the workflow: where to go and what to tell the user.

use crate::model::RecordId;
use std::fmt;

/// Navigation targets the workflows can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  ProductShow(RecordId),
}

impl Route {
  pub fn path(&self) -> String {
    match self {
      Route::ProductShow(id) => format!("/products/show/{id}"),
    }
  }
}

impl fmt::Display for Route {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.path())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
  Info,
  Warning,
}

/// A message shown to the user, e.g. in a snackbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub level: NoticeLevel,
  pub message: String,
}

impl Notice {
  pub fn info(message: impl Into<String>) -> Self {
    Self {
      level: NoticeLevel::Info,
      message: message.into(),
    }
  }

  pub fn warning(message: impl Into<String>) -> Self {
    Self {
      level: NoticeLevel::Warning,
      message: message.into(),
    }
  }
}

pub trait Navigator: Send + Sync {
  fn navigate(&self, route: Route);
}

pub trait Notifier: Send + Sync {
  fn notify(&self, notice: Notice);
}
