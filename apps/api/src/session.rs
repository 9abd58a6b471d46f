//! The application state machine: Idle → Generating → Success | Error → Idle.
//!
//! All mutation goes through named transition events so the transition matrix
//! can be unit-tested without any HTTP or rendering layer attached. The shared
//! handle is a plain mutex; the lock is never held across an await point.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use thiserror::Error;

use crate::models::{AppStatus, OptimizationResult};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A generation is already in progress")]
    AlreadyGenerating,

    #[error("Cannot start generating from the {0:?} state; reset first")]
    NotIdle(AppStatus),

    #[error("No generation in progress to settle")]
    NotGenerating,
}

/// The single unit of shared application state: current status plus the
/// result or error belonging to it. At most one of `result`/`error` is set,
/// and only in the matching status.
#[derive(Debug, Default, Serialize)]
pub struct Session {
    pub status: AppStatus,
    pub result: Option<OptimizationResult>,
    pub error: Option<String>,
}

impl Session {
    /// Submit event: only valid from Idle. Re-submission while a generation
    /// is in flight (or before an explicit reset) is rejected.
    pub fn begin(&mut self) -> Result<(), TransitionError> {
        match self.status {
            AppStatus::Idle => {
                self.status = AppStatus::Generating;
                Ok(())
            }
            AppStatus::Generating => Err(TransitionError::AlreadyGenerating),
            other => Err(TransitionError::NotIdle(other)),
        }
    }

    /// Success event: the pending call settled with a result.
    pub fn succeed(&mut self, result: OptimizationResult) -> Result<(), TransitionError> {
        if self.status != AppStatus::Generating {
            return Err(TransitionError::NotGenerating);
        }
        self.status = AppStatus::Success;
        self.result = Some(result);
        self.error = None;
        Ok(())
    }

    /// Failure event: the pending call settled with an error.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), TransitionError> {
        if self.status != AppStatus::Generating {
            return Err(TransitionError::NotGenerating);
        }
        self.status = AppStatus::Error;
        self.error = Some(message.into());
        self.result = None;
        Ok(())
    }

    /// Explicit reset from Success or Error back to Idle, discarding the
    /// stored result and error. Resetting an already-Idle session is a no-op;
    /// a generation in flight cannot be cancelled.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        if self.status == AppStatus::Generating {
            return Err(TransitionError::AlreadyGenerating);
        }
        self.status = AppStatus::Idle;
        self.result = None;
        self.error = None;
        Ok(())
    }
}

pub type SharedSession = Arc<Mutex<Session>>;

pub fn new_shared_session() -> SharedSession {
    Arc::new(Mutex::new(Session::default()))
}
