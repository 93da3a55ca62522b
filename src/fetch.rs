//! Per-view request state.
//!
//! A view owns one [`ViewTask`] per independent request. The task publishes a
//! [`Loadable`] and is aborted when the view drops it, so a response that
//! arrives after the view is gone is discarded instead of applied.

use std::fmt::Display;
use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Loadable<T> {
    /// All failure kinds collapse into one user-facing message; the cause
    /// only goes to the log.
    pub fn from_result<E: Display>(result: Result<T, E>, what: &str) -> Self {
        match result {
            Ok(data) => Self::Ready(data),
            Err(err) => {
                tracing::warn!(view = what, error = %err, "load failed");
                Self::Failed(failure_message(what))
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Self::Loading => Loadable::Loading,
            Self::Ready(data) => Loadable::Ready(f(data)),
            Self::Failed(message) => Loadable::Failed(message),
        }
    }
}

pub fn failure_message(what: &str) -> String {
    format!("Failed to load {what}")
}

pub struct ViewTask<T> {
    what: &'static str,
    state: watch::Receiver<Loadable<T>>,
    handle: JoinHandle<()>,
}

impl<T> ViewTask<T>
where
    T: Send + Sync + 'static,
{
    pub fn spawn<F, E>(what: &'static str, request: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let (tx, state) = watch::channel(Loadable::Loading);
        let handle = tokio::spawn(async move {
            let result = request.await;
            if tx.send(Loadable::from_result(result, what)).is_err() {
                tracing::debug!(view = what, "view closed before response arrived");
            }
        });

        Self { what, state, handle }
    }

    pub fn name(&self) -> &'static str {
        self.what
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Waits for the request to finish. A task that ended without reporting
    /// (aborted or panicked) reads as a failure.
    pub async fn settled(&mut self) -> Loadable<T>
    where
        T: Clone,
    {
        match self.state.wait_for(|state| !state.is_loading()).await {
            Ok(state) => (*state).clone(),
            Err(_) => Loadable::Failed(failure_message(self.what)),
        }
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl<T> Drop for ViewTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
