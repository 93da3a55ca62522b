//! CLI command implementations

pub mod account;
pub mod community;
pub mod dashboard;
pub mod practice;
pub mod progress;
pub mod render;
pub mod templates;

use std::future::Future;

use structures_client::api::ApiError;
use structures_client::fetch::{Loadable, ViewTask};

/// Waits for a view's request and prints the generic failure line if it
/// did not load.
pub async fn settle<T>(task: &mut ViewTask<T>) -> Option<T>
where
    T: Clone + Send + Sync + 'static,
{
    match task.settled().await {
        Loadable::Ready(data) => Some(data),
        Loadable::Failed(message) => {
            eprintln!("{message}");
            None
        }
        Loadable::Loading => None,
    }
}

/// Single-request view.
pub async fn load<T, F>(what: &'static str, request: F) -> Option<T>
where
    T: Clone + Send + Sync + 'static,
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    let mut task = ViewTask::spawn(what, request);
    settle(&mut task).await
}
