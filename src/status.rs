//! Status dispatcher for asynchronous work.
//!
//! Wraps a future producing `Result<T, E>` and runs registered handlers as it
//! moves through pending, then resolved or rejected. Independent of the entity
//! store; hosts typically use handlers to apply adapter operations.
//!
//! ## Example
//!
//! ```ignore
//! let todos = StatusReducer::new(fetch_todos())
//!     .add_case(Status::Pending, |_| set_loading(true))
//!     .add_case(Status::Resolved, |payload| {
//!         if let StatusPayload::Resolved(todos) = payload {
//!             adapter.add_many(&mut state.lock().unwrap(), todos.clone());
//!         }
//!     })
//!     .execute()
//!     .await?;
//! ```

use std::future::Future;

use tracing::{debug, trace};

/// Lifecycle phase of the wrapped computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Pending,
    Rejected,
    Resolved,
}

/// What a handler sees when its phase is entered.
#[derive(Debug)]
pub enum StatusPayload<'a, T, E> {
    Pending,
    Resolved(&'a T),
    Rejected(&'a E),
}

impl<T, E> StatusPayload<'_, T, E> {
    pub fn status(&self) -> Status {
        match self {
            StatusPayload::Pending => Status::Pending,
            StatusPayload::Resolved(_) => Status::Resolved,
            StatusPayload::Rejected(_) => Status::Rejected,
        }
    }
}

type Handler<T, E> = Box<dyn Fn(StatusPayload<'_, T, E>) + Send + Sync>;

/// Registers per-phase handlers around a future.
pub struct StatusReducer<F, T, E> {
    future: F,
    pending: Vec<Handler<T, E>>,
    resolved: Vec<Handler<T, E>>,
    rejected: Vec<Handler<T, E>>,
}

impl<F, T, E> StatusReducer<F, T, E>
where
    F: Future<Output = Result<T, E>>,
{
    pub fn new(future: F) -> Self {
        Self {
            future,
            pending: Vec::new(),
            resolved: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Register `handler` for `status`. Handlers of one phase run in
    /// registration order.
    pub fn add_case<H>(mut self, status: Status, handler: H) -> Self
    where
        H: Fn(StatusPayload<'_, T, E>) + Send + Sync + 'static,
    {
        self.handlers_mut(status).push(Box::new(handler));
        self
    }

    /// Run pending handlers, await the future, run the resolved or rejected
    /// handlers, then hand back the future's own result.
    ///
    /// Pending handlers fire on the first poll, not at construction.
    pub async fn execute(self) -> Result<T, E> {
        let StatusReducer {
            future,
            pending,
            resolved,
            rejected,
        } = self;

        debug!(handlers = pending.len(), "status pending");
        for handler in &pending {
            handler(StatusPayload::Pending);
        }

        let result = future.await;

        match &result {
            Ok(value) => {
                debug!(handlers = resolved.len(), "status resolved");
                for handler in &resolved {
                    handler(StatusPayload::Resolved(value));
                }
            }
            Err(error) => {
                debug!(handlers = rejected.len(), "status rejected");
                for handler in &rejected {
                    handler(StatusPayload::Rejected(error));
                }
            }
        }

        trace!("status dispatch finished");
        result
    }

    fn handlers_mut(&mut self, status: Status) -> &mut Vec<Handler<T, E>> {
        match status {
            Status::Pending => &mut self.pending,
            Status::Resolved => &mut self.resolved,
            Status::Rejected => &mut self.rejected,
        }
    }
}

/// Shorthand for [`StatusReducer::new`].
pub fn reducer<F, T, E>(future: F) -> StatusReducer<F, T, E>
where
    F: Future<Output = Result<T, E>>,
{
    StatusReducer::new(future)
}
