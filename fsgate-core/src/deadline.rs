//! Bounded-time execution.
//!
//! An operation wrapped here either settles before the deadline or is
//! abandoned: the future is dropped and its eventual completion (including
//! any blocking work it handed to the runtime) is discarded. Callers get a
//! tagged [`Outcome`] so a timeout can never be mistaken for a value.

use std::future::Future;
use std::time::Duration;

#[derive(Debug)]
pub enum Outcome<T, E> {
    Ok(T),
    Timeout,
    Err(E),
}

impl<T, E> Outcome<T, E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Outcome::Timeout)
    }

    /// Collapses the outcome into a `Result`, producing the timeout error lazily.
    pub fn into_result(self, on_timeout: impl FnOnce() -> E) -> Result<T, E> {
        match self {
            Outcome::Ok(value) => Ok(value),
            Outcome::Timeout => Err(on_timeout()),
            Outcome::Err(err) => Err(err),
        }
    }
}

pub async fn with_deadline<T, E, F>(deadline: Duration, operation: F) -> Outcome<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(Ok(value)) => Outcome::Ok(value),
        Ok(Err(err)) => Outcome::Err(err),
        Err(_) => Outcome::Timeout,
    }
}
