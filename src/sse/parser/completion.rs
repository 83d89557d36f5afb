//! Completion predicate for opportunistic tail decoding.

use std::fmt;
use std::sync::Arc;

/// Decides whether a candidate data payload is complete.
///
/// Framing alone (the blank-line delimiter) tells the parser a segment
/// has ended. A predicate adds an in-band check, so a tail segment whose
/// payload carries its own terminator can be emitted before the next
/// delimiter arrives. It may run many times over the same growing tail and
/// must be cheap and free of side effects.
#[derive(Clone)]
pub struct CompletionPredicate {
    check: Arc<dyn Fn(&str) -> bool + Send + Sync>,
}

impl CompletionPredicate {
    /// Wrap an arbitrary check.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Payload is complete once it ends with `sentinel`.
    pub fn suffix(sentinel: impl Into<String>) -> Self {
        let sentinel = sentinel.into();
        Self::new(move |data| data.ends_with(sentinel.as_str()))
    }

    /// Run the check against a payload.
    pub fn is_complete(&self, data: &str) -> bool {
        (self.check)(data)
    }
}

impl fmt::Debug for CompletionPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionPredicate").finish_non_exhaustive()
    }
}

impl<F> From<F> for CompletionPredicate
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    fn from(check: F) -> Self {
        Self::new(check)
    }
}
