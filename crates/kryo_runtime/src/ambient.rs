//! Thread-local ambient current-instance state (§4.8, §5).
//!
//! Exactly one instance is "current" per thread at a time. `push_context`
//! hands back whatever was current before so the caller can restore it
//! with `pop_context`, giving scoped switching without a stack the caller
//! has to manage themselves.

use std::cell::Cell;

use kryo_core::InstanceId;

thread_local! {
    static CURRENT: Cell<Option<InstanceId>> = const { Cell::new(None) };
}

/// The instance currently owning this thread, if any.
pub fn current_instance() -> Option<InstanceId> {
    CURRENT.with(|c| c.get())
}

/// Make `id` the current instance on this thread, returning whatever was
/// current before. Callers must pass that value to [`pop_context`] to
/// restore it, even across early returns (a guard or `?` can leak it).
pub fn push_context(id: InstanceId) -> Option<InstanceId> {
    CURRENT.with(|c| {
        let previous = c.get();
        c.set(Some(id));
        previous
    })
}

/// Restore the ambient instance to whatever [`push_context`] returned.
pub fn pop_context(previous: Option<InstanceId>) {
    CURRENT.with(|c| c.set(previous));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_pop_restores_previous() {
        assert_eq!(current_instance(), None);
        let prev = push_context(InstanceId(1));
        assert_eq!(prev, None);
        assert_eq!(current_instance(), Some(InstanceId(1)));

        let prev2 = push_context(InstanceId(2));
        assert_eq!(prev2, Some(InstanceId(1)));
        assert_eq!(current_instance(), Some(InstanceId(2)));

        pop_context(prev2);
        assert_eq!(current_instance(), Some(InstanceId(1)));
        pop_context(prev);
        assert_eq!(current_instance(), None);
    }
}
