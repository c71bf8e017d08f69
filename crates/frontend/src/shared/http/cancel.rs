use std::cell::{Cell, RefCell};
use std::rc::Rc;

use web_sys::AbortController;

/// Explicit cancellation for in-flight requests.
///
/// Clones share state: cancelling any clone aborts every request that was
/// sent with it, and requests sent afterwards fail immediately.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
    controllers: Rc<RefCell<Vec<AbortController>>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        for controller in self.controllers.borrow_mut().drain(..) {
            controller.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    pub(crate) fn register(&self, controller: &AbortController) {
        if self.is_cancelled() {
            controller.abort();
        } else {
            self.controllers.borrow_mut().push(controller.clone());
        }
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
        // second cancel is a no-op
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
