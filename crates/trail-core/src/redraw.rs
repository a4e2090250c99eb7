use std::cell::Cell;
use std::rc::Rc;

/// Shared "needs redraw" flag.
///
/// Cloned into externally owned style resources (curves, gradients) so they can
/// request a redraw when they change. Any number of requests before the next
/// [`RedrawHandle::take`] collapse into one.
#[derive(Clone, Debug, Default)]
pub struct RedrawHandle {
    pending: Rc<Cell<bool>>,
}

impl RedrawHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.pending.set(true);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Clear the flag, returning whether a redraw was pending.
    pub fn take(&self) -> bool {
        self.pending.replace(false)
    }
}
