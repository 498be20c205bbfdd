use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Stop signal shared between a request and the blocking task serving it.
///
/// Long computations check [`is_cancelled`] between oracle calls.
///
/// [`is_cancelled`]: Cancellation::is_cancelled
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
