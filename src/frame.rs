use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

type Waker = Box<dyn Fn() + Send + Sync>;

struct Inner {
    requested: AtomicBool,
    waker: OnceLock<Waker>,
}

/// Thread-safe "a new frame is needed" flag shared between the host's render
/// loop and the advancement tasks.
///
/// Cloning is cheap and every clone refers to the same flag.
#[derive(Clone)]
pub struct FrameRequester {
    inner: Arc<Inner>,
}

impl FrameRequester {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                requested: AtomicBool::new(false),
                waker: OnceLock::new(),
            }),
        }
    }

    /// Requester that also calls `waker` to wake the host's event loop.
    pub fn with_waker<F>(waker: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let requester = Self::new();
        requester.set_waker(waker);
        requester
    }

    /// Install the wake-up callback. Only the first call has an effect.
    pub fn set_waker<F>(&self, waker: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        if self.inner.waker.set(Box::new(waker)).is_err() {
            log::warn!("frame waker already installed, ignoring the new one");
        }
    }

    /// Mark the frame dirty. Callable from any thread; repeated requests before
    /// the host takes the flag collapse into one.
    pub fn request(&self) {
        // Only wake on the first request - avoids redundant wake-ups when several animators tick
        let was_requested = self.inner.requested.swap(true, Ordering::AcqRel);
        if !was_requested {
            if let Some(waker) = self.inner.waker.get() {
                waker();
            }
        }
    }

    /// Check if a frame has been requested and clear the flag
    pub fn take(&self) -> bool {
        self.inner.requested.swap(false, Ordering::AcqRel)
    }

    pub fn is_requested(&self) -> bool {
        self.inner.requested.load(Ordering::Acquire)
    }
}

impl Default for FrameRequester {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrameRequester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRequester")
            .field("requested", &self.is_requested())
            .field("has_waker", &self.inner.waker.get().is_some())
            .finish()
    }
}
