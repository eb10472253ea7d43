//! The render-tree context animations live in.
//!
//! A [`Context`] bundles what the host provides to every animator: the
//! per-identity [`StateStore`], the [`FrameRequester`] used to ask for
//! redraws, and the tokio runtime advancement tasks run on.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::frame::FrameRequester;
use crate::storage::StateStore;

struct ContextInner {
    states: StateStore,
    frames: FrameRequester,
    handle: Handle,
    /// Only set when the context created its own runtime
    runtime: Option<Runtime>,
    next_auto_id: AtomicUsize,
}

impl Drop for ContextInner {
    fn drop(&mut self) {
        // shutdown_background never blocks, so dropping a context is fine
        // from inside another runtime too
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Shared handle to the animation context. Cheap to clone.
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

impl Context {
    /// Context with its own single-worker runtime, for hosts that do not run
    /// tokio themselves.
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("guido-animations")
            .enable_time()
            .build()?;
        let handle = runtime.handle().clone();
        Ok(Self::from_parts(handle, Some(runtime)))
    }

    /// Context spawning its tasks on an existing runtime.
    pub fn with_handle(handle: Handle) -> Self {
        Self::from_parts(handle, None)
    }

    fn from_parts(handle: Handle, runtime: Option<Runtime>) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                states: StateStore::new(),
                frames: FrameRequester::new(),
                handle,
                runtime,
                next_auto_id: AtomicUsize::new(0),
            }),
        }
    }

    pub fn states(&self) -> &StateStore {
        &self.inner.states
    }

    /// Redraw flag shared with the advancement tasks. Hosts install their
    /// wake-up callback with [`FrameRequester::set_waker`].
    pub fn frames(&self) -> &FrameRequester {
        &self.inner.frames
    }

    pub fn request_frame(&self) {
        self.inner.frames.request();
    }

    /// Check if a frame has been requested and clear the flag
    pub fn take_frame_request(&self) -> bool {
        self.inner.frames.take()
    }

    /// Start a new frame: auto-generated identities count from zero again, so
    /// a widget built at the same place of the tree gets the same identity
    /// every frame.
    pub fn begin_frame(&self) {
        self.inner.next_auto_id.store(0, Ordering::Relaxed);
    }

    /// Generate the next automatic identity for this frame.
    pub fn gen_id(&self, prefix: &str) -> String {
        let n = self.inner.next_auto_id.fetch_add(1, Ordering::Relaxed);
        format!("{}##{}", prefix, n)
    }

    /// The state of `id`, created with `init` on first access.
    ///
    /// # Panics
    /// If `id` already holds state of another type.
    pub fn state<T, F>(&self, id: &str, init: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        self.inner.states.get_or_insert_with(id, init)
    }

    /// Forget the state of `id`. A running animation with that identity is
    /// stopped once its last holder lets go.
    pub fn discard(&self, id: &str) -> bool {
        self.inner.states.remove(id)
    }

    pub(crate) fn spawn<F>(&self, future: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.inner.handle.spawn(future)
    }
}
