//! Swappable slots with a fallback default
//!
//! An [`AmbientContext`] replaces a process-wide static: the owner creates it
//! with a default value, callers read the current value, and tests or the
//! runtime may override it. [`ThreadLocalAmbientContext`] keeps one override
//! per thread.

use arc_swap::ArcSwapAny;
use oro_domain::error::{Error, Result};
use parking_lot::RwLock;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::debug;

fn build_default<T, F, E>(factory: F) -> Result<Arc<T>>
where
    T: ?Sized,
    F: FnOnce() -> std::result::Result<Arc<T>, E>,
    E: fmt::Display,
{
    factory().map_err(|err| {
        Error::configuration(format!(
            "Failed to create the default value of ambient context '{}': {}",
            std::any::type_name::<T>(),
            err
        ))
    })
}

/// Slot shared by all threads
///
/// Reads are lock-free; the slot holds an `Arc<Arc<T>>` so unsized values
/// such as `dyn IdGenerator` can be swapped.
pub struct AmbientContext<T: ?Sized> {
    default: Arc<T>,
    current: ArcSwapAny<Arc<Arc<T>>>,
}

impl<T: ?Sized + Send + Sync> AmbientContext<T> {
    /// Create a slot whose default is `default`
    pub fn new(default: Arc<T>) -> Self {
        Self {
            current: ArcSwapAny::new(Arc::new(Arc::clone(&default))),
            default,
        }
    }

    /// Create a slot whose default is produced by `factory`
    ///
    /// Fails with a configuration error when the factory fails.
    pub fn try_new<F, E>(factory: F) -> Result<Self>
    where
        F: FnOnce() -> std::result::Result<Arc<T>, E>,
        E: fmt::Display,
    {
        build_default(factory).map(Self::new)
    }

    /// Current value
    pub fn current(&self) -> Arc<T> {
        Arc::clone(&*self.current.load_full())
    }

    /// Replace the current value; `None` restores the default
    pub fn set(&self, value: Option<Arc<T>>) {
        let value = value.unwrap_or_else(|| Arc::clone(&self.default));
        self.current.store(Arc::new(value));
    }

    /// Restore the default
    pub fn reset(&self) {
        self.set(None);
    }

    /// The default value
    pub fn default_value(&self) -> Arc<T> {
        Arc::clone(&self.default)
    }

    /// Whether the current value is the default
    pub fn is_default(&self) -> bool {
        Arc::ptr_eq(&**self.current.load(), &self.default)
    }
}

impl<T: ?Sized> fmt::Debug for AmbientContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmbientContext")
            .field("type", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

type ExitHook = Box<dyn FnOnce()>;

/// Hooks run when the owning thread exits
struct ExitHooks(RefCell<Vec<ExitHook>>);

impl Drop for ExitHooks {
    fn drop(&mut self) {
        for hook in self.0.get_mut().drain(..) {
            hook();
        }
    }
}

thread_local! {
    static EXIT_HOOKS: ExitHooks = const { ExitHooks(RefCell::new(Vec::new())) };
}

fn on_thread_exit(hook: ExitHook) {
    if EXIT_HOOKS
        .try_with(|hooks| hooks.0.borrow_mut().push(hook))
        .is_err()
    {
        debug!("Thread is exiting; override will not be released");
    }
}

type Overrides<T> = RwLock<HashMap<ThreadId, Option<Arc<T>>>>;

/// Slot with one value per thread
///
/// Threads that never set a value see the default. A thread's entry is
/// released when the thread exits.
pub struct ThreadLocalAmbientContext<T: ?Sized> {
    default: Arc<T>,
    overrides: Arc<Overrides<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> ThreadLocalAmbientContext<T> {
    /// Create a slot whose default is `default`
    pub fn new(default: Arc<T>) -> Self {
        Self {
            default,
            overrides: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a slot whose default is produced by `factory`
    pub fn try_new<F, E>(factory: F) -> Result<Self>
    where
        F: FnOnce() -> std::result::Result<Arc<T>, E>,
        E: fmt::Display,
    {
        build_default(factory).map(Self::new)
    }

    /// Value seen by the calling thread
    pub fn current(&self) -> Arc<T> {
        self.overrides
            .read()
            .get(&thread::current().id())
            .and_then(Option::as_ref)
            .map_or_else(|| Arc::clone(&self.default), Arc::clone)
    }

    /// Replace the calling thread's value; `None` restores the default
    pub fn set(&self, value: Option<Arc<T>>) {
        let id = thread::current().id();
        let first_entry = {
            let mut overrides = self.overrides.write();
            let first_entry = !overrides.contains_key(&id);
            if first_entry && value.is_none() {
                return;
            }
            overrides.insert(id, value);
            first_entry
        };

        if first_entry {
            let overrides = Arc::downgrade(&self.overrides);
            on_thread_exit(Box::new(move || {
                if let Some(overrides) = overrides.upgrade() {
                    overrides.write().remove(&id);
                }
            }));
        }
    }

    /// Restore the default for the calling thread
    pub fn reset(&self) {
        self.set(None);
    }

    /// The default value
    pub fn default_value(&self) -> Arc<T> {
        Arc::clone(&self.default)
    }

    /// Number of live threads holding an entry
    pub fn thread_count(&self) -> usize {
        self.overrides.read().len()
    }
}

impl<T: ?Sized> fmt::Debug for ThreadLocalAmbientContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadLocalAmbientContext")
            .field("type", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}
