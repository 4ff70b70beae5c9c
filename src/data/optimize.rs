/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Background materialization of expensive nodes.
//!
//! An [`Optimized`] node reads exactly like the node it wraps.  Once it is asked
//! to optimize, a thread evaluates the whole wrapped node into a [`Dense`] leaf,
//! and reads switch over to that leaf as soon as it is available.  Until then,
//! reads go down the lazy path; they never wait on the thread.

use crate::dense::Dense;
use crate::error::Result;
use crate::node::{Dims, MatrixData, Node, Scalar};

use lazy_static::lazy_static;
use log::{debug, error, trace, warn};
use std::any::Any;
use std::fmt;
use std::mem;
use std::panic;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, RwLock, TryLockError};
use std::thread::{self, JoinHandle};

//--------------------------------------------------

/// Decides which nodes are worth materializing in the background.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OptimizePolicy {
    pub enabled: bool,
    /// Products of strictly more than this many matrices get optimized.
    pub chain_threshold: usize,
}

impl Default for OptimizePolicy {
    fn default() -> Self {
        OptimizePolicy { enabled: true, chain_threshold: 3 }
    }
}

impl OptimizePolicy {
    pub fn disabled() -> Self {
        OptimizePolicy { enabled: false, ..Default::default() }
    }

    pub fn should_optimize(&self, node: &dyn Node) -> bool {
        self.enabled && node.chain_len() > self.chain_threshold
    }
}

lazy_static! {
    static ref GLOBAL_POLICY: RwLock<OptimizePolicy> = RwLock::new(OptimizePolicy::default());
}

/// The policy used by operations that don't take one explicitly.
pub fn global_policy() -> OptimizePolicy {
    *GLOBAL_POLICY.read().unwrap_or_else(|e| e.into_inner())
}

pub fn set_global_policy(policy: OptimizePolicy) {
    debug!("optimization policy: {:?}", policy);
    *GLOBAL_POLICY.write().unwrap_or_else(|e| e.into_inner()) = policy;
}

//--------------------------------------------------

/// Observable progress of an [`Optimized`] node.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CacheState {
    NotStarted,
    InFlight,
    Ready,
    /// The background task panicked.
    Failed,
}

enum State<T> {
    NotStarted,
    InFlight(JoinHandle<Dense<T>>),
    // the value lives in Slot::cache
    Ready,
    Failed {
        // handed to the first thread that observes the failure
        payload: Option<Box<dyn Any + Send>>,
        message: String,
    },
}

impl<T> State<T> {
    fn public(&self) -> CacheState {
        match self {
            State::NotStarted => CacheState::NotStarted,
            State::InFlight(_) => CacheState::InFlight,
            State::Ready => CacheState::Ready,
            State::Failed { .. } => CacheState::Failed,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "(panic payload is not a string)".to_string()
    }
}

/// Re-raise a failure seen through `state`.
///
/// The first observer gets the original panic; later ones get a panic that quotes it.
fn raise<T>(mut state: MutexGuard<'_, State<T>>, what: &str) -> ! {
    let (payload, message) = match &mut *state {
        State::Failed { payload, message } => (payload.take(), message.clone()),
        _ => panic!("(BUG) raise() on a node that did not fail"),
    };
    drop(state);
    match payload {
        Some(payload) => panic::resume_unwind(payload),
        None => panic!("{} whose background materialization failed: {}", what, message),
    }
}

// Shared by all clones of an Optimized; the background thread never holds one,
// so the last reference is always dropped outside of it.
struct Slot<T> {
    state: Mutex<State<T>>,
    // invariant: set iff state is Ready
    cache: OnceLock<Dense<T>>,
}

impl<T: Scalar> Slot<T> {
    fn new() -> Self {
        Slot { state: Mutex::new(State::NotStarted), cache: OnceLock::new() }
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Join an in-flight task (blocking if it is still running) and publish its result,
    /// which is either the cache or a `Failed` state holding the panic.
    fn settle(&self, state: &mut State<T>) {
        let handle = match mem::replace(state, State::NotStarted) {
            State::InFlight(handle) => handle,
            other => {
                *state = other;
                return;
            },
        };
        *state = match handle.join() {
            Ok(dense) => {
                let _ = self.cache.set(dense);
                State::Ready
            },
            Err(payload) => State::Failed { message: panic_message(&*payload), payload: Some(payload) },
        };
    }
}

impl<T> Drop for Slot<T> {
    fn drop(&mut self) {
        let state = match self.state.get_mut() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        match mem::replace(state, State::NotStarted) {
            State::InFlight(handle) => {
                debug!("teardown is waiting on a background materialization");
                if let Err(payload) = handle.join() {
                    error!("background materialization panicked; its result was discarded: {}", panic_message(&*payload));
                }
            },
            State::Failed { payload: Some(_), message } => {
                error!("background materialization panicked, and nothing read the node afterwards: {}", message);
            },
            _ => {},
        }
    }
}

//--------------------------------------------------

/// Adds background materialization to any node, without changing what it reads as.
///
/// Clones share the same cache, and at most one background task is ever started
/// for it.  [`MatrixData::detach`] produces a node with a fresh cache.
///
/// The wrapped node must not be written to (through an alias) while a
/// background task is running; the cache would end up with a mix of old and
/// new values.
pub struct Optimized<M: MatrixData> {
    // (declared first: dropping the last alias joins this node's task before
    //  anything below it is torn down)
    slot: Arc<Slot<M::Elem>>,
    inner: M,
}

impl<M: MatrixData> Optimized<M> {
    /// Wrap a node.  Nothing is started until [`Node::optimize`] is called.
    pub fn new(inner: M) -> Self {
        Optimized { inner, slot: Arc::new(Slot::new()) }
    }

    /// Wrap a node, and start optimizing right away if the policy calls for it.
    pub fn with_policy(inner: M, policy: &OptimizePolicy) -> Self {
        let out = Self::new(inner);
        if policy.should_optimize(&out) {
            out.launch();
        }
        out
    }

    pub fn inner(&self) -> &M { &self.inner }

    /// Current progress.  Picks up a finished task, but never waits for one.
    pub fn state(&self) -> CacheState {
        if self.slot.cache.get().is_some() {
            return CacheState::Ready;
        }
        let mut state = self.slot.lock();
        if let State::InFlight(handle) = &*state {
            if handle.is_finished() {
                // a failure shows up as the Failed state; the panic itself is re-raised
                // by whoever reads or waits on this node next
                self.slot.settle(&mut state);
            }
        }
        state.public()
    }

    // at-most-once: the check and the spawn happen under the same lock
    fn launch(&self) -> bool {
        let mut state = self.slot.lock();
        match *state {
            State::NotStarted => {},
            _ => return false,
        }

        let inner = self.inner.clone();
        let (rows, cols) = inner.dims();
        debug!("optimizing a {}x{} node (chain of {}) in the background", rows, cols, inner.chain_len());

        let spawned = thread::Builder::new()
            .name("lazymat-optimize".into())
            .spawn(move || {
                // let nested chains land first, so that this reads their caches
                inner.optimize();
                inner.wait_optimized();

                let dense = match inner.materialize((0, 0), (rows, cols)) {
                    Ok(dense) => dense,
                    Err(e) => panic!("(BUG) background materialization failed: {}", e),
                };
                trace!("background materialization of a {}x{} node finished", rows, cols);
                dense
            });

        match spawned {
            Ok(handle) => {
                *state = State::InFlight(handle);
                true
            },
            Err(e) => {
                // not fatal; reads simply stay on the lazy path
                warn!("could not start a background materialization: {}", e);
                false
            },
        }
    }

    /// The cached replacement, if it is available without waiting.
    ///
    /// Panics if the background task panicked.
    fn cached(&self) -> Option<&Dense<M::Elem>> {
        if let Some(dense) = self.slot.cache.get() {
            return Some(dense);
        }

        // Someone else holding the lock may be joining the task; don't wait for them.
        let mut state = match self.slot.state.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return None,
        };
        let finished = match &*state {
            State::NotStarted => false,
            State::InFlight(handle) => handle.is_finished(),
            State::Ready | State::Failed { .. } => true,
        };
        if !finished {
            return None;
        }
        self.slot.settle(&mut state);
        if matches!(*state, State::Failed { .. }) {
            raise(state, "read from a node");
        }
        trace!("picked up a cached {}x{} node", self.inner.rows(), self.inner.cols());
        self.slot.cache.get()
    }
}

impl<M: MatrixData> Clone for Optimized<M> {
    fn clone(&self) -> Self {
        Optimized { inner: self.inner.clone(), slot: self.slot.clone() }
    }
}

impl<M: MatrixData + fmt::Debug> fmt::Debug for Optimized<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // (must not block or panic, so this doesn't use state())
        let state = match self.slot.cache.get() {
            Some(_) => Some(CacheState::Ready),
            None => match self.slot.state.try_lock() {
                Ok(guard) => Some(guard.public()),
                Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner().public()),
                Err(TryLockError::WouldBlock) => None,
            },
        };
        f.debug_struct("Optimized")
            .field("state", &state)
            .field("inner", &self.inner)
            .finish()
    }
}

impl<M: MatrixData> Node for Optimized<M> {
    fn dims(&self) -> Dims { self.inner.dims() }
    fn children(&self) -> Vec<&dyn Node> { vec![&self.inner as &dyn Node] }
    fn chain_len(&self) -> usize { self.inner.chain_len() }

    fn optimize(&self) -> bool { self.launch() }

    fn wait_optimized(&self) {
        {
            let mut state = self.slot.lock();
            if let State::InFlight(_) = &*state {
                debug!("waiting on a background materialization");
            }
            self.slot.settle(&mut state);
            if matches!(*state, State::Failed { .. }) {
                raise(state, "waited on a node");
            }
        }
        self.inner.wait_optimized();
    }
}

impl<M: MatrixData> MatrixData for Optimized<M> {
    type Elem = M::Elem;

    #[inline]
    fn at(&self, row: usize, col: usize) -> M::Elem {
        match self.cached() {
            Some(dense) => dense.at(row, col),
            None => self.inner.at(row, col),
        }
    }

    fn detach(&self) -> Self { Optimized::new(self.inner.detach()) }

    fn materialize(&self, origin: (usize, usize), dims: Dims) -> Result<Dense<M::Elem>> {
        match self.cached() {
            Some(dense) => dense.materialize(origin, dims),
            None => self.inner.materialize(origin, dims),
        }
    }

    fn to_dense(&self) -> Dense<M::Elem> {
        match self.cached() {
            Some(dense) => dense.deep_copy(),
            None => self.inner.to_dense(),
        }
    }
}

//--------------------------------------------------
