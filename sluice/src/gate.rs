use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

use crate::event::Event;

/// The gate's two-valued state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Active,
    Inactive,
}

/// An open/closed gate that holds back async events until its owner declares it open.
///
/// A `Gate` is a cheap clonable handle; all clones share one state. The typical owner is a
/// lifecycle: call [`Gate::open`] on activation, [`Gate::close`] on deactivation, and drop the
/// gated streams/futures on teardown. A freshly created gate is closed - nothing passes until
/// the first `open()`.
///
/// The gate itself queues no values. It only answers "when is the gate next (or already) open",
/// once per [`Gate::await_open`] call. Event buffering lives in the adapters layered on top.
pub struct Gate(Arc<GateInner>);

struct GateInner {
    state: Mutex<GateState>,
}

struct GateState {
    signal: Signal,
    next_id: usize,
    waiters: BTreeMap<usize, Waker>,
}

impl Clone for Gate {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl Default for Gate {
    fn default() -> Self { Self::new() }
}

impl std::fmt::Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.0.state.lock().unwrap();
        f.debug_struct("Gate").field("signal", &state.signal).field("waiters", &state.waiters.len()).finish()
    }
}

impl Gate {
    /// Creates a gate in the [`Signal::Inactive`] state.
    pub fn new() -> Self {
        Self(Arc::new(GateInner {
            state: Mutex::new(GateState { signal: Signal::Inactive, next_id: 0, waiters: BTreeMap::new() }),
        }))
    }

    /// Current state. A snapshot only - concurrent transitions may follow immediately.
    pub fn signal(&self) -> Signal { self.0.state.lock().unwrap().signal }

    pub fn is_open(&self) -> bool { self.signal() == Signal::Active }

    /// Transitions to [`Signal::Active`] and wakes every pending waiter exactly once.
    ///
    /// Waiters are one-shot, so opening an already-open gate finds an empty waiter set and is
    /// a no-op apart from the redundant transition. Callable from any thread.
    pub fn open(&self) {
        let woken = {
            let mut state = self.0.state.lock().unwrap();
            state.signal = Signal::Active;
            std::mem::take(&mut state.waiters)
        };
        tracing::trace!(waiters = woken.len(), "gate opened");
        for (_, waker) in woken {
            waker.wake();
        }
    }

    /// Transitions to [`Signal::Inactive`].
    ///
    /// Nothing is cancelled or revoked: a wait already resolved by a prior `open()` still
    /// delivers its event, and future [`Gate::await_open`] calls block until the next `open()`.
    pub fn close(&self) {
        self.0.state.lock().unwrap().signal = Signal::Inactive;
        tracing::trace!("gate closed");
    }

    /// One-shot wait that resolves the first time the gate is, or becomes, open.
    ///
    /// If the gate is already open at the first poll the wait resolves immediately, through
    /// the same poll path as a deferred wait, so downstream ordering code stays uniform.
    /// Dropping a pending wait deregisters it from the gate.
    pub fn await_open(&self) -> OpenWait { OpenWait { gate: self.0.clone(), registration: Registration::Unpolled } }

    /// The single-event primitive the adapters are built on: holds `event` until the gate is
    /// open, then yields it unchanged.
    pub fn release<T, E>(&self, event: Event<T, E>) -> Release<T, E> {
        Release { wait: self.await_open(), event: Some(event) }
    }

    #[cfg(test)]
    pub(crate) fn waiter_count(&self) -> usize { self.0.state.lock().unwrap().waiters.len() }
}

/// Future returned by [`Gate::await_open`].
///
/// State check and waiter registration happen under one lock, so an `open()` racing the first
/// poll cannot be missed. Once the gate's `open()` has drained this waiter the wait is resolved
/// for good, even if the gate closes again before the owning task gets polled.
pub struct OpenWait {
    gate: Arc<GateInner>,
    registration: Registration,
}

#[derive(Clone, Copy)]
enum Registration {
    Unpolled,
    Waiting(usize),
    Resolved,
}

impl Future for OpenWait {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        let mut state = this.gate.state.lock().unwrap();
        match this.registration {
            Registration::Resolved => Poll::Ready(()),
            Registration::Unpolled => {
                if state.signal == Signal::Active {
                    this.registration = Registration::Resolved;
                    return Poll::Ready(());
                }
                let id = state.next_id;
                state.next_id += 1;
                state.waiters.insert(id, cx.waker().clone());
                tracing::trace!(id, "waiter registered");
                this.registration = Registration::Waiting(id);
                Poll::Pending
            }
            Registration::Waiting(id) => match state.waiters.get_mut(&id) {
                // Still queued; keep the newest waker in case the task moved
                Some(waker) => {
                    waker.clone_from(cx.waker());
                    Poll::Pending
                }
                // Drained by open(): resolved, regardless of the current signal
                None => {
                    this.registration = Registration::Resolved;
                    Poll::Ready(())
                }
            },
        }
    }
}

impl Drop for OpenWait {
    fn drop(&mut self) {
        if let Registration::Waiting(id) = self.registration {
            self.gate.state.lock().unwrap().waiters.remove(&id);
            tracing::trace!(id, "waiter deregistered");
        }
    }
}

/// Future returned by [`Gate::release`]: one gated event, delivered when the gate opens.
pub struct Release<T, E> {
    wait: OpenWait,
    event: Option<Event<T, E>>,
}

// No field is ever pinned; the event is moved out whole on completion.
impl<T, E> Unpin for Release<T, E> {}

impl<T, E> Future for Release<T, E> {
    type Output = Event<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        futures::ready!(Pin::new(&mut self.wait).poll(cx));
        Poll::Ready(self.event.take().expect("Release polled after completion"))
    }
}
