use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;

use crate::event::Event;
use crate::gate::{Gate, OpenWait};

/// What happens to upstream events while one is already waiting on a closed gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Upstream is not polled again until the waiting event has been delivered. Pull-based
    /// backpressure makes the relay lossless: a closed gate simply stops demand.
    #[default]
    Backpressure,
    /// Upstream is drained while the gate is closed and only the newest undelivered event is
    /// kept - intermediate values are superseded. A lossy policy for producers that cannot be
    /// slowed down; a captured error supersedes a queued value the same way.
    Latest,
}

/// Ordered-stream adapter returned by [`Gate::stream`].
///
/// One in-flight gate wait at a time: the wait for event *n + 1* does not begin until the wait
/// for event *n* has resolved, which is what preserves input order across asynchronous opens.
/// Dropping the adapter cancels the subscription - upstream is no longer polled and the pending
/// waiter is deregistered from the gate.
pub struct GatedStream<S, T, E> {
    upstream: S,
    gate: Gate,
    policy: OverflowPolicy,
    /// Event currently waiting its turn at the gate.
    current: Option<Event<T, E>>,
    wait: Option<OpenWait>,
    /// Newest event captured while blocked (`Latest` policy only).
    queued: Option<Event<T, E>>,
    /// Upstream exhausted, or an error captured; no further upstream polls.
    done: bool,
}

impl<S: Unpin, T, E> Unpin for GatedStream<S, T, E> {}

impl<S, T, E> std::fmt::Debug for GatedStream<S, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatedStream").field("policy", &self.policy).field("waiting", &self.wait.is_some()).field("done", &self.done).finish()
    }
}

impl<S, T, E> GatedStream<S, T, E>
where S: Stream<Item = Result<T, E>> + Unpin
{
    pub(crate) fn new(gate: Gate, upstream: S) -> Self {
        Self { upstream, gate, policy: OverflowPolicy::default(), current: None, wait: None, queued: None, done: false }
    }

    /// Selects the buffering policy for this subscription.
    pub fn policy(mut self, policy: OverflowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// `Latest` policy: keep consuming upstream while an event is blocked on the gate.
    /// Whatever is newest when the gate opens takes the next turn.
    fn drain_while_blocked(&mut self, cx: &mut Context<'_>) {
        while !self.done {
            match Pin::new(&mut self.upstream).poll_next(cx) {
                Poll::Ready(Some(Ok(value))) => self.queued = Some(Event::Value(value)),
                Poll::Ready(Some(Err(error))) => {
                    self.queued = Some(Event::Error(error));
                    self.done = true;
                }
                Poll::Ready(None) => self.done = true,
                Poll::Pending => break,
            }
        }
    }
}

impl<S, T, E> Stream for GatedStream<S, T, E>
where S: Stream<Item = Result<T, E>> + Unpin
{
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            // Deliver the event currently held at the gate before touching anything else
            if let Some(wait) = &mut this.wait {
                match Pin::new(wait).poll(cx) {
                    Poll::Ready(()) => {
                        this.wait = None;
                        match this.current.take() {
                            Some(Event::Value(value)) => return Poll::Ready(Some(Ok(value))),
                            Some(Event::Error(error)) => return Poll::Ready(Some(Err(error))),
                            Some(Event::Empty) | None => unreachable!("gate resolved with no held event"),
                        }
                    }
                    Poll::Pending => {
                        if this.policy == OverflowPolicy::Latest {
                            this.drain_while_blocked(cx);
                        }
                        return Poll::Pending;
                    }
                }
            }

            // An event superseded while blocked takes the next turn (Latest policy)
            if let Some(event) = this.queued.take() {
                this.current = Some(event);
                this.wait = Some(this.gate.await_open());
                continue;
            }

            if this.done {
                return Poll::Ready(None);
            }

            match Pin::new(&mut this.upstream).poll_next(cx) {
                Poll::Ready(Some(Ok(value))) => {
                    this.current = Some(Event::Value(value));
                    this.wait = Some(this.gate.await_open());
                }
                Poll::Ready(Some(Err(error))) => {
                    // Captured, not rethrown: the error is replayed at its own position
                    // once the gate opens, and upstream consumption ends here.
                    this.current = Some(Event::Error(error));
                    this.done = true;
                    this.wait = Some(this.gate.await_open());
                }
                Poll::Ready(None) => {
                    this.done = true;
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
