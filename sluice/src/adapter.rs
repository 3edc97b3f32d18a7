mod stream;

pub use stream::{GatedStream, OverflowPolicy};

use std::future::Future;

use futures::Stream;

use crate::event::Event;
use crate::gate::Gate;

/// The four stream-category adapters. Each call clones the gate handle and gates one
/// subscription; the gate itself is freely reusable across any number of them, and one
/// `open()` releases them all.
impl Gate {
    /// Gates an ordered stream of zero-to-many values terminated by completion or an error.
    ///
    /// Output order equals input order: each event waits for the gate in turn, and the next
    /// wait does not begin until the previous one has resolved. An `Err` item ends upstream
    /// consumption and is replayed at its own position in the sequence. Completion is not
    /// itself gated - it is simply ordered behind any event still waiting.
    ///
    /// Buffering under a closed gate follows [`OverflowPolicy::Backpressure`] unless
    /// [`GatedStream::policy`] says otherwise.
    pub fn stream<S, T, E>(&self, upstream: S) -> GatedStream<S, T, E>
    where S: Stream<Item = Result<T, E>> + Unpin {
        GatedStream::new(self.clone(), upstream)
    }

    /// Gates an upstream that yields exactly one value or one error.
    pub fn single<F, T, E>(&self, upstream: F) -> impl Future<Output = Result<T, E>> + use<F, T, E>
    where F: Future<Output = Result<T, E>> {
        let gate = self.clone();
        async move {
            let event = Event::from_result(upstream.await);
            match gate.release(event).await {
                Event::Value(value) => Ok(value),
                Event::Error(error) => Err(error),
                Event::Empty => unreachable!("single-value upstream produced no event"),
            }
        }
    }

    /// Gates an upstream that yields zero or one value.
    ///
    /// A no-value completion is wrapped as [`Event::Empty`] rather than completing early, so
    /// even "no value" is withheld until the gate opens.
    pub fn optional<F, T, E>(&self, upstream: F) -> impl Future<Output = Result<Option<T>, E>> + use<F, T, E>
    where F: Future<Output = Result<Option<T>, E>> {
        let gate = self.clone();
        async move { gate.release(Event::from_option(upstream.await)).await.into_option() }
    }

    /// Gates an upstream that carries no payload, only completion or an error.
    ///
    /// Completion rides the single-value path with `()` as the placeholder value, so it is
    /// deferred exactly like a value would be.
    pub fn unit<F, E>(&self, upstream: F) -> impl Future<Output = Result<(), E>> + use<F, E>
    where F: Future<Output = Result<(), E>> {
        self.single(upstream)
    }
}
