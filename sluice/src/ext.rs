use std::future::Future;

use futures::Stream;

use crate::adapter::GatedStream;
use crate::gate::Gate;

/// Fluent form of [`Gate::stream`]: `upstream.gated(&gate)`.
pub trait GatedStreamExt<T, E>: Stream<Item = Result<T, E>> + Sized {
    fn gated(self, gate: &Gate) -> GatedStream<Self, T, E>
    where Self: Unpin {
        gate.stream(self)
    }
}
impl<S, T, E> GatedStreamExt<T, E> for S where S: Stream<Item = Result<T, E>> + Sized {}

/// Fluent form of [`Gate::single`].
pub trait GatedSingleExt<T, E>: Future<Output = Result<T, E>> + Sized {
    fn gated_single(self, gate: &Gate) -> impl Future<Output = Result<T, E>> {
        gate.single(self)
    }
}
impl<F, T, E> GatedSingleExt<T, E> for F where F: Future<Output = Result<T, E>> + Sized {}

/// Fluent form of [`Gate::optional`].
pub trait GatedOptionalExt<T, E>: Future<Output = Result<Option<T>, E>> + Sized {
    fn gated_optional(self, gate: &Gate) -> impl Future<Output = Result<Option<T>, E>> {
        gate.optional(self)
    }
}
impl<F, T, E> GatedOptionalExt<T, E> for F where F: Future<Output = Result<Option<T>, E>> + Sized {}

/// Fluent form of [`Gate::unit`].
pub trait GatedUnitExt<E>: Future<Output = Result<(), E>> + Sized {
    fn gated_unit(self, gate: &Gate) -> impl Future<Output = Result<(), E>> {
        gate.unit(self)
    }
}
impl<F, E> GatedUnitExt<E> for F where F: Future<Output = Result<(), E>> + Sized {}
