/*!
A lifecycle gate for async streams and futures.

A [`Gate`] is a two-state (open/closed) synchronization primitive owned by whatever controls a
consumer's lifecycle. While the gate is closed, events produced upstream - values, errors, even
"completed with nothing" - are held; when the gate opens they are released in their original
order. The consumer sees exactly the outcome it would have seen without the gate, merely
time-shifted to no earlier than the next open.

Four adapters apply the gate to the common stream shapes:

- [`Gate::stream`] - ordered, zero-to-many values ([`GatedStream`], with a configurable
  [`OverflowPolicy`] for producers that outrun a closed gate)
- [`Gate::single`] - exactly one value or one error
- [`Gate::optional`] - zero or one value; even the no-value completion waits for the gate
- [`Gate::unit`] - completion/error only

The gate holds no timeout and never fails; a wait stays pending until the next `open()` or
until the gated stream/future is dropped, which deregisters it.

# Basic usage

```rust
use futures::{StreamExt, stream};
use sluice::Gate;

futures::executor::block_on(async {
    let gate = Gate::new(); // a new gate starts closed
    gate.open();

    let upstream = stream::iter([Ok::<_, std::convert::Infallible>(1), Ok(2), Ok(3)]);
    let gated = gate.stream(upstream);
    assert_eq!(gated.collect::<Vec<_>>().await, vec![Ok(1), Ok(2), Ok(3)]);
});
```

# Deferred delivery

```rust
use sluice::Gate;

futures::executor::block_on(async {
    let gate = Gate::new();
    let fetch = gate.single(async { Ok::<_, String>("hello") });

    // Nothing is delivered while the gate is closed. Some other task - typically the
    // lifecycle owner - opens it:
    gate.open();
    assert_eq!(fetch.await, Ok("hello"));
});
```
*/

mod adapter;
mod event;
mod ext;
mod gate;

pub use adapter::{GatedStream, OverflowPolicy};
pub use event::Event;
pub use ext::{GatedOptionalExt, GatedSingleExt, GatedStreamExt, GatedUnitExt};
pub use gate::{Gate, OpenWait, Release, Signal};
