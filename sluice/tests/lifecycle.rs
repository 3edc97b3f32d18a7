use futures::stream::{self, StreamExt};
use sluice::{Gate, GatedStreamExt, Signal};
use tokio_test::task;
use tokio_test::{assert_pending, assert_ready_eq};

mod common;
use common::UpstreamError;

#[test]
fn one_open_releases_every_category_sharing_the_gate() {
    let gate = Gate::new();

    let mut many = task::spawn(stream::iter([Ok::<_, UpstreamError>(1), Ok(2)]).gated(&gate).collect::<Vec<_>>());
    let mut single = task::spawn(gate.single(async { Ok::<_, UpstreamError>("one") }));
    let mut optional = task::spawn(gate.optional(async { Ok::<Option<u32>, UpstreamError>(None) }));
    let mut unit = task::spawn(gate.unit(async { Ok::<_, UpstreamError>(()) }));

    assert_pending!(many.poll());
    assert_pending!(single.poll());
    assert_pending!(optional.poll());
    assert_pending!(unit.poll());

    gate.open();
    assert_ready_eq!(many.poll(), vec![Ok(1), Ok(2)]);
    assert_ready_eq!(single.poll(), Ok("one"));
    assert_ready_eq!(optional.poll(), Ok(None));
    assert_ready_eq!(unit.poll(), Ok(()));
}

#[test]
fn gate_is_reusable_across_activation_cycles() {
    let gate = Gate::new();
    assert_eq!(gate.signal(), Signal::Inactive);

    gate.open();
    let mut first = task::spawn(gate.single(async { Ok::<_, UpstreamError>(1) }));
    assert_ready_eq!(first.poll(), Ok(1));

    gate.close();
    let mut second = task::spawn(gate.single(async { Ok::<_, UpstreamError>(2) }));
    assert_pending!(second.poll());

    gate.open();
    assert_ready_eq!(second.poll(), Ok(2));
}

#[test]
fn teardown_drop_leaves_surviving_subscriptions_intact() {
    let gate = Gate::new();

    let mut kept = task::spawn(gate.single(async { Ok::<_, UpstreamError>("kept") }));
    let mut dropped = task::spawn(gate.single(async { Ok::<_, UpstreamError>("dropped") }));
    assert_pending!(kept.poll());
    assert_pending!(dropped.poll());

    // Lifecycle teardown: the owner cancels one subscription before reactivating.
    drop(dropped);

    gate.open();
    assert!(kept.is_woken());
    assert_ready_eq!(kept.poll(), Ok("kept"));
}
