use sluice::{Gate, GatedOptionalExt, GatedSingleExt, GatedUnitExt};
use tokio_test::task;
use tokio_test::{assert_pending, assert_ready_eq};

mod common;
use common::UpstreamError;

#[tokio::test(flavor = "current_thread")]
async fn single_delivers_immediately_when_open() {
    let gate = Gate::new();
    gate.open();

    let response = gate.single(async { Ok::<_, UpstreamError>(10) }).await;
    assert_eq!(response, Ok(10));
}

#[test]
fn single_holds_value_until_open() {
    let gate = Gate::new();
    let mut fetch = task::spawn(gate.single(async { Ok::<_, UpstreamError>(10) }));
    assert_pending!(fetch.poll());

    gate.open();
    assert!(fetch.is_woken());
    assert_ready_eq!(fetch.poll(), Ok(10));
}

#[test]
fn single_replays_captured_error_verbatim() {
    let gate = Gate::new();
    let mut fetch = task::spawn(gate.single(async { Err::<u32, _>(UpstreamError::Fetch("boom")) }));
    assert_pending!(fetch.poll());

    gate.open();
    assert_ready_eq!(fetch.poll(), Err(UpstreamError::Fetch("boom")));
}

#[test]
fn optional_value_waits_for_open() {
    let gate = Gate::new();
    let mut lookup = task::spawn(gate.optional(async { Ok::<_, UpstreamError>(Some(7)) }));
    assert_pending!(lookup.poll());

    gate.open();
    assert_ready_eq!(lookup.poll(), Ok(Some(7)));
}

#[test]
fn optional_empty_completion_waits_for_open() {
    // "No value" is an outcome too; it must not bypass the gate.
    let gate = Gate::new();
    let mut lookup = task::spawn(gate.optional(async { Ok::<Option<u32>, UpstreamError>(None) }));
    assert_pending!(lookup.poll());

    gate.open();
    assert!(lookup.is_woken());
    assert_ready_eq!(lookup.poll(), Ok(None));
}

#[test]
fn optional_error_waits_for_open() {
    let gate = Gate::new();
    let mut lookup = task::spawn(gate.optional(async { Err::<Option<u32>, _>(UpstreamError::Fetch("boom")) }));
    assert_pending!(lookup.poll());

    gate.open();
    assert_ready_eq!(lookup.poll(), Err(UpstreamError::Fetch("boom")));
}

#[test]
fn unit_defers_completion_like_a_value() {
    let gate = Gate::new();
    let mut save = task::spawn(gate.unit(async { Ok::<_, UpstreamError>(()) }));
    assert_pending!(save.poll());

    gate.open();
    assert!(save.is_woken());
    assert_ready_eq!(save.poll(), Ok(()));
}

#[test]
fn unit_defers_error() {
    let gate = Gate::new();
    let mut save = task::spawn(gate.unit(async { Err::<(), _>(UpstreamError::Fetch("boom")) }));
    assert_pending!(save.poll());

    gate.open();
    assert_ready_eq!(save.poll(), Err(UpstreamError::Fetch("boom")));
}

#[tokio::test(flavor = "current_thread")]
async fn fluent_extensions_mirror_the_gate_methods() {
    let gate = Gate::new();
    gate.open();

    let single = async { Ok::<_, UpstreamError>(1) }.gated_single(&gate).await;
    assert_eq!(single, Ok(1));

    let optional = async { Ok::<Option<u32>, UpstreamError>(None) }.gated_optional(&gate).await;
    assert_eq!(optional, Ok(None));

    let unit = async { Ok::<_, UpstreamError>(()) }.gated_unit(&gate).await;
    assert_eq!(unit, Ok(()));
}
