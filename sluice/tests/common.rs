use thiserror::Error;
use tracing::Level;

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() {
    tracing_subscriber::fmt().with_max_level(Level::TRACE).with_test_writer().init();
}

/// Stand-in for whatever failure an upstream producer raises. `PartialEq` lets tests assert
/// the captured error is replayed verbatim.
#[allow(unused)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("fetch failed: {0}")]
    Fetch(&'static str),
}
