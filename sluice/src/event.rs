/// One stream event, captured for replay: a value, a captured upstream error, or a
/// zero-value completion.
///
/// Exactly one variant at a time by construction - an event never carries both a value and an
/// error. `Empty` exists for the optional (zero-or-one) category only, so that "completed with
/// no value" is distinct from completing with a value that merely looks empty, and still waits
/// for the gate like any other outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<T, E> {
    Value(T),
    Error(E),
    Empty,
}

impl<T, E> Event<T, E> {
    /// Wraps a single-value outcome.
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Event::Value(value),
            Err(error) => Event::Error(error),
        }
    }

    /// Wraps a zero-or-one outcome; a clean no-value completion becomes `Empty`.
    pub fn from_option(result: Result<Option<T>, E>) -> Self {
        match result {
            Ok(Some(value)) => Event::Value(value),
            Ok(None) => Event::Empty,
            Err(error) => Event::Error(error),
        }
    }

    /// Unwraps back into stream terms. The captured error is returned verbatim.
    pub fn into_option(self) -> Result<Option<T>, E> {
        match self {
            Event::Value(value) => Ok(Some(value)),
            Event::Error(error) => Err(error),
            Event::Empty => Ok(None),
        }
    }
}
