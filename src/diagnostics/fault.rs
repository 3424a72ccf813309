use std::convert::Infallible;
use std::panic::{catch_unwind, panic_any, resume_unwind, AssertUnwindSafe};

use miette::Diagnostic;
use thiserror::Error;

/// Payload of the abnormal-termination signal.
///
/// A fault is raised by [fail] and unwinds the caller until it reaches an [intercept] boundary
/// (or the top of the thread). It is never returned as data: expected failures are
/// [crate::Outcome::Failure] instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(outcome_shapes::fault))]
pub struct Fault {
    /// Diagnostic message, exactly as passed to [fail]
    pub message: String,
}

impl Fault {
    pub fn new(message: impl Into<String>) -> Self {
        Fault { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Raise the abnormal-termination signal carrying `message`. Never returns.
pub fn fail(message: impl Into<String>) -> ! {
    panic_any(Fault::new(message))
}

/// Catch-all arm of an exhaustive dispatch.
///
/// The parameter is uninhabited, so the only way to call this is from an arm the compiler already
/// proved unreachable. If a variant gains a case that reaches a call site, that call site stops
/// type-checking.
pub fn exhaustive_check(value: Infallible) -> ! {
    match value {}
}

/// Run `f`, converting a [Fault] raised inside it into `Err`.
///
/// The panic hook already reported the fault where it was raised, so catching it is only logged
/// at `debug` level. Panics which don't carry a [Fault] are someone else's bug and keep unwinding.
///
/// Anything `f` mutated before the fault stays mutated: callers which keep using state `f` touched
/// after an `Err` must not rely on it being consistent.
pub fn intercept<T>(f: impl FnOnce() -> T) -> Result<T, Fault> {
    // Unwind safety is the caller's responsibility (see above), not enforced through `UnwindSafe`
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<Fault>() {
            Ok(fault) => {
                log::debug!("Caught fault: {}", fault);
                Err(*fault)
            }
            Err(payload) => resume_unwind(payload)
        }
    }
}
