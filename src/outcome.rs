use std::fmt::{Display, Formatter};

use crate::diagnostics::fail;

/// Outcome of an operation which can fail in an expected way.
///
/// Exactly one case is active and it's fixed at construction. Expected failures stay as data
/// until a boundary decides to turn them into a fault via [unwrap_or_fail].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use = "this `Outcome` may be a `Failure`, which should be handled"]
pub enum Outcome<T> {
    /// The operation succeeded with `value`
    Success { value: T },
    /// The operation failed, `error` says why
    Failure { error: String },
}

/// Wrap `value` in the success case
pub fn make_success<T>(value: T) -> Outcome<T> {
    Outcome::Success { value }
}

/// Wrap `error` in the failure case
pub fn make_failure<T>(error: impl Into<String>) -> Outcome<T> {
    Outcome::Failure { error: error.into() }
}

/// Whether `outcome` is the success case
pub fn is_success<T>(outcome: &Outcome<T>) -> bool {
    matches!(outcome, Outcome::Success { .. })
}

/// Extract the value, or raise a fault with the failure's message. The failure path never returns.
pub fn unwrap_or_fail<T>(outcome: Outcome<T>) -> T {
    match outcome {
        Outcome::Success { value } => value,
        Outcome::Failure { error } => fail(error)
    }
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        is_success(self)
    }

    pub fn is_failure(&self) -> bool {
        !is_success(self)
    }

    /// The success value, `None` on failure
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success { value } => Some(value),
            Outcome::Failure { .. } => None
        }
    }

    /// The failure message, `None` on success
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure { error } => Some(error)
        }
    }

    pub fn unwrap_or_fail(self) -> T {
        unwrap_or_fail(self)
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Success { value } => Outcome::Success { value },
            Outcome::Failure { error } => Outcome::Failure { error: error.clone() }
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success { value } => Outcome::Success { value: f(value) },
            Outcome::Failure { error } => Outcome::Failure { error }
        }
    }

    /// Chain another fallible step. The first failure short-circuits.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Success { value } => f(value),
            Outcome::Failure { error } => Outcome::Failure { error }
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Outcome::Success { value } => Ok(value),
            Outcome::Failure { error } => Err(error)
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => make_success(value),
            Err(error) => make_failure(error.to_string())
        }
    }
}

impl<T: Display> Display for Outcome<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success { value } => write!(f, "ok: {}", value),
            Outcome::Failure { error } => write!(f, "error: {}", error)
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::diagnostics::intercept;
    use super::{is_success, make_failure, make_success, unwrap_or_fail, Outcome};

    #[test]
    fn success_is_success_and_keeps_its_value() {
        for v in [0, 1, -7, 42, i64::MAX, i64::MIN] {
            let outcome = make_success(v);
            assert!(is_success(&outcome));
            assert_eq!(outcome.value(), Some(&v));
            assert_eq!(outcome.error(), None);
        }
        let outcome = make_success(vec!["a".to_string()]);
        assert!(outcome.is_success());
        assert_eq!(outcome.value().map(Vec::len), Some(1));
    }

    #[test]
    fn failure_is_not_success() {
        let long = "x".repeat(1000);
        for e in ["", "Missing value", long.as_str()] {
            let outcome: Outcome<u8> = make_failure(e);
            assert!(!is_success(&outcome));
            assert!(outcome.is_failure());
            assert_eq!(outcome.error(), Some(e));
            assert_eq!(outcome.value(), None);
        }
    }

    #[test]
    fn unwrap_or_fail_returns_success_without_raising() {
        for v in ["", "value", "Missing value"] {
            assert_eq!(intercept(|| unwrap_or_fail(make_success(v))), Ok(v));
        }
    }

    #[test]
    fn unwrap_or_fail_raises_with_the_failure_message() {
        for e in ["", "Missing value", "Lesson with id 9 not found", "tab\there"] {
            let fault = intercept(|| unwrap_or_fail(make_failure::<u32>(e))).unwrap_err();
            assert_eq!(fault.message(), e);
        }
    }

    #[test]
    fn success_scenario_yields_42() {
        let success: Outcome<i32> = Outcome::Success { value: 42 };
        assert_eq!(success.unwrap_or_fail(), 42);
    }

    #[test]
    fn failure_scenario_is_caught_at_the_call_site() {
        let failure: Outcome<i32> = Outcome::Failure { error: "Missing value".to_string() };
        let caught = intercept(|| failure.unwrap_or_fail());
        assert_eq!(caught.map_err(|fault| fault.message), Err("Missing value".to_string()));
    }

    #[test]
    fn and_then_short_circuits_on_first_failure() {
        let halve = |n: u32| if n % 2 == 0 {
            make_success(n / 2)
        } else {
            make_failure(format!("{} is odd", n))
        };
        assert_eq!(make_success(8).and_then(halve).and_then(halve), make_success(2));
        assert_eq!(make_success(6).and_then(halve).and_then(halve), make_failure("3 is odd"));
        assert_eq!(make_failure::<u32>("first").and_then(halve), make_failure("first"));
    }

    #[test]
    fn converts_from_result_and_back() {
        let parsed: Outcome<u8> = "300".parse::<u8>().into();
        assert_eq!(parsed.error(), Some("number too large to fit in target type"));
        let parsed: Outcome<u8> = "30".parse::<u8>().into();
        assert_eq!(parsed.map(|n| n + 1).into_result(), Ok(31));
    }

    #[test]
    fn displays_the_active_case() {
        assert_eq!(make_success(1.5).to_string(), "ok: 1.5");
        assert_eq!(make_failure::<f64>("nope").to_string(), "error: nope");
    }
}
