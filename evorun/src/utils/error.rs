/// An error of the engine: a human readable message which is reported as is by managers and the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct GenericError(String);

/// A type alias for result type with `GenericError`.
pub type GenericResult<T> = Result<T, GenericError>;

impl GenericError {
    /// Combines many errors into one, e.g. to report all violated constraints of a configuration at once.
    pub fn combine(errors: Vec<GenericError>, separator: &str) -> Self {
        Self(errors.into_iter().map(|err| err.0).collect::<Vec<_>>().join(separator))
    }
}

impl std::fmt::Display for GenericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for GenericError {}

impl From<String> for GenericError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for GenericError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<serde_json::Error> for GenericError {
    fn from(err: serde_json::Error) -> Self {
        Self(format!("cannot read parameters: {err}"))
    }
}
