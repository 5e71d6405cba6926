//! Task context port.
//!
//! The executing agent hands the task its named inputs, its ambient
//! variables, an output channel for progress lines and a cancellation
//! token. Everything the core reads from the environment goes through here.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

use crate::errors::ArtifactError;

/// Port trait for the agent-provided execution context.
///
/// # Implementations
///
/// - `MemoryTaskContext` - for tests and for embedding with pre-built inputs
/// - `EnvTaskContext` in `artifact-cli` - reads the process environment
pub trait TaskContext: Send + Sync {
    /// Raw value of a named input, if provided.
    fn input(&self, name: &str) -> Option<String>;

    /// Value of a required input.
    ///
    /// Missing or whitespace-only values fail with `MissingInput`. The
    /// returned value is trimmed.
    fn required_input(&self, name: &str) -> Result<String, ArtifactError> {
        self.input(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ArtifactError::missing_input(name))
    }

    /// Value of an ambient variable, if set.
    fn variable(&self, name: &str) -> Option<String>;

    /// Write one progress line to the step log.
    fn output(&self, message: &str);

    /// Token cancelled when the step is cancelled.
    fn cancellation_token(&self) -> CancellationToken;
}

/// A task context backed by in-memory maps.
///
/// Output lines are recorded and can be inspected with `lines()`.
#[derive(Debug, Default)]
pub struct MemoryTaskContext {
    inputs: HashMap<String, String>,
    variables: HashMap<String, String>,
    lines: Mutex<Vec<String>>,
    token: CancellationToken,
}

impl MemoryTaskContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an input.
    #[must_use]
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    /// Set an ambient variable.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Use an externally owned cancellation token.
    #[must_use]
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Lines written through `output` so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl TaskContext for MemoryTaskContext {
    fn input(&self, name: &str) -> Option<String> {
        self.inputs.get(name).cloned()
    }

    fn variable(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }

    fn output(&self, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(message.to_string());
        }
    }

    fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }
}
