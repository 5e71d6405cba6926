//! Task context backed by flags and the process environment.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use artifact_core::TaskContext;
use tokio_util::sync::CancellationToken;

/// Looks up a fallback value by environment variable name.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Environment variable holding a task input: `INPUT_` plus the upper-cased name.
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.to_uppercase())
}

/// Environment variable holding an agent variable: `build.buildId` → `BUILD_BUILDID`.
pub fn variable_env_name(name: &str) -> String {
    name.to_uppercase().replace('.', "_")
}

/// Task context for a standalone process.
///
/// Explicit values win over the environment. Progress lines go to stdout.
pub struct EnvTaskContext {
    inputs: HashMap<String, String>,
    variables: HashMap<String, String>,
    env: EnvLookup,
    token: CancellationToken,
}

impl fmt::Debug for EnvTaskContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvTaskContext")
            .field("inputs", &self.inputs)
            .field("variables", &self.variables)
            .field("cancelled", &self.token.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl EnvTaskContext {
    /// Create a context falling back to the process environment.
    pub fn new(
        inputs: impl IntoIterator<Item = (String, String)>,
        variables: impl IntoIterator<Item = (String, String)>,
        token: CancellationToken,
    ) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            variables: variables.into_iter().collect(),
            env: Arc::new(|key: &str| std::env::var(key).ok()),
            token,
        }
    }

    /// Replace the process environment with `lookup` for fallback values.
    #[must_use]
    pub fn with_env_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.env = Arc::new(lookup);
        self
    }
}

impl TaskContext for EnvTaskContext {
    fn input(&self, name: &str) -> Option<String> {
        self.inputs
            .get(name)
            .cloned()
            .or_else(|| (self.env)(&input_env_name(name)))
    }

    fn variable(&self, name: &str) -> Option<String> {
        self.variables
            .get(name)
            .cloned()
            .or_else(|| (self.env)(&variable_env_name(name)))
    }

    fn output(&self, message: &str) {
        println!("{message}");
    }

    fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }
}
