//! Read-only access to the environment variable table.

use std::collections::HashMap;

/// A source of environment variables. The lookup layer only ever reads it.
pub trait Environment: Send + Sync {
    /// The value stored under `name`, or `None` if it is unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// The hosting process's environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_environment_reads_entries() {
        let env = HashMap::from([("FOO".to_owned(), "bar".to_owned())]);
        assert_eq!(env.var("FOO").as_deref(), Some("bar"));
        assert_eq!(env.var("MISSING"), None);
    }

    #[test]
    fn process_environment_missing_var() {
        assert_eq!(
            ProcessEnvironment.var("LAMBDA_ENV_VARS_TEST_SURELY_UNSET"),
            None
        );
    }
}
