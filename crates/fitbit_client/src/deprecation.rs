//! Deprecation notices for legacy call shapes.
//!
//! Notices go through a [`Deprecations`] hook rather than being logged inline,
//! so the query code stays free of side effects and tests can observe or
//! silence them.

use std::fmt;
use std::sync::Arc;

pub const TARGET: &str = "fitbit_client::deprecation";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeprecationNotice {
    pub operation: &'static str,
    pub replacements: &'static [&'static str],
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let uses: Vec<String> = self.replacements.iter().map(|r| format!("`{r}`")).collect();
        write!(
            f,
            "[DEPRECATION] `{}` is deprecated.  Please use {} instead.",
            self.operation,
            uses.join(" or ")
        )
    }
}

type Hook = Arc<dyn Fn(&DeprecationNotice) + Send + Sync>;

/// Where deprecation notices go. Defaults to a `tracing` warning.
#[derive(Clone)]
pub struct Deprecations {
    hook: Option<Hook>,
}

impl Default for Deprecations {
    fn default() -> Self {
        Self::with_hook(|notice| tracing::warn!(target: TARGET, "{}", notice))
    }
}

impl fmt::Debug for Deprecations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deprecations")
            .field("enabled", &self.hook.is_some())
            .finish()
    }
}

impl Deprecations {
    pub fn silent() -> Self {
        Self { hook: None }
    }

    pub fn with_hook<F>(hook: F) -> Self
    where
        F: Fn(&DeprecationNotice) + Send + Sync + 'static,
    {
        Self {
            hook: Some(Arc::new(hook)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.hook.is_some()
    }

    pub fn emit(&self, notice: &DeprecationNotice) {
        if let Some(hook) = &self.hook {
            hook(notice);
        }
    }
}
