//! Remote Execution Context
//!
//! The remote working directory is explicit state: a step that runs inside
//! the deployment root enters it through a guard, and the previous directory
//! is restored when the guard drops, on success and failure alike.

use std::ops::Deref;

/// Remote working directory stack for one pipeline run.
#[derive(Debug, Default)]
pub struct RemoteContext {
    dirs: Vec<String>,
}

impl RemoteContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory remote commands run in, `None` for the login directory.
    pub fn cwd(&self) -> Option<&str> {
        self.dirs.last().map(String::as_str)
    }

    /// Enter `dir` until the returned guard is dropped.
    pub fn enter(&mut self, dir: impl Into<String>) -> ContextGuard<'_> {
        let depth = self.dirs.len();
        self.dirs.push(dir.into());
        tracing::trace!(depth = depth + 1, cwd = ?self.cwd(), "entered remote directory");
        ContextGuard {
            context: self,
            depth,
        }
    }
}

/// Scoped view of a [`RemoteContext`] with a directory entered.
#[derive(Debug)]
pub struct ContextGuard<'a> {
    context: &'a mut RemoteContext,
    depth: usize,
}

impl ContextGuard<'_> {
    /// Nest a further directory inside this scope.
    pub fn enter(&mut self, dir: impl Into<String>) -> ContextGuard<'_> {
        self.context.enter(dir)
    }
}

impl Deref for ContextGuard<'_> {
    type Target = RemoteContext;

    fn deref(&self) -> &Self::Target {
        &*self.context
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.context.dirs.truncate(self.depth);
        tracing::trace!(depth = self.depth, "left remote directory");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_login_directory() {
        assert_eq!(RemoteContext::new().cwd(), None);
    }

    #[test]
    fn guard_restores_on_drop() {
        let mut context = RemoteContext::new();
        {
            let guard = context.enter("/opt/riepete");
            assert_eq!(guard.cwd(), Some("/opt/riepete"));
        }
        assert_eq!(context.cwd(), None);
    }

    #[test]
    fn nested_scopes_unwind_in_order() {
        let mut context = RemoteContext::new();
        {
            let mut outer = context.enter("/opt/riepete");
            {
                let inner = outer.enter("/opt/riepete/lib");
                assert_eq!(inner.cwd(), Some("/opt/riepete/lib"));
            }
            assert_eq!(outer.cwd(), Some("/opt/riepete"));
        }
        assert_eq!(context.cwd(), None);
    }

    #[test]
    fn guard_restores_when_scope_exits_with_error() {
        fn failing_step(context: &mut RemoteContext) -> Result<(), String> {
            let guard = context.enter("/opt/riepete");
            assert_eq!(guard.cwd(), Some("/opt/riepete"));
            Err("chown failed".to_string())
        }

        let mut context = RemoteContext::new();
        assert!(failing_step(&mut context).is_err());
        assert_eq!(context.cwd(), None);
    }
}
