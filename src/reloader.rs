//! Graceful service reloads via systemctl.

use tracing::{info, warn};

use crate::cmd::{args_to_strings, CommandExecutor};
use crate::error::SyncError;

const SYSTEMCTL: &str = "systemctl";

/// Reloads services through the system service manager.
///
/// Failures are per-service: one failed reload is logged and the loop
/// continues with the next service.
pub struct Reloader<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> Reloader<'a> {
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }

    /// Reload each live service in order. Returns the number of failures.
    pub fn reload_all(&self, services: &[String]) -> usize {
        let mut failures = 0;

        for service in services {
            match self.reload_one(service) {
                Ok(true) => info!("Reloaded {service}"),
                Ok(false) => info!("Service {service} is not active, skipping"),
                Err(e) => {
                    warn!("{e}");
                    failures += 1;
                }
            }
        }

        failures
    }

    /// Reload a single service if it is live. Ok(false) means skipped.
    fn reload_one(&self, service: &str) -> Result<bool, SyncError> {
        let wrap = |reason: String| SyncError::ServiceReload {
            service: service.to_string(),
            reason,
        };

        let status = self
            .executor
            .execute(SYSTEMCTL, &args_to_strings(&["is-active", "--quiet", service]))
            .map_err(|e| wrap(e.to_string()))?;
        if !status.success {
            return Ok(false);
        }

        let reload = self
            .executor
            .execute(SYSTEMCTL, &args_to_strings(&["reload", service]))
            .map_err(|e| wrap(e.to_string()))?;
        if reload.success {
            Ok(true)
        } else {
            let stderr = reload.stderr.trim();
            Err(wrap(if stderr.is_empty() {
                format!("exit code {:?}", reload.code)
            } else {
                stderr.to_string()
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::{CommandOutput, MockCommandExecutor};

    fn ok_output() -> CommandOutput {
        CommandOutput {
            success: true,
            code: Some(0),
            ..Default::default()
        }
    }

    fn failed_output(stderr: &str) -> CommandOutput {
        CommandOutput {
            stderr: stderr.to_string(),
            success: false,
            code: Some(1),
            ..Default::default()
        }
    }

    fn services(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_live_service_is_reloaded() {
        let mut mock = MockCommandExecutor::new();
        mock.expect_execute()
            .withf(|_, args| args[0] == "is-active")
            .times(1)
            .returning(|_, _| Ok(ok_output()));
        mock.expect_execute()
            .withf(|_, args| args == ["reload".to_string(), "nginx".to_string()])
            .times(1)
            .returning(|_, _| Ok(ok_output()));

        let failures = Reloader::new(&mock).reload_all(&services(&["nginx"]));
        assert_eq!(failures, 0);
    }

    #[test]
    fn test_not_live_service_is_skipped_without_reload() {
        let mut mock = MockCommandExecutor::new();
        mock.expect_execute()
            .withf(|_, args| args[0] == "is-active")
            .times(1)
            .returning(|_, _| Ok(failed_output("")));
        // No reload expectation: calling it would fail the test

        let failures = Reloader::new(&mock).reload_all(&services(&["nginx"]));
        assert_eq!(failures, 0);
    }

    #[test]
    fn test_failed_reload_continues_with_next_service() {
        let mut mock = MockCommandExecutor::new();
        // Both services are live
        mock.expect_execute()
            .withf(|_, args| args[0] == "is-active")
            .times(2)
            .returning(|_, _| Ok(ok_output()));
        // First reload fails, second succeeds
        mock.expect_execute()
            .withf(|_, args| args == ["reload".to_string(), "nginx".to_string()])
            .times(1)
            .returning(|_, _| Ok(failed_output("Job failed")));
        mock.expect_execute()
            .withf(|_, args| args == ["reload".to_string(), "haproxy".to_string()])
            .times(1)
            .returning(|_, _| Ok(ok_output()));

        let failures = Reloader::new(&mock).reload_all(&services(&["nginx", "haproxy"]));
        assert_eq!(failures, 1);
    }

    #[test]
    fn test_reload_error_carries_stderr() {
        let mut mock = MockCommandExecutor::new();
        mock.expect_execute()
            .withf(|_, args| args[0] == "is-active")
            .returning(|_, _| Ok(ok_output()));
        mock.expect_execute()
            .withf(|_, args| args[0] == "reload")
            .returning(|_, _| Ok(failed_output("nginx.service not found")));

        let result = Reloader::new(&mock).reload_one("nginx");
        match result {
            Err(SyncError::ServiceReload { service, reason }) => {
                assert_eq!(service, "nginx");
                assert_eq!(reason, "nginx.service not found");
            }
            other => panic!("Expected ServiceReload error, got {other:?}"),
        }
    }

    #[test]
    fn test_executor_error_counts_as_failure() {
        let mut mock = MockCommandExecutor::new();
        mock.expect_execute()
            .returning(|_, _| Err(anyhow::anyhow!("systemctl not found")));

        let failures = Reloader::new(&mock).reload_all(&services(&["nginx", "haproxy"]));
        assert_eq!(failures, 2);
    }
}
