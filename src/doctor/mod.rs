//! Doctor command for setup diagnostics
//!
//! Checks configuration, credentials, the remote API and the triage tables.

use crate::assistant::CompletionBackend;
use crate::cli::Config;
use crate::triage::TriageTables;
use colored::Colorize;
use std::sync::Arc;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Doctor diagnostics
pub struct Doctor {
    config: Config,
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl Doctor {
    /// `backend` is `None` when running offline or without credentials
    pub fn new(config: Config, backend: Option<Arc<dyn CompletionBackend>>) -> Self {
        Self { config, backend }
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        vec![
            self.check_config(),
            self.check_api_key(),
            self.check_api_reachable().await,
            self.check_tables(),
        ]
    }

    fn check_config(&self) -> HealthCheck {
        match self.config.validate() {
            Ok(()) => HealthCheck::new("Configuration", HealthStatus::Pass),
            Err(e) => HealthCheck::new("Configuration", HealthStatus::Fail(e.to_string())),
        }
    }

    fn check_api_key(&self) -> HealthCheck {
        if self.config.assistant.offline {
            return HealthCheck::new(
                "API key",
                HealthStatus::Warn("offline mode, key not needed".to_string()),
            );
        }
        match self.config.api_key() {
            Ok(_) => HealthCheck::new("API key", HealthStatus::Pass),
            Err(_) => HealthCheck::new(
                "API key",
                HealthStatus::Warn(format!(
                    "{} not set, built-in guidance only",
                    self.config.api.api_key_env
                )),
            ),
        }
    }

    async fn check_api_reachable(&self) -> HealthCheck {
        let Some(backend) = &self.backend else {
            return HealthCheck::new(
                "Remote API",
                HealthStatus::Warn("skipped, no remote backend".to_string()),
            );
        };

        if backend.health_check().await {
            HealthCheck::new("Remote API", HealthStatus::Pass)
        } else {
            HealthCheck::new(
                "Remote API",
                HealthStatus::Fail(format!("cannot reach {}", self.config.api.base_url)),
            )
        }
    }

    fn check_tables(&self) -> HealthCheck {
        let result = match self.config.tables_path() {
            Some(path) => TriageTables::from_file(&path).map(|t| t.keyword_count()),
            None => TriageTables::builtin()
                .validate()
                .map(|_| TriageTables::builtin().keyword_count()),
        };

        match result {
            Ok(count) if count > 0 => HealthCheck::new("Triage tables", HealthStatus::Pass),
            Ok(_) => HealthCheck::new(
                "Triage tables",
                HealthStatus::Warn("no category keywords".to_string()),
            ),
            Err(e) => HealthCheck::new("Triage tables", HealthStatus::Fail(e.to_string())),
        }
    }

    /// Display health check results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}\n", "🔍 HealthBuddy Diagnostics".bold());
        println!("{:<20} Status", "Check");
        println!("{}", "=".repeat(50));

        for check in checks {
            let status = match &check.status {
                HealthStatus::Pass => "✅ PASS".green(),
                HealthStatus::Warn(msg) => format!("⚠️  WARN: {}", msg).yellow(),
                HealthStatus::Fail(msg) => format!("❌ FAIL: {}", msg).red(),
            };
            println!("{:<20} {}", check.name, status);
        }

        println!();
    }

    /// False if any check failed; warnings pass
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct StubBackend {
        reachable: bool,
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            Ok(String::new())
        }

        async fn health_check(&self) -> bool {
            self.reachable
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    fn offline_config() -> Config {
        let mut config = Config::default();
        config.assistant.offline = true;
        config
    }

    fn status_of<'a>(checks: &'a [HealthCheck], name: &str) -> &'a HealthStatus {
        &checks.iter().find(|c| c.name == name).unwrap().status
    }

    #[test]
    fn test_health_status_equality() {
        assert_eq!(HealthStatus::Pass, HealthStatus::Pass);
        assert_eq!(
            HealthStatus::Warn("test".to_string()),
            HealthStatus::Warn("test".to_string())
        );
        assert_ne!(HealthStatus::Pass, HealthStatus::Fail("x".to_string()));
    }

    #[test]
    fn test_overall_status() {
        let passing = vec![
            HealthCheck::new("A", HealthStatus::Pass),
            HealthCheck::new("B", HealthStatus::Warn("minor".to_string())),
        ];
        assert!(Doctor::overall_status(&passing));

        let failing = vec![
            HealthCheck::new("A", HealthStatus::Pass),
            HealthCheck::new("B", HealthStatus::Fail("broken".to_string())),
        ];
        assert!(!Doctor::overall_status(&failing));
    }

    #[tokio::test]
    async fn test_offline_diagnostics_pass_with_warnings() {
        let doctor = Doctor::new(offline_config(), None);
        let checks = doctor.run_diagnostics().await;

        assert_eq!(checks.len(), 4);
        assert_eq!(status_of(&checks, "Configuration"), &HealthStatus::Pass);
        assert!(matches!(status_of(&checks, "API key"), HealthStatus::Warn(_)));
        assert!(matches!(status_of(&checks, "Remote API"), HealthStatus::Warn(_)));
        assert_eq!(status_of(&checks, "Triage tables"), &HealthStatus::Pass);
        assert!(Doctor::overall_status(&checks));
    }

    #[tokio::test]
    async fn test_unreachable_backend_fails() {
        let backend: Arc<dyn CompletionBackend> = Arc::new(StubBackend { reachable: false });
        let doctor = Doctor::new(Config::default(), Some(backend));
        let checks = doctor.run_diagnostics().await;

        assert!(matches!(status_of(&checks, "Remote API"), HealthStatus::Fail(_)));
        assert!(!Doctor::overall_status(&checks));
    }

    #[tokio::test]
    async fn test_reachable_backend_passes() {
        let backend: Arc<dyn CompletionBackend> = Arc::new(StubBackend { reachable: true });
        let doctor = Doctor::new(Config::default(), Some(backend));
        let checks = doctor.run_diagnostics().await;

        assert_eq!(status_of(&checks, "Remote API"), &HealthStatus::Pass);
    }

    #[tokio::test]
    async fn test_invalid_config_and_tables_fail() {
        let dir = TempDir::new().unwrap();
        let tables = dir.path().join("tables.toml");
        std::fs::write(&tables, "not = [valid").unwrap();

        let mut config = offline_config();
        config.api.temperature = 5.0;
        config.triage.tables_path = Some(tables.to_string_lossy().into_owned());

        let checks = Doctor::new(config, None).run_diagnostics().await;
        assert!(matches!(status_of(&checks, "Configuration"), HealthStatus::Fail(_)));
        assert!(matches!(status_of(&checks, "Triage tables"), HealthStatus::Fail(_)));
    }
}
