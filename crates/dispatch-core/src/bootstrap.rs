//! Execution-environment resolution
//!
//! Decides once, at process startup, whether this run happens inside the
//! managed platform or on a developer machine, and produces the [`Bootstrap`]
//! object that every later step consumes by reference. The only ambient
//! mutation is the one-time dotenv load in local mode; nothing else reads the
//! process environment after this module has run.

use std::env;
use std::path::Path;

use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Marker variable injected by the managed platform. Its presence (any
/// value) switches the process into managed mode; its value is the run id.
pub const MANAGED_RUN_ID_VAR: &str = "GT_CLOUD_STRUCTURE_RUN_ID";

/// Overrides the managed platform's event endpoint.
pub const CLOUD_BASE_URL_VAR: &str = "GT_CLOUD_BASE_URL";

/// Credential for the managed event endpoint.
pub const CLOUD_API_KEY_VAR: &str = "GT_CLOUD_API_KEY";

/// Credential for the chat provider.
pub const PROVIDER_API_KEY_VAR: &str = "OPENAI_API_KEY";

const DEFAULT_CLOUD_BASE_URL: &str = "https://cloud.griptape.ai";
const LOCAL_ENV_FILE: &str = ".env";

/// Where this process is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Hosted by the managed platform; configuration is injected and run
    /// telemetry is shipped to the platform's event sink.
    Managed,
    /// A developer machine; configuration comes from a local `.env` file.
    Local,
}

/// Cloud coordinates available in managed mode
#[derive(Debug, Clone)]
pub struct CloudEnv {
    /// Identifier of this run, assigned by the platform
    pub run_id: String,
    /// Base URL of the event endpoint
    pub base_url: String,
    /// Bearer credential for the event endpoint
    pub api_key: String,
}

/// Resolved startup environment
///
/// Produced exactly once by [`Bootstrap::resolve`] at the top of `main`,
/// then passed by reference to the components that need configuration.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    mode: ExecutionMode,
    run_id: String,
    cloud: Option<CloudEnv>,
    provider_api_key: Option<String>,
}

impl Bootstrap {
    /// Resolve the execution environment.
    ///
    /// Managed mode (marker variable present): the platform has already
    /// injected configuration, so the local env file is never read, and the
    /// cloud coordinates are captured for the event listener.
    ///
    /// Local mode: `.env` in the working directory is loaded into the
    /// process environment before any other configuration is read.
    pub fn resolve() -> Result<Self> {
        Self::resolve_from(Path::new(LOCAL_ENV_FILE))
    }

    /// Resolve against an explicit env-file path.
    pub fn resolve_from(env_file: &Path) -> Result<Self> {
        match env::var(MANAGED_RUN_ID_VAR) {
            Ok(run_id) => {
                tracing::debug!(%run_id, "managed environment detected");

                let api_key = env::var(CLOUD_API_KEY_VAR).map_err(|_| {
                    CoreError::config(format!(
                        "{CLOUD_API_KEY_VAR} must be set in a managed environment"
                    ))
                })?;
                let base_url = env::var(CLOUD_BASE_URL_VAR)
                    .unwrap_or_else(|_| DEFAULT_CLOUD_BASE_URL.to_string());

                Ok(Self {
                    mode: ExecutionMode::Managed,
                    run_id: run_id.clone(),
                    cloud: Some(CloudEnv {
                        run_id,
                        base_url,
                        api_key,
                    }),
                    provider_api_key: env::var(PROVIDER_API_KEY_VAR).ok(),
                })
            }
            Err(_) => {
                load_env_file(env_file)?;

                Ok(Self {
                    mode: ExecutionMode::Local,
                    run_id: Uuid::new_v4().to_string(),
                    cloud: None,
                    provider_api_key: env::var(PROVIDER_API_KEY_VAR).ok(),
                })
            }
        }
    }

    /// The resolved execution mode
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Whether this process runs inside the managed platform
    pub fn is_managed(&self) -> bool {
        self.mode == ExecutionMode::Managed
    }

    /// Identifier of this run: platform-assigned in managed mode, generated
    /// locally otherwise
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Cloud coordinates, present only in managed mode
    pub fn cloud(&self) -> Option<&CloudEnv> {
        self.cloud.as_ref()
    }

    /// Chat provider credential
    ///
    /// Errors if the key was absent from the resolved environment, so the
    /// process fails before any agent is constructed.
    pub fn provider_api_key(&self) -> Result<&str> {
        self.provider_api_key
            .as_deref()
            .ok_or_else(|| CoreError::config(format!("{PROVIDER_API_KEY_VAR} is not set")))
    }
}

/// Load a dotenv-style file into the process environment.
///
/// A missing file is not an error; a file that exists but cannot be loaded
/// (unreadable, malformed line) is.
fn load_env_file(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded local environment file");
            Ok(())
        }
        Err(e) if e.not_found() => {
            tracing::debug!(path = %path.display(), "no local environment file");
            Ok(())
        }
        Err(e) => Err(CoreError::env(format!(
            "failed to load {}: {e}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Process-wide env mutation: these tests must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_vars() {
        env::remove_var(MANAGED_RUN_ID_VAR);
        env::remove_var(CLOUD_BASE_URL_VAR);
        env::remove_var(CLOUD_API_KEY_VAR);
        env::remove_var(PROVIDER_API_KEY_VAR);
    }

    fn env_file(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(".env");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{contents}").unwrap();
        path
    }

    #[test]
    fn test_local_mode_loads_env_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_vars();
        env::remove_var("DISPATCH_BOOTSTRAP_TEST_KEY");

        let dir = tempfile::tempdir().unwrap();
        let path = env_file(&dir, "DISPATCH_BOOTSTRAP_TEST_KEY=loaded\n");

        let bootstrap = Bootstrap::resolve_from(&path).unwrap();

        assert_eq!(bootstrap.mode(), ExecutionMode::Local);
        assert!(!bootstrap.is_managed());
        assert!(bootstrap.cloud().is_none());
        assert_eq!(env::var("DISPATCH_BOOTSTRAP_TEST_KEY").unwrap(), "loaded");

        env::remove_var("DISPATCH_BOOTSTRAP_TEST_KEY");
    }

    #[test]
    fn test_managed_mode_skips_env_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_vars();
        env::remove_var("DISPATCH_BOOTSTRAP_SKIPPED_KEY");

        let dir = tempfile::tempdir().unwrap();
        let path = env_file(&dir, "DISPATCH_BOOTSTRAP_SKIPPED_KEY=should-not-load\n");

        env::set_var(MANAGED_RUN_ID_VAR, "run-42");
        env::set_var(CLOUD_API_KEY_VAR, "cloud-key");

        let bootstrap = Bootstrap::resolve_from(&path).unwrap();

        assert_eq!(bootstrap.mode(), ExecutionMode::Managed);
        assert_eq!(bootstrap.run_id(), "run-42");
        assert!(env::var("DISPATCH_BOOTSTRAP_SKIPPED_KEY").is_err());

        let cloud = bootstrap.cloud().unwrap();
        assert_eq!(cloud.run_id, "run-42");
        assert_eq!(cloud.api_key, "cloud-key");
        assert_eq!(cloud.base_url, DEFAULT_CLOUD_BASE_URL);

        clear_vars();
    }

    #[test]
    fn test_managed_mode_requires_cloud_key() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_vars();

        env::set_var(MANAGED_RUN_ID_VAR, "run-7");

        let dir = tempfile::tempdir().unwrap();
        let result = Bootstrap::resolve_from(&dir.path().join(".env"));
        assert!(matches!(result, Err(CoreError::Config(_))));

        clear_vars();
    }

    #[test]
    fn test_cloud_base_url_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_vars();

        env::set_var(MANAGED_RUN_ID_VAR, "run-9");
        env::set_var(CLOUD_API_KEY_VAR, "cloud-key");
        env::set_var(CLOUD_BASE_URL_VAR, "https://cloud.example.test");

        let dir = tempfile::tempdir().unwrap();
        let bootstrap = Bootstrap::resolve_from(&dir.path().join(".env")).unwrap();
        assert_eq!(
            bootstrap.cloud().unwrap().base_url,
            "https://cloud.example.test"
        );

        clear_vars();
    }

    #[test]
    fn test_missing_env_file_is_not_fatal() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_vars();

        let dir = tempfile::tempdir().unwrap();
        let bootstrap = Bootstrap::resolve_from(&dir.path().join("absent.env")).unwrap();
        assert_eq!(bootstrap.mode(), ExecutionMode::Local);
    }

    #[test]
    fn test_malformed_env_file_is_fatal() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_vars();

        let dir = tempfile::tempdir().unwrap();
        let path = env_file(&dir, "THIS IS NOT A VALID LINE\n");

        let result = Bootstrap::resolve_from(&path);
        assert!(matches!(result, Err(CoreError::Env(_))));
    }

    #[test]
    fn test_provider_api_key_missing() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_vars();

        let dir = tempfile::tempdir().unwrap();
        let bootstrap = Bootstrap::resolve_from(&dir.path().join(".env")).unwrap();
        assert!(bootstrap.provider_api_key().is_err());
    }

    #[test]
    fn test_local_run_ids_are_unique() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_vars();

        let dir = tempfile::tempdir().unwrap();
        let a = Bootstrap::resolve_from(&dir.path().join(".env")).unwrap();
        let b = Bootstrap::resolve_from(&dir.path().join(".env")).unwrap();
        assert_ne!(a.run_id(), b.run_id());
    }
}
