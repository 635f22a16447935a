//! Dynamic import probing.
//!
//! The audited records declare Python classes, so the "running environment"
//! the audit must check against is a Python interpreter. [`ImportProbe`]
//! abstracts that primitive: resolve a module, resolve a full dotted class
//! path, or attempt construction with resolved arguments. The production
//! implementation shells out to the configured interpreter; tests swap in
//! the fixtures from [`crate::fixtures`].

use std::process::Stdio;
use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::process::Command;

/// Why a probe did not succeed. `NotFound` is distinguishable from other
/// failures so callers can tell "module/class absent" from "probe broke".
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("probe failed: {0}")]
    Failed(String),

    #[error("probe timed out after {0:?}")]
    TimedOut(Duration),
}

/// The dynamic-import primitive consumed by the pipeline.
pub trait ImportProbe {
    /// Import a top-level module.
    async fn import_module(&self, module: &str) -> Result<(), ProbeError>;

    /// Resolve a full dotted class path to an attribute.
    async fn import_path(&self, class_path: &str) -> Result<(), ProbeError>;

    /// Attempt to construct the class with resolved arguments.
    async fn construct(
        &self,
        class_path: &str,
        args: &[Value],
        kwargs: &Map<String, Value>,
    ) -> Result<(), ProbeError>;
}

const IMPORT_MODULE: &str = r"
import importlib, sys
try:
    importlib.import_module(sys.argv[1])
except ImportError as exc:
    print(exc, file=sys.stderr)
    sys.exit(3)
";

const IMPORT_PATH: &str = r"
import importlib, sys
mod, _, attr = sys.argv[1].rpartition('.')
try:
    getattr(importlib.import_module(mod), attr)
except (ImportError, AttributeError) as exc:
    print(exc, file=sys.stderr)
    sys.exit(3)
";

const CONSTRUCT: &str = r"
import importlib, json, sys
mod, _, attr = sys.argv[1].rpartition('.')
try:
    cls = getattr(importlib.import_module(mod), attr)
except (ImportError, AttributeError) as exc:
    print(exc, file=sys.stderr)
    sys.exit(3)
try:
    cls(*json.loads(sys.argv[2]), **json.loads(sys.argv[3]))
except Exception as exc:
    print(exc, file=sys.stderr)
    sys.exit(4)
";

/// Subprocess-based probe against a local Python interpreter.
///
/// Every invocation is bounded by the configured timeout; a hung
/// interpreter is killed and reported as [`ProbeError::TimedOut`].
pub struct PythonProbe {
    python: String,
    timeout: Duration,
}

impl PythonProbe {
    #[must_use]
    pub fn new(python: &str, timeout: Duration) -> Self {
        Self {
            python: python.to_string(),
            timeout,
        }
    }

    async fn run(&self, script: &str, argv: &[&str]) -> Result<(), ProbeError> {
        let mut command = Command::new(&self.python);
        command
            .arg("-c")
            .arg(script)
            .args(argv)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| ProbeError::TimedOut(self.timeout))?
            .map_err(|error| ProbeError::Failed(format!("failed to spawn probe: {error}")))?;

        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        match output.status.code() {
            Some(3) => Err(ProbeError::NotFound(stderr)),
            _ => Err(ProbeError::Failed(stderr)),
        }
    }
}

impl ImportProbe for PythonProbe {
    async fn import_module(&self, module: &str) -> Result<(), ProbeError> {
        self.run(IMPORT_MODULE, &[module]).await
    }

    async fn import_path(&self, class_path: &str) -> Result<(), ProbeError> {
        self.run(IMPORT_PATH, &[class_path]).await
    }

    async fn construct(
        &self,
        class_path: &str,
        args: &[Value],
        kwargs: &Map<String, Value>,
    ) -> Result<(), ProbeError> {
        let args_json = serde_json::to_string(args)
            .map_err(|error| ProbeError::Failed(error.to_string()))?;
        let kwargs_json = serde_json::to_string(kwargs)
            .map_err(|error| ProbeError::Failed(error.to_string()))?;
        self.run(CONSTRUCT, &[class_path, &args_json, &kwargs_json])
            .await
    }
}
