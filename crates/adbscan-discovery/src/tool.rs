//! Invocation of the `adb` executable

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

use crate::adb::AdbError;

/// File name of the adb executable on this platform
#[cfg(windows)]
pub const ADB_EXECUTABLE: &str = "adb.exe";
#[cfg(not(windows))]
pub const ADB_EXECUTABLE: &str = "adb";

/// SDK environment variables checked by `AdbCommand::locate`, in order
const SDK_ENV_VARS: [&str; 2] = ["ANDROID_HOME", "ANDROID_SDK_ROOT"];

/// Source of raw `devices -l` output
pub trait DeviceTool {
    /// Run the device listing and return its stdout
    fn devices_output(&self) -> Result<String, AdbError>;

    /// Human-readable name of the tool, for logs and listings
    fn describe(&self) -> String;
}

/// Runs a real adb executable as a subprocess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbCommand {
    program: PathBuf,
    server_args: Vec<String>,
}

impl AdbCommand {
    /// Use an explicit adb executable
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            server_args: Vec::new(),
        }
    }

    /// Find adb in the Android SDK, falling back to `PATH`
    pub fn locate() -> Self {
        Self::new(locate_from(|name| std::env::var_os(name)))
    }

    /// Global arguments placed before `devices`, e.g. `-H host -P port`
    pub fn with_server_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.server_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn server_args(&self) -> &[String] {
        &self.server_args
    }
}

impl DeviceTool for AdbCommand {
    fn devices_output(&self) -> Result<String, AdbError> {
        debug!(program = %self.program.display(), args = ?self.server_args, "Running adb devices -l");

        let output = Command::new(&self.program)
            .args(&self.server_args)
            .args(["devices", "-l"])
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AdbError::ToolNotFound(self.program.clone()),
                _ => AdbError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(status = %output.status, stderr = %stderr, "adb devices failed");
            return Err(AdbError::ToolFailed {
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn describe(&self) -> String {
        self.program.display().to_string()
    }
}

/// Resolve the adb path from SDK variables read through `var`
fn locate_from<F>(var: F) -> PathBuf
where
    F: Fn(&str) -> Option<OsString>,
{
    for name in SDK_ENV_VARS {
        // an empty root would make the path relative to the working directory
        if let Some(root) = var(name).filter(|v| !v.is_empty()) {
            let candidate = Path::new(&root).join("platform-tools").join(ADB_EXECUTABLE);
            if candidate.is_file() {
                debug!(var = name, path = %candidate.display(), "Found adb in SDK");
                return candidate;
            }
        }
    }
    PathBuf::from(ADB_EXECUTABLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_sdk() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let tools = dir.path().join("platform-tools");
        std::fs::create_dir_all(&tools).unwrap();
        let adb = tools.join(ADB_EXECUTABLE);
        std::fs::write(&adb, b"").unwrap();
        (dir, adb)
    }

    #[test]
    fn test_locate_falls_back_to_path() {
        let path = locate_from(|_| None);
        assert_eq!(path, PathBuf::from(ADB_EXECUTABLE));
    }

    #[test]
    fn test_locate_android_home() {
        let (dir, adb) = fake_sdk();
        let root = dir.path().as_os_str().to_owned();
        let path = locate_from(|name| (name == "ANDROID_HOME").then(|| root.clone()));
        assert_eq!(path, adb);
    }

    #[test]
    fn test_locate_sdk_root_when_home_has_no_adb() {
        let empty = TempDir::new().unwrap();
        let (dir, adb) = fake_sdk();
        let path = locate_from(|name| match name {
            "ANDROID_HOME" => Some(empty.path().as_os_str().to_owned()),
            "ANDROID_SDK_ROOT" => Some(dir.path().as_os_str().to_owned()),
            _ => None,
        });
        assert_eq!(path, adb);
    }

    #[test]
    fn test_locate_ignores_empty_sdk_vars() {
        let (dir, adb) = fake_sdk();
        let path = locate_from(|name| match name {
            "ANDROID_HOME" => Some(OsString::new()),
            "ANDROID_SDK_ROOT" => Some(dir.path().as_os_str().to_owned()),
            _ => None,
        });
        assert_eq!(path, adb);

        let path = locate_from(|_| Some(OsString::new()));
        assert_eq!(path, PathBuf::from(ADB_EXECUTABLE));
    }

    #[test]
    fn test_server_args() {
        let cmd = AdbCommand::new("adb").with_server_args(["-H", "10.0.0.2", "-P", "5037"]);
        assert_eq!(cmd.server_args(), ["-H", "10.0.0.2", "-P", "5037"]);
        assert_eq!(cmd.describe(), "adb");
    }

    #[test]
    fn test_missing_executable() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-adb");
        let err = AdbCommand::new(&missing).devices_output().unwrap_err();
        match err {
            AdbError::ToolNotFound(path) => assert_eq!(path, missing),
            other => panic!("expected ToolNotFound, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit() {
        let err = AdbCommand::new("false").devices_output().unwrap_err();
        assert!(matches!(err, AdbError::ToolFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_output_without_header() {
        // echo prints its arguments back: "devices -l"
        let err = crate::adb::list_devices_with(&AdbCommand::new("echo")).unwrap_err();
        assert!(matches!(err, AdbError::MalformedOutput(_)));
    }
}
