//! External tool invocation.
//!
//! Every tool the pipeline drives (the sysroot script, pip, `pyqtdeploycli`,
//! `qmake`, `make`) goes through [`ToolCommand`]. Working directory and extra
//! environment are set on the child only; the orchestrator's own process state
//! is never mutated.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// Errors raised while running an external tool.
#[derive(Debug, Error)]
pub enum ToolError {
  /// The program could not be started at all.
  #[error("failed to launch {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The program ran and exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {command}")]
  Failed { command: String, code: Option<i32> },
}

/// A single invocation of an external program.
#[derive(Debug, Clone)]
pub struct ToolCommand {
  program: PathBuf,
  args: Vec<OsString>,
  cwd: Option<PathBuf>,
  env: BTreeMap<OsString, OsString>,
}

impl ToolCommand {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: None,
      env: BTreeMap::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  /// Add a variable on top of the inherited environment.
  pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  pub fn program(&self) -> &Path {
    &self.program
  }

  pub fn get_args(&self) -> impl Iterator<Item = &OsStr> {
    self.args.iter().map(OsString::as_os_str)
  }

  pub fn get_current_dir(&self) -> Option<&Path> {
    self.cwd.as_deref()
  }

  pub fn get_env(&self, key: &str) -> Option<&OsStr> {
    self.env.get(OsStr::new(key)).map(OsString::as_os_str)
  }

  /// Human-readable command line for logs and error messages.
  pub fn display(&self) -> String {
    let mut line = self.program.display().to_string();
    for arg in &self.args {
      line.push(' ');
      line.push_str(&arg.to_string_lossy());
    }
    line
  }

  fn command(&self) -> Command {
    let mut command = Command::new(&self.program);
    command.args(&self.args).envs(&self.env).kill_on_drop(true);
    if let Some(cwd) = &self.cwd {
      command.current_dir(cwd);
    }
    command
  }

  /// Run the tool with its output streamed to the console.
  ///
  /// A non-zero exit is an error.
  pub async fn run(&self) -> Result<(), ToolError> {
    let line = self.display();
    info!(cmd = %line, "running");
    debug!(cwd = ?self.cwd, env = ?self.env, "spawning process");

    let status = self
      .command()
      .stdin(Stdio::null())
      .status()
      .await
      .map_err(|source| self.spawn_error(source))?;

    if !status.success() {
      return Err(ToolError::Failed {
        command: line,
        code: status.code(),
      });
    }
    Ok(())
  }

  /// Run the tool and capture its output, whatever the exit status.
  pub async fn output(&self) -> Result<Output, ToolError> {
    debug!(cmd = %self.display(), "probing");
    let output = self
      .command()
      .stdin(Stdio::null())
      .output()
      .await
      .map_err(|source| self.spawn_error(source))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if !stderr.is_empty() {
        debug!(stderr = %stderr, "command stderr");
      }
    }
    Ok(output)
  }

  /// Run the tool, capture stdout, and fail on a non-zero exit.
  pub async fn stdout(&self) -> Result<String, ToolError> {
    let output = self.output().await?;
    if !output.status.success() {
      return Err(ToolError::Failed {
        command: self.display(),
        code: output.status.code(),
      });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  fn spawn_error(&self, source: std::io::Error) -> ToolError {
    ToolError::Spawn {
      program: self.program.display().to_string(),
      source,
    }
  }
}
