//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several suites
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Editor command that leaves the document untouched.
pub const NOOP_EDITOR: &str = "true";

/// Fluent wrapper around `assert_cmd::Command` for the `keep` binary.
///
/// Commands never see the developer's own config or store: the config
/// path is redirected and the editor defaults to one that changes nothing.
pub struct KeepCommand {
    args: Vec<String>,
    config: Option<PathBuf>,
    editor: String,
    stdin: Option<Vec<u8>>,
}

impl KeepCommand {
    /// Creates a new command for the `keep` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config: None,
            editor: NOOP_EDITOR.to_string(),
            stdin: None,
        }
    }

    /// Sets the `--store` option.
    pub fn store(mut self, path: &Path) -> Self {
        self.args.push("--store".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Points `KEEP_CONFIG` at the given file.
    pub fn config(mut self, path: &Path) -> Self {
        self.config = Some(path.to_path_buf());
        self
    }

    /// Sets the editor command (`$EDITOR`).
    pub fn editor(mut self, editor: &str) -> Self {
        self.editor = editor.to_string();
        self
    }

    /// Feeds bytes to the command's stdin.
    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("keep").expect("Failed to find keep binary");
        cmd.args(&self.args)
            .env("EDITOR", &self.editor)
            .env_remove("VISUAL")
            .env_remove("KEEP_STORE")
            .env_remove("KEEP_LOG");
        match &self.config {
            Some(path) => cmd.env("KEEP_CONFIG", path),
            None => cmd.env("KEEP_CONFIG", "/nonexistent/keep/config.toml"),
        };
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `new` command.
    pub fn new_note(self) -> Self {
        self.args(["new"])
    }

    /// Configures for the `search` command with comma separated tags.
    pub fn search(self, tags: &str) -> Self {
        self.args(["search", tags])
    }

    /// Configures for the `show` command with an id.
    pub fn show(self, id: &str) -> Self {
        self.args(["show", id])
    }

    /// Configures for the `tags` command.
    pub fn tags(self) -> Self {
        self.args(["tags"])
    }

    /// Configures for the `import` command reading stdin.
    pub fn import(self) -> Self {
        self.args(["import"])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for KeepCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        KeepCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = KeepCommand::new().tags().format_json();
        let args = cmd.get_args();
        assert!(args.contains(&"tags".to_string()));
        assert!(args.contains(&"--format".to_string()));
        assert!(args.contains(&"json".to_string()));
    }
}
