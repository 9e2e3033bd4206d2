//! Test support utilities for dotenvify integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// Test environment with an isolated temp directory.
///
/// Commands run with `.current_dir()` inside the temp dir and with the
/// Azure DevOps environment variables removed, so host configuration
/// never leaks into a test.
pub struct Test {
    pub dir: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a dotenvify command rooted in the test directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("dotenvify").expect("failed to find dotenvify binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("AZURE_DEVOPS_URL");
        cmd.env_remove("AZURE_DEVOPS_ORG");
        cmd.env_remove("AZURE_DEVOPS_PROJECT");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Write a file inside the test directory and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("failed to write test file");
        path
    }

    /// Read a file from the test directory.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).expect("failed to read test file")
    }

    /// Whether a file exists in the test directory.
    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Run `dotenvify convert` with extra arguments.
    pub fn convert(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("convert")
            .args(args)
            .output()
            .expect("failed to run dotenvify convert")
    }

    /// Run `dotenvify fetch` with extra arguments.
    pub fn fetch(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("fetch")
            .args(args)
            .output()
            .expect("failed to run dotenvify fetch")
    }
}

/// Assert that a command output was successful.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("Command failed:\n{}", stderr);
    }
}

/// Assert that a command output failed.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "Expected command to fail but it succeeded"
    );
}

/// Get stdout as String.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as String.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert stderr contains a string.
pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(
        err.contains(expected),
        "stderr missing '{}', got: {}",
        expected,
        err
    );
}
