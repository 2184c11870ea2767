//! Test support utilities for wallet-bridge integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own temporary project dir and home dir. Child
/// processes use `.current_dir()`, so tests can run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with a project config file.
    pub fn with_config(contents: &str) -> Self {
        let t = Self::new();
        t.write_config(contents);
        t
    }

    /// Path of the project config file.
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(".wallet-bridge.toml")
    }

    /// Write the project config file.
    pub fn write_config(&self, contents: &str) {
        fs::write(self.config_path(), contents).expect("failed to write config");
    }

    /// Read the project config file.
    pub fn read_config(&self) -> String {
        fs::read_to_string(self.config_path()).expect("failed to read config")
    }

    /// Path of the per-user config file under the temp home.
    pub fn user_config_path(&self) -> PathBuf {
        self.home
            .path()
            .join(".config")
            .join("wallet-bridge")
            .join("config.toml")
    }
}
