//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a wallet-bridge command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME and XDG_CONFIG_HOME pointing into the temporary home
    /// - Current directory set to the test project directory
    /// - NO_COLOR set and inherited bridge variables removed
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd =
            Command::cargo_bin("wallet-bridge").expect("failed to find wallet-bridge binary");
        cmd.env("HOME", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("NO_COLOR", "1");
        for var in [
            "WALLET_BRIDGE_LOG",
            "WALLET_BRIDGE_CONFIG",
            "WALLET_BRIDGE_ENGINE",
            "WALLET_BRIDGE_STORAGE",
        ] {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `wallet-bridge call` with extra arguments.
    pub fn call(&self, command: &str, extra: &[&str]) -> Output {
        self.cmd()
            .arg("call")
            .arg(command)
            .args(extra)
            .output()
            .expect("failed to run wallet-bridge call")
    }

    /// Shortcut for `wallet-bridge call --secret-stdin`.
    pub fn call_with_secret(&self, command: &str, secret: &str, extra: &[&str]) -> Output {
        self.cmd()
            .arg("call")
            .arg(command)
            .arg("--secret-stdin")
            .args(extra)
            .write_stdin(format!("{}\n", secret))
            .output()
            .expect("failed to run wallet-bridge call")
    }

    /// Shortcut for `wallet-bridge preview` with extra arguments.
    pub fn preview(&self, command: &str, extra: &[&str]) -> Output {
        self.cmd()
            .arg("preview")
            .arg(command)
            .args(extra)
            .output()
            .expect("failed to run wallet-bridge preview")
    }

    /// Shortcut for `wallet-bridge init` with extra arguments.
    pub fn init_cmd(&self, extra: &[&str]) -> Output {
        self.cmd()
            .arg("init")
            .args(extra)
            .output()
            .expect("failed to run wallet-bridge init")
    }

    /// Shortcut for `wallet-bridge config`.
    pub fn show_config(&self, extra: &[&str]) -> Output {
        self.cmd()
            .arg("config")
            .args(extra)
            .output()
            .expect("failed to run wallet-bridge config")
    }
}
