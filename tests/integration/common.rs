//! Shared helpers for integration tests.

use assert_cmd::Command;
use tempfile::TempDir;

/// A temporary resource store plus a way to run `glean` against it.
pub struct TestStore {
    temp: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("failed to create temp store"),
        }
    }

    /// A `glean` command pointed at this store.
    pub fn glean(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("glean").expect("binary builds");
        cmd.arg("--resources-dir")
            .arg(self.temp.path().join("resources"))
            .args(args);
        cmd
    }

    /// Define the standard three-resource fixture:
    /// Gadget = 2x Widget + 4x Bolt, Widget = 3x Bolt, Bolt atomic.
    pub fn seed_gadget(&self) {
        self.glean(&["add", "Bolt", "--atomic"]).assert().success();
        self.glean(&["add", "Widget", "--dep", "Bolt=3"])
            .assert()
            .success();
        self.glean(&["add", "Gadget", "--dep", "Widget=2", "--dep", "Bolt=4"])
            .assert()
            .success();
    }
}
