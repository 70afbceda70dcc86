#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated data and config locations for one test.
pub struct TestEnv {
    _temp: TempDir,
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let data_dir = temp.path().join("data");
        let config_path = temp.path().join("config.json");
        Self {
            _temp: temp,
            data_dir,
            config_path,
        }
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir.join("pocketbook_transactions.json")
    }

    /// CLI invocation bound to this environment, with colors off.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("pocketbook_cli").expect("binary exists");
        cmd.env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--config")
            .arg(&self.config_path);
        cmd
    }

    pub fn add(&self, name: &str, amount: &str, kind: &str, category: &str) {
        self.cli()
            .args(["add", "--name", name, "--amount", amount, "--type", kind])
            .args(["--category", category])
            .assert()
            .success();
    }
}

pub fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}
