//! Isolated project environment with helpers to run the extforge binary.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fixtures::{ICONS, PROJECT_FILES};

/// Variables the binary reads from its environment
const SCRUBBED_VARS: &[&str] = &[
    "NODE_ENV",
    "EXTFORGE_OUT_DIR",
    "EXTFORGE_SECRETS",
    "npm_package_description",
    "npm_package_version",
];

/// Result of running an extforge command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// stdout parsed as NDJSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("bad NDJSON {l}: {e}")))
            .collect()
    }
}

/// Extension project in a temp directory
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    /// Stock project: five entries, four templates, two icons, manifest
    pub fn stock() -> Self {
        let env = Self::empty();
        for (rel, content) in PROJECT_FILES {
            env.write_project_file(rel, content);
        }
        for (rel, content) in ICONS {
            env.write_project_bytes(rel, content);
        }
        env
    }

    pub fn empty() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("Failed to create temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_extforge")),
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn output_path(&self, relative: &str) -> PathBuf {
        self.project_path("build").join(relative)
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run from the project root with a scrubbed environment plus `env_vars`
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path()).args(args);
        for var in SCRUBBED_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute extforge");
        to_result(output)
    }

    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        self.write_project_bytes(relative_path, content.as_bytes());
    }

    pub fn write_project_bytes(&self, relative_path: &str, content: &[u8]) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    pub fn read_output(&self, relative_path: &str) -> String {
        std::fs::read_to_string(self.output_path(relative_path))
            .unwrap_or_else(|e| panic!("Failed to read output {}: {}", relative_path, e))
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Sorted file names directly under `dir` (empty if it does not exist)
pub fn list_output(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
