//! External bundler command
//!
//! Runs a user-configured argv once per target and takes its stdout as the
//! bundle. Placeholders: `{entry}` (absolute entry path), `{name}` (target
//! name), `{mode}` (`development` / `production`).

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::CONFIG_FILENAME;
use crate::domain::ports::{BundleRequest, Bundler};
use crate::domain::value_objects::MODE_VAR;
use crate::error::{ExtforgeError, ExtforgeResult};

/// Secrets module path handed to the child process
pub const SECRETS_VAR: &str = "EXTFORGE_SECRETS";

#[derive(Debug, Clone)]
pub struct CommandBundler {
    program: String,
    args: Vec<String>,
    project_root: PathBuf,
}

impl CommandBundler {
    pub fn new(argv: &[String], project_root: &Path) -> ExtforgeResult<Self> {
        let (program, args) = argv
            .split_first()
            .filter(|(program, _)| !program.trim().is_empty())
            .ok_or_else(|| ExtforgeError::ConfigParse {
                file: project_root.join(CONFIG_FILENAME),
                message: "bundler.command must name a program".to_string(),
            })?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            project_root: project_root.to_path_buf(),
        })
    }

    /// Argument list with placeholders filled in
    pub fn expand_args(&self, request: &BundleRequest<'_>) -> Vec<String> {
        let entry = request.entry_path.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{entry}", &entry)
                    .replace("{name}", request.target.name())
                    .replace("{mode}", request.env.mode().as_str())
            })
            .collect()
    }
}

impl Bundler for CommandBundler {
    fn name(&self) -> &str {
        &self.program
    }

    fn bundle(&self, request: &BundleRequest<'_>) -> ExtforgeResult<String> {
        let transform_err = |message: String| ExtforgeError::Transform {
            path: request.entry_path.to_path_buf(),
            message,
        };

        let mut cmd = Command::new(&self.program);
        cmd.args(self.expand_args(request))
            .current_dir(&self.project_root)
            .envs(request.env.exposed_vars())
            .env(MODE_VAR, request.env.mode().as_str());
        match request.env.secrets_override() {
            Some(path) => cmd.env(SECRETS_VAR, path),
            None => cmd.env_remove(SECRETS_VAR),
        };

        let output = cmd
            .output()
            .map_err(|e| transform_err(format!("failed to run '{}': {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(transform_err(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| transform_err(format!("'{}' produced non-UTF-8 output", self.program)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::BuildTarget;
    use crate::domain::value_objects::{BuildMode, EnvironmentConfig, RuntimeContext};

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_command_is_rejected() {
        let err = CommandBundler::new(&[], Path::new("/p")).unwrap_err();
        assert!(err.is_configuration_error());

        let err = CommandBundler::new(&argv(&[" "]), Path::new("/p")).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn placeholders_are_expanded() {
        let bundler = CommandBundler::new(
            &argv(&["esbuild", "{entry}", "--define={mode}", "--name={name}"]),
            Path::new("/p"),
        )
        .unwrap();
        let target = BuildTarget::new("popup", "src/popup.js", RuntimeContext::Popup);
        let env = EnvironmentConfig::for_mode(BuildMode::Production);

        let args = bundler.expand_args(&BundleRequest {
            target: &target,
            entry_path: Path::new("/p/src/popup.js"),
            source: "",
            env: &env,
            secrets: None,
        });

        assert_eq!(
            args,
            vec!["/p/src/popup.js", "--define=production", "--name=popup"]
        );
        assert_eq!(bundler.name(), "esbuild");
    }

    #[cfg(unix)]
    #[test]
    fn stdout_becomes_bundle_and_env_is_passed() {
        let dir = tempfile::tempdir().unwrap();
        let bundler = CommandBundler::new(
            &argv(&["sh", "-c", "printf '%s:%s' \"$NODE_ENV\" {name}"]),
            dir.path(),
        )
        .unwrap();
        let target = BuildTarget::new("background", "bg.js", RuntimeContext::Background);
        let env = EnvironmentConfig::for_mode(BuildMode::Production);

        let out = bundler
            .bundle(&BundleRequest {
                target: &target,
                entry_path: &dir.path().join("bg.js"),
                source: "",
                env: &env,
                secrets: None,
            })
            .unwrap();

        assert_eq!(out, "production:background");
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_is_a_transform_error() {
        let dir = tempfile::tempdir().unwrap();
        let bundler =
            CommandBundler::new(&argv(&["sh", "-c", "echo boom >&2; exit 3"]), dir.path()).unwrap();
        let target = BuildTarget::new("popup", "p.js", RuntimeContext::Popup);
        let env = EnvironmentConfig::for_mode(BuildMode::Development);

        let err = bundler
            .bundle(&BundleRequest {
                target: &target,
                entry_path: &dir.path().join("p.js"),
                source: "",
                env: &env,
                secrets: None,
            })
            .unwrap_err();

        assert!(matches!(err, ExtforgeError::Transform { .. }));
        assert!(err.to_string().contains("boom"));
    }
}
