//! Running the sledge build script.

use std::path::Path;

use crate::error::{Result, SetupError};
use crate::shell::{execute_program_streaming, CommandOptions, OutputCallback, OutputLine};

/// Everything the build script printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    /// Stdout and stderr, merged in arrival order.
    pub combined: String,
}

/// Runs a build script inside a directory.
pub trait BuildRunner {
    /// Run `script` with `dir` as working directory.
    ///
    /// # Errors
    ///
    /// `BuildLaunchFailed` if it can't be started, `BuildFailed` on a
    /// non-zero exit.
    fn build(&self, dir: &Path, script: &str) -> Result<BuildOutput>;
}

/// Spawns the script directly, echoing its output to the console in every
/// output mode.
#[derive(Debug, Clone)]
pub struct ScriptBuildRunner {
    mirror: bool,
}

impl Default for ScriptBuildRunner {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ScriptBuildRunner {
    /// Create a runner; `mirror` echoes output lines as they arrive.
    pub fn new(mirror: bool) -> Self {
        Self { mirror }
    }
}

impl BuildRunner for ScriptBuildRunner {
    fn build(&self, dir: &Path, script: &str) -> Result<BuildOutput> {
        let program = dir.join(script);
        if !program.is_file() {
            return Err(SetupError::BuildLaunchFailed {
                script: script.to_string(),
                dir: dir.to_path_buf(),
                message: "script not found".to_string(),
            });
        }

        let options = CommandOptions {
            cwd: Some(dir.to_path_buf()),
            ..Default::default()
        };

        let mirror = self.mirror;
        let callback: OutputCallback = Box::new(move |line| {
            if mirror {
                match line {
                    OutputLine::Stdout(text) => println!("{}", text),
                    OutputLine::Stderr(text) => eprintln!("{}", text),
                }
            }
        });

        let result = execute_program_streaming(&program, &[], &options, callback).map_err(
            |e| SetupError::BuildLaunchFailed {
                script: script.to_string(),
                dir: dir.to_path_buf(),
                message: e.to_string(),
            },
        )?;

        tracing::debug!(
            "{} in {} exited with {:?} after {:?}",
            script,
            dir.display(),
            result.exit_code,
            result.duration
        );

        if !result.success {
            return Err(SetupError::BuildFailed {
                script: script.to_string(),
                dir: dir.to_path_buf(),
                code: result.exit_code,
            });
        }

        Ok(BuildOutput {
            combined: result.combined,
        })
    }
}
