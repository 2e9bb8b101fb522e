//! Shell command execution.

use crate::error::{Result, SetupError};
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Stdout and stderr interleaved in the order lines arrived.
    ///
    /// Only populated by the streaming executors.
    pub combined: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            combined: String::new(),
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            combined: String::new(),
            duration,
            success: false,
        }
    }

    fn with_combined(mut self, combined: String) -> Self {
        self.combined = combined;
        self
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

/// Output line from command execution.
#[derive(Debug, Clone)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

impl OutputLine {
    /// The line text regardless of which stream produced it.
    pub fn text(&self) -> &str {
        match self {
            OutputLine::Stdout(s) | OutputLine::Stderr(s) => s,
        }
    }
}

/// Callback for streaming output.
pub type OutputCallback = Box<dyn Fn(OutputLine) + Send>;

/// Execute a command line through the platform command interpreter.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = shell_command(command);
    apply_options(&mut cmd, options);

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    tracing::debug!("Executing: {}", command);

    let output = cmd.output().map_err(|e| launch_failed(command, e))?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Execute a command and return success/failure.
///
/// Output is captured and discarded. A command that cannot be started
/// counts as a failure.
pub fn execute_check(command: &str, cwd: Option<&Path>) -> bool {
    let options = CommandOptions {
        cwd: cwd.map(|p| p.to_path_buf()),
        capture_stdout: true,
        capture_stderr: true,
        ..Default::default()
    };

    execute(command, &options)
        .map(|r| r.success)
        .unwrap_or(false)
}

/// Spawn a program directly (no interpreter) with streaming output.
///
/// On Windows, `.bat` and `.cmd` files are handled by the standard library
/// so build scripts can be launched this way as well.
pub fn execute_program_streaming(
    program: &Path,
    args: &[&str],
    options: &CommandOptions,
    callback: OutputCallback,
) -> Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    apply_options(&mut cmd, options);

    let label = program.display().to_string();
    tracing::debug!("Spawning (streaming): {} {:?}", label, args);
    run_streaming(cmd, &label, callback)
}

fn run_streaming(mut cmd: Command, label: &str, callback: OutputCallback) -> Result<CommandResult> {
    let start = Instant::now();

    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| launch_failed(label, e))?;

    let (tx, rx) = mpsc::channel();

    let stdout_handle = child
        .stdout
        .take()
        .map(|out| spawn_reader(out, tx.clone(), OutputLine::Stdout));
    let stderr_handle = child
        .stderr
        .take()
        .map(|err| spawn_reader(err, tx, OutputLine::Stderr));

    // Drain both readers through one channel so the combined log keeps
    // arrival order.
    let mut combined = String::new();
    for line in rx {
        combined.push_str(line.text());
        combined.push('\n');
        callback(line);
    }

    let stdout_output = stdout_handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();
    let stderr_output = stderr_handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();

    let status = child.wait().map_err(|e| launch_failed(label, e))?;

    let duration = start.elapsed();

    let result = if status.success() {
        CommandResult::success(stdout_output, stderr_output, duration)
    } else {
        CommandResult::failure(status.code(), stdout_output, stderr_output, duration)
    };
    Ok(result.with_combined(combined))
}

fn launch_failed(command: &str, err: io::Error) -> SetupError {
    SetupError::CommandLaunchFailed {
        command: command.to_string(),
        message: err.to_string(),
    }
}

fn spawn_reader<R>(
    source: R,
    tx: mpsc::Sender<OutputLine>,
    wrap: fn(String) -> OutputLine,
) -> thread::JoinHandle<String>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let reader = BufReader::new(source);
        let mut output = String::new();
        for line in reader.lines().map_while(std::result::Result::ok) {
            output.push_str(&line);
            output.push('\n');
            let _ = tx.send(wrap(line));
        }
        output
    })
}

fn apply_options(cmd: &mut Command, options: &CommandOptions) {
    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
}

fn shell_command(command: &str) -> Command {
    let shell = super::platform::shell_executable();
    let mut cmd = Command::new(shell);
    cmd.arg(shell_flag());
    cmd.arg(command);
    cmd
}

/// Get the flag to pass commands to the interpreter.
fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-c"
    }
}
