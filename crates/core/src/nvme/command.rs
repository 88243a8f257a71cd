use super::NvmeCli;
use crate::config::Config;
use crate::error::{CoreError, Result};
use serde_json::Value;
use std::io::Read;
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs the real nvme-cli binary
pub struct CommandRunner {
    bin: String,
    json_flag: String,
    timeout: Option<Duration>,
}

impl CommandRunner {
    pub fn new(config: &Config) -> Self {
        Self {
            bin: config.nvme_bin.clone(),
            json_flag: config.json_flag.clone(),
            timeout: config.timeout(),
        }
    }

    fn build_args(&self, args: &[&str], append_json_flag: bool) -> Vec<String> {
        let mut call_args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        if append_json_flag {
            call_args.push(self.json_flag.clone());
        }
        call_args
    }

    fn execute(&self, call_args: &[String], command: &str) -> Result<Output> {
        let mut cmd = Command::new(&self.bin);
        cmd.args(call_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let spawn_err = |source| CoreError::Spawn {
            command: command.to_string(),
            source,
        };

        match self.timeout {
            None => cmd.output().map_err(spawn_err),
            Some(limit) => {
                let child = cmd.spawn().map_err(spawn_err)?;
                wait_with_deadline(child, limit, command)
            }
        }
    }
}

impl NvmeCli for CommandRunner {
    /// Looks the binary up on `PATH`, or checks the configured path directly
    fn is_available(&self) -> bool {
        which::which(&self.bin).is_ok()
    }

    fn run(&self, args: &[&str], append_json_flag: bool) -> Result<Value> {
        let call_args = self.build_args(args, append_json_flag);
        let command = format!("{} {}", self.bin, call_args.join(" "));
        debug!(command = %command, "invoking nvme-cli");

        let output = self.execute(&call_args, &command)?;

        // Vendor plugins exit non-zero on partial success, so the status alone is not fatal.
        if !output.status.success() {
            warn!(
                command = %command,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "nvme-cli exited unsuccessfully"
            );
        }

        serde_json::from_slice(&output.stdout).map_err(|e| CoreError::malformed(command, e))
    }
}

/// Wait for `child`, killing it once `limit` has passed.
fn wait_with_deadline(mut child: Child, limit: Duration, command: &str) -> Result<Output> {
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);
    let deadline = Instant::now() + limit;

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            // The child may exit between try_wait and kill.
            let _ = child.kill();
            child.wait()?;
            return Err(CoreError::Timeout {
                command: command.to_string(),
                secs: limit.as_secs(),
            });
        }
        thread::sleep(POLL_INTERVAL);
    };

    Ok(Output {
        status,
        stdout: collect(stdout)?,
        stderr: collect(stderr)?,
    })
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn collect(handle: Option<thread::JoinHandle<std::io::Result<Vec<u8>>>>) -> Result<Vec<u8>> {
    match handle {
        None => Ok(Vec::new()),
        Some(handle) => handle
            .join()
            .map_err(|_| CoreError::tool("output reader thread panicked"))?
            .map_err(CoreError::from),
    }
}
