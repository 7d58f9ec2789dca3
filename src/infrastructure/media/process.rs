use std::process::Output;
use std::time::Duration;

use tokio::process::Command;

/// Runs an external media tool to completion, killing it on timeout or when
/// the awaiting future is dropped.
pub(crate) async fn run_tool(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<Output, String> {
    let mut command = Command::new(program);
    command.args(args).kill_on_drop(true);

    let output = tokio::time::timeout(timeout, command.output())
        .await
        .map_err(|_| format!("{} timed out after {}s", program, timeout.as_secs()))?
        .map_err(|e| format!("failed to execute {}: {}", program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            stderr.trim()
        ));
    }

    Ok(output)
}

/// Verifies a media tool binary is runnable.
pub fn check_binary(program: &str) -> Result<(), String> {
    let output = std::process::Command::new(program)
        .arg("-version")
        .output()
        .map_err(|e| format!("{} not found: {}", program, e))?;
    if output.status.success() {
        Ok(())
    } else {
        Err(format!("{} -version exited with {}", program, output.status))
    }
}
