pub mod privilege;
pub mod version;

use std::process::Command;

/// Execute a command and return its stdout, failing on a non-zero exit
pub fn execute_command(cmd: &str, args: &[&str]) -> Result<String, std::io::Error> {
    let output = Command::new(cmd).args(args).output()?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(std::io::Error::other(String::from_utf8_lossy(
            &output.stderr,
        )))
    }
}

/// Execute a command and return its stdout whatever the exit status.
///
/// `kubectl version` exits non-zero when the server is unreachable but has
/// still printed the client version.
pub fn command_stdout(cmd: &str, args: &[&str]) -> Result<String, std::io::Error> {
    let output = Command::new(cmd).args(args).output()?;
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
