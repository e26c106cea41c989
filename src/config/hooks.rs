use std::process::Command;
use std::sync::Arc;

use super::site::Hook;

/// Builds a hook that runs `line` as a command and waits for it to finish.
///
/// The line is split on whitespace into a program and its arguments, with no
/// quoting; use [`argv_hook`] when an argument contains spaces.
pub fn command_hook(line: &str) -> Result<Hook, String> {
    argv_hook(line.split_whitespace().map(str::to_string).collect())
}

/// Builds a hook that runs `argv[0]` with the remaining elements as arguments.
///
/// The hook fails if the program cannot be spawned or exits unsuccessfully.
pub fn argv_hook(argv: Vec<String>) -> Result<Hook, String> {
    let mut parts = argv.into_iter();
    let program = parts
        .next()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| "empty command".to_string())?;
    let args: Vec<String> = parts.collect();

    Ok(Arc::new(move || {
        tracing::debug!(%program, ?args, "running hook");
        let status = Command::new(&program).args(&args).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(format!("'{program}' exited with {status}").into())
        }
    }))
}
