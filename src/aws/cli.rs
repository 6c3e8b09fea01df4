//! AWS CLI command execution.
//!
//! Provides utilities for running `aws` commands and capturing their output.

use crate::config;
use crate::error::ProviderError;
use colored::Colorize;
use regex::Regex;
use std::sync::OnceLock;
use tokio::process::Command;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]+)\s*"#).expect("Invalid Regex")
    })
}

/// Run a shell command and return its stdout.
///
/// The command string is split on spaces, with quoted substrings preserved.
/// `envs` are set on the child process only, which keeps secrets off the
/// command line.
///
/// # Returns
/// * `Ok(String)` - The stdout output on success
/// * `Err` - If the command fails, prints invalid UTF-8 or produces too much output
pub async fn run(cmd: &str, envs: &[(&str, &str)]) -> Result<String, ProviderError> {
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let cmds: Vec<&str> = split_and_strip(cmd);
    log::trace!("split cmds={:?}", cmds);

    let Some((program, args)) = cmds.split_first() else {
        return Err("Empty command".into());
    };

    let mut command = Command::new(program);
    command.args(args);
    for (key, value) in envs {
        command.env(key, value);
    }

    let output = command.output().await.map_err(|e| {
        log::error!("Command execution failed: {}", e);
        format!("Failed to execute {program}: {e}")
    })?;

    if output.status.success() {
        log::debug!("Success cmd: {cmd}");
        log::debug!("Success output.stdout.len(): {}", output.stdout.len());

        if output.stdout.len() > config::MAX_RESPONSE_BYTES {
            return Err(format!(
                "Response too large: {} bytes for command: {:?}",
                output.stdout.len(),
                cmds
            )
            .into());
        }
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::trace!(
            "code={code:?}, status={status}\n┎######\nstderr=\n{stderr}\n┖######",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        return Err(stderr.trim().to_string().into());
    }

    let stdout = String::from_utf8(output.stdout).map_err(|e| format!("Invalid UTF-8: {}", e))?;

    Ok(stdout)
}

/// Split a command string on spaces, preserving quoted substrings.
fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .captures_iter(input)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)).or_else(|| c.get(3)))
        .map(|m| m.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_strip_complex() {
        let input = "Hello 'World War'  'fail' Rust";
        let expected = vec!["Hello", "World War", "fail", "Rust"];
        assert_eq!(split_and_strip(input), expected);
    }

    #[test]
    fn test_split_and_strip_nospaces() {
        let input = "NoSpacesHere";
        let expected = vec!["NoSpacesHere"];
        assert_eq!(split_and_strip(input), expected);
    }

    #[test]
    fn test_split_and_strip_empty_quotes() {
        let input = "Empty '' Single Quotes";
        let expected = vec!["Empty", "", "Single", "Quotes"];
        assert_eq!(split_and_strip(input), expected);
    }

    #[test]
    fn test_split_aws_filter() {
        let input = "aws ec2 describe-subnets --filters 'Name=vpc-id,Values=vpc-7c872910' --output json";
        let expected = vec![
            "aws",
            "ec2",
            "describe-subnets",
            "--filters",
            "Name=vpc-id,Values=vpc-7c872910",
            "--output",
            "json",
        ];
        assert_eq!(split_and_strip(input), expected);
    }

    #[tokio::test]
    async fn test_run_empty_command() {
        let err = run("   ", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "Empty command");
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let err = run("dignet-no-such-program-xyz --help", &[])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to execute"));
    }
}
