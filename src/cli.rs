//! Command-line surface.

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, IsTerminal, Write};

#[derive(Debug, Parser)]
#[command(name = "ballotbox")]
#[command(version, about = "Terminal voting booth", long_about = None)]
pub struct Cli {
    /// Read a new admin password from stdin, store its hash in the config
    /// file and exit
    #[arg(long)]
    pub set_admin_password: bool,
}

/// Read the admin password. A terminal gets a hidden prompt; anything else
/// is read as one line.
pub fn read_admin_password() -> Result<String> {
    let stdin = io::stdin();
    let password = if stdin.is_terminal() {
        prompt_hidden("New admin password: ")?
    } else {
        read_line(stdin.lock())?
    };
    if password.is_empty() {
        bail!("admin password must not be empty");
    }
    Ok(password)
}

/// First line of `reader` without its line ending.
pub fn read_line(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read admin password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn prompt_hidden(prompt: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", prompt)?;
    stderr.flush()?;

    enable_raw_mode()?;
    let result = read_hidden();
    disable_raw_mode()?;
    writeln!(stderr)?;
    result
}

fn read_hidden() -> Result<String> {
    let mut password = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(password),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                bail!("cancelled")
            }
            KeyCode::Esc => bail!("cancelled"),
            KeyCode::Backspace => {
                password.pop();
            }
            KeyCode::Char(c) => password.push(c),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_runs_tui() {
        let cli = Cli::try_parse_from(["ballotbox"]).unwrap();
        assert!(!cli.set_admin_password);
    }

    #[test]
    fn test_set_admin_password_takes_no_value() {
        let cli = Cli::try_parse_from(["ballotbox", "--set-admin-password"]).unwrap();
        assert!(cli.set_admin_password);
        assert!(Cli::try_parse_from(["ballotbox", "--set-admin-password", "secret"]).is_err());
    }

    #[test]
    fn test_help_is_handled_by_clap() {
        let err = Cli::try_parse_from(["ballotbox", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        let err = Cli::try_parse_from(["ballotbox", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_read_line_strips_line_ending() {
        assert_eq!(read_line(&b"open sesame\r\nrest\n"[..]).unwrap(), "open sesame");
        assert_eq!(read_line(&b"  padded \n"[..]).unwrap(), "  padded ");
        assert_eq!(read_line(&b""[..]).unwrap(), "");
    }
}
