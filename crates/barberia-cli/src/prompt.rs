//! Interactive input: confirmations and passwords.
//!
//! Passwords are read with echo disabled when standard input is a terminal.
//! Piped input is read line by line so scripts can still feed answers.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Context, Result};
use termimad::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};

/// Reads one line from standard input after printing `label`.
pub fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush().context("Failed to write prompt")?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from standard input")?;
    if read == 0 {
        bail!("No input given");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Like [`prompt`], but the typed characters are not shown.
pub fn prompt_hidden(label: &str) -> Result<String> {
    if !io::stdin().is_terminal() {
        return prompt(label);
    }

    print!("{label}");
    io::stdout().flush().context("Failed to write prompt")?;

    terminal::enable_raw_mode().context("Failed to hide input")?;
    let line = read_hidden_line();
    terminal::disable_raw_mode().context("Failed to restore terminal")?;
    println!();
    line
}

fn read_hidden_line() -> Result<String> {
    let mut line = String::new();
    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read().context("Failed to read from terminal")?
        else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }

        match code {
            KeyCode::Enter => return Ok(line),
            KeyCode::Backspace => {
                line.pop();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                bail!("Input cancelled")
            }
            KeyCode::Char(c) => line.push(c),
            _ => {}
        }
    }
}

/// Asks for a new password twice and returns it when both entries agree.
pub fn new_password() -> Result<String> {
    let password = prompt_hidden("Password: ")?;
    let confirmation = prompt_hidden("Confirm password: ")?;
    confirm_password(password, &confirmation)
}

/// Checks a password against its confirmation.
pub fn confirm_password(password: String, confirmation: &str) -> Result<String> {
    if password != confirmation {
        bail!("Passwords do not match");
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_password_requires_match() {
        assert_eq!(
            confirm_password("secret1".to_string(), "secret1").expect("match"),
            "secret1"
        );

        let err = confirm_password("secret1".to_string(), "secret2").expect_err("mismatch");
        assert_eq!(err.to_string(), "Passwords do not match");
    }
}
