//! Prompt and output adapter shared by all commands.
//!
//! Wraps a line reader and a writer so the commands can be driven from a
//! terminal or from scripted input in tests.

use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

use crate::cli::table;
use crate::services::MemberError;

/// Attempts per prompt before the last validation error is returned.
pub const MAX_ATTEMPTS: usize = 3;

pub struct Console<R, W> {
    input: R,
    output: W,
    interactive: bool,
    terminal: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    #[must_use]
    pub fn stdio(interactive: bool) -> Self {
        let stdin = io::stdin();
        let terminal = stdin.is_terminal();
        Self {
            input: stdin.lock(),
            output: io::stdout(),
            interactive,
            terminal,
        }
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// A console that never reads from the terminal directly.
    pub const fn new(input: R, output: W, interactive: bool) -> Self {
        Self {
            input,
            output,
            interactive,
            terminal: false,
        }
    }

    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self, label: &str, hidden: bool) -> Result<String, MemberError> {
        if hidden && self.terminal {
            return Ok(rpassword::prompt_password(label)?);
        }

        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(MemberError::validation("Aborted: no input"));
        }

        if hidden {
            writeln!(self.output)?;
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn ask_with<T, F>(&mut self, label: &str, hidden: bool, mut validate: F) -> Result<T, MemberError>
    where
        F: FnMut(&str) -> Result<T, MemberError>,
    {
        let mut last_error = None;

        for _ in 0..MAX_ATTEMPTS {
            let answer = self.read_answer(label, hidden)?;
            match validate(&answer) {
                Ok(value) => return Ok(value),
                Err(MemberError::Validation(message)) => {
                    self.error(&message)?;
                    last_error = Some(MemberError::Validation(message));
                }
                Err(other) => return Err(other),
            }
        }

        Err(last_error.unwrap_or_else(|| MemberError::validation("No valid answer given")))
    }

    /// Asks until `validate` accepts the answer, at most [`MAX_ATTEMPTS`] times.
    pub fn ask<T, F>(&mut self, label: &str, validate: F) -> Result<T, MemberError>
    where
        F: FnMut(&str) -> Result<T, MemberError>,
    {
        self.ask_with(label, false, validate)
    }

    /// Like [`Console::ask`], without echo when attached to a terminal.
    pub fn ask_hidden<T, F>(&mut self, label: &str, validate: F) -> Result<T, MemberError>
    where
        F: FnMut(&str) -> Result<T, MemberError>,
    {
        self.ask_with(label, true, validate)
    }

    /// Single choice. Accepts an option, its index or an unambiguous prefix.
    /// An empty answer picks `default`.
    pub fn choice(
        &mut self,
        label: &str,
        options: &[&str],
        default: usize,
    ) -> Result<String, MemberError> {
        let default_label = options.get(default).copied().unwrap_or_default();
        writeln!(self.output, "{label} [{default_label}]:")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  [{i}] {option}")?;
        }

        self.ask("> ", |answer| {
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(default_label.to_string());
            }
            pick_option(options, answer)
                .map(|i| options[i].to_string())
                .ok_or_else(|| MemberError::validation(format!("Value \"{answer}\" is invalid")))
        })
    }

    /// Multiple choice from a comma separated answer. Returns the chosen
    /// indexes in answer order without duplicates. An empty answer selects nothing.
    pub fn multi_select(
        &mut self,
        label: &str,
        options: &[String],
    ) -> Result<Vec<usize>, MemberError> {
        writeln!(self.output, "{label}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  [{i}] {option}")?;
        }

        let refs: Vec<&str> = options.iter().map(String::as_str).collect();
        self.ask("> ", |answer| {
            let mut picked = Vec::new();
            for part in answer.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let index = pick_option(&refs, part).ok_or_else(|| {
                    MemberError::validation(format!("Value \"{part}\" is invalid"))
                })?;
                if !picked.contains(&index) {
                    picked.push(index);
                }
            }
            Ok(picked)
        })
    }

    pub fn text(&mut self, message: &str) -> Result<(), MemberError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub fn note(&mut self, message: &str) -> Result<(), MemberError> {
        writeln!(self.output, "! [NOTE] {message}")?;
        Ok(())
    }

    pub fn success(&mut self, message: &str) -> Result<(), MemberError> {
        writeln!(self.output, "\u{2713} {message}")?;
        Ok(())
    }

    pub fn error(&mut self, message: &str) -> Result<(), MemberError> {
        writeln!(self.output, "[ERROR] {message}")?;
        Ok(())
    }

    pub fn table(&mut self, headers: &[String], rows: &[Vec<String>]) -> Result<(), MemberError> {
        writeln!(self.output, "{}", table::render(headers, rows))?;
        Ok(())
    }

    /// Writes `content` as-is followed by a newline.
    pub fn write_raw(&mut self, content: &str) -> Result<(), MemberError> {
        writeln!(self.output, "{content}")?;
        self.output.flush()?;
        Ok(())
    }
}

/// Exact match, then index, then a case-insensitive prefix matching exactly one option.
fn pick_option(options: &[&str], answer: &str) -> Option<usize> {
    if let Some(i) = options.iter().position(|o| o.eq_ignore_ascii_case(answer)) {
        return Some(i);
    }

    if let Ok(i) = answer.parse::<usize>()
        && i < options.len()
    {
        return Some(i);
    }

    let lower = answer.to_lowercase();
    let mut matches = options
        .iter()
        .enumerate()
        .filter(|(_, o)| o.to_lowercase().starts_with(&lower));
    match (matches.next(), matches.next()) {
        (Some((i, _)), None) => Some(i),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), true)
    }

    fn non_empty(answer: &str) -> Result<String, MemberError> {
        if answer.is_empty() {
            Err(MemberError::validation("empty"))
        } else {
            Ok(answer.to_string())
        }
    }

    #[test]
    fn ask_retries_until_valid() {
        let mut c = console("\n\nalice\n");
        assert_eq!(c.ask("name: ", non_empty).unwrap(), "alice");

        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out.matches("[ERROR] empty").count(), 2);
    }

    #[test]
    fn ask_gives_up_after_three_attempts() {
        let mut c = console("\n\n\nalice\n");
        let err = c.ask("name: ", non_empty).unwrap_err();
        assert!(matches!(err, MemberError::Validation(m) if m == "empty"));
    }

    #[test]
    fn ask_fails_on_end_of_input() {
        let mut c = console("");
        let err = c.ask("name: ", non_empty).unwrap_err();
        assert_eq!(err.to_string(), "Aborted: no input");
    }

    #[test]
    fn ask_strips_line_endings_only() {
        let mut c = console("  spaced  \r\n");
        assert_eq!(c.ask("x: ", non_empty).unwrap(), "  spaced  ");
    }

    #[test]
    fn choice_accepts_index_prefix_and_default() {
        assert_eq!(console("1\n").choice("Delete?", &["no", "yes"], 0).unwrap(), "yes");
        assert_eq!(console("Y\n").choice("Delete?", &["no", "yes"], 0).unwrap(), "yes");
        assert_eq!(console("\n").choice("Delete?", &["no", "yes"], 0).unwrap(), "no");
        assert_eq!(
            console("maybe\nno\n").choice("Delete?", &["no", "yes"], 0).unwrap(),
            "no"
        );
    }

    #[test]
    fn multi_select_parses_names_and_indexes() {
        let options = vec!["Editors".to_string(), "Members".to_string(), "VIP".to_string()];

        let picked = console("2, editors,2\n").multi_select("Groups?", &options).unwrap();
        assert_eq!(picked, vec![2, 0]);

        let picked = console("\n").multi_select("Groups?", &options).unwrap();
        assert!(picked.is_empty());

        let picked = console("Admins\n1\n").multi_select("Groups?", &options).unwrap();
        assert_eq!(picked, vec![1]);
    }

    #[test]
    fn ambiguous_prefix_is_rejected() {
        assert_eq!(pick_option(&["member", "members-vip"], "mem"), None);
        assert_eq!(pick_option(&["member", "members-vip"], "member"), Some(0));
    }
}
