//! Input and output path selection.
//!
//! Paths come from the command line first. Whatever is missing is asked for
//! through a [`Prompter`]: on a terminal that is [`TerminalPrompter`], in
//! scripts [`NoPrompt`], which never invents an input and falls back to the
//! default output filename.

use std::io;
use std::path::PathBuf;

use dialoguer::Input;

use crate::error::{Selection, SelectionError, SelectionResult};
use crate::logs::log_info;
use crate::output::DEFAULT_OUTPUT_FILE;

/// Console line shown before asking for the input CSV.
pub const INPUT_REQUEST: &str = "Please select your input CSV file...";
/// Console line shown before asking for the output location.
pub const OUTPUT_REQUEST: &str = "Please select where to save the output JSON file...";

/// Source of answers for missing paths.
pub trait Prompter {
    /// Tell the operator what is about to be asked.
    fn announce(&mut self, message: &str) {
        log_info(message);
    }

    /// Ask for the CSV to read. `None` means the operator gave nothing.
    fn input_path(&mut self) -> SelectionResult<Option<String>>;

    /// Ask where to save the JSON, suggesting `default`. `None` means the
    /// prompt was interrupted; an empty answer takes the default.
    fn output_path(&mut self, default: &str) -> SelectionResult<Option<String>>;
}

/// Asks on the terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input_path(&mut self) -> SelectionResult<Option<String>> {
        let answer = Input::<String>::new()
            .with_prompt("Path to your merged CSV file")
            .allow_empty(true)
            .interact_text();
        interrupted_as_none(answer)
    }

    fn output_path(&mut self, default: &str) -> SelectionResult<Option<String>> {
        let answer = Input::<String>::new()
            .with_prompt(format!("Save JSON file as [{}]", default))
            .allow_empty(true)
            .interact_text();
        interrupted_as_none(answer)
    }
}

fn interrupted_as_none(answer: dialoguer::Result<String>) -> SelectionResult<Option<String>> {
    match answer {
        Ok(text) => Ok(Some(text)),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(SelectionError::Prompt(e.to_string())),
    }
}

/// Non-interactive answers.
#[derive(Debug, Default)]
pub struct NoPrompt;

impl Prompter for NoPrompt {
    fn announce(&mut self, _message: &str) {}

    fn input_path(&mut self) -> SelectionResult<Option<String>> {
        Ok(None)
    }

    fn output_path(&mut self, default: &str) -> SelectionResult<Option<String>> {
        Ok(Some(default.to_string()))
    }
}

/// Resolved input and output locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Fill in missing paths, asking for the input first.
pub fn resolve_paths(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    prompter: &mut dyn Prompter,
) -> SelectionResult<SelectedPaths> {
    let input = match input {
        Some(path) => path,
        None => {
            prompter.announce(INPUT_REQUEST);
            prompter
                .input_path()?
                .and_then(|answer| clean_answer(&answer))
                .ok_or(SelectionError::Cancelled(Selection::Input))?
        }
    };

    let output = match output {
        Some(path) => path,
        None => {
            prompter.announce(OUTPUT_REQUEST);
            let answer = prompter
                .output_path(DEFAULT_OUTPUT_FILE)?
                .ok_or(SelectionError::Cancelled(Selection::Output))?;
            clean_answer(&answer).unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
        }
    };

    Ok(SelectedPaths { input, output })
}

/// Trim an answer and drop the quotes terminals add to dropped files.
fn clean_answer(answer: &str) -> Option<PathBuf> {
    let trimmed = answer.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed);

    if unquoted.is_empty() {
        None
    } else {
        Some(PathBuf::from(unquoted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays canned answers and records what was shown and asked.
    struct Scripted {
        input: Option<String>,
        output: Option<String>,
        asked: usize,
        announced: Vec<String>,
    }

    impl Scripted {
        fn new(input: Option<&str>, output: Option<&str>) -> Self {
            Self {
                input: input.map(String::from),
                output: output.map(String::from),
                asked: 0,
                announced: Vec::new(),
            }
        }
    }

    impl Prompter for Scripted {
        fn announce(&mut self, message: &str) {
            self.announced.push(message.to_string());
        }

        fn input_path(&mut self) -> SelectionResult<Option<String>> {
            self.asked += 1;
            Ok(self.input.clone())
        }

        fn output_path(&mut self, _default: &str) -> SelectionResult<Option<String>> {
            self.asked += 1;
            Ok(self.output.clone())
        }
    }

    #[test]
    fn test_arguments_skip_prompts() {
        let mut prompter = Scripted::new(None, None);
        let paths = resolve_paths(
            Some("occupations.csv".into()),
            Some("out.json".into()),
            &mut prompter,
        )
        .unwrap();

        assert_eq!(paths.input, PathBuf::from("occupations.csv"));
        assert_eq!(paths.output, PathBuf::from("out.json"));
        assert_eq!(prompter.asked, 0);
    }

    #[test]
    fn test_prompts_fill_missing_paths() {
        let mut prompter = Scripted::new(Some("  '/data/merged.csv' "), Some("result.json"));
        let paths = resolve_paths(None, None, &mut prompter).unwrap();

        assert_eq!(paths.input, PathBuf::from("/data/merged.csv"));
        assert_eq!(paths.output, PathBuf::from("result.json"));
        assert_eq!(prompter.asked, 2);
        assert_eq!(prompter.announced, vec![INPUT_REQUEST, OUTPUT_REQUEST]);
    }

    #[test]
    fn test_output_request_announced_alone() {
        let mut prompter = Scripted::new(None, Some("result.json"));
        resolve_paths(Some("in.csv".into()), None, &mut prompter).unwrap();

        assert_eq!(prompter.announced, vec![OUTPUT_REQUEST]);
    }

    #[test]
    fn test_empty_output_answer_takes_default() {
        let mut prompter = Scripted::new(None, Some("  "));
        let paths = resolve_paths(Some("in.csv".into()), None, &mut prompter).unwrap();

        assert_eq!(paths.output, PathBuf::from(DEFAULT_OUTPUT_FILE));
    }

    #[test]
    fn test_empty_input_cancels_before_output_prompt() {
        let mut prompter = Scripted::new(Some("   "), Some("result.json"));
        let err = resolve_paths(None, None, &mut prompter).unwrap_err();

        assert!(matches!(err, SelectionError::Cancelled(Selection::Input)));
        assert_eq!(prompter.asked, 1);
        assert_eq!(prompter.announced, vec![INPUT_REQUEST]);
    }

    #[test]
    fn test_interrupted_output_cancels() {
        let mut prompter = Scripted::new(None, None);
        let err = resolve_paths(Some("in.csv".into()), None, &mut prompter).unwrap_err();

        assert!(matches!(err, SelectionError::Cancelled(Selection::Output)));
    }

    #[test]
    fn test_no_prompt_defaults_output() {
        let paths = resolve_paths(Some("in.csv".into()), None, &mut NoPrompt).unwrap();
        assert_eq!(paths.output, PathBuf::from(DEFAULT_OUTPUT_FILE));

        let err = resolve_paths(None, None, &mut NoPrompt).unwrap_err();
        assert!(matches!(err, SelectionError::Cancelled(Selection::Input)));
    }

    #[test]
    fn test_clean_answer() {
        assert_eq!(clean_answer("\"a b.csv\""), Some(PathBuf::from("a b.csv")));
        assert_eq!(clean_answer("plain.csv"), Some(PathBuf::from("plain.csv")));
        assert_eq!(clean_answer("''"), None);
        assert_eq!(clean_answer(""), None);
    }
}
