//! Interactive search shell
//!
//! A line-oriented menu over a [`Repository`]:
//!
//! ```text
//! PickRecord ──number──► EnterTerm ──valid term──► EnterValue ──results──► SearchAgain
//!     ▲                     │ unknown term            │ invalid value         │ y
//!     │                     └──────► (re-prompt)      └──► (re-prompt)        │
//!     └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `quit` at any prompt, `n` at "Search again?", or end of input exits.

pub mod render;

pub use render::render;

use crate::repository::Repository;
use crate::schema::RecordType;
use serde_json::Value;
use std::io::{self, BufRead, Write};

const GOODBYE: &str = "exiting.. Goodbye";
const RULE: &str = "-----------------------";

/// Where the conversation is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    PickRecord,
    EnterTerm(RecordType),
    EnterValue(RecordType, &'static str),
    SearchAgain,
}

/// One line of user input
enum Reply {
    Quit,
    Text(String),
}

/// Interactive search loop over any line source and sink
pub struct Shell<R, W> {
    repo: Repository,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(repo: Repository, input: R, output: W) -> Self {
        Self {
            repo,
            input,
            output,
        }
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to Zendesk Search")?;

        let mut step = Step::PickRecord;
        while let Some(next) = self.step(step)? {
            step = next;
        }

        writeln!(self.output, "{}", GOODBYE)?;
        self.output.flush()
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Execute one prompt; `None` means quit
    fn step(&mut self, step: Step) -> io::Result<Option<Step>> {
        match step {
            Step::PickRecord => self.pick_record(),
            Step::EnterTerm(record_type) => self.enter_term(record_type),
            Step::EnterValue(record_type, term) => self.enter_value(record_type, term),
            Step::SearchAgain => self.search_again(),
        }
    }

    fn pick_record(&mut self) -> io::Result<Option<Step>> {
        let record_types = self.repo.available_record_types().to_vec();
        for (index, record_type) in record_types.iter().enumerate() {
            writeln!(self.output, "Press '{}' to search for {}", index + 1, record_type)?;
        }
        writeln!(self.output, "Type 'quit' to quit anytime")?;

        let text = match self.read()? {
            Reply::Quit => return Ok(None),
            Reply::Text(text) => text,
        };

        let picked = text
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| record_types.get(index).copied());

        match picked {
            Some(record_type) => Ok(Some(Step::EnterTerm(record_type))),
            None => {
                writeln!(self.output, "Sorry, don't understand {}", text)?;
                Ok(Some(Step::PickRecord))
            }
        }
    }

    fn enter_term(&mut self, record_type: RecordType) -> io::Result<Option<Step>> {
        writeln!(self.output, "Search {} with:", record_type)?;
        writeln!(self.output, "{}", RULE)?;
        for field in self.repo.fields_for(record_type) {
            writeln!(self.output, "{}", field.name)?;
        }
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "Enter search term:")?;

        let term = match self.read()? {
            Reply::Quit => return Ok(None),
            Reply::Text(text) => text,
        };

        match self.repo.validate_search_term(record_type, &term) {
            Ok(field) => Ok(Some(Step::EnterValue(record_type, field.name))),
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                Ok(Some(Step::EnterTerm(record_type)))
            }
        }
    }

    fn enter_value(
        &mut self,
        record_type: RecordType,
        term: &'static str,
    ) -> io::Result<Option<Step>> {
        writeln!(self.output, "Enter search value:")?;

        let value = match self.read()? {
            Reply::Quit => return Ok(None),
            Reply::Text(text) => Value::String(text),
        };

        match self.repo.search_resolved(record_type, term, &value) {
            Ok(results) => {
                if results.is_empty() {
                    writeln!(self.output, "No results found.")?;
                } else {
                    writeln!(self.output, "Found {} search results.", results.len())?;
                    for result in &results {
                        write!(self.output, "{}", render(result))?;
                    }
                }
                Ok(Some(Step::SearchAgain))
            }
            Err(e) => {
                tracing::debug!(record_type = %record_type, term, "Search rejected: {}", e);
                writeln!(self.output, "{}", e)?;
                Ok(Some(Step::EnterValue(record_type, term)))
            }
        }
    }

    fn search_again(&mut self) -> io::Result<Option<Step>> {
        writeln!(self.output, "Search again?: y/n")?;

        match self.read()? {
            Reply::Quit => Ok(None),
            Reply::Text(text) => match text.trim() {
                "n" => Ok(None),
                "y" => Ok(Some(Step::PickRecord)),
                _ => {
                    writeln!(self.output, "Sorry, don't understand, please enter 'y' or 'n'")?;
                    Ok(Some(Step::SearchAgain))
                }
            },
        }
    }

    fn read(&mut self) -> io::Result<Reply> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Reply::Quit);
        }

        let line = line.trim_end_matches(['\n', '\r']);
        if line == "quit" {
            Ok(Reply::Quit)
        } else {
            Ok(Reply::Text(line.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;
    use std::io::Cursor;

    fn session(input: &str) -> String {
        let mut shell = Shell::new(
            fixtures::repository(),
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        );
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[test]
    fn test_quit_immediately() {
        let out = session("quit\n");

        assert_eq!(
            out,
            "Welcome to Zendesk Search\n\
             Press '1' to search for users\n\
             Press '2' to search for organizations\n\
             Press '3' to search for tickets\n\
             Type 'quit' to quit anytime\n\
             exiting.. Goodbye\n"
        );
    }

    #[test]
    fn test_end_of_input_quits() {
        let out = session("");
        assert!(out.ends_with("Type 'quit' to quit anytime\nexiting.. Goodbye\n"));
    }

    #[test]
    fn test_full_search() {
        let out = session("1\nname\nFRANCISCA RASMUSSEN\nn\n");

        assert!(out.contains("Search users with:\n-----------------------\n_id\nurl\n"));
        assert!(out.contains("role\n-----------------------\nEnter search term:\n"));
        assert!(out.contains("Enter search value:\nFound 1 search results.\n* User with _id 1\n"));
        assert!(out.ends_with("Search again?: y/n\nexiting.. Goodbye\n"));
    }

    #[test]
    fn test_no_results() {
        let out = session("3\nstatus\nsolved\nquit\n");

        assert!(out.contains("Search tickets with:"));
        assert!(out.contains("No results found.\nSearch again?: y/n\n"));
    }

    #[test]
    fn test_bad_record_choice_reprompts() {
        let out = session("7\nusers\n2\nquit\n");

        assert!(out.contains("Sorry, don't understand 7\n"));
        assert!(out.contains("Sorry, don't understand users\n"));
        assert!(out.contains("Search organizations with:"));
    }

    #[test]
    fn test_unknown_term_reprompts() {
        let out = session("1\nnickname\n_id\nquit\n");

        assert!(out.contains(
            "unknown search term 'nickname' for the record users\nSearch users with:"
        ));
        assert!(out.ends_with("Enter search value:\nexiting.. Goodbye\n"));
    }

    #[test]
    fn test_invalid_value_reprompts() {
        let out = session("1\n_id\nabc\n2\nquit\n");

        assert!(out.contains(
            "Enter search value:\n\
             search value \"abc\" is invalid for '_id' (expected Integer)\n\
             Enter search value:\n"
        ));
        assert!(out.contains("Found 1 search results.\n* User with _id 2\n"));
    }

    #[test]
    fn test_empty_value_search() {
        let out = session("1\norganization_id\n\nquit\n");
        assert!(out.contains("Found 1 search results.\n* User with _id 2\n"));
    }

    #[test]
    fn test_search_again() {
        let out = session("2\n_id\n101\nmaybe\ny\nquit\n");

        assert!(out.contains("* Organization with _id 101\n"));
        assert!(out.contains(
            "Sorry, don't understand, please enter 'y' or 'n'\nSearch again?: y/n\n"
        ));
        assert_eq!(out.matches("Type 'quit' to quit anytime").count(), 2);
    }

    #[test]
    fn test_crlf_input() {
        let out = session("3\r\ntags\r\nohio\r\nn\r\n");
        assert!(out.contains("Found 2 search results."));
    }
}
