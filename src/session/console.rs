use std::io::{BufRead, Write};
use std::str::FromStr;
use crate::core::library::LibraryResult;

pub const INVALID_NUMBER: &str = "Invalid input, please enter a number.";

// Console is the line oriented terminal of a session. Every read returns None once input is exhausted.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
        }
    }

    pub fn say(&mut self, line: &str) -> LibraryResult<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    pub fn ask(&mut self, prompt: &str) -> LibraryResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        // bytes that are not UTF-8 become U+FFFD and fail later parsing like any other typo
        let mut line = vec![];
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn ask_number<T: FromStr>(&mut self, prompt: &str) -> LibraryResult<Option<T>> {
        self.ask_number_where(prompt, |_| true)
    }

    // Re-prompts until the answer parses and passes `accept`.
    pub fn ask_number_where<T: FromStr, F: Fn(&T) -> bool>(&mut self, prompt: &str,
                                                          accept: F) -> LibraryResult<Option<T>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match answer.trim().parse::<T>() {
                Ok(number) if accept(&number) => return Ok(Some(number)),
                _ => self.say(INVALID_NUMBER)?,
            }
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
