//! Line-oriented prompting over any reader/writer pair

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::Result;
use boxoffice_core::model::field::{self, format_date, parse_date};
use boxoffice_core::model::Id;
use chrono::NaiveDate;

/// Input ended while a prompt was waiting. The shell treats it as "exit".
#[derive(Debug)]
pub struct EndOfInput;

impl fmt::Display for EndOfInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("input closed")
    }
}

impl std::error::Error for EndOfInput {}

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub const fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn say(&mut self, message: impl fmt::Display) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub fn success(&mut self, message: impl fmt::Display) -> Result<()> {
        self.say(format_args!("✔ {message}"))
    }

    pub fn error(&mut self, message: impl fmt::Display) -> Result<()> {
        self.say(format_args!("✖ {message}"))
    }

    /// Read one trimmed line after printing `label`.
    pub fn line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            writeln!(self.output)?;
            return Err(EndOfInput.into());
        }
        Ok(buf.trim().to_string())
    }

    /// Non-blank text that the record files can hold.
    pub fn text(&mut self, name: &'static str, label: &str) -> Result<String> {
        loop {
            let value = self.line(label)?;
            if value.is_empty() {
                self.error(format_args!("{name} is required"))?;
                continue;
            }
            match field::text(name, value) {
                Ok(value) => return Ok(value),
                Err(e) => self.error(e)?,
            }
        }
    }

    /// Replacement text, or `None` to keep `current`.
    pub fn text_or_keep(
        &mut self,
        name: &'static str,
        label: &str,
        current: &str,
    ) -> Result<Option<String>> {
        loop {
            let value = self.line(&format!("{label} [{current}]"))?;
            if value.is_empty() {
                return Ok(None);
            }
            match field::text(name, value) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => self.error(e)?,
            }
        }
    }

    pub fn id(&mut self, label: &str) -> Result<Id> {
        loop {
            let value = self.line(label)?;
            match value.parse::<Id>() {
                Ok(id) => return Ok(id),
                Err(_) => self.error(format_args!("'{value}' is not a valid id"))?,
            }
        }
    }

    pub fn date(&mut self, label: &str) -> Result<NaiveDate> {
        loop {
            let value = self.line(&format!("{label} (YYYY-MM-DD)"))?;
            match parse_date(&value).filter(|d| field::date("date", *d).is_ok()) {
                Some(date) => return Ok(date),
                None => self.error(format_args!("'{value}' is not a valid date"))?,
            }
        }
    }

    pub fn date_or_keep(&mut self, label: &str, current: NaiveDate) -> Result<Option<NaiveDate>> {
        loop {
            let value = self.line(&format!("{label} [{}]", format_date(current)))?;
            if value.is_empty() {
                return Ok(None);
            }
            match parse_date(&value).filter(|d| field::date("date", *d).is_ok()) {
                Some(date) => return Ok(Some(date)),
                None => self.error(format_args!("'{value}' is not a valid date"))?,
            }
        }
    }

    /// The answer, lowercased.
    pub fn choice(&mut self, label: &str) -> Result<String> {
        Ok(self.line(label)?.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(input: &str) -> Prompt<&[u8], Vec<u8>> {
        Prompt::new(input.as_bytes(), Vec::new())
    }

    fn transcript(p: Prompt<&[u8], Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn text_reprompts_on_blank_and_delimiter() {
        let mut p = prompt("\nA|B\nHamlet\n");
        assert_eq!(p.text("title", "Title").unwrap(), "Hamlet");
        let out = transcript(p);
        assert!(out.contains("✖ title is required"));
        assert!(out.contains("✖ title may not contain '|'"));
    }

    #[test]
    fn blank_keeps_current_value() {
        let mut p = prompt("\n  \n");
        assert_eq!(p.text_or_keep("name", "Name", "Ana").unwrap(), None);
        assert_eq!(
            p.date_or_keep("Date", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
                .unwrap(),
            None
        );
        assert!(transcript(p).contains("Name [Ana]: "));
    }

    #[test]
    fn date_reprompts_until_valid() {
        let mut p = prompt("2024-02-30\n1/5/2024\n2024-02-29\n");
        assert_eq!(
            p.date("Date").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(transcript(p).matches("is not a valid date").count(), 2);
    }

    #[test]
    fn id_reprompts_until_numeric() {
        let mut p = prompt("abc\n-1\n12\n");
        assert_eq!(p.id("Id").unwrap(), 12);
    }

    #[test]
    fn closed_input_is_end_of_input() {
        let mut p = prompt("");
        let err = p.line("Anything").unwrap_err();
        assert!(err.is::<EndOfInput>());
    }
}
