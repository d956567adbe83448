use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::domain::error::BikeshareError;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    #[allow(dead_code)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").context("failed to write to terminal")
    }

    pub fn rule(&mut self) -> Result<()> {
        self.say(&"-".repeat(40))
    }

    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from terminal")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn ask_until<T>(
        &mut self,
        question: &str,
        retry: &str,
        parse: impl Fn(&str) -> Result<T, BikeshareError>,
    ) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => {
                    tracing::debug!(%err, "rejected input");
                    self.say(retry)?;
                }
            }
        }
    }

    pub fn ask_yes_no(&mut self, question: &str) -> Result<Option<bool>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match answer.to_lowercase().as_str() {
                "yes" => return Ok(Some(true)),
                "no" => return Ok(Some(false)),
                _ => self.say("Answer yes or no. Please provide the answer again.")?,
            }
        }
    }
}
