// linetok - a line tokenizer for command interpreters.
// Copyright (C) 2025 Free Software Foundation, Inc.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

use std::{
    fs::File,
    io::{BufRead, BufReader, Write, stdin, stdout},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use enum_map::EnumMap;
use linetok::{
    lex::{class::CharClass, scan::ScanMode, token::Token, tokenize::Tokens},
    message::Diagnostic,
    settings::Settings,
};
use log::info;
use serde::Serialize;

use crate::parse_delimiter;

/// Tokenize each line of a file and print the tokens.
#[derive(Args, Clone, Debug)]
pub struct Tokenize {
    /// File to read.  If omitted, lines are read from stdin.
    input: Option<PathBuf>,

    /// Scanning variant to apply to every token.
    #[arg(long, short = 'm', value_enum, default_value_t)]
    mode: ScanMode,

    /// Keep the case of tokens instead of upper-casing them.
    #[arg(long)]
    preserve_case: bool,

    /// Additional byte to treat as a delimiter.  May be repeated.
    #[arg(long = "delimiter", short = 'd', value_parser = parse_delimiter)]
    delimiters: Vec<u8>,

    /// Output format.
    #[arg(long, short = 'f', value_enum, default_value_t)]
    format: TokenFormat,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum TokenFormat {
    /// One token per line of output.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Newline-delimited JSON, one object per input line.
    Ndjson,
}

#[derive(Serialize)]
struct Line<'a> {
    line: usize,
    tokens: &'a [Token],
    diagnostics: &'a [Diagnostic],
}

impl Tokenize {
    fn settings(&self) -> Settings {
        Settings {
            fold_case: !self.preserve_case,
            pinned_delimiters: self.delimiters.clone(),
            mode: self.mode,
        }
    }

    fn reader(&self) -> Result<Box<dyn BufRead>> {
        Ok(match &self.input {
            Some(path) => Box::new(BufReader::new(
                File::open(path).with_context(|| format!("{}: open failed", path.display()))?,
            )),
            None => Box::new(BufReader::new(stdin())),
        })
    }

    pub fn run(self) -> Result<()> {
        let settings = self.settings();
        info!("tokenizing with {settings:?}");

        let mut stdout = stdout().lock();
        let mut lines = Vec::new();
        let mut counts = EnumMap::<CharClass, usize>::default();
        for (index, line) in self.reader()?.split(b'\n').enumerate() {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            let mut tokens = Tokens::new(&line, &settings);
            let scanned = tokens.by_ref().collect::<Vec<_>>();
            let diagnostics = tokens.diagnostics();
            let line = Line {
                line: index + 1,
                tokens: &scanned,
                diagnostics: &diagnostics.0,
            };

            match self.format {
                TokenFormat::Text => {
                    for token in line.tokens {
                        counts[token.class] += 1;
                        writeln!(
                            stdout,
                            "{}:{}-{}: {:<9} {:<12} {}",
                            line.line,
                            token.span.start + 1,
                            token.span.end,
                            token.class.as_str(),
                            token.to_string(),
                            token.int_value
                        )?;
                    }
                    for diagnostic in line.diagnostics {
                        writeln!(stdout, "{}:{diagnostic}", line.line)?;
                    }
                }
                TokenFormat::Json => lines.push(serde_json::to_value(&line)?),
                TokenFormat::Ndjson => {
                    serde_json::to_writer(&mut stdout, &line)?;
                    writeln!(stdout)?;
                }
            }
        }
        match self.format {
            TokenFormat::Text => {
                let summary = counts
                    .iter()
                    .filter(|(_, count)| **count > 0)
                    .map(|(class, count)| format!("{count} {class}"))
                    .collect::<Vec<_>>();
                if !summary.is_empty() {
                    writeln!(stdout, "tokens: {}", summary.join(", "))?;
                }
            }
            TokenFormat::Json => {
                serde_json::to_writer_pretty(&mut stdout, &lines)?;
                writeln!(stdout)?;
            }
            TokenFormat::Ndjson => (),
        }
        Ok(())
    }
}
