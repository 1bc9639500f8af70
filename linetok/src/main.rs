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

use anyhow::Result;
use clap::{Parser, Subcommand};
use thiserror::Error as ThisError;

use crate::{opcodes::Opcodes, tokenize::Tokenize};

mod opcodes;
mod tokenize;

/// Split lines of text into delimiters, operators, numbers, and words.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Debug)]
enum Command {
    Tokenize(Tokenize),
    Opcodes(Opcodes),
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Command::Tokenize(tokenize) => tokenize.run(),
            Command::Opcodes(opcodes) => opcodes.run(),
        }
    }
}

#[derive(ThisError, Debug)]
#[error("{0:?}: delimiter must be a single byte")]
struct DelimiterError(String);

fn parse_delimiter(arg: &str) -> Result<u8, DelimiterError> {
    match arg.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(DelimiterError(arg.to_string())),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    Cli::parse().command.run()
}
