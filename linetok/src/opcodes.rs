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

use std::io::{Write, stdout};

use anyhow::Result;
use clap::Args;
use enum_iterator::all;
use linetok::lex::operator::Operator;

/// Print the operators and their opcodes.
#[derive(Args, Clone, Debug)]
pub struct Opcodes {
    /// Print as JSON.
    #[arg(long)]
    json: bool,
}

impl Opcodes {
    pub fn run(self) -> Result<()> {
        let mut stdout = stdout().lock();
        if self.json {
            let table = all::<Operator>()
                .map(|operator| (operator.as_str(), operator.code()))
                .collect::<Vec<_>>();
            serde_json::to_writer_pretty(&mut stdout, &table)?;
            writeln!(stdout)?;
        } else {
            for operator in all::<Operator>() {
                writeln!(stdout, "{:>2}  {operator:?}  {operator}", operator.code())?;
            }
        }
        Ok(())
    }
}
