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

//! Tokenizing whole lines.
//!
//! The functions here drive one scanning variant over a line until it
//! reports end of line, for callers that want every token at once instead of
//! interleaving scans with their own decisions.

use crate::{message::Diagnostics, settings::Settings};

use super::{cursor::Cursor, scan::ScanMode, token::Token};

/// An iterator over the tokens of one line.
///
/// Once the line is exhausted the iterator stays exhausted.
pub struct Tokens {
    cursor: Option<Cursor>,
    mode: ScanMode,
    fold_case: bool,
}

impl Tokens {
    pub fn new(line: impl AsRef<[u8]>, settings: &Settings) -> Self {
        Self::from_cursor(settings.cursor(line), settings.mode, settings.fold_case)
    }

    /// Returns an iterator that scans `cursor` with `mode`.  A `None` cursor,
    /// which is what [Cursor::new] returns for an empty line, yields no
    /// tokens.
    pub fn from_cursor(cursor: Option<Cursor>, mode: ScanMode, fold_case: bool) -> Self {
        Self {
            cursor,
            mode,
            fold_case,
        }
    }

    /// Returns the diagnostics reported so far.
    pub fn diagnostics(&self) -> Diagnostics {
        self.cursor
            .as_ref()
            .map(|cursor| cursor.diagnostics().clone())
            .unwrap_or_default()
    }
}

impl Iterator for Tokens {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_mut()?;
        let token = cursor.scan(self.mode, self.fold_case);
        if token.is_none() || self.mode == ScanMode::Rest {
            // Keep the cursor for its diagnostics, but move it to the end so
            // that nothing more is scanned.
            cursor.seek(cursor.line().len());
        }
        token
    }
}

/// Tokenizes `line` with `mode` and `settings`.
pub fn tokenize(line: impl AsRef<[u8]>, mode: ScanMode, settings: &Settings) -> Vec<Token> {
    Tokens::from_cursor(settings.cursor(line), mode, settings.fold_case).collect()
}

/// Tokenizes `line` with [Cursor::scan_token], using the global settings.
pub fn tokenize_line(line: impl AsRef<[u8]>) -> Vec<Token> {
    tokenize_line_with(line, Settings::global())
}

/// Tokenizes `line` with [Cursor::scan_real_token], using the global settings.
pub fn tokenize_line_real(line: impl AsRef<[u8]>) -> Vec<Token> {
    tokenize_line_real_with(line, Settings::global())
}

/// Tokenizes `line` with [Cursor::scan_word_token], using the global settings.
pub fn tokenize_line_words(line: impl AsRef<[u8]>) -> Vec<Token> {
    tokenize_line_words_with(line, Settings::global())
}

pub fn tokenize_line_with(line: impl AsRef<[u8]>, settings: &Settings) -> Vec<Token> {
    tokenize(line, ScanMode::Plain, settings)
}

pub fn tokenize_line_real_with(line: impl AsRef<[u8]>, settings: &Settings) -> Vec<Token> {
    tokenize(line, ScanMode::Real, settings)
}

pub fn tokenize_line_words_with(line: impl AsRef<[u8]>, settings: &Settings) -> Vec<Token> {
    tokenize(line, ScanMode::Word, settings)
}
