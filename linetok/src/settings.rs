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

use std::sync::OnceLock;

use crate::lex::{cursor::Cursor, scan::ScanMode};

/// How lines are tokenized when the caller does not say otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Upper-case the text of scanned tokens.
    pub fold_case: bool,

    /// Bytes that act as delimiters in addition to the default ones.
    pub pinned_delimiters: Vec<u8>,

    /// Scanning variant applied to every token.
    pub mode: ScanMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fold_case: true,
            pinned_delimiters: Vec::new(),
            mode: ScanMode::Plain,
        }
    }
}

impl Settings {
    pub fn global() -> &'static Settings {
        static GLOBAL: OnceLock<Settings> = OnceLock::new();
        GLOBAL.get_or_init(Settings::default)
    }

    pub fn with_mode(self, mode: ScanMode) -> Self {
        Self { mode, ..self }
    }

    /// Returns a cursor for `line` with this configuration's delimiters
    /// pinned, or `None` if `line` is empty.
    pub fn cursor(&self, line: impl AsRef<[u8]>) -> Option<Cursor> {
        let mut cursor = Cursor::new(line)?;
        for &byte in &self.pinned_delimiters {
            cursor.pin_delimiter(byte);
        }
        Some(cursor)
    }
}
