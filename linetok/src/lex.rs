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

//! Line tokenization.
//!
//! Tokenizing works one line at a time:
//!
//! 1. A [Cursor] holds the line, a read position, and a [ClassTable] that
//!    sorts each byte into a [CharClass].
//!
//! 2. The scanning methods on [Cursor], implemented in the [scan] module,
//!    read one [Token] at a time.  Each variant differs only in how it
//!    temporarily widens the class table: [Cursor::scan_token] uses it as is,
//!    [Cursor::scan_real_token] treats `.` and `_` as digits, and
//!    [Cursor::scan_word_token] treats digits and operators as ordinary text.
//!
//! 3. The [tokenize] module drives a scanning variant across a whole line.
//!
//! [ClassTable]: class::ClassTable

pub mod class;
pub mod cursor;
pub mod operator;
pub mod scan;
pub mod token;
pub mod tokenize;

pub use class::CharClass;
pub use cursor::Cursor;
pub use operator::Operator;
pub use scan::ScanMode;
pub use token::Token;
pub use tokenize::{tokenize_line, tokenize_line_real, tokenize_line_words};
