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
    fmt::{Display, Formatter, Result as FmtResult},
    ops::Range,
};

use bitflags::bitflags;
use serde::Serialize;

use super::{class::CharClass, operator::Operator};

bitflags! {
    /// What the scanner learned about a token beyond its class.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
    pub struct TokenFlags: u8 {
        /// A `.`, `_`, or exponent marker appeared in a numeric token, so
        /// [Token::int_value] holds only the integer part.
        const REAL = 1;

        /// A hex prefix or suffix marker appeared in a numeric token.
        const HEX = 2;

        /// A leading `-` was folded into a numeric token.
        const NEGATIVE = 4;

        /// The token was delimited by quotes.
        const QUOTED = 8;
    }
}

/// One scanned lexeme.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Token {
    /// The lexeme, upper-cased unless case was preserved.
    ///
    /// Quotes around a quoted word, the sign of a signed number, and hex
    /// suffix markers are not included.
    pub text: String,

    /// The bytes of the line that the token covers, exactly as written.
    pub raw_text: String,

    /// Byte offsets of [Token::raw_text] within the line.
    pub span: Range<usize>,

    /// The class of the token's first character, except that a sign folded
    /// into a number gives [CharClass::Digit].
    pub class: CharClass,

    /// The byte that ended the token, or 0 at end of line.
    pub delimiter: u8,

    /// The class of [Token::delimiter].
    pub delimiter_class: CharClass,

    /// For numbers, the value (integer part, for reals).  For operators, the
    /// opcode.  For anything else, the sum of the bytes of [Token::text],
    /// which is only useful as a quick comparison key.
    pub int_value: i64,

    /// The value of a number scanned with
    /// [Cursor::scan_real_token](super::cursor::Cursor::scan_real_token).
    pub real_value: Option<f64>,

    pub flags: TokenFlags,
}

impl Token {
    pub(crate) fn new(class: CharClass, start: usize) -> Self {
        Self {
            text: String::new(),
            raw_text: String::new(),
            span: start..start,
            class,
            delimiter: 0,
            delimiter_class: CharClass::Delimiter,
            int_value: 0,
            real_value: None,
            flags: TokenFlags::empty(),
        }
    }

    pub fn is_real(&self) -> bool {
        self.flags.contains(TokenFlags::REAL)
    }

    pub fn is_hex(&self) -> bool {
        self.flags.contains(TokenFlags::HEX)
    }

    pub fn is_negative(&self) -> bool {
        self.flags.contains(TokenFlags::NEGATIVE)
    }

    pub fn is_quoted(&self) -> bool {
        self.flags.contains(TokenFlags::QUOTED)
    }

    /// Returns the operator this token was resolved to, if it is an operator
    /// token.
    pub fn operator(&self) -> Option<Operator> {
        match self.class {
            CharClass::Operator => Operator::from_code(self.int_value),
            _ => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.class {
            CharClass::Digit if self.is_negative() => write!(f, "-{}", self.text),
            CharClass::Other if self.is_quoted() => write!(f, "\"{}\"", self.text),
            _ => write!(f, "{}", self.text),
        }
    }
}
