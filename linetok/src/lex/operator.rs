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

//! Operator opcodes.
//!
//! An operator token is one or two characters long.  The first character
//! picks a base opcode; a second character either selects a compound form or
//! is handed back to the cursor to start the next token.

use std::fmt::{Display, Formatter, Result as FmtResult};

use enum_iterator::Sequence;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence, Serialize)]
pub enum Operator {
    /// `<`.
    Lt = 1,

    /// `<=`.
    Le = 2,

    /// `>`.
    Gt = 3,

    /// `>=`.
    Ge = 4,

    /// `=` or `==`.
    Eq = 5,

    /// `<>`.
    Ne = 6,

    /// `#`.
    Hash = 7,

    /// `+`.
    Plus = 8,

    /// `+=`.
    PlusAssign = 9,

    /// `-`.
    Minus = 10,

    /// `-=`.
    MinusAssign = 11,

    /// `*`.
    Asterisk = 12,

    /// `*=`.
    AsteriskAssign = 13,

    /// `/`.
    Slash = 14,

    /// `/=`.
    SlashAssign = 15,

    /// `^`.
    Caret = 16,

    /// `^=`.
    CaretAssign = 17,

    /// `**`.
    Power = 18,

    /// `><`.
    Swap = 20,

    /// `%`.
    Percent = 22,

    /// `%=`.
    PercentAssign = 23,
}

impl Operator {
    /// Returns the opcode handed to the command interpreter.
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i64) -> Option<Self> {
        enum_iterator::all::<Self>().find(|op| op.code() as i64 == code)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Hash => "#",
            Self::Plus => "+",
            Self::PlusAssign => "+=",
            Self::Minus => "-",
            Self::MinusAssign => "-=",
            Self::Asterisk => "*",
            Self::AsteriskAssign => "*=",
            Self::Slash => "/",
            Self::SlashAssign => "/=",
            Self::Caret => "^",
            Self::CaretAssign => "^=",
            Self::Power => "**",
            Self::Swap => "><",
            Self::Percent => "%",
            Self::PercentAssign => "%=",
        }
    }

    /// Returns the single-character operator for `c`, if there is one.
    pub fn from_byte(c: u8) -> Option<Self> {
        match c {
            b'<' => Some(Self::Lt),
            b'>' => Some(Self::Gt),
            b'=' => Some(Self::Eq),
            b'#' => Some(Self::Hash),
            b'+' => Some(Self::Plus),
            b'-' => Some(Self::Minus),
            b'*' => Some(Self::Asterisk),
            b'/' => Some(Self::Slash),
            b'^' => Some(Self::Caret),
            b'%' => Some(Self::Percent),
            _ => None,
        }
    }

    /// Returns the compound operator that `self` forms when followed by
    /// `second`, if any.
    fn compound(self, second: u8) -> Option<Self> {
        match (self, second) {
            (Self::Eq, b'=') => Some(Self::Eq),
            (Self::Hash, _) => None,
            (Self::Lt, b'>') => Some(Self::Ne),
            (Self::Gt, b'<') => Some(Self::Swap),
            (Self::Asterisk, b'*') => Some(Self::Power),
            (_, b'=') => Self::from_code(self.code() as i64 + 1),
            _ => None,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Resolves the operator spelled at the start of `text`.
///
/// Returns the operator and the number of bytes of `text` it uses, which is
/// 1 or 2.  Bytes past that belong to the next token.  Returns `None` if
/// `text` does not start with an operator character.
pub fn resolve(text: &[u8]) -> Option<(Operator, usize)> {
    let base = Operator::from_byte(*text.first()?)?;
    match text.get(1).and_then(|&second| base.compound(second)) {
        Some(compound) => Some((compound, 2)),
        None => Some((base, 1)),
    }
}

#[cfg(test)]
mod test {
    use enum_iterator::all;

    use super::{resolve, Operator};

    #[test]
    fn base_opcodes() {
        for (c, code) in [
            (b'<', 1),
            (b'>', 3),
            (b'=', 5),
            (b'#', 7),
            (b'+', 8),
            (b'-', 10),
            (b'*', 12),
            (b'/', 14),
            (b'^', 16),
            (b'%', 22),
        ] {
            assert_eq!(resolve(&[c]).map(|(op, n)| (op.code(), n)), Some((code, 1)));
        }
    }

    #[test]
    fn compound_opcodes() {
        for (s, code) in [
            ("<=", 2),
            (">=", 4),
            ("<>", 6),
            ("><", 20),
            ("**", 18),
            ("+=", 9),
            ("-=", 11),
            ("*=", 13),
            ("/=", 15),
            ("^=", 17),
            ("%=", 23),
            ("==", 5),
        ] {
            assert_eq!(
                resolve(s.as_bytes()).map(|(op, n)| (op.code(), n)),
                Some((code, 2)),
                "{s}"
            );
        }
    }

    #[test]
    fn invalid_pairs() {
        for s in ["#=", "##", "+-", "<<", ">>", "=<", "*/", "%%", "-+", "^^"] {
            let (op, n) = resolve(s.as_bytes()).unwrap();
            assert_eq!(n, 1, "{s}");
            assert_eq!(op.as_str().as_bytes(), &s.as_bytes()[..1]);
        }
        assert_eq!(resolve(b"a"), None);
        assert_eq!(resolve(b""), None);
    }

    #[test]
    fn round_trip() {
        for op in all::<Operator>() {
            assert_eq!(Operator::from_code(op.code() as i64), Some(op));
            let (resolved, n) = resolve(op.as_str().as_bytes()).unwrap();
            assert_eq!(resolved, op);
            assert_eq!(n, op.as_str().len());
        }
        assert_eq!(Operator::from_code(19), None);
    }
}
