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

//! Byte classification.
//!
//! Every byte of a line belongs to one of four [CharClass]es.  The class of
//! the first byte of a token decides which branch of the scanner's state
//! machine handles it, and the class of each following byte decides whether
//! the token continues.
//!
//! Each [Cursor](super::cursor::Cursor) owns its own [ClassTable], so callers
//! can pin extra delimiters and scanning variants can widen classes without
//! affecting any other cursor.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::Index,
};

use enum_iterator::Sequence;
use enum_map::Enum;
use serde::Serialize;

/// The lexical class of a byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enum, Sequence, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    /// White space, control characters, and `;`.  These separate tokens and
    /// are never part of one.
    Delimiter,

    /// Characters that combine into one- or two-character operators.
    Operator,

    /// Characters that start or continue a numeric literal.
    Digit,

    /// Everything else: words, quoted text, and markers absorbed into numbers.
    Other,
}

impl CharClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharClass::Delimiter => "delimiter",
            CharClass::Operator => "operator",
            CharClass::Digit => "digit",
            CharClass::Other => "other",
        }
    }

    /// Returns the class that `byte` has in a freshly constructed table.
    pub const fn default_for(byte: u8) -> Self {
        match byte {
            0..=b' ' | b';' => CharClass::Delimiter,
            b'0'..=b'9' => CharClass::Digit,
            b'#' | b'*' | b'+' | b'-' | b'/' | b'<' | b'=' | b'>' | b'%' | b'^' => {
                CharClass::Operator
            }
            _ => CharClass::Other,
        }
    }
}

impl Display for CharClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

const DEFAULT_CLASSES: [CharClass; 256] = {
    let mut table = [CharClass::Other; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = CharClass::default_for(i as u8);
        i += 1;
    }
    table
};

/// A temporary reclassification applied for the duration of one scan.
///
/// Widening only touches bytes that still have their default class, so a
/// byte pinned with [ClassTable::pin_delimiter] stays a delimiter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Widening {
    /// `.` and `_` become digits, so that `7.6` and `8.623e_1` scan as one
    /// number.
    Real,

    /// Digits and operator characters become ordinary word characters, so
    /// that `file-1.txt` or `*name*` scan as one word.
    Word,
}

/// Per-cursor lookup from byte value to [CharClass].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClassTable([CharClass; 256]);

impl ClassTable {
    /// Returns the class of `byte`.
    pub fn get(&self, byte: u8) -> CharClass {
        self.0[byte as usize]
    }

    /// Makes `byte` a delimiter for the lifetime of this table.
    pub fn pin_delimiter(&mut self, byte: u8) {
        self.0[byte as usize] = CharClass::Delimiter;
    }

    /// Returns true if `byte` currently has the class it starts out with.
    pub fn is_default(&self, byte: u8) -> bool {
        self.get(byte) == CharClass::default_for(byte)
    }

    fn reclassify(&mut self, byte: u8, class: CharClass) {
        if self.is_default(byte) {
            self.0[byte as usize] = class;
        }
    }

    /// Applies `widening` in place.  Undoing it is the caller's job; see
    /// [Cursor::with_widening](super::cursor::Cursor::with_widening).
    pub fn widen(&mut self, widening: Widening) {
        match widening {
            Widening::Real => {
                self.reclassify(b'.', CharClass::Digit);
                self.reclassify(b'_', CharClass::Digit);
            }
            Widening::Word => {
                for byte in 0..=u8::MAX {
                    if matches!(
                        CharClass::default_for(byte),
                        CharClass::Digit | CharClass::Operator
                    ) {
                        self.reclassify(byte, CharClass::Other);
                    }
                }
            }
        }
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        Self(DEFAULT_CLASSES)
    }
}

impl Index<u8> for ClassTable {
    type Output = CharClass;

    fn index(&self, byte: u8) -> &CharClass {
        &self.0[byte as usize]
    }
}

#[cfg(test)]
mod test {
    use enum_iterator::all;
    use enum_map::EnumMap;

    use super::{CharClass, ClassTable, Widening};

    #[test]
    fn defaults() {
        let table = ClassTable::default();
        for byte in 0..=b' ' {
            assert_eq!(table.get(byte), CharClass::Delimiter, "byte {byte}");
        }
        assert_eq!(table.get(b';'), CharClass::Delimiter);
        for byte in b'0'..=b'9' {
            assert_eq!(table.get(byte), CharClass::Digit);
        }
        for &byte in b"#*+-/<=>%^" {
            assert_eq!(table.get(byte), CharClass::Operator);
        }
        for &byte in b"aZ._!?\"'(),:@~\x7f\xff" {
            assert_eq!(table[byte], CharClass::Other, "byte {byte}");
        }
    }

    #[test]
    fn every_class_is_used() {
        let table = ClassTable::default();
        for class in all::<CharClass>() {
            assert!((0..=u8::MAX).any(|byte| table.get(byte) == class));
        }

        let mut counts = EnumMap::<CharClass, usize>::default();
        for byte in 0..=u8::MAX {
            counts[table[byte]] += 1;
        }
        assert_eq!(counts[CharClass::Delimiter], 34);
        assert_eq!(counts[CharClass::Operator], 10);
        assert_eq!(counts[CharClass::Digit], 10);
        assert_eq!(counts[CharClass::Other], 202);
    }

    #[test]
    fn widening_skips_pinned_bytes() {
        let mut table = ClassTable::default();
        table.pin_delimiter(b'-');
        table.pin_delimiter(b'.');

        let mut word = table;
        word.widen(Widening::Word);
        assert_eq!(word.get(b'-'), CharClass::Delimiter);
        assert_eq!(word.get(b'+'), CharClass::Other);
        assert_eq!(word.get(b'7'), CharClass::Other);

        let mut real = table;
        real.widen(Widening::Real);
        assert_eq!(real.get(b'.'), CharClass::Delimiter);
        assert_eq!(real.get(b'_'), CharClass::Digit);

        assert_eq!(table.get(b'+'), CharClass::Operator);
    }
}
