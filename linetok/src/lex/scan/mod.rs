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

//! Scanning tokens out of a [Cursor].
//!
//! All of the scanning variants share one state machine.
//! Its state is the [CharClass] of the token's first byte.  Each byte read
//! afterward either continues the token, ends it (possibly backing up over
//! the byte so that it can start the next token), or switches a lone `+` or
//! `-` operator into a signed number.
//!
//! The variants differ in how they set up the cursor's class table before
//! running the state machine:
//!
//! - [Cursor::scan_token] uses the table as is.
//!
//! - [Cursor::scan_real_token] makes `.` and `_` digits, so that decimal
//!   fractions and exponents stay within one numeric token, and converts the
//!   result to floating point.
//!
//! - [Cursor::scan_word_token] makes digits and operators word characters, so
//!   that file names and other free-form words scan as a single token.
//!
//! - [Cursor::scan_rest_of_line] bypasses the state machine altogether.

use std::num::IntErrorKind;

use bitflags::bitflags;
use clap::ValueEnum;
use log::{trace, warn};
use serde::Serialize;
use thiserror::Error as ThisError;

use crate::message::Diagnostic;

use super::{
    class::{CharClass, Widening},
    cursor::Cursor,
    operator::resolve,
    token::{Token, TokenFlags},
};

#[derive(ThisError, Clone, Debug, PartialEq, Eq)]
pub enum ScanError {
    /// A numeric token that does not convert to floating point.
    #[error("{0:?} is not a valid number; using 0.")]
    BadNumber(String),

    /// A hexadecimal token too large for a 64-bit integer.
    #[error("Hexadecimal number {0:?} is out of range; using 0.")]
    HexOverflow(String),

    /// A decimal token whose integer part is too large for a 64-bit integer.
    #[error("Integer part of {0:?} is out of range; using 0.")]
    IntegerOverflow(String),
}

/// Which scanning variant to apply to each token of a line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// [Cursor::scan_token].
    #[default]
    Plain,

    /// [Cursor::scan_real_token].  This variant always upper-cases.
    Real,

    /// [Cursor::scan_word_token].
    Word,

    /// [Cursor::scan_rest_of_line].
    Rest,
}

bitflags! {
    /// Progress through a numeric literal.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    struct NumericSubstate: u8 {
        /// A decimal point.
        const DOT = 1;

        /// An exponent marker `E` or `e`.
        const EXPONENT = 2;

        /// A `0x`-style prefix, after which hex letters are digits.
        const HEX_PREFIX = 4;

        /// Any hex marker, prefix or suffix.
        const HEX = 8;
    }
}

/// A token under construction.
struct Lexeme {
    state: CharClass,
    text: Vec<u8>,

    /// Magnitude of the integer part so far, or `None` once it overflows.
    magnitude: Option<u64>,
    numeric: NumericSubstate,
    flags: TokenFlags,
    quote: Option<u8>,
}

impl Lexeme {
    fn new(state: CharClass) -> Self {
        Self {
            state,
            text: Vec::new(),
            magnitude: Some(0),
            numeric: NumericSubstate::empty(),
            flags: TokenFlags::empty(),
            quote: None,
        }
    }

    fn after_exponent_marker(&self) -> bool {
        self.numeric.contains(NumericSubstate::EXPONENT)
            && matches!(self.text.last(), Some(b'e' | b'E'))
    }

    /// Appends `c`, a [CharClass::Digit] byte, to a numeric token.  Returns
    /// false if `c` cannot continue the number, in which case nothing is
    /// appended.
    ///
    /// Only decimal digits contribute to `magnitude`, and only until the
    /// number turns out to have a fraction or exponent.
    fn push_digit(&mut self, c: u8) -> bool {
        if c.is_ascii_digit() {
            self.text.push(c);
            if !self.flags.contains(TokenFlags::REAL) {
                self.magnitude = self
                    .magnitude
                    .and_then(|m| m.checked_mul(10)?.checked_add(u64::from(c - b'0')));
            }
            return true;
        }

        // Only the real scanner widens anything else into a digit.
        let allowed = match c {
            b'_' if self.text.is_empty() && !self.flags.contains(TokenFlags::NEGATIVE) => {
                // A leading `_` is a minus sign.
                self.flags |= TokenFlags::NEGATIVE;
                return true;
            }
            b'.' => !self.numeric.intersects(
                NumericSubstate::DOT | NumericSubstate::EXPONENT | NumericSubstate::HEX,
            ),
            b'_' => self.after_exponent_marker(),
            _ => false,
        };
        if allowed {
            self.text.push(c);
            self.flags |= TokenFlags::REAL;
            if c == b'.' {
                self.numeric |= NumericSubstate::DOT;
            }
        }
        allowed
    }

    fn mark_hex(&mut self) {
        self.numeric |= NumericSubstate::HEX;
        self.flags |= TokenFlags::HEX;
    }

    /// Returns the integer part with the sign applied, if it fits in an
    /// `i64`.
    fn integer_value(&self) -> Option<i64> {
        let magnitude = i128::from(self.magnitude?);
        match self.flags.contains(TokenFlags::NEGATIVE) {
            true => i64::try_from(-magnitude).ok(),
            false => i64::try_from(magnitude).ok(),
        }
    }
}

/// Returns true if the bytes starting at the cursor are hex digits followed
/// by a hex suffix marker.
fn hex_suffix_ahead(cursor: &Cursor) -> bool {
    let mut offset = 0;
    while let Some((c, _)) = cursor.peek_at(offset) {
        match c {
            b'h' | b'H' => return true,
            c if c.is_ascii_hexdigit() => offset += 1,
            _ => return false,
        }
    }
    false
}

/// Returns true if the bytes starting at the cursor can complete an exponent
/// whose marker was just read.
fn exponent_ahead(cursor: &Cursor) -> bool {
    match cursor.peek() {
        Some((c, _)) if c.is_ascii_digit() => true,
        Some((b'_' | b'+' | b'-', _)) => {
            matches!(cursor.peek_at(1), Some((c, _)) if c.is_ascii_digit())
        }
        _ => false,
    }
}

fn byte_sum(text: &str) -> i64 {
    text.bytes().map(i64::from).sum()
}

/// Converts the text of a numeric token to floating point.
///
/// `_` is accepted as a spelling of `-`, so that `8.623E_1` is `0.8623`.
pub fn parse_real(text: &str) -> Result<f64, ScanError> {
    text.replace('_', "-")
        .parse()
        .map_err(|_| ScanError::BadNumber(String::from(text)))
}

/// Converts the text of a hex token to an integer, ignoring `x` markers.
pub fn parse_hex(text: &str) -> Result<i64, ScanError> {
    let digits: String = text.chars().filter(|c| !matches!(c, 'x' | 'X')).collect();
    if digits.is_empty() {
        return Ok(0);
    }
    i64::from_str_radix(&digits, 16).map_err(|error| match error.kind() {
        IntErrorKind::PosOverflow => ScanError::HexOverflow(String::from(text)),
        _ => ScanError::BadNumber(String::from(text)),
    })
}

impl Cursor {
    /// Sets the end of `token`'s span to `end` and fills in the fields that
    /// depend on it.
    fn finish_span(&self, token: &mut Token, end: usize) {
        token.span.end = end;
        token.raw_text = String::from_utf8_lossy(&self.line()[token.span.clone()]).into_owned();
        (token.delimiter, token.delimiter_class) = match self.line().get(end) {
            Some(&c) => (c, self.classes().get(c)),
            None => (0, CharClass::Delimiter),
        };
    }

    fn recover(&mut self, token: &Token, error: ScanError) {
        warn!("{error}");
        self.report(Diagnostic::warning(token.span.clone(), error.to_string()));
    }

    /// Handles a [CharClass::Other] byte `c` that follows digits.  Returns
    /// true if `c` belongs to the number.
    fn continue_number(&self, lexeme: &mut Lexeme, c: u8, mode: ScanMode) -> bool {
        match c {
            b'x' | b'X' => {
                lexeme.text.push(c);
                lexeme.numeric |= NumericSubstate::HEX_PREFIX;
                lexeme.mark_hex();
            }
            b'h' | b'H' => lexeme.mark_hex(),
            c if c.is_ascii_hexdigit()
                && (lexeme.numeric.contains(NumericSubstate::HEX_PREFIX)
                    || hex_suffix_ahead(self)) =>
            {
                lexeme.text.push(c)
            }
            b'e' | b'E'
                if mode == ScanMode::Real
                    && !lexeme
                        .numeric
                        .intersects(NumericSubstate::EXPONENT | NumericSubstate::HEX)
                    && exponent_ahead(self) =>
            {
                lexeme.text.push(c);
                lexeme.numeric |= NumericSubstate::EXPONENT;
                lexeme.flags |= TokenFlags::REAL;
            }
            _ => return false,
        }
        true
    }

    /// Runs the token state machine with the class table as currently set
    /// up.  Returns `None` if only delimiters remain on the line.
    fn scan_core(&mut self, fold_case: bool, mode: ScanMode) -> Option<Token> {
        let start = self.position();
        let (first, class) = loop {
            let (c, class) = self.read()?;
            if class != CharClass::Delimiter {
                break (c, class);
            }
        };
        let token_start = self.position() - 1;

        let mut lexeme = Lexeme::new(class);
        match class {
            CharClass::Other if first == b'"' || first == b'\'' => {
                lexeme.quote = Some(first);
                lexeme.flags |= TokenFlags::QUOTED;
            }
            CharClass::Digit => {
                lexeme.push_digit(first);
            }
            _ => lexeme.text.push(first),
        }

        let end = loop {
            let Some((c, class)) = self.read() else {
                break self.position();
            };

            // Inside quotes, everything up to the closing quote is text.
            if let Some(quote) = lexeme.quote {
                if c == quote {
                    break self.position();
                }
                lexeme.text.push(c);
                continue;
            }

            match (lexeme.state, class) {
                (CharClass::Operator, CharClass::Delimiter) => {
                    self.unread();
                    break self.position();
                }
                (_, CharClass::Delimiter) => break self.position() - 1,
                (CharClass::Operator, CharClass::Operator) => {
                    if lexeme.text.len() >= 2 {
                        self.unread();
                        break self.position();
                    }
                    lexeme.text.push(c);
                }
                (CharClass::Operator, CharClass::Digit) => {
                    let lone_sign = match lexeme.text[..] {
                        // `_` is itself a sign, so `-_5` is two tokens.
                        [sign @ (b'+' | b'-')] if c != b'_' => Some(sign),
                        _ => None,
                    };
                    if let Some(sign) = lone_sign {
                        // A lone sign followed by a digit is a signed number.
                        lexeme.state = CharClass::Digit;
                        lexeme.text.clear();
                        if sign == b'-' {
                            lexeme.flags |= TokenFlags::NEGATIVE;
                        }
                        lexeme.push_digit(c);
                    } else if lexeme.text.len() > 1
                        && matches!(lexeme.text.last(), Some(b'+' | b'-'))
                    {
                        // Leave the sign for the number that follows.
                        self.unread();
                        self.unread();
                        lexeme.text.pop();
                        break self.position();
                    } else {
                        self.unread();
                        break self.position();
                    }
                }
                (CharClass::Operator, CharClass::Other) => {
                    self.unread();
                    break self.position();
                }
                (CharClass::Digit, CharClass::Operator) => {
                    if mode == ScanMode::Real
                        && matches!(c, b'+' | b'-')
                        && lexeme.after_exponent_marker()
                        && matches!(self.peek(), Some((d, _)) if d.is_ascii_digit())
                    {
                        lexeme.text.push(c);
                    } else {
                        self.unread();
                        break self.position();
                    }
                }
                (CharClass::Digit, CharClass::Digit) => {
                    if !lexeme.push_digit(c) {
                        self.unread();
                        break self.position();
                    }
                }
                (CharClass::Digit, CharClass::Other) => {
                    if !self.continue_number(&mut lexeme, c, mode) {
                        self.unread();
                        break self.position();
                    }
                }
                (CharClass::Other, CharClass::Other) => lexeme.text.push(c),
                (CharClass::Other, _) => {
                    self.unread();
                    break self.position();
                }
                (CharClass::Delimiter, _) => unreachable!("tokens never start with a delimiter"),
            }
        };

        if fold_case {
            lexeme.text.make_ascii_uppercase();
        }
        let mut token = Token::new(lexeme.state, token_start);
        token.flags = lexeme.flags;
        token.text = String::from_utf8_lossy(&lexeme.text).into_owned();
        self.finish_span(&mut token, end);

        match token.class {
            CharClass::Digit => {
                let value = if token.is_hex() {
                    parse_hex(&token.text).map(|value| match token.is_negative() {
                        true => -value,
                        false => value,
                    })
                } else {
                    lexeme
                        .integer_value()
                        .ok_or_else(|| ScanError::IntegerOverflow(token.text.clone()))
                };
                token.int_value = match value {
                    Ok(value) => value,
                    Err(error) => {
                        self.recover(&token, error);
                        0
                    }
                };
            }
            CharClass::Operator => {
                self.scan_operator_code(&mut token);
            }
            _ => token.int_value = byte_sum(&token.text),
        }

        self.token_returned(start);
        trace!("scanned {:?} at {:?}", token.text, token.span);
        Some(token)
    }

    /// Scans the next token with the cursor's class table.  Returns `None` at
    /// end of line.
    ///
    /// If `fold_case` is true, the token's text is upper-cased.
    pub fn scan_token(&mut self, fold_case: bool) -> Option<Token> {
        self.scan_core(fold_case, ScanMode::Plain)
    }

    /// Resolves `token`, which should be an operator token that was just
    /// scanned, to its opcode, and stores the opcode in
    /// [Token::int_value].  Returns the opcode, or 0 if `token` does not
    /// start with an operator character.
    ///
    /// If only the first character of `token` forms an operator, the rest is
    /// pushed back onto the cursor to be scanned again, and `token` is
    /// shortened to match.
    pub fn scan_operator_code(&mut self, token: &mut Token) -> i32 {
        let Some((operator, len)) = resolve(token.text.as_bytes()) else {
            return 0;
        };
        if len < token.text.len() {
            let end = token.span.start + len;
            self.seek(end);
            token.text.truncate(len);
            self.finish_span(token, end);
        }
        token.int_value = i64::from(operator.code());
        operator.code()
    }

    /// Scans the next token, treating `.`, `_`, exponents, and hex markers as
    /// parts of numbers, and fills in [Token::real_value] for numbers.
    ///
    /// An exponent may be signed with `+`, `-`, or `_`, so `8.623e-1` and
    /// `8.623e_1` are the same number.  The token's text is always
    /// upper-cased.
    pub fn scan_real_token(&mut self) -> Option<Token> {
        let mut token =
            self.with_widening(Widening::Real, |cursor| cursor.scan_core(true, ScanMode::Real))?;
        if token.class == CharClass::Digit {
            let value = if token.is_hex() {
                token.int_value as f64
            } else {
                match parse_real(&token.text) {
                    Ok(value) if token.is_negative() => -value,
                    Ok(value) => value,
                    Err(error) => {
                        self.recover(&token, error);
                        0.0
                    }
                }
            };
            token.real_value = Some(value);
        }
        Some(token)
    }

    /// Scans the next token as a word, in which digits and operator
    /// characters are ordinary characters.  A quoted word continues through
    /// any word characters directly after its closing quote.
    pub fn scan_word_token(&mut self, fold_case: bool) -> Option<Token> {
        self.with_widening(Widening::Word, |cursor| {
            let mut token = cursor.scan_core(fold_case, ScanMode::Word)?;
            if token.is_quoted() && token.span.end == cursor.position() {
                let mut tail = Vec::new();
                while let Some((c, CharClass::Other)) = cursor.peek() {
                    tail.push(c);
                    cursor.consume();
                }
                if !tail.is_empty() {
                    if fold_case {
                        tail.make_ascii_uppercase();
                    }
                    token.text.push_str(&String::from_utf8_lossy(&tail));
                    token.int_value = byte_sum(&token.text);
                    let end = cursor.position();
                    cursor.finish_span(&mut token, end);
                    if let Some((_, CharClass::Delimiter)) = cursor.peek() {
                        cursor.consume();
                    }
                }
            }
            Some(token)
        })
    }

    /// Returns everything left on the line as a single [CharClass::Other]
    /// token, or `None` if nothing is left.
    pub fn scan_rest_of_line(&mut self, fold_case: bool) -> Option<Token> {
        if self.at_end() {
            return None;
        }
        let start = self.position();
        let mut text = self.remaining().to_vec();
        self.seek(self.line().len());
        if fold_case {
            text.make_ascii_uppercase();
        }

        let mut token = Token::new(CharClass::Other, start);
        token.text = String::from_utf8_lossy(&text).into_owned();
        token.int_value = byte_sum(&token.text);
        self.finish_span(&mut token, self.line().len());
        self.token_returned(start);
        Some(token)
    }

    /// Scans the next token with the variant selected by `mode`.
    pub fn scan(&mut self, mode: ScanMode, fold_case: bool) -> Option<Token> {
        match mode {
            ScanMode::Plain => self.scan_token(fold_case),
            ScanMode::Real => self.scan_real_token(),
            ScanMode::Word => self.scan_word_token(fold_case),
            ScanMode::Rest => self.scan_rest_of_line(fold_case),
        }
    }
}
