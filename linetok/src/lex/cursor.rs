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

//! The line buffer that scanning operates on.
//!
//! A [Cursor] owns one line of input, a read position within it, and the
//! [ClassTable] used to classify its bytes.  It is built fresh for each line
//! and thrown away afterward.
//!
//! The character reader primitives ([Cursor::peek], [Cursor::read],
//! [Cursor::unread]) are the only code that moves the position one byte at a
//! time.  Whole-token movement goes through [Cursor::push_back] and
//! [Checkpoint]s.

use std::rc::Rc;

use log::debug;

use crate::message::{Diagnostic, Diagnostics};

use super::class::{CharClass, ClassTable, Widening};

/// A saved position within a particular line.
///
/// A checkpoint remembers which line it came from, so it can only be
/// restored onto the cursor (or a clone of the cursor) that created it.
#[derive(Clone, Debug)]
pub struct Checkpoint {
    line: Rc<[u8]>,
    pos: usize,
}

impl Checkpoint {
    pub fn position(&self) -> usize {
        self.pos
    }
}

/// Restores a cursor's class table when dropped.
struct WideningGuard<'a> {
    cursor: &'a mut Cursor,
    saved: ClassTable,
}

impl Drop for WideningGuard<'_> {
    fn drop(&mut self) {
        self.cursor.classes = self.saved;
    }
}

#[derive(Clone, Debug)]
pub struct Cursor {
    /// The line, without any trailing NUL.
    line: Rc<[u8]>,

    /// Offset of the next byte to read, in `0..=line.len()`.
    pos: usize,

    /// Position before the most recently returned token, if it has not
    /// already been pushed back.
    last_start: Option<usize>,

    classes: ClassTable,

    diagnostics: Diagnostics,
}

impl Cursor {
    /// Returns a cursor positioned at the start of `line`, or `None` if the
    /// line is empty.
    ///
    /// The line ends at its first NUL byte, if it has one.
    pub fn new(line: impl AsRef<[u8]>) -> Option<Self> {
        let line = line.as_ref();
        let line = match line.iter().position(|&b| b == 0) {
            Some(nul) => &line[..nul],
            None => line,
        };
        if line.is_empty() {
            return None;
        }
        Some(Self {
            line: Rc::from(line),
            pos: 0,
            last_start: None,
            classes: ClassTable::default(),
            diagnostics: Diagnostics::default(),
        })
    }

    pub fn line(&self) -> &[u8] {
        &self.line
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the part of the line that has not been read yet.
    pub fn remaining(&self) -> &[u8] {
        &self.line[self.pos..]
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.line.len()
    }

    pub fn classes(&self) -> &ClassTable {
        &self.classes
    }

    /// Makes `byte` a delimiter for as long as this cursor lives.
    pub fn pin_delimiter(&mut self, byte: u8) {
        self.classes.pin_delimiter(byte);
    }

    /// Returns the next byte and its class, without consuming it, or `None`
    /// at end of line.
    pub fn peek(&self) -> Option<(u8, CharClass)> {
        self.peek_at(0)
    }

    /// Like [Cursor::peek], but looks `offset` bytes past the current
    /// position.
    pub fn peek_at(&self, offset: usize) -> Option<(u8, CharClass)> {
        let c = *self.line.get(self.pos + offset)?;
        Some((c, self.classes.get(c)))
    }

    /// Advances past the next byte.  Does nothing at end of line.
    pub fn consume(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    /// Returns the next byte and its class and advances past it.
    pub fn read(&mut self) -> Option<(u8, CharClass)> {
        let result = self.peek();
        if result.is_some() {
            self.pos += 1;
        }
        result
    }

    /// Backs up over the byte most recently read.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the start of the line.
    pub(crate) fn unread(&mut self) {
        assert!(self.pos > 0, "cannot unread at start of line");
        self.pos -= 1;
    }

    /// Moves to `pos`, which must be within the line.
    pub(crate) fn seek(&mut self, pos: usize) {
        assert!(pos <= self.line.len(), "position {pos} is past end of line");
        self.pos = pos;
    }

    /// Records that a token was just returned that started scanning at
    /// `start`, so that [Cursor::push_back] can return to it.
    pub(crate) fn token_returned(&mut self, start: usize) {
        self.last_start = Some(start);
    }

    /// Runs `f` with the class table temporarily widened by `widening`.
    ///
    /// The table is put back as it was when `f` returns, including by
    /// unwinding.
    pub fn with_widening<F, R>(&mut self, widening: Widening, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        let mut guard = WideningGuard {
            saved: self.classes,
            cursor: self,
        };
        guard.cursor.classes.widen(widening);
        debug!(
            "widened class table for {widening:?} scan at {}",
            guard.cursor.pos
        );
        f(&mut *guard.cursor)
    }

    /// Rewinds to just before the most recently returned token, so that the
    /// next scan returns it again.
    ///
    /// # Panics
    ///
    /// Panics if no token has been returned since the last push back.
    pub fn push_back(&mut self) {
        let Some(start) = self.last_start.take() else {
            panic!("push_back without a token to push back");
        };
        debug!("pushing back from {} to {start}", self.pos);
        self.pos = start;
    }

    /// Returns true if [Cursor::push_back] may be called.
    pub fn can_push_back(&self) -> bool {
        self.last_start.is_some()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            line: self.line.clone(),
            pos: self.pos,
        }
    }

    /// Returns to `checkpoint`.  Any pending push back is forgotten.
    ///
    /// # Panics
    ///
    /// Panics if `checkpoint` was taken on a different line.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        assert!(
            Rc::ptr_eq(&self.line, &checkpoint.line),
            "checkpoint restored onto a different line"
        );
        self.pos = checkpoint.pos;
        self.last_start = None;
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod test {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use crate::lex::class::{CharClass, Widening};

    use super::Cursor;

    #[test]
    fn empty_lines() {
        assert!(Cursor::new("").is_none());
        assert!(Cursor::new(b"\0abc").is_none());
        assert_eq!(Cursor::new(b"ab\0cd").unwrap().line(), b"ab");
    }

    #[test]
    fn reader() {
        let mut cursor = Cursor::new("a+1").unwrap();
        assert_eq!(cursor.peek(), Some((b'a', CharClass::Other)));
        assert_eq!(cursor.read(), Some((b'a', CharClass::Other)));
        assert_eq!(cursor.peek_at(1), Some((b'1', CharClass::Digit)));
        cursor.consume();
        assert_eq!(cursor.read(), Some((b'1', CharClass::Digit)));
        assert_eq!(cursor.read(), None);
        assert!(cursor.at_end());
        cursor.consume();
        assert_eq!(cursor.position(), 3);
        cursor.unread();
        assert_eq!(cursor.remaining(), b"1");
    }

    #[test]
    #[should_panic(expected = "cannot unread")]
    fn unread_at_start() {
        Cursor::new("x").unwrap().unread();
    }

    #[test]
    fn widening_is_undone() {
        let mut cursor = Cursor::new("1.5").unwrap();
        cursor.pin_delimiter(b'_');
        let before = *cursor.classes();
        let class = cursor.with_widening(Widening::Real, |cursor| cursor.classes().get(b'.'));
        assert_eq!(class, CharClass::Digit);
        assert_eq!(*cursor.classes(), before);
        assert_eq!(cursor.classes().get(b'_'), CharClass::Delimiter);
    }

    #[test]
    fn widening_is_undone_on_unwind() {
        let mut cursor = Cursor::new("1.5").unwrap();
        let before = *cursor.classes();
        let result = catch_unwind(AssertUnwindSafe(|| {
            cursor.with_widening(Widening::Word, |_| -> bool { panic!("scan failed") })
        }));
        assert!(result.is_err());
        assert_eq!(*cursor.classes(), before);
    }

    #[test]
    #[should_panic(expected = "push_back without a token")]
    fn push_back_twice() {
        let mut cursor = Cursor::new("a b").unwrap();
        cursor.token_returned(0);
        cursor.push_back();
        cursor.push_back();
    }

    #[test]
    fn checkpoint() {
        let mut cursor = Cursor::new("abc").unwrap();
        cursor.consume();
        let checkpoint = cursor.checkpoint();
        cursor.consume();
        cursor.consume();
        cursor.restore(checkpoint);
        assert_eq!(cursor.position(), 1);

        let copy = cursor.clone();
        cursor.restore(copy.checkpoint());
    }

    #[test]
    #[should_panic(expected = "different line")]
    fn checkpoint_other_line() {
        let a = Cursor::new("abc").unwrap();
        let mut b = Cursor::new("abc").unwrap();
        b.restore(a.checkpoint());
    }
}
