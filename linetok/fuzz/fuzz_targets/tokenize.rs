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

#![no_main]

use libfuzzer_sys::fuzz_target;
use linetok::lex::{cursor::Cursor, scan::ScanMode};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, line)) = data.split_first() else {
        return;
    };
    let mode = match selector % 4 {
        0 => ScanMode::Plain,
        1 => ScanMode::Real,
        2 => ScanMode::Word,
        _ => ScanMode::Rest,
    };
    let Some(mut cursor) = Cursor::new(line) else {
        return;
    };
    let classes = *cursor.classes();
    while let Some(token) = cursor.scan(mode, selector & 4 != 0) {
        assert!(cursor.position() > token.span.start);
        assert_eq!(*cursor.classes(), classes);

        // Pushing back and scanning again yields the same token.
        let position = cursor.position();
        cursor.push_back();
        let again = cursor.scan(mode, selector & 4 != 0);
        assert_eq!(again.as_ref().map(|t| &t.span), Some(&token.span));
        assert_eq!(cursor.position(), position);
    }
});
