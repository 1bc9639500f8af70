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

use linetok::{
    lex::{
        CharClass, Cursor, Operator, ScanMode, tokenize_line, tokenize_line_real,
        tokenize_line_words,
        tokenize::{Tokens, tokenize},
    },
    settings::Settings,
};

fn summary(tokens: &[linetok::lex::Token]) -> Vec<(CharClass, String, i64)> {
    tokens
        .iter()
        .map(|token| (token.class, token.text.clone(), token.int_value))
        .collect()
}

#[test]
fn empty_lines() {
    for line in ["", "\0", " \t ;; "] {
        assert!(tokenize_line(line).is_empty(), "{line:?}");
        assert!(tokenize_line_real(line).is_empty(), "{line:?}");
        assert!(tokenize_line_words(line).is_empty(), "{line:?}");
    }
}

#[test]
fn command_line() {
    let tokens = tokenize_line("push 12 3 + swap ><");
    assert_eq!(
        summary(&tokens),
        vec![
            (CharClass::Other, String::from("PUSH"), 320),
            (CharClass::Digit, String::from("12"), 12),
            (CharClass::Digit, String::from("3"), 3),
            (CharClass::Operator, String::from("+"), 8),
            (CharClass::Other, String::from("SWAP"), 315),
            (CharClass::Operator, String::from("><"), 20),
        ]
    );
    assert_eq!(tokens[5].operator(), Some(Operator::Swap));
}

#[test]
fn reals() {
    let tokens = tokenize_line_real("1.5 -2.25 8.623e-1 0x1f");
    let values = tokens
        .iter()
        .map(|token| token.real_value)
        .collect::<Vec<_>>();
    assert_eq!(
        values,
        vec![Some(1.5), Some(-2.25), Some(0.8623), Some(31.0)]
    );
    assert!(tokens[1].is_negative());
    assert_eq!(tokens[1].raw_text, "-2.25");
    assert!(tokens[3].is_hex());
}

#[test]
fn words() {
    let tokens = tokenize_line_words("a=b \"x y\"z 42");
    let texts = tokens
        .iter()
        .map(|token| token.text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(texts, ["A=B", "X YZ", "42"]);
    assert!(tokens[1].is_quoted());
    assert_eq!(tokens[1].raw_text, "\"x y\"z");
    assert!(tokens.iter().all(|token| token.class == CharClass::Other));
}

#[test]
fn preserve_case_and_delimiters() {
    let settings = Settings {
        fold_case: false,
        pinned_delimiters: vec![b','],
        mode: ScanMode::Plain,
    };
    let tokens = tokenize("Hello,World", ScanMode::Plain, &settings);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].text, "Hello");
    assert_eq!(tokens[0].delimiter, b',');
    assert_eq!(tokens[1].text, "World");
}

#[test]
fn mixed_scanning() {
    // A command word decides how the rest of the line is read.
    let mut cursor = Cursor::new("echo  Hello, world").unwrap();
    let command = cursor.scan_token(true).unwrap();
    assert_eq!(command.text, "ECHO");
    let rest = cursor.scan_rest_of_line(false).unwrap();
    assert_eq!(rest.text, " Hello, world");
    assert!(cursor.scan_token(true).is_none());
}

#[test]
fn iterator_diagnostics() {
    let mut tokens = Tokens::new("0x10000000000000000 1", Settings::global());
    let all = tokens.by_ref().collect::<Vec<_>>();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].int_value, 0);
    assert_eq!(all[1].int_value, 1);
    assert_eq!(tokens.diagnostics().len(), 1);
}
