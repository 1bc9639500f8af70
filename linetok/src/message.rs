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

//! Diagnostics produced while scanning.
//!
//! Scanning never fails outright.  When it has to guess (for example, a
//! number that will not convert), it records a [Diagnostic] on the cursor and
//! carries on with a best-effort token.

use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    ops::Range,
};

use serde::Serialize;

/// How serious a [Diagnostic] is.  Scanning always recovers, so every
/// diagnostic it reports is a warning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,

    /// Byte range within the scanned line.
    pub span: Range<usize>,

    pub text: String,
}

impl Diagnostic {
    pub fn warning(span: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            span,
            text: text.into(),
        }
    }
}

impl Display for Diagnostic {
    /// Columns are shown 1-based and inclusive, e.g. `3-5: warning: ...`.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let c1 = self.span.start + 1;
        let c2 = self.span.end.max(c1);
        if c1 == c2 {
            write!(f, "{c1}: ")?;
        } else {
            write!(f, "{c1}-{c2}: ")?;
        }
        write!(f, "{}: {}", self.severity, self.text)
    }
}

impl Debug for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self, f)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
