// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! GPX Modul for the track viewer
//!
//! Turns the raw text of a GPX file into the ordered track points and the
//! optional track name. The parser is a pure transformation without any I/O.

mod error;
mod parser;

pub use error::GpxError;
pub use parser::{ParsedGpx, parse, validate_document};

#[cfg(test)]
mod tests;
