// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Common Modul for the track viewer
//!
//! Provides the common data types that are used across every modul.

pub mod bounds;
pub mod category;
pub mod color;
pub mod position;
pub mod test_helper;
pub mod track;
