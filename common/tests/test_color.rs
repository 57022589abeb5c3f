// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::color::{Color, ColorError, DEFAULT_PALETTE, default_palette};

#[test]
pub fn parse_hex_forms() {
    assert_eq!(Color::parse("#00ff00").unwrap().as_str(), "#00FF00");
    assert_eq!(Color::parse("#0f0").unwrap().as_str(), "#00FF00");
    assert_eq!(Color::parse(" #A833FF ").unwrap().as_str(), "#A833FF");
}

#[test]
pub fn parse_rgb_function() {
    assert_eq!(
        Color::parse("rgb(255, 87, 51)").unwrap(),
        Color::parse("#FF5733").unwrap()
    );
}

#[test]
pub fn reject_invalid_colors() {
    for value in ["", "#12345", "#GGGGGG", "red", "rgb(1,2)", "rgb(256,0,0)"] {
        assert_eq!(
            Color::parse(value),
            Err(ColorError::Invalid(value.to_string())),
            "value {value:?} was accepted"
        );
    }
}

#[test]
pub fn default_palette_is_complete() {
    let palette = default_palette();
    assert_eq!(palette.len(), DEFAULT_PALETTE.len());
    assert_eq!(palette[0].to_string(), "#FF5733");
}
