// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::category::{Category, CategoryError};

#[test]
pub fn default_is_uncategorized() {
    assert_eq!(Category::default(), Category::Uncategorized);
}

#[test]
pub fn parse_known_labels() {
    assert_eq!(Category::parse("Cycling"), Ok(Category::Cycling));
    assert_eq!(Category::parse("hiking"), Ok(Category::Hiking));
    assert_eq!(Category::parse(" Walking "), Ok(Category::Walking));
}

#[test]
pub fn reject_unknown_label() {
    assert_eq!(
        Category::parse("Swimming"),
        Err(CategoryError::Invalid("Swimming".to_string()))
    );
}

#[test]
pub fn labels_in_display_order() {
    assert_eq!(
        Category::labels(),
        vec!["Uncategorized", "Running", "Cycling", "Hiking", "Driving", "Walking"]
    );
    assert_eq!(Category::Driving.to_string(), "Driving");
}
