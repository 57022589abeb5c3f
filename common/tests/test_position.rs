// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::position::Coordinate;

fn get_coordinate_as_json<'a>() -> &'a str {
    r#"
    {
        "longitude": 151.2093,
        "latitude": -33.8688
    }
    "#
}

#[test]
pub fn deserialize_coordinate_from_json() {
    let pos = Coordinate::from_json(get_coordinate_as_json())
        .unwrap_or_else(|e| panic!("Failed to deserialize the raw json. Reason: {e}"));
    assert_eq!(pos, Coordinate::new(151.2093, -33.8688));
}

#[test]
pub fn reject_out_of_range_and_non_finite_values() {
    assert!(Coordinate::new(180.0, -90.0).is_valid());
    assert!(!Coordinate::new(180.5, 0.0).is_valid());
    assert!(!Coordinate::new(0.0, 91.0).is_valid());
    assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
}
