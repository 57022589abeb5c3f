// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{bounds::Bounds, position::Coordinate};

/// Two point ride across Sydney with an embedded track name.
pub fn get_ride_gpx<'a>() -> &'a str {
    include_str!("../../../assets/tracks/ride.gpx")
}

pub fn get_ride_points() -> Vec<Coordinate> {
    vec![Coordinate::new(151.0, -33.8), Coordinate::new(151.2, -33.9)]
}

pub fn get_ride_bounds() -> Bounds {
    Bounds {
        min_lon: 151.0,
        min_lat: -33.9,
        max_lon: 151.2,
        max_lat: -33.8,
    }
}

/// Five points in two segments, without a track name.
pub fn get_coastal_walk_gpx<'a>() -> &'a str {
    include_str!("../../../assets/tracks/coastal_walk.gpx")
}

/// A valid document that has a waypoint but no track points.
pub fn get_waypoints_only_gpx<'a>() -> &'a str {
    include_str!("../../../assets/tracks/waypoints_only.gpx")
}

/// Two valid track points surrounded by points with broken coordinates.
pub fn get_damaged_points_gpx<'a>() -> &'a str {
    include_str!("../../../assets/tracks/damaged_points.gpx")
}

/// Builds a minimal GPX document from the given points.
pub fn gpx_from_points(name: Option<&str>, points: &[Coordinate]) -> String {
    let mut gpx = String::from(
        "<?xml version=\"1.0\"?>\n<gpx version=\"1.1\" xmlns=\"http://www.topografix.com/GPX/1/1\">\n<trk>\n",
    );
    if let Some(name) = name {
        gpx.push_str(&format!("<name>{name}</name>\n"));
    }
    gpx.push_str("<trkseg>\n");
    for point in points {
        gpx.push_str(&format!(
            "<trkpt lat=\"{}\" lon=\"{}\"/>\n",
            point.latitude, point.longitude
        ));
    }
    gpx.push_str("</trkseg>\n</trk>\n</gpx>\n");
    gpx
}
