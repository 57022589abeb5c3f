// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::bounds::Bounds;
use common::color::Color;
use common::position::Coordinate;
use rand::Rng;

/// Calculates the smallest axis-aligned box that contains every point.
///
/// The result does not depend on the order of `points`. A single point
/// yields a zero-area box located on that point.
///
/// # Parameters
/// - `points`: The track points to enclose.
///
/// # Returns
/// `None` if `points` is empty, otherwise the enclosing [`Bounds`].
pub fn calculate_bounds(points: &[Coordinate]) -> Option<Bounds> {
    let (first, rest) = points.split_first()?;
    let mut bounds = Bounds::from_point(first);
    for point in rest {
        bounds.extend(point);
    }
    Some(bounds)
}

/// Picks a default track color from `palette` using the given random source.
///
/// The function is pure apart from advancing `rng`, so a seeded source
/// always yields the same sequence of colors.
///
/// # Returns
/// `None` if the palette is empty.
pub fn pick_color<R: Rng + ?Sized>(palette: &[Color], rng: &mut R) -> Option<Color> {
    if palette.is_empty() {
        return None;
    }
    let index = rng.random_range(0..palette.len());
    palette.get(index).cloned()
}

#[cfg(test)]
mod tests;
