use common::{bounds::Bounds, color::Color, position::Coordinate};
use module_core::{FitOptions, LayerHandle, LineStyle, RenderingAdapter};
use std::time::Duration;
use surface::HeadlessSurface;

fn style(color: &str) -> LineStyle {
    LineStyle::new(Color::parse(color).unwrap(), 4.0)
}

fn line() -> Vec<Coordinate> {
    vec![Coordinate::new(151.0, -33.8), Coordinate::new(151.2, -33.9)]
}

#[test_log::test]
fn created_layers_are_visible_and_distinct() {
    let mut surface = HeadlessSurface::new();

    let first = surface.create_layer(&line(), &style("#FF5733"));
    let second = surface.create_layer(&line(), &style("#33FF57"));

    assert_ne!(first, second);
    assert_eq!(surface.layer_count(), 2);
    let layer = surface.layer(first).unwrap();
    assert!(layer.visible);
    assert_eq!(layer.line, line());
    assert_eq!(layer.style, style("#FF5733"));
}

#[test_log::test]
fn layer_changes_are_applied() {
    let mut surface = HeadlessSurface::new();
    let handle = surface.create_layer(&line(), &style("#FF5733"));

    surface.set_visible(handle, false);
    surface.set_style(handle, &style("#000000"));

    let layer = surface.layer(handle).unwrap();
    assert!(!layer.visible);
    assert_eq!(layer.style, style("#000000"));

    surface.remove_layer(handle);
    assert!(surface.layer(handle).is_none());
    assert_eq!(surface.layers().count(), 0);
}

#[test_log::test]
fn unknown_handles_are_ignored() {
    let mut surface = HeadlessSurface::new();
    let handle = surface.create_layer(&line(), &style("#FF5733"));
    let unknown = LayerHandle::new(99);

    surface.set_visible(unknown, false);
    surface.set_style(unknown, &style("#000000"));
    surface.remove_layer(unknown);

    assert_eq!(surface.layer_count(), 1);
    assert_eq!(surface.layer(handle).unwrap().style, style("#FF5733"));
}

#[test_log::test]
fn fit_view_keeps_box_with_area() {
    let mut surface = HeadlessSurface::new();
    assert!(surface.viewport().is_none());
    let bounds = Bounds {
        min_lon: 151.0,
        min_lat: -33.9,
        max_lon: 151.2,
        max_lat: -33.8,
    };

    surface.fit_view(&bounds, &FitOptions::default());

    let viewport = surface.viewport().unwrap();
    assert_eq!(viewport.bounds, bounds);
    assert_eq!(viewport.padding, 50);
    assert_eq!(viewport.duration_ms, 1000);
}

#[test_log::test]
fn fit_view_widens_single_point() {
    let mut surface = HeadlessSurface::new();
    let point = Coordinate::new(10.0, 50.0);
    let options = FitOptions {
        padding: 10,
        duration: Duration::from_millis(0),
        min_span: 0.01,
    };

    surface.fit_view(&Bounds::from_point(&point), &options);

    let viewport = surface.viewport().unwrap();
    assert!((viewport.bounds.width() - 0.01).abs() < 1e-9);
    assert!((viewport.bounds.height() - 0.01).abs() < 1e-9);
    assert!(viewport.bounds.contains(&point));
}
