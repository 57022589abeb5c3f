use crate::calculate_bounds;
use common::position::Coordinate;
use common::test_helper::track::{get_ride_bounds, get_ride_points};

fn get_points() -> Vec<Coordinate> {
    vec![
        Coordinate::new(11.2803483, 52.0270889),
        Coordinate::new(11.2741851, 52.0298205),
        Coordinate::new(11.2772076, 52.0299681),
        Coordinate::new(11.2825350, 52.0266490),
        Coordinate::new(11.2817460, 52.0268070),
    ]
}

#[test]
fn bounds_of_ride() {
    let bounds = calculate_bounds(&get_ride_points()).unwrap();
    assert_eq!(bounds, get_ride_bounds());
}

#[test]
fn bounds_of_empty_input() {
    assert!(calculate_bounds(&[]).is_none());
}

#[test]
fn single_point_gives_zero_area_box() {
    let point = Coordinate::new(151.2093, -33.8688);
    let bounds = calculate_bounds(&[point]).unwrap();
    assert_eq!(bounds.width(), 0.0);
    assert_eq!(bounds.height(), 0.0);
    assert_eq!(bounds.center(), point);
}

#[test]
fn every_point_is_inside_bounds() {
    let points = get_points();
    let bounds = calculate_bounds(&points).unwrap();
    for point in points.iter() {
        assert!(bounds.min_lon <= point.longitude && point.longitude <= bounds.max_lon);
        assert!(bounds.min_lat <= point.latitude && point.latitude <= bounds.max_lat);
    }
    assert_eq!(bounds.min_lon, 11.2741851);
    assert_eq!(bounds.max_lon, 11.2825350);
    assert_eq!(bounds.min_lat, 52.0266490);
    assert_eq!(bounds.max_lat, 52.0299681);
}

#[test]
fn bounds_do_not_depend_on_point_order() {
    let points = get_points();
    let expected = calculate_bounds(&points).unwrap();

    let mut reversed = points.clone();
    reversed.reverse();
    assert_eq!(calculate_bounds(&reversed).unwrap(), expected);

    for shift in 1..points.len() {
        let mut rotated = points.clone();
        rotated.rotate_left(shift);
        assert_eq!(calculate_bounds(&rotated).unwrap(), expected);
    }
}
