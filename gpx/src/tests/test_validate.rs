use crate::{GpxError, validate_document};
use common::test_helper::track::{get_ride_gpx, get_waypoints_only_gpx};

#[test]
fn accept_gpx_documents() {
    assert_eq!(validate_document(get_ride_gpx()), Ok(()));
    assert_eq!(validate_document(get_waypoints_only_gpx()), Ok(()));
}

#[test]
fn reject_other_root_element() {
    assert_eq!(
        validate_document("<?xml version=\"1.0\"?><kml><Document/></kml>"),
        Err(GpxError::NotGpx("kml".to_string()))
    );
}

#[test]
fn reject_malformed_documents() {
    assert!(matches!(
        validate_document("<gpx><trk></gpx>"),
        Err(GpxError::Malformed(_))
    ));
    assert!(matches!(
        validate_document("just some text"),
        Err(GpxError::Malformed(_))
    ));
}
