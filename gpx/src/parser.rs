use crate::GpxError;
use common::position::Coordinate;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, warn};

/// Result of parsing a GPX document.
///
/// `points` is never empty: a document without usable track points is
/// reported as [`GpxError::NoTrackPoints`] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedGpx {
    /// Track points of all tracks and segments in document order.
    pub points: Vec<Coordinate>,
    /// Text of the first `name` element directly below a `trk` element.
    pub track_name: Option<String>,
    /// Number of track points that were dropped because of broken coordinates.
    pub skipped_points: usize,
}

/// Parses the raw text of a GPX file.
///
/// Every `trkpt` element contributes one [`Coordinate`] built from its `lon`
/// and `lat` attributes. A point whose attribute is missing, not a number, not
/// finite or outside the WGS84 range is skipped and counted in
/// [`ParsedGpx::skipped_points`]. Namespace prefixes on element names are
/// ignored.
///
/// # Errors
///
/// * [`GpxError::Malformed`] – if the text is not well-formed XML.
/// * [`GpxError::NoTrackPoints`] – if no valid track point is left.
pub fn parse(text: &str) -> Result<ParsedGpx, GpxError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut points = Vec::new();
    let mut skipped_points = 0;
    let mut ordinal = 0;
    let mut track_name: Option<String> = None;
    let mut name_seen = false;
    let mut name_text: Option<String> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            GpxError::Malformed(format!("{e} at position {}", reader.buffer_position()))
        })?;
        match event {
            Event::Start(ref e) => {
                let name = local_name(e);
                if name == "trkpt" {
                    ordinal += 1;
                    read_track_point(e, ordinal, &mut points, &mut skipped_points);
                } else if name == "name" && !name_seen && is_parent(&path, "trk") {
                    name_seen = true;
                    name_text = Some(String::new());
                }
                path.push(name);
            }
            Event::Empty(ref e) => {
                let name = local_name(e);
                if name == "trkpt" {
                    ordinal += 1;
                    read_track_point(e, ordinal, &mut points, &mut skipped_points);
                } else if name == "name" && is_parent(&path, "trk") {
                    // An empty first name still counts as the first one.
                    name_seen = true;
                }
            }
            Event::Text(ref t) => {
                if let Some(buffer) = name_text.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| GpxError::Malformed(e.to_string()))?;
                    buffer.push_str(&text);
                }
            }
            Event::CData(t) => {
                if let Some(buffer) = name_text.as_mut() {
                    buffer.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Event::End(_) => {
                let closed = path.pop();
                if closed.as_deref() == Some("name") && is_parent(&path, "trk") {
                    if let Some(text) = name_text.take() {
                        let text = text.trim();
                        if !text.is_empty() {
                            track_name = Some(text.to_string());
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => (),
        }
    }

    if !path.is_empty() {
        return Err(GpxError::Malformed(format!(
            "unexpected end of document, element \"{}\" is not closed",
            path.join("/")
        )));
    }
    if points.is_empty() {
        debug!("GPX document contains no usable track points, skipped {skipped_points}");
        return Err(GpxError::NoTrackPoints);
    }
    debug!(
        "Parsed {} track points, skipped {}, track name {:?}",
        points.len(),
        skipped_points,
        track_name
    );
    Ok(ParsedGpx {
        points,
        track_name,
        skipped_points,
    })
}

/// Checks that `text` is a well-formed XML document with a `gpx` root element.
///
/// Used to reject uploads before they become listable. The document does not
/// need to contain any track point.
pub fn validate_document(text: &str) -> Result<(), GpxError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut root: Option<String> = None;
    let mut depth = 0usize;
    loop {
        let event = reader.read_event().map_err(|e| {
            GpxError::Malformed(format!("{e} at position {}", reader.buffer_position()))
        })?;
        match event {
            Event::Start(ref e) => {
                if root.is_none() {
                    root = Some(local_name(e));
                }
                depth += 1;
            }
            Event::Empty(ref e) => {
                if root.is_none() {
                    root = Some(local_name(e));
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => (),
        }
    }
    if depth != 0 {
        return Err(GpxError::Malformed("unexpected end of document".to_string()));
    }
    match root {
        Some(name) if name == "gpx" => Ok(()),
        Some(name) => Err(GpxError::NotGpx(name)),
        None => Err(GpxError::Malformed("document has no root element".to_string())),
    }
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn is_parent(path: &[String], name: &str) -> bool {
    path.last().is_some_and(|parent| parent == name)
}

fn read_track_point(
    e: &BytesStart,
    ordinal: usize,
    points: &mut Vec<Coordinate>,
    skipped_points: &mut usize,
) {
    let longitude = coordinate_attribute(e, "lon");
    let latitude = coordinate_attribute(e, "lat");
    match (longitude, latitude) {
        (Some(longitude), Some(latitude)) => {
            let point = Coordinate::new(longitude, latitude);
            if point.is_valid() {
                points.push(point);
                return;
            }
            warn!("Skipping track point {ordinal}, coordinate out of range: {point:?}");
        }
        _ => warn!("Skipping track point {ordinal}, missing or invalid lon/lat attribute"),
    }
    *skipped_points += 1;
}

fn coordinate_attribute(e: &BytesStart, key: &str) -> Option<f64> {
    let attribute = e.try_get_attribute(key).ok()??;
    let value = attribute.unescape_value().ok()?;
    value.trim().parse::<f64>().ok()
}
