use super::*;
use approx::assert_abs_diff_eq;
use geo::Area;
use geo_types::{coord, LineString};

#[test]
fn test_single_line_gives_one_component() {
    for width in [0.5, 2.0, 25.0] {
        let line = LineString::from(vec![(0.0, 0.0), (100.0, 0.0), (100.0, 50.0)]);
        let buffered = buffer_lines(&[line], width).unwrap();
        assert_eq!(buffered.geometry.0.len(), 1, "width {}", width);
        assert!(buffered.geometry.unsigned_area() > 0.0);
        assert_eq!(buffered.skipped, 0);
    }
}

#[test]
fn test_straight_line_area_is_stadium() {
    // Rectangle 100 x 10 plus a disc of radius 5 from the round caps.
    let line = LineString::from(vec![(0.0, 0.0), (100.0, 0.0)]);
    let buffered = buffer_lines(&[line], 5.0).unwrap();
    let expected = 100.0 * 10.0 + std::f64::consts::PI * 25.0;
    assert_abs_diff_eq!(buffered.geometry.unsigned_area(), expected, epsilon = expected * 0.01);
}

#[test]
fn test_overlapping_lines_merge() {
    let lines = vec![
        LineString::from(vec![(0.0, 0.0), (50.0, 0.0)]),
        LineString::from(vec![(25.0, -25.0), (25.0, 25.0)]),
    ];
    let buffered = buffer_lines(&lines, 2.0).unwrap();
    assert_eq!(buffered.geometry.0.len(), 1);
}

#[test]
fn test_distant_lines_stay_apart() {
    let lines = vec![
        LineString::from(vec![(0.0, 0.0), (10.0, 0.0)]),
        LineString::from(vec![(0.0, 100.0), (10.0, 100.0)]),
    ];
    let buffered = buffer_lines(&lines, 2.0).unwrap();
    assert_eq!(buffered.geometry.0.len(), 2);
}

#[test]
fn test_zero_length_lines_are_skipped() {
    let lines = vec![
        LineString::from(vec![(5.0, 5.0), (5.0, 5.0)]),
        LineString::new(vec![]),
        LineString::from(vec![(0.0, 0.0), (10.0, 0.0)]),
    ];
    let buffered = buffer_lines(&lines, 1.0).unwrap();
    assert_eq!(buffered.skipped, 2);
    assert_eq!(buffered.geometry.0.len(), 1);
}

#[test]
fn test_only_degenerate_lines_is_error() {
    let lines = vec![LineString::from(vec![(5.0, 5.0), (5.0, 5.0)])];
    let err = buffer_lines(&lines, 1.0).unwrap_err();
    assert_eq!(err, AoiError::DegenerateGeometry { stage: Stage::BufferUnion });
}

#[test]
fn test_non_positive_width_rejected() {
    let lines = vec![LineString::from(vec![(0.0, 0.0), (10.0, 0.0)])];
    assert!(matches!(buffer_lines(&lines, 0.0), Err(AoiError::InvalidInput(_))));
    assert!(matches!(buffer_lines(&lines, -3.0), Err(AoiError::InvalidInput(_))));
}

#[test]
fn test_extend_segment() {
    let seg = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 });
    let ext = extend_segment(seg, 2.0);
    assert_abs_diff_eq!(ext.start.x, -2.0);
    assert_abs_diff_eq!(ext.end.x, 12.0);
    assert_abs_diff_eq!(ext.start.y, 0.0);

    let point = Line::new(coord! { x: 3.0, y: 3.0 }, coord! { x: 3.0, y: 3.0 });
    assert_eq!(extend_segment(point, 5.0), point);
}

#[test]
fn test_cutting_corridor_is_flat_ended() {
    // Butt caps: exactly a 10 x 2 rectangle.
    let seg = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 });
    let cut = cutting_corridor(seg, 1.0, 0.0);
    assert_abs_diff_eq!(cut.unsigned_area(), 20.0, epsilon = 1e-6);

    let extended = cutting_corridor(seg, 1.0, 1.0);
    assert_abs_diff_eq!(extended.unsigned_area(), 24.0, epsilon = 1e-6);
}

#[test]
fn test_corridor_on_touching_point_is_disc() {
    let seg = Line::new(coord! { x: 3.0, y: 3.0 }, coord! { x: 3.0, y: 3.0 });
    let disc = corridor(seg, 2.0);
    assert_eq!(disc.0.len(), 1);
    let expected = std::f64::consts::PI * 4.0;
    assert_abs_diff_eq!(disc.unsigned_area(), expected, epsilon = expected * 0.05);
}
