//! The clip case table checked against a reference polygon clipper.

use std::collections::HashSet;

use chart3d_charts::line::clip::{Band, BandPosition, CLIP_TAG, EdgeKind, ProfilePoint, clipped_segment, profile};
use chart3d_graphics::Color;

const WMIN: f64 = 0.0;
const WMAX: f64 = 10.0;
const LEVELS: [f64; 8] = [-3.0, 0.0, 2.0, 5.0, 8.0, 10.0, 12.0, 15.0];

fn signed_area(points: &[(f64, f64)]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.0 * b.1 - b.0 * a.1
        })
        .sum::<f64>()
        / 2.0
}

/// One Sutherland-Hodgman pass against a horizontal line.
fn clip_half(points: &[(f64, f64)], w: f64, keep_below: bool) -> Vec<(f64, f64)> {
    let inside = |p: (f64, f64)| if keep_below { p.1 <= w } else { p.1 >= w };
    let mut out = Vec::new();
    for i in 0..points.len() {
        let (a, b) = (points[i], points[(i + 1) % points.len()]);
        if inside(a) {
            out.push(a);
        }
        if inside(a) != inside(b) {
            let t = (w - a.1) / (b.1 - a.1);
            out.push((a.0 + t * (b.0 - a.0), w));
        }
    }
    out
}

fn reference_area(x0: f64, x1: f64, start: Band, end: Band) -> f64 {
    let quad = [(x0, start.bottom), (x1, end.bottom), (x1, end.top), (x0, start.top)];
    let clipped = clip_half(&clip_half(&quad, WMAX, true), WMIN, false);
    if clipped.len() < 3 {
        return 0.0;
    }
    signed_area(&clipped).abs()
}

fn xy(points: &[ProfilePoint]) -> Vec<(f64, f64)> {
    points.iter().map(|p| (p.x, p.y)).collect()
}

fn bands() -> Vec<Band> {
    let mut out = Vec::new();
    for (i, &b) in LEVELS.iter().enumerate() {
        for &t in &LEVELS[i + 1..] {
            out.push(Band::new(b, t));
        }
    }
    out
}

#[test]
fn every_case_matches_the_reference_clip() {
    let (x0, x1) = (1.0, 3.0);
    let mut cases = HashSet::new();
    for start in bands() {
        for end in bands() {
            let first = BandPosition::classify(start.bottom, start.top, WMIN, WMAX);
            let last = BandPosition::classify(end.bottom, end.top, WMIN, WMAX);
            cases.insert((first, last));

            let expected = reference_area(x0, x1, start, end);
            let result = profile(x0, x1, start, end, WMIN, WMAX).unwrap();
            let Some(points) = result else {
                assert!(expected < 1e-9, "{first}{last}: empty profile for visible area {expected}");
                continue;
            };
            let area = signed_area(&xy(&points));
            assert!(
                (area - expected).abs() < 1e-9,
                "{first}{last} {start:?} {end:?}: area {area}, expected {expected}"
            );
            assert!(area >= 0.0, "{first}{last}: clockwise profile");
            for p in &points {
                assert!(p.y >= WMIN && p.y <= WMAX, "{first}{last}: {p:?} outside the window");
                assert!(p.x >= x0 && p.x <= x1, "{first}{last}: {p:?} outside the segment");
            }
        }
    }
    assert_eq!(cases.len(), 36);
}

#[test]
fn clip_edges_lie_on_the_window() {
    for start in bands() {
        for end in bands() {
            let Some(points) = profile(0.0, 4.0, start, end, WMIN, WMAX).unwrap() else {
                continue;
            };
            for (i, p) in points.iter().enumerate() {
                let q = points[(i + 1) % points.len()];
                match p.edge {
                    EdgeKind::ClipTop => assert!(p.y == WMAX && q.y == WMAX),
                    EdgeKind::ClipBottom => assert!(p.y == WMIN && q.y == WMIN),
                    EdgeKind::Opening => assert!(p.x == 0.0 && q.x == 0.0),
                    EdgeKind::Closing => assert!(p.x == 4.0 && q.x == 4.0),
                    EdgeKind::Top | EdgeKind::Bottom => {}
                }
            }
        }
    }
}

#[test]
fn tagged_faces_follow_clip_edges() {
    for start in bands() {
        for end in bands() {
            let Some(points) = profile(0.0, 2.0, start, end, WMIN, WMAX).unwrap() else {
                continue;
            };
            let solid = clipped_segment(
                0.0,
                2.0,
                start,
                end,
                1.0,
                0.5,
                (WMIN, WMAX),
                Color::BLACK,
                true,
                true,
            )
            .unwrap()
            .unwrap();
            let clip_edges = points.iter().filter(|p| p.edge.is_clip()).count();
            let clip_faces = solid.faces().iter().filter(|f| f.tag() == Some(CLIP_TAG)).count();
            assert_eq!(clip_edges, clip_faces);
            assert_eq!(solid.vertex_count(), 2 * points.len());
            assert_eq!(solid.face_count(), points.len() + 2);
        }
    }
}

#[test]
fn straddling_the_top_then_inside() {
    let start = Band::new(5.0, 15.0);
    let end = Band::new(2.0, 8.0);
    assert_eq!(BandPosition::classify(start.bottom, start.top, WMIN, WMAX), BandPosition::B);
    assert_eq!(BandPosition::classify(end.bottom, end.top, WMIN, WMAX), BandPosition::D);
    let points = profile(0.0, 7.0, start, end, WMIN, WMAX).unwrap().unwrap();
    let expected = [
        (0.0, 5.0, EdgeKind::Bottom),
        (7.0, 2.0, EdgeKind::Closing),
        (7.0, 8.0, EdgeKind::Top),
        (5.0, 10.0, EdgeKind::ClipTop),
        (0.0, 10.0, EdgeKind::Opening),
    ];
    assert_eq!(points.len(), expected.len());
    for (p, (x, y, edge)) in points.iter().zip(expected) {
        assert!((p.x - x).abs() < 1e-12 && (p.y - y).abs() < 1e-12, "{p:?}");
        assert_eq!(p.edge, edge);
    }
}
