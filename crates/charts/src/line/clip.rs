//! Clipping a thick line segment to the visible value window.
//!
//! A segment joins two band positions: at `x0` the line occupies
//! `[y0b, y0t]` and at `x1` it occupies `[y1b, y1t]`. The quad between them
//! is cut to `wmin <= y <= wmax` and extruded along z into a closed solid.
//!
//! Each end of the band is classified against the window:
//!
//! | Case | Band at this end                         |
//! |------|------------------------------------------|
//! | `A`  | entirely above `wmax`                    |
//! | `B`  | spans `wmax` only                        |
//! | `C`  | spans both `wmin` and `wmax`             |
//! | `D`  | inside the window                        |
//! | `E`  | spans `wmin` only                        |
//! | `F`  | entirely below `wmin`                    |
//!
//! Every `(start, end)` pair has one explicit profile: a counter-clockwise
//! polygon in the x-y plane whose points also record which kind of edge
//! leaves them. Edges lying on a window line are clip edges and become
//! faces tagged [`CLIP_TAG`].

use std::fmt;

use chart3d_graphics::{Color, Object3D, Tolerance};
use tracing::{debug, instrument};

use crate::error::ChartError;

use EdgeKind::{Bottom, ClipBottom, ClipTop, Closing, Opening, Top};

/// Tag carried by faces that lie on the edge of the value window.
pub const CLIP_TAG: &str = "clip";

// ─── Classification ──────────────────────────────────────────────────────────

/// Where one end of a band sits relative to the value window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandPosition {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl BandPosition {
    pub fn classify(bottom: f64, top: f64, wmin: f64, wmax: f64) -> Self {
        if bottom >= wmax {
            Self::A
        } else if top > wmax && bottom > wmin {
            Self::B
        } else if top > wmax {
            Self::C
        } else if bottom >= wmin {
            Self::D
        } else if top > wmin {
            Self::E
        } else {
            Self::F
        }
    }
}

impl fmt::Display for BandPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

/// Bottom and top of the line at one end of a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub bottom: f64,
    pub top: f64,
}

impl Band {
    pub fn new(bottom: f64, top: f64) -> Self {
        Self { bottom, top }
    }

    /// A band of `height` centred on `y`.
    pub fn around(y: f64, height: f64) -> Self {
        Self::new(y - height / 2.0, y + height / 2.0)
    }
}

// ─── Cross points ────────────────────────────────────────────────────────────

/// X where the line `x0 -> x1`, running from `ya` to `yb`, meets `y = w`.
/// NaN when it never does.
fn cross(x0: f64, x1: f64, ya: f64, yb: f64, w: f64) -> f64 {
    if ya == yb {
        return if ya == w { x0 } else { f64::NAN };
    }
    if w < ya.min(yb) || w > ya.max(yb) {
        return f64::NAN;
    }
    x0 + (ya - w) / (ya - yb) * (x1 - x0)
}

/// Where the band's bottom and top edges cross the window lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossPoints {
    /// Bottom edge meets `wmin`.
    pub xa: f64,
    /// Top edge meets `wmin`.
    pub xb: f64,
    /// Bottom edge meets `wmax`.
    pub xc: f64,
    /// Top edge meets `wmax`.
    pub xd: f64,
}

impl CrossPoints {
    pub fn new(x0: f64, x1: f64, start: Band, end: Band, wmin: f64, wmax: f64) -> Self {
        Self {
            xa: cross(x0, x1, start.bottom, end.bottom, wmin),
            xb: cross(x0, x1, start.top, end.top, wmin),
            xc: cross(x0, x1, start.bottom, end.bottom, wmax),
            xd: cross(x0, x1, start.top, end.top, wmax),
        }
    }
}

// ─── Profiles ────────────────────────────────────────────────────────────────

/// The kind of the profile edge leaving a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Along the bottom of the line.
    Bottom,
    /// Along the top of the line.
    Top,
    /// On `y = wmin`.
    ClipBottom,
    /// On `y = wmax`.
    ClipTop,
    /// The vertical end at `x0`.
    Opening,
    /// The vertical end at `x1`.
    Closing,
}

impl EdgeKind {
    pub fn is_clip(self) -> bool {
        matches!(self, ClipBottom | ClipTop)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    pub x: f64,
    pub y: f64,
    pub edge: EdgeKind,
}

struct Frame {
    x0: f64,
    x1: f64,
    y0b: f64,
    y0t: f64,
    y1b: f64,
    y1t: f64,
    wmin: f64,
    wmax: f64,
    cross: CrossPoints,
}

impl Frame {
    fn pt(&self, x: f64, y: f64, edge: EdgeKind) -> ProfilePoint {
        ProfilePoint { x, y, edge }
    }
}

fn check_band(start: Band, end: Band, wmin: f64, wmax: f64) -> Result<(), ChartError> {
    let values = [start.bottom, start.top, end.bottom, end.top, wmin, wmax];
    let reason = if values.iter().any(|v| !v.is_finite()) {
        "non-finite extreme"
    } else if start.bottom > start.top || end.bottom > end.top {
        "bottom above top"
    } else if wmin >= wmax {
        "empty value window"
    } else {
        return Ok(());
    };
    Err(ChartError::InvalidBand {
        reason: reason.to_string(),
    })
}

/// Merge coincident neighbours. A point equal to its predecessor hands its
/// edge kind to the predecessor.
fn dedupe(points: Vec<ProfilePoint>, tol: &Tolerance) -> Vec<ProfilePoint> {
    let same = |a: &ProfilePoint, b: &ProfilePoint| tol.coincident(a.x, b.x) && tol.coincident(a.y, b.y);
    let mut out: Vec<ProfilePoint> = Vec::with_capacity(points.len());
    for p in points {
        match out.last_mut() {
            Some(last) if same(last, &p) => last.edge = p.edge,
            _ => out.push(p),
        }
    }
    while out.len() > 1 && same(&out[0], &out[out.len() - 1]) {
        out.pop();
    }
    out
}

/// The clipped x-y profile of the segment from `x0` to `x1`, or `None`
/// when nothing of the band is visible.
pub fn profile(
    x0: f64,
    x1: f64,
    start: Band,
    end: Band,
    wmin: f64,
    wmax: f64,
) -> Result<Option<Vec<ProfilePoint>>, ChartError> {
    check_band(start, end, wmin, wmax)?;
    let first = BandPosition::classify(start.bottom, start.top, wmin, wmax);
    let last = BandPosition::classify(end.bottom, end.top, wmin, wmax);
    let frame = Frame {
        x0,
        x1,
        y0b: start.bottom,
        y0t: start.top,
        y1b: end.bottom,
        y1t: end.top,
        wmin,
        wmax,
        cross: CrossPoints::new(x0, x1, start, end, wmin, wmax),
    };
    let raw = match first {
        BandPosition::A => segment_a(&frame, last),
        BandPosition::B => segment_b(&frame, last),
        BandPosition::C => segment_c(&frame, last),
        BandPosition::D => segment_d(&frame, last),
        BandPosition::E => segment_e(&frame, last),
        BandPosition::F => segment_f(&frame, last),
    };
    if raw.iter().any(|p| p.x.is_nan() || p.y.is_nan()) {
        return Err(ChartError::UnresolvedCrossPoint { start: first, end: last });
    }
    let points = dedupe(raw, &Tolerance::default());
    if points.len() < 3 {
        return Ok(None);
    }
    Ok(Some(points))
}

// ─── Extrusion ───────────────────────────────────────────────────────────────

/// Extrude a profile along z into a solid of thickness `width` centred on
/// `z`.
///
/// The front face (nearest negative z) and the rear face are the profile
/// itself. Each profile edge becomes a side face; clip edges are tagged
/// [`CLIP_TAG`], and the opening and closing ends are only closed when
/// `open` or `close` is set.
pub fn extrude(
    points: &[ProfilePoint],
    z: f64,
    width: f64,
    color: Color,
    open: bool,
    close: bool,
) -> Result<Object3D, ChartError> {
    let mut solid = Object3D::new(color);
    let n = points.len();
    let (front, rear) = (z - width / 2.0, z + width / 2.0);
    for p in points {
        solid.add_vertex_xyz(p.x, p.y, front);
    }
    for p in points {
        solid.add_vertex_xyz(p.x, p.y, rear);
    }
    let front_face: Vec<usize> = (0..n).rev().collect();
    let rear_face: Vec<usize> = (n..2 * n).collect();
    solid.add_standard_face(&front_face)?;
    solid.add_standard_face(&rear_face)?;
    for (i, p) in points.iter().enumerate() {
        let j = (i + 1) % n;
        let side = [i, j, n + j, n + i];
        match p.edge {
            Bottom | Top => solid.add_standard_face(&side)?,
            ClipBottom | ClipTop => solid.add_tagged_face(&side, CLIP_TAG)?,
            Opening if open => solid.add_standard_face(&side)?,
            Closing if close => solid.add_standard_face(&side)?,
            Opening | Closing => {}
        }
    }
    Ok(solid)
}

/// The clipped solid for one thick segment, `None` when it is wholly
/// outside the window.
#[allow(clippy::too_many_arguments)]
#[instrument(skip(color))]
pub fn clipped_segment(
    x0: f64,
    x1: f64,
    start: Band,
    end: Band,
    z: f64,
    width: f64,
    window: (f64, f64),
    color: Color,
    open: bool,
    close: bool,
) -> Result<Option<Object3D>, ChartError> {
    let (wmin, wmax) = window;
    let Some(points) = profile(x0, x1, start, end, wmin, wmax)? else {
        debug!("segment outside value window");
        return Ok(None);
    };
    extrude(&points, z, width, color, open, close).map(Some)
}

/// A flat double-sided strip for a line with no height, cut to the window.
pub fn ribbon(
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    z: f64,
    width: f64,
    window: (f64, f64),
    color: Color,
) -> Result<Option<Object3D>, ChartError> {
    let (wmin, wmax) = window;
    check_band(Band::new(y0, y0), Band::new(y1, y1), wmin, wmax)?;
    let (lo, hi) = (y0.min(y1), y0.max(y1));
    if hi < wmin || lo > wmax {
        return Ok(None);
    }
    let clamp = |x: f64, y: f64, toward_x: f64, toward_y: f64| {
        let w = y.clamp(wmin, wmax);
        if w == y {
            (x, y)
        } else {
            (cross(x, toward_x, y, toward_y, w), w)
        }
    };
    let (ax, ay) = clamp(x0, y0, x1, y1);
    let (bx, by) = clamp(x1, y1, x0, y0);
    let (front, rear) = (z - width / 2.0, z + width / 2.0);
    let mut strip = Object3D::new(color);
    strip.add_vertex_xyz(ax, ay, front);
    strip.add_vertex_xyz(bx, by, front);
    strip.add_vertex_xyz(bx, by, rear);
    strip.add_vertex_xyz(ax, ay, rear);
    strip.add_double_sided_face(&[0, 1, 2, 3])?;
    Ok(Some(strip))
}

// ─── Per-case builders ───────────────────────────────────────────────────────

fn segment_a(f: &Frame, end: BandPosition) -> Vec<ProfilePoint> {
    let c = &f.cross;
    match end {
        BandPosition::A => Vec::new(),
        BandPosition::B => vec![
            f.pt(c.xc, f.wmax, Bottom),
            f.pt(f.x1, f.y1b, Closing),
            f.pt(f.x1, f.wmax, ClipTop),
        ],
        BandPosition::C => vec![
            f.pt(c.xc, f.wmax, Bottom),
            f.pt(c.xa, f.wmin, ClipBottom),
            f.pt(f.x1, f.wmin, Closing),
            f.pt(f.x1, f.wmax, ClipTop),
        ],
        BandPosition::D => vec![
            f.pt(c.xc, f.wmax, Bottom),
            f.pt(f.x1, f.y1b, Closing),
            f.pt(f.x1, f.y1t, Top),
            f.pt(c.xd, f.wmax, ClipTop),
        ],
        BandPosition::E => vec![
            f.pt(c.xc, f.wmax, Bottom),
            f.pt(c.xa, f.wmin, ClipBottom),
            f.pt(f.x1, f.wmin, Closing),
            f.pt(f.x1, f.y1t, Top),
            f.pt(c.xd, f.wmax, ClipTop),
        ],
        BandPosition::F => vec![
            f.pt(c.xc, f.wmax, Bottom),
            f.pt(c.xa, f.wmin, ClipBottom),
            f.pt(c.xb, f.wmin, Top),
            f.pt(c.xd, f.wmax, ClipTop),
        ],
    }
}

fn segment_b(f: &Frame, end: BandPosition) -> Vec<ProfilePoint> {
    let c = &f.cross;
    match end {
        BandPosition::A => vec![
            f.pt(f.x0, f.y0b, Bottom),
            f.pt(c.xc, f.wmax, ClipTop),
            f.pt(f.x0, f.wmax, Opening),
        ],
        BandPosition::B => vec![
            f.pt(f.x0, f.y0b, Bottom),
            f.pt(f.x1, f.y1b, Closing),
            f.pt(f.x1, f.wmax, ClipTop),
            f.pt(f.x0, f.wmax, Opening),
        ],
        BandPosition::C => vec![
            f.pt(f.x0, f.y0b, Bottom),
            f.pt(c.xa, f.wmin, ClipBottom),
            f.pt(f.x1, f.wmin, Closing),
            f.pt(f.x1, f.wmax, ClipTop),
            f.pt(f.x0, f.wmax, Opening),
        ],
        BandPosition::D => vec![
            f.pt(f.x0, f.y0b, Bottom),
            f.pt(f.x1, f.y1b, Closing),
            f.pt(f.x1, f.y1t, Top),
            f.pt(c.xd, f.wmax, ClipTop),
            f.pt(f.x0, f.wmax, Opening),
        ],
        BandPosition::E => vec![
            f.pt(f.x0, f.y0b, Bottom),
            f.pt(c.xa, f.wmin, ClipBottom),
            f.pt(f.x1, f.wmin, Closing),
            f.pt(f.x1, f.y1t, Top),
            f.pt(c.xd, f.wmax, ClipTop),
            f.pt(f.x0, f.wmax, Opening),
        ],
        BandPosition::F => vec![
            f.pt(f.x0, f.y0b, Bottom),
            f.pt(c.xa, f.wmin, ClipBottom),
            f.pt(c.xb, f.wmin, Top),
            f.pt(c.xd, f.wmax, ClipTop),
            f.pt(f.x0, f.wmax, Opening),
        ],
    }
}

fn segment_c(f: &Frame, end: BandPosition) -> Vec<ProfilePoint> {
    let c = &f.cross;
    match end {
        BandPosition::A => vec![
            f.pt(f.x0, f.wmin, ClipBottom),
            f.pt(c.xa, f.wmin, Bottom),
            f.pt(c.xc, f.wmax, ClipTop),
            f.pt(f.x0, f.wmax, Opening),
        ],
        BandPosition::B => vec![
            f.pt(f.x0, f.wmin, ClipBottom),
            f.pt(c.xa, f.wmin, Bottom),
            f.pt(f.x1, f.y1b, Closing),
            f.pt(f.x1, f.wmax, ClipTop),
            f.pt(f.x0, f.wmax, Opening),
        ],
        BandPosition::C => vec![
            f.pt(f.x0, f.wmin, ClipBottom),
            f.pt(f.x1, f.wmin, Closing),
            f.pt(f.x1, f.wmax, ClipTop),
            f.pt(f.x0, f.wmax, Opening),
        ],
        BandPosition::D => vec![
            f.pt(f.x0, f.wmin, ClipBottom),
            f.pt(c.xa, f.wmin, Bottom),
            f.pt(f.x1, f.y1b, Closing),
            f.pt(f.x1, f.y1t, Top),
            f.pt(c.xd, f.wmax, ClipTop),
            f.pt(f.x0, f.wmax, Opening),
        ],
        BandPosition::E => vec![
            f.pt(f.x0, f.wmin, ClipBottom),
            f.pt(f.x1, f.wmin, Closing),
            f.pt(f.x1, f.y1t, Top),
            f.pt(c.xd, f.wmax, ClipTop),
            f.pt(f.x0, f.wmax, Opening),
        ],
        BandPosition::F => vec![
            f.pt(f.x0, f.wmin, ClipBottom),
            f.pt(c.xb, f.wmin, Top),
            f.pt(c.xd, f.wmax, ClipTop),
            f.pt(f.x0, f.wmax, Opening),
        ],
    }
}

fn segment_d(f: &Frame, end: BandPosition) -> Vec<ProfilePoint> {
    let c = &f.cross;
    match end {
        BandPosition::A => vec![
            f.pt(f.x0, f.y0b, Bottom),
            f.pt(c.xc, f.wmax, ClipTop),
            f.pt(c.xd, f.wmax, Top),
            f.pt(f.x0, f.y0t, Opening),
        ],
        BandPosition::B => vec![
            f.pt(f.x0, f.y0b, Bottom),
            f.pt(f.x1, f.y1b, Closing),
            f.pt(f.x1, f.wmax, ClipTop),
            f.pt(c.xd, f.wmax, Top),
            f.pt(f.x0, f.y0t, Opening),
        ],
        BandPosition::C => vec![
            f.pt(f.x0, f.y0b, Bottom),
            f.pt(c.xa, f.wmin, ClipBottom),
            f.pt(f.x1, f.wmin, Closing),
            f.pt(f.x1, f.wmax, ClipTop),
            f.pt(c.xd, f.wmax, Top),
            f.pt(f.x0, f.y0t, Opening),
        ],
        BandPosition::D => vec![
            f.pt(f.x0, f.y0b, Bottom),
            f.pt(f.x1, f.y1b, Closing),
            f.pt(f.x1, f.y1t, Top),
            f.pt(f.x0, f.y0t, Opening),
        ],
        BandPosition::E => vec![
            f.pt(f.x0, f.y0b, Bottom),
            f.pt(c.xa, f.wmin, ClipBottom),
            f.pt(f.x1, f.wmin, Closing),
            f.pt(f.x1, f.y1t, Top),
            f.pt(f.x0, f.y0t, Opening),
        ],
        BandPosition::F => vec![
            f.pt(f.x0, f.y0b, Bottom),
            f.pt(c.xa, f.wmin, ClipBottom),
            f.pt(c.xb, f.wmin, Top),
            f.pt(f.x0, f.y0t, Opening),
        ],
    }
}

fn segment_e(f: &Frame, end: BandPosition) -> Vec<ProfilePoint> {
    let c = &f.cross;
    match end {
        BandPosition::A => vec![
            f.pt(f.x0, f.wmin, ClipBottom),
            f.pt(c.xa, f.wmin, Bottom),
            f.pt(c.xc, f.wmax, ClipTop),
            f.pt(c.xd, f.wmax, Top),
            f.pt(f.x0, f.y0t, Opening),
        ],
        BandPosition::B => vec![
            f.pt(f.x0, f.wmin, ClipBottom),
            f.pt(c.xa, f.wmin, Bottom),
            f.pt(f.x1, f.y1b, Closing),
            f.pt(f.x1, f.wmax, ClipTop),
            f.pt(c.xd, f.wmax, Top),
            f.pt(f.x0, f.y0t, Opening),
        ],
        BandPosition::C => vec![
            f.pt(f.x0, f.wmin, ClipBottom),
            f.pt(f.x1, f.wmin, Closing),
            f.pt(f.x1, f.wmax, ClipTop),
            f.pt(c.xd, f.wmax, Top),
            f.pt(f.x0, f.y0t, Opening),
        ],
        BandPosition::D => vec![
            f.pt(f.x0, f.wmin, ClipBottom),
            f.pt(c.xa, f.wmin, Bottom),
            f.pt(f.x1, f.y1b, Closing),
            f.pt(f.x1, f.y1t, Top),
            f.pt(f.x0, f.y0t, Opening),
        ],
        BandPosition::E => vec![
            f.pt(f.x0, f.wmin, ClipBottom),
            f.pt(f.x1, f.wmin, Closing),
            f.pt(f.x1, f.y1t, Top),
            f.pt(f.x0, f.y0t, Opening),
        ],
        BandPosition::F => vec![
            f.pt(f.x0, f.wmin, ClipBottom),
            f.pt(c.xb, f.wmin, Top),
            f.pt(f.x0, f.y0t, Opening),
        ],
    }
}

fn segment_f(f: &Frame, end: BandPosition) -> Vec<ProfilePoint> {
    let c = &f.cross;
    match end {
        BandPosition::A => vec![
            f.pt(c.xb, f.wmin, ClipBottom),
            f.pt(c.xa, f.wmin, Bottom),
            f.pt(c.xc, f.wmax, ClipTop),
            f.pt(c.xd, f.wmax, Top),
        ],
        BandPosition::B => vec![
            f.pt(c.xb, f.wmin, ClipBottom),
            f.pt(c.xa, f.wmin, Bottom),
            f.pt(f.x1, f.y1b, Closing),
            f.pt(f.x1, f.wmax, ClipTop),
            f.pt(c.xd, f.wmax, Top),
        ],
        BandPosition::C => vec![
            f.pt(c.xb, f.wmin, ClipBottom),
            f.pt(f.x1, f.wmin, Closing),
            f.pt(f.x1, f.wmax, ClipTop),
            f.pt(c.xd, f.wmax, Top),
        ],
        BandPosition::D => vec![
            f.pt(c.xb, f.wmin, ClipBottom),
            f.pt(c.xa, f.wmin, Bottom),
            f.pt(f.x1, f.y1b, Closing),
            f.pt(f.x1, f.y1t, Top),
        ],
        BandPosition::E => vec![
            f.pt(c.xb, f.wmin, ClipBottom),
            f.pt(f.x1, f.wmin, Closing),
            f.pt(f.x1, f.y1t, Top),
        ],
        BandPosition::F => Vec::new(),
    }
}
