//! Viewport clipping in log–log space.
//!
//! Both axes are logarithmic, so straight segments on screen are straight in
//! `(log10 x, log10 y)`. Clipping happens there and results are mapped back to
//! data values. Points with a non-positive or non-finite coordinate cannot be
//! placed on a log axis: they split polylines and are dropped from polygons.

/// Axis-aligned clip window in log10 units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogRect {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl LogRect {
    /// Window for data-space limits. `None` when a limit is not log-representable.
    pub fn from_limits(xlim: (f64, f64), ylim: (f64, f64)) -> Option<Self> {
        let rect = Self {
            x0: to_log(xlim.0)?,
            x1: to_log(xlim.1)?,
            y0: to_log(ylim.0)?,
            y1: to_log(ylim.1)?,
        };
        (rect.x0 < rect.x1 && rect.y0 < rect.y1).then_some(rect)
    }

    fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

fn to_log(v: f64) -> Option<f64> {
    (v.is_finite() && v > 0.0).then(|| v.log10())
}

fn log_point((x, y): (f64, f64)) -> Option<(f64, f64)> {
    Some((to_log(x)?, to_log(y)?))
}

fn data_point((x, y): (f64, f64)) -> (f64, f64) {
    (10f64.powf(x), 10f64.powf(y))
}

/// Whether a data-space point lies inside the window.
pub fn visible(rect: &LogRect, p: (f64, f64)) -> bool {
    log_point(p).is_some_and(|q| rect.contains(q))
}

/// Liang–Barsky: the part of segment `a → b` inside `rect`, if any.
fn clip_segment(rect: &LogRect, a: (f64, f64), b: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-dx, a.0 - rect.x0),
        (dx, rect.x1 - a.0),
        (-dy, a.1 - rect.y0),
        (dy, rect.y1 - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some(((a.0 + t0 * dx, a.1 + t0 * dy), (a.0 + t1 * dx, a.1 + t1 * dy)))
}

/// Clip a polyline to `rect`, returning the visible runs in data space.
///
/// Every returned run has at least two points.
pub fn clip_polyline(rect: &LogRect, points: impl IntoIterator<Item = (f64, f64)>) -> Vec<Vec<(f64, f64)>> {
    let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let mut prev: Option<(f64, f64)> = None;

    let mut flush = |current: &mut Vec<(f64, f64)>| {
        if current.len() >= 2 {
            runs.push(current.iter().copied().map(data_point).collect());
        }
        current.clear();
    };

    for p in points {
        let Some(q) = log_point(p) else {
            flush(&mut current);
            prev = None;
            continue;
        };
        if let Some(a) = prev {
            match clip_segment(rect, a, q) {
                Some((s, e)) => {
                    if current.last() != Some(&s) {
                        flush(&mut current);
                        current.push(s);
                    }
                    current.push(e);
                    // The run breaks where the segment leaves the window.
                    if e != q {
                        flush(&mut current);
                    }
                }
                None => flush(&mut current),
            }
        }
        prev = Some(q);
    }
    flush(&mut current);
    runs
}

#[derive(Clone, Copy)]
enum Edge {
    Left(f64),
    Right(f64),
    Bottom(f64),
    Top(f64),
}

impl Edge {
    fn inside(self, (x, y): (f64, f64)) -> bool {
        match self {
            Edge::Left(v) => x >= v,
            Edge::Right(v) => x <= v,
            Edge::Bottom(v) => y >= v,
            Edge::Top(v) => y <= v,
        }
    }

    fn intersect(self, a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
        match self {
            Edge::Left(v) | Edge::Right(v) => {
                let t = (v - a.0) / (b.0 - a.0);
                (v, a.1 + t * (b.1 - a.1))
            }
            Edge::Bottom(v) | Edge::Top(v) => {
                let t = (v - a.1) / (b.1 - a.1);
                (a.0 + t * (b.0 - a.0), v)
            }
        }
    }
}

/// Sutherland–Hodgman: clip a closed polygon to `rect`, in data space.
///
/// Returns an empty vector when nothing of the polygon is visible.
pub fn clip_polygon(rect: &LogRect, points: impl IntoIterator<Item = (f64, f64)>) -> Vec<(f64, f64)> {
    let mut poly: Vec<(f64, f64)> = points.into_iter().filter_map(log_point).collect();

    for edge in [
        Edge::Left(rect.x0),
        Edge::Right(rect.x1),
        Edge::Bottom(rect.y0),
        Edge::Top(rect.y1),
    ] {
        if poly.len() < 3 {
            return Vec::new();
        }
        let input = std::mem::take(&mut poly);
        let mut prev = input[input.len() - 1];
        for &cur in &input {
            match (edge.inside(prev), edge.inside(cur)) {
                (true, true) => poly.push(cur),
                (true, false) => poly.push(edge.intersect(prev, cur)),
                (false, true) => {
                    poly.push(edge.intersect(prev, cur));
                    poly.push(cur);
                }
                (false, false) => {}
            }
            prev = cur;
        }
    }

    if poly.len() < 3 {
        return Vec::new();
    }
    poly.into_iter().map(data_point).collect()
}
