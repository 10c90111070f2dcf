//! Integer shape rasterization on top of [`PixelSurface`].
//!
//! Every routine here is total: degenerate input (zero radius, empty
//! rectangles, flat triangles) produces minimal or empty output, and
//! off-canvas pixels are left for the surface to drop. Internal arithmetic
//! is done in `i64` so no input can overflow, and walks skip the steps that
//! cannot land within [`REACH`].

use std::mem::swap;

use bitflags::bitflags;

use crate::traits::PixelSurface;

/// Largest coordinate a surface can address. Output outside
/// `-REACH - 1..=REACH` on either axis never reaches the surface.
pub const REACH: i32 = i16::MAX as i32;

const REACH_MIN: i64 = i16::MIN as i64;
const REACH_MAX: i64 = i16::MAX as i64;

bitflags! {
    /// Quadrants emitted by [`circle_helper`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Corners: u8 {
        const TOP_LEFT = 0x1;
        const TOP_RIGHT = 0x2;
        const BOTTOM_RIGHT = 0x4;
        const BOTTOM_LEFT = 0x8;
    }
}

bitflags! {
    /// Halves filled by [`fill_circle_helper`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Halves: u8 {
        const RIGHT = 0x1;
        const LEFT = 0x2;
    }
}

/// Midpoint circle decision state shared by the circle routines.
///
/// Starts at (0, r) and walks the first octant until x reaches y.
struct MidpointCircle {
    r: i64,
    f: i64,
    ddf_x: i64,
    ddf_y: i64,
    x: i64,
    y: i64,
}

impl MidpointCircle {
    fn new(r: i64) -> Self {
        Self {
            r,
            f: 1 - r,
            ddf_x: 1,
            ddf_y: -2 * r,
            x: 0,
            y: r,
        }
    }

    /// Closed form of `y` at step `x`: the least `y` with
    /// `x^2 + y(y + 1) >= r^2`. Exact while it is at least `x + 2`.
    fn settled_y(&self, x: i64) -> i64 {
        let t = i128::from(self.r).pow(2) - i128::from(x).pow(2);
        let mut y = (ceil_sqrt(4 * t + 1) - 1) / 2;
        while y * (y + 1) < t {
            y += 1;
        }
        while y > 0 && (y - 1) * y >= t {
            y -= 1;
        }
        y as i64
    }

    fn settled(&self, x: i64) -> bool {
        self.settled_y(x) >= x + 2
    }

    /// Jump ahead so the next step yields `x`, or the last step before it
    /// that the closed form still reaches.
    fn skip_to(&mut self, x: i64) {
        let mut target = x - 1;
        if target <= self.x {
            return;
        }
        if !self.settled(target) {
            let mut low = self.x;
            while low < target {
                let mid = low + (target - low + 1) / 2;
                if self.settled(mid) {
                    low = mid;
                } else {
                    target = mid - 1;
                }
            }
            if target <= self.x {
                return;
            }
        }

        let y = self.settled_y(target);
        let f = i128::from(target + 1).pow(2) + i128::from(y) * i128::from(y - 1) - i128::from(self.r).pow(2);
        self.x = target;
        self.y = y;
        self.ddf_x = 2 * target + 1;
        self.ddf_y = -2 * y;
        self.f = f as i64;
    }

    /// Steps whose `y` may fall in `low..=high`. Near the diagonal the walk
    /// sits up to one row above the closed form.
    fn steps_with_y(&self, low: i64, high: i64) -> Option<(i64, i64)> {
        let (low, high) = (low.max(0), high.min(self.r));
        if low > high {
            return None;
        }
        let r2 = i128::from(self.r).pow(2);
        let first = ceil_sqrt(r2 - i128::from(high) * i128::from(high + 1));
        let below = i128::from(low - 1);
        let last = ceil_sqrt(r2 - (below - 1) * below) - 1;
        (first <= last).then_some((first as i64, last as i64))
    }
}

impl Iterator for MidpointCircle {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<(i64, i64)> {
        if self.x >= self.y {
            return None;
        }
        if self.f >= 0 {
            self.y -= 1;
            self.ddf_y += 2;
            self.f += self.ddf_y;
        }
        self.x += 1;
        self.ddf_x += 2;
        self.f += self.ddf_x;
        Some((self.x, self.y))
    }
}

/// Steps of `walk` whose `x` lies in one of the inclusive `windows`. Steps
/// outside every window are jumped over.
fn walk_within(mut walk: MidpointCircle, windows: &[(i64, i64)]) -> impl Iterator<Item = (i64, i64)> + '_ {
    std::iter::from_fn(move || {
        let next = windows
            .iter()
            .filter(|&&(low, high)| low <= high && high > walk.x)
            .map(|&(low, _)| low.max(walk.x + 1))
            .min()?;
        walk.skip_to(next);
        walk.next()
    })
}

fn ceil_sqrt(t: i128) -> i128 {
    if t <= 0 {
        return 0;
    }
    let mut s = (t as f64).sqrt() as i128;
    while s * s < t {
        s += 1;
    }
    while (s - 1) * (s - 1) >= t {
        s -= 1;
    }
    s
}

fn in_reach(v: i64) -> bool {
    (REACH_MIN..=REACH_MAX).contains(&v)
}

/// Offsets `d` for which `c + d` or `c - d` is in reach.
fn reach_offsets(c: i64) -> [(i64, i64); 2] {
    [(REACH_MIN - c, REACH_MAX - c), (c - REACH_MAX, c - REACH_MIN)]
}

/// Inclusive bounds of `start..start + len` clipped to reach; empty when
/// `first > last`.
fn trim(start: i64, len: i64) -> (i64, i64) {
    (start.max(REACH_MIN), (start + len - 1).min(REACH_MAX))
}

pub(crate) fn plot<S: PixelSurface + ?Sized>(surface: &mut S, x: i64, y: i64, color: u16) {
    if in_reach(x) && in_reach(y) {
        surface.set_pixel(x as i32, y as i32, color);
    }
}

fn vspan<S: PixelSurface + ?Sized>(surface: &mut S, x: i64, y: i64, len: i64, color: u16) {
    let (top, bottom) = trim(y, len);
    if in_reach(x) && top <= bottom {
        surface.fast_vline(x as i32, top as i32, (bottom - top + 1) as i32, color);
    }
}

fn hspan<S: PixelSurface + ?Sized>(surface: &mut S, x: i64, y: i64, len: i64, color: u16) {
    let (left, right) = trim(x, len);
    if in_reach(y) && left <= right {
        surface.fast_hline(left as i32, y as i32, (right - left + 1) as i32, color);
    }
}

/// Rectangle handed to the surface's `fill_rect`, clipped to reach.
pub(crate) fn area<S: PixelSurface + ?Sized>(
    surface: &mut S,
    x: i64,
    y: i64,
    w: i64,
    h: i64,
    color: u16,
) {
    let (left, right) = trim(x, w);
    let (top, bottom) = trim(y, h);
    if left <= right && top <= bottom {
        surface.fill_rect(
            left as i32,
            top as i32,
            (right - left + 1) as i32,
            (bottom - top + 1) as i32,
            color,
        );
    }
}

/// Bresenham line between two endpoints, inclusive.
pub fn line<S: PixelSurface + ?Sized>(surface: &mut S, x0: i32, y0: i32, x1: i32, y1: i32, color: u16) {
    let [mut x0, mut y0, mut x1, mut y1] = [x0, y0, x1, y1].map(i64::from);

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        swap(&mut x0, &mut y0);
        swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        swap(&mut x0, &mut x1);
        swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let ystep = if y0 < y1 { 1 } else { -1 };

    let start = x0.max(REACH_MIN);
    let end = x1.min(REACH_MAX);
    if start > end {
        return;
    }

    // The error term stays in 0..dx, so after k steps it is the Euclidean
    // remainder of dx/2 - k*dy and y has moved by the matching quotient.
    let skipped = start - x0;
    let (mut err, mut y) = if skipped == 0 {
        (dx / 2, y0)
    } else {
        let e = i128::from(dx / 2) - i128::from(skipped) * i128::from(dy);
        let d = i128::from(dx);
        (e.rem_euclid(d) as i64, y0 - ystep * e.div_euclid(d) as i64)
    };

    for x in start..=end {
        if steep {
            plot(surface, y, x, color);
        } else {
            plot(surface, x, y, color);
        }
        err -= dy;
        if err < 0 {
            y += ystep;
            err += dx;
        }
    }
}

/// Rectangle outline from four straight edges.
pub fn rect<S: PixelSurface + ?Sized>(surface: &mut S, x: i32, y: i32, w: i32, h: i32, color: u16) {
    let [x, y, w, h] = [x, y, w, h].map(i64::from);
    hspan(surface, x, y, w, color);
    hspan(surface, x, y + h - 1, w, color);
    vspan(surface, x, y, h, color);
    vspan(surface, x + w - 1, y, h, color);
}

/// Filled rectangle as `w` adjacent vertical spans.
pub fn fill_rect<S: PixelSurface + ?Sized>(surface: &mut S, x: i32, y: i32, w: i32, h: i32, color: u16) {
    let [x, y, w, h] = [x, y, w, h].map(i64::from);
    let (left, right) = trim(x, w);
    for i in left..=right {
        vspan(surface, i, y, h, color);
    }
}

/// Circle outline centred on (x0, y0).
pub fn circle<S: PixelSurface + ?Sized>(surface: &mut S, x0: i32, y0: i32, r: i32, color: u16) {
    let [x0, y0, r] = [x0, y0, r].map(i64::from);
    plot(surface, x0, y0 + r, color);
    plot(surface, x0, y0 - r, color);
    plot(surface, x0 + r, y0, color);
    plot(surface, x0 - r, y0, color);
    arcs(surface, x0, y0, r, Corners::all(), color);
}

/// Quarter-circle arcs for the selected corners. The four axis points are
/// not drawn; rounded rectangles cover them with their straight edges.
pub fn circle_helper<S: PixelSurface + ?Sized>(
    surface: &mut S,
    x0: i32,
    y0: i32,
    r: i32,
    corners: Corners,
    color: u16,
) {
    arcs(surface, i64::from(x0), i64::from(y0), i64::from(r), corners, color);
}

fn arcs<S: PixelSurface + ?Sized>(
    surface: &mut S,
    x0: i64,
    y0: i64,
    r: i64,
    corners: Corners,
    color: u16,
) {
    // Every point has one coordinate at x0 +- x or y0 +- x.
    let [a, b] = reach_offsets(x0);
    let [c, d] = reach_offsets(y0);

    for (x, y) in walk_within(MidpointCircle::new(r), &[a, b, c, d]) {
        if corners.contains(Corners::BOTTOM_RIGHT) {
            plot(surface, x0 + x, y0 + y, color);
            plot(surface, x0 + y, y0 + x, color);
        }
        if corners.contains(Corners::TOP_RIGHT) {
            plot(surface, x0 + x, y0 - y, color);
            plot(surface, x0 + y, y0 - x, color);
        }
        if corners.contains(Corners::BOTTOM_LEFT) {
            plot(surface, x0 - y, y0 + x, color);
            plot(surface, x0 - x, y0 + y, color);
        }
        if corners.contains(Corners::TOP_LEFT) {
            plot(surface, x0 - y, y0 - x, color);
            plot(surface, x0 - x, y0 - y, color);
        }
    }
}

/// Filled disk: a centre column plus both halves.
pub fn fill_circle<S: PixelSurface + ?Sized>(surface: &mut S, x0: i32, y0: i32, r: i32, color: u16) {
    let [x0, y0, r] = [x0, y0, r].map(i64::from);
    vspan(surface, x0, y0 - r, 2 * r + 1, color);
    half_disk(surface, x0, y0, r, Halves::all(), 0, color);
}

/// Vertical spans for one or both halves of a disk, excluding the centre
/// column. `delta` stretches every span downwards so two calls can form the
/// sides of a filled rounded rectangle.
pub fn fill_circle_helper<S: PixelSurface + ?Sized>(
    surface: &mut S,
    x0: i32,
    y0: i32,
    r: i32,
    halves: Halves,
    delta: i32,
    color: u16,
) {
    let [x0, y0, r, delta] = [x0, y0, r, delta].map(i64::from);
    half_disk(surface, x0, y0, r, halves, delta, color);
}

fn half_disk<S: PixelSurface + ?Sized>(
    surface: &mut S,
    x0: i64,
    y0: i64,
    r: i64,
    halves: Halves,
    delta: i64,
    color: u16,
) {
    let walk = MidpointCircle::new(r);

    // Columns x0 +- x, then columns x0 +- y whose rows y0 - x..=y0 + x + delta
    // must also come within reach.
    let rows_from = (y0 - REACH_MAX).max(REACH_MIN - y0 - delta);
    let mut windows = reach_offsets(x0).to_vec();
    windows.extend(
        reach_offsets(x0)
            .into_iter()
            .filter_map(|(low, high)| walk.steps_with_y(low, high))
            .map(|(first, last)| (first.max(rows_from), last)),
    );

    for (x, y) in walk_within(walk, &windows) {
        if halves.contains(Halves::RIGHT) {
            vspan(surface, x0 + x, y0 - y, 2 * y + 1 + delta, color);
            vspan(surface, x0 + y, y0 - x, 2 * x + 1 + delta, color);
        }
        if halves.contains(Halves::LEFT) {
            vspan(surface, x0 - x, y0 - y, 2 * y + 1 + delta, color);
            vspan(surface, x0 - y, y0 - x, 2 * x + 1 + delta, color);
        }
    }
}

/// Rounded rectangle outline with corner radius `r`.
pub fn round_rect<S: PixelSurface + ?Sized>(
    surface: &mut S,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    r: i32,
    color: u16,
) {
    let [x, y, w, h, r] = [x, y, w, h, r].map(i64::from);
    hspan(surface, x + r, y, w - 2 * r, color);
    hspan(surface, x + r, y + h - 1, w - 2 * r, color);
    vspan(surface, x, y + r, h - 2 * r, color);
    vspan(surface, x + w - 1, y + r, h - 2 * r, color);

    arcs(surface, x + r, y + r, r, Corners::TOP_LEFT, color);
    arcs(surface, x + w - r - 1, y + r, r, Corners::TOP_RIGHT, color);
    arcs(surface, x + w - r - 1, y + h - r - 1, r, Corners::BOTTOM_RIGHT, color);
    arcs(surface, x + r, y + h - r - 1, r, Corners::BOTTOM_LEFT, color);
}

/// Filled rounded rectangle: central body plus two stretched half-disks.
pub fn fill_round_rect<S: PixelSurface + ?Sized>(
    surface: &mut S,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    r: i32,
    color: u16,
) {
    let [x, y, w, h, r] = [x, y, w, h, r].map(i64::from);
    area(surface, x + r, y, w - 2 * r, h, color);

    let delta = h - 2 * r - 1;
    half_disk(surface, x + w - r - 1, y + r, r, Halves::RIGHT, delta, color);
    half_disk(surface, x + r, y + r, r, Halves::LEFT, delta, color);
}

/// Triangle outline.
#[allow(clippy::too_many_arguments)]
pub fn triangle<S: PixelSurface + ?Sized>(
    surface: &mut S,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    color: u16,
) {
    line(surface, x0, y0, x1, y1, color);
    line(surface, x1, y1, x2, y2, color);
    line(surface, x2, y2, x0, y0, color);
}

/// Scanline-filled triangle.
#[allow(clippy::too_many_arguments)]
pub fn fill_triangle<S: PixelSurface + ?Sized>(
    surface: &mut S,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    color: u16,
) {
    let [mut x0, mut y0, mut x1, mut y1, mut x2, mut y2] = [x0, y0, x1, y1, x2, y2].map(i64::from);

    // y0 <= y1 <= y2
    if y0 > y1 {
        swap(&mut y0, &mut y1);
        swap(&mut x0, &mut x1);
    }
    if y1 > y2 {
        swap(&mut y2, &mut y1);
        swap(&mut x2, &mut x1);
    }
    if y0 > y1 {
        swap(&mut y0, &mut y1);
        swap(&mut x0, &mut x1);
    }

    if y0 == y2 {
        let a = x0.min(x1).min(x2);
        let b = x0.max(x1).max(x2);
        hspan(surface, a, y0, b - a + 1, color);
        return;
    }

    // Upper part walks edges 0-1 and 0-2. Scanline y1 belongs here only for a
    // flat-bottomed triangle; otherwise the lower part owns it. Either way the
    // range that would divide by zero is empty.
    let last = if y1 == y2 { y1 } else { y1 - 1 };

    for y in y0.max(REACH_MIN)..=last.min(REACH_MAX) {
        let a = x0 + edge(x1 - x0, y - y0, y1 - y0);
        let b = x0 + edge(x2 - x0, y - y0, y2 - y0);
        span(surface, a, b, y, color);
    }

    // Lower part walks edges 1-2 and 0-2.
    for y in (last + 1).max(REACH_MIN)..=y2.min(REACH_MAX) {
        let a = x1 + edge(x2 - x1, y - y1, y2 - y1);
        let b = x0 + edge(x2 - x0, y - y0, y2 - y0);
        span(surface, a, b, y, color);
    }
}

/// Horizontal offset of an edge spanning `dx` over `dy` rows, `step` rows
/// below its start. Truncates toward zero. `step <= dy`, so it fits `dx`.
fn edge(dx: i64, step: i64, dy: i64) -> i64 {
    (i128::from(dx) * i128::from(step) / i128::from(dy)) as i64
}

fn span<S: PixelSurface + ?Sized>(surface: &mut S, mut a: i64, mut b: i64, y: i64, color: u16) {
    if a > b {
        swap(&mut a, &mut b);
    }
    hspan(surface, a, y, b - a + 1, color);
}

/// Bit order inside each byte of a packed 1-bpp bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    /// Bit 7 is the leftmost pixel (plain bitmaps).
    MsbFirst,
    /// Bit 0 is the leftmost pixel (XBM exports).
    LsbFirst,
}

impl BitOrder {
    fn mask(self, column: i64) -> u8 {
        match self {
            BitOrder::MsbFirst => 0x80 >> (column & 7),
            BitOrder::LsbFirst => 1 << (column & 7),
        }
    }
}

/// Blit a packed 1-bpp bitmap. Rows are `ceil(w / 8)` bytes apart. Set bits
/// paint `color`; clear bits paint `background` when one is given. Bytes
/// missing from a short slice read as zero.
#[allow(clippy::too_many_arguments)]
pub fn bitmap<S: PixelSurface + ?Sized>(
    surface: &mut S,
    x: i32,
    y: i32,
    data: &[u8],
    w: i32,
    h: i32,
    order: BitOrder,
    color: u16,
    background: Option<u16>,
) {
    let [x, y, w, h] = [x, y, w, h].map(i64::from);
    if w <= 0 || h <= 0 {
        return;
    }
    let byte_width = (w + 7) / 8;

    // Without a background, rows past the end of `data` draw nothing.
    let rows = match background {
        Some(_) => h,
        None => {
            let len = i64::try_from(data.len()).unwrap_or(i64::MAX);
            h.min(len / byte_width + i64::from(len % byte_width != 0))
        }
    };

    for j in (REACH_MIN - y).max(0)..rows.min(REACH_MAX - y + 1) {
        for i in (REACH_MIN - x).max(0)..w.min(REACH_MAX - x + 1) {
            let byte = usize::try_from(j * byte_width + i / 8)
                .ok()
                .and_then(|index| data.get(index))
                .copied()
                .unwrap_or(0);
            if byte & order.mask(i) != 0 {
                plot(surface, x + i, y + j, color);
            } else if let Some(bg) = background {
                plot(surface, x + i, y + j, bg);
            }
        }
    }
}
