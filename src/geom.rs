// polytess: plane-sweep polygon tessellation
// Licensed under the MIT license.

//! Geometric predicates on projected sweep coordinates.
//!
//! Everything here works on the `(s, t)` plane produced by the projection
//! step. The evaluation routines are arranged for numerical stability
//! rather than speed: `edge_eval` is a convex combination keyed on the
//! horizontal gap ratio, so its magnitude is bounded by the endpoint
//! spread, and `interpolate` clamps its weights so the result always lands
//! between its two samples.

/// Coordinate scalar used throughout the tessellator.
pub type Real = f32;

/// Absolute tolerance for coordinate equality.
pub const TOLERANCE: Real = 1e-6;

#[inline]
pub fn is_near(a: Real, b: Real) -> bool {
    (b - a).abs() < TOLERANCE
}

/// Sweep ordering: lexicographic on (s, t) with tolerance on each axis.
#[inline]
pub fn vert_leq(us: Real, ut: Real, vs: Real, vt: Real) -> bool {
    us < vs || (is_near(us, vs) && (ut < vt || is_near(ut, vt)))
}

/// Coordinate equality within tolerance on both axes.
#[inline]
pub fn vert_eq(us: Real, ut: Real, vs: Real, vt: Real) -> bool {
    is_near(us, vs) && is_near(ut, vt)
}

/// `vert_leq` with s and t transposed (used by the intersection routine).
#[inline]
pub fn trans_leq(us: Real, ut: Real, vs: Real, vt: Real) -> bool {
    ut < vt || (ut == vt && us <= vs)
}

/// Given u <= v <= w in the sweep order, evaluates the t-coordinate of the
/// segment uw at v.s and returns `v.t - (uw)(v.s)`, the signed distance
/// from uw up to v. Returns zero when uw is vertical.
///
/// Computed as a convex combination on the smaller horizontal gap, which
/// keeps the result stable even when v is very close to u or w: negating
/// the result with `v.t = 0` yields a value r with
/// `min(u.t, w.t) <= r <= max(u.t, w.t)`.
pub fn edge_eval(us: Real, ut: Real, vs: Real, vt: Real, ws: Real, wt: Real) -> Real {
    let gap_l = vs - us;
    let gap_r = ws - vs;

    if gap_l + gap_r > 0.0 {
        if gap_l < gap_r {
            (vt - ut) + (ut - wt) * (gap_l / (gap_l + gap_r))
        } else {
            (vt - wt) + (wt - ut) * (gap_r / (gap_l + gap_r))
        }
    } else {
        0.0
    }
}

/// Same sign as `edge_eval(u, v, w)` but cheaper: the gaps multiply the
/// differences instead of dividing them. Positive means v lies above uw.
pub fn edge_sign(us: Real, ut: Real, vs: Real, vt: Real, ws: Real, wt: Real) -> Real {
    let gap_l = vs - us;
    let gap_r = ws - vs;

    if gap_l + gap_r > 0.0 {
        (vt - wt) * gap_l + (vt - ut) * gap_r
    } else {
        0.0
    }
}

/// `edge_eval` with s and t transposed.
pub fn trans_eval(us: Real, ut: Real, vs: Real, vt: Real, ws: Real, wt: Real) -> Real {
    let gap_l = vt - ut;
    let gap_r = wt - vt;

    if gap_l + gap_r > 0.0 {
        if gap_l < gap_r {
            (vs - us) + (us - ws) * (gap_l / (gap_l + gap_r))
        } else {
            (vs - ws) + (ws - us) * (gap_r / (gap_l + gap_r))
        }
    } else {
        0.0
    }
}

/// `edge_sign` with s and t transposed.
pub fn trans_sign(us: Real, ut: Real, vs: Real, vt: Real, ws: Real, wt: Real) -> Real {
    let gap_l = vt - ut;
    let gap_r = wt - vt;

    if gap_l + gap_r > 0.0 {
        (vs - ws) * gap_l + (vs - us) * gap_r
    } else {
        0.0
    }
}

/// True when (u, v, w) wind counter-clockwise (or are collinear).
///
/// Near-degenerate inputs give unreliable answers; callers are expected to
/// survive a wrong result, not to prevent it.
#[inline]
pub fn vert_ccw(us: Real, ut: Real, vs: Real, vt: Real, ws: Real, wt: Real) -> bool {
    us * (vt - wt) + vs * (wt - ut) + ws * (ut - vt) >= 0.0
}

/// L1 distance between two projected vertices.
#[inline]
pub fn vert_l1_dist(us: Real, ut: Real, vs: Real, vt: Real) -> Real {
    (us - vs).abs() + (ut - vt).abs()
}

/// Returns `(b*x + a*y) / (a + b)`, or the midpoint when both weights are
/// zero. Negative weights are clamped to zero. Guarantees
/// `min(x, y) <= result <= max(x, y)` even when a and b differ wildly in
/// magnitude.
pub fn interpolate(a: Real, x: Real, b: Real, y: Real) -> Real {
    let a = if a < 0.0 { 0.0 } else { a };
    let b = if b < 0.0 { 0.0 } else { b };

    if a <= b {
        if b == 0.0 {
            (x + y) / 2.0
        } else {
            x + (y - x) * (a / (a + b))
        }
    } else {
        y + (x - y) * (b / (a + b))
    }
}

/// Intersection point of segments (o1, d1) and (o2, d2).
///
/// Not the fastest formulation, but very stable: canonicalize the four
/// endpoints under the sweep ordering, find the two middle vertices, and
/// interpolate the s-value between them with `edge_eval`-derived weights.
/// Repeat under the transposed ordering for t. The result is guaranteed to
/// lie in the intersection of the two segments' bounding rectangles.
pub fn edge_intersect(
    o1: (Real, Real),
    d1: (Real, Real),
    o2: (Real, Real),
    d2: (Real, Real),
) -> (Real, Real) {
    let (mut o1, mut d1, mut o2, mut d2) = (o1, d1, o2, d2);

    let s = {
        if !vert_leq(o1.0, o1.1, d1.0, d1.1) {
            core::mem::swap(&mut o1, &mut d1);
        }
        if !vert_leq(o2.0, o2.1, d2.0, d2.1) {
            core::mem::swap(&mut o2, &mut d2);
        }
        if !vert_leq(o1.0, o1.1, o2.0, o2.1) {
            core::mem::swap(&mut o1, &mut o2);
            core::mem::swap(&mut d1, &mut d2);
        }

        if !vert_leq(o2.0, o2.1, d1.0, d1.1) {
            // Technically no intersection; split the difference.
            (o2.0 + d1.0) / 2.0
        } else if vert_leq(d1.0, d1.1, d2.0, d2.1) {
            let mut z1 = edge_eval(o1.0, o1.1, o2.0, o2.1, d1.0, d1.1);
            let mut z2 = edge_eval(o2.0, o2.1, d1.0, d1.1, d2.0, d2.1);
            if z1 + z2 < 0.0 {
                z1 = -z1;
                z2 = -z2;
            }
            interpolate(z1, o2.0, z2, d1.0)
        } else {
            let mut z1 = edge_sign(o1.0, o1.1, o2.0, o2.1, d1.0, d1.1);
            let mut z2 = -edge_sign(o1.0, o1.1, d2.0, d2.1, d1.0, d1.1);
            if z1 + z2 < 0.0 {
                z1 = -z1;
                z2 = -z2;
            }
            interpolate(z1, o2.0, z2, d2.0)
        }
    };

    let t = {
        if !trans_leq(o1.0, o1.1, d1.0, d1.1) {
            core::mem::swap(&mut o1, &mut d1);
        }
        if !trans_leq(o2.0, o2.1, d2.0, d2.1) {
            core::mem::swap(&mut o2, &mut d2);
        }
        if !trans_leq(o1.0, o1.1, o2.0, o2.1) {
            core::mem::swap(&mut o1, &mut o2);
            core::mem::swap(&mut d1, &mut d2);
        }

        if !trans_leq(o2.0, o2.1, d1.0, d1.1) {
            (o2.1 + d1.1) / 2.0
        } else if trans_leq(d1.0, d1.1, d2.0, d2.1) {
            let mut z1 = trans_eval(o1.0, o1.1, o2.0, o2.1, d1.0, d1.1);
            let mut z2 = trans_eval(o2.0, o2.1, d1.0, d1.1, d2.0, d2.1);
            if z1 + z2 < 0.0 {
                z1 = -z1;
                z2 = -z2;
            }
            interpolate(z1, o2.1, z2, d1.1)
        } else {
            let mut z1 = trans_sign(o1.0, o1.1, o2.0, o2.1, d1.0, d1.1);
            let mut z2 = -trans_sign(o1.0, o1.1, d2.0, d2.1, d1.0, d1.1);
            if z1 + z2 < 0.0 {
                z1 = -z1;
                z2 = -z2;
            }
            interpolate(z1, o2.1, z2, d2.1)
        }
    };

    (s, t)
}

/// Standard 4x4 determinant expansion for the in-circle test. Negative
/// means v lies strictly inside the circle through the CCW triangle
/// (v0, v1, v2).
pub fn in_circle(v: (Real, Real), v0: (Real, Real), v1: (Real, Real), v2: (Real, Real)) -> Real {
    let adx = v0.0 - v.0;
    let ady = v0.1 - v.1;
    let bdx = v1.0 - v.0;
    let bdy = v1.1 - v.1;
    let cdx = v2.0 - v.0;
    let cdy = v2.1 - v.1;

    let abdet = adx * bdy - bdx * ady;
    let bcdet = bdx * cdy - cdx * bdy;
    let cadet = cdx * ady - adx * cdy;

    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    alift * bcdet + blift * cadet + clift * abdet
}
