// polytess: plane-sweep polygon tessellation
// Licensed under the MIT license.

//! Triangulation of y-monotone interior faces.

use super::{mirror, Mesh, F_HEAD};
use crate::geom::{edge_sign, vert_leq};
use crate::TessError;

impl Mesh {
    /// Triangulate one monotone region by adding interior chords.
    ///
    /// The boundary is CCW; there are two chains, upper and lower, both
    /// monotone in the sweep order. Starting from the rightmost origin we
    /// consume chain vertices right to left, fanning CCW triangles from
    /// whichever chain head is farther right. The invariant after each
    /// step: the untessellated remainder is one chain that is a single
    /// edge plus one concave chain, with the single edge's left endpoint
    /// leftmost. The final tail is a pure fan from the leftmost vertex.
    /// O(n) per face.
    pub fn tessellate_mono_region(&mut self, face: u32) -> Result<(), TessError> {
        let mut up = self.f(face).edge;
        debug_assert!(
            self.e(up).lnext != up && self.e(self.e(up).lnext).lnext != up,
            "monotone region must have at least 3 edges"
        );

        // find the edge whose origin is the rightmost vertex
        loop {
            let (ds, dt) = self.st(self.dst(up));
            let (os, ot) = self.st(self.e(up).origin);
            if !vert_leq(ds, dt, os, ot) {
                break;
            }
            up = self.lprev(up);
        }
        loop {
            let (os, ot) = self.st(self.e(up).origin);
            let (ds, dt) = self.st(self.dst(up));
            if !vert_leq(os, ot, ds, dt) {
                break;
            }
            up = self.e(up).lnext;
        }
        let mut lo = self.lprev(up);

        while self.e(up).lnext != lo {
            let (uds, udt) = self.st(self.dst(up));
            let (los, lot) = self.st(self.e(lo).origin);

            if vert_leq(uds, udt, los, lot) {
                // up's destination is left of lo's origin: fan from lo.
                // The edge_goes_left test guarantees progress even when
                // some triangles come out CW from rounding.
                loop {
                    let lo_next = self.e(lo).lnext;
                    if lo_next == up {
                        break;
                    }
                    let (s0, t0) = self.st(self.e(lo).origin);
                    let (s1, t1) = self.st(self.dst(lo));
                    let (s2, t2) = self.st(self.dst(lo_next));
                    if !(self.edge_goes_left(lo_next)
                        || edge_sign(s0, t0, s1, t1, s2, t2) <= 0.0)
                    {
                        break;
                    }
                    let chord = self.connect(lo_next, lo)?;
                    lo = mirror(chord);
                }
                lo = self.lprev(lo);
            } else {
                // lo's origin is left: fan CCW triangles from up's dst
                loop {
                    if self.e(lo).lnext == up {
                        break;
                    }
                    let up_prev = self.lprev(up);
                    let (s0, t0) = self.st(self.dst(up));
                    let (s1, t1) = self.st(self.e(up).origin);
                    let (s2, t2) = self.st(self.e(up_prev).origin);
                    if !(self.edge_goes_right(up_prev)
                        || edge_sign(s0, t0, s1, t1, s2, t2) >= 0.0)
                    {
                        break;
                    }
                    let chord = self.connect(up, up_prev)?;
                    up = mirror(chord);
                }
                up = self.e(up).lnext;
            }
        }

        // lo.origin == up.dst == the leftmost vertex; fan out the tail
        debug_assert_ne!(self.e(lo).lnext, up);
        while self.e(self.e(lo).lnext).lnext != up {
            let lo_next = self.e(lo).lnext;
            let chord = self.connect(lo_next, lo)?;
            lo = mirror(chord);
        }
        Ok(())
    }

    /// Triangulate every face marked inside. New faces created by the
    /// chords inherit the inside flag, and face-list insertion keeps them
    /// behind the cursor, so each is visited exactly once.
    pub fn tessellate_interior(&mut self) -> Result<(), TessError> {
        let mut f = self.f(F_HEAD).next;
        while f != F_HEAD {
            let next = self.f(f).next;
            if self.f(f).inside {
                self.tessellate_mono_region(f)?;
            }
            f = next;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    /// Build one closed loop with the given projected coordinates and mark
    /// the CCW side inside, the way the sweep would have left it.
    fn monotone_loop(points: &[(f32, f32)]) -> (Mesh, u32) {
        let mut m = Mesh::new();
        let mut e = m.make_edge().unwrap();
        m.splice(e, mirror(e)).unwrap();
        for _ in 1..points.len() {
            m.split_edge(e).unwrap();
            e = m.e(e).lnext;
        }
        let mut walk = e;
        for &(s, t) in points {
            let org = m.e(walk).origin;
            m.v_mut(org).s = s;
            m.v_mut(org).t = t;
            walk = m.e(walk).lnext;
        }
        // pick the side whose loop winds CCW in (s, t)
        let mut area = 0.0f32;
        let start = e;
        let mut w = start;
        loop {
            let (os, ot) = m.st(m.e(w).origin);
            let (ds, dt) = m.st(m.dst(w));
            area += (os - ds) * (ot + dt);
            w = m.e(w).lnext;
            if w == start {
                break;
            }
        }
        let inside_face = if area >= 0.0 {
            m.e(e).lface
        } else {
            m.rface(e)
        };
        m.f_mut(inside_face).inside = true;
        (m, inside_face)
    }

    fn count_inside_faces(m: &Mesh) -> usize {
        let mut n = 0;
        let mut f = m.f(F_HEAD).next;
        while f != F_HEAD {
            if m.f(f).inside {
                assert_eq!(m.face_len(f), 3, "face {f} is not a triangle");
                n += 1;
            }
            f = m.f(f).next;
        }
        n
    }

    #[test]
    fn convex_quad_becomes_two_triangles() {
        let (mut m, f) = monotone_loop(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        m.tessellate_mono_region(f).unwrap();
        m.check();
        assert_eq!(count_inside_faces(&m), 2);
    }

    #[test]
    fn convex_hexagon_becomes_four_triangles() {
        let (mut m, f) = monotone_loop(&[
            (0.0, 0.0),
            (2.0, -1.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 3.0),
            (0.0, 2.0),
        ]);
        m.tessellate_mono_region(f).unwrap();
        m.check();
        assert_eq!(count_inside_faces(&m), 4);
    }

    #[test]
    fn nonconvex_monotone_region() {
        // monotone in s but with a reflex vertex on the lower chain
        let (mut m, f) = monotone_loop(&[
            (0.0, 0.0),
            (1.0, -0.2),
            (2.0, -1.5),
            (3.0, 0.0),
            (3.0, 2.0),
            (0.0, 2.0),
        ]);
        m.tessellate_mono_region(f).unwrap();
        m.check();
        assert_eq!(count_inside_faces(&m), 4);
    }

    #[test]
    fn tessellate_interior_only_touches_inside_faces() {
        let (mut m, _f) = monotone_loop(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        m.tessellate_interior().unwrap();
        m.check();
        assert_eq!(count_inside_faces(&m), 2);
        // the exterior face is untouched
        let mut quads = 0;
        let mut f = m.f(F_HEAD).next;
        while f != F_HEAD {
            if !m.f(f).inside && m.face_len(f) == 4 {
                quads += 1;
            }
            f = m.f(f).next;
        }
        assert_eq!(quads, 1);
    }
}
