// polytess: plane-sweep polygon tessellation
// Licensed under the MIT license.

//! Mesh self-consistency traversal.

use super::{mirror, Mesh, E_HEAD, F_HEAD, V_HEAD};
use crate::pool::NIL;

impl Mesh {
    /// Walk all three entity lists and assert every structural invariant:
    /// list links are mutually consistent, and for every half-edge `e`
    ///
    /// - `mirror(mirror(e)) == e` (by construction, but rings must agree),
    /// - `e.lnext.onext.mirror == e`,
    /// - `e.onext.mirror.lnext == e`,
    /// - every edge of a face ring names that face, every edge of a vertex
    ///   ring names that vertex.
    ///
    /// Panics on violation. Debug builds call this after the sweep and
    /// after triangulation; tests call it directly.
    pub fn check(&self) {
        let mut f_prev = F_HEAD;
        loop {
            let f = self.f(f_prev).next;
            if f == F_HEAD {
                break;
            }
            assert_eq!(self.f(f).prev, f_prev, "face list prev link broken at {f}");
            let start = self.f(f).edge;
            let mut e = start;
            loop {
                assert_eq!(
                    mirror(self.e(self.e(e).lnext).onext),
                    e,
                    "lnext/onext disagree at edge {e}"
                );
                assert_eq!(
                    self.e(mirror(self.e(e).onext)).lnext,
                    e,
                    "onext/lnext disagree at edge {e}"
                );
                assert_eq!(self.e(e).lface, f, "edge {e} strayed from face {f}");
                e = self.e(e).lnext;
                if e == start {
                    break;
                }
            }
            f_prev = f;
        }

        let mut v_prev = V_HEAD;
        loop {
            let v = self.v(v_prev).next;
            if v == V_HEAD {
                break;
            }
            assert_eq!(self.v(v).prev, v_prev, "vertex list prev link broken at {v}");
            let start = self.v(v).edge;
            let mut e = start;
            loop {
                assert_eq!(
                    mirror(self.e(self.e(e).lnext).onext),
                    e,
                    "lnext/onext disagree at edge {e}"
                );
                assert_eq!(
                    self.e(mirror(self.e(e).onext)).lnext,
                    e,
                    "onext/lnext disagree at edge {e}"
                );
                assert_eq!(self.e(e).origin, v, "edge {e} strayed from vertex {v}");
                e = self.e(e).onext;
                if e == start {
                    break;
                }
            }
            v_prev = v;
        }

        let mut e_prev = E_HEAD;
        loop {
            let e = self.e(e_prev).next;
            if e == E_HEAD {
                break;
            }
            assert_eq!(
                self.e(mirror(e)).next,
                mirror(e_prev),
                "edge list back link broken at {e}"
            );
            assert_ne!(self.e(e).origin, NIL, "edge {e} has no origin");
            assert_ne!(self.dst(e), NIL, "edge {e} has no destination");
            assert_eq!(mirror(self.e(self.e(e).lnext).onext), e);
            assert_eq!(self.e(mirror(self.e(e).onext)).lnext, e);
            e_prev = e;
        }
    }
}
