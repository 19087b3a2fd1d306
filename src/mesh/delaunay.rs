// polytess: plane-sweep polygon tessellation
// Licensed under the MIT license.

//! Edge-flip refinement toward a constrained Delaunay triangulation.

use super::{mirror, EdgeId, Mesh, F_HEAD};
use crate::geom::in_circle;

impl Mesh {
    /// True when the edge already satisfies the local Delaunay criterion:
    /// the far vertex of the right triangle is not inside the circumcircle
    /// of the left one.
    pub fn edge_is_locally_delaunay(&self, e: EdgeId) -> bool {
        let sym_l2 = self.e(self.e(mirror(e)).lnext).lnext;
        let l1 = self.e(e).lnext;
        let l2 = self.e(l1).lnext;

        let v = self.st(self.e(sym_l2).origin);
        let v0 = self.st(self.e(l1).origin);
        let v1 = self.st(self.e(l2).origin);
        let v2 = self.st(self.e(e).origin);

        in_circle(v, v0, v1, v2) < 0.0
    }

    /// Flip non-Delaunay internal edges until none remain or the iteration
    /// cap is hit. The in-circle predicate is not robust, so convergence
    /// cannot be guaranteed; the cap is `(inside faces)^2` and bailing out
    /// early still leaves a valid triangulation.
    pub fn refine_delaunay(&mut self) {
        let mut stack: Vec<EdgeId> = Vec::new();
        let mut max_faces: usize = 0;

        let mut f = self.f(F_HEAD).next;
        while f != F_HEAD {
            if self.f(f).inside {
                let start = self.f(f).edge;
                let mut e = start;
                loop {
                    let internal = self.edge_is_internal(e);
                    self.e_mut(e).mark = internal;
                    if internal && !self.e(mirror(e)).mark {
                        stack.push(e);
                    }
                    e = self.e(e).lnext;
                    if e == start {
                        break;
                    }
                }
                max_faces += 1;
            }
            f = self.f(f).next;
        }

        let max_iter = max_faces * max_faces;
        let mut iter = 0;

        while let Some(e) = stack.pop() {
            if iter >= max_iter {
                log::debug!("delaunay refinement hit iteration cap ({max_iter})");
                break;
            }
            iter += 1;
            self.e_mut(e).mark = false;
            self.e_mut(mirror(e)).mark = false;

            if !self.edge_is_locally_delaunay(e) {
                let neighbors = [
                    self.e(e).lnext,
                    self.lprev(e),
                    self.e(mirror(e)).lnext,
                    self.lprev(mirror(e)),
                ];
                self.flip_edge(e);
                for nb in neighbors {
                    if !self.e(nb).mark && self.edge_is_internal(nb) {
                        self.e_mut(nb).mark = true;
                        self.e_mut(mirror(nb)).mark = true;
                        stack.push(nb);
                    }
                }
            }
        }
    }
}
