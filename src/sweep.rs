// polytess: plane-sweep polygon tessellation
// Licensed under the MIT license.

//! Plane-sweep computation of the polygon interior.
//!
//! Vertices are processed in non-decreasing `(s, t)` order. The edges
//! currently crossing the sweep line live in an ordered dictionary keyed
//! by `edge_leq`; each adjacent pair of dictionary edges bounds an
//! [`ActiveRegion`] whose cumulative winding number decides inside vs
//! outside under the winding rule. Crossings are resolved by splitting
//! edges at a representative intersection point; repairs driven by the
//! `dirty` flag keep the dictionary order consistent with the mesh as the
//! arrangement evolves.
//!
//! Invariants maintained between events:
//! - adjacent dictionary edges e1, e2 satisfy `edge_leq(e1, e2)` at every
//!   valid sweep position;
//! - for every active edge, its destination is processed and its origin is
//!   not, and no active edge has zero length;
//! - no two processed vertices have equal coordinates; each finished
//!   interior region is monotone;
//! - if none of the edges at an event carry an active region, the event
//!   has only right-going edges;
//! - a `fix_upper_edge` edge is the only right-going edge from its origin.
//!
//! Every fallible step returns `Result`, so a failure anywhere unwinds the
//! whole `compute_interior` call; the caller wipes the mesh.

use crate::dict::{Dict, NodeHandle};
use crate::geom::{edge_eval, edge_intersect, edge_sign, vert_eq, vert_l1_dist, vert_leq, Real};
use crate::mesh::{mirror, EdgeId, Mesh, VertId, E_HEAD, F_HEAD, V_HEAD};
use crate::pool::{Pool, NIL};
use crate::queue::{EventQueue, NO_EVENT};
use crate::tess::WindingRule;
use crate::{TessError, INVALID_INDEX};

/// Handle to an active region.
pub type RegionId = u32;

/// The area between two adjacent edges on the sweep line.
#[derive(Clone, Debug)]
pub struct ActiveRegion {
    /// Upper bounding edge, directed right to left.
    pub e_up: EdgeId,
    /// Dictionary node carrying this region.
    pub node_up: NodeHandle,
    /// Cumulative winding count of the region.
    pub winding_number: i32,
    pub inside: bool,
    /// One of the two regions bounded by the artificial edges at t = ±inf.
    pub sentinel: bool,
    /// Bounding edges changed; ordering must be re-checked.
    pub dirty: bool,
    /// `e_up` is a temporary edge from `connect_right_vertex`, to be
    /// replaced once the surrounding geometry is known.
    pub fix_upper_edge: bool,
}

impl Default for ActiveRegion {
    fn default() -> Self {
        ActiveRegion {
            e_up: NIL,
            node_up: NIL,
            winding_number: 0,
            inside: false,
            sentinel: false,
            dirty: false,
            fix_upper_edge: false,
        }
    }
}

pub struct Sweep<'m> {
    mesh: &'m mut Mesh,
    rule: WindingRule,
    dict: Dict,
    queue: EventQueue,
    regions: Pool<ActiveRegion>,
    /// Current event vertex and its coordinates (cached for `edge_leq`).
    event: VertId,
    event_s: Real,
    event_t: Real,
}

impl<'m> Sweep<'m> {
    /// Compute the planar arrangement of the mesh's edges and mark every
    /// face inside or outside per `rule`. `bmin`/`bmax` bound the
    /// projected coordinates and place the sentinel edges.
    pub fn run(
        mesh: &'m mut Mesh,
        rule: WindingRule,
        bmin: [Real; 2],
        bmax: [Real; 2],
    ) -> Result<(), TessError> {
        let mut sweep = Sweep {
            mesh,
            rule,
            dict: Dict::new(),
            queue: EventQueue::new(),
            regions: Pool::new(),
            event: NIL,
            event_s: 0.0,
            event_t: 0.0,
        };
        sweep.compute_interior(bmin, bmax)
    }

    fn compute_interior(&mut self, bmin: [Real; 2], bmax: [Real; 2]) -> Result<(), TessError> {
        self.remove_degenerate_edges()?;
        self.init_event_queue();
        self.init_edge_dict(bmin, bmax)?;

        log::debug!("sweep: {} events queued", self.queue.len());

        while let Some(v) = self.queue.pop() {
            self.mesh.v_mut(v).pq = NO_EVENT;

            // Merge all vertices at (tolerance-)identical positions before
            // dispatching, so coincident features are processed as one
            // event. Processing them separately can split a crossing edge
            // at two slightly different points and leave a sliver gap.
            while let Some(next) = self.queue.peek() {
                let (vs, vt) = self.mesh.st(v);
                let (ns, nt) = self.mesh.st(next);
                if !vert_eq(ns, nt, vs, vt) {
                    break;
                }
                let next = self.queue.pop().expect("peeked event vanished");
                self.mesh.v_mut(next).pq = NO_EVENT;
                log::trace!("sweep: merging coincident event {next} into {v}");
                let a = self.mesh.v(v).edge;
                let b = self.mesh.v(next).edge;
                self.mesh.splice(a, b)?;
            }

            self.sweep_event(v)?;
        }

        self.done_edge_dict();
        self.remove_degenerate_faces()?;

        #[cfg(debug_assertions)]
        self.mesh.check();

        Ok(())
    }

    // ---- region plumbing -----------------------------------------------

    #[inline]
    fn reg(&self, r: RegionId) -> &ActiveRegion {
        self.regions.get(r)
    }

    #[inline]
    fn reg_mut(&mut self, r: RegionId) -> &mut ActiveRegion {
        self.regions.get_mut(r)
    }

    /// Region bounded above by the next-higher dictionary edge, or `NIL`
    /// at the top of the dictionary.
    fn region_above(&self, r: RegionId) -> RegionId {
        self.dict.key(self.dict.succ(self.reg(r).node_up))
    }

    fn region_below(&self, r: RegionId) -> RegionId {
        self.dict.key(self.dict.pred(self.reg(r).node_up))
    }

    /// Dictionary ordering of two active regions' upper edges at the
    /// current event. Both edges are directed right to left. The general
    /// case compares signed distances from the event to each edge; when a
    /// destination sits exactly on the event the tie is broken by slope.
    fn edge_leq(&self, r1: RegionId, r2: RegionId) -> bool {
        let m = &*self.mesh;
        let e1 = self.reg(r1).e_up;
        let e2 = self.reg(r2).e_up;
        let d1 = m.dst(e1);
        let d2 = m.dst(e2);
        let o1 = m.e(e1).origin;
        let o2 = m.e(e2).origin;
        let (evs, evt) = (self.event_s, self.event_t);
        let (d1s, d1t) = m.st(d1);
        let (d2s, d2t) = m.st(d2);
        let (o1s, o1t) = m.st(o1);
        let (o2s, o2t) = m.st(o2);

        if d1 == self.event {
            if d2 == self.event {
                // Both edges end at the event; order by slope.
                if vert_leq(o1s, o1t, o2s, o2t) {
                    return edge_sign(d2s, d2t, o1s, o1t, o2s, o2t) <= 0.0;
                }
                return edge_sign(d1s, d1t, o2s, o2t, o1s, o1t) >= 0.0;
            }
            return edge_sign(d2s, d2t, evs, evt, o2s, o2t) <= 0.0;
        }
        if d2 == self.event {
            return edge_sign(d1s, d1t, evs, evt, o1s, o1t) >= 0.0;
        }

        let t1 = edge_eval(d1s, d1t, evs, evt, o1s, o1t);
        let t2 = edge_eval(d2s, d2t, evs, evt, o2s, o2t);
        t1 >= t2
    }

    /// Insert a region into the dictionary, walking backward from `hint`.
    fn dict_insert_before(&mut self, hint: NodeHandle, reg: RegionId) -> Result<NodeHandle, TessError> {
        let mut node = hint;
        loop {
            node = self.dict.pred(node);
            let k = self.dict.key(node);
            if k == NIL || self.edge_leq(k, reg) {
                break;
            }
        }
        let n = self.dict.link_after(node, reg);
        if n == NIL {
            return Err(TessError::AllocationFailure);
        }
        Ok(n)
    }

    /// Forward search: the lowest region whose upper edge is at or above
    /// the probe edge. `NIL` when the probe lands above everything.
    fn dict_search(&mut self, probe_e_up: EdgeId) -> RegionId {
        let probe = self.regions.alloc();
        if probe == NIL {
            return NIL;
        }
        self.reg_mut(probe).e_up = probe_e_up;

        let mut node = self.dict.succ(self.dict.head());
        let found = loop {
            let k = self.dict.key(node);
            if k == NIL {
                break NIL;
            }
            if self.edge_leq(probe, k) {
                break k;
            }
            node = self.dict.succ(node);
        };

        self.regions.free(probe);
        found
    }

    fn alloc_region(&mut self) -> Result<RegionId, TessError> {
        let r = self.regions.alloc();
        if r == NIL {
            return Err(TessError::AllocationFailure);
        }
        Ok(r)
    }

    /// New region below `r_above` with upper edge `e_up`. Winding and
    /// inside are left for the caller.
    fn add_region_below(&mut self, r_above: RegionId, e_up: EdgeId) -> Result<RegionId, TessError> {
        let r = self.alloc_region()?;
        self.reg_mut(r).e_up = e_up;
        let hint = self.reg(r_above).node_up;
        let node = self.dict_insert_before(hint, r)?;
        self.reg_mut(r).node_up = node;
        self.mesh.e_mut(e_up).region = r;
        Ok(r)
    }

    fn compute_winding(&mut self, r: RegionId) {
        let above = self.region_above(r);
        let above_winding = if above == NIL {
            0
        } else {
            self.reg(above).winding_number
        };
        let w = above_winding + self.mesh.e(self.reg(r).e_up).winding;
        self.reg_mut(r).winding_number = w;
        self.reg_mut(r).inside = self.rule.is_inside(w);
    }

    fn delete_region(&mut self, r: RegionId) {
        let e_up = self.reg(r).e_up;
        if e_up != NIL && self.mesh.edge_is_live(e_up) {
            // A fixable edge was created with zero winding; it must not
            // have been merged with a real edge by the time its region
            // dies.
            debug_assert!(!self.reg(r).fix_upper_edge || self.mesh.e(e_up).winding == 0);
            self.mesh.e_mut(e_up).region = NIL;
        }
        let node = self.reg(r).node_up;
        self.dict.remove(node);
        self.regions.free(r);
    }

    /// The region's chains met at a sweep vertex: record the inside flag
    /// on the face and retire the region.
    fn finish_region(&mut self, r: RegionId) {
        let e = self.reg(r).e_up;
        let inside = self.reg(r).inside;
        let f = self.mesh.e(e).lface;
        self.mesh.f_mut(f).inside = inside;
        // start tessellate_mono_region near its rightmost vertex
        self.mesh.f_mut(f).edge = e;
        self.delete_region(r);
    }

    /// Swap in a replacement for a temporary fixable upper edge.
    fn fix_upper_edge(&mut self, r: RegionId, new_edge: EdgeId) -> Result<(), TessError> {
        debug_assert!(self.reg(r).fix_upper_edge);
        let old = self.reg(r).e_up;
        self.mesh.delete_edge(old)?;
        self.reg_mut(r).fix_upper_edge = false;
        self.reg_mut(r).e_up = new_edge;
        self.mesh.e_mut(new_edge).region = r;
        Ok(())
    }

    /// Region above the uppermost dictionary edge sharing this region's
    /// upper-edge origin, fixing a temporary edge on the way if present.
    fn top_left_region(&mut self, r: RegionId) -> Result<RegionId, TessError> {
        let org = self.mesh.e(self.reg(r).e_up).origin;
        let mut r = r;
        loop {
            r = self.region_above(r);
            if r == NIL {
                return Err(TessError::SweepFailure);
            }
            if self.mesh.e(self.reg(r).e_up).origin != org {
                break;
            }
        }

        if self.reg(r).fix_upper_edge {
            let below = self.region_below(r);
            let a = mirror(self.reg(below).e_up);
            let b = self.mesh.e(self.reg(r).e_up).lnext;
            let e = self.mesh.connect(a, b)?;
            self.fix_upper_edge(r, e)?;
            r = self.region_above(r);
            if r == NIL {
                return Err(TessError::SweepFailure);
            }
        }
        Ok(r)
    }

    /// Region above the uppermost dictionary edge sharing this region's
    /// upper-edge destination.
    fn top_right_region(&self, r: RegionId) -> Result<RegionId, TessError> {
        let dst = self.mesh.dst(self.reg(r).e_up);
        let mut r = r;
        loop {
            r = self.region_above(r);
            if r == NIL {
                return Err(TessError::SweepFailure);
            }
            if self.mesh.dst(self.reg(r).e_up) != dst {
                return Ok(r);
            }
        }
    }

    /// Close out a run of regions whose upper and lower chains meet at the
    /// current event, walking down from `reg_first` to `reg_last`
    /// (exclusive; `NIL` walks as far as possible). Re-links the mesh so
    /// edge order around the shared origin matches the dictionary, and
    /// replaces any fixable edges encountered. Returns the lowermost
    /// left-going edge of the run.
    fn finish_left_regions(
        &mut self,
        reg_first: RegionId,
        reg_last: RegionId,
    ) -> Result<EdgeId, TessError> {
        let mut reg_prev = reg_first;
        let mut e_prev = self.reg(reg_first).e_up;

        while reg_prev != reg_last {
            self.reg_mut(reg_prev).fix_upper_edge = false; // placement was OK
            let reg = self.region_below(reg_prev);
            if reg == NIL {
                return Err(TessError::SweepFailure);
            }
            let mut e = self.reg(reg).e_up;

            if self.mesh.e(e).origin != self.mesh.e(e_prev).origin {
                if !self.reg(reg).fix_upper_edge {
                    // The last left-going edge: the mesh may still hold
                    // more edges at this origin (left edges added to an
                    // already-processed vertex), so the face flag must be
                    // recorded here, not just the region dropped.
                    self.finish_region(reg_prev);
                    break;
                }
                // The edge below is temporary; replace it now that a real
                // endpoint is known.
                let a = mirror(self.mesh.e(e_prev).onext);
                let new_e = self.mesh.connect(a, mirror(e))?;
                self.fix_upper_edge(reg, new_e)?;
                e = self.reg(reg).e_up;
            }

            if self.mesh.e(e_prev).onext != e {
                let op = self.mesh.oprev(e);
                self.mesh.splice(op, e)?;
                self.mesh.splice(e_prev, e)?;
            }
            self.finish_region(reg_prev); // may change reg's e_up
            e_prev = self.reg(reg).e_up;
            reg_prev = reg;
        }
        Ok(e_prev)
    }

    /// Insert the right-going edges of the event (CCW from `e_first` up to
    /// but not including `e_last`) into the dictionary below `reg_up`,
    /// computing each new region's winding from the one above. `e_top_left`
    /// anchors the re-linking of mesh order to dictionary order; `NIL`
    /// means the event had no processed left-going edges.
    fn add_right_edges(
        &mut self,
        reg_up: RegionId,
        e_first: EdgeId,
        e_last: EdgeId,
        e_top_left: EdgeId,
        clean_up: bool,
    ) -> Result<(), TessError> {
        let mut e = e_first;
        loop {
            debug_assert!(self.mesh.edge_goes_right(e));
            self.add_region_below(reg_up, mirror(e))?;
            e = self.mesh.e(e).onext;
            if e == e_last {
                break;
            }
        }

        let e_top_left = if e_top_left == NIL {
            let rb = self.region_below(reg_up);
            self.mesh.rprev(self.reg(rb).e_up)
        } else {
            e_top_left
        };

        let mut reg_prev = reg_up;
        let mut e_prev = e_top_left;
        let mut first_time = true;
        loop {
            let reg = self.region_below(reg_prev);
            if reg == NIL {
                return Err(TessError::SweepFailure);
            }
            let e = mirror(self.reg(reg).e_up);
            if self.mesh.e(e).origin != self.mesh.e(e_prev).origin {
                break;
            }

            if self.mesh.e(e).onext != e_prev {
                // unlink e and relink it below e_prev
                let op = self.mesh.oprev(e);
                self.mesh.splice(op, e)?;
                let opp = self.mesh.oprev(e_prev);
                self.mesh.splice(opp, e)?;
            }

            let w = self.reg(reg_prev).winding_number - self.mesh.e(e).winding;
            self.reg_mut(reg).winding_number = w;
            self.reg_mut(reg).inside = self.rule.is_inside(w);

            // Two outgoing edges with numerically indistinguishable slopes
            // must be merged before any intersection tests.
            self.reg_mut(reg_prev).dirty = true;
            if !first_time && self.check_for_right_splice(reg_prev)? {
                self.mesh.add_winding(e, e_prev);
                self.delete_region(reg_prev);
                self.mesh.delete_edge(e_prev)?;
            }
            first_time = false;
            reg_prev = reg;
            e_prev = e;
        }
        self.reg_mut(reg_prev).dirty = true;

        if clean_up {
            self.walk_dirty_regions(reg_prev)?;
        }
        Ok(())
    }

    // ---- invariant repair ----------------------------------------------

    /// Ensure `e_up`'s origin is above `e_lo`, or `e_lo`'s origin below
    /// `e_up`, whichever origin is leftmost. Beyond merging right-going
    /// edges with indistinguishable slopes, this recovers from earlier
    /// splits shifting a previous comparison: the offending origin is
    /// spliced into the other edge, a combinatorial fix that holds no
    /// matter how degenerate the coordinates are.
    fn check_for_right_splice(&mut self, reg_up: RegionId) -> Result<bool, TessError> {
        let reg_lo = self.region_below(reg_up);
        if reg_lo == NIL {
            return Ok(false);
        }
        let e_up = self.reg(reg_up).e_up;
        let e_lo = self.reg(reg_lo).e_up;
        let up_org = self.mesh.e(e_up).origin;
        let lo_org = self.mesh.e(e_lo).origin;
        let (uos, uot) = self.mesh.st(up_org);
        let (los, lot) = self.mesh.st(lo_org);
        let (uds, udt) = self.mesh.st(self.mesh.dst(e_up));
        let (lds, ldt) = self.mesh.st(self.mesh.dst(e_lo));

        if vert_leq(uos, uot, los, lot) {
            if edge_sign(lds, ldt, uos, uot, los, lot) > 0.0 {
                return Ok(false);
            }
            if !vert_eq(uos, uot, los, lot) {
                // splice e_up's origin into e_lo
                self.mesh.split_edge(mirror(e_lo))?;
                let b = self.mesh.oprev(e_lo);
                self.mesh.splice(e_up, b)?;
                self.reg_mut(reg_up).dirty = true;
                self.reg_mut(reg_lo).dirty = true;
            } else if up_org != lo_org {
                // coordinates agree but the vertices are distinct; merge
                // them, provided the doomed origin is still unprocessed
                let h = self.mesh.v(up_org).pq;
                if self.queue.erase(h) {
                    self.mesh.v_mut(up_org).pq = NO_EVENT;
                    let a = self.mesh.oprev(e_lo);
                    self.mesh.splice(a, e_up)?;
                } else {
                    log::debug!("right-splice: origin {up_org} not queued, merge skipped");
                }
            }
        } else {
            if edge_sign(uds, udt, los, lot, uos, uot) <= 0.0 {
                return Ok(false);
            }
            // e_lo's origin is above e_up; splice it into e_up
            let above = self.region_above(reg_up);
            if above != NIL {
                self.reg_mut(above).dirty = true;
            }
            self.reg_mut(reg_up).dirty = true;
            self.mesh.split_edge(mirror(e_up))?;
            let a = self.mesh.oprev(e_lo);
            self.mesh.splice(a, e_up)?;
        }
        Ok(true)
    }

    /// The destination-side analog of `check_for_right_splice`: ensure
    /// `e_up`'s destination is above `e_lo`, or `e_lo`'s destination below
    /// `e_up`, splicing the offender into the other edge otherwise.
    fn check_for_left_splice(&mut self, reg_up: RegionId) -> Result<bool, TessError> {
        let reg_lo = self.region_below(reg_up);
        if reg_lo == NIL {
            return Ok(false);
        }
        let e_up = self.reg(reg_up).e_up;
        let e_lo = self.reg(reg_lo).e_up;
        let (uds, udt) = self.mesh.st(self.mesh.dst(e_up));
        let (lds, ldt) = self.mesh.st(self.mesh.dst(e_lo));
        let (uos, uot) = self.mesh.st(self.mesh.e(e_up).origin);
        let (los, lot) = self.mesh.st(self.mesh.e(e_lo).origin);
        debug_assert!(!vert_eq(uds, udt, lds, ldt));

        if vert_leq(uds, udt, lds, ldt) {
            if edge_sign(uds, udt, lds, ldt, uos, uot) < 0.0 {
                return Ok(false);
            }
            // e_lo's destination is above e_up: splice it into e_up
            let above = self.region_above(reg_up);
            if above != NIL {
                self.reg_mut(above).dirty = true;
            }
            self.reg_mut(reg_up).dirty = true;
            let e = self.mesh.split_edge(e_up)?;
            self.mesh.splice(mirror(e_lo), e)?;
            let lf = self.mesh.e(e).lface;
            let inside = self.reg(reg_up).inside;
            self.mesh.f_mut(lf).inside = inside;
        } else {
            if edge_sign(lds, ldt, uds, udt, los, lot) > 0.0 {
                return Ok(false);
            }
            // e_up's destination is below e_lo: splice it into e_lo
            self.reg_mut(reg_up).dirty = true;
            self.reg_mut(reg_lo).dirty = true;
            let e = self.mesh.split_edge(e_lo)?;
            let a = self.mesh.e(e_up).lnext;
            self.mesh.splice(a, mirror(e_lo))?;
            let rf = self.mesh.rface(e);
            let inside = self.reg(reg_up).inside;
            self.mesh.f_mut(rf).inside = inside;
        }
        Ok(true)
    }

    /// Detect and resolve a crossing between the region's upper and lower
    /// edges. On a proper crossing both edges are split at a
    /// representative intersection point (clamped to the event if it
    /// drifted left of the sweep line, and to the rightmost origin if it
    /// drifted right), the four split halves are merged at the new vertex,
    /// and the vertex is queued as a future event.
    ///
    /// Returns true when resolution recursed into `add_right_edges`, in
    /// which case all dirty regions have been handled and `reg_up` may be
    /// gone.
    fn check_for_intersect(&mut self, reg_up: RegionId) -> Result<bool, TessError> {
        let reg_lo = self.region_below(reg_up);
        if reg_lo == NIL {
            return Ok(false);
        }
        let e_up = self.reg(reg_up).e_up;
        let e_lo = self.reg(reg_lo).e_up;
        let org_up = self.mesh.e(e_up).origin;
        let org_lo = self.mesh.e(e_lo).origin;
        let dst_up = self.mesh.dst(e_up);
        let dst_lo = self.mesh.dst(e_lo);

        debug_assert!(!self.reg(reg_up).fix_upper_edge && !self.reg(reg_lo).fix_upper_edge);
        debug_assert!(org_up != self.event && org_lo != self.event);

        if org_up == org_lo {
            return Ok(false); // right endpoints coincide
        }

        let (ous, out) = self.mesh.st(org_up);
        let (ols, olt) = self.mesh.st(org_lo);
        let (dus, dut) = self.mesh.st(dst_up);
        let (dls, dlt) = self.mesh.st(dst_lo);
        let (evs, evt) = (self.event_s, self.event_t);

        debug_assert!(!vert_eq(dls, dlt, dus, dut));

        let t_min_up = out.min(dut);
        let t_max_lo = olt.max(dlt);
        if t_min_up > t_max_lo {
            return Ok(false); // t ranges do not overlap
        }

        if vert_leq(ous, out, ols, olt) {
            if edge_sign(dls, dlt, ous, out, ols, olt) > 0.0 {
                return Ok(false);
            }
        } else if edge_sign(dus, dut, ols, olt, ous, out) < 0.0 {
            return Ok(false);
        }

        // The edges intersect, at least marginally.
        let (mut is, mut it) = edge_intersect((dus, dut), (ous, out), (dls, dlt), (ols, olt));

        if vert_leq(is, it, evs, evt) {
            // The computed point drifted left of the sweep line; with
            // perfect arithmetic this could not happen. Use the event.
            is = evs;
            it = evt;
        }
        // A point right of the rightmost origin causes gross inefficiency
        // on degenerate input; clamp there too.
        let (oms, omt) = if vert_leq(ous, out, ols, olt) {
            (ous, out)
        } else {
            (ols, olt)
        };
        if vert_leq(oms, omt, is, it) {
            is = oms;
            it = omt;
        }

        if vert_eq(is, it, ous, out) || vert_eq(is, it, ols, olt) {
            // intersection at one of the right endpoints
            self.check_for_right_splice(reg_up)?;
            return Ok(false);
        }

        let dst_up_is_event = vert_eq(dus, dut, evs, evt);
        let dst_lo_is_event = vert_eq(dls, dlt, evs, evt);
        if (!dst_up_is_event && edge_sign(dus, dut, evs, evt, is, it) >= 0.0)
            || (!dst_lo_is_event && edge_sign(dls, dlt, evs, evt, is, it) <= 0.0)
        {
            // The new edge would pass on the wrong side of the event, or
            // through it; tiny numerical errors in the intersection
            // computation get us here.
            if dst_lo == self.event {
                // splice the event into e_up and process the new regions
                self.mesh.split_edge(mirror(e_up))?;
                self.mesh.splice(mirror(e_lo), e_up)?;
                let reg_up = self.top_left_region(reg_up)?;
                let rb = self.region_below(reg_up);
                let e_up2 = self.reg(rb).e_up;
                self.finish_left_regions(rb, reg_lo)?;
                let e_first = self.mesh.oprev(e_up2);
                self.add_right_edges(reg_up, e_first, e_up2, e_up2, true)?;
                return Ok(true);
            }
            if dst_up == self.event {
                // splice the event into e_lo and process the new regions
                self.mesh.split_edge(mirror(e_lo))?;
                let a = self.mesh.e(e_up).lnext;
                let b = self.mesh.oprev(e_lo);
                self.mesh.splice(a, b)?;
                let reg_lo2 = reg_up;
                let reg_up2 = self.top_right_region(reg_up)?;
                let rb = self.region_below(reg_up2);
                let e_anchor = self.mesh.rprev(self.reg(rb).e_up);
                let new_lo_up = self.mesh.oprev(e_lo);
                self.reg_mut(reg_lo2).e_up = new_lo_up;
                let e_lo2 = self.finish_left_regions(reg_lo2, NIL)?;
                let e_first = self.mesh.e(e_lo2).onext;
                let e_last = self.mesh.rprev(e_up);
                self.add_right_edges(reg_up2, e_first, e_last, e_anchor, true)?;
                return Ok(true);
            }
            // Called from connect_right_vertex: split whichever edge
            // passes on the wrong side and let the caller splice it.
            if edge_sign(dus, dut, evs, evt, is, it) >= 0.0 {
                let above = self.region_above(reg_up);
                if above != NIL {
                    self.reg_mut(above).dirty = true;
                }
                self.reg_mut(reg_up).dirty = true;
                self.mesh.split_edge(mirror(e_up))?;
                let v = self.mesh.e(e_up).origin;
                self.mesh.v_mut(v).s = evs;
                self.mesh.v_mut(v).t = evt;
            }
            if edge_sign(dls, dlt, evs, evt, is, it) <= 0.0 {
                self.reg_mut(reg_up).dirty = true;
                self.reg_mut(reg_lo).dirty = true;
                self.mesh.split_edge(mirror(e_lo))?;
                let v = self.mesh.e(e_lo).origin;
                self.mesh.v_mut(v).s = evs;
                self.mesh.v_mut(v).t = evt;
            }
            return Ok(false);
        }

        // General case: split both edges and merge the split vertices into
        // one intersection vertex, queued as a future event.
        self.mesh.split_edge(mirror(e_up))?;
        self.mesh.split_edge(mirror(e_lo))?;
        let a = self.mesh.oprev(e_lo);
        self.mesh.splice(a, e_up)?;

        let v = self.mesh.e(e_up).origin;
        self.mesh.v_mut(v).s = is;
        self.mesh.v_mut(v).t = it;
        self.set_intersect_data(v, org_up, dst_up, org_lo, dst_lo);
        let h = self.queue.insert(is, it, v);
        self.mesh.v_mut(v).pq = h;
        log::trace!("sweep: intersection vertex {v} at ({is}, {it})");

        let above = self.region_above(reg_up);
        if above != NIL {
            self.reg_mut(above).dirty = true;
        }
        self.reg_mut(reg_up).dirty = true;
        self.reg_mut(reg_lo).dirty = true;
        Ok(false)
    }

    /// Give an intersection vertex source coordinates interpolated from
    /// the four generating endpoints: each edge contributes half the
    /// weight, split between its endpoints by relative L1 distance. The
    /// vertex carries no input index.
    fn set_intersect_data(
        &mut self,
        isect: VertId,
        org_up: VertId,
        dst_up: VertId,
        org_lo: VertId,
        dst_lo: VertId,
    ) {
        let (is, it) = self.mesh.st(isect);
        let mut coords = [0.0f32; 3];
        for &(org, dst) in &[(org_up, dst_up), (org_lo, dst_lo)] {
            let (os, ot) = self.mesh.st(org);
            let (ds, dt) = self.mesh.st(dst);
            let t1 = vert_l1_dist(os, ot, is, it);
            let t2 = vert_l1_dist(ds, dt, is, it);
            let (w0, w1) = if t1 + t2 > 0.0 {
                (0.5 * t2 / (t1 + t2), 0.5 * t1 / (t1 + t2))
            } else {
                (0.25, 0.25)
            };
            let oc = self.mesh.v(org).coords;
            let dc = self.mesh.v(dst).coords;
            for i in 0..3 {
                coords[i] += w0 * oc[i] + w1 * dc[i];
            }
        }
        let v = self.mesh.v_mut(isect);
        v.coords = coords;
        v.idx = INVALID_INDEX;
    }

    /// Restore the dictionary invariants around every dirty region,
    /// walking bottom-up and revisiting as repairs dirty new neighbors.
    fn walk_dirty_regions(&mut self, reg_up: RegionId) -> Result<(), TessError> {
        let mut reg_up = reg_up;
        let mut reg_lo = self.region_below(reg_up);

        loop {
            // find the lowest dirty region
            while reg_lo != NIL && self.reg(reg_lo).dirty {
                reg_up = reg_lo;
                reg_lo = self.region_below(reg_lo);
            }
            if !self.reg(reg_up).dirty {
                reg_lo = reg_up;
                reg_up = self.region_above(reg_up);
                if reg_up == NIL || !self.reg(reg_up).dirty {
                    return Ok(());
                }
            }
            self.reg_mut(reg_up).dirty = false;
            if reg_lo == NIL {
                return Ok(());
            }
            let mut e_up = self.reg(reg_up).e_up;
            let mut e_lo = self.reg(reg_lo).e_up;

            if self.mesh.dst(e_up) != self.mesh.dst(e_lo)
                && self.check_for_left_splice(reg_up)?
            {
                // A fixable edge whose region got spliced is no longer
                // needed; such edges exist only for vertices with no other
                // right-going edge.
                if self.reg(reg_lo).fix_upper_edge {
                    self.delete_region(reg_lo);
                    self.mesh.delete_edge(e_lo)?;
                    reg_lo = self.region_below(reg_up);
                    e_lo = self.reg(reg_lo).e_up;
                } else if self.reg(reg_up).fix_upper_edge {
                    self.delete_region(reg_up);
                    self.mesh.delete_edge(e_up)?;
                    reg_up = self.region_above(reg_lo);
                    e_up = self.reg(reg_up).e_up;
                }
            }

            if self.mesh.e(e_up).origin != self.mesh.e(e_lo).origin {
                if self.mesh.dst(e_up) != self.mesh.dst(e_lo)
                    && !self.reg(reg_up).fix_upper_edge
                    && !self.reg(reg_lo).fix_upper_edge
                    && (self.mesh.dst(e_up) == self.event
                        || self.mesh.dst(e_lo) == self.event)
                {
                    // check_for_intersect falls back on the event as the
                    // intersection point, which requires the event to lie
                    // between the edges and neither to be fixable.
                    if self.check_for_intersect(reg_up)? {
                        return Ok(()); // recursed; everything handled
                    }
                } else {
                    // Even without an intersection test, the origins may
                    // violate the dictionary ordering.
                    self.check_for_right_splice(reg_up)?;
                }
            }

            if self.mesh.e(e_up).origin == self.mesh.e(e_lo).origin
                && self.mesh.dst(e_up) == self.mesh.dst(e_lo)
            {
                // a degenerate two-edge loop; fold and delete it
                self.mesh.add_winding(e_lo, e_up);
                self.delete_region(reg_up);
                self.mesh.delete_edge(e_up)?;
                reg_up = self.region_above(reg_lo);
            }
        }
    }

    // ---- event dispatch ------------------------------------------------

    /// Connect a right vertex (all edges leave to the left) to the
    /// unprocessed mesh. The two regions meeting at the event merge; if
    /// the merged region is interior it must be re-split to stay monotone,
    /// and in any case the event must leave a trace in the dictionary so
    /// later features can merge with it. To avoid inventing crossings, the
    /// event is connected to the closest processed chain vertex and the
    /// edge marked `fix_upper_edge` for later replacement.
    fn connect_right_vertex(
        &mut self,
        reg_up: RegionId,
        e_bottom_left: EdgeId,
    ) -> Result<(), TessError> {
        let mut reg_up = reg_up;
        let mut e_bottom_left = e_bottom_left;
        let mut e_top_left = self.mesh.e(e_bottom_left).onext;
        let reg_lo = self.region_below(reg_up);
        if reg_lo == NIL {
            return Err(TessError::SweepFailure);
        }
        let e_up = self.reg(reg_up).e_up;
        let e_lo = self.reg(reg_lo).e_up;
        let mut degenerate = false;

        if self.mesh.dst(e_up) != self.mesh.dst(e_lo) {
            self.check_for_intersect(reg_up)?;
        }

        // New degeneracies are possible: an edge of the region may now
        // pass through the event or coincide with the intersection vertex.
        let (uos, uot) = self.mesh.st(self.mesh.e(e_up).origin);
        if vert_eq(uos, uot, self.event_s, self.event_t) {
            let a = self.mesh.oprev(e_top_left);
            self.mesh.splice(a, e_up)?;
            reg_up = self.top_left_region(reg_up)?;
            let rb = self.region_below(reg_up);
            e_top_left = self.reg(rb).e_up;
            self.finish_left_regions(rb, reg_lo)?;
            degenerate = true;
        }
        let (los, lot) = self.mesh.st(self.mesh.e(e_lo).origin);
        if vert_eq(los, lot, self.event_s, self.event_t) {
            let b = self.mesh.oprev(e_lo);
            self.mesh.splice(e_bottom_left, b)?;
            e_bottom_left = self.finish_left_regions(reg_lo, NIL)?;
            degenerate = true;
        }
        if degenerate {
            let e_first = self.mesh.e(e_bottom_left).onext;
            self.add_right_edges(reg_up, e_first, e_top_left, e_top_left, true)?;
            return Ok(());
        }

        // Non-degenerate: add the temporary edge to the closer chain tip.
        let e_up2 = self.reg(reg_up).e_up;
        let rl = self.region_below(reg_up);
        let e_lo2 = self.reg(rl).e_up;
        let (uos, uot) = self.mesh.st(self.mesh.e(e_up2).origin);
        let (los, lot) = self.mesh.st(self.mesh.e(e_lo2).origin);
        let target = if vert_leq(los, lot, uos, uot) {
            self.mesh.oprev(e_lo2)
        } else {
            e_up2
        };
        let a = self.mesh.lprev(e_bottom_left);
        let e_new = self.mesh.connect(a, target)?;

        // No cleanup yet: the new edge must get its fixable mark before
        // anything can delete it.
        let on = self.mesh.e(e_new).onext;
        self.add_right_edges(reg_up, e_new, on, on, false)?;
        let fix_reg = self.mesh.e(mirror(e_new)).region;
        if fix_reg == NIL {
            return Err(TessError::SweepFailure);
        }
        self.reg_mut(fix_reg).fix_upper_edge = true;
        self.walk_dirty_regions(reg_up)
    }

    /// The event lies exactly on an already-processed edge or vertex;
    /// splice it into the processed part of the mesh.
    fn connect_left_degenerate(
        &mut self,
        reg_up: RegionId,
        v_event: VertId,
    ) -> Result<(), TessError> {
        let e = self.reg(reg_up).e_up;
        let (os, ot) = self.mesh.st(self.mesh.e(e).origin);
        if vert_eq(os, ot, self.event_s, self.event_t) {
            // e's origin is an unprocessed vertex at the event position:
            // combine them and wait for it to come off the queue.
            let b = self.mesh.v(v_event).edge;
            self.mesh.splice(e, b)?;
            return Ok(());
        }

        let (ds, dt) = self.mesh.st(self.mesh.dst(e));
        if !vert_eq(ds, dt, self.event_s, self.event_t) {
            // the event is interior to e: split e there and recurse
            self.mesh.split_edge(mirror(e))?;
            if self.reg(reg_up).fix_upper_edge {
                // the fixable edge is obsolete; drop the stub
                let stub = self.mesh.e(e).onext;
                self.mesh.delete_edge(stub)?;
                self.reg_mut(reg_up).fix_upper_edge = false;
            }
            let b = self.mesh.v(v_event).edge;
            self.mesh.splice(b, e)?;
            return self.sweep_event(v_event);
        }

        // The event coincides with e's destination, which was already
        // processed: splice the new right-going edges into its star.
        let reg_up = self.top_right_region(reg_up)?;
        let reg = self.region_below(reg_up);
        let mut e_top_right = mirror(self.reg(reg).e_up);
        let e_top_left = self.mesh.e(e_top_right).onext;
        let e_last = e_top_left;
        if self.reg(reg).fix_upper_edge {
            // the destination's single fixable edge gives way to the
            // real right-going edges arriving now
            debug_assert_ne!(e_top_left, e_top_right);
            self.delete_region(reg);
            self.mesh.delete_edge(e_top_right)?;
            e_top_right = self.mesh.oprev(e_top_left);
        }
        let b = self.mesh.v(v_event).edge;
        self.mesh.splice(b, e_top_right)?;
        let e_top_left = if self.mesh.edge_goes_left(e_top_left) {
            e_top_left
        } else {
            NIL // the destination had no left-going edges
        };
        let e_first = self.mesh.e(e_top_right).onext;
        self.add_right_edges(reg_up, e_first, e_last, e_top_left, true)
    }

    /// Connect a left vertex (all edges leave to the right) to the
    /// processed mesh. With R the active region containing the event and
    /// U/L its chains: either split R by connecting the event to the
    /// rightmost processed chain vertex, or, when the event is close
    /// enough to U or L, merge the event into that chain.
    fn connect_left_vertex(&mut self, v_event: VertId) -> Result<(), TessError> {
        let probe = mirror(self.mesh.v(v_event).edge);
        let reg_up = self.dict_search(probe);
        if reg_up == NIL {
            return Err(TessError::SweepFailure);
        }
        let reg_lo = self.region_below(reg_up);
        if reg_lo == NIL {
            // coplanar / fully degenerate input; nothing to connect to
            return Ok(());
        }
        let e_up = self.reg(reg_up).e_up;
        let e_lo = self.reg(reg_lo).e_up;

        let (uds, udt) = self.mesh.st(self.mesh.dst(e_up));
        let (uos, uot) = self.mesh.st(self.mesh.e(e_up).origin);
        if edge_sign(uds, udt, self.event_s, self.event_t, uos, uot) == 0.0 {
            return self.connect_left_degenerate(reg_up, v_event);
        }

        // connect to the rightmost processed vertex of the closer chain
        let (lds, ldt) = self.mesh.st(self.mesh.dst(e_lo));
        let reg = if vert_leq(lds, ldt, uds, udt) {
            reg_up
        } else {
            reg_lo
        };

        if self.reg(reg_up).inside || self.reg(reg).fix_upper_edge {
            let e_new = if reg == reg_up {
                let a = mirror(self.mesh.v(v_event).edge);
                let b = self.mesh.e(e_up).lnext;
                self.mesh.connect(a, b)?
            } else {
                let a = self.mesh.dnext(e_lo);
                let b = self.mesh.v(v_event).edge;
                mirror(self.mesh.connect(a, b)?)
            };
            if self.reg(reg).fix_upper_edge {
                self.fix_upper_edge(reg, e_new)?;
            } else {
                let r = self.add_region_below(reg_up, e_new)?;
                self.compute_winding(r);
            }
            self.sweep_event(v_event)
        } else {
            // the event lies in an exterior region: record its edges
            // without a connecting chord
            let an = self.mesh.v(v_event).edge;
            self.add_right_edges(reg_up, an, an, NIL, true)
        }
    }

    /// Process one sweep event: finish the regions closed off by the
    /// event's left-going edges, then insert its right-going edges.
    fn sweep_event(&mut self, v_event: VertId) -> Result<(), TessError> {
        self.event = v_event;
        let (s, t) = self.mesh.st(v_event);
        self.event_s = s;
        self.event_t = t;
        log::trace!("sweep: event {v_event} at ({s}, {t})");

        let start = self.mesh.v(v_event).edge;
        if start == NIL {
            return Ok(());
        }
        let mut e = start;
        while self.mesh.e(e).region == NIL {
            e = self.mesh.e(e).onext;
            if e == start {
                // no incident edge is on the sweep line: a left vertex
                return self.connect_left_vertex(v_event);
            }
        }

        // First finish every active region whose upper and lower edges
        // both end here; that accounts for all the left-going edges.
        let first = self.mesh.e(e).region;
        let reg_up = self.top_left_region(first)?;
        let reg = self.region_below(reg_up);
        if reg == NIL {
            return Err(TessError::SweepFailure);
        }
        let e_top_left = self.reg(reg).e_up;
        let e_bottom_left = self.finish_left_regions(reg, NIL)?;

        // Then handle the right-going edges.
        if self.mesh.e(e_bottom_left).onext == e_top_left {
            // none at all: bridge with a temporary fixable edge
            self.connect_right_vertex(reg_up, e_bottom_left)
        } else {
            let e_first = self.mesh.e(e_bottom_left).onext;
            self.add_right_edges(reg_up, e_first, e_top_left, e_top_left, true)
        }
    }

    // ---- setup / teardown ----------------------------------------------

    /// Remove zero-length edges and contours with fewer than three edges.
    fn remove_degenerate_edges(&mut self) -> Result<(), TessError> {
        let mut e = self.mesh.e(E_HEAD).next;
        while e != E_HEAD {
            let mut e_next = self.mesh.e(e).next;
            let mut e_lnext = self.mesh.e(e).lnext;

            let (os, ot) = self.mesh.st(self.mesh.e(e).origin);
            let (ds, dt) = self.mesh.st(self.mesh.dst(e));
            if vert_eq(os, ot, ds, dt) && self.mesh.e(e_lnext).lnext != e {
                // zero-length edge on a contour of 3+ edges
                self.mesh.splice(e_lnext, e)?;
                self.mesh.delete_edge(e)?;
                e = e_lnext;
                e_lnext = self.mesh.e(e).lnext;
            }
            if self.mesh.e(e_lnext).lnext == e {
                // contour degenerated to one or two edges
                if e_lnext != e {
                    if e_lnext == e_next || e_lnext == mirror(e_next) {
                        e_next = self.mesh.e(e_next).next;
                    }
                    self.mesh.delete_edge(e_lnext)?;
                }
                if e == e_next || e == mirror(e_next) {
                    e_next = self.mesh.e(e_next).next;
                }
                self.mesh.delete_edge(e)?;
            }
            e = e_next;
        }
        Ok(())
    }

    /// Two-edge faces escape `walk_dirty_regions` when produced by splices
    /// on already-processed edges (temporary-edge replacement in
    /// `finish_left_regions`, destination splices in
    /// `check_for_left_splice`); deleting them on the spot would pull
    /// edges out from under callers further up the stack, so they are
    /// collected here after the sweep instead.
    fn remove_degenerate_faces(&mut self) -> Result<(), TessError> {
        let mut f = self.mesh.f(F_HEAD).next;
        while f != F_HEAD {
            let f_next = self.mesh.f(f).next;
            let e = self.mesh.f(f).edge;
            debug_assert_ne!(self.mesh.e(e).lnext, e);

            if self.mesh.e(self.mesh.e(e).lnext).lnext == e {
                // fold the windings onto the surviving edge
                let on = self.mesh.e(e).onext;
                self.mesh.add_winding(on, e);
                self.mesh.delete_edge(e)?;
            }
            f = f_next;
        }
        Ok(())
    }

    fn init_event_queue(&mut self) {
        let mut v = self.mesh.v(V_HEAD).next;
        while v != V_HEAD {
            let (s, t) = self.mesh.st(v);
            let h = self.queue.insert(s, t, v);
            self.mesh.v_mut(v).pq = h;
            v = self.mesh.v(v).next;
        }
    }

    /// Bracket the dictionary with two sentinel edges beyond the bounding
    /// box, so real edges always have a region above and below.
    fn init_edge_dict(&mut self, bmin: [Real; 2], bmax: [Real; 2]) -> Result<(), TessError> {
        let w = (bmax[0] - bmin[0]) + 0.01;
        let h = (bmax[1] - bmin[1]) + 0.01;
        let smin = bmin[0] - w;
        let smax = bmax[0] + w;
        let tmin = bmin[1] - h;
        let tmax = bmax[1] + h;

        self.add_sentinel(smin, smax, tmin)?;
        self.add_sentinel(smin, smax, tmax)?;
        Ok(())
    }

    fn add_sentinel(&mut self, smin: Real, smax: Real, t: Real) -> Result<(), TessError> {
        let e = self.mesh.make_edge()?;
        let org = self.mesh.e(e).origin;
        let dst = self.mesh.dst(e);
        {
            let v = self.mesh.v_mut(org);
            v.s = smax;
            v.t = t;
        }
        {
            let v = self.mesh.v_mut(dst);
            v.s = smin;
            v.t = t;
        }
        // seed the comparison point for the insertion below
        self.event = dst;
        self.event_s = smin;
        self.event_t = t;

        let r = self.alloc_region()?;
        {
            let reg = self.reg_mut(r);
            reg.e_up = e;
            reg.winding_number = 0;
            reg.inside = false;
            reg.fix_upper_edge = false;
            reg.sentinel = true;
            reg.dirty = false;
        }
        let node = self.dict_insert_before(self.dict.head(), r)?;
        self.reg_mut(r).node_up = node;
        self.mesh.e_mut(e).region = r;
        Ok(())
    }

    /// At termination only the sentinels plus at most one temporary
    /// fixable region may remain.
    fn done_edge_dict(&mut self) {
        let mut fixed_edges = 0u32;
        loop {
            let node = self.dict.min();
            if node == self.dict.head() {
                break;
            }
            let r = self.dict.key(node);
            if !self.reg(r).sentinel {
                debug_assert!(self.reg(r).fix_upper_edge, "unexpected live region");
                fixed_edges += 1;
                debug_assert_eq!(fixed_edges, 1, "more than one fixable region left");
            }
            debug_assert_eq!(self.reg(r).winding_number, 0);
            self.delete_region(r);
        }
        let _ = fixed_edges;
    }
}
