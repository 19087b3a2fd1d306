// polytess: plane-sweep polygon tessellation
// Licensed under the MIT license.

//! Half-edge mesh with Guibas/Stolfi-style operators.
//!
//! Entities live in free-list pools and refer to each other by `u32`
//! handle. Half-edges are allocated in pairs at even/odd handles, so the
//! opposite half of `e` is always `e ^ 1`. Handle 0 is a list-head
//! sentinel in each pool: the vertex, face, and edge lists are circular
//! doubly-linked lists threaded through the entities, and an empty list is
//! a head that is its own neighbor.
//!
//! The global edge list is threaded asymmetrically: even (canonical)
//! halves chain forward through `next`, and each odd half's `next` holds
//! the mirror of its pair's predecessor. This gives O(1) unlink without a
//! second field.
//!
//! Operator contract: all operations are O(1) (except the explicitly
//! loop-shaped ones) and preserve the invariants checked by
//! [`Mesh::check`].

use crate::geom::{vert_ccw, vert_leq, Real};
use crate::pool::{Pool, NIL};
use crate::queue::{EventHandle, NO_EVENT};
use crate::{TessError, INVALID_INDEX};

mod check;
mod delaunay;
mod mono;

pub type VertId = u32;
pub type FaceId = u32;
pub type EdgeId = u32;

/// Head sentinel of the vertex list.
pub const V_HEAD: VertId = 0;
/// Head sentinel of the face list.
pub const F_HEAD: FaceId = 0;
/// Head sentinel pair of the edge list.
pub const E_HEAD: EdgeId = 0;

/// The opposite half of the same edge pair.
#[inline(always)]
pub fn mirror(e: EdgeId) -> EdgeId {
    e ^ 1
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub next: VertId,
    pub prev: VertId,
    /// Some half-edge whose origin is this vertex.
    pub edge: EdgeId,
    pub coords: [Real; 3],
    /// Projected sweep coordinates.
    pub s: Real,
    pub t: Real,
    /// Input-sequence index, or `INVALID_INDEX` for synthesized vertices.
    pub idx: u32,
    /// Output numbering slot.
    pub n: u32,
    /// Pending event handle while queued in the sweep.
    pub pq: EventHandle,
}

impl Default for Vertex {
    fn default() -> Self {
        Vertex {
            next: NIL,
            prev: NIL,
            edge: NIL,
            coords: [0.0; 3],
            s: 0.0,
            t: 0.0,
            idx: INVALID_INDEX,
            n: INVALID_INDEX,
            pq: NO_EVENT,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Face {
    pub next: FaceId,
    pub prev: FaceId,
    /// Some half-edge on this face's boundary.
    pub edge: EdgeId,
    /// Post-processing chain slot.
    pub trail: FaceId,
    /// Output numbering slot.
    pub n: u32,
    /// Post-processing mark.
    pub marked: bool,
    /// True iff the face lies in the polygon interior.
    pub inside: bool,
}

impl Default for Face {
    fn default() -> Self {
        Face {
            next: NIL,
            prev: NIL,
            edge: NIL,
            trail: NIL,
            n: INVALID_INDEX,
            marked: false,
            inside: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HalfEdge {
    /// Global edge list link (see module docs for the threading).
    pub next: EdgeId,
    /// Next half-edge CCW around the origin.
    pub onext: EdgeId,
    /// Next half-edge CCW around the left face.
    pub lnext: EdgeId,
    pub origin: VertId,
    pub lface: FaceId,
    /// Active-region back-pointer while on the sweep line.
    pub region: u32,
    /// Winding delta crossing right face -> left face.
    pub winding: i32,
    /// Scratch mark for the Delaunay pass.
    pub mark: bool,
}

impl Default for HalfEdge {
    fn default() -> Self {
        HalfEdge {
            next: NIL,
            onext: NIL,
            lnext: NIL,
            origin: NIL,
            lface: NIL,
            region: NIL,
            winding: 0,
            mark: false,
        }
    }
}

/// Pool of half-edge pairs. Pair `p` owns handles `2p` and `2p + 1`.
struct EdgePool {
    pairs: Vec<Option<[HalfEdge; 2]>>,
    free: Vec<u32>,
}

impl EdgePool {
    fn new() -> Self {
        EdgePool {
            pairs: Vec::new(),
            free: Vec::new(),
        }
    }

    fn clear(&mut self) {
        self.pairs.clear();
        self.free.clear();
    }

    /// Allocate a fresh pair; returns the even handle or `NIL`.
    fn alloc_pair(&mut self) -> EdgeId {
        if let Some(p) = self.free.pop() {
            self.pairs[p as usize] = Some([HalfEdge::default(), HalfEdge::default()]);
            return p << 1;
        }
        if self.pairs.len() >= (NIL >> 1) as usize {
            return NIL;
        }
        let p = self.pairs.len() as u32;
        self.pairs.push(Some([HalfEdge::default(), HalfEdge::default()]));
        p << 1
    }

    fn free_pair(&mut self, e: EdgeId) {
        let p = e >> 1;
        debug_assert!(self.pairs[p as usize].is_some(), "double free of pair {p}");
        self.pairs[p as usize] = None;
        self.free.push(p);
    }

    #[inline]
    fn get(&self, e: EdgeId) -> &HalfEdge {
        &self.pairs[(e >> 1) as usize].as_ref().expect("stale edge")[(e & 1) as usize]
    }

    #[inline]
    fn get_mut(&mut self, e: EdgeId) -> &mut HalfEdge {
        &mut self.pairs[(e >> 1) as usize].as_mut().expect("stale edge")[(e & 1) as usize]
    }

    #[inline]
    fn is_live(&self, e: EdgeId) -> bool {
        let p = (e >> 1) as usize;
        p < self.pairs.len() && self.pairs[p].is_some()
    }
}

pub struct Mesh {
    verts: Pool<Vertex>,
    faces: Pool<Face>,
    edges: EdgePool,
}

impl Mesh {
    pub fn new() -> Self {
        let mut m = Mesh {
            verts: Pool::new(),
            faces: Pool::new(),
            edges: EdgePool::new(),
        };
        m.install_heads();
        m
    }

    /// Reset to an empty mesh. All handles become invalid.
    pub fn clear(&mut self) {
        self.verts.clear();
        self.faces.clear();
        self.edges.clear();
        self.install_heads();
    }

    fn install_heads(&mut self) {
        let vh = self.verts.alloc();
        debug_assert_eq!(vh, V_HEAD);
        self.verts.get_mut(vh).next = V_HEAD;
        self.verts.get_mut(vh).prev = V_HEAD;

        let fh = self.faces.alloc();
        debug_assert_eq!(fh, F_HEAD);
        self.faces.get_mut(fh).next = F_HEAD;
        self.faces.get_mut(fh).prev = F_HEAD;

        let eh = self.edges.alloc_pair();
        debug_assert_eq!(eh, E_HEAD);
        self.edges.get_mut(E_HEAD).next = E_HEAD;
        self.edges.get_mut(mirror(E_HEAD)).next = mirror(E_HEAD);
    }

    /// True when the mesh holds no real vertices.
    pub fn is_empty(&self) -> bool {
        self.verts.get(V_HEAD).next == V_HEAD
    }

    // ---- entity access -------------------------------------------------

    #[inline]
    pub fn v(&self, v: VertId) -> &Vertex {
        self.verts.get(v)
    }

    #[inline]
    pub fn v_mut(&mut self, v: VertId) -> &mut Vertex {
        self.verts.get_mut(v)
    }

    #[inline]
    pub fn f(&self, f: FaceId) -> &Face {
        self.faces.get(f)
    }

    #[inline]
    pub fn f_mut(&mut self, f: FaceId) -> &mut Face {
        self.faces.get_mut(f)
    }

    #[inline]
    pub fn e(&self, e: EdgeId) -> &HalfEdge {
        self.edges.get(e)
    }

    #[inline]
    pub fn e_mut(&mut self, e: EdgeId) -> &mut HalfEdge {
        self.edges.get_mut(e)
    }

    #[inline]
    pub(crate) fn edge_is_live(&self, e: EdgeId) -> bool {
        self.edges.is_live(e)
    }

    /// Projected coordinates of a vertex.
    #[inline]
    pub fn st(&self, v: VertId) -> (Real, Real) {
        let v = self.verts.get(v);
        (v.s, v.t)
    }

    // ---- derived navigation --------------------------------------------

    /// Destination vertex: origin of the mirror half.
    #[inline]
    pub fn dst(&self, e: EdgeId) -> VertId {
        self.e(mirror(e)).origin
    }

    /// Right face: left face of the mirror half.
    #[inline]
    pub fn rface(&self, e: EdgeId) -> FaceId {
        self.e(mirror(e)).lface
    }

    #[inline]
    pub fn onext(&self, e: EdgeId) -> EdgeId {
        self.e(e).onext
    }

    #[inline]
    pub fn lnext(&self, e: EdgeId) -> EdgeId {
        self.e(e).lnext
    }

    /// Previous edge CCW around the origin: `mirror . lnext`.
    #[inline]
    pub fn oprev(&self, e: EdgeId) -> EdgeId {
        self.e(mirror(e)).lnext
    }

    /// Previous edge CCW around the left face: `onext . mirror`.
    #[inline]
    pub fn lprev(&self, e: EdgeId) -> EdgeId {
        mirror(self.e(e).onext)
    }

    /// Previous edge CCW around the right face: `mirror . onext`.
    #[inline]
    pub fn rprev(&self, e: EdgeId) -> EdgeId {
        self.e(mirror(e)).onext
    }

    /// Next edge CCW around the destination.
    #[inline]
    pub fn dnext(&self, e: EdgeId) -> EdgeId {
        mirror(self.rprev(e))
    }

    /// True when the edge points leftward (toward smaller sweep coords).
    #[inline]
    pub fn edge_goes_left(&self, e: EdgeId) -> bool {
        let (ds, dt) = self.st(self.dst(e));
        let (os, ot) = self.st(self.e(e).origin);
        vert_leq(ds, dt, os, ot)
    }

    #[inline]
    pub fn edge_goes_right(&self, e: EdgeId) -> bool {
        let (os, ot) = self.st(self.e(e).origin);
        let (ds, dt) = self.st(self.dst(e));
        vert_leq(os, ot, ds, dt)
    }

    /// An edge both of whose sides are interior faces.
    #[inline]
    pub fn edge_is_internal(&self, e: EdgeId) -> bool {
        let rf = self.rface(e);
        rf != NIL && self.f(rf).inside
    }

    /// Number of boundary edges of a face.
    pub fn face_len(&self, f: FaceId) -> usize {
        let start = self.f(f).edge;
        let mut e = start;
        let mut n = 0;
        loop {
            n += 1;
            e = self.e(e).lnext;
            if e == start {
                break;
            }
        }
        n
    }

    /// Fold the winding of `src` onto `dst` (both halves). Used when two
    /// coincident edges are merged into one.
    pub fn add_winding(&mut self, dst: EdgeId, src: EdgeId) {
        let w = self.e(src).winding;
        let wm = self.e(mirror(src)).winding;
        self.e_mut(dst).winding += w;
        self.e_mut(mirror(dst)).winding += wm;
    }

    // ---- allocation primitives -----------------------------------------

    /// Allocate an isolated edge pair forming a self-loop, linked into the
    /// global list before `before` (normalized to its even half).
    fn raw_edge_pair(&mut self, before: EdgeId) -> Result<EdgeId, TessError> {
        let before = before & !1;
        let e = self.edges.alloc_pair();
        if e == NIL {
            return Err(TessError::AllocationFailure);
        }
        let em = mirror(e);

        // prev link of `before` lives in its mirror's next
        let prev_m = self.e(mirror(before)).next;
        self.e_mut(mirror(prev_m)).next = e;
        self.e_mut(mirror(before)).next = em;
        {
            let he = self.e_mut(e);
            he.next = before;
            he.onext = e;
            he.lnext = em;
        }
        {
            let he = self.e_mut(em);
            he.next = prev_m;
            he.onext = em;
            he.lnext = e;
        }
        Ok(e)
    }

    /// Allocate a vertex inserted before `v_next` in the global list, with
    /// `e_orig`'s origin ring re-pointed at it.
    fn raw_vertex(&mut self, e_orig: EdgeId, v_next: VertId) -> Result<VertId, TessError> {
        let v = self.verts.alloc();
        if v == NIL {
            return Err(TessError::AllocationFailure);
        }
        let v_prev = self.v(v_next).prev;
        {
            let vv = self.verts.get_mut(v);
            vv.prev = v_prev;
            vv.next = v_next;
            vv.edge = e_orig;
        }
        self.v_mut(v_prev).next = v;
        self.v_mut(v_next).prev = v;

        let mut e = e_orig;
        loop {
            self.e_mut(e).origin = v;
            e = self.e(e).onext;
            if e == e_orig {
                break;
            }
        }
        Ok(v)
    }

    /// Allocate a face inserted before `f_next`, claiming `e_orig`'s loop.
    /// The new face inherits `f_next`'s inside flag.
    fn raw_face(&mut self, e_orig: EdgeId, f_next: FaceId) -> Result<FaceId, TessError> {
        let f = self.faces.alloc();
        if f == NIL {
            return Err(TessError::AllocationFailure);
        }
        let f_prev = self.f(f_next).prev;
        let inside = self.f(f_next).inside;
        {
            let ff = self.faces.get_mut(f);
            ff.prev = f_prev;
            ff.next = f_next;
            ff.edge = e_orig;
            ff.inside = inside;
        }
        self.f_mut(f_prev).next = f;
        self.f_mut(f_next).prev = f;

        let mut e = e_orig;
        loop {
            self.e_mut(e).lface = f;
            e = self.e(e).lnext;
            if e == e_orig {
                break;
            }
        }
        Ok(f)
    }

    /// Unlink and free a vertex, re-pointing its origin ring at `new_origin`
    /// (which may be `NIL` when the ring is about to disappear).
    fn kill_vertex(&mut self, v_del: VertId, new_origin: VertId) {
        let start = self.v(v_del).edge;
        if start != NIL {
            let mut e = start;
            loop {
                self.e_mut(e).origin = new_origin;
                e = self.e(e).onext;
                if e == start {
                    break;
                }
            }
        }
        let prev = self.v(v_del).prev;
        let next = self.v(v_del).next;
        self.v_mut(prev).next = next;
        self.v_mut(next).prev = prev;
        self.verts.free(v_del);
    }

    /// Unlink and free a face, re-pointing its loop at `new_lface`.
    fn kill_face(&mut self, f_del: FaceId, new_lface: FaceId) {
        let start = self.f(f_del).edge;
        if start != NIL {
            let mut e = start;
            loop {
                self.e_mut(e).lface = new_lface;
                e = self.e(e).lnext;
                if e == start {
                    break;
                }
            }
        }
        let prev = self.f(f_del).prev;
        let next = self.f(f_del).next;
        self.f_mut(prev).next = next;
        self.f_mut(next).prev = prev;
        self.faces.free(f_del);
    }

    /// Unlink and free an edge pair.
    fn kill_edge(&mut self, e_del: EdgeId) {
        let e_del = e_del & !1;
        let next = self.e(e_del).next;
        let prev_m = self.e(mirror(e_del)).next;
        self.e_mut(mirror(next)).next = prev_m;
        self.e_mut(mirror(prev_m)).next = next;
        self.edges.free_pair(e_del);
    }

    /// The Guibas/Stolfi primitive: exchange `a.onext` and `b.onext`,
    /// patching the two `lnext` links that encode the same information.
    fn splice_rings(&mut self, a: EdgeId, b: EdgeId) {
        let a_onext = self.e(a).onext;
        let b_onext = self.e(b).onext;
        self.e_mut(mirror(a_onext)).lnext = b;
        self.e_mut(mirror(b_onext)).lnext = a;
        self.e_mut(a).onext = b_onext;
        self.e_mut(b).onext = a_onext;
    }

    // ---- public operators ----------------------------------------------

    /// Create one isolated edge: two fresh vertices and one face bounded by
    /// the degenerate two-half loop.
    pub fn make_edge(&mut self) -> Result<EdgeId, TessError> {
        let e = self.raw_edge_pair(E_HEAD)?;
        let v1 = self.raw_vertex(e, V_HEAD)?;
        let v2 = self.raw_vertex(mirror(e), V_HEAD)?;
        self.raw_face(e, F_HEAD)?;
        self.e_mut(e).origin = v1;
        self.e_mut(mirror(e)).origin = v2;
        Ok(e)
    }

    /// Exchange `a.onext` and `b.onext`, with all the structural fallout:
    ///
    /// - different origins -> the origins merge (`b`'s vertex dies);
    /// - same origin -> the origin splits (a fresh vertex takes `b`'s ring);
    /// - different left faces -> the faces merge (`b`'s face dies);
    /// - same left face -> the face splits; the new face (on `b`'s side)
    ///   inherits the old one's inside flag.
    pub fn splice(&mut self, a: EdgeId, b: EdgeId) -> Result<(), TessError> {
        if a == b {
            return Ok(());
        }

        let a_org = self.e(a).origin;
        let b_org = self.e(b).origin;
        let a_lface = self.e(a).lface;
        let b_lface = self.e(b).lface;

        let joining_vertices = b_org != a_org;
        let joining_loops = b_lface != a_lface;

        if joining_vertices {
            self.kill_vertex(b_org, a_org);
        }
        if joining_loops {
            self.kill_face(b_lface, a_lface);
        }

        self.splice_rings(b, a);

        if !joining_vertices {
            self.raw_vertex(b, a_org)?;
            self.v_mut(a_org).edge = a;
        }
        if !joining_loops {
            self.raw_face(b, a_lface)?;
            self.f_mut(a_lface).edge = a;
        }
        Ok(())
    }

    /// Remove an edge pair. Joins the two incident faces when they differ,
    /// splits the face otherwise; isolated vertices and faces are freed.
    pub fn delete_edge(&mut self, e_del: EdgeId) -> Result<(), TessError> {
        let e_sym = mirror(e_del);

        let joining_loops = self.e(e_del).lface != self.rface(e_del);
        if joining_loops {
            let lf = self.e(e_del).lface;
            let rf = self.rface(e_del);
            self.kill_face(lf, rf);
        }

        if self.e(e_del).onext == e_del {
            let org = self.e(e_del).origin;
            self.kill_vertex(org, NIL);
        } else {
            // keep e_del's origin and right face pointed at live edges
            let rf = self.rface(e_del);
            let op = self.oprev(e_del);
            self.f_mut(rf).edge = op;
            let org = self.e(e_del).origin;
            let on = self.e(e_del).onext;
            self.v_mut(org).edge = on;

            self.splice_rings(e_del, op);
            if !joining_loops {
                let lf = self.e(e_del).lface;
                self.raw_face(e_del, lf)?;
            }
        }

        if self.e(e_sym).onext == e_sym {
            let org = self.e(e_sym).origin;
            let lf = self.e(e_sym).lface;
            self.kill_vertex(org, NIL);
            self.kill_face(lf, NIL);
        } else {
            let lf = self.e(e_del).lface;
            let ln = self.e(e_del).lnext;
            self.f_mut(lf).edge = ln;
            let org = self.e(e_sym).origin;
            let on = self.e(e_sym).onext;
            self.v_mut(org).edge = on;
            let op = self.oprev(e_sym);
            self.splice_rings(e_sym, op);
        }

        self.kill_edge(e_del);
        Ok(())
    }

    /// Append a dangling edge: the new edge is `e_org.lnext`, shares
    /// `e_org`'s left face, and ends in a fresh vertex.
    pub fn add_edge_vertex(&mut self, e_org: EdgeId) -> Result<EdgeId, TessError> {
        let e_new = self.raw_edge_pair(e_org)?;
        let e_new_sym = mirror(e_new);

        let ln = self.e(e_org).lnext;
        self.splice_rings(e_new, ln);

        let org_dst = self.dst(e_org);
        self.e_mut(e_new).origin = org_dst;
        self.raw_vertex(e_new_sym, org_dst)?;

        let lf = self.e(e_org).lface;
        self.e_mut(e_new).lface = lf;
        self.e_mut(e_new_sym).lface = lf;
        Ok(e_new)
    }

    /// Split `e_org`, inserting a fresh vertex in its interior. Returns
    /// `e_new` with `dst(e_org) == origin(e_new)` and `e_new == e_org.lnext`.
    /// Windings are copied to both new halves.
    pub fn split_edge(&mut self, e_org: EdgeId) -> Result<EdgeId, TessError> {
        let temp = self.add_edge_vertex(e_org)?;
        let e_new = mirror(temp);
        let e_sym = mirror(e_org);

        // move e_org's destination over to the new vertex
        let op = self.oprev(e_sym);
        self.splice_rings(e_sym, op);
        self.splice_rings(e_sym, e_new);

        let new_org = self.e(e_new).origin;
        self.e_mut(e_sym).origin = new_org;
        let new_dst = self.dst(e_new);
        self.v_mut(new_dst).edge = mirror(e_new);
        let rf = self.e(e_sym).lface;
        self.e_mut(mirror(e_new)).lface = rf;

        let w = self.e(e_org).winding;
        let wm = self.e(e_sym).winding;
        self.e_mut(e_new).winding = w;
        self.e_mut(mirror(e_new)).winding = wm;
        Ok(e_new)
    }

    /// Connect `dst(e_org)` to `origin(e_dst)` with a new edge. Splits the
    /// shared face, or joins two distinct faces (destroying `e_dst`'s).
    pub fn connect(&mut self, e_org: EdgeId, e_dst: EdgeId) -> Result<EdgeId, TessError> {
        let e_new = self.raw_edge_pair(e_org)?;
        let e_new_sym = mirror(e_new);

        let joining_loops = self.e(e_dst).lface != self.e(e_org).lface;
        if joining_loops {
            let df = self.e(e_dst).lface;
            let of = self.e(e_org).lface;
            self.kill_face(df, of);
        }

        let ln = self.e(e_org).lnext;
        self.splice_rings(e_new, ln);
        self.splice_rings(e_new_sym, e_dst);

        let org_dst = self.dst(e_org);
        self.e_mut(e_new).origin = org_dst;
        let dst_org = self.e(e_dst).origin;
        self.e_mut(e_new_sym).origin = dst_org;
        let lf = self.e(e_org).lface;
        self.e_mut(e_new).lface = lf;
        self.e_mut(e_new_sym).lface = lf;

        self.f_mut(lf).edge = e_new_sym;

        if !joining_loops {
            self.raw_face(e_new, lf)?;
        }
        Ok(e_new)
    }

    /// Reset windings so interior/exterior boundaries carry `+-value` and
    /// everything else zero. With `keep_only_boundary`, non-boundary edges
    /// are deleted instead.
    pub fn set_winding_number(
        &mut self,
        value: i32,
        keep_only_boundary: bool,
    ) -> Result<(), TessError> {
        let mut e = self.e(E_HEAD).next;
        while e != E_HEAD {
            let e_next = self.e(e).next;
            let lf = self.e(e).lface;
            let rf = self.rface(e);
            let lf_inside = lf != NIL && self.f(lf).inside;
            let rf_inside = rf != NIL && self.f(rf).inside;

            if rf_inside != lf_inside {
                self.e_mut(e).winding = if lf_inside { value } else { -value };
            } else if !keep_only_boundary {
                self.e_mut(e).winding = 0;
            } else {
                self.delete_edge(e)?;
            }
            e = e_next;
        }
        Ok(())
    }

    /// Delete interior edges whose two faces merge into a convex face of at
    /// most `max_verts` vertices.
    pub fn merge_convex_faces(&mut self, max_verts: usize) -> Result<(), TessError> {
        let mut e = self.e(E_HEAD).next;
        while e != E_HEAD {
            let mut e_next = self.e(e).next;
            let e_sym = mirror(e);

            let lf = self.e(e).lface;
            let rf = self.e(e_sym).lface;
            if lf == NIL || !self.f(lf).inside || rf == NIL || !self.f(rf).inside {
                e = e_next;
                continue;
            }

            let left_n = self.face_len(lf);
            let right_n = self.face_len(rf);
            if left_n + right_n - 2 > max_verts {
                e = e_next;
                continue;
            }

            // The merged corner at each endpoint must stay convex:
            //
            //      vf -- ve -- vd
            //            |
            //      va -- vb -- vc
            let va = self.e(self.lprev(e)).origin;
            let vb = self.e(e).origin;
            let vc = self.dst(self.oprev(e));
            let vd = self.e(self.lprev(e_sym)).origin;
            let ve = self.e(e_sym).origin;
            let vf = self.dst(self.e(e).lnext);

            let (vas, vat) = self.st(va);
            let (vbs, vbt) = self.st(vb);
            let (vcs, vct) = self.st(vc);
            let (vds, vdt) = self.st(vd);
            let (ves, vet) = self.st(ve);
            let (vfs, vft) = self.st(vf);

            if vert_ccw(vas, vat, vbs, vbt, vcs, vct) && vert_ccw(vds, vdt, ves, vet, vfs, vft) {
                if e == e_next || e == mirror(e_next) {
                    e_next = self.e(e_next).next;
                }
                self.delete_edge(e)?;
            }
            e = e_next;
        }
        Ok(())
    }

    /// Rotate an interior edge to the opposite diagonal of the
    /// quadrilateral formed by its two incident triangles.
    pub fn flip_edge(&mut self, edge: EdgeId) {
        let a0 = edge;
        let a1 = self.e(a0).lnext;
        let a2 = self.e(a1).lnext;
        let b0 = mirror(edge);
        let b1 = self.e(b0).lnext;
        let b2 = self.e(b1).lnext;

        debug_assert!(self.edge_is_internal(edge));
        debug_assert_eq!(self.e(a2).lnext, a0, "left face must be a triangle");
        debug_assert_eq!(self.e(b2).lnext, b0, "right face must be a triangle");

        let a_org = self.e(a0).origin;
        let a_opp = self.e(a2).origin;
        let b_org = self.e(b0).origin;
        let b_opp = self.e(b2).origin;

        let fa = self.e(a0).lface;
        let fb = self.e(b0).lface;

        self.e_mut(a0).origin = b_opp;
        self.e_mut(a0).onext = mirror(b1);
        self.e_mut(b0).origin = a_opp;
        self.e_mut(b0).onext = mirror(a1);
        self.e_mut(a2).onext = b0;
        self.e_mut(b2).onext = a0;
        self.e_mut(b1).onext = mirror(a2);
        self.e_mut(a1).onext = mirror(b2);

        self.e_mut(a0).lnext = a2;
        self.e_mut(a2).lnext = b1;
        self.e_mut(b1).lnext = a0;

        self.e_mut(b0).lnext = b2;
        self.e_mut(b2).lnext = a1;
        self.e_mut(a1).lnext = b0;

        self.e_mut(a1).lface = fb;
        self.e_mut(b1).lface = fa;

        self.f_mut(fa).edge = a0;
        self.f_mut(fb).edge = b0;

        if self.v(a_org).edge == a0 {
            self.v_mut(a_org).edge = b1;
        }
        if self.v(b_org).edge == b0 {
            self.v_mut(b_org).edge = a1;
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_is_an_involution() {
        for e in 0u32..32 {
            assert_eq!(mirror(mirror(e)), e);
        }
    }

    #[test]
    fn make_edge_builds_self_loop() {
        let mut m = Mesh::new();
        let e = m.make_edge().unwrap();
        assert_ne!(m.e(e).origin, m.e(mirror(e)).origin);
        assert_eq!(m.e(e).lnext, mirror(e));
        assert_eq!(m.e(e).onext, e);
        assert_eq!(m.e(e).lface, m.e(mirror(e)).lface);
        m.check();
    }

    #[test]
    fn splice_self_loop_makes_one_vertex_two_faces() {
        let mut m = Mesh::new();
        let e = m.make_edge().unwrap();
        // the contour-building step: close the edge onto itself
        m.splice(e, mirror(e)).unwrap();
        assert_eq!(m.e(e).origin, m.e(mirror(e)).origin);
        assert_ne!(m.e(e).lface, m.e(mirror(e)).lface);
        m.check();
    }

    #[test]
    fn split_edge_preserves_winding_and_topology() {
        let mut m = Mesh::new();
        let e = m.make_edge().unwrap();
        m.splice(e, mirror(e)).unwrap();
        m.e_mut(e).winding = 1;
        m.e_mut(mirror(e)).winding = -1;

        let e_new = m.split_edge(e).unwrap();
        assert_eq!(m.e(e).lnext, e_new);
        assert_eq!(m.dst(e), m.e(e_new).origin);
        assert_eq!(m.e(e_new).winding, 1);
        assert_eq!(m.e(mirror(e_new)).winding, -1);
        m.check();
    }

    #[test]
    fn contour_loop_has_matching_face_sizes() {
        // build a triangle the way add_contour does
        let mut m = Mesh::new();
        let mut e = m.make_edge().unwrap();
        m.splice(e, mirror(e)).unwrap();
        for _ in 0..2 {
            m.split_edge(e).unwrap();
            e = m.e(e).lnext;
        }
        m.check();
        let lf = m.e(e).lface;
        let rf = m.rface(e);
        assert_eq!(m.face_len(lf), 3);
        assert_eq!(m.face_len(rf), 3);
    }

    #[test]
    fn connect_splits_face() {
        let mut m = Mesh::new();
        let mut e = m.make_edge().unwrap();
        m.splice(e, mirror(e)).unwrap();
        for _ in 0..3 {
            m.split_edge(e).unwrap();
            e = m.e(e).lnext;
        }
        // quad; connect a diagonal
        let before_faces = {
            let mut n = 0;
            let mut f = m.f(F_HEAD).next;
            while f != F_HEAD {
                n += 1;
                f = m.f(f).next;
            }
            n
        };
        let diag = m.connect(m.e(e).lnext, e).unwrap();
        let after_faces = {
            let mut n = 0;
            let mut f = m.f(F_HEAD).next;
            while f != F_HEAD {
                n += 1;
                f = m.f(f).next;
            }
            n
        };
        assert_eq!(after_faces, before_faces + 1);
        assert_eq!(m.face_len(m.e(diag).lface), 3);
        m.check();
    }

    #[test]
    fn delete_edge_rejoins_faces() {
        let mut m = Mesh::new();
        let mut e = m.make_edge().unwrap();
        m.splice(e, mirror(e)).unwrap();
        for _ in 0..3 {
            m.split_edge(e).unwrap();
            e = m.e(e).lnext;
        }
        let lf = m.e(e).lface;
        let diag = m.connect(m.e(e).lnext, e).unwrap();
        m.delete_edge(diag).unwrap();
        assert_eq!(m.face_len(lf), 4);
        m.check();
    }

    #[test]
    fn flip_edge_swaps_diagonal() {
        // two triangles sharing a diagonal, built from a quad
        let mut m = Mesh::new();
        let mut e = m.make_edge().unwrap();
        m.splice(e, mirror(e)).unwrap();
        for _ in 0..3 {
            m.split_edge(e).unwrap();
            e = m.e(e).lnext;
        }
        let diag = m.connect(m.e(e).lnext, e).unwrap();
        // both sides of the diagonal must be "inside" for the flip
        let lf = m.e(diag).lface;
        let rf = m.rface(diag);
        m.f_mut(lf).inside = true;
        m.f_mut(rf).inside = true;

        let old_org = m.e(diag).origin;
        let old_dst = m.dst(diag);
        m.flip_edge(diag);
        assert_ne!(m.e(diag).origin, old_org);
        assert_ne!(m.dst(diag), old_dst);
        assert_eq!(m.face_len(m.e(diag).lface), 3);
        assert_eq!(m.face_len(m.rface(diag)), 3);
        m.check();
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut m = Mesh::new();
        m.make_edge().unwrap();
        assert!(!m.is_empty());
        m.clear();
        assert!(m.is_empty());
        m.check();
    }
}
