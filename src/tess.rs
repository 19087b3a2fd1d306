// polytess: plane-sweep polygon tessellation
// Licensed under the MIT license.

//! Tessellator façade: contour ingestion, projection, pipeline
//! orchestration, and output assembly.

use crate::geom::Real;
use crate::mesh::{mirror, Mesh, F_HEAD, V_HEAD};
use crate::pool::NIL;
use crate::sweep::Sweep;
use crate::{Index, TessError, INVALID_INDEX};

/// Decides which winding numbers count as interior.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WindingRule {
    Odd,
    NonZero,
    Positive,
    Negative,
    AbsGeqTwo,
}

impl WindingRule {
    #[inline]
    pub fn is_inside(self, n: i32) -> bool {
        match self {
            WindingRule::Odd => n & 1 != 0,
            WindingRule::NonZero => n != 0,
            WindingRule::Positive => n > 0,
            WindingRule::Negative => n < 0,
            WindingRule::AbsGeqTwo => !(-2..2).contains(&n),
        }
    }
}

/// Output form of a tessellation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementType {
    /// Faces of up to `poly_size` vertices; `poly_size == 3` emits plain
    /// triangles.
    Polygons,
    /// Like `Polygons`, with each face record followed by the neighbor
    /// face per edge (`INVALID_INDEX` against the exterior).
    ConnectedPolygons,
    /// The boundary rings separating interior from exterior, as segment
    /// index pairs.
    BoundaryContours,
}

/// Behavior toggles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TessOption {
    /// Refine the triangulation toward a constrained Delaunay
    /// triangulation after the monotone pass.
    ConstrainedDelaunayTriangulation,
    /// Treat CW contours as CCW and vice versa.
    ReverseContours,
}

/// Coordinates beyond this magnitude lose too much precision in the
/// predicates to sweep reliably.
const MAX_COORD: Real = (1u32 << 23) as Real;

fn coord_ok(c: Real) -> bool {
    c.is_finite() && (-MAX_COORD..=MAX_COORD).contains(&c)
}

fn dot(u: &[Real; 3], v: &[Real; 3]) -> Real {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}

fn long_axis(v: &[Real; 3]) -> usize {
    let mut i = 0;
    if v[1].abs() > v[0].abs() {
        i = 1;
    }
    if v[2].abs() > v[i].abs() {
        i = 2;
    }
    i
}

fn short_axis(v: &[Real; 3]) -> usize {
    let mut i = 0;
    if v[1].abs() < v[0].abs() {
        i = 1;
    }
    if v[2].abs() < v[i].abs() {
        i = 2;
    }
    i
}

/// Polygon tessellator.
///
/// Feed closed contours with [`add_contour`](Self::add_contour), then call
/// [`tessellate`](Self::tessellate). The output arrays are owned by the
/// tessellator and reused across calls; `tessellate` consumes the
/// accumulated contours, so each run starts with fresh `add_contour`
/// calls (or [`init`](Self::init)).
pub struct Tessellator {
    mesh: Mesh,
    bmin: [Real; 2],
    bmax: [Real; 2],
    process_cdt: bool,
    reverse_contours: bool,
    vertex_index_counter: Index,

    out_vertices: Vec<Real>,
    out_indices: Vec<Index>,
    out_elements: Vec<Index>,
    out_vertex_count: usize,
    out_element_count: usize,
}

impl Tessellator {
    pub fn new() -> Self {
        Tessellator {
            mesh: Mesh::new(),
            bmin: [0.0; 2],
            bmax: [0.0; 2],
            process_cdt: false,
            reverse_contours: false,
            vertex_index_counter: 0,
            out_vertices: Vec::new(),
            out_indices: Vec::new(),
            out_elements: Vec::new(),
            out_vertex_count: 0,
            out_element_count: 0,
        }
    }

    /// Drop all contours and outputs. Handles from previous runs become
    /// invalid; the arenas themselves are retained for reuse.
    pub fn init(&mut self) {
        self.mesh.clear();
        self.vertex_index_counter = 0;
        self.clear_output();
    }

    pub fn set_option(&mut self, option: TessOption, value: bool) {
        match option {
            TessOption::ConstrainedDelaunayTriangulation => self.process_cdt = value,
            TessOption::ReverseContours => self.reverse_contours = value,
        }
    }

    fn clear_output(&mut self) {
        self.out_vertices.clear();
        self.out_indices.clear();
        self.out_elements.clear();
        self.out_vertex_count = 0;
        self.out_element_count = 0;
    }

    /// Append one closed contour. `size` is the number of coordinates per
    /// vertex (2 or 3) and `points` a flat coordinate array. A CCW contour
    /// adds +1 to the winding of the region it encloses (swapped by
    /// [`TessOption::ReverseContours`]). Contours that collapse to fewer
    /// than three distinct vertices are dropped later by the sweep.
    pub fn add_contour(&mut self, size: usize, points: &[Real]) -> Result<(), TessError> {
        let size = size.clamp(2, 3);
        if points.len() < size {
            return Err(TessError::InvalidContour);
        }
        if points.iter().any(|&c| !coord_ok(c)) {
            log::warn!("add_contour: coordinate out of range");
            return Err(TessError::InvalidContour);
        }

        let count = points.len() / size;
        let winding = if self.reverse_contours { -1 } else { 1 };
        let mut e = NIL;
        for i in 0..count {
            if e == NIL {
                // a self-loop holding the first vertex
                e = self.mesh.make_edge()?;
                self.mesh.splice(e, mirror(e))?;
            } else {
                // grow the loop: new vertex and edge after e
                self.mesh.split_edge(e)?;
                e = self.mesh.e(e).lnext;
            }

            let x = points[i * size];
            let y = points[i * size + 1];
            let z = if size > 2 { points[i * size + 2] } else { 0.0 };
            let org = self.mesh.e(e).origin;
            {
                let v = self.mesh.v_mut(org);
                v.coords = [x, y, z];
                // insertion number, so outputs can refer back to inputs
                v.idx = self.vertex_index_counter;
            }
            self.vertex_index_counter += 1;

            self.mesh.e_mut(e).winding = winding;
            self.mesh.e_mut(mirror(e)).winding = -winding;
        }
        Ok(())
    }

    /// Tessellate the accumulated contours.
    ///
    /// `poly_size` caps output face size (3 = triangles; larger values
    /// merge convex faces). `vertex_size` selects 2D or 3D output
    /// positions. A `normal` forces the sweep projection plane; otherwise
    /// it is inferred. On failure the mesh is cleared and the outputs are
    /// empty; the tessellator remains usable.
    pub fn tessellate(
        &mut self,
        rule: WindingRule,
        element_type: ElementType,
        poly_size: usize,
        vertex_size: usize,
        normal: Option<[Real; 3]>,
    ) -> Result<(), TessError> {
        self.clear_output();
        let poly_size = poly_size.max(3);
        let vertex_size = vertex_size.clamp(2, 3);

        if self.mesh.is_empty() {
            log::warn!("tessellate: no contours");
            return Err(TessError::InvalidContour);
        }

        self.project_polygon(normal);

        let result = self.run_pipeline(rule, element_type, poly_size, vertex_size);
        self.mesh.clear();
        if let Err(err) = result {
            log::warn!("tessellate failed: {err}");
            self.clear_output();
            return Err(err);
        }
        log::debug!(
            "tessellate: {} vertices, {} elements",
            self.out_vertex_count,
            self.out_element_count
        );
        Ok(())
    }

    fn run_pipeline(
        &mut self,
        rule: WindingRule,
        element_type: ElementType,
        poly_size: usize,
        vertex_size: usize,
    ) -> Result<(), TessError> {
        // Compute the planar arrangement and mark each region inside or
        // outside; afterwards every interior region is monotone.
        Sweep::run(&mut self.mesh, rule, self.bmin, self.bmax)?;

        if element_type == ElementType::BoundaryContours {
            // keep only the edges separating interior from exterior
            self.mesh.set_winding_number(1, true)?;
        } else {
            self.mesh.tessellate_interior()?;
            if self.process_cdt {
                self.mesh.refine_delaunay();
            }
        }

        #[cfg(debug_assertions)]
        self.mesh.check();

        match element_type {
            ElementType::BoundaryContours => self.output_boundary(vertex_size),
            _ => self.output_polygons(element_type, poly_size, vertex_size)?,
        }
        Ok(())
    }

    // ---- projection ----------------------------------------------------

    /// Choose the sweep plane and fill in every vertex's `(s, t)`.
    ///
    /// An explicit normal is honored as given. Pure-2D input maps directly
    /// to `s = y`, `t = x`. Otherwise the normal is inferred from three
    /// extreme vertices maximizing triangle area. Whenever the normal was
    /// inferred, the signed-area sum decides orientation and a negative
    /// total flips the t axis, so the interior always winds positively.
    fn project_polygon(&mut self, normal: Option<[Real; 3]>) {
        let mut computed = false;
        match normal {
            Some(n) => self.project_axis(&n),
            None => {
                let mut flat = true;
                let mut v = self.mesh.v(V_HEAD).next;
                while v != V_HEAD {
                    if self.mesh.v(v).coords[2] != 0.0 {
                        flat = false;
                        break;
                    }
                    v = self.mesh.v(v).next;
                }
                if flat {
                    let mut v = self.mesh.v(V_HEAD).next;
                    while v != V_HEAD {
                        let [x, y, _] = self.mesh.v(v).coords;
                        let vv = self.mesh.v_mut(v);
                        vv.s = y;
                        vv.t = x;
                        v = vv.next;
                    }
                } else {
                    let n = self.compute_normal();
                    self.project_axis(&n);
                }
                computed = true;
            }
        }
        if computed {
            self.check_orientation();
        }

        let mut first = true;
        let mut v = self.mesh.v(V_HEAD).next;
        while v != V_HEAD {
            let (s, t) = self.mesh.st(v);
            if first {
                self.bmin = [s, t];
                self.bmax = [s, t];
                first = false;
            } else {
                self.bmin[0] = self.bmin[0].min(s);
                self.bmin[1] = self.bmin[1].min(t);
                self.bmax[0] = self.bmax[0].max(s);
                self.bmax[1] = self.bmax[1].max(t);
            }
            v = self.mesh.v(v).next;
        }
    }

    /// Project perpendicular to the normal's dominant axis. Numerically
    /// better than a true projection onto the normal plane.
    fn project_axis(&mut self, norm: &[Real; 3]) {
        let i = long_axis(norm);
        let mut s_unit = [0.0; 3];
        let mut t_unit = [0.0; 3];
        s_unit[(i + 1) % 3] = 1.0;
        t_unit[(i + 2) % 3] = if norm[i] > 0.0 { 1.0 } else { -1.0 };

        let mut v = self.mesh.v(V_HEAD).next;
        while v != V_HEAD {
            let c = self.mesh.v(v).coords;
            let vv = self.mesh.v_mut(v);
            vv.s = dot(&c, &s_unit);
            vv.t = dot(&c, &t_unit);
            v = vv.next;
        }
    }

    /// Infer a plane normal: take the axis with the largest coordinate
    /// spread, the two extreme vertices on it, and the third vertex
    /// maximizing the cross-product area with them.
    fn compute_normal(&self) -> [Real; 3] {
        let m = &self.mesh;
        let first = m.v(V_HEAD).next;
        if first == V_HEAD {
            return [0.0, 0.0, 1.0];
        }

        let mut min_val = m.v(first).coords;
        let mut max_val = min_val;
        let mut min_vert = [first; 3];
        let mut max_vert = [first; 3];

        let mut v = first;
        while v != V_HEAD {
            let c = m.v(v).coords;
            for i in 0..3 {
                if c[i] < min_val[i] {
                    min_val[i] = c[i];
                    min_vert[i] = v;
                }
                if c[i] > max_val[i] {
                    max_val[i] = c[i];
                    max_vert[i] = v;
                }
            }
            v = m.v(v).next;
        }

        let mut i = 0;
        if max_val[1] - min_val[1] > max_val[0] - min_val[0] {
            i = 1;
        }
        if max_val[2] - min_val[2] > max_val[i] - min_val[i] {
            i = 2;
        }
        if min_val[i] >= max_val[i] {
            // all points coincide
            return [0.0, 0.0, 1.0];
        }

        let c1 = m.v(min_vert[i]).coords;
        let c2 = m.v(max_vert[i]).coords;
        let d1 = [c1[0] - c2[0], c1[1] - c2[1], c1[2] - c2[2]];

        let mut norm = [0.0; 3];
        let mut max_len2 = 0.0;
        let mut v = first;
        while v != V_HEAD {
            let c = m.v(v).coords;
            let d2 = [c[0] - c2[0], c[1] - c2[1], c[2] - c2[2]];
            let tn = [
                d1[1] * d2[2] - d1[2] * d2[1],
                d1[2] * d2[0] - d1[0] * d2[2],
                d1[0] * d2[1] - d1[1] * d2[0],
            ];
            let tl2 = tn[0] * tn[0] + tn[1] * tn[1] + tn[2] * tn[2];
            if tl2 > max_len2 {
                max_len2 = tl2;
                norm = tn;
            }
            v = m.v(v).next;
        }

        if max_len2 <= 0.0 {
            // collinear input; any perpendicular will do
            norm = [0.0, 0.0, 0.0];
            norm[short_axis(&d1)] = 1.0;
        }
        norm
    }

    /// Sum the signed area of the contour loops (the faces left of the
    /// positively-wound half-edges); a negative total means the projection
    /// mirrored the input, so flip t.
    fn check_orientation(&mut self) {
        let mut area = 0.0;
        let mut f = self.mesh.f(F_HEAD).next;
        while f != F_HEAD {
            let start = self.mesh.f(f).edge;
            if start != NIL && self.mesh.e(start).winding > 0 {
                let mut e = start;
                loop {
                    let (os, ot) = self.mesh.st(self.mesh.e(e).origin);
                    let (ds, dt) = self.mesh.st(self.mesh.dst(e));
                    area += (os - ds) * (ot + dt);
                    e = self.mesh.e(e).lnext;
                    if e == start {
                        break;
                    }
                }
            }
            f = self.mesh.f(f).next;
        }
        if area < 0.0 {
            let mut v = self.mesh.v(V_HEAD).next;
            while v != V_HEAD {
                let vv = self.mesh.v_mut(v);
                vv.t = -vv.t;
                v = vv.next;
            }
        }
    }

    // ---- output assembly -----------------------------------------------

    fn output_polygons(
        &mut self,
        element_type: ElementType,
        poly_size: usize,
        vertex_size: usize,
    ) -> Result<(), TessError> {
        if poly_size > 3 {
            self.mesh.merge_convex_faces(poly_size)?;
        }

        // number the vertices and faces used by interior faces, in sweep
        // emission order
        let mut v = self.mesh.v(V_HEAD).next;
        while v != V_HEAD {
            self.mesh.v_mut(v).n = INVALID_INDEX;
            v = self.mesh.v(v).next;
        }

        let mut n_verts: Index = 0;
        let mut n_faces: Index = 0;
        let mut f = self.mesh.f(F_HEAD).next;
        while f != F_HEAD {
            self.mesh.f_mut(f).n = INVALID_INDEX;
            if self.mesh.f(f).inside {
                let start = self.mesh.f(f).edge;
                let mut e = start;
                loop {
                    let org = self.mesh.e(e).origin;
                    if self.mesh.v(org).n == INVALID_INDEX {
                        self.mesh.v_mut(org).n = n_verts;
                        n_verts += 1;
                    }
                    e = self.mesh.e(e).lnext;
                    if e == start {
                        break;
                    }
                }
                self.mesh.f_mut(f).n = n_faces;
                n_faces += 1;
            }
            f = self.mesh.f(f).next;
        }

        self.out_vertex_count = n_verts as usize;
        self.out_element_count = n_faces as usize;
        let stride = if element_type == ElementType::ConnectedPolygons {
            poly_size * 2
        } else {
            poly_size
        };
        self.out_vertices = vec![0.0; n_verts as usize * vertex_size];
        self.out_indices = vec![INVALID_INDEX; n_verts as usize];
        self.out_elements = vec![INVALID_INDEX; n_faces as usize * stride];

        let mut v = self.mesh.v(V_HEAD).next;
        while v != V_HEAD {
            let n = self.mesh.v(v).n;
            if n != INVALID_INDEX {
                let c = self.mesh.v(v).coords;
                let base = n as usize * vertex_size;
                self.out_vertices[base] = c[0];
                self.out_vertices[base + 1] = c[1];
                if vertex_size > 2 {
                    self.out_vertices[base + 2] = c[2];
                }
                self.out_indices[n as usize] = self.mesh.v(v).idx;
            }
            v = self.mesh.v(v).next;
        }

        let mut ep = 0;
        let mut f = self.mesh.f(F_HEAD).next;
        while f != F_HEAD {
            if self.mesh.f(f).inside {
                let start = self.mesh.f(f).edge;
                let mut e = start;
                let mut face_verts = 0;
                loop {
                    let org = self.mesh.e(e).origin;
                    self.out_elements[ep] = self.mesh.v(org).n;
                    ep += 1;
                    face_verts += 1;
                    e = self.mesh.e(e).lnext;
                    if e == start {
                        break;
                    }
                }
                debug_assert!(face_verts <= poly_size);
                ep += poly_size - face_verts;

                if element_type == ElementType::ConnectedPolygons {
                    let mut e = start;
                    let mut fv = 0;
                    loop {
                        let rf = self.mesh.rface(e);
                        self.out_elements[ep] = if rf != NIL && self.mesh.f(rf).inside {
                            self.mesh.f(rf).n
                        } else {
                            INVALID_INDEX
                        };
                        ep += 1;
                        fv += 1;
                        e = self.mesh.e(e).lnext;
                        if e == start {
                            break;
                        }
                    }
                    ep += poly_size - fv;
                }
            }
            f = self.mesh.f(f).next;
        }
        Ok(())
    }

    /// Emit each interior face's boundary ring as segment index pairs,
    /// the last segment wrapping back to the ring's first vertex.
    fn output_boundary(&mut self, vertex_size: usize) {
        let mut total_verts = 0usize;
        let mut rings = 0usize;
        let mut f = self.mesh.f(F_HEAD).next;
        while f != F_HEAD {
            if self.mesh.f(f).inside {
                total_verts += self.mesh.face_len(f);
                rings += 1;
            }
            f = self.mesh.f(f).next;
        }

        self.out_vertex_count = total_verts;
        self.out_element_count = rings;
        self.out_vertices = Vec::with_capacity(total_verts * vertex_size);
        self.out_indices = Vec::with_capacity(total_verts);
        self.out_elements = Vec::with_capacity(total_verts * 2);

        let mut vp: Index = 0;
        let mut f = self.mesh.f(F_HEAD).next;
        while f != F_HEAD {
            if self.mesh.f(f).inside {
                let first = vp;
                let start = self.mesh.f(f).edge;
                let mut e = start;
                loop {
                    let org = self.mesh.e(e).origin;
                    let c = self.mesh.v(org).coords;
                    self.out_vertices.push(c[0]);
                    self.out_vertices.push(c[1]);
                    if vertex_size > 2 {
                        self.out_vertices.push(c[2]);
                    }
                    self.out_indices.push(self.mesh.v(org).idx);
                    self.out_elements.push(vp);
                    self.out_elements.push(vp + 1);
                    vp += 1;
                    e = self.mesh.e(e).lnext;
                    if e == start {
                        break;
                    }
                }
                // wrap the ring's final segment
                let last = self.out_elements.len() - 1;
                self.out_elements[last] = first;
            }
            f = self.mesh.f(f).next;
        }
    }

    // ---- accessors -----------------------------------------------------

    /// Flat output positions, `vertex_size` coordinates per vertex.
    pub fn vertices(&self) -> &[Real] {
        &self.out_vertices
    }

    /// Input-sequence index of each output vertex; `INVALID_INDEX` for
    /// vertices synthesized at intersections.
    pub fn vertex_indices(&self) -> &[Index] {
        &self.out_indices
    }

    /// Face vertex indices (padded with `INVALID_INDEX` to `poly_size`),
    /// or segment endpoint pairs for boundary output.
    pub fn elements(&self) -> &[Index] {
        &self.out_elements
    }

    pub fn vertex_count(&self) -> usize {
        self.out_vertex_count
    }

    pub fn element_count(&self) -> usize {
        self.out_element_count
    }
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winding_rule_predicates() {
        assert!(WindingRule::Odd.is_inside(1));
        assert!(!WindingRule::Odd.is_inside(2));
        assert!(WindingRule::NonZero.is_inside(-1));
        assert!(!WindingRule::NonZero.is_inside(0));
        assert!(WindingRule::Positive.is_inside(1));
        assert!(!WindingRule::Positive.is_inside(-1));
        assert!(WindingRule::Negative.is_inside(-1));
        assert!(!WindingRule::Negative.is_inside(1));
        assert!(WindingRule::AbsGeqTwo.is_inside(2));
        assert!(WindingRule::AbsGeqTwo.is_inside(-2));
        assert!(!WindingRule::AbsGeqTwo.is_inside(1));
    }

    #[test]
    fn square_yields_two_triangles() {
        let mut tess = Tessellator::new();
        tess.add_contour(2, &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0])
            .unwrap();
        tess.tessellate(WindingRule::Odd, ElementType::Polygons, 3, 2, None)
            .unwrap();
        assert_eq!(tess.element_count(), 2);
        assert_eq!(tess.vertex_count(), 4);
        assert_eq!(tess.elements().len(), 6);
    }

    #[test]
    fn empty_contour_is_rejected() {
        let mut tess = Tessellator::new();
        assert_eq!(tess.add_contour(2, &[]), Err(TessError::InvalidContour));
    }

    #[test]
    fn tessellate_without_contours_is_rejected() {
        let mut tess = Tessellator::new();
        let r = tess.tessellate(WindingRule::Odd, ElementType::Polygons, 3, 2, None);
        assert_eq!(r, Err(TessError::InvalidContour));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let mut tess = Tessellator::new();
        let r = tess.add_contour(2, &[-2e30, 0.0, 0.0, 5.0, 1e30, -5.0]);
        assert_eq!(r, Err(TessError::InvalidContour));
    }

    #[test]
    fn nan_coordinates_are_rejected() {
        let mut tess = Tessellator::new();
        let nan = f32::NAN;
        let r = tess.add_contour(2, &[nan, nan, nan, nan, nan, nan]);
        assert_eq!(r, Err(TessError::InvalidContour));
    }

    #[test]
    fn all_coincident_points_give_empty_output() {
        let mut tess = Tessellator::new();
        tess.add_contour(2, &[0.0; 8]).unwrap();
        let r = tess.tessellate(WindingRule::Positive, ElementType::Polygons, 3, 2, None);
        if r.is_ok() {
            assert_eq!(tess.element_count(), 0);
        }
    }

    #[test]
    fn tessellator_survives_failure() {
        let mut tess = Tessellator::new();
        let _ = tess.tessellate(WindingRule::Odd, ElementType::Polygons, 3, 2, None);
        // still usable afterwards
        tess.add_contour(2, &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0])
            .unwrap();
        tess.tessellate(WindingRule::Odd, ElementType::Polygons, 3, 2, None)
            .unwrap();
        assert_eq!(tess.element_count(), 2);
    }

    #[test]
    fn init_discards_pending_contours() {
        let mut tess = Tessellator::new();
        tess.add_contour(2, &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0]).unwrap();
        tess.init();
        let r = tess.tessellate(WindingRule::Odd, ElementType::Polygons, 3, 2, None);
        assert_eq!(r, Err(TessError::InvalidContour));
    }

    #[test]
    fn reverse_contours_flips_winding_sign() {
        // An explicit normal pins the projection: with an inferred normal
        // the orientation check re-flips the plane and cancels the option.
        let square = &[0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0];
        let up = Some([0.0, 0.0, 1.0]);

        let mut plain = Tessellator::new();
        plain.add_contour(2, square).unwrap();
        plain
            .tessellate(WindingRule::Positive, ElementType::Polygons, 3, 2, up)
            .unwrap();
        assert!(plain.element_count() > 0);

        let mut reversed = Tessellator::new();
        reversed.set_option(TessOption::ReverseContours, true);
        reversed.add_contour(2, square).unwrap();
        reversed
            .tessellate(WindingRule::Negative, ElementType::Polygons, 3, 2, up)
            .unwrap();
        assert!(reversed.element_count() > 0);

        let mut reversed_pos = Tessellator::new();
        reversed_pos.set_option(TessOption::ReverseContours, true);
        reversed_pos.add_contour(2, square).unwrap();
        reversed_pos
            .tessellate(WindingRule::Positive, ElementType::Polygons, 3, 2, up)
            .unwrap();
        assert_eq!(reversed_pos.element_count(), 0);
    }
}
