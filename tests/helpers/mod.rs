// polytess: plane-sweep polygon tessellation
// Licensed under the MIT license.

//! Shared utilities for the integration tests.

#![allow(dead_code)]

use polytess::{ElementType, Tessellator, WindingRule, INVALID_INDEX};

/// Initialize test logging once; `RUST_LOG=trace` shows sweep events.
pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Signed area of a 2D triangle.
pub fn triangle_area(x0: f32, y0: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    0.5 * ((x1 - x0) * (y2 - y0) - (x2 - x0) * (y1 - y0))
}

/// Triangles of a `Polygons`/`poly_size = 3` run, as index triples.
pub fn triangles(tess: &Tessellator) -> Vec<[usize; 3]> {
    tess.elements()
        .chunks(3)
        .map(|tri| [tri[0] as usize, tri[1] as usize, tri[2] as usize])
        .collect()
}

/// Sum of absolute triangle areas (2D output).
pub fn total_area(tess: &Tessellator) -> f32 {
    let verts = tess.vertices();
    triangles(tess)
        .iter()
        .map(|&[a, b, c]| {
            triangle_area(
                verts[a * 2],
                verts[a * 2 + 1],
                verts[b * 2],
                verts[b * 2 + 1],
                verts[c * 2],
                verts[c * 2 + 1],
            )
            .abs()
        })
        .sum()
}

pub fn assert_area(tess: &Tessellator, expected: f32, label: &str) {
    let area = total_area(tess);
    assert!(
        (area - expected).abs() < 1e-2 * expected.abs().max(1.0),
        "{label}: expected area {expected}, got {area}"
    );
}

/// Every triangle of the output winds counter-clockwise.
pub fn assert_ccw_triangles(tess: &Tessellator) {
    let verts = tess.vertices();
    for (i, [a, b, c]) in triangles(tess).into_iter().enumerate() {
        let area = triangle_area(
            verts[a * 2],
            verts[a * 2 + 1],
            verts[b * 2],
            verts[b * 2 + 1],
            verts[c * 2],
            verts[c * 2 + 1],
        );
        assert!(area > 0.0, "triangle {i} is not CCW (area {area})");
    }
}

/// Structural validity: finite positions, element indices in range.
pub fn verify_valid_output(tess: &Tessellator) {
    for (i, &v) in tess.vertices().iter().enumerate() {
        assert!(v.is_finite(), "vertex component [{i}] = {v} not finite");
    }
    let n = tess.vertex_count();
    for (i, &idx) in tess.elements().iter().enumerate() {
        if idx == INVALID_INDEX {
            continue; // padding for faces below poly_size
        }
        assert!(
            (idx as usize) < n,
            "element[{i}] = {idx} out of range (vertex_count = {n})"
        );
    }
    for &idx in tess.vertex_indices() {
        // indices refer back to input insertion order or are synthesized
        assert!(idx == INVALID_INDEX || (idx as usize) < 1 << 24);
    }
}

/// Tessellate a set of 2D contours as triangles.
pub fn tessellate(contours: &[&[f32]], rule: WindingRule) -> Tessellator {
    init_logs();
    let mut tess = Tessellator::new();
    for contour in contours {
        tess.add_contour(2, contour).expect("add_contour failed");
    }
    tess.tessellate(rule, ElementType::Polygons, 3, 2, None)
        .expect("tessellate failed");
    verify_valid_output(&tess);
    tess
}

/// Boundary extraction for a set of 2D contours.
pub fn boundary(contours: &[&[f32]], rule: WindingRule) -> Tessellator {
    init_logs();
    let mut tess = Tessellator::new();
    for contour in contours {
        tess.add_contour(2, contour).expect("add_contour failed");
    }
    tess.tessellate(rule, ElementType::BoundaryContours, 3, 2, None)
        .expect("tessellate failed");
    verify_valid_output(&tess);
    tess
}
