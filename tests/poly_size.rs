// polytess: plane-sweep polygon tessellation
// Licensed under the MIT license.

//! Larger output polygons and face-connectivity output.

mod helpers;

use polytess::{ElementType, Tessellator, WindingRule, INVALID_INDEX};

fn tessellate_poly(
    contour: &[f32],
    element_type: ElementType,
    poly_size: usize,
) -> Tessellator {
    helpers::init_logs();
    let mut tess = Tessellator::new();
    tess.add_contour(2, contour).unwrap();
    tess.tessellate(WindingRule::Odd, element_type, poly_size, 2, None)
        .unwrap();
    helpers::verify_valid_output(&tess);
    tess
}

const SQUARE: &[f32] = &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0];

#[test]
fn square_merges_into_one_quad() {
    let tess = tessellate_poly(SQUARE, ElementType::Polygons, 4);
    assert_eq!(tess.element_count(), 1);
    assert_eq!(tess.elements().len(), 4);
    assert!(tess.elements().iter().all(|&i| i != INVALID_INDEX));
}

#[test]
fn convex_pentagon_fits_in_poly_size_five() {
    let pentagon: &[f32] = &[0.0, 0.0, 10.0, -2.0, 13.0, 5.0, 6.0, 11.0, -1.0, 6.0];
    let tess = tessellate_poly(pentagon, ElementType::Polygons, 5);
    assert_eq!(tess.element_count(), 1);
    assert_eq!(tess.elements().len(), 5);
}

#[test]
fn concave_polygon_cannot_merge_past_reflex_vertex() {
    // an L-shape: merging across the reflex corner would go non-convex
    let ell: &[f32] = &[
        0.0, 0.0, 10.0, 0.0, 10.0, 4.0, 4.0, 4.0, 4.0, 10.0, 0.0, 10.0,
    ];
    let tess = tessellate_poly(ell, ElementType::Polygons, 6);
    // more than one face is required no matter how large poly_size is
    assert!(tess.element_count() >= 2);
    // total area unchanged by merging
    let verts = tess.vertices();
    let mut area = 0.0;
    for face in tess.elements().chunks(6) {
        let ids: Vec<usize> = face
            .iter()
            .take_while(|&&i| i != INVALID_INDEX)
            .map(|&i| i as usize)
            .collect();
        for k in 1..ids.len() - 1 {
            area += helpers::triangle_area(
                verts[ids[0] * 2],
                verts[ids[0] * 2 + 1],
                verts[ids[k] * 2],
                verts[ids[k] * 2 + 1],
                verts[ids[k + 1] * 2],
                verts[ids[k + 1] * 2 + 1],
            );
        }
    }
    assert!((area - 76.0).abs() < 0.5, "L-shape area, got {area}");
}

#[test]
fn padding_uses_invalid_index() {
    // poly_size 4 on a shape that keeps at least one triangle
    let ell: &[f32] = &[
        0.0, 0.0, 10.0, 0.0, 10.0, 4.0, 4.0, 4.0, 4.0, 10.0, 0.0, 10.0,
    ];
    let tess = tessellate_poly(ell, ElementType::Polygons, 4);
    assert_eq!(tess.elements().len(), tess.element_count() * 4);
    for face in tess.elements().chunks(4) {
        // padding is only ever at the tail of a record
        let mut seen_pad = false;
        for &slot in face {
            if slot == INVALID_INDEX {
                seen_pad = true;
            } else {
                assert!(!seen_pad, "vertex slot after padding");
            }
        }
    }
}

#[test]
fn connected_polygons_report_neighbors() {
    let tess = tessellate_poly(SQUARE, ElementType::ConnectedPolygons, 3);
    assert_eq!(tess.element_count(), 2);
    // each record: 3 vertex slots then 3 neighbor slots
    assert_eq!(tess.elements().len(), 2 * 6);
    for (f, rec) in tess.elements().chunks(6).enumerate() {
        let neighbors: Vec<u32> = rec[3..].to_vec();
        let internal: Vec<&u32> =
            neighbors.iter().filter(|&&n| n != INVALID_INDEX).collect();
        // the two triangles share exactly one edge
        assert_eq!(internal.len(), 1, "face {f} neighbors: {neighbors:?}");
        assert_eq!(*internal[0], (1 - f) as u32);
    }
}

#[test]
fn annulus_with_poly_size_four_covers_same_area() {
    let outer: &[f32] = &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0];
    let hole: &[f32] = &[3.0, 3.0, 3.0, 7.0, 7.0, 7.0, 7.0, 3.0];
    helpers::init_logs();
    let mut tess = Tessellator::new();
    tess.add_contour(2, outer).unwrap();
    tess.add_contour(2, hole).unwrap();
    tess.tessellate(WindingRule::Odd, ElementType::Polygons, 4, 2, None)
        .unwrap();
    helpers::verify_valid_output(&tess);

    let verts = tess.vertices();
    let mut area = 0.0;
    for face in tess.elements().chunks(4) {
        let ids: Vec<usize> = face
            .iter()
            .take_while(|&&i| i != INVALID_INDEX)
            .map(|&i| i as usize)
            .collect();
        for k in 1..ids.len() - 1 {
            area += helpers::triangle_area(
                verts[ids[0] * 2],
                verts[ids[0] * 2 + 1],
                verts[ids[k] * 2],
                verts[ids[k] * 2 + 1],
                verts[ids[k + 1] * 2],
                verts[ids[k + 1] * 2 + 1],
            )
            .abs();
        }
    }
    assert!((area - 84.0).abs() < 0.5, "annulus area, got {area}");
}
