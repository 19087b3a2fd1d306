// polytess: plane-sweep polygon tessellation
// Licensed under the MIT license.

//! 3D contours: explicit and inferred projection planes.

mod helpers;

use polytess::{ElementType, Tessellator, WindingRule};

fn tessellate_3d(
    contour: &[f32],
    normal: Option<[f32; 3]>,
) -> Tessellator {
    helpers::init_logs();
    let mut tess = Tessellator::new();
    tess.add_contour(3, contour).unwrap();
    tess.tessellate(WindingRule::Odd, ElementType::Polygons, 3, 3, normal)
        .unwrap();
    helpers::verify_valid_output(&tess);
    tess
}

fn total_area_3d(tess: &Tessellator) -> f32 {
    let v = tess.vertices();
    tess.elements()
        .chunks(3)
        .map(|tri| {
            let p = |i: usize| [v[i * 3], v[i * 3 + 1], v[i * 3 + 2]];
            let (a, b, c) = (
                p(tri[0] as usize),
                p(tri[1] as usize),
                p(tri[2] as usize),
            );
            let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let w = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let cr = [
                u[1] * w[2] - u[2] * w[1],
                u[2] * w[0] - u[0] * w[2],
                u[0] * w[1] - u[1] * w[0],
            ];
            0.5 * (cr[0] * cr[0] + cr[1] * cr[1] + cr[2] * cr[2]).sqrt()
        })
        .sum()
}

#[test]
fn square_in_xz_plane() {
    // y is constant; the polygon lives in the xz plane
    let square: &[f32] = &[
        0.0, 2.0, 0.0, 10.0, 2.0, 0.0, 10.0, 2.0, 10.0, 0.0, 2.0, 10.0,
    ];
    let tess = tessellate_3d(square, None);
    assert_eq!(tess.element_count(), 2);
    assert!((total_area_3d(&tess) - 100.0).abs() < 1e-2);
    // output positions keep the plane's y
    for p in tess.vertices().chunks(3) {
        assert!((p[1] - 2.0).abs() < 1e-6);
    }
}

#[test]
fn explicit_normal_matches_inferred() {
    let square: &[f32] = &[
        0.0, 2.0, 0.0, 10.0, 2.0, 0.0, 10.0, 2.0, 10.0, 0.0, 2.0, 10.0,
    ];
    let inferred = tessellate_3d(square, None);
    let explicit = tessellate_3d(square, Some([0.0, -1.0, 0.0]));
    assert_eq!(inferred.element_count(), explicit.element_count());
    assert!((total_area_3d(&inferred) - total_area_3d(&explicit)).abs() < 1e-2);
}

#[test]
fn tilted_plane_hexagon() {
    // hexagon in the plane z = x
    let mut contour = Vec::new();
    let flat: &[(f32, f32)] = &[
        (0.0, 0.0),
        (4.0, -1.0),
        (8.0, 0.0),
        (8.0, 6.0),
        (4.0, 7.0),
        (0.0, 6.0),
    ];
    for &(x, y) in flat {
        contour.extend_from_slice(&[x, y, x]);
    }
    let tess = tessellate_3d(&contour, None);
    assert_eq!(tess.element_count(), 4);
    // every output vertex still satisfies z = x
    for p in tess.vertices().chunks(3) {
        assert!((p[2] - p[0]).abs() < 1e-4, "vertex off plane: {p:?}");
    }
}

#[test]
fn two_d_output_from_three_d_input() {
    // vertex_size 2 drops z from the output
    helpers::init_logs();
    let square: &[f32] = &[
        0.0, 0.0, 7.0, 10.0, 0.0, 7.0, 10.0, 10.0, 7.0, 0.0, 10.0, 7.0,
    ];
    let mut tess = Tessellator::new();
    tess.add_contour(3, square).unwrap();
    tess.tessellate(WindingRule::Odd, ElementType::Polygons, 3, 2, None)
        .unwrap();
    assert_eq!(tess.vertices().len(), tess.vertex_count() * 2);
    assert_eq!(tess.element_count(), 2);
}
