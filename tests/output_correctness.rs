// polytess: plane-sweep polygon tessellation
// Licensed under the MIT license.

//! End-to-end output checks on literal inputs.

mod helpers;

use polytess::{ElementType, Tessellator, WindingRule, INVALID_INDEX};

const SQUARE: &[f32] = &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0];

#[test]
fn ccw_square_two_triangles() {
    let tess = helpers::tessellate(&[SQUARE], WindingRule::Odd);
    assert_eq!(tess.element_count(), 2);
    assert_eq!(tess.vertex_count(), 4);
    helpers::assert_area(&tess, 100.0, "unit square");
    helpers::assert_ccw_triangles(&tess);
}

#[test]
fn square_round_trip_under_filling_rules() {
    // a lone CCW square is interior under odd, nonzero and positive
    for rule in [WindingRule::Odd, WindingRule::NonZero, WindingRule::Positive] {
        let tess = helpers::tessellate(&[SQUARE], rule);
        assert_eq!(tess.element_count(), 2, "{rule:?}");
        helpers::assert_area(&tess, 100.0, "square under filling rule");
        helpers::assert_ccw_triangles(&tess);
    }
    // and empty under the rules that need winding beyond 1
    for rule in [WindingRule::Negative, WindingRule::AbsGeqTwo] {
        let tess = helpers::tessellate(&[SQUARE], rule);
        assert_eq!(tess.element_count(), 0, "{rule:?}");
    }
}

#[test]
fn bowtie_splits_at_intersection() {
    // self-intersecting contour; the crossing point is synthesized
    let bowtie: &[f32] = &[0.0, 0.0, 10.0, 10.0, 10.0, 0.0, 0.0, 10.0];
    let tess = helpers::tessellate(&[bowtie], WindingRule::Odd);

    assert_eq!(tess.element_count(), 2);
    helpers::assert_area(&tess, 50.0, "bowtie");
    helpers::assert_ccw_triangles(&tess);

    // exactly one output vertex carries no input index: the intersection
    let synth: Vec<usize> = tess
        .vertex_indices()
        .iter()
        .enumerate()
        .filter(|(_, &idx)| idx == INVALID_INDEX)
        .map(|(k, _)| k)
        .collect();
    assert_eq!(synth.len(), 1, "expected one synthesized vertex");
    let k = synth[0];
    let (x, y) = (tess.vertices()[k * 2], tess.vertices()[k * 2 + 1]);
    assert!((x - 5.0).abs() < 1e-3 && (y - 5.0).abs() < 1e-3);
}

#[test]
fn pentagon_with_sweep_aligned_edge() {
    // three collinear vertices along the top edge; two consecutive pairs
    // share a sweep coordinate
    let pentagon: &[f32] = &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 5.0, 10.0, 0.0, 10.0];
    let tess = helpers::tessellate(&[pentagon], WindingRule::Odd);
    assert_eq!(tess.element_count(), 3);
    helpers::assert_area(&tess, 100.0, "pentagon");
    helpers::assert_ccw_triangles(&tess);
}

#[test]
fn every_input_vertex_is_conserved() {
    let pentagon: &[f32] = &[0.0, 0.0, 10.0, -2.0, 13.0, 5.0, 6.0, 11.0, -1.0, 6.0];
    let tess = helpers::tessellate(&[pentagon], WindingRule::Odd);
    for want in 0..5u32 {
        assert!(
            tess.vertex_indices().contains(&want),
            "input vertex {want} missing from output"
        );
    }
}

#[test]
fn duplicate_input_points_collapse() {
    // consecutive duplicates are removed as zero-length edges
    let square_dup: &[f32] = &[
        0.0, 0.0, 0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0, 10.0,
    ];
    let tess = helpers::tessellate(&[square_dup], WindingRule::Odd);
    assert_eq!(tess.element_count(), 2);
    assert_eq!(tess.vertex_count(), 4);
    helpers::assert_area(&tess, 100.0, "square with duplicates");
}

#[test]
fn tessellation_is_deterministic() {
    let star: &[f32] = &[
        350.0, 75.0, 379.0, 161.0, 469.0, 161.0, 397.0, 215.0, 423.0, 301.0, 350.0, 250.0, 277.0,
        301.0, 303.0, 215.0, 231.0, 161.0, 321.0, 161.0,
    ];
    let run = |_: ()| -> (Vec<f32>, Vec<u32>, Vec<u32>) {
        let tess = helpers::tessellate(&[star], WindingRule::Odd);
        (
            tess.vertices().to_vec(),
            tess.vertex_indices().to_vec(),
            tess.elements().to_vec(),
        )
    };
    let first = run(());
    let second = run(());
    assert_eq!(first, second, "two identical runs must match exactly");
}

#[test]
fn contours_survive_across_runs_of_one_instance() {
    // outputs are reused across calls; contours are consumed per call
    let mut tess = Tessellator::new();
    tess.add_contour(2, SQUARE).unwrap();
    tess.tessellate(WindingRule::Odd, ElementType::Polygons, 3, 2, None)
        .unwrap();
    let first: Vec<u32> = tess.elements().to_vec();

    tess.add_contour(2, SQUARE).unwrap();
    tess.tessellate(WindingRule::Odd, ElementType::Polygons, 3, 2, None)
        .unwrap();
    assert_eq!(tess.elements(), &first[..]);
}

#[test]
fn self_intersecting_star_all_rules() {
    let star: &[f32] = &[
        350.0, 75.0, 379.0, 161.0, 469.0, 161.0, 397.0, 215.0, 423.0, 301.0, 350.0, 250.0, 277.0,
        301.0, 303.0, 215.0, 231.0, 161.0, 321.0, 161.0,
    ];
    let odd = helpers::tessellate(&[star], WindingRule::Odd);
    let nonzero = helpers::tessellate(&[star], WindingRule::NonZero);
    // odd excludes the center pentagon, nonzero fills it
    assert!(helpers::total_area(&odd) < helpers::total_area(&nonzero));
    helpers::assert_ccw_triangles(&odd);
    helpers::assert_ccw_triangles(&nonzero);
}
