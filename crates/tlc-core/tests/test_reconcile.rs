#[allow(dead_code)]
mod common;

use approx::assert_abs_diff_eq;

use tlc_core::annotation::{Modality, PlateAnnotation, Point, Role};
use tlc_core::calibration::ReferenceFrame;
use tlc_core::reconcile::{dedup_greedy, dedup_spots, gather_candidates, Candidate, SecondaryOutcome};

fn uv(ys: &[f64]) -> Vec<Candidate> {
    ys.iter()
        .map(|&y| Candidate {
            y,
            origin: Modality::Uv,
        })
        .collect()
}

fn ys(candidates: &[Candidate]) -> Vec<f64> {
    candidates.iter().map(|c| c.y).collect()
}

const PRIMARY: ReferenceFrame = ReferenceFrame {
    baseline_y: 500.0,
    solvent_y: 100.0,
};

// ---------------------------------------------------------------------------
// Candidate gathering
// ---------------------------------------------------------------------------

#[test]
fn test_gather_primary_only() {
    let plate = common::uv_plate(1, 500.0, 100.0, &[300.0, 200.0]);
    let r = gather_candidates(&plate, Modality::Uv, &PRIMARY);
    assert_eq!(r.secondary, SecondaryOutcome::Absent);
    assert_eq!(ys(&r.candidates), vec![300.0, 200.0]);
    assert!(r.candidates.iter().all(|c| c.origin == Modality::Uv));
}

#[test]
fn test_gather_merges_remapped_secondary() {
    let plate = common::uv_plate(1, 500.0, 100.0, &[300.0])
        .with_annotation(Modality::Stain, common::annotation(600.0, 400.0, &[450.0]));
    let r = gather_candidates(&plate, Modality::Uv, &PRIMARY);

    match r.secondary {
        SecondaryOutcome::Merged { scale, spots } => {
            assert_eq!(scale.value, 2.0);
            assert!(!scale.fallback);
            assert_eq!(spots, 1);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(r.candidates.len(), 2);
    assert_eq!(r.candidates[1].origin, Modality::Stain);
    assert_abs_diff_eq!(r.candidates[1].y, 200.0, epsilon = 1e-12);
}

#[test]
fn test_gather_secondary_missing_solvent_line() {
    let stain = PlateAnnotation {
        baseline: vec![Point::new(0.0, 600.0)],
        solvent_line: vec![],
        spots: vec![Point::new(0.0, 450.0)],
    };
    let plate = common::uv_plate(1, 500.0, 100.0, &[300.0]).with_annotation(Modality::Stain, stain);
    let r = gather_candidates(&plate, Modality::Uv, &PRIMARY);
    assert_eq!(
        r.secondary,
        SecondaryOutcome::Incomplete {
            missing: Role::SolventLine
        }
    );
    assert_eq!(ys(&r.candidates), vec![300.0]);
}

#[test]
fn test_gather_stain_as_primary() {
    let plate = common::uv_plate(1, 600.0, 200.0, &[400.0])
        .with_annotation(Modality::Stain, common::annotation(500.0, 100.0, &[350.0]));
    let r = gather_candidates(&plate, Modality::Stain, &PRIMARY);
    // UV is now secondary: 400 px front vs 400 px primary, scale 1.
    assert_eq!(r.candidates[0].origin, Modality::Stain);
    assert_eq!(r.candidates[0].y, 350.0);
    assert_eq!(r.candidates[1].origin, Modality::Uv);
    assert_abs_diff_eq!(r.candidates[1].y, 300.0, epsilon = 1e-12);
}

// ---------------------------------------------------------------------------
// Pixel-domain dedup
// ---------------------------------------------------------------------------

#[test]
fn test_dedup_adjacent_pixels() {
    let unique = dedup_spots(uv(&[301.0, 300.0]), 2.0);
    assert_eq!(ys(&unique), vec![300.0]);
}

#[test]
fn test_dedup_tolerance_is_inclusive() {
    assert_eq!(ys(&dedup_spots(uv(&[300.0, 302.0]), 2.0)), vec![300.0]);
    assert_eq!(ys(&dedup_spots(uv(&[300.0, 302.5]), 2.0)), vec![300.0, 302.5]);
}

#[test]
fn test_dedup_sorts_ascending() {
    let unique = dedup_spots(uv(&[400.0, 100.0, 250.0]), 2.0);
    assert_eq!(ys(&unique), vec![100.0, 250.0, 400.0]);
}

#[test]
fn test_dedup_is_greedy_not_clustering() {
    // Each neighbour is within tolerance of the previous one, but only
    // accepted spots block later ones.
    let unique = dedup_spots(uv(&[300.0, 301.5, 303.0, 304.5]), 2.0);
    assert_eq!(ys(&unique), vec![300.0, 303.0]);
}

#[test]
fn test_dedup_is_idempotent() {
    let input = uv(&[120.0, 121.0, 119.5, 300.0, 302.0, 305.0, 50.0]);
    let once = dedup_spots(input, 2.0);
    let twice = dedup_spots(once.clone(), 2.0);
    assert_eq!(once, twice);
}

#[test]
fn test_dedup_ties_keep_first_candidate() {
    let candidates = vec![
        Candidate {
            y: 300.0,
            origin: Modality::Uv,
        },
        Candidate {
            y: 300.0,
            origin: Modality::Stain,
        },
    ];
    let unique = dedup_spots(candidates, 2.0);
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0].origin, Modality::Uv);
}

#[test]
fn test_dedup_greedy_generic_key() {
    let kept = dedup_greedy(vec![9.2, 9.3, 9.5, 12.0], 0.1, |v| *v);
    assert_eq!(kept, vec![9.2, 9.5, 12.0]);
}

#[test]
fn test_dedup_empty() {
    assert!(dedup_spots(Vec::new(), 2.0).is_empty());
}
