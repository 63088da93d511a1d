use tracing::{debug, warn};

use crate::annotation::{Modality, PlateRecord, Role};
use crate::calibration::{CrossModalityMap, ReferenceFrame, ScaleFactor};
use crate::consts::TOLERANCE_EPSILON;

/// A spot position expressed in the primary modality's pixel frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub y: f64,
    pub origin: Modality,
}

/// What happened to the secondary modality of a plate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SecondaryOutcome {
    /// No secondary annotation for this plate.
    Absent,
    /// Secondary spots were remapped and merged.
    Merged { scale: ScaleFactor, spots: usize },
    /// Secondary annotation lacks a reference line; its spots were dropped.
    Incomplete { missing: Role },
}

#[derive(Clone, Debug)]
pub struct Reconciliation {
    pub candidates: Vec<Candidate>,
    pub secondary: SecondaryOutcome,
}

/// Collect primary spots plus secondary spots remapped into the primary
/// frame. The primary annotation must already have produced `primary_frame`.
pub fn gather_candidates(
    plate: &PlateRecord,
    primary: Modality,
    primary_frame: &ReferenceFrame,
) -> Reconciliation {
    let mut candidates: Vec<Candidate> = plate
        .annotation(primary)
        .map(|ann| {
            ann.spots
                .iter()
                .map(|p| Candidate {
                    y: p.y,
                    origin: primary,
                })
                .collect()
        })
        .unwrap_or_default();

    let secondary = primary.other();
    let Some(ann) = plate.annotation(secondary) else {
        return Reconciliation {
            candidates,
            secondary: SecondaryOutcome::Absent,
        };
    };

    let secondary_frame = match ReferenceFrame::locate(ann) {
        Ok(frame) => frame,
        Err(line) => {
            warn!(plate = %plate.id, modality = %secondary, %line, "Secondary spots not incorporated");
            return Reconciliation {
                candidates,
                secondary: SecondaryOutcome::Incomplete { missing: line },
            };
        }
    };

    let map = CrossModalityMap::new(primary_frame, &secondary_frame);
    candidates.extend(ann.spots.iter().map(|p| Candidate {
        y: map.remap_y(p.y),
        origin: secondary,
    }));
    debug!(plate = %plate.id, spots = ann.spots.len(), "Merged secondary spots");

    Reconciliation {
        candidates,
        secondary: SecondaryOutcome::Merged {
            scale: map.scale(),
            spots: ann.spots.len(),
        },
    }
}

/// Greedy proximity dedup over `items` in their given order: an item is
/// kept unless its key lies within `tolerance` (inclusive) of an item
/// already kept.
///
/// This is not clustering. A chain of items each within tolerance of the
/// previous one collapses onto whichever items are accepted first, so the
/// result depends on input order.
pub fn dedup_greedy<T, F>(items: Vec<T>, tolerance: f64, key: F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        let k = key(&item);
        if !kept
            .iter()
            .any(|u| (k - key(u)).abs() <= tolerance + TOLERANCE_EPSILON)
        {
            kept.push(item);
        }
    }
    kept
}

/// Sort candidates by y (stable, so primary spots win ties) and run the
/// pixel-domain dedup pass.
pub fn dedup_spots(mut candidates: Vec<Candidate>, pixel_tolerance: f64) -> Vec<Candidate> {
    candidates.sort_by(|a, b| a.y.total_cmp(&b.y));
    dedup_greedy(candidates, pixel_tolerance, |c| c.y)
}
