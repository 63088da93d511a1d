use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::retention::PlateResult;

/// One CSV row: a component together with the plate it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentRow {
    pub plate: u32,
    pub label: Option<String>,
    pub solvent_front_cm: f64,
    pub component: usize,
    pub distance_cm: f64,
    pub rf: f64,
    pub cv: f64,
}

/// Flatten results into rows, plate order first, then component order.
/// Plates without components produce no rows.
pub fn component_rows(results: &[PlateResult]) -> Vec<ComponentRow> {
    results
        .iter()
        .flat_map(|plate| {
            plate.components.iter().map(move |c| ComponentRow {
                plate: plate.plate.0,
                label: plate.label.clone(),
                solvent_front_cm: plate.solvent_front_distance_cm,
                component: c.component,
                distance_cm: c.distance_cm,
                rf: c.rf,
                cv: c.cv,
            })
        })
        .collect()
}

pub fn write_csv<W: Write>(results: &[PlateResult], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in component_rows(results) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_csv(results: &[PlateResult], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(results, file)
}

pub fn load_csv(path: &Path) -> Result<Vec<ComponentRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<ComponentRow>, _>>()?;
    Ok(rows)
}
