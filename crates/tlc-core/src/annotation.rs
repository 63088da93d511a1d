use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TlcError};

/// A marked pixel coordinate. Only `y` enters distance math; `x` is kept
/// for display.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Imaging condition a plate photograph was taken under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    #[default]
    Uv,
    Stain,
}

impl Modality {
    pub const ALL: &[Self] = &[Self::Uv, Self::Stain];

    /// The modality paired with this one on the same plate.
    pub fn other(self) -> Self {
        match self {
            Self::Uv => Self::Stain,
            Self::Stain => Self::Uv,
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uv => write!(f, "UV"),
            Self::Stain => write!(f, "Stain"),
        }
    }
}

/// Semantic role of a marked point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Baseline,
    SolventLine,
    Spots,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => write!(f, "baseline"),
            Self::SolventLine => write!(f, "solvent line"),
            Self::Spots => write!(f, "spots"),
        }
    }
}

/// Explicit plate identifier, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlateId(pub u32);

impl PlateId {
    /// Operator-facing name: `Plate <label>` when labelled, otherwise the id.
    pub fn display_name(self, label: Option<&str>) -> String {
        match label {
            Some(label) => format!("Plate {label}"),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for PlateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plate {}", self.0)
    }
}

/// Points marked on one plate under one modality.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlateAnnotation {
    #[serde(default)]
    pub baseline: Vec<Point>,
    #[serde(default)]
    pub solvent_line: Vec<Point>,
    /// Unordered in meaning; click order carries no identity.
    #[serde(default)]
    pub spots: Vec<Point>,
}

impl PlateAnnotation {
    pub fn points(&self, role: Role) -> &[Point] {
        match role {
            Role::Baseline => &self.baseline,
            Role::SolventLine => &self.solvent_line,
            Role::Spots => &self.spots,
        }
    }

    pub fn push(&mut self, role: Role, point: Point) {
        match role {
            Role::Baseline => self.baseline.push(point),
            Role::SolventLine => self.solvent_line.push(point),
            Role::Spots => self.spots.push(point),
        }
    }

    /// First marked point of a reference line, the only one that counts.
    pub fn reference(&self, role: Role) -> Option<Point> {
        self.points(role).first().copied()
    }

    /// Returns the first reference role that has no points, if any.
    pub fn missing_reference(&self) -> Option<Role> {
        [Role::Baseline, Role::SolventLine]
            .into_iter()
            .find(|&role| self.points(role).is_empty())
    }

    pub fn is_usable(&self) -> bool {
        self.missing_reference().is_none()
    }
}

/// All annotations of one physical plate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlateRecord {
    pub id: PlateId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv: Option<PlateAnnotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stain: Option<PlateAnnotation>,
}

impl PlateRecord {
    pub fn new(id: PlateId, label: Option<String>) -> Self {
        Self {
            id,
            label,
            uv: None,
            stain: None,
        }
    }

    pub fn annotation(&self, modality: Modality) -> Option<&PlateAnnotation> {
        match modality {
            Modality::Uv => self.uv.as_ref(),
            Modality::Stain => self.stain.as_ref(),
        }
    }

    /// Annotation for `modality`, created empty on first access.
    pub fn annotation_mut(&mut self, modality: Modality) -> &mut PlateAnnotation {
        let slot = match modality {
            Modality::Uv => &mut self.uv,
            Modality::Stain => &mut self.stain,
        };
        slot.get_or_insert_with(PlateAnnotation::default)
    }

    pub fn with_annotation(mut self, modality: Modality, annotation: PlateAnnotation) -> Self {
        *self.annotation_mut(modality) = annotation;
        self
    }

    pub fn display_name(&self) -> String {
        self.id.display_name(self.label.as_deref())
    }
}

/// Every annotated plate of a session, in plate order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    #[serde(default)]
    pub plates: Vec<PlateRecord>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.plates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlateRecord> {
        self.plates.iter()
    }

    /// Id the next appended plate would get.
    pub fn next_id(&self) -> PlateId {
        let max = self.plates.iter().map(|p| p.id.0).max().unwrap_or(0);
        PlateId(max + 1)
    }

    pub fn insert(&mut self, record: PlateRecord) -> Result<()> {
        if self.get(record.id).is_some() {
            return Err(TlcError::DuplicatePlate(record.id));
        }
        self.plates.push(record);
        Ok(())
    }

    pub fn get(&self, id: PlateId) -> Option<&PlateRecord> {
        self.plates.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlateId) -> Option<&mut PlateRecord> {
        self.plates.iter_mut().find(|p| p.id == id)
    }

    /// Rejects sets that reuse a plate id, which can only come from
    /// hand-edited session files.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for plate in &self.plates {
            if !seen.insert(plate.id) {
                return Err(TlcError::DuplicatePlate(plate.id));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a PlateRecord;
    type IntoIter = std::slice::Iter<'a, PlateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.plates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reference_reports_baseline_first() {
        let ann = PlateAnnotation::default();
        assert_eq!(ann.missing_reference(), Some(Role::Baseline));

        let mut ann = ann;
        ann.push(Role::Baseline, Point::new(0.0, 500.0));
        assert_eq!(ann.missing_reference(), Some(Role::SolventLine));

        ann.push(Role::SolventLine, Point::new(0.0, 100.0));
        assert!(ann.is_usable());
    }

    #[test]
    fn reference_uses_first_point() {
        let mut ann = PlateAnnotation::default();
        ann.push(Role::Baseline, Point::new(1.0, 500.0));
        ann.push(Role::Baseline, Point::new(2.0, 480.0));
        assert_eq!(ann.reference(Role::Baseline), Some(Point::new(1.0, 500.0)));
    }

    #[test]
    fn display_name_prefers_label() {
        assert_eq!(PlateId(3).display_name(None), "Plate 3");
        assert_eq!(PlateId(3).display_name(Some("A: Hexane")), "Plate A: Hexane");

        let record = PlateRecord::new(PlateId(2), Some("B".into()));
        assert_eq!(record.display_name(), "Plate B");
    }

    #[test]
    fn next_id_follows_highest() {
        let mut set = AnnotationSet::new();
        assert_eq!(set.next_id(), PlateId(1));
        set.insert(PlateRecord::new(PlateId(4), None)).unwrap();
        assert_eq!(set.next_id(), PlateId(5));
        assert!(set.insert(PlateRecord::new(PlateId(4), None)).is_err());
    }
}
