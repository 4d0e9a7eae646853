use super::types::{Design, DesignSummary};

/// Ordered, in-memory design collection. Most recent designs come first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignRepository {
    designs: Vec<Design>,
}

impl DesignRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a repository from persisted records, keeping their order.
    /// Later duplicates of an id are dropped so the uniqueness invariant
    /// holds even for hand-edited stores.
    pub fn from_designs(designs: Vec<Design>) -> Self {
        let mut unique: Vec<Design> = Vec::with_capacity(designs.len());
        for design in designs {
            if unique.iter().any(|existing| existing.id == design.id) {
                tracing::warn!(id = %design.id, "dropping duplicate design id from store");
                continue;
            }
            unique.push(design);
        }
        Self { designs: unique }
    }

    /// Prepend a design. Callers are responsible for id uniqueness; see
    /// [`DesignRepository::contains`].
    pub fn add(&mut self, design: Design) {
        self.designs.insert(0, design);
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Design> {
        self.designs.iter().find(|design| design.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Return a new collection with the pitch attached to `id`. Other
    /// records and the ordering are untouched; an unknown id yields an
    /// unchanged copy.
    #[must_use]
    pub fn with_pitch(&self, id: &str, pitch: &str) -> Self {
        let designs = self
            .designs
            .iter()
            .map(|design| {
                if design.id == id {
                    Design {
                        pitch: Some(pitch.to_string()),
                        ..design.clone()
                    }
                } else {
                    design.clone()
                }
            })
            .collect();
        Self { designs }
    }

    pub fn summaries(&self) -> Vec<DesignSummary<'_>> {
        self.designs.iter().map(Design::summary).collect()
    }

    pub fn as_slice(&self) -> &[Design] {
        &self.designs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Design> {
        self.designs.iter()
    }

    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    pub fn pitched_count(&self) -> usize {
        self.designs.iter().filter(|design| design.has_pitch()).count()
    }
}

impl<'a> IntoIterator for &'a DesignRepository {
    type Item = &'a Design;
    type IntoIter = std::slice::Iter<'a, Design>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
