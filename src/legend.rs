use crate::series::ShapeId;

/// Anchor of a legend box inside its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendLocation {
    #[default]
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
    Right,
    CenterLeft,
    CenterRight,
    LowerCenter,
    UpperCenter,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
/// An entry in a legend: the artist it describes and the text shown for it.
pub struct LegendEntry {
    pub handle: ShapeId,
    pub label: String,
}

/// A legend attached to a region.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub location: LegendLocation,
}

impl Legend {
    /// Pair handles with labels; extra items on either side are dropped.
    pub fn new(handles: Vec<ShapeId>, labels: Vec<String>, location: LegendLocation) -> Self {
        let entries = handles
            .into_iter()
            .zip(labels)
            .map(|(handle, label)| LegendEntry { handle, label })
            .collect();
        Self { entries, location }
    }

    pub fn handles(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.entries.iter().map(|e| e.handle)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_handles_are_dropped() {
        let legend = Legend::new(
            vec![ShapeId::new(), ShapeId::new()],
            vec!["only".to_string()],
            LegendLocation::Best,
        );
        assert_eq!(legend.entries.len(), 1);
        assert_eq!(legend.labels().collect::<Vec<_>>(), vec!["only"]);
    }
}
