#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Interaction mode of the visualization.
pub enum Selection {
    /// All entities visible, none selected. Initial state.
    #[default]
    Overview,
    /// One entity drilled into, one attribute shown as a pictogram.
    Detail {
        /// Index into the sorted entity sequence.
        entity: usize,
        /// Index into the fixed, ordered attribute list.
        attribute: usize,
    },
}

impl Selection {
    /// True in [`Selection::Overview`].
    pub fn is_overview(self) -> bool {
        matches!(self, Selection::Overview)
    }

    /// Selected entity index, if in detail mode.
    pub fn entity(self) -> Option<usize> {
        match self {
            Selection::Overview => None,
            Selection::Detail { entity, .. } => Some(entity),
        }
    }

    /// Selected attribute index, if in detail mode.
    pub fn attribute(self) -> Option<usize> {
        match self {
            Selection::Overview => None,
            Selection::Detail { attribute, .. } => Some(attribute),
        }
    }

    /// Enter detail mode on `entity`. Only fires from overview; in detail
    /// mode the selection is unchanged.
    pub fn select(self, entity: usize, default_attribute: usize) -> Selection {
        match self {
            Selection::Overview => Selection::Detail {
                entity,
                attribute: default_attribute,
            },
            detail @ Selection::Detail { .. } => detail,
        }
    }

    /// Cycle the attribute by `step`, wrapping at both ends. Only fires in
    /// detail mode; in overview the selection is unchanged.
    ///
    /// # Panics
    ///
    /// Panics when `attribute_count` is zero while in detail mode; a detail
    /// selection over an empty attribute list cannot exist through the event
    /// interface.
    pub fn cycle_attribute(self, step: i32, attribute_count: usize) -> Selection {
        match self {
            Selection::Overview => Selection::Overview,
            Selection::Detail { entity, attribute } => {
                assert!(attribute_count > 0, "detail selection with no attributes");
                let n = attribute_count as i64;
                let next = (attribute as i64 + i64::from(step)).rem_euclid(n);
                Selection::Detail {
                    entity,
                    attribute: next as usize,
                }
            }
        }
    }

    /// Back to overview, clearing the selection.
    pub fn reset(self) -> Selection {
        Selection::Overview
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interact/selection.rs"]
mod tests;
