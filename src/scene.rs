use crate::{
    foundation::core::{Point, Viewport},
    foundation::error::{PictolayError, PictolayResult},
    ingest::aggregate::{DatasetSpec, Entity, aggregate},
    ingest::record::Record,
    interact::selection::Selection,
    layout::pack::pack_row,
    layout::pictogram::{Marker, PictogramSpec, wrap_markers},
    layout::scale::SizePolicy,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Visual placement of one entity in the overview row.
///
/// Index-aligned with the scene's sorted entity slice.
pub struct Placement {
    /// Visual size (circle diameter) produced by the scene's size policy.
    pub size: f64,
    /// Center of the entity's hit region.
    pub center: Point,
}

impl Placement {
    /// True when `point` falls inside this placement's circular hit region.
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance(point) < self.size / 2.0
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Attribute header shown while an attribute's pictogram is displayed.
pub struct AttributeReadout<'a> {
    /// Attribute name.
    pub name: &'a str,
    /// Human-readable description.
    pub description: &'a str,
    /// Number of qualifying observations for the selected entity.
    pub observations: u64,
}

#[derive(Clone, Debug)]
/// Caller-owned context holding the aggregated entities, their placements,
/// the selection state, and the current pictogram.
///
/// Built once per ingestion pass; aggregation and overview layout never
/// re-run afterwards. The pictogram is recomputed in full, synchronously, on
/// every event that changes the selected entity or attribute; markers are
/// never patched incrementally. Events are expected to arrive serially
/// (single-threaded, event-driven model).
pub struct Scene {
    dataset: DatasetSpec,
    viewport: Viewport,
    pictogram: PictogramSpec,
    entities: Vec<Entity>,
    placements: Vec<Placement>,
    selection: Selection,
    markers: Vec<Marker>,
    /// Attribute shown on the next detail entry; starts at the dataset's
    /// default and tracks cycling, surviving reset/reselect.
    current_attribute: usize,
}

impl Scene {
    /// Run the full pipeline: aggregate, sort ascending by count, size, pack.
    ///
    /// The record slice must be complete before this is called; if ingestion
    /// is asynchronous in the surrounding system, building the scene is
    /// ordered after it, not raced against it.
    #[tracing::instrument(skip(records, dataset), fields(records = records.len()))]
    pub fn build(
        records: &[Record],
        dataset: DatasetSpec,
        viewport: Viewport,
        size_policy: SizePolicy,
        pictogram: PictogramSpec,
    ) -> PictolayResult<Self> {
        let mut entities = aggregate(records, &dataset)?;
        entities.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.key.cmp(&b.key)));

        let sizes: Vec<f64> = entities
            .iter()
            .map(|e| size_policy.size_for(e.count))
            .collect();
        for (entity, &size) in entities.iter().zip(&sizes) {
            if !(size.is_finite() && size > 0.0) {
                return Err(PictolayError::validation(format!(
                    "size policy produced non-positive size {size} for entity '{}'",
                    entity.key
                )));
            }
        }

        let centers = pack_row(&sizes, viewport);
        let placements = sizes
            .into_iter()
            .zip(centers)
            .map(|(size, center)| Placement { size, center })
            .collect();

        let current_attribute = dataset.default_attribute;
        Ok(Self {
            dataset,
            viewport,
            pictogram,
            entities,
            placements,
            selection: Selection::Overview,
            markers: Vec::new(),
            current_attribute,
        })
    }

    /// Entities sorted ascending by count, placement-aligned.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Overview placements, entity-aligned.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Current selection state.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Markers of the current pictogram; empty in overview mode and for
    /// attributes with no qualifying observations.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Viewport the layouts target.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Selected entity, if in detail mode.
    pub fn selected_entity(&self) -> Option<&Entity> {
        self.selection.entity().map(|i| self.entity_at(i))
    }

    /// Header readout for the selected attribute, if in detail mode.
    pub fn selected_attribute(&self) -> Option<AttributeReadout<'_>> {
        let (entity_idx, attr_idx) = match self.selection {
            Selection::Overview => return None,
            Selection::Detail { entity, attribute } => (entity, attribute),
        };
        let entity = self.entity_at(entity_idx);
        let spec = &self.dataset.attributes[attr_idx];
        let observations = entity
            .attribute(&spec.name)
            .map(|v| v.observation_count())
            .unwrap_or(0);
        Some(AttributeReadout {
            name: &spec.name,
            description: &spec.description,
            observations,
        })
    }

    /// Pointer activation at `(x, y)`.
    ///
    /// In overview mode, hit-tests the placements in order and drills into
    /// the first entity whose circular region contains the point, showing the
    /// current default attribute (the dataset's `default_attribute` until
    /// cycling moves it). Returns whether the event changed the selection.
    /// Ignored in detail mode.
    pub fn pointer_activate(&mut self, x: f64, y: f64) -> bool {
        if !self.selection.is_overview() {
            return false;
        }
        let point = Point::new(x, y);
        let Some(hit) = self.placements.iter().position(|p| p.contains(point)) else {
            return false;
        };
        self.selection = self.selection.select(hit, self.current_attribute);
        self.recompute_markers();
        true
    }

    /// Cycle the displayed attribute by `step` (±1 for chevrons), wrapping at
    /// both ends. Ignored in overview mode.
    pub fn cycle_attribute(&mut self, step: i32) {
        let before = self.selection;
        self.selection = self
            .selection
            .cycle_attribute(step, self.dataset.attributes.len());
        if self.selection != before {
            if let Some(attribute) = self.selection.attribute() {
                self.current_attribute = attribute;
            }
            self.recompute_markers();
        }
    }

    /// Drop back to overview and clear the pictogram.
    pub fn reset_selection(&mut self) {
        self.selection = self.selection.reset();
        self.markers.clear();
    }

    fn recompute_markers(&mut self) {
        let (entity_idx, attr_idx) = match self.selection {
            Selection::Overview => {
                self.markers.clear();
                return;
            }
            Selection::Detail { entity, attribute } => (entity, attribute),
        };
        // Borrows of the entity and attribute spec must end before the
        // marker list is overwritten.
        let tags = {
            let entity = self.entity_at(entity_idx);
            let spec = &self.dataset.attributes[attr_idx];
            let tags = entity
                .attribute(&spec.name)
                .map(|v| v.tag_sequence())
                .unwrap_or_default();
            tracing::debug!(
                entity = %entity.key,
                attribute = %spec.name,
                observations = tags.len(),
                "pictogram recomputed"
            );
            tags
        };
        self.markers = wrap_markers(&tags, self.viewport.width, &self.pictogram);
    }

    /// A selection index not derived from the current entity sequence is a
    /// programmer error, so this fails fast instead of propagating.
    fn entity_at(&self, index: usize) -> &Entity {
        assert!(
            index < self.entities.len(),
            "stale entity index {index} (entities: {})",
            self.entities.len()
        );
        &self.entities[index]
    }
}

#[cfg(test)]
#[path = "../tests/unit/scene.rs"]
mod tests;
