//! Pictolay is an aggregation and spatial layout engine for survey drill-down
//! visualizations.
//!
//! It ingests flat categorical/numeric records, groups them into entities,
//! derives per-entity statistics, packs the entities into a non-overlapping
//! overview row, and lays a selected statistic out as a wrapped pictogram
//! grid (one marker shape per observation). Rendering, styling, and input
//! capture are external collaborators: the engine consumes records, a
//! viewport, and interaction events, and emits geometry plus selection state.
//!
//! # Pipeline overview
//!
//! 1. **Aggregate**: `&[Record] + DatasetSpec -> Vec<Entity>` (counts and
//!    partitioned observation sequences)
//! 2. **Sort + Size**: entities ordered ascending by count, sized by a
//!    [`SizePolicy`]
//! 3. **Pack**: one centered row of placements filling the viewport width
//! 4. **Select**: [`Selection`] drives drill-down; each entity/attribute
//!    change recomputes the full [`Marker`] list via [`wrap_markers`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: aggregation and layout are pure and stable for a
//!   given input; no randomness, no clock.
//! - **Single-threaded**: events are handled serially and each recompute
//!   completes before the next event; there is no background work.
//! - **No IO**: record parsing and rendering live outside the engine.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod ingest;
mod interact;
mod layout;
mod scene;

pub use foundation::core::{Point, Tag, Vec2, Viewport};
pub use foundation::error::{PictolayError, PictolayResult};
pub use ingest::aggregate::{
    AttributeRule, AttributeSpec, AttributeValue, DatasetSpec, DiscriminantRule, Entity, aggregate,
};
pub use ingest::record::{FieldValue, Record, records_from_json};
pub use interact::selection::Selection;
pub use layout::pack::pack_row;
pub use layout::pictogram::{Marker, MarkerShape, PictogramSpec, wrap_markers};
pub use layout::scale::{SizePolicy, linear_scale};
pub use scene::{AttributeReadout, Placement, Scene};
