use crate::foundation::core::{Point, Tag};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Layout parameters for the pictogram grid.
pub struct PictogramSpec {
    /// Edge length of one marker, in pixels.
    pub marker_size: f64,
    /// Space between adjacent markers and to the viewport edges.
    pub spacing: f64,
    /// Vertical offset added to the first row (room for header text above).
    pub origin_y: f64,
}

impl Default for PictogramSpec {
    fn default() -> Self {
        Self {
            marker_size: 10.0,
            spacing: 10.0,
            origin_y: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Shape drawn for one observation; a fixed two-element palette indexed by
/// the observation's discriminant tag.
pub enum MarkerShape {
    /// Palette slot 0, drawn for [`Tag::Zero`].
    Triangle,
    /// Palette slot 1, drawn for [`Tag::One`].
    Square,
}

impl MarkerShape {
    /// Shape for a discriminant tag.
    pub fn for_tag(tag: Tag) -> Self {
        match tag {
            Tag::Zero => MarkerShape::Triangle,
            Tag::One => MarkerShape::Square,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One renderable marker of the pictogram.
pub struct Marker {
    /// Shape derived from the observation's discriminant tag.
    pub shape: MarkerShape,
    /// Marker center.
    pub center: Point,
    /// Edge length, constant across a pictogram.
    pub size: f64,
}

/// Lay out one marker per observation, left to right, top to bottom.
///
/// Walking the sequence in order, each marker is first placed one step to the
/// right of the previous one. Two conditions force a wrap back to the left
/// margin:
///
/// - **overflow**: the candidate would cross `viewport_width - spacing`;
/// - **group boundary**: the observation's tag differs from the previous one.
///
/// A wrap advances the row by `spacing + marker_size`, doubled on a group
/// boundary so blocks are separated by a blank row. When overflow and a group
/// boundary coincide the advance is still the doubled step, never tripled.
///
/// An empty sequence yields an empty marker list; that is a valid state, not
/// an error.
pub fn wrap_markers(tags: &[Tag], viewport_width: f64, spec: &PictogramSpec) -> Vec<Marker> {
    let step = spec.spacing + spec.marker_size;
    let mut markers: Vec<Marker> = Vec::with_capacity(tags.len());
    let mut last_tag: Option<Tag> = None;

    for &tag in tags {
        let position = match markers.last() {
            None => Point::new(step, step + spec.origin_y),
            Some(prev) => {
                let mut candidate = Point::new(prev.center.x + step, prev.center.y);
                let group_boundary = last_tag.is_some_and(|last| last != tag);
                let overflow =
                    candidate.x + spec.marker_size > viewport_width - spec.spacing;
                if overflow || group_boundary {
                    let multiplier = if group_boundary { 2.0 } else { 1.0 };
                    candidate.x = step;
                    candidate.y += step * multiplier;
                }
                candidate
            }
        };

        markers.push(Marker {
            shape: MarkerShape::for_tag(tag),
            center: position,
            size: spec.marker_size,
        });
        last_tag = Some(tag);
    }
    markers
}

#[cfg(test)]
#[path = "../../tests/unit/layout/pictogram.rs"]
mod tests;
