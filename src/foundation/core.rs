use crate::foundation::error::{PictolayError, PictolayResult};

pub use kurbo::{Point, Vec2};

/// Fixed drawing area that layouts target, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Build a viewport; both dimensions must be strictly positive.
    pub fn new(width: f64, height: f64) -> PictolayResult<Self> {
        if !(width > 0.0 && width.is_finite()) {
            return Err(PictolayError::validation("Viewport width must be > 0"));
        }
        if !(height > 0.0 && height.is_finite()) {
            return Err(PictolayError::validation("Viewport height must be > 0"));
        }
        Ok(Self { width, height })
    }
}

/// Binary discriminant attached to each qualifying observation.
///
/// The tag only orders and groups entries within an attribute's observation
/// sequence; it also indexes the two-element marker shape palette.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Tag {
    /// Discriminant value 0; always inserted at the front of a sequence.
    Zero,
    /// Discriminant value 1; always inserted at the back of a sequence.
    One,
}

impl Tag {
    /// Palette index of this tag (`Zero -> 0`, `One -> 1`).
    pub fn index(self) -> usize {
        match self {
            Tag::Zero => 0,
            Tag::One => 1,
        }
    }
}
