/// Map `value` from `domain` onto `range` by pure linear interpolation.
///
/// Deliberately unclamped: a value beyond `domain.1` overshoots `range.1`, so
/// an unusually populous group renders larger than the nominal maximum. Same
/// input always yields the same output.
pub fn linear_scale(value: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    let (d0, d1) = domain;
    let (r0, r1) = range;
    if d1 == d0 {
        return r0;
    }
    r0 + (value - d0) * (r1 - r0) / (d1 - d0)
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Policy deriving an entity's visual size from its raw record count.
///
/// One policy is chosen per scene and never switched mid-session; the
/// hit-test radius always follows the size the active policy produced.
pub enum SizePolicy {
    /// Every entity renders at the same size, regardless of count.
    Fixed(f64),
    /// Size is an unclamped linear map of the raw count.
    Linear {
        /// Count interval mapped onto `range`.
        domain: (f64, f64),
        /// Size interval produced for `domain`.
        range: (f64, f64),
    },
}

impl SizePolicy {
    /// Visual size for a raw record count.
    pub fn size_for(&self, count: u64) -> f64 {
        match *self {
            SizePolicy::Fixed(size) => size,
            SizePolicy::Linear { domain, range } => linear_scale(count as f64, domain, range),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/scale.rs"]
mod tests;
