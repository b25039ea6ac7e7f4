use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::{
    foundation::core::Tag,
    foundation::error::{PictolayError, PictolayResult},
    ingest::record::Record,
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Describes how one dataset variant maps flat rows onto entities.
///
/// Field names are fixed per dataset variant (e.g. the Canadian Housing
/// Survey uses `PPROV` as the group key and `PRSPGNDR` as the discriminant).
/// The attribute list is ordered; its order drives attribute cycling in
/// detail mode.
pub struct DatasetSpec {
    /// Field whose value identifies a record's group (entity key).
    pub group_key_field: String,
    /// How the per-observation binary discriminant is derived.
    pub discriminant: DiscriminantRule,
    /// Ordered attribute definitions.
    pub attributes: Vec<AttributeSpec>,
    /// Index into `attributes` shown when detail mode is first entered.
    #[serde(default)]
    pub default_attribute: usize,
    /// Optional human-readable labels for group keys (e.g. province codes).
    #[serde(default)]
    pub key_labels: BTreeMap<String, String>,
}

impl DatasetSpec {
    /// Validate structural requirements before aggregation.
    pub fn validate(&self) -> PictolayResult<()> {
        if self.group_key_field.is_empty() {
            return Err(PictolayError::validation("group_key_field must be set"));
        }
        if self.attributes.is_empty() {
            return Err(PictolayError::validation(
                "DatasetSpec needs at least one attribute",
            ));
        }
        if self.default_attribute >= self.attributes.len() {
            return Err(PictolayError::validation(format!(
                "default_attribute {} out of range ({} attributes)",
                self.default_attribute,
                self.attributes.len()
            )));
        }
        let mut seen = std::collections::BTreeSet::new();
        for attr in &self.attributes {
            if attr.name.is_empty() {
                return Err(PictolayError::validation("attribute name must be set"));
            }
            if !seen.insert(attr.name.as_str()) {
                return Err(PictolayError::validation(format!(
                    "duplicate attribute name '{}'",
                    attr.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Maps a record field onto a [`Tag`].
///
/// A record whose field code equals `zero_code` yields [`Tag::Zero`]; any
/// other present value yields [`Tag::One`]. A missing field defaults to
/// [`Tag::One`], matching survey exports where the reference category is
/// coded explicitly.
pub struct DiscriminantRule {
    /// Field the discriminant is read from.
    pub field: String,
    /// Code that maps to [`Tag::Zero`].
    pub zero_code: String,
}

impl DiscriminantRule {
    /// Resolve the discriminant tag for one record.
    pub fn tag_for(&self, record: &Record) -> Tag {
        match record.code_of(&self.field) {
            Some(code) if code == self.zero_code => Tag::Zero,
            _ => Tag::One,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One named derived statistic over a group's records.
pub struct AttributeSpec {
    /// Stable attribute name (map key on entities).
    pub name: String,
    /// Human-readable description shown next to the pictogram.
    pub description: String,
    /// How records qualify for this attribute.
    pub rule: AttributeRule,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Inclusion rule for an attribute.
///
/// A rule referencing a field absent on a record simply does not match; it
/// never fails the ingestion pass.
pub enum AttributeRule {
    /// Record qualifies when `field`'s code equals `equals`; each qualifying
    /// record contributes its discriminant tag to an ordered sequence.
    TagWhen {
        /// Field the inclusion code is read from.
        field: String,
        /// Code a record must carry to qualify.
        equals: String,
    },
    /// Record qualifies when `field`'s code equals `equals`; qualifying
    /// records are tallied into a single scalar count.
    CountWhen {
        /// Field the inclusion code is read from.
        field: String,
        /// Code a record must carry to qualify.
        equals: String,
    },
}

impl AttributeRule {
    fn matches(&self, record: &Record) -> bool {
        let (field, equals) = match self {
            AttributeRule::TagWhen { field, equals } => (field, equals),
            AttributeRule::CountWhen { field, equals } => (field, equals),
        };
        record.code_of(field).is_some_and(|code| code == *equals)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Value of one attribute on one entity.
///
/// The two shapes are intentional: sequence attributes carry one tag per
/// qualifying observation, scalar attributes carry only a tally. Consumers
/// resolve the split explicitly instead of duck-typing on length.
pub enum AttributeValue {
    /// Ordered discriminant tags, one per qualifying record. Fully
    /// partitioned: every [`Tag::Zero`] precedes every [`Tag::One`].
    Tags(Vec<Tag>),
    /// Scalar tally of qualifying records.
    Count(u64),
}

impl AttributeValue {
    /// Number of qualifying observations, regardless of shape.
    pub fn observation_count(&self) -> u64 {
        match self {
            AttributeValue::Tags(tags) => tags.len() as u64,
            AttributeValue::Count(n) => *n,
        }
    }

    /// Observation sequence fed to the pictogram wrapper.
    ///
    /// Scalar attributes synthesize a uniform all-[`Tag::Zero`] sequence (one
    /// marker per tallied observation, single shape, no group break).
    pub fn tag_sequence(&self) -> Vec<Tag> {
        match self {
            AttributeValue::Tags(tags) => tags.clone(),
            AttributeValue::Count(n) => vec![Tag::Zero; *n as usize],
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One aggregation group (e.g. one province).
///
/// Entities are pure statistics; visual size and position are produced by
/// the layout phase and live in [`crate::Placement`].
pub struct Entity {
    /// Stable group key (raw code from the group-key field).
    pub key: String,
    /// Human-readable label; falls back to `key` when no mapping exists.
    pub label: String,
    /// Number of records whose group key matched, regardless of how many
    /// satisfied any attribute rule.
    pub count: u64,
    /// Attribute name to derived value.
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Entity {
    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}

/// Accumulator used during the single aggregation pass. Tag sequences are
/// built in a deque so partition insertion stays O(1) at both ends.
struct Accumulator {
    key: String,
    count: u64,
    tags: BTreeMap<String, VecDeque<Tag>>,
    counts: BTreeMap<String, u64>,
}

impl Accumulator {
    fn new(key: String, spec: &DatasetSpec) -> Self {
        let mut tags = BTreeMap::new();
        let mut counts = BTreeMap::new();
        for attr in &spec.attributes {
            match attr.rule {
                AttributeRule::TagWhen { .. } => {
                    tags.insert(attr.name.clone(), VecDeque::new());
                }
                AttributeRule::CountWhen { .. } => {
                    counts.insert(attr.name.clone(), 0);
                }
            }
        }
        Self {
            key,
            count: 0,
            tags,
            counts,
        }
    }

    fn freeze(self, spec: &DatasetSpec) -> Entity {
        let mut attributes = BTreeMap::new();
        for (name, deque) in self.tags {
            attributes.insert(name, AttributeValue::Tags(deque.into_iter().collect()));
        }
        for (name, n) in self.counts {
            attributes.insert(name, AttributeValue::Count(n));
        }
        let label = spec
            .key_labels
            .get(&self.key)
            .cloned()
            .unwrap_or_else(|| self.key.clone());
        Entity {
            key: self.key,
            label,
            count: self.count,
            attributes,
        }
    }
}

/// Group raw records into per-entity statistics.
///
/// Records are folded in one pass. A record with a missing or blank group key
/// is skipped (and logged); it never creates an entity. For each attribute
/// rule a record satisfies, the record's discriminant tag is partition-
/// inserted into that attribute's sequence: [`Tag::Zero`] at the front,
/// [`Tag::One`] at the back, insertion order preserved within each class.
///
/// Output order is first-seen group key order; callers that need a specific
/// ordering must sort explicitly.
#[tracing::instrument(skip(records, spec), fields(records = records.len()))]
pub fn aggregate(records: &[Record], spec: &DatasetSpec) -> PictolayResult<Vec<Entity>> {
    spec.validate()?;

    let mut order: Vec<Accumulator> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(key) = record.code_of(&spec.group_key_field) else {
            skipped += 1;
            tracing::warn!(field = %spec.group_key_field, "record without group key skipped");
            continue;
        };

        let slot = match index.get(&key) {
            Some(&i) => i,
            None => {
                let i = order.len();
                order.push(Accumulator::new(key.clone(), spec));
                index.insert(key, i);
                i
            }
        };
        let acc = &mut order[slot];
        acc.count += 1;

        let tag = spec.discriminant.tag_for(record);
        for attr in &spec.attributes {
            if !attr.rule.matches(record) {
                continue;
            }
            match attr.rule {
                AttributeRule::TagWhen { .. } => {
                    // Partition insert: this is what produces the grouped
                    // marker blocks downstream.
                    let seq = seq_for(&mut acc.tags, &attr.name);
                    match tag {
                        Tag::Zero => seq.push_front(tag),
                        Tag::One => seq.push_back(tag),
                    }
                }
                AttributeRule::CountWhen { .. } => {
                    if let Some(n) = acc.counts.get_mut(&attr.name) {
                        *n += 1;
                    }
                }
            }
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "aggregation dropped records without group key");
    }

    Ok(order.into_iter().map(|acc| acc.freeze(spec)).collect())
}

fn seq_for<'a>(
    tags: &'a mut BTreeMap<String, VecDeque<Tag>>,
    name: &str,
) -> &'a mut VecDeque<Tag> {
    // The accumulator pre-creates one deque per TagWhen attribute.
    tags.entry(name.to_string()).or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/aggregate.rs"]
mod tests;
