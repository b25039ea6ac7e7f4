use super::*;
use crate::{
    AttributeRule, AttributeSpec, AttributeValue, DatasetSpec, DiscriminantRule, FieldValue,
    MarkerShape, Record, SizePolicy, Tag,
};

fn rec(pairs: &[(&str, &str)]) -> Record {
    Record::from_pairs(
        pairs
            .iter()
            .map(|&(k, v)| (k, FieldValue::Text(v.to_string()))),
    )
}

fn dataset() -> DatasetSpec {
    DatasetSpec {
        group_key_field: "key".to_string(),
        discriminant: DiscriminantRule {
            field: "disc".to_string(),
            zero_code: "0".to_string(),
        },
        attributes: vec![
            AttributeSpec {
                name: "attr".to_string(),
                description: "reported the attribute".to_string(),
                rule: AttributeRule::TagWhen {
                    field: "attr".to_string(),
                    equals: "1".to_string(),
                },
            },
            AttributeSpec {
                name: "tally".to_string(),
                description: "tallied the flag".to_string(),
                rule: AttributeRule::CountWhen {
                    field: "flag".to_string(),
                    equals: "1".to_string(),
                },
            },
        ],
        default_attribute: 0,
        key_labels: Default::default(),
    }
}

fn records() -> Vec<Record> {
    vec![
        rec(&[("key", "A"), ("attr", "1"), ("disc", "0"), ("flag", "1")]),
        rec(&[("key", "A"), ("attr", "1"), ("disc", "1")]),
        rec(&[("key", "B"), ("attr", "0"), ("disc", "0")]),
    ]
}

fn scene() -> Scene {
    Scene::build(
        &records(),
        dataset(),
        Viewport::new(100.0, 50.0).unwrap(),
        // Counts 1 and 2 map onto sizes 10 and 20.
        SizePolicy::Linear {
            domain: (1.0, 2.0),
            range: (10.0, 20.0),
        },
        PictogramSpec {
            marker_size: 10.0,
            spacing: 10.0,
            origin_y: 100.0,
        },
    )
    .unwrap()
}

#[test]
fn build_sorts_ascending_and_packs_the_row() {
    let scene = scene();
    let keys: Vec<&str> = scene.entities().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["B", "A"]);
    assert_eq!(scene.entities()[0].count, 1);
    assert_eq!(scene.entities()[1].count, 2);
    assert_eq!(
        scene.entities()[1].attribute("attr"),
        Some(&AttributeValue::Tags(vec![Tag::Zero, Tag::One]))
    );
    assert_eq!(
        scene.entities()[0].attribute("attr"),
        Some(&AttributeValue::Tags(vec![]))
    );

    // gap = (100 - 30) / 3; centers follow the packer walk.
    let gap = 70.0 / 3.0;
    let placements = scene.placements();
    assert_eq!(placements.len(), 2);
    assert!((placements[0].center.x - (gap + 5.0)).abs() < 1e-9);
    assert!((placements[1].center.x - (2.0 * gap + 10.0 + 10.0)).abs() < 1e-9);
    assert_eq!(placements[0].center.y, 25.0);
    assert_eq!(placements[0].size, 10.0);
    assert_eq!(placements[1].size, 20.0);
}

#[test]
fn pointer_activation_drills_into_the_hit_entity() {
    let mut scene = scene();
    let target = scene.placements()[1].center;
    assert!(scene.pointer_activate(target.x + 1.0, target.y - 1.0));
    assert_eq!(
        scene.selection(),
        Selection::Detail { entity: 1, attribute: 0 }
    );

    // A(attr) = [Zero, One]: a triangle, then a square two rows down.
    let markers = scene.markers();
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].shape, MarkerShape::Triangle);
    assert_eq!(markers[0].center, Point::new(20.0, 120.0));
    assert_eq!(markers[1].shape, MarkerShape::Square);
    assert_eq!(markers[1].center, Point::new(20.0, 160.0));

    let readout = scene.selected_attribute().unwrap();
    assert_eq!(readout.name, "attr");
    assert_eq!(readout.observations, 2);
    assert_eq!(scene.selected_entity().unwrap().key, "A");
}

#[test]
fn pointer_misses_and_detail_clicks_change_nothing() {
    let mut scene = scene();
    assert!(!scene.pointer_activate(0.0, 0.0));
    assert!(scene.selection().is_overview());

    let target = scene.placements()[0].center;
    assert!(scene.pointer_activate(target.x, target.y));
    // Further activations are ignored while in detail mode.
    let other = scene.placements()[1].center;
    assert!(!scene.pointer_activate(other.x, other.y));
    assert_eq!(scene.selection().entity(), Some(0));
}

#[test]
fn empty_attribute_sequence_renders_no_markers() {
    let mut scene = scene();
    let target = scene.placements()[0].center;
    assert!(scene.pointer_activate(target.x, target.y));
    // B has no qualifying observations for "attr".
    assert!(scene.markers().is_empty());
    assert_eq!(scene.selected_attribute().unwrap().observations, 0);
}

#[test]
fn cycling_recomputes_the_pictogram_in_full() {
    let mut scene = scene();
    let target = scene.placements()[1].center;
    assert!(scene.pointer_activate(target.x, target.y));

    scene.cycle_attribute(1);
    assert_eq!(scene.selection().attribute(), Some(1));
    // A(tally) = Count(1): one synthesized uniform marker.
    let markers = scene.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].shape, MarkerShape::Triangle);

    // Wrap backwards past zero.
    scene.cycle_attribute(-2);
    assert_eq!(scene.selection().attribute(), Some(1));
    scene.cycle_attribute(-1);
    assert_eq!(scene.selection().attribute(), Some(0));
    assert_eq!(scene.markers().len(), 2);
}

#[test]
fn reset_clears_selection_and_markers() {
    let mut scene = scene();
    let target = scene.placements()[1].center;
    assert!(scene.pointer_activate(target.x, target.y));
    assert!(!scene.markers().is_empty());

    scene.reset_selection();
    assert!(scene.selection().is_overview());
    assert!(scene.markers().is_empty());

    // Cycling in overview is ignored.
    scene.cycle_attribute(1);
    assert!(scene.selection().is_overview());
}

#[test]
fn detail_entry_uses_the_dataset_default_attribute() {
    let mut dataset = dataset();
    dataset.default_attribute = 1;
    let mut scene = Scene::build(
        &records(),
        dataset,
        Viewport::new(100.0, 50.0).unwrap(),
        SizePolicy::Fixed(20.0),
        PictogramSpec::default(),
    )
    .unwrap();

    let target = scene.placements()[1].center;
    assert!(scene.pointer_activate(target.x, target.y));
    assert_eq!(scene.selection().attribute(), Some(1));
    assert_eq!(scene.selected_attribute().unwrap().name, "tally");
}

#[test]
fn cycled_attribute_survives_reset_and_reselect() {
    let mut scene = scene();
    let target = scene.placements()[1].center;
    assert!(scene.pointer_activate(target.x, target.y));
    scene.cycle_attribute(1);
    assert_eq!(scene.selection().attribute(), Some(1));

    scene.reset_selection();
    assert!(scene.selection().is_overview());

    // Drilling back in lands on the attribute that was showing before.
    let other = scene.placements()[0].center;
    assert!(scene.pointer_activate(other.x, other.y));
    assert_eq!(
        scene.selection(),
        Selection::Detail { entity: 0, attribute: 1 }
    );
}

#[test]
fn build_rejects_non_positive_sizes() {
    let err = Scene::build(
        &records(),
        dataset(),
        Viewport::new(100.0, 50.0).unwrap(),
        SizePolicy::Fixed(0.0),
        PictogramSpec::default(),
    )
    .unwrap_err();
    assert!(matches!(err, crate::PictolayError::Validation(_)));
}

#[test]
fn hit_test_uses_the_policy_radius() {
    let scene = scene();
    let p = scene.placements()[1];
    // Radius 10: just inside hits, the boundary itself does not.
    assert!(p.contains(Point::new(p.center.x + 9.9, p.center.y)));
    assert!(!p.contains(Point::new(p.center.x + 10.0, p.center.y)));
}
