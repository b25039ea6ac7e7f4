use super::*;

fn viewport(width: f64, height: f64) -> Viewport {
    Viewport::new(width, height).unwrap()
}

#[test]
fn worked_example_two_entities() {
    // Sizes 10 and 20 in a width-100 viewport: gap = (100 - 30) / 3.
    let centers = pack_row(&[10.0, 20.0], viewport(100.0, 50.0));
    let gap = 70.0 / 3.0;
    assert!((centers[0].x - (gap + 5.0)).abs() < 1e-9);
    assert!((centers[1].x - (gap + 10.0 + gap + 10.0)).abs() < 1e-9);
    assert_eq!(centers[0].y, 25.0);
    assert_eq!(centers[1].y, 25.0);
}

#[test]
fn consecutive_edge_distances_equal_the_gap() {
    let sizes = [10.0, 20.0, 30.0, 40.0];
    let vp = viewport(400.0, 100.0);
    let centers = pack_row(&sizes, vp);
    let gap = (400.0 - sizes.iter().sum::<f64>()) / (sizes.len() as f64 + 1.0);

    // Leading gap, inter-entity gaps, trailing gap.
    assert!((centers[0].x - sizes[0] / 2.0 - gap).abs() < 1e-9);
    for i in 1..sizes.len() {
        let prev_right = centers[i - 1].x + sizes[i - 1] / 2.0;
        let next_left = centers[i].x - sizes[i] / 2.0;
        assert!((next_left - prev_right - gap).abs() < 1e-9);
    }
    let last_right = centers[sizes.len() - 1].x + sizes[sizes.len() - 1] / 2.0;
    assert!((400.0 - last_right - gap).abs() < 1e-9);
}

#[test]
fn gaps_plus_sizes_conserve_viewport_width() {
    let sizes = [12.0, 34.0, 56.0];
    let vp = viewport(250.0, 80.0);
    let gap = (250.0 - sizes.iter().sum::<f64>()) / 4.0;
    let total = gap * 4.0 + sizes.iter().sum::<f64>();
    assert!((total - 250.0).abs() < 1e-9);
    // All centers sit on the vertical midline row.
    for c in pack_row(&sizes, vp) {
        assert_eq!(c.y, 40.0);
    }
}

#[test]
fn zero_entities_is_a_valid_empty_layout() {
    assert!(pack_row(&[], viewport(100.0, 50.0)).is_empty());
}

#[test]
fn overflowing_sizes_produce_negative_gap_and_overlap() {
    // Total size 300 in a width-100 viewport: gap is negative by design.
    let centers = pack_row(&[150.0, 150.0], viewport(100.0, 50.0));
    let gap = (100.0 - 300.0) / 3.0;
    assert!(gap < 0.0);
    assert!((centers[0].x - (gap + 75.0)).abs() < 1e-9);
    // Overlap: second entity's left edge sits before the first's right edge.
    let first_right = centers[0].x + 75.0;
    let second_left = centers[1].x - 75.0;
    assert!(second_left < first_right);
}
