use wayfinder_lib::{Coords, Error, LocationMap};

fn abc_map() -> LocationMap {
    let mut map = LocationMap::new();
    map.add_unidirectional_link("A", "B", 5);
    map.add_unidirectional_link("B", "A", 5);
    map.add_unidirectional_link("A", "C", 10);
    map
}

#[test]
fn distances_follow_link_direction() {
    let map = abc_map();

    assert_eq!(map.distance("A", "B"), Some(5));
    assert_eq!(map.distance("B", "A"), Some(5));
    assert_eq!(map.distance("A", "C"), Some(10));
    assert_eq!(map.distance("C", "A"), None);
    assert_eq!(map.locations_linked_to("A"), vec!["B", "C"]);
    assert!(map.locations_linked_to("C").is_empty());
}

#[test]
fn unidirectional_link_leaves_reverse_untouched() {
    let mut map = abc_map();
    map.add_unidirectional_link("A", "B", 7);

    assert_eq!(map.distance("A", "B"), Some(7));
    assert_eq!(map.distance("B", "A"), Some(5));
}

#[test]
fn zero_distance_is_not_absence() {
    let mut map = LocationMap::new();
    map.add_unidirectional_link("A", "B", 0);

    assert_eq!(map.distance("A", "B"), Some(0));
    assert_eq!(map.distance("B", "A"), None);
}

#[test]
fn bidirectional_links_are_symmetric_until_removed() {
    let mut map = LocationMap::new();
    map.add_bidirectional_link("A", "B", 12);
    assert_eq!(map.distance("A", "B"), Some(12));
    assert_eq!(map.distance("B", "A"), Some(12));

    map.add_unidirectional_link("B", "A", 20);
    map.remove_bidirectional_link("A", "B");
    assert_eq!(map.distance("A", "B"), None);
    assert_eq!(map.distance("B", "A"), None);
    assert!(map.is_location("A"));
    assert_eq!(map.locations(), ["A", "B"]);
}

#[test]
fn clear_links_keeps_coordinates() {
    let mut map = abc_map();
    map.set_coords("A", 1.0, 2.0);
    map.clear_links();

    assert_eq!(map.distance("A", "B"), None);
    assert!(map.locations().is_empty());
    assert_eq!(map.xy("A"), Some(Coords::new(1.0, 2.0)));

    map.clear();
    assert_eq!(map.xy("A"), None);
}

#[test]
fn straight_line_distance_needs_both_placements() {
    let mut map = LocationMap::new();
    map.set_coords("A", 0.0, 0.0);
    map.set_coords("B", 3.0, 4.0);

    assert_eq!(map.straight_line_distance("A", "B"), Some(5.0));
    assert_eq!(map.straight_line_distance("B", "A"), Some(5.0));
    assert_eq!(map.straight_line_distance("A", "Z"), None);
    assert_eq!(map.straight_line_distance("Z", "A"), None);
}

#[test]
fn polar_placement_uses_compass_bearings() {
    let mut map = LocationMap::new();
    map.set_reference_location("Home");
    map.set_dist_and_dir_to_ref_location("North", 8.0, 0.0);
    map.set_dist_and_dir_to_ref_location("East", 8.0, 90.0);

    let north = map.xy("North").expect("placed");
    assert!(north.x.abs() < 1e-9);
    assert!((north.y - 8.0).abs() < 1e-9);

    let east = map.xy("East").expect("placed");
    assert!((east.x + 8.0).abs() < 1e-9);
    assert!(east.y.abs() < 1e-9);

    let sld = map.straight_line_distance("Home", "East").expect("both placed");
    assert!((sld - 8.0).abs() < 1e-9);
}

#[test]
fn random_destination_draws_from_locations() {
    let map = abc_map();
    for _ in 0..10 {
        let destination = map.randomly_generate_destination().expect("map has locations");
        assert!(["A", "B", "C"].contains(&destination.as_str()));
    }

    assert!(matches!(
        LocationMap::new().randomly_generate_destination(),
        Err(Error::EmptyMap)
    ));
}
