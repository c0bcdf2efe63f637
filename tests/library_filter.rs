use beatbook::library::{builtin_library, filter_by_bpm, Service, Track};

fn track(id: &str, bpm: u16) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Track {id}"),
        artist: "Artist".to_string(),
        cover_url: String::new(),
        bpm,
        service: Service::Spotify,
    }
}

#[test]
fn concrete_range_scenario() {
    let collection = vec![track("1", 171), track("2", 124), track("3", 135)];

    let filtered = filter_by_bpm(&collection, 120, 140);
    let picked: Vec<(&str, u16)> = filtered.iter().map(|t| (t.id.as_str(), t.bpm)).collect();
    assert_eq!(picked, vec![("2", 124), ("3", 135)]);
}

#[test]
fn full_range_returns_collection_in_original_order() {
    let collection = builtin_library();
    let filtered = filter_by_bpm(&collection, 0, u16::MAX);

    assert_eq!(filtered.len(), collection.len());
    for (kept, original) in filtered.iter().zip(collection.iter()) {
        assert_eq!(*kept, original);
    }
}

#[test]
fn filter_keeps_exactly_the_records_in_bounds() {
    let collection = builtin_library();
    let (min, max) = (95, 120);

    let filtered = filter_by_bpm(&collection, min, max);

    for kept in &filtered {
        assert!(kept.bpm >= min && kept.bpm <= max);
    }
    let kept_ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
    for track in &collection {
        let in_bounds = track.bpm >= min && track.bpm <= max;
        assert_eq!(kept_ids.contains(&track.id.as_str()), in_bounds);
    }
}

#[test]
fn empty_range_yields_no_tracks() {
    let collection = builtin_library();
    assert!(filter_by_bpm(&collection, 500, 600).is_empty());
}

#[test]
fn inverted_bounds_yield_no_tracks() {
    let collection = builtin_library();
    assert!(filter_by_bpm(&collection, 140, 120).is_empty());
}
