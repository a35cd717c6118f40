use kasane::{Error, Mapping, MappingContainer, Position};

#[test]
fn test_single_segment_round_trip() {
    let mut map = MappingContainer::new();
    map.add_raw_mappings("AAAA", vec!["a.js".into()], vec![], 0, 0)
        .unwrap();

    let out = map.stringify().unwrap();
    assert_eq!(out.mappings, "AAAA");
    assert_eq!(out.sources, ["a.js"]);
    assert!(out.names.is_empty());
}

#[test]
fn test_sorted_line_round_trip() {
    let mut map = MappingContainer::new();
    map.add_raw_mappings("AACA,EAAA", vec!["a.js".into()], vec![], 0, 0)
        .unwrap();
    map.sort();
    assert_eq!(map.to_vlq_mappings().unwrap(), "AACA,EAAA");
}

#[test]
fn test_line_break_resets_generated_column() {
    let mut map = MappingContainer::new();
    map.add_raw_mappings("AAAA;AACA", vec!["a.js".into()], vec![], 0, 0)
        .unwrap();
    assert_eq!(map.to_vlq_mappings().unwrap(), "AAAA;AACA");
    assert_eq!(map.generated_lines(), 1);
    assert_eq!(map.segment_count(), 2);
}

#[test]
fn test_appending_a_second_map_offsets_the_source_pool() {
    let mut map = MappingContainer::new();
    map.add_raw_mappings("AAAA", vec!["a.js".into()], vec![], 0, 0)
        .unwrap();
    map.add_raw_mappings("AAAA", vec!["b.js".into()], vec![], 1, 0)
        .unwrap();

    let out = map.stringify().unwrap();
    assert_eq!(out.mappings, "AAAA;ACAA");
    assert_eq!(out.sources, ["a.js", "b.js"]);

    assert_eq!(
        map.lines()[1].segments()[0],
        Mapping::new(1, 0).with_source(1, 0, 0)
    );
}

#[test]
fn test_empty_input() {
    let mut map = MappingContainer::new();
    map.add_raw_mappings("", vec![], vec![], 0, 0).unwrap();
    assert_eq!(map.generated_lines(), -1);
    assert_eq!(map.segment_count(), 0);
    assert_eq!(map.to_vlq_mappings().unwrap(), "");
}

#[test]
fn test_empty_lines_are_preserved() {
    let mut map = MappingContainer::new();
    map.add_raw_mappings(";;", vec![], vec![], 0, 0).unwrap();
    assert_eq!(map.generated_lines(), 2);
    assert_eq!(map.segment_count(), 0);
    assert_eq!(map.to_vlq_mappings().unwrap(), ";;");
}

#[test]
fn test_empty_segments_are_tolerated() {
    let mut map = MappingContainer::new();
    map.add_raw_mappings("AAAA,,EAAA", vec!["a.js".into()], vec![], 0, 0)
        .unwrap();
    assert_eq!(map.segment_count(), 2);
    assert_eq!(map.to_vlq_mappings().unwrap(), "AAAA,EAAA");
}

#[test]
fn test_generated_only_segment() {
    let mut map = MappingContainer::new();
    map.add_raw_mappings("E", vec![], vec![], 0, 0).unwrap();

    let mapping = map.lines()[0].segments()[0];
    assert_eq!(mapping, Mapping::new(0, 2));
    assert!(mapping.source_info().is_none());
    assert!(mapping.name_info().is_none());
    assert_eq!(mapping.original, Position::absent());
}

#[test]
fn test_column_offset_applies_to_every_line() {
    // a fixed-width column prefix shifts the first segment of every line,
    // not just the first one
    let mut map = MappingContainer::new();
    map.add_raw_mappings("AAAA;AACA", vec!["a.js".into()], vec![], 0, 5)
        .unwrap();
    assert_eq!(map.to_vlq_mappings().unwrap(), "KAAA;KACA");
    for line in map.lines() {
        assert_eq!(line.segments()[0].generated.column, 5);
    }
}

#[test]
fn test_line_offset_shifts_all_lines() {
    let mut map = MappingContainer::new();
    map.add_raw_mappings("AAAA", vec!["a.js".into()], vec![], 2, 0)
        .unwrap();
    assert_eq!(map.generated_lines(), 2);
    assert_eq!(map.to_vlq_mappings().unwrap(), ";;AAAA");
}

#[test]
fn test_name_fields() {
    let mut map = MappingContainer::new();
    map.add_raw_mappings(
        "AAAAA,EAAAC",
        vec!["a.js".into()],
        vec!["foo".into(), "bar".into()],
        0,
        0,
    )
    .unwrap();

    let segments = map.lines()[0].segments();
    assert_eq!(
        segments[0],
        Mapping::new(0, 0).with_source(0, 0, 0).with_name(0)
    );
    assert_eq!(
        segments[1],
        Mapping::new(0, 2).with_source(0, 0, 0).with_name(1)
    );
    assert_eq!(map.to_vlq_mappings().unwrap(), "AAAAA,EAAAC");
}

#[test]
fn test_unsorted_input_is_sorted_stably() {
    let mut map = MappingContainer::new();
    // a segment at column 4, then one four columns back
    map.add_raw_mappings("IAAA,JAAA", vec!["a.js".into()], vec![], 0, 0)
        .unwrap();
    assert!(!map.lines()[0].is_sorted());

    map.sort();
    assert_eq!(map.to_vlq_mappings().unwrap(), "AAAA,IAAA");

    map.sort();
    assert_eq!(map.to_vlq_mappings().unwrap(), "AAAA,IAAA");
}

#[test]
fn test_decode_errors_abort_the_merge() {
    let mut map = MappingContainer::new();
    assert!(matches!(
        map.add_raw_mappings("!", vec![], vec![], 0, 0),
        Err(Error::InvalidBase64(b'!'))
    ));

    let mut map = MappingContainer::new();
    assert!(matches!(
        map.add_raw_mappings("AAAA,g", vec![], vec![], 0, 0),
        Err(Error::TruncatedVlq)
    ));
    // the segment before the failure stays in place
    assert_eq!(map.segment_count(), 1);

    let mut map = MappingContainer::new();
    assert!(matches!(
        map.add_raw_mappings("AA", vec![], vec![], 0, 0),
        Err(Error::MalformedSegment(..))
    ));
}

#[test]
fn test_get_map_flattens_sorted() {
    let mut map = MappingContainer::new();
    map.add_raw_mappings("EAAA,DACA;AAAA", vec!["a.js".into()], vec![], 0, 0)
        .unwrap();

    let data = map.get_map();
    assert_eq!(data.sources, ["a.js"]);
    assert_eq!(data.mappings.len(), 3);
    assert_eq!(data.mappings[0], Mapping::new(0, 1).with_source(0, 1, 0));
    assert_eq!(data.mappings[1], Mapping::new(0, 2).with_source(0, 0, 0));
    assert_eq!(data.mappings[2], Mapping::new(1, 0).with_source(0, 1, 0));

    assert_eq!(map.generated_lines(), 1);
    assert_eq!(map.generated_columns(), 2);
}

#[test]
fn test_pool_surface() {
    let mut map = MappingContainer::new();
    assert_eq!(map.add_sources(vec!["a.js".into(), "b.js".into()]), [0, 1]);
    assert_eq!(map.add_sources(vec!["b.js".into(), "c.js".into()]), [1, 2]);
    assert_eq!(map.get_source_index("c.js"), 2);
    assert_eq!(map.get_source_index("missing.js"), -1);

    assert_eq!(map.add_names(vec!["foo".into()]), [0]);
    assert_eq!(map.get_name_index("foo"), 0);
    assert_eq!(map.get_name_index("bar"), -1);
}

#[test]
fn test_lookup_surface_is_unimplemented() {
    let mut map = MappingContainer::new();
    assert!(matches!(
        map.find_by_generated((0, 0).into()),
        Err(Error::Unimplemented(..))
    ));
    assert!(matches!(
        map.find_by_original((0, 0).into()),
        Err(Error::Unimplemented(..))
    ));
    assert!(matches!(
        map.add_indexed_mappings(&[], 0, 0),
        Err(Error::Unimplemented(..))
    ));
}

#[test]
fn test_finalize_releases_lines() {
    let mut map = MappingContainer::new();
    map.add_raw_mappings("AAAA", vec!["a.js".into()], vec![], 0, 0)
        .unwrap();

    map.finalize();
    assert!(map.lines().is_empty());
    assert_eq!(map.generated_lines(), -1);
    assert_eq!(map.segment_count(), 0);
    // pools survive the teardown of the line store
    assert_eq!(map.get_source_index("a.js"), 0);
}

#[test]
fn test_debug_rendition() {
    let mut map = MappingContainer::new();
    map.add_raw_mappings(
        "AAAAA;;EACEC",
        vec!["a.js".into()],
        vec!["foo".into(), "bar".into()],
        0,
        0,
    )
    .unwrap();

    insta::assert_snapshot!(format!("{map:?}"), @r###"
    MappingContainer
      sources:
        0: a.js
      names:
        0: foo
        1: bar
      mappings:
        0:0 -> 0:0:0 (0)
        2:2 -> 0:1:2 (1)
    "###);
}
