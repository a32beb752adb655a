use super::*;

#[test]
fn engine_ids_match_by_substring() {
    assert_eq!(EngineKind::from_engine_id("CYCLES"), Some(EngineKind::Cycles));
    assert_eq!(
        EngineKind::from_engine_id("BLENDER_EEVEE_NEXT"),
        Some(EngineKind::Eevee)
    );
    assert_eq!(
        EngineKind::from_engine_id("blender_eevee"),
        Some(EngineKind::Eevee)
    );
    assert_eq!(EngineKind::from_engine_id("BLENDER_WORKBENCH"), None);
    assert_eq!(EngineKind::from_engine_id(""), None);
}

#[test]
fn host_generation_splits_at_major_five() {
    assert_eq!(HostVersion::new(4, 5).generation(), HostGeneration::Legacy);
    assert_eq!(HostVersion::new(5, 0).generation(), HostGeneration::Current);
}

#[test]
fn host_version_parses_and_roundtrips() {
    assert_eq!(HostVersion::parse("4.2").unwrap(), HostVersion::new(4, 2));
    assert_eq!(HostVersion::parse("5.0.1").unwrap(), HostVersion::new(5, 0));
    assert_eq!(HostVersion::parse("5").unwrap(), HostVersion::new(5, 0));
    assert!(HostVersion::parse("five").is_err());
    assert!(HostVersion::parse("4.x").is_err());
    assert_eq!("5.1".parse::<HostVersion>().unwrap(), HostVersion::new(5, 1));

    let s = serde_json::to_string(&HostVersion::new(4, 1)).unwrap();
    assert_eq!(s, "\"4.1\"");
    let de: HostVersion = serde_json::from_str(&s).unwrap();
    assert_eq!(de, HostVersion::new(4, 1));
}
