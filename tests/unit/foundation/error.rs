use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RenderManagerError::not_persisted("x")
            .to_string()
            .contains("document not persisted:")
    );
    assert!(
        RenderManagerError::empty_clipboard("x")
            .to_string()
            .contains("clipboard is empty:")
    );
    assert!(
        RenderManagerError::lifecycle("x")
            .to_string()
            .contains("lifecycle error:")
    );
    assert!(
        RenderManagerError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RenderManagerError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn io_names_the_path() {
    let err = RenderManagerError::io("renders/A", std::io::Error::other("denied"));
    let s = err.to_string();
    assert!(s.contains("renders/A"));
    assert!(s.contains("denied"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RenderManagerError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
