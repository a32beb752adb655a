use super::*;

#[test]
fn templates_share_the_layer_directory() {
    let p = LayerOutputPaths::new(Path::new("/out"), "fg");
    assert_eq!(p.dir, PathBuf::from("/out/fg"));
    assert_eq!(p.color, "/out/fg/fg.####.exr");
    assert_eq!(p.data, "/out/fg/fg_data.####.exr");
    assert_eq!(p.noisy, "/out/fg/fg_noisy.####.exr");
    assert_eq!(p.backup, "/out/fg/fg_backup.####.exr");
}

#[test]
fn create_dir_is_repeatable() {
    let base = PathBuf::from("target").join("unit_build_paths");
    let p = LayerOutputPaths::new(&base, "A");
    p.create_dir().unwrap();
    p.create_dir().unwrap();
    assert!(p.dir.is_dir());
}
