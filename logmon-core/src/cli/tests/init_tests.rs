use crate::cli::conf::{init, template};
use crate::conf::{LogmonConfig, MonitorConfig, read_config_file};
use pretty_assertions::assert_eq;

#[test]
fn init_writes_a_loadable_template() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf").join("logmon.hcl");

    // Act
    init(path.clone()).unwrap();

    // Assert
    let cfg = read_config_file(&path).unwrap();
    assert_eq!(
        cfg,
        LogmonConfig {
            monitor: MonitorConfig::new("/tmp/access.log"),
            ..Default::default()
        }
    );
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logmon.hcl");
    std::fs::write(&path, "keep me").unwrap();

    let err = init(path.clone()).unwrap_err();

    assert!(err.to_string().contains("already exists"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
}

#[test]
fn embedded_template_is_present() {
    assert!(template("logmon.hcl").unwrap().contains("monitor = {"));
}
