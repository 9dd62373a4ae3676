use galvokit_core::{CodecError, ToolpathMode, Waypoint};
use galvokit_toolpath::{read_toolpath, write_toolpath};
use tempfile::TempDir;

#[test]
fn test_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job.gcode");
    let waypoints = vec![
        Waypoint::on(0.0, 0.0),
        Waypoint::off(1.0, 0.0),
        Waypoint::off(0.0, 1.0),
        Waypoint::on(1.0, 1.0),
        Waypoint::off(1.0, 1.0),
    ];

    write_toolpath(&path, &waypoints, ToolpathMode::Raster).unwrap();
    let decoded = read_toolpath(&path).unwrap();

    assert_eq!(decoded.mode, ToolpathMode::Raster);
    assert_eq!(decoded.waypoints(), waypoints);
}

#[test]
fn test_overwrite_replaces_contents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job.gcode");

    write_toolpath(&path, &[Waypoint::on(5.0, 5.0)], ToolpathMode::Raster).unwrap();
    write_toolpath(&path, &[Waypoint::on(1.0, 2.0)], ToolpathMode::Vector).unwrap();

    let decoded = read_toolpath(&path).unwrap();
    assert_eq!(decoded.mode, ToolpathMode::Vector);
    assert_eq!(decoded.waypoints(), vec![Waypoint::on(1.0, 2.0)]);
}

#[test]
fn test_unsupported_mode_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.gcode");
    std::fs::write(&path, "G21\nG01 X0 Y0\n").unwrap();

    let err = read_toolpath(&path).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedMode { line_number: 1, .. }));

    // The handle is released on failure, so the file can be replaced
    write_toolpath(&path, &[], ToolpathMode::Vector).unwrap();
    assert!(read_toolpath(&path).unwrap().commands.is_empty());
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = read_toolpath(dir.path().join("absent.gcode")).unwrap_err();
    assert!(matches!(err, CodecError::Io { .. }));
}
