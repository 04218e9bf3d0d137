use std::fs;
use std::path::Path;

use image::{GrayImage, Luma};
use tempfile::TempDir;

use cellsift_core::cell::CellKey;
use cellsift_core::config::{CurationConfig, ProjectLayout};
use cellsift_core::error::CurationError;
use cellsift_core::geometry::Point;
use cellsift_core::io::loader::{load_project, read_contours, read_props, read_traces};
use cellsift_core::io::project::ProjectFolder;
use cellsift_core::session::CurationSession;

const TRACES_CSV: &str = "\
 ,C000,C001,C002
Time(s)/Cell Status,accepted,accepted,rejected
0.00,1.0,10.0,5.0
0.05,2.0,20.0,5.0
0.10,3.0,30.0,5.0
";

const PROPS_CSV: &str = "\
Name,Status,CentroidX,CentroidY
C000,accepted,3.0,4.0
C001,accepted,10.5,2.0
C002,rejected,,
";

const CONTOURS_JSON: &str = r#"{
  "C000": [[[2, 3], [4, 3], [4, 5], [2, 5]]],
  "C001": [[[10, 1], [11, 1], [11, 3]], [[0, 0]]],
  "C002": [[[20, 20], [22, 20], [22, 22], [20, 22]]]
}"#;

fn write_project(root: &Path) {
    let data = root.join("InscopixProcessing").join("DataAnalysis");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("session_TRACES.csv"), TRACES_CSV).unwrap();
    fs::write(data.join("session_props.csv"), PROPS_CSV).unwrap();
    fs::write(data.join("session_contours.json"), CONTOURS_JSON).unwrap();

    let mut img = GrayImage::new(32, 16);
    img.put_pixel(1, 1, Luma([200]));
    img.save(data.join("session_HD_MAX_PROJ.tiff")).unwrap();
}

// ---------------------------------------------------------------------------
// Parsers
// ---------------------------------------------------------------------------

#[test]
fn test_read_traces_skips_time_column_and_status_row() {
    let table = read_traces(TRACES_CSV.as_bytes()).unwrap();
    assert_eq!(
        table.names,
        vec![CellKey::from("C000"), CellKey::from("C001"), CellKey::from("C002")]
    );
    assert_eq!(table.sample_count(), 3);
    assert_eq!(table.data[[2, 1]], 30.0);
}

#[test]
fn test_read_traces_without_time_column() {
    let table = read_traces("C001,C002\n1,2\n3,4\n".as_bytes()).unwrap();
    assert_eq!(table.names.len(), 2);
    assert_eq!(table.data[[1, 0]], 3.0);
}

#[test]
fn test_read_props_keeps_file_order_and_optional_centroids() {
    let props = read_props(PROPS_CSV.as_bytes()).unwrap();
    let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["C000", "C001", "C002"]);
    assert_eq!(props[1].centroid(), Some(Point::new(10.5, 2.0)));
    assert_eq!(props[2].centroid(), None);
}

#[test]
fn test_read_contours_takes_first_ring() {
    let contours = read_contours(CONTOURS_JSON.as_bytes()).unwrap();
    assert_eq!(contours[&CellKey::from("C001")].len(), 3);
    assert_eq!(contours[&CellKey::from("C000")][0], Point::new(2.0, 3.0));
}

// ---------------------------------------------------------------------------
// Project discovery
// ---------------------------------------------------------------------------

#[test]
fn test_discover_finds_every_file() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());
    let folder = ProjectFolder::discover(dir.path(), &ProjectLayout::default()).unwrap();
    assert!(folder.traces_path.ends_with("session_TRACES.csv"));
    assert!(folder.projection_path.ends_with("session_HD_MAX_PROJ.tiff"));
}

#[test]
fn test_discover_missing_data_dir() {
    let dir = TempDir::new().unwrap();
    let err = ProjectFolder::discover(dir.path(), &ProjectLayout::default()).unwrap_err();
    assert!(matches!(err, CurationError::ProjectDirNotFound(_)));
}

#[test]
fn test_discover_missing_file_names_its_kind() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());
    fs::remove_file(
        dir.path()
            .join("InscopixProcessing")
            .join("DataAnalysis")
            .join("session_props.csv"),
    )
    .unwrap();
    let err = ProjectFolder::discover(dir.path(), &ProjectLayout::default()).unwrap_err();
    match err {
        CurationError::ProjectFileNotFound { kind, .. } => assert_eq!(kind, "Cell props data"),
        other => panic!("unexpected error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Full load
// ---------------------------------------------------------------------------

#[test]
fn test_load_project_starts_a_session() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());
    let folder = ProjectFolder::discover(dir.path(), &ProjectLayout::default()).unwrap();
    let loaded = load_project(&folder).unwrap();

    assert_eq!(loaded.sample_count, 3);
    assert_eq!((loaded.image.width, loaded.image.height), (32, 16));
    assert_eq!(loaded.image.pixels[32 + 1], 200);

    let mut session = CurationSession::new(loaded.inputs, &CurationConfig::default()).unwrap();
    let c0 = session.registry().index_of(&"C000".into()).unwrap();
    let cell = session.registry().cell(c0);
    assert_eq!(cell.label, "0");
    assert_eq!(cell.label_anchor, Point::new(12.0, 16.0));
    assert_eq!(cell.outline[0], Point::new(8.0, 12.0));

    let panel = session.traces().panel(cell.trace);
    assert_eq!(panel.key.as_str(), "C000");
    assert_eq!(panel.samples, vec![0.0, 0.5, 1.0]);

    session.set_selection(&"C002".into(), false).unwrap();
    let result = session.export().unwrap();
    assert_eq!(result.keys, vec![CellKey::from("C000"), CellKey::from("C001")]);
}

#[test]
fn test_load_project_requires_outline_for_every_cell() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());
    let data = dir.path().join("InscopixProcessing").join("DataAnalysis");
    fs::write(
        data.join("session_contours.json"),
        r#"{"C000": [[[0, 0], [1, 1]]], "C001": [[[0, 0]]]}"#,
    )
    .unwrap();
    let folder = ProjectFolder::discover(dir.path(), &ProjectLayout::default()).unwrap();
    let err = load_project(&folder).err();
    assert!(matches!(err, Some(CurationError::MissingOutline(k)) if k == "C002"));
}
