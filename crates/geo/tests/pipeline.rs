//! End-to-end tests over files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use citytimeline_geo::{
    compute_bounding_box, count_features, read_line_geometries, read_polygon_outer_rings,
    run_pipeline, select_samples, BoundingBox, GeoError, LocalTransform, PipelineInputs, Point2D,
    PreviewConfig, SampleLimits,
};
use tempfile::{tempdir, TempDir};

const LINES: &str = r#"{
    "type": "FeatureCollection",
    "name": "water_lines_2230",
    "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::2230" } },
    "features": [
        { "type": "Feature", "properties": { "DIAMETER": 8 },
          "geometry": { "type": "LineString", "coordinates": [[0, 0], [10, 0], [10, 10]] } }
    ]
}"#;

const AREAS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        { "type": "Feature", "properties": { "NAME": "Reservoir" },
          "geometry": { "type": "Polygon", "coordinates": [
              [[0, 0], [20, 0], [20, 20], [0, 0]],
              [[2, 2], [4, 2], [4, 4], [2, 2]]
          ] } }
    ]
}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_reference_scenario() {
    let dir = tempdir().unwrap();
    let lines_path = write(&dir, "lines.geojson", LINES);
    let areas_path = write(&dir, "areas.geojson", AREAS);

    assert_eq!(count_features(&lines_path).unwrap(), 1);
    assert_eq!(count_features(&areas_path).unwrap(), 1);

    let lines = read_line_geometries(&lines_path).unwrap();
    let rings = read_polygon_outer_rings(&areas_path).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(rings.len(), 1);
    assert_eq!(rings[0].len(), 4);

    let bbox = compute_bounding_box(&[&lines, &rings]).unwrap();
    assert_eq!(bbox, BoundingBox::new(Point2D { x: 0.0, y: 0.0 }, Point2D { x: 20.0, y: 20.0 }));

    let tf = LocalTransform::from_bounding_box(&bbox, 0.5);
    assert_eq!(tf.to_local(Point2D { x: 20.0, y: 20.0 }), Point2D { x: 10.0, y: 10.0 });
    assert_eq!(tf.to_local(bbox.min), Point2D { x: 0.0, y: 0.0 });

    let samples = select_samples(&lines, &tf, 5, 2);
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].points(), &[Point2D { x: 0.0, y: 0.0 }, Point2D { x: 5.0, y: 0.0 }]);
}

#[test]
fn test_each_feature_feeds_one_reader() {
    let dir = tempdir().unwrap();
    let path = write(
        &dir,
        "mixed.geojson",
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]}},
            {"type":"Feature","geometry":{"type":"MultiLineString","coordinates":[[[0,0],[1,1]],[[2,2],[3,3]]]}},
            {"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}},
            {"type":"Feature","geometry":{"type":"MultiPolygon","coordinates":[[[[5,5],[6,5],[6,6],[5,5]]]]}}
        ]}"#,
    );

    assert_eq!(count_features(&path).unwrap(), 4);
    let lines = read_line_geometries(&path).unwrap();
    let rings = read_polygon_outer_rings(&path).unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(rings.len(), 2);
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.geojson");

    assert!(matches!(count_features(&missing), Err(GeoError::NotFound(p)) if p == missing));
    assert!(matches!(read_line_geometries(&missing), Err(GeoError::NotFound(_))));
    assert!(matches!(read_polygon_outer_rings(&missing), Err(GeoError::NotFound(_))));
}

#[test]
fn test_bad_content_errors() {
    let dir = tempdir().unwrap();
    let garbage = write(&dir, "garbage.geojson", "not json at all");
    let feature = write(&dir, "feature.geojson", r#"{"type":"Feature","geometry":null}"#);

    assert!(matches!(count_features(&garbage), Err(GeoError::Parse(_))));
    assert!(matches!(count_features(&feature), Err(GeoError::Schema(_))));
}

#[test]
fn test_invalid_utf8_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("latin1.geojson");
    let mut bytes = br#"{"type":"FeatureCollection","features":[],"name":""#.to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    bytes.extend_from_slice(br#""}"#);
    fs::write(&path, bytes).unwrap();

    assert!(matches!(count_features(&path), Err(GeoError::Parse(_))));
    assert!(matches!(read_line_geometries(&path), Err(GeoError::Parse(_))));
    assert!(matches!(read_polygon_outer_rings(&path), Err(GeoError::Parse(_))));
}

#[test]
fn test_empty_collection_reads_empty() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "empty.geojson", r#"{"type":"FeatureCollection","features":[]}"#);

    assert_eq!(count_features(&path).unwrap(), 0);
    assert!(read_line_geometries(&path).unwrap().is_empty());
    assert!(read_polygon_outer_rings(&path).unwrap().is_empty());
}

#[test]
fn test_run_pipeline() {
    let dir = tempdir().unwrap();
    let lines_path = write(&dir, "lines.geojson", LINES);
    let areas_path = write(&dir, "areas.geojson", AREAS);

    let inputs = PipelineInputs::new(&lines_path)
        .with_areas(&areas_path)
        .with_scale(0.5)
        .with_area_samples(true);
    let build = run_pipeline(&inputs).unwrap();

    assert_eq!(build.line_features, 1);
    assert_eq!(build.area_features, 1);
    assert_eq!(build.line_stats.points, 3);
    assert_eq!(build.area_stats.parts, 1);
    assert_eq!(build.bounds.max, Point2D { x: 20.0, y: 20.0 });
    assert_eq!(build.samples.len(), 1);
    assert_eq!(build.samples[0].last(), Point2D { x: 5.0, y: 5.0 });
    assert_eq!(build.area_samples.len(), 1);
    assert_eq!(build.area_samples[0].points()[2], Point2D { x: 10.0, y: 10.0 });
    assert_eq!(build.polyline_count(), 2);
}

#[test]
fn test_run_pipeline_is_repeatable() {
    let dir = tempdir().unwrap();
    let lines_path = write(&dir, "lines.geojson", LINES);
    let inputs = PipelineInputs::new(&lines_path);

    let first = run_pipeline(&inputs).unwrap();
    let second = run_pipeline(&inputs).unwrap();
    assert_eq!(first.samples, second.samples);
    assert_eq!(first.bounds, second.bounds);
    assert!(first.area_samples.is_empty());
}

#[test]
fn test_run_pipeline_respects_limits() {
    let dir = tempdir().unwrap();
    let lines_path = write(
        &dir,
        "lines.geojson",
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"MultiLineString","coordinates":[
                [[0,0],[1,0],[2,0],[3,0]],
                [[0,1],[1,1],[2,1]],
                [[0,2],[1,2]]
            ]}}
        ]}"#,
    );

    let limits = SampleLimits { max_polylines: 2, max_points_per_line: 2 };
    let build = run_pipeline(&PipelineInputs::new(&lines_path).with_limits(limits)).unwrap();
    assert_eq!(build.samples.len(), 2);
    assert!(build.samples.iter().all(|s| s.len() == 2));
}

#[test]
fn test_run_pipeline_without_coordinates() {
    let dir = tempdir().unwrap();
    let lines_path = write(
        &dir,
        "points.geojson",
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Point","coordinates":[1,2]}}
        ]}"#,
    );
    let areas_path = write(&dir, "areas.geojson", r#"{"type":"FeatureCollection","features":[]}"#);

    let result = run_pipeline(&PipelineInputs::new(&lines_path).with_areas(&areas_path));
    assert!(matches!(result, Err(GeoError::EmptyInput)));
}

#[test]
fn test_run_pipeline_missing_areas() {
    let dir = tempdir().unwrap();
    let lines_path = write(&dir, "lines.geojson", LINES);
    let inputs = PipelineInputs::new(&lines_path).with_areas(dir.path().join("missing.geojson"));

    assert!(matches!(run_pipeline(&inputs), Err(GeoError::NotFound(_))));
}

#[test]
fn test_config_drives_pipeline() {
    let dir = tempdir().unwrap();
    write(&dir, "lines.geojson", LINES);
    write(&dir, "areas.geojson", AREAS);
    let config_path = write(
        &dir,
        "preview.toml",
        r#"
        [sources]
        lines = "lines.geojson"
        areas = "areas.geojson"

        [transform]
        scale = 2.0

        [sampling]
        max_polylines = 1
        "#,
    );

    let config = PreviewConfig::load(&config_path).unwrap();
    let config_dir: &Path = config_path.parent().unwrap();
    let build = run_pipeline(&config.pipeline_inputs(config_dir)).unwrap();

    assert_eq!(build.transform.scale(), 2.0);
    assert_eq!(build.samples[0].last(), Point2D { x: 20.0, y: 20.0 });
}
