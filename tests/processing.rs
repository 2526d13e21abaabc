//! End-to-end processing of collision documents and files

use colcrate::io::{CollisionMap, KeyPresence};
use colcrate::simplification::{EditorFace, EditorScene, MeshEditor, MeshHandle};
use colcrate::{CollisionProcessor, Error, GroupFailurePolicy, Point3d, ProcessorConfig, Result};
use std::collections::HashMap;
use std::fs;

/// Editor that keeps geometry unchanged and counts lifecycle calls
#[derive(Default)]
struct CountingEditor {
    meshes: HashMap<MeshHandle, Vec<EditorFace>>,
    next_id: u64,
    created: usize,
    clears: usize,
    passes: usize,
}

impl MeshEditor for CountingEditor {
    fn new_mesh(&mut self) -> MeshHandle {
        let handle = MeshHandle::new(self.next_id);
        self.next_id += 1;
        self.created += 1;
        self.meshes.insert(handle, Vec::new());
        handle
    }

    fn set_geometry(&mut self, handle: MeshHandle, vertices: &[Point3d], faces: &[[usize; 3]]) -> Result<()> {
        let stored = faces
            .iter()
            .map(|f| EditorFace {
                indices: f.to_vec(),
                positions: f.iter().map(|&i| vertices[i]).collect(),
            })
            .collect();
        self.meshes.insert(handle, stored);
        Ok(())
    }

    fn apply_weld(&mut self, _: MeshHandle, _: f64) -> Result<()> {
        self.passes += 1;
        Ok(())
    }

    fn apply_edge_split(&mut self, _: MeshHandle, _: f64) -> Result<()> {
        self.passes += 1;
        Ok(())
    }

    fn apply_dissolve_decimate(&mut self, _: MeshHandle, _: f64) -> Result<()> {
        self.passes += 1;
        Ok(())
    }

    fn apply_triangulate(&mut self, _: MeshHandle) -> Result<()> {
        self.passes += 1;
        Ok(())
    }

    fn read_faces(&self, handle: MeshHandle) -> Result<Vec<EditorFace>> {
        self.meshes.get(&handle).cloned().ok_or_else(|| Error::ModifierApply {
            modifier: "ReadFaces",
            reason: "unknown mesh".to_string(),
        })
    }

    fn clear_all(&mut self) {
        self.clears += 1;
        self.meshes.clear();
    }
}

/// Editor whose triangulate pass leaves a quad behind
struct QuadEditor;

impl MeshEditor for QuadEditor {
    fn new_mesh(&mut self) -> MeshHandle {
        MeshHandle::new(0)
    }

    fn set_geometry(&mut self, _: MeshHandle, _: &[Point3d], _: &[[usize; 3]]) -> Result<()> {
        Ok(())
    }

    fn apply_weld(&mut self, _: MeshHandle, _: f64) -> Result<()> {
        Ok(())
    }

    fn apply_edge_split(&mut self, _: MeshHandle, _: f64) -> Result<()> {
        Ok(())
    }

    fn apply_dissolve_decimate(&mut self, _: MeshHandle, _: f64) -> Result<()> {
        Ok(())
    }

    fn apply_triangulate(&mut self, _: MeshHandle) -> Result<()> {
        Ok(())
    }

    fn read_faces(&self, _: MeshHandle) -> Result<Vec<EditorFace>> {
        Ok(vec![EditorFace {
            indices: vec![0, 1, 2, 3],
            positions: vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(10.0, 0.0, 0.0),
                Point3d::new(10.0, 10.0, 0.0),
                Point3d::new(0.0, 10.0, 0.0),
            ],
        }])
    }

    fn clear_all(&mut self) {}
}

fn scene_processor(config: ProcessorConfig) -> CollisionProcessor<EditorScene> {
    CollisionProcessor::new(EditorScene::new(), config)
}

/// `cells` x `cells` grid of 10 unit squares at height `z` as `TRI` lines
fn grid_lines(cells: usize, z: i32, key: Option<(u8, u8)>) -> Vec<String> {
    let suffix = key.map(|(h, l)| format!(" {h} {l}")).unwrap_or_default();
    let p = |x: usize, y: usize| format!("{};{};{}", x * 10, y * 10, z);
    let mut lines = Vec::new();
    for row in 0..cells {
        for col in 0..cells {
            let (tl, tr) = (p(col, row), p(col + 1, row));
            let (bl, br) = (p(col, row + 1), p(col + 1, row + 1));
            lines.push(format!("TRI {tl} {bl} {tr}{suffix}"));
            lines.push(format!("TRI {tr} {bl} {br}{suffix}"));
        }
    }
    lines
}

#[test]
fn test_keyed_groups_stay_separate() {
    let input = "TRI 0;0;0 1;0;0 0;1;0 0 5\nTRI 2;2;0 3;2;0 2;3;0 0 7\nCOLLISIONTYPE foo\n";
    let mut processor = scene_processor(ProcessorConfig::default());
    let (lines, report) = processor.process_str(input).unwrap();

    // Both groups collapse under the default weld and are copied through.
    assert_eq!(
        lines,
        vec![
            "TRI 0;0;0 1;0;0 0;1;0 0 5",
            "TRI 2;2;0 3;2;0 2;3;0 0 7",
            "COLLISIONTYPE foo"
        ]
    );
    assert_eq!(report.flushes, 1);
    assert_eq!(report.groups, 2);
    assert_eq!(report.groups_failed, 2);
    assert_eq!(colcrate::io::render(&lines).lines().last(), Some("\tCOLLISIONTYPE foo"));
}

#[test]
fn test_keyed_groups_simplify_independently() {
    let mut input = grid_lines(2, 0, Some((0, 5)));
    input.extend(grid_lines(2, 50, Some((0, 7))));
    input.push("COLLISIONTYPE foo".to_string());

    let mut processor = scene_processor(ProcessorConfig::default());
    let (lines, report) = processor.process_lines(&input).unwrap();

    assert_eq!(report.groups, 2);
    assert_eq!(report.groups_failed, 0);
    assert_eq!(report.triangles_in, 16);
    assert_eq!(report.triangles_out, 4);
    assert_eq!(lines.len(), 5);
    assert!(lines[..2].iter().all(|l| l.ends_with(";0 0 5")));
    assert!(lines[2..4].iter().all(|l| l.ends_with(";50 0 7")));
    assert_eq!(lines[4], "COLLISIONTYPE foo");
}

#[test]
fn test_malformed_record_is_fatal() {
    let input = "COLLISIONTYPE 0\nTRI 0;0 1;0;0 0;1;0\nCOLLISIONTYPE 1\n";
    let mut processor = scene_processor(ProcessorConfig::default());
    match processor.process_str(input) {
        Err(Error::MalformedRecord { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_untriangulated_output_aborts_the_run() {
    let input = "TRI 0;0;0 10;0;0 0;10;0\nCOLLISIONTYPE 1\nTRI 0;0;0 10;0;0 10;10;0\n";
    for policy in [GroupFailurePolicy::PassThrough, GroupFailurePolicy::Drop] {
        let config = ProcessorConfig::default().with_failure_policy(policy);
        match CollisionProcessor::new(QuadEditor, config).process_str(input) {
            Err(Error::PipelineContractViolation { face, vertex_count }) => {
                assert_eq!(face, 0);
                assert_eq!(vertex_count, 4);
            }
            other => panic!("expected PipelineContractViolation, got {other:?}"),
        }
    }
}

#[test]
fn test_strict_keys_reject_mixed_runs() {
    let input = "TRI 0;0;0 10;0;0 0;10;0\nTRI 0;0;0 10;0;0 10;10;0 0 5\n";

    let lenient = scene_processor(ProcessorConfig::default()).process_str(input);
    assert!(lenient.is_ok());

    let strict = ProcessorConfig::default().with_key_presence(KeyPresence::Strict);
    assert!(matches!(
        scene_processor(strict).process_str(input),
        Err(Error::MalformedRecord { line: 2, .. })
    ));
}

#[test]
fn test_each_run_flushes_once() {
    let input = "TRI 0;0;0 1;0;0 0;1;0 0 5
TRI 2;2;0 3;2;0 2;3;0 0 7
TRI 4;4;0 5;4;0 4;5;0 0 5
COLLISIONTYPE foo
COLLISIONTYPE bar
TRI 0;0;0 1;0;0 0;1;0 0 5";
    let mut processor = CollisionProcessor::new(CountingEditor::default(), ProcessorConfig::default());
    let (lines, report) = processor.process_str(input).unwrap();

    assert_eq!(report.flushes, 2);
    assert_eq!(report.groups, 3);
    assert_eq!(
        lines,
        vec![
            "TRI 0;0;0 1;0;0 0;1;0 0 5",
            "TRI 4;4;0 5;4;0 4;5;0 0 5",
            "TRI 2;2;0 3;2;0 2;3;0 0 7",
            "COLLISIONTYPE foo",
            "COLLISIONTYPE bar",
            "TRI 0;0;0 1;0;0 0;1;0 0 5",
        ]
    );

    let editor = processor.editor();
    assert_eq!(editor.created, 3);
    assert_eq!(editor.passes, 15);
    // Once per group and once at the end
    assert_eq!(editor.clears, 4);
}

#[test]
fn test_failed_groups_can_be_dropped() {
    let mut input = vec!["TRI 0;0;0 1;0;0 0;1;0 0 5".to_string()];
    input.extend(grid_lines(1, 0, Some((1, 0))));
    input.push("COLLISIONTYPE end".to_string());

    let config = ProcessorConfig::default().with_failure_policy(GroupFailurePolicy::Drop);
    let (lines, report) = scene_processor(config).process_lines(&input).unwrap();

    assert_eq!(report.groups_failed, 1);
    assert!(lines.iter().all(|l| !l.ends_with(" 0 5")));
    assert_eq!(lines.iter().filter(|l| l.ends_with(" 1 0")).count(), 2);
    assert_eq!(lines.last().map(String::as_str), Some("COLLISIONTYPE end"));
}

#[test]
fn test_unit_triangles_keep_their_corners() {
    let input = "TRI 0;0;0 1;0;0 0;1;0\nTRI 0;0;0 1;0;0 1;1;0\n";
    let (lines, _) = scene_processor(ProcessorConfig::default())
        .process_str(input)
        .unwrap();
    assert!(lines.iter().any(|l| l.contains("0;0;0")));
    assert!(lines.iter().any(|l| l.contains("1;1;0")));
}

#[test]
fn test_fractional_coordinates_are_rounded() {
    let input = "TRI 0.4;0;0 10.5;0;0 0;9.5;0\n";
    let (lines, _) = scene_processor(ProcessorConfig::default())
        .process_str(input)
        .unwrap();
    assert_eq!(lines, vec!["TRI 0;0;0 10;0;0 0;10;0"]);
}

#[test]
fn test_process_file_writes_sibling() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("collisionData.txt");
    let mut text = String::from("AREA 6 1\n\tCOLLISIONTYPE 0\n");
    for line in grid_lines(4, 0, None) {
        text.push_str("\t\t");
        text.push_str(&line);
        text.push('\n');
    }
    text.push_str("\tCOLLISIONTYPE 44\n");
    text.push_str("\t\tTRI 0;0;100 100;0;100 0;100;100 0 3\n");
    fs::write(&input, &text).unwrap();

    let mut processor = scene_processor(ProcessorConfig::default());
    let (output, report) = processor.process_file(&input).unwrap();

    assert_eq!(output, dir.path().join("collisionData.txt.new"));
    assert_eq!(fs::read_to_string(&input).unwrap(), text);
    assert_eq!(report.triangles_in, 33);
    assert_eq!(report.triangles_out, 3);

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "AREA 6 1");
    assert_eq!(lines[1], "\tCOLLISIONTYPE 0");
    assert!(lines[2].starts_with("\t\tTRI "));
    assert_eq!(lines[4], "\tCOLLISIONTYPE 44");
    assert_eq!(lines[5], "\t\tTRI 0;0;100 100;0;100 0;100;100 0 3");

    let map = CollisionMap::read(&output).unwrap();
    let area = map.area(6, 1).unwrap();
    assert_eq!(area.vertices.len(), 7);
    assert_eq!(area.type_histogram().get(&0), Some(&2));
    assert_eq!(area.triangles[2].params, Some([0, 3]));
}

#[test]
fn test_second_run_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("collision.txt");
    let mut lines = vec!["COLLISIONTYPE 0".to_string()];
    lines.extend(grid_lines(3, 20, None));
    fs::write(&input, lines.join("\n")).unwrap();

    let mut processor = scene_processor(ProcessorConfig::default());
    let (first, first_report) = processor.process_file(&input).unwrap();
    let (second, second_report) = processor.process_file(&first).unwrap();

    assert_eq!(first_report.triangles_out, 2);
    assert_eq!(second_report.triangles_in, 2);
    assert_eq!(second_report.triangles_out, 2);
    assert!(second.to_string_lossy().ends_with(".new.new"));
}

#[test]
fn test_missing_input_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    match scene_processor(ProcessorConfig::default()).process_file(&missing) {
        Err(Error::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_empty_suffix_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("collision.txt");
    fs::write(&input, "COLLISIONTYPE 0\n").unwrap();
    let config = ProcessorConfig::default().with_output_suffix("");
    assert!(matches!(
        scene_processor(config).process_file(&input),
        Err(Error::Config(_))
    ));
    assert_eq!(fs::read_to_string(&input).unwrap(), "COLLISIONTYPE 0\n");
}
