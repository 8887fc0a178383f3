use egui::{Color32, Key};
use image::RgbaImage;
use screenmark::command::{Snapshot, SnapshotHistory};
use screenmark::element::{Element, factory};
use screenmark::geometry::Point;
use screenmark::input::{KeyEvent, PointerEvent};
use screenmark::{Command, Editor, EditorConfig, Scene};

fn create_test_editor() -> Editor {
    Editor::new(RgbaImage::from_pixel(200, 200, image::Rgba([0, 0, 0, 255]))).unwrap()
}

fn add_stamps(editor: &mut Editor, count: i32) {
    editor.set_active_tool("stamp").unwrap();
    for n in 0..count {
        let x = 10 + (n * 7) % 180;
        editor.handle_pointer_down(PointerEvent::primary(x, 50));
        editor.handle_pointer_up(PointerEvent::primary(x, 50));
    }
}

#[test]
fn test_editor_opens_with_one_empty_snapshot() {
    let editor = create_test_editor();
    assert_eq!(editor.history().len(), 1);
    assert!(editor.history().peek().is_some_and(Snapshot::is_empty));
}

#[test]
fn test_undo_restores_previous_state() {
    let mut editor = create_test_editor();
    add_stamps(&mut editor, 2);
    assert_eq!(editor.elements().len(), 2);

    editor.undo();
    assert_eq!(editor.elements().len(), 1);
    editor.undo();
    assert!(editor.elements().is_empty());
}

#[test]
fn test_undo_on_empty_history_is_noop() {
    let mut editor = create_test_editor();
    editor.undo();
    assert!(editor.history().is_empty());
    editor.undo();
    assert!(editor.elements().is_empty());
    assert!(editor.history().is_empty());
}

#[test]
fn test_ctrl_z_undoes() {
    let mut editor = create_test_editor();
    add_stamps(&mut editor, 1);
    assert!(editor.handle_key(KeyEvent::command(Key::Z)));
    assert!(editor.elements().is_empty());
}

#[test]
fn test_history_capped_at_twenty() {
    let mut editor = create_test_editor();
    add_stamps(&mut editor, 25);
    assert_eq!(editor.history().len(), 20);

    // Oldest surviving snapshot is the one taken before the 6th stamp
    let oldest = editor.history().iter().next().map(Snapshot::len);
    assert_eq!(oldest, Some(5));

    for _ in 0..20 {
        editor.undo();
    }
    assert_eq!(editor.elements().len(), 5);
    // Nothing left to go back to
    editor.undo();
    assert_eq!(editor.elements().len(), 5);
}

#[test]
fn test_pushing_past_capacity_evicts_exactly_the_oldest() {
    let mut history = SnapshotHistory::new(20);
    let mut scene = Scene::new();
    for n in 0..21u32 {
        history.save(&scene);
        scene.push(factory::create_stamp(n + 1, Point::new(5, 5), Color32::RED));
    }

    assert_eq!(history.len(), 20);
    let sizes: Vec<usize> = history.iter().map(Snapshot::len).collect();
    assert_eq!(sizes, (1..=20).collect::<Vec<usize>>());
}

#[test]
fn test_snapshot_is_a_deep_copy() {
    let mut editor = create_test_editor();
    add_stamps(&mut editor, 1);
    let before = editor.elements()[0].bounds();

    // The snapshot taken before this stamp holds a copy of the first one
    editor.handle_pointer_down(PointerEvent::primary(150, 150));
    editor.handle_pointer_up(PointerEvent::primary(150, 150));
    assert_eq!(editor.elements().len(), 2);

    // Moving the live first stamp must not reach into history
    editor.set_active_tool("select").unwrap();
    editor.handle_pointer_down(PointerEvent::primary(10, 50));
    editor.handle_pointer_move(PointerEvent::primary(40, 120));
    editor.handle_pointer_up(PointerEvent::primary(40, 120));
    assert_eq!(editor.elements()[0].bounds(), before.translate(30, 70));

    editor.undo();
    assert_eq!(editor.elements().len(), 1);
    assert_eq!(editor.elements()[0].bounds(), before);
}

#[test]
fn test_snapshot_capture_is_independent_of_scene() {
    let mut scene = Scene::new();
    scene.push(factory::create_arrow(Point::new(0, 0), Point::new(30, 0), Color32::RED, 2));
    let snapshot = Snapshot::capture(&scene);

    let id = scene.elements()[0].id();
    if let Some(element) = scene.get_mut(id) {
        element.translate(10, 10);
    }
    assert_ne!(snapshot.scene(), &scene);
    assert_eq!(
        snapshot.scene().elements()[0].bounds(),
        scene.elements()[0].bounds().translate(-10, -10)
    );
}

#[test]
fn test_undo_clears_selection() {
    let mut editor = create_test_editor();
    add_stamps(&mut editor, 2);
    editor.set_active_tool("select").unwrap();
    editor.handle_pointer_down(PointerEvent::primary(10, 50));
    editor.handle_pointer_up(PointerEvent::primary(10, 50));
    assert!(editor.has_selection());

    editor.undo();
    assert!(!editor.has_selection());
}

#[test]
fn test_reset_leaves_single_empty_snapshot() {
    let mut editor = create_test_editor();
    add_stamps(&mut editor, 4);

    editor.execute(Command::Reset).unwrap();
    assert!(editor.elements().is_empty());
    assert_eq!(editor.history().len(), 1);
    assert!(editor.history().peek().is_some_and(Snapshot::is_empty));

    editor.undo();
    assert!(editor.elements().is_empty());
}

#[test]
fn test_history_depth_from_config() {
    let config = EditorConfig {
        history_depth: 3,
        ..EditorConfig::default()
    };
    let mut editor = Editor::with_config(RgbaImage::new(100, 100), &config).unwrap();
    add_stamps(&mut editor, 6);
    assert_eq!(editor.history().len(), 3);
}

#[test]
fn test_render_after_undo_matches_original() {
    let mut editor = create_test_editor();
    let clean = editor.flatten();
    add_stamps(&mut editor, 3);
    assert_ne!(editor.flatten(), clean);

    for _ in 0..3 {
        editor.undo();
    }
    assert_eq!(editor.flatten(), clean);
}
