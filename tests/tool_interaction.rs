use egui::{Color32, Key, Modifiers};
use image::RgbaImage;
use screenmark::element::{Element, ElementType};
use screenmark::font::FontSpec;
use screenmark::geometry::{HandlePosition, Point};
use screenmark::input::{KeyEvent, PointerButtons, PointerEvent};
use screenmark::tools::Tool;
use screenmark::{Command, Editor, EditorConfig, EditorError, ToolKind};

fn create_test_editor() -> Editor {
    let image = RgbaImage::from_pixel(300, 200, image::Rgba([40, 40, 40, 255]));
    Editor::new(image).unwrap()
}

fn click(editor: &mut Editor, x: i32, y: i32) {
    editor.handle_pointer_down(PointerEvent::primary(x, y));
    editor.handle_pointer_up(PointerEvent::primary(x, y));
}

fn drag(editor: &mut Editor, from: (i32, i32), to: (i32, i32)) {
    editor.handle_pointer_down(PointerEvent::primary(from.0, from.1));
    let mid = ((from.0 + to.0) / 2, (from.1 + to.1) / 2);
    editor.handle_pointer_move(PointerEvent::primary(mid.0, mid.1));
    editor.handle_pointer_move(PointerEvent::primary(to.0, to.1));
    editor.handle_pointer_up(PointerEvent::primary(to.0, to.1));
}

fn stamp_numbers(editor: &Editor) -> Vec<u32> {
    editor
        .elements()
        .iter()
        .filter_map(|element| element.as_stamp().map(|stamp| stamp.number()))
        .collect()
}

#[test]
fn test_arrow_tool_commits_on_release() {
    let mut editor = create_test_editor();
    editor.set_active_tool("arrow").unwrap();

    editor.handle_pointer_down(PointerEvent::primary(10, 10));
    editor.handle_pointer_move(PointerEvent::primary(60, 40));
    // Only a preview while dragging
    assert!(editor.elements().is_empty());
    assert!(editor.context().preview.active);
    assert_eq!(editor.active_tool().current_state_name(), "previewing");
    // The preview shows up in the display image but not in the flattened one
    assert_ne!(editor.display_image(), editor.flatten());

    editor.handle_pointer_up(PointerEvent::primary(60, 40));
    assert_eq!(editor.elements().len(), 1);
    assert!(!editor.context().preview.active);
    match &editor.elements()[0] {
        ElementType::Arrow(arrow) => {
            assert_eq!(arrow.start(), Point::new(10, 10));
            assert_eq!(arrow.end(), Point::new(60, 40));
            assert_eq!(arrow.width(), editor.stroke_width());
            assert_eq!(arrow.color(), editor.color());
        }
        other => panic!("expected an arrow, got {other:?}"),
    }
}

#[test]
fn test_zero_area_shapes_are_ignored() {
    let mut editor = create_test_editor();
    let history_before = editor.history().len();

    editor.set_active_tool("arrow").unwrap();
    click(&mut editor, 50, 50);
    editor.set_active_tool("rectangle").unwrap();
    drag(&mut editor, (20, 20), (80, 20));

    assert!(editor.elements().is_empty());
    assert_eq!(editor.history().len(), history_before);
    assert!(!editor.context().preview.active);
}

#[test]
fn test_rectangle_from_any_drag_direction() {
    let mut editor = create_test_editor();
    editor.set_active_tool("Rectangle").unwrap();
    drag(&mut editor, (120, 90), (20, 30));

    match &editor.elements()[0] {
        ElementType::Rectangle(rect) => {
            assert_eq!(rect.rect(), screenmark::Rect::from_ltrb(20, 30, 120, 90));
        }
        other => panic!("expected a rectangle, got {other:?}"),
    }
}

#[test]
fn test_select_then_click_empty_space_clears_selection() {
    let mut editor = create_test_editor();
    editor.set_active_tool("stamp").unwrap();
    click(&mut editor, 50, 50);
    editor.set_active_tool("select").unwrap();

    click(&mut editor, 50, 50);
    assert!(editor.has_selection());

    click(&mut editor, 250, 150);
    assert!(!editor.has_selection());
    assert!(editor.selected_element().is_none());
    assert!(editor.elements().iter().all(|element| !element.is_selected()));
}

#[test]
fn test_selection_is_exclusive_and_topmost() {
    let mut editor = create_test_editor();
    editor.set_active_tool("stamp").unwrap();
    click(&mut editor, 50, 50);
    click(&mut editor, 60, 50);
    editor.set_active_tool("select").unwrap();

    // Overlap: the later stamp is on top
    click(&mut editor, 55, 50);
    let top = editor.elements()[1].id();
    assert_eq!(editor.selected_element().map(|e| e.id()), Some(top));

    // Far left edge of the first stamp only
    click(&mut editor, 36, 50);
    let bottom = editor.elements()[0].id();
    assert_eq!(editor.selected_element().map(|e| e.id()), Some(bottom));
    assert_eq!(editor.elements().iter().filter(|e| e.is_selected()).count(), 1);
}

#[test]
fn test_drag_moves_selected_element_without_snapshot() {
    let mut editor = create_test_editor();
    editor.set_active_tool("stamp").unwrap();
    click(&mut editor, 50, 50);
    editor.set_active_tool("select").unwrap();
    let history_before = editor.history().len();

    drag(&mut editor, (50, 50), (90, 70));

    let stamp = editor.elements()[0].as_stamp().unwrap();
    assert_eq!(stamp.center(), Point::new(90, 70));
    assert_eq!(editor.history().len(), history_before);
    assert_eq!(editor.active_tool().current_state_name(), "idle");
}

#[test]
fn test_handle_hit_takes_priority_over_reselection() {
    let mut editor = create_test_editor();
    editor.set_active_tool("stamp").unwrap();
    click(&mut editor, 100, 100);
    click(&mut editor, 120, 120);
    editor.set_active_tool("select").unwrap();

    // Select the first (lower) stamp by a point the second does not cover
    click(&mut editor, 92, 92);
    let first = editor.elements()[0].id();
    assert_eq!(editor.selected_element().map(|e| e.id()), Some(first));

    // Its bottom-right handle sits at (117, 117), inside the second stamp
    let bounds = editor.elements()[0].bounds();
    let handle = Point::new(bounds.right, bounds.bottom);
    assert!(editor.elements()[1].contains(handle));

    editor.handle_pointer_down(PointerEvent::new(handle, PointerButtons::PRIMARY));
    let tool = editor.active_tool().as_selection_tool().unwrap();
    assert_eq!(tool.active_handle(), Some(HandlePosition::BottomRight));
    assert_eq!(editor.selected_element().map(|e| e.id()), Some(first));

    // Dragging a handle leaves the geometry alone
    editor.handle_pointer_move(PointerEvent::new(handle.offset(20, 20), PointerButtons::PRIMARY));
    editor.handle_pointer_up(PointerEvent::new(handle.offset(20, 20), PointerButtons::PRIMARY));
    assert_eq!(editor.elements()[0].bounds(), bounds);
    assert_eq!(editor.active_tool().current_state_name(), "idle");
}

#[test]
fn test_delete_second_of_three() {
    let mut editor = create_test_editor();
    editor.set_active_tool("stamp").unwrap();
    click(&mut editor, 30, 30);
    click(&mut editor, 130, 30);
    click(&mut editor, 230, 30);

    let ids: Vec<_> = editor.elements().iter().map(|e| e.id()).collect();
    editor.select(Some(ids[1]));
    assert!(editor.delete_element(ids[1]));

    let remaining: Vec<_> = editor.elements().iter().map(|e| e.id()).collect();
    assert_eq!(remaining, vec![ids[0], ids[2]]);
    assert!(!editor.has_selection());

    // One undo brings it back in place
    editor.undo();
    let restored: Vec<_> = editor.elements().iter().map(|e| e.id()).collect();
    assert_eq!(restored, ids);
}

#[test]
fn test_delete_key_removes_selection() {
    let mut editor = create_test_editor();
    editor.set_active_tool("stamp").unwrap();
    click(&mut editor, 40, 40);
    editor.set_active_tool("select").unwrap();
    click(&mut editor, 40, 40);

    assert!(editor.handle_key(KeyEvent::plain(Key::Delete)));
    assert!(editor.elements().is_empty());
    // Nothing selected: Delete does nothing
    assert!(!editor.handle_key(KeyEvent::plain(Key::Delete)));
}

#[test]
fn test_stamp_counter_survives_undo() {
    let mut editor = create_test_editor();
    editor.set_active_tool("stamp").unwrap();
    click(&mut editor, 20, 20);
    click(&mut editor, 60, 20);
    click(&mut editor, 100, 20);
    assert_eq!(stamp_numbers(&editor), vec![1, 2, 3]);

    editor.undo();
    assert_eq!(stamp_numbers(&editor), vec![1, 2]);

    click(&mut editor, 140, 20);
    assert_eq!(stamp_numbers(&editor), vec![1, 2, 4]);
}

#[test]
fn test_reset_rewinds_stamp_counter() {
    let mut editor = create_test_editor();
    editor.set_active_tool("stamp").unwrap();
    click(&mut editor, 20, 20);
    click(&mut editor, 60, 20);

    editor.reset();
    click(&mut editor, 20, 20);
    assert_eq!(stamp_numbers(&editor), vec![1]);
}

#[test]
fn test_text_commit_on_enter() {
    let mut editor = create_test_editor();
    editor.set_active_tool("text").unwrap();
    click(&mut editor, 40, 40);
    assert_eq!(editor.active_tool().current_state_name(), "editing");

    editor.handle_text("Line one");
    editor.handle_key(KeyEvent::new(Key::Enter, Modifiers::SHIFT));
    editor.handle_text("Line two!");
    editor.handle_key(KeyEvent::plain(Key::Backspace));
    assert!(editor.elements().is_empty());

    assert!(editor.handle_key(KeyEvent::plain(Key::Enter)));
    assert_eq!(editor.elements().len(), 1);
    let element = &editor.elements()[0];
    assert_eq!(element.element_type(), "shadowed_text");
    assert_eq!(element.text(), Some("Line one\nLine two"));
    assert_eq!(element.bounds().origin(), Point::new(40, 40));
}

#[test]
fn test_text_escape_and_blank_are_discarded() {
    let mut editor = create_test_editor();
    editor.set_active_tool("text").unwrap();
    let history_before = editor.history().len();

    click(&mut editor, 40, 40);
    editor.handle_text("never mind");
    editor.handle_key(KeyEvent::plain(Key::Escape));
    assert_eq!(editor.active_tool().current_state_name(), "idle");

    click(&mut editor, 40, 40);
    editor.handle_text("   ");
    editor.handle_key(KeyEvent::plain(Key::Enter));

    assert!(editor.elements().is_empty());
    assert_eq!(editor.history().len(), history_before);
}

#[test]
fn test_text_click_elsewhere_commits_pending() {
    let mut editor = create_test_editor();
    editor.set_active_tool("text").unwrap();
    click(&mut editor, 10, 10);
    editor.handle_text("first");
    click(&mut editor, 100, 100);
    editor.handle_text("second");
    editor.focus_lost();

    let texts: Vec<_> = editor.elements().iter().filter_map(|e| e.text()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[test]
fn test_plain_text_when_shadow_disabled() {
    let config = EditorConfig {
        text_shadow: false,
        default_tool: ToolKind::Text,
        ..EditorConfig::default()
    };
    let mut editor = Editor::with_config(RgbaImage::new(100, 100), &config).unwrap();
    click(&mut editor, 5, 5);
    editor.handle_text("plain");
    editor.handle_key(KeyEvent::plain(Key::Enter));
    assert_eq!(editor.elements()[0].element_type(), "text");
}

#[test]
fn test_switching_tools_cancels_preview() {
    let mut editor = create_test_editor();
    editor.set_active_tool("rectangle").unwrap();
    editor.handle_pointer_down(PointerEvent::primary(10, 10));
    editor.handle_pointer_move(PointerEvent::primary(50, 50));

    editor.set_active_tool("arrow").unwrap();
    assert!(!editor.context().preview.active);
    // A stray release after the switch creates nothing
    editor.handle_pointer_up(PointerEvent::primary(50, 50));
    assert!(editor.elements().is_empty());
}

#[test]
fn test_escape_cancels_preview() {
    let mut editor = create_test_editor();
    editor.set_active_tool("arrow").unwrap();
    editor.handle_pointer_down(PointerEvent::primary(10, 10));
    editor.handle_pointer_move(PointerEvent::primary(50, 50));

    assert!(editor.handle_key(KeyEvent::plain(Key::Escape)));
    editor.handle_pointer_up(PointerEvent::primary(50, 50));
    assert!(editor.elements().is_empty());
    assert_eq!(editor.display_image(), editor.flatten());
}

#[test]
fn test_secondary_button_is_ignored() {
    let mut editor = create_test_editor();
    editor.set_active_tool("stamp").unwrap();
    editor.handle_pointer_down(PointerEvent::new(Point::new(20, 20), PointerButtons::SECONDARY));
    assert!(editor.elements().is_empty());
}

#[test]
fn test_unknown_tool_is_an_error() {
    let mut editor = create_test_editor();
    editor.set_active_tool("arrow").unwrap();

    let result = editor.set_active_tool("lasso");
    assert!(matches!(result, Err(EditorError::UnknownTool(name)) if name == "lasso"));
    assert_eq!(editor.active_tool_kind(), ToolKind::Arrow);

    let result = editor.execute(Command::SetTool("spray".to_owned()));
    assert!(result.is_err());
}

#[test]
fn test_commands_update_drawing_settings() {
    let mut editor = create_test_editor();
    editor.execute(Command::SetColor(Color32::BLUE)).unwrap();
    editor.execute(Command::SetStrokeWidth(99)).unwrap();
    editor.execute(Command::SetTool("arrow".to_owned())).unwrap();

    assert_eq!(editor.color(), Color32::BLUE);
    assert_eq!(editor.stroke_width(), 50);
    assert_eq!(editor.active_tool_kind(), ToolKind::Arrow);
}

#[test]
fn test_cursor_follows_tool() {
    let mut editor = create_test_editor();
    assert_eq!(editor.cursor(None), egui::CursorIcon::Default);
    editor.set_active_tool("text").unwrap();
    assert_eq!(editor.cursor(None), egui::CursorIcon::Text);
    editor.set_active_tool("arrow").unwrap();
    assert_eq!(editor.cursor(None), egui::CursorIcon::Crosshair);
}

#[test]
fn test_set_font_command_clamps_size() {
    let mut editor = create_test_editor();
    editor
        .execute(Command::SetFont(FontSpec::proportional(-20.0)))
        .unwrap();
    assert_eq!(editor.font().size, 4.0);

    editor.set_active_tool("text").unwrap();
    click(&mut editor, 40, 40);
    editor.handle_text("tiny");
    editor.handle_key(KeyEvent::plain(Key::Enter));

    let bounds = editor.elements()[0].bounds();
    assert!(!bounds.is_empty());
    assert!(editor.elements()[0].contains(Point::new(bounds.center_x(), bounds.center_y())));
}
