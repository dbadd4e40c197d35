//! Replays a short map view session and prints what the tools did.
//!
//! Run with `RUST_LOG=debug` to see the tool box switching tools.

use void_editor::{EditorPreferences, MapDocument, MapViewToolBox};
use void_tools::{InputState, MouseButtons, RenderCommand};

fn left(position: [f32; 2]) -> InputState {
    InputState::new(position).with_buttons(MouseButtons::LEFT)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let preferences = EditorPreferences::load_or_default();
    let document = MapDocument::new().into_shared();
    let brush = document.borrow_mut().add_brush(
        [0.0, 0.0],
        vec![[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]],
    );

    let mut session = MapViewToolBox::new(document.clone(), &preferences)?;

    // Select the brush and drag it to the right.
    session.mouse_up(&left([0.0, 0.0]));
    if session.start_mouse_drag(&left([0.0, 0.0])) {
        session.mouse_drag(&left([4.0, 0.0]));
        session.end_mouse_drag(&left([4.0, 0.0]));
    }
    log::info!(
        "Brush {} now at {:?}",
        brush,
        document.borrow().object(brush).map(|object| object.position)
    );

    // Rotate it a quarter turn around the origin.
    session.toggle_rotate_objects_tool();
    if session.rotate_objects_tool_active() {
        log::info!("Tool page: {}", session.current_page().name());
        let center = session.rotate_tool_center();
        session.move_rotation_center([-center[0], -center[1]]);
        if session.start_mouse_drag(&left([1.0, 0.0])) {
            session.mouse_drag(&left([0.0, 1.0]));
            session.end_mouse_drag(&left([0.0, 1.0]));
        }
        log::info!("Rotated by {} degrees", session.rotate_tool_angle());

        let mut batch: Vec<RenderCommand> = Vec::new();
        let context = session.render(&InputState::new([0.0, 0.0]), &mut batch);
        log::info!(
            "Render: {} commands, selection guide: {}",
            batch.len(),
            context.show_selection_guide()
        );
        session.toggle_rotate_objects_tool();
    }

    // Drop a light onto the view.
    let payload = "entity:light";
    if session.drag_enter(&InputState::new([2.0, 2.0]), payload) {
        session.drag_move(&InputState::new([3.0, 2.0]), payload);
        session.drag_drop(&InputState::new([3.0, 3.0]), payload);
    }

    for object in document.borrow().objects() {
        println!("{} {:?} at {:?}", object.id, object.kind, object.position);
    }
    Ok(())
}
