//! An editor session: one canvas wired to one property editor.

use crate::binding::{PropertyBinding, PropertyEditor};
use crate::canvas::{Canvas, DuplicateReport, MenuAction, PropertyOutcome};
use crate::error::CanvasResult;
use crate::facade::RenderFacade;
use crate::input::PointerEvent;
use crate::property::PropertyValue;
use crate::registry::WidgetId;
use kurbo::Point;
use std::path::Path;

/// Routes front-end input into the canvas and canvas notifications into the
/// property editor. Every mutating call dispatches pending notifications
/// before returning.
pub struct EditorSession<F: RenderFacade, E: PropertyEditor> {
    canvas: Canvas<F>,
    binding: PropertyBinding<E>,
}

impl<F: RenderFacade, E: PropertyEditor> EditorSession<F, E> {
    pub fn new(canvas: Canvas<F>, editor: E) -> Self {
        Self {
            canvas,
            binding: PropertyBinding::new(editor),
        }
    }

    pub fn canvas(&self) -> &Canvas<F> {
        &self.canvas
    }

    pub fn editor(&self) -> &E {
        self.binding.editor()
    }

    pub fn binding(&self) -> &PropertyBinding<E> {
        &self.binding
    }

    /// Deliver pending canvas notifications to the binding.
    pub fn dispatch(&mut self) {
        for event in self.canvas.take_events() {
            self.binding.on_event(&self.canvas, &event);
        }
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        self.canvas.handle_pointer(event);
        self.dispatch();
    }

    /// Palette drop.
    pub fn drop_widget(&mut self, type_tag: &str, position: Point) -> WidgetId {
        let id = self.canvas.drop_widget(type_tag, position);
        self.dispatch();
        id
    }

    pub fn duplicate(&mut self, id: WidgetId) -> CanvasResult<DuplicateReport> {
        let report = self.canvas.duplicate_widget(id);
        self.dispatch();
        report
    }

    pub fn delete(&mut self, id: WidgetId) -> bool {
        let deleted = self.canvas.delete_widget(id);
        self.dispatch();
        deleted
    }

    pub fn delete_selected(&mut self) -> bool {
        let deleted = self.canvas.delete_selected();
        self.dispatch();
        deleted
    }

    /// Run a context-menu action.
    pub fn activate(&mut self, action: &MenuAction) -> CanvasResult<Option<WidgetId>> {
        let result = self.canvas.activate(action);
        self.dispatch();
        result
    }

    /// An edit coming from the property editor.
    pub fn property_changed(
        &mut self,
        name: &str,
        value: PropertyValue,
    ) -> CanvasResult<Option<PropertyOutcome>> {
        let result = self.binding.property_changed(&mut self.canvas, name, value);
        self.dispatch();
        result
    }

    /// Start an empty project.
    pub fn new_project(&mut self) {
        self.canvas.clear();
        self.dispatch();
    }

    pub fn save_file(&self, path: &Path) -> CanvasResult<()> {
        self.canvas.save_file(path)
    }

    /// Replace the canvas with a project file. On failure nothing changes.
    pub fn load_file(&mut self, path: &Path) -> CanvasResult<usize> {
        let result = self.canvas.load_file(path);
        self.dispatch();
        result
    }

    /// Give the canvas back, dropping the editor.
    pub fn into_canvas(self) -> Canvas<F> {
        self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::tests::RecordingEditor;
    use crate::facade::HeadlessFacade;
    use crate::geometry::WidgetRect;
    use tempfile::tempdir;

    fn session() -> EditorSession<HeadlessFacade, RecordingEditor> {
        EditorSession::new(Canvas::new(HeadlessFacade::new()), RecordingEditor::default())
    }

    #[test]
    fn test_drag_updates_editor() {
        let mut session = session();
        let id = session.drop_widget("button", Point::new(0.0, 0.0));
        assert_eq!(session.binding().shown(), Some(id));

        session.pointer(PointerEvent::left_down(50.0, 15.0));
        session.pointer(PointerEvent::moved(90.0, 15.0));
        session.pointer(PointerEvent::left_up(90.0, 15.0));
        assert_eq!(session.editor().geometry, [(id, WidgetRect::new(40, 0, 100, 30))]);
    }

    #[test]
    fn test_duplicate_shows_copy() {
        let mut session = session();
        let id = session.drop_widget("spin-box", Point::new(0.0, 0.0));
        let report = session.duplicate(id).unwrap();
        assert_eq!(session.binding().shown(), Some(report.id));
        assert_eq!(session.editor().view.as_ref().unwrap().widget, report.id);
    }

    #[test]
    fn test_edit_and_new_project() {
        let mut session = session();
        session.drop_widget("group-box", Point::new(0.0, 0.0));
        let outcome = session.property_changed("title", "Options".into()).unwrap();
        assert_eq!(outcome, Some(PropertyOutcome::Applied));

        session.new_project();
        assert!(session.canvas().is_empty());
        assert!(session.editor().view.is_none());
    }

    #[test]
    fn test_file_roundtrip_and_failed_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("form.bform");

        let mut session = session();
        session.drop_widget("list", Point::new(0.0, 0.0));
        session.property_changed("items", vec!["Red".to_string()].into()).unwrap();
        session.save_file(&path).unwrap();

        let mut other = self::session();
        assert_eq!(other.load_file(&path).unwrap(), 1);
        assert_eq!(other.canvas().to_document(), session.canvas().to_document());

        assert!(other.load_file(&dir.path().join("missing.bform")).is_err());
        assert_eq!(other.canvas().len(), 1);
    }
}
