//! Property binding between the canvas and an external property editor.
//!
//! Selection changes are turned into an [`EditorView`] for the editor; edits
//! coming back from the editor are applied to the selected widget through
//! [`Canvas::apply_property`].

use crate::canvas::{Canvas, CanvasEvent, PropertyOutcome};
use crate::error::CanvasResult;
use crate::facade::RenderFacade;
use crate::geometry::WidgetRect;
use crate::property::PropertyValue;
use crate::registry::{PlacedWidget, WidgetId};

/// One editable row.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorEntry {
    pub name: String,
    pub value: PropertyValue,
}

/// A titled group of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorGroup {
    pub title: String,
    pub entries: Vec<EditorEntry>,
}

/// Everything the editor needs to show one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorView {
    pub widget: WidgetId,
    pub type_tag: String,
    pub groups: Vec<EditorGroup>,
}

impl EditorView {
    /// Build the view for a widget: one group per descriptor group, holding
    /// the group's names that the widget actually carries.
    pub fn for_widget(widget: &PlacedWidget) -> Self {
        let groups = widget
            .descriptor
            .groups()
            .iter()
            .map(|group| EditorGroup {
                title: group.title.clone(),
                entries: group
                    .names
                    .iter()
                    .filter_map(|&name| {
                        widget.property(name).map(|value| EditorEntry {
                            name: name.to_string(),
                            value: value.clone(),
                        })
                    })
                    .collect(),
            })
            .filter(|group| !group.entries.is_empty())
            .collect();
        Self {
            widget: widget.id,
            type_tag: widget.type_tag.clone(),
            groups,
        }
    }

    /// Look up a row by property name.
    pub fn entry(&self, name: &str) -> Option<&EditorEntry> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter())
            .find(|e| e.name == name)
    }
}

/// The property editor panel, implemented by the front end.
pub trait PropertyEditor {
    /// Replace the panel contents.
    fn show(&mut self, view: EditorView);

    /// Empty the panel.
    fn clear(&mut self);

    /// The shown widget moved or was resized on the canvas.
    fn geometry_changed(&mut self, id: WidgetId, rect: WidgetRect);
}

/// Keeps a [`PropertyEditor`] in step with the canvas.
pub struct PropertyBinding<E: PropertyEditor> {
    editor: E,
    shown: Option<WidgetId>,
}

impl<E: PropertyEditor> PropertyBinding<E> {
    pub fn new(editor: E) -> Self {
        Self { editor, shown: None }
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    /// Widget currently shown in the editor.
    pub fn shown(&self) -> Option<WidgetId> {
        self.shown
    }

    /// React to one canvas notification.
    pub fn on_event<F: RenderFacade>(&mut self, canvas: &Canvas<F>, event: &CanvasEvent) {
        match *event {
            CanvasEvent::Selected(id) => {
                if let Some(widget) = canvas.get(id) {
                    self.editor.show(EditorView::for_widget(widget));
                    self.shown = Some(id);
                }
            }
            CanvasEvent::GeometryChanged(id, rect) => {
                if self.shown == Some(id) {
                    self.editor.geometry_changed(id, rect);
                }
            }
            CanvasEvent::Removed(id) => {
                if self.shown == Some(id) {
                    self.editor.clear();
                    self.shown = None;
                }
            }
            CanvasEvent::Cleared => {
                self.editor.clear();
                self.shown = None;
            }
        }
    }

    /// Apply an edit from the editor to the selected widget.
    ///
    /// Returns `Ok(None)` when nothing is selected.
    pub fn property_changed<F: RenderFacade>(
        &mut self,
        canvas: &mut Canvas<F>,
        name: &str,
        value: PropertyValue,
    ) -> CanvasResult<Option<PropertyOutcome>> {
        let Some(id) = canvas.selected() else {
            return Ok(None);
        };
        let outcome = canvas.apply_property(id, name, value)?;
        log::debug!("Property '{}' of {}: {:?}", name, id, outcome);
        Ok(Some(outcome))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::facade::HeadlessFacade;
    use crate::property::GEOMETRY;
    use kurbo::Point;

    /// Editor that records what it was told.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingEditor {
        pub view: Option<EditorView>,
        pub geometry: Vec<(WidgetId, WidgetRect)>,
        pub clears: usize,
    }

    impl PropertyEditor for RecordingEditor {
        fn show(&mut self, view: EditorView) {
            self.view = Some(view);
        }

        fn clear(&mut self) {
            self.view = None;
            self.clears += 1;
        }

        fn geometry_changed(&mut self, id: WidgetId, rect: WidgetRect) {
            self.geometry.push((id, rect));
        }
    }

    fn dispatch(binding: &mut PropertyBinding<RecordingEditor>, canvas: &mut Canvas<HeadlessFacade>) {
        for event in canvas.take_events() {
            binding.on_event(canvas, &event);
        }
    }

    #[test]
    fn test_view_groups_follow_descriptor() {
        let mut canvas = Canvas::new(HeadlessFacade::new());
        let id = canvas.create_widget("check-box", Point::new(0.0, 0.0));
        let view = EditorView::for_widget(canvas.get(id).unwrap());

        let titles: Vec<_> = view.groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["Basic", "Check Box"]);
        let names: Vec<_> = view.groups[1].entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["text", "checked", "tristate"]);
        assert_eq!(view.entry("text").unwrap().value, PropertyValue::from("Check box"));
    }

    #[test]
    fn test_selection_shows_and_delete_clears() {
        let mut canvas = Canvas::new(HeadlessFacade::new());
        let mut binding = PropertyBinding::new(RecordingEditor::default());

        let id = canvas.create_widget("button", Point::new(0.0, 0.0));
        dispatch(&mut binding, &mut canvas);
        assert_eq!(binding.shown(), Some(id));
        assert_eq!(binding.editor().view.as_ref().unwrap().type_tag, "button");

        canvas.delete_widget(id);
        dispatch(&mut binding, &mut canvas);
        assert_eq!(binding.shown(), None);
        assert!(binding.editor().view.is_none());
        assert_eq!(binding.editor().clears, 1);
    }

    #[test]
    fn test_geometry_changes_reach_editor() {
        let mut canvas = Canvas::new(HeadlessFacade::new());
        let mut binding = PropertyBinding::new(RecordingEditor::default());
        let id = canvas.create_widget("label", Point::new(0.0, 0.0));
        dispatch(&mut binding, &mut canvas);

        binding
            .property_changed(&mut canvas, GEOMETRY, WidgetRect::new(20, 20, 80, 20).into())
            .unwrap();
        dispatch(&mut binding, &mut canvas);
        assert_eq!(binding.editor().geometry, [(id, WidgetRect::new(20, 20, 80, 20))]);
    }

    #[test]
    fn test_property_changed_needs_selection() {
        let mut canvas = Canvas::new(HeadlessFacade::new());
        let mut binding = PropertyBinding::new(RecordingEditor::default());
        assert_eq!(
            binding.property_changed(&mut canvas, "text", "x".into()).unwrap(),
            None
        );

        let id = canvas.create_widget("text-field", Point::new(0.0, 0.0));
        let outcome = binding
            .property_changed(&mut canvas, "placeholderText", "Email".into())
            .unwrap();
        assert_eq!(outcome, Some(PropertyOutcome::Applied));
        assert_eq!(
            canvas.get(id).unwrap().property("placeholderText"),
            Some(&PropertyValue::from("Email"))
        );

        let outcome = binding
            .property_changed(&mut canvas, "readOnly", true.into())
            .unwrap();
        assert_eq!(outcome, Some(PropertyOutcome::Skipped));
        assert_eq!(
            canvas.get(id).unwrap().property("readOnly"),
            Some(&PropertyValue::Bool(true))
        );
    }
}
