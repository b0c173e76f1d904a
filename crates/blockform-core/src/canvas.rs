//! The interactive canvas: placed widgets, selection and pointer gestures.

use crate::catalog::{self, Capabilities};
use crate::config::CanvasConfig;
use crate::error::{CanvasError, CanvasResult};
use crate::facade::{HighlightStyle, RenderFacade};
use crate::geometry::{GridConfig, WidgetRect};
use crate::input::{MouseButton, PointerEvent};
use crate::property::{GEOMETRY, PropertyValue};
use crate::registry::{PlacedWidget, WidgetId, WidgetRegistry};
use crate::selection::{
    CursorHint, InteractionState, ResizeHandle, handle_rects, hit_test_handle, resize_rect,
};
use crate::storage::{self, ProjectDocument, WidgetRecord};
use kurbo::{Line, Point, Rect, Vec2};
use std::collections::HashMap;
use std::path::Path;

/// Notification emitted by the canvas for the property binding.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// A widget became (or was re-announced as) the selection.
    Selected(WidgetId),
    GeometryChanged(WidgetId, WidgetRect),
    Removed(WidgetId),
    /// Every widget was removed.
    Cleared,
}

/// Result of pushing one property to a live widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyOutcome {
    Applied,
    /// The live widget has no setter for this property.
    Skipped,
    Failed(String),
}

/// Per-property outcomes of a duplicate.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateReport {
    /// The new widget.
    pub id: WidgetId,
    pub outcomes: Vec<(String, PropertyOutcome)>,
}

impl DuplicateReport {
    pub fn outcome(&self, name: &str) -> Option<&PropertyOutcome> {
        self.outcomes.iter().find(|(n, _)| n == name).map(|(_, o)| o)
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|(name, outcome)| match outcome {
            PropertyOutcome::Failed(reason) => Some((name.as_str(), reason.as_str())),
            _ => None,
        })
    }
}

/// An entry of a context menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    EditProperties(WidgetId),
    Duplicate(WidgetId),
    Delete(WidgetId),
    Create {
        type_tag: &'static str,
        position: Point,
    },
}

impl MenuAction {
    pub fn label(&self) -> String {
        match self {
            MenuAction::EditProperties(_) => "Edit Properties".to_string(),
            MenuAction::Duplicate(_) => "Duplicate".to_string(),
            MenuAction::Delete(_) => "Delete".to_string(),
            MenuAction::Create { type_tag, .. } => catalog::describe(type_tag)
                .map(|d| d.kind.display_name())
                .unwrap_or(*type_tag)
                .to_string(),
        }
    }
}

/// Menu offered for a right-click.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextMenu {
    /// Right-click on a placed widget.
    Widget {
        id: WidgetId,
        actions: Vec<MenuAction>,
    },
    /// Right-click on empty canvas: one create entry per catalog type.
    Canvas {
        position: Point,
        actions: Vec<MenuAction>,
    },
}

impl ContextMenu {
    pub fn actions(&self) -> &[MenuAction] {
        match self {
            ContextMenu::Widget { actions, .. } | ContextMenu::Canvas { actions, .. } => actions,
        }
    }
}

/// Canvas state of one editor session.
pub struct Canvas<F: RenderFacade> {
    registry: WidgetRegistry,
    selected: Option<WidgetId>,
    interaction: InteractionState,
    config: CanvasConfig,
    highlight: HighlightStyle,
    /// Setter capabilities reported by the facade for each live widget.
    live: HashMap<WidgetId, Capabilities>,
    facade: F,
    events: Vec<CanvasEvent>,
}

impl<F: RenderFacade> Canvas<F> {
    /// Create an empty canvas with the default configuration.
    pub fn new(facade: F) -> Self {
        Self {
            registry: WidgetRegistry::new(),
            selected: None,
            interaction: InteractionState::Idle,
            config: CanvasConfig::default(),
            highlight: HighlightStyle::default(),
            live: HashMap::new(),
            facade,
            events: Vec::new(),
        }
    }

    /// Create an empty canvas, rejecting invalid configuration.
    pub fn with_config(facade: F, config: CanvasConfig) -> CanvasResult<Self> {
        config.validate()?;
        let highlight = config.highlight.style()?;
        let mut canvas = Self::new(facade);
        canvas.config = config;
        canvas.highlight = highlight;
        Ok(canvas)
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridConfig {
        &self.config.grid
    }

    /// Change the grid spacing. Non-positive sizes leave the grid unchanged.
    pub fn set_grid_size(&mut self, size: i32) -> CanvasResult<()> {
        self.config.grid.set_size(size)
    }

    pub fn set_snap(&mut self, snap: bool) {
        self.config.grid.snap = snap;
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.config.grid.show = show;
    }

    /// Grid lines to paint across the canvas.
    pub fn grid_lines(&self) -> impl Iterator<Item = Line> + '_ {
        let size = self.config.canvas_size;
        self.config.grid.lines(size.width, size.height)
    }

    pub fn facade(&self) -> &F {
        &self.facade
    }

    pub fn facade_mut(&mut self) -> &mut F {
        &mut self.facade
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn get(&self, id: WidgetId) -> Option<&PlacedWidget> {
        self.registry.get(id)
    }

    /// Widgets in creation order.
    pub fn widgets(&self) -> impl Iterator<Item = &PlacedWidget> + Clone {
        self.registry.all()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn selected(&self) -> Option<WidgetId> {
        self.selected
    }

    pub fn selected_widget(&self) -> Option<&PlacedWidget> {
        self.selected.and_then(|id| self.registry.get(id))
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Setters the live widget supports.
    pub fn capabilities(&self, id: WidgetId) -> Option<Capabilities> {
        self.live.get(&id).copied().or_else(|| {
            self.registry
                .get(id)
                .map(|w| w.descriptor.capabilities)
        })
    }

    /// Drain pending notifications.
    pub fn take_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    /// Topmost widget under `point`.
    pub fn widget_at(&self, point: Point) -> Option<WidgetId> {
        self.registry.widget_at(point)
    }

    // --- Registry operations ---

    /// Place a new widget of `type_tag` with its top-left at `position`.
    ///
    /// The position is snapped when snapping is on. Unknown tags create a
    /// placeholder. The new widget becomes the selection.
    pub fn create_widget(&mut self, type_tag: &str, position: Point) -> WidgetId {
        let rect = self.drop_preview(type_tag, position);
        let id = self.registry.insert(type_tag, rect);
        self.instantiate(id);
        log::info!("Created {} widget {} at ({}, {})", type_tag, id, rect.x, rect.y);
        self.select_existing(id);
        id
    }

    /// Palette drop: same as [`Canvas::create_widget`].
    pub fn drop_widget(&mut self, type_tag: &str, position: Point) -> WidgetId {
        self.create_widget(type_tag, position)
    }

    /// Rectangle a widget of `type_tag` dropped at `position` would occupy.
    pub fn drop_preview(&self, type_tag: &str, position: Point) -> WidgetRect {
        let origin = self
            .config
            .grid
            .apply_to_point(Point::new(position.x.max(0.0), position.y.max(0.0)));
        catalog::describe_or_placeholder(type_tag)
            .default_rect(origin.x.round() as i32, origin.y.round() as i32)
    }

    /// Copy a widget, offset from the original, and select the copy.
    ///
    /// Every property except geometry is copied into the new record and pushed
    /// to the new live widget; the report lists how each push went.
    pub fn duplicate_widget(&mut self, id: WidgetId) -> CanvasResult<DuplicateReport> {
        let source = self.registry.get(id).ok_or(CanvasError::NotFound(id))?;
        let type_tag = source.type_tag.clone();
        let offset = self.config.duplicate_offset;
        let rect = source
            .geometry()
            .translate(offset, offset)
            .normalized(self.config.min_widget_size);
        let properties: Vec<(String, PropertyValue)> = source
            .properties
            .iter()
            .filter(|(name, _)| name.as_str() != GEOMETRY)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        let new_id = self.registry.insert(&type_tag, rect);
        let caps = self.instantiate_bare(new_id);

        let mut outcomes = Vec::with_capacity(properties.len());
        for (name, value) in properties {
            if let Some(widget) = self.registry.get_mut(new_id) {
                widget.write_property(&name, value.clone());
            }
            let outcome = self.push_property(new_id, caps, &name, &value);
            match &outcome {
                PropertyOutcome::Applied => {}
                PropertyOutcome::Skipped => {
                    log::debug!("Duplicate of {}: no setter for '{}'", id, name)
                }
                PropertyOutcome::Failed(reason) => {
                    log::warn!("Duplicate of {}: copying '{}' failed: {}", id, name, reason)
                }
            }
            outcomes.push((name, outcome));
        }

        log::info!("Duplicated widget {} as {}", id, new_id);
        self.select_existing(new_id);
        Ok(DuplicateReport {
            id: new_id,
            outcomes,
        })
    }

    /// Remove a widget. Returns `false` when the id is unknown.
    pub fn delete_widget(&mut self, id: WidgetId) -> bool {
        if self.registry.remove(id).is_none() {
            return false;
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.interaction.widget() == Some(id) {
            self.interaction = InteractionState::Idle;
        }
        self.live.remove(&id);
        self.facade.dispose(id);
        self.events.push(CanvasEvent::Removed(id));
        log::info!("Deleted widget {}", id);
        true
    }

    /// Remove the selected widget, if any.
    pub fn delete_selected(&mut self) -> bool {
        match self.selected {
            Some(id) => self.delete_widget(id),
            None => false,
        }
    }

    /// Remove every widget and restart the creation sequence.
    pub fn clear(&mut self) {
        let ids: Vec<WidgetId> = self.registry.ids().collect();
        for id in ids {
            self.facade.dispose(id);
        }
        self.registry.clear();
        self.live.clear();
        self.selected = None;
        self.interaction = InteractionState::Idle;
        self.events.push(CanvasEvent::Cleared);
        log::info!("Canvas cleared");
    }

    /// Make `id` the selection and announce it.
    pub fn select(&mut self, id: WidgetId) -> CanvasResult<()> {
        if !self.registry.contains(id) {
            return Err(CanvasError::NotFound(id));
        }
        self.select_existing(id);
        Ok(())
    }

    fn select_existing(&mut self, id: WidgetId) {
        if let Some(previous) = self.selected.filter(|&prev| prev != id) {
            self.facade.set_highlight(previous, None);
        }
        self.facade.set_highlight(id, Some(&self.highlight));
        self.selected = Some(id);
        self.events.push(CanvasEvent::Selected(id));
    }

    fn instantiate_bare(&mut self, id: WidgetId) -> Capabilities {
        let Some(widget) = self.registry.get(id) else {
            return Capabilities::NONE;
        };
        let rect = widget.geometry();
        let caps = self.facade.instantiate(id, widget.descriptor);
        self.facade.set_geometry(id, rect);
        self.live.insert(id, caps);
        caps
    }

    /// Create the live widget and push every supported property to it.
    fn instantiate(&mut self, id: WidgetId) {
        let caps = self.instantiate_bare(id);
        let Some(widget) = self.registry.get(id) else {
            return;
        };
        let properties: Vec<(String, PropertyValue)> = widget
            .properties
            .iter()
            .filter(|(name, _)| name.as_str() != GEOMETRY)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        for (name, value) in properties {
            if let PropertyOutcome::Failed(reason) = self.push_property(id, caps, &name, &value) {
                log::warn!("Widget {}: setting '{}' failed: {}", id, name, reason);
            }
        }
    }

    fn push_property(
        &mut self,
        id: WidgetId,
        caps: Capabilities,
        name: &str,
        value: &PropertyValue,
    ) -> PropertyOutcome {
        if !caps.supports(name) {
            return PropertyOutcome::Skipped;
        }
        match self.facade.set_property(id, name, value) {
            Ok(()) => PropertyOutcome::Applied,
            Err(e) => PropertyOutcome::Failed(e.to_string()),
        }
    }

    fn write_geometry(&mut self, id: WidgetId, rect: WidgetRect) {
        let Some(widget) = self.registry.get_mut(id) else {
            return;
        };
        if widget.geometry() == rect {
            return;
        }
        widget.set_geometry(rect);
        self.facade.set_geometry(id, rect);
        self.events.push(CanvasEvent::GeometryChanged(id, rect));
    }

    // --- Property edits ---

    /// Apply an edited property value to a widget.
    ///
    /// The value must conform to the type of the property's default. It is
    /// pushed to the live widget when the widget has a setter for it, then
    /// written into the record. Geometry is clamped to the canvas and the
    /// minimum size and always applied.
    pub fn apply_property(
        &mut self,
        id: WidgetId,
        name: &str,
        value: PropertyValue,
    ) -> CanvasResult<PropertyOutcome> {
        let widget = self.registry.get(id).ok_or(CanvasError::NotFound(id))?;
        let template = widget.descriptor.default_value(name).ok_or_else(|| {
            CanvasError::UnsupportedProperty {
                type_tag: widget.type_tag.clone(),
                name: name.to_string(),
            }
        })?;
        let value = value
            .conform_to(template)
            .map_err(|expected| CanvasError::PropertyType {
                name: name.to_string(),
                expected,
            })?;

        if name == GEOMETRY {
            if let Some(rect) = value.as_rect() {
                self.write_geometry(id, rect.normalized(self.config.min_widget_size));
            }
            return Ok(PropertyOutcome::Applied);
        }

        let caps = self.capabilities(id).unwrap_or(Capabilities::NONE);
        let outcome = self.push_property(id, caps, name, &value);
        if let Some(widget) = self.registry.get_mut(id) {
            widget.write_property(name, value);
        }
        Ok(outcome)
    }

    // --- Pointer input ---

    /// Feed one pointer event through the interaction state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up {
                button: MouseButton::Left,
                ..
            } => {
                if !self.interaction.is_idle() {
                    log::debug!("Gesture finished: {:?}", self.interaction);
                }
                self.interaction = InteractionState::Idle;
            }
            _ => {}
        }
    }

    fn pointer_down(&mut self, point: Point) {
        self.interaction = InteractionState::Idle;
        let handle_size = self.config.handle_size;

        // The selected widget's handles reach slightly outside its border,
        // so they are tested before any body.
        let selected = self.selected_widget().map(|w| (w.id, w.geometry()));
        if let Some((id, rect)) = selected {
            if let Some(handle) = hit_test_handle(&rect, point, handle_size) {
                self.begin_resize(id, handle, rect, point);
                return;
            }
        }

        // Empty canvas keeps the current selection.
        let Some(id) = self.registry.widget_at(point) else {
            return;
        };
        self.select_existing(id);
        let Some(rect) = self.registry.get(id).map(PlacedWidget::geometry) else {
            return;
        };
        if let Some(handle) = hit_test_handle(&rect, point, handle_size) {
            self.begin_resize(id, handle, rect, point);
        } else {
            self.interaction = InteractionState::ArmedForDrag {
                widget: id,
                grab_offset: point - rect.origin(),
                press: point,
            };
        }
    }

    fn begin_resize(&mut self, widget: WidgetId, handle: ResizeHandle, rect: WidgetRect, point: Point) {
        log::debug!("Resize {:?} of {} started", handle, widget);
        self.interaction = InteractionState::Resizing {
            widget,
            handle,
            start_rect: rect,
            start_point: point,
        };
    }

    fn pointer_move(&mut self, point: Point) {
        match self.interaction {
            InteractionState::Idle => {}
            InteractionState::ArmedForDrag {
                widget,
                grab_offset,
                press,
            } => {
                if (point - press).hypot() > self.config.drag_threshold {
                    log::debug!("Drag of {} started", widget);
                    self.interaction = InteractionState::Dragging {
                        widget,
                        grab_offset,
                    };
                    self.drag_to(widget, grab_offset, point);
                }
            }
            InteractionState::Dragging {
                widget,
                grab_offset,
            } => self.drag_to(widget, grab_offset, point),
            InteractionState::Resizing {
                widget,
                handle,
                start_rect,
                start_point,
            } => self.resize_to(widget, handle, start_rect, start_point, point),
        }
    }

    fn drag_to(&mut self, id: WidgetId, grab_offset: Vec2, point: Point) {
        let Some(current) = self.registry.get(id).map(PlacedWidget::geometry) else {
            self.interaction = InteractionState::Idle;
            return;
        };
        let target = point - grab_offset;
        let origin = self
            .config
            .grid
            .apply_to_point(Point::new(target.x.max(0.0), target.y.max(0.0)));
        let rect = current
            .with_position(origin.x.round() as i32, origin.y.round() as i32)
            .normalized(self.config.min_widget_size);
        self.write_geometry(id, rect);
    }

    fn resize_to(
        &mut self,
        id: WidgetId,
        handle: ResizeHandle,
        start_rect: WidgetRect,
        start_point: Point,
        point: Point,
    ) {
        let Some(current) = self.registry.get(id).map(PlacedWidget::geometry) else {
            self.interaction = InteractionState::Idle;
            return;
        };
        let min_size = self.config.min_widget_size;
        let dx = (point.x - start_point.x).round() as i32;
        let dy = (point.y - start_point.y).round() as i32;
        let rect = resize_rect(&start_rect, &current, handle, dx, dy, min_size);
        let rect = self.config.grid.apply_to_rect(rect);
        self.write_geometry(id, rect.normalized(min_size));
    }

    /// Cursor to show with the pointer at `point`.
    pub fn cursor_at(&self, point: Point) -> CursorHint {
        if let InteractionState::Resizing { handle, .. } = self.interaction {
            return handle.cursor();
        }
        self.selected_widget()
            .and_then(|w| hit_test_handle(&w.geometry(), point, self.config.handle_size))
            .map(ResizeHandle::cursor)
            .unwrap_or_default()
    }

    /// Handle squares to paint around the selected widget.
    pub fn selection_handles(&self) -> Option<[(ResizeHandle, Rect); 8]> {
        self.selected_widget()
            .map(|w| handle_rects(&w.geometry(), self.config.handle_size))
    }

    // --- Context menu ---

    /// Menu for a right-click at `point`.
    pub fn context_menu_at(&self, point: Point) -> ContextMenu {
        match self.registry.widget_at(point) {
            Some(id) => ContextMenu::Widget {
                id,
                actions: vec![
                    MenuAction::EditProperties(id),
                    MenuAction::Duplicate(id),
                    MenuAction::Delete(id),
                ],
            },
            None => ContextMenu::Canvas {
                position: point,
                actions: catalog::all()
                    .iter()
                    .map(|d| MenuAction::Create {
                        type_tag: d.tag(),
                        position: point,
                    })
                    .collect(),
            },
        }
    }

    /// Run a menu action. Returns the widget it created, if any.
    pub fn activate(&mut self, action: &MenuAction) -> CanvasResult<Option<WidgetId>> {
        match *action {
            MenuAction::EditProperties(id) => {
                self.select(id)?;
                Ok(None)
            }
            MenuAction::Duplicate(id) => self.duplicate_widget(id).map(|report| Some(report.id)),
            MenuAction::Delete(id) => {
                self.delete_widget(id);
                Ok(None)
            }
            MenuAction::Create { type_tag, position } => {
                Ok(Some(self.create_widget(type_tag, position)))
            }
        }
    }

    // --- Documents ---

    /// Snapshot the canvas as a project document.
    pub fn to_document(&self) -> ProjectDocument {
        let mut document = ProjectDocument::new();
        document.widgets = self
            .registry
            .all()
            .map(|w| WidgetRecord {
                type_tag: w.type_tag.clone(),
                properties: w.properties.clone(),
            })
            .collect();
        document
    }

    /// Replace the canvas contents with `document`.
    ///
    /// The new registry is built completely before the current one is
    /// dropped. Widgets get fresh ids in document order. Unknown property
    /// names and values of the wrong type are dropped with a warning.
    pub fn load_document(&mut self, document: &ProjectDocument) -> usize {
        let registry = self.build_registry(document);
        self.clear();
        self.registry = registry;
        let ids: Vec<WidgetId> = self.registry.ids().collect();
        for &id in &ids {
            self.instantiate(id);
        }
        log::info!("Loaded {} widgets", ids.len());
        ids.len()
    }

    fn build_registry(&self, document: &ProjectDocument) -> WidgetRegistry {
        let min_size = self.config.min_widget_size;
        let mut registry = WidgetRegistry::new();
        for record in &document.widgets {
            let descriptor = catalog::describe_or_placeholder(&record.type_tag);
            let rect = record
                .properties
                .get(GEOMETRY)
                .and_then(PropertyValue::as_rect)
                .unwrap_or_else(|| descriptor.default_rect(0, 0))
                .normalized(min_size);
            let id = registry.insert(&record.type_tag, rect);
            let Some(widget) = registry.get_mut(id) else {
                continue;
            };
            for (name, value) in &record.properties {
                if name == GEOMETRY {
                    continue;
                }
                let Some(template) = descriptor.default_value(name) else {
                    log::warn!("{}: dropping unknown property '{}'", record.type_tag, name);
                    continue;
                };
                match value.clone().conform_to(template) {
                    Ok(value) => {
                        widget.write_property(name, value);
                    }
                    Err(expected) => log::warn!(
                        "{}: property '{}' is not a {}, keeping default",
                        record.type_tag,
                        name,
                        expected
                    ),
                }
            }
        }
        registry
    }

    /// Save to a project file.
    pub fn save_file(&self, path: &Path) -> CanvasResult<()> {
        storage::save_project(path, &self.to_document())?;
        Ok(())
    }

    /// Load a project file. On failure the canvas is unchanged.
    pub fn load_file(&mut self, path: &Path) -> CanvasResult<usize> {
        let document = storage::load_project(path)?;
        Ok(self.load_document(&document))
    }
}
