//! Ordered store of placed widget records.

use crate::catalog::{self, WidgetTypeDescriptor};
use crate::geometry::WidgetRect;
use crate::property::{GEOMETRY, PropertyMap, PropertyValue};
use indexmap::IndexMap;
use uuid::Uuid;

/// Unique identifier for placed widgets.
pub type WidgetId = Uuid;

/// One widget instance on the canvas.
#[derive(Debug, Clone)]
pub struct PlacedWidget {
    pub id: WidgetId,
    /// Tag as given at creation; unknown tags keep their text.
    pub type_tag: String,
    pub descriptor: &'static WidgetTypeDescriptor,
    /// Keys are fixed at creation. `geometry` lives here as a `Rect`.
    pub properties: PropertyMap,
    /// Position in the creation sequence, starting at 0.
    pub creation_index: usize,
}

impl PlacedWidget {
    pub fn geometry(&self) -> WidgetRect {
        self.properties
            .get(GEOMETRY)
            .and_then(PropertyValue::as_rect)
            .unwrap_or_else(|| self.descriptor.default_rect(0, 0))
    }

    pub fn set_geometry(&mut self, rect: WidgetRect) {
        self.properties.insert(GEOMETRY.to_string(), PropertyValue::Rect(rect));
    }

    /// The `objectName` property, if set to a non-empty string.
    pub fn object_name(&self) -> Option<&str> {
        self.properties
            .get(crate::property::OBJECT_NAME)
            .and_then(PropertyValue::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Look up a property value.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Overwrite an existing property. Returns `false` and leaves the record
    /// untouched when the key is not part of this widget's property set.
    pub fn write_property(&mut self, name: &str, value: PropertyValue) -> bool {
        match self.properties.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// Placed widgets in creation order.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    widgets: IndexMap<WidgetId, PlacedWidget>,
    next_index: usize,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and append a record with the type's default properties at `rect`.
    pub fn insert(&mut self, type_tag: &str, rect: WidgetRect) -> WidgetId {
        let descriptor = catalog::describe_or_placeholder(type_tag);
        let mut properties = descriptor.default_properties().clone();
        properties.insert(GEOMETRY.to_string(), PropertyValue::Rect(rect));

        let id = Uuid::new_v4();
        let widget = PlacedWidget {
            id,
            type_tag: type_tag.to_string(),
            descriptor,
            properties,
            creation_index: self.next_index,
        };
        self.next_index += 1;
        self.widgets.insert(id, widget);
        id
    }

    /// Remove a record, keeping the order of the rest.
    pub fn remove(&mut self, id: WidgetId) -> Option<PlacedWidget> {
        self.widgets.shift_remove(&id)
    }

    /// Drop every record and restart the creation sequence.
    pub fn clear(&mut self) {
        self.widgets.clear();
        self.next_index = 0;
    }

    pub fn get(&self, id: WidgetId) -> Option<&PlacedWidget> {
        self.widgets.get(&id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut PlacedWidget> {
        self.widgets.get_mut(&id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    /// All widgets in creation order.
    pub fn all(&self) -> impl Iterator<Item = &PlacedWidget> + Clone {
        self.widgets.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.widgets.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Topmost widget containing `point`. Later widgets paint above earlier ones.
    pub fn widget_at(&self, point: kurbo::Point) -> Option<WidgetId> {
        self.widgets
            .values()
            .rev()
            .find(|w| w.geometry().contains(point))
            .map(|w| w.id)
    }
}
