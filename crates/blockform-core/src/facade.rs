//! Rendering facade: the boundary to whatever actually draws widgets.
//!
//! The canvas never owns live widgets. It tells the facade to create,
//! update and dispose them by id, and asks which setters each one supports.

use crate::catalog::{Capabilities, WidgetTypeDescriptor};
use crate::geometry::WidgetRect;
use crate::property::{PropertyMap, PropertyValue};
use crate::registry::WidgetId;
use peniko::Color;
use std::collections::HashMap;
use thiserror::Error;

/// Failure reported by a facade setter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("No live widget for {0}")]
    Missing(WidgetId),
    #[error("Setter for '{name}' rejected the value: {reason}")]
    Rejected { name: String, reason: String },
}

/// Border drawn around the selected widget.
#[derive(Debug, Clone, Copy)]
pub struct HighlightStyle {
    pub color: Color,
    pub width: f64,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            color: Color::from_rgba8(0x33, 0x99, 0xff, 0xff),
            width: 2.0,
        }
    }
}

/// Operations the canvas performs on live widgets.
pub trait RenderFacade {
    /// Create the live widget for a new record and report its setters.
    fn instantiate(&mut self, id: WidgetId, descriptor: &WidgetTypeDescriptor) -> Capabilities;

    fn set_geometry(&mut self, id: WidgetId, rect: WidgetRect);

    /// Push one property to the live widget. Only called for properties the
    /// widget's capabilities support.
    fn set_property(
        &mut self,
        id: WidgetId,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), RenderError>;

    /// Show or clear the selection border.
    fn set_highlight(&mut self, id: WidgetId, style: Option<&HighlightStyle>);

    fn dispose(&mut self, id: WidgetId);
}

/// State of one widget in a [`HeadlessFacade`].
#[derive(Debug, Clone, PartialEq)]
pub struct LiveWidget {
    pub class_name: &'static str,
    pub geometry: WidgetRect,
    pub properties: PropertyMap,
    pub highlighted: bool,
}

/// Facade that keeps live widgets as plain data.
///
/// Used by the command-line front end and tests.
#[derive(Debug, Default)]
pub struct HeadlessFacade {
    live: HashMap<WidgetId, LiveWidget>,
    /// Setters that fail, by property name, with the reason to report.
    failing: HashMap<String, String>,
}

impl HeadlessFacade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: WidgetId) -> Option<&LiveWidget> {
        self.live.get(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Make every setter for `name` fail with `reason`.
    pub fn fail_setter(&mut self, name: &str, reason: &str) {
        self.failing.insert(name.to_string(), reason.to_string());
    }
}

impl RenderFacade for HeadlessFacade {
    fn instantiate(&mut self, id: WidgetId, descriptor: &WidgetTypeDescriptor) -> Capabilities {
        self.live.insert(
            id,
            LiveWidget {
                class_name: descriptor.class_name(),
                geometry: descriptor.default_rect(0, 0),
                properties: PropertyMap::new(),
                highlighted: false,
            },
        );
        descriptor.capabilities
    }

    fn set_geometry(&mut self, id: WidgetId, rect: WidgetRect) {
        if let Some(widget) = self.live.get_mut(&id) {
            widget.geometry = rect;
        }
    }

    fn set_property(
        &mut self,
        id: WidgetId,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), RenderError> {
        if let Some(reason) = self.failing.get(name) {
            return Err(RenderError::Rejected {
                name: name.to_string(),
                reason: reason.clone(),
            });
        }
        let widget = self.live.get_mut(&id).ok_or(RenderError::Missing(id))?;
        widget.properties.insert(name.to_string(), value.clone());
        Ok(())
    }

    fn set_highlight(&mut self, id: WidgetId, style: Option<&HighlightStyle>) {
        if let Some(widget) = self.live.get_mut(&id) {
            widget.highlighted = style.is_some();
        }
    }

    fn dispose(&mut self, id: WidgetId) {
        self.live.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use uuid::Uuid;

    #[test]
    fn test_headless_lifecycle() {
        let mut facade = HeadlessFacade::new();
        let id = Uuid::new_v4();
        let caps = facade.instantiate(id, catalog::describe("check-box").unwrap());
        assert!(caps.checked);

        facade.set_geometry(id, WidgetRect::new(5, 5, 100, 30));
        facade.set_property(id, "checked", &PropertyValue::Bool(true)).unwrap();
        facade.set_highlight(id, Some(&HighlightStyle::default()));

        let live = facade.get(id).unwrap();
        assert_eq!(live.class_name, "QCheckBox");
        assert_eq!(live.geometry, WidgetRect::new(5, 5, 100, 30));
        assert!(live.highlighted);

        facade.dispose(id);
        assert!(facade.is_empty());
        assert_eq!(
            facade.set_property(id, "checked", &PropertyValue::Bool(false)),
            Err(RenderError::Missing(id))
        );
    }

    #[test]
    fn test_failing_setter() {
        let mut facade = HeadlessFacade::new();
        let id = Uuid::new_v4();
        facade.instantiate(id, catalog::describe("button").unwrap());
        facade.fail_setter("text", "font missing");
        let err = facade.set_property(id, "text", &"Go".into()).unwrap_err();
        assert_eq!(err.to_string(), "Setter for 'text' rejected the value: font missing");
    }
}
