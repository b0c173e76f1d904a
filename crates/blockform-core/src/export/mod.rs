//! Code generation from a canvas snapshot.
//!
//! Both exporters are pure functions of the ordered widget sequence: the same
//! widgets always produce byte-identical output. String values are embedded
//! as-is, without escaping quotes or markup characters.

pub mod markup;
pub mod script;

pub use markup::to_markup;
pub use script::to_script;

use crate::property::PropertyValue;
use crate::registry::PlacedWidget;
use serde::{Deserialize, Serialize};

/// Properties the exporters emit beyond geometry and object name, in
/// emission order.
pub const EXPORTED_PROPERTIES: [&str; 9] = [
    "text",
    "placeholderText",
    "checked",
    "items",
    "minimum",
    "maximum",
    "value",
    "orientation",
    "title",
];

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Python module building the window imperatively.
    Script,
    /// Designer `.ui` XML.
    Markup,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Script => "py",
            ExportFormat::Markup => "ui",
        }
    }
}

/// Settings of the generated top-level window.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub window_title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            window_title: "BlockForm".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Render `widgets` in `format`.
pub fn export<'a>(
    format: ExportFormat,
    widgets: impl IntoIterator<Item = &'a PlacedWidget>,
    options: &ExportOptions,
) -> String {
    match format {
        ExportFormat::Script => to_script(widgets, options),
        ExportFormat::Markup => to_markup(widgets, options),
    }
}

/// Identifier for a widget in generated code: the lower-cased tag with
/// dashes turned into underscores, then the 1-based creation number.
pub fn variable_name(widget: &PlacedWidget) -> String {
    format!(
        "{}_{}",
        widget.type_tag.to_lowercase().replace('-', "_"),
        widget.creation_index + 1
    )
}

/// Whitelisted properties the widget carries and its type supports, in
/// whitelist order.
pub(crate) fn exported_properties(
    widget: &PlacedWidget,
) -> impl Iterator<Item = (&'static str, &PropertyValue)> {
    let caps = widget.descriptor.capabilities;
    EXPORTED_PROPERTIES
        .into_iter()
        .filter(move |name| caps.supports(name))
        .filter_map(move |name| widget.property(name).map(|value| (name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::WidgetRect;
    use crate::registry::WidgetRegistry;

    #[test]
    fn test_variable_name() {
        let mut registry = WidgetRegistry::new();
        registry.insert("button", WidgetRect::new(0, 0, 100, 30));
        let id = registry.insert("text-field", WidgetRect::new(0, 0, 120, 30));
        assert_eq!(variable_name(registry.get(id).unwrap()), "text_field_2");

        let legacy = registry.insert("QPushButton", WidgetRect::new(0, 0, 100, 30));
        assert_eq!(variable_name(registry.get(legacy).unwrap()), "qpushbutton_3");
    }

    #[test]
    fn test_exported_properties_follow_whitelist_order() {
        let mut registry = WidgetRegistry::new();
        let id = registry.insert("slider", WidgetRect::new(0, 0, 150, 30));
        let names: Vec<_> = exported_properties(registry.get(id).unwrap())
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["minimum", "maximum", "value", "orientation"]);

        // Group box carries `checkable`, which is not exported.
        let id = registry.insert("group-box", WidgetRect::new(0, 0, 200, 150));
        let names: Vec<_> = exported_properties(registry.get(id).unwrap())
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["checked", "title"]);
    }
}
