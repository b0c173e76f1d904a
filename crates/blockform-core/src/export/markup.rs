//! Designer `.ui` markup export.

use super::{ExportOptions, exported_properties, variable_name};
use crate::geometry::WidgetRect;
use crate::property::{Orientation, PropertyValue, TickPosition, Token};
use crate::registry::PlacedWidget;

const EMPTY: &str = "<!-- No widgets to export -->\n";

/// Render widgets as a `.ui` document with one central widget holding every
/// widget at its absolute geometry.
pub fn to_markup<'a>(
    widgets: impl IntoIterator<Item = &'a PlacedWidget>,
    options: &ExportOptions,
) -> String {
    let mut widgets = widgets.into_iter().peekable();
    if widgets.peek().is_none() {
        return EMPTY.to_string();
    }

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<ui version=\"4.0\">\n");
    out.push_str(" <class>MainWindow</class>\n");
    out.push_str(" <widget class=\"QMainWindow\" name=\"MainWindow\">\n");
    let window = WidgetRect::new(0, 0, options.width as i32, options.height as i32);
    write_property(&mut out, 2, "geometry", &PropertyValue::Rect(window));
    write_property(
        &mut out,
        2,
        "windowTitle",
        &PropertyValue::String(options.window_title.clone()),
    );
    out.push_str("  <widget class=\"QWidget\" name=\"centralwidget\">\n");

    for widget in widgets {
        let name = widget
            .object_name()
            .map(str::to_string)
            .unwrap_or_else(|| variable_name(widget));
        out.push_str(&format!(
            "   <widget class=\"{}\" name=\"{}\">\n",
            widget.descriptor.class_name(),
            name
        ));
        write_property(&mut out, 4, "geometry", &PropertyValue::Rect(widget.geometry()));
        for (prop, value) in exported_properties(widget) {
            write_property(&mut out, 4, prop, value);
        }
        out.push_str("   </widget>\n");
    }

    out.push_str("  </widget>\n");
    out.push_str("  <menubar name=\"menubar\"/>\n");
    out.push_str("  <statusbar name=\"statusbar\"/>\n");
    out.push_str(" </widget>\n");
    out.push_str(" <resources/>\n");
    out.push_str(" <connections/>\n");
    out.push_str("</ui>\n");
    out
}

fn pad(level: usize) -> String {
    " ".repeat(level)
}

fn write_property(out: &mut String, level: usize, name: &str, value: &PropertyValue) {
    out.push_str(&format!("{}<property name=\"{}\">\n", pad(level), name));
    write_value(out, level + 1, value);
    out.push_str(&format!("{}</property>\n", pad(level)));
}

fn write_value(out: &mut String, level: usize, value: &PropertyValue) {
    let indent = pad(level);
    match value {
        PropertyValue::Bool(b) => out.push_str(&format!("{}<bool>{}</bool>\n", indent, b)),
        PropertyValue::Integer(i) => out.push_str(&format!("{}<number>{}</number>\n", indent, i)),
        PropertyValue::Real(r) => out.push_str(&format!("{}<double>{:?}</double>\n", indent, r)),
        PropertyValue::String(s) => out.push_str(&format!("{}<string>{}</string>\n", indent, s)),
        PropertyValue::StringList(items) => {
            out.push_str(&format!("{}<stringlist>\n", indent));
            for item in items {
                out.push_str(&format!("{} <string>{}</string>\n", indent, item));
            }
            out.push_str(&format!("{}</stringlist>\n", indent));
        }
        PropertyValue::Rect(r) => {
            out.push_str(&format!("{}<rect>\n", indent));
            out.push_str(&format!("{} <x>{}</x>\n", indent, r.x));
            out.push_str(&format!("{} <y>{}</y>\n", indent, r.y));
            out.push_str(&format!("{} <width>{}</width>\n", indent, r.width));
            out.push_str(&format!("{} <height>{}</height>\n", indent, r.height));
            out.push_str(&format!("{}</rect>\n", indent));
        }
        PropertyValue::Token(Token::Alignment(a)) => {
            out.push_str(&format!("{}<set>{}</set>\n", indent, a.qt_flag()))
        }
        PropertyValue::Token(token) => {
            out.push_str(&format!("{}<enum>{}</enum>\n", indent, enum_name(*token)))
        }
    }
}

fn enum_name(token: Token) -> &'static str {
    match token {
        Token::Alignment(a) => a.qt_flag(),
        Token::Orientation(Orientation::Horizontal) => "Qt::Horizontal",
        Token::Orientation(Orientation::Vertical) => "Qt::Vertical",
        Token::TickPosition(TickPosition::NoTicks) => "QSlider::NoTicks",
        Token::TickPosition(TickPosition::Above) => "QSlider::TicksAbove",
        Token::TickPosition(TickPosition::Below) => "QSlider::TicksBelow",
        Token::TickPosition(TickPosition::BothSides) => "QSlider::TicksBothSides",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WidgetRegistry;

    #[test]
    fn test_empty_is_single_comment() {
        assert_eq!(
            to_markup(std::iter::empty::<&PlacedWidget>(), &ExportOptions::default()),
            EMPTY
        );
    }

    #[test]
    fn test_document_frame() {
        let mut registry = WidgetRegistry::new();
        registry.insert("label", WidgetRect::new(10, 20, 100, 30));
        let options = ExportOptions {
            window_title: "Login".to_string(),
            ..ExportOptions::default()
        };
        let ui = to_markup(registry.all(), &options);

        assert!(ui.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<ui version=\"4.0\">\n"));
        assert!(ui.contains("  <property name=\"windowTitle\">\n   <string>Login</string>\n"));
        assert!(ui.contains("    <width>800</width>\n    <height>600</height>\n"));
        assert!(ui.ends_with(" <resources/>\n <connections/>\n</ui>\n"));
    }

    #[test]
    fn test_widget_element() {
        let mut registry = WidgetRegistry::new();
        let id = registry.insert("check-box", WidgetRect::new(10, 20, 100, 30));
        registry
            .get_mut(id)
            .unwrap()
            .write_property("objectName", "remember".into());
        let ui = to_markup(registry.all(), &ExportOptions::default());

        let expected = concat!(
            "   <widget class=\"QCheckBox\" name=\"remember\">\n",
            "    <property name=\"geometry\">\n",
            "     <rect>\n",
            "      <x>10</x>\n",
            "      <y>20</y>\n",
            "      <width>100</width>\n",
            "      <height>30</height>\n",
            "     </rect>\n",
            "    </property>\n",
            "    <property name=\"text\">\n",
            "     <string>Check box</string>\n",
            "    </property>\n",
            "    <property name=\"checked\">\n",
            "     <bool>false</bool>\n",
            "    </property>\n",
            "   </widget>\n",
        );
        assert!(ui.contains(expected), "{ui}");
        // `tristate` is not exported.
        assert!(!ui.contains("tristate"));
    }

    #[test]
    fn test_unnamed_widget_uses_variable_name() {
        let mut registry = WidgetRegistry::new();
        registry.insert("button", WidgetRect::new(0, 0, 100, 30));
        registry.insert("slider", WidgetRect::new(0, 40, 150, 30));
        let ui = to_markup(registry.all(), &ExportOptions::default());

        assert!(ui.contains("<widget class=\"QSlider\" name=\"slider_2\">"));
        assert!(ui.contains("     <enum>Qt::Horizontal</enum>\n"));
        assert!(ui.contains("     <number>50</number>\n"));
    }

    #[test]
    fn test_string_list() {
        let mut registry = WidgetRegistry::new();
        let id = registry.insert("list", WidgetRect::new(0, 0, 150, 180));
        registry
            .get_mut(id)
            .unwrap()
            .write_property("items", vec!["A".to_string(), "B".to_string()].into());
        let ui = to_markup(registry.all(), &ExportOptions::default());
        assert!(ui.contains(
            "     <stringlist>\n      <string>A</string>\n      <string>B</string>\n     </stringlist>\n"
        ));
    }
}
