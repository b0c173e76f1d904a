//! Python (PyQt5) script export.

use super::{ExportOptions, exported_properties, variable_name};
use crate::property::{Orientation, PropertyValue, TickPosition, Token};
use crate::registry::PlacedWidget;
use std::collections::BTreeSet;

const EMPTY: &str = "# No widgets to export\n";

/// Render widgets as a runnable PyQt5 module.
pub fn to_script<'a>(
    widgets: impl IntoIterator<Item = &'a PlacedWidget>,
    options: &ExportOptions,
) -> String {
    let widgets: Vec<&PlacedWidget> = widgets.into_iter().collect();
    if widgets.is_empty() {
        return EMPTY.to_string();
    }

    let mut classes: BTreeSet<&str> = ["QApplication", "QMainWindow", "QVBoxLayout", "QWidget"]
        .into_iter()
        .collect();
    classes.extend(widgets.iter().map(|w| w.descriptor.class_name()));

    let mut out = String::new();
    out.push_str("import sys\n\n");
    out.push_str("from PyQt5.QtCore import QRect, Qt\n");
    out.push_str("from PyQt5.QtWidgets import (\n");
    for class in &classes {
        out.push_str(&format!("    {},\n", class));
    }
    out.push_str(")\n\n\n");

    out.push_str("class MainWindow(QMainWindow):\n");
    out.push_str("    def __init__(self):\n");
    out.push_str("        super().__init__()\n");
    out.push_str("        self.init_ui()\n\n");
    out.push_str("    def init_ui(self):\n");
    out.push_str(&format!("        self.setWindowTitle('{}')\n", options.window_title));
    out.push_str(&format!(
        "        self.setGeometry(100, 100, {}, {})\n\n",
        options.width, options.height
    ));
    out.push_str("        self.central_widget = QWidget()\n");
    out.push_str("        self.setCentralWidget(self.central_widget)\n");
    out.push_str("        self.layout = QVBoxLayout(self.central_widget)\n");
    out.push_str("        self.layout.setContentsMargins(10, 10, 10, 10)\n");

    for widget in &widgets {
        out.push('\n');
        write_widget(&mut out, widget);
    }

    out.push_str("\n\ndef main():\n");
    out.push_str("    app = QApplication(sys.argv)\n");
    out.push_str("    window = MainWindow()\n");
    out.push_str("    window.show()\n");
    out.push_str("    sys.exit(app.exec_())\n\n\n");
    out.push_str("if __name__ == '__main__':\n");
    out.push_str("    main()\n");
    out
}

fn write_widget(out: &mut String, widget: &PlacedWidget) {
    let var = format!("self.{}", variable_name(widget));
    let rect = widget.geometry();

    out.push_str(&format!("        # {}\n", widget.type_tag));
    out.push_str(&format!(
        "        {} = {}(self.central_widget)\n",
        var,
        widget.descriptor.class_name()
    ));
    out.push_str(&format!(
        "        {}.setGeometry(QRect({}, {}, {}, {}))\n",
        var, rect.x, rect.y, rect.width, rect.height
    ));
    if let Some(name) = widget.object_name() {
        out.push_str(&format!("        {}.setObjectName('{}')\n", var, name));
    }
    for (name, value) in exported_properties(widget) {
        out.push_str(&format!(
            "        {}.{}({})\n",
            var,
            setter(name),
            python_value(value)
        ));
    }
    out.push_str(&format!("        self.layout.addWidget({})\n", var));
}

fn setter(name: &str) -> String {
    match name {
        "items" => "addItems".to_string(),
        _ => {
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => format!("set{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => String::new(),
            }
        }
    }
}

fn python_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Bool(true) => "True".to_string(),
        PropertyValue::Bool(false) => "False".to_string(),
        PropertyValue::Integer(i) => i.to_string(),
        PropertyValue::Real(r) => format!("{:?}", r),
        PropertyValue::String(s) => format!("'{}'", s),
        PropertyValue::StringList(items) => {
            let quoted: Vec<String> = items.iter().map(|item| format!("'{}'", item)).collect();
            format!("[{}]", quoted.join(", "))
        }
        PropertyValue::Rect(r) => format!("QRect({}, {}, {}, {})", r.x, r.y, r.width, r.height),
        PropertyValue::Token(token) => python_token(*token),
    }
}

fn python_token(token: Token) -> String {
    match token {
        Token::Alignment(a) => a.qt_flag().replace("::", "."),
        Token::Orientation(Orientation::Horizontal) => "Qt.Horizontal".to_string(),
        Token::Orientation(Orientation::Vertical) => "Qt.Vertical".to_string(),
        Token::TickPosition(t) => match t {
            TickPosition::NoTicks => "QSlider.NoTicks",
            TickPosition::Above => "QSlider.TicksAbove",
            TickPosition::Below => "QSlider.TicksBelow",
            TickPosition::BothSides => "QSlider.TicksBothSides",
        }
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::WidgetRect;
    use crate::registry::WidgetRegistry;

    #[test]
    fn test_empty_is_single_comment() {
        assert_eq!(to_script(std::iter::empty::<&PlacedWidget>(), &ExportOptions::default()), EMPTY);
    }

    #[test]
    fn test_widget_statements() {
        let mut registry = WidgetRegistry::new();
        let id = registry.insert("button", WidgetRect::new(100, 100, 100, 30));
        registry
            .get_mut(id)
            .unwrap()
            .write_property("objectName", "okButton".into());

        let script = to_script(registry.all(), &ExportOptions::default());
        let expected = "        # button\n\
                        \x20       self.button_1 = QPushButton(self.central_widget)\n\
                        \x20       self.button_1.setGeometry(QRect(100, 100, 100, 30))\n\
                        \x20       self.button_1.setObjectName('okButton')\n\
                        \x20       self.button_1.setText('Button')\n\
                        \x20       self.layout.addWidget(self.button_1)\n";
        assert!(script.contains(expected), "{script}");
        assert!(script.contains("    QPushButton,\n"));
        assert!(script.starts_with("import sys\n"));
        assert!(script.ends_with("    main()\n"));
    }

    #[test]
    fn test_property_values() {
        let mut registry = WidgetRegistry::new();
        let slider = registry.insert("slider", WidgetRect::new(0, 0, 150, 30));
        registry.get_mut(slider).unwrap().write_property(
            "orientation",
            PropertyValue::Token(Token::Orientation(Orientation::Vertical)),
        );
        registry.insert("combo-box", WidgetRect::new(0, 40, 120, 30));

        let script = to_script(registry.all(), &ExportOptions::default());
        assert!(script.contains("self.slider_1.setMinimum(0)\n"));
        assert!(script.contains("self.slider_1.setValue(50)\n"));
        assert!(script.contains("self.slider_1.setOrientation(Qt.Vertical)\n"));
        assert!(!script.contains("setTickPosition"));
        assert!(script.contains(
            "self.combo_box_2.addItems(['Option 1', 'Option 2', 'Option 3'])\n"
        ));
        // Empty object names are not emitted.
        assert!(!script.contains("setObjectName"));
    }

    #[test]
    fn test_strings_are_not_escaped() {
        let mut registry = WidgetRegistry::new();
        let id = registry.insert("label", WidgetRect::new(0, 0, 100, 30));
        registry.get_mut(id).unwrap().write_property("text", "it's".into());
        let script = to_script(registry.all(), &ExportOptions::default());
        assert!(script.contains("self.label_1.setText('it's')\n"));
    }

    #[test]
    fn test_setter_names() {
        assert_eq!(setter("placeholderText"), "setPlaceholderText");
        assert_eq!(setter("items"), "addItems");
        assert_eq!(setter("title"), "setTitle");
    }
}
