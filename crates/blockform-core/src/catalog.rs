//! Widget type catalog.
//!
//! A static, data-driven table: each widget kind maps to its default size,
//! default property set, setter capabilities and property-editor grouping.
//! Adding a widget kind means adding a table entry, not new branching in the
//! canvas or exporters.

use crate::geometry::WidgetRect;
use crate::property::{
    Alignment, GEOMETRY, OBJECT_NAME, Orientation, PropertyMap, PropertyValue, TickPosition,
    Token,
};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// The widget kinds the designer can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    Button,
    Label,
    TextField,
    TextArea,
    CheckBox,
    RadioButton,
    ComboBox,
    SpinBox,
    Slider,
    GroupBox,
    TabWidget,
    Table,
    List,
    /// Stand-in for records whose tag the catalog does not know.
    Placeholder,
}

impl WidgetKind {
    /// Palette order.
    pub const ALL: [WidgetKind; 13] = [
        WidgetKind::Button,
        WidgetKind::Label,
        WidgetKind::TextField,
        WidgetKind::TextArea,
        WidgetKind::CheckBox,
        WidgetKind::RadioButton,
        WidgetKind::ComboBox,
        WidgetKind::SpinBox,
        WidgetKind::Slider,
        WidgetKind::GroupBox,
        WidgetKind::TabWidget,
        WidgetKind::Table,
        WidgetKind::List,
    ];

    /// Stable type tag used in project files and menus.
    pub fn tag(self) -> &'static str {
        match self {
            WidgetKind::Button => "button",
            WidgetKind::Label => "label",
            WidgetKind::TextField => "text-field",
            WidgetKind::TextArea => "text-area",
            WidgetKind::CheckBox => "check-box",
            WidgetKind::RadioButton => "radio-button",
            WidgetKind::ComboBox => "combo-box",
            WidgetKind::SpinBox => "spin-box",
            WidgetKind::Slider => "slider",
            WidgetKind::GroupBox => "group-box",
            WidgetKind::TabWidget => "tab-widget",
            WidgetKind::Table => "table",
            WidgetKind::List => "list",
            WidgetKind::Placeholder => "placeholder",
        }
    }

    /// Toolkit class the exporters instantiate.
    pub fn class_name(self) -> &'static str {
        match self {
            WidgetKind::Button => "QPushButton",
            WidgetKind::Label => "QLabel",
            WidgetKind::TextField => "QLineEdit",
            WidgetKind::TextArea => "QTextEdit",
            WidgetKind::CheckBox => "QCheckBox",
            WidgetKind::RadioButton => "QRadioButton",
            WidgetKind::ComboBox => "QComboBox",
            WidgetKind::SpinBox => "QSpinBox",
            WidgetKind::Slider => "QSlider",
            WidgetKind::GroupBox => "QGroupBox",
            WidgetKind::TabWidget => "QTabWidget",
            WidgetKind::Table => "QTableWidget",
            WidgetKind::List => "QListWidget",
            WidgetKind::Placeholder => "QWidget",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            WidgetKind::Button => "Button",
            WidgetKind::Label => "Label",
            WidgetKind::TextField => "Text Field",
            WidgetKind::TextArea => "Text Area",
            WidgetKind::CheckBox => "Check Box",
            WidgetKind::RadioButton => "Radio Button",
            WidgetKind::ComboBox => "Combo Box",
            WidgetKind::SpinBox => "Spin Box",
            WidgetKind::Slider => "Slider",
            WidgetKind::GroupBox => "Group Box",
            WidgetKind::TabWidget => "Tab Widget",
            WidgetKind::Table => "Table",
            WidgetKind::List => "List",
            WidgetKind::Placeholder => "Unknown Widget",
        }
    }

    /// Palette tooltip.
    pub fn description(self) -> &'static str {
        match self {
            WidgetKind::Button => "Clickable push button",
            WidgetKind::Label => "Static text or image",
            WidgetKind::TextField => "Single-line text input",
            WidgetKind::TextArea => "Multi-line text input",
            WidgetKind::CheckBox => "Independent on/off option",
            WidgetKind::RadioButton => "Mutually exclusive option",
            WidgetKind::ComboBox => "Drop-down list of choices",
            WidgetKind::SpinBox => "Integer input with step buttons",
            WidgetKind::Slider => "Value picked along a track",
            WidgetKind::GroupBox => "Titled frame around other widgets",
            WidgetKind::TabWidget => "Stack of tabbed pages",
            WidgetKind::Table => "Grid of editable cells",
            WidgetKind::List => "Scrollable list of items",
            WidgetKind::Placeholder => "Widget of an unrecognised type",
        }
    }

    /// Resolve a type tag. Toolkit class names are accepted as aliases so
    /// older project files keep loading.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag || kind.class_name() == tag)
    }
}

/// Which setter-backed properties a widget type supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub text: bool,
    pub placeholder_text: bool,
    pub checked: bool,
    pub items: bool,
    pub min_max: bool,
    pub value: bool,
    pub orientation: bool,
    pub title: bool,
}

impl Capabilities {
    /// No optional setters; only geometry and object name.
    pub const NONE: Capabilities = Capabilities {
        text: false,
        placeholder_text: false,
        checked: false,
        items: false,
        min_max: false,
        value: false,
        orientation: false,
        title: false,
    };

    /// Whether a live widget has a setter for `name`.
    ///
    /// Geometry and object name are supported by every widget.
    pub fn supports(&self, name: &str) -> bool {
        match name {
            GEOMETRY | OBJECT_NAME => true,
            "text" => self.text,
            "placeholderText" => self.placeholder_text,
            "checked" => self.checked,
            "items" => self.items,
            "minimum" | "maximum" => self.min_max,
            "value" => self.value,
            "orientation" => self.orientation,
            "title" => self.title,
            _ => false,
        }
    }
}

/// One titled group of rows in the property editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyGroup {
    pub title: String,
    pub names: Vec<&'static str>,
}

/// Immutable description of a widget type.
#[derive(Debug, Clone)]
pub struct WidgetTypeDescriptor {
    pub kind: WidgetKind,
    /// Default width and height.
    pub default_size: (i32, i32),
    pub capabilities: Capabilities,
    defaults: PropertyMap,
    groups: Vec<PropertyGroup>,
}

impl WidgetTypeDescriptor {
    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }

    /// Default property set, always containing `objectName` and `geometry`.
    pub fn default_properties(&self) -> &PropertyMap {
        &self.defaults
    }

    /// Declared default for one property, which also fixes its value type.
    pub fn default_value(&self, name: &str) -> Option<&PropertyValue> {
        self.defaults.get(name)
    }

    /// Property-editor grouping, "Basic" first.
    pub fn groups(&self) -> &[PropertyGroup] {
        &self.groups
    }

    /// Default rectangle at `(x, y)`.
    pub fn default_rect(&self, x: i32, y: i32) -> WidgetRect {
        WidgetRect::new(x, y, self.default_size.0, self.default_size.1)
    }

    fn build(kind: WidgetKind) -> Self {
        let (size, capabilities, extra) = type_table(kind);

        let mut defaults = PropertyMap::new();
        defaults.insert(OBJECT_NAME.to_string(), PropertyValue::from(""));
        defaults.insert(
            GEOMETRY.to_string(),
            PropertyValue::Rect(WidgetRect::new(0, 0, size.0, size.1)),
        );
        let mut type_names = Vec::with_capacity(extra.len());
        for (name, value) in extra {
            type_names.push(name);
            defaults.insert(name.to_string(), value);
        }

        let mut groups = vec![PropertyGroup {
            title: "Basic".to_string(),
            names: vec![OBJECT_NAME, GEOMETRY],
        }];
        if !type_names.is_empty() {
            groups.push(PropertyGroup {
                title: kind.display_name().to_string(),
                names: type_names,
            });
        }

        Self {
            kind,
            default_size: size,
            capabilities,
            defaults,
            groups,
        }
    }
}

fn strings(items: &[&str]) -> PropertyValue {
    PropertyValue::StringList(items.iter().map(|s| s.to_string()).collect())
}

type TypeRow = ((i32, i32), Capabilities, Vec<(&'static str, PropertyValue)>);

fn type_table(kind: WidgetKind) -> TypeRow {
    use PropertyValue::{Bool, Integer};

    let text = Capabilities {
        text: true,
        ..Capabilities::NONE
    };
    let toggle = Capabilities {
        text: true,
        checked: true,
        ..Capabilities::NONE
    };
    let input = Capabilities {
        text: true,
        placeholder_text: true,
        ..Capabilities::NONE
    };
    let items = Capabilities {
        items: true,
        ..Capabilities::NONE
    };
    let range = Capabilities {
        min_max: true,
        value: true,
        ..Capabilities::NONE
    };

    match kind {
        WidgetKind::Button => (
            (100, 30),
            toggle,
            vec![("text", "Button".into()), ("enabled", Bool(true))],
        ),
        WidgetKind::Label => (
            (100, 30),
            text,
            vec![
                ("text", "Label".into()),
                ("alignment", Token::Alignment(Alignment::Left).into()),
                ("wordWrap", Bool(false)),
            ],
        ),
        WidgetKind::TextField => (
            (120, 30),
            input,
            vec![
                ("text", "".into()),
                ("placeholderText", "Enter text".into()),
                ("maxLength", Integer(32767)),
                ("readOnly", Bool(false)),
            ],
        ),
        WidgetKind::TextArea => (
            (200, 120),
            input,
            vec![
                ("plainText", "".into()),
                ("html", "".into()),
                ("placeholderText", "Enter text".into()),
                ("readOnly", Bool(false)),
            ],
        ),
        WidgetKind::CheckBox => (
            (100, 30),
            toggle,
            vec![
                ("text", "Check box".into()),
                ("checked", Bool(false)),
                ("tristate", Bool(false)),
            ],
        ),
        WidgetKind::RadioButton => (
            (100, 30),
            toggle,
            vec![("text", "Radio button".into()), ("checked", Bool(false))],
        ),
        WidgetKind::ComboBox => (
            (120, 30),
            items,
            vec![
                ("items", strings(&["Option 1", "Option 2", "Option 3"])),
                ("currentIndex", Integer(0)),
                ("editable", Bool(false)),
            ],
        ),
        WidgetKind::SpinBox => (
            (100, 30),
            range,
            vec![
                ("minimum", Integer(0)),
                ("maximum", Integer(100)),
                ("value", Integer(50)),
                ("prefix", "".into()),
                ("suffix", "".into()),
            ],
        ),
        WidgetKind::Slider => (
            (150, 30),
            Capabilities {
                orientation: true,
                ..range
            },
            vec![
                ("minimum", Integer(0)),
                ("maximum", Integer(100)),
                ("value", Integer(50)),
                ("orientation", Token::Orientation(Orientation::Horizontal).into()),
                ("tickPosition", Token::TickPosition(TickPosition::NoTicks).into()),
            ],
        ),
        WidgetKind::GroupBox => (
            (200, 150),
            Capabilities {
                title: true,
                checked: true,
                ..Capabilities::NONE
            },
            vec![
                ("title", "Group".into()),
                ("checkable", Bool(false)),
                ("checked", Bool(false)),
            ],
        ),
        WidgetKind::TabWidget => (
            (250, 180),
            Capabilities::NONE,
            vec![
                ("currentIndex", Integer(0)),
                ("tabPosition", "North".into()),
                ("tabsClosable", Bool(false)),
            ],
        ),
        WidgetKind::Table => (
            (250, 200),
            Capabilities::NONE,
            vec![
                ("rowCount", Integer(4)),
                ("columnCount", Integer(4)),
                ("horizontalHeaderVisible", Bool(true)),
                ("verticalHeaderVisible", Bool(true)),
            ],
        ),
        WidgetKind::List => (
            (150, 180),
            items,
            vec![
                ("items", strings(&["Item 1", "Item 2", "Item 3", "Item 4"])),
                ("currentRow", Integer(0)),
                ("sortingEnabled", Bool(false)),
            ],
        ),
        WidgetKind::Placeholder => ((100, 30), Capabilities::NONE, Vec::new()),
    }
}

static CATALOG: OnceLock<Vec<WidgetTypeDescriptor>> = OnceLock::new();
static PLACEHOLDER: OnceLock<WidgetTypeDescriptor> = OnceLock::new();

/// Every placeable widget type, in palette order.
pub fn all() -> &'static [WidgetTypeDescriptor] {
    CATALOG.get_or_init(|| WidgetKind::ALL.into_iter().map(WidgetTypeDescriptor::build).collect())
}

/// Look up a descriptor by type tag.
pub fn describe(tag: &str) -> Option<&'static WidgetTypeDescriptor> {
    let kind = WidgetKind::from_tag(tag)?;
    all().iter().find(|d| d.kind == kind)
}

/// Descriptor for records of unknown type: only `objectName` and `geometry`.
pub fn placeholder() -> &'static WidgetTypeDescriptor {
    PLACEHOLDER.get_or_init(|| WidgetTypeDescriptor::build(WidgetKind::Placeholder))
}

/// Look up a descriptor, falling back to the placeholder.
pub fn describe_or_placeholder(tag: &str) -> &'static WidgetTypeDescriptor {
    describe(tag).unwrap_or_else(|| {
        log::warn!("Unknown widget type '{}', using placeholder", tag);
        placeholder()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lists_every_kind_in_palette_order() {
        let tags: Vec<_> = all().iter().map(|d| d.tag()).collect();
        assert_eq!(tags.len(), 13);
        assert_eq!(tags[0], "button");
        assert_eq!(tags[12], "list");
        assert!(!tags.contains(&"placeholder"));
    }

    #[test]
    fn test_describe_known_and_unknown() {
        let field = describe("text-field").unwrap();
        assert_eq!(field.class_name(), "QLineEdit");
        assert_eq!(field.default_size, (120, 30));
        assert!(describe("knob").is_none());
        assert_eq!(describe_or_placeholder("knob").kind, WidgetKind::Placeholder);
    }

    #[test]
    fn test_button_has_no_font_or_icon() {
        let button = describe("button").unwrap();
        let props = button.default_properties();
        let keys: Vec<_> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, [OBJECT_NAME, GEOMETRY, "text", "enabled"]);
        assert!(button.default_value("font").is_none());
        assert!(button.default_value("icon").is_none());
    }

    #[test]
    fn test_class_name_alias() {
        assert_eq!(describe("QSlider").unwrap().kind, WidgetKind::Slider);
    }

    #[test]
    fn test_every_descriptor_has_basic_properties() {
        for descriptor in all().iter().chain(std::iter::once(placeholder())) {
            let props = descriptor.default_properties();
            let keys: Vec<_> = props.keys().take(2).map(String::as_str).collect();
            assert_eq!(keys, [OBJECT_NAME, GEOMETRY], "{}", descriptor.tag());
            let rect = props[GEOMETRY].as_rect().unwrap();
            assert_eq!((rect.width, rect.height), descriptor.default_size);
        }
    }

    #[test]
    fn test_groups_cover_type_properties() {
        let slider = describe("slider").unwrap();
        let groups = slider.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, "Basic");
        assert_eq!(
            groups[1].names,
            ["minimum", "maximum", "value", "orientation", "tickPosition"]
        );
        assert_eq!(placeholder().groups().len(), 1);
    }

    #[test]
    fn test_capabilities() {
        let caps = describe("group-box").unwrap().capabilities;
        assert!(caps.supports("title"));
        assert!(caps.supports("checked"));
        assert!(caps.supports(GEOMETRY));
        assert!(!caps.supports("text"));
        assert!(!caps.supports("checkable"));

        let spin = describe("spin-box").unwrap().capabilities;
        assert!(spin.supports("minimum") && spin.supports("maximum") && spin.supports("value"));
        assert!(!spin.supports("orientation"));
    }
}
