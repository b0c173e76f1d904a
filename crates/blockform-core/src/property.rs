//! Typed property values stored on placed widgets.

use crate::geometry::WidgetRect;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the geometry property every widget carries.
pub const GEOMETRY: &str = "geometry";
/// Name of the object-name property every widget carries.
pub const OBJECT_NAME: &str = "objectName";

/// Ordered property record, keyed by property name.
pub type PropertyMap = IndexMap<String, PropertyValue>;

/// Text alignment choices offered by the property editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Top,
    VCenter,
    Bottom,
}

impl Alignment {
    pub const ALL: [Alignment; 6] = [
        Alignment::Left,
        Alignment::Center,
        Alignment::Right,
        Alignment::Top,
        Alignment::VCenter,
        Alignment::Bottom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Top => "top",
            Alignment::VCenter => "vCenter",
            Alignment::Bottom => "bottom",
        }
    }

    /// Toolkit flag expression used by the exporters.
    pub fn qt_flag(self) -> &'static str {
        match self {
            Alignment::Left => "Qt::AlignLeft|Qt::AlignVCenter",
            Alignment::Center => "Qt::AlignCenter",
            Alignment::Right => "Qt::AlignRight|Qt::AlignVCenter",
            Alignment::Top => "Qt::AlignTop",
            Alignment::VCenter => "Qt::AlignVCenter",
            Alignment::Bottom => "Qt::AlignBottom",
        }
    }
}

/// Slider orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// Slider tick mark placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TickPosition {
    NoTicks,
    Above,
    Below,
    BothSides,
}

impl TickPosition {
    pub const ALL: [TickPosition; 4] = [
        TickPosition::NoTicks,
        TickPosition::Above,
        TickPosition::Below,
        TickPosition::BothSides,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TickPosition::NoTicks => "noTicks",
            TickPosition::Above => "above",
            TickPosition::Below => "below",
            TickPosition::BothSides => "bothSides",
        }
    }
}

/// Enumerated property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    Alignment(Alignment),
    Orientation(Orientation),
    TickPosition(TickPosition),
}

impl Token {
    pub fn as_str(self) -> &'static str {
        match self {
            Token::Alignment(a) => a.as_str(),
            Token::Orientation(o) => o.as_str(),
            Token::TickPosition(t) => t.as_str(),
        }
    }

    /// Parse `text` as a token of the same family as `self`.
    ///
    /// Matching ignores ASCII case, so `"Horizontal"` is accepted for an
    /// orientation.
    pub fn parse_like(self, text: &str) -> Option<Token> {
        let text = text.trim();
        match self {
            Token::Alignment(_) => Alignment::ALL
                .into_iter()
                .find(|a| a.as_str().eq_ignore_ascii_case(text))
                .map(Token::Alignment),
            Token::Orientation(_) => Orientation::ALL
                .into_iter()
                .find(|o| o.as_str().eq_ignore_ascii_case(text))
                .map(Token::Orientation),
            Token::TickPosition(_) => TickPosition::ALL
                .into_iter()
                .find(|t| t.as_str().eq_ignore_ascii_case(text))
                .map(Token::TickPosition),
        }
    }

    fn same_family(self, other: Token) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

/// A single property value.
///
/// The variant a property name uses is fixed by the widget type's default
/// property set. Deserialization is untagged, so enumerated tokens come back
/// as plain strings; [`PropertyValue::conform_to`] restores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    String(String),
    StringList(Vec<String>),
    Rect(WidgetRect),
    Token(Token),
}

impl PropertyValue {
    /// Short type label used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "boolean",
            PropertyValue::Integer(_) => "integer",
            PropertyValue::Real(_) => "real",
            PropertyValue::String(_) => "string",
            PropertyValue::StringList(_) => "string list",
            PropertyValue::Rect(_) => "rect",
            PropertyValue::Token(_) => "token",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            PropertyValue::Token(t) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            PropertyValue::StringList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_rect(&self) -> Option<WidgetRect> {
        match self {
            PropertyValue::Rect(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<Token> {
        match self {
            PropertyValue::Token(t) => Some(*t),
            _ => None,
        }
    }

    /// Convert `self` to the variant used by `template`.
    ///
    /// Integers widen to reals and strings parse into tokens of the
    /// template's family. Anything else must already match. On failure the
    /// expected type label is returned.
    pub fn conform_to(self, template: &PropertyValue) -> Result<PropertyValue, &'static str> {
        let expected = template.type_name();
        match (self, template) {
            (PropertyValue::Integer(i), PropertyValue::Real(_)) => Ok(PropertyValue::Real(i as f64)),
            (PropertyValue::String(s), PropertyValue::Token(t)) => {
                t.parse_like(&s).map(PropertyValue::Token).ok_or(expected)
            }
            (PropertyValue::Token(t), PropertyValue::Token(family)) => {
                if t.same_family(*family) {
                    Ok(PropertyValue::Token(t))
                } else {
                    family.parse_like(t.as_str()).map(PropertyValue::Token).ok_or(expected)
                }
            }
            (value, template) => {
                if std::mem::discriminant(&value) == std::mem::discriminant(template) {
                    Ok(value)
                } else {
                    Err(expected)
                }
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<WidgetRect> for PropertyValue {
    fn from(r: WidgetRect) -> Self {
        PropertyValue::Rect(r)
    }
}

impl From<Token> for PropertyValue {
    fn from(t: Token) -> Self {
        PropertyValue::Token(t)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(items: Vec<String>) -> Self {
        PropertyValue::StringList(items)
    }
}
