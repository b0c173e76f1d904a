//! Canvas configuration.

use crate::error::{CanvasError, CanvasResult};
use crate::facade::HighlightStyle;
use crate::geometry::{GridConfig, MIN_WIDGET_SIZE};
use crate::selection::HANDLE_SIZE;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Selection border settings, as stored in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// `#rrggbb` or `#rrggbbaa`.
    pub color: String,
    pub width: f64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            color: "#3399ff".to_string(),
            width: 2.0,
        }
    }
}

impl HighlightConfig {
    /// Resolve to a drawable style.
    pub fn style(&self) -> CanvasResult<HighlightStyle> {
        let color = parse_hex_color(&self.color).ok_or_else(|| {
            CanvasError::InvalidConfiguration(format!("bad highlight color '{}'", self.color))
        })?;
        Ok(HighlightStyle {
            color,
            width: self.width,
        })
    }
}

fn parse_hex_color(text: &str) -> Option<Color> {
    let hex = text.strip_prefix('#')?;
    if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { channel(6)? } else { 0xff };
    Some(Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, alpha))
}

/// Visible canvas extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// Settings of one canvas session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub grid: GridConfig,
    /// Half-extent of each resize handle's hit zone.
    pub handle_size: f64,
    /// Pointer travel before a press on a widget becomes a drag.
    pub drag_threshold: f64,
    pub min_widget_size: i32,
    /// Offset of a duplicate from its source, on both axes.
    pub duplicate_offset: i32,
    pub highlight: HighlightConfig,
    pub canvas_size: CanvasSize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            handle_size: HANDLE_SIZE,
            drag_threshold: 10.0,
            min_widget_size: MIN_WIDGET_SIZE,
            duplicate_offset: 20,
            highlight: HighlightConfig::default(),
            canvas_size: CanvasSize {
                width: 800.0,
                height: 600.0,
            },
        }
    }
}

impl CanvasConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let config: CanvasConfig = serde_json::from_str(json)
            .map_err(|e| CanvasError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CanvasResult<()> {
        let invalid = |msg: String| -> CanvasResult<()> { Err(CanvasError::InvalidConfiguration(msg)) };
        if self.grid.size <= 0 {
            return invalid(format!("grid size must be positive, got {}", self.grid.size));
        }
        if self.handle_size <= 0.0 {
            return invalid(format!("handle size must be positive, got {}", self.handle_size));
        }
        if self.drag_threshold < 0.0 {
            return invalid(format!(
                "drag threshold must not be negative, got {}",
                self.drag_threshold
            ));
        }
        if self.min_widget_size <= 0 {
            return invalid(format!(
                "minimum widget size must be positive, got {}",
                self.min_widget_size
            ));
        }
        self.highlight.style()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CanvasConfig::default();
        assert_eq!(config.grid.size, 10);
        assert!(config.grid.snap);
        assert_eq!(config.handle_size, 8.0);
        assert_eq!(config.min_widget_size, 10);
        assert_eq!(config.duplicate_offset, 20);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = CanvasConfig::from_json(r#"{"grid": {"size": 25}, "drag_threshold": 4}"#).unwrap();
        assert_eq!(config.grid.size, 25);
        assert!(config.grid.show);
        assert_eq!(config.drag_threshold, 4.0);
        assert_eq!(config.highlight, HighlightConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(CanvasConfig::from_json(r#"{"grid": {"size": 0}}"#).is_err());
        assert!(CanvasConfig::from_json(r#"{"handle_size": -1}"#).is_err());
        assert!(CanvasConfig::from_json(r#"{"highlight": {"color": "blue"}}"#).is_err());
        assert!(CanvasConfig::from_json("42").is_err());
    }

    #[test]
    fn test_highlight_color_parsing() {
        let style = HighlightConfig::default().style().unwrap();
        let rgba = style.color.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (0x33, 0x99, 0xff, 0xff));
        let translucent = HighlightConfig {
            color: "#00000080".into(),
            width: 1.0,
        };
        assert_eq!(translucent.style().unwrap().color.to_rgba8().a, 0x80);
    }
}
