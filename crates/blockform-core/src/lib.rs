//! BlockForm Core Library
//!
//! Canvas engine for the BlockForm GUI designer: widget catalog, placement
//! registry, selection and manipulation, property binding, code export and
//! project files. Rendering is delegated to a [`RenderFacade`].

pub mod binding;
pub mod canvas;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod facade;
pub mod geometry;
pub mod input;
pub mod property;
pub mod registry;
pub mod selection;
pub mod session;
pub mod storage;

pub use binding::{EditorView, PropertyBinding, PropertyEditor};
pub use canvas::{Canvas, CanvasEvent, ContextMenu, DuplicateReport, MenuAction, PropertyOutcome};
pub use catalog::{Capabilities, WidgetKind, WidgetTypeDescriptor};
pub use config::CanvasConfig;
pub use error::{CanvasError, CanvasResult};
pub use export::{ExportFormat, ExportOptions, export};
pub use facade::{HeadlessFacade, HighlightStyle, RenderFacade};
pub use geometry::{GridConfig, WidgetRect, snap_point, snap_rect};
pub use input::{MouseButton, PointerEvent};
pub use property::{PropertyMap, PropertyValue};
pub use registry::{PlacedWidget, WidgetId, WidgetRegistry};
pub use selection::{CursorHint, InteractionState, ResizeHandle};
pub use session::EditorSession;
pub use storage::{ProjectDocument, StorageError};
