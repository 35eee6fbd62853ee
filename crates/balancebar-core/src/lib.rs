//! Core types and traits for the balancebar chart widget.
//!
//! This crate provides the foundational types used throughout balancebar:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with hex parsing
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`]
//! - Rendering: [`Canvas`], [`DrawCommand`], [`RecordingCanvas`]
//! - The [`Widget`] trait

mod canvas;
mod color;
mod constraints;
mod draw;
mod event;
mod geometry;
pub mod widget;

pub use canvas::{Canvas, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{DrawCommand, FontWeight, TextStyle};
pub use event::{Event, Key, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use widget::{LayoutResult, TypeId, Widget, WidgetId};
