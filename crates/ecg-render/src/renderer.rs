//! Rendering interface
//!
//! A renderer receives one complete [`Plot`] per call and shares no drawing
//! state between calls, so plots of different records can be rendered
//! independently.

use crate::plot::Plot;
use ecg_core::Result;
use std::path::PathBuf;

/// Where a rendered plot goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// Produce the document in memory
    Display,
    /// Write the document to this file, creating parent directories
    File(PathBuf),
}

/// What a render call produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Document written to this path
    File(PathBuf),
    /// In-memory document
    Inline(String),
    /// Renderer produced nothing
    Skipped,
}

impl Rendered {
    /// Path of the written file, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Rendered::File(path) => Some(path),
            _ => None,
        }
    }
}

/// Turns a plot description into an artifact
pub trait Renderer {
    fn render(&self, plot: &Plot, target: &RenderTarget) -> Result<Rendered>;

    /// File extension of written documents
    fn extension(&self) -> &'static str;

    /// Check if this renderer actually produces output
    fn is_enabled(&self) -> bool {
        true
    }
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, plot: &Plot, target: &RenderTarget) -> Result<Rendered> {
        (**self).render(plot, target)
    }

    fn extension(&self) -> &'static str {
        (**self).extension()
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&self, plot: &Plot, target: &RenderTarget) -> Result<Rendered> {
        (**self).render(plot, target)
    }

    fn extension(&self) -> &'static str {
        (**self).extension()
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

/// Null renderer that does nothing (for when plotting is disabled)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&self, _plot: &Plot, _target: &RenderTarget) -> Result<Rendered> {
        Ok(Rendered::Skipped)
    }

    fn extension(&self) -> &'static str {
        "none"
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
