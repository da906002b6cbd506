use std::io::Write;

use anyhow::{Context, Result};
use tilecraft_rendering::{Palette, RenderingBackend, Scene};

/// Backend that prints scenes as glyph grids.
#[derive(Debug)]
pub(crate) struct TextBackend<W> {
    out: W,
    palette: Option<Palette>,
}

impl<W: Write> TextBackend<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out, palette: None }
    }

    /// Tints glyphs with the palette instead of printing them plain.
    pub(crate) fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        let board = match &self.palette {
            Some(palette) => scene.render_ansi(palette),
            None => scene.render_text(),
        };
        write!(self.out, "{board}{}", scene.render_status())
            .and_then(|()| self.out.flush())
            .context("failed to draw board")
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")
            .and_then(|()| self.out.flush())
            .context("failed to write message")
    }
}
