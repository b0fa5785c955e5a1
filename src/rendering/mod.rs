//! # Rendering Module
//!
//! Terminal presentation of rendered frames.
//!
//! The core produces display data ([`crate::game::GameMap::render`]); this
//! module is the thin sink that turns a [`Frame`] into colored terminal
//! output with crossterm. It holds no game state and never reads the map
//! directly.

use crate::game::map::Frame;
use crate::game::tiles::Rgb;
use crate::DelveResult;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

/// Writes frames to a terminal.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    /// Creates a new display.
    pub fn new() -> Self {
        Self
    }

    /// Writes the frame to stdout, one row per line.
    pub fn present(&self, frame: &Frame) -> DelveResult<()> {
        let mut out = io::stdout().lock();
        self.write_frame(frame, &mut out)
    }

    /// Writes the frame to an arbitrary sink.
    pub fn write_frame(&self, frame: &Frame, out: &mut impl Write) -> DelveResult<()> {
        for y in 0..frame.height {
            for x in 0..frame.width {
                let glyph = frame.get(x, y);
                queue!(
                    out,
                    SetForegroundColor(to_color(glyph.fg)),
                    SetBackgroundColor(to_color(glyph.bg)),
                    Print(glyph.ch),
                )?;
            }
            queue!(out, ResetColor, Print('\n'))?;
        }
        out.flush()?;
        Ok(())
    }
}

fn to_color(color: Rgb) -> Color {
    let Rgb(r, g, b) = color;
    Color::Rgb { r, g, b }
}
