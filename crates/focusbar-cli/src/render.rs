//! Terminal progress bar.
//!
//! Paints the top row of the terminal: the elapsed share of the interval in
//! the mode colour, the rest left blank. Idle shows the whole row in the idle
//! colour so the bar stays visible outside the flow.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, RestorePosition, SavePosition, Show};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::{execute, queue, terminal};
use focusbar_core::storage::BarConfig;
use focusbar_core::{Mode, Renderer};

pub struct TerminalBar {
    out: Stdout,
    fixed_width: Option<u16>,
    work: Color,
    brk: Color,
    idle: Color,
    /// Last frame drawn, to skip identical redraws.
    last: Option<(Mode, u16, u16)>,
}

impl TerminalBar {
    pub fn new(config: &BarConfig) -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(out, Hide)?;
        Ok(Self {
            out,
            fixed_width: (config.width > 0).then_some(config.width),
            work: color_or(&config.work_color, Color::Rgb { r: 255, g: 165, b: 0 }),
            brk: color_or(&config.break_color, Color::Rgb { r: 144, g: 238, b: 144 }),
            idle: color_or(&config.idle_color, Color::Rgb { r: 211, g: 211, b: 211 }),
            last: None,
        })
    }

    fn width(&self) -> u16 {
        self.fixed_width
            .or_else(|| terminal::size().ok().map(|(cols, _)| cols))
            .unwrap_or(80)
    }

    fn draw(&mut self, color: Color, filled: u16, width: u16) -> io::Result<()> {
        let filled = usize::from(filled);
        let rest = usize::from(width).saturating_sub(filled);
        queue!(
            self.out,
            SavePosition,
            MoveTo(0, 0),
            SetBackgroundColor(color),
            Print(" ".repeat(filled)),
            ResetColor,
            Print(" ".repeat(rest)),
            RestorePosition
        )?;
        self.out.flush()
    }
}

impl Renderer for TerminalBar {
    fn render(&mut self, mode: Mode, fraction: f64) {
        let width = self.width();
        let (color, filled) = match mode {
            Mode::Idle => (self.idle, width),
            Mode::Work => (self.work, filled_cells(fraction, width)),
            Mode::Break => (self.brk, filled_cells(fraction, width)),
        };
        if self.last == Some((mode, filled, width)) {
            return;
        }
        match self.draw(color, filled, width) {
            Ok(()) => self.last = Some((mode, filled, width)),
            Err(e) => tracing::warn!(error = %e, "cannot draw bar"),
        }
    }
}

impl Drop for TerminalBar {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show);
    }
}

/// Cells to fill for `fraction` of `width`.
pub fn filled_cells(fraction: f64, width: u16) -> u16 {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    (fraction * f64::from(width)).floor() as u16
}

/// Parse `#rrggbb` or a crossterm colour name (`dark_yellow`, `green`, ...).
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Color::Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        });
    }
    Color::try_from(s).ok()
}

fn color_or(s: &str, fallback: Color) -> Color {
    parse_color(s).unwrap_or_else(|| {
        tracing::warn!(color = s, "unrecognised bar colour, using default");
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_cells_scales_and_clamps() {
        assert_eq!(filled_cells(0.0, 100), 0);
        assert_eq!(filled_cells(0.5, 100), 50);
        assert_eq!(filled_cells(0.999, 100), 99);
        assert_eq!(filled_cells(1.0, 100), 100);
        assert_eq!(filled_cells(1.5, 100), 100);
        assert_eq!(filled_cells(-0.2, 100), 0);
        assert_eq!(filled_cells(f64::NAN, 100), 0);
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(
            parse_color("#ffa500"),
            Some(Color::Rgb { r: 255, g: 165, b: 0 })
        );
        assert_eq!(
            parse_color(" #90EE90 "),
            Some(Color::Rgb { r: 144, g: 238, b: 144 })
        );
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("#gg0000"), None);
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(parse_color("green"), Some(Color::Green));
        assert_eq!(parse_color("dark_yellow"), Some(Color::DarkYellow));
        assert_eq!(parse_color("orangeish"), None);
    }
}
