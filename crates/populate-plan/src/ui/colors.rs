use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::Color as CellColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy)]
pub enum Theme {
  Dark,
  Light,
}

#[derive(Debug, Clone, Copy)]
struct Palette {
  timestamp: Color,
  primary: Color,
  accent: Color,
  label: Color,
  value: Color,
  success: Color,
}

const DARK: Palette = Palette {
  timestamp: Color::Rgb { r: 118, g: 166, b: 166 },
  primary: Color::Rgb { r: 191, g: 126, b: 4 },
  accent: Color::Rgb { r: 166, g: 84, b: 55 },
  label: Color::Rgb { r: 217, g: 164, b: 4 },
  value: Color::Rgb { r: 242, g: 211, b: 56 },
  success: Color::Rgb { r: 118, g: 166, b: 166 },
};

const LIGHT: Palette = Palette {
  timestamp: Color::Rgb { r: 92, g: 62, b: 38 },
  primary: Color::Rgb { r: 70, g: 42, b: 25 },
  accent: Color::Rgb { r: 211, g: 99, b: 70 },
  label: Color::Rgb { r: 176, g: 103, b: 66 },
  value: Color::Rgb { r: 199, g: 146, b: 76 },
  success: Color::Rgb { r: 34, g: 142, b: 90 },
};

pub struct Colors {
  enabled: bool,
  palette: Palette,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    let palette = match theme {
      Theme::Dark => DARK,
      Theme::Light => LIGHT,
    };
    Self { enabled, palette }
  }

  const fn pick(&self, color: Color) -> Color {
    if self.enabled { color } else { Color::Reset }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(self.palette.timestamp)
  }

  pub const fn primary(&self) -> Color {
    self.pick(self.palette.primary)
  }

  pub const fn accent(&self) -> Color {
    self.pick(self.palette.accent)
  }

  pub const fn label(&self) -> Color {
    self.pick(self.palette.label)
  }

  pub const fn value(&self) -> Color {
    self.pick(self.palette.value)
  }

  pub const fn success(&self) -> Color {
    self.pick(self.palette.success)
  }
}

/// Table cell colour for a terminal colour.
pub fn cell_color(color: Color) -> CellColor {
  match color {
    Color::Reset => CellColor::Reset,
    Color::Black => CellColor::Black,
    Color::DarkGrey => CellColor::DarkGrey,
    Color::Red => CellColor::Red,
    Color::DarkRed => CellColor::DarkRed,
    Color::Green => CellColor::Green,
    Color::DarkGreen => CellColor::DarkGreen,
    Color::Yellow => CellColor::Yellow,
    Color::DarkYellow => CellColor::DarkYellow,
    Color::Blue => CellColor::Blue,
    Color::DarkBlue => CellColor::DarkBlue,
    Color::Magenta => CellColor::Magenta,
    Color::DarkMagenta => CellColor::DarkMagenta,
    Color::Cyan => CellColor::Cyan,
    Color::DarkCyan => CellColor::DarkCyan,
    Color::White => CellColor::White,
    Color::Grey => CellColor::Grey,
    Color::Rgb { r, g, b } => CellColor::Rgb { r, g, b },
    Color::AnsiValue(val) => CellColor::AnsiValue(val),
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => detect_terminal_theme(),
  }
}

fn detect_terminal_theme() -> Theme {
  if let Ok(colorfgbg) = std::env::var("COLORFGBG")
    && let Some(bg) = colorfgbg.split(';').next_back()
    && let Ok(bg_num) = bg.parse::<u8>()
  {
    return if bg_num >= 8 { Theme::Light } else { Theme::Dark };
  }

  Theme::Dark
}
