//! Recording surface
//!
//! Stores draw calls instead of rasterizing them.

use glam::Vec2;

use super::Surface;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        origin: Vec2,
        size: Vec2,
        color: String,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: String,
        width: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: String,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: String,
        width: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        font: String,
        color: String,
    },
}

/// Surface that records every call in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Filled circles drawn with `color`
    pub fn circles_with_color<'a>(&'a self, color: &'a str) -> impl Iterator<Item = Vec2> + 'a {
        self.commands.iter().filter_map(move |cmd| match cmd {
            DrawCommand::FillCircle { center, color: c, .. } if c == color => Some(*center),
            _ => None,
        })
    }

    /// All text drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color: color.to_string(),
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: &str, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color: color.to_string(),
            width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, width: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color: color.to_string(),
            width,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            font: font.to_string(),
            color: color.to_string(),
        });
    }
}
