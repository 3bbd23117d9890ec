use ratatui::style::{Color, Modifier, Style};

use crate::models::Tier;

pub const BG: Color = Color::Rgb(15, 23, 42);
pub const SURFACE: Color = Color::Rgb(22, 33, 56);
pub const BORDER: Color = Color::Rgb(51, 65, 85);
pub const TEXT: Color = Color::Rgb(226, 232, 240);
pub const TEXT_DIM: Color = Color::Rgb(100, 116, 139);
pub const SKY: Color = Color::Rgb(56, 189, 248);
pub const GOLD: Color = Color::Rgb(251, 191, 36);
pub const GREEN: Color = Color::Rgb(74, 222, 128);
pub const RED: Color = Color::Rgb(248, 113, 113);
pub const GREY: Color = Color::Rgb(148, 163, 184);
pub const TODAY: Color = Color::Rgb(30, 58, 95);
pub const SELECTED: Color = Color::Rgb(56, 78, 120);

/// Badge color per rank: grey, green, red, gold.
pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Noob => GREY,
        Tier::Pro => GREEN,
        Tier::Hacker => RED,
        Tier::God => GOLD,
    }
}

pub fn tier(tier: Tier) -> Style {
    Style::default()
        .fg(tier_color(tier))
        .add_modifier(Modifier::BOLD)
}

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn sky() -> Style {
    Style::default().fg(SKY)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}
