// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal drawing for `definiens inspect`.
//!
//! Boxes, a dark and a light palette, and a few fixed-width formatters that
//! measure text by visible characters so ANSI escapes never break alignment.
//! Colors are dropped when stdout is not a TTY or `NO_COLOR` is set.
//!
//! # Theme detection order
//!
//! 1. `DEFINIENS_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

/// Width between the two vertical borders.
pub const BOX_WIDTH: usize = 80;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

// ═══════════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("DEFINIENS_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": backgrounds 7 and above (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

/// The colors the inspect view uses, as RGB triples.
struct Palette {
    border: (u8, u8, u8),
    frame: (u8, u8, u8),
    label: (u8, u8, u8),
    title: (u8, u8, u8),
    muted: (u8, u8, u8),
    subject: (u8, u8, u8),
    definition: (u8, u8, u8),
    confirmed: (u8, u8, u8),
    moi: (u8, u8, u8),
    identifier: (u8, u8, u8),
}

/// OneDark
const DARK: Palette = Palette {
    border: (92, 99, 112),
    frame: (97, 175, 239),
    label: (86, 182, 194),
    title: (102, 217, 239),
    muted: (92, 99, 112),
    subject: (229, 192, 123),
    definition: (152, 195, 121),
    confirmed: (166, 226, 46),
    moi: (224, 145, 237),
    identifier: (127, 200, 255),
};

/// One Light
const LIGHT: Palette = Palette {
    border: (160, 161, 167),
    frame: (64, 120, 242),
    label: (1, 132, 188),
    title: (1, 112, 158),
    muted: (160, 161, 167),
    subject: (193, 132, 1),
    definition: (80, 161, 79),
    confirmed: (68, 140, 39),
    moi: (146, 38, 144),
    identifier: (54, 100, 212),
};

fn palette() -> &'static Palette {
    match theme() {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

/// Named roles the callers color text with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Muted,
    Subject,
    Definition,
}

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Colors on a TTY unless `NO_COLOR` is set.
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

fn paint(color: (u8, u8, u8), modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), rgb(color), text, RESET)
    } else {
        text.to_string()
    }
}

/// Color `text` by role.
pub fn themed(role: Role, text: &str) -> String {
    let p = palette();
    match role {
        Role::Muted => paint(p.muted, &[], text),
        Role::Subject => paint(p.subject, &[], text),
        Role::Definition => paint(p.definition, &[BOLD], text),
    }
}

/// Visible length, ANSI escapes excluded.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border() -> String {
    if use_colors() {
        rgb(palette().border)
    } else {
        String::new()
    }
}

fn frame() -> String {
    if use_colors() {
        rgb(palette().frame)
    } else {
        String::new()
    }
}

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let b = border();
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{b}│{RESET}{}{}{b}│{RESET}", content, " ".repeat(pad));
}

fn section_line(left: char, right: char, label: &str) {
    let b = border();
    let label_part = format!("─ {} ", paint(palette().label, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("{b}{left}{RESET}{}{b}{}{right}{RESET}", label_part, "─".repeat(remaining));
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    section_line('┌', '┐', label);
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    section_line('├', '┤', label);
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{RESET}", border(), "─".repeat(BOX_WIDTH));
}

/// Print a framed, centered title block.
pub fn title_block(text: &str) {
    let f = frame();
    let colored = paint(palette().title, &[BOLD], text);
    let total_pad = BOX_WIDTH.saturating_sub(visible_len(&colored));
    let left = total_pad / 2;
    println!("{f}╔{}╗{RESET}", "═".repeat(BOX_WIDTH));
    println!(
        "{f}║{RESET}{}{}{}{f}║{RESET}",
        " ".repeat(left),
        colored,
        " ".repeat(total_pad - left)
    );
    println!("{f}╚{}╝{RESET}", "═".repeat(BOX_WIDTH));
}

// ═══════════════════════════════════════════════════════════════════════════
// FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Left-pad to a visible width.
pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

/// Right-pad to a visible width.
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Cut to `max_len` characters, ending in "..." when something was dropped.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Bracketed badge: `[MOI]`, `[IDENT]`, `[MERGE]`.
pub fn mode_badge(mode: &str) -> String {
    let p = palette();
    let color = match mode {
        "MOI" => p.moi,
        "IDENT" => p.identifier,
        _ => p.label,
    };
    paint(color, &[], &format!("[{}]", mode))
}

/// Fixed-width score; pattern hits and confident scores stand out.
pub fn score_value(score: f64) -> String {
    let p = palette();
    let text = format!("{:>6.3}", score);
    if score >= 1.0 {
        paint(p.confirmed, &[BOLD], &text)
    } else if score >= 0.8 {
        paint(p.definition, &[], &text)
    } else if score >= 0.5 {
        paint(p.subject, &[], &text)
    } else {
        paint(p.muted, &[], &text)
    }
}
