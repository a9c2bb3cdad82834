//! Screen split: bordered play field with a status strip under it and the
//! HUD panel on its right.
//!
//! ```text
//! ┌─ Angry Flappy Bird ─────────────┬─ Info ─────┐
//! │                                 │            │
//! │   [play field]                  │  [hud]     │
//! │                                 │            │
//! │ [status - 2 lines]              │            │
//! └─────────────────────────────────┴────────────┘
//! ```

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub const HUD_WIDTH: u16 = 22;
pub const STATUS_HEIGHT: u16 = 2;
/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayLayout {
    /// Play field, letterboxed to the world's aspect ratio.
    pub field: Rect,
    pub status_bar: Rect,
    pub hud: Rect,
}

impl PlayLayout {
    /// Split the inside of the outer border.
    pub fn split(inner: Rect, world_width: f64, world_height: f64) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(HUD_WIDTH)])
            .split(inner);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(STATUS_HEIGHT)])
            .split(columns[0]);

        Self {
            field: letterbox(rows[0], world_width, world_height),
            status_bar: rows[1],
            hud: columns[1],
        }
    }
}

/// Largest centered sub-area whose cells cover the world without stretching it.
pub fn letterbox(area: Rect, world_width: f64, world_height: f64) -> Rect {
    if area.width == 0 || area.height == 0 || world_width <= 0.0 || world_height <= 0.0 {
        return area;
    }
    let aspect = world_width / world_height * CELL_ASPECT;
    let wanted_width = (area.height as f64 * aspect).round() as u16;

    if wanted_width <= area.width {
        let width = wanted_width.max(1);
        Rect {
            x: area.x + (area.width - width) / 2,
            width,
            ..area
        }
    } else {
        let height = ((area.width as f64 / aspect).round() as u16).clamp(1, area.height);
        Rect {
            y: area.y + (area.height - height) / 2,
            height,
            ..area
        }
    }
}

/// Clear `area`, draw the titled outer border and return what is inside it.
pub fn render_border(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Prompt on the first line, `[key] action` hints on the second.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    prompt: &str,
    color: Color,
    controls: &[(&str, &str)],
) {
    if area.height == 0 {
        return;
    }
    frame.render_widget(
        Paragraph::new(prompt)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center),
        Rect { height: 1, ..area },
    );

    if area.height < 2 || controls.is_empty() {
        return;
    }
    let hints: Vec<Span> = controls
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let gap = if i == 0 { "" } else { "  " };
            [
                Span::raw(gap),
                Span::styled(*key, Style::default().fg(Color::White)),
                Span::styled(format!(" {}", action), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(hints)).alignment(Alignment::Center),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

/// Bordered " Info " panel; returns its inside.
pub fn render_hud_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}
