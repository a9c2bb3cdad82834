//! Renders a [`FrameView`] into the terminal, one character cell at a time.

use super::effects::PopupLayer;
use super::layout::{render_border, render_hud_frame, render_status_bar, PlayLayout};
use super::Viewport;
use crate::core::types::{GamePhase, Point};
use crate::core::view::{FrameView, Rect as WorldRect};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Spacing of the scrolling background dots, in world units.
const GRID_CELL: f64 = 80.0;
/// Dots on every n-th row.
const GRID_ROW_STRIDE: usize = 4;
/// Samples along the slingshot string.
const STRING_SAMPLES: usize = 16;
/// Title baseline above the screen center, in world units.
const TITLE_LIFT: f64 = 150.0;
/// Menu prompt drop below the screen center, in world units.
const MENU_PROMPT_DROP: f64 = 60.0;

/// Render the whole play screen. Returns the viewport of the play field so
/// mouse input can be mapped back into world coordinates.
pub fn render_play_screen(
    frame: &mut Frame,
    area: Rect,
    view: &FrameView,
    popups: &PopupLayer,
    music_ducked: bool,
) -> Viewport {
    let inner = render_border(frame, area, " Angry Flappy Bird ", Color::Cyan);
    let layout = PlayLayout::split(inner, view.screen_width, view.screen_height);
    let viewport = Viewport::new(layout.field, view.screen_width, view.screen_height);

    let lines = rasterize(viewport, view, popups);
    frame.render_widget(Paragraph::new(lines), viewport.area);
    render_status(frame, layout.status_bar, view);
    render_hud(frame, layout.hud, view, music_ducked);

    viewport
}

/// Character grid covering the play field.
struct CellGrid {
    viewport: Viewport,
    width: usize,
    height: usize,
    cells: Vec<(char, Style)>,
}

impl CellGrid {
    fn new(viewport: Viewport) -> Self {
        let width = viewport.area.width as usize;
        let height = viewport.area.height as usize;
        Self {
            viewport,
            width,
            height,
            cells: vec![(' ', Style::default()); width * height],
        }
    }

    fn put(&mut self, col: usize, row: usize, ch: char, style: Style) {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = (ch, style);
        }
    }

    /// Draw `ch` at the cell holding a world point. Off-field points are dropped.
    fn plot(&mut self, x: f64, y: f64, ch: char, style: Style) {
        if let Some((col, row)) = self.viewport.cell_at(x, y) {
            self.put(col, row, ch, style);
        }
    }

    /// Write `text` centered horizontally on world `center_x`, on the row of world `y`.
    fn text_centered(&mut self, center_x: f64, y: f64, text: &str, style: Style) {
        let Some((center_col, row)) = self
            .viewport
            .cell_at(center_x.clamp(0.0, self.viewport.world_width - 1.0), y)
        else {
            return;
        };
        let len = text.chars().count();
        let start = center_col.saturating_sub(len / 2);
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i, row, ch, style);
        }
    }

    /// World point at the center of a grid cell.
    fn world_center(&self, col: usize, row: usize) -> (f64, f64) {
        let (cell_w, cell_h) = self.viewport.cell_size();
        ((col as f64 + 0.5) * cell_w, (row as f64 + 0.5) * cell_h)
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        if self.width == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.width)
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|(ch, style)| Span::styled(ch.to_string(), *style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

fn contains(rect: &WorldRect, x: f64, y: f64) -> bool {
    rect.height > 0.0
        && x >= rect.x
        && x < rect.x + rect.width
        && y >= rect.y
        && y < rect.y + rect.height
}

/// Build the play field lines, back to front.
fn rasterize(viewport: Viewport, view: &FrameView, popups: &PopupLayer) -> Vec<Line<'static>> {
    let mut grid = CellGrid::new(viewport);
    if grid.width == 0 || grid.height == 0 {
        return Vec::new();
    }
    let (cell_w, _) = viewport.cell_size();

    let dot = Style::default().fg(Color::DarkGray);
    let pipe = Style::default().fg(Color::Green);
    let shift = view.background_offset.rem_euclid(GRID_CELL);

    for row in 0..grid.height {
        for col in 0..grid.width {
            let (x, y) = grid.world_center(col, row);

            if view
                .pipes
                .iter()
                .any(|p| contains(&p.top, x, y) || contains(&p.bottom, x, y))
            {
                grid.put(col, row, '█', pipe);
                continue;
            }

            // A dot where a grid line crosses this cell.
            let phase = (x + shift).rem_euclid(GRID_CELL);
            if row % GRID_ROW_STRIDE == 0 && phase < cell_w {
                grid.put(col, row, '·', dot);
            }
        }
    }

    if let Some(aim) = &view.aim {
        let string = Style::default().fg(Color::Gray);
        for i in 0..=STRING_SAMPLES {
            let t = i as f64 / STRING_SAMPLES as f64;
            let x = aim.anchor.x + (aim.handle.x - aim.anchor.x) * t;
            let y = aim.anchor.y + (aim.handle.y - aim.anchor.y) * t;
            grid.plot(x, y, '∙', string);
        }
        let path = Style::default().fg(Color::Red);
        for Point { x, y } in &aim.trajectory {
            grid.plot(*x, *y, '•', path);
        }
    }

    let bird = view.bird;
    grid.plot(
        bird.position.x,
        bird.position.y,
        bird_glyph(bird.rotation, bird.animating),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    for popup in &popups.popups {
        let mut style = Style::default().fg(Color::White);
        if popup.scale() > 1.25 {
            style = style.add_modifier(Modifier::BOLD);
        }
        grid.text_centered(popup.x, popup.current_y(), &popup.label, style);
    }

    if view.title.visible {
        draw_title(&mut grid, view);
    }
    draw_center_text(&mut grid, view);

    grid.into_lines()
}

/// Title letters, each bobbing on its own offset and sliding left together.
fn draw_title(grid: &mut CellGrid, view: &FrameView) {
    let title = &view.title;
    let (cell_w, _) = grid.viewport.cell_size();
    let len = title.text.chars().count() as f64;
    let left = view.screen_width / 2.0 - len * cell_w / 2.0 - title.slide;
    let base_y = view.screen_height / 2.0 - TITLE_LIFT;
    let style = Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD);

    for (i, ch) in title.text.chars().enumerate() {
        let offset = title.char_offsets.get(i).copied().unwrap_or(0.0);
        grid.plot(left + (i as f64 + 0.5) * cell_w, base_y + offset, ch, style);
    }
}

fn draw_center_text(grid: &mut CellGrid, view: &FrameView) {
    if view.center_text.is_empty() {
        return;
    }
    let (_, cell_h) = grid.viewport.cell_size();
    let lines: Vec<&str> = view.center_text.lines().collect();
    let mut y = view.screen_height / 2.0 - lines.len() as f64 * cell_h / 2.0;
    if view.phase == GamePhase::Menu {
        y += MENU_PROMPT_DROP;
    }
    let style = if view.phase == GamePhase::GameOver {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    for line in lines {
        grid.text_centered(view.screen_width / 2.0, y, line, style);
        y += cell_h;
    }
}

/// Heading glyph for the bird, picked from its nose angle.
pub fn bird_glyph(rotation: f64, animating: bool) -> char {
    if rotation < -0.3 {
        '▲'
    } else if rotation > 0.3 {
        '▼'
    } else if animating {
        '►'
    } else {
        '●'
    }
}

fn render_status(frame: &mut Frame, area: Rect, view: &FrameView) {
    let (text, color) = match view.phase {
        GamePhase::Menu => ("Drag back with the mouse and release to launch", Color::Yellow),
        GamePhase::Start => ("Press, pull back-left, release", Color::Yellow),
        GamePhase::Playing if view.aim.is_some() => ("Aiming... time slowed", Color::Cyan),
        GamePhase::Playing => ("Drag again mid-air to relaunch", Color::Green),
        GamePhase::GameOver => ("Click to restart", Color::Red),
    };
    render_status_bar(
        frame,
        area,
        text,
        color,
        &[("[Drag]", "Aim"), ("[R]", "Restart"), ("[Q/Esc]", "Quit")],
    );
}

fn render_hud(frame: &mut Frame, area: Rect, view: &FrameView, music_ducked: bool) {
    let inner = render_hud_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let hud = &view.hud;
    let time_color = if hud.low_time { Color::Red } else { Color::White };
    let label = Style::default().fg(Color::DarkGray);

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", hud.score_text()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", hud.highscore_text()),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            format!(" {}", hud.time_text()),
            Style::default().fg(time_color),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" State: ", label),
            Span::styled(phase_name(view.phase), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled(" Pipes: ", label),
            Span::styled(view.pipes.len().to_string(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled(" Music: ", label),
            Span::raw(if music_ducked { "low" } else { "normal" }),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn phase_name(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Menu => "Menu",
        GamePhase::Start => "Ready",
        GamePhase::Playing => "Flying",
        GamePhase::GameOver => "Game Over",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view::{BirdView, HudView, PipeView, TitleView};

    fn frame_view() -> FrameView {
        FrameView {
            phase: GamePhase::Playing,
            bird: BirdView {
                position: Point::new(100.0, 300.0),
                rotation: 0.0,
                radius: 20.0,
                animating: true,
            },
            pipes: vec![PipeView {
                top: WorldRect {
                    x: 400.0,
                    y: 0.0,
                    width: 80.0,
                    height: 200.0,
                },
                bottom: WorldRect {
                    x: 400.0,
                    y: 380.0,
                    width: 80.0,
                    height: 220.0,
                },
            }],
            aim: None,
            hud: HudView {
                score: 0,
                highscore: 0,
                time_left: 30.0,
                low_time: false,
            },
            center_text: String::new(),
            title: TitleView {
                text: "Angry Flappy Bird",
                char_offsets: Vec::new(),
                slide: 0.0,
                visible: false,
            },
            background_offset: 0.0,
            screen_width: 800.0,
            screen_height: 600.0,
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(Rect::new(0, 0, 80, 30), 800.0, 600.0)
    }

    fn cell(lines: &[Line], col: usize, row: usize) -> String {
        lines[row].spans[col].content.to_string()
    }

    #[test]
    fn test_bird_glyph_follows_rotation() {
        assert_eq!(bird_glyph(-0.78, true), '▲');
        assert_eq!(bird_glyph(1.2, true), '▼');
        assert_eq!(bird_glyph(0.0, true), '►');
        assert_eq!(bird_glyph(0.0, false), '●');
    }

    #[test]
    fn test_rasterize_places_bird_and_pipes() {
        let lines = rasterize(viewport(), &frame_view(), &PopupLayer::default());
        assert_eq!(lines.len(), 30);
        assert_eq!(lines[0].spans.len(), 80);

        // Bird at (100, 300) lands in column 10, row 15.
        assert_eq!(cell(&lines, 10, 15), "►");
        // Upper pipe covers columns 40..48 down to y=200 (row 10).
        assert_eq!(cell(&lines, 42, 2), "█");
        assert_eq!(cell(&lines, 42, 12), " ");
        assert_eq!(cell(&lines, 42, 25), "█");
    }

    #[test]
    fn test_rasterize_centers_prompt() {
        let mut view = frame_view();
        view.phase = GamePhase::GameOver;
        view.center_text = "GAME OVER".to_string();
        let lines = rasterize(viewport(), &view, &PopupLayer::default());

        let row: String = lines[14]
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(row.contains("GAME OVER"));
    }

    #[test]
    fn test_rasterize_empty_area() {
        let vp = Viewport::new(Rect::new(0, 0, 0, 0), 800.0, 600.0);
        assert!(rasterize(vp, &frame_view(), &PopupLayer::default()).is_empty());
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(phase_name(GamePhase::Start), "Ready");
        assert_eq!(phase_name(GamePhase::GameOver), "Game Over");
    }
}
