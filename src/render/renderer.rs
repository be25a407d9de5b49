use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph,
        canvas::{Canvas, Context, Rectangle},
    },
};

use super::interpolation::FrameSnapshot;
use crate::metrics::GameMetrics;

const HEAD_COLOR: Color = Color::Cyan;
const BODY_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Red;

/// Immediate-mode view: everything is redrawn from a `FrameSnapshot`
pub struct Renderer {
    cell_size: f64,
}

impl Renderer {
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size: f64::from(cell_size.max(1)),
        }
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &FrameSnapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let board_area = board_rect(chunks[1]);
        self.render_board(frame, board_area, snapshot);

        if snapshot.is_over() {
            let banner_area = centered(board_area, 32, 7);
            frame.render_widget(Clear, banner_area);
            frame.render_widget(self.render_game_over(snapshot), banner_area);
        } else if !snapshot.moving {
            let hint_area = centered(board_area, 34, 3);
            frame.render_widget(Clear, hint_area);
            frame.render_widget(self.render_start_hint(), hint_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_board(&self, frame: &mut Frame, area: Rect, snapshot: &FrameSnapshot) {
        let cell = self.cell_size;
        let grid = snapshot.grid_size as f64;
        let extent = grid * cell;

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .marker(Marker::Braille)
            .x_bounds([0.0, extent])
            .y_bounds([0.0, extent])
            .paint(|ctx| {
                draw_cell(
                    ctx,
                    f64::from(snapshot.food.x),
                    f64::from(snapshot.food.y),
                    grid,
                    cell,
                    FOOD_COLOR,
                );

                // Body first so the head stays on top
                for segment in snapshot.segments.iter().rev() {
                    let color = if segment.is_head { HEAD_COLOR } else { BODY_COLOR };
                    draw_cell(ctx, segment.x, segment.y, grid, cell, color);
                }
            });

        frame.render_widget(canvas, area);
    }

    fn render_stats(&self, snapshot: &FrameSnapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:.0}ms", snapshot.step_interval_ms),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &FrameSnapshot) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_start_hint(&self) -> Paragraph<'_> {
        Paragraph::new(Line::from(vec![
            Span::styled("Press an arrow key to start", Style::default().fg(Color::Gray)),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

/// Draw one unit square at grid coordinates `(x, y)`.
///
/// Grid rows grow downwards while the canvas y axis grows upwards.
fn draw_cell(ctx: &mut Context, x: f64, y: f64, grid: f64, cell: f64, color: Color) {
    let left = x * cell;
    let bottom = (grid - 1.0 - y) * cell;
    ctx.draw(&Rectangle {
        x: left,
        y: bottom,
        width: cell,
        height: cell,
        color,
    });
    let inset = cell * 0.25;
    ctx.draw(&Rectangle {
        x: left + inset,
        y: bottom + inset,
        width: cell - 2.0 * inset,
        height: cell - 2.0 * inset,
        color,
    });
}

/// Largest area that looks square, given terminal cells are about twice
/// as tall as they are wide.
fn board_rect(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(2));
    let height = (width / 2).min(area.height);
    centered(area, width, height)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
