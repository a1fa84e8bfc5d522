use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph,
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
    },
};

use super::view::{RecordStatus, Screen, TerminalView};
use crate::driver::BoardFrame;
use crate::leaderboard::LeaderboardView;
use crate::metrics::GameMetrics;

/// Terminal columns and rows per grid cell. With braille markers this gives
/// square cells of 8x8 dots.
const COLS_PER_CELL: u16 = 4;
const ROWS_PER_CELL: u16 = 2;

pub struct Renderer {
    grid_size: u16,
}

impl Renderer {
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size: u16::try_from(grid_size).unwrap_or(u16::MAX),
        }
    }

    pub fn render(&self, frame: &mut Frame, view: &TerminalView, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board and leaderboard
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(view, metrics);
        frame.render_widget(stats, chunks[0]);

        let board_width = self.grid_size.saturating_mul(COLS_PER_CELL).saturating_add(2);
        let board_height = self.grid_size.saturating_mul(ROWS_PER_CELL).saturating_add(2);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(board_width),
                Constraint::Length(2),
                Constraint::Min(20),
            ])
            .split(chunks[1]);

        let board_area = Rect {
            height: board_height.min(columns[0].height),
            ..columns[0]
        };
        match &view.board {
            Some(board) => self.render_board(frame, board_area, board),
            None => frame.render_widget(self.board_block(), board_area),
        }

        let leaderboard = self.render_leaderboard(&view.leaderboard);
        frame.render_widget(leaderboard, columns[2]);

        match view.screen {
            Screen::Start => self.render_popup(frame, chunks[1], 38, 9, self.render_start(view)),
            Screen::Paused => self.render_popup(frame, chunks[1], 38, 7, self.render_paused()),
            Screen::GameOver => {
                self.render_popup(frame, chunks[1], 44, 12, self.render_game_over(view))
            }
            Screen::Playing => {}
        }

        let controls = self.render_controls(view.screen);
        frame.render_widget(controls, chunks[2]);
    }

    fn board_block(&self) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ")
    }

    /// Draw the board on a canvas addressed in surface pixels. Canvas y grows
    /// upwards, the board's y grows downwards.
    fn render_board(&self, frame: &mut Frame, area: Rect, board: &BoardFrame) {
        let size = board.surface_size;
        let cell = board.cell_size;
        let flip = |y: f64| size - y;

        let cells = (size / cell).round() as usize;
        let cell_dots: Vec<(f64, f64)> = (0..cells)
            .flat_map(|x| (0..cells).map(move |y| (x, y)))
            .map(|(x, y)| (x as f64 * cell + cell / 2.0, flip(y as f64 * cell + cell / 2.0)))
            .collect();

        let canvas = Canvas::default()
            .block(self.board_block())
            .marker(Marker::Braille)
            .x_bounds([0.0, size])
            .y_bounds([0.0, size])
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &cell_dots,
                    color: Color::DarkGray,
                });
                ctx.layer();

                if let Some((fx, fy)) = board.fruit {
                    ctx.draw(&Circle {
                        x: fx,
                        y: flip(fy),
                        radius: cell * 0.3,
                        color: Color::Red,
                    });
                }

                // Body as a thick polyline through the segment centres
                let thickness = cell * 0.12;
                for pair in board.segments.windows(2) {
                    let (x1, y1) = pair[0];
                    let (x2, y2) = pair[1];
                    for (ox, oy) in [
                        (0.0, 0.0),
                        (thickness, 0.0),
                        (-thickness, 0.0),
                        (0.0, thickness),
                        (0.0, -thickness),
                    ] {
                        ctx.draw(&CanvasLine::new(
                            x1 + ox,
                            flip(y1) + oy,
                            x2 + ox,
                            flip(y2) + oy,
                            Color::Green,
                        ));
                    }
                }
                ctx.layer();

                if let Some((hx, hy)) = board.head() {
                    let radius = cell * 0.4;
                    ctx.draw(&Circle {
                        x: hx,
                        y: flip(hy),
                        radius,
                        color: Color::LightGreen,
                    });

                    // Eyes sit ahead of the centre, either side of the heading
                    let (dx, dy) = board.direction.delta();
                    let (dx, dy) = (dx as f64, dy as f64);
                    let (px, py) = (-dy, dx);
                    let ahead = radius * 0.5;
                    let side = radius * 0.25;
                    let eyes = [
                        (hx + dx * ahead + px * side, hy + dy * ahead + py * side),
                        (hx + dx * ahead - px * side, hy + dy * ahead - py * side),
                    ]
                    .map(|(x, y)| (x, flip(y)));
                    ctx.draw(&Points {
                        coords: &eyes,
                        color: Color::White,
                    });
                }
            });

        frame.render_widget(canvas, area);
    }

    fn render_stats(&self, view: &TerminalView, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}ms", view.tick_interval_ms),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_leaderboard(&self, view: &LeaderboardView) -> Paragraph<'_> {
        let placeholder = Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC);
        let lines: Vec<Line> = match view {
            LeaderboardView::Rows(_) => view
                .entries()
                .into_iter()
                .enumerate()
                .map(|(i, entry)| {
                    let style = if i < 3 {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    Line::from(Span::styled(entry, style))
                })
                .collect(),
            LeaderboardView::Unavailable => view
                .entries()
                .into_iter()
                .map(|entry| Line::from(Span::styled(entry, Style::default().fg(Color::Red))))
                .collect(),
            _ => view
                .entries()
                .into_iter()
                .map(|entry| Line::from(Span::styled(entry, placeholder)))
                .collect(),
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Leaderboard "),
        )
    }

    fn render_start(&self, view: &TerminalView) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GRID SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];
        if view.record_status == RecordStatus::Recorded {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                "Score recorded!",
                Style::default().fg(Color::Cyan),
            )));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_paused(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Space to resume, Q to quit",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, view: &TerminalView) -> Paragraph<'_> {
        let status = match &view.record_status {
            RecordStatus::Idle => Line::from(""),
            RecordStatus::Submitting => Line::from(Span::styled(
                "Recording...",
                Style::default().fg(Color::Gray),
            )),
            RecordStatus::Failed(message) => Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )),
            RecordStatus::Recorded => Line::from(Span::styled(
                "Score recorded!",
                Style::default().fg(Color::Cyan),
            )),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Nickname: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{}_", view.nickname),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]),
            status,
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::styled(" record  ", Style::default().fg(Color::Gray)),
                Span::styled("F5", Style::default().fg(Color::Green)),
                Span::styled(" restart  ", Style::default().fg(Color::Gray)),
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::styled(" menu", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, screen: Screen) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let spans = match screen {
            Screen::Start => vec![
                Span::styled("Enter", key),
                Span::raw(" to start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to exit"),
            ],
            Screen::Playing => vec![
                Span::styled("↑↓←→", key),
                Span::raw(" to move | "),
                Span::styled("P", key),
                Span::raw(" to pause | "),
                Span::styled("Ctrl+C", Style::default().fg(Color::Red)),
                Span::raw(" to exit"),
            ],
            Screen::Paused => vec![
                Span::styled("Space", key),
                Span::raw(" to resume | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit the game"),
            ],
            Screen::GameOver => vec![
                Span::raw("Type a nickname (1-20) | "),
                Span::styled("Enter", key),
                Span::raw(" to record"),
            ],
        };

        Paragraph::new(vec![Line::from(spans)])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }

    fn render_popup(&self, frame: &mut Frame, area: Rect, width: u16, height: u16, popup: Paragraph) {
        let rect = centered_rect(width, height, area);
        frame.render_widget(Clear, rect);
        frame.render_widget(popup, rect);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
