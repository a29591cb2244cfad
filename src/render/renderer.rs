use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{GameStatus, Position, Snapshot};
use crate::metrics::GameMetrics;

const HEAD: &str = "■";
const BODY: &str = "□";
const FOOD: &str = "●";
const EMPTY: &str = "·";

pub struct Renderer {
    /// Terminal columns per grid cell
    cell_size: u16,
}

impl Renderer {
    pub fn new(cell_size: u16) -> Self {
        Self {
            cell_size: cell_size.max(1),
        }
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Game area
            Constraint::Length(3), // Footer
        ])
        .areas(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), header);

        let grid_area = self.grid_area(body, snapshot);
        frame.render_widget(self.render_grid(snapshot), grid_area);

        if snapshot.status == GameStatus::GameOver {
            let popup = centered(grid_area, 30, 7);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(snapshot), popup);
        }

        frame.render_widget(self.render_controls(snapshot.status), footer);
    }

    /// The bordered grid centred inside `area`
    fn grid_area(&self, area: Rect, snapshot: &Snapshot) -> Rect {
        let width = (snapshot.grid_width as u16).saturating_mul(self.cell_size) + 2;
        let height = snapshot.grid_height as u16 + 2;
        centered(area, width, height)
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let padding = " ".repeat(usize::from(self.cell_size) - 1);
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.grid_height);

        for y in 0..snapshot.grid_height {
            let mut spans = Vec::with_capacity(snapshot.grid_width);

            for x in 0..snapshot.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let (glyph, style) = if pos == head {
                    (
                        HEAD,
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    (BODY, Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
                    (
                        FOOD,
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    (EMPTY, Style::default().fg(Color::DarkGray))
                };

                spans.push(Span::styled(format!("{glyph}{padding}"), style));
            }

            lines.push(Line::from(spans));
        }

        let border = match snapshot.status {
            GameStatus::Running => Color::White,
            GameStatus::Paused => Color::Yellow,
            GameStatus::Idle => Color::Gray,
            GameStatus::GameOver => Color::Red,
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.max(snapshot.score).to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", snapshot.tick_interval.as_millis()), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
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
                Span::styled("R", key_style(Color::Green)),
                Span::styled(" new game  ", Style::default().fg(Color::Gray)),
                Span::styled("Q", key_style(Color::Red)),
                Span::styled(" quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, status: GameStatus) -> Paragraph<'static> {
        let hint = match status {
            GameStatus::Idle => "Space to start",
            GameStatus::Running => "Space to pause",
            GameStatus::Paused => "Paused - Space to resume",
            GameStatus::GameOver => "Space to continue",
        };

        let text = vec![
            Line::from(Span::styled(hint, Style::default().fg(Color::Yellow))),
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" reset | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

fn key_style(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// A `width` x `height` rect in the middle of `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(snapshot: &Snapshot, metrics: &GameMetrics) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| Renderer::new(2).render(frame, snapshot, metrics))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn snapshot() -> Snapshot {
        GameEngine::with_seed(GameConfig::default(), 1)
            .unwrap()
            .snapshot()
    }

    #[test]
    fn test_idle_frame() {
        let screen = draw(&snapshot(), &GameMetrics::new());

        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("Speed: 150ms"));
        assert!(screen.contains("Space to start"));
        assert_eq!(screen.matches(HEAD).count(), 1);
        assert_eq!(screen.matches(BODY).count(), 2);
        assert_eq!(screen.matches(FOOD).count(), 1);
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut snapshot = snapshot();
        snapshot.status = GameStatus::GameOver;
        snapshot.score = 70;

        let screen = draw(&snapshot, &GameMetrics::new());

        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Final Score: 70"));
    }

    #[test]
    fn test_best_score_shown() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(120);

        let screen = draw(&snapshot(), &metrics);
        assert!(screen.contains("Best: 120"));
    }

    #[test]
    fn test_paused_hint() {
        let mut snapshot = snapshot();
        snapshot.status = GameStatus::Paused;

        let screen = draw(&snapshot, &GameMetrics::new());
        assert!(screen.contains("Paused - Space to resume"));
    }

    #[test]
    fn test_centered_fits_area() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered(area, 42, 22);
        assert_eq!(rect, Rect::new(19, 1, 42, 22));
    }
}
