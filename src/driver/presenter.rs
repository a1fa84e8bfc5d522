use crate::game::{Direction, Position};
use crate::leaderboard::LeaderboardView;

/// Everything needed to draw one frame of the board, in surface pixels
#[derive(Debug, Clone, PartialEq)]
pub struct BoardFrame {
    /// Width and height of the square drawing surface
    pub surface_size: f64,
    pub cell_size: f64,
    /// Centre of each snake segment, head first
    pub segments: Vec<(f64, f64)>,
    /// Centre of the fruit cell
    pub fruit: Option<(f64, f64)>,
    pub direction: Direction,
    /// Fraction of the current tick already elapsed, 0 to 1
    pub progress: f64,
}

impl BoardFrame {
    /// Interpolate each segment from its pre-tick cell to its post-tick cell.
    ///
    /// A segment with no pre-tick counterpart (the one added by growing)
    /// starts from the old tail.
    pub fn interpolate(
        previous: &[Position],
        current: &[Position],
        fruit: Option<Position>,
        direction: Direction,
        grid_size: usize,
        cell_size: u32,
        progress: f64,
    ) -> Self {
        let cell = cell_size as f64;
        let progress = progress.clamp(0.0, 1.0);

        let segments = current
            .iter()
            .enumerate()
            .map(|(i, to)| {
                let from = previous.get(i).or(previous.last()).unwrap_or(to);
                let x = lerp(from.x as f64, to.x as f64, progress);
                let y = lerp(from.y as f64, to.y as f64, progress);
                (cell_center(x, cell), cell_center(y, cell))
            })
            .collect();

        Self {
            surface_size: grid_size as f64 * cell,
            cell_size: cell,
            segments,
            fruit: fruit.map(|f| (cell_center(f.x as f64, cell), cell_center(f.y as f64, cell))),
            direction,
            progress,
        }
    }

    pub fn head(&self) -> Option<(f64, f64)> {
        self.segments.first().copied()
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn cell_center(coord: f64, cell: f64) -> f64 {
    coord * cell + cell / 2.0
}

/// UI capability the driver reports to. Implementations decide how (and
/// whether) each piece of feedback is shown.
pub trait ViewPresenter {
    fn show_start_screen(&mut self);
    fn show_playing(&mut self);
    fn show_paused(&mut self);
    fn show_game_over(&mut self, final_score: u32);

    fn update_score(&mut self, score: u32);
    fn update_high_score(&mut self, high_score: u32);
    fn render_board(&mut self, frame: &BoardFrame);

    fn show_leaderboard(&mut self, view: &LeaderboardView);
    fn show_submitting(&mut self);
    fn show_record_error(&mut self, message: &str);
    fn show_record_success(&mut self);
}
