//! Text-grid renderer
//!
//! Maps the playfield onto a fixed character grid. Used by the native demo
//! and as an inspectable surface in tests.

use super::Renderer;
use crate::config::SimConfig;
use crate::error::SinkError;
use crate::sim::Ball;

const EMPTY: char = ' ';
const BALL: char = 'o';
const PADDLE: char = '=';

/// Character-cell drawing surface
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    /// Playfield units per cell
    cell: (f32, f32),
    paddle_width: f32,
    paddle_height: f32,
    cells: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(config: &SimConfig, cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cell: (config.width / cols as f32, config.height / rows as f32),
            paddle_width: config.paddle_width,
            paddle_height: config.paddle_height,
            cells: vec![EMPTY; cols * rows],
        }
    }

    /// Grid contents, one line per row
    pub fn frame_text(&self) -> String {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Character at a cell
    pub fn at(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    fn put(&mut self, col: i64, row: i64, ch: char) {
        if col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows {
            self.cells[row as usize * self.cols + col as usize] = ch;
        }
    }

    /// Write text starting at a cell, clipped to the grid
    fn write(&mut self, col: i64, row: i64, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i64, row, ch);
        }
    }

    /// Write text centred on a row offset from the middle
    fn write_centered(&mut self, row_offset: i64, text: &str) {
        let len = text.chars().count() as i64;
        let col = (self.cols as i64 - len) / 2;
        let row = self.rows as i64 / 2 + row_offset;
        self.write(col, row, text);
    }

    fn to_cell(&self, x: f32, y: f32) -> (i64, i64) {
        (
            (x / self.cell.0).floor() as i64,
            (y / self.cell.1).floor() as i64,
        )
    }
}

impl Renderer for AsciiRenderer {
    fn clear(&mut self) -> Result<(), SinkError> {
        self.cells.fill(EMPTY);
        Ok(())
    }

    fn draw_ball(&mut self, ball: &Ball) -> Result<(), SinkError> {
        // Every cell whose centre lies inside the circle, at least the centre cell
        let (min_c, min_r) = self.to_cell(ball.position.x - ball.radius, ball.position.y - ball.radius);
        let (max_c, max_r) = self.to_cell(ball.position.x + ball.radius, ball.position.y + ball.radius);
        let r_sq = ball.radius * ball.radius;
        for row in min_r..=max_r {
            for col in min_c..=max_c {
                let cx = (col as f32 + 0.5) * self.cell.0 - ball.position.x;
                let cy = (row as f32 + 0.5) * self.cell.1 - ball.position.y;
                if cx * cx + cy * cy <= r_sq {
                    self.put(col, row, BALL);
                }
            }
        }
        let (col, row) = self.to_cell(ball.position.x, ball.position.y);
        self.put(col, row, BALL);
        Ok(())
    }

    fn draw_paddle(&mut self, position: f32) -> Result<(), SinkError> {
        let half = self.paddle_width / 2.0;
        let (start, _) = self.to_cell(position - half, 0.0);
        let (end, _) = self.to_cell(position + half, 0.0);
        let rows = (self.paddle_height / self.cell.1).ceil().max(1.0) as i64;
        let bottom = self.rows as i64;
        for row in bottom - rows..bottom {
            for col in start..end {
                self.put(col, row, PADDLE);
            }
        }
        Ok(())
    }

    fn draw_score(&mut self, score: u64) -> Result<(), SinkError> {
        self.write(0, 0, &score.to_string());
        Ok(())
    }

    fn draw_title(&mut self, text: &str) -> Result<(), SinkError> {
        self.write_centered(-1, text);
        Ok(())
    }

    fn draw_controls(&mut self, text: &str) -> Result<(), SinkError> {
        self.write_centered(0, text);
        Ok(())
    }

    fn draw_author(&mut self, text: &str) -> Result<(), SinkError> {
        self.write_centered(1, text);
        Ok(())
    }

    fn draw_game_over(&mut self, text: &str) -> Result<(), SinkError> {
        // Blank the middle half of the width and middle third of the height
        let (left, width) = (self.cols / 4, self.cols / 2);
        let (top, height) = (self.rows / 3, self.rows / 3);
        for row in top..top + height {
            let start = row * self.cols + left;
            self.cells[start..start + width].fill(EMPTY);
        }
        self.write_centered(0, text);
        Ok(())
    }
}
