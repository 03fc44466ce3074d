use crate::config::{Palette, Rgb};
use crate::game::{Game, Outcome, RoundState};
use crate::grid::Rect;

/// Glyph scale for the score line, hints and the score table.
const BODY_SCALE: u32 = 2;
/// Glyph scale for the GAME OVER / PAUSED banners.
const BANNER_SCALE: u32 = 5;

/// Software renderer for an RGBA frame `size` x `size` pixels.
pub struct Renderer {
    size: u32,
    palette: Palette,
}

impl Renderer {
    pub fn new(size: u32, palette: Palette) -> Self {
        Self { size, palette }
    }

    pub fn draw(&self, frame: &mut [u8], game: &Game) {
        let (r, g, b) = self.palette.background;
        clear_rgba(frame, r, g, b, 255);

        if let Some(food) = game.food() {
            self.fill(frame, game.grid().cell_rect(food), self.palette.food);
        }
        for &segment in game.snake().body() {
            if game.grid().contains(segment) {
                self.fill(frame, game.grid().cell_rect(segment), self.palette.snake);
            }
        }

        self.text(frame, &format!("SCORE: {}", game.score()), 10, 10, BODY_SCALE);

        let mid = self.size / 2;
        match game.state() {
            RoundState::Running => {}
            RoundState::Paused => {
                self.dim(frame);
                self.centered(frame, "PAUSED", mid, BANNER_SCALE);
            }
            RoundState::GameOver => {
                self.dim(frame);
                let banner = match game.outcome() {
                    Some(Outcome::BoardFilled) => "YOU WIN!",
                    _ => "GAME OVER!",
                };
                self.centered(frame, banner, mid.saturating_sub(50), BANNER_SCALE);
                self.centered(frame, "PRESS R TO RESTART", mid + 10, BODY_SCALE);
                self.score_table(frame, game, mid + 50);
            }
        }
    }

    fn score_table(&self, frame: &mut [u8], game: &Game, top: u32) {
        if game.high_scores().is_empty() {
            return;
        }
        self.centered(frame, "TOP SCORES", top, BODY_SCALE);
        let line_h = line_height(BODY_SCALE) + 6;
        for (rank, record) in game.high_scores().iter().enumerate() {
            let line = format!("{}. {:>4}  {}", rank + 1, record.score, record.date);
            self.centered(frame, &line, top + (rank as u32 + 1) * line_h, BODY_SCALE);
        }
    }

    fn fill(&self, frame: &mut [u8], rect: Rect, (r, g, b): Rgb) {
        fill_rect_rgba(frame, self.size, rect, r, g, b, 255);
    }

    fn dim(&self, frame: &mut [u8]) {
        let (r, g, b, a) = self.palette.overlay;
        let all = Rect { x: 0, y: 0, w: self.size, h: self.size };
        fill_rect_rgba(frame, self.size, all, r, g, b, a);
    }

    fn text(&self, frame: &mut [u8], text: &str, x: u32, y: u32, scale: u32) {
        let (r, g, b) = self.palette.text;
        draw_text(frame, self.size, text, x, y, scale, (r, g, b, 255));
    }

    fn centered(&self, frame: &mut [u8], text: &str, y: u32, scale: u32) {
        let x = (self.size / 2).saturating_sub(text_width(text, scale) / 2);
        self.text(frame, text, x, y, scale);
    }
}

fn clear_rgba(frame: &mut [u8], r: u8, g: u8, b: u8, a: u8) {
    for px in frame.chunks_exact_mut(4) {
        px.copy_from_slice(&[r, g, b, a]);
    }
}

fn blend_pixel(frame: &mut [u8], size: u32, x: u32, y: u32, (r, g, b, a): (u8, u8, u8, u8)) {
    if x >= size || y >= size {
        return;
    }
    let idx = ((y * size + x) * 4) as usize;
    if idx + 3 >= frame.len() {
        return;
    }
    let (ar, iar) = (a as u16, 255 - a as u16);
    for (c, src) in [r, g, b].into_iter().enumerate() {
        frame[idx + c] = ((src as u16 * ar + frame[idx + c] as u16 * iar) / 255) as u8;
    }
    frame[idx + 3] = 255;
}

fn fill_rect_rgba(frame: &mut [u8], size: u32, rect: Rect, r: u8, g: u8, b: u8, a: u8) {
    let x2 = (rect.x + rect.w).min(size);
    let y2 = (rect.y + rect.h).min(size);
    for py in rect.y..y2 {
        for px in rect.x..x2 {
            blend_pixel(frame, size, px, py, (r, g, b, a));
        }
    }
}

fn line_height(scale: u32) -> u32 {
    7 * scale
}

fn advance(scale: u32) -> u32 {
    5 * scale + scale
}

pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    // no trailing gap after the last glyph
    (n * advance(scale)).saturating_sub(scale)
}

fn glyph_5x7(ch: char) -> Option<[u8; 7]> {
    Some(match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b11110, 0b10001, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b11111],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'I' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        ' ' => [0; 7],
        _ => return None,
    })
}

fn draw_char(frame: &mut [u8], size: u32, ch: char, x: u32, y: u32, scale: u32, col: (u8, u8, u8, u8)) {
    let Some(rows) = glyph_5x7(ch) else {
        return;
    };
    for (ry, row) in rows.iter().enumerate() {
        for rx in 0..5u32 {
            if (row >> (4 - rx)) & 1 == 0 {
                continue;
            }
            for sy in 0..scale {
                for sx in 0..scale {
                    blend_pixel(frame, size, x + rx * scale + sx, y + ry as u32 * scale + sy, col);
                }
            }
        }
    }
}

fn draw_text(frame: &mut [u8], size: u32, text: &str, x: u32, y: u32, scale: u32, col: (u8, u8, u8, u8)) {
    let mut cx = x;
    for ch in text.chars() {
        draw_char(frame, size, ch, cx, y, scale, col);
        cx += advance(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::input::Command;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const SIZE: u32 = 100;

    fn pixel(frame: &[u8], x: u32, y: u32) -> (u8, u8, u8) {
        let i = ((y * SIZE + x) * 4) as usize;
        (frame[i], frame[i + 1], frame[i + 2])
    }

    fn frame() -> Vec<u8> {
        vec![0; (SIZE * SIZE * 4) as usize]
    }

    #[test]
    fn draws_snake_and_food_cells() {
        let game = Game::new(Grid::new(10, 10), None, 5, SmallRng::seed_from_u64(4));
        let renderer = Renderer::new(SIZE, Palette::default());
        let mut buf = frame();
        renderer.draw(&mut buf, &game);

        let head = game.snake().head();
        assert_eq!(pixel(&buf, head.x as u32 * 10 + 4, head.y as u32 * 10 + 4), Palette::default().snake);

        // the score line may overlap the food cell, but never covers all of it
        let food = game.food().unwrap();
        let covered = (0..9).flat_map(|dy| (0..9).map(move |dx| (dx, dy)));
        assert!(covered
            .map(|(dx, dy)| pixel(&buf, food.x as u32 * 10 + dx, food.y as u32 * 10 + dy))
            .any(|p| p == Palette::default().food));

        // gap column between cells stays background
        assert_eq!(pixel(&buf, head.x as u32 * 10 + 9, head.y as u32 * 10 + 4), (0, 0, 0));
    }

    #[test]
    fn pause_dims_the_board() {
        let mut game = Game::new(Grid::new(10, 10), None, 5, SmallRng::seed_from_u64(4));
        game.handle(Command::Pause);
        let palette = Palette { background: (200, 200, 200), ..Palette::default() };
        let renderer = Renderer::new(SIZE, palette);
        let mut buf = frame();
        renderer.draw(&mut buf, &game);

        // bottom-right pixel is always a gap between cells
        let (r, _, _) = pixel(&buf, SIZE - 1, SIZE - 1);
        assert!(r < 200);
    }

    #[test]
    fn text_width_counts_glyph_gaps() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("A", 2), 10);
        assert_eq!(text_width("AB", 2), 22);
    }

    #[test]
    fn unknown_glyphs_are_skipped() {
        let mut buf = frame();
        draw_text(&mut buf, SIZE, "~", 0, 0, 1, (255, 255, 255, 255));
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn blend_clips_outside_frame() {
        let mut buf = frame();
        blend_pixel(&mut buf, SIZE, SIZE, 0, (255, 255, 255, 255));
        blend_pixel(&mut buf, SIZE, 0, SIZE, (255, 255, 255, 255));
        assert!(buf.iter().all(|&b| b == 0));
    }
}
