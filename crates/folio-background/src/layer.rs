//! Rendering of the background field into a ratatui buffer.

use folio_core::{AnimationSpeed, ColorTheme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::animations::backdrop;
use crate::color::shade;
use crate::{FloatingLine, Particle};

/// Size of one terminal cell in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl CellSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    /// Cell holding the pixel `(x, y)`, or `None` above/left of the origin.
    pub fn cell_of(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        Some(((x / self.width) as u16, (y / self.height) as u16))
    }

    /// Pixel at the centre of a cell.
    pub fn center_of(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.width,
            (row as f32 + 0.5) * self.height,
        )
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

/// Immutable view of the background, ready to draw.
#[derive(Debug, Clone, Copy)]
pub struct BackgroundLayer<'a> {
    pub particles: &'a [Particle],
    pub lines: &'a [FloatingLine],
    pub cell: CellSize,
    pub elapsed_ms: u64,
    pub theme: ColorTheme,
    pub speed: AnimationSpeed,
}

impl BackgroundLayer<'_> {
    /// Compose the glyph grid: backdrop, then snippets, then particles on top.
    fn compose(&self, width: u16, height: u16) -> Vec<Option<(char, Color)>> {
        let w = width as usize;
        let mut cells = vec![None; w * height as usize];

        for row in 0..height {
            for col in 0..width {
                cells[row as usize * w + col as usize] = backdrop::render_char(
                    col,
                    row,
                    self.cell.width,
                    self.cell.height,
                    self.elapsed_ms,
                    self.speed,
                );
            }
        }

        for line in self.lines {
            let Some((col, row)) = self.cell.cell_of(line.x, line.y) else {
                continue;
            };
            if row >= height {
                continue;
            }
            let color = shade(self.theme, line.opacity);
            let start = row as usize * w;
            for (offset, ch) in line.text.chars().enumerate() {
                let c = col as usize + offset;
                if c >= w {
                    break;
                }
                cells[start + c] = Some((ch, color));
            }
        }

        for p in self.particles {
            let Some((col, row)) = self.cell.cell_of(p.x, p.y) else {
                continue;
            };
            if col < width && row < height {
                cells[row as usize * w + col as usize] =
                    Some((p.glyph(), shade(self.theme, p.opacity)));
            }
        }

        cells
    }
}

impl Widget for BackgroundLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cells = self.compose(area.width, area.height);
        let lines: Vec<Line> = cells
            .chunks(area.width.max(1) as usize)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Some((ch, color)) => {
                            Span::styled(ch.to_string(), Style::new().fg(*color))
                        }
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle {
            id: 0,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            size: 2.9,
            opacity: 0.6,
        }
    }

    fn layer<'a>(particles: &'a [Particle], lines: &'a [FloatingLine]) -> BackgroundLayer<'a> {
        BackgroundLayer {
            particles,
            lines,
            cell: CellSize::new(8, 16),
            elapsed_ms: 0,
            theme: ColorTheme::Green,
            speed: AnimationSpeed::Medium,
        }
    }

    #[test]
    fn test_cell_mapping() {
        let cell = CellSize::new(8, 16);
        assert_eq!(cell.cell_of(17.0, 33.0), Some((2, 2)));
        assert_eq!(cell.cell_of(-1.0, 10.0), None);
        assert_eq!(cell.center_of(2, 2), (20.0, 40.0));
    }

    #[test]
    fn test_particle_is_drawn_in_its_cell() {
        let particles = [particle_at(20.0, 40.0)];
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        layer(&particles, &[]).render(area, &mut buf);

        assert_eq!(buf[(2, 2)].symbol(), "●");
    }

    #[test]
    fn test_lines_are_clipped_and_skipped_above_viewport() {
        let lines = [
            FloatingLine {
                id: 0,
                text: "abcdef".to_string(),
                x: 60.0,
                y: 20.0,
                vy: 0.5,
                opacity: 0.2,
            },
            FloatingLine {
                id: 1,
                text: "hidden".to_string(),
                x: 0.0,
                y: -30.0,
                vy: 0.5,
                opacity: 0.2,
            },
        ];
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        layer(&[], &lines).render(area, &mut buf);

        // starts at col 7, row 1, clipped after three glyphs
        assert_eq!(buf[(7, 1)].symbol(), "a");
        assert_eq!(buf[(9, 1)].symbol(), "c");
        let row0: String = (0..10).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(!row0.contains('h'));
    }

    #[test]
    fn test_particles_draw_over_snippets() {
        let lines = [FloatingLine {
            id: 0,
            text: "xyz".to_string(),
            x: 0.0,
            y: 20.0,
            vy: 0.5,
            opacity: 0.2,
        }];
        let particles = [particle_at(9.0, 20.0)];
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        layer(&particles, &lines).render(area, &mut buf);

        assert_eq!(buf[(0, 1)].symbol(), "x");
        assert_eq!(buf[(1, 1)].symbol(), "●");
    }
}
