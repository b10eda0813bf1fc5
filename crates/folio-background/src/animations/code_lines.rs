//! Drifting code snippets (stateful).

use folio_core::Viewport;
use rand::Rng;
use rand::seq::SliceRandom;

/// Vertical position a snippet restarts from once it leaves the viewport.
pub const LINE_RESET_Y: f32 = -50.0;

/// A text fragment falling slowly through the background.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingLine {
    /// Stable index, usable as a render key.
    pub id: usize,
    pub text: String,
    /// Position in virtual pixels; `y` is negative while above the viewport.
    pub x: f32,
    pub y: f32,
    /// Fall speed in pixels per tick, within `[0.3, 0.7)`.
    pub vy: f32,
    /// Opacity within `[0.1, 0.3)`.
    pub opacity: f32,
}

/// Create `count` snippets scattered over the viewport.
///
/// `candidates` must not be empty.
pub fn init(
    count: usize,
    viewport: Viewport,
    candidates: &[String],
    rng: &mut impl Rng,
) -> Vec<FloatingLine> {
    (0..count)
        .map(|id| FloatingLine {
            id,
            text: sample(candidates, rng),
            x: rng.gen_range(0.0..viewport.width),
            y: rng.gen_range(0.0..viewport.height),
            vy: rng.gen_range(0.3..0.7),
            opacity: rng.gen_range(0.1..0.3),
        })
        .collect()
}

/// Advance snippets; those past the bottom restart above the top with new text.
pub fn update(
    lines: &mut [FloatingLine],
    viewport: Viewport,
    candidates: &[String],
    rng: &mut impl Rng,
) {
    for line in lines {
        line.y += line.vy;
        if line.y > viewport.height {
            line.y = LINE_RESET_Y;
            line.text = sample(candidates, rng);
        }
    }
}

/// Bring snippets inside a new viewport without changing their count.
pub fn rebound(lines: &mut [FloatingLine], viewport: Viewport) {
    for line in lines {
        line.x = viewport.wrap_x(line.x);
        if line.y >= 0.0 {
            line.y = viewport.wrap_y(line.y);
        }
    }
}

fn sample(candidates: &[String], rng: &mut impl Rng) -> String {
    candidates.choose(rng).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn candidates() -> Vec<String> {
        vec!["alpha()".to_string(), "beta()".to_string()]
    }

    #[test]
    fn test_init_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        let vp = Viewport::new(800.0, 600.0);
        let lines = init(8, vp, &candidates(), &mut rng);

        assert_eq!(lines.len(), 8);
        for line in &lines {
            assert!(candidates().contains(&line.text));
            assert!(vp.contains(line.x, line.y));
            assert!((0.3..0.7).contains(&line.vy));
            assert!((0.1..=0.3).contains(&line.opacity));
        }
    }

    #[test]
    fn test_update_falls_by_velocity() {
        let mut rng = StdRng::seed_from_u64(3);
        let vp = Viewport::new(800.0, 600.0);
        let mut lines = init(1, vp, &candidates(), &mut rng);
        let before = lines[0].clone();

        update(&mut lines, vp, &candidates(), &mut rng);

        if before.y + before.vy <= vp.height {
            assert_eq!(lines[0].y, before.y + before.vy);
            assert_eq!(lines[0].text, before.text);
        }
        assert_eq!(lines[0].x, before.x);
    }

    #[test]
    fn test_line_past_bottom_resets_above_viewport() {
        let mut rng = StdRng::seed_from_u64(9);
        let vp = Viewport::new(800.0, 600.0);
        let mut lines = vec![FloatingLine {
            id: 0,
            text: "stale".to_string(),
            x: 100.0,
            y: 599.9,
            vy: 0.5,
            opacity: 0.2,
        }];

        update(&mut lines, vp, &candidates(), &mut rng);

        assert_eq!(lines[0].y, LINE_RESET_Y);
        assert!(candidates().contains(&lines[0].text));
    }

    #[test]
    fn test_rebound_keeps_lines_above_viewport() {
        let mut lines = vec![
            FloatingLine {
                id: 0,
                text: "a".to_string(),
                x: 900.0,
                y: -20.0,
                vy: 0.5,
                opacity: 0.2,
            },
            FloatingLine {
                id: 1,
                text: "b".to_string(),
                x: 10.0,
                y: 550.0,
                vy: 0.5,
                opacity: 0.2,
            },
        ];
        let vp = Viewport::new(400.0, 300.0);
        rebound(&mut lines, vp);

        assert_eq!(lines[0].y, -20.0);
        assert_eq!(lines[0].x, 100.0);
        assert_eq!(lines[1].y, 250.0);
    }
}
