//! Wrapping particle field (stateful).

use folio_core::Viewport;
use rand::Rng;

use crate::chars::PARTICLE_CHARS;

/// A decorative point drifting across the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Stable index, usable as a render key.
    pub id: usize,
    /// Position in virtual pixels.
    pub x: f32,
    pub y: f32,
    /// Velocity in pixels per tick.
    pub vx: f32,
    pub vy: f32,
    /// Diameter in pixels, within `[1, 3)`.
    pub size: f32,
    /// Opacity within `[0.2, 0.7)`.
    pub opacity: f32,
}

impl Particle {
    /// Glyph for this particle's size.
    pub fn glyph(&self) -> char {
        let idx = ((self.size - 1.0) / 2.0 * PARTICLE_CHARS.len() as f32) as usize;
        PARTICLE_CHARS[idx.min(PARTICLE_CHARS.len() - 1)]
    }
}

/// Scatter `count` particles uniformly over the viewport.
pub fn init(count: usize, viewport: Viewport, rng: &mut impl Rng) -> Vec<Particle> {
    (0..count)
        .map(|id| Particle {
            id,
            x: rng.gen_range(0.0..viewport.width),
            y: rng.gen_range(0.0..viewport.height),
            vx: rng.gen_range(-0.25..0.25),
            vy: rng.gen_range(-0.25..0.25),
            size: rng.gen_range(1.0..3.0),
            opacity: rng.gen_range(0.2..0.7),
        })
        .collect()
}

/// Advance every particle by its velocity, wrapping at the edges.
pub fn update(particles: &mut [Particle], viewport: Viewport) {
    for p in particles {
        p.x = viewport.wrap_x(p.x + p.vx);
        p.y = viewport.wrap_y(p.y + p.vy);
    }
}

/// Bring particles inside a new viewport without changing their count.
pub fn rebound(particles: &mut [Particle], viewport: Viewport) {
    for p in particles {
        p.x = viewport.wrap_x(p.x);
        p.y = viewport.wrap_y(p.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn particle(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle {
            id: 0,
            x,
            y,
            vx,
            vy,
            size: 1.0,
            opacity: 0.5,
        }
    }

    #[test]
    fn test_init_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        let vp = Viewport::new(800.0, 600.0);
        let particles = init(50, vp, &mut rng);

        assert_eq!(particles.len(), 50);
        for (i, p) in particles.iter().enumerate() {
            assert_eq!(p.id, i);
            assert!(vp.contains(p.x, p.y));
            assert!((-0.25..0.25).contains(&p.vx));
            assert!((-0.25..0.25).contains(&p.vy));
            assert!((1.0..3.0).contains(&p.size));
            assert!((0.2..=0.7).contains(&p.opacity));
        }
    }

    #[test]
    fn test_update_moves_by_velocity() {
        let vp = Viewport::new(800.0, 600.0);
        let mut ps = vec![particle(10.0, 20.0, 0.25, -0.25)];
        update(&mut ps, vp);
        assert_eq!((ps[0].x, ps[0].y), (10.25, 19.75));
    }

    #[test]
    fn test_update_wraps_instead_of_bouncing() {
        let vp = Viewport::new(800.0, 600.0);
        let mut ps = vec![
            particle(799.9, 599.9, 0.2, 0.2),
            particle(0.1, 0.1, -0.2, -0.2),
        ];
        update(&mut ps, vp);

        assert!(ps[0].x < 1.0 && ps[0].y < 1.0, "{:?}", ps[0]);
        assert!(ps[1].x > 799.0 && ps[1].y > 599.0, "{:?}", ps[1]);
        // velocity is untouched by wraparound
        assert_eq!(ps[0].vx, 0.2);
        assert_eq!(ps[1].vy, -0.2);
    }

    #[test]
    fn test_rebound_keeps_count_and_bounds() {
        let mut ps = vec![particle(700.0, 500.0, 0.0, 0.0), particle(10.0, 10.0, 0.0, 0.0)];
        let small = Viewport::new(400.0, 300.0);
        rebound(&mut ps, small);
        assert_eq!(ps.len(), 2);
        assert!(ps.iter().all(|p| small.contains(p.x, p.y)));
    }

    #[test]
    fn test_glyph_by_size() {
        let mut p = particle(0.0, 0.0, 0.0, 0.0);
        p.size = 1.0;
        assert_eq!(p.glyph(), '·');
        p.size = 2.0;
        assert_eq!(p.glyph(), '•');
        p.size = 2.99;
        assert_eq!(p.glyph(), '●');
    }
}
