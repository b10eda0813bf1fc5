//! Background field state management.

use folio_core::{Viewport, defaults};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::animations::{code_lines, particles};
use crate::{FloatingLine, Particle};

/// Sizes and text table for a [`Field`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSettings {
    pub particle_count: usize,
    pub line_count: usize,
    /// Candidate texts for the drifting snippets; never empty.
    pub snippets: Vec<String>,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            particle_count: defaults::PARTICLE_COUNT,
            line_count: defaults::LINE_COUNT,
            snippets: defaults::SNIPPETS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Particles and drifting snippets for one session.
///
/// Counts are fixed at construction; ticks and resizes only move things.
#[derive(Debug, Clone)]
pub struct Field {
    viewport: Viewport,
    particles: Vec<Particle>,
    lines: Vec<FloatingLine>,
    snippets: Vec<String>,
    rng: StdRng,
}

impl Field {
    /// Populate a field with a caller-supplied random source.
    pub fn initialize(viewport: Viewport, settings: FieldSettings, mut rng: StdRng) -> Self {
        let snippets = if settings.snippets.is_empty() {
            FieldSettings::default().snippets
        } else {
            settings.snippets
        };
        let particles = particles::init(settings.particle_count, viewport, &mut rng);
        let lines = code_lines::init(settings.line_count, viewport, &snippets, &mut rng);

        Self {
            viewport,
            particles,
            lines,
            snippets,
            rng,
        }
    }

    /// Populate a field from a seed.
    pub fn seeded(viewport: Viewport, settings: FieldSettings, seed: u64) -> Self {
        Self::initialize(viewport, settings, StdRng::seed_from_u64(seed))
    }

    /// Advance every particle and snippet by one tick.
    pub fn tick(&mut self) {
        particles::update(&mut self.particles, self.viewport);
        code_lines::update(&mut self.lines, self.viewport, &self.snippets, &mut self.rng);
    }

    /// Adopt new viewport bounds, keeping every element.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        particles::rebound(&mut self.particles, viewport);
        code_lines::rebound(&mut self.lines, viewport);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn lines(&self) -> &[FloatingLine] {
        &self.lines
    }

    /// Candidate texts the snippets are sampled from.
    pub fn snippets(&self) -> &[String] {
        &self.snippets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_counts() {
        let field = Field::seeded(Viewport::new(800.0, 600.0), FieldSettings::default(), 42);
        assert_eq!(field.particles().len(), 50);
        assert_eq!(field.lines().len(), 8);
    }

    #[test]
    fn test_same_seed_same_evolution() {
        let vp = Viewport::new(800.0, 600.0);
        let mut a = Field::seeded(vp, FieldSettings::default(), 7);
        let mut b = Field::seeded(vp, FieldSettings::default(), 7);
        for _ in 0..500 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.lines(), b.lines());
    }

    #[test]
    fn test_empty_snippets_fall_back_to_defaults() {
        let settings = FieldSettings {
            snippets: Vec::new(),
            ..FieldSettings::default()
        };
        let field = Field::seeded(Viewport::default(), settings, 1);
        assert_eq!(field.snippets().len(), defaults::SNIPPETS.len());
        assert!(field.lines().iter().all(|l| !l.text.is_empty()));
    }

    #[test]
    fn test_resize_keeps_counts() {
        let mut field = Field::seeded(Viewport::new(800.0, 600.0), FieldSettings::default(), 5);
        let small = Viewport::new(320.0, 200.0);
        field.resize(small);

        assert_eq!(field.viewport(), small);
        assert_eq!(field.particles().len(), 50);
        assert_eq!(field.lines().len(), 8);
        assert!(field.particles().iter().all(|p| small.contains(p.x, p.y)));
        assert!(field.lines().iter().all(|l| l.y < small.height));
    }
}
