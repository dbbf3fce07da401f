//! Rising particle field drawn behind the hero section.
//!
//! Coordinates live in a 0..100 percentage space. Every tick moves each
//! particle up by its own speed and nudges it sideways; particles that
//! leave through the top edge are either replaced or dropped depending
//! on [`Replenish`].

/// Vertical coordinate below which a particle is no longer drawn.
pub const LOWER_BOUND: f64 = -10.0;
/// Respawned particles enter somewhere in this band below the bottom edge.
const ENTRY_BAND: (f64, f64) = (100.0, 110.0);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Shape {
    Circle,
    Square,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Jitter {
    /// Uniform offset in `[-amplitude / 2, amplitude / 2)` per tick.
    Uniform { amplitude: f64 },
    /// `sin(now * 0.001 + id) * amplitude`, so neighbours sway out of phase.
    Wave { amplitude: f64 },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Replenish {
    /// Keep the population constant by feeding new particles in from below.
    Respawn,
    /// Let the field empty out.
    Drain,
}

/// Opacity/scale keyframes `[0, peak, 0]` repeated every `cycle_ms`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Pulse {
    pub cycle_ms: f64,
    pub stagger_ms: f64,
    pub peak_opacity: f64,
    pub peak_scale: f64,
    pub spin: bool,
    pub eased: bool,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ParticleConfig {
    pub count: usize,
    pub size: (f64, f64),
    pub speed: (f64, f64),
    pub tick_ms: u32,
    pub jitter: Jitter,
    pub square_ratio: f64,
    pub replenish: Replenish,
    pub pulse: Pulse,
}

impl ParticleConfig {
    pub fn hero() -> Self {
        Self {
            count: 80,
            size: (2.0, 8.0),
            speed: (0.2, 1.0),
            tick_ms: 30,
            jitter: Jitter::Wave { amplitude: 0.3 },
            square_ratio: 0.5,
            replenish: Replenish::Respawn,
            pulse: Pulse {
                cycle_ms: 4_000.0,
                stagger_ms: 50.0,
                peak_opacity: 0.8,
                peak_scale: 1.2,
                spin: true,
                eased: true,
            },
        }
    }

    pub fn ambient() -> Self {
        Self {
            count: 50,
            size: (1.0, 5.0),
            speed: (0.1, 0.6),
            tick_ms: 50,
            jitter: Jitter::Uniform { amplitude: 0.5 },
            square_ratio: 0.0,
            replenish: Replenish::Respawn,
            pulse: Pulse {
                cycle_ms: 3_000.0,
                stagger_ms: 100.0,
                peak_opacity: 1.0,
                peak_scale: 1.0,
                spin: false,
                eased: false,
            },
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_replenish(mut self, replenish: Replenish) -> Self {
        self.replenish = replenish;
        self
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Particle {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
    pub shape: Shape,
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    config: ParticleConfig,
    particles: Vec<Particle>,
    rng: fastrand::Rng,
    next_id: u32,
}

impl PartialEq for ParticleField {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.particles == other.particles && self.next_id == other.next_id
    }
}

impl ParticleField {
    /// Creates the initial batch, scattered over the whole visible area.
    pub fn new(config: ParticleConfig, seed: u64) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(config.count),
            config,
            rng: fastrand::Rng::with_seed(seed),
            next_id: 0,
        };

        for _ in 0..field.config.count {
            let y = field.rng.f64() * 100.0;
            let particle = field.spawn(y);
            field.particles.push(particle);
        }

        field
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advances every particle by one step. `now_ms` is the time since the
    /// field was mounted and only feeds the wave jitter.
    pub fn tick(&mut self, now_ms: f64) {
        let jitter = self.config.jitter;

        for particle in &mut self.particles {
            particle.y -= particle.speed;
            particle.x += match jitter {
                Jitter::Uniform { amplitude } => (self.rng.f64() - 0.5) * amplitude,
                Jitter::Wave { amplitude } => (now_ms * 0.001 + f64::from(particle.id)).sin() * amplitude,
            };
        }

        let before = self.particles.len();
        self.particles.retain(|particle| particle.y > LOWER_BOUND);
        let dropped = before - self.particles.len();

        if self.config.replenish == Replenish::Respawn {
            for _ in 0..dropped {
                let y = ENTRY_BAND.0 + self.rng.f64() * (ENTRY_BAND.1 - ENTRY_BAND.0);
                let particle = self.spawn(y);
                self.particles.push(particle);
            }
        }
    }

    pub fn sprites(&self, now_ms: f64) -> impl Iterator<Item = Sprite> + '_ {
        self.particles
            .iter()
            .map(move |particle| project(particle, &self.config, now_ms))
    }

    fn spawn(&mut self, y: f64) -> Particle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        let shape = if self.rng.f64() < self.config.square_ratio {
            Shape::Square
        } else {
            Shape::Circle
        };

        Particle {
            id,
            x: self.rng.f64() * 100.0,
            y,
            size: sample(&mut self.rng, self.config.size),
            speed: sample(&mut self.rng, self.config.speed),
            shape,
        }
    }
}

fn sample(rng: &mut fastrand::Rng, (low, high): (f64, f64)) -> f64 {
    low + rng.f64() * (high - low)
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Sprite {
    pub id: u32,
    pub left_pct: f64,
    pub top_pct: f64,
    pub size_px: f64,
    pub opacity: f64,
    pub scale: f64,
    pub rotate_deg: f64,
    pub shape: Shape,
}

impl Sprite {
    pub fn style(&self) -> String {
        format!(
            "left: {:.2}%; top: {:.2}%; width: {:.2}px; height: {:.2}px; opacity: {:.3}; transform: scale({:.3}) rotate({:.1}deg);",
            self.left_pct, self.top_pct, self.size_px, self.size_px, self.opacity, self.scale, self.rotate_deg
        )
    }
}

/// Maps a particle to what is drawn for it at `now_ms`.
pub fn project(particle: &Particle, config: &ParticleConfig, now_ms: f64) -> Sprite {
    let pulse = &config.pulse;
    let slot = particle.id as usize % config.count.max(1);
    let local = now_ms - slot as f64 * pulse.stagger_ms;

    let (strength, progress) = if local < 0.0 || pulse.cycle_ms <= 0.0 {
        (0.0, 0.0)
    } else {
        let progress = (local % pulse.cycle_ms) / pulse.cycle_ms;
        let triangle = 1.0 - (2.0 * progress - 1.0).abs();
        let strength = if pulse.eased {
            triangle * triangle * (3.0 - 2.0 * triangle)
        } else {
            triangle
        };
        (strength, progress)
    };

    Sprite {
        id: particle.id,
        left_pct: particle.x,
        top_pct: particle.y,
        size_px: particle.size,
        opacity: pulse.peak_opacity * strength,
        scale: pulse.peak_scale * strength,
        rotate_deg: if pulse.spin { 360.0 * progress } else { 0.0 },
        shape: particle.shape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_config() -> ParticleConfig {
        ParticleConfig {
            jitter: Jitter::Wave { amplitude: 0.0 },
            ..ParticleConfig::hero()
        }
    }

    #[test]
    fn initial_batch_respects_configured_ranges() {
        let config = ParticleConfig::hero();
        let field = ParticleField::new(config.clone(), 7);

        assert_eq!(field.len(), 80);
        for particle in field.particles() {
            assert!((0.0..100.0).contains(&particle.x));
            assert!((0.0..100.0).contains(&particle.y));
            assert!((config.size.0..config.size.1).contains(&particle.size));
            assert!((config.speed.0..config.speed.1).contains(&particle.speed));
        }
    }

    #[test]
    fn ambient_preset_only_spawns_circles() {
        let field = ParticleField::new(ParticleConfig::ambient(), 11);
        assert_eq!(field.len(), 50);
        assert!(field.particles().iter().all(|particle| particle.shape == Shape::Circle));
    }

    #[test]
    fn same_seed_produces_same_field() {
        let mut first = ParticleField::new(ParticleConfig::ambient(), 42);
        let mut second = ParticleField::new(ParticleConfig::ambient(), 42);

        for step in 0..25 {
            first.tick(f64::from(step) * 50.0);
            second.tick(f64::from(step) * 50.0);
        }

        assert_eq!(first, second);
    }

    #[test]
    fn tick_moves_each_particle_up_by_its_speed() {
        let mut field = ParticleField::new(still_config(), 3);
        let before = field.particles().to_vec();

        field.tick(0.0);

        for (old, new) in before.iter().zip(field.particles()) {
            assert_eq!(old.id, new.id);
            assert!((old.y - old.speed - new.y).abs() < 1e-9);
            assert!((old.x - new.x).abs() < 1e-9);
        }
    }

    #[test]
    fn uniform_jitter_stays_within_half_amplitude() {
        let mut field = ParticleField::new(ParticleConfig::ambient(), 5);
        let before = field.particles().to_vec();

        field.tick(0.0);

        for (old, new) in before.iter().zip(field.particles()) {
            if old.id == new.id {
                assert!((new.x - old.x).abs() <= 0.25);
            }
        }
    }

    #[test]
    fn wave_jitter_follows_sine_of_time_and_id() {
        let mut field = ParticleField::new(ParticleConfig::hero(), 9);
        let before = field.particles()[4];

        field.tick(1_000.0);

        let after = field
            .particles()
            .iter()
            .find(|particle| particle.id == before.id)
            .copied()
            .expect("particle near the top is not dropped after one tick");
        let expected = (1.0 + f64::from(before.id)).sin() * 0.3;
        assert!((after.x - before.x - expected).abs() < 1e-9);
    }

    #[test]
    fn drain_mode_only_shrinks_and_eventually_empties() {
        let config = ParticleConfig::hero().with_replenish(Replenish::Drain);
        let mut field = ParticleField::new(config, 1);
        let mut previous = field.len();

        // Slowest particle needs (100 + 10) / 0.2 = 550 ticks.
        for step in 0..600 {
            field.tick(f64::from(step) * 30.0);
            assert!(field.len() <= previous);
            previous = field.len();
        }

        assert!(field.is_empty());
    }

    #[test]
    fn respawn_mode_keeps_population_constant() {
        let mut field = ParticleField::new(ParticleConfig::hero(), 2);

        for step in 0..600 {
            field.tick(f64::from(step) * 30.0);
            assert_eq!(field.len(), 80);
        }

        assert!(field.particles().iter().any(|particle| particle.id >= 80));
        assert!(field.particles().iter().all(|particle| particle.y > LOWER_BOUND));
    }

    #[test]
    fn respawned_particles_enter_below_the_bottom_edge() {
        let config = ParticleConfig {
            speed: (50.0, 60.0),
            ..still_config()
        };
        let mut field = ParticleField::new(config, 4);

        field.tick(0.0);
        field.tick(30.0);
        field.tick(60.0);

        let fresh: Vec<_> = field.particles().iter().filter(|particle| particle.id >= 80).collect();
        assert!(!fresh.is_empty());
        for particle in fresh {
            assert!(particle.y >= ENTRY_BAND.0 - 60.0 * 3.0);
            assert!(particle.y < ENTRY_BAND.1);
        }
    }

    #[test]
    fn projector_hides_particles_until_their_stagger_delay() {
        let config = ParticleConfig::ambient();
        let particle = Particle {
            id: 10,
            x: 12.5,
            y: 40.0,
            size: 3.0,
            speed: 0.2,
            shape: Shape::Circle,
        };

        let hidden = project(&particle, &config, 999.0);
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.scale, 0.0);

        // Delay is 10 * 100ms; half a 3s cycle later the pulse peaks.
        let peak = project(&particle, &config, 1_000.0 + 1_500.0);
        assert!((peak.opacity - 1.0).abs() < 1e-9);
        assert!((peak.scale - 1.0).abs() < 1e-9);
        assert_eq!(peak.left_pct, 12.5);
        assert_eq!(peak.top_pct, 40.0);
    }

    #[test]
    fn hero_projector_spins_through_the_cycle() {
        let config = ParticleConfig::hero();
        let particle = Particle {
            id: 0,
            x: 50.0,
            y: 50.0,
            size: 4.0,
            speed: 0.5,
            shape: Shape::Square,
        };

        let quarter = project(&particle, &config, 1_000.0);
        assert!((quarter.rotate_deg - 90.0).abs() < 1e-9);
        // Smoothstep of 0.5 is 0.5.
        assert!((quarter.opacity - 0.4).abs() < 1e-9);

        let peak = project(&particle, &config, 2_000.0);
        assert!((peak.scale - 1.2).abs() < 1e-9);
    }

    #[test]
    fn sprite_style_renders_position_and_size() {
        let sprite = Sprite {
            id: 1,
            left_pct: 10.0,
            top_pct: 20.5,
            size_px: 4.0,
            opacity: 0.5,
            scale: 1.0,
            rotate_deg: 0.0,
            shape: Shape::Circle,
        };

        let style = sprite.style();
        assert!(style.starts_with("left: 10.00%; top: 20.50%; width: 4.00px; height: 4.00px;"));
        assert!(style.contains("opacity: 0.500"));
    }
}
