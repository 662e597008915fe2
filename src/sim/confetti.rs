//! Win-screen confetti
//!
//! Purely cosmetic and independent of ball physics. Particles fall from just
//! above the viewport and are dropped once below it; the field is topped up
//! with a fresh burst whenever the population runs low.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::ConfettiParticle;

/// Confetti palette (0xRRGGBB)
pub const CONFETTI_COLORS: [u32; 6] = [0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF];

/// Side of a confetti square
pub const CONFETTI_SIZE: f32 = 6.0;

/// Spawn height (above the viewport)
const SPAWN_Y: f32 = -10.0;

/// Particles are removed this far below the viewport
const EXIT_MARGIN: f32 = 10.0;

/// Push `count` new particles across the top of a `width`-wide viewport
pub fn spawn_burst<R: Rng>(
    particles: &mut Vec<ConfettiParticle>,
    count: usize,
    width: f32,
    rng: &mut R,
) {
    particles.reserve(count);
    for _ in 0..count {
        let color = CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())];
        particles.push(ConfettiParticle {
            pos: Vec2::new(rng.random::<f32>() * width, SPAWN_Y),
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 10.0,
                rng.random::<f32>() * 5.0 + 2.0,
            ),
            rotation: rng.random::<f32>() * TAU,
            rotation_speed: (rng.random::<f32>() - 0.5) * 0.2,
            color,
        });
    }
}

/// Advance every particle, drop the ones that left, and replenish below `floor`
pub fn update<R: Rng>(
    particles: &mut Vec<ConfettiParticle>,
    width: f32,
    height: f32,
    delta: f32,
    burst: usize,
    floor: usize,
    rng: &mut R,
) {
    for p in particles.iter_mut() {
        p.pos += p.vel * delta;
        p.rotation += p.rotation_speed * delta;
    }
    particles.retain(|p| p.pos.y <= height + EXIT_MARGIN);

    if particles.len() < floor {
        spawn_burst(particles, burst, width, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, 100, 756.0, &mut rng);
        assert_eq!(particles.len(), 100);
        for p in &particles {
            assert!(p.pos.x >= 0.0 && p.pos.x < 756.0);
            assert_eq!(p.pos.y, SPAWN_Y);
            assert!(p.vel.x >= -5.0 && p.vel.x < 5.0);
            assert!(p.vel.y >= 2.0 && p.vel.y < 7.0);
            assert!(p.rotation_speed.abs() <= 0.1);
            assert!(CONFETTI_COLORS.contains(&p.color));
        }
    }

    #[test]
    fn test_particles_leave_and_field_refills() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, 100, 756.0, &mut rng);

        // Slowest particle falls 2/tick: ~170 ticks to clear 334px
        for _ in 0..400 {
            update(&mut particles, 756.0, 324.0, 1.0, 100, 50, &mut rng);
            assert!(particles.len() >= 50);
            assert!(particles.iter().all(|p| p.pos.y <= 334.0));
        }
    }
}
