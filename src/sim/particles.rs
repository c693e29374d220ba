//! Particle bursts for collection, impact, explosion and ability feedback

use glam::Vec3;
use rand::Rng;

use super::state::{GameState, Particle};
use crate::consts::*;

impl GameState {
    /// Emit `count` particles at `origin` with velocities in an upward cone
    pub fn spawn_particles(
        &mut self,
        origin: Vec3,
        color: [f32; 3],
        count: usize,
        speed_multiplier: f32,
    ) {
        for _ in 0..count {
            let id = self.next_entity_id();
            let vel = Vec3::new(
                (self.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
                self.rng.random::<f32>() * PARTICLE_LIFT,
                (self.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            ) * speed_multiplier;
            let size = 0.05 + self.rng.random::<f32>() * 0.1;
            self.particles.push(Particle {
                id,
                pos: origin,
                vel,
                life: 1.0,
                color,
                size,
            });
        }

        // Oldest particles go first when over budget
        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
    }

    /// Integrate, age and prune particles
    pub(crate) fn update_particles(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.vel.y -= PARTICLE_GRAVITY;
            particle.life -= PARTICLE_LIFE_STEP;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
