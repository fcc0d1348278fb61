use crossterm::style::Color;
use rand::prelude::SliceRandom;
use rand::Rng;

use super::particles::{random_bright_color, Particle, CONFETTI_CHARS};

const WIN_MESSAGES: [&str; 8] = [
    "ALL BLANKS CORRECT!",
    "PUZZLE SOLVED!",
    "BRILLIANT!",
    "PERFECT!",
    "EXCELLENT!",
    "CONGRATULATIONS!",
    "WELL DONE!",
    "FLAWLESS!",
];

const BANNER: &str = r#"
  ____   ___  _ __     _______ ____  _
 / ___| / _ \| |\ \   / / ____|  _ \| |
 \___ \| | | | | \ \ / /|  _| | | | | |
  ___) | |_| | |__\ V / | |___| |_| |_|
 |____/ \___/|_____\_/  |_____|____/(_)
"#;

/// The animated completion screen: steady confetti rain plus discrete
/// bursts fired by the completion notifier.
pub struct WinScreen {
    particles: Vec<Particle>,
    rainbow_offset: f32,
    message_index: usize,
    pub width: u16,
    pub height: u16,
}

impl WinScreen {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            particles: Vec::new(),
            rainbow_offset: 0.0,
            message_index: rng.gen_range(0..WIN_MESSAGES.len()),
            width: 80,
            height: 24,
        }
    }

    pub fn reset(&mut self) {
        let mut rng = rand::thread_rng();
        self.particles.clear();
        self.rainbow_offset = 0.0;
        self.message_index = rng.gen_range(0..WIN_MESSAGES.len());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Fire a one-shot confetti burst from the upper half of the screen.
    pub fn burst(&mut self) {
        let mut rng = rand::thread_rng();
        let x = self.width as f32 / 2.0;
        let y = self.height as f32 * 0.4;

        for _ in 0..150 {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(0.5..2.5);
            self.particles.push(Particle {
                x,
                y,
                vx: angle.cos() * speed * 1.8,
                vy: angle.sin() * speed - 0.8,
                char: *CONFETTI_CHARS.choose(&mut rng).unwrap(),
                color: random_bright_color(),
                lifetime: rng.gen_range(1.5..3.5),
            });
        }
    }

    pub fn update(&mut self) {
        self.rainbow_offset += 0.05;

        // Update particles
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += 0.15; // Gravity
            p.lifetime -= 0.016;
            p.lifetime > 0.0 && p.y < self.height as f32 + 5.0
        });

        self.spawn_confetti();
    }

    /// Steady trickle of confetti falling from the top edge.
    fn spawn_confetti(&mut self) {
        let mut rng = rand::thread_rng();
        for _ in 0..3 {
            self.particles.push(Particle {
                x: rng.gen_range(0.0..self.width as f32),
                y: -2.0,
                vx: rng.gen_range(-0.5..0.5),
                vy: rng.gen_range(0.3..1.0),
                char: *CONFETTI_CHARS.choose(&mut rng).unwrap(),
                color: random_bright_color(),
                lifetime: rng.gen_range(3.0..6.0),
            });
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn current_message(&self) -> &str {
        WIN_MESSAGES[self.message_index]
    }

    pub fn banner(&self) -> &'static str {
        BANNER
    }

    pub fn rainbow_offset(&self) -> f32 {
        self.rainbow_offset
    }
}

impl Default for WinScreen {
    fn default() -> Self {
        Self::new()
    }
}
