//! Presentation layer
//!
//! The simulation never draws. Each frame the runner hands the World to
//! [`present_world`], which emits sprite and text draw calls against a
//! [`Renderer`]. [`LogRenderer`] is the headless backend: it records what
//! would have been drawn and traces a one-line summary.

use glam::Vec2;

use crate::sim::{LifePhase, World};

/// Sprite identifiers, one per image in the asset manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Ship,
    /// Enemy animation frame
    Enemy(u32),
    Projectile,
    Heart,
    MusicOn,
    MusicOff,
}

/// HUD anchor points
pub mod hud {
    use glam::Vec2;

    pub const KILLS: Vec2 = Vec2::new(0.0, 0.0);
    pub const LIVES: Vec2 = Vec2::new(0.0, 100.0);
    pub const TELEPORTS: Vec2 = Vec2::new(600.0, 0.0);
    pub const MUTE_ICON: Vec2 = Vec2::new(700.0, 500.0);
    pub const BANNER: Vec2 = Vec2::new(250.0, 250.0);
}

/// Drawing backend
pub trait Renderer {
    fn draw(&mut self, sprite: Sprite, pos: Vec2);
    fn text(&mut self, text: &str, pos: Vec2);
    /// Frame is complete
    fn present(&mut self);
}

/// Draw one complete frame: background, live entities in roster order, HUD
pub fn present_world(world: &World, muted: bool, renderer: &mut impl Renderer) {
    renderer.draw(Sprite::Background, Vec2::ZERO);

    for entity in world.entities() {
        entity.render(renderer);
    }

    let ship = &world.ship;
    renderer.text(&format!(" {} kills", ship.kills), hud::KILLS);
    renderer.text(&format!(" {} Lives", ship.lives), hud::LIVES);
    renderer.text(
        &format!("Teleport points {}", ship.teleport_charges),
        hud::TELEPORTS,
    );

    let icon = if muted { Sprite::MusicOff } else { Sprite::MusicOn };
    renderer.draw(icon, hud::MUTE_ICON);

    if matches!(world.phase(), LifePhase::GameOver { .. } | LifePhase::Terminated) {
        renderer.text("GAME OVER", hud::BANNER);
    }

    renderer.present();
}

/// Headless renderer that keeps the last frame's draw calls
#[derive(Debug, Clone, Default)]
pub struct LogRenderer {
    sprites: Vec<(Sprite, Vec2)>,
    texts: Vec<(String, Vec2)>,
    last_sprites: Vec<(Sprite, Vec2)>,
    last_texts: Vec<(String, Vec2)>,
    frames: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sprites drawn in the last presented frame
    pub fn last_sprites(&self) -> &[(Sprite, Vec2)] {
        &self.last_sprites
    }

    pub fn last_texts(&self) -> &[(String, Vec2)] {
        &self.last_texts
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, sprite: Sprite, pos: Vec2) {
        self.sprites.push((sprite, pos));
    }

    fn text(&mut self, text: &str, pos: Vec2) {
        self.texts.push((text.to_owned(), pos));
    }

    fn present(&mut self) {
        self.frames += 1;
        log::trace!(
            "frame {}: {} sprites, {} texts",
            self.frames,
            self.sprites.len(),
            self.texts.len()
        );
        self.last_sprites = std::mem::take(&mut self.sprites);
        self.last_texts = std::mem::take(&mut self.texts);
    }
}
