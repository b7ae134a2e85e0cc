//! The main game module for the bubble popper.
//!
//! This module contains all the gameplay logic including:
//! - Texture loading
//! - Bubble entities, drift and depth scaling
//! - The per-frame field update (clicks, explosions, removal)
//! - Sprite sync and the explosion sprite sheet
//! - Overlay text

mod assets;
mod bubble;
mod debug;
mod explosion;
mod field;
mod hud;
mod input;
mod render;

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        assets::plugin,
        input::plugin,
        field::plugin,
        render::plugin,
        hud::plugin,
        debug::plugin,
    ));
}
