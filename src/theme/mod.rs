//! Reusable UI widgets & theming.

// Unused utilities may trigger this lints undesirably.
#![allow(dead_code)]

pub mod interaction;
pub mod palette;
pub mod widget;

use bevy::prelude::*;

/// Font size of regular overlay text.
const NORMAL_FONT_SIZE: f32 = 16.0;

/// Font size of headline overlay text.
const BIG_FONT_SIZE: f32 = 24.0;

/// Resource holding the two text faces, both using the engine's embedded font.
#[derive(Resource, Debug, Clone)]
pub struct UiFonts {
    pub normal: TextFont,
    pub big: TextFont,
}

impl UiFonts {
    fn new(font: Handle<Font>) -> Self {
        Self {
            normal: TextFont {
                font: font.clone(),
                font_size: NORMAL_FONT_SIZE,
                ..default()
            },
            big: TextFont {
                font,
                font_size: BIG_FONT_SIZE,
                ..default()
            },
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(interaction::plugin);
    // Inserted at build time so startup systems can rely on it.
    app.insert_resource(UiFonts::new(Handle::default()));
}
