//! Debug visualization for bubble hit areas.
//!
//! Toggle with the 'D' key.
//! Shows:
//! - Hit circle of every bubble (red while exploding)
//! - Velocity of every bubble as a short line

use bevy::{color::palettes::css, input::common_conditions::input_just_pressed, prelude::*};

use super::{field::BubbleField, render::window_to_world};
use crate::config::BubbleConfig;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<DebugHitAreasVisible>();

    // Toggle debug with 'D' key
    app.add_systems(
        Update,
        toggle_debug.run_if(input_just_pressed(KeyCode::KeyD)),
    );

    // Draw hit areas when visible
    app.add_systems(Update, draw_hit_areas.run_if(debug_visible));
}

/// Seconds of travel drawn for the velocity line.
const VELOCITY_LINE_SECONDS: f32 = 0.1;

/// Resource to track if debug visualization is visible.
#[derive(Resource, Default)]
pub struct DebugHitAreasVisible(pub bool);

fn debug_visible(debug: Res<DebugHitAreasVisible>) -> bool {
    debug.0
}

fn toggle_debug(mut debug: ResMut<DebugHitAreasVisible>) {
    debug.0 = !debug.0;
    let state = if debug.0 { "ON" } else { "OFF" };
    info!("Debug hit areas: {}", state);
}

/// Draw hit circles and velocities using Bevy's Gizmos.
fn draw_hit_areas(mut gizmos: Gizmos, field: Res<BubbleField>, config: Res<BubbleConfig>) {
    let window_size = Vec2::new(config.width, config.height);

    for bubble in &field.bubbles {
        let (center, radius) = bubble.hit_circle();
        let world = window_to_world(center, window_size);

        let color = if bubble.exploding {
            css::INDIAN_RED.with_alpha(0.8)
        } else {
            css::LIMEGREEN.with_alpha(0.6)
        };
        gizmos.circle_2d(Isometry2d::from_translation(world), radius, color);

        // Window Y points down, world Y points up.
        let drift = bubble.velocity.truncate() * Vec2::new(1.0, -1.0) * VELOCITY_LINE_SECONDS;
        gizmos.line_2d(world, world + drift, css::AQUA.with_alpha(0.8));
    }
}
