//! Drawing the field.
//!
//! Bubble state lives in [`BubbleField`]; this module keeps one sprite entity
//! per bubble (plus an explosion overlay child) in sync with it each frame.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use super::{
    assets::{BubbleAssets, load_bubble_assets},
    bubble::{Bubble, BubbleId},
    explosion::EXPLOSION_CELL_SIZE,
    field::{BubbleField, FieldSystems},
};
use crate::{AppSystems, config::BubbleConfig};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_background.after(load_bubble_assets));
    app.add_systems(
        Update,
        sync_bubble_sprites
            .in_set(AppSystems::Update)
            .after(FieldSystems),
    );
}

/// Z of the background sprite.
const BACKGROUND_LAYER: f32 = 0.0;

/// Z of the first bubble; later bubbles stack above it.
const BUBBLE_LAYER: f32 = 1.0;

/// Z step between consecutive bubbles in the list.
const BUBBLE_LAYER_STEP: f32 = 0.01;

/// Sprite entity drawing a bubble.
#[derive(Component, Debug, Clone, Copy)]
pub struct BubbleSprite(pub BubbleId);

/// Explosion sprite-sheet overlay, child of a [`BubbleSprite`].
#[derive(Component, Debug, Clone, Copy)]
pub struct ExplosionOverlay(pub BubbleId);

/// Convert window coordinates (origin top-left, Y down) to world coordinates
/// (origin at the window center, Y up).
pub fn window_to_world(point: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(point.x - window_size.x / 2.0, window_size.y / 2.0 - point.y)
}

/// Local offset that puts the overlay's top-left corner on the bubble's.
fn overlay_offset(bubble_size: UVec2) -> Vec3 {
    let half_cell = EXPLOSION_CELL_SIZE as f32 / 2.0;
    Vec3::new(
        -(bubble_size.x as f32) / 2.0 + half_cell,
        bubble_size.y as f32 / 2.0 - half_cell,
        BUBBLE_LAYER_STEP / 2.0,
    )
}

/// Transform of a bubble drawn at `layer` in the list.
fn bubble_transform(bubble: &Bubble, layer: usize, window_size: Vec2) -> Transform {
    let world = window_to_world(bubble.pos.truncate(), window_size);
    let z = BUBBLE_LAYER + layer as f32 * BUBBLE_LAYER_STEP;
    Transform::from_translation(world.extend(z)).with_scale(Vec3::new(
        bubble.depth_scale(),
        bubble.depth_scale(),
        1.0,
    ))
}

/// Draw the background at scale 1 with its top-left corner at the window origin.
fn spawn_background(mut commands: Commands, assets: Res<BubbleAssets>, config: Res<BubbleConfig>) {
    let window_size = Vec2::new(config.width, config.height);
    let center = assets.background.size.as_vec2() / 2.0;
    let world = window_to_world(center, window_size);

    commands.spawn((
        Name::new("Background"),
        Sprite::from_image(assets.background.handle.clone()),
        Transform::from_translation(world.extend(BACKGROUND_LAYER)),
    ));
}

fn spawn_bubble_sprite(
    commands: &mut Commands,
    bubble: &Bubble,
    transform: Transform,
    layout: &Handle<TextureAtlasLayout>,
) {
    commands.spawn((
        Name::new(format!("Bubble {} {:?}", bubble.id, bubble.color)),
        BubbleSprite(bubble.id),
        Sprite::from_image(bubble.texture.clone()),
        transform,
        children![(
            Name::new("Explosion"),
            ExplosionOverlay(bubble.id),
            Sprite::from_atlas_image(
                bubble.explosion_texture.clone(),
                TextureAtlas {
                    layout: layout.clone(),
                    index: 0,
                },
            ),
            Transform::from_translation(overlay_offset(bubble.size)),
            Visibility::Hidden,
        )],
    ));
}

/// Mirror the field into sprites: move, scale, animate, spawn and despawn.
fn sync_bubble_sprites(
    mut commands: Commands,
    field: Res<BubbleField>,
    config: Res<BubbleConfig>,
    assets: Res<BubbleAssets>,
    mut sprites: Query<(Entity, &BubbleSprite, &mut Transform)>,
    mut overlays: Query<(&ExplosionOverlay, &mut Sprite, &mut Visibility)>,
) {
    let window_size = Vec2::new(config.width, config.height);
    let layers: HashMap<BubbleId, (usize, &Bubble)> = field
        .bubbles
        .iter()
        .enumerate()
        .map(|(layer, bubble)| (bubble.id, (layer, bubble)))
        .collect();

    let mut drawn = HashSet::new();
    for (entity, sprite, mut transform) in &mut sprites {
        match layers.get(&sprite.0) {
            Some(&(layer, bubble)) => {
                *transform = bubble_transform(bubble, layer, window_size);
                drawn.insert(sprite.0);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for (layer, bubble) in field.bubbles.iter().enumerate() {
        if !drawn.contains(&bubble.id) {
            let transform = bubble_transform(bubble, layer, window_size);
            spawn_bubble_sprite(&mut commands, bubble, transform, &assets.explosion_layout);
        }
    }

    for (overlay, mut sprite, mut visibility) in &mut overlays {
        let frame = layers
            .get(&overlay.0)
            .and_then(|&(_, bubble)| bubble.explosion_frame());
        match frame {
            Some(index) => {
                if let Some(atlas) = sprite.texture_atlas.as_mut() {
                    atlas.index = index;
                }
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}
