//! The bubble field - every live bubble and the per-frame update.
//!
//! Each frame the field:
//! - advances explosion timers, marking finished bubbles as exploded
//! - hit-tests the frame's click against bubbles, popping at most one
//! - drifts every bubble, reflecting off the play volume bounds
//! - drops exploded bubbles, keeping the rest in order

use bevy::prelude::*;

use super::{
    assets::{BubbleAssets, load_bubble_assets},
    bubble::{Bubble, BubbleId, spawn_batch},
    input::PointerSnapshot,
};
use crate::{AppSystems, PausableSystems, config::BubbleConfig};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<BubbleField>();
    app.add_message::<BubbleClicked>();

    app.add_systems(Startup, spawn_field.after(load_bubble_assets));

    app.add_systems(
        Update,
        update_field
            .in_set(FieldSystems)
            .in_set(AppSystems::Update)
            .in_set(PausableSystems),
    );
}

/// System set for the field update.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSystems;

/// Message sent when a click starts a bubble exploding.
#[derive(Message, Debug, Clone)]
pub struct BubbleClicked {
    pub id: BubbleId,
}

/// What happened during one [`BubbleField::update`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FieldUpdate {
    /// The bubble that consumed this frame's click.
    pub clicked: Option<BubbleId>,
    /// Bubbles whose explosion finished and were removed.
    pub removed: Vec<BubbleId>,
}

/// Resource holding the ordered list of live bubbles.
#[derive(Resource, Debug, Clone, Default, Reflect)]
#[reflect(Resource)]
pub struct BubbleField {
    pub bubbles: Vec<Bubble>,
    /// Upper corner of the play volume; the lower corner is the origin.
    pub bounds: Vec3,
}

impl BubbleField {
    pub fn new(bubbles: Vec<Bubble>, bounds: Vec3) -> Self {
        Self { bubbles, bounds }
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Advance the field by `elapsed` seconds.
    ///
    /// `click` is the cursor position when the mouse button is held. Bubbles
    /// are visited back to front, so the last-drawn bubble under the cursor is
    /// the one that pops.
    pub fn update(&mut self, elapsed: f32, click: Option<Vec2>) -> FieldUpdate {
        let mut outcome = FieldUpdate::default();
        let mut click = click;
        let mut any_exploded = false;

        for bubble in self.bubbles.iter_mut().rev() {
            if bubble.advance_explosion(elapsed) {
                any_exploded = true;
            }

            if let Some(point) = click
                && bubble.is_hit(point)
            {
                bubble.start_exploding();
                outcome.clicked = Some(bubble.id);
                click = None;
            }

            bubble.drift(elapsed, self.bounds);
        }

        if any_exploded {
            outcome.removed = self
                .bubbles
                .iter()
                .filter(|bubble| bubble.exploded)
                .map(|bubble| bubble.id)
                .collect();
            self.bubbles.retain(|bubble| !bubble.exploded);
        }

        outcome
    }
}

/// Spawn the startup batch once the textures are loaded.
fn spawn_field(mut commands: Commands, config: Res<BubbleConfig>, assets: Res<BubbleAssets>) {
    let mut rng = rand::rng();
    let bubbles = spawn_batch(&mut rng, &config, &assets);
    let bounds = Vec3::new(config.width, config.height, config.depth);

    info!("Spawned {} bubbles", bubbles.len());
    commands.insert_resource(BubbleField::new(bubbles, bounds));
}

/// Run the field update with this frame's time and pointer.
fn update_field(
    time: Res<Time>,
    pointer: Res<PointerSnapshot>,
    mut field: ResMut<BubbleField>,
    mut clicked_events: MessageWriter<BubbleClicked>,
) {
    let outcome = field.update(time.delta_secs(), pointer.click());

    if let Some(id) = outcome.clicked {
        debug!("Bubble {} clicked", id);
        clicked_events.write(BubbleClicked { id });
    }

    if !outcome.removed.is_empty() {
        info!(
            "Removed exploded bubble(s) {:?}, {} left",
            outcome.removed,
            field.len()
        );
    }
}
