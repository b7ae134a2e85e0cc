//! Overlay text - bubble counters, hint line and the "all popped" banner.

use bevy::prelude::*;

use super::field::{BubbleClicked, BubbleField, FieldSystems};
use crate::{
    AppSystems, PausableSystems,
    theme::{UiFonts, palette::OVERLAY_TEXT, widget},
};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<PopStats>();
    app.register_type::<PopStats>();

    app.add_systems(Startup, spawn_hud);
    app.add_systems(
        Update,
        count_pops
            .in_set(AppSystems::Update)
            .in_set(PausableSystems)
            .after(FieldSystems),
    );
    app.add_systems(
        Update,
        (update_counter_text, show_cleared_banner)
            .in_set(AppSystems::Update)
            .after(count_pops),
    );
}

/// Resource counting popped bubbles.
#[derive(Resource, Debug, Default, Reflect)]
#[reflect(Resource)]
pub struct PopStats {
    pub popped: u32,
}

/// Marker for the counter line.
#[derive(Component)]
struct CounterText;

/// Marker for the banner shown once every bubble is gone.
#[derive(Component)]
struct ClearedBanner;

/// Text drawn at a fixed window position (top-left of the text box).
pub fn text_out(text: impl Into<String>, x: f32, y: f32, font: &TextFont, color: Color) -> impl Bundle {
    (
        Text::new(text),
        font.clone(),
        TextColor(color),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(x),
            top: Val::Px(y),
            ..default()
        },
        Pickable::IGNORE,
    )
}

/// Text of the counter line.
fn counter_label(remaining: usize, popped: u32) -> String {
    format!("Bubbles: {remaining}   Popped: {popped}")
}

fn spawn_hud(mut commands: Commands, fonts: Res<UiFonts>) {
    commands.spawn((
        Name::new("Counter"),
        text_out(counter_label(0, 0), 10.0, 10.0, &fonts.big, OVERLAY_TEXT),
        CounterText,
    ));
    commands.spawn((
        Name::new("Hint"),
        text_out(
            "Click a bubble to pop it. Esc pauses.",
            10.0,
            44.0,
            &fonts.normal,
            OVERLAY_TEXT,
        ),
    ));
}

fn count_pops(mut stats: ResMut<PopStats>, mut clicked_events: MessageReader<BubbleClicked>) {
    for _ in clicked_events.read() {
        stats.popped += 1;
    }
}

fn update_counter_text(
    field: Res<BubbleField>,
    stats: Res<PopStats>,
    mut text: Single<&mut Text, With<CounterText>>,
) {
    if !field.is_changed() && !stats.is_changed() {
        return;
    }
    text.0 = counter_label(field.len(), stats.popped);
}

fn show_cleared_banner(
    mut commands: Commands,
    field: Res<BubbleField>,
    fonts: Res<UiFonts>,
    banner: Query<(), With<ClearedBanner>>,
) {
    if !field.is_empty() || !banner.is_empty() {
        return;
    }

    info!("All bubbles popped!");
    commands.spawn((
        widget::ui_root("Cleared Banner"),
        ClearedBanner,
        children![(
            Text::new("All bubbles popped!"),
            fonts.big.clone(),
            TextColor(OVERLAY_TEXT),
        )],
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_label() {
        assert_eq!(counter_label(20, 0), "Bubbles: 20   Popped: 0");
        assert_eq!(counter_label(3, 17), "Bubbles: 3   Popped: 17");
    }
}
