//! The pause menu.

use bevy::{input::common_conditions::input_just_pressed, prelude::*};

use crate::{
    Pause,
    menus::Menu,
    theme::{palette::MENU_BACKDROP, widget},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (pause, open_pause_menu).run_if(
            in_state(Menu::None)
                .and(input_just_pressed(KeyCode::Escape).or(input_just_pressed(KeyCode::KeyP))),
        ),
    );
    app.add_systems(OnEnter(Menu::Pause), spawn_pause_menu);
    app.add_systems(OnExit(Menu::Pause), unpause);
    app.add_systems(
        Update,
        go_back.run_if(in_state(Menu::Pause).and(input_just_pressed(KeyCode::Escape))),
    );
}

fn spawn_pause_menu(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("Pause Menu"),
        // Semi-transparent background to dim the field
        BackgroundColor(MENU_BACKDROP),
        GlobalZIndex(2),
        DespawnOnExit(Menu::Pause),
        children![
            widget::header("Game Paused"),
            widget::button("Continue", close_menu),
            widget::button("Quit", exit_app),
        ],
    ));
}

fn pause(mut next_pause: ResMut<NextState<Pause>>) {
    next_pause.set(Pause(true));
    info!("Paused");
}

fn unpause(mut next_pause: ResMut<NextState<Pause>>) {
    next_pause.set(Pause(false));
    info!("Resumed");
}

fn open_pause_menu(mut next_menu: ResMut<NextState<Menu>>) {
    next_menu.set(Menu::Pause);
}

fn close_menu(_: On<Pointer<Click>>, mut next_menu: ResMut<NextState<Menu>>) {
    next_menu.set(Menu::None);
}

fn exit_app(_: On<Pointer<Click>>, mut app_exit: MessageWriter<AppExit>) {
    app_exit.write(AppExit::Success);
}

fn go_back(mut next_menu: ResMut<NextState<Menu>>) {
    next_menu.set(Menu::None);
}
