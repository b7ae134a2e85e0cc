//! Pointer input, sampled once per frame.

use bevy::{prelude::*, window::PrimaryWindow};

use crate::AppSystems;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<PointerSnapshot>();
    app.add_systems(Update, record_pointer.in_set(AppSystems::RecordInput));
}

/// Mouse state for the current frame, in window coordinates.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerSnapshot {
    /// Whether the left mouse button is held.
    pub pressed: bool,
    /// Cursor position, `None` when the cursor is outside the window.
    pub cursor: Option<Vec2>,
}

impl PointerSnapshot {
    /// The click point for this frame, if the button is held over the window.
    pub fn click(&self) -> Option<Vec2> {
        if self.pressed { self.cursor } else { None }
    }
}

fn record_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut snapshot: ResMut<PointerSnapshot>,
) {
    *snapshot = PointerSnapshot {
        pressed: mouse.pressed(MouseButton::Left),
        cursor: window.cursor_position(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_requires_button_and_cursor() {
        let cursor = Some(Vec2::new(10.0, 20.0));

        let held = PointerSnapshot { pressed: true, cursor };
        assert_eq!(held.click(), cursor);

        let released = PointerSnapshot { pressed: false, cursor };
        assert_eq!(released.click(), None);

        let outside = PointerSnapshot { pressed: true, cursor: None };
        assert_eq!(outside.click(), None);
    }
}
