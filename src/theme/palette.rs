use bevy::prelude::*;

/// White text drawn over the night sky
pub const OVERLAY_TEXT: Color = Color::srgb(0.95, 0.95, 0.95);

/// Black text for headers
pub const HEADER_TEXT: Color = Color::srgb(0.1, 0.1, 0.1);

/// #ececec
pub const BUTTON_TEXT: Color = Color::srgb(0.925, 0.925, 0.925);
/// #4666bf
pub const BUTTON_BACKGROUND: Color = Color::srgb(0.275, 0.400, 0.750);
/// #6299d1
pub const BUTTON_HOVERED_BACKGROUND: Color = Color::srgb(0.384, 0.600, 0.820);
/// #3d4999
pub const BUTTON_PRESSED_BACKGROUND: Color = Color::srgb(0.239, 0.286, 0.600);

/// Translucent backdrop behind menus
pub const MENU_BACKDROP: Color = Color::srgba(0.96, 0.92, 0.84, 0.9);
