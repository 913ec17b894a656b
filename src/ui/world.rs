use bevy::prelude::*;

/// System to set up the 2D camera over a black backdrop
pub fn setup_world(mut commands: Commands, mut clear_color: ResMut<ClearColor>) {
    clear_color.0 = Color::BLACK;
    commands.spawn(Camera2d);
}
