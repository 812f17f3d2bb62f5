// src/config.rs
use std::time::Duration;

// Window
pub const WINDOW_TITLE: &str = "TapFall";
pub const WINDOW_WIDTH: u32 = 400;
pub const WINDOW_HEIGHT: u32 = 450;

// Lanes & tiles
pub const LANE_COUNT: usize = 4;
pub const TILE_WIDTH: f32 = 100.0;
pub const TILE_HEIGHT: f32 = 150.0;
/// Parked tile position, one full tile height above the visible band.
pub const TILE_RESET_Y: f32 = -TILE_HEIGHT;
pub const GUIDE_WIDTH: f32 = 100.0;
pub const GUIDE_HEIGHT: f32 = 40.0;

// Speed ramp. Crossing a score threshold moves the run to the next level;
// each level advances descending tiles by a fixed pixel step per tick.
pub const SPEED_THRESHOLDS: [u32; 5] = [10, 25, 45, 75, 110];
pub const SPEED_ADVANCES: [f32; 5] = [2.0, 3.0, 5.0, 10.0, 15.0];

// Visual constants
pub const BACKGROUND_COLOR: [u8; 4] = [236, 239, 241, 255];
pub const TILE_COLOR: [u8; 4] = [22, 22, 22, 255];
pub const GUIDE_IDLE_COLOR: [u8; 4] = [211, 211, 211, 255];
pub const GUIDE_HELD_COLOR: [u8; 4] = [128, 128, 128, 255];
pub const GUIDE_FAIL_COLOR: [u8; 4] = [214, 45, 45, 255];
pub const MENU_OVERLAY_COLOR: [u8; 4] = [177, 177, 177, 178];

// Misc
pub const TITLE_REFRESH_INTERVAL: Duration = Duration::from_millis(250);

// Audio assets. Two chromatic octaves, c6 through b7, in the index order
// note sheets are validated against.
pub const NOTE_DIR: &str = "assets/notes";
pub const NOTE_COUNT: usize = NOTE_FILES.len();
pub const NOTE_FILES: [&str; 24] = [
    "01_c6.wav", "02_c#6.wav", "03_d6.wav", "04_d#6.wav",
    "05_e6.wav", "06_f6.wav", "07_f#6.wav", "08_g6.wav",
    "09_g#6.wav", "10_a6.wav", "11_a#6.wav", "12_b6.wav",
    "13_c7.wav", "14_c#7.wav", "15_d7.wav", "16_d#7.wav",
    "17_e7.wav", "18_f7.wav", "19_f#7.wav", "20_g7.wav",
    "21_g#7.wav", "22_a7.wav", "23_a#7.wav", "24_b7.wav",
];
