use crate::config;
use winit::keyboard::KeyCode;

/// Keys assigned to the four lanes, in lane-index order.
pub const LANE_KEYS: [KeyCode; config::LANE_COUNT] =
    [KeyCode::KeyD, KeyCode::KeyF, KeyCode::KeyJ, KeyCode::KeyK];

#[inline(always)]
pub fn lane_from_keycode(code: KeyCode) -> Option<usize> {
    match code {
        KeyCode::KeyD => Some(0),
        KeyCode::KeyF => Some(1),
        KeyCode::KeyJ => Some(2),
        KeyCode::KeyK => Some(3),
        _ => None,
    }
}

/// Horizontal origin of a lane's column.
#[inline(always)]
pub fn origin_x(index: usize) -> f32 {
    index as f32 * config::TILE_WIDTH
}

/// Visual state of a lane's key guide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuideState {
    Idle,
    Held,
    Fail,
}

/// One of the four vertical tracks a tile scrolls down.
///
/// A lane carries at most one tile per pass: it is occupied exactly while
/// `y` sits below the parked position. `x` is re-pointed at spawn time to
/// the column of the randomly chosen target lane, so the rectangle a player
/// sees and the key that resolves it are decoupled.
#[derive(Clone, Copy, Debug)]
pub struct Lane {
    pub index: usize,
    pub key: KeyCode,
    pub x: f32,
    pub y: f32,
}

impl Lane {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            key: LANE_KEYS[index],
            x: origin_x(index),
            y: config::TILE_RESET_Y,
        }
    }

    /// Returns the tile to its position above the visible band.
    pub fn park(&mut self) {
        self.y = config::TILE_RESET_Y;
    }

    pub fn is_parked(&self) -> bool {
        self.y <= config::TILE_RESET_Y
    }

    pub fn is_descending(&self) -> bool {
        self.y > config::TILE_RESET_Y
    }

    /// True once the tile slid past the bottom edge unresolved.
    pub fn is_past(&self) -> bool {
        self.y >= config::WINDOW_HEIGHT as f32
    }
}
