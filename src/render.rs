// src/render.rs
//! CPU framebuffer renderer.
//!
//! Drawing is a pure function of the frame bytes and an engine snapshot;
//! nothing here reaches back into the session. The buffer layout is RGBA8,
//! row-major, sized to the fixed window dimensions.

use crate::config;
use crate::game::lane::GuideState;
use crate::game::session::Snapshot;

pub fn draw(frame: &mut [u8], snapshot: &Snapshot) {
    fill(frame, config::BACKGROUND_COLOR);

    // Key guides along the bottom edge, one per lane column.
    let guide_top = config::WINDOW_HEIGHT as f32 - config::GUIDE_HEIGHT;
    for (index, view) in snapshot.lanes.iter().enumerate() {
        let color = match view.guide {
            GuideState::Idle => config::GUIDE_IDLE_COLOR,
            GuideState::Held => config::GUIDE_HELD_COLOR,
            GuideState::Fail => config::GUIDE_FAIL_COLOR,
        };
        fill_rect(
            frame,
            index as f32 * config::TILE_WIDTH,
            guide_top,
            config::GUIDE_WIDTH,
            config::GUIDE_HEIGHT,
            color,
        );
    }

    for view in &snapshot.lanes {
        if view.y > config::TILE_RESET_Y {
            fill_rect(
                frame,
                view.x,
                view.y,
                config::TILE_WIDTH,
                config::TILE_HEIGHT,
                config::TILE_COLOR,
            );
        }
    }

    if !snapshot.running {
        tint(frame, config::MENU_OVERLAY_COLOR);
    }
}

fn fill(frame: &mut [u8], color: [u8; 4]) {
    for pixel in frame.chunks_exact_mut(4) {
        pixel.copy_from_slice(&color);
    }
}

/// Fills an axis-aligned rectangle, clipped to the frame bounds. Tiles
/// enter the viewport partially above the top edge, so negative `y` values
/// are expected here.
fn fill_rect(frame: &mut [u8], x: f32, y: f32, w: f32, h: f32, color: [u8; 4]) {
    let frame_w = config::WINDOW_WIDTH as i32;
    let frame_h = config::WINDOW_HEIGHT as i32;
    let x0 = (x as i32).clamp(0, frame_w);
    let y0 = (y as i32).clamp(0, frame_h);
    let x1 = ((x + w) as i32).clamp(0, frame_w);
    let y1 = ((y + h) as i32).clamp(0, frame_h);
    for row in y0..y1 {
        let start = ((row * frame_w + x0) * 4) as usize;
        let end = ((row * frame_w + x1) * 4) as usize;
        for pixel in frame[start..end].chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }
}

/// Alpha-blends `color` over the whole frame.
fn tint(frame: &mut [u8], color: [u8; 4]) {
    let alpha = color[3] as u32;
    let inverse = 255 - alpha;
    for pixel in frame.chunks_exact_mut(4) {
        for channel in 0..3 {
            pixel[channel] =
                ((color[channel] as u32 * alpha + pixel[channel] as u32 * inverse) / 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::session::LaneView;

    fn blank_frame() -> Vec<u8> {
        vec![0; (config::WINDOW_WIDTH * config::WINDOW_HEIGHT * 4) as usize]
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            lanes: std::array::from_fn(|i| LaneView {
                x: i as f32 * config::TILE_WIDTH,
                y: config::TILE_RESET_Y,
                guide: GuideState::Idle,
            }),
            score: 0,
            hi_score: 0,
            running: true,
            speed_level: 0,
            sheet_status: "No sheet loaded".to_string(),
        }
    }

    fn pixel_at(frame: &[u8], x: u32, y: u32) -> [u8; 4] {
        let start = ((y * config::WINDOW_WIDTH + x) * 4) as usize;
        frame[start..start + 4].try_into().unwrap()
    }

    #[test]
    fn tile_is_painted_at_the_lane_position() {
        let mut frame = blank_frame();
        let mut snap = snapshot();
        snap.lanes[0].x = config::TILE_WIDTH; // drawn in column 1
        snap.lanes[0].y = 50.0;
        draw(&mut frame, &snap);

        assert_eq!(pixel_at(&frame, 150, 100), config::TILE_COLOR);
        // The lane's own column stays background.
        assert_eq!(pixel_at(&frame, 50, 100), config::BACKGROUND_COLOR);
    }

    #[test]
    fn parked_lanes_leave_the_background_untouched() {
        let mut frame = blank_frame();
        draw(&mut frame, &snapshot());
        assert_eq!(pixel_at(&frame, 200, 200), config::BACKGROUND_COLOR);
    }

    #[test]
    fn tiles_entering_from_above_are_clipped() {
        let mut frame = blank_frame();
        let mut snap = snapshot();
        snap.lanes[2].y = -100.0; // only the bottom 50 px are visible
        draw(&mut frame, &snap);

        assert_eq!(pixel_at(&frame, 250, 20), config::TILE_COLOR);
        assert_eq!(pixel_at(&frame, 250, 60), config::BACKGROUND_COLOR);
    }

    #[test]
    fn guide_colors_follow_their_state() {
        let mut frame = blank_frame();
        let mut snap = snapshot();
        snap.lanes[1].guide = GuideState::Held;
        snap.lanes[3].guide = GuideState::Fail;
        draw(&mut frame, &snap);

        let guide_row = config::WINDOW_HEIGHT - 20;
        assert_eq!(pixel_at(&frame, 50, guide_row), config::GUIDE_IDLE_COLOR);
        assert_eq!(pixel_at(&frame, 150, guide_row), config::GUIDE_HELD_COLOR);
        assert_eq!(pixel_at(&frame, 350, guide_row), config::GUIDE_FAIL_COLOR);
    }

    #[test]
    fn ended_runs_get_the_menu_overlay() {
        let mut running_frame = blank_frame();
        draw(&mut running_frame, &snapshot());

        let mut snap = snapshot();
        snap.running = false;
        let mut menu_frame = blank_frame();
        draw(&mut menu_frame, &snap);

        assert_ne!(
            pixel_at(&running_frame, 200, 200),
            pixel_at(&menu_frame, 200, 200)
        );
    }
}
