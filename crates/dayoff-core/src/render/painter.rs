use chrono::Weekday;

use super::{palette, Rgb, Surface};
use crate::animator::board::{
    pegs, slot_width, BALL_RADIUS, BOARD_HEIGHT, BOARD_WIDTH, PEG_RADIUS, SLOT_HEIGHT, SLOT_TOP,
};
use crate::animator::wheel::{segment_angle, start_offset, WHEEL_SIZE};
use crate::animator::Pose;
use crate::config::Variant;
use crate::days::{CandidateDay, CandidateSet};

pub const PLACEHOLDER: &str = "Select a month to see available days";

const WHEEL_RADIUS: f64 = WHEEL_SIZE / 2.0 - 10.0;
const HUB_RADIUS: f64 = 15.0;
const POINTER_SIZE: f64 = 12.0;

/// Slot fill: holidays first, then Monday vs Friday.
pub fn slot_color(day: &CandidateDay) -> Rgb {
    if day.is_holiday() {
        palette::HOLIDAY
    } else if day.weekday() == Weekday::Mon {
        palette::MONDAY
    } else {
        palette::FRIDAY
    }
}

/// Paint whichever variant is active. Without a pose the wheel is drawn
/// unrotated and the board without a ball.
pub fn paint(
    surface: &mut dyn Surface,
    variant: Variant,
    candidates: &CandidateSet,
    pose: Option<Pose>,
    highlight: Option<usize>,
) {
    match variant {
        Variant::Wheel => {
            let rotation = match pose {
                Some(Pose::Wheel { rotation }) => rotation,
                _ => 0.0,
            };
            paint_wheel(surface, candidates, rotation, highlight);
        }
        Variant::Board => {
            let ball = match pose {
                Some(Pose::Board { x, y }) => Some((x, y)),
                _ => None,
            };
            paint_board(surface, candidates, ball, highlight);
        }
    }
}

pub fn paint_wheel(
    surface: &mut dyn Surface,
    candidates: &CandidateSet,
    rotation: f64,
    highlight: Option<usize>,
) {
    let c = WHEEL_SIZE / 2.0;
    surface.clear(palette::PAGE);
    surface.fill_circle(c, c, WHEEL_RADIUS, palette::WHEEL_BG);

    if candidates.is_empty() {
        surface.draw_text(c, c, PLACEHOLDER, palette::INK);
        return;
    }

    let n = candidates.len();
    let seg = segment_angle(n);
    let offset = start_offset(n) + rotation;

    if let Some(i) = highlight.filter(|i| *i < n) {
        let start = offset + i as f64 * seg;
        surface.fill_sector(c, c, WHEEL_RADIUS + 5.0, start, start + seg, palette::MARKER);
    }

    for (i, day) in candidates.iter().enumerate() {
        let start = offset + i as f64 * seg;
        surface.fill_sector(c, c, WHEEL_RADIUS, start, start + seg, slot_color(day));
    }

    for (i, day) in candidates.iter().enumerate() {
        let mid = offset + (i as f64 + 0.5) * seg;
        let r = WHEEL_RADIUS * 0.68;
        surface.draw_text(c + r * mid.cos(), c + r * mid.sin(), &day.label(), palette::INK);
    }

    surface.fill_circle(c, c, HUB_RADIUS, palette::OUTLINE);

    // Pointer at the top, tip reaching into the rim.
    let tip_y = c - WHEEL_RADIUS + POINTER_SIZE;
    surface.fill_triangle(
        (c, tip_y),
        (c - POINTER_SIZE, tip_y - 2.0 * POINTER_SIZE),
        (c + POINTER_SIZE, tip_y - 2.0 * POINTER_SIZE),
        palette::MARKER,
    );
}

pub fn paint_board(
    surface: &mut dyn Surface,
    candidates: &CandidateSet,
    ball: Option<(f64, f64)>,
    highlight: Option<usize>,
) {
    surface.clear(palette::BOARD_BG);

    for (x, y) in pegs() {
        surface.fill_circle(x, y, PEG_RADIUS, palette::PEG);
    }

    if candidates.is_empty() {
        surface.draw_text(BOARD_WIDTH / 2.0, BOARD_HEIGHT / 2.0, PLACEHOLDER, palette::PAGE);
        return;
    }

    let n = candidates.len();
    let w = slot_width(n);
    for (i, day) in candidates.iter().enumerate() {
        let x = i as f64 * w;
        let (border, inset) = if highlight == Some(i) {
            (palette::MARKER, 3.0)
        } else {
            (palette::OUTLINE, 1.0)
        };
        surface.fill_rect(x, SLOT_TOP, w, SLOT_HEIGHT, border);
        surface.fill_rect(
            x + inset,
            SLOT_TOP + inset,
            w - 2.0 * inset,
            SLOT_HEIGHT - 2.0 * inset,
            slot_color(day),
        );

        let cx = x + w / 2.0;
        let weekday = day.date().format("%a").to_string();
        let dom = day.date().format("%-d").to_string();
        surface.draw_text(cx, SLOT_TOP + 20.0, &weekday, palette::INK);
        surface.draw_text(cx, SLOT_TOP + 40.0, &dom, palette::INK);
    }

    if let Some((x, y)) = ball {
        surface.fill_circle(x, y, BALL_RADIUS, palette::MARKER);
    }
}
