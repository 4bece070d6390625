//! Hand-coded glyph patterns
//!
//! Per-digit and per-letter stroke renderers for the synthetic training set.
//! These are deliberately crude: the classifier only ever sees drawings in
//! this style, so accuracy on real handwriting is illustrative. Each renderer
//! paints ink values into a 784-length canonical grid.

use crate::pipeline::CANONICAL_SIZE;

const GRID: i32 = CANONICAL_SIZE as i32;

/// Paint one cell, ignoring out-of-grid coordinates.
fn set_pixel(image: &mut [f32], x: i32, y: i32, value: f32) {
    if x >= 0 && x < GRID && y >= 0 && y < GRID {
        image[(y * GRID + x) as usize] = value;
    }
}

fn ink(image: &mut [f32], x: i32, y: i32) {
    set_pixel(image, x, y, 1.0);
}

/// Render the pattern for a digit class (0-9).
pub(super) fn draw_digit(image: &mut [f32], digit: usize) {
    match digit {
        0 => draw_oval(image),
        1 => draw_vertical_line(image),
        2 => draw_two(image),
        3 => draw_three(image),
        4 => draw_four(image),
        5 => draw_five(image),
        6 => draw_six(image),
        7 => draw_seven(image),
        8 => draw_eight(image),
        _ => draw_nine(image),
    }
}

/// Render the pattern for a letter class (0 = A .. 25 = Z).
pub(super) fn draw_letter(image: &mut [f32], letter: usize) {
    match letter {
        0 => draw_a(image),
        1 => draw_b(image),
        2 => draw_c(image),
        other => draw_letter_fallback(image, other),
    }
}

fn draw_oval(image: &mut [f32]) {
    for y in 4..24 {
        for x in 6..22 {
            let dx = (x - 14) as f32;
            let dy = (y - 14) as f32;
            if dx * dx / 64.0 + dy * dy / 100.0 < 1.0 && dx * dx / 36.0 + dy * dy / 81.0 > 1.0 {
                ink(image, x, y);
            }
        }
    }
}

fn draw_vertical_line(image: &mut [f32]) {
    for y in 4..24 {
        ink(image, 13, y);
        ink(image, 14, y);
        ink(image, 15, y);
    }
}

fn draw_two(image: &mut [f32]) {
    for x in 6..22 {
        ink(image, x, 4);
        ink(image, x, 5);
    }
    for i in 0..15 {
        ink(image, 20 - i, 6 + i);
    }
    for x in 6..22 {
        ink(image, x, 22);
        ink(image, x, 23);
    }
}

fn draw_three(image: &mut [f32]) {
    for x in 6..20 {
        ink(image, x, 4);
        ink(image, x, 13);
        ink(image, x, 23);
    }
    for y in 5..13 {
        ink(image, 19, y);
    }
    for y in 14..23 {
        ink(image, 19, y);
    }
}

fn draw_four(image: &mut [f32]) {
    for y in 4..15 {
        ink(image, 8, y);
    }
    for x in 8..20 {
        ink(image, x, 14);
    }
    for y in 4..24 {
        ink(image, 19, y);
    }
}

fn draw_five(image: &mut [f32]) {
    for x in 6..20 {
        ink(image, x, 4);
    }
    for y in 4..14 {
        ink(image, 6, y);
    }
    for x in 6..18 {
        ink(image, x, 14);
    }
    for y in 14..23 {
        ink(image, 18, y);
    }
    for x in 6..18 {
        ink(image, x, 23);
    }
}

fn draw_six(image: &mut [f32]) {
    // A five with the bottom loop closed on the left
    draw_five(image);
    for y in 14..23 {
        ink(image, 6, y);
    }
}

fn draw_seven(image: &mut [f32]) {
    for x in 6..22 {
        ink(image, x, 4);
    }
    for i in 0..19 {
        let x = (21.0 - i as f32 * 0.8).round() as i32;
        ink(image, x, 5 + i);
    }
}

fn draw_eight(image: &mut [f32]) {
    draw_oval(image);
    for x in 8..20 {
        ink(image, x, 13);
        ink(image, x, 14);
        ink(image, x, 15);
    }
}

fn draw_nine(image: &mut [f32]) {
    // Top loop
    for y in 4..15 {
        for x in 6..22 {
            let dx = (x - 14) as f32;
            let dy = (y - 9) as f32;
            if dx * dx / 64.0 + dy * dy / 25.0 < 1.0 && dx * dx / 36.0 + dy * dy / 16.0 > 1.0 {
                ink(image, x, y);
            }
        }
    }
    // Right descender
    for y in 9..24 {
        ink(image, 20, y);
    }
}

fn draw_a(image: &mut [f32]) {
    for i in 0..20 {
        let left_x = (6.0 + i as f32 * 0.4).round() as i32;
        let right_x = (22.0 - i as f32 * 0.4).round() as i32;
        ink(image, left_x, 23 - i);
        ink(image, right_x, 23 - i);
    }
    for x in 10..18 {
        ink(image, x, 15);
    }
}

fn draw_b(image: &mut [f32]) {
    for y in 4..24 {
        ink(image, 6, y);
    }
    for x in 6..18 {
        ink(image, x, 4);
    }
    for x in 6..16 {
        ink(image, x, 14);
    }
    for x in 6..18 {
        ink(image, x, 23);
    }
    for y in 5..14 {
        ink(image, 17, y);
    }
    for y in 14..23 {
        ink(image, 17, y);
    }
}

fn draw_c(image: &mut [f32]) {
    for y in 6..22 {
        ink(image, 8, y);
    }
    for x in 8..20 {
        ink(image, x, 6);
    }
    for x in 8..20 {
        ink(image, x, 22);
    }
}

/// Deterministic per-letter texture for letters without a dedicated renderer.
/// The letter index seeds the lattice so every class stays distinguishable.
fn draw_letter_fallback(image: &mut [f32], letter: usize) {
    let seed = letter as i32;
    for y in 4..24 {
        for x in 6..22 {
            if (x + y + seed) % 7 == 0 {
                set_pixel(image, x, y, 0.8);
            }
        }
    }
}
