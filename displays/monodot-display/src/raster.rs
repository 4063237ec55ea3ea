//! Text rasterizer
//!
//! Expands characters into pixel writes on a [`Framebuffer`]. Only lit
//! glyph bits are written, so text is OR-ed onto whatever is already in
//! the buffer.

use crate::font::{glyph_for, CHAR_ADVANCE, GLYPH_HEIGHT};
use crate::framebuffer::Framebuffer;

/// Draw one character with its top-left corner at `(x, y)`
///
/// Pixels falling outside the panel are dropped.
pub fn draw_char(fb: &mut Framebuffer, x: i32, y: i32, ch: char) {
    let glyph = glyph_for(ch);

    for (i, &column) in glyph.iter().enumerate() {
        for j in 0..GLYPH_HEIGHT {
            if column & (1 << j) != 0 {
                fb.set_pixel(x.saturating_add(i as i32), y.saturating_add(j as i32), true);
            }
        }
    }
}

/// Draw a string on one line starting at `(x, y)`
///
/// Characters advance 6 pixels each. There is no wrapping; whatever runs
/// off the right edge is clipped.
pub fn draw_text(fb: &mut Framebuffer, x: i32, y: i32, text: &str) {
    let mut cursor = x;
    for ch in text.chars() {
        draw_char(fb, cursor, y, ch);
        cursor = cursor.saturating_add(CHAR_ADVANCE as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{Glyph, GLYPH_WIDTH};

    fn assert_glyph_at(fb: &Framebuffer, x: i32, y: i32, glyph: &Glyph) {
        for (i, &column) in glyph.iter().enumerate() {
            for j in 0..GLYPH_HEIGHT {
                let expected = column & (1 << j) != 0;
                assert_eq!(fb.pixel(x + i as i32, y + j as i32), expected);
            }
        }
    }

    #[test]
    fn test_draw_char_page_aligned() {
        let mut fb = Framebuffer::new(128, 64).unwrap();
        draw_char(&mut fb, 0, 0, 'A');
        assert_eq!(&fb.as_bytes()[..5], glyph_for('A'));
    }

    #[test]
    fn test_draw_char_straddles_pages() {
        let mut fb = Framebuffer::new(128, 64).unwrap();
        draw_char(&mut fb, 10, 4, 'B');
        assert_glyph_at(&fb, 10, 4, glyph_for('B'));
        // Top nibble of page 0, bottom nibble of page 1
        assert_eq!(fb.as_bytes()[10], 0xF0);
        assert_eq!(fb.as_bytes()[128 + 10], 0x07);
    }

    #[test]
    fn test_draw_char_is_additive() {
        let mut fb = Framebuffer::new(128, 64).unwrap();
        // Inside the footprint but unlit in '1', and just outside it
        fb.set_pixel(0, 0, true);
        fb.set_pixel(GLYPH_WIDTH as i32, 3, true);

        draw_char(&mut fb, 0, 0, '1');

        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(GLYPH_WIDTH as i32, 3));
        assert!(fb.pixel(2, 0));
    }

    #[test]
    fn test_draw_text_spacing() {
        let mut fb = Framebuffer::new(128, 64).unwrap();
        draw_text(&mut fb, 0, 0, "AB");

        assert_eq!(&fb.as_bytes()[0..5], glyph_for('A'));
        assert_eq!(fb.as_bytes()[5], 0x00);
        assert_eq!(&fb.as_bytes()[6..11], glyph_for('B'));
    }

    #[test]
    fn test_unsupported_char_draws_nothing() {
        let mut fb = Framebuffer::new(128, 64).unwrap();
        draw_char(&mut fb, 0, 0, '\u{7}');
        draw_char(&mut fb, 6, 0, 'ß');
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_text_clipped_at_edges() {
        let mut fb = Framebuffer::new(16, 8).unwrap();
        draw_text(&mut fb, -3, 0, "HELLO");
        // 'E' starts at column 3
        assert_eq!(fb.as_bytes()[3], glyph_for('E')[0]);
        // Column 0..2 hold the tail of 'H'
        assert_eq!(&fb.as_bytes()[0..2], &glyph_for('H')[3..5]);

        draw_text(&mut fb, i32::MAX - 2, 0, "xyz");
        draw_text(&mut fb, 0, 60, "low");
        assert_eq!(fb.as_bytes().len(), 16);
    }
}
