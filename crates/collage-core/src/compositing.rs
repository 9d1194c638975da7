use image::{Rgba, RgbaImage};

/// Paste `src` into `canvas` with its top-left corner at (dx, dy), clipping
/// anything that falls outside the canvas, then optionally draw a red 1px
/// outline around the pasted area for debugging.
pub fn paste_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32, outlines: bool) {
    let (cw, ch) = canvas.dimensions();
    let (sw, sh) = src.dimensions();
    let rw = sw.min(cw.saturating_sub(dx));
    let rh = sh.min(ch.saturating_sub(dy));
    if rw == 0 || rh == 0 {
        return;
    }

    for yy in 0..rh {
        for xx in 0..rw {
            canvas.put_pixel(dx + xx, dy + yy, *src.get_pixel(xx, yy));
        }
    }

    if outlines {
        let red = Rgba([255, 0, 0, 255]);
        let bx = dx + rw - 1;
        let by = dy + rh - 1;
        for xx in 0..rw {
            canvas.put_pixel(dx + xx, dy, red);
            canvas.put_pixel(dx + xx, by, red);
        }
        for yy in 0..rh {
            canvas.put_pixel(dx, dy + yy, red);
            canvas.put_pixel(bx, dy + yy, red);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paste_clips_at_canvas_edge() {
        let src = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        let mut canvas = RgbaImage::new(6, 6);
        paste_rgba(&src, &mut canvas, 4, 4, false);
        assert_eq!(canvas.get_pixel(5, 5).0, [1, 2, 3, 255]);
        assert_eq!(canvas.get_pixel(3, 3).0, [0, 0, 0, 0]);
    }

    #[test]
    fn paste_outside_canvas_is_noop() {
        let src = RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255]));
        let mut canvas = RgbaImage::new(3, 3);
        paste_rgba(&src, &mut canvas, 3, 0, true);
        assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn outline_marks_border_only() {
        let src = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 255, 255]));
        let mut canvas = RgbaImage::new(5, 5);
        paste_rgba(&src, &mut canvas, 1, 1, true);
        assert_eq!(canvas.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(3, 3).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(2, 2).0, [0, 0, 255, 255]);
    }
}
