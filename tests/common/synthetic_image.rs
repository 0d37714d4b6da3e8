use shape_detector::image::RgbImageU8;

/// Renders a filled triangle over a uniform background.
pub fn filled_triangle_rgb(
    width: usize,
    height: usize,
    vertices: [[f32; 2]; 3],
    fg: [u8; 3],
    bg: [u8; 3],
) -> RgbImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = RgbImageU8::filled(width, height, bg);
    for y in 0..height {
        for x in 0..width {
            if point_in_triangle([x as f32, y as f32], &vertices) {
                img.set_pixel(x, y, fg);
            }
        }
    }
    img
}

/// Generates a grayscale buffer with one bright rectangle on a dark field.
pub fn filled_rect_gray(
    width: usize,
    height: usize,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
) -> Vec<u8> {
    assert!(x0 < x1 && x1 <= width, "rectangle must fit the image");
    assert!(y0 < y1 && y1 <= height, "rectangle must fit the image");
    let mut img = vec![32u8; width * height];
    for y in y0..y1 {
        for x in x0..x1 {
            img[y * width + x] = 220;
        }
    }
    img
}

fn point_in_triangle(p: [f32; 2], tri: &[[f32; 2]; 3]) -> bool {
    let sign = |a: [f32; 2], b: [f32; 2]| (p[0] - b[0]) * (a[1] - b[1]) - (a[0] - b[0]) * (p[1] - b[1]);
    let d0 = sign(tri[0], tri[1]);
    let d1 = sign(tri[1], tri[2]);
    let d2 = sign(tri[2], tri[0]);
    let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_neg && has_pos)
}
