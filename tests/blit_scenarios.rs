use soft_blit::{blit, BlitOp, Color, ColorFormat, Image, Point, Rect};

#[test]
fn test_copy_32_to_16_opaque_red() {
    let mut a = Image::new(ColorFormat::A8R8G8B8, 4, 4);
    a.fill(Color(0xFFFF_0000));
    let mut b = Image::new(ColorFormat::A1R5G5B5, 4, 4);

    assert!(a.copy_to(&mut b, Point::new(0, 0)));

    for px in b.as_raw().chunks_exact(2) {
        let v = u16::from_le_bytes([px[0], px[1]]);
        assert_eq!(v, 0xFC00, "expected opaque red, got {v:#06x}");
        assert_eq!((v >> 10) & 0x1F, 0b11111);
    }
}

#[test]
fn test_alpha_blend_per_pixel() {
    let src = Image::from_colors(
        2,
        2,
        &[
            Color(0xFFFF_0000),
            Color(0x80FF_0000),
            Color(0x00FF_0000),
            Color(0xFFFF_0000),
        ],
    )
    .unwrap();
    let mut dst = Image::new(ColorFormat::A8R8G8B8, 2, 2);
    dst.fill(Color(0xFF00_00FF));

    assert!(src.copy_to_with_alpha(
        &mut dst,
        Point::new(0, 0),
        &Rect::new(0, 0, 2, 2),
        Color::WHITE,
        None
    ));

    assert_eq!(dst.get_pixel(0, 0), Color(0xFFFF_0000));
    assert_eq!(dst.get_pixel(0, 1), Color(0xFF00_00FF));
    assert_eq!(dst.get_pixel(1, 1), Color(0xFFFF_0000));

    let mixed = dst.get_pixel(1, 0);
    assert!(mixed.red().abs_diff(0x80) <= 2, "red {:#x}", mixed.red());
    assert!(mixed.blue().abs_diff(0x80) <= 2, "blue {:#x}", mixed.blue());
    assert_eq!(mixed.green(), 0);
}

#[test]
fn test_line_clipped_at_origin() {
    let mut img = Image::new(ColorFormat::A8R8G8B8, 10, 10);
    assert!(img.draw_line(Point::new(-5, -5), Point::new(5, 5), Color::WHITE));

    for y in 0..10 {
        for x in 0..10 {
            let expected = if x == y && x <= 5 { Color::WHITE } else { Color::TRANSPARENT_BLACK };
            assert_eq!(img.get_pixel(x, y), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn test_line_entirely_outside() {
    let mut img = Image::new(ColorFormat::A8R8G8B8, 10, 10);
    assert!(!img.draw_line(Point::new(-5, 20), Point::new(20, 30), Color::WHITE));
    assert!(img.as_raw().iter().all(|&b| b == 0));
}

#[test]
fn test_missing_routine_leaves_dest_untouched() {
    let mut src = Image::new(ColorFormat::R5G6B5, 4, 4);
    src.fill(Color::WHITE);
    let mut dst = Image::new(ColorFormat::A8R8G8B8, 4, 4);
    dst.fill(Color(0x1234_5678));
    let before = dst.as_raw().to_vec();

    assert!(!blit(BlitOp::Texture, &mut dst, None, None, Some(&src), None, 0));
    assert!(!blit(BlitOp::TextureAlphaBlend, &mut dst, None, None, Some(&src), None, 0));
    assert!(!src.copy_to(&mut dst, Point::new(0, 0)));
    assert_eq!(dst.as_raw(), &before[..]);
}

#[test]
fn test_writes_stay_inside_dest_clip() {
    const SENTINEL: u8 = 0xA5;
    let (w, h, pitch) = (8u32, 6u32, 8 * 4 + 12);

    let mut src = Image::new(ColorFormat::A8R8G8B8, 5, 4);
    src.fill(Color(0xFF10_2030));
    let clip = Rect::new(2, 1, 4, 3);

    for py in -5..8 {
        for px in -6..10 {
            let mut buf = vec![SENTINEL; pitch * h as usize];
            {
                let mut dst = Image::wrap(ColorFormat::A8R8G8B8, w, h, pitch, &mut buf).unwrap();
                src.copy_to_rect(&mut dst, Point::new(px, py), &Rect::new(0, 0, 5, 4), Some(&clip));
            }

            for y in 0..h as usize {
                for x in 0..pitch {
                    let changed = buf[y * pitch + x] != SENTINEL;
                    if changed {
                        let (cx, cy) = ((x / 4) as i32, y as i32);
                        assert!(x < w as usize * 4, "padding written at ({px}, {py})");
                        assert!(
                            clip.contains(cx, cy),
                            "pixel ({cx}, {cy}) outside clip at ({px}, {py})"
                        );
                        assert!(cx >= px && cx < px + 5 && cy >= py && cy < py + 4);
                    }
                }
            }
        }
    }
}

#[test]
fn test_translucent_fill_16_keeps_alpha_bit() {
    let mut img = Image::new(ColorFormat::A1R5G5B5, 3, 3);
    assert!(img.draw_rectangle(&Rect::new(0, 0, 3, 3), Color(0x40FF_FFFF)));
    for px in img.as_raw().chunks_exact(2) {
        assert_ne!(u16::from_le_bytes([px[0], px[1]]) & 0x8000, 0);
    }
}
