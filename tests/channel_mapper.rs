use bmp_lsb::channel::{BitSlot, Channel, capacity_bits, locate};
use bmp_lsb::fixture::red_test_image;
use bmp_lsb::pixel::{Pixel, PixelGrid};

#[test]
fn test_locate_cycles_through_rgba() {
    let expected = [
        (0, Channel::Red),
        (0, Channel::Green),
        (0, Channel::Blue),
        (0, Channel::Alpha),
        (1, Channel::Red),
        (1, Channel::Green),
    ];
    for (bit_index, (pixel, channel)) in expected.into_iter().enumerate() {
        assert_eq!(locate(bit_index), BitSlot { pixel, channel });
    }

    assert_eq!(
        locate(39_999),
        BitSlot {
            pixel: 9_999,
            channel: Channel::Alpha
        }
    );
}

#[test]
fn test_channel_indices_match_pixel_layout() {
    let pixel = Pixel::rgba(10, 20, 30, 40);
    let values: Vec<u8> = Channel::ALL.iter().map(|c| pixel.0[c.index()]).collect();
    assert_eq!(values, [pixel.r(), pixel.g(), pixel.b(), pixel.a()]);
}

#[test]
fn test_capacity_bits() {
    assert_eq!(capacity_bits(&red_test_image().unwrap()), 40_000);

    let grid = PixelGrid::filled(3, 1, Pixel::rgb(0, 0, 0)).unwrap();
    assert_eq!(capacity_bits(&grid), 12);
}

#[test]
fn test_channel_access_by_bit_index() {
    let mut grid = PixelGrid::from_pixels(
        2,
        1,
        vec![Pixel::rgba(1, 2, 3, 4), Pixel::rgba(5, 6, 7, 8)],
    )
    .unwrap();

    let read: Vec<u8> = (0..8).filter_map(|bit| grid.channel(bit)).collect();
    assert_eq!(read, [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(grid.channel(8), None);

    if let Some(blue) = grid.channel_mut(6) {
        *blue = 70;
    }
    assert_eq!(grid.pixels()[1], Pixel::rgba(5, 6, 70, 8));
    assert!(grid.channel_mut(8).is_none());
}
