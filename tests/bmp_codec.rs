use bmp_lsb::bmp::{BmpHeader, decode, encode, row_padding};
use bmp_lsb::error::FormatError;
use bmp_lsb::fixture::{FIXTURE_COLOR, red_test_image};
use bmp_lsb::pixel::{Pixel, PixelGrid};
use image::ImageFormat;
use rand::RngCore;

/// 按 BMP 格式手工拼出文件字节，`rows` 为已包含填充的各行原始数据 (按存储顺序)。
fn raw_bmp(width: i32, height: i32, bpp: u16, compression: u32, rows: &[Vec<u8>]) -> Vec<u8> {
    let image_size: usize = rows.iter().map(Vec::len).sum();
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&((54 + image_size) as u32).to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&54u32.to_le_bytes());
    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&bpp.to_le_bytes());
    bytes.extend_from_slice(&compression.to_le_bytes());
    bytes.extend_from_slice(&(image_size as u32).to_le_bytes());
    bytes.extend_from_slice(&[0u8; 16]);
    rows.iter().for_each(|row| bytes.extend_from_slice(row));
    bytes
}

/// 生成随机像素的图像，alpha 固定为 255 (与 24 位位图解码结果一致)
fn random_grid(width: u32, height: u32) -> PixelGrid {
    let mut raw = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut raw);
    let pixels = raw
        .chunks_exact(3)
        .map(|c| Pixel::rgb(c[0], c[1], c[2]))
        .collect();
    PixelGrid::from_pixels(width, height, pixels).unwrap()
}

#[test]
fn test_row_padding() {
    assert_eq!(row_padding(100, 3), 0);
    assert_eq!(row_padding(1, 3), 1);
    assert_eq!(row_padding(2, 3), 2);
    assert_eq!(row_padding(3, 3), 3);
    assert_eq!(row_padding(4, 3), 0);
    assert_eq!(row_padding(5, 4), 0);
}

/// 与测试图像生成器写出的字节完全一致的红色位图可以被正确解码
#[test]
fn test_decode_red_fixture_bytes() {
    let row: Vec<u8> = (0..100).flat_map(|_| [0u8, 0, 255]).collect();
    let rows = vec![row; 100];
    let bytes = raw_bmp(100, 100, 24, 0, &rows);

    let grid = decode(&bytes).unwrap();
    assert_eq!(grid.width(), 100);
    assert_eq!(grid.height(), 100);
    assert!(grid.pixels().iter().all(|p| *p == Pixel::rgba(255, 0, 0, 255)));
    assert_eq!(grid, red_test_image().unwrap());
}

/// 无填充与 1–3 字节填充的位图都能无损地往返
#[test]
fn test_container_round_trip_with_padding() {
    for width in 1..=8 {
        let grid = random_grid(width, 3);
        let bytes = encode(&grid);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, grid, "round trip failed for width {width}");

        let again = decode(&encode(&decoded)).unwrap();
        assert_eq!(again, grid);
    }
}

#[test]
fn test_encode_header_fields() {
    let grid = PixelGrid::filled(5, 3, FIXTURE_COLOR).unwrap();
    let bytes = encode(&grid);
    let header = BmpHeader::parse(&bytes).unwrap();

    // 每行 15 字节 + 1 字节填充
    assert_eq!(bytes.len(), 54 + 16 * 3);
    assert_eq!(header.signature, *b"BM");
    assert_eq!(header.file_size as usize, bytes.len());
    assert_eq!(header.reserved, 0);
    assert_eq!(header.data_offset, 54);
    assert_eq!(header.header_size, 40);
    assert_eq!(header.width, 5);
    assert_eq!(header.height, 3);
    assert_eq!(header.planes, 1);
    assert_eq!(header.bits_per_pixel, 24);
    assert_eq!(header.compression, 0);
    assert_eq!(header.image_size, 48);
    assert_eq!(header.colors_used, 0);
    assert_eq!(header.colors_important, 0);
    assert_eq!(header.row_padding(), 1);

    // 填充字节全为零
    assert_eq!(bytes[54 + 15], 0);
    assert_eq!(&bytes[54..57], &[0, 0, 255]);
}

/// 32 位位图读取 alpha；含非 255 alpha 的图像保存为 32 位，alpha 原样保留
#[test]
fn test_decode_32_bit_and_keep_alpha_on_encode() {
    let rows = vec![
        vec![1, 2, 3, 4, 5, 6, 7, 8],
        vec![9, 10, 11, 12, 13, 14, 15, 16],
    ];
    let bytes = raw_bmp(2, 2, 32, 0, &rows);

    let grid = decode(&bytes).unwrap();
    assert_eq!(
        grid.pixels(),
        &[
            Pixel::rgba(3, 2, 1, 4),
            Pixel::rgba(7, 6, 5, 8),
            Pixel::rgba(11, 10, 9, 12),
            Pixel::rgba(15, 14, 13, 16),
        ]
    );

    let encoded = encode(&grid);
    let header = BmpHeader::parse(&encoded).unwrap();
    assert_eq!(header.bits_per_pixel, 32);
    assert_eq!(header.compression, 0);
    assert_eq!(header.row_padding(), 0);
    assert_eq!(header.image_size, 16);
    assert_eq!(&encoded[54..], rows.concat().as_slice());

    assert_eq!(decode(&encoded).unwrap(), grid);
}

/// 完全不透明的图像仍写为 24 位，即使来源是 32 位位图
#[test]
fn test_opaque_32_bit_source_is_saved_as_24_bit() {
    let rows = vec![vec![1, 2, 3, 255, 4, 5, 6, 255]];
    let grid = decode(&raw_bmp(2, 1, 32, 0, &rows)).unwrap();
    assert!(grid.is_opaque());

    let encoded = encode(&grid);
    assert_eq!(BmpHeader::parse(&encoded).unwrap().bits_per_pixel, 24);
    assert_eq!(&encoded[54..], &[1, 2, 3, 4, 5, 6, 0, 0]);
    assert_eq!(decode(&encoded).unwrap(), grid);
}

/// 只改动一个像素 alpha 的最低位也会切换到 32 位，保存后该比特依然存在
#[test]
fn test_single_alpha_change_survives_save() {
    let mut grid = red_test_image().unwrap();
    grid.pixels_mut()[42] = Pixel::rgba(255, 0, 0, 254);

    let encoded = encode(&grid);
    assert_eq!(BmpHeader::parse(&encoded).unwrap().bits_per_pixel, 32);
    assert_eq!(encoded.len(), 54 + 100 * 100 * 4);

    let reloaded = decode(&encoded).unwrap();
    assert_eq!(reloaded.pixels()[42].a(), 254);
    assert_eq!(reloaded, grid);
}

/// 高度为负时按存储顺序读取，不翻转行
#[test]
fn test_negative_height_keeps_storage_order() {
    let rows = vec![vec![10, 20, 30, 0], vec![40, 50, 60, 0]];
    let grid = decode(&raw_bmp(1, -2, 24, 0, &rows)).unwrap();

    assert_eq!(grid.height(), 2);
    assert_eq!(
        grid.pixels(),
        &[Pixel::rgb(30, 20, 10), Pixel::rgb(60, 50, 40)]
    );
}

#[test]
fn test_nonzero_compression_is_read_as_is() {
    let rows = vec![vec![1, 2, 3, 0]];
    let grid = decode(&raw_bmp(1, 1, 24, 3, &rows)).unwrap();
    assert_eq!(grid.pixels(), &[Pixel::rgb(3, 2, 1)]);
}

#[test]
fn test_pixel_data_honours_data_offset() {
    let plain = raw_bmp(1, 1, 24, 0, &[vec![1, 2, 3, 0]]);
    // 在头部与像素数据之间插入 4 字节间隙
    let mut bytes = plain[..54].to_vec();
    bytes.extend_from_slice(&[0xAA; 4]);
    bytes.extend_from_slice(&plain[54..]);
    bytes[10..14].copy_from_slice(&58u32.to_le_bytes());

    let grid = decode(&bytes).unwrap();
    assert_eq!(grid.pixels(), &[Pixel::rgb(3, 2, 1)]);
}

#[test]
fn test_reject_bad_signature() {
    let mut bytes = encode(&red_test_image().unwrap());
    bytes[0] = b'P';
    bytes[1] = b'K';
    assert_eq!(decode(&bytes), Err(FormatError::BadSignature(*b"PK")));
}

#[test]
fn test_reject_unsupported_depth() {
    for bpp in [1u16, 8, 16] {
        let bytes = raw_bmp(1, 1, bpp, 0, &[vec![0, 0, 0, 0]]);
        assert_eq!(decode(&bytes), Err(FormatError::UnsupportedDepth(bpp)));
    }
}

#[test]
fn test_reject_truncated_header() {
    let bytes = encode(&red_test_image().unwrap());
    assert_eq!(
        decode(&bytes[..40]),
        Err(FormatError::Truncated {
            needed: 54,
            actual: 40
        })
    );
    assert!(matches!(decode(&[]), Err(FormatError::Truncated { .. })));
}

#[test]
fn test_reject_truncated_pixel_data() {
    let bytes = encode(&PixelGrid::filled(4, 4, FIXTURE_COLOR).unwrap());
    let result = decode(&bytes[..bytes.len() - 1]);
    assert!(matches!(result, Err(FormatError::Truncated { .. })));
}

#[test]
fn test_reject_invalid_dimensions() {
    let zero_width = raw_bmp(0, 1, 24, 0, &[vec![0, 0, 0, 0]]);
    assert!(matches!(
        decode(&zero_width),
        Err(FormatError::InvalidDimensions { .. })
    ));

    let zero_height = raw_bmp(1, 0, 24, 0, &[]);
    assert!(matches!(
        decode(&zero_height),
        Err(FormatError::InvalidDimensions { .. })
    ));
}

/// 使用 `image` 作为独立的参考解码器验证写出的文件
#[test]
fn test_encoded_file_readable_by_reference_decoder() -> anyhow::Result<()> {
    let grid = random_grid(7, 5);
    let bytes = encode(&grid);

    assert_eq!(BmpHeader::parse(&bytes)?.bits_per_pixel, 24);

    let reference = image::load_from_memory_with_format(&bytes, ImageFormat::Bmp)?.to_rgb8();
    assert_eq!(reference.dimensions(), (7, 5));

    // 正高度的位图自下而上存储：存储中的第 y 行是画面中的倒数第 y+1 行
    for (y, row) in grid.rows().enumerate() {
        for (x, pixel) in row.iter().enumerate() {
            let expected = [pixel.r(), pixel.g(), pixel.b()];
            assert_eq!(reference.get_pixel(x as u32, 4 - y as u32).0, expected);
        }
    }

    Ok(())
}

/// 32 位输出同样能被参考解码器读出相同的 RGB 值
#[test]
fn test_32_bit_file_readable_by_reference_decoder() -> anyhow::Result<()> {
    let mut grid = random_grid(6, 4);
    grid.pixels_mut()[0].0[3] = 0x7F;
    let bytes = encode(&grid);
    assert_eq!(BmpHeader::parse(&bytes)?.bits_per_pixel, 32);

    let reference = image::load_from_memory_with_format(&bytes, ImageFormat::Bmp)?.to_rgb8();
    assert_eq!(reference.dimensions(), (6, 4));
    for (y, row) in grid.rows().enumerate() {
        for (x, pixel) in row.iter().enumerate() {
            let expected = [pixel.r(), pixel.g(), pixel.b()];
            assert_eq!(reference.get_pixel(x as u32, 3 - y as u32).0, expected);
        }
    }

    Ok(())
}

#[test]
fn test_grid_constructor_invariants() {
    assert!(matches!(
        PixelGrid::filled(0, 1, FIXTURE_COLOR),
        Err(FormatError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        PixelGrid::filled(1, 0, FIXTURE_COLOR),
        Err(FormatError::InvalidDimensions { .. })
    ));
    assert_eq!(
        PixelGrid::from_pixels(2, 2, vec![FIXTURE_COLOR; 3]),
        Err(FormatError::PixelCountMismatch {
            expected: 4,
            actual: 3
        })
    );
}
