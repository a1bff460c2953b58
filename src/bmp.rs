//! # BMP 编解码模块
//!
//! 在 BMP 文件字节与 [`PixelGrid`] 之间互相转换。
//!
//! 读取时支持无压缩的 24 位 (BGR) 与 32 位 (BGRA) 位图。写出时，所有像素都不透明
//! (alpha 为 255) 的图像生成 24 位位图，否则生成 32 位 BI_RGB 位图以保留 alpha 通道，
//! 这样写入 alpha 最低位的隐写比特在保存后依然存在。所有多字节字段均为小端序，
//! 按固定偏移逐字段读写，不依赖任何结构体内存布局。

use crate::constants::*;
use crate::error::FormatError;
use crate::pixel::{Pixel, PixelGrid};
use log::{debug, warn};

/// 文件头与信息头中的全部字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved: u32,
    pub data_offset: u32,
    pub header_size: u32,
    pub width: i32,
    /// 为负时表示行按从上到下的顺序存储，分配行数取其绝对值。
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl BmpHeader {
    /// 解析文件开头的两个头部。
    ///
    /// # Errors
    ///
    /// * 输入不足 54 字节：`FormatError::Truncated`。
    /// * 签名不是 `BM`：`FormatError::BadSignature`。
    /// * 位深既不是 24 也不是 32：`FormatError::UnsupportedDepth`。
    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        let raw: &[u8; BMP_HEADER_SIZE] = bytes
            .get(..BMP_HEADER_SIZE)
            .and_then(|head| head.try_into().ok())
            .ok_or(FormatError::Truncated {
                needed: BMP_HEADER_SIZE,
                actual: bytes.len(),
            })?;

        let header = Self {
            signature: [raw[0], raw[1]],
            file_size: read_u32(raw, OFFSET_FILE_SIZE),
            reserved: read_u32(raw, OFFSET_RESERVED),
            data_offset: read_u32(raw, OFFSET_DATA_OFFSET),
            header_size: read_u32(raw, OFFSET_HEADER_SIZE),
            width: read_i32(raw, OFFSET_WIDTH),
            height: read_i32(raw, OFFSET_HEIGHT),
            planes: read_u16(raw, OFFSET_PLANES),
            bits_per_pixel: read_u16(raw, OFFSET_BITS_PER_PIXEL),
            compression: read_u32(raw, OFFSET_COMPRESSION),
            image_size: read_u32(raw, OFFSET_IMAGE_SIZE),
            x_pixels_per_meter: read_i32(raw, OFFSET_X_PIXELS_PER_METER),
            y_pixels_per_meter: read_i32(raw, OFFSET_Y_PIXELS_PER_METER),
            colors_used: read_u32(raw, OFFSET_COLORS_USED),
            colors_important: read_u32(raw, OFFSET_COLORS_IMPORTANT),
        };

        debug!(
            "Signature: {}{}, bits per pixel: {}, width: {}, height: {}",
            header.signature[0] as char,
            header.signature[1] as char,
            header.bits_per_pixel,
            header.width,
            header.height
        );

        if header.signature != BMP_SIGNATURE {
            return Err(FormatError::BadSignature(header.signature));
        }

        if header.bits_per_pixel != 24 && header.bits_per_pixel != 32 {
            return Err(FormatError::UnsupportedDepth(header.bits_per_pixel));
        }

        Ok(header)
    }

    /// 为给定图像生成无压缩的头部，文件大小与图像大小据此重新计算。
    ///
    /// 图像完全不透明时为 24 位，否则为 32 位。
    pub fn for_grid(grid: &PixelGrid) -> Self {
        let bits_per_pixel: u16 = if grid.is_opaque() { 24 } else { 32 };
        let bpp = usize::from(bits_per_pixel / 8);
        let padding = row_padding(grid.width() as usize, bpp);
        let image_size = (grid.width() as usize * bpp + padding) * grid.height() as usize;
        let file_size = BMP_HEADER_SIZE + image_size;

        Self {
            signature: BMP_SIGNATURE,
            file_size: u32::try_from(file_size).unwrap_or(u32::MAX),
            reserved: 0,
            data_offset: BMP_HEADER_SIZE as u32,
            header_size: INFO_HEADER_SIZE as u32,
            // PixelGrid 保证宽高不超过 i32::MAX
            width: grid.width() as i32,
            height: grid.height() as i32,
            planes: 1,
            bits_per_pixel,
            compression: 0,
            image_size: u32::try_from(image_size).unwrap_or(u32::MAX),
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: 0,
            colors_important: 0,
        }
    }

    /// 按固定偏移序列化为 54 字节。
    pub fn to_bytes(&self) -> [u8; BMP_HEADER_SIZE] {
        let mut raw = [0u8; BMP_HEADER_SIZE];
        raw[..2].copy_from_slice(&self.signature);
        write_field(&mut raw, OFFSET_FILE_SIZE, &self.file_size.to_le_bytes());
        write_field(&mut raw, OFFSET_RESERVED, &self.reserved.to_le_bytes());
        write_field(&mut raw, OFFSET_DATA_OFFSET, &self.data_offset.to_le_bytes());
        write_field(&mut raw, OFFSET_HEADER_SIZE, &self.header_size.to_le_bytes());
        write_field(&mut raw, OFFSET_WIDTH, &self.width.to_le_bytes());
        write_field(&mut raw, OFFSET_HEIGHT, &self.height.to_le_bytes());
        write_field(&mut raw, OFFSET_PLANES, &self.planes.to_le_bytes());
        write_field(&mut raw, OFFSET_BITS_PER_PIXEL, &self.bits_per_pixel.to_le_bytes());
        write_field(&mut raw, OFFSET_COMPRESSION, &self.compression.to_le_bytes());
        write_field(&mut raw, OFFSET_IMAGE_SIZE, &self.image_size.to_le_bytes());
        write_field(
            &mut raw,
            OFFSET_X_PIXELS_PER_METER,
            &self.x_pixels_per_meter.to_le_bytes(),
        );
        write_field(
            &mut raw,
            OFFSET_Y_PIXELS_PER_METER,
            &self.y_pixels_per_meter.to_le_bytes(),
        );
        write_field(&mut raw, OFFSET_COLORS_USED, &self.colors_used.to_le_bytes());
        write_field(
            &mut raw,
            OFFSET_COLORS_IMPORTANT,
            &self.colors_important.to_le_bytes(),
        );
        raw
    }

    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.bits_per_pixel / 8)
    }

    /// 每行末尾的填充字节数。
    pub fn row_padding(&self) -> usize {
        row_padding(self.width.unsigned_abs() as usize, self.bytes_per_pixel())
    }
}

/// 使一行的字节长度成为 4 的倍数所需的填充字节数。
pub fn row_padding(width: usize, bytes_per_pixel: usize) -> usize {
    (4 - (width * bytes_per_pixel) % 4) % 4
}

/// 将 BMP 文件字节解码为像素缓冲区。
///
/// 行按照文件中的存储顺序读取，与高度的符号无关：高度为负 (自上而下存储) 的位图
/// 同样被当作自下而上的行序看待。这一行为与既有工具生成的文件保持位级兼容，
/// 但对这类位图而言画面是上下颠倒的。
///
/// # Errors
///
/// 头部不合法、尺寸无效或像素数据被截断时返回 `FormatError`。
pub fn decode(bytes: &[u8]) -> Result<PixelGrid, FormatError> {
    let header = BmpHeader::parse(bytes)?;

    let invalid = FormatError::InvalidDimensions {
        width: header.width.into(),
        height: header.height.into(),
    };
    if header.width <= 0 || header.height == 0 {
        return Err(invalid);
    }
    if header.height < 0 {
        warn!(
            "Top-down BMP (height {}): rows are read in storage order, the image will appear flipped",
            header.height
        );
    }
    if header.compression != 0 {
        warn!(
            "BMP declares compression code {}; pixel data is read as uncompressed",
            header.compression
        );
    }

    let width = header.width.unsigned_abs() as usize;
    let height = header.height.unsigned_abs() as usize;
    let bpp = header.bytes_per_pixel();
    let row_data = width * bpp;
    let row_len = row_data + header.row_padding();
    let start = header.data_offset as usize;

    // 最后一行之后的填充字节不强制存在
    let needed = row_len
        .checked_mul(height - 1)
        .and_then(|rows| rows.checked_add(row_data))
        .and_then(|pixels| pixels.checked_add(start))
        .ok_or(invalid)?;
    if bytes.len() < needed {
        return Err(FormatError::Truncated {
            needed,
            actual: bytes.len(),
        });
    }

    let pixels: Vec<Pixel> = bytes[start..]
        .chunks(row_len)
        .take(height)
        .flat_map(|row| {
            row[..row_data].chunks_exact(bpp).map(|bgr| {
                let alpha = if bpp == 4 { bgr[3] } else { u8::MAX };
                Pixel::rgba(bgr[2], bgr[1], bgr[0], alpha)
            })
        })
        .collect();

    PixelGrid::from_pixels(width as u32, height as u32, pixels)
}

/// 将像素缓冲区编码为无压缩的 BMP 文件字节。
///
/// 不透明图像写为 24 位；只要有一个像素的 alpha 不是 255，就写为 32 位，
/// 保证 `decode(encode(grid)) == grid`。
pub fn encode(grid: &PixelGrid) -> Vec<u8> {
    let header = BmpHeader::for_grid(grid);
    let with_alpha = header.bits_per_pixel == 32;
    let padding = header.row_padding();

    let mut out = Vec::with_capacity(BMP_HEADER_SIZE + header.image_size as usize);
    out.extend_from_slice(&header.to_bytes());

    for row in grid.rows() {
        for pixel in row {
            out.extend_from_slice(&[pixel.b(), pixel.g(), pixel.r()]);
            if with_alpha {
                out.push(pixel.a());
            }
        }
        out.extend(std::iter::repeat_n(0u8, padding));
    }

    out
}

fn read_u16(raw: &[u8; BMP_HEADER_SIZE], at: usize) -> u16 {
    u16::from_le_bytes([raw[at], raw[at + 1]])
}

fn read_u32(raw: &[u8; BMP_HEADER_SIZE], at: usize) -> u32 {
    u32::from_le_bytes([raw[at], raw[at + 1], raw[at + 2], raw[at + 3]])
}

fn read_i32(raw: &[u8; BMP_HEADER_SIZE], at: usize) -> i32 {
    read_u32(raw, at) as i32
}

fn write_field(raw: &mut [u8; BMP_HEADER_SIZE], at: usize, field: &[u8]) {
    raw[at..at + field.len()].copy_from_slice(field);
}
