//! # 像素缓冲区模块
//!
//! `PixelGrid` 以行优先顺序保存整幅图像的 RGBA 像素，是编解码器与隐写算法之间唯一的数据载体。

use crate::error::FormatError;

/// 单个像素，四个通道按 `[r, g, b, a]` 的固定顺序存放。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel(pub [u8; 4]);

impl Pixel {
    /// 不透明像素，alpha 取 255。
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, u8::MAX])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub const fn r(&self) -> u8 {
        self.0[0]
    }

    pub const fn g(&self) -> u8 {
        self.0[1]
    }

    pub const fn b(&self) -> u8 {
        self.0[2]
    }

    pub const fn a(&self) -> u8 {
        self.0[3]
    }
}

/// 宽 × 高个像素组成的连续缓冲区，按存储顺序逐行排列。
///
/// 构造时保证 `width > 0`、`height > 0`，且两者都能放进 `i32`，
/// 因此编码为 BMP 时不会失败。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// 由已有的像素数据构造。
    ///
    /// # Errors
    ///
    /// * 尺寸为零或超出 `i32::MAX` 时返回 `FormatError::InvalidDimensions`。
    /// * `pixels.len()` 不等于 `width * height` 时返回 `FormatError::PixelCountMismatch`。
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, FormatError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(FormatError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// 构造一幅所有像素都相同的图像。
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self, FormatError> {
        let count = pixel_count(width, height)?;
        Self::from_pixels(width, height, vec![pixel; count])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// 所有像素的 alpha 均为 255。
    pub fn is_opaque(&self) -> bool {
        self.pixels.iter().all(|pixel| pixel.a() == u8::MAX)
    }

    /// 按行迭代像素，顺序与存储顺序一致。
    pub fn rows(&self) -> std::slice::ChunksExact<'_, Pixel> {
        self.pixels.chunks_exact(self.width as usize)
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize, FormatError> {
    let limit = i32::MAX as u32;
    let invalid = || FormatError::InvalidDimensions {
        width: width.into(),
        height: height.into(),
    };

    if width == 0 || height == 0 || width > limit || height > limit {
        return Err(invalid());
    }

    (width as usize).checked_mul(height as usize).ok_or_else(invalid)
}
