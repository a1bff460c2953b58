//! # 测试图像生成模块
//!
//! 生成纯色的 24 位位图，供手动试验与测试使用。

use crate::constants::FIXTURE_SIZE;
use crate::error::FormatError;
use crate::pixel::{Pixel, PixelGrid};

/// 测试图像使用的纯红色。
pub const FIXTURE_COLOR: Pixel = Pixel::rgb(255, 0, 0);

/// 生成一幅纯色图像。
pub fn solid(width: u32, height: u32, pixel: Pixel) -> Result<PixelGrid, FormatError> {
    PixelGrid::filled(width, height, pixel)
}

/// 标准测试图像：100×100，纯红。
pub fn red_test_image() -> Result<PixelGrid, FormatError> {
    solid(FIXTURE_SIZE, FIXTURE_SIZE, FIXTURE_COLOR)
}
