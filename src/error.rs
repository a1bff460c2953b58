//! # 错误类型模块
//!
//! 核心算法返回的强类型错误。命令处理层 (`handler`) 再用 `anyhow` 为其附加上下文。

use std::fmt;

/// 解析或构造位图时可能出现的格式错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// 输入在读取到所需字节之前就结束了。
    Truncated { needed: usize, actual: usize },
    /// 前两个字节不是 `BM`。
    BadSignature([u8; 2]),
    /// 仅支持 24 位和 32 位的位图。
    UnsupportedDepth(u16),
    /// 宽或高为零 (或宽为负数)，或超出了 `i32` 的表示范围。
    InvalidDimensions { width: i64, height: i64 },
    /// 像素缓冲区的长度与 `width * height` 不符。
    PixelCountMismatch { expected: usize, actual: usize },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { needed, actual } => write!(
                f,
                "BMP data is truncated: needed {needed} bytes, found {actual}"
            ),
            Self::BadSignature(sig) => write!(
                f,
                "Not a valid BMP file (signature {:02X} {:02X})",
                sig[0], sig[1]
            ),
            Self::UnsupportedDepth(bpp) => write!(
                f,
                "Only 24-bit and 32-bit BMP files are supported (found {bpp}-bit)"
            ),
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid image dimensions: {width}x{height}")
            }
            Self::PixelCountMismatch { expected, actual } => write!(
                f,
                "Pixel buffer holds {actual} pixels, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for FormatError {}

/// 载荷 (长度前缀 + 消息) 超出了图像可用的通道容量。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    pub required_bits: usize,
    pub available_bits: usize,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message too long for image: requires {} bits, {} available",
            self.required_bits, self.available_bits
        )
    }
}

impl std::error::Error for CapacityError {}
