//! # bmp_lsb 库
//!
//! 本库包含 BMP 编解码与 LSB 隐写的核心逻辑。

// 声明库包含的所有模块。

pub mod bmp;
pub mod channel;
pub mod cli;
pub mod constants;
pub mod error;
pub mod fixture;
pub mod handler;
pub mod pixel;
pub mod steganography;
