//! # 命令处理逻辑模块
//!
//! 包含处理各个子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用编解码与隐写核心函数以及向用户报告结果。

use crate::bmp::{decode, encode};
use crate::channel::capacity_bits;
use crate::cli::{CapacityArgs, ExtractArgs, FixtureArgs, HideArgs};
use crate::constants::MAX_PAYLOAD_LEN;
use crate::fixture::{FIXTURE_COLOR, solid};
use crate::pixel::PixelGrid;
use crate::steganography::{embed, extract, max_payload_len};
use anyhow::{Context, Result};
use colored::Colorize;
use log::{info, warn};
use std::fs;
use std::path::Path;

/// 读取并解码一个 BMP 文件。
///
/// # Errors
///
/// 文件无法读取或不是受支持的 BMP 格式时返回错误。
pub fn load_image(path: &Path) -> Result<PixelGrid> {
    let bytes = fs::read(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    let grid = decode(&bytes).with_context(|| {
        format!(
            "Unable to load BMP image: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    info!(
        "Loaded BMP {}: {}x{}",
        path.display(),
        grid.width(),
        grid.height()
    );
    Ok(grid)
}

/// 将图像编码为 24 位 BMP 并写入 `path`，已存在的文件会被覆盖。
pub fn save_image(path: &Path, grid: &PixelGrid) -> Result<()> {
    fs::write(path, encode(grid)).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像与消息、调用 `embed` 将消息写入像素通道，最后保存结果图像。
/// 消息过长时只报告错误，不写出任何文件，也不视为程序失败。
///
/// # Arguments
///
/// * `args` - 包含输入图像、消息来源与输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入图像。
/// * 无法读取消息文件，或消息为空。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let mut grid = load_image(&args.image)?;

    let message = match &args.text {
        Some(text) => fs::read(text).with_context(|| {
            format!(
                "Unable to read text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?,
        None => args.message.clone().unwrap_or_default().into_bytes(),
    };

    // 长度为零的载荷在提取时与"没有隐藏信息"无法区分
    anyhow::ensure!(!message.is_empty(), "The message is empty, nothing to hide.");

    if message.len() > MAX_PAYLOAD_LEN as usize {
        warn!(
            "Message is {} bytes; messages longer than {} bytes are reported as absent on extract",
            message.len(),
            MAX_PAYLOAD_LEN
        );
    }

    if let Err(err) = embed(&mut grid, &message) {
        eprintln!("{}", err.to_string().red().bold());
        return Ok(());
    }

    save_image(&args.output, &grid)?;

    println!(
        "Message hidden in {}",
        args.output.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 读取图像并提取隐藏的消息后打印出来；若没有可信的载荷，打印固定的提示文本。
///
/// # Errors
///
/// * 无法读取或解码输入图像。
/// * 指定了 `--output` 但无法写入该文件。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let grid = load_image(&args.image)?;
    let message = extract(&grid);

    println!("Hidden message: {}", String::from_utf8_lossy(&message));

    if let Some(output) = &args.output {
        fs::write(output, &message).with_context(|| {
            format!(
                "Unable to write to target text file: {}",
                output.to_string_lossy().red().bold()
            )
        })?;

        println!(
            "The message has been saved: {}",
            output.to_string_lossy().green().bold()
        );
    }

    Ok(())
}

/// 处理 'Fixture' 命令：生成纯红色的 24 位测试图像。
pub fn handle_fixture(args: FixtureArgs) -> Result<()> {
    anyhow::ensure!(
        args.width > 0 && args.height > 0,
        "Test image dimensions must be non-zero, got {}x{}",
        args.width.to_string().red().bold(),
        args.height.to_string().red().bold()
    );

    let grid = solid(args.width, args.height, FIXTURE_COLOR)
        .context("Unable to create the test image")?;

    save_image(&args.output, &grid)?;

    println!(
        "Created {}",
        args.output.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令：报告图像尺寸与可隐藏的最大消息长度。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let grid = load_image(&args.image)?;

    println!(
        "{}x{} pixels, {} bits available, up to {} message bytes",
        grid.width(),
        grid.height(),
        capacity_bits(&grid).to_string().green().bold(),
        max_payload_len(&grid).to_string().green().bold()
    );
    Ok(())
}
