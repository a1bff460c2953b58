//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::{DEFAULT_FIXTURE, DEFAULT_OUTPUT, FIXTURE_SIZE};
use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无压缩的 24/32 位 BMP 图像中隐藏或提取文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无压缩的 24/32 位 BMP 图像中隐藏或提取文本。"
)]
pub struct Cli {
    /// 输出调试信息 (等价于 RUST_LOG=debug)。
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在 BMP 图像中隐藏一段文本。
    Hide(HideArgs),

    /// 从经过隐写的 BMP 图像中提取隐藏的文本。
    Extract(ExtractArgs),

    /// 生成一幅纯红色的 24 位测试图像。
    Fixture(FixtureArgs),

    /// 显示图像可容纳的最大消息长度。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入 BMP 图像路径。
    pub image: PathBuf,

    /// 要隐藏的文本。
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    pub message: Option<String>,

    /// 从文件读取要隐藏的内容，代替 MESSAGE。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 结果图像的保存路径，已存在时会被覆盖。
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 已隐藏文本的 BMP 图像路径。
    pub image: PathBuf,

    /// 同时将提取出的原始字节写入该文件。
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// 'fixture' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct FixtureArgs {
    /// 测试图像的保存路径。
    #[arg(short, long, default_value = DEFAULT_FIXTURE)]
    pub output: PathBuf,

    /// 图像宽度 (像素)。
    #[arg(long, default_value_t = FIXTURE_SIZE)]
    pub width: u32,

    /// 图像高度 (像素)。
    #[arg(long, default_value_t = FIXTURE_SIZE)]
    pub height: u32,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要检查的 BMP 图像路径。
    pub image: PathBuf,
}
