use clap::Parser;

use bmp_lsb::{
    cli::{Cli, Commands},
    handler::{handle_capacity, handle_extract, handle_fixture, handle_hide},
};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并根据指定的子命令
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Hide(args) => handle_hide(args),
        Commands::Extract(args) => handle_extract(args),
        Commands::Fixture(args) => handle_fixture(args),
        Commands::Capacity(args) => handle_capacity(args),
    }
}
