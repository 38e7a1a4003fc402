use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use anyhow::Result;

use java_insight::cli::{self, Command, EXIT_FATAL};

/// Java Insight - 结构与复杂度分析
///
/// 默认输出人类可读的 Markdown，--json 输出完整 JSON 报告
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 日志级别 (RUST_LOG 优先)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// 输出 JSON 格式 (默认输出人类可读的 Markdown)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 日志只写 stderr，stdout 留给报告
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli::handle_command(args.command, args.json) {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{e:#}");
            std::process::exit(EXIT_FATAL);
        }
    }
}
