//! 주가 분석 CLI.
//!
//! 데이터 수집 계층이 저장한 가격 이력 파일을 읽어 지표와 종합 평가를 출력합니다.
//! 네트워크 요청은 하지 않습니다.
//!
//! # 사용 예시
//!
//! ```bash
//! # 종합 분석 (사람이 읽기 쉬운 형식)
//! insight analyze data/aapl.csv
//!
//! # 재현 가능한 JSON 출력
//! insight analyze data/aapl.json --format json --seed 42
//!
//! # 지표 스냅샷만 출력
//! insight indicators data/aapl.csv
//!
//! # 설정 파일 지정
//! insight --config config/default.toml analyze data/aapl.csv
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use insight_cli::commands::analyze::{self, AnalyzeCliConfig, OutputFormat};
use insight_cli::commands::indicators;
use insight_core::{init_logging, AppConfig};

#[derive(Parser)]
#[command(name = "insight")]
#[command(about = "Stock insight CLI - 기술적 지표 및 종합 평가", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (기본: config/default.toml, 없으면 기본값)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 가격 이력 파일 종합 분석 (지표 → 평가 → 예측)
    Analyze {
        /// 가격 이력 파일 (CSV 또는 JSON)
        file: PathBuf,

        /// 출력 형식 (pretty, json)
        #[arg(short, long, default_value = "pretty")]
        format: String,

        /// 난수 시드 (지정하면 합성 점수와 예측이 재현 가능)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// 지표 스냅샷만 계산
    Indicators {
        /// 가격 이력 파일 (CSV 또는 JSON)
        file: PathBuf,

        /// 출력 형식 (pretty, json)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
}

fn main() -> anyhow::Result<()> {
    // .env 파일은 선택 사항
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let app_config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AppConfig::load_default().context("Failed to load default config")?,
    };

    init_logging(&app_config.logging).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Analyze { file, format, seed } => {
            let format = OutputFormat::parse(&format)?;
            let config = AnalyzeCliConfig {
                input: file,
                format,
                seed,
                analysis: app_config.analysis.clone(),
            };

            info!(input = %config.input.display(), ?seed, "Running analysis");

            match analyze::run_analyze(&config) {
                Ok(report) => {
                    println!("{}", analyze::render(&report, config.format)?);
                }
                Err(e) => {
                    error!("Analysis failed: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::Indicators { file, format } => {
            let format = OutputFormat::parse(&format)?;
            let snapshot = indicators::run_indicators(&file, &app_config.analysis)?;
            println!("{}", indicators::render(&snapshot, format)?);
        }
    }

    Ok(())
}
