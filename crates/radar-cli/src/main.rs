//! 상승 모델 레이더 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 2025년 3월 국산차 상승 모델
//! radar rank -m 2025-03 -n domestic
//!
//! # 수입차, 신규 진입 제외, CSV 출력
//! radar rank -m 2025-03 -n import --exclude-new -f csv
//!
//! # 네트워크 없이 합성 데이터로 조회
//! radar rank -m 2025-03 -n domestic --synthetic
//!
//! # 선택 가능한 월 목록
//! radar months
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use radar_core::logging::{init_logging, LogConfig, LogFormat};
use radar_core::{AppConfig, DisplayFilter, Month, Nation};
use radar_data::RadarService;
use tracing::info;

mod commands;

use commands::months::print_months;
use commands::rank::{rank, OutputFormat, RankConfig};

#[derive(Parser)]
#[command(name = "radar")]
#[command(about = "Rising models radar - 다나와 월간 판매 급상승 모델", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 점수 순 상승 모델 목록
    Rank {
        /// 집계 월 (YYYY-MM)
        #[arg(short, long)]
        month: String,

        /// 국가 구분 (domestic, import)
        #[arg(short, long, default_value = "domestic")]
        nation: String,

        /// 최소 판매량 (기본: 설정 파일 값)
        #[arg(long)]
        min_sales: Option<u64>,

        /// 신규 진입 모델 제외
        #[arg(long, default_value = "false")]
        exclude_new: bool,

        /// 최대 표시 개수 (기본: 설정 파일 값)
        #[arg(short, long)]
        limit: Option<usize>,

        /// 출력 형식 (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// 출력 파일 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// 다나와 수집 없이 합성 데이터만 사용
        #[arg(long, default_value = "false")]
        synthetic: bool,
    },

    /// 선택 가능한 월 목록 (최신 월에 * 표시)
    Months,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config: {}", cli.config))?;

    // CLI는 stdout을 결과 출력에 쓰므로 기본 레벨을 낮게 유지
    let format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse::<LogFormat>().ok())
        .unwrap_or(LogFormat::Compact);
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    init_logging(LogConfig::new(level).with_format(format))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Rank {
            month,
            nation,
            min_sales,
            exclude_new,
            limit,
            format,
            output,
            synthetic,
        } => {
            let month = Month::parse(&month)?;
            let nation: Nation = nation.parse()?;
            let format = OutputFormat::parse(&format)?;

            if synthetic {
                config.danawa.enabled = false;
            }

            let defaults = DisplayFilter::from(&config.filter);
            let filter = DisplayFilter {
                min_sales: min_sales.unwrap_or(defaults.min_sales),
                exclude_new_entries: exclude_new || defaults.exclude_new_entries,
                limit: limit.unwrap_or(defaults.limit),
            };

            let service = RadarService::from_config(&config)
                .context("Failed to initialize radar service")?;
            info!(mode = %service.provider_mode(), "Radar service ready");

            let shown = rank(
                &service,
                RankConfig {
                    nation,
                    month,
                    filter,
                    format,
                    output,
                },
            )
            .await?;
            info!(shown, "Rank completed");
        }

        Commands::Months => {
            config.danawa.enabled = false;
            let service = RadarService::from_config(&config)
                .context("Failed to initialize radar service")?;
            print_months(&service);
        }
    }

    Ok(())
}
