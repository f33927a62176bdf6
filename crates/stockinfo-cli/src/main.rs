//! KRX 상장 종목 주가 조회 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # NAVER 2019-01-01 ~ 2021-12-31 주가 (기본값)
//! stockinfo fetch
//!
//! # 코스닥 종목, 기간 지정, 차트 생략
//! stockinfo fetch -m kosdaq -c 카카오게임즈 -f 2021-01-01 -t 2021-06-30 --no-chart
//!
//! # 회사명 → 티커
//! stockinfo ticker -c 삼성전자
//!
//! # 상장 종목 검색
//! stockinfo list -m kospi -s 삼성 --format csv
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stockinfo_core::{init_logging, parse_date, AppConfig, DateRange, LogConfig, MarketSelector};
use stockinfo_data::{KindListingResolver, TickerMapper, YahooPriceProvider};
use tracing::{error, info};

use stockinfo_cli::commands::fetch::{resolve_output_dir, run_fetch, FetchConfig};
use stockinfo_cli::commands::list::{list_symbols, ListConfig, OutputFormat};
use stockinfo_cli::commands::ticker::show_ticker;

#[derive(Parser)]
#[command(name = "stockinfo")]
#[command(about = "KRX 상장 종목 주가 조회 - KIND 종목 목록 + Yahoo Finance", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = "config/default.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 회사명으로 주가 조회 후 차트, CSV, 엑셀 저장
    Fetch {
        /// 시장 (kospi, kosdaq)
        #[arg(short, long)]
        market: Option<String>,

        /// 회사명 (KIND 목록과 정확히 일치)
        #[arg(short, long)]
        company: Option<String>,

        /// 시작 날짜 (YYYY-MM-DD)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 종료 날짜 (YYYY-MM-DD, 포함)
        #[arg(short, long)]
        to: Option<String>,

        /// 출력 디렉토리
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// 화면에 표시할 행 수
        #[arg(long)]
        rows: Option<usize>,

        /// 차트 생략
        #[arg(long, default_value = "false")]
        no_chart: bool,
    },

    /// 회사명 → Yahoo Finance 티커
    Ticker {
        /// 회사명
        #[arg(short, long)]
        company: String,

        /// 시장 (kospi, kosdaq)
        #[arg(short, long)]
        market: Option<String>,
    },

    /// 상장 종목 목록
    List {
        /// 시장 (all, kospi, kosdaq)
        #[arg(short, long, default_value = "all")]
        market: String,

        /// 검색 키워드 (회사명 또는 종목코드)
        #[arg(short, long)]
        search: Option<String>,

        /// 출력 형식 (table, csv, json)
        #[arg(long, default_value = "table")]
        format: String,

        /// 최대 결과 수 (0이면 제한 없음)
        #[arg(long, default_value = "0")]
        limit: usize,

        /// 출력 파일 경로
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일은 없어도 됨
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let app_config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config: {}", cli.config.display()))?;

    init_logging(LogConfig::from_settings(&app_config.logging))
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    let result = run(cli.command, app_config).await;

    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }
    result
}

async fn run(command: Commands, app_config: AppConfig) -> Result<()> {
    match command {
        Commands::Fetch {
            market,
            company,
            from,
            to,
            output_dir,
            rows,
            no_chart,
        } => {
            let defaults = &app_config.defaults;
            let market: MarketSelector = market
                .as_deref()
                .unwrap_or(&defaults.market)
                .parse()?;
            let company = company.unwrap_or_else(|| defaults.company.clone());

            let start = from.as_deref().map(parse_date).transpose()?;
            let end = to.as_deref().map(parse_date).transpose()?;
            let range = DateRange::new(
                start.unwrap_or(defaults.start),
                end.unwrap_or(defaults.end),
            )?;

            let mut export = app_config.export.clone();
            if let Some(rows) = rows {
                export.preview_rows = rows;
            }

            let config = FetchConfig {
                company,
                market,
                range,
                output_dir: resolve_output_dir(output_dir.as_deref(), &export),
                export,
                chart: (!no_chart).then(|| app_config.chart.clone()),
            };

            let mapper = TickerMapper::new(KindListingResolver::new(app_config.listing.clone())?);
            let provider = YahooPriceProvider::new(&app_config.provider)?;

            let outcome = run_fetch(&config, &mapper, &provider).await?;
            info!(
                ticker = %outcome.ticker,
                rows = outcome.rows,
                "Fetch completed"
            );
        }

        Commands::Ticker { company, market } => {
            let market: MarketSelector = market
                .as_deref()
                .unwrap_or(&app_config.defaults.market)
                .parse()?;

            let mapper = TickerMapper::new(KindListingResolver::new(app_config.listing.clone())?);
            show_ticker(&company, market, &mapper).await?;
        }

        Commands::List {
            market,
            search,
            format,
            limit,
            output,
        } => {
            let config = ListConfig {
                market: market.parse()?,
                search,
                format: OutputFormat::parse(&format)?,
                output,
                limit,
            };

            let resolver = KindListingResolver::new(app_config.listing.clone())?;
            let count = list_symbols(&config, &resolver).await?;
            info!("Listed {} symbols", count);
        }
    }

    Ok(())
}
