//! 상승 모델 순위 조회 기능.

use anyhow::{Context, Result};
use radar_core::{DisplayFilter, Month, Nation, SalesRecord};
use radar_data::RadarService;
use std::fs::File;
use std::io::Write;
use tracing::info;

/// 순위 조회 설정.
#[derive(Debug)]
pub struct RankConfig {
    /// 국가 구분
    pub nation: Nation,
    /// 집계 월
    pub month: Month,
    /// 화면 필터
    pub filter: DisplayFilter,
    /// 출력 형식
    pub format: OutputFormat,
    /// 출력 파일 경로
    pub output: Option<String>,
}

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!(
                "Invalid format: {}. Use: table, csv, json",
                s
            )),
        }
    }
}

/// 레이더 순위를 조회해 필터를 적용하고 출력합니다.
///
/// 출력한 모델 수를 반환합니다.
pub async fn rank(service: &RadarService, config: RankConfig) -> Result<usize> {
    let report = service
        .radar_report(config.nation, &config.month)
        .await
        .with_context(|| format!("Failed to fetch radar for {} {}", config.nation, config.month))?;
    let source = report
        .source
        .map(|s| s.to_string())
        .unwrap_or_else(|| "cache".to_string());
    let response = report.response;

    let shown = config.filter.apply(&response.models);
    info!(
        total = response.total_count,
        shown = shown.len(),
        source = %source,
        "Radar loaded"
    );

    let content = match config.format {
        OutputFormat::Table => format_table(&shown, &response.last_updated, &source),
        OutputFormat::Csv => format_csv(&shown),
        OutputFormat::Json => format_json(&shown)?,
    };

    // 파일 또는 stdout에 출력
    if let Some(path) = config.output.as_deref() {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path))?;
        file.write_all(content.as_bytes())
            .context("Failed to write to file")?;
        info!("Output written to: {}", path);
    } else {
        println!("{}", content);
    }

    Ok(shown.len())
}

/// 테이블 형식 출력.
fn format_table(records: &[SalesRecord], last_updated: &str, source: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<5} {:<24} {:<12} {:>8} {:>8} {:>8} {:>8} {:>6} {:>8}\n",
        "RANK", "MODEL", "MAKER", "SALES", "PREV", "MOM", "MOM%", "RANKΔ", "SCORE"
    ));
    output.push_str(&"-".repeat(95));
    output.push('\n');

    for record in records {
        let model = if record.is_new_entry {
            format!("{} [NEW]", record.model_name)
        } else {
            record.model_name.clone()
        };
        output.push_str(&format!(
            "{:<5} {:<24} {:<12} {:>8} {:>8} {:>+8} {:>7.1}% {:>+6} {:>8.3}\n",
            record.rank,
            truncate(&model, 24),
            truncate(&record.manufacturer, 12),
            record.current_sales,
            record.previous_sales,
            record.momentum_absolute,
            record.momentum_percent * 100.0,
            record.rank_delta,
            record.score
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "Total: {} models (updated {}, source: {})",
        records.len(),
        last_updated,
        source
    ));

    output
}

/// CSV 형식 출력.
fn format_csv(records: &[SalesRecord]) -> String {
    let mut output = String::new();

    output.push_str(
        "rank,model_name,manufacturer,sales,prev_sales,mom_abs,mom_pct,rank_change,score,is_new\n",
    );

    for record in records {
        output.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            record.rank,
            escape_csv(&record.model_name),
            escape_csv(&record.manufacturer),
            record.current_sales,
            record.previous_sales,
            record.momentum_absolute,
            record.momentum_percent,
            record.rank_delta,
            record.score,
            record.is_new_entry
        ));
    }

    output
}

/// JSON 형식 출력.
fn format_json(records: &[SalesRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize to JSON")
}

/// 문자열 자르기 (UTF-8 안전).
fn truncate(s: &str, max_len: usize) -> String {
    // 문자 수로 계산 (바이트가 아님)
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// CSV 이스케이프 (콤마나 따옴표 포함 시 따옴표로 감싸기).
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rank: u32, name: &str, sales: u64) -> SalesRecord {
        SalesRecord {
            id: format!("domestic-2025-03-{}", rank),
            rank,
            previous_rank: Some(rank + 1),
            model_name: name.to_string(),
            manufacturer: "현대".to_string(),
            current_sales: sales,
            previous_sales: sales - 100,
            momentum_absolute: 100,
            momentum_percent: 0.1,
            rank_delta: 1,
            score: 0.5,
            is_new_entry: false,
            nation: Nation::Domestic,
            month: Month::parse("2025-03").unwrap(),
            source_url: "https://auto.danawa.com/auto/".to_string(),
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("TABLE").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("csv").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::parse("xml").is_err());
    }

    #[test]
    fn test_format_csv_escapes_names() {
        let csv = format_csv(&[record(1, "그랜저, 하이브리드", 5000)]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("1,\"그랜저, 하이브리드\",현대,5000,4900,100,"));
    }

    #[test]
    fn test_format_table_summary() {
        let table = format_table(
            &[record(1, "쏘렌토", 8000)],
            "2025년 4월 1일 오전 09:00",
            "synthetic",
        );
        assert!(table.contains("쏘렌토"));
        assert!(table.ends_with("Total: 1 models (updated 2025년 4월 1일 오전 09:00, source: synthetic)"));
    }

    #[test]
    fn test_truncate_utf8() {
        assert_eq!(truncate("가나다라마바사", 5), "가나...");
        assert_eq!(truncate("K5", 5), "K5");
    }
}
