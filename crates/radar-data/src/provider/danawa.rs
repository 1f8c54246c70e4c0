//! 다나와 자동차 크롤러.
//!
//! 다나와 자동차의 월간 모델별 판매 실적 페이지를 파싱합니다.
//!
//! ## 데이터 소스
//! - `/auto/?Month={YYYY-MM}-00&Nation={domestic|export}&Tab=Model&Work=record`
//!
//! ## 파싱 규칙
//! - 클래스에 `model`이 포함된 `tr` 행 (최대 100개)
//! - `td.rank`: 순위, `a.name`: 모델명, `span.maker`: 제조사, `td.num`: 판매량
//! - 행 텍스트의 첫 `+1,234 (12.3%)` 형태에서 전월 대비 증감
//!
//! ## 사용 예시
//! ```rust,ignore
//! let fetcher = DanawaFetcher::new(&DanawaConfig::default())?;
//! let rows = fetcher.fetch_rows(Nation::Domestic, &Month::parse("2025-03")?).await?;
//! println!("1위: {}", rows[0].model_name);
//! ```

use async_trait::async_trait;
use radar_core::{source_url, DanawaConfig, Month, Nation, RawRecord, ScrapedRow};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use super::{DataProvider, DataSource};
use crate::error::{DataError, Result};

/// 한 페이지에서 읽는 최대 모델 수.
pub const MAX_MODEL_ROWS: usize = 100;

const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7";

/// 다나와 자동차 크롤러
pub struct DanawaFetcher {
    client: Client,
    base_url: String,
}

impl DanawaFetcher {
    /// 설정으로 생성
    pub fn new(config: &DanawaConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| DataError::Config(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// 기준 URL 반환
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 판매 실적 페이지 URL
    pub fn url(&self, nation: Nation, month: &Month) -> String {
        source_url(&self.base_url, nation, month)
    }

    /// 판매 실적 페이지를 받아 행을 파싱합니다.
    ///
    /// 파싱된 행이 없으면 [`DataError::NoData`]를 반환합니다.
    pub async fn fetch_rows(&self, nation: Nation, month: &Month) -> Result<Vec<ScrapedRow>> {
        let url = self.url(nation, month);
        debug!(url = %url, "다나와 판매 실적 요청");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let html = response.text().await?;
        let rows = parse_model_rows(&html)?;

        if rows.is_empty() {
            return Err(DataError::NoData {
                nation,
                month: month.clone(),
            });
        }

        info!(nation = %nation, month = %month, count = rows.len(), "다나와 판매 실적 파싱 완료");
        Ok(rows)
    }
}

#[async_trait]
impl DataProvider for DanawaFetcher {
    fn name(&self) -> &'static str {
        "danawa"
    }

    fn source(&self) -> DataSource {
        DataSource::Live
    }

    async fn provide(&self, nation: Nation, month: &Month) -> Result<Vec<RawRecord>> {
        let rows = self.fetch_rows(nation, month).await?;
        Ok(rows.into_iter().map(RawRecord::Scraped).collect())
    }
}

/// 행 파싱에 쓰는 셀렉터 묶음.
struct RowSelectors {
    row: Selector,
    rank: Selector,
    name: Selector,
    maker: Selector,
    sales: Selector,
}

impl RowSelectors {
    fn new() -> Result<Self> {
        let parse = |s: &str| {
            Selector::parse(s).map_err(|e| DataError::Parse(format!("셀렉터 오류 ({}): {}", s, e)))
        };

        Ok(Self {
            row: parse("tr[class*='model']")?,
            rank: parse("td[class*='rank']")?,
            name: parse("a[class*='name']")?,
            maker: parse("span[class*='maker']")?,
            sales: parse("td[class*='num']")?,
        })
    }
}

/// 판매 실적 HTML에서 모델 행을 추출합니다.
///
/// 순위나 모델명이 없는 행은 건너뜁니다.
pub fn parse_model_rows(html: &str) -> Result<Vec<ScrapedRow>> {
    let selectors = RowSelectors::new()?;
    let document = Html::parse_document(html);

    let rows = document
        .select(&selectors.row)
        .filter_map(|tr| parse_row(&selectors, tr))
        .take(MAX_MODEL_ROWS)
        .collect();

    Ok(rows)
}

fn parse_row(selectors: &RowSelectors, tr: ElementRef<'_>) -> Option<ScrapedRow> {
    let rank = tr
        .select(&selectors.rank)
        .find_map(|td| parse_rank(&element_text(td)))?;

    let model_name = tr
        .select(&selectors.name)
        .map(element_text)
        .find(|name| !name.is_empty())?;

    let manufacturer = tr
        .select(&selectors.maker)
        .map(element_text)
        .find(|maker| !maker.is_empty());

    let sales = tr
        .select(&selectors.sales)
        .find_map(|td| parse_sales(&element_text(td)));

    let momentum_absolute = parse_change(&tr.text().collect::<String>());

    Some(ScrapedRow {
        rank,
        model_name,
        manufacturer,
        sales,
        momentum_absolute,
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

// ==================== 파싱 유틸리티 함수 ====================

/// 순위 파싱 (숫자만)
///
/// "12" -> 12
fn parse_rank(text: &str) -> Option<u32> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// 판매량 파싱 (쉼표 제거)
///
/// "12,345" -> 12345
fn parse_sales(text: &str) -> Option<u64> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == ',') {
        return None;
    }

    let cleaned: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    cleaned.parse().ok()
}

/// 전월 대비 증감 파싱
///
/// 텍스트에서 처음 나오는 `<부호 있는 숫자> (<부호 있는 소수>%)` 형태의 앞 숫자를 읽습니다.
///
/// "판매 1,234 +120 (10.8%)" -> 120
fn parse_change(text: &str) -> Option<i64> {
    let chars: Vec<char> = text.chars().collect();
    (0..chars.len()).find_map(|start| match_change_at(&chars, start))
}

fn match_change_at(chars: &[char], start: usize) -> Option<i64> {
    let mut i = start;

    // 증감 숫자
    let negative = match chars.get(i) {
        Some('-') => {
            i += 1;
            true
        }
        Some('+') => {
            i += 1;
            false
        }
        _ => false,
    };
    let digits_start = i;
    while matches!(chars.get(i), Some(c) if c.is_ascii_digit() || *c == ',') {
        i += 1;
    }
    if i == digits_start {
        return None;
    }
    let number: String = chars[digits_start..i]
        .iter()
        .filter(|c| c.is_ascii_digit())
        .collect();

    while matches!(chars.get(i), Some(c) if c.is_whitespace()) {
        i += 1;
    }

    // 괄호 안의 증감률
    if chars.get(i) != Some(&'(') {
        return None;
    }
    i += 1;
    if matches!(chars.get(i), Some('+') | Some('-')) {
        i += 1;
    }
    let pct_start = i;
    while matches!(chars.get(i), Some(c) if c.is_ascii_digit() || *c == '.') {
        i += 1;
    }
    if i == pct_start {
        return None;
    }
    if chars.get(i) == Some(&'%') {
        i += 1;
    }
    if chars.get(i) != Some(&')') {
        return None;
    }

    let value: i64 = number.parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r##"
        <table>
          <tr class="model_row">
            <td class="rank">1</td>
            <td><a class="name" href="#">그랜저</a><span class="maker">현대</span></td>
            <td class="num">9,876</td>
            <td class="change">+1,234 (14.3%)</td>
          </tr>
          <tr class="model_row">
            <td class="rank">2</td>
            <td><a class="name" href="#"> 쏘렌토 </a></td>
            <td class="num">8,100</td>
            <td class="change">-450 (-5.3%)</td>
          </tr>
          <tr class="model_row">
            <td class="rank">-</td>
            <td><a class="name" href="#">순위없음</a></td>
          </tr>
          <tr class="header"><td class="rank">99</td><td><a class="name">헤더</a></td></tr>
        </table>
    "##;

    #[test]
    fn test_parse_model_rows() {
        let rows = parse_model_rows(SAMPLE_HTML).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].model_name, "그랜저");
        assert_eq!(rows[0].manufacturer.as_deref(), Some("현대"));
        assert_eq!(rows[0].sales, Some(9876));
        assert_eq!(rows[0].momentum_absolute, Some(1234));

        assert_eq!(rows[1].model_name, "쏘렌토");
        assert_eq!(rows[1].manufacturer, None);
        assert_eq!(rows[1].momentum_absolute, Some(-450));
    }

    #[test]
    fn test_parse_empty_page() {
        assert!(parse_model_rows("<html><body>점검 중</body></html>")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_row_limit() {
        let body: String = (1..=120)
            .map(|i| {
                format!(
                    r#"<tr class="model"><td class="rank">{}</td><td><a class="name">M{}</a></td></tr>"#,
                    i, i
                )
            })
            .collect();
        let rows = parse_model_rows(&format!("<table>{}</table>", body)).unwrap();
        assert_eq!(rows.len(), MAX_MODEL_ROWS);
    }

    #[test]
    fn test_parse_sales() {
        assert_eq!(parse_sales("1,234,567"), Some(1234567));
        assert_eq!(parse_sales("56"), Some(56));
        assert_eq!(parse_sales("1.5만"), None);
        assert_eq!(parse_sales(""), None);
    }

    #[test]
    fn test_parse_change() {
        assert_eq!(parse_change("+1,234 (14.3%)"), Some(1234));
        assert_eq!(parse_change("전월 -80(-2%)"), Some(-80));
        assert_eq!(parse_change("3 (+0.5)"), Some(3));
        assert_eq!(parse_change("1,234 대"), None);
        assert_eq!(parse_change("(12%)"), None);
    }

    #[tokio::test]
    #[ignore] // 실제 네트워크 테스트는 ignore
    async fn test_fetch_live_domestic() {
        let fetcher = DanawaFetcher::new(&DanawaConfig::default()).unwrap();
        let month = Month::parse("2025-01").unwrap();

        match fetcher.fetch_rows(Nation::Domestic, &month).await {
            Ok(rows) => {
                println!("다나와 국산차 {}:", month);
                for row in rows.iter().take(5) {
                    println!("  {} {} {:?}", row.rank, row.model_name, row.sales);
                }
                assert!(!rows.is_empty());
            }
            Err(e) => {
                eprintln!("오류: {}", e);
            }
        }
    }
}
