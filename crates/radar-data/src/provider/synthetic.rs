//! 합성 판매 데이터.
//!
//! 실데이터를 얻지 못했을 때 사용하는 재현 가능한 데이터입니다. 같은 (국가, 월)은
//! 항상 같은 결과를 냅니다.
//!
//! - 시드: 연도 + 월 (+100, 수입차)
//! - 난수: `frac(sin(seed + n) * 10000)`
//! - 국산 판매량 1,000~9,000대, 수입 200~3,200대
//! - 전월 판매량은 이번 달의 70~130%

use async_trait::async_trait;
use radar_core::{Month, Nation, RawRecord, SyntheticRow};

use super::{DataProvider, DataSource};
use crate::error::Result;

/// 국산차 모델 목록 (모델명, 제조사).
pub const DOMESTIC_CATALOG: [(&str, &str); 25] = [
    ("그랜저", "현대"),
    ("쏘나타", "현대"),
    ("아반떼", "현대"),
    ("투싼", "현대"),
    ("싼타페", "현대"),
    ("팰리세이드", "현대"),
    ("아이오닉5", "현대"),
    ("아이오닉6", "현대"),
    ("K8", "기아"),
    ("K5", "기아"),
    ("K3", "기아"),
    ("스포티지", "기아"),
    ("쏘렌토", "기아"),
    ("카니발", "기아"),
    ("EV6", "기아"),
    ("EV9", "기아"),
    ("G80", "제네시스"),
    ("GV80", "제네시스"),
    ("G90", "제네시스"),
    ("GV70", "제네시스"),
    ("토레스", "쌍용"),
    ("티볼리", "쌍용"),
    ("레이", "기아"),
    ("모닝", "기아"),
    ("스타리아", "현대"),
];

/// 수입차 모델 목록 (모델명, 제조사).
pub const IMPORT_CATALOG: [(&str, &str); 25] = [
    ("E-Class", "Mercedes-Benz"),
    ("S-Class", "Mercedes-Benz"),
    ("GLE", "Mercedes-Benz"),
    ("C-Class", "Mercedes-Benz"),
    ("5시리즈", "BMW"),
    ("3시리즈", "BMW"),
    ("X5", "BMW"),
    ("X3", "BMW"),
    ("7시리즈", "BMW"),
    ("iX", "BMW"),
    ("A6", "Audi"),
    ("A4", "Audi"),
    ("Q5", "Audi"),
    ("Q7", "Audi"),
    ("Model Y", "Tesla"),
    ("Model 3", "Tesla"),
    ("ES", "Lexus"),
    ("RX", "Lexus"),
    ("Cayenne", "Porsche"),
    ("Macan", "Porsche"),
    ("Range Rover", "Land Rover"),
    ("XC60", "Volvo"),
    ("XC90", "Volvo"),
    ("Accord", "Honda"),
    ("CR-V", "Honda"),
];

/// 신규 진입으로 표시하는 난수 임계값.
const NEW_ENTRY_THRESHOLD: f64 = 0.95;

/// 시드 기반 의사 난수.
#[derive(Debug, Clone, Copy)]
struct SeededRandom {
    seed: f64,
}

impl SeededRandom {
    fn new(nation: Nation, month: &Month) -> Self {
        let offset = match nation {
            Nation::Domestic => 0,
            Nation::Import => 100,
        };
        Self {
            seed: f64::from(month.component_sum() + offset),
        }
    }

    /// [0, 1) 범위 값
    fn at(&self, n: usize) -> f64 {
        let x = (self.seed + n as f64).sin() * 10000.0;
        x - x.floor()
    }
}

/// 합성 데이터 Provider
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticProvider;

impl SyntheticProvider {
    pub fn new() -> Self {
        Self
    }

    /// (국가, 월)의 25개 모델 행을 생성합니다.
    pub fn generate(&self, nation: Nation, month: &Month) -> Vec<SyntheticRow> {
        let random = SeededRandom::new(nation, month);
        let (catalog, base, spread) = match nation {
            Nation::Domestic => (&DOMESTIC_CATALOG, 1000.0, 8000.0),
            Nation::Import => (&IMPORT_CATALOG, 200.0, 3000.0),
        };

        catalog
            .iter()
            .enumerate()
            .map(|(i, (model_name, manufacturer))| {
                let current_sales = (base + random.at(i) * spread).floor() as u64;
                let previous_sales =
                    (current_sales as f64 * (0.7 + random.at(i + 100) * 0.6)).floor() as u64;

                SyntheticRow {
                    rank: i as u32 + 1,
                    model_name: (*model_name).to_string(),
                    manufacturer: (*manufacturer).to_string(),
                    current_sales,
                    previous_sales,
                    is_new_entry: previous_sales == 0
                        || random.at(i + 200) > NEW_ENTRY_THRESHOLD,
                    previous_rank: (1.0 + random.at(i + 300) * 25.0).floor() as u32,
                }
            })
            .collect()
    }
}

#[async_trait]
impl DataProvider for SyntheticProvider {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn source(&self) -> DataSource {
        DataSource::Synthetic
    }

    async fn provide(&self, nation: Nation, month: &Month) -> Result<Vec<RawRecord>> {
        Ok(self
            .generate(nation, month)
            .into_iter()
            .map(RawRecord::Synthetic)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(s: &str) -> Month {
        Month::parse(s).unwrap()
    }

    #[test]
    fn test_deterministic() {
        let provider = SyntheticProvider::new();
        let a = provider.generate(Nation::Domestic, &month("2025-03"));
        let b = provider.generate(Nation::Domestic, &month("2025-03"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_catalog_and_ranges() {
        let provider = SyntheticProvider::new();

        let domestic = provider.generate(Nation::Domestic, &month("2024-11"));
        assert_eq!(domestic.len(), 25);
        assert_eq!(domestic[0].model_name, "그랜저");
        assert_eq!(domestic[24].model_name, "스타리아");
        for (i, row) in domestic.iter().enumerate() {
            assert_eq!(row.rank, i as u32 + 1);
            assert!((1000..9000).contains(&row.current_sales));
            assert!((1..=25).contains(&row.previous_rank));
            assert!(row.previous_sales as f64 >= (row.current_sales as f64 * 0.7).floor());
        }

        let import = provider.generate(Nation::Import, &month("2024-11"));
        assert_eq!(import[0].model_name, "E-Class");
        assert_eq!(import[14].manufacturer, "Tesla");
        assert!(import.iter().all(|r| (200..3200).contains(&r.current_sales)));
    }

    #[test]
    fn test_nation_changes_seed() {
        let provider = SyntheticProvider::new();
        let m = month("2025-03");
        let domestic = SeededRandom::new(Nation::Domestic, &m);
        let import = SeededRandom::new(Nation::Import, &m);

        assert_eq!(domestic.seed, 2028.0);
        assert_eq!(import.seed, 2128.0);
        let sales = |nation| -> Vec<u64> {
            provider
                .generate(nation, &m)
                .iter()
                .map(|r| r.current_sales)
                .collect()
        };
        assert_ne!(sales(Nation::Domestic), sales(Nation::Import));
    }

    #[test]
    fn test_random_in_unit_interval() {
        let random = SeededRandom::new(Nation::Domestic, &month("2025-01"));
        for n in 0..500 {
            let v = random.at(n);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[tokio::test]
    async fn test_provide_never_fails() {
        let records = SyntheticProvider::new()
            .provide(Nation::Import, &month("2023-07"))
            .await
            .unwrap();
        assert_eq!(records.len(), 25);
        assert!(records.iter().all(|r| matches!(r, RawRecord::Synthetic(_))));
    }
}
