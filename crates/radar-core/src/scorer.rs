//! 상승 모델 점수 계산.
//!
//! 판매량이 증가한 모델(후보)만을 모집단으로 세 신호를 표준화(z-score)한 뒤
//! 가중합하여 점수를 매기고, 점수 내림차순으로 안정 정렬합니다.
//!
//! | 신호 | 가중치 |
//! |------|--------|
//! | 판매 증감 (대수) | 0.55 |
//! | 판매 증감률 | 0.35 |
//! | 순위 변동 | 0.10 |
//!
//! 판매량이 늘지 않은 모델은 [`SENTINEL_SCORE`]를 받아 항상 후보 뒤에 놓입니다.
//! 후보가 하나도 없으면 판매량 내림차순으로 정렬합니다.

use std::cmp::Ordering;

use crate::domain::SalesRecord;

/// 상승 후보가 아닌 모델의 점수.
pub const SENTINEL_SCORE: f64 = -999.0;

/// 신호별 가중치.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// 판매 증감 (대수)
    pub absolute: f64,
    /// 판매 증감률
    pub percent: f64,
    /// 순위 변동
    pub rank_delta: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            absolute: 0.55,
            percent: 0.35,
            rank_delta: 0.10,
        }
    }
}

/// 모집단 평균/표준편차 (N으로 나눔).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standardizer {
    mean: f64,
    std_dev: f64,
}

impl Standardizer {
    /// 값 목록으로 평균과 표준편차를 구합니다. 빈 목록이면 (0, 0).
    pub fn fit(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
            };
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// z-score. 표준편차가 0이면 0.
    pub fn z(&self, value: f64) -> f64 {
        if self.std_dev == 0.0 {
            0.0
        } else {
            (value - self.mean) / self.std_dev
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

/// 상승 점수 계산기.
#[derive(Debug, Clone, Default)]
pub struct MomentumScorer {
    weights: ScoreWeights,
}

/// 점수 내림차순. NaN은 맨 뒤.
fn by_score_desc(a: &SalesRecord, b: &SalesRecord) -> Ordering {
    match (a.score.is_nan(), b.score.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal),
    }
}

impl MomentumScorer {
    /// 기본 가중치(0.55 / 0.35 / 0.10)로 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 가중치를 지정해 생성합니다.
    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// 점수를 매기고 정렬된 목록을 반환합니다.
    ///
    /// 입력 순서가 같은 점수끼리의 순서를 결정합니다 (안정 정렬).
    pub fn score(&self, mut records: Vec<SalesRecord>) -> Vec<SalesRecord> {
        let candidates: Vec<&SalesRecord> = records.iter().filter(|r| r.is_rising()).collect();

        if candidates.is_empty() {
            for record in records.iter_mut() {
                record.score = SENTINEL_SCORE;
            }
            records.sort_by(|a, b| b.current_sales.cmp(&a.current_sales));
            return records;
        }

        let absolute = Standardizer::fit(
            &candidates
                .iter()
                .map(|r| r.momentum_absolute as f64)
                .collect::<Vec<_>>(),
        );
        let percent = Standardizer::fit(
            &candidates
                .iter()
                .map(|r| r.momentum_percent)
                .collect::<Vec<_>>(),
        );
        let rank_delta = Standardizer::fit(
            &candidates
                .iter()
                .map(|r| r.rank_delta as f64)
                .collect::<Vec<_>>(),
        );

        for record in records.iter_mut() {
            record.score = if record.is_rising() {
                self.weights.absolute * absolute.z(record.momentum_absolute as f64)
                    + self.weights.percent * percent.z(record.momentum_percent)
                    + self.weights.rank_delta * rank_delta.z(record.rank_delta as f64)
            } else {
                SENTINEL_SCORE
            };
        }

        records.sort_by(by_score_desc);
        records
    }
}
