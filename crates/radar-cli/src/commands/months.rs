//! 선택 가능한 월 목록 출력.

use radar_core::AvailableMonths;
use radar_data::RadarService;

/// 월 목록을 출력합니다. 최신 월에 `*`를 붙입니다.
pub fn print_months(service: &RadarService) {
    println!("{}", format_months(&service.months()));
}

fn format_months(available: &AvailableMonths) -> String {
    available
        .months
        .iter()
        .map(|month| {
            if *month == available.latest_month {
                format!("{} *", month)
            } else {
                month.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
