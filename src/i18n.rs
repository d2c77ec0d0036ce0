use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Ko,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ko => "ko",
        }
    }
}

/// User-facing strings for one language.
pub struct Strings {
    /// Weekday abbreviations, Sunday first.
    pub weekdays: [&'static str; 7],
    pub holiday_tag: &'static str,
    pub holiday: &'static str,
    pub saved: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    /// Edit with nothing to change.
    pub unchanged: &'static str,
    pub no_entries: &'static str,
    pub report_copied: &'static str,
    pub report_saved_to: &'static str,
    pub loaded_from_cache: &'static str,
    pub store_unavailable: &'static str,
    pub id: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub hours: &'static str,
    pub shifts: &'static str,
    pub total_hours: &'static str,
    pub regular: &'static str,
    pub gross_pay: &'static str,
    pub deductions: &'static str,
    pub net_pay: &'static str,
    pub tips: &'static str,
    pub total_income: &'static str,
}

static EN: Strings = Strings {
    weekdays: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    holiday_tag: "[Holiday]",
    holiday: "Holiday",
    saved: "Entry saved",
    updated: "Entry updated",
    deleted: "Entry deleted",
    unchanged: "Nothing to change; entry left as is",
    no_entries: "No entries in the selected period.",
    report_copied: "Report copied to clipboard.",
    report_saved_to: "Clipboard unavailable; report saved to",
    loaded_from_cache: "Store unavailable; showing cached entries from",
    store_unavailable: "Store unavailable and no cached entries found.",
    id: "ID",
    date: "Date",
    time: "Time",
    hours: "Hours",
    shifts: "Shifts",
    total_hours: "Total Hours",
    regular: "Regular",
    gross_pay: "Gross Pay",
    deductions: "Deductions",
    net_pay: "Net Pay",
    tips: "Tips",
    total_income: "Total Income",
};

static KO: Strings = Strings {
    weekdays: ["일", "월", "화", "수", "목", "금", "토"],
    holiday_tag: "[홀리데이]",
    holiday: "홀리데이",
    saved: "저장 성공",
    updated: "수정 성공",
    deleted: "삭제 성공",
    unchanged: "변경할 내용이 없어 그대로 두었습니다",
    no_entries: "기록이 없습니다.",
    report_copied: "리포트가 클립보드에 복사되었습니다.",
    report_saved_to: "클립보드를 사용할 수 없어 리포트를 저장했습니다:",
    loaded_from_cache: "저장소에 연결할 수 없어 캐시된 기록을 표시합니다:",
    store_unavailable: "저장소에 연결할 수 없고 캐시된 기록도 없습니다.",
    id: "번호",
    date: "날짜",
    time: "시간",
    hours: "근무시간",
    shifts: "근무 횟수",
    total_hours: "총 근무시간",
    regular: "일반",
    gross_pay: "총 급여",
    deductions: "총 공제",
    net_pay: "실수령액",
    tips: "팁",
    total_income: "총 수입",
};

pub fn strings(lang: Lang) -> &'static Strings {
    match lang {
        Lang::En => &EN,
        Lang::Ko => &KO,
    }
}
