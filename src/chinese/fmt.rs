//! 農曆月名、日名及節氣名

/// 個位數字。逢十之日（初十、二十、三十）的個位寫作「十」，故第 0 項為「十」。
const DIGITS: [&str; 10] = ["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// 月名（不含「月」字），第 `i` 項為 `i + 1` 月。
const MONTHS: [&str; 12] = [
    "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "冬", "臘",
];

/// 日名的十位，第 `i` 項用於 `10i + 1 ..= 10i + 10` 日，其中逢十之日另見 [`day`]。
const TENS: [&str; 3] = ["初", "十", "廿"];

/// 節氣名，自立春始。
const SOLAR_TERMS: [&str; 24] = [
    "立春", "雨水", "驚蟄", "春分", "清明", "穀雨", "立夏", "小滿", "芒種", "夏至", "小暑", "大暑",
    "立秋", "處暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至", "小寒", "大寒",
];

/// 月名，如「正月」「閏六月」「臘月」。
///
/// ```
/// use saju::chinese::{self, Month::*};
///
/// assert_eq!("冬月", chinese::fmt::month(Common(11)));
/// assert_eq!("閏正月", chinese::fmt::month(Leap(1)));
/// ```
///
/// # Panics
///
/// 月序號須在 `1..=12` 間。
pub fn month(m: super::Month) -> String {
    let num = m.num();
    let Some(name) = num.checked_sub(1).and_then(|i| MONTHS.get(i as usize)) else {
        panic!("month {num} not in 1..=12");
    };
    let leap = if m.is_leap() { "閏" } else { "" };
    format!("{leap}{name}月")
}

/// 日名，如「初一」「十五」「廿九」。
///
/// ```
/// use saju::chinese;
///
/// assert_eq!("初十", chinese::fmt::day(10));
/// assert_eq!("廿五", chinese::fmt::day(25));
/// ```
///
/// # Panics
///
/// 日序號須在 `1..=30` 間。
pub fn day(d: u32) -> String {
    let tens = match d {
        20 => "二",
        30 => "三",
        1..=29 => TENS[((d - 1) / 10) as usize],
        _ => panic!("day {d} not in 1..=30"),
    };
    format!("{tens}{}", DIGITS[(d % 10) as usize])
}

/// 節氣名。序號按 24 取模，`0` 與 `24` 同為大寒。
pub fn solar_term(term: u32) -> &'static str {
    SOLAR_TERMS[((term + 23) % 24) as usize]
}
