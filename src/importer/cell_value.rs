// ==========================================
// 产品目录 - 单元格解码
// ==========================================
// 职责: 把异构单元格归一为带标签的取值，并按目标类型解码
// 规则: 预期内的“无法解析”返回 None（缺省），不走错误分支
// ==========================================

use calamine::Data;
use chrono::{Duration, NaiveDate};

/// 单元格取值（按单元格声明类型区分）
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// 日期格式的数值（Excel 序列号）
    Date(f64),
    Boolean(bool),
    /// 公式源文本（不含前导 '='）
    Formula(String),
    /// 空白 / 错误值 / 其他无法识别的类型
    Blank,
}

impl CellValue {
    /// 由 calamine 单元格与同位置的公式文本构造
    ///
    /// 公式单元格以公式源文本为准，忽略其缓存结果
    pub fn from_cell(data: &Data, formula: Option<&str>) -> Self {
        if let Some(formula) = formula.filter(|f| !f.is_empty()) {
            return CellValue::Formula(formula.to_string());
        }

        match data {
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
                CellValue::Text(s.clone())
            }
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Boolean(*b),
            Data::DateTime(dt) => CellValue::Date(dt.as_f64()),
            Data::Error(_) | Data::Empty => CellValue::Blank,
        }
    }

    /// 按字符串目标解码
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) | CellValue::Formula(s) => s.clone(),
            CellValue::Number(f) => format_number(*f),
            CellValue::Date(serial) => {
                excel_serial_to_string(*serial).unwrap_or_else(|| format_number(*serial))
            }
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Blank => String::new(),
        }
    }

    /// 按小数目标解码
    ///
    /// 数值直接取值；文本尝试解析，失败为 None；其他类型为 None
    pub fn as_decimal(&self) -> Option<f64> {
        let value = match self {
            CellValue::Number(f) | CellValue::Date(f) => Some(*f),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|f| f.is_finite())
    }

    /// 按整数目标解码
    ///
    /// 数值按截断取整，超出 32 位整数范围时饱和到边界值
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            CellValue::Number(f) | CellValue::Date(f) => Some(*f as i32),
            CellValue::Text(s) => s.parse::<i32>().ok(),
            _ => None,
        }
    }
}

/// 整数值去掉小数部分，其余保持十进制表示
fn format_number(value: f64) -> String {
    if value.is_finite() && value == value.floor() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Excel 序列号（1900 日期系统）转日期时间字符串
fn excel_serial_to_string(serial: f64) -> Option<String> {
    if !serial.is_finite() || !(0.0..1e7).contains(&serial) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.floor();
    let seconds = ((serial - days) * 86_400.0).round();
    let datetime = base
        .checked_add_signed(Duration::try_days(days as i64)?)?
        .checked_add_signed(Duration::try_seconds(seconds as i64)?)?;
    Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_decoding_by_kind() {
        assert_eq!(CellValue::Text("abc".to_string()).as_text(), "abc");
        assert_eq!(CellValue::Number(42.0).as_text(), "42");
        assert_eq!(CellValue::Number(2.5).as_text(), "2.5");
        assert_eq!(CellValue::Boolean(true).as_text(), "true");
        assert_eq!(CellValue::Boolean(false).as_text(), "false");
        assert_eq!(CellValue::Formula("A1*2".to_string()).as_text(), "A1*2");
        assert_eq!(CellValue::Blank.as_text(), "");
    }

    #[test]
    fn test_date_cell_renders_as_datetime() {
        // 45292 = 2024-01-01
        assert_eq!(CellValue::Date(45292.0).as_text(), "2024-01-01 00:00:00");
        assert_eq!(CellValue::Date(45292.5).as_text(), "2024-01-01 12:00:00");
        assert_eq!(CellValue::Date(45292.0).as_decimal(), Some(45292.0));
    }

    #[test]
    fn test_decimal_decoding() {
        assert_eq!(CellValue::Number(9.99).as_decimal(), Some(9.99));
        assert_eq!(CellValue::Text(" 12.5 ".to_string()).as_decimal(), Some(12.5));
        assert_eq!(CellValue::Text("abc".to_string()).as_decimal(), None);
        assert_eq!(CellValue::Text("NaN".to_string()).as_decimal(), None);
        assert_eq!(CellValue::Formula("1+1".to_string()).as_decimal(), None);
        assert_eq!(CellValue::Boolean(true).as_decimal(), None);
        assert_eq!(CellValue::Blank.as_decimal(), None);
    }

    #[test]
    fn test_integer_decoding() {
        assert_eq!(CellValue::Number(10.0).as_integer(), Some(10));
        assert_eq!(CellValue::Number(10.9).as_integer(), Some(10));
        assert_eq!(CellValue::Number(-3.7).as_integer(), Some(-3));
        assert_eq!(CellValue::Text("15".to_string()).as_integer(), Some(15));
        assert_eq!(CellValue::Text("15.0".to_string()).as_integer(), None);
        assert_eq!(CellValue::Blank.as_integer(), None);
    }

    #[test]
    fn test_integer_decoding_saturates_out_of_range() {
        assert_eq!(CellValue::Number(3e9).as_integer(), Some(i32::MAX));
        assert_eq!(CellValue::Number(-1e12).as_integer(), Some(i32::MIN));
    }

    #[test]
    fn test_from_cell_prefers_formula() {
        let cell = CellValue::from_cell(&Data::Float(3.0), Some("1+2"));
        assert_eq!(cell, CellValue::Formula("1+2".to_string()));

        let cell = CellValue::from_cell(&Data::Float(3.0), Some(""));
        assert_eq!(cell, CellValue::Number(3.0));
    }

    #[test]
    fn test_from_cell_kinds() {
        assert_eq!(
            CellValue::from_cell(&Data::String("x".to_string()), None),
            CellValue::Text("x".to_string())
        );
        assert_eq!(CellValue::from_cell(&Data::Int(7), None), CellValue::Number(7.0));
        assert_eq!(CellValue::from_cell(&Data::Bool(true), None), CellValue::Boolean(true));
        assert_eq!(CellValue::from_cell(&Data::Empty, None), CellValue::Blank);
        assert_eq!(
            CellValue::from_cell(&Data::Error(calamine::CellErrorType::Div0), None),
            CellValue::Blank
        );
    }
}
