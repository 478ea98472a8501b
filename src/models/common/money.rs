/// 金额比较容差，低于该值的余额视为已结清
pub const MONEY_EPSILON: f64 = 0.005;

/// 四舍五入到两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 百分比（两位小数），分母为 0 时返回 0
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole.abs() < MONEY_EPSILON {
        0.0
    } else {
        round2(part / whole * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(10.005_1), 10.01);
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(round2(-3.333), -3.33);
    }

    #[test]
    fn test_percentage_zero_denominator() {
        assert_eq!(percentage(50.0, 0.0), 0.0);
        assert_eq!(percentage(1.0, 3.0), 33.33);
        assert_eq!(percentage(250.0, 1000.0), 25.0);
    }
}
