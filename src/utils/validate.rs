use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static SESSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})/(\d{4})$").expect("Invalid session regex"));

static PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("Invalid period regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 -]{5,18}[0-9]$").expect("Invalid phone regex"));

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9/_-]{0,31}$").expect("Invalid code regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if !(5..=16).contains(&username.len()) {
        return Err("用户名长度需在 5 到 16 个字符之间");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("用户名只能包含字母、数字、下划线或连字符");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email.trim()) {
        return Err("邮箱格式不正确");
    }
    Ok(())
}

/// 学年格式 `YYYY/YYYY`，且后一年等于前一年加一
pub fn validate_session(session: &str) -> Result<(), &'static str> {
    let caps = SESSION_RE
        .captures(session)
        .ok_or("Session must look like 2024/2025")?;
    let start: i32 = caps[1].parse().map_err(|_| "Session year is invalid")?;
    let end: i32 = caps[2].parse().map_err(|_| "Session year is invalid")?;
    if end != start + 1 {
        return Err("Session must span two consecutive years");
    }
    Ok(())
}

/// 工资月份格式 `YYYY-MM`
pub fn validate_period(period: &str) -> Result<(), &'static str> {
    let caps = PERIOD_RE
        .captures(period)
        .ok_or("Period must look like 2025-01")?;
    let month: u32 = caps[2].parse().map_err(|_| "Period month is invalid")?;
    if !(1..=12).contains(&month) {
        return Err("Period month must be between 01 and 12");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone.trim()) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

/// 学号、工号等编号：字母数字开头，最长 32 位
pub fn validate_code(code: &str) -> Result<(), &'static str> {
    if !CODE_RE.is_match(code) {
        return Err("Code must be 1-32 letters, digits, '/', '_' or '-'");
    }
    Ok(())
}

/// 必填文本：去空白后非空且不超过 `max_len` 个字符
pub fn validate_required(value: &str, max_len: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("must not be empty".to_string());
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("must be at most {max_len} characters"));
    }
    Ok(())
}

/// 金额：有限且不为负
pub fn validate_amount(amount: f64) -> Result<(), &'static str> {
    if !amount.is_finite() || amount < 0.0 {
        return Err("Amount must be a non-negative number");
    }
    Ok(())
}

const COMMON_PASSWORDS: &[&str] = &[
    "password1",
    "qwerty123",
    "admin1234",
    "abcd1234",
    "welcome1",
    "school123",
];

type PasswordRule = (fn(&str) -> bool, &'static str);

const PASSWORD_RULES: &[PasswordRule] = &[
    (|p| p.chars().count() >= 8, "密码至少 8 位"),
    (|p| p.chars().any(|c| c.is_ascii_uppercase()), "密码需包含大写字母"),
    (|p| p.chars().any(|c| c.is_ascii_lowercase()), "密码需包含小写字母"),
    (|p| p.chars().any(|c| c.is_ascii_digit()), "密码需包含数字"),
    (
        |p| !COMMON_PASSWORDS.iter().any(|weak| p.eq_ignore_ascii_case(weak)),
        "密码过于常见",
    ),
];

/// 账号密码策略，返回所有未满足的规则
pub fn password_violations(password: &str) -> Vec<&'static str> {
    PASSWORD_RULES
        .iter()
        .filter(|(check, _)| !check(password))
        .map(|(_, message)| *message)
        .collect()
}

pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let violations = password_violations(password);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations.join("；"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_session() {
        assert!(validate_session("2024/2025").is_ok());
        assert!(validate_session("2024/2026").is_err());
        assert!(validate_session("2024-2025").is_err());
        assert!(validate_session("24/25").is_err());
    }

    #[test]
    fn test_validate_period() {
        assert!(validate_period("2025-01").is_ok());
        assert!(validate_period("2025-12").is_ok());
        assert!(validate_period("2025-13").is_err());
        assert!(validate_period("2025-00").is_err());
        assert!(validate_period("2025/01").is_err());
    }

    #[test]
    fn test_validate_phone_and_code() {
        assert!(validate_phone("+234 803 123 4567").is_ok());
        assert!(validate_phone("08031234567").is_ok());
        assert!(validate_phone("call me").is_err());
        assert!(validate_code("ADM/2024/001").is_ok());
        assert!(validate_code("STF-01").is_ok());
        assert!(validate_code("").is_err());
        assert!(validate_code("bad code").is_err());
    }

    #[test]
    fn test_validate_required_and_amount() {
        assert!(validate_required("  Maths ", 10).is_ok());
        assert!(validate_required("   ", 10).is_err());
        assert!(validate_required("abcdef", 5).is_err());
        assert!(validate_amount(0.0).is_ok());
        assert!(validate_amount(-0.01).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_username_and_email() {
        assert!(validate_username("bursar_1").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_email("head@school.edu.ng").is_ok());
        assert!(validate_email("head@school").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password_simple("Bursar#2024").is_ok());
        assert!(validate_password_simple("SecurePass123").is_ok());

        assert_eq!(password_violations("Ab1"), vec!["密码至少 8 位"]);
        assert_eq!(password_violations("abcd12345"), vec!["密码需包含大写字母"]);
        assert_eq!(password_violations("ABCD12345"), vec!["密码需包含小写字母"]);
        assert_eq!(password_violations("AbcdEfgh"), vec!["密码需包含数字"]);
        assert_eq!(password_violations("School123"), vec!["密码过于常见"]);
    }

    #[test]
    fn test_violations_are_joined() {
        let err = validate_password_simple("abc").unwrap_err();
        assert!(err.contains("密码至少 8 位"));
        assert!(err.contains("密码需包含数字"));
    }
}
