//! Form field validators.

use once_cell::sync::Lazy;
use regex::Regex;

static EXTERNAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(https?:|mailto:|tel:)").unwrap());

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .unwrap()
});

static MOBILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^1[3-9][0-9]{9}$").unwrap());

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(https?|ftp)://([a-zA-Z0-9.-]+(:[a-zA-Z0-9.&%$-]+)*@)*((25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9][0-9]?)(\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3}|([a-zA-Z0-9-]+\.)*[a-zA-Z0-9-]+\.(com|edu|gov|int|mil|net|org|biz|arpa|info|name|pro|aero|coop|museum|[a-zA-Z]{2}))(:[0-9]+)*(/($|[a-zA-Z0-9.,?'\\+&%$#=~_-]+))*$",
    )
    .unwrap()
});

static LOWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]+$").unwrap());
static UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]+$").unwrap());
static ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());

static PORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9]|[1-9][0-9]|[1-9][0-9]{2}|[1-9][0-9]{3}|[1-5][0-9]{4}|6[0-4][0-9]{3}|65[0-4][0-9]{2}|655[0-2][0-9]|6553[0-5])$",
    )
    .unwrap()
});

static IPV4: Lazy<Regex> = Lazy::new(|| {
    let octet = r"([0-9]{1,2}|1[0-9][0-9]|2[0-4][0-9]|25[0-5])";
    Regex::new(&format!(r"^{o}\.{o}\.{o}\.{o}$", o = octet)).unwrap()
});

static ID_CARD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^[0-9]{15}$)|(^[0-9]{18}$)|(^[0-9]{17}([0-9]|X|x)$)").unwrap());

static CHINESE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\x{4e00}-\x{9fa5}]+$").unwrap());
static QQ: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]{4,14}$").unwrap());
static WECHAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z][-_a-zA-Z0-9]{5,19}$").unwrap());

const PASSWORD_SYMBOLS: &str = "@$!%*?&";
const PASSWORD_MIN_LEN: usize = 8;

pub fn is_external(path: &str) -> bool {
    EXTERNAL.is_match(path)
}

/// Only the built-in accounts are accepted on the login form.
pub fn valid_username(name: &str) -> bool {
    matches!(name.trim(), "admin" | "editor")
}

pub fn valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Mainland mobile number, 11 digits starting with 13..19
pub fn valid_mobile(mobile: &str) -> bool {
    MOBILE.is_match(mobile)
}

/// At least 8 characters from `[A-Za-z0-9@$!%*?&]`, with a lowercase letter,
/// an uppercase letter and a digit.
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LEN
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c))
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn valid_url(url: &str) -> bool {
    URL.is_match(url)
}

pub fn valid_lower_case(s: &str) -> bool {
    LOWER.is_match(s)
}

pub fn valid_upper_case(s: &str) -> bool {
    UPPER.is_match(s)
}

pub fn valid_alphabets(s: &str) -> bool {
    ALPHA.is_match(s)
}

/// 0..=65535 without leading zeros
pub fn valid_port(port: &str) -> bool {
    PORT.is_match(port)
}

pub fn valid_ip(ip: &str) -> bool {
    IPV4.is_match(ip)
}

pub fn valid_id_card(id: &str) -> bool {
    ID_CARD.is_match(id)
}

pub fn valid_chinese(s: &str) -> bool {
    CHINESE.is_match(s)
}

pub fn valid_qq(qq: &str) -> bool {
    QQ.is_match(qq)
}

pub fn valid_wechat(id: &str) -> bool {
    WECHAT.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_external() {
        assert!(is_external("https://example.com"));
        assert!(is_external("mailto:ops@example.com"));
        assert!(is_external("tel:10086"));
        assert!(!is_external("/projects"));
    }

    #[test]
    fn test_valid_username() {
        assert!(valid_username(" admin "));
        assert!(valid_username("editor"));
        assert!(!valid_username("guest"));
    }

    #[test]
    fn test_valid_email() {
        assert!(valid_email("audit.team@example.com"));
        assert!(valid_email("a@[10.0.0.1]"));
        assert!(!valid_email("no-at-sign.example.com"));
        assert!(!valid_email("a@b"));
    }

    #[test]
    fn test_valid_mobile() {
        assert!(valid_mobile("13812345678"));
        assert!(!valid_mobile("12812345678"));
        assert!(!valid_mobile("1381234567"));
    }

    #[test]
    fn test_valid_password() {
        assert!(valid_password("Audit2024"));
        assert!(valid_password("Aa1@Aa1@"));
        assert!(!valid_password("Aa1@bcd"));
        assert!(!valid_password("alllowercase1"));
        assert!(!valid_password("ALLUPPERCASE1"));
        assert!(!valid_password("NoDigitsHere"));
        assert!(!valid_password("Bad Char1x"));
    }

    #[test]
    fn test_valid_url() {
        assert!(valid_url("https://example.com/path/to?x=1"));
        assert!(valid_url("http://192.168.1.10:8000/api"));
        assert!(valid_url("ftp://user:pw@files.example.org"));
        assert!(!valid_url("example.com"));
    }

    #[test]
    fn test_letter_classes() {
        assert!(valid_lower_case("abc"));
        assert!(!valid_lower_case("aBc"));
        assert!(valid_upper_case("ABC"));
        assert!(!valid_upper_case(""));
        assert!(valid_alphabets("AbC"));
        assert!(!valid_alphabets("Ab1"));
    }

    #[test]
    fn test_valid_port() {
        assert!(valid_port("0"));
        assert!(valid_port("8000"));
        assert!(valid_port("65535"));
        assert!(!valid_port("65536"));
        assert!(!valid_port("080"));
    }

    #[test]
    fn test_valid_ip() {
        assert!(valid_ip("192.168.0.1"));
        assert!(valid_ip("255.255.255.255"));
        assert!(!valid_ip("256.1.1.1"));
        assert!(!valid_ip("1.2.3"));
    }

    #[test]
    fn test_valid_id_card() {
        assert!(valid_id_card("110101199003074578"));
        assert!(valid_id_card("11010119900307457X"));
        assert!(valid_id_card("110101900307457"));
        assert!(!valid_id_card("1101011990030745"));
    }

    #[test]
    fn test_misc_ids() {
        assert!(valid_chinese("审计"));
        assert!(!valid_chinese("审计A"));
        assert!(valid_qq("10001"));
        assert!(!valid_qq("0123456"));
        assert!(valid_wechat("wx_user-01"));
        assert!(!valid_wechat("1wxuser"));
    }
}
