use crate::error::{DomainError, DomainResult};
use crate::value_object::{ValueObject, ensure_char_len, validated};
use chrono::{Datelike, NaiveDate};
use snapix_macros::value_object;

const MIN_AGE_YEARS: i32 = 13;

/// 用户名：6..=30 个字符，仅允许字母、数字、`_` 与 `-`
#[value_object]
pub struct Username(String);

impl Username {
    pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
        validated(Self(value.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Username {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        ensure_char_len("username", &self.0, 6, 30)?;
        if !self
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DomainError::invalid_value(
                "username may contain only latin letters, digits, '_' and '-'",
            ));
        }
        Ok(())
    }
}

/// 邮箱地址（统一为小写）
#[value_object]
pub struct Email(String);

impl Email {
    pub fn parse(value: impl AsRef<str>) -> DomainResult<Self> {
        validated(Self(value.as_ref().trim().to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Email {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        let invalid = || DomainError::invalid_value(format!("'{}' is not a valid email", self.0));

        let (local, domain) = self.0.split_once('@').ok_or_else(invalid)?;
        if local.is_empty()
            || domain.contains('@')
            || self.0.chars().any(char::is_whitespace)
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
        {
            return Err(invalid());
        }
        Ok(())
    }
}

/// 姓名（名或姓）：1..=50 个字符，字母、空格与 `-`
#[value_object]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(value: impl AsRef<str>) -> DomainResult<Self> {
        validated(Self(value.as_ref().trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for PersonName {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        ensure_char_len("name", &self.0, 1, 50)?;
        if !self
            .0
            .chars()
            .all(|c| c.is_alphabetic() || c == '-' || c == ' ')
        {
            return Err(DomainError::invalid_value(
                "name may contain only letters, spaces and '-'",
            ));
        }
        Ok(())
    }
}

#[value_object]
pub struct City(String);

impl City {
    pub fn parse(value: impl AsRef<str>) -> DomainResult<Self> {
        validated(Self(value.as_ref().trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for City {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        ensure_char_len("city", &self.0, 1, 100)
    }
}

/// 个人简介：最多 200 个字符
#[value_object]
pub struct AboutMe(String);

impl AboutMe {
    pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
        validated(Self(value.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for AboutMe {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        ensure_char_len("about me", &self.0, 0, 200)
    }
}

/// 出生日期：不得晚于 `today`，且年满 13 周岁
#[value_object]
#[derive(Copy)]
pub struct DateOfBirth(NaiveDate);

impl DateOfBirth {
    pub fn parse(value: NaiveDate, today: NaiveDate) -> DomainResult<Self> {
        let dob = Self(value);
        dob.ensure_min_age(today)?;
        Ok(dob)
    }

    pub fn value(&self) -> NaiveDate {
        self.0
    }

    /// 以 `today` 为基准计算周岁
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.0.year();
        if (today.month(), today.day()) < (self.0.month(), self.0.day()) {
            age -= 1;
        }
        age
    }

    fn ensure_min_age(&self, today: NaiveDate) -> DomainResult<()> {
        if self.0 > today {
            return Err(DomainError::invalid_value(
                "date of birth cannot be in the future",
            ));
        }
        if self.age_on(today) < MIN_AGE_YEARS {
            return Err(DomainError::invalid_value(format!(
                "a user under {MIN_AGE_YEARS} cannot create a profile"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn username_rules() {
        assert!(Username::parse("john_doe").is_ok());
        assert!(Username::parse("short").is_err());
        assert!(Username::parse("has space!").is_err());
        assert!(Username::parse("x".repeat(31)).is_err());
    }

    #[test]
    fn email_is_normalized_and_checked() {
        let email = Email::parse("  John@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "john@example.com");

        for bad in ["", "no-at.example.com", "a@b", "@example.com", "a@@b.com", "a@.com"] {
            assert!(Email::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn person_name_allows_unicode_letters() {
        assert!(PersonName::parse("Анна-Мария").is_ok());
        assert!(PersonName::parse("R2D2").is_err());
        assert!(PersonName::parse("   ").is_err());
    }

    #[test]
    fn about_me_limit() {
        assert!(AboutMe::parse("").is_ok());
        assert!(AboutMe::parse("a".repeat(200)).is_ok());
        assert!(AboutMe::parse("a".repeat(201)).is_err());
    }

    #[test]
    fn date_of_birth_requires_min_age() {
        let today = date(2024, 6, 15);
        assert!(DateOfBirth::parse(date(2011, 6, 15), today).is_ok());
        assert!(DateOfBirth::parse(date(2011, 6, 16), today).is_err());
        assert!(DateOfBirth::parse(date(2030, 1, 1), today).is_err());
    }

    #[test]
    fn age_respects_birthday() {
        let dob = DateOfBirth(date(2000, 12, 31));
        assert_eq!(dob.age_on(date(2024, 12, 30)), 23);
        assert_eq!(dob.age_on(date(2024, 12, 31)), 24);
    }
}
