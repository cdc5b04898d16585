//! # Field Validation
//!
//! Checks shared by the dashboard forms and the create endpoints.
//!
//! ## Client Form
//!
//! Two steps, the second is only reachable once the first passes.
//! - Step 1: Bengali name, NID, phone, optional email
//! - Step 2: district, upazila, address details
//!
//! NIDs are 10, 13 or 17 ASCII digits. Phones are Bangladeshi mobiles, either
//! local (`01XXXXXXXXX`) or international (`+8801XXXXXXXXX`), and get stored
//! in the international form.
//!
//! ## Case Form
//!
//! Single step. Status and priority must be known variants and a hearing can
//! not be scheduled before the filing date.
use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    case::{CasePriority, CaseStatus, NewCase},
    client::NewClient,
};

static NID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$|^[0-9]{13}$|^[0-9]{17}$").unwrap());
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+8801|01)[3-9][0-9]{8}$").unwrap());
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub const NAME_REQUIRED: &str = "বাংলা নাম প্রয়োজনীয়";
pub const NID_REQUIRED: &str = "জাতীয় পরিচয়পত্র নম্বর প্রয়োজনীয়";
pub const NID_INVALID: &str = "বৈধ জাতীয় পরিচয়পত্র নম্বর দিন";
pub const PHONE_REQUIRED: &str = "ফোন নম্বর প্রয়োজনীয়";
pub const PHONE_INVALID: &str = "বৈধ বাংলাদেশী ফোন নম্বর দিন";
pub const EMAIL_INVALID: &str = "বৈধ ইমেইল ঠিকানা দিন";
pub const DISTRICT_REQUIRED: &str = "জেলা নির্বাচন করুন";
pub const UPAZILA_REQUIRED: &str = "উপজেলা লিখুন";
pub const ADDRESS_REQUIRED: &str = "বিস্তারিত ঠিকানা প্রয়োজনীয়";

pub const CASE_NUMBER_REQUIRED: &str = "মামলা নম্বর প্রয়োজনীয়";
pub const TITLE_REQUIRED: &str = "মামলার শিরোনাম প্রয়োজনীয়";
pub const CASE_TYPE_REQUIRED: &str = "মামলার ধরন নির্বাচন করুন";
pub const CLIENT_REQUIRED: &str = "ক্লায়েন্ট নির্বাচন করুন";
pub const STATUS_REQUIRED: &str = "মামলার অবস্থা নির্বাচন করুন";
pub const PRIORITY_REQUIRED: &str = "অগ্রাধিকার নির্বাচন করুন";
pub const HEARING_BEFORE_FILING: &str = "শুনানির তারিখ দাখিলের তারিখের পরে হতে হবে";

/// Field name to message, empty when the input is valid.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

const MISSING: [&str; 12] = [
    NAME_REQUIRED,
    NID_REQUIRED,
    PHONE_REQUIRED,
    DISTRICT_REQUIRED,
    UPAZILA_REQUIRED,
    ADDRESS_REQUIRED,
    CASE_NUMBER_REQUIRED,
    TITLE_REQUIRED,
    CASE_TYPE_REQUIRED,
    CLIENT_REQUIRED,
    STATUS_REQUIRED,
    PRIORITY_REQUIRED,
];

/// True when every error is an empty required field, false once any value
/// is present but wrong.
pub fn only_missing(errors: &FieldErrors) -> bool {
    errors.values().all(|message| MISSING.contains(message))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormStep {
    Basic,
    Address,
}

impl FormStep {
    pub fn from_number(step: u8) -> Option<Self> {
        match step {
            1 => Some(FormStep::Basic),
            2 => Some(FormStep::Address),
            _ => None,
        }
    }
}

/// A client payload that passed every check, with whitespace trimmed and the
/// phone in `+880` form.
#[derive(Clone, Debug)]
pub struct ValidClient(pub(crate) NewClient);

impl ValidClient {
    pub fn nid(&self) -> &str {
        &self.0.nid
    }
}

#[derive(Clone, Debug)]
pub struct ValidCase {
    pub case_number: String,
    pub title_bn: String,
    pub title_en: Option<String>,
    pub client_id: String,
    pub client_name: Option<String>,
    pub case_type: String,
    pub status: CaseStatus,
    pub priority: CasePriority,
    pub court_name: Option<String>,
    pub filing_date: Option<NaiveDate>,
    pub next_hearing: Option<NaiveDate>,
    pub description: Option<String>,
}

pub fn normalize_phone(phone: &str) -> String {
    match phone.strip_prefix('0') {
        Some(rest) => format!("+880{rest}"),
        None => phone.to_string(),
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &'static str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field, message);
        return false;
    }

    true
}

pub fn validate_client_step(step: FormStep, input: &NewClient) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match step {
        FormStep::Basic => {
            require(&mut errors, "name_bn", &input.name_bn, NAME_REQUIRED);

            if require(&mut errors, "nid", &input.nid, NID_REQUIRED)
                && !NID_PATTERN.is_match(input.nid.trim())
            {
                errors.insert("nid", NID_INVALID);
            }

            if require(&mut errors, "phone", &input.phone, PHONE_REQUIRED)
                && !PHONE_PATTERN.is_match(input.phone.trim())
            {
                errors.insert("phone", PHONE_INVALID);
            }

            if let Some(email) = input.email.as_deref().map(str::trim) {
                if !email.is_empty() && !EMAIL_PATTERN.is_match(email) {
                    errors.insert("email", EMAIL_INVALID);
                }
            }
        }
        FormStep::Address => {
            require(&mut errors, "district", &input.district, DISTRICT_REQUIRED);
            require(&mut errors, "upazila", &input.upazila, UPAZILA_REQUIRED);
            require(&mut errors, "address_details", &input.address_details, ADDRESS_REQUIRED);
        }
    }

    errors
}

pub fn validate_client(input: NewClient) -> Result<ValidClient, FieldErrors> {
    let mut errors = validate_client_step(FormStep::Basic, &input);
    errors.extend(validate_client_step(FormStep::Address, &input));

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidClient(NewClient {
        name_bn: input.name_bn.trim().to_string(),
        name_en: optional(input.name_en),
        nid: input.nid.trim().to_string(),
        phone: normalize_phone(input.phone.trim()),
        email: optional(input.email),
        district: input.district.trim().to_string(),
        upazila: input.upazila.trim().to_string(),
        address_details: input.address_details.trim().to_string(),
        notes: optional(input.notes),
    }))
}

pub fn validate_case(input: NewCase) -> Result<ValidCase, FieldErrors> {
    let mut errors = FieldErrors::new();

    require(&mut errors, "case_number", &input.case_number, CASE_NUMBER_REQUIRED);
    require(&mut errors, "title_bn", &input.title_bn, TITLE_REQUIRED);
    require(&mut errors, "client_id", &input.client_id, CLIENT_REQUIRED);
    require(&mut errors, "case_type", &input.case_type, CASE_TYPE_REQUIRED);

    let status = input.status.trim().parse::<CaseStatus>().ok();
    if status.is_none() {
        errors.insert("status", STATUS_REQUIRED);
    }

    let priority = input.priority.trim().parse::<CasePriority>().ok();
    if priority.is_none() {
        errors.insert("priority", PRIORITY_REQUIRED);
    }

    if let (Some(filed), Some(hearing)) = (input.filing_date, input.next_hearing) {
        if hearing < filed {
            errors.insert("next_hearing", HEARING_BEFORE_FILING);
        }
    }

    match (status, priority) {
        (Some(status), Some(priority)) if errors.is_empty() => Ok(ValidCase {
            case_number: input.case_number.trim().to_string(),
            title_bn: input.title_bn.trim().to_string(),
            title_en: optional(input.title_en),
            client_id: input.client_id.trim().to_string(),
            client_name: optional(input.client_name),
            case_type: input.case_type.trim().to_string(),
            status,
            priority,
            court_name: optional(input.court_name),
            filing_date: input.filing_date,
            next_hearing: input.next_hearing,
            description: optional(input.description),
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> NewClient {
        NewClient {
            name_bn: "ফাতেমা খাতুন".to_string(),
            name_en: Some("Fatema Khatun".to_string()),
            nid: "9876543210987".to_string(),
            phone: "01823456789".to_string(),
            email: Some("fatema@email.com".to_string()),
            district: "চট্টগ্রাম".to_string(),
            upazila: "নাসিরাবাদ".to_string(),
            address_details: "বাড়ি নং ২৫".to_string(),
            notes: None,
        }
    }

    fn case() -> NewCase {
        NewCase {
            case_number: "CC-2024-001".to_string(),
            title_bn: "ভূমি বিরোধ মামলা".to_string(),
            client_id: "k1".to_string(),
            case_type: "দেওয়ানি".to_string(),
            status: "active".to_string(),
            priority: "high".to_string(),
            ..NewCase::default()
        }
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("01712345678"), "+8801712345678");
        assert_eq!(normalize_phone("+8801712345678"), "+8801712345678");
    }

    #[test]
    fn test_nid_lengths() {
        for nid in ["1234567890", "1234567890123", "12345678901234567"] {
            let input = NewClient { nid: nid.to_string(), ..client() };
            assert!(validate_client_step(FormStep::Basic, &input).is_empty(), "{nid}");
        }

        for nid in ["123456789", "12345678901", "12345abcde", "১২৩৪৫৬৭৮৯০"] {
            let input = NewClient { nid: nid.to_string(), ..client() };
            assert_eq!(
                validate_client_step(FormStep::Basic, &input).get("nid"),
                Some(&NID_INVALID),
                "{nid}"
            );
        }
    }

    #[test]
    fn test_phone_patterns() {
        for phone in ["01312345678", "01912345678", "+8801712345678"] {
            let input = NewClient { phone: phone.to_string(), ..client() };
            assert!(validate_client_step(FormStep::Basic, &input).is_empty(), "{phone}");
        }

        for phone in ["01212345678", "0171234567", "8801712345678", "+880171234567"] {
            let input = NewClient { phone: phone.to_string(), ..client() };
            assert_eq!(
                validate_client_step(FormStep::Basic, &input).get("phone"),
                Some(&PHONE_INVALID),
                "{phone}"
            );
        }
    }

    #[test]
    fn test_empty_email_is_allowed() {
        let input = NewClient { email: Some("  ".to_string()), ..client() };
        let valid = validate_client(input).unwrap();

        assert_eq!(valid.0.email, None);
    }

    #[test]
    fn test_bad_email() {
        let input = NewClient { email: Some("fatema@email".to_string()), ..client() };

        assert_eq!(validate_client(input).unwrap_err().get("email"), Some(&EMAIL_INVALID));
    }

    #[test]
    fn test_steps_are_independent() {
        let input = NewClient {
            district: String::new(),
            upazila: String::new(),
            address_details: String::new(),
            ..client()
        };

        assert!(validate_client_step(FormStep::Basic, &input).is_empty());

        let errors = validate_client_step(FormStep::Address, &input);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("district"), Some(&DISTRICT_REQUIRED));
    }

    #[test]
    fn test_required_reported_before_pattern() {
        let errors = validate_client(NewClient::default()).unwrap_err();

        assert_eq!(errors.get("nid"), Some(&NID_REQUIRED));
        assert_eq!(errors.get("phone"), Some(&PHONE_REQUIRED));
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_valid_client_is_normalized() {
        let input = NewClient {
            name_bn: "  ফাতেমা খাতুন ".to_string(),
            notes: Some(String::new()),
            ..client()
        };
        let valid = validate_client(input).unwrap();

        assert_eq!(valid.0.name_bn, "ফাতেমা খাতুন");
        assert_eq!(valid.0.phone, "+8801823456789");
        assert_eq!(valid.0.notes, None);
        assert_eq!(valid.nid(), "9876543210987");
    }

    #[test]
    fn test_form_step_numbers() {
        assert_eq!(FormStep::from_number(1), Some(FormStep::Basic));
        assert_eq!(FormStep::from_number(2), Some(FormStep::Address));
        assert_eq!(FormStep::from_number(3), None);
    }

    #[test]
    fn test_valid_case() {
        let valid = validate_case(case()).unwrap();

        assert_eq!(valid.status, CaseStatus::Active);
        assert_eq!(valid.priority, CasePriority::High);
        assert_eq!(valid.client_name, None);
    }

    #[test]
    fn test_case_unknown_status_and_priority() {
        let input = NewCase {
            status: "ongoing".to_string(),
            priority: String::new(),
            ..case()
        };
        let errors = validate_case(input).unwrap_err();

        assert_eq!(errors.get("status"), Some(&STATUS_REQUIRED));
        assert_eq!(errors.get("priority"), Some(&PRIORITY_REQUIRED));
    }

    #[test]
    fn test_case_hearing_before_filing() {
        let input = NewCase {
            filing_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            next_hearing: NaiveDate::from_ymd_opt(2024, 2, 28),
            ..case()
        };

        assert_eq!(
            validate_case(input).unwrap_err().get("next_hearing"),
            Some(&HEARING_BEFORE_FILING)
        );

        let same_day = NewCase {
            filing_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            next_hearing: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..case()
        };
        assert!(validate_case(same_day).is_ok());
    }

    #[test]
    fn test_case_missing_fields() {
        let errors = validate_case(NewCase::default()).unwrap_err();

        for field in ["case_number", "title_bn", "client_id", "case_type", "status", "priority"] {
            assert!(errors.contains_key(field), "{field}");
        }
    }

    #[test]
    fn test_only_missing() {
        let empty = validate_client(NewClient::default()).unwrap_err();
        assert!(only_missing(&empty));

        let mut wrong = client();
        wrong.nid = "12345".to_string();
        wrong.district = String::new();
        let errors = validate_client(wrong).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(!only_missing(&errors));
    }
}
