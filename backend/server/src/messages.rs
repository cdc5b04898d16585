//! User facing strings. The dashboard shows these verbatim.

pub const REQUIRED_FIELDS: &str = "সব প্রয়োজনীয় তথ্য দিন";
pub const INVALID_FIELDS: &str = "কিছু তথ্য সঠিক নয়";
pub const MALFORMED_PAYLOAD: &str = "অবৈধ অনুরোধ";
pub const SERVER_ERROR: &str = "সার্ভার ত্রুটি";

pub const CREDENTIALS_REQUIRED: &str = "ব্যবহারকারীর নাম এবং পাসওয়ার্ড প্রয়োজনীয়";
pub const INVALID_CREDENTIALS: &str = "ভুল ব্যবহারকারীর নাম বা পাসওয়ার্ড";
pub const ACCOUNT_INACTIVE: &str = "অ্যাকাউন্ট নিষ্ক্রিয়";
pub const UNAUTHORIZED: &str = "অননুমোদিত অ্যাক্সেস";
pub const LOGIN_OK: &str = "সফলভাবে লগইন হয়েছে";
pub const LOGIN_DEMO: &str = "সফলভাবে লগইন হয়েছে (ডেমো মোড)";

pub const CLIENT_CREATED: &str = "ক্লায়েন্ট সফলভাবে যোগ করা হয়েছে";
pub const DUPLICATE_NID: &str = "এই জাতীয় পরিচয়পত্র নম্বর দিয়ে ইতিমধ্যে একটি ক্লায়েন্ট আছে";
pub const LIST_CLIENTS_FAILED: &str = "ক্লায়েন্ট তালিকা লোড করতে সমস্যা হয়েছে";
pub const CREATE_CLIENT_FAILED: &str = "ক্লায়েন্ট যোগ করতে সমস্যা হয়েছে";

pub const CASE_CREATED: &str = "মামলা সফলভাবে যোগ করা হয়েছে";
pub const DUPLICATE_CASE_NUMBER: &str = "এই মামলা নম্বর দিয়ে ইতিমধ্যে একটি মামলা আছে";
pub const UNKNOWN_CLIENT: &str = "নির্বাচিত ক্লায়েন্ট পাওয়া যায়নি";
pub const LIST_CASES_FAILED: &str = "মামলার তথ্য লোড করতে ব্যর্থ";
pub const CREATE_CASE_FAILED: &str = "মামলা যোগ করতে সমস্যা হয়েছে";

pub const SEEDED: &str = "Database seeded successfully";
pub const SEED_FAILED: &str = "Failed to seed database";
