//! Fixture records for `POST /api/seed`, `lawdesk seed` and the in-memory demo store.
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::{
    case::{Case, CasePriority, CaseStatus},
    client::{Client, ClientStatus},
};

struct ClientRow {
    name_bn: &'static str,
    name_en: &'static str,
    nid: &'static str,
    phone: &'static str,
    email: Option<&'static str>,
    district: &'static str,
    upazila: &'static str,
    address_details: &'static str,
    notes: Option<&'static str>,
    created: (i32, u32, u32),
}

struct CaseRow {
    case_number: &'static str,
    title_bn: &'static str,
    title_en: &'static str,
    client: usize,
    case_type: &'static str,
    status: CaseStatus,
    priority: CasePriority,
    court_name: &'static str,
    next_hearing: Option<(i32, u32, u32)>,
    description: &'static str,
    created: (i32, u32, u32),
    updated: (i32, u32, u32),
}

const SAMPLE_CLIENTS: [ClientRow; 5] = [
    ClientRow {
        name_bn: "মোহাম্মদ আব্দুল করিম",
        name_en: "Mohammad Abdul Karim",
        nid: "1234567890123",
        phone: "01712345678",
        email: Some("karim@email.com"),
        district: "ঢাকা",
        upazila: "ধানমন্ডি",
        address_details: "বাড়ি নং ১২, রোড নং ৫, ধানমন্ডি",
        notes: Some("গুরুত্বপূর্ণ ক্লায়েন্ট - সময়মতো যোগাযোগ করুন"),
        created: (2024, 1, 15),
    },
    ClientRow {
        name_bn: "ফাতেমা খাতুন",
        name_en: "Fatema Khatun",
        nid: "9876543210987",
        phone: "01823456789",
        email: Some("fatema@email.com"),
        district: "চট্টগ্রাম",
        upazila: "নাসিরাবাদ",
        address_details: "বাড়ি নং ২৫, নাসিরাবাদ আবাসিক এলাকা",
        notes: Some("পারিবারিক মামলার ক্লায়েন্ট"),
        created: (2024, 1, 20),
    },
    ClientRow {
        name_bn: "আহমেদ হাসান",
        name_en: "Ahmed Hasan",
        nid: "5678901234567",
        phone: "01934567890",
        email: Some("ahmed@email.com"),
        district: "সিলেট",
        upazila: "সিলেট সদর",
        address_details: "বাড়ি নং ৮, তিলাগড়, সিলেট",
        notes: None,
        created: (2024, 2, 1),
    },
    ClientRow {
        name_bn: "রহিমা বেগম",
        name_en: "Rahima Begum",
        nid: "3456789012345",
        phone: "01645678901",
        email: None,
        district: "রাজশাহী",
        upazila: "রাজশাহী সদর",
        address_details: "গ্রাম: কামারপাড়া, পোস্ট: রাজশাহী সদর",
        notes: Some("ভূমি সংক্রান্ত মামলা"),
        created: (2024, 2, 10),
    },
    ClientRow {
        name_bn: "নাসির উদ্দিন",
        name_en: "Nasir Uddin",
        nid: "7890123456789",
        phone: "01756789012",
        email: Some("nasir@email.com"),
        district: "খুলনা",
        upazila: "খুলনা সদর",
        address_details: "বাড়ি নং ১৫, রয়েল রোড, খুলনা",
        notes: None,
        created: (2024, 2, 15),
    },
];

const SAMPLE_CASES: [CaseRow; 6] = [
    CaseRow {
        case_number: "CC-2024-001",
        title_bn: "ভূমি বিরোধ মামলা",
        title_en: "Land Dispute Case",
        client: 0,
        case_type: "দেওয়ানি",
        status: CaseStatus::Active,
        priority: CasePriority::High,
        court_name: "ঢাকা জজ আদালত",
        next_hearing: Some((2024, 3, 15)),
        description: "পৈতৃক ভূমির মালিকানা নিয়ে বিরোধ। প্রতিপক্ষ জোরপূর্বক দখল নিয়েছে।",
        created: (2024, 1, 15),
        updated: (2024, 2, 20),
    },
    CaseRow {
        case_number: "CR-2024-002",
        title_bn: "ফৌজদারি মামলা",
        title_en: "Criminal Case",
        client: 1,
        case_type: "ফৌজদারি",
        status: CaseStatus::Pending,
        priority: CasePriority::Medium,
        court_name: "চট্টগ্রাম জজ আদালত",
        next_hearing: Some((2024, 3, 25)),
        description: "চুরির অভিযোগে মামলা। সাক্ষী-প্রমাণ সংগ্রহের কাজ চলছে।",
        created: (2024, 1, 20),
        updated: (2024, 2, 18),
    },
    CaseRow {
        case_number: "FC-2024-003",
        title_bn: "পারিবারিক মামলা",
        title_en: "Family Case",
        client: 2,
        case_type: "পারিবারিক",
        status: CaseStatus::Active,
        priority: CasePriority::Low,
        court_name: "সিলেট পারিবারিক আদালত",
        next_hearing: Some((2024, 3, 10)),
        description: "বিবাহ বিচ্ছেদের মামলা। উভয় পক্ষের মধ্যে আলোচনা চলছে।",
        created: (2024, 2, 1),
        updated: (2024, 2, 15),
    },
    CaseRow {
        case_number: "LC-2024-004",
        title_bn: "ভূমি মামলা",
        title_en: "Land Case",
        client: 3,
        case_type: "দেওয়ানি",
        status: CaseStatus::Won,
        priority: CasePriority::Medium,
        court_name: "রাজশাহী জজ আদালত",
        next_hearing: None,
        description: "ভূমির দলিল সংক্রান্ত মামলা। আদালত আমাদের পক্ষে রায় দিয়েছেন।",
        created: (2024, 2, 10),
        updated: (2024, 2, 28),
    },
    CaseRow {
        case_number: "BC-2024-005",
        title_bn: "ব্যবসায়িক মামলা",
        title_en: "Business Case",
        client: 4,
        case_type: "দেওয়ানি",
        status: CaseStatus::Active,
        priority: CasePriority::High,
        court_name: "খুলনা জজ আদালত",
        next_hearing: Some((2024, 3, 20)),
        description: "চুক্তি ভঙ্গের কারণে ক্ষতিপূরণের মামলা।",
        created: (2024, 2, 15),
        updated: (2024, 2, 22),
    },
    CaseRow {
        case_number: "TC-2024-006",
        title_bn: "ট্রাফিক মামলা",
        title_en: "Traffic Case",
        client: 0,
        case_type: "ফৌজদারি",
        status: CaseStatus::Closed,
        priority: CasePriority::Low,
        court_name: "ঢাকা ট্রাফিক ট্রাইব্যুনাল",
        next_hearing: None,
        description: "ট্রাফিক আইন লঙ্ঘনের মামলা। জরিমানা পরিশোধ করা হয়েছে।",
        created: (2024, 1, 25),
        updated: (2024, 2, 5),
    },
];

fn date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn midnight(ymd: (i32, u32, u32)) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date(ymd).and_hms_opt(0, 0, 0).unwrap_or_default())
}

fn client_from_row(row: &ClientRow) -> Client {
    let created = midnight(row.created);

    Client {
        id: Uuid::new_v4().to_string(),
        name_bn: row.name_bn.to_string(),
        name_en: Some(row.name_en.to_string()),
        nid: row.nid.to_string(),
        phone: crate::validate::normalize_phone(row.phone),
        email: row.email.map(str::to_string),
        district: row.district.to_string(),
        upazila: row.upazila.to_string(),
        address_details: row.address_details.to_string(),
        notes: row.notes.map(str::to_string),
        status: ClientStatus::Active,
        created_at: created,
        updated_at: created,
    }
}

pub fn sample_clients() -> Vec<Client> {
    SAMPLE_CLIENTS.iter().map(client_from_row).collect()
}

/// Cases reference `clients` by position, so pass the output of [`sample_clients`].
pub fn sample_cases(clients: &[Client]) -> Vec<Case> {
    SAMPLE_CASES
        .iter()
        .filter_map(|row| {
            let client = clients.get(row.client)?;

            Some(Case {
                id: Uuid::new_v4().to_string(),
                case_number: row.case_number.to_string(),
                title_bn: row.title_bn.to_string(),
                title_en: Some(row.title_en.to_string()),
                client_id: client.id.clone(),
                client_name: client.name_bn.clone(),
                case_type: row.case_type.to_string(),
                status: row.status,
                priority: row.priority,
                court_name: Some(row.court_name.to_string()),
                filing_date: Some(date(row.created)),
                next_hearing: row.next_hearing.map(date),
                description: Some(row.description.to_string()),
                created_at: midnight(row.created),
                updated_at: midnight(row.updated),
            })
        })
        .collect()
}

/// The two clients an unconfigured server starts with.
pub fn demo_clients(now: DateTime<Utc>) -> Vec<Client> {
    let rows = [
        ClientRow {
            name_bn: "মোহাম্মদ রহিম উদ্দিন",
            name_en: "Mohammad Rahim Uddin",
            nid: "1234567890123",
            phone: "+8801712345678",
            email: Some("rahim@example.com"),
            district: "ঢাকা",
            upazila: "ধানমন্ডি",
            address_details: "১২৩ নং বাড়ি, রোড নং ৫, ধানমন্ডি",
            notes: Some("ভালো ক্লায়েন্ট"),
            created: (2024, 1, 1),
        },
        ClientRow {
            name_bn: "ফাতেমা খাতুন",
            name_en: "Fatema Khatun",
            nid: "9876543210987",
            phone: "+8801987654321",
            email: Some("fatema@example.com"),
            district: "চট্টগ্রাম",
            upazila: "কোতোয়ালী",
            address_details: "৪৫৬ নং বাড়ি, আগ্রাবাদ",
            notes: Some("জরুরি কেস"),
            created: (2024, 1, 1),
        },
    ];

    rows.iter()
        .map(|row| Client {
            created_at: now,
            updated_at: now,
            ..client_from_row(row)
        })
        .collect()
}
