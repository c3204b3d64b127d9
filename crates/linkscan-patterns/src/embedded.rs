//! Embedded default pattern library (no file I/O).
//!
//! Weights: country names 100, strategic entities 80, cities 50,
//! provinces 40, strategic technology 25. Commodity keywords carry no
//! weight; they only feed the importance categorizer.

use crate::category::{CategorySpec, MatchMode};

pub const COUNTRY_NAMES: &str = "country_names";
pub const STRATEGIC_ENTITIES: &str = "strategic_entities";
pub const CHINESE_CITIES: &str = "chinese_cities";
pub const CHINESE_PROVINCES: &str = "chinese_provinces";
pub const STRATEGIC_TECH: &str = "strategic_tech";
pub const COMMODITY_KEYWORDS: &str = "commodity_keywords";

const COUNTRY_TRIGGERS: &[&str] = &[
    "people's republic of china",
    "peoples republic of china",
    "p.r. china",
    "p.r.c.",
    "prc",
    "china",
    "chinese",
    "zhonghua",
];

const ENTITY_TRIGGERS: &[&str] = &[
    // Telecom and electronics
    "huawei",
    "zte",
    "hikvision",
    "dahua",
    "hytera",
    "china mobile",
    "china telecom",
    "china unicom",
    "lenovo",
    "inspur",
    "sugon",
    "tencent",
    "alibaba",
    "baidu",
    "bytedance",
    "iflytek",
    "sensetime",
    "megvii",
    "yitu",
    "cloudwalk",
    "dji",
    "xiaomi",
    "oppo electronics",
    "tp-link",
    "quectel",
    "fibocom",
    // Semiconductors
    "semiconductor manufacturing international",
    "yangtze memory",
    "cxmt",
    "hisilicon",
    "unisoc",
    // State-owned defense, aerospace and industry
    "china aerospace science",
    "aviation industry corporation of china",
    "avic",
    "norinco",
    "china electronics technology group",
    "cetc",
    "china state shipbuilding",
    "comac",
    "crrc",
    "cosco",
    "sinopec",
    "petrochina",
    "cnooc",
    "china national nuclear",
    "china general nuclear",
    "state grid corporation of china",
    // Biotech and automotive
    "bgi genomics",
    "wuxi apptec",
    "mindray",
    "nuctech",
    "byd",
    "catl",
    "contemporary amperex",
];

const CITY_TRIGGERS: &[&str] = &[
    "beijing",
    "shanghai",
    "shenzhen",
    "guangzhou",
    "hangzhou",
    "wuhan",
    "chengdu",
    "tianjin",
    "nanjing",
    "xi'an",
    "chongqing",
    "suzhou",
    "dalian",
    "qingdao",
    "harbin",
    "hefei",
    "xiamen",
    "changsha",
    "zhengzhou",
    "shenyang",
    "dongguan",
    "ningbo",
    "kunming",
    "jinan",
    "hong kong",
    "macau",
];

const PROVINCE_TRIGGERS: &[&str] = &[
    "guangdong",
    "zhejiang",
    "jiangsu",
    "shandong",
    "fujian",
    "hubei",
    "sichuan",
    "hunan",
    "henan",
    "hebei",
    "liaoning",
    "anhui",
    "shaanxi",
    "shanxi",
    "jilin",
    "heilongjiang",
    "jiangxi",
    "yunnan",
    "guizhou",
    "guangxi",
    "hainan",
    "gansu",
    "qinghai",
    "ningxia",
    "xinjiang",
    "tibet",
    "xizang",
    "inner mongolia",
];

const TECH_TRIGGERS: &[&str] = &[
    "semiconductor",
    "integrated circuit",
    "quantum",
    "artificial intelligence",
    "machine learning",
    "hypersonic",
    "5g",
    "telecommunications equipment",
    "video surveillance",
    "facial recognition",
    "unmanned aerial",
    "drone",
    "satellite",
    "lidar",
    "lithium battery",
    "rare earth",
    "biotechnology",
    "genomic sequencing",
    "supercomputer",
    "radar",
    "encryption",
];

const COMMODITY_TRIGGERS: &[&str] = &[
    "laptop",
    "thinkpad",
    "notebook computer",
    "desktop computer",
    "computer monitor",
    "computer hardware",
    "printer",
    "toner",
    "keyboard",
    "office supplies",
    "furniture",
    "cell phone",
    "smartphone",
    "tablet",
    "usb cable",
];

/// Known substring collisions and place names that are not China links.
const EXCLUSIONS: &[&str] = &[
    "aztec environmental",
    "china grove",
    "china spring",
    "china lake",
    "china king",
    "china garden",
    "china wok",
    "china buffet",
    "china bistro",
    "fine china",
    "china cabinet",
    "bone china",
    "indochina",
    "chinatown",
    "ethnic tibet",
    "byd lighting",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The default categories, in scoring order.
pub fn categories() -> Vec<CategorySpec> {
    vec![
        CategorySpec::new(COUNTRY_NAMES, 100)
            .mode(MatchMode::Word)
            .triggers(owned(COUNTRY_TRIGGERS)),
        CategorySpec::new(STRATEGIC_ENTITIES, 80).triggers(owned(ENTITY_TRIGGERS)),
        CategorySpec::new(CHINESE_CITIES, 50)
            .mode(MatchMode::Word)
            .triggers(owned(CITY_TRIGGERS)),
        CategorySpec::new(CHINESE_PROVINCES, 40)
            .mode(MatchMode::Word)
            .triggers(owned(PROVINCE_TRIGGERS)),
        CategorySpec::new(STRATEGIC_TECH, 25)
            .mode(MatchMode::Word)
            .triggers(owned(TECH_TRIGGERS)),
        CategorySpec::new(COMMODITY_KEYWORDS, 0).triggers(owned(COMMODITY_TRIGGERS)),
    ]
}

/// The default exclusion list.
pub fn exclusions() -> Vec<String> {
    owned(EXCLUSIONS)
}
