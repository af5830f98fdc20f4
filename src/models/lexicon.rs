// Closed vocabularies for Japanese identity documents.
// Tables are ordered: scans take the first entry present in the text, so
// longer tokens sit before the shorter tokens they contain.

/// Native-script gender tokens scanned over the whole text.
pub const GENDER_TOKENS: &[(&str, &str)] = &[
    ("男性", "MALE"),
    ("女性", "FEMALE"),
    ("男", "MALE"),
    ("女", "FEMALE"),
];

/// Values accepted after a gender label, keyed upper-case.
pub const GENDER_VALUES: &[(&str, &str)] = &[
    ("男性", "MALE"),
    ("女性", "FEMALE"),
    ("男", "MALE"),
    ("女", "FEMALE"),
    ("MALE", "MALE"),
    ("FEMALE", "FEMALE"),
    ("M", "MALE"),
    ("F", "FEMALE"),
];

/// Nationality / region tokens as printed on the card, with the canonical
/// English value.
pub const NATIONALITIES: &[(&str, &str)] = &[
    ("中国", "CHINA"),
    ("韓国", "SOUTH KOREA"),
    ("フィリピン", "PHILIPPINES"),
    ("ベトナム", "VIETNAM"),
    ("ブラジル", "BRAZIL"),
    ("ネパール", "NEPAL"),
    ("インドネシア", "INDONESIA"),
    ("台湾", "TAIWAN"),
    ("タイ", "THAILAND"),
    ("米国", "USA"),
    ("アメリカ", "USA"),
    ("インド", "INDIA"),
    ("ミャンマー", "MYANMAR"),
    ("バングラデシュ", "BANGLADESH"),
    ("スリランカ", "SRI LANKA"),
    ("パキスタン", "PAKISTAN"),
    ("ペルー", "PERU"),
];

/// Status of residence (在留資格). OCR variants map onto the printed form.
pub const RESIDENCE_STATUSES: &[(&str, &str)] = &[
    ("技術・人文知識・国際業務", "技術・人文知識・国際業務"),
    ("技術·人文知識·国際業務", "技術・人文知識・国際業務"),
    ("特定技能1号", "特定技能1号"),
    ("特定技能2号", "特定技能2号"),
    ("技能実習1号", "技能実習1号"),
    ("技能実習2号", "技能実習2号"),
    ("技能実習3号", "技能実習3号"),
    ("留学", "留学"),
    ("家族滞在", "家族滞在"),
    ("日本人の配偶者等", "日本人の配偶者等"),
    ("永住者の配偶者等", "永住者の配偶者等"),
    ("特別永住者", "特別永住者"),
    ("永住者", "永住者"),
    ("定住者", "定住者"),
    ("技能", "技能"),
    ("経営・管理", "経営・管理"),
    ("企業内転勤", "企業内転勤"),
    ("研究", "研究"),
    ("教育", "教育"),
    ("高度専門職1号", "高度専門職1号"),
    ("高度専門職2号", "高度専門職2号"),
    ("介護", "介護"),
    ("特定活動", "特定活動"),
];

/// Full work restriction (就労制限) sentences.
pub const WORK_RESTRICTIONS: &[&str] = &[
    "就労制限なし",
    "就労不可",
    "指定書記載機関での在留資格に基づく就労活動のみ可",
    "在留資格に基づく就労活動のみ可",
    "資格外活動許可書に記載された範囲内の就労可",
];

/// Sub-phrases checked when no full sentence is present.
pub const WORK_RESTRICTION_FRAGMENTS: &[(&str, &str)] = &[
    ("制限なし", "就労制限なし"),
    ("就労不可", "就労不可"),
    ("資格外活動許可", "資格外活動許可あり"),
];

/// Driving license categories (免許の種類), in the order they are reported.
pub const LICENSE_CATEGORIES: &[&str] = &[
    "大型", "中型", "準中型", "普通", "大特", "大自二", "普自二", "小特", "原付", "け引", "大二", "中二",
    "普二",
];

pub const LICENSE_CONDITIONS: &[&str] = &[
    "眼鏡等",
    "AT限定",
    "補聴器",
    "大型車(8t)に限る",
    "中型車(8t)に限る",
    "準中型車(5t)に限る",
];

/// Label words a romaji name capture must not contain.
pub const ROMAJI_NAME_EXCLUSIONS: &[&str] = &[
    "RESIDENCE",
    "CARD",
    "JAPAN",
    "IMMIGRATION",
    "DATE",
    "BIRTH",
    "NATIONALITY",
    "REGION",
    "STATUS",
    "PERIOD",
    "STAY",
    "EXPIRY",
    "WORK",
    "RESTRICTION",
    "NUMBER",
    "SEX",
];

/// Label fragments a native-script name capture must not contain.
pub const NATIVE_NAME_EXCLUSIONS: &[&str] = &["生年", "月日", "有効", "番号", "住所"];

pub const NATIONALITY_LABELS: &[&str] = &["NATIONALITY", "REGION", "国籍", "地域"];

pub const REGION_LABELS: &[&str] = &["国籍", "地域", "NATIONALITY", "REGION"];

pub const STATUS_LABELS: &[&str] = &["STATUS", "OF", "RESIDENCE", "在留資格"];

/// Values printed in the conditions box that mean "no condition".
pub const CONDITION_NON_VALUES: &[&str] = &["なし", "等"];
