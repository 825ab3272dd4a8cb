//! Keyword classification of free-text fields
//!
//! Some list filters work on labels that are not stored on the record: the
//! region of a user is read off the address, the category of a sale off the
//! product name. A [`KeywordClassifier`] walks an ordered rule list and returns
//! the label of the first keyword found in the text. Rule order is significant
//! (`경기도 광주시` is 경기, not 광주).

/// Label used when no rule matches
pub const FALLBACK_LABEL: &str = "기타";

/// Ordered `(keyword, label)` rules with a fallback label
#[derive(Debug, Clone, Copy)]
pub struct KeywordClassifier {
    rules: &'static [(&'static str, &'static str)],
    fallback: &'static str,
}

impl KeywordClassifier {
    pub const fn new(rules: &'static [(&'static str, &'static str)], fallback: &'static str) -> Self {
        Self { rules, fallback }
    }

    /// Label of the first rule whose keyword occurs in `text`
    pub fn classify(&self, text: &str) -> &'static str {
        self.rules
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map(|(_, label)| *label)
            .unwrap_or(self.fallback)
    }

    /// Distinct labels in rule order, fallback last
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels: Vec<&'static str> = Vec::with_capacity(self.rules.len() + 1);
        for (_, label) in self.rules {
            if !labels.contains(label) {
                labels.push(*label);
            }
        }
        if !labels.contains(&self.fallback) {
            labels.push(self.fallback);
        }
        labels
    }

    pub fn fallback(&self) -> &'static str {
        self.fallback
    }
}

/// Address → region
pub const REGIONS: KeywordClassifier = KeywordClassifier::new(
    &[
        ("서울", "서울"),
        ("경기", "경기"),
        ("인천", "인천"),
        ("부산", "부산"),
        ("대구", "대구"),
        ("광주", "광주"),
        ("대전", "대전"),
        ("울산", "울산"),
        ("세종", "세종"),
        ("강원", "강원"),
        ("충북", "충북"),
        ("충청북도", "충북"),
        ("충남", "충남"),
        ("충청남도", "충남"),
        ("전북", "전북"),
        ("전라북도", "전북"),
        ("전남", "전남"),
        ("전라남도", "전남"),
        ("경북", "경북"),
        ("경상북도", "경북"),
        ("경남", "경남"),
        ("경상남도", "경남"),
        ("제주", "제주"),
    ],
    FALLBACK_LABEL,
);

/// Product name → product category
pub const PRODUCT_CATEGORIES: KeywordClassifier = KeywordClassifier::new(
    &[
        ("꽃바구니", "꽃바구니"),
        ("꽃다발", "꽃다발"),
        ("부케", "꽃다발"),
        ("화분", "화분"),
        ("관엽", "화분"),
        ("동양란", "난"),
        ("서양란", "난"),
        ("호접란", "난"),
        ("난초", "난"),
        ("화환", "화환"),
        ("케이크", "케이크"),
    ],
    FALLBACK_LABEL,
);
