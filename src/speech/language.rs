use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recognition locales offered by the language picker.
///
/// The set is closed: anything outside it is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "es-ES")]
    EsEs,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "it-IT")]
    ItIt,
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "ja-JP")]
    JaJp,
    #[serde(rename = "ko-KR")]
    KoKr,
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Language {
    /// Every supported locale, in picker order.
    pub const ALL: [Language; 10] = [
        Language::EnUs,
        Language::EnGb,
        Language::EsEs,
        Language::FrFr,
        Language::DeDe,
        Language::ItIt,
        Language::PtBr,
        Language::JaJp,
        Language::KoKr,
        Language::ZhCn,
    ];

    /// BCP-47-style tag passed to the recognition engine.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::EnUs => "en-US",
            Language::EnGb => "en-GB",
            Language::EsEs => "es-ES",
            Language::FrFr => "fr-FR",
            Language::DeDe => "de-DE",
            Language::ItIt => "it-IT",
            Language::PtBr => "pt-BR",
            Language::JaJp => "ja-JP",
            Language::KoKr => "ko-KR",
            Language::ZhCn => "zh-CN",
        }
    }

    /// Human-readable name for the language picker.
    pub fn label(&self) -> &'static str {
        match self {
            Language::EnUs => "English (US)",
            Language::EnGb => "English (UK)",
            Language::EsEs => "Español",
            Language::FrFr => "Français",
            Language::DeDe => "Deutsch",
            Language::ItIt => "Italiano",
            Language::PtBr => "Português (Brasil)",
            Language::JaJp => "日本語",
            Language::KoKr => "한국어",
            Language::ZhCn => "中文 (简体)",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language tag: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .find(|language| language.tag() == s)
            .copied()
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
