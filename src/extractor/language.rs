use whatlang::{Lang, detect};

use crate::models::backend::{Detection, LanguageDetection};

const MIN_CONFIDENCE: f64 = 0.25;

/// Trigram-based detection running in-process.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl LanguageDetection for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<Detection> {
        detect_language(text)
    }
}

pub fn detect_language(text: &str) -> Option<Detection> {
    if text.trim().is_empty() {
        return None;
    }

    let info = detect(text)?;
    if info.confidence() < MIN_CONFIDENCE {
        return None;
    }

    Some(Detection {
        code: lang_to_code(info.lang()),
        confidence: info.confidence(),
    })
}

fn lang_to_code(lang: Lang) -> String {
    let code = match lang {
        Lang::Eng => "en",
        Lang::Rus => "ru",
        Lang::Cmn => "zh",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Por => "pt",
        Lang::Ita => "it",
        Lang::Nld => "nl",
        Lang::Pol => "pl",
        Lang::Tur => "tr",
        Lang::Swe => "sv",
        Lang::Dan => "da",
        Lang::Nob => "no",
        Lang::Fin => "fi",
        Lang::Heb => "he",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        Lang::Urd => "ur",
        Lang::Ben => "bn",
        Lang::Pes => "fa",
        Lang::Ukr => "uk",
        Lang::Ind => "id",
        Lang::Tha => "th",
        Lang::Vie => "vi",
        Lang::Tam => "ta",
        Lang::Tel => "te",
        Lang::Mar => "mr",
        Lang::Guj => "gu",
        Lang::Pan => "pa",
        Lang::Nep => "ne",
        Lang::Sin => "si",
        Lang::Mya => "my",
        Lang::Amh => "am",
        Lang::Aze => "az",
        Lang::Uzb => "uz",
        _ => return format!("{:?}", lang).to_lowercase(),
    };
    code.to_string()
}

/// Display name for a language code; unknown codes are shown upper-cased.
pub fn language_name(code: &str) -> String {
    let name = match code {
        "en" => "English",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "it" => "Italian",
        "pt" => "Portuguese",
        "ar" => "Arabic",
        "hi" => "Hindi",
        "ur" => "Urdu",
        "zh" => "Chinese",
        "ja" => "Japanese",
        "ko" => "Korean",
        "ru" => "Russian",
        "tr" => "Turkish",
        "nl" => "Dutch",
        "sv" => "Swedish",
        "da" => "Danish",
        "no" => "Norwegian",
        "fi" => "Finnish",
        "pl" => "Polish",
        "unknown" => "Unknown",
        other => return other.to_uppercase(),
    };
    name.to_string()
}
