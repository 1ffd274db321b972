use std::{collections::HashMap, fmt::Display};

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Language {
    English,
    Myanmar,
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "english"),
            Language::Myanmar => write!(f, "myanmar"),
        }
    }
}

const PHRASES: &[(&str, &str)] = &[
    ("hello", "မင်္ဂလာပါ"),
    ("goodbye", "ဘိုင်ဘိုင်"),
    ("thank you", "ကျေးဇူးတင်ပါတယ်"),
    ("yes", "ဟုတ်ကဲ့"),
    ("no", "မဟုတ်ပါ"),
];

/// Phrase book translator. Works word by word: every word is looked up on its own and unknown
/// words are passed through unchanged. Entries made of several words, like "thank you", are
/// never matched by that lookup.
pub struct Translator {
    dictionaries: HashMap<Language, HashMap<&'static str, &'static str>>,
}

impl Default for Translator {
    fn default() -> Self {
        let english = PHRASES.iter().copied().collect();
        let myanmar = PHRASES
            .iter()
            .map(|(english, myanmar)| (*myanmar, *english))
            .collect();
        Self {
            dictionaries: HashMap::from([(Language::English, english), (Language::Myanmar, myanmar)]),
        }
    }
}

impl Translator {
    /// `None` when there is nothing to translate.
    pub fn translate(&self, from: Language, text: &str) -> Option<String> {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }
        let dictionary = &self.dictionaries[&from];
        let translated = text
            .split_whitespace()
            .map(|word| dictionary.get(word).copied().unwrap_or(word))
            .collect::<Vec<_>>();
        Some(translated.join(" "))
    }
}
