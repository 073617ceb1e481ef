use std::{collections::BTreeMap, path::Path};

/// Language used when neither the requested language nor its base has a caption.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Caption text for one screenshot: a plain string or a per-language map.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CaptionEntry {
    /// Same caption for every language.
    Text(String),
    /// Language code to caption.
    Localized(BTreeMap<String, String>),
}

impl CaptionEntry {
    /// Caption for `lang`.
    ///
    /// Localized entries try the exact code, then the base language (`de` for `de-AT` or
    /// `de_AT`), then English. Blank captions count as missing.
    pub fn resolve(&self, lang: &str) -> Option<&str> {
        match self {
            Self::Text(text) => non_blank(text),
            Self::Localized(map) => {
                let base = lang.split(['-', '_']).next().unwrap_or(lang);
                map.get(lang)
                    .and_then(|s| non_blank(s))
                    .or_else(|| {
                        map.iter()
                            .filter(|(k, _)| k.split(['-', '_']).next() == Some(base))
                            .find_map(|(_, v)| non_blank(v))
                    })
                    .or_else(|| {
                        map.iter()
                            .filter(|(k, _)| k.split(['-', '_']).next() == Some(FALLBACK_LANGUAGE))
                            .find_map(|(_, v)| non_blank(v))
                    })
            }
        }
    }
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() { None } else { Some(s) }
}

/// Screenshot file name to caption.
pub type CaptionMap = BTreeMap<String, CaptionEntry>;

/// Caption for a screenshot, matched by file name and then by file stem.
pub fn caption_for<'a>(map: &'a CaptionMap, screenshot: &Path, lang: &str) -> Option<&'a str> {
    let name = screenshot.file_name().and_then(|s| s.to_str())?;
    let entry = map.get(name).or_else(|| {
        let stem = screenshot.file_stem().and_then(|s| s.to_str())?;
        map.get(stem)
    })?;
    entry.resolve(lang)
}

#[cfg(test)]
#[path = "../../tests/unit/config/captions.rs"]
mod tests;
