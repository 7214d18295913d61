use std::collections::HashMap;
use std::rc::Rc;

pub const LANGUAGE_KEY: &str = "portfolio-lang";
pub const FALLBACK_LANGUAGE: Language = Language::En;

pub type Dictionary = HashMap<String, String>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Language {
    En,
    Pt,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::En, Self::Pt];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Pt => "pt",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "en" => Some(Self::En),
            "pt" => Some(Self::Pt),
            _ => None,
        }
    }

    // Browser hints look like "pt-BR" or "en-US"; anything outside the
    // supported set falls back to English.
    pub fn from_hint(hint: &str) -> Self {
        let lowered = hint.to_ascii_lowercase();
        if lowered == "pt" || lowered.starts_with("pt-") {
            Self::Pt
        } else {
            Self::En
        }
    }

    pub fn dictionary_path(self) -> String {
        format!("lang/{}.json", self.as_str())
    }

    pub fn switch_label(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Pt => "PT",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Translations {
    pub lang: Language,
    current: Rc<Dictionary>,
    fallback: Rc<Dictionary>,
}

impl Translations {
    pub fn new(lang: Language, current: Rc<Dictionary>, fallback: Rc<Dictionary>) -> Self {
        Self {
            lang,
            current,
            fallback,
        }
    }

    pub fn fallback_dictionary(&self) -> Rc<Dictionary> {
        self.fallback.clone()
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.current
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
    }

    // Missing keys render as the literal key so content authors can spot them.
    pub fn t(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(value) => value.to_string(),
            None => {
                #[cfg(target_arch = "wasm32")]
                gloo_console::warn!(format!("missing translation key: {key}"));
                key.to_string()
            }
        }
    }

    pub fn t_with(&self, key: &str, vars: &[(&str, &str)]) -> String {
        substitute(&self.t(key), vars)
    }
}

pub fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let mut output = template.to_string();
    for (name, value) in vars {
        output = output.replace(&format!("{{{name}}}"), value);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(pairs: &[(&str, &str)]) -> Rc<Dictionary> {
        Rc::new(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    fn translations(current: &[(&str, &str)], fallback: &[(&str, &str)]) -> Translations {
        Translations::new(Language::Pt, dictionary(current), dictionary(fallback))
    }

    #[test]
    fn current_dictionary_wins_over_fallback() {
        let t = translations(&[("title", "Olá")], &[("title", "Hello")]);
        assert_eq!(t.t("title"), "Olá");
    }

    #[test]
    fn missing_current_key_falls_back() {
        let t = translations(&[], &[("title", "Hello")]);
        assert_eq!(t.t("title"), "Hello");
    }

    #[test]
    fn key_missing_everywhere_renders_as_the_key() {
        let t = translations(&[], &[]);
        assert_eq!(t.t("projects_title"), "projects_title");
    }

    #[test]
    fn placeholders_are_substituted() {
        let t = translations(&[("greet", "Hi {name}, {name}!")], &[]);
        assert_eq!(t.t_with("greet", &[("name", "Ana")]), "Hi Ana, Ana!");
    }

    #[test]
    fn unmatched_placeholders_stay_verbatim() {
        let t = translations(&[("greet", "Hi {name} from {city}")], &[]);
        assert_eq!(
            t.t_with("greet", &[("name", "Ana")]),
            "Hi Ana from {city}"
        );
    }

    #[test]
    fn hint_restricted_to_supported_set() {
        assert_eq!(Language::from_hint("pt-BR"), Language::Pt);
        assert_eq!(Language::from_hint("pt"), Language::Pt);
        assert_eq!(Language::from_hint("en-US"), Language::En);
        assert_eq!(Language::from_hint("fr-FR"), Language::En);
    }

    #[test]
    fn stored_preference_round_trips() {
        for lang in Language::ALL {
            assert_eq!(Language::from_str(lang.as_str()), Some(lang));
        }
        assert_eq!(Language::from_str("de"), None);
    }
}
