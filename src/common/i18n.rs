// src/common/i18n.rs

use std::collections::HashMap;

use anyhow::Context;

pub const DEFAULT_LANG: &str = "en";

// Catálogos embutidos no binário em tempo de compilação
const CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.json")),
    ("pt", include_str!("../../locales/pt.json")),
];

/// Guarda as mensagens traduzidas, indexadas por idioma e chave.
///
/// A busca cai para o inglês quando o idioma ou a chave não existem,
/// e por último devolve a própria chave.
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut catalogs = HashMap::new();
        for (lang, raw) in CATALOGS {
            let messages: HashMap<String, String> = serde_json::from_str(raw)
                .with_context(|| format!("Catálogo de mensagens '{}' inválido", lang))?;
            catalogs.insert(lang.to_string(), messages);
        }
        Ok(Self { catalogs })
    }

    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.lookup(lang, key)
            .or_else(|| self.lookup(DEFAULT_LANG, key))
            .map(str::to_owned)
            .unwrap_or_else(|| key.to_string())
    }

    /// Traduz e substitui os marcadores `{nome}` pelos valores informados.
    pub fn translate_with(&self, lang: &str, key: &str, args: &[(&str, &str)]) -> String {
        let mut message = self.translate(lang, key);
        for (name, value) in args {
            message = message.replace(&format!("{{{}}}", name), value);
        }
        message
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.catalogs
            .get(lang)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> I18nStore {
        I18nStore::load().expect("catálogos embutidos são válidos")
    }

    #[rstest]
    #[case("en", "Professor already exists")]
    #[case("pt", "Professor já cadastrado")]
    #[case("fr", "Professor already exists")]
    fn translates_with_fallback_to_english(store: I18nStore, #[case] lang: &str, #[case] expected: &str) {
        assert_eq!(store.translate(lang, "professor.already_exists"), expected);
    }

    #[rstest]
    fn unknown_key_returns_the_key(store: I18nStore) {
        assert_eq!(store.translate("pt", "nao.existe"), "nao.existe");
    }

    #[rstest]
    fn replaces_placeholders(store: I18nStore) {
        let msg = store.translate_with("en", "not_found", &[("entity", "Aluno")]);
        assert_eq!(msg, "Aluno not found");
    }

    #[rstest]
    fn every_catalog_has_the_same_keys(store: I18nStore) {
        let en = &store.catalogs["en"];
        let pt = &store.catalogs["pt"];
        for key in en.keys() {
            assert!(pt.contains_key(key), "chave '{}' ausente no catálogo pt", key);
        }
        assert_eq!(en.len(), pt.len());
    }
}
