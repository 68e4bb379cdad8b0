use crate::error::Result;
use crate::store::{KeyValueStore, DARK_MODE_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Anything other than a stored `"true"` is light, including read errors.
    pub(crate) fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(DARK_MODE_KEY) {
            Ok(Some(flag)) if flag == "true" => Self::Dark,
            Ok(_) => Self::Light,
            Err(e) => {
                tracing::warn!(error = %e, "could not read theme flag, using light");
                Self::Light
            }
        }
    }

    pub(crate) fn save(self, store: &mut dyn KeyValueStore) -> Result<()> {
        let flag = if self == Self::Dark { "true" } else { "false" };
        store.set(DARK_MODE_KEY, flag)
    }

    pub(crate) fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" | "true" | "on" => Some(Self::Dark),
            "light" | "false" | "off" => Some(Self::Light),
            _ => None,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_absent_flag_is_light() {
        assert_eq!(Theme::load(&MemoryStore::new()), Theme::Light);
    }

    #[test]
    fn test_stored_flag() {
        assert_eq!(Theme::load(&MemoryStore::with_value(DARK_MODE_KEY, "true")), Theme::Dark);
        assert_eq!(Theme::load(&MemoryStore::with_value(DARK_MODE_KEY, "false")), Theme::Light);
        assert_eq!(Theme::load(&MemoryStore::with_value(DARK_MODE_KEY, "yes")), Theme::Light);
    }

    #[test]
    fn test_save_writes_string_flag() {
        let mut store = MemoryStore::new();
        Theme::Dark.save(&mut store).unwrap();
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
        Theme::Dark.toggled().save(&mut store).unwrap();
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Theme::parse("Dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("light"), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
    }
}
