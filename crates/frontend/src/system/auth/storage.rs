use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlDocument, Storage, StorageEvent};

use crate::shared::api_utils::AppConfig;

/// Recognized token keys, highest priority first
pub const TOKEN_KEYS: [&str; 3] = ["profitup_token", "token", "access_token"];

/// Key written by [`TokenStore::save`]
pub const PRIMARY_KEY: &str = TOKEN_KEYS[0];

/// A place a token may be persisted in
pub trait TokenSource {
    fn read(&self, key: &str) -> Option<String>;
}

impl TokenSource for Storage {
    fn read(&self, key: &str) -> Option<String> {
        self.get_item(key).ok().flatten()
    }
}

/// Snapshot of `document.cookie`
pub struct CookieJar(pub String);

impl TokenSource for CookieJar {
    fn read(&self, key: &str) -> Option<String> {
        read_cookie(&self.0, key)
    }
}

/// Value of cookie `name` in a `document.cookie` string, percent-decoded
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
}

/// First non-blank token: every key of the first source, then the next
/// source, then `fallback`.
pub fn lookup_token(sources: &[&dyn TokenSource], fallback: Option<&str>) -> Option<String> {
    sources
        .iter()
        .flat_map(|source| TOKEN_KEYS.iter().filter_map(move |key| source.read(key)))
        .chain(fallback.map(str::to_string))
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
}

/// What a `storage` event from another tab means for the token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenChange {
    Set(String),
    /// Removed or cleared: look the token up again
    Rescan,
}

/// `key == None` is `storage.clear()`; unrecognized keys are ignored
pub fn token_change(key: Option<&str>, new_value: Option<&str>) -> Option<TokenChange> {
    match key {
        None => Some(TokenChange::Rescan),
        Some(key) if TOKEN_KEYS.contains(&key) => {
            match new_value.map(str::trim).filter(|v| !v.is_empty()) {
                Some(value) => Some(TokenChange::Set(value.to_string())),
                None => Some(TokenChange::Rescan),
            }
        }
        Some(_) => None,
    }
}

/// `profitup_token=<v>; path=/; SameSite=Lax`
pub fn token_cookie(name: &str, token: &str) -> String {
    format!("{}={}; path=/; SameSite=Lax", name, urlencoding::encode(token))
}

pub fn expired_cookie(name: &str) -> String {
    format!(
        "{}=; path=/; expires=Thu, 01 Jan 1970 00:00:00 GMT; SameSite=Lax",
        name
    )
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

fn session_storage() -> Option<Storage> {
    window()?.session_storage().ok()?
}

fn html_document() -> Option<HtmlDocument> {
    window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

fn cookie_jar() -> Option<CookieJar> {
    html_document()?.cookie().ok().map(CookieJar)
}

fn write_cookie(cookie: &str) {
    if let Some(doc) = html_document() {
        let _ = doc.set_cookie(cookie);
    }
}

fn read_browser_token(fallback: Option<&str>) -> Option<String> {
    let local = local_storage();
    let session = session_storage();
    let cookies = cookie_jar();

    let mut sources: Vec<&dyn TokenSource> = Vec::new();
    if let Some(s) = &local {
        sources.push(s);
    }
    if let Some(s) = &session {
        sources.push(s);
    }
    if let Some(c) = &cookies {
        sources.push(c);
    }
    lookup_token(&sources, fallback)
}

/// Where the session persists its token
pub trait TokenPersistence {
    fn current(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Reactive bearer token backed by browser storage
#[derive(Clone, Copy)]
pub struct TokenStore {
    token: RwSignal<Option<String>>,
    ready: RwSignal<bool>,
    fallback: StoredValue<Option<String>>,
}

impl TokenStore {
    /// Reads the token synchronously; `ready` is true on return
    pub fn init(config: &AppConfig) -> Self {
        let fallback = config.dev_token.clone();
        let token = read_browser_token(fallback.as_deref());
        log::debug!("token store initialized, token present: {}", token.is_some());
        Self {
            token: RwSignal::new(token),
            ready: RwSignal::new(true),
            fallback: StoredValue::new(fallback),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.get()
    }

    pub fn token_untracked(&self) -> Option<String> {
        self.token.get_untracked()
    }

    pub fn ready(&self) -> bool {
        self.ready.get()
    }

    /// Re-runs the lookup over every source
    pub fn rescan(&self) -> Option<String> {
        let token = self.fallback.with_value(|f| read_browser_token(f.as_deref()));
        self.token.set(token.clone());
        token
    }

    /// Follows token changes made in other tabs. `on_change` receives the
    /// resulting token after every recognized change.
    pub fn subscribe(&self, on_change: impl Fn(Option<String>) + 'static) {
        let store = *self;
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some(event) = event.dyn_ref::<StorageEvent>() else {
                return;
            };
            let key = event.key();
            let new_value = event.new_value();
            let Some(change) = token_change(key.as_deref(), new_value.as_deref()) else {
                return;
            };
            log::info!("token changed in another tab ({:?})", key);
            let token = match change {
                TokenChange::Set(token) => {
                    store.token.set(Some(token.clone()));
                    Some(token)
                }
                TokenChange::Rescan => store.rescan(),
            };
            on_change(token);
        }) as Box<dyn FnMut(_)>);

        if let Some(w) = window() {
            let _ = w.add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref());
            // one listener for the lifetime of the app
            closure.forget();
        }
    }
}

impl TokenPersistence for TokenStore {
    fn current(&self) -> Option<String> {
        self.token_untracked()
    }

    fn save(&self, token: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(PRIMARY_KEY, token);
        }
        write_cookie(&token_cookie(PRIMARY_KEY, token));
        self.token.set(Some(token.to_string()));
    }

    fn clear(&self) {
        for storage in [local_storage(), session_storage()].into_iter().flatten() {
            for key in TOKEN_KEYS {
                let _ = storage.remove_item(key);
            }
        }
        for key in TOKEN_KEYS {
            write_cookie(&expired_cookie(key));
        }
        self.token.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Map(HashMap<&'static str, &'static str>);

    impl TokenSource for Map {
        fn read(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    fn map(pairs: &[(&'static str, &'static str)]) -> Map {
        Map(pairs.iter().copied().collect())
    }

    #[test]
    fn test_key_priority_within_source() {
        let local = map(&[("access_token", "c"), ("token", "b")]);
        assert_eq!(lookup_token(&[&local], None), Some("b".to_string()));
    }

    #[test]
    fn test_source_order_wins_over_key_order() {
        let local = map(&[("access_token", "local")]);
        let session = map(&[("profitup_token", "session")]);
        assert_eq!(
            lookup_token(&[&local, &session], None),
            Some("local".to_string())
        );
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let local = map(&[("profitup_token", "   ")]);
        let cookies = CookieJar("theme=dark; token=%20abc%20".to_string());
        assert_eq!(
            lookup_token(&[&local, &cookies], None),
            Some("abc".to_string())
        );
    }

    #[test]
    fn test_fallback_last() {
        let empty = map(&[]);
        assert_eq!(lookup_token(&[&empty], Some("dev")), Some("dev".to_string()));
        assert_eq!(lookup_token(&[&empty], None), None);
    }

    #[test]
    fn test_read_cookie() {
        let jar = "a=1; profitup_token=eyJ%2Bx; b=2";
        assert_eq!(read_cookie(jar, "profitup_token"), Some("eyJ+x".to_string()));
        assert_eq!(read_cookie(jar, "token"), None);
        assert_eq!(read_cookie("", "a"), None);
    }

    #[test]
    fn test_storage_event_filter() {
        assert_eq!(
            token_change(Some("token"), Some("t2")),
            Some(TokenChange::Set("t2".to_string()))
        );
        assert_eq!(token_change(Some("profitup_token"), None), Some(TokenChange::Rescan));
        assert_eq!(token_change(Some("access_token"), Some(" ")), Some(TokenChange::Rescan));
        assert_eq!(token_change(None, None), Some(TokenChange::Rescan));
        assert_eq!(token_change(Some("theme"), Some("dark")), None);
    }

    #[test]
    fn test_cookie_strings() {
        assert_eq!(
            token_cookie("profitup_token", "a b"),
            "profitup_token=a%20b; path=/; SameSite=Lax"
        );
        assert!(expired_cookie("token").starts_with("token=; path=/; expires=Thu, 01 Jan 1970"));
    }
}
