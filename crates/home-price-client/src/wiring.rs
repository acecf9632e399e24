use std::error::Error;

use api::HttpPredictor;
use session::{FormSession, JsonFileStore, KeyValueStore, MemoryStore, SubmissionPipeline};

use crate::config::{Config, StoreLocation};

pub type ClientSession = FormSession<Box<dyn KeyValueStore>>;

pub fn open_store(location: &StoreLocation) -> Result<Box<dyn KeyValueStore>, Box<dyn Error>> {
    let store: Box<dyn KeyValueStore> = match location {
        StoreLocation::Memory => Box::new(MemoryStore::new()),
        StoreLocation::File(path) => Box::new(JsonFileStore::open(path.clone())?),
    };
    Ok(store)
}

pub fn build_client(
    config: &Config,
) -> Result<(ClientSession, SubmissionPipeline<HttpPredictor>), Box<dyn Error>> {
    debug_assert!(form_core::module_ready());
    debug_assert!(session::module_ready());
    debug_assert!(api::module_ready());
    debug_assert!(ui::module_ready());

    let store = open_store(&config.store)?;
    let session = FormSession::load(store, config.system_theme);
    let predictor = HttpPredictor::new(config.backend_url.clone())?;
    tracing::info!(backend = %predictor.endpoint(), store = ?config.store, "client ready");

    Ok((session, SubmissionPipeline::new(predictor)))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use form_core::Theme;
    use session::{storage::THEME_KEY, KeyValueStore};

    use super::{build_client, open_store};
    use crate::config::{Config, StoreLocation};

    #[test]
    fn file_store_preferences_survive_a_restart() {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let root = std::env::temp_dir().join(format!("home-price-wiring-{unique}"));
        let config = Config {
            backend_url: "http://127.0.0.1:5000/".parse().unwrap(),
            store: StoreLocation::File(root.join("nested").join("store.json")),
            system_theme: None,
        };

        let (mut first, _) = build_client(&config).unwrap();
        first.apply_theme(Theme::Dark);
        drop(first);
        let (second, pipeline) = build_client(&config).unwrap();

        assert_eq!(second.theme(), Theme::Dark);
        assert_eq!(second.store().get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(pipeline.predictor().endpoint().as_str(), "http://127.0.0.1:5000/");

        fs::remove_dir_all(&root).expect("temp store directory should be removable");
    }

    #[test]
    fn memory_store_starts_empty_and_uses_system_hint() {
        let config = Config {
            backend_url: "http://127.0.0.1:5000/".parse().unwrap(),
            store: StoreLocation::Memory,
            system_theme: Some(Theme::Dark),
        };

        let store = open_store(&config.store).unwrap();
        let (session, _) = build_client(&config).unwrap();

        assert_eq!(store.get(THEME_KEY), None);
        assert_eq!(session.theme(), Theme::Dark);
        assert!(session.history().is_empty());
    }
}
