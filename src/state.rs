use std::sync::Arc;

use mongodb::Collection;

use super::{
    config::Config,
    database::{Translation, init_mongo},
};

pub struct AppState {
    pub config: Config,
    pub translations: Collection<Translation>,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let translations = init_mongo(&config).await;

        Arc::new(Self {
            config,
            translations,
        })
    }
}
