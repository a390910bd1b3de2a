//! Composition root
//!
//! `App` owns the store and hands it to page consumers by reference.

use rolling_logger::{LoggerError, LoggerHandle};

use crate::config::AppConfig;
use crate::domain::{DomainResult, Todo};
use crate::repository::FileStore;
use crate::route::Route;
use crate::store::{StatusSummary, TodoStore};

/// What a page consumer needs to render a route
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Summary(StatusSummary),
    CreateForm,
    Detail(Option<&'a Todo>),
    List(&'a [Todo]),
}

pub struct App {
    config: AppConfig,
    store: TodoStore<FileStore>,
}

impl App {
    /// Open the file-backed store described by `config` and load it.
    pub fn open(config: AppConfig) -> DomainResult<Self> {
        let storage = FileStore::open(&config.data_dir)?;
        let store = TodoStore::load(storage, config.storage_key.clone())?;
        log::info!(
            "[App] Opened {} with {} todo(s) in {}",
            config.app_name,
            store.len(),
            config.data_dir.display()
        );
        Ok(Self { config, store })
    }

    /// Install the global rolling logger. Can only succeed once per process.
    pub fn init_logging(config: &AppConfig) -> Result<LoggerHandle, LoggerError> {
        rolling_logger::init_logger(&config.log_dir, &config.app_name)
    }

    /// Resolve config from the environment, start logging and open the store.
    ///
    /// A logger that fails to start is reported on stderr; a store that
    /// fails to load is returned as an error.
    pub fn bootstrap() -> DomainResult<Self> {
        let config = AppConfig::from_env()?;
        if let Err(e) = Self::init_logging(&config) {
            eprintln!("[App] Logging disabled: {}", e);
        }
        Self::open(config).inspect_err(|e| {
            let _ = rolling_logger::error(&format!("Store load failed: {}", e));
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &TodoStore<FileStore> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TodoStore<FileStore> {
        &mut self.store
    }

    pub fn resolve(&self, route: &Route) -> View<'_> {
        match route {
            Route::Home => View::Summary(self.store.summary()),
            Route::Create => View::CreateForm,
            Route::TodoDetail { id } => View::Detail(self.store.get_todo_by_id(*id)),
            Route::Overview => View::List(self.store.todos()),
        }
    }
}
