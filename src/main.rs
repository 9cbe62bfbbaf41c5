use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

use todo_reminders::application::{Clock, PreferencesService, SystemClock, TodoStore};
use todo_reminders::config::{AppConfig, StorageBackend};
use todo_reminders::domain::TodoPersistence;
use todo_reminders::infrastructure::repositories::{
    JsonPreferencesRepository, JsonTodoRepository, MemoryTodoRepository, SqliteTodoRepository,
};
use todo_reminders::infrastructure::scheduler::{
    LoggingReminderSink, MemoryReminderQueue, ReminderDispatcher,
};
use todo_reminders::utils::setup_logging;

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {:#}", e);
            std::process::exit(2);
        }
    };
    setup_logging(config.log_level);

    if let Err(e) = run_host(config).await {
        error!("Error running reminder host: {:#}", e);
    }
}

fn open_persistence(config: &AppConfig) -> Result<Arc<dyn TodoPersistence>> {
    Ok(match config.storage_backend {
        StorageBackend::Json => Arc::new(JsonTodoRepository::new(&config.data_path)),
        StorageBackend::Sqlite => Arc::new(
            SqliteTodoRepository::new(&config.data_path)
                .with_context(|| format!("Failed to open {:?}", config.data_path))?,
        ),
        StorageBackend::Memory => Arc::new(MemoryTodoRepository::new()),
    })
}

async fn run_host(config: AppConfig) -> Result<()> {
    let clock: Arc<dyn Clock> = match config.timezone {
        Some(tz) => Arc::new(SystemClock::in_timezone(tz)),
        None => Arc::new(SystemClock::local()),
    };

    let preferences = PreferencesService::new(Arc::new(JsonPreferencesRepository::new(
        &config.preferences_path,
    )));
    info!("Theme: {}", preferences.theme());

    let persistence = open_persistence(&config)?;
    let queue = Arc::new(MemoryReminderQueue::new());
    let store = TodoStore::new(persistence, queue.clone(), clock.clone());

    let armed = store.rearm_reminders();
    let overdue = store.overdue(clock.now()).len();
    info!(
        "{} todo items loaded from {:?} backend, {} reminders armed, {} overdue",
        store.len(),
        config.storage_backend,
        armed,
        overdue
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let dispatcher = ReminderDispatcher::new(queue, Arc::new(LoggingReminderSink::new()), clock)
        .with_idle_poll(config.idle_poll);
    let handle = dispatcher.start(shutdown_rx);

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Shutting down");

    if shutdown_tx.send(true).is_err() {
        warn!("Reminder dispatcher already stopped");
    }
    handle.await.context("Reminder dispatcher panicked")?;
    Ok(())
}
