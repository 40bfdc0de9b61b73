//! Demonstration binary.
//!
//! Without arguments an in-memory catalog is seeded and a scripted edit is
//! run against it. `discount-editor <id>` loads discount `<id>` from the
//! configured remote catalog instead and reports what was found.

use std::error::Error;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use discount_editor::adapters::{
    HttpDiscountCatalog, InMemoryDiscountCatalog, SimulatedOptionRegistry, StaticValueOptions,
    ToastBoard,
};
use discount_editor::application::{DiscountEditor, EditorProps, EditorServices, LoadOutcome};
use discount_editor::config::EditorConfig;
use discount_editor::domain::discount::{DiscountRecord, DiscountScope};
use discount_editor::domain::foundation::{DiscountId, OptionId};
use discount_editor::domain::form::{AddNewField, FieldKey};
use discount_editor::ports::{DiscountCatalog, NamedRef};

const DEMO_DISCOUNT_ID: u64 = 42;

#[tokio::main]
async fn main() {
    let config = match EditorConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!("Editor run failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(config: &EditorConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.features.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(config: EditorConfig) -> Result<(), Box<dyn Error>> {
    let remote_id = std::env::args().nth(1).map(|arg| arg.parse::<u64>()).transpose()?;

    let board = ToastBoard::new(config.timing.notification_ttl());
    let values = Arc::new(StaticValueOptions::new(config.timing.value_fetch_latency()));
    let registry = Arc::new(SimulatedOptionRegistry::new(config.timing.add_option_latency()));

    let catalog: Arc<dyn DiscountCatalog> = match remote_id {
        Some(_) => {
            info!(base_url = %config.catalog.base_url, "Using remote discount catalog");
            Arc::new(HttpDiscountCatalog::new(config.catalog.http_config())?)
        }
        None => Arc::new(seeded_catalog(&config.currency)),
    };
    let discount_id = DiscountId::new(remote_id.unwrap_or(DEMO_DISCOUNT_ID));

    let props = EditorProps::new(|| info!("Navigated back"), discount_id);
    let services = EditorServices {
        catalog,
        values,
        registry,
        notifier: Arc::new(board.clone()),
    };
    let mut editor = DiscountEditor::new(props, services, &config);

    match editor.load().await? {
        LoadOutcome::Loaded { unresolved } => {
            info!(?unresolved, "Discount loaded");
        }
        outcome => {
            info!(?outcome, "Nothing to edit");
            editor.back();
            return Ok(());
        }
    }

    if remote_id.is_some() {
        info!(selection = ?editor.session().selection(), "Remote discount ready for editing");
        return Ok(());
    }

    // Scripted edit: a new duration, a new name, then submit.
    editor.begin_add_new(AddNewField::Duration)?;
    editor.set_draft(AddNewField::Duration, "3 Days")?;
    editor.submit_new_option(AddNewField::Duration).await?;

    editor.toggle_dropdown(FieldKey::DiscountName)?;
    editor.select(FieldKey::DiscountName, Some(OptionId::new(1)))?;

    let payload = editor.submit().await?;
    info!(payload = %serde_json::to_string(&payload)?, "Update sent");

    if let Some(navigation) = editor.take_pending_navigation() {
        navigation.await?;
    }

    for notification in board.history() {
        println!("{}", notification);
    }
    Ok(())
}

fn seeded_catalog(currency: &str) -> InMemoryDiscountCatalog {
    let record = DiscountRecord::new(DiscountId::new(DEMO_DISCOUNT_ID), "Happy Hour", DiscountScope::Item)
        .with_active(true)
        .with_item(2)
        .with_amount(120.0, currency)
        .with_duration("2 Hours");

    InMemoryDiscountCatalog::new()
        .with_products(vec![
            NamedRef::new(1, "Espresso"),
            NamedRef::new(2, "Cappuccino"),
            NamedRef::new(3, "Croissant"),
        ])
        .with_categories(vec![NamedRef::new(1, "Drinks"), NamedRef::new(2, "Bakery")])
        .with_discount_names(vec!["Black Friday".to_string(), "Happy Hour".to_string()])
        .with_record(record)
}
