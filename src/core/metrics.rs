//! Prometheus metrics for the bot
//!
//! Counters only: inbound updates, resolved menu actions and failed
//! Telegram calls. Exposed at `/metrics` by the web server.

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec, Encoder, TextEncoder};

use crate::navigator::Action;

lazy_static! {
    /// Inbound updates by kind
    /// Labels: kind (message/callback_query/other)
    pub static ref UPDATES_TOTAL: CounterVec = register_counter_vec!(
        "pagebot_updates_total",
        "Total number of updates received from Telegram",
        &["kind"]
    )
    .unwrap();

    /// Menu actions resolved by the navigator
    /// Labels: action (start/open_page1/open_page2/back_to_menu/unknown)
    pub static ref MENU_ACTIONS_TOTAL: CounterVec = register_counter_vec!(
        "pagebot_menu_actions_total",
        "Total number of menu actions dispatched",
        &["action"]
    )
    .unwrap();

    /// Failed Telegram requests
    /// Labels: operation (send_message/edit_message/answer_callback)
    pub static ref TELEGRAM_FAILURES_TOTAL: CounterVec = register_counter_vec!(
        "pagebot_telegram_failures_total",
        "Total number of failed Telegram API calls",
        &["operation"]
    )
    .unwrap();
}

/// Forces registration so every series shows up on the first scrape.
pub fn init_metrics() {
    lazy_static::initialize(&UPDATES_TOTAL);
    lazy_static::initialize(&MENU_ACTIONS_TOTAL);
    lazy_static::initialize(&TELEGRAM_FAILURES_TOTAL);
    log::info!("Metrics registry initialized");
}

pub fn record_update(kind: &str) {
    UPDATES_TOTAL.with_label_values(&[kind]).inc();
}

/// `None` is an identifier outside the action set and counts as `unknown`.
pub fn record_menu_action(action: Option<Action>) {
    let label = action.map_or("unknown", |a| a.as_str());
    MENU_ACTIONS_TOTAL.with_label_values(&[label]).inc();
}

pub fn record_telegram_failure(operation: &str) {
    TELEGRAM_FAILURES_TOTAL.with_label_values(&[operation]).inc();
}

/// Renders the default registry in the Prometheus text format.
pub fn render() -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
