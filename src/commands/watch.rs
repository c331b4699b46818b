//! Live banner view.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use tracing::info;

use crate::output;
use schoolhub_core::config::AppConfig;
use schoolhub_core::result::AppResult;
use schoolhub_notify::banner::BannerState;
use schoolhub_notify::{BannerPresenter, NotificationStore};

/// Arguments for `watch`
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Refresh interval in milliseconds
    #[arg(short, long, default_value = "100")]
    pub interval_ms: u64,
}

/// Execute `watch`
pub async fn execute(
    args: &WatchArgs,
    store: Arc<NotificationStore>,
    config: &AppConfig,
) -> AppResult<()> {
    let presenter = Arc::new(BannerPresenter::new(
        store,
        config.notifications.banner.clone(),
    ));
    presenter.watch();
    info!("Watching banners, press Ctrl-C to stop");

    let mut shown: HashMap<String, BannerState> = HashMap::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(args.interval_ms.max(10)));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let current: HashMap<String, BannerState> = presenter
                    .visible()
                    .into_iter()
                    .map(|view| {
                        let id = view.record.id.to_string();
                        if !shown.contains_key(&id) {
                            println!(
                                "▲ [{}] {} {}",
                                view.record.kind,
                                view.record.title.as_deref().unwrap_or(""),
                                view.record.message
                            );
                        }
                        (id, view.state)
                    })
                    .collect();
                for id in shown.keys().filter(|id| !current.contains_key(*id)) {
                    println!("▼ {id} dismissed");
                }
                shown = current;
            }
            _ = &mut ctrl_c => break,
        }
    }

    presenter.shutdown();
    output::print_success("Stopped");
    Ok(())
}
