use dioxus::prelude::*;

mod api;
mod app;
mod components;
mod shared;
mod utils;

#[cfg(feature = "web")]
mod battery;

#[cfg(feature = "server")]
mod backend;

pub const FAVICON: Asset = asset!("/assets/favicon.ico");
pub const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

#[cfg(feature = "server")]
use std::sync::Arc;

fn main() {
    #[cfg(feature = "server")]
    {
        backend::init_tracing();

        // Initialize the global DB once at boot
        let db_url = backend::db::resolve_db_url();
        {
            use dotenvy::dotenv;
            dotenv().ok();
            let rt = tokio::runtime::Runtime::new().expect("rt");
            rt.block_on(async {
                match backend::Db::connect(&db_url).await {
                    Ok(db) => {
                        let _ = backend::GLOBAL_DB.set(Arc::new(db));
                        eprintln!("[db] initialized");
                    }
                    Err(e) => {
                        eprintln!("[db] failed to init: {e}");
                    }
                }
            });
        }

        let mut args = std::env::args();
        let _bin = args.next();
        if let Some(cmd) = args.next() {
            if cmd == "recent-reports" {
                // Dump the newest collected battery reports, optionally `recent-reports <n>`
                let limit = args.next().and_then(|s| s.parse::<i64>().ok()).unwrap_or(20);
                let rt = tokio::runtime::Runtime::new().expect("rt");
                rt.block_on(async move {
                    let Some(db) = backend::GLOBAL_DB.get() else {
                        eprintln!("[recent-reports] GLOBAL_DB not initialized");
                        std::process::exit(1);
                    };
                    match db.recent_battery_reports(limit).await {
                        Ok(rows) => {
                            for row in rows.iter() {
                                println!(
                                    "{}  {:>5.1}%",
                                    row.reported_at.to_rfc3339(),
                                    row.level * 100.0
                                );
                            }
                            eprintln!("recent-reports: {} row(s)", rows.len());
                        }
                        Err(e) => {
                            eprintln!("recent-reports: query failed: {e}");
                            std::process::exit(1);
                        }
                    }
                });
                return;
            }
        }
    }
    dioxus::launch(app::App);
}
