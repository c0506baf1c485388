use dioxus::prelude::*;

use crate::shared::types::{GridHistoryPointDto, GridReadingDto};

/// Collector for battery level reports. Best-effort by contract: every
/// failure is logged and swallowed so the reporter never sees it.
#[server(ReportBatteryLevel)]
pub async fn report_battery_level(level: f64) -> Result<(), ServerFnError> {
    #[cfg(feature = "server")]
    {
        use crate::backend::GLOBAL_DB;
        use chrono::Utc;

        let percent = (level * 100.0).round() as i32;
        eprintln!("[collector] received battery level: {percent}%");
        let Some(db) = GLOBAL_DB.get() else {
            eprintln!("report_battery_level: DB not initialized");
            return Ok(());
        };
        if let Err(e) = db.insert_battery_report(level, Utc::now()).await {
            eprintln!("report_battery_level insert error: {e}");
        }
        Ok(())
    }
    #[cfg(not(feature = "server"))]
    {
        let _ = level;
        Ok(())
    }
}

#[server(CurrentGridDemand)]
pub async fn current_grid_demand() -> Result<GridReadingDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use crate::backend::eia;

        match eia::get_current_demand().await {
            Ok(reading) => Ok(reading),
            Err(e) => {
                eprintln!("current_grid_demand error: {e}");
                Err(ServerFnError::new(e.to_string()))
            }
        }
    }
    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("server not available"))
    }
}

#[server(GridDemandHistory)]
pub async fn grid_demand_history() -> Result<Vec<GridHistoryPointDto>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use crate::backend::eia;

        match eia::get_demand_history_24h().await {
            Ok(points) => Ok(points),
            Err(e) => {
                eprintln!("grid_demand_history error: {e}");
                Err(ServerFnError::new(e.to_string()))
            }
        }
    }
    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("server not available"))
    }
}
