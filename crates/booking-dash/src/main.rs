mod bootstrap;

use anyhow::{Context, Result};
use dash_core::settings::Settings;
use dash_data::dashboard::DashboardSnapshot;
use dash_runtime::session::{open_dataset, DashboardSession};
use dash_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(
        &settings.log_level,
        settings.log_file.as_deref(),
        settings.view == "dashboard",
    )?;

    tracing::info!("booking-dash v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        data = %settings.data.display(),
        view = %settings.view,
        style = %settings.style,
        theme = %settings.theme,
        "configuration resolved"
    );

    let dataset = open_dataset(&settings.data)
        .with_context(|| format!("loading dataset from {}", settings.data.display()))?;
    let session = DashboardSession::new(
        dataset,
        settings.segment.as_deref(),
        settings.tier.as_deref(),
    )?;

    match settings.view.as_str() {
        "report" => {
            println!("{}", render_report(session.snapshot())?);
        }
        _ => {
            // Raw mode delivers Ctrl+C as a key event, handled by the app.
            App::new(session, &settings.theme, &settings.style)
                .run()
                .await
                .context("running dashboard")?;
        }
    }

    tracing::info!("booking-dash exiting");
    Ok(())
}

/// Pretty JSON for `--view report`.
fn render_report(snapshot: &DashboardSnapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).context("serializing dashboard snapshot")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            "market_segment,customer_tier,channel,avg_daily_rate,\
             competitor_rate,loyalty_points,stay_nights,target_value"
        )
        .unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn test_report_for_explicit_selection() {
        let file = write_csv(&[
            "Leisure,Gold,Online,150,140,1200,2,300",
            "Group,Bronze,Agency,90,95,60000,5,450",
        ]);
        let session =
            DashboardSession::new(open_dataset(file.path()).unwrap(), Some("Group"), Some("Gold"))
                .unwrap();

        let json = render_report(session.snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["selection"]["segment"], "Group");
        assert_eq!(value["metadata"]["records_in_selection"], 0);
        assert_eq!(value["charts"][3]["data"]["kind"], "no_data");
        assert_eq!(value["charts"][5]["data"]["table"][1]["key"], "50k+");
    }

    #[test]
    fn test_report_rejects_unknown_segment() {
        let file = write_csv(&["Leisure,Gold,Online,150,140,1200,2,300"]);
        let err = DashboardSession::new(open_dataset(file.path()).unwrap(), Some("Group"), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown segment: Group");
    }
}
