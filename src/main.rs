#![forbid(unsafe_code)]
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre;
use ratatui::prelude::*;

use flashvault_uploader::cli::{Cli, Command};
use flashvault_uploader::components::console_view::ConsoleView;
use flashvault_uploader::model::selected_file::SelectedFileSet;
use flashvault_uploader::services::upload_controller::{DeleteOutcome, UploadController};
use flashvault_uploader::services::vault_client::{HttpVaultClient, VaultApi};
use flashvault_uploader::settings::client_settings::ClientSettings;
use flashvault_uploader::utils::{format_size, initialize_logging, initialize_panic_handler};

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    initialize_logging()?;
    initialize_panic_handler()?;
    let args = Cli::parse();

    let upload_path = match &args.command {
        Command::Upload { path, .. } => path.clone(),
        _ => None,
    };
    let settings = ClientSettings::load(args.config.clone())?.with_overrides(args.server.clone(), upload_path);
    tracing::info!(server = %settings.server_url, "starting");
    let client = HttpVaultClient::new(&settings.server_url)?;

    let success = match args.command {
        Command::Upload { files, .. } => {
            let selection = SelectedFileSet::from_paths(&files).await?;
            let mut controller = UploadController::new(client.clone(), ConsoleView::open(false)?)
                .with_reload_delay(settings.reload_delay());
            let outcome = controller.initiate(selection, &settings.upload_path).await;
            tracing::info!(?outcome, "upload finished");
            finish(controller, &client).await?;
            outcome.is_success()
        }
        Command::Delete { yes, name, path } => {
            let display_name = name.unwrap_or_else(|| Command::display_name(&path).to_string());
            let mut controller = UploadController::new(client.clone(), ConsoleView::open(yes)?);
            let outcome = controller.delete_file(&path, &display_name).await;
            finish(controller, &client).await?;
            outcome == DeleteOutcome::Deleted
        }
        Command::Status => {
            let mut view = ConsoleView::open(false)?;
            let reported = report_free_space(&mut view, &client).await;
            view.finish()?;
            reported
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Resyncs with the server if the controller asked for a reload, then
/// releases the terminal
async fn finish(
    controller: UploadController<HttpVaultClient, ConsoleView>,
    client: &HttpVaultClient,
) -> eyre::Result<()> {
    let (_, mut view) = controller.into_parts();
    if view.reload_requested() {
        report_free_space(&mut view, client).await;
    }
    view.finish()
}

/// Prints the free space the server reports, the terminal's "storage left"
async fn report_free_space(view: &mut ConsoleView, client: &HttpVaultClient) -> bool {
    let line = match client.check_storage(0).await {
        Ok(check) => Ok(Line::from(vec![
            Span::raw("Storage left: "),
            Span::styled(format_size(check.free), Style::default().fg(Color::Green).bold()),
        ])),
        Err(e) => {
            tracing::error!("status request failed: {}", e);
            Err(Line::from(Span::styled(
                format!("Could not reach {}: {}", client.base_url(), e),
                Style::default().fg(Color::Red).bold(),
            )))
        }
    };
    let reported = line.is_ok();
    let printed = view.print_line(line.unwrap_or_else(|l| l));
    if let Err(e) = printed {
        tracing::error!("could not print status: {}", e);
    }
    reported
}
