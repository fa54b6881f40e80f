//! Guestimator CLI: submit a vehicle photo and contact details for an insurance estimate.
//!
//! Set GUESTIMATOR_UPLOAD_URL (or UPLOAD_URL) to point at the quoting service.

use anyhow::Context;
use clap::{Parser, Subcommand};
use guestimator_api_client::FormController;
use guestimator_cli::{init_tracing, printable_state, read_candidate, CheckSummary};
use guestimator_core::models::{ContactField, FileSource, VehicleType};
use guestimator_core::{FormConfig, FormEvent, FormView};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "guestimator", about = "Insurance Form Guestimator CLI")]
struct Cli {
    /// Override the upload endpoint URL
    #[arg(long, global = true)]
    url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the image, submit the form and print the quote
    Submit {
        /// Your name
        #[arg(long)]
        name: String,
        /// Your email address
        #[arg(long)]
        email: String,
        /// Your phone number
        #[arg(long)]
        number: String,
        /// Vehicle type: Sedan, SUV or Truck
        #[arg(long)]
        vehicle_type: Option<VehicleType>,
        /// Path to the vehicle image
        image: PathBuf,
        /// Declared MIME type (defaults to the one implied by the extension)
        #[arg(long)]
        content_type: Option<String>,
        /// Print the full form state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate an image and decode its preview without submitting
    Check {
        /// Path to the image
        image: PathBuf,
        /// Declared MIME type (defaults to the one implied by the extension)
        #[arg(long)]
        content_type: Option<String>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = FormConfig::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.url {
        config = config.with_upload_url(url);
        config.validate()?;
    }
    tracing::debug!(url = %config.upload_url, "Using upload endpoint");
    let mut controller =
        FormController::from_config(&config).context("Failed to create API client")?;

    match cli.command {
        Commands::Submit {
            name,
            email,
            number,
            vehicle_type,
            image,
            content_type,
            json,
        } => {
            controller.dispatch(FormEvent::FieldChanged(ContactField::Name, name));
            controller.dispatch(FormEvent::FieldChanged(ContactField::Email, email));
            controller.dispatch(FormEvent::FieldChanged(ContactField::Number, number));
            controller.dispatch(FormEvent::VehicleTypeChanged(vehicle_type));

            let candidate = read_candidate(&image, content_type.as_deref())?;
            let alert = controller
                .select_file(FileSource::Picker, Some(candidate))
                .await
                .file_alert
                .clone();
            if let Some(alert) = alert {
                eprintln!("{}", alert);
                controller.dispatch(FormEvent::AlertDismissed);
            }

            controller.submit().await;

            let state = controller.state();
            if json {
                print_json(&printable_state(state))?;
            } else {
                println!("{}", FormView::render(state).outcome_text());
            }

            if state.result.is_failure() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Check {
            image,
            content_type,
        } => {
            let candidate = read_candidate(&image, content_type.as_deref())?;
            let state = controller
                .select_file(FileSource::Picker, Some(candidate))
                .await;
            let summary = CheckSummary::from_state(state);
            print_json(&summary)?;

            if !summary.accepted {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
