use crate::cli::commands::{Cli, Commands, ContactCommands};
use anyhow::{Result, anyhow};
use dialoguer::Confirm;
use std::sync::Arc;
use tracing::debug;

use crate::Config;
use crate::app::controller::ShowcaseController;
use crate::app::state::PitchSource;
use crate::app::status::{render_design, render_design_list, render_match, render_status};
use crate::catalog::{CONTACT_NOT_PROVIDED, NewDesign};
use crate::error::ShowcaseError;
use crate::media::load_design_image;
use crate::providers::GeminiClient;
use crate::store::{FileStore, ShowcaseStore};
use crate::ui::style as ui;

/// Wire the file-backed store and the Gemini client from `config`.
pub async fn open_controller(config: &Config) -> ShowcaseController {
    let backend = Arc::new(FileStore::new(&config.store_dir()));
    let model = GeminiClient::new(config.api_key.as_deref(), &config.model)
        .with_base_url(&config.api_base_url)
        .with_temperature(config.temperature)
        .with_request_timeout(config.request_timeout_secs);

    ShowcaseController::open(
        ShowcaseStore::new(backend),
        Arc::new(model),
        config.catalog.upload_limits(),
    )
    .await
}

/// Turn a controller failure into the message shown to the weaver. The
/// banner wins when the flow set one; the underlying cause stays in the log.
fn surface<T>(controller: &ShowcaseController, result: Result<T, ShowcaseError>) -> Result<T> {
    result.map_err(|err| {
        let message = controller
            .error_banner()
            .unwrap_or_else(|| err.user_message());
        controller.dismiss_error();
        anyhow!(message)
    })
}

#[allow(clippy::too_many_lines)]
pub async fn dispatch(cli: Cli, config: Arc<Config>) -> Result<()> {
    let controller = open_controller(&config).await;

    match cli.command {
        Commands::Add {
            name,
            description,
            materials,
            image,
        } => {
            let image = load_design_image(&image, controller.upload_limits()).await?;
            let design = surface(
                &controller,
                controller
                    .add_design(NewDesign {
                        name,
                        description,
                        materials,
                        image: Some(image),
                    })
                    .await,
            )?;
            println!(
                "{} Added {} {}",
                ui::success("✓"),
                ui::header(&design.name),
                ui::dim(&design.id)
            );
            Ok(())
        }

        Commands::List => {
            println!("{}", render_design_list(&controller.designs()));
            Ok(())
        }

        Commands::Show { id } => {
            let design = controller
                .design(&id)
                .ok_or_else(|| anyhow!("No design with id {id}"))?;
            println!("{}", render_design(&design));
            Ok(())
        }

        Commands::Pitch { id } => {
            let outcome = surface(&controller, controller.request_pitch(&id).await)?
                .ok_or_else(|| anyhow!("No design with id {id}"))?;
            if outcome.source == PitchSource::Generated {
                println!(
                    "{} Generated pitch for {}",
                    ui::success("✓"),
                    ui::header(&outcome.design.name)
                );
            } else {
                debug!(design_id = %outcome.design.id, "showing saved pitch");
            }
            println!("{}", outcome.pitch());
            Ok(())
        }

        Commands::Match { request } => {
            let request = request.join(" ");
            let outcome = surface(&controller, controller.request_match(&request).await)?;
            println!(
                "{}",
                render_match(&outcome, controller.contact_email().as_deref())
            );
            controller.close_match();
            Ok(())
        }

        Commands::Contact { contact_command } => match contact_command {
            ContactCommands::Show => {
                println!(
                    "{}",
                    controller
                        .contact_email()
                        .unwrap_or_else(|| CONTACT_NOT_PROVIDED.to_string())
                );
                Ok(())
            }
            ContactCommands::Set { email } => {
                surface(&controller, controller.save_contact(&email).await)?;
                println!("{} Contact email saved", ui::success("✓"));
                Ok(())
            }
            ContactCommands::Clear => {
                controller.clear_contact().await;
                println!("{} Contact email cleared", ui::success("✓"));
                Ok(())
            }
        },

        Commands::Status => {
            println!("{}", render_status(&config, &controller));
            Ok(())
        }

        Commands::Reset { yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!(
                        "Delete all {} designs and the saved contact email?",
                        controller.design_count()
                    ))
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("{}", ui::dim("Reset cancelled."));
                return Ok(());
            }
            controller.reset().await?;
            println!("{} Showcase reset", ui::success("✓"));
            Ok(())
        }
    }
}
