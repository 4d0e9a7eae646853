use crate::catalog::{CONTACT_NOT_PROVIDED, Design};
use crate::config::Config;
use crate::ui::style as ui;

use super::controller::ShowcaseController;
use super::state::MatchOutcome;

pub fn render_status(config: &Config, controller: &ShowcaseController) -> String {
    let limits = controller.upload_limits();
    let key_state = if config.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
        ui::value("configured")
    } else {
        ui::yellow("missing (set HANDLOOM_API_KEY or GEMINI_API_KEY)")
    };

    let lines = [
        format!("{} {}", ui::accent("◆"), ui::header("Handloom Status")),
        String::new(),
        format!("{}     {}", ui::cyan("Version"), env!("CARGO_PKG_VERSION")),
        format!("{}    {}", ui::cyan("Data dir"), ui::value(config.data_dir.display())),
        format!("{}      {}", ui::cyan("Config"), ui::value(config.config_path.display())),
        format!("{}       {}", ui::cyan("Store"), ui::value(config.store_dir().display())),
        String::new(),
        format!("{}       {}", ui::cyan("Model"), config.model),
        format!("{}     {}", ui::cyan("API key"), key_state),
        format!("{} {:.2}", ui::cyan("Temperature"), config.temperature),
        format!(
            "{}      {} ({})",
            ui::cyan("Images"),
            limits.accepted_mime_types.join(", "),
            limits.limit_label()
        ),
        String::new(),
        format!("{}     {}", ui::cyan("Designs"), controller.design_count()),
        format!("{}     {}", ui::cyan("Pitched"), controller.pitched_count()),
        format!(
            "{}     {}",
            ui::cyan("Contact"),
            controller
                .contact_email()
                .unwrap_or_else(|| CONTACT_NOT_PROVIDED.to_string())
        ),
    ];
    lines.join("\n")
}

pub fn render_design_list(designs: &[Design]) -> String {
    if designs.is_empty() {
        return format!(
            "{}\n{}",
            ui::header("No designs yet."),
            ui::dim("Add one with `handloom add --name … --description … --materials … --image …`")
        );
    }

    let mut lines = vec![format!(
        "{} {}",
        ui::accent("◆"),
        ui::header(format!("Showcase ({})", designs.len()))
    )];
    for design in designs {
        let marker = if design.has_pitch() {
            ui::success("✓ pitch")
        } else {
            ui::dim("· no pitch")
        };
        lines.push(format!(
            "  {}  {}  {}  {}",
            ui::dim(&design.id),
            ui::header(&design.name),
            design.materials,
            marker
        ));
    }
    lines.join("\n")
}

pub fn render_design(design: &Design) -> String {
    let mut lines = vec![
        format!("{} {}", ui::accent("◆"), ui::header(&design.name)),
        format!("{}          {}", ui::cyan("Id"), ui::dim(&design.id)),
        format!("{}   {}", ui::cyan("Materials"), design.materials),
        format!("{}       {}", ui::cyan("Image"), design.image_mime_type),
        String::new(),
        design.description.clone(),
    ];
    if let Some(pitch) = &design.pitch {
        lines.push(String::new());
        lines.push(ui::header("Sales pitch"));
        lines.push(pitch.clone());
    }
    lines.join("\n")
}

/// Match result view. The contact section only appears once the weaver
/// has saved an email.
pub fn render_match(outcome: &MatchOutcome, contact_email: Option<&str>) -> String {
    let mut lines = vec![
        format!(
            "{} {} {}",
            ui::accent("◆"),
            ui::header("Best match:"),
            ui::header(&outcome.design.name)
        ),
        format!("  {}", ui::dim(&outcome.design.id)),
        format!("{}   {}", ui::cyan("Materials"), outcome.design.materials),
        String::new(),
        outcome.result.justification.clone(),
    ];

    if !outcome.result.platform_recommendations.is_empty() {
        lines.push(String::new());
        lines.push(ui::header("Where to sell"));
        for platform in &outcome.result.platform_recommendations {
            lines.push(format!(
                "  {} {}: {}",
                ui::accent("•"),
                ui::value(&platform.platform_name),
                platform.reason
            ));
        }
    }

    if let Some(email) = contact_email {
        lines.push(String::new());
        lines.push(ui::header("Interested in this Design?"));
        lines.push("Contact the weaver directly to discuss purchasing or collaboration:".into());
        lines.push(format!("  {}", ui::value(email)));
    }
    lines.join("\n")
}
