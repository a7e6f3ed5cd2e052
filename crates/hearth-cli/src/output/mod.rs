mod analytics_text;
mod demo_text;
mod error_text;
mod format;
mod import_text;
mod json;
mod mode;
mod report_text;

use std::io;

use hearth_client::{ClientError, SuccessEnvelope};

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    println!("{body}");
    Ok(())
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    println!("{body}");
    Ok(())
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "insights" => analytics_text::render_insights(&success.data),
        "summary" => analytics_text::render_summary(&success.data),
        "trend" => analytics_text::render_trend(&success.data),
        "recurring" => analytics_text::render_recurring(&success.data),
        "import" => import_text::render_import_run(&success.data),
        "import list" => import_text::render_import_list(&success.data),
        "report" => report_text::render_report(&success.data),
        "demo" => demo_text::render_demo(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
