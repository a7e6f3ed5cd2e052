use hearth_client::ClientError;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "That didn't work - here is what happened and how to fix it.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
        String::new(),
        "What to do next:".to_string(),
    ];

    match error.recovery_steps.as_slice() {
        [] => lines.push("  1. Retry the command.".to_string()),
        steps => {
            for (index, step) in steps.iter().enumerate() {
                lines.push(format!("  {}. {step}", index + 1));
            }
        }
    }

    lines.join("\n")
}
