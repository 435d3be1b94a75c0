use gemflow_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let mut lines =
        vec!["effective config (source precedence: overrides > env > file > default):".to_string()];
    lines.push(render_line("api.base_url", &config.api.base_url));
    lines.push(render_line("api.timeout_secs", &config.api.timeout_secs.to_string()));
    lines.push(render_line(
        "auth.username",
        config.auth.username.as_deref().unwrap_or("<unset>"),
    ));
    lines.push(render_line(
        "auth.password",
        if config.auth.password.is_some() { "<set, redacted>" } else { "<unset>" },
    ));
    lines.push(render_line("logging.level", &config.logging.level));
    lines.push(render_line("logging.format", &format!("{:?}", config.logging.format)));

    lines.join("\n")
}

fn render_line(key: &str, value: &str) -> String {
    format!("  {key:<20} = {value}")
}
