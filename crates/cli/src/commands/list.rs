use chrono::Utc;

use gemflow_core::Request;

use super::CommandResult;

pub async fn run() -> CommandResult {
    let mut service = match super::connect().await {
        Ok(service) => service,
        Err(message) => return CommandResult { exit_code: 1, output: message },
    };

    if let Err(error) = service.refresh().await {
        return CommandResult {
            exit_code: 1,
            output: format!("could not fetch the worklist: {error} ({})", error.user_message()),
        };
    }

    let now = Utc::now();
    let mut lines = vec![format!(
        "{:<12} {:<22} {:<20} {:<12} {}",
        "ID", "STATUS", "SERVICE", "FINISHED", "ACTIONS"
    )];
    for request in service.store().requests() {
        let actions = service
            .available_actions(&request.id, now)
            .iter()
            .map(|action| action.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "{:<12} {:<22} {:<20} {:<12} {}",
            request.id.0,
            request.process_status.as_str(),
            request.service_name.as_str(),
            finished_column(request),
            if actions.is_empty() { "-" } else { actions.as_str() },
        ));
    }
    if service.store().requests().is_empty() {
        lines.push("(no requests in the worklist)".to_string());
    }

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

fn finished_column(request: &Request) -> String {
    request
        .finish_date
        .map(|finish| finish.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
