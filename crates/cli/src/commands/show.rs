use chrono::Utc;

use gemflow_core::RequestId;

use super::CommandResult;

pub async fn run(id: &str) -> CommandResult {
    let mut service = match super::connect().await {
        Ok(service) => service,
        Err(message) => return CommandResult { exit_code: 1, output: message },
    };

    let request_id = RequestId(id.to_string());
    let request = match service.fetch_request(&request_id).await {
        Ok(request) => request,
        Err(error) => {
            return CommandResult {
                exit_code: 1,
                output: format!(
                    "could not fetch request `{id}`: {error} ({})",
                    error.user_message()
                ),
            }
        }
    };

    let now = Utc::now();
    let actions = service.engine().available_actions(&request, now);
    let mut lines = vec![
        format!("request:  {}", request.id.0),
        format!("status:   {}", request.process_status.as_str()),
        format!("service:  {}", request.service_name.as_str()),
        format!("created:  {}", request.created_date.format("%Y-%m-%d %H:%M UTC")),
    ];
    match request.finish_date {
        Some(finish) => {
            lines.push(format!("finished: {}", finish.format("%Y-%m-%d %H:%M UTC")));
            if let Some(days) = request.days_since_finish(now) {
                lines.push(format!("          ({days} days ago)"));
            }
        }
        None => lines.push("finished: -".to_string()),
    }
    if actions.is_empty() {
        lines.push("actions:  none".to_string());
    } else {
        for action in actions {
            lines.push(format!("action:   {}", action.as_str()));
        }
    }

    CommandResult { exit_code: 0, output: lines.join("\n") }
}
