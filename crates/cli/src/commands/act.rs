use chrono::Utc;

use gemflow_core::{RequestId, StaffAction};

use super::{error_class, CommandResult};

pub async fn run(id: &str, action: &str) -> CommandResult {
    let Some(action) = StaffAction::parse(action) else {
        return CommandResult::failure(
            "act",
            "validation",
            format!(
                "unknown action `{action}` (expected send_to_valuation_staff | \
                 customer_took_sample | request_sealing | request_commitment)"
            ),
            2,
        );
    };

    let mut service = match super::connect().await {
        Ok(service) => service,
        Err(message) => return CommandResult::failure("act", "bootstrap", message, 1),
    };

    if let Err(error) = service.refresh().await {
        return CommandResult::failure("act", error_class(&error), error.to_string(), 1);
    }

    let request_id = RequestId(id.to_string());
    match service.apply_action(&request_id, action, Utc::now()).await {
        Ok(outcome) => CommandResult::success(
            "act",
            format!("{}: {} -> {}", outcome.action.as_str(), outcome.from, outcome.to),
        ),
        Err(error) => CommandResult::failure(
            "act",
            error_class(&error),
            format!("{error} ({})", error.user_message()),
            1,
        ),
    }
}
