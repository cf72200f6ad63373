//! Turns listener rule conditions and actions into report text

use crate::elb::client::TargetGroupLookup;
use crate::elb::model::{Action, Condition};
use crate::error::AuditError;
use tracing::{debug, warn};

/// Description of a rule without any recognized condition (the listener default)
pub const DEFAULT_RULE_DESCRIPTION: &str = "If no other rule applies";

/// Describe a single condition, or `None` when its field is not recognized
pub fn describe_condition(condition: &Condition) -> Option<String> {
    match condition {
        Condition::HostHeader { values } => {
            Some(format!("HTTP Host Header is {}", values.join(", ")))
        }
        Condition::PathPattern { values } => Some(format!("Path Pattern is {}", values.join(", "))),
        Condition::HttpHeader { name, values } => {
            Some(format!("HTTP Header {} is {}", name, values.join(", ")))
        }
        Condition::Unrecognized { field } => {
            warn!("Skipping unrecognized condition field: {}", field);
            None
        }
    }
}

/// Join the recognized conditions with ` AND `.
///
/// Returns `DEFAULT_RULE_DESCRIPTION` when nothing is recognized.
pub fn describe_conditions(conditions: &[Condition]) -> String {
    let described: Vec<String> = conditions.iter().filter_map(describe_condition).collect();

    if described.is_empty() {
        DEFAULT_RULE_DESCRIPTION.to_string()
    } else {
        described.join(" AND ")
    }
}

/// Describe every action in source order, one block per action joined by a
/// newline. Forward actions resolve their target group name through `lookup`;
/// a failed lookup aborts the description.
pub async fn describe_actions<L>(actions: &[Action], lookup: &L) -> Result<String, AuditError>
where
    L: TargetGroupLookup + ?Sized,
{
    let forward_count = actions
        .iter()
        .filter(|action| matches!(action, Action::Forward { .. }))
        .count();
    if forward_count > 1 {
        warn!(
            "Rule forwards to {} target groups; configured weights are not reflected in the report",
            forward_count
        );
    }

    let mut blocks = Vec::with_capacity(actions.len());
    for action in actions {
        match action {
            Action::Forward {
                target_group_arn,
                weight,
            } => {
                let name = lookup.target_group_name(target_group_arn).await?;
                debug!(
                    "Resolved target group {} -> {} (weight {:?})",
                    target_group_arn, name, weight
                );
                blocks.push(format!("Forward to target group:\n{} (100%)", name));
            }
            Action::Redirect {
                protocol,
                host,
                port,
                path,
                query,
                status_code,
            } => blocks.push(format!(
                "Redirect to {}://{}:{}/{}?{}\nStatus code: {}",
                protocol.to_uppercase(),
                host,
                port,
                path,
                query,
                status_code
            )),
            Action::FixedResponse {
                status_code,
                body,
                content_type,
            } => blocks.push(format!(
                "Return fixed response\nResponse code: {}\nResponse body: {}\nResponse content type: {}",
                status_code, body, content_type
            )),
            Action::Unrecognized { kind } => {
                warn!("Skipping unrecognized action type: {}", kind);
            }
        }
    }

    Ok(blocks.join("\n"))
}
