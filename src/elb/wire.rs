//! ELBv2 describe-output shapes and their normalization into report models
//!
//! Field names follow the API's PascalCase JSON. Normalization never fails:
//! malformed or unknown conditions and actions become `Unrecognized` entries.

use super::model::{Action, Condition, Listener, LoadBalancer, Priority, RuleRecord};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawLoadBalancer {
    pub load_balancer_arn: String,
    pub load_balancer_name: String,
    #[serde(rename = "Type", default = "default_load_balancer_type")]
    pub lb_type: String,
}

fn default_load_balancer_type() -> String {
    "application".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawListener {
    pub listener_arn: String,
    pub load_balancer_arn: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub protocol: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawRule {
    pub rule_arn: String,
    pub priority: String,
    #[serde(default)]
    pub conditions: Vec<RawCondition>,
    #[serde(default)]
    pub actions: Vec<RawAction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawCondition {
    pub field: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub host_header_config: Option<ValuesConfig>,
    #[serde(default)]
    pub path_pattern_config: Option<ValuesConfig>,
    #[serde(default)]
    pub http_header_config: Option<HttpHeaderConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValuesConfig {
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HttpHeaderConfig {
    #[serde(default)]
    pub http_header_name: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawAction {
    #[serde(rename = "Type")]
    pub action_type: String,
    #[serde(default)]
    pub target_group_arn: Option<String>,
    #[serde(default)]
    pub forward_config: Option<ForwardConfig>,
    #[serde(default)]
    pub redirect_config: Option<RedirectConfig>,
    #[serde(default)]
    pub fixed_response_config: Option<FixedResponseConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForwardConfig {
    #[serde(default)]
    pub target_groups: Vec<TargetGroupTuple>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetGroupTuple {
    #[serde(default)]
    pub target_group_arn: Option<String>,
    #[serde(default)]
    pub weight: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RedirectConfig {
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub status_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FixedResponseConfig {
    #[serde(default)]
    pub status_code: Option<String>,
    #[serde(default)]
    pub message_body: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTargetGroup {
    pub target_group_arn: String,
    pub target_group_name: String,
}

impl From<RawLoadBalancer> for LoadBalancer {
    fn from(raw: RawLoadBalancer) -> Self {
        LoadBalancer {
            arn: raw.load_balancer_arn,
            name: raw.load_balancer_name,
            kind: raw.lb_type,
        }
    }
}

impl From<RawListener> for Listener {
    fn from(raw: RawListener) -> Self {
        Listener {
            arn: raw.listener_arn,
            load_balancer_arn: raw.load_balancer_arn,
            port: raw.port,
            protocol: raw.protocol,
        }
    }
}

impl From<RawRule> for RuleRecord {
    fn from(raw: RawRule) -> Self {
        RuleRecord {
            arn: raw.rule_arn,
            priority: Priority::parse(&raw.priority),
            conditions: raw.conditions.into_iter().map(Condition::from).collect(),
            actions: raw.actions.into_iter().flat_map(normalize_action).collect(),
        }
    }
}

impl From<RawCondition> for Condition {
    fn from(raw: RawCondition) -> Self {
        // Older responses carry the top-level `Values`; newer ones duplicate it in
        // the per-field config block.
        let values_or = |config: Option<ValuesConfig>, values: Vec<String>| {
            if values.is_empty() {
                config.map(|c| c.values).unwrap_or_default()
            } else {
                values
            }
        };

        match raw.field.as_str() {
            "host-header" => Condition::HostHeader {
                values: values_or(raw.host_header_config, raw.values),
            },
            "path-pattern" => Condition::PathPattern {
                values: values_or(raw.path_pattern_config, raw.values),
            },
            "http-header" => match raw.http_header_config {
                Some(HttpHeaderConfig {
                    http_header_name: Some(name),
                    values,
                }) => Condition::HttpHeader { name, values },
                _ => Condition::Unrecognized { field: raw.field },
            },
            _ => Condition::Unrecognized { field: raw.field },
        }
    }
}

/// A weighted forward expands into one `Forward` per target group
fn normalize_action(raw: RawAction) -> Vec<Action> {
    match raw.action_type.as_str() {
        "forward" => {
            let targets = raw
                .forward_config
                .map(|config| config.target_groups)
                .unwrap_or_default();
            if !targets.is_empty() {
                targets
                    .into_iter()
                    .map(|target| match target.target_group_arn {
                        Some(arn) => Action::Forward {
                            target_group_arn: arn,
                            weight: target.weight,
                        },
                        None => Action::Unrecognized {
                            kind: raw.action_type.clone(),
                        },
                    })
                    .collect()
            } else if let Some(arn) = raw.target_group_arn {
                vec![Action::Forward {
                    target_group_arn: arn,
                    weight: None,
                }]
            } else {
                vec![Action::Unrecognized {
                    kind: raw.action_type,
                }]
            }
        }
        "redirect" => match raw.redirect_config {
            Some(config) => vec![Action::Redirect {
                protocol: config.protocol,
                host: config.host,
                port: config.port,
                path: config.path,
                query: config.query,
                status_code: config.status_code,
            }],
            None => vec![Action::Unrecognized {
                kind: raw.action_type,
            }],
        },
        "fixed-response" => match raw.fixed_response_config {
            Some(FixedResponseConfig {
                status_code: Some(status_code),
                message_body,
                content_type,
            }) => vec![Action::FixedResponse {
                status_code,
                body: message_body.unwrap_or_default(),
                content_type: content_type.unwrap_or_default(),
            }],
            _ => vec![Action::Unrecognized {
                kind: raw.action_type,
            }],
        },
        _ => vec![Action::Unrecognized {
            kind: raw.action_type,
        }],
    }
}
