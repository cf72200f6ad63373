use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadBalancer {
    pub arn: String,
    pub name: String,
    /// `application`, `network` or `gateway`
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listener {
    pub arn: String,
    pub load_balancer_arn: String,
    pub port: Option<u16>,
    pub protocol: Option<String>,
}

impl Listener {
    /// `PROTOCOL:port`, with `-` standing in for a missing part
    pub fn port_info(&self) -> String {
        let protocol = self.protocol.as_deref().unwrap_or("-");
        match self.port {
            Some(port) => format!("{}:{}", protocol, port),
            None => format!("{}:-", protocol),
        }
    }
}

/// Rule evaluation priority as reported by the listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Priority {
    Rank(u32),
    /// The listener's catch-all rule
    Default,
    Other(String),
}

impl Priority {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("default") {
            return Priority::Default;
        }
        match raw.trim().parse::<u32>() {
            Ok(rank) => Priority::Rank(rank),
            Err(_) => Priority::Other(raw.to_string()),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Rank(rank) => write!(f, "{}", rank),
            Priority::Default => write!(f, "default"),
            Priority::Other(raw) => write!(f, "{}", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleRecord {
    pub arn: String,
    pub priority: Priority,
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    HostHeader { values: Vec<String> },
    PathPattern { values: Vec<String> },
    HttpHeader { name: String, values: Vec<String> },
    /// Any field kind the report does not describe
    Unrecognized { field: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Forward {
        target_group_arn: String,
        weight: Option<u32>,
    },
    Redirect {
        protocol: String,
        host: String,
        port: String,
        path: String,
        query: String,
        status_code: String,
    },
    FixedResponse {
        status_code: String,
        body: String,
        content_type: String,
    },
    /// Any action type the report does not describe
    Unrecognized { kind: String },
}
