use anyhow::Result;
use infra_audit::elb::{
    ElbClient, ElbReport, Listener, LoadBalancer, LoadBalancerFilter, RuleRecord,
    SnapshotElbClient, TargetGroupLookup,
};
use infra_audit::{AuditError, Page};
use std::path::PathBuf;

const LISTENER_443: &str = "arn:aws:elasticloadbalancing:us-east-1:123456789012:listener/app/web-alb/50dc6c495c0c9188/f2f7dc8efc522ab2";
const LISTENER_80: &str = "arn:aws:elasticloadbalancing:us-east-1:123456789012:listener/app/web-alb/50dc6c495c0c9188/0467ef3c8400ae65";

fn demo_snapshot() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/elb.json")
}

async fn render(client: &SnapshotElbClient, filter: LoadBalancerFilter) -> Result<String> {
    let mut out = Vec::new();
    ElbReport::new(client, filter).write_to(&mut out).await?;
    Ok(String::from_utf8(out)?)
}

#[tokio::test]
async fn test_demo_report() -> Result<()> {
    let client = SnapshotElbClient::load(&demo_snapshot(), 2).await?;

    let mut out = Vec::new();
    let summary = ElbReport::new(&client, LoadBalancerFilter::application_only())
        .write_to(&mut out)
        .await?;
    let report = String::from_utf8(out)?;

    assert_eq!(summary.load_balancers, 1);
    assert_eq!(summary.listeners, 2);
    assert_eq!(summary.rules, 5);

    let section = "=".repeat(40);
    let expected_header = format!(
        "{section}\nALB Name: web-alb\nListener ARN: {}\nListener Port: HTTPS:443\n{section}\n",
        LISTENER_443,
        section = section
    );
    assert!(report.starts_with(&expected_header));

    assert!(report.contains(
        "Conditions (IF) | HTTP Host Header is api.example.com AND Path Pattern is /v1/*, /v2/*\n\
         Actions (THEN) | Forward to target group:\napi-tg (100%)\n"
    ));
    assert!(report.contains(
        "Conditions (IF) | HTTP Header X-Canary is true\n\
         Actions (THEN) | Forward to target group:\nweb-blue (100%)\nForward to target group:\nweb-green (100%)\n"
    ));
    assert!(report.contains(
        "Actions (THEN) | Return fixed response\nResponse code: 503\n\
         Response body: Down for maintenance\nResponse content type: text/plain\n"
    ));
    assert!(report.contains("Priority: default\nConditions (IF) | If no other rule applies\n"));
    assert!(report.contains(
        "Actions (THEN) | Redirect to HTTPS://#{host}:443/#{path}?#{query}\nStatus code: HTTP_301\n"
    ));
    assert!(!report.contains("tcp-nlb"));

    // Rule order follows listener order, then server order within a listener
    let https = report.find("Listener Port: HTTPS:443").unwrap();
    let http = report.find("Listener Port: HTTP:80").unwrap();
    let priority_10 = report.find("Priority: 10").unwrap();
    let priority_30 = report.find("Priority: 30").unwrap();
    assert!(https < priority_10 && priority_10 < priority_30 && priority_30 < http);

    assert_eq!(report.matches(&"=".repeat(30)).count(), 5 + 4);
    Ok(())
}

#[tokio::test]
async fn test_page_size_does_not_change_report() -> Result<()> {
    let one = SnapshotElbClient::load(&demo_snapshot(), 1).await?;
    let many = SnapshotElbClient::load(&demo_snapshot(), 100).await?;

    let filter = LoadBalancerFilter::application_only();
    assert_eq!(render(&one, filter.clone()).await?, render(&many, filter).await?);
    Ok(())
}

#[tokio::test]
async fn test_all_types_includes_network_load_balancers() -> Result<()> {
    let client = SnapshotElbClient::load(&demo_snapshot(), 10).await?;

    let mut out = Vec::new();
    let summary = ElbReport::new(&client, LoadBalancerFilter::default())
        .write_to(&mut out)
        .await?;
    let report = String::from_utf8(out)?;

    assert_eq!(summary.load_balancers, 2);
    assert_eq!(summary.listeners, 3);
    assert_eq!(summary.rules, 5);
    assert!(report.contains("ALB Name: tcp-nlb"));
    assert!(report.contains("Listener Port: TCP:5432"));
    Ok(())
}

/// Snapshot client that fails rule listing for one listener, or every load
/// balancer page after the first
struct FailingClient {
    inner: SnapshotElbClient,
    failing_listener: Option<&'static str>,
    fail_later_pages: bool,
}

#[async_trait::async_trait]
impl TargetGroupLookup for FailingClient {
    async fn target_group_name(&self, target_group_arn: &str) -> Result<String, AuditError> {
        self.inner.target_group_name(target_group_arn).await
    }
}

#[async_trait::async_trait]
impl ElbClient for FailingClient {
    async fn list_load_balancers(
        &self,
        marker: Option<String>,
    ) -> Result<Page<LoadBalancer>, AuditError> {
        if self.fail_later_pages && marker.is_some() {
            return Err(AuditError::Transport("throttled".to_string()));
        }
        self.inner.list_load_balancers(marker).await
    }

    async fn list_listeners(&self, load_balancer_arn: &str) -> Result<Vec<Listener>, AuditError> {
        self.inner.list_listeners(load_balancer_arn).await
    }

    async fn list_rules(
        &self,
        listener_arn: &str,
        marker: Option<String>,
    ) -> Result<Page<RuleRecord>, AuditError> {
        if Some(listener_arn) == self.failing_listener {
            return Err(AuditError::Transport("access denied".to_string()));
        }
        self.inner.list_rules(listener_arn, marker).await
    }
}

#[tokio::test]
async fn test_transport_error_stops_report_after_flushed_sections() -> Result<()> {
    let client = FailingClient {
        inner: SnapshotElbClient::load(&demo_snapshot(), 2).await?,
        failing_listener: Some(LISTENER_80),
        fail_later_pages: false,
    };

    let mut out = Vec::new();
    let result = ElbReport::new(&client, LoadBalancerFilter::application_only())
        .write_to(&mut out)
        .await;

    let err = result.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Failed to list rules of listener"));
    assert!(message.contains("Transport error: access denied"));

    let partial = String::from_utf8(out)?;
    assert!(partial.contains("Listener Port: HTTPS:443"));
    assert!(partial.contains("Priority: default"));
    assert!(!partial.contains("Redirect to"));
    Ok(())
}

#[tokio::test]
async fn test_load_balancer_page_error_keeps_earlier_pages() -> Result<()> {
    // One load balancer per page: web-alb arrives before the failing page
    let client = FailingClient {
        inner: SnapshotElbClient::load(&demo_snapshot(), 1).await?,
        failing_listener: None,
        fail_later_pages: true,
    };

    let mut out = Vec::new();
    let err = ElbReport::new(&client, LoadBalancerFilter::application_only())
        .write_to(&mut out)
        .await
        .unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Failed to list load balancers"));
    assert!(message.contains("Transport error: throttled"));

    let partial = String::from_utf8(out)?;
    assert!(partial.contains("ALB Name: web-alb"));
    assert!(partial.contains("Listener Port: HTTPS:443"));
    assert!(partial.contains("Listener Port: HTTP:80"));
    assert!(partial.contains("Status code: HTTP_301"));
    Ok(())
}

#[tokio::test]
async fn test_missing_target_group_fails_report() -> Result<()> {
    let client = SnapshotElbClient::from_json(
        r#"{
            "LoadBalancers": [{"LoadBalancerArn": "arn:lb", "LoadBalancerName": "lb", "Type": "application"}],
            "Listeners": [{"ListenerArn": "arn:listener", "LoadBalancerArn": "arn:lb", "Port": 80, "Protocol": "HTTP"}],
            "Rules": {"arn:listener": [
                {"RuleArn": "arn:rule", "Priority": "default", "Actions": [{"Type": "forward", "TargetGroupArn": "arn:tg/gone"}]}
            ]}
        }"#,
        10,
    )?;

    let mut out = Vec::new();
    let err = ElbReport::new(&client, LoadBalancerFilter::application_only())
        .write_to(&mut out)
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("target group not found: arn:tg/gone"));
    Ok(())
}
