//! Integration tests for the sweep subsystem using wiremock
//!
//! These tests drive the orchestrator and individual services against mocked
//! REST endpoints, verifying the safety invariants: baseline and preserve
//! protection, per-item failure containment, router detach ordering, and the
//! grant/revoke ledger behavior.

use serde_json::json;
use stacksweep::config::Config;
use stacksweep::sweep::{
    BaselineSnapshot, CleanupOrchestrator, DryRunReport, Mode, ResourceType, SweepService,
    TenantScope,
};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build a config pointing every endpoint at the mock server. Only the
/// identity family is enabled; tests opt into the others as needed.
fn test_config(server: &MockServer, baseline: &std::path::Path, report: &std::path::Path) -> Config {
    test_config_with_services(
        server,
        baseline,
        report,
        json!({ "compute": false, "network": false, "volume": false, "image": false }),
    )
}

fn test_config_with_services(
    server: &MockServer,
    baseline: &std::path::Path,
    report: &std::path::Path,
    services: serde_json::Value,
) -> Config {
    let uri = server.uri();
    let value = json!({
        "auth": {
            "token": "test-token",
            "admin_username": "harness-admin",
            "admin_project": "harness",
            "admin_role": "admin"
        },
        "endpoints": {
            "identity": format!("{uri}/v3"),
            "compute": format!("{uri}/v2.1"),
            "network": format!("{uri}/v2.0"),
            "volume": format!("{uri}/volume/v3"),
            "image": format!("{uri}/image/v2")
        },
        "services": services,
        "baseline_file": baseline,
        "report_file": report
    });
    serde_json::from_value(value).expect("test config")
}

/// Mount the identity lookups used by admin resolution.
async fn mount_admin_resolution(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v3/users"))
        .and(query_param("name", "harness-admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": "u-admin", "name": "harness-admin"}]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/projects"))
        .and(query_param("name", "harness"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [{"id": "p-harness", "name": "harness"}]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/roles"))
        .and(query_param("name", "admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "roles": [{"id": "r-admin", "name": "admin"}]
        })))
        .mount(server)
        .await;
}

fn service_test_config(server: &MockServer) -> Config {
    let dir = std::env::temp_dir();
    test_config(server, &dir.join("unused-baseline.json"), &dir.join("unused-report.json"))
}

fn tenant_scope(id: &str, name: &str) -> TenantScope {
    TenantScope {
        id: id.to_string(),
        name: name.to_string(),
    }
}

// =============================================================================
// Orchestrator scenarios
// =============================================================================

/// Baseline-protected projects survive a delete run; everything else goes.
#[tokio::test]
async fn test_delete_respects_baseline_and_intrinsic_exclusions() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let baseline_path = dir.path().join("baseline.json");
    let report_path = dir.path().join("report.json");

    let mut baseline = BaselineSnapshot::new();
    baseline.record(ResourceType::Project, "p1", "keep-me");
    baseline.save(&baseline_path).expect("save baseline");

    mount_admin_resolution(&server).await;

    // Tenant enumeration and the global project listing
    Mock::given(method("GET"))
        .and(path("/v3/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [
                {"id": "p1", "name": "keep-me"},
                {"id": "p2", "name": "doomed"},
                {"id": "p-harness", "name": "harness"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                {"id": "u-admin", "name": "harness-admin"},
                {"id": "u2", "name": "stray-user"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "domains": [{"id": "default", "name": "Default", "enabled": true}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "roles": [{"id": "r-admin", "name": "admin"}]
        })))
        .mount(&server)
        .await;

    // Every tenant already carries the admin role: nothing enters the ledger
    Mock::given(method("HEAD"))
        .and(path_regex(r"^/v3/projects/[^/]+/users/u-admin/roles/r-admin$"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    // Only the unprotected project and the stray user may be deleted
    Mock::given(method("DELETE"))
        .and(path("/v3/projects/p2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/users/u2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/projects/p1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/projects/p-harness"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/users/u-admin"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/v3/(roles|domains)/.+$"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server, &baseline_path, &report_path);
    let orchestrator =
        CleanupOrchestrator::new(config, Mode::Delete, false).expect("orchestrator");
    orchestrator.run().await.expect("run");
}

/// A tenant without a prior grant gets exactly one grant and one revoke;
/// a tenant with a pre-existing grant never enters the ledger. Dry runs
/// revoke too.
#[tokio::test]
async fn test_ledger_grants_and_revokes_exactly_once() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let baseline_path = dir.path().join("baseline.json");
    let report_path = dir.path().join("report.json");

    BaselineSnapshot::new().save(&baseline_path).expect("baseline");
    mount_admin_resolution(&server).await;

    Mock::given(method("GET"))
        .and(path("/v3/projects/t-new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project": {"id": "t-new", "name": "sandbox"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [
                {"id": "t-new", "name": "sandbox"},
                {"id": "p-harness", "name": "harness"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"domains": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"roles": []})))
        .mount(&server)
        .await;

    // No grant on the sandbox tenant, a pre-existing one on the harness
    Mock::given(method("HEAD"))
        .and(path("/v3/projects/t-new/users/u-admin/roles/r-admin"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/v3/projects/p-harness/users/u-admin/roles/r-admin"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v3/projects/t-new/users/u-admin/roles/r-admin"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/projects/t-new/users/u-admin/roles/r-admin"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v3/projects/p-harness/users/u-admin/roles/r-admin"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/projects/p-harness/users/u-admin/roles/r-admin"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    // Enable the block-storage family so tenant sections show up in the report
    Mock::given(method("GET"))
        .and(path_regex(r"^/volume/v3/[^/]+/snapshots/detail$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"snapshots": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/volume/v3/[^/]+/volumes/detail$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"volumes": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/volume/v3/[^/]+/os-quota-sets/[^/]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quota_set": {"gigabytes": {"in_use": 0, "limit": 1000}}
        })))
        .mount(&server)
        .await;

    let config = test_config_with_services(
        &server,
        &baseline_path,
        &report_path,
        json!({ "compute": false, "network": false, "volume": true, "image": false }),
    );
    let orchestrator =
        CleanupOrchestrator::new(config, Mode::DryRun, true).expect("orchestrator");
    orchestrator.run().await.expect("run");

    // The dry run wrote a report and mutated nothing else
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("report"))
            .expect("report json");
    assert_eq!(report["tenants"]["t-new"]["name"], "sandbox");
    assert!(report["tenants"]["t-new"]["resources"]["volumes"].is_array());
    assert_eq!(
        report["tenants"]["t-new"]["resources"]["volume_quota"]["gigabytes"]["limit"],
        1000
    );
    assert!(report["global"].get("projects").is_some());
}

/// Two dry-run passes over unchanged cloud state write identical reports.
#[tokio::test]
async fn test_dry_run_is_idempotent() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let baseline_path = dir.path().join("baseline.json");

    BaselineSnapshot::new().save(&baseline_path).expect("baseline");
    mount_admin_resolution(&server).await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/v3/projects/[^/]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project": {"id": "t1", "name": "alpha"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [{"id": "t1", "name": "alpha"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": "u9", "name": "leftover"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"domains": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"roles": []})))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path_regex(r"^/v3/projects/[^/]+/users/u-admin/roles/r-admin$"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut reports = Vec::new();
    for pass in 0..2 {
        let report_path = dir.path().join(format!("report-{pass}.json"));
        let config = test_config(&server, &baseline_path, &report_path);
        let orchestrator =
            CleanupOrchestrator::new(config, Mode::DryRun, true).expect("orchestrator");
        orchestrator.run().await.expect("run");
        reports.push(std::fs::read_to_string(&report_path).expect("report"));
    }

    assert_eq!(reports[0], reports[1]);
}

/// Baseline capture snapshots the global types, deletes nothing, and the
/// file round-trips.
#[tokio::test]
async fn test_capture_baseline_round_trip() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let baseline_path = dir.path().join("baseline.json");
    let report_path = dir.path().join("report.json");

    mount_admin_resolution(&server).await;

    Mock::given(method("GET"))
        .and(path("/v3/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [
                {"id": "p1", "name": "keep-me"},
                {"id": "p-harness", "name": "harness"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": "u1", "name": "alice"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "domains": [{"id": "d1", "name": "extra", "enabled": true}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "roles": [{"id": "r1", "name": "member"}]
        })))
        .mount(&server)
        .await;
    // No deletion in the capture branch
    Mock::given(method("DELETE"))
        .and(path_regex(".*"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server, &baseline_path, &report_path);
    let orchestrator =
        CleanupOrchestrator::new(config, Mode::InitState, true).expect("orchestrator");
    orchestrator.run().await.expect("run");

    let reloaded = BaselineSnapshot::load(&baseline_path).expect("reload");
    assert!(reloaded.contains(ResourceType::Project, "p1"));
    assert!(reloaded.contains(ResourceType::User, "u1"));
    assert!(reloaded.contains(ResourceType::Domain, "d1"));
    assert!(reloaded.contains(ResourceType::Role, "r1"));
    // The admin project is intrinsically protected, never baseline material
    assert!(!reloaded.contains(ResourceType::Project, "p-harness"));
}

/// A missing baseline file aborts a delete run before any API call beyond
/// admin resolution.
#[tokio::test]
async fn test_missing_baseline_is_fatal() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    mount_admin_resolution(&server).await;
    Mock::given(method("DELETE"))
        .and(path_regex(".*"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(
        &server,
        &dir.path().join("absent-baseline.json"),
        &dir.path().join("report.json"),
    );
    let orchestrator =
        CleanupOrchestrator::new(config, Mode::Delete, true).expect("orchestrator");

    let err = orchestrator.run().await.expect_err("must refuse to run");
    assert!(format!("{err:#}").contains("baseline"));
}

// =============================================================================
// Service-level scenarios
// =============================================================================

/// Router deletion detaches both interface ports (and only those) before
/// removing the router itself.
#[tokio::test]
async fn test_router_delete_detaches_interface_ports_first() {
    let server = MockServer::start().await;
    let config = service_test_config(&server);
    let client = stacksweep::cloud::ApiClient::new(config.endpoints.clone(), "tok".to_string())
        .expect("client")
        .scoped_to("t1");
    let tenant = tenant_scope("t1", "alpha");
    let baseline = BaselineSnapshot::new();

    Mock::given(method("GET"))
        .and(path("/v2.0/routers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "routers": [{"id": "r1", "name": "gw", "tenant_id": "t1"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.0/ports"))
        .and(query_param("device_id", "r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ports": [
                {"id": "port-a", "device_owner": "network:router_interface"},
                {"id": "port-b", "device_owner": "network:router_interface_distributed"},
                {"id": "port-ext", "device_owner": "network:router_gateway"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v2.0/routers/r1/remove_router_interface"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2.0/routers/r1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let service = SweepService {
        kind: ResourceType::Router,
        client: &client,
        mode: Mode::Delete,
        tenant: Some(&tenant),
        preserve: true,
        baseline: &baseline,
        config: &config,
    };
    service.delete().await.expect("delete");
}

/// One failing delete does not stop the loop: all candidates are attempted
/// and the call itself still succeeds.
#[tokio::test]
async fn test_delete_is_best_effort_per_item() {
    let server = MockServer::start().await;
    let config = service_test_config(&server);
    let client = stacksweep::cloud::ApiClient::new(config.endpoints.clone(), "tok".to_string())
        .expect("client")
        .scoped_to("t1");
    let tenant = tenant_scope("t1", "alpha");
    let baseline = BaselineSnapshot::new();

    Mock::given(method("GET"))
        .and(path("/v2.1/servers/detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servers": [
                {"id": "s1", "name": "vm-1", "tenant_id": "t1"},
                {"id": "s2", "name": "vm-2", "tenant_id": "t1"},
                {"id": "s3", "name": "vm-3", "tenant_id": "t1"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2.1/servers/s1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2.1/servers/s2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2.1/servers/s3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let service = SweepService {
        kind: ResourceType::Server,
        client: &client,
        mode: Mode::Delete,
        tenant: Some(&tenant),
        preserve: true,
        baseline: &baseline,
        config: &config,
    };
    service.delete().await.expect("delete must not raise");
}

/// Quota delete resets the tenant quota; dry-run reports current usage
/// instead of candidates.
#[tokio::test]
async fn test_quota_reset_and_dry_run_report() {
    let server = MockServer::start().await;
    let config = service_test_config(&server);
    let client = stacksweep::cloud::ApiClient::new(config.endpoints.clone(), "tok".to_string())
        .expect("client")
        .scoped_to("t1");
    let tenant = tenant_scope("t1", "alpha");
    let baseline = BaselineSnapshot::new();

    Mock::given(method("DELETE"))
        .and(path("/v2.1/os-quota-sets/t1"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.1/os-quota-sets/t1/detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quota_set": {"cores": {"in_use": 4, "limit": 20}}
        })))
        .mount(&server)
        .await;

    let delete_service = SweepService {
        kind: ResourceType::ComputeQuota,
        client: &client,
        mode: Mode::Delete,
        tenant: Some(&tenant),
        preserve: true,
        baseline: &baseline,
        config: &config,
    };
    delete_service.delete().await.expect("reset");

    let dry_service = SweepService {
        kind: ResourceType::ComputeQuota,
        client: &client,
        mode: Mode::DryRun,
        tenant: Some(&tenant),
        preserve: true,
        baseline: &baseline,
        config: &config,
    };
    let mut report = DryRunReport::new();
    dry_service.dry_run(&mut report).await.expect("dry run");

    assert_eq!(
        report.tenants["t1"].resources["compute_quota"]["cores"]["limit"],
        20
    );
}

/// Domains are disabled before deletion; the default domain is untouchable.
#[tokio::test]
async fn test_domain_delete_disables_first() {
    let server = MockServer::start().await;
    let config = service_test_config(&server);
    let client = stacksweep::cloud::ApiClient::new(config.endpoints.clone(), "tok".to_string())
        .expect("client");
    let baseline = BaselineSnapshot::new();

    Mock::given(method("GET"))
        .and(path("/v3/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "domains": [
                {"id": "default", "name": "Default", "enabled": true},
                {"id": "d2", "name": "test-domain", "enabled": true}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v3/domains/d2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "domain": {"id": "d2", "enabled": false}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/domains/d2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v3/domains/default"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/domains/default"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let service = SweepService {
        kind: ResourceType::Domain,
        client: &client,
        mode: Mode::Delete,
        tenant: None,
        preserve: true,
        baseline: &baseline,
        config: &config,
    };
    service.delete().await.expect("delete");
}

/// Listing failures are not swallowed: they escape the service call.
#[tokio::test]
async fn test_listing_failure_propagates() {
    let server = MockServer::start().await;
    let config = service_test_config(&server);
    let client = stacksweep::cloud::ApiClient::new(config.endpoints.clone(), "tok".to_string())
        .expect("client")
        .scoped_to("t1");
    let tenant = tenant_scope("t1", "alpha");
    let baseline = BaselineSnapshot::new();

    Mock::given(method("GET"))
        .and(path("/v2.1/servers/detail"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let service = SweepService {
        kind: ResourceType::Server,
        client: &client,
        mode: Mode::Delete,
        tenant: Some(&tenant),
        preserve: true,
        baseline: &baseline,
        config: &config,
    };
    assert!(service.delete().await.is_err());
}
