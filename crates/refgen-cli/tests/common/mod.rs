#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use assert_cmd::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Root listing path served by [`mount_site`].
#[allow(dead_code)]
pub const ROOT_PATH: &str = "/apps-script/reference";

/// Create a configured `refgen` command suitable for integration tests.
///
/// Clears every `REFGEN_*` override so the developer's environment does not
/// leak into the run.
#[allow(dead_code)]
pub fn refgen_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("refgen"));
    cmd.timeout(CMD_TIMEOUT);
    for (key, _) in std::env::vars() {
        if key.starts_with("REFGEN_") {
            cmd.env_remove(key);
        }
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Serve a small reference site: one service with an enum and an interface
/// whose method takes an advanced parameters object.
#[allow(dead_code)]
pub async fn mount_site(server: &MockServer) {
    let pages = [
        (
            ROOT_PATH,
            r#"<html><body><div class="devsite-nav-expandable"><ul class="devsite-nav-section">
               <li class="devsite-nav-item"><a href="/apps-script/reference/demo">Demo</a></li>
               </ul></div></body></html>"#,
        ),
        (
            "/apps-script/reference/demo",
            r#"<html><body>
               <h1 class="devsite-page-title">Demo Service</h1>
               <div class="devsite-article-body">
                 <p>Demo service for tests.</p>
                 <h2 id="classes">Classes</h2>
                 <div class="toc"><table class="member">
                   <tr><th>Name</th><th>Brief description</th></tr>
                   <tr><td><a href="/ref/foo">Foo</a></td><td>An enum of foo values.</td></tr>
                   <tr><td><a href="/ref/task">Task</a></td><td>A scheduled task.</td></tr>
                 </table></div>
               </div></body></html>"#,
        ),
        (
            "/ref/foo",
            r#"<html><body><table class="members property">
               <tr><th>Property</th><th>Type</th><th>Description</th></tr>
               <tr><td>Red</td><td>Enum</td><td>Red.</td></tr>
               <tr><td>Blue</td><td>Enum</td><td>Blue.</td></tr>
               </table></body></html>"#,
        ),
        (
            "/ref/task",
            r#"<html><body><div class="function doc">
               <h3>setOptions(options)</h3>
               <div><p>Sets the options.</p></div>
               <table class="function param">
                 <tr><th>Name</th><th>Type</th><th>Description</th></tr>
                 <tr><td>options</td><td>Object</td><td>advanced parameters for the task</td></tr>
               </table>
               <table class="function advancedparam">
                 <tr><th>Name</th><th>Type</th><th>Description</th></tr>
                 <tr><td>Retries</td><td>Integer</td><td>number of retries</td></tr>
               </table>
               <h4 id="setOptions-return">Return</h4>
               <p>Task - this task</p>
               </div></body></html>"#,
        ),
    ];

    for (page_path, body) in pages {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }
}
