#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// A server process on its own port with an empty in-memory store.
/// Killed when dropped, so every test starts from a clean directory.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_employee-api"));
        cmd.env("EMPLOYEE_API_PORT", port.to_string())
            .env("SERVER_HOST", "127.0.0.1")
            .env("DATABASE_BACKEND", "memory")
            .env("API_ENABLE_REQUEST_LOGGING", "false")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// A valid employee body with password `Secret1`.
pub fn employee_json(email: &str, roles: &[&str], birthdate: (&str, &str, &str)) -> Value {
    let (day, month, year) = birthdate;
    json!({
        "email": email,
        "name": email.split('@').next().unwrap_or(email),
        "password": "Secret1",
        "birthdate": { "day": day, "month": month, "year": year },
        "roles": roles,
    })
}

pub async fn create(client: &reqwest::Client, server: &TestServer, body: &Value) -> Result<reqwest::Response> {
    Ok(client.post(server.url("/employees")).json(body).send().await?)
}

/// Emails of a JSON array response, in order.
pub fn emails(payload: &Value) -> Vec<String> {
    payload
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|e| e["email"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
