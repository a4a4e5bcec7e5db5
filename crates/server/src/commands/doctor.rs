//! Doctor command - validate configuration and credentials

use anyhow::Result;
use news_relay::AppConfig;
use news_relay::credentials::{self, OPTIONAL, REQUIRED};
use news_relay_adapters::news::NewsApiClient;
use news_relay_domain::Persona;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::args::DoctorArgs;

#[derive(Debug, Serialize)]
struct DoctorReport {
    dotenv: CheckResult,
    config: CheckResult,
    credentials: Vec<NamedCheck>,
    news_api: CheckResult,
    llm: CheckResult,
    x: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct NamedCheck {
    name: String,
    #[serde(flatten)]
    result: CheckResult,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        dotenv: check_dotenv(),
        config: CheckResult::error("Not checked"),
        credentials: Vec::new(),
        news_api: CheckResult::error("Not checked"),
        llm: CheckResult::error("Not checked"),
        x: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    // Check config
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {:#}", e));
            None
        }
    };

    // Check credentials (presence only, never values)
    for name in REQUIRED {
        report.credentials.push(NamedCheck {
            name: name.to_string(),
            result: check_credential(name, true),
        });
    }
    for name in OPTIONAL {
        report.credentials.push(NamedCheck {
            name: name.to_string(),
            result: check_credential(name, false),
        });
    }

    if let Some(ref config) = config {
        report.news_api = check_news_api(config, args.offline).await;
        report.llm = check_llm(config);
        report.x = check_x(config);
    }

    // Determine overall status
    let mut checks: Vec<&CheckResult> = vec![
        &report.dotenv,
        &report.config,
        &report.news_api,
        &report.llm,
        &report.x,
    ];
    checks.extend(report.credentials.iter().map(|c| &c.result));

    let has_error = checks.iter().any(|c| c.is_error());
    let all_ok = checks.iter().all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    // Output report
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

/// Load `.env` the same way `serve` does; a missing file is not a problem
fn check_dotenv() -> CheckResult {
    match dotenvy::dotenv_override() {
        Ok(path) => CheckResult::ok(format!("Loaded {}", path.display())),
        Err(e) if e.not_found() => CheckResult::ok("No .env file (using process environment)"),
        Err(e) => CheckResult::error(format!("Failed to read .env file: {}", e)),
    }
}

fn check_credential(name: &str, required: bool) -> CheckResult {
    match credentials::load(name) {
        Ok(_) => CheckResult::ok("set"),
        Err(e) if required => CheckResult::error(e.to_string()),
        Err(e) => CheckResult::warn(format!("{} (optional)", e)),
    }
}

async fn check_news_api(config: &AppConfig, offline: bool) -> CheckResult {
    let key = match credentials::load(credentials::NEWS_API_KEY) {
        Ok(k) => k,
        Err(e) => return CheckResult::error(format!("Cannot probe NewsAPI: {}", e)),
    };

    if offline {
        return CheckResult::warn(format!(
            "Not probed (offline), base_url: {}",
            config.news.base_url
        ));
    }

    let client = NewsApiClient::with_base_url(
        key,
        config.news.base_url.clone(),
        Duration::from_secs(config.news.timeout_secs),
    );

    match client.verify_key().await {
        Ok(()) => CheckResult::ok(format!("API key accepted by {}", config.news.base_url)),
        Err(e) => CheckResult::error(format!("API key check failed: {}", e)),
    }
}

fn check_llm(config: &AppConfig) -> CheckResult {
    let llm = &config.llm;

    if llm.base_url.trim().is_empty() {
        return CheckResult::error("LLM base_url is empty");
    }

    CheckResult::ok(format!(
        "Model: {}, temperature: {}, max_tokens: {}",
        llm.model, llm.temperature, llm.max_output_tokens
    ))
    .with_details(serde_json::json!({
        "base_url": llm.base_url,
        "personas": Persona::ALL.iter().map(|p| p.id()).collect::<Vec<_>>(),
    }))
}

fn check_x(config: &AppConfig) -> CheckResult {
    let x = &config.x;

    if x.base_url.trim().is_empty() {
        return CheckResult::error("X base_url is empty");
    }

    let wait = if x.wait_on_rate_limit {
        format!("wait up to {}s on rate limit", x.rate_limit_max_wait_secs)
    } else {
        "fail fast on rate limit".to_string()
    };

    CheckResult::ok(format!("Endpoint: {}/2/tweets, {}", x.base_url, wait))
}

fn print_report(report: &DoctorReport) {
    println!("news-relay Doctor Report");
    println!("========================");
    println!();

    print_check(".env", &report.dotenv);
    print_check("Config", &report.config);
    for check in &report.credentials {
        print_check(&check.name, &check.result);
    }
    print_check("NewsAPI", &report.news_api);
    print_check("LLM", &report.llm);
    print_check("X", &report.x);

    println!();
    let symbol = match report.overall.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} Overall: {}", symbol, report.overall.to_uppercase());

    if report.overall != "error" {
        println!();
        println!("Ready to serve! Try: news-relay serve");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    let symbol = match result.status.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} {}: {}", symbol, name, result.message);
}
