//! Doctor command - verify system requirements and configuration.

use crate::cli::{format_size, Output};
use crate::config::{Settings, DEFAULT_FONT_FILE};
use crate::ollama::{create_http_client, has_model, list_models};
use console::style;
use std::path::Path;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks. `config_path` is the `--config` override, if any.
pub async fn run_doctor(settings: &Settings, config_path: Option<&str>) -> anyhow::Result<()> {
    let config_path = config_path
        .map(Settings::expand_path)
        .unwrap_or_else(Settings::default_config_path);

    Output::header("ytrag Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("External Tools").bold());
    let tool_check = check_tool(&settings.youtube.ytdlp_path, install_hint_ytdlp());
    tool_check.print();
    checks.push(tool_check);

    println!();

    println!("{}", style("Ollama").bold());
    let ollama_checks = check_ollama(settings).await;
    for check in &ollama_checks {
        check.print();
    }
    checks.extend(ollama_checks);

    println!();

    println!("{}", style("Files").bold());
    let file_checks = check_files(settings, &config_path);
    for check in &file_checks {
        check.print();
    }
    checks.extend(file_checks);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using ytrag.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! ytrag is ready to use.");
    }

    Ok(())
}

/// Check if an external tool is available.
fn check_tool(name: &str, hint: &str) -> CheckResult {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .chars()
                .take(50)
                .collect::<String>();
            CheckResult::ok(name, &version)
        }
        Ok(_) => CheckResult::error(name, "installed but not working", hint),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::error(name, "not found", hint)
        }
        Err(e) => CheckResult::error(name, &format!("error: {}", e), hint),
    }
}

/// Check the server and the two models the pipeline needs.
async fn check_ollama(settings: &Settings) -> Vec<CheckResult> {
    let host = &settings.ollama.host;
    let spinner = Output::spinner(&format!("Contacting {}...", host));

    let installed = match create_http_client(settings) {
        Ok(http) => list_models(&http, host).await,
        Err(e) => Err(e),
    };
    spinner.finish_and_clear();

    let installed = match installed {
        Ok(models) => models,
        Err(e) => {
            return vec![CheckResult::error(
                "Server",
                &format!("{} unreachable ({})", host, e),
                "Start it with: ollama serve (or set OLLAMA_HOST)",
            )]
        }
    };

    vec![
        CheckResult::ok("Server", &format!("{} ({} models)", host, installed.len())),
        model_check(
            &installed,
            &settings.embedding.model,
            settings.embedding.pull_model,
        ),
        model_check(&installed, &settings.rag.model, false),
    ]
}

/// Status of one model given the server's model list.
fn model_check(installed: &[String], model: &str, pulled_on_demand: bool) -> CheckResult {
    if has_model(installed, model) {
        CheckResult::ok(model, "installed")
    } else if pulled_on_demand {
        CheckResult::warning(
            model,
            "not installed (will be pulled before indexing)",
            &format!("Pull now with: ollama pull {}", model),
        )
    } else {
        CheckResult::error(
            model,
            "not installed",
            &format!("Create it with: ollama pull {0} (or ollama create {0})", model),
        )
    }
}

/// Check the working directory, vector store, font and config file.
fn check_files(settings: &Settings, config_path: &Path) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let work_dir = settings.work_dir();
    if work_dir.is_dir() {
        results.push(CheckResult::ok(
            "Work directory",
            &format!("{}", work_dir.display()),
        ));
    } else {
        results.push(CheckResult::warning(
            "Work directory",
            &format!("{} (will be created)", work_dir.display()),
            "Directory will be created on first run",
        ));
    }

    if settings.vector_store.provider.eq_ignore_ascii_case("sqlite") {
        let db_path = settings.sqlite_path();
        if db_path.exists() {
            let size = std::fs::metadata(&db_path)
                .map(|m| format_size(m.len()))
                .unwrap_or_else(|_| "unknown size".to_string());
            results.push(CheckResult::ok(
                "Database",
                &format!("{} ({})", db_path.display(), size),
            ));
        } else {
            results.push(CheckResult::warning(
                "Database",
                &format!("{} (not created yet)", db_path.display()),
                "Database will be created on first indexing",
            ));
        }
    } else {
        results.push(CheckResult::ok(
            "Vector store",
            &format!("{} (in memory)", settings.vector_store.collection),
        ));
    }

    results.push(font_check(settings));

    if config_path.exists() {
        results.push(CheckResult::ok(
            "Config file",
            &format!("{}", config_path.display()),
        ));
    } else {
        results.push(CheckResult::warning(
            "Config file",
            &format!("{} not found, using defaults", config_path.display()),
            "Create with: ytrag config init",
        ));
    }

    results
}

/// Font the PDF will be typeset in.
fn font_check(settings: &Settings) -> CheckResult {
    let Some(path) = settings.pdf_font_path() else {
        return CheckResult::warning(
            "Font",
            "Helvetica (characters outside Latin-1 are dropped from the PDF)",
            &format!(
                "Set [pdf] font_path or put {} in the work directory",
                DEFAULT_FONT_FILE
            ),
        );
    };

    if path.is_file() {
        CheckResult::ok("Font", &format!("{}", path.display()))
    } else {
        CheckResult::error(
            "Font",
            &format!("{} not found", path.display()),
            "Fix [pdf] font_path or remove it",
        )
    }
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}
