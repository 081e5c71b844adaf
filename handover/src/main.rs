// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::rt::System;
use actix_web::{App, HttpServer, web};
use log::info;
use std::sync::Arc;

use handover::app_state::AppState;
use handover::bootstrap::{self, BootstrapResult};
use handover::config::ValidatedConfig;
use handover::runtime_paths::RuntimePaths;
use handover::util::{ACCESS_LOG_FORMAT, init_logger};
use handover::{admin, api, public};

const USAGE: &str = "Usage: handover [-C <runtime-root>] [-h|--help]\n\n  -C <dir>     Runtime root holding config.yaml, content.json and public/uploads (default: .)\n  -h, --help   Show this help\n";

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprint!("{}", USAGE);
            return 2;
        }
    };

    if matches!(parsed_args.mode, RunMode::Help) {
        print!("{}", USAGE);
        return 0;
    }

    let bootstrap = match bootstrap::bootstrap_runtime(&parsed_args.runtime_root) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("❌ Bootstrap error: {}", error);
            eprintln!("❌ Application cannot start with invalid configuration.");
            return 1;
        }
    };

    match System::new().block_on(run_server(bootstrap)) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("❌ Server failed to start: {}", error);
            1
        }
    }
}

async fn run_server(bootstrap: BootstrapResult) -> std::io::Result<()> {
    let validated_config = Arc::new(bootstrap.validated_config);
    let runtime_paths = bootstrap.runtime_paths;

    init_logger(&validated_config.logging.level).map_err(|error| {
        eprintln!("❌ Failed to initialize logger: {}", error);
        std::io::Error::other(error.to_string())
    })?;

    if bootstrap.created_config {
        info!("Created default {}", runtime_paths.config_file.display());
    }
    if bootstrap.created_content {
        info!("Seeded starter content at {}", runtime_paths.content_file.display());
    }

    let app_state = Arc::new(AppState::from_config(
        &validated_config,
        runtime_paths.clone(),
    ));
    log_startup_info(&validated_config, &runtime_paths, &app_state);

    let workers = validated_config.server.workers;
    let (host, port) = validated_config.server.address_tuple();
    let bind_address = (host.to_string(), port);

    let factory = {
        let config_for_app = validated_config.clone();
        let app_state_for_app = app_state.clone();
        let runtime_paths = runtime_paths.clone();

        move || {
            let runtime_paths = runtime_paths.clone();

            App::new()
                .app_data(web::Data::from(config_for_app.clone()))
                .app_data(web::Data::from(app_state_for_app.clone()))
                .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
                .wrap(Logger::new(ACCESS_LOG_FORMAT))
                .configure(api::configure)
                .configure(admin::configure)
                .configure(move |cfg| public::configure(cfg, &runtime_paths))
                .default_service(web::route().to(public::handlers::not_found))
        }
    };

    HttpServer::new(factory)
        .workers(workers)
        .bind(bind_address)?
        .run()
        .await
}

fn log_startup_info(config: &ValidatedConfig, runtime_paths: &RuntimePaths, app_state: &AppState) {
    match &config.app.description {
        Some(description) => info!("Starting {} - {}", config.app.name, description),
        None => info!("Starting {}", config.app.name),
    }
    info!(
        "Listening on http://{}:{} with {} workers",
        config.server.host, config.server.port, config.server.workers
    );
    info!("Runtime root: {}", runtime_paths.root.display());
    info!("Content file: {}", runtime_paths.content_file.display());
    info!("Uploads directory: {}", runtime_paths.uploads_dir.display());
    info!("Storage backend: {}", app_state.content.backend_name());
    info!(
        "Write gate: {}",
        if config.write_gate_enabled() {
            "enabled"
        } else {
            "disabled (content is publicly writable)"
        }
    );
    info!("Auth provider: {}", config.auth_provider.name());
}

#[derive(Debug)]
enum RunMode {
    Serve,
    Help,
}

struct ParsedArgs {
    runtime_root: std::path::PathBuf,
    mode: RunMode,
}

fn parse_args() -> Result<ParsedArgs, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<ParsedArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    if args.iter().any(|arg| is_help_flag(arg)) {
        return Ok(ParsedArgs {
            runtime_root: std::path::PathBuf::from("."),
            mode: RunMode::Help,
        });
    }

    let mut args = args.into_iter();
    let mut runtime_root = std::path::PathBuf::from(".");

    while let Some(arg) = args.next() {
        if arg == "-C" {
            let value = args
                .next()
                .ok_or_else(|| "Missing value for -C".to_string())?;
            runtime_root = std::path::PathBuf::from(value);
        } else {
            return Err(format!("Unexpected argument '{}'", arg));
        }
    }

    let runtime_root = make_runtime_root_absolute(runtime_root)?;

    Ok(ParsedArgs {
        runtime_root,
        mode: RunMode::Serve,
    })
}

fn is_help_flag(arg: &str) -> bool {
    arg == "-h" || arg == "--help"
}

fn make_runtime_root_absolute(
    runtime_root: std::path::PathBuf,
) -> Result<std::path::PathBuf, String> {
    if runtime_root.is_absolute() {
        return Ok(runtime_root);
    }

    let current_dir = std::env::current_dir()
        .map_err(|error| format!("Failed to resolve current directory: {}", error))?;
    Ok(current_dir.join(runtime_root))
}
