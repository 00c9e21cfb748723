//! Instagram profile scanner - CLI entry point.

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use instagram_scanner::{
    api::{login_flow, CredentialsProvider, InstagramApi, ProfileSource, SessionStore, TerminalPrompter},
    cli::Args,
    config::{validate_config, Config, ScanMode},
    error::{exit_codes, Result},
    fs::{basic_report_path, ensure_dir, report_path},
    output::{
        create_spinner, print_banner, print_config_summary, print_error, print_info,
        print_profile_overview, print_scan_summary, print_success, print_warning,
    },
    report::{write_json_report, ProfileRecord, ScanReport},
    scan::{self, InterruptFlag, ScanState},
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            if let Some(hint) = e.remediation_hint() {
                print_info(hint);
            }
            ExitCode::from(exit_codes::FAILURE as u8)
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    let username = config.target.username.clone();
    let output_dir = config.output_directory(&username);

    // Print configuration summary
    print_config_summary(
        &username,
        &config.options.scan_mode.to_string(),
        &output_dir.display().to_string(),
    );

    // Initialize API client
    let mut api = InstagramApi::new(&config)?;

    match config.options.scan_mode {
        ScanMode::Basic => run_basic(&api, &username).await,
        ScanMode::Full => run_full(&mut api, &config, &username, &output_dir).await,
    }
}

/// Basic mode: profile metadata only, written next to the working directory.
async fn run_basic(api: &InstagramApi, username: &str) -> Result<()> {
    let spinner = create_spinner(&format!("Fetching profile info for @{}...", username));
    let profile = api.resolve_profile(username).await;
    spinner.finish_and_clear();

    let profile = profile?;
    print_profile_overview(&profile);

    let report = ProfileRecord::from(&profile);
    let path = basic_report_path(username);
    write_json_report(&path, &report)?;

    print_success(&format!("Profile info saved to {}", path.display()));
    Ok(())
}

/// Full mode: login, profile, stories, highlights, posts, report.
async fn run_full(
    api: &mut InstagramApi,
    config: &Config,
    username: &str,
    output_dir: &std::path::Path,
) -> Result<()> {
    // Optional login, session reuse first
    if !config.account.skip_login {
        let mut prompter = TerminalPrompter::new();
        let wants_login = match &config.account.username {
            Some(_) => true,
            None => prompter.confirm_login()?,
        };

        if wants_login {
            let store = SessionStore::open()?;
            let account = config.account.username.clone();
            if !login_flow(api, &store, &mut prompter, account).await? {
                print_info("Continuing anonymously (stories and highlights unavailable)");
            }
        }
    }

    // Resolve target, applying the private-profile policy
    let profile = scan::resolve_profile(api, username).await?;
    print_profile_overview(&profile);

    ensure_dir(output_dir)?;

    // Ctrl-C drains the loops instead of killing the process, so a partial
    // report still gets written
    let interrupt = InterruptFlag::default();
    {
        let interrupt = interrupt.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                print_warning("Interrupt received, finishing current item...");
                interrupt.set();
            }
        });
    }

    let mut state = ScanState::default();

    match scan::download_profile_pic(api, &profile, output_dir).await {
        Ok(_) => state.profile_pic_downloaded = true,
        Err(e) => print_warning(&format!("Profile picture download failed: {}", e)),
    }

    scan::collect_stories(api, &profile, output_dir, &mut state, &interrupt).await?;
    scan::collect_highlights(api, &profile, output_dir, &mut state, &interrupt).await?;
    let posts = scan::collect_posts(api, config, &profile, output_dir, &mut state, &interrupt).await?;

    // Assemble and write the report
    let report = ScanReport {
        profile: scan::build_profile_record(&profile),
        posts,
        stats: state.stats(),
        scan_date: Utc::now(),
    };
    let report_file = report_path(output_dir);
    write_json_report(&report_file, &report)?;

    print_scan_summary(username, &state, output_dir, &report_file, interrupt.is_set());

    Ok(())
}
