use clap::Parser;
use fitness_bot::adapters::{OpenFoodFactsClient, OpenWeatherClient};
use fitness_bot::core::new_shared_store;
use fitness_bot::runtime::{polling, webhook, BotDispatcher};
use fitness_bot::utils::error::ErrorSeverity;
use fitness_bot::utils::{logger, monitor, validation::Validate};
use fitness_bot::{AppConfig, CliArgs, Dispatcher, Mode, TelegramClient};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliArgs::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_container_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting fitness-bot");

    let config = match AppConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 驗證配置，啟動失敗要在綁定任何資源之前
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
        let system_monitor = Arc::new(monitor::SystemMonitor::new(true));
        system_monitor.log_stats("startup");
        monitor::spawn_periodic(system_monitor, Duration::from_secs(60));
    }

    let client = TelegramClient::new(
        &config.telegram_api_base,
        &config.bot_token,
        config.request_timeout_secs,
    );
    let weather = OpenWeatherClient::new(
        &config.weather_api_base,
        &config.weather_api_key,
        config.request_timeout_secs,
    );
    let nutrition =
        OpenFoodFactsClient::new(&config.nutrition_api_base, config.request_timeout_secs);
    let dispatcher: BotDispatcher =
        Dispatcher::new(client.clone(), weather, nutrition, new_shared_store());

    tracing::info!("Mode: {}", config.mode);
    let result = match config.mode {
        Mode::Polling => polling::run(&config, client, dispatcher).await,
        Mode::Webhook => webhook::run(&config, client, dispatcher).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Bot terminated with error: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
