use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use dotenvy::dotenv;
use services::{AppServices, Endpoint, QuizService};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn endpoint_label(&self) -> String {
        match &self.services.config().endpoint {
            Endpoint::Offline => "BUILT-IN (OFFLINE)".to_string(),
            Endpoint::Remote(url) => url.host_str().unwrap_or("REMOTE").to_string(),
        }
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app");
    eprintln!();
    eprintln!("Environment (a .env file in the working directory is read first):");
    eprintln!("  QUIZ_ENDPOINT_URL          question/score endpoint; unset or MockUrl = offline");
    eprintln!("  QUIZ_QUESTION_COUNT        questions per session (default 5)");
    eprintln!("  QUIZ_PASS_THRESHOLD        correct answers needed to pass (default 3)");
    eprintln!("  QUIZ_REQUEST_TIMEOUT_SECS  http timeout (default 15)");
    eprintln!("  QUIZ_MOCK_DELAY_MS         simulated offline latency (default 1000)");
    eprintln!("  RUST_LOG                   log filter (default info)");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::args()
        .skip(1)
        .any(|arg| matches!(arg.as_str(), "--help" | "-h"))
    {
        print_usage();
        return Ok(());
    }

    let services = AppServices::from_env()?;
    info!(
        endpoint = %services.config().endpoint,
        questions = services.config().rules.question_count().get(),
        pass_threshold = services.config().rules.pass_threshold(),
        "starting pixel quiz"
    );

    let context = build_app_context(Arc::new(DesktopApp { services }));

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Pixel Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run() {
        error!("{err}");
        print_usage();
        std::process::exit(2);
    }
}
