use sidik::commands::Cli;
use sidik::libs::messages::macros::is_debug_mode;
use sidik::msg_error;

fn main() {
    // Messages route through tracing only in debug mode; without a
    // subscriber they would vanish.
    if is_debug_mode() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    if let Err(err) = Cli::menu() {
        msg_error!(format!("{:#}", err));
        std::process::exit(1);
    }
}
