use std::env;

#[tokio::main]
async fn main() {
    env_logger::init();

    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            if let Err(e) = compound::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Some("project") => {
            if let Err(e) = compound::cli::run(raw_args.iter().skip(1)) {
                eprintln!("Invalid input: {e}");
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("Usage: compound serve [port] | compound project [options]");
            std::process::exit(1);
        }
    }
}
