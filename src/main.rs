#[tokio::main]
async fn main() {
    if let Err(e) = teams_backend::run().await {
        eprintln!("teams-backend failed to start: {}", e);
        std::process::exit(1);
    }
}
