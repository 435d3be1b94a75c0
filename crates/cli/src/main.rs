use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    gemflow_cli::run().await
}
