use clap::Parser;
use r2sync::args::Cli;
use r2sync::handlers;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    r2sync::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    let result = if cli.upload {
        handlers::handle_upload(
            std::path::Path::new(&cli.path),
            cli.base_path.as_deref(),
            cli.bucket.as_deref(),
        )
        .await
    } else {
        handlers::handle_delete(&cli.path, cli.bucket.as_deref()).await
    };

    std::process::exit(r2sync::report(result).as_i32());
}
