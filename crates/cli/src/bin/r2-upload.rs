use clap::Parser;
use r2sync::args::UploadCli;
use r2sync::handlers;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    r2sync::init();

    let cli = UploadCli::parse();
    let result =
        handlers::handle_upload(&cli.path, cli.base_path.as_deref(), cli.bucket.as_deref()).await;

    std::process::exit(r2sync::report(result).as_i32());
}
