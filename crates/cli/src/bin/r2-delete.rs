use clap::Parser;
use r2sync::args::DeleteCli;
use r2sync::handlers;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    r2sync::init();

    let cli = DeleteCli::parse();
    let result = handlers::handle_delete(&cli.path, cli.bucket.as_deref()).await;

    std::process::exit(r2sync::report(result).as_i32());
}
