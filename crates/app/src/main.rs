//! EasyTest - Main Entry Point

use easytest::{Context, Opts, load_config, logging, run};
use structopt::StructOpt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::from_args();

    let (repository, config) = load_config(&opts).await?;
    logging::init(opts.log.as_deref(), &config.log_level);

    let context = Context::build(opts.data_dir, repository, config).await?;
    let mut stdout = std::io::stdout().lock();
    run(&context, opts.command, &mut stdout).await?;
    Ok(())
}
