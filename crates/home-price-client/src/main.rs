mod app;
mod commands;
mod config;
mod logging;
mod wiring;

use std::error::Error;

use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init_tracing();
    let config = config::Config::from_env()?;
    let (mut session, pipeline) = wiring::build_client(&config)?;

    let input = BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();
    app::run(&mut session, &pipeline, input, &mut output).await?;
    Ok(())
}
