use idskill_api::setup;
use idskill_core::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let (_state, router) = setup::initialize_app(&config)?;

    setup::server::start_server(&config, router).await?;

    Ok(())
}
