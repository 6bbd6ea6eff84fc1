use profile_service_server::{
    build_state, config::Config, consumers::start_consumers, init_tracing, lifecycle,
    shutdown::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    let state = build_state(&config).await?;

    lifecycle::run(
        &config,
        state,
        |state| start_consumers(&config.bus, state.registration_service.clone()),
        shutdown_signal(),
    )
    .await
}
