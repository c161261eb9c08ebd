use mindguard_core::{CompanionClient, Config};

pub fn run(message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let client = CompanionClient::from_settings(&config.companion)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let reply = runtime.block_on(client.ask(message))?;
    println!("{reply}");
    Ok(())
}
