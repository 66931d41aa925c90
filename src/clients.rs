use std::sync::OnceLock;

use color_eyre::eyre::{eyre, Result};

pub static REQWEST: OnceLock<reqwest::Client> = OnceLock::new();

pub fn init_reqwest_client() -> Result<()> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("trip-picker/", env!("CARGO_PKG_VERSION")))
        .build()?;
    REQWEST
        .set(client)
        .map_err(|_| eyre!("reqwest client already initialized"))
}

pub fn get_reqwest_client() -> Result<&'static reqwest::Client> {
    REQWEST.get().ok_or(eyre!("Failed to get reqwest client"))
}
