use anyhow::Context;

pub mod http;
pub mod verify;

#[derive(clap::Parser)]
pub struct Config {
    /// Absolute URL of the endpoint that verifies password reset codes.
    #[clap(long, env)]
    pub verify_url: String,
}

impl Config {
    pub fn verifier(&self) -> anyhow::Result<verify::Upstream> {
        let url = self
            .verify_url
            .parse()
            .with_context(|| format!("invalid verify url: {:?}", self.verify_url))?;

        Ok(verify::Upstream::new(reqwest::Client::new(), url))
    }
}
