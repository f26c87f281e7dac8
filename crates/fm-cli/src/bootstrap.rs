use anyhow::Context;
use fm_config::FmConfig;

/// Load configuration, honoring a `.env` in the working directory.
pub fn load_config() -> anyhow::Result<FmConfig> {
    FmConfig::load_with_dotenv().context("failed to load filemap configuration")
}
