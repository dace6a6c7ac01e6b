mod build;
mod check;
mod clean;
mod info;

pub use build::{BuildArgs, cmd_build};
pub use check::cmd_check;
pub use clean::cmd_clean;
pub use info::cmd_info;

use anyhow::{Context, Result};

/// Block on a library future from the synchronous command handlers.
fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  Ok(rt.block_on(future))
}
