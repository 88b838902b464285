use anyhow::Result;
use pts_core::config::{self, PtsConfig};

/// Print config path and effective retry settings.
pub fn run_config(cfg: &PtsConfig) -> Result<()> {
    let retry = cfg.retry_config();
    let policy = retry.policy();
    println!("config: {}", config::config_path()?.display());
    println!("connect_timeout_secs: {}", cfg.connect_timeout_secs);
    println!("timeout_secs: {}", cfg.timeout_secs);
    println!("retries: {}", retry.retries);
    println!("backoff_step_secs: {}", retry.backoff_step_secs);
    println!(
        "worst-case wait: {} seconds",
        policy.worst_case_wait().as_secs()
    );
    Ok(())
}
