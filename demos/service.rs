use std::time::Duration;

use chrono::{DateTime, Utc};
use dragon_bind::{Bind, Loader};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Bind)]
struct ServiceConfig {
    #[bind(default = "127.0.0.1:8080")]
    pub listen: String,
    #[bind(default = "4")]
    pub num_workers: u16,
    #[bind(default = "30s")]
    pub timeout: Duration,
    #[bind(default = "false")]
    pub debug: bool,
    #[bind(format = "%Y-%m-%d")]
    pub maintenance_day: DateTime<Utc>,
}

fn main() -> Result<(), dragon_bind::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // SERVICE_* variables override demos/service.conf
    let mut config = ServiceConfig::default();
    Loader::new()
        .with_env("SERVICE_")
        .with_file("demos/service.conf")
        .load(&mut config)?;

    println!("listen={} workers={}", config.listen, config.num_workers);
    println!("timeout={:?} debug={}", config.timeout, config.debug);
    println!("maintenance={}", config.maintenance_day.format("%a %b %e %Y"));

    Ok(())
}
