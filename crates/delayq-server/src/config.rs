//! ServerConfig - CLI フラグと環境変数から読む設定

use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use delayq_core::SchedulerConfig;
use delayq_core::app::DEFAULT_MAX_DELAY_SECS;

#[derive(Debug, Clone, Parser)]
#[command(name = "delayq", version, about = "Delayed task scheduler over HTTP")]
pub struct ServerConfig {
    /// Address to bind
    // HOST はシェルがホスト名を入れていることが多いので使わない
    #[arg(long, env = "DELAYQ_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Largest accepted delay, in seconds (at most one day)
    #[arg(
        long,
        env = "DELAYQ_MAX_DELAY_SECS",
        default_value_t = DEFAULT_MAX_DELAY_SECS,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(DEFAULT_MAX_DELAY_SECS))
    )]
    pub max_delay_secs: u32,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "DELAYQ_LOG", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            max_delay_secs: self.max_delay_secs,
        }
    }
}
