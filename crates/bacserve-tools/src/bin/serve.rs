use bacserve_core::types::ReinitializeState;
use bacserve_device::host::{
    decode_connection_string, receive_from_connection, CONNECTION_STRING_LEN,
};
use bacserve_device::{BbmdConfig, DeviceServer, LoggingEngine, ServerConfig};
use bacserve_tools::load_config;
use clap::Parser;
use log::{debug, info, warn};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::UdpSocket;

const MAX_BIP_FRAME_LEN: usize = 1600;

#[derive(Parser, Debug)]
#[command(name = "bacserve-serve")]
struct Args {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured device instance.
    #[arg(long)]
    instance: Option<u32>,
    /// Overrides the configured UDP port.
    #[arg(long)]
    port: Option<u16>,
    /// Overrides the configured reinitialize password.
    #[arg(long)]
    password: Option<String>,
    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,
    /// Analog input 0 drift per tick.
    #[arg(long, default_value_t = 0.01)]
    drift: f32,
    /// Register with the configured BBMD at start-up.
    #[arg(long)]
    register_foreign: bool,
    /// Issue a warm start with the configured password at this tick.
    #[arg(long)]
    warmstart_at: Option<u64>,
    /// Stop after this many ticks.
    #[arg(long)]
    ticks: Option<u64>,
}

/// Carries committed network-port settings into the next configuration.
fn carry_network_port(config: &mut ServerConfig, server: &DeviceServer<LoggingEngine>) {
    let port = server.network_port();
    config.network.udp_port = port.udp_port;
    config.network.bbmd = port.foreign_device_target().map(|address| BbmdConfig {
        address,
        lifetime_seconds: port.fd_subscription_lifetime,
    });
}

async fn bind(port: u16) -> std::io::Result<UdpSocket> {
    let socket = UdpSocket::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).await?;
    socket.set_broadcast(true)?;
    Ok(socket)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(instance) = args.instance {
        config.device.instance = instance;
    }
    if let Some(port) = args.port {
        config.network.udp_port = port;
    }
    if let Some(password) = args.password {
        config.reinitialize_password = password;
    }

    let mut server = DeviceServer::new(&config, LoggingEngine)?;
    if args.register_foreign {
        let target = server.register_foreign_device()?;
        println!("registered as foreign device with {target}");
    }
    let mut socket = bind(config.network.udp_port).await?;
    println!(
        "device {} serving {} objects on {}",
        config.device.instance,
        server.catalog().object_ids().len(),
        socket.local_addr()?
    );

    let mut interval = tokio::time::interval(Duration::from_millis(args.interval_ms));
    let mut rx = [0u8; MAX_BIP_FRAME_LEN];
    let mut from = [0u8; CONNECTION_STRING_LEN];
    let mut tick: u64 = 0;
    loop {
        tokio::select! {
            ready = socket.readable() => {
                ready?;
                // drain everything queued; the engine decodes frames
                loop {
                    let len = receive_from_connection(&socket, &mut rx, &mut from);
                    if len == 0 {
                        break;
                    }
                    if let Some(peer) = decode_connection_string(&from) {
                        debug!("received {len} bytes from {peer}");
                    }
                }
                continue;
            }
            _ = interval.tick() => {}
        }
        tick += 1;

        // alternate direction so the value oscillates around its seed
        let delta = if tick % 2 == 0 { -args.drift } else { args.drift };
        if let Err(e) = server.adjust_analog_input(0, delta) {
            warn!("analog input drift skipped: {e}");
        }

        if args.warmstart_at == Some(tick) {
            let password = config.reinitialize_password.as_str();
            if let Err(e) =
                server.reinitialize_device(ReinitializeState::Warmstart.to_u32(), Some(password))
            {
                warn!("warm start refused: {e}");
            }
        }

        if server.take_restart_request() {
            info!("warm start requested; rebuilding endpoint");
            let previous_port = config.network.udp_port;
            carry_network_port(&mut config, &server);
            server = DeviceServer::new(&config, server.into_engine())?;
            if config.network.udp_port != previous_port {
                socket = bind(config.network.udp_port).await?;
            }
            println!(
                "device {} restarted on {}",
                config.device.instance,
                socket.local_addr()?
            );
        }

        if args.ticks.is_some_and(|limit| tick >= limit) {
            break;
        }
    }
    Ok(())
}
