use bacserve_core::types::{ObjectType, PropertyId, ReinitializeState};
use bacserve_device::{DeviceServer, LoggingEngine, PropertyRequest};
use bacserve_tools::load_config;
use clap::{Parser, ValueEnum};
use serde_json::json;
use std::net::Ipv4Addr;
use std::path::PathBuf;

#[derive(Debug, Clone, ValueEnum)]
enum ReinitStateArg {
    Coldstart,
    Warmstart,
    StartBackup,
    EndBackup,
    StartRestore,
    EndRestore,
    AbortRestore,
    ActivateChanges,
}

impl ReinitStateArg {
    const fn into_state(self) -> ReinitializeState {
        match self {
            Self::Coldstart => ReinitializeState::Coldstart,
            Self::Warmstart => ReinitializeState::Warmstart,
            Self::StartBackup => ReinitializeState::StartBackup,
            Self::EndBackup => ReinitializeState::EndBackup,
            Self::StartRestore => ReinitializeState::StartRestore,
            Self::EndRestore => ReinitializeState::EndRestore,
            Self::AbortRestore => ReinitializeState::AbortRestore,
            Self::ActivateChanges => ReinitializeState::ActivateChanges,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bacserve-reinit")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "activate-changes")]
    state: ReinitStateArg,
    #[arg(long)]
    password: Option<String>,
    /// Stage a BBMD address on the network port before reinitializing.
    #[arg(long)]
    bbmd_ip: Option<Ipv4Addr>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let mut server = DeviceServer::new(&config, LoggingEngine)?;

    if let Some(ip) = args.bbmd_ip {
        let bbmd =
            PropertyRequest::new(ObjectType::NetworkPort, 0, PropertyId::FdBbmdAddress).with_index(1);
        server.set_enumerated(&bbmd, 1, None)?;
        server.set_octet_string(&bbmd, &ip.octets(), None)?;
        println!(
            "staged bbmd {ip}; changes pending: {}",
            server.network_port().changes_pending
        );
    }

    let state = args.state.into_state();
    match server.reinitialize_device(state.to_u32(), args.password.as_deref()) {
        Ok(outcome) => {
            let output = json!({
                "state": outcome.state,
                "restart": outcome.restart,
                "committed_changes": outcome.committed_changes,
                "changes_pending": server.network_port().changes_pending,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Err(e) => {
            eprintln!(
                "reinitialize-device rejected: {e} ({:?}/{:?})",
                e.error_class(),
                e.error_code()
            );
            std::process::exit(1);
        }
    }
    Ok(())
}
