mod cli;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use platoon_sim::mock::vehicle_control::MockVehicleControl;
use platoon_sim::{
    Config, InMemoryTransport, LocalVehicleState, PlatoonId, Vehicle, VehicleCommand, VehicleId,
};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Some(path) = cli.init {
        Config::default().save_to_file(&path)?;
        info!("wrote default config to {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    let formation = config.formation();
    let scenario = config.scenario();
    info!("starting convoy {formation} in platoon {}", config.platoon_id);

    // Wire one in-memory transport endpoint per vehicle and cross-register
    // every peer.
    let mut transports = Vec::new();
    let mut senders = HashMap::new();
    let mut receivers = Vec::new();
    for member in &config.members {
        let id = VehicleId(member.id);
        let (transport, tx, rx) = InMemoryTransport::new(id);
        senders.insert(id, tx);
        receivers.push((transport.clone(), rx));
        transports.push(transport);
    }
    for transport in &transports {
        for (id, tx) in &senders {
            if *id != transport.id {
                transport.add_peer(*id, tx.clone());
            }
        }
    }
    for (transport, rx) in receivers {
        tokio::spawn(async move { transport.run(rx).await });
    }

    let mut vehicles = Vec::new();
    for (member, transport) in config.members.iter().zip(transports) {
        let state = Arc::new(LocalVehicleState::new(
            VehicleId(member.id),
            member.external_id.clone(),
            PlatoonId(config.platoon_id),
            formation.clone(),
        ));
        let control = Arc::new(MockVehicleControl::new(5.0, 5.0));

        let vehicle = Vehicle::new(
            state,
            control.clone(),
            control,
            Arc::new(transport),
            Some(scenario.clone()),
        );
        vehicle.start().await?;
        vehicles.push(vehicle);
    }

    tokio::time::sleep(Duration::from_secs(cli.run_for)).await;

    for vehicle in &vehicles {
        info!(
            "v<{}> final formation = {}",
            vehicle.state.id(),
            vehicle.state.formation()
        );
    }

    for vehicle in &vehicles {
        vehicle
            .bus()?
            .enqueue(VehicleCommand::Shutdown)
            .await
            .map_err(platoon_sim::PlatoonError::Other)?;
    }
    tokio::time::sleep(Duration::from_millis(100)).await;

    Ok(())
}
