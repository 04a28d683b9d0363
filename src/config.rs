use std::{fs, io, time::Duration};

use serde::{Deserialize, Serialize};

use crate::maneuver::formation::PlatoonFormation;
use crate::scenario::convoy::ConvoyScenario;
use crate::utils::VehicleId;

/// One platoon member: simulation id plus the identifier the traffic model
/// knows it by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberConfig {
    pub id: u32,
    pub external_id: String,
}

/// Scenario configuration. Members are listed in platoon order, leader
/// first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub platoon_id: u32,
    pub members: Vec<MemberConfig>,
    pub leader_speed_kmh: f64,
    pub follower_speed_margin_mps: f64,
    pub brake_at_s: f64,
    pub check_interval_ms: u64,
    pub abandon_spacing_m: f64,
    pub abandon_threshold_m: f64,
    pub acc_headway_s: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            platoon_id: 0,
            members: (0..4)
                .map(|i| MemberConfig {
                    id: i + 1,
                    external_id: format!("platoon0.{i}"),
                })
                .collect(),
            leader_speed_kmh: 100.0,
            follower_speed_margin_mps: 10.0,
            brake_at_s: 2.0,
            check_interval_ms: 100,
            abandon_spacing_m: 15.0,
            abandon_threshold_m: 14.9,
            acc_headway_s: 1.2,
        }
    }
}

impl Config {
    pub fn formation(&self) -> PlatoonFormation {
        PlatoonFormation::new(self.members.iter().map(|m| VehicleId(m.id)).collect())
    }

    pub fn scenario(&self) -> ConvoyScenario {
        ConvoyScenario {
            leader_speed_mps: self.leader_speed_kmh / 3.6,
            follower_speed_margin_mps: self.follower_speed_margin_mps,
            brake_at: Duration::from_secs_f64(self.brake_at_s),
            check_interval: Duration::from_millis(self.check_interval_ms),
            abandon_spacing_m: self.abandon_spacing_m,
            abandon_threshold_m: self.abandon_threshold_m,
            acc_headway_s: self.acc_headway_s,
        }
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(path, json)
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        let parsed = serde_json::from_str::<Config>(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formation_is_leader_first() {
        let config = Config::default();
        let formation = config.formation();

        assert_eq!(formation.leader(), Some(VehicleId(1)));
        assert_eq!(formation.len(), 4);
    }

    #[test]
    fn test_scenario_speed_conversion() {
        let config = Config::default();
        let scenario = config.scenario();

        assert!((scenario.leader_speed_mps - 100.0 / 3.6).abs() < 1e-9);
        assert_eq!(scenario.check_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("convoy.json");

        let config = Config::default();
        config.save_to_file(&path).unwrap();
        let loaded = Config::load_from_file(&path).unwrap();

        assert_eq!(loaded.members.len(), config.members.len());
        assert_eq!(loaded.abandon_threshold_m, config.abandon_threshold_m);
        assert_eq!(loaded.formation(), config.formation());
    }
}
