use serde::{Deserialize, Serialize};

use crate::utils::VehicleId;

/// Ordered platoon membership. Index 0 is the leader; the remaining entries
/// are followers in platoon order, front to back.
///
/// Identifiers are unique within a formation. The structure is mutated only
/// by the maneuver coordinator, either by dropping the trailing entry when a
/// member abandons or by wholesale replacement when a `FormationUpdate`
/// arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatoonFormation(Vec<VehicleId>);

impl PlatoonFormation {
    pub fn new(members: Vec<VehicleId>) -> Self {
        debug_assert!(
            {
                let mut seen = std::collections::HashSet::new();
                members.iter().all(|id| seen.insert(*id))
            },
            "duplicate vehicle id in platoon formation"
        );
        PlatoonFormation(members)
    }

    pub fn leader(&self) -> Option<VehicleId> {
        self.0.first().copied()
    }

    /// Followers in platoon order, i.e. every member except the leader.
    pub fn followers(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.0.iter().skip(1).copied()
    }

    pub fn last(&self) -> Option<VehicleId> {
        self.0.last().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drops the trailing member and returns it, if any.
    pub fn remove_last(&mut self) -> Option<VehicleId> {
        self.0.pop()
    }

    pub fn members(&self) -> &[VehicleId] {
        &self.0
    }
}

impl std::fmt::Display for PlatoonFormation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ ")?;
        for id in &self.0 {
            write!(f, "{} ", id)?;
        }
        write!(f, "]")
    }
}

impl From<Vec<u32>> for PlatoonFormation {
    fn from(ids: Vec<u32>) -> Self {
        PlatoonFormation::new(ids.into_iter().map(VehicleId).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leader_and_followers() {
        let formation = PlatoonFormation::from(vec![1, 2, 3, 4]);

        assert_eq!(formation.leader(), Some(VehicleId(1)));
        let followers: Vec<VehicleId> = formation.followers().collect();
        assert_eq!(followers, vec![VehicleId(2), VehicleId(3), VehicleId(4)]);
    }

    #[test]
    fn test_remove_last() {
        let mut formation = PlatoonFormation::from(vec![1, 2, 3]);

        assert_eq!(formation.remove_last(), Some(VehicleId(3)));
        assert_eq!(formation.members(), &[VehicleId(1), VehicleId(2)]);
        assert_eq!(formation.len(), 2);
    }

    #[test]
    fn test_empty_formation() {
        let mut formation = PlatoonFormation::default();

        assert!(formation.is_empty());
        assert_eq!(formation.leader(), None);
        assert_eq!(formation.remove_last(), None);
    }

    #[test]
    fn test_display() {
        let formation = PlatoonFormation::from(vec![1, 2, 3]);
        assert_eq!(format!("{}", formation), "[ 1 2 3 ]");
    }
}
