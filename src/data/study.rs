use super::model::{DataKey, Phase};

/// Enumerate the study cases: every phase, then every angle of attack, then
/// every span station, in the order given.
pub fn data_keys(angles_of_attack: &[u32], span_locations: &[u32]) -> Vec<DataKey> {
    let mut keys = Vec::with_capacity(Phase::ALL.len() * angles_of_attack.len() * span_locations.len());
    for phase in Phase::ALL {
        for &aoa in angles_of_attack {
            for &loc in span_locations {
                keys.push(DataKey::new(phase, aoa, loc));
            }
        }
    }
    keys
}
