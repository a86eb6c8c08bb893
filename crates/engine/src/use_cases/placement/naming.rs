use homestead_domain::{ActorName, BuildingUse, Structure, StructureKind};

/// Name painted on a building's sign, if it has one.
///
/// Civic and commercial buildings show their formal name; everything else an
/// actor owns is "<first name>'s House".
pub fn sign_name(structure: &Structure, owner: &ActorName) -> Option<String> {
    match structure.kind() {
        StructureKind::Building {
            has_sign: true,
            usage,
        } => Some(match usage {
            BuildingUse::Civic | BuildingUse::Commercial => structure.object_name().to_string(),
            BuildingUse::Residential => owner.house_name(),
        }),
        _ => None,
    }
}
