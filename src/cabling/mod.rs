use crate::models::{CableType, CablingEntry, MediaType, TopologyLink};

impl From<MediaType> for CableType {
    fn from(media: MediaType) -> Self {
        match media {
            MediaType::Fiber => CableType::FiberOptic,
            MediaType::Copper => CableType::CopperStraightThrough,
        }
    }
}

/// One cabling entry per link, in link order
pub fn derive(links: &[TopologyLink]) -> Vec<CablingEntry> {
    links
        .iter()
        .map(|link| CablingEntry {
            from: link.source_id.clone(),
            to: link.target_id.clone(),
            cable_type: link.media_type.into(),
        })
        .collect()
}
