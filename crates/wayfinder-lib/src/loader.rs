//! JSON loaders for location maps and map entities.
//!
//! Map description format:
//!
//! ```json
//! {
//!   "reference": "Home",
//!   "locations": [
//!     { "name": "Home", "x": 0.0, "y": 0.0 },
//!     { "name": "Shop", "distance": 3.5, "bearing": 90 }
//!   ],
//!   "links": [
//!     { "from": "Home", "to": "Shop", "distance": 4 },
//!     { "from": "Shop", "to": "Depot", "distance": 2, "bidirectional": false }
//!   ]
//! }
//! ```
//!
//! Polar placements (`distance` + `bearing`) are relative to the reference
//! location at the origin. Entity files hold a JSON array of [`MapEntity`]
//! values tagged with `"kind": "node" | "way"`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::entity::MapEntity;
use crate::error::{Error, Result};
use crate::map::{Distance, LocationMap};

#[derive(Debug, Deserialize)]
struct MapFile {
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    locations: Vec<LocationEntry>,
    #[serde(default)]
    links: Vec<LinkEntry>,
}

#[derive(Debug, Deserialize)]
struct LocationEntry {
    name: String,
    #[serde(flatten)]
    placement: Placement,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Placement {
    Cartesian { x: f64, y: f64 },
    Polar { distance: f64, bearing: f64 },
}

#[derive(Debug, Deserialize)]
struct LinkEntry {
    from: String,
    to: String,
    distance: Distance,
    #[serde(default = "default_bidirectional")]
    bidirectional: bool,
}

fn default_bidirectional() -> bool {
    true
}

/// Load a location map description from a JSON file.
pub fn load_location_map(path: &Path) -> Result<LocationMap> {
    let raw = fs::read_to_string(path)?;
    let map = parse_location_map(&raw).map_err(|err| Error::MapLoad {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    info!(
        path = %path.display(),
        locations = map.locations().len(),
        "loaded location map"
    );
    Ok(map)
}

/// Build a location map from a JSON description.
pub fn parse_location_map(raw: &str) -> Result<LocationMap> {
    let file: MapFile = serde_json::from_str(raw)?;
    let mut map = LocationMap::new();

    for link in &file.links {
        if link.from.trim().is_empty() || link.to.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "links need non-empty 'from' and 'to' names".to_string(),
            });
        }
        if link.bidirectional {
            map.add_bidirectional_link(&link.from, &link.to, link.distance);
        } else {
            map.add_unidirectional_link(&link.from, &link.to, link.distance);
        }
    }

    if let Some(reference) = &file.reference {
        map.set_reference_location(reference);
    }

    let mut placed = HashSet::new();
    for entry in &file.locations {
        if !placed.insert(entry.name.as_str()) {
            warn!(location = %entry.name, "location placed twice; keeping the last placement");
        }
        if !map.is_location(&entry.name) {
            warn!(location = %entry.name, "placed location is not part of any link");
        }
        match entry.placement {
            Placement::Cartesian { x, y } => map.set_coords(&entry.name, x, y),
            Placement::Polar { distance, bearing } => {
                if file.reference.is_none() {
                    warn!(
                        location = %entry.name,
                        "polar placement without a reference location; assuming origin (0, 0)"
                    );
                }
                map.set_dist_and_dir_to_ref_location(&entry.name, distance, bearing);
            }
        }
    }

    Ok(map)
}

/// Load map entities from a JSON array file.
pub fn load_entities(path: &Path) -> Result<Vec<MapEntity>> {
    let raw = fs::read_to_string(path)?;
    let entities: Vec<MapEntity> = serde_json::from_str(&raw).map_err(|err| Error::MapLoad {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    info!(
        path = %path.display(),
        entities = entities.len(),
        "loaded map entities"
    );
    Ok(entities)
}
