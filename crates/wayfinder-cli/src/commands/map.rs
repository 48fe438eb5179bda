//! Map inspection commands: location listing, straight-line distances and
//! random destinations.

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use wayfinder_lib::routing::resolve_location;
use wayfinder_lib::LocationMap;

use wayfinder_cli::output::{render_json, OutputFormat};

#[derive(Debug, Serialize)]
struct LocationEntry<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
    linked_to: Vec<String>,
}

pub fn handle_locations(map: &LocationMap, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for name in map.locations() {
                println!("{name}");
            }
        }
        OutputFormat::Json => {
            let entries: Vec<LocationEntry<'_>> = map
                .locations()
                .iter()
                .map(|name| {
                    let coords = map.xy(name);
                    LocationEntry {
                        name,
                        x: coords.map(|c| c.x),
                        y: coords.map(|c| c.y),
                        linked_to: map.locations_linked_to(name),
                    }
                })
                .collect();
            println!("{}", render_json(&entries)?);
        }
    }
    Ok(())
}

pub fn handle_sld(map: &LocationMap, from: &str, to: &str, format: OutputFormat) -> Result<()> {
    resolve_location(map, from)?;
    resolve_location(map, to)?;
    let distance = map
        .straight_line_distance(from, to)
        .ok_or_else(|| anyhow!("{from} and {to} must both have coordinates"))?;

    match format {
        OutputFormat::Text => {
            println!("Straight-line distance from {from} to {to}: {distance:.1}");
        }
        OutputFormat::Json => {
            let value = serde_json::json!({ "from": from, "to": to, "distance": distance });
            println!("{}", render_json(&value)?);
        }
    }
    Ok(())
}

pub fn handle_random(map: &LocationMap, seed: Option<u64>, format: OutputFormat) -> Result<()> {
    let destination = match seed {
        Some(seed) => map.random_destination(&mut StdRng::seed_from_u64(seed))?,
        None => map.randomly_generate_destination()?,
    };

    match format {
        OutputFormat::Text => println!("{destination}"),
        OutputFormat::Json => {
            let value = serde_json::json!({ "destination": destination });
            println!("{}", render_json(&value)?);
        }
    }
    Ok(())
}
