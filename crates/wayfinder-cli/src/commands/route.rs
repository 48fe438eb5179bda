//! Route command handler for planning paths between locations.

use anyhow::Result;
use clap::Args;

use wayfinder_lib::{plan_route, LocationMap, RouteAlgorithm, RouteConstraints, RouteRequest};

use wayfinder_cli::output::{render_json, render_route_text, OutputFormat};

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Starting location name.
    #[arg(long = "from")]
    pub from: String,
    /// Destination location name.
    #[arg(long = "to")]
    pub to: String,
    /// Search algorithm: bfs, uniform-cost (dijkstra), greedy or a-star.
    #[arg(long, default_value = "a-star")]
    pub algorithm: RouteAlgorithm,
    /// Locations the route must not pass through (repeatable).
    #[arg(long = "avoid")]
    pub avoid: Vec<String>,
    /// Longest single link the route may use.
    #[arg(long)]
    pub max_link: Option<u32>,
}

impl RouteArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest {
            start: self.from.clone(),
            goal: self.to.clone(),
            algorithm: self.algorithm,
            constraints: RouteConstraints {
                max_link: self.max_link,
                avoid: self.avoid.clone(),
            },
        }
    }
}

pub fn handle_route(map: &LocationMap, args: &RouteArgs, format: OutputFormat) -> Result<()> {
    let plan = plan_route(map, &args.to_request())?;
    let rendered = match format {
        OutputFormat::Text => render_route_text(&plan),
        OutputFormat::Json => render_json(&plan)?,
    };
    println!("{rendered}");
    Ok(())
}
