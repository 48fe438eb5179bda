//! Entity search command handler.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use wayfinder_lib::{
    load_entities, EntityFinder, Finder, FinderConfig, KdTreeStorage, Position, TagFilter,
    WayFilter,
};

use wayfinder_cli::output::{render_find_text, render_json, FindReport, OutputFormat};

/// Kind of entity to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FindMode {
    Entity,
    Node,
    Way,
    Address,
}

impl FindMode {
    fn as_str(self) -> &'static str {
        match self {
            FindMode::Entity => "entity",
            FindMode::Node => "node",
            FindMode::Way => "way",
            FindMode::Address => "address",
        }
    }
}

/// Arguments for the find command.
#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    /// Name, `key=value` tag, `*`, or `street [number][, place]` in address mode.
    pub pattern: String,
    /// JSON file holding the map entities.
    #[arg(long)]
    pub entities: PathBuf,
    /// Latitude of the search position.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    /// Longitude of the search position.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
    #[arg(long, value_enum, default_value_t = FindMode::Entity)]
    pub mode: FindMode,
    /// Way filter in way mode: `key`, `key=*` or `key=v1|v2`.
    #[arg(long)]
    pub way_tag: Option<String>,
    /// Number of follow-up passes widening past the first result set.
    #[arg(long, default_value_t = 0)]
    pub more: usize,
    /// Pick one of several candidate places and search around it.
    #[arg(long)]
    pub select: Option<usize>,
    /// Override the minimum search radius (km).
    #[arg(long)]
    pub min_radius: Option<f64>,
    /// Override the maximum search radius (km).
    #[arg(long)]
    pub max_radius: Option<f64>,
}

pub fn handle_find(args: &FindArgs, config: &FinderConfig, format: OutputFormat) -> Result<()> {
    let entities = load_entities(&args.entities)
        .with_context(|| format!("failed to load entities from {}", args.entities.display()))?;
    let storage = KdTreeStorage::build(entities);
    let mut finder = Finder::with_config(&storage, config)?;
    if let Some(km) = args.min_radius {
        finder.set_min_radius(km);
    }
    if let Some(km) = args.max_radius {
        finder.set_max_radius(km);
    }

    let position = Position::new(args.lat, args.lon);
    match args.mode {
        FindMode::Entity => finder.find_entity(&args.pattern, position)?,
        FindMode::Node => finder.find_node(&args.pattern, position)?,
        FindMode::Way => {
            let filter = args
                .way_tag
                .as_deref()
                .map(TagFilter::parse)
                .transpose()?
                .map(|filter| Arc::new(filter) as Arc<dyn WayFilter>);
            finder.find_way(&args.pattern, position, filter)?
        }
        FindMode::Address => finder.find_address(&args.pattern, position)?,
    }

    if let Some(index) = args.select {
        let selected = finder
            .intermediate_results()
            .get(index)
            .cloned()
            .with_context(|| {
                format!(
                    "no candidate place at index {index} ({} available)",
                    finder.intermediate_results().len()
                )
            })?;
        finder.select_intermediate_result(selected);
        finder.find_more()?;
    }
    for _ in 0..args.more {
        finder.find_more()?;
    }

    let report = FindReport::new(
        args.mode.as_str(),
        args.pattern.trim(),
        position,
        finder.results(),
        finder.intermediate_results(),
    );
    let rendered = match format {
        OutputFormat::Text => render_find_text(&report),
        OutputFormat::Json => render_json(&report)?,
    };
    println!("{rendered}");
    Ok(())
}
