//! Output formatting for command results.
//!
//! Every renderer returns a `String` so the text layout can be checked
//! without capturing stdout.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use wayfinder_lib::{EntityId, EntityKind, MapEntity, Position, RoutePlan};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Serialize `value` as pretty JSON.
pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render a planned route.
pub fn render_route_text(plan: &RoutePlan) -> String {
    let mut out = format!(
        "Route from {} to {} ({} hops; algorithm: {}):\n",
        plan.start,
        plan.goal,
        plan.hop_count(),
        plan.algorithm
    );
    for step in &plan.steps {
        let _ = writeln!(out, "- {}", step);
    }
    let _ = write!(out, "\nTotal distance: {}", plan.distance);
    out
}

/// Entity as reported by the `find` command.
#[derive(Debug, Clone, Serialize)]
pub struct FoundEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl FoundEntity {
    pub fn new(entity: &MapEntity, origin: &Position) -> Self {
        Self {
            id: entity.id(),
            kind: entity.kind(),
            name: entity.name().map(str::to_string),
            position: entity.position(),
            distance_km: entity.distance_km(origin),
            tags: entity.tags().clone(),
        }
    }

    fn label(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match (self.tags.get("addr:street"), self.tags.get("addr:housenumber")) {
            (Some(street), Some(number)) => format!("{street} {number}"),
            (Some(street), None) => street.clone(),
            _ => "<unnamed>".to_string(),
        }
    }
}

/// Outcome of an entity search.
#[derive(Debug, Clone, Serialize)]
pub struct FindReport {
    pub mode: String,
    pub pattern: String,
    pub position: Position,
    pub results: Vec<FoundEntity>,
    pub intermediate_results: Vec<FoundEntity>,
}

impl FindReport {
    pub fn new(
        mode: impl Into<String>,
        pattern: impl Into<String>,
        position: Position,
        results: &[MapEntity],
        intermediate_results: &[MapEntity],
    ) -> Self {
        Self {
            mode: mode.into(),
            pattern: pattern.into(),
            position,
            results: results
                .iter()
                .map(|entity| FoundEntity::new(entity, &position))
                .collect(),
            intermediate_results: intermediate_results
                .iter()
                .map(|entity| FoundEntity::new(entity, &position))
                .collect(),
        }
    }
}

/// Render an entity search outcome.
pub fn render_find_text(report: &FindReport) -> String {
    let mut out = String::new();
    if report.results.is_empty() {
        let _ = write!(
            out,
            "No matches for {} '{}' near {}",
            report.mode, report.pattern, report.position
        );
    } else {
        let _ = write!(
            out,
            "Found {} result(s) for {} '{}' near {}:",
            report.results.len(),
            report.mode,
            report.pattern,
            report.position
        );
        for (index, found) in report.results.iter().enumerate() {
            let _ = write!(out, "\n{}. {}", index + 1, describe(found));
        }
    }

    if report.intermediate_results.len() > 1 {
        let _ = write!(
            out,
            "\n\n{} candidate places; rerun with --select <index>:",
            report.intermediate_results.len()
        );
        for (index, found) in report.intermediate_results.iter().enumerate() {
            let _ = write!(out, "\n[{}] {}", index, describe(found));
        }
    }
    out
}

fn describe(found: &FoundEntity) -> String {
    match found.distance_km {
        Some(km) => format!("{} [{} {}] {:.2} km", found.label(), found.kind, found.id, km),
        None => format!("{} [{} {}]", found.label(), found.kind, found.id),
    }
}
