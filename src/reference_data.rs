use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::event_log::EventLog;
use crate::models::{Branch, CarModel};

/// Branch every unknown `BranchID` falls back to.
pub const DEFAULT_BRANCH_ID: &str = "400";

/// Separator line between car model blocks in the catalog file.
const CAR_BLOCK_SEPARATOR: &str =
    "--------------------------------------------------------------------------------";

/// Immutable snapshot of the static reference tables, loaded once at startup
/// and shared behind an `Arc`. A missing source file is logged as a
/// `file_error` event and replaced by built-in fallbacks; it is never fatal.
pub struct ReferenceData {
    branches: HashMap<String, Branch>,
    default_branch: Branch,
    car_models: HashMap<String, CarModel>,
}

/// Row shape of the branch reference table (`BranchID,Name,Manager,Region`).
#[derive(Debug, Deserialize)]
struct BranchRow {
    #[serde(rename = "BranchID")]
    branch_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Manager")]
    manager: String,
    #[serde(rename = "Region")]
    region: String,
}

impl ReferenceData {
    pub fn load(branch_file: impl AsRef<Path>, car_file: impl AsRef<Path>, events: &EventLog) -> Self {
        let branches = load_branches(branch_file.as_ref(), events);
        let default_branch = branches
            .get(DEFAULT_BRANCH_ID)
            .cloned()
            .unwrap_or_else(built_in_default_branch);
        let car_models = load_car_models(car_file.as_ref(), events);

        Self {
            branches,
            default_branch,
            car_models,
        }
    }

    /// Looks up a branch by id, falling back to the default branch ("400")
    /// when the id is unknown.
    pub fn branch(&self, branch_id: &str) -> &Branch {
        self.branches.get(branch_id).unwrap_or(&self.default_branch)
    }

    /// Looks up a car model by id. A miss yields `None` ("no car info"),
    /// never an error.
    pub fn car_model(&self, model_id: &str) -> Option<&CarModel> {
        self.car_models.get(model_id)
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    pub fn car_model_count(&self) -> usize {
        self.car_models.len()
    }
}

fn built_in_default_branch() -> Branch {
    Branch {
        name: "Tel Aviv Showroom".to_string(),
        manager: "David Cohen".to_string(),
        region: "Center".to_string(),
    }
}

/// Loads the branch table from its CSV file. When the file is absent the
/// store degrades to the single built-in default branch.
fn load_branches(path: &Path, events: &EventLog) -> HashMap<String, Branch> {
    let mut branches = HashMap::new();

    if !path.exists() {
        events.file_error(&format!("{} not found", path.display()));
        branches.insert(DEFAULT_BRANCH_ID.to_string(), built_in_default_branch());
        return branches;
    }

    match csv::Reader::from_path(path) {
        Ok(mut reader) => {
            for result in reader.deserialize::<BranchRow>() {
                match result {
                    Ok(row) => {
                        branches.insert(
                            row.branch_id,
                            Branch {
                                name: row.name,
                                manager: row.manager,
                                region: row.region,
                            },
                        );
                    }
                    Err(e) => {
                        tracing::warn!("Skipping malformed branch row: {}", e);
                    }
                }
            }
            tracing::info!("Loaded {} branch(es) from {}", branches.len(), path.display());
        }
        Err(e) => {
            events.file_error(&format!("failed to read {}: {}", path.display(), e));
            branches.insert(DEFAULT_BRANCH_ID.to_string(), built_in_default_branch());
        }
    }

    branches
}

/// Loads the car model catalog from its delimited text block format:
/// labeled "Field: value" lines, blocks separated by a fixed-width dash line.
fn load_car_models(path: &Path, events: &EventLog) -> HashMap<String, CarModel> {
    let mut car_models = HashMap::new();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            events.file_error(&format!("{} not found", path.display()));
            return car_models;
        }
    };

    for entry in content.split(CAR_BLOCK_SEPARATOR) {
        if let Some(model_id) = extract_field(entry, "Model ID") {
            car_models.insert(model_id, parse_car_entry(entry));
        }
    }

    tracing::info!(
        "Loaded {} car model(s) from {}",
        car_models.len(),
        path.display()
    );
    car_models
}

fn parse_car_entry(entry: &str) -> CarModel {
    CarModel {
        model_name: extract_field(entry, "Model"),
        category: extract_field(entry, "Category"),
        price_range: extract_field(entry, "Price Range"),
        availability: extract_field(entry, "Availability"),
    }
}

/// Returns the value of the first `"{field}: value"` line in the block.
fn extract_field(entry: &str, field: &str) -> Option<String> {
    let prefix = format!("{}:", field);
    entry
        .lines()
        .find_map(|line| line.strip_prefix(&prefix))
        .map(|value| value.trim().to_string())
}
