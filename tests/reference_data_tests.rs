//! Tests for the static reference tables: branch CSV loading with its
//! default fallback, and the delimited block format of the car catalog.

use std::path::PathBuf;

use dealer_leads_api::event_log::EventLog;
use dealer_leads_api::reference_data::{ReferenceData, DEFAULT_BRANCH_ID};

const SEPARATOR: &str =
    "--------------------------------------------------------------------------------";

struct Fixture {
    _tmp: tempfile::TempDir,
    branch_file: PathBuf,
    car_file: PathBuf,
    log_file: PathBuf,
}

fn fixture() -> Fixture {
    let tmp = tempfile::tempdir().expect("tempdir");
    Fixture {
        branch_file: tmp.path().join("branch_config.csv"),
        car_file: tmp.path().join("car_models.txt"),
        log_file: tmp.path().join("leads.log"),
        _tmp: tmp,
    }
}

fn write_branches(fx: &Fixture) {
    std::fs::write(
        &fx.branch_file,
        "BranchID,Name,Manager,Region\n\
         400,Tel Aviv Showroom,David Cohen,Center\n\
         512,Haifa Bay Motors,Rina Azulay,North\n",
    )
    .expect("write branches");
}

fn write_car_models(fx: &Fixture) {
    let content = format!(
        "Model ID: M001\n\
         Model: Tesla Model 3\n\
         Category: Electric\n\
         Price Range: 180000-220000 ILS\n\
         Availability: In Stock\n\
         {SEPARATOR}\n\
         Model ID: M002\n\
         Model: BMW 7 Series\n\
         Category: Luxury\n\
         Price Range: 650000-800000 ILS\n\
         Availability: Pre-Order\n"
    );
    std::fs::write(&fx.car_file, content).expect("write car models");
}

#[test]
fn loads_branches_and_looks_up_by_id() {
    let fx = fixture();
    write_branches(&fx);
    write_car_models(&fx);
    let events = EventLog::open(&fx.log_file).expect("event log");

    let reference = ReferenceData::load(&fx.branch_file, &fx.car_file, &events);
    assert_eq!(reference.branch_count(), 2);

    let branch = reference.branch("512");
    assert_eq!(branch.name, "Haifa Bay Motors");
    assert_eq!(branch.manager, "Rina Azulay");
    assert_eq!(branch.region, "North");
}

#[test]
fn unknown_branch_falls_back_to_default() {
    let fx = fixture();
    write_branches(&fx);
    write_car_models(&fx);
    let events = EventLog::open(&fx.log_file).expect("event log");

    let reference = ReferenceData::load(&fx.branch_file, &fx.car_file, &events);
    let branch = reference.branch("999");
    assert_eq!(branch.name, "Tel Aviv Showroom");
    assert_eq!(branch.manager, "David Cohen");
}

#[test]
fn missing_branch_file_installs_built_in_default_and_logs_file_error() {
    let fx = fixture();
    write_car_models(&fx);
    let events = EventLog::open(&fx.log_file).expect("event log");

    let reference = ReferenceData::load(&fx.branch_file, &fx.car_file, &events);
    assert_eq!(reference.branch_count(), 1);

    let branch = reference.branch(DEFAULT_BRANCH_ID);
    assert_eq!(branch.name, "Tel Aviv Showroom");
    assert_eq!(branch.manager, "David Cohen");
    assert_eq!(branch.region, "Center");

    let log = std::fs::read_to_string(&fx.log_file).expect("log readable");
    assert!(log.contains("file_error"));
}

#[test]
fn parses_car_model_blocks() {
    let fx = fixture();
    write_branches(&fx);
    write_car_models(&fx);
    let events = EventLog::open(&fx.log_file).expect("event log");

    let reference = ReferenceData::load(&fx.branch_file, &fx.car_file, &events);
    assert_eq!(reference.car_model_count(), 2);

    let car = reference.car_model("M001").expect("M001 present");
    assert_eq!(car.model_name.as_deref(), Some("Tesla Model 3"));
    assert_eq!(car.category.as_deref(), Some("Electric"));
    assert_eq!(car.price_range.as_deref(), Some("180000-220000 ILS"));
    assert_eq!(car.availability.as_deref(), Some("In Stock"));

    let car = reference.car_model("M002").expect("M002 present");
    assert_eq!(car.category.as_deref(), Some("Luxury"));
    assert_eq!(car.availability.as_deref(), Some("Pre-Order"));
}

#[test]
fn car_model_miss_yields_none() {
    let fx = fixture();
    write_branches(&fx);
    write_car_models(&fx);
    let events = EventLog::open(&fx.log_file).expect("event log");

    let reference = ReferenceData::load(&fx.branch_file, &fx.car_file, &events);
    assert!(reference.car_model("NOPE").is_none());
}

#[test]
fn block_with_missing_labeled_lines_yields_null_fields() {
    let fx = fixture();
    write_branches(&fx);
    std::fs::write(
        &fx.car_file,
        "Model ID: M010\nModel: Bare Entry\n",
    )
    .expect("write car models");
    let events = EventLog::open(&fx.log_file).expect("event log");

    let reference = ReferenceData::load(&fx.branch_file, &fx.car_file, &events);
    let car = reference.car_model("M010").expect("M010 present");
    assert_eq!(car.model_name.as_deref(), Some("Bare Entry"));
    assert!(car.category.is_none());
    assert!(car.price_range.is_none());
    assert!(car.availability.is_none());
}

#[test]
fn missing_car_file_leaves_catalog_empty_and_logs_file_error() {
    let fx = fixture();
    write_branches(&fx);
    let events = EventLog::open(&fx.log_file).expect("event log");

    let reference = ReferenceData::load(&fx.branch_file, &fx.car_file, &events);
    assert_eq!(reference.car_model_count(), 0);

    let log = std::fs::read_to_string(&fx.log_file).expect("log readable");
    assert!(log.contains("file_error"));
}
