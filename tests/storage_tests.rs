//! Tests for the processed-lead store: read-modify-write appends, missing
//! file behavior, dead-letter writes, and the no-lost-updates guarantee for
//! concurrent appends.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use dealer_leads_api::models::{LeadInput, LeadStatus, ProcessedLeadRecord};
use dealer_leads_api::storage::LeadStore;

fn sample_lead(n: usize) -> LeadInput {
    LeadInput {
        branch_id: "400".to_string(),
        worker_code: format!("W{}", n),
        asked_car: "M001".to_string(),
        first_name: "Noa".to_string(),
        last_name: "Levi".to_string(),
        email: format!("noa{}@gmail.com", n),
        phone: "0501234567".to_string(),
        from_web_site: "www.cardealer.co.il".to_string(),
        area: "1".to_string(),
    }
}

fn rejected_record(n: usize) -> ProcessedLeadRecord {
    ProcessedLeadRecord {
        lead_id: Uuid::new_v4(),
        original_lead: sample_lead(n),
        branch_info: None,
        car_info: None,
        enrichment: None,
        score: None,
        priority: None,
        assigned_to: None,
        status: LeadStatus::Rejected,
        reason: Some("Missing name".to_string()),
        processed_at: Utc::now(),
    }
}

#[tokio::test]
async fn read_all_on_missing_file_is_empty() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = LeadStore::new(
        tmp.path().join("processed_leads.json"),
        tmp.path().join("dead_letter.jsonl"),
    )
    .expect("store");

    let records = store.read_all().await.expect("read");
    assert!(records.is_empty());
}

#[tokio::test]
async fn append_then_read_round_trips() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = LeadStore::new(
        tmp.path().join("processed_leads.json"),
        tmp.path().join("dead_letter.jsonl"),
    )
    .expect("store");

    let record = rejected_record(1);
    store.append(&record).await.expect("append");

    let records = store.read_all().await.expect("read");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].lead_id, record.lead_id);
    assert_eq!(records[0].status, LeadStatus::Rejected);
    assert_eq!(records[0].reason.as_deref(), Some("Missing name"));
    assert_eq!(records[0].original_lead.email, record.original_lead.email);
}

#[tokio::test]
async fn appends_preserve_order_within_a_writer() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = LeadStore::new(
        tmp.path().join("processed_leads.json"),
        tmp.path().join("dead_letter.jsonl"),
    )
    .expect("store");

    for n in 0..5 {
        store.append(&rejected_record(n)).await.expect("append");
    }

    let records = store.read_all().await.expect("read");
    let workers: Vec<&str> = records
        .iter()
        .map(|r| r.original_lead.worker_code.as_str())
        .collect();
    assert_eq!(workers, vec!["W0", "W1", "W2", "W3", "W4"]);
}

#[tokio::test]
async fn concurrent_appends_lose_no_records() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(
        LeadStore::new(
            tmp.path().join("processed_leads.json"),
            tmp.path().join("dead_letter.jsonl"),
        )
        .expect("store"),
    );

    const N: usize = 25;
    let mut handles = Vec::new();
    for n in 0..N {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.append(&rejected_record(n)).await
        }));
    }
    for handle in handles {
        handle.await.expect("join").expect("append");
    }

    let records = store.read_all().await.expect("read");
    assert_eq!(records.len(), N);

    // Every spawned record made it in exactly once.
    let mut workers: Vec<String> = records
        .iter()
        .map(|r| r.original_lead.worker_code.clone())
        .collect();
    workers.sort();
    workers.dedup();
    assert_eq!(workers.len(), N);
}

#[tokio::test]
async fn dead_letter_appends_one_json_line() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dead_letter_path = tmp.path().join("dead_letter.jsonl");
    let store = LeadStore::new(tmp.path().join("processed_leads.json"), &dead_letter_path)
        .expect("store");

    let record = rejected_record(7);
    store.dead_letter(&record).await;

    let content = std::fs::read_to_string(&dead_letter_path).expect("dead letter readable");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);

    let parsed: ProcessedLeadRecord = serde_json::from_str(lines[0]).expect("parseable");
    assert_eq!(parsed.lead_id, record.lead_id);
}
