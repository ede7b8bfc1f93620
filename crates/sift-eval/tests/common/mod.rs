//! Shared record fixtures

#![allow(dead_code)]

use chrono::NaiveDate;
use sift_eval::{CompiledPredicate, DynamicQueryBuilder, Record, Schema};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Status {
    Active,
    Suspended,
    Closed,
}

sift_types::scalar_enum!(Status { Active, Suspended, Closed });

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub city: String,
    pub zip: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub id: i32,
    pub name: String,
    pub score: f64,
    pub rank: Option<i64>,
    pub status: Status,
    pub tags: Vec<String>,
    pub codes: [u8; 3],
    pub readings: Vec<Option<i32>>,
    pub slots: [Option<u8>; 2],
    pub created: NaiveDate,
    pub address: Address,
}

static ADDRESS: LazyLock<Schema<Address>> = LazyLock::new(|| {
    Schema::builder("Address")
        .scalar("City", |a: &Address| &a.city)
        .nullable("Zip", |a: &Address| a.zip.as_ref())
        .build()
});

static SAMPLE: LazyLock<Schema<Sample>> = LazyLock::new(|| {
    Schema::builder("Sample")
        .scalar("Id", |s: &Sample| &s.id)
        .scalar("Name", |s: &Sample| &s.name)
        .scalar("Score", |s: &Sample| &s.score)
        .nullable("Rank", |s: &Sample| s.rank.as_ref())
        .scalar("Status", |s: &Sample| &s.status)
        .sequence("Tags", |s: &Sample| &s.tags)
        .sequence("Codes", |s: &Sample| &s.codes)
        .nullable_sequence("Readings", |s: &Sample| &s.readings)
        .nullable_sequence("Slots", |s: &Sample| &s.slots)
        .scalar("Created", |s: &Sample| &s.created)
        .nested("Address", |s: &Sample| &s.address, &ADDRESS)
        .build()
});

impl Record for Sample {
    fn schema() -> &'static Schema<Self> {
        &SAMPLE
    }
}

pub fn sample(id: i32, score: f64) -> Sample {
    Sample {
        id,
        name: format!("sample-{id}"),
        score,
        rank: None,
        status: Status::Active,
        tags: Vec::new(),
        codes: [0, 0, 0],
        readings: Vec::new(),
        slots: [None, None],
        created: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        address: Address {
            city: "Oslo".to_string(),
            zip: None,
        },
    }
}

/// Three records scored 3.0, 5.0 and 5.0
pub fn records() -> Vec<Sample> {
    let mut first = sample(1, 3.0);
    first.tags = vec!["x".into(), "y".into()];
    first.rank = Some(10);
    first.codes = [1, 2, 3];
    first.readings = vec![Some(1), None];
    first.slots = [Some(1), None];
    first.address.zip = Some("0150".into());

    let mut second = sample(2, 5.0);
    second.tags = vec!["y".into()];
    second.readings = vec![Some(1)];
    second.status = Status::Suspended;
    second.created = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    second.address.city = "Bergen".into();

    let mut third = sample(3, 5.0);
    third.rank = Some(2);
    third.readings = vec![None];
    third.slots = [Some(3), Some(4)];
    third.status = Status::Closed;
    third.name = "O'Brien".into();
    third.created = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();

    vec![first, second, third]
}

pub fn compile(query: &str) -> CompiledPredicate<Sample> {
    DynamicQueryBuilder::new()
        .build::<Sample>(query)
        .unwrap_or_else(|e| panic!("Failed to compile '{}': {}", query, e))
}

/// Ids of the records matching `query`
pub fn ids(query: &str) -> Vec<i32> {
    let records = records();
    compile(query).filter(&records).map(|s| s.id).collect()
}
