//! Shared sample catalog for integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use picosql::{Catalog, Column, DataType, Schema, Value};

pub fn decimal(input: &str) -> Value {
    Value::Decimal(input.parse().unwrap())
}

pub fn text(input: &str) -> Value {
    Value::from(input)
}

pub fn date(year: i32, month: u32, day: u32) -> Value {
    Value::Date(NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

/// A catalog with the sample films and people tables.
pub fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    let films = catalog
        .create_table(
            "films",
            Schema::new(vec![
                Column::new("id", DataType::Decimal),
                Column::new("title", DataType::Text),
                Column::new("director", DataType::Decimal),
                Column::new("release_date", DataType::Date),
            ]),
        )
        .unwrap();
    films
        .insert(vec![
            decimal("1"),
            text("The Shawshank Redemption"),
            decimal("1"),
            date(1994, 9, 23),
        ])
        .unwrap();
    films
        .insert(vec![
            decimal("2"),
            text("The Godfather"),
            decimal("2"),
            date(1972, 3, 24),
        ])
        .unwrap();
    films
        .insert(vec![
            decimal("3"),
            text("The Dark Knight"),
            decimal("1"),
            date(2008, 7, 18),
        ])
        .unwrap();

    let people = catalog
        .create_table(
            "people",
            Schema::new(vec![
                Column::new("id", DataType::Decimal),
                Column::new("name", DataType::Text),
            ]),
        )
        .unwrap();
    people
        .insert(vec![decimal("1"), text("Frank Darabont")])
        .unwrap();
    people
        .insert(vec![decimal("2"), text("Francis Ford Coppola")])
        .unwrap();

    catalog
}
