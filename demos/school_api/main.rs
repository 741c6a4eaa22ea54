//! School registry API backed by in-memory stores
//!
//! ```text
//! REGISTRAR_CONFIG=registrar.yaml cargo run --example school_api
//!
//! curl 'localhost:3000/students?pageSize=10&sortField=LastName'
//! curl 'localhost:3000/students?filters=[{"PropertyName":"GradeLevel","Operator":"GreaterThan","Value":"9"}]'
//! ```

use anyhow::Result;
use registrar::prelude::*;

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("invalid date {}-{}-{}", year, month, day))
}

async fn seed(module: &SchoolModule) -> Result<()> {
    let students = [
        ("Ada", "Lovelace", 11, date(2008, 12, 10)?),
        ("Alan", "Turing", 10, date(2009, 6, 23)?),
        ("Grace", "Hopper", 12, date(2007, 12, 9)?),
        ("Edsger", "Dijkstra", 10, date(2009, 5, 11)?),
    ];

    for (first, last, grade_level, born) in students {
        let email = format!("{}.{}@school.test", first, last).to_lowercase();
        module
            .students
            .create(
                Student::new(
                    first.to_string(),
                    last.to_string(),
                    email,
                    born,
                    date(2024, 9, 1)?,
                    grade_level,
                    None,
                    true,
                ),
                Deadline::none(),
            )
            .await?;
    }

    let rooms = [("Lab 1", "North", 1, 24), ("Hall A", "South", 0, 120)];
    for (name, building, floor, capacity) in rooms {
        module
            .classrooms
            .create(
                Classroom::new(
                    name.to_string(),
                    building.to_string(),
                    floor,
                    capacity,
                    name.starts_with("Lab"),
                ),
                Deadline::none(),
            )
            .await?;
    }

    tracing::info!(students = students.len(), "seeded demo data");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = RegistrarConfig::from_env_or_default("REGISTRAR_CONFIG")?;
    config.logging.init()?;

    let module = SchoolModule::in_memory();
    seed(&module).await?;

    let request = QueryRequest::page(1, 2)
        .filter(FilterCriterion::equal("GradeLevel", "10"))
        .sort("LastName", "asc");
    for student in module.students.get(&request, Deadline::none()).await? {
        tracing::info!(id = %student.id, name = %student.last_name, "grade 10 student");
    }

    ServerBuilder::new()
        .with_config(config)
        .register_module(module)
        .serve()
        .await
}
