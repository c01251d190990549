// PostgreSQL round-trip endpoint

use axum::{Json, extract::State};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{info, instrument};

use crate::config::state::AppState;
use crate::database::{POSTGRESQL_CONNECTION_STRING, test_table};
use crate::utils::error_handler::AppError;

/// Ensures the test table exists, inserts one random number and returns every
/// stored number. Nothing wraps the steps in a transaction, so the insert
/// persists even when the final read fails.
#[instrument(skip(state))]
pub async fn round_trip(State(state): State<AppState>) -> Result<Json<Vec<i32>>, AppError> {
    let number: i32 = next_number();

    let numbers: Vec<i32> = state
        .database
        .with_connection(POSTGRESQL_CONNECTION_STRING, move |conn| {
            Box::pin(async move {
                test_table::ensure_table(conn).await?;
                test_table::insert_number(conn, number).await?;
                test_table::fetch_numbers(conn).await
            })
        })
        .await?;

    info!("Inserted {}, table now holds {} rows", number, numbers.len());
    Ok(Json(numbers))
}

/// Draws a non-negative value from a generator built and seeded for this call only
pub fn next_number() -> i32 {
    let mut rng: SmallRng = SmallRng::from_os_rng();
    rng.random_range(0..i32::MAX)
}
