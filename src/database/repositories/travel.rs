//! Travel arrangement repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::travel::{CreateTravelRequest, TravelArrangement, UpdateTravelRequest};
use crate::utils::errors::ThreadlineError;

const TRAVEL_COLUMNS: &str = "id, camp_id, traveler_kind, traveler_id, kind, carrier, booking_ref, depart_location, arrive_location, departs_at, arrives_at, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct TravelRepository {
    pool: PgPool,
}

impl TravelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a travel leg for a camp
    pub async fn create(
        &self,
        camp_id: i64,
        request: CreateTravelRequest,
    ) -> Result<TravelArrangement, ThreadlineError> {
        let travel = sqlx::query_as::<_, TravelArrangement>(
            r#"
            INSERT INTO travel_arrangements (camp_id, traveler_kind, traveler_id, kind, carrier, booking_ref, depart_location, arrive_location, departs_at, arrives_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, camp_id, traveler_kind, traveler_id, kind, carrier, booking_ref, depart_location, arrive_location, departs_at, arrives_at, created_at, updated_at
            "#,
        )
        .bind(camp_id)
        .bind(request.traveler_kind)
        .bind(request.traveler_id)
        .bind(request.kind)
        .bind(request.carrier)
        .bind(request.booking_ref)
        .bind(request.depart_location)
        .bind(request.arrive_location)
        .bind(request.departs_at)
        .bind(request.arrives_at)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(travel)
    }

    /// Find travel leg by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<TravelArrangement>, ThreadlineError> {
        let travel = sqlx::query_as::<_, TravelArrangement>(&format!(
            "SELECT {} FROM travel_arrangements WHERE id = $1",
            TRAVEL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(travel)
    }

    /// Update travel leg
    pub async fn update(
        &self,
        id: i64,
        request: UpdateTravelRequest,
    ) -> Result<TravelArrangement, ThreadlineError> {
        let travel = sqlx::query_as::<_, TravelArrangement>(
            r#"
            UPDATE travel_arrangements
            SET kind = COALESCE($2, kind),
                carrier = COALESCE($3, carrier),
                booking_ref = COALESCE($4, booking_ref),
                depart_location = COALESCE($5, depart_location),
                arrive_location = COALESCE($6, arrive_location),
                departs_at = COALESCE($7, departs_at),
                arrives_at = COALESCE($8, arrives_at),
                updated_at = $9
            WHERE id = $1
            RETURNING id, camp_id, traveler_kind, traveler_id, kind, carrier, booking_ref, depart_location, arrive_location, departs_at, arrives_at, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.kind)
        .bind(request.carrier)
        .bind(request.booking_ref)
        .bind(request.depart_location)
        .bind(request.arrive_location)
        .bind(request.departs_at)
        .bind(request.arrives_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(travel)
    }

    /// Delete travel leg
    pub async fn delete(&self, id: i64) -> Result<(), ThreadlineError> {
        sqlx::query("DELETE FROM travel_arrangements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List travel legs for a camp in departure order
    pub async fn list_for_camp(&self, camp_id: i64) -> Result<Vec<TravelArrangement>, ThreadlineError> {
        let legs = sqlx::query_as::<_, TravelArrangement>(&format!(
            "SELECT {} FROM travel_arrangements WHERE camp_id = $1 ORDER BY departs_at ASC",
            TRAVEL_COLUMNS
        ))
        .bind(camp_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(legs)
    }
}
