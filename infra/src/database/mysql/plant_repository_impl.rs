//! MySQL implementation of the PlantRepository trait.

use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::query::Query;
use sqlx::{MySql, MySqlPool, Row};

use bg_core::domain::entities::plant::{NewPlant, Plant, PlantDetails, PlantWithTaxonomy};
use bg_core::errors::DomainError;
use bg_core::repositories::PlantRepository;

use super::query_failed;

/// Writable columns, in bind order
const PLANT_COLUMNS: [&str; 31] = [
    "inventory_number",
    "family_id",
    "genus_id",
    "sector_id",
    "biometric_id",
    "species",
    "synonyms",
    "variety",
    "form",
    "plant_origin",
    "natural_habitat",
    "determined",
    "ecology_biology",
    "economic_use",
    "date_of_planting",
    "originator",
    "country",
    "protection_status",
    "herbarium_presence",
    "herbarium_duplicate",
    "filled_out",
    "image_path",
    "latitude",
    "longitude",
    "note",
    "observation_date",
    "year_of_observation",
    "phenophase_date",
    "measurement_year",
    "measurement_type",
    "measurement_value",
];

/// MySQL implementation of PlantRepository
pub struct MySqlPlantRepository {
    pool: MySqlPool,
}

fn select_columns(prefix: &str) -> String {
    std::iter::once("id")
        .chain(PLANT_COLUMNS)
        .map(|c| format!("{}{}", prefix, c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Bind every writable column of `details` in `PLANT_COLUMNS` order
fn bind_details<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    details: &PlantDetails,
) -> Query<'q, MySql, MySqlArguments> {
    query
        .bind(details.inventory_number.clone())
        .bind(details.family_id)
        .bind(details.genus_id)
        .bind(details.sector_id)
        .bind(details.biometric_id)
        .bind(details.species.clone())
        .bind(details.synonyms.clone())
        .bind(details.variety.clone())
        .bind(details.form.clone())
        .bind(details.plant_origin.clone())
        .bind(details.natural_habitat.clone())
        .bind(details.determined.clone())
        .bind(details.ecology_biology.clone())
        .bind(details.economic_use.clone())
        .bind(details.date_of_planting)
        .bind(details.originator.clone())
        .bind(details.country.clone())
        .bind(details.protection_status.clone())
        .bind(details.herbarium_presence)
        .bind(details.herbarium_duplicate.clone())
        .bind(details.filled_out.clone())
        .bind(details.image_path.clone())
        .bind(details.latitude)
        .bind(details.longitude)
        .bind(details.note.clone())
        .bind(details.observation_date)
        .bind(details.year_of_observation)
        .bind(details.phenophase_date)
        .bind(details.measurement_year)
        .bind(details.measurement_type.clone())
        .bind(details.measurement_value)
}

impl MySqlPlantRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_plant(row: &MySqlRow) -> Result<Plant, sqlx::Error> {
        Ok(Plant {
            id: row.try_get("id")?,
            details: PlantDetails {
                inventory_number: row.try_get("inventory_number")?,
                family_id: row.try_get("family_id")?,
                genus_id: row.try_get("genus_id")?,
                sector_id: row.try_get("sector_id")?,
                biometric_id: row.try_get("biometric_id")?,
                species: row.try_get("species")?,
                synonyms: row.try_get("synonyms")?,
                variety: row.try_get("variety")?,
                form: row.try_get("form")?,
                plant_origin: row.try_get("plant_origin")?,
                natural_habitat: row.try_get("natural_habitat")?,
                determined: row.try_get("determined")?,
                ecology_biology: row.try_get("ecology_biology")?,
                economic_use: row.try_get("economic_use")?,
                date_of_planting: row.try_get("date_of_planting")?,
                originator: row.try_get("originator")?,
                country: row.try_get("country")?,
                protection_status: row.try_get("protection_status")?,
                herbarium_presence: row.try_get("herbarium_presence")?,
                herbarium_duplicate: row.try_get("herbarium_duplicate")?,
                filled_out: row.try_get("filled_out")?,
                image_path: row.try_get("image_path")?,
                latitude: row.try_get("latitude")?,
                longitude: row.try_get("longitude")?,
                note: row.try_get("note")?,
                observation_date: row.try_get("observation_date")?,
                year_of_observation: row.try_get("year_of_observation")?,
                phenophase_date: row.try_get("phenophase_date")?,
                measurement_year: row.try_get("measurement_year")?,
                measurement_type: row.try_get("measurement_type")?,
                measurement_value: row.try_get("measurement_value")?,
            },
        })
    }

    fn rows_to_plants(rows: &[MySqlRow]) -> Result<Vec<Plant>, DomainError> {
        rows.iter()
            .map(Self::row_to_plant)
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_failed("Failed to decode plant row"))
    }
}

#[async_trait]
impl PlantRepository for MySqlPlantRepository {
    async fn list_by_sector(&self, sector_id: i64) -> Result<Vec<PlantWithTaxonomy>, DomainError> {
        let query = format!(
            "SELECT {}, f.name AS family_name, g.name AS genus_name \
             FROM plants p \
             LEFT JOIN plant_families f ON f.id = p.family_id \
             LEFT JOIN genera g ON g.id = p.genus_id \
             WHERE p.sector_id = ? \
             ORDER BY p.id",
            select_columns("p.")
        );

        let rows = sqlx::query(&query)
            .bind(sector_id)
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("Failed to list plants by sector"))?;

        rows.iter()
            .map(|row| -> Result<PlantWithTaxonomy, sqlx::Error> {
                Ok(PlantWithTaxonomy {
                    plant: Self::row_to_plant(row)?,
                    family_name: row.try_get("family_name")?,
                    genus_name: row.try_get("genus_name")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_failed("Failed to decode plant row"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Plant>, DomainError> {
        let query = format!("SELECT {} FROM plants WHERE id = ?", select_columns(""));

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find plant"))?;

        row.as_ref()
            .map(Self::row_to_plant)
            .transpose()
            .map_err(query_failed("Failed to decode plant row"))
    }

    async fn find_many(&self, ids: &[i64]) -> Result<Vec<Plant>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT {} FROM plants WHERE id IN ({}) ORDER BY id",
            select_columns(""),
            placeholders(ids.len())
        );

        let rows = ids
            .iter()
            .fold(sqlx::query(&query), |q, id| q.bind(*id))
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("Failed to load plants"))?;

        Self::rows_to_plants(&rows)
    }

    async fn create(&self, plant: NewPlant) -> Result<Plant, DomainError> {
        let query = format!(
            "INSERT INTO plants ({}) VALUES ({})",
            PLANT_COLUMNS.join(", "),
            placeholders(PLANT_COLUMNS.len())
        );

        let result = bind_details(sqlx::query(&query), &plant)
            .execute(&self.pool)
            .await
            .map_err(query_failed("Failed to insert plant"))?;

        Ok(Plant::new(result.last_insert_id() as i64, plant))
    }

    async fn update_many(&self, plants: &[Plant]) -> Result<(), DomainError> {
        if plants.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(query_failed("Failed to begin transaction"))?;

        // Lock the rows and make sure every one of them still exists
        let lock = format!(
            "SELECT id FROM plants WHERE id IN ({}) FOR UPDATE",
            placeholders(plants.len())
        );
        let locked = plants
            .iter()
            .fold(sqlx::query(&lock), |q, p| q.bind(p.id))
            .fetch_all(&mut *tx)
            .await
            .map_err(query_failed("Failed to lock plants"))?;

        let mut unique: Vec<i64> = plants.iter().map(|p| p.id).collect();
        unique.sort_unstable();
        unique.dedup();
        if locked.len() != unique.len() {
            tx.rollback()
                .await
                .map_err(query_failed("Failed to roll back transaction"))?;
            return Err(DomainError::not_found("Plant"));
        }

        let update = format!(
            "UPDATE plants SET {} WHERE id = ?",
            PLANT_COLUMNS
                .iter()
                .map(|c| format!("{} = ?", c))
                .collect::<Vec<_>>()
                .join(", ")
        );
        for plant in plants {
            bind_details(sqlx::query(&update), &plant.details)
                .bind(plant.id)
                .execute(&mut *tx)
                .await
                .map_err(query_failed("Failed to update plant"))?;
        }

        tx.commit()
            .await
            .map_err(query_failed("Failed to commit plant updates"))?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM plants WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed("Failed to delete plant"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let query = format!("DELETE FROM plants WHERE id IN ({})", placeholders(ids.len()));

        let result = ids
            .iter()
            .fold(sqlx::query(&query), |q, id| q.bind(*id))
            .execute(&self.pool)
            .await
            .map_err(query_failed("Failed to delete plants"))?;

        Ok(result.rows_affected())
    }

    async fn list_with_coordinates(&self) -> Result<Vec<Plant>, DomainError> {
        let query = format!(
            "SELECT {} FROM plants \
             WHERE latitude IS NOT NULL AND longitude IS NOT NULL \
             ORDER BY id",
            select_columns("")
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("Failed to list plants with coordinates"))?;

        Self::rows_to_plants(&rows)
    }
}
