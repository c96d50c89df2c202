//! Row types mapping the `bodies` table to the domain model.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::bodies;
use crate::api::{BodyId, CelestialBody, NewCelestialBody};

/// A row fetched from the `bodies` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[allow(dead_code)] // Some fields used only for database operations
#[diesel(table_name = bodies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BodyRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub radius: f64,
    pub orbital_radius: f64,
    pub orbital_speed: f64,
    pub color: String,
    pub image_src: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BodyRow> for CelestialBody {
    fn from(row: BodyRow) -> Self {
        CelestialBody {
            id: BodyId::new(row.id),
            name: row.name,
            description: row.description,
            radius: row.radius,
            orbital_radius: row.orbital_radius,
            orbital_speed: row.orbital_speed,
            color: row.color,
            image_src: row.image_src,
        }
    }
}

/// A row awaiting insertion; `id` and `created_at` come from the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bodies)]
pub struct NewBodyRow {
    pub name: String,
    pub description: String,
    pub radius: f64,
    pub orbital_radius: f64,
    pub orbital_speed: f64,
    pub color: String,
    pub image_src: Option<String>,
}

impl From<NewCelestialBody> for NewBodyRow {
    fn from(body: NewCelestialBody) -> Self {
        NewBodyRow {
            name: body.name.trim().to_string(),
            description: body.description,
            radius: body.radius,
            orbital_radius: body.orbital_radius,
            orbital_speed: body.orbital_speed,
            color: body.color,
            image_src: body.image_src,
        }
    }
}
