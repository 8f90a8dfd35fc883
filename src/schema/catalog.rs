//! Catálogo de entidades
//!
//! Orden fijo de creación. Cada entidad solo referencia entidades que
//! aparecen antes en la lista; el borrado y el truncado recorren la misma
//! lista en sentido inverso. Cambiar este orden exige una migración
//! compatible con el esquema desplegado.

use super::definition::{ColumnDef, EntityDef, IndexDef};

const ID: ColumnDef = ColumnDef::new("id", "uuid")
    .default_value("gen_random_uuid()")
    .primary_key();
const CREATED_AT: ColumnDef = ColumnDef::new("created_at", "timestamptz")
    .not_null()
    .default_value("now()");
const UPDATED_AT: ColumnDef = ColumnDef::new("updated_at", "timestamptz")
    .not_null()
    .default_value("now()");

pub const USER: EntityDef = EntityDef {
    name: "User",
    table: "user",
    columns: &[
        ID,
        ColumnDef::new("username", "varchar(50)").not_null(),
        ColumnDef::new("email", "varchar(120)"),
        ColumnDef::new("password_hash", "text"),
        ColumnDef::new("role", "varchar(20)").not_null(),
        ColumnDef::new("is_active", "boolean").not_null().default_value("true"),
        CREATED_AT,
        UPDATED_AT,
    ],
    indexes: &[IndexDef::unique("idx_user_username", &["username"])],
};

pub const USER_INFO: EntityDef = EntityDef {
    name: "UserInfo",
    table: "user_info",
    columns: &[
        ID,
        ColumnDef::new("user_id", "uuid").not_null().references("user"),
        ColumnDef::new("first_name", "varchar(80)").not_null(),
        ColumnDef::new("last_name", "varchar(80)").not_null(),
        ColumnDef::new("document_type", "varchar(10)"),
        ColumnDef::new("document_number", "varchar(20)"),
        ColumnDef::new("phone_number", "varchar(20)"),
    ],
    indexes: &[IndexDef::unique("idx_user_info_user_id", &["user_id"])],
};

pub const DRIVER: EntityDef = EntityDef {
    name: "Driver",
    table: "driver",
    columns: &[
        ID,
        ColumnDef::new("user_id", "uuid").not_null().references("user"),
        ColumnDef::new("license_number", "varchar(30)").not_null(),
        ColumnDef::new("license_category", "varchar(10)").not_null(),
        ColumnDef::new("license_expiration", "timestamptz").not_null(),
        ColumnDef::new("status", "varchar(20)").not_null().default_value("'ACTIVE'"),
        ColumnDef::new("hire_date", "timestamptz"),
        ColumnDef::new("termination_date", "timestamptz"),
    ],
    indexes: &[IndexDef::unique("idx_driver_user_id", &["user_id"])],
};

pub const OAUTH_ACCOUNT: EntityDef = EntityDef {
    name: "OAuthAccount",
    table: "oauth_account",
    columns: &[
        ID,
        ColumnDef::new("user_id", "uuid").not_null().references("user"),
        ColumnDef::new("provider", "varchar(100)").not_null(),
        ColumnDef::new("provider_account_id", "varchar(255)").not_null(),
        ColumnDef::new("email", "varchar(200)"),
        CREATED_AT,
    ],
    indexes: &[IndexDef::index("idx_oauth_account_user_id", &["user_id"])],
};

pub const CREDENTIAL: EntityDef = EntityDef {
    name: "Credential",
    table: "credential",
    columns: &[
        ID,
        ColumnDef::new("user_id", "uuid").not_null().references("user"),
        ColumnDef::new("password_hash", "text").not_null(),
        ColumnDef::new("provider", "varchar(30)")
            .not_null()
            .default_value("'credentials'"),
        CREATED_AT,
        UPDATED_AT,
    ],
    indexes: &[IndexDef::index("idx_credential_user_id", &["user_id"])],
};

pub const VEHICLE: EntityDef = EntityDef {
    name: "Vehicle",
    table: "vehicle",
    columns: &[
        ID,
        ColumnDef::new("plate", "varchar(10)").not_null(),
        // Tipo y estado de vehículo no tienen tabla propia todavía
        ColumnDef::new("vehicle_type_id", "uuid").not_null(),
        ColumnDef::new("vehicle_status_id", "uuid").not_null(),
        ColumnDef::new("manufacture_year", "smallint").not_null(),
        ColumnDef::new("tank_capacity_l", "numeric(10,2)"),
        ColumnDef::new("reference_km_per_l", "numeric(10,2)"),
        CREATED_AT,
        ColumnDef::new("deactivated_at", "timestamptz"),
    ],
    indexes: &[IndexDef::unique("idx_vehicle_plate", &["plate"])],
};

pub const ROUTE: EntityDef = EntityDef {
    name: "Route",
    table: "route",
    columns: &[
        ID,
        ColumnDef::new("code", "varchar(20)").not_null(),
        ColumnDef::new("origin", "varchar(80)").not_null(),
        ColumnDef::new("destination", "varchar(80)").not_null(),
        ColumnDef::new("distance_km", "numeric(10,2)").not_null(),
        ColumnDef::new("estimated_duration_min", "integer"),
        ColumnDef::new("is_active", "boolean").not_null().default_value("true"),
    ],
    indexes: &[IndexDef::unique("idx_route_code", &["code"])],
};

pub const TRIP_STATUS: EntityDef = EntityDef {
    name: "TripStatus",
    table: "trip_status",
    columns: &[
        ID,
        ColumnDef::new("name", "varchar(30)").not_null(),
        ColumnDef::new("description", "text"),
    ],
    indexes: &[],
};

pub const ASSIGNMENT_DRIVER_VEHICLE: EntityDef = EntityDef {
    name: "AssignmentDriverVehicle",
    table: "assignment_driver_vehicle",
    columns: &[
        ID,
        ColumnDef::new("driver_id", "uuid").not_null().references("driver"),
        ColumnDef::new("vehicle_id", "uuid").not_null().references("vehicle"),
        ColumnDef::new("start_date", "timestamptz").not_null(),
        ColumnDef::new("end_date", "timestamptz"),
    ],
    indexes: &[],
};

pub const TRIP: EntityDef = EntityDef {
    name: "Trip",
    table: "trip",
    columns: &[
        ID,
        ColumnDef::new("trip_code", "varchar(30)"),
        ColumnDef::new("route_id", "uuid").not_null().references("route"),
        ColumnDef::new("vehicle_id", "uuid").not_null().references("vehicle"),
        ColumnDef::new("driver_id", "uuid").not_null().references("driver"),
        ColumnDef::new("planned_departure_at", "timestamptz").not_null(),
        ColumnDef::new("planned_arrival_at", "timestamptz"),
        ColumnDef::new("actual_departure_at", "timestamptz"),
        ColumnDef::new("actual_arrival_at", "timestamptz"),
        ColumnDef::new("odometer_start_km", "numeric(12,2)"),
        ColumnDef::new("odometer_end_km", "numeric(12,2)"),
        ColumnDef::new("fuel_start_l", "numeric(10,2)"),
        ColumnDef::new("fuel_end_l", "numeric(10,2)"),
        ColumnDef::new("trip_status_id", "uuid").not_null().references("trip_status"),
        ColumnDef::new("notes", "text"),
    ],
    indexes: &[IndexDef::unique("idx_trip_trip_code", &["trip_code"])],
};

static CATALOG: [EntityDef; 10] = [
    // CORE AUTH / USERS
    USER,
    USER_INFO,
    DRIVER,
    OAUTH_ACCOUNT,
    CREDENTIAL,
    // TRANSPORT CORE
    VEHICLE,
    ROUTE,
    TRIP_STATUS,
    ASSIGNMENT_DRIVER_VEHICLE,
    TRIP,
];

/// Entidades en orden de creación
pub fn catalog() -> &'static [EntityDef] {
    &CATALOG
}

/// Orden de creación: dependencias primero
pub fn creation_order() -> impl DoubleEndedIterator<Item = &'static EntityDef> {
    CATALOG.iter()
}

/// Orden de borrado: dependientes primero
pub fn drop_order() -> impl Iterator<Item = &'static EntityDef> {
    CATALOG.iter().rev()
}

pub fn find_entity(name: &str) -> Option<&'static EntityDef> {
    CATALOG.iter().find(|e| e.name == name || e.table == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::definition::validate_order;

    #[test]
    fn test_catalog_order_is_fixed() {
        let names: Vec<&str> = catalog().iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec![
                "User",
                "UserInfo",
                "Driver",
                "OAuthAccount",
                "Credential",
                "Vehicle",
                "Route",
                "TripStatus",
                "AssignmentDriverVehicle",
                "Trip",
            ]
        );
    }

    #[test]
    fn test_catalog_respects_dependencies() {
        assert!(validate_order(catalog()).is_ok());
    }

    #[test]
    fn test_drop_order_is_reverse() {
        let tables: Vec<&str> = drop_order().map(|e| e.table).collect();
        assert_eq!(tables.first(), Some(&"trip"));
        assert_eq!(tables.last(), Some(&"user"));
        assert_eq!(tables.len(), catalog().len());
    }

    #[test]
    fn test_table_names() {
        let tables: Vec<&str> = creation_order().map(|e| e.table).collect();
        assert_eq!(
            tables,
            vec![
                "user",
                "user_info",
                "driver",
                "oauth_account",
                "credential",
                "vehicle",
                "route",
                "trip_status",
                "assignment_driver_vehicle",
                "trip",
            ]
        );
    }

    #[test]
    fn test_every_entity_has_primary_key() {
        for entity in catalog() {
            let id = entity.column("id").expect("id column");
            assert!(id.primary_key, "{} has no primary key", entity.name);
        }
    }

    #[test]
    fn test_trip_dependencies() {
        let trip = find_entity("Trip").unwrap();
        assert_eq!(trip.dependencies(), vec!["route", "vehicle", "driver", "trip_status"]);
        assert_eq!(find_entity("trip_status"), Some(&TRIP_STATUS));
    }

    #[test]
    fn test_user_table_is_quoted() {
        assert!(USER.create_table_sql().contains("\"user\""));
        assert!(USER_INFO
            .create_table_sql()
            .contains("REFERENCES \"user\" (\"id\")"));
    }
}
