//! Definición del schema de base de datos
//!
//! SQL para crear todas las tablas del sistema. La restricción
//! UNIQUE(user_id, passenger_count) de sharing_groups respalda el
//! find-or-create atómico de grupos (un solo INSERT .. ON CONFLICT).

/// SQL para crear todas las tablas
pub const SCHEMA: &str = r#"
-- Usuarios
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    full_name VARCHAR(100) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Perfiles (uno a uno con users)
CREATE TABLE IF NOT EXISTS profiles (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
    mobile VARCHAR(20) NOT NULL,
    gender SMALLINT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Vehículos de conductores
CREATE TABLE IF NOT EXISTS vehicles (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    plate_number VARCHAR(20) NOT NULL,
    vehicle_type SMALLINT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE(owner_id, plate_number)
);

-- Solicitudes de ride
CREATE TABLE IF NOT EXISTS rides (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    destination TEXT NOT NULL,
    arrive_time TIMESTAMPTZ NOT NULL,
    passenger_count INTEGER NOT NULL,
    vehicle_type SMALLINT NOT NULL,
    vehicle_id UUID REFERENCES vehicles(id) ON DELETE SET NULL,
    confirmed BOOLEAN NOT NULL DEFAULT FALSE,
    completed BOOLEAN NOT NULL DEFAULT FALSE,
    if_share BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_rides_owner ON rides(owner_id);
CREATE INDEX IF NOT EXISTS idx_rides_arrive_time ON rides(arrive_time);
CREATE INDEX IF NOT EXISTS idx_rides_open_share ON rides(confirmed, completed, if_share);

-- Grupos de compartición: un bucket por (usuario, tamaño de grupo)
CREATE TABLE IF NOT EXISTS sharing_groups (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    passenger_count INTEGER NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE(user_id, passenger_count)
);

-- Relación M2M ride <-> grupo ("shared_by")
CREATE TABLE IF NOT EXISTS ride_groups (
    ride_id UUID NOT NULL REFERENCES rides(id) ON DELETE CASCADE,
    group_id UUID NOT NULL REFERENCES sharing_groups(id) ON DELETE CASCADE,
    PRIMARY KEY (ride_id, group_id)
);

CREATE INDEX IF NOT EXISTS idx_ride_groups_group ON ride_groups(group_id);
"#;
