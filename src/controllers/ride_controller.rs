use crate::models::ride::{
    ConfirmRideRequest, CoRider, DriverInfo, EditRideFormContext, JoinRideRequest, Ride,
    RideDetailResponse, RideRequest, RideResponse, SearchResultsResponse, SearchRideRequest,
    StartedRidesResponse,
};
use crate::models::user::gender_label;
use crate::models::vehicle::VehicleType;
use crate::repositories::group_repository::GroupRepository;
use crate::repositories::ride_repository::RideRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_form_datetime;
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;
use validator::Validate;

pub struct RideController {
    rides: RideRepository,
    groups: GroupRepository,
    users: UserRepository,
    vehicles: VehicleRepository,
}

impl RideController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            rides: RideRepository::new(pool.clone()),
            groups: GroupRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    /// Crear una solicitud de ride. El bucket (usuario, pasajeros) se
    /// resuelve antes de crear el ride y queda enlazado al terminar.
    pub async fn require_ride(
        &self,
        user_id: Uuid,
        request: RideRequest,
    ) -> Result<RideResponse, AppError> {
        request.validate()?;

        let arrive_time = validate_form_datetime(&request.arrive_time).map_err(|_| {
            AppError::BadRequest("Formato de fecha inválido, se espera YYYY-MM-DDTHH:MM".to_string())
        })?;

        let group = self
            .groups
            .find_or_create(user_id, request.passenger_count)
            .await?;

        let ride = self
            .rides
            .create(
                user_id,
                &request.destination,
                arrive_time,
                request.passenger_count,
                request.vehicle_type,
                request.if_share,
            )
            .await?;

        self.rides.attach_group(ride.id, group.id).await?;

        log::info!(
            "🚗 Ride creado: {} hacia {} ({} pasajeros)",
            ride.id,
            ride.destination,
            ride.passenger_count
        );

        Ok(RideResponse::from(ride))
    }

    /// Rides del usuario agrupados por estado
    pub async fn started_rides(&self, user_id: Uuid) -> Result<StartedRidesResponse, AppError> {
        let (open, confirmed, completed) = futures::try_join!(
            self.rides.find_by_owner_and_status(user_id, false, false),
            self.rides.find_by_owner_and_status(user_id, true, false),
            self.rides.find_by_owner_and_status(user_id, true, true),
        )?;

        Ok(StartedRidesResponse {
            open_rides: open.into_iter().map(RideResponse::from).collect(),
            confirmed_rides: confirmed.into_iter().map(RideResponse::from).collect(),
            completed_rides: completed.into_iter().map(RideResponse::from).collect(),
        })
    }

    /// Detalle de un ride propio con conductor y compañeros de viaje
    pub async fn ride_detail(
        &self,
        user_id: Uuid,
        ride_id: Uuid,
    ) -> Result<RideDetailResponse, AppError> {
        let ride = self.find_owned(user_id, ride_id).await?;

        let owner = self
            .users
            .find_by_id(ride.owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let driver = match ride.vehicle_id {
            Some(vehicle_id) => match self.rides.find_driver(vehicle_id).await? {
                Some(row) => DriverInfo {
                    driver: row.full_name,
                    plate: row.plate_number,
                    driver_phone: row.mobile.unwrap_or_else(|| "Unknown".to_string()),
                    driver_email: row.email,
                },
                None => DriverInfo::not_assigned(),
            },
            None => DriverInfo::not_assigned(),
        };

        let shared_by = self
            .rides
            .find_co_riders(ride.id, user_id)
            .await?
            .into_iter()
            .map(|row| CoRider {
                full_name: row.full_name,
                gender_label: gender_label(row.gender.unwrap_or(2)),
                party_size: row.passenger_count,
            })
            .collect();

        Ok(RideDetailResponse {
            ride: RideResponse::from(ride),
            owner_name: owner.full_name,
            driver,
            shared_by,
        })
    }

    /// Cancelar (borrar) un ride propio
    pub async fn cancel_ride(&self, user_id: Uuid, ride_id: Uuid) -> Result<(), AppError> {
        let ride = self.find_owned(user_id, ride_id).await?;
        self.rides.delete(ride.id).await?;
        Ok(())
    }

    /// Formulario de edición con los valores actuales del ride
    pub async fn edit_form(
        &self,
        user_id: Uuid,
        ride_id: Uuid,
    ) -> Result<EditRideFormContext, AppError> {
        let ride = self.find_owned(user_id, ride_id).await?;
        Ok(EditRideFormContext::new(ride))
    }

    /// Guardar cambios en un ride propio
    // TODO: re-bucket the owner's sharing group when passenger_count changes
    pub async fn edit_ride(
        &self,
        user_id: Uuid,
        ride_id: Uuid,
        request: RideRequest,
    ) -> Result<RideResponse, AppError> {
        request.validate()?;

        let arrive_time = validate_form_datetime(&request.arrive_time).map_err(|_| {
            AppError::BadRequest("Formato de fecha inválido, se espera YYYY-MM-DDTHH:MM".to_string())
        })?;

        let ride = self.find_owned(user_id, ride_id).await?;

        let updated = self
            .rides
            .update(
                ride.id,
                &request.destination,
                arrive_time,
                request.passenger_count,
                request.vehicle_type,
                request.if_share,
            )
            .await?;

        Ok(RideResponse::from(updated))
    }

    /// Buscar rides compartidos de otros usuarios dentro de la ventana
    /// de llegada. Los candidatos de la consulta pasan por tres filtros
    /// secuenciales: grupos ya unidos, palabras del destino y capacidad.
    pub async fn search_rides(
        &self,
        user_id: Uuid,
        request: SearchRideRequest,
    ) -> Result<SearchResultsResponse, AppError> {
        request.validate()?;

        let start = validate_form_datetime(&request.start).map_err(|_| {
            AppError::BadRequest("Formato de fecha inválido, se espera YYYY-MM-DDTHH:MM".to_string())
        })?;
        let end = validate_form_datetime(&request.end).map_err(|_| {
            AppError::BadRequest("Formato de fecha inválido, se espera YYYY-MM-DDTHH:MM".to_string())
        })?;

        let rides = self.rides.search_candidates(user_id, start, end).await?;
        let ride_ids: Vec<Uuid> = rides.iter().map(|r| r.id).collect();

        let links = self.rides.group_links_for_rides(&ride_ids).await?;
        let sums = self.rides.passenger_sums_for_rides(&ride_ids).await?;

        let mut groups_by_ride: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
        for link in links {
            groups_by_ride
                .entry(link.ride_id)
                .or_default()
                .insert(link.group_id);
        }
        let mut passengers_by_ride: HashMap<Uuid, i64> = sums.into_iter().collect();

        let candidates: Vec<SearchCandidate> = rides
            .into_iter()
            .map(|ride| SearchCandidate {
                group_ids: groups_by_ride.remove(&ride.id).unwrap_or_default(),
                current_passengers: passengers_by_ride.remove(&ride.id).unwrap_or(0),
                ride,
            })
            .collect();

        let my_group_ids: HashSet<Uuid> = self
            .groups
            .find_by_user(user_id)
            .await?
            .into_iter()
            .map(|g| g.id)
            .collect();

        let candidates = exclude_joined(candidates, &my_group_ids);
        let candidates = filter_by_destination(candidates, &request.address);
        let candidates = filter_by_capacity(candidates, request.passenger_count);

        let results: Vec<RideResponse> = candidates
            .into_iter()
            .map(|c| RideResponse::from(c.ride))
            .collect();

        log::info!("🔍 Búsqueda de rides: {} resultados", results.len());

        Ok(SearchResultsResponse::new(results))
    }

    /// Unirse a un ride compartido de otro usuario
    pub async fn join_ride(
        &self,
        user_id: Uuid,
        ride_id: Uuid,
        request: JoinRideRequest,
    ) -> Result<RideResponse, AppError> {
        request.validate()?;

        let ride = self
            .rides
            .find_by_id(ride_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride no encontrado".to_string()))?;

        if ride.owner_id == user_id {
            return Err(AppError::Conflict(
                "No puedes unirte a tu propio ride".to_string(),
            ));
        }
        if !ride.if_share || ride.confirmed || ride.completed {
            return Err(AppError::Conflict(
                "El ride no acepta compañeros".to_string(),
            ));
        }

        let my_group_ids: HashSet<Uuid> = self
            .groups
            .find_by_user(user_id)
            .await?
            .into_iter()
            .map(|g| g.id)
            .collect();
        let already_joined = self
            .rides
            .group_links_for_rides(&[ride.id])
            .await?
            .iter()
            .any(|link| my_group_ids.contains(&link.group_id));
        if already_joined {
            return Err(AppError::Conflict(
                "Ya estás unido a este ride".to_string(),
            ));
        }

        // Re-verificar capacidad con los pasajeros actuales
        let current = self.rides.passenger_sum(ride.id).await?;
        let capacity = match VehicleType::from_code(ride.vehicle_type) {
            Some(vt) => vt.capacity() as i64,
            None => 0,
        };
        if request.passenger_count as i64 + current + 1 > capacity {
            return Err(AppError::Conflict(
                "No hay asientos suficientes".to_string(),
            ));
        }

        let group = self
            .groups
            .find_or_create(user_id, request.passenger_count)
            .await?;
        self.rides.attach_group(ride.id, group.id).await?;

        Ok(RideResponse::from(ride))
    }

    /// Confirmar un ride abierto asignando un vehículo propio. El
    /// solicitante no puede conducir su propio ride y el vehículo debe
    /// tener asientos para todos los pasajeros más el conductor.
    pub async fn confirm_ride(
        &self,
        user_id: Uuid,
        ride_id: Uuid,
        request: ConfirmRideRequest,
    ) -> Result<RideResponse, AppError> {
        let ride = self
            .rides
            .find_by_id(ride_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride no encontrado".to_string()))?;

        if ride.owner_id == user_id {
            return Err(AppError::Conflict(
                "No puedes confirmar tu propio ride".to_string(),
            ));
        }

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if vehicle.owner_id != user_id {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        let current = self.rides.passenger_sum(ride.id).await?;
        let capacity = match VehicleType::from_code(vehicle.vehicle_type) {
            Some(vt) => vt.capacity() as i64,
            None => 0,
        };
        if current + 1 > capacity {
            return Err(AppError::Conflict(
                "El vehículo no tiene asientos suficientes".to_string(),
            ));
        }

        // El UPDATE condicional resuelve la carrera entre dos conductores
        let updated = self
            .rides
            .assign_vehicle(ride.id, vehicle.id)
            .await?
            .ok_or_else(|| AppError::Conflict("El ride ya no está abierto".to_string()))?;

        Ok(RideResponse::from(updated))
    }

    /// Marcar un ride confirmado como completado. Solo puede hacerlo
    /// el dueño del vehículo asignado.
    pub async fn complete_ride(
        &self,
        user_id: Uuid,
        ride_id: Uuid,
    ) -> Result<RideResponse, AppError> {
        let ride = self
            .rides
            .find_by_id(ride_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride no encontrado".to_string()))?;

        let vehicle_id = ride.vehicle_id.ok_or_else(|| {
            AppError::Conflict("Solo un ride confirmado puede completarse".to_string())
        })?;
        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride no encontrado".to_string()))?;
        if vehicle.owner_id != user_id {
            return Err(AppError::NotFound("Ride no encontrado".to_string()));
        }

        let updated = self
            .rides
            .mark_completed(ride.id)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Solo un ride confirmado puede completarse".to_string())
            })?;

        Ok(RideResponse::from(updated))
    }

    /// Cargar un ride verificando que pertenece al usuario. Un ride
    /// ajeno responde igual que uno inexistente.
    async fn find_owned(&self, user_id: Uuid, ride_id: Uuid) -> Result<Ride, AppError> {
        let ride = self
            .rides
            .find_by_id(ride_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride no encontrado".to_string()))?;

        if ride.owner_id != user_id {
            return Err(AppError::NotFound("Ride no encontrado".to_string()));
        }

        Ok(ride)
    }
}

/// Candidato de búsqueda con su estado de compartición ya cargado
#[derive(Debug)]
struct SearchCandidate {
    ride: Ride,
    group_ids: HashSet<Uuid>,
    current_passengers: i64,
}

/// Descartar rides que ya comparten algún grupo del usuario
fn exclude_joined(
    mut candidates: Vec<SearchCandidate>,
    my_group_ids: &HashSet<Uuid>,
) -> Vec<SearchCandidate> {
    for group_id in my_group_ids {
        candidates.retain(|c| !c.group_ids.contains(group_id));
    }
    candidates
}

/// Cada palabra buscada debe aparecer en el destino, sin distinguir
/// mayúsculas
fn filter_by_destination(
    mut candidates: Vec<SearchCandidate>,
    destination: &str,
) -> Vec<SearchCandidate> {
    let keywords = destination.to_lowercase();
    for word in keywords.split_whitespace() {
        candidates.retain(|c| c.ride.destination.to_lowercase().contains(word));
    }
    candidates
}

/// Capacidad: pasajeros solicitados + pasajeros actuales + conductor
/// no puede superar los asientos del tipo de vehículo
fn filter_by_capacity(
    mut candidates: Vec<SearchCandidate>,
    requested: i32,
) -> Vec<SearchCandidate> {
    candidates.retain(|c| {
        let capacity = match VehicleType::from_code(c.ride.vehicle_type) {
            Some(vt) => vt.capacity() as i64,
            None => 0,
        };
        requested as i64 + c.current_passengers + 1 <= capacity
    });
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn mk_ride(destination: &str, vehicle_type: i16) -> Ride {
        Ride {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            destination: destination.to_string(),
            arrive_time: Utc::now(),
            passenger_count: 1,
            vehicle_type,
            vehicle_id: None,
            confirmed: false,
            completed: false,
            if_share: true,
            created_at: Utc::now(),
        }
    }

    fn mk_candidate(destination: &str, vehicle_type: i16, current_passengers: i64) -> SearchCandidate {
        SearchCandidate {
            ride: mk_ride(destination, vehicle_type),
            group_ids: HashSet::new(),
            current_passengers,
        }
    }

    #[test]
    fn test_status_labels() {
        let mut ride = mk_ride("Airport", 0);
        assert_eq!(ride.status(), "Open");

        ride.confirmed = true;
        assert_eq!(ride.status(), "Confirmed");

        ride.completed = true;
        assert_eq!(ride.status(), "Completed");

        // completed domina aunque confirmed quede en false
        ride.confirmed = false;
        assert_eq!(ride.status(), "Completed");
    }

    #[test]
    fn test_capacity_table() {
        let capacities: Vec<i32> = VehicleType::all().iter().map(|vt| vt.capacity()).collect();
        assert_eq!(capacities, vec![4, 6, 2, 4, 7]);

        let labels: Vec<&str> = VehicleType::all().iter().map(|vt| vt.label()).collect();
        assert_eq!(labels, vec!["Sedan", "SUV", "Coupe", "Hatchback", "Mini van"]);
    }

    #[test]
    fn test_exclude_joined() {
        let my_group = Uuid::new_v4();
        let other_group = Uuid::new_v4();

        let mut joined = mk_candidate("Downtown", 0, 0);
        joined.group_ids.insert(my_group);
        let mut not_joined = mk_candidate("Uptown", 0, 0);
        not_joined.group_ids.insert(other_group);

        let my_groups: HashSet<Uuid> = [my_group].into_iter().collect();
        let result = exclude_joined(vec![joined, not_joined], &my_groups);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].ride.destination, "Uptown");
    }

    #[test]
    fn test_filter_by_destination_requires_all_words() {
        let candidates = vec![
            mk_candidate("Central Station North", 0, 0),
            mk_candidate("Central Park", 0, 0),
            mk_candidate("North Station", 0, 0),
        ];

        let result = filter_by_destination(candidates, "station north");
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].ride.destination, "Central Station North");
        assert_eq!(result[1].ride.destination, "North Station");
    }

    #[test]
    fn test_filter_by_destination_is_case_insensitive() {
        let candidates = vec![mk_candidate("AIRPORT Terminal 2", 0, 0)];
        let result = filter_by_destination(candidates, "airport TERMINAL");
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_filter_by_destination_empty_keyword_keeps_all() {
        let candidates = vec![mk_candidate("Anywhere", 0, 0)];
        let result = filter_by_destination(candidates, "   ");
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_filter_by_capacity() {
        // Sedan: 4 asientos. Con 1 pasajero actual y conductor quedan 2.
        let sedan = mk_candidate("A", 0, 1);
        assert_eq!(filter_by_capacity(vec![sedan], 2).len(), 1);

        let sedan_full = mk_candidate("B", 0, 1);
        assert_eq!(filter_by_capacity(vec![sedan_full], 3).len(), 0);

        // Coupe: 2 asientos, nunca cabe un segundo grupo
        let coupe = mk_candidate("C", 2, 1);
        assert_eq!(filter_by_capacity(vec![coupe], 1).len(), 0);

        // Mini van: 7 asientos
        let van = mk_candidate("D", 4, 2);
        assert_eq!(filter_by_capacity(vec![van], 4).len(), 1);
    }

    #[test]
    fn test_search_results_message() {
        let response = SearchResultsResponse::new(vec![]);
        assert_eq!(response.message, "0 orders found: ");

        let rides = vec![RideResponse::from(mk_ride("X", 0))];
        let response = SearchResultsResponse::new(rides);
        assert_eq!(response.message, "1 orders found: ");
    }

    #[test]
    fn test_driver_placeholders() {
        let info = DriverInfo::not_assigned();
        assert_eq!(info.driver, "Not assigned yet");
        assert_eq!(info.plate, "Unknown");
        assert_eq!(info.driver_phone, "Unknown");
        assert_eq!(info.driver_email, "Unknown");
    }
}
